/// Security utilities
///
/// The accounts service does not authenticate requests. The only security
/// concern it owns is storing passwords as one-way salted hashes.
///
/// # Modules
///
/// - `password`: Argon2id password hashing and verification

pub mod password;
