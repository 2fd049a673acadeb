/// Password hashing using Argon2id
///
/// Plaintext passwords never reach storage. They are hashed once on user
/// creation and the PHC string (algorithm, parameters, salt and digest) is
/// what the `users.password_hash` column holds.
///
/// # Parameters
///
/// - **Algorithm**: Argon2id, version 0x13
/// - **Memory**: 19 MiB (19456 KiB)
/// - **Iterations**: 2 passes
/// - **Parallelism**: 1 lane
/// - **Salt**: 16 random bytes from the OS RNG
///
/// # Example
///
/// ```
/// use accounts_shared::auth::password::{hash_password, verify_password};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let hash = hash_password("secret")?;
///
/// assert!(verify_password("secret", &hash)?);
/// assert!(!verify_password("not-secret", &hash)?);
/// # Ok(())
/// # }
/// ```

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Algorithm, Argon2, ParamsBuilder, Version,
};

/// Memory cost in KiB
pub const MEMORY_COST_KIB: u32 = 19456;

/// Number of passes over memory
pub const TIME_COST: u32 = 2;

/// Degree of parallelism
pub const PARALLELISM: u32 = 1;

/// Error type for password hashing operations
#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    /// Failed to hash password
    #[error("Failed to hash password: {0}")]
    HashError(String),

    /// Failed to verify password
    #[error("Failed to verify password: {0}")]
    VerifyError(String),

    /// Invalid password hash format
    #[error("Invalid password hash format: {0}")]
    InvalidHash(String),
}

fn hasher() -> Result<Argon2<'static>, PasswordError> {
    let params = ParamsBuilder::new()
        .m_cost(MEMORY_COST_KIB)
        .t_cost(TIME_COST)
        .p_cost(PARALLELISM)
        .output_len(32)
        .build()
        .map_err(|e| PasswordError::HashError(format!("Invalid parameters: {}", e)))?;

    Ok(Argon2::new(Algorithm::Argon2id, Version::V0x13, params))
}

/// Hashes a plaintext password with a fresh random salt
///
/// Returns the PHC string, e.g.
/// `$argon2id$v=19$m=19456,t=2,p=1$<salt>$<hash>`.
///
/// This is CPU-bound; async callers should run it on the blocking pool.
///
/// # Errors
///
/// Returns `PasswordError::HashError` if hashing fails
pub fn hash_password(password: &str) -> Result<String, PasswordError> {
    let salt = SaltString::generate(&mut OsRng);

    let password_hash = hasher()?
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| PasswordError::HashError(format!("Hash generation failed: {}", e)))?;

    Ok(password_hash.to_string())
}

/// Verifies a plaintext password against a stored PHC hash
///
/// Parameters are read from the hash itself, so hashes produced with older
/// parameters keep verifying.
///
/// # Errors
///
/// Returns `PasswordError::InvalidHash` when `hash` is not a PHC string and
/// `PasswordError::VerifyError` for any other verifier failure. A wrong
/// password is `Ok(false)`, not an error.
pub fn verify_password(password: &str, hash: &str) -> Result<bool, PasswordError> {
    let parsed_hash = PasswordHash::new(hash)
        .map_err(|e| PasswordError::InvalidHash(format!("Failed to parse hash: {}", e)))?;

    match Argon2::default().verify_password(password.as_bytes(), &parsed_hash) {
        Ok(_) => Ok(true),
        Err(argon2::password_hash::Error::Password) => Ok(false),
        Err(e) => Err(PasswordError::VerifyError(format!("Verification failed: {}", e))),
    }
}
