/// Database plumbing for the PostgreSQL backend
///
/// # Modules
///
/// - `pool`: Connection pool creation, health check and shutdown
/// - `migrations`: Embedded schema migrations
///
/// Table access itself lives in `repository::postgres`.

pub mod migrations;
pub mod pool;
