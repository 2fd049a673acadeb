/// Schema migrations
///
/// Migrations live in the workspace `migrations/` directory and are embedded
/// into the binary at compile time with `sqlx::migrate!`. Each one is a
/// reversible pair:
/// - `{version}_{name}.up.sql`
/// - `{version}_{name}.down.sql`
///
/// # Example
///
/// ```no_run
/// use accounts_shared::db::pool::{create_pool, DatabaseConfig};
/// use accounts_shared::db::migrations::{get_migration_status, run_migrations};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let pool = create_pool(DatabaseConfig {
///         url: std::env::var("DATABASE_URL")?,
///         ..Default::default()
///     })
///     .await?;
///
///     run_migrations(&pool).await?;
///
///     let status = get_migration_status(&pool).await?;
///     println!("Applied {} migrations", status.applied_migrations);
///     Ok(())
/// }
/// ```

use sqlx::{migrate::MigrateDatabase, migrate::Migrator, postgres::PgPool, Postgres};
use tracing::{debug, info, warn};

/// Migrations embedded from `<workspace>/migrations`
pub static MIGRATOR: Migrator = sqlx::migrate!("../migrations");

/// Applied-migration summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MigrationStatus {
    /// Successfully applied migrations
    pub applied_migrations: usize,

    /// Highest applied version
    pub latest_version: Option<i64>,

    /// Whether every embedded migration has been applied
    pub is_up_to_date: bool,
}

/// Number of up-migrations embedded in this build
pub fn embedded_migration_count() -> usize {
    MIGRATOR
        .iter()
        .filter(|m| !m.migration_type.is_down_migration())
        .count()
}

/// Applies all pending migrations
///
/// # Errors
///
/// Returns an error if a migration fails or a previously applied migration
/// was modified.
pub async fn run_migrations(pool: &PgPool) -> Result<(), sqlx::migrate::MigrateError> {
    info!(embedded = embedded_migration_count(), "Running database migrations");

    match MIGRATOR.run(pool).await {
        Ok(()) => {
            info!("Database migrations completed");
            Ok(())
        }
        Err(e) => {
            warn!("Migration failed: {}", e);
            Err(e)
        }
    }
}

/// Reads `_sqlx_migrations` and compares it with the embedded set
pub async fn get_migration_status(pool: &PgPool) -> Result<MigrationStatus, sqlx::Error> {
    let table_exists: bool = sqlx::query_scalar(
        "SELECT EXISTS (
            SELECT FROM information_schema.tables
            WHERE table_schema = 'public'
            AND table_name = '_sqlx_migrations'
        )",
    )
    .fetch_one(pool)
    .await?;

    if !table_exists {
        debug!("Migrations table does not exist yet");
        return Ok(MigrationStatus {
            applied_migrations: 0,
            latest_version: None,
            is_up_to_date: embedded_migration_count() == 0,
        });
    }

    let (count, latest_version): (i64, Option<i64>) = sqlx::query_as(
        "SELECT COUNT(*), MAX(version) FROM _sqlx_migrations WHERE success = true",
    )
    .fetch_one(pool)
    .await?;

    let applied_migrations = usize::try_from(count).unwrap_or(0);

    debug!(
        applied_migrations,
        latest_version = ?latest_version,
        "Migration status retrieved"
    );

    Ok(MigrationStatus {
        applied_migrations,
        latest_version,
        is_up_to_date: applied_migrations >= embedded_migration_count(),
    })
}

/// Creates the database named in `database_url` if it is missing
pub async fn ensure_database_exists(database_url: &str) -> Result<(), sqlx::Error> {
    if !Postgres::database_exists(database_url).await? {
        info!("Database does not exist, creating it");
        Postgres::create_database(database_url).await?;
    } else {
        debug!("Database already exists");
    }

    Ok(())
}
