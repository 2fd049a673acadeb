/// PostgreSQL storage backend
///
/// Queries run against the tables created by the workspace `migrations/`.
/// The user → address cascade is the `ON DELETE CASCADE` rule on
/// `shipping_addresses.user_rut`, so deleting a user is a single statement
/// that also reports how many addresses went with it.
///
/// # Example
///
/// ```no_run
/// use accounts_shared::db::pool::{create_pool, DatabaseConfig};
/// use accounts_shared::repository::postgres::{PgAddressRepository, PgUserRepository};
/// use accounts_shared::repository::UserRepository;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig {
///     url: std::env::var("DATABASE_URL")?,
///     ..Default::default()
/// })
/// .await?;
///
/// let users = PgUserRepository::new(pool.clone());
/// let addresses = PgAddressRepository::new(pool);
///
/// let all = users.find_all().await?;
/// # Ok(())
/// # }
/// ```

use super::{AddressRepository, RepositoryResult, UserRepository};
use crate::models::{
    address::{Address, AddressInput},
    user::{NewUser, User},
};
use async_trait::async_trait;
use sqlx::PgPool;

const USER_COLUMNS: &str =
    "rut, first_name, last_name, email, password_hash, created_at, updated_at";

const ADDRESS_COLUMNS: &str = "id, street, number, district, city, user_rut";

/// `users` table access
#[derive(Debug, Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    async fn find_by_rut(&self, rut: &str) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE rut = $1"
        ))
        .bind(rut)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_all(&self) -> RepositoryResult<Vec<User>> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY rut"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    async fn exists(&self, rut: &str) -> RepositoryResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM users WHERE rut = $1)")
                .bind(rut)
                .fetch_one(&self.pool)
                .await?;

        Ok(exists)
    }

    async fn insert(&self, user: NewUser) -> RepositoryResult<User> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            INSERT INTO users (rut, first_name, last_name, email, password_hash)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(user.rut)
        .bind(user.first_name)
        .bind(user.last_name)
        .bind(user.email)
        .bind(user.password_hash)
        .fetch_one(&self.pool)
        .await?;

        Ok(user)
    }

    async fn update_names(
        &self,
        rut: &str,
        first_name: &str,
        last_name: &str,
    ) -> RepositoryResult<Option<User>> {
        let user = sqlx::query_as::<_, User>(&format!(
            r#"
            UPDATE users
            SET first_name = $2, last_name = $3, updated_at = NOW()
            WHERE rut = $1
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(rut)
        .bind(first_name)
        .bind(last_name)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn delete(&self, rut: &str) -> RepositoryResult<bool> {
        // Both CTEs read the pre-delete snapshot, so `removed` counts the
        // addresses the FK cascade is about to drop.
        let (deleted, removed): (i64, i64) = sqlx::query_as(
            r#"
            WITH owned AS (
                SELECT COUNT(*) AS n FROM shipping_addresses WHERE user_rut = $1
            ),
            deleted AS (
                DELETE FROM users WHERE rut = $1 RETURNING rut
            )
            SELECT (SELECT COUNT(*) FROM deleted), (SELECT n FROM owned)
            "#,
        )
        .bind(rut)
        .fetch_one(&self.pool)
        .await?;

        if deleted == 0 {
            return Ok(false);
        }

        tracing::debug!(rut = %rut, removed_addresses = removed, "Deleted user");
        Ok(true)
    }

    async fn ping(&self) -> RepositoryResult<()> {
        crate::db::pool::health_check(&self.pool).await?;
        Ok(())
    }
}

/// `shipping_addresses` table access
#[derive(Debug, Clone)]
pub struct PgAddressRepository {
    pool: PgPool,
}

impl PgAddressRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AddressRepository for PgAddressRepository {
    async fn find_by_id(&self, id: i64) -> RepositoryResult<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM shipping_addresses WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }

    async fn find_by_owner(&self, rut: &str) -> RepositoryResult<Vec<Address>> {
        let addresses = sqlx::query_as::<_, Address>(&format!(
            "SELECT {ADDRESS_COLUMNS} FROM shipping_addresses WHERE user_rut = $1 ORDER BY id"
        ))
        .bind(rut)
        .fetch_all(&self.pool)
        .await?;

        Ok(addresses)
    }

    async fn insert_for_owner(
        &self,
        rut: &str,
        input: AddressInput,
    ) -> RepositoryResult<Option<Address>> {
        let mut tx = self.pool.begin().await?;

        // Lock the owner row so a concurrent delete cannot slip between the
        // check and the insert.
        let owner: Option<String> =
            sqlx::query_scalar("SELECT rut FROM users WHERE rut = $1 FOR SHARE")
                .bind(rut)
                .fetch_optional(&mut *tx)
                .await?;

        if owner.is_none() {
            tx.rollback().await?;
            return Ok(None);
        }

        let address = sqlx::query_as::<_, Address>(&format!(
            r#"
            INSERT INTO shipping_addresses (street, number, district, city, user_rut)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING {ADDRESS_COLUMNS}
            "#
        ))
        .bind(input.street)
        .bind(input.number)
        .bind(input.district)
        .bind(input.city)
        .bind(rut)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(Some(address))
    }

    async fn update(&self, id: i64, input: AddressInput) -> RepositoryResult<Option<Address>> {
        let address = sqlx::query_as::<_, Address>(&format!(
            r#"
            UPDATE shipping_addresses
            SET street = $2, number = $3, district = $4, city = $5
            WHERE id = $1
            RETURNING {ADDRESS_COLUMNS}
            "#
        ))
        .bind(id)
        .bind(input.street)
        .bind(input.number)
        .bind(input.district)
        .bind(input.city)
        .fetch_optional(&self.pool)
        .await?;

        Ok(address)
    }

    async fn delete(&self, id: i64) -> RepositoryResult<bool> {
        let result = sqlx::query("DELETE FROM shipping_addresses WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
