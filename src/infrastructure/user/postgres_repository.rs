//! PostgreSQL user repository implementation

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::{PgArguments, PgPool, PgPoolOptions, PgRow};
use sqlx::query::Query;
use sqlx::{Postgres, Row};

use super::query_builder::{QueryBuilder, SqlArg};
use crate::domain::user::{Pagination, User, UserFilter, UserId, UserRepository, UserStatus};
use crate::domain::DomainError;

/// PostgreSQL connection configuration.
#[derive(Debug, Clone)]
pub struct PostgresConfig {
    /// Database connection URL
    pub url: String,
    /// Maximum number of connections in the pool
    pub max_connections: u32,
    /// Minimum number of connections to maintain
    pub min_connections: u32,
    /// Connection acquire timeout in seconds
    pub connect_timeout_secs: u64,
    /// Idle timeout in seconds
    pub idle_timeout_secs: u64,
}

impl Default for PostgresConfig {
    fn default() -> Self {
        Self {
            url: "postgres://localhost/user_service".to_string(),
            max_connections: 10,
            min_connections: 1,
            connect_timeout_secs: 30,
            idle_timeout_secs: 600,
        }
    }
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    pub fn with_max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    pub fn with_min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    pub fn with_connect_timeout(mut self, secs: u64) -> Self {
        self.connect_timeout_secs = secs;
        self
    }

    pub fn with_idle_timeout(mut self, secs: u64) -> Self {
        self.idle_timeout_secs = secs;
        self
    }
}

const SELECT_COLUMNS: &str = "id, email, name, password_hash, status, created_at, updated_at";

/// PostgreSQL implementation of [`UserRepository`].
///
/// Filtered statements are built by the shared query builder; results are
/// ordered by creation time descending with id as the tie-break, matching
/// the in-memory backend.
#[derive(Debug, Clone)]
pub struct PostgresUserRepository {
    pool: PgPool,
}

impl PostgresUserRepository {
    /// Creates a repository over an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connects a new pool with the configured limits.
    pub async fn connect(config: &PostgresConfig) -> Result<Self, DomainError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connect_timeout_secs))
            .idle_timeout(Duration::from_secs(config.idle_timeout_secs))
            .connect(&config.url)
            .await
            .map_err(|e| DomainError::internal(format!("connect to postgres: {e}")))?;

        Ok(Self::new(pool))
    }

    /// Creates the users table when missing. The UNIQUE email constraint
    /// backs the atomic check-and-insert contract of `create`.
    pub async fn ensure_table(&self) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id TEXT PRIMARY KEY,
                email TEXT NOT NULL UNIQUE,
                name TEXT NOT NULL,
                password_hash TEXT NOT NULL,
                status TEXT NOT NULL,
                created_at TIMESTAMPTZ NOT NULL,
                updated_at TIMESTAMPTZ NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::internal(format!("create users table: {e}")))?;

        Ok(())
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn create(&self, user: User) -> Result<User, DomainError> {
        sqlx::query(
            r#"
            INSERT INTO users (id, email, name, password_hash, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.email())
        .bind(user.name())
        .bind(user.password_hash())
        .bind(user.status().as_str())
        .bind(user.created_at())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::AlreadyExists
            } else {
                DomainError::internal(format!("insert user: {e}"))
            }
        })?;

        Ok(user)
    }

    async fn find(
        &self,
        filter: &UserFilter,
        pagination: Option<Pagination>,
    ) -> Result<Vec<User>, DomainError> {
        let mut builder = QueryBuilder::new();
        builder.apply_filter(filter);

        let where_clause = builder.where_clause();
        let pagination_clause = match pagination {
            Some(pagination) => builder.push_pagination(pagination),
            None => String::new(),
        };

        let sql = format!(
            "SELECT {SELECT_COLUMNS} FROM users{where_clause} \
             ORDER BY created_at DESC, id{pagination_clause}"
        );

        let rows = bind_args(sqlx::query(&sql), builder.args())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("query users: {e}")))?;

        rows.iter().map(row_to_user).collect()
    }

    async fn count(&self, filter: &UserFilter) -> Result<usize, DomainError> {
        let mut builder = QueryBuilder::new();
        builder.apply_filter(filter);

        let sql = format!("SELECT COUNT(*) FROM users{}", builder.where_clause());

        let row = bind_args(sqlx::query(&sql), builder.args())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("count users: {e}")))?;

        let count: i64 = row
            .try_get(0)
            .map_err(|e| DomainError::internal(format!("decode user count: {e}")))?;

        Ok(count as usize)
    }

    async fn update(&self, user: &User) -> Result<User, DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE users SET email = $2, name = $3, status = $4, updated_at = $5
            WHERE id = $1
            "#,
        )
        .bind(user.id().as_str())
        .bind(user.email())
        .bind(user.name())
        .bind(user.status().as_str())
        .bind(user.updated_at())
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                DomainError::AlreadyExists
            } else {
                DomainError::internal(format!("update user: {e}"))
            }
        })?;

        if result.rows_affected() == 0 {
            return Err(DomainError::NotFound);
        }

        Ok(user.clone())
    }

    async fn delete(&self, filter: &UserFilter) -> Result<usize, DomainError> {
        let mut builder = QueryBuilder::new();
        builder.apply_filter(filter);

        let sql = format!("DELETE FROM users{}", builder.where_clause());

        let result = bind_args(sqlx::query(&sql), builder.args())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::internal(format!("delete users: {e}")))?;

        Ok(result.rows_affected() as usize)
    }
}

/// Binds builder arguments onto a query in positional order.
fn bind_args<'q>(
    mut query: Query<'q, Postgres, PgArguments>,
    args: &'q [SqlArg],
) -> Query<'q, Postgres, PgArguments> {
    for arg in args {
        query = match arg {
            SqlArg::Text(value) => query.bind(value),
            SqlArg::Int(value) => query.bind(value),
        };
    }

    query
}

fn is_unique_violation(error: &sqlx::Error) -> bool {
    match error {
        sqlx::Error::Database(db) => db.is_unique_violation(),
        _ => false,
    }
}

fn row_to_user(row: &PgRow) -> Result<User, DomainError> {
    let decode = |e: sqlx::Error| DomainError::internal(format!("decode user row: {e}"));

    let id: String = row.try_get("id").map_err(decode)?;
    let email: String = row.try_get("email").map_err(decode)?;
    let name: String = row.try_get("name").map_err(decode)?;
    let password_hash: String = row.try_get("password_hash").map_err(decode)?;
    let status: String = row.try_get("status").map_err(decode)?;
    let created_at: DateTime<Utc> = row.try_get("created_at").map_err(decode)?;
    let updated_at: DateTime<Utc> = row.try_get("updated_at").map_err(decode)?;

    Ok(User::restore(
        UserId::new(id),
        email,
        name,
        password_hash,
        str_to_status(&status),
        created_at,
        updated_at,
    ))
}

fn str_to_status(s: &str) -> UserStatus {
    match s {
        "active" => UserStatus::Active,
        "inactive" => UserStatus::Inactive,
        "blocked" => UserStatus::Blocked,
        _ => UserStatus::Unspecified,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip() {
        for status in [
            UserStatus::Unspecified,
            UserStatus::Active,
            UserStatus::Inactive,
            UserStatus::Blocked,
        ] {
            assert_eq!(str_to_status(status.as_str()), status);
        }
    }

    #[test]
    fn test_unknown_status_decodes_to_unspecified() {
        assert_eq!(str_to_status("suspended"), UserStatus::Unspecified);
        assert_eq!(str_to_status(""), UserStatus::Unspecified);
    }

    #[test]
    fn test_config_builder_methods() {
        let config = PostgresConfig::new("postgres://db/users")
            .with_max_connections(20)
            .with_min_connections(2)
            .with_connect_timeout(5)
            .with_idle_timeout(60);

        assert_eq!(config.url, "postgres://db/users");
        assert_eq!(config.max_connections, 20);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.connect_timeout_secs, 5);
        assert_eq!(config.idle_timeout_secs, 60);
    }
}
