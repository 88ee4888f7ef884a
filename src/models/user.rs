/// User model and database operations
///
/// This module provides the User model and CRUD operations for managing
/// user accounts, plus the two username lookups the rest of the system
/// authenticates against.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE users (
///     id BIGSERIAL PRIMARY KEY,
///     username VARCHAR(255) NOT NULL UNIQUE,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```
///
/// Username uniqueness is enforced by the store's unique index, not by
/// application-level locking; concurrent inserts of the same username
/// resolve to one success and one `StoreError::Duplicate`. Case
/// sensitivity of username matching follows the column's collation.
///
/// # Example
///
/// ```no_run
/// use authstore::models::user::{User, CreateUser};
/// use authstore::db::pool::{create_pool, DatabaseConfig};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = create_pool(DatabaseConfig::default()).await?;
///
/// let user = User::create(&pool, CreateUser { username: "alice".to_string() }).await?;
/// println!("Created user: {}", user.id);
///
/// // Find by username
/// let found = User::find_by_username(&pool, "alice").await?;
/// assert!(found.is_some());
/// # Ok(())
/// # }
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// User model representing a user account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (store-generated surrogate key)
    pub id: i64,

    /// Username, unique across all users
    pub username: String,

    /// When the user account was created
    pub created_at: DateTime<Utc>,

    /// When the user account was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateUser {
    /// Username (must not already exist)
    pub username: String,
}

/// Input for updating an existing user
///
/// All fields are optional. Only non-None fields will be updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateUser {
    /// New username
    pub username: Option<String>,
}

/// Predicate-based filter for user queries
///
/// Replaces ad-hoc WHERE clauses at call sites: set the predicates you
/// need and leave the rest None. Predicates are combined with AND.
#[derive(Debug, Default, Clone)]
pub struct UserFilter {
    /// Filter by username (exact match)
    pub username: Option<String>,

    /// Filter by username substring (matched literally, not as a pattern)
    pub username_contains: Option<String>,

    /// Maximum number of rows to return
    pub limit: Option<i64>,

    /// Number of rows to skip
    pub offset: Option<i64>,
}

impl UserFilter {
    /// Compiles the filter into a SELECT statement and its bind values.
    ///
    /// Limit/offset are embedded directly since they are integers; string
    /// predicates are bound positionally in the order returned.
    fn to_query(&self) -> (String, Vec<String>) {
        let mut query = String::from(
            "SELECT id, username, created_at, updated_at FROM users",
        );
        let mut binds: Vec<String> = Vec::new();

        if let Some(ref username) = self.username {
            binds.push(username.clone());
            query.push_str(&format!(" WHERE username = ${}", binds.len()));
        }
        if let Some(ref fragment) = self.username_contains {
            binds.push(format!("%{}%", crate::models::escape_like(fragment)));
            let keyword = if binds.len() == 1 { "WHERE" } else { "AND" };
            query.push_str(&format!(" {} username LIKE ${}", keyword, binds.len()));
        }

        query.push_str(" ORDER BY created_at DESC");

        if let Some(limit) = self.limit {
            query.push_str(&format!(" LIMIT {}", limit));
        }
        if let Some(offset) = self.offset {
            query.push_str(&format!(" OFFSET {}", offset));
        }

        (query, binds)
    }
}

impl User {
    /// Creates a new user in the database
    ///
    /// # Returns
    ///
    /// The newly created user with generated ID and timestamps
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Duplicate` if the username already exists,
    /// or `StoreError::Database` if the query fails.
    pub async fn create(pool: &PgPool, data: CreateUser) -> StoreResult<Self> {
        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (username)
            VALUES ($1)
            RETURNING id, username, created_at, updated_at
            "#,
        )
        .bind(&data.username)
        .fetch_one(pool)
        .await
        .map_err(|e| StoreError::on_conflict(e, "user", "username", &data.username))?;

        Ok(user)
    }

    /// Finds a user by ID
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_id(pool: &PgPool, id: i64) -> StoreResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Gets a user by ID, failing when the key misses
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no user has this ID.
    pub async fn get_by_id(pool: &PgPool, id: i64) -> StoreResult<Self> {
        Self::find_by_id(pool, id)
            .await?
            .ok_or(StoreError::NotFound { entity: "user", id })
    }

    /// Finds a user by username (exact match)
    ///
    /// Case sensitivity follows the underlying column's collation.
    ///
    /// # Returns
    ///
    /// The user if found, None otherwise
    pub async fn find_by_username(pool: &PgPool, username: &str) -> StoreResult<Option<Self>> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(pool)
        .await?;

        Ok(user)
    }

    /// Checks whether a user with this exact username exists
    ///
    /// Existence-only check: the row is never loaded, only a boolean
    /// comes back from the store.
    pub async fn exists_by_username(pool: &PgPool, username: &str) -> StoreResult<bool> {
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1)")
                .bind(username)
                .fetch_one(pool)
                .await?;

        Ok(exists)
    }

    /// Updates an existing user
    ///
    /// Only non-None fields in `data` are updated. The `updated_at`
    /// timestamp is always set to the current time.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user doesn't exist, or
    /// `StoreError::Duplicate` if the new username is already taken.
    pub async fn update(pool: &PgPool, id: i64, data: UpdateUser) -> StoreResult<Self> {
        let user = sqlx::query_as::<_, User>(
            r#"
            UPDATE users
            SET username = COALESCE($2, username), updated_at = NOW()
            WHERE id = $1
            RETURNING id, username, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.username)
        .fetch_optional(pool)
        .await
        .map_err(|e| {
            StoreError::on_conflict(e, "user", "username", data.username.as_deref().unwrap_or(""))
        })?;

        user.ok_or(StoreError::NotFound { entity: "user", id })
    }

    /// Deletes a user by ID
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the user didn't exist.
    pub async fn delete(pool: &PgPool, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound { entity: "user", id });
        }

        Ok(())
    }

    /// Lists users with pagination
    ///
    /// # Returns
    ///
    /// Vector of users, ordered by creation date (newest first)
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> StoreResult<Vec<Self>> {
        let users = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, created_at, updated_at
            FROM users
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(users)
    }

    /// Counts total number of users
    pub async fn count(pool: &PgPool) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Finds users matching a filter
    ///
    /// # Example
    ///
    /// ```no_run
    /// # use authstore::models::user::{User, UserFilter};
    /// # use sqlx::PgPool;
    /// # async fn example(pool: PgPool) -> Result<(), authstore::StoreError> {
    /// let admins = User::find_filtered(&pool, &UserFilter {
    ///     username_contains: Some("admin".to_string()),
    ///     limit: Some(20),
    ///     ..Default::default()
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn find_filtered(pool: &PgPool, filter: &UserFilter) -> StoreResult<Vec<Self>> {
        let (query, binds) = filter.to_query();

        let mut q = sqlx::query_as::<_, User>(&query);
        for value in &binds {
            q = q.bind(value);
        }

        let users = q.fetch_all(pool).await?;
        Ok(users)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_user_struct() {
        let create_user = CreateUser {
            username: "alice".to_string(),
        };
        assert_eq!(create_user.username, "alice");
    }

    #[test]
    fn test_update_user_default() {
        let update = UpdateUser::default();
        assert!(update.username.is_none());
    }

    #[test]
    fn test_filter_empty_has_no_where_clause() {
        let (query, binds) = UserFilter::default().to_query();
        assert!(!query.contains("WHERE"));
        assert!(query.ends_with("ORDER BY created_at DESC"));
        assert!(binds.is_empty());
    }

    #[test]
    fn test_filter_exact_username() {
        let filter = UserFilter {
            username: Some("alice".to_string()),
            ..Default::default()
        };
        let (query, binds) = filter.to_query();
        assert!(query.contains("WHERE username = $1"));
        assert_eq!(binds, vec!["alice".to_string()]);
    }

    #[test]
    fn test_filter_combines_predicates_with_and() {
        let filter = UserFilter {
            username: Some("alice".to_string()),
            username_contains: Some("lic".to_string()),
            limit: Some(10),
            offset: Some(5),
            ..Default::default()
        };
        let (query, binds) = filter.to_query();
        assert!(query.contains("WHERE username = $1"));
        assert!(query.contains("AND username LIKE $2"));
        assert!(query.contains("LIMIT 10"));
        assert!(query.contains("OFFSET 5"));
        assert_eq!(binds, vec!["alice".to_string(), "%lic%".to_string()]);
    }

    #[test]
    fn test_filter_contains_escapes_like_metacharacters() {
        let filter = UserFilter {
            username_contains: Some("a_b%c".to_string()),
            ..Default::default()
        };
        let (_, binds) = filter.to_query();
        assert_eq!(binds, vec!["%a\\_b\\%c%".to_string()]);
    }

    #[test]
    fn test_filter_contains_only_starts_where_clause() {
        let filter = UserFilter {
            username_contains: Some("adm".to_string()),
            ..Default::default()
        };
        let (query, binds) = filter.to_query();
        assert!(query.contains("WHERE username LIKE $1"));
        assert_eq!(binds, vec!["%adm%".to_string()]);
    }

    // Integration tests for database operations are in tests/user_store_tests.rs
}
