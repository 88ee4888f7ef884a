/// Authority model and database operations
///
/// An authority is a named permission/role grant. Lifecycle is managed by
/// admin tooling; beyond key uniqueness the store imposes no invariants
/// on this table, so `name` is deliberately not unique.
///
/// # Schema
///
/// ```sql
/// CREATE TABLE authorities (
///     id BIGSERIAL PRIMARY KEY,
///     name VARCHAR(255) NOT NULL,
///     created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
///     updated_at TIMESTAMPTZ NOT NULL DEFAULT NOW()
/// );
/// ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::error::{StoreError, StoreResult};

/// Authority model representing a named permission grant
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct Authority {
    /// Unique authority ID (store-generated surrogate key)
    pub id: i64,

    /// Grant name (e.g., "ROLE_ADMIN")
    pub name: String,

    /// When the authority was created
    pub created_at: DateTime<Utc>,

    /// When the authority was last updated
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a new authority
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAuthority {
    /// Grant name
    pub name: String,
}

/// Input for updating an existing authority
///
/// Only non-None fields are updated.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAuthority {
    /// New grant name
    pub name: Option<String>,
}

/// Predicate-based filter for authority queries
///
/// Predicates are combined with AND.
#[derive(Debug, Default, Clone)]
pub struct AuthorityFilter {
    /// Filter by name (exact match)
    pub name: Option<String>,

    /// Filter by name substring (matched literally, not as a pattern)
    pub name_contains: Option<String>,

    /// Maximum number of rows to return
    pub limit: Option<i64>,

    /// Number of rows to skip
    pub offset: Option<i64>,
}

impl AuthorityFilter {
    fn to_query(&self) -> (String, Vec<String>) {
        let mut query = String::from(
            "SELECT id, name, created_at, updated_at FROM authorities",
        );
        let mut binds: Vec<String> = Vec::new();

        if let Some(ref name) = self.name {
            binds.push(name.clone());
            query.push_str(&format!(" WHERE name = ${}", binds.len()));
        }
        if let Some(ref fragment) = self.name_contains {
            binds.push(format!("%{}%", crate::models::escape_like(fragment)));
            let keyword = if binds.len() == 1 { "WHERE" } else { "AND" };
            query.push_str(&format!(" {} name LIKE ${}", keyword, binds.len()));
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

impl Authority {
    /// Creates a new authority
    ///
    /// # Errors
    ///
    /// Constraint violations from the store (duplicate surrogate key)
    /// propagate unmodified as `StoreError::Database`.
    pub async fn create(pool: &PgPool, data: CreateAuthority) -> StoreResult<Self> {
        let authority = sqlx::query_as::<_, Authority>(
            r#"
            INSERT INTO authorities (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(&data.name)
        .fetch_one(pool)
        .await?;

        Ok(authority)
    }

    /// Finds an authority by ID, None on a miss
    pub async fn find_by_id(pool: &PgPool, id: i64) -> StoreResult<Option<Self>> {
        let authority = sqlx::query_as::<_, Authority>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM authorities
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(authority)
    }

    /// Gets an authority by ID, failing when the key misses
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if no authority has this ID.
    pub async fn get_by_id(pool: &PgPool, id: i64) -> StoreResult<Self> {
        Self::find_by_id(pool, id).await?.ok_or(StoreError::NotFound {
            entity: "authority",
            id,
        })
    }

    /// Updates an existing authority
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the authority doesn't exist.
    pub async fn update(pool: &PgPool, id: i64, data: UpdateAuthority) -> StoreResult<Self> {
        let authority = sqlx::query_as::<_, Authority>(
            r#"
            UPDATE authorities
            SET name = COALESCE($2, name), updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&data.name)
        .fetch_optional(pool)
        .await?;

        authority.ok_or(StoreError::NotFound {
            entity: "authority",
            id,
        })
    }

    /// Deletes an authority by ID
    ///
    /// # Errors
    ///
    /// Returns `StoreError::NotFound` if the authority didn't exist.
    pub async fn delete(pool: &PgPool, id: i64) -> StoreResult<()> {
        let result = sqlx::query("DELETE FROM authorities WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound {
                entity: "authority",
                id,
            });
        }

        Ok(())
    }

    /// Lists authorities with pagination, newest first
    pub async fn list(pool: &PgPool, limit: i64, offset: i64) -> StoreResult<Vec<Self>> {
        let authorities = sqlx::query_as::<_, Authority>(
            r#"
            SELECT id, name, created_at, updated_at
            FROM authorities
            ORDER BY created_at DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(pool)
        .await?;

        Ok(authorities)
    }

    /// Counts total number of authorities
    pub async fn count(pool: &PgPool) -> StoreResult<i64> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM authorities")
            .fetch_one(pool)
            .await?;

        Ok(count)
    }

    /// Finds authorities matching a filter
    pub async fn find_filtered(
        pool: &PgPool,
        filter: &AuthorityFilter,
    ) -> StoreResult<Vec<Self>> {
        let (query, binds) = filter.to_query();

        let mut q = sqlx::query_as::<_, Authority>(&query);
        for value in &binds {
            q = q.bind(value);
        }

        let authorities = q.fetch_all(pool).await?;
        Ok(authorities)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_authority_struct() {
        let create = CreateAuthority {
            name: "ROLE_ADMIN".to_string(),
        };
        assert_eq!(create.name, "ROLE_ADMIN");
    }

    #[test]
    fn test_update_authority_default() {
        let update = UpdateAuthority::default();
        assert!(update.name.is_none());
    }

    #[test]
    fn test_filter_name_predicate() {
        let filter = AuthorityFilter {
            name: Some("ROLE_USER".to_string()),
            ..Default::default()
        };
        let (query, binds) = filter.to_query();
        assert!(query.contains("WHERE name = $1"));
        assert_eq!(binds, vec!["ROLE_USER".to_string()]);
    }

    #[test]
    fn test_filter_contains_escapes_like_metacharacters() {
        let filter = AuthorityFilter {
            name_contains: Some("ROLE_".to_string()),
            ..Default::default()
        };
        let (_, binds) = filter.to_query();
        assert_eq!(binds, vec!["%ROLE\\_%".to_string()]);
    }

    #[test]
    fn test_filter_pagination_is_inlined() {
        let filter = AuthorityFilter {
            limit: Some(25),
            offset: Some(50),
            ..Default::default()
        };
        let (query, binds) = filter.to_query();
        assert!(query.contains("LIMIT 25 OFFSET 50"));
        assert!(binds.is_empty());
    }

    // Integration tests for database operations are in tests/authority_store_tests.rs
}
