/// Database models
///
/// This module contains all database models and their CRUD operations.
///
/// # Models
///
/// - `user`: User accounts, looked up by surrogate key or username
/// - `authority`: Named permission/role grants
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
/// assert!(User::exists_by_username(&pool, "alice").await?);
/// # Ok(())
/// # }
/// ```

pub mod authority;
pub mod user;

pub use authority::Authority;
pub use user::User;

/// Escapes LIKE metacharacters so substring filters match literally.
///
/// Postgres treats `%`, `_` and the escape character itself as wildcards
/// inside LIKE patterns; filter fragments are user input, not patterns.
pub(crate) fn escape_like(fragment: &str) -> String {
    fragment
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like_passes_plain_text_through() {
        assert_eq!(escape_like("admin"), "admin");
    }

    #[test]
    fn test_escape_like_neutralizes_wildcards() {
        assert_eq!(escape_like("50%_off"), "50\\%\\_off");
        assert_eq!(escape_like("back\\slash"), "back\\\\slash");
    }
}
