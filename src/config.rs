//! Configuration management for the store
//!
//! Loads configuration from environment variables into a type-safe struct.
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`: PostgreSQL connection string (required)
//! - `DATABASE_MAX_CONNECTIONS`: Pool size cap (default: 10)
//! - `DATABASE_MIN_CONNECTIONS`: Idle connections kept warm (default: 2)
//! - `DATABASE_CONNECT_TIMEOUT`: Acquire timeout in seconds (default: 30)
//!
//! # Example
//!
//! ```no_run
//! use authstore::config::StoreConfig;
//!
//! # fn example() -> anyhow::Result<()> {
//! let config = StoreConfig::from_env()?;
//! println!("Connecting with up to {} connections", config.database.max_connections);
//! # Ok(())
//! # }
//! ```

use std::env;

use crate::db::pool::DatabaseConfig;

/// Complete store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Database connection pool configuration
    pub database: DatabaseConfig,
}

impl StoreConfig {
    /// Loads configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is missing
    /// - A numeric variable fails to parse
    pub fn from_env() -> anyhow::Result<Self> {
        // Load .env file if present (for development)
        dotenvy::dotenv().ok();

        let url = env::var("DATABASE_URL")
            .map_err(|_| anyhow::anyhow!("DATABASE_URL environment variable is required"))?;

        let max_connections = env::var("DATABASE_MAX_CONNECTIONS")
            .unwrap_or_else(|_| "10".to_string())
            .parse::<u32>()?;

        let min_connections = env::var("DATABASE_MIN_CONNECTIONS")
            .unwrap_or_else(|_| "2".to_string())
            .parse::<u32>()?;

        let connect_timeout_seconds = env::var("DATABASE_CONNECT_TIMEOUT")
            .unwrap_or_else(|_| "30".to_string())
            .parse::<u64>()?;

        if max_connections == 0 {
            anyhow::bail!("DATABASE_MAX_CONNECTIONS must be at least 1");
        }

        Ok(Self {
            database: DatabaseConfig {
                url,
                max_connections,
                min_connections,
                connect_timeout_seconds,
                ..DatabaseConfig::default()
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // Environment variables are process-global, so all from_env cases
    // live in one test to keep them from interleaving.
    #[test]
    fn test_from_env_parses_and_validates() {
        env::remove_var("DATABASE_URL");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("DATABASE_MIN_CONNECTIONS");
        env::remove_var("DATABASE_CONNECT_TIMEOUT");

        // Missing DATABASE_URL is an error
        assert!(StoreConfig::from_env().is_err());

        env::set_var("DATABASE_URL", "postgresql://localhost/authstore_test");
        env::set_var("DATABASE_MAX_CONNECTIONS", "7");
        env::set_var("DATABASE_MIN_CONNECTIONS", "3");
        env::set_var("DATABASE_CONNECT_TIMEOUT", "15");

        let config = StoreConfig::from_env().expect("Config should parse");
        assert_eq!(config.database.url, "postgresql://localhost/authstore_test");
        assert_eq!(config.database.max_connections, 7);
        assert_eq!(config.database.min_connections, 3);
        assert_eq!(config.database.connect_timeout_seconds, 15);
        // Untouched knobs keep the pool defaults
        assert_eq!(config.database.idle_timeout_seconds, Some(600));

        // Non-numeric tuning variable is an error
        env::set_var("DATABASE_MAX_CONNECTIONS", "plenty");
        assert!(StoreConfig::from_env().is_err());

        // A zero-sized pool is rejected
        env::set_var("DATABASE_MAX_CONNECTIONS", "0");
        assert!(StoreConfig::from_env().is_err());

        env::remove_var("DATABASE_URL");
        env::remove_var("DATABASE_MAX_CONNECTIONS");
        env::remove_var("DATABASE_MIN_CONNECTIONS");
        env::remove_var("DATABASE_CONNECT_TIMEOUT");
    }

    #[test]
    fn test_config_carries_pool_defaults() {
        let config = StoreConfig {
            database: DatabaseConfig {
                url: "postgresql://localhost/test".to_string(),
                ..Default::default()
            },
        };

        assert_eq!(config.database.max_connections, 10);
        assert_eq!(config.database.idle_timeout_seconds, Some(600));
        assert!(config.database.test_before_acquire);
    }
}
