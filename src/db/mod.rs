//! Database connection management

use sqlx::postgres::{PgPool, PgPoolOptions};
use std::time::Duration;

use crate::config::DatabaseConfig;

/// PostgreSQL database connection pool
pub struct Database {
    pool: PgPool,
}

impl Database {
    /// Create a new database connection pool
    ///
    /// Connections are recycled after five minutes so long-lived pools stay
    /// balanced across backends; acquisition is bounded so a saturated pool
    /// surfaces as an error instead of an unbounded wait.
    pub async fn connect(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(Duration::from_secs(5))
            .max_lifetime(Duration::from_secs(300))
            .connect(&config.url())
            .await?;

        tracing::info!("PostgreSQL connection pool established");
        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Check database health
    pub async fn health_check(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DatabaseConfig;

    // Note: These tests require a running PostgreSQL instance
    // Run with: docker-compose up -d postgres

    fn test_config() -> DatabaseConfig {
        DatabaseConfig {
            host: "localhost".to_string(),
            port: 5432,
            user: "postgres".to_string(),
            password: "postgres".to_string(),
            name: "timeledger_test".to_string(),
            max_connections: 5,
        }
    }

    #[tokio::test]
    #[ignore] // Requires PostgreSQL running
    async fn test_database_connect_success() {
        let db = Database::connect(&test_config()).await;
        assert!(db.is_ok(), "Should connect to PostgreSQL successfully");
    }

    #[tokio::test]
    #[ignore]
    async fn test_database_connect_invalid_port() {
        let mut config = test_config();
        config.port = 9999;
        let db = Database::connect(&config).await;
        assert!(db.is_err(), "Should fail with invalid connection string");
    }

    #[tokio::test]
    #[ignore]
    async fn test_database_health_check() {
        let db = Database::connect(&test_config())
            .await
            .expect("Failed to connect");

        let health = db.health_check().await;
        assert!(health.is_ok(), "Health check should pass");
    }
}
