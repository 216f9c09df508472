//! Database connection and management module
//!
//! Connection pooling, schema setup and the component store implementations.

use sqlx::{postgres::PgPoolOptions, PgPool};
use std::time::Duration;
use tracing::{info, warn};

pub mod component_repository;
pub mod memory_store;
pub mod seed;

pub use component_repository::{ComponentStore, PgComponentRepository};
pub use memory_store::{InMemoryComponentStore, UnconfiguredStore};

/// Schema for the component catalog, including row-level-security policies
pub const SCHEMA_SQL: &str = include_str!("../../migrations/001_ds_components.sql");

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub connection_timeout: Duration,
    pub idle_timeout: Option<Duration>,
    pub max_lifetime: Option<Duration>,
}

impl DatabaseConfig {
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 10,
            connection_timeout: Duration::from_secs(30),
            idle_timeout: Some(Duration::from_secs(600)), // 10 minutes
            max_lifetime: Some(Duration::from_secs(1800)), // 30 minutes
        }
    }
}

/// Database connection manager
pub struct DatabaseManager {
    pool: PgPool,
}

impl DatabaseManager {
    /// Create a new database manager with the given configuration
    pub async fn new(config: &DatabaseConfig) -> Result<Self, sqlx::Error> {
        info!(
            "Connecting to database: {}",
            mask_database_url(&config.database_url)
        );

        let mut pool_options = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connection_timeout);

        if let Some(idle_timeout) = config.idle_timeout {
            pool_options = pool_options.idle_timeout(idle_timeout);
        }

        if let Some(max_lifetime) = config.max_lifetime {
            pool_options = pool_options.max_lifetime(max_lifetime);
        }

        let pool = pool_options
            .connect(&config.database_url)
            .await
            .map_err(|e| {
                warn!("Failed to connect to database: {}", e);
                e
            })?;

        info!("Database connection pool created successfully");

        Ok(Self { pool })
    }

    /// Get a reference to the connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Component repository over this pool
    pub fn component_repository(&self) -> PgComponentRepository {
        PgComponentRepository::new(self.pool.clone())
    }

    /// Test database connectivity
    pub async fn test_connection(&self) -> Result<(), sqlx::Error> {
        sqlx::query("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map(|_| ())
    }

    /// True when the `ds_components` table exists
    pub async fn schema_exists(&self) -> Result<bool, sqlx::Error> {
        let exists: bool =
            sqlx::query_scalar("SELECT to_regclass('public.ds_components') IS NOT NULL")
                .fetch_one(&self.pool)
                .await?;
        Ok(exists)
    }

    /// Apply the catalog schema. Every statement is idempotent.
    pub async fn apply_schema(&self) -> Result<(), sqlx::Error> {
        info!("Applying ds_components schema");
        sqlx::raw_sql(SCHEMA_SQL).execute(&self.pool).await?;
        info!("Database schema applied");
        Ok(())
    }

    /// Close the database connection pool
    pub async fn close(self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }
}

/// Mask sensitive information in database URL for logging
pub fn mask_database_url(url: &str) -> String {
    if let Ok(parsed) = url::Url::parse(url) {
        let mut masked = parsed.clone();
        if parsed.password().is_some() {
            let _ = masked.set_password(Some("***"));
        }
        masked.to_string()
    } else {
        let chars: Vec<char> = url.chars().collect();
        if chars.len() <= 20 {
            return "***".to_string();
        }
        let head: String = chars[..10].iter().collect();
        let tail: String = chars[chars.len() - 10..].iter().collect();
        format!("{}***{}", head, tail)
    }
}
