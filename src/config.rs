//! Application configuration loaded from environment variables
//!
//! Binaries call `dotenvy::dotenv()` first, so a local `.env` file works the
//! same way as exported variables.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use rand::distributions::Alphanumeric;
use rand::Rng;
use tracing::warn;

use crate::auth::AdminCredential;
use crate::database::DatabaseConfig;
use crate::error::{DsError, Result};

/// Top-level configuration for the server and setup tool
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// `None` when `DATABASE_URL` is unset; the catalog then runs unconfigured
    pub database: Option<DatabaseConfig>,
    pub bind_addr: SocketAddr,
    pub jwt_secret: String,
    pub session_ttl: Duration,
    pub admins: Vec<AdminCredential>,
    pub upload_dir: PathBuf,
    pub public_upload_path: String,
    pub max_upload_bytes: usize,
    pub cache_ttl: Duration,
    pub auto_migrate: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            database: None,
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 3000)),
            jwt_secret: random_secret(),
            session_ttl: Duration::from_secs(12 * 3600),
            admins: Vec::new(),
            upload_dir: PathBuf::from("uploads"),
            public_upload_path: "/uploads".to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            cache_ttl: Duration::from_secs(60),
            auto_migrate: false,
        }
    }
}

impl AppConfig {
    /// Build configuration from the process environment
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let database = match get("DATABASE_URL") {
            Some(url) => {
                let mut db = DatabaseConfig::new(url);
                if let Some(size) = parse_var::<u32>(&get, "DATABASE_POOL_SIZE")? {
                    db.max_connections = size;
                }
                Some(db)
            }
            None => None,
        };

        let bind_addr = parse_var::<SocketAddr>(&get, "DS_BIND_ADDR")?.unwrap_or(defaults.bind_addr);

        let jwt_secret = match get("DS_JWT_SECRET") {
            Some(secret) => secret,
            None => {
                warn!("DS_JWT_SECRET not set; admin sessions will not survive a restart");
                defaults.jwt_secret
            }
        };

        let session_ttl = parse_var::<u64>(&get, "DS_SESSION_TTL_HOURS")?
            .map(|h| Duration::from_secs(h * 3600))
            .unwrap_or(defaults.session_ttl);

        let mut admins = match get("DS_ADMIN_USERS") {
            Some(list) => AdminCredential::parse_list(&list)?,
            None => Vec::new(),
        };
        if let (Some(email), Some(password)) = (get("DS_ADMIN_EMAIL"), get("DS_ADMIN_PASSWORD")) {
            admins.push(AdminCredential::from_password(&email, &password));
        }
        if admins.is_empty() {
            warn!("No admin users configured; the admin console will reject every sign-in");
        }

        let cache_ttl = parse_var::<u64>(&get, "DS_CACHE_TTL_SECS")?
            .map(Duration::from_secs)
            .unwrap_or(defaults.cache_ttl);

        Ok(Self {
            database,
            bind_addr,
            jwt_secret,
            session_ttl,
            admins,
            upload_dir: get("DS_UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.upload_dir),
            public_upload_path: get("DS_PUBLIC_UPLOAD_PATH")
                .map(|p| p.trim_end_matches('/').to_string())
                .unwrap_or(defaults.public_upload_path),
            max_upload_bytes: parse_var::<usize>(&get, "DS_MAX_UPLOAD_BYTES")?
                .unwrap_or(defaults.max_upload_bytes),
            cache_ttl,
            auto_migrate: parse_var::<bool>(&get, "DS_AUTO_MIGRATE")?.unwrap_or(false),
        })
    }
}

fn parse_var<T>(get: &impl Fn(&str) -> Option<String>, key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|e| DsError::Config(format!("{} has invalid value '{}': {}", key, raw, e))),
        None => Ok(None),
    }
}

fn random_secret() -> String {
    rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(48)
        .map(char::from)
        .collect()
}
