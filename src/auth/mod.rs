//! Admin authentication
//!
//! Sign-in is checked against an `IdentityProvider`; a successful sign-in is
//! turned into a signed session cookie by `SessionIssuer`. The admin routes
//! read the cookie back through the `AdminSession` extractor.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{info, warn};

use crate::error::{DsError, Result};

pub mod session;
#[cfg(feature = "server")]
pub mod extract;

pub use session::{
    brand_cookie, clear_session_cookie, cookie_value, SessionIssuer, BRAND_COOKIE, SESSION_COOKIE,
};
#[cfg(feature = "server")]
pub use extract::{request_cookie, AdminSession, LOGIN_PATH};

/// Message shown for any failed sign-in
pub const INVALID_CREDENTIALS: &str = "Invalid login credentials";

/// Role granted to every signed-in admin; matches the write policy
pub const AUTHENTICATED_ROLE: &str = "authenticated";

/// A signed-in administrator
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminUser {
    pub email: String,
    pub role: String,
}

impl AdminUser {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: AUTHENTICATED_ROLE.to_string(),
        }
    }
}

/// Email and SHA-256 password hash of one admin
#[derive(Clone, PartialEq, Eq)]
pub struct AdminCredential {
    pub email: String,
    password_sha256: String,
}

impl std::fmt::Debug for AdminCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminCredential")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl AdminCredential {
    /// Credential from a hex-encoded SHA-256 digest
    pub fn from_hash(email: &str, sha256_hex: &str) -> Result<Self> {
        let hash = sha256_hex.trim().to_ascii_lowercase();
        if hash.len() != 64 || hex::decode(&hash).is_err() {
            return Err(DsError::Config(format!(
                "admin '{}' must have a 64-character hex SHA-256 password hash",
                email.trim()
            )));
        }
        Ok(Self {
            email: email.trim().to_lowercase(),
            password_sha256: hash,
        })
    }

    /// Credential from a plaintext password, hashed immediately
    pub fn from_password(email: &str, password: &str) -> Self {
        Self {
            email: email.trim().to_lowercase(),
            password_sha256: hash_password(password),
        }
    }

    /// Parse `email:sha256hex` pairs separated by commas
    pub fn parse_list(list: &str) -> Result<Vec<Self>> {
        list.split(',')
            .map(str::trim)
            .filter(|entry| !entry.is_empty())
            .map(|entry| match entry.rsplit_once(':') {
                Some((email, hash)) if !email.trim().is_empty() => Self::from_hash(email, hash),
                _ => Err(DsError::Config(format!(
                    "DS_ADMIN_USERS entry '{}' is not email:sha256hex",
                    entry
                ))),
            })
            .collect()
    }

    pub fn verify(&self, password: &str) -> bool {
        constant_time_eq(
            self.password_sha256.as_bytes(),
            hash_password(password).as_bytes(),
        )
    }
}

/// Hex SHA-256 of a password
pub fn hash_password(password: &str) -> String {
    hex::encode(Sha256::digest(password.as_bytes()))
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

/// Checks admin credentials
#[async_trait]
pub trait IdentityProvider: Send + Sync {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminUser>;
}

/// Admins taken from configuration
#[derive(Debug, Clone, Default)]
pub struct ConfiguredAdmins {
    admins: Vec<AdminCredential>,
}

impl ConfiguredAdmins {
    pub fn new(admins: Vec<AdminCredential>) -> Self {
        Self { admins }
    }

    pub fn is_empty(&self) -> bool {
        self.admins.is_empty()
    }
}

#[async_trait]
impl IdentityProvider for ConfiguredAdmins {
    async fn sign_in(&self, email: &str, password: &str) -> Result<AdminUser> {
        let email = email.trim().to_lowercase();
        let matched = self
            .admins
            .iter()
            .find(|admin| admin.email == email)
            .filter(|admin| admin.verify(password));

        match matched {
            Some(admin) => {
                info!("Admin {} signed in", admin.email);
                Ok(AdminUser::new(admin.email.clone()))
            }
            None => {
                warn!("Rejected sign-in for {}", email);
                Err(DsError::Unauthorized(INVALID_CREDENTIALS.to_string()))
            }
        }
    }
}
