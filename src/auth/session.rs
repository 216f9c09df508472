//! Signed session tokens and cookie helpers

use std::time::Duration;

use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use super::AdminUser;
use crate::error::{DsError, Result};

/// Cookie carrying the admin session token
pub const SESSION_COOKIE: &str = "ds_session";

/// Cookie remembering the selected brand
pub const BRAND_COOKIE: &str = "ds_brand";

#[derive(Debug, Serialize, Deserialize)]
struct SessionClaims {
    sub: String,
    role: String,
    iat: i64,
    exp: i64,
}

/// Issues and verifies HS256 session tokens
#[derive(Clone)]
pub struct SessionIssuer {
    encoding: EncodingKey,
    decoding: DecodingKey,
    ttl: Duration,
}

impl std::fmt::Debug for SessionIssuer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionIssuer")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

impl SessionIssuer {
    pub fn new(secret: &[u8], ttl: Duration) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            ttl,
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub fn issue(&self, user: &AdminUser) -> Result<String> {
        let now = Utc::now().timestamp();
        let claims = SessionClaims {
            sub: user.email.clone(),
            role: user.role.clone(),
            iat: now,
            exp: now + self.ttl.as_secs() as i64,
        };
        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| DsError::Unauthorized(format!("cannot issue session: {}", e)))
    }

    pub fn verify(&self, token: &str) -> Result<AdminUser> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<SessionClaims>(token, &self.decoding, &validation)
            .map_err(|e| DsError::Unauthorized(format!("invalid session: {}", e)))?;
        Ok(AdminUser {
            email: data.claims.sub,
            role: data.claims.role,
        })
    }

    /// `Set-Cookie` value establishing a session
    pub fn session_cookie(&self, token: &str) -> String {
        format!(
            "{}={}; HttpOnly; SameSite=Lax; Path=/; Max-Age={}",
            SESSION_COOKIE,
            token,
            self.ttl.as_secs()
        )
    }
}

/// `Set-Cookie` value that removes the session
pub fn clear_session_cookie() -> String {
    format!("{}=; HttpOnly; SameSite=Lax; Path=/; Max-Age=0", SESSION_COOKIE)
}

/// `Set-Cookie` value remembering a brand for a year
pub fn brand_cookie(brand_slug: &str) -> String {
    format!("{}={}; SameSite=Lax; Path=/; Max-Age=31536000", BRAND_COOKIE, brand_slug)
}

/// Value of cookie `name` in a `Cookie` request header
pub fn cookie_value<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.trim().split_once('=')?;
        (key == name).then_some(value)
    })
}
