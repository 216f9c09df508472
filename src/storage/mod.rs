//! Blob storage for component images
//!
//! `BlobStore` is the seam to the object store. Objects get a collision-free
//! name derived from the upload time and a random suffix. The extension comes
//! from the accepted image type, never from the client's file name, so static
//! serving always answers with an image content type.

use async_trait::async_trait;
use chrono::Utc;
use rand::Rng;
use serde::Serialize;

use crate::error::{DsError, Result};

pub mod local;

pub use local::LocalBlobStore;

/// Where an uploaded object ended up
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredBlob {
    /// Object name inside the store
    pub path: String,
    /// URL the browser loads the object from
    pub public_url: String,
}

#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store `bytes` under a fresh name. `file_name` is only informational;
    /// `content_type` must be an accepted image type.
    async fn put(&self, file_name: &str, bytes: &[u8], content_type: Option<&str>)
        -> Result<StoredBlob>;
}

fn to_base36(mut n: u64) -> String {
    const DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    if n == 0 {
        return "0".to_string();
    }
    let mut out = Vec::new();
    while n > 0 {
        out.push(DIGITS[(n % 36) as usize]);
        n /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

/// `<unix-millis>-<random base36>.<extension>`
pub fn object_name(extension: &str) -> String {
    let millis = Utc::now().timestamp_millis();
    let suffix = to_base36(rand::thread_rng().gen::<u64>());
    format!("{}-{}.{}", millis, suffix, extension)
}

/// File extension for an accepted image content type.
///
/// Raster formats only; `image/svg+xml` can carry script and is refused.
pub fn image_extension(content_type: Option<&str>) -> Result<&'static str> {
    let Some(raw) = content_type else {
        return Err(DsError::Validation(
            "Only image uploads are allowed".to_string(),
        ));
    };
    let essence = raw
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();
    match essence.as_str() {
        "image/png" => Ok("png"),
        "image/jpeg" | "image/jpg" | "image/pjpeg" => Ok("jpg"),
        "image/gif" => Ok("gif"),
        "image/webp" => Ok("webp"),
        "image/avif" => Ok("avif"),
        other if other.starts_with("image/") => Err(DsError::Validation(format!(
            "Unsupported image type {}; use PNG, JPEG, GIF, WebP or AVIF",
            raw
        ))),
        _ => Err(DsError::Validation(format!(
            "Only image uploads are allowed (got {})",
            raw
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_object_name_shape() {
        let name = object_name("webp");
        let (stem, ext) = name.rsplit_once('.').unwrap();
        assert_eq!(ext, "webp");
        let (millis, suffix) = stem.split_once('-').unwrap();
        assert!(millis.parse::<i64>().is_ok());
        assert!(!suffix.is_empty());
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
        assert_ne!(object_name("png"), object_name("png"));
    }

    #[test]
    fn test_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
    }

    #[test]
    fn test_image_extension() {
        assert_eq!(image_extension(Some("image/png")).unwrap(), "png");
        assert_eq!(image_extension(Some("IMAGE/JPEG; charset=binary")).unwrap(), "jpg");
        assert_eq!(image_extension(Some("image/webp")).unwrap(), "webp");
        assert!(matches!(
            image_extension(Some("image/svg+xml")),
            Err(DsError::Validation(_))
        ));
        assert!(image_extension(Some("text/html")).is_err());
        assert!(image_extension(Some("application/pdf")).is_err());
        assert!(image_extension(None).is_err());
    }
}
