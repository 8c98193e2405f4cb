//! Cache key derivation.
//!
//! Keys have the shape `title_suggestion:<backend>:<sha256 hex of content>`,
//! so every backend gets its own key space and the content never appears in
//! clear text.

use sha2::{Digest, Sha256};

use crate::error::CacheServiceError;

/// Namespace prefix shared by every suggestion key.
pub const KEY_NAMESPACE: &str = "title_suggestion";

/// Builds the cache key for `content` as generated by `backend_name`.
///
/// Returns [`CacheServiceError::InvalidArgument`] when either input is empty.
pub fn get_cache_key(content: &str, backend_name: &str) -> Result<String, CacheServiceError> {
    if content.is_empty() || backend_name.is_empty() {
        return Err(CacheServiceError::InvalidArgument(
            "content and backend name are required".to_string(),
        ));
    }

    let digest = Sha256::digest(content.as_bytes());
    let hex: String = digest.iter().map(|b| format!("{:02x}", b)).collect();
    Ok(format!("{}:{}:{}", KEY_NAMESPACE, backend_name, hex))
}
