//! Content hash over a file body.
//!
//! The digest covers the UTF-8 bytes of the body after marker removal, never
//! the raw file, so the appended markers do not feed into their own hash.

use sha2::{Digest as _, Sha256};

/// Hash algorithm identifier shown to users.
pub const HASH_ALGORITHM: &str = "SHA-256";

/// Length of the hex digest in characters.
pub const HASH_HEX_LEN: usize = 64;

/// Compute the SHA-256 of `body` as a lowercase hexadecimal string.
///
/// # Example
///
/// ```
/// use filesigner::integrity::hasher::hash_body;
///
/// assert_eq!(
///     hash_body("hello world"),
///     "b94d27b9934d3e08a52e52d7da7dabfac484efe37a5380ee9088f7ace2efcde9"
/// );
/// ```
pub fn hash_body(body: &str) -> String {
    let hash = Sha256::digest(body.as_bytes());
    format!("{hash:x}")
}
