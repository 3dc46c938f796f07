use serde::Serialize;
use sha2::{Digest, Sha256};

/// SHA-256 over the canonical JSON form of a value.
///
/// All entity maps are ordered, so equal values always serialize to the
/// same bytes.
pub(crate) fn fingerprint<T: Serialize>(value: &T) -> String {
    let bytes = serde_json::to_vec(value).unwrap_or_default();
    format!("{:x}", Sha256::digest(&bytes))
}
