use sha2::{Digest, Sha256};

/// Compute a stable SHA-256 fingerprint for a predicate failure.
///
/// Identity fields:
/// - predicate ID
/// - code
/// - the request values the predicate looked at, in a fixed order
///
/// Each part is hashed as `<byte length>:<bytes>`, so request values that
/// contain any separator character cannot shift into a neighbouring part.
pub fn fingerprint_for_predicate(predicate: &str, code: &str, values: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for part in [predicate, code].iter().chain(values) {
        hasher.update(part.len().to_string().as_bytes());
        hasher.update(b":");
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}
