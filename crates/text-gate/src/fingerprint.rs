//! Normalized text fingerprints for downstream rate-limiting and dedup.

use sha2::{Digest, Sha256};

/// Length of the returned hex fingerprint.
const FINGERPRINT_LEN: usize = 16;

/// Hash a normalized form of `text` into a short hex token.
///
/// Normalization lowercases the text and collapses all whitespace runs, so
/// trivially re-spaced or re-cased duplicates fingerprint identically.
/// Intended to run on sanitized text.
pub fn fingerprint(text: &str) -> String {
    let normalized = text
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    let digest = Sha256::digest(normalized.as_bytes());
    format!("{digest:x}")[..FINGERPRINT_LEN].to_string()
}
