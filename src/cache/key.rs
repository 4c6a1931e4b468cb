//! Key Hashing Module
//!
//! Derives the store index from caller-supplied logical keys.

use sha2::{Digest, Sha256};

// == Hash Key ==
/// Hashes a logical key into the opaque, fixed-size store index.
///
/// SHA-256, hex-encoded. Deterministic and collision-resistant; the
/// transform is one-way, so entries keep their logical key separately
/// for operations that need the original text.
pub fn hash_key(logical_key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(logical_key.as_bytes());
    hex::encode(hasher.finalize())
}
