// src/auth/token.rs
use sha2::{Digest, Sha256};

/// SHA-256 of the raw cookie token; this is what the sessions table stores.
pub fn hash_token(token: &str) -> [u8; 32] {
    Sha256::digest(token.as_bytes()).into()
}
