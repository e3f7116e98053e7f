//! Cryptographic Utilities

use base64::{Engine, engine::general_purpose};
use rand::{RngCore, rngs::OsRng};

/// Generate cryptographically secure random bytes
pub fn random_bytes(len: usize) -> Vec<u8> {
    let mut bytes = vec![0u8; len];
    OsRng.fill_bytes(&mut bytes);
    bytes
}

/// Encode bytes as base64
pub fn to_base64(bytes: &[u8]) -> String {
    general_purpose::STANDARD.encode(bytes)
}

/// Decode base64 to bytes
pub fn from_base64(s: &str) -> Result<Vec<u8>, base64::DecodeError> {
    general_purpose::STANDARD.decode(s.trim())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_bytes() {
        let bytes = random_bytes(32);
        assert_eq!(bytes.len(), 32);
        // Should not be all zeros (statistically)
        assert!(bytes.iter().any(|&b| b != 0));

        assert_ne!(random_bytes(32), random_bytes(32));
    }

    #[test]
    fn test_base64_decodes_with_surrounding_whitespace() {
        let encoded = format!(" {}\n", to_base64(b"secret-key"));
        assert_eq!(from_base64(&encoded).unwrap(), b"secret-key");
    }

    #[test]
    fn test_base64_rejects_garbage() {
        assert!(from_base64("!!!not base64!!!").is_err());
    }
}
