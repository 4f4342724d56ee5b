//! Authenticated encryption of credentials at rest
//!
//! A secret string is sealed with AES-256-GCM into a single base64
//! blob laid out as `nonce(12) || ciphertext || tag(16)`. The blob is
//! opaque to callers; storage is someone else's problem.

use aes_gcm::aead::{Aead, AeadCore, KeyInit, OsRng};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use thiserror::Error;

const KEY_LEN: usize = 32;
const NONCE_LEN: usize = 12;
const TAG_LEN: usize = 16;

/// Errors from the credential codec.
///
/// Decryption failures are deliberately uniform: callers cannot tell a
/// truncated blob from a bad authentication tag.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("encryption failed")]
    EncryptFailed,

    #[error("Failed to decrypt API key")]
    DecryptFailed,
}

/// Symmetric codec over a configured master secret.
///
/// The master key is stretched to the cipher's key length by padding
/// with `'0'` bytes or truncating. That is passphrase reuse, not a
/// KDF, and is kept only for compatibility with the existing blob
/// format; do not imitate it in new formats.
pub struct CredentialCodec {
    cipher: Aes256Gcm,
}

impl CredentialCodec {
    /// Build a codec from the configured master secret
    pub fn new(master_key: &str) -> Self {
        let mut key_bytes = [b'0'; KEY_LEN];
        let raw = master_key.as_bytes();
        let len = raw.len().min(KEY_LEN);
        key_bytes[..len].copy_from_slice(&raw[..len]);

        let key = Key::<Aes256Gcm>::from_slice(&key_bytes);
        Self {
            cipher: Aes256Gcm::new(key),
        }
    }

    /// Seal a plaintext secret into a base64 blob.
    ///
    /// A fresh random nonce is drawn on every call; nonces are never
    /// cached or derived.
    pub fn encrypt(&self, plaintext: &str) -> Result<String, CryptoError> {
        let nonce = Aes256Gcm::generate_nonce(&mut OsRng);
        let ciphertext = self
            .cipher
            .encrypt(&nonce, plaintext.as_bytes())
            .map_err(|_| CryptoError::EncryptFailed)?;

        let mut blob = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        blob.extend_from_slice(nonce.as_slice());
        blob.extend_from_slice(&ciphertext);

        Ok(STANDARD.encode(blob))
    }

    /// Open a base64 blob back into the plaintext secret.
    ///
    /// Rejects anything shorter than a nonce plus a tag, any blob that
    /// fails authentication, and non-UTF-8 plaintext, all with the same
    /// opaque error.
    pub fn decrypt(&self, blob: &str) -> Result<String, CryptoError> {
        let bytes = STANDARD
            .decode(blob)
            .map_err(|_| CryptoError::DecryptFailed)?;

        if bytes.len() < NONCE_LEN + TAG_LEN {
            return Err(CryptoError::DecryptFailed);
        }

        let (nonce, ciphertext) = bytes.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(Nonce::from_slice(nonce), ciphertext)
            .map_err(|_| CryptoError::DecryptFailed)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::DecryptFailed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trip() {
        let codec = CredentialCodec::new("test-master-key");
        let blob = codec.encrypt("sk-secret-value").unwrap();
        assert_eq!(codec.decrypt(&blob).unwrap(), "sk-secret-value");
    }

    #[test]
    fn test_round_trip_empty_plaintext() {
        let codec = CredentialCodec::new("test-master-key");
        let blob = codec.encrypt("").unwrap();
        assert_eq!(codec.decrypt(&blob).unwrap(), "");
    }

    #[test]
    fn test_long_master_key_is_truncated_consistently() {
        let long = "k".repeat(100);
        let codec_a = CredentialCodec::new(&long);
        let codec_b = CredentialCodec::new(&long[..32]);
        let blob = codec_a.encrypt("value").unwrap();
        assert_eq!(codec_b.decrypt(&blob).unwrap(), "value");
    }

    #[test]
    fn test_wrong_key_fails() {
        let blob = CredentialCodec::new("key-one").encrypt("value").unwrap();
        let err = CredentialCodec::new("key-two").decrypt(&blob).unwrap_err();
        assert_eq!(err, CryptoError::DecryptFailed);
    }

    #[test]
    fn test_short_blob_rejected() {
        let codec = CredentialCodec::new("key");
        let short = STANDARD.encode([0u8; 27]);
        assert_eq!(codec.decrypt(&short).unwrap_err(), CryptoError::DecryptFailed);
    }

    #[test]
    fn test_invalid_base64_rejected() {
        let codec = CredentialCodec::new("key");
        assert_eq!(
            codec.decrypt("not-base64!!!").unwrap_err(),
            CryptoError::DecryptFailed
        );
    }

    #[test]
    fn test_blob_layout_starts_with_nonce() {
        let codec = CredentialCodec::new("key");
        let blob = codec.encrypt("value").unwrap();
        let bytes = STANDARD.decode(blob).unwrap();
        // nonce + ciphertext + tag
        assert_eq!(bytes.len(), NONCE_LEN + "value".len() + TAG_LEN);
    }
}
