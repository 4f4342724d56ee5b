//! Credential bundle, caller-owned storage interface, and AEAD codec

pub mod codec;

pub use codec::{CredentialCodec, CryptoError};

use crate::llm::core::provider::Provider;

/// Well-known store entry names, one per credential
pub mod keys {
    pub const OPENAI: &str = "openai";
    pub const ANTHROPIC: &str = "anthropic";
    pub const GEMINI: &str = "gemini";
    pub const YOUTUBE: &str = "youtube";
    pub const GOOGLE_SEARCH: &str = "google_search";
    pub const GOOGLE_SEARCH_ENGINE_ID: &str = "google_search_engine_id";
}

/// Caller-owned persistence of encrypted blobs keyed by provider name
/// (cookies, files, whatever the host uses). This crate only reads.
pub trait CredentialStore {
    /// The stored blob for the given well-known name, if any
    fn get(&self, name: &str) -> Option<String>;
}

/// The decrypted credential bundle passed into each assistant turn
#[derive(Debug, Clone, Default)]
pub struct ApiCredentials {
    pub openai_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    pub youtube_api_key: Option<String>,
    pub google_search_api_key: Option<String>,
    pub google_search_engine_id: Option<String>,
}

impl ApiCredentials {
    /// The completion-API key for the selected provider
    pub fn chat_key(&self, provider: Provider) -> Option<&str> {
        let key = match provider {
            Provider::OpenAi => &self.openai_api_key,
            Provider::Claude => &self.anthropic_api_key,
            Provider::Gemini => &self.gemini_api_key,
        };
        key.as_deref()
    }

    /// Load and decrypt every credential present in the store.
    ///
    /// Any blob that fails to decrypt fails the whole load; proceeding
    /// with a silently missing key would misreport a tampered store as
    /// an unconfigured one.
    pub fn load(
        store: &dyn CredentialStore,
        codec: &CredentialCodec,
    ) -> Result<Self, CryptoError> {
        let decrypt = |name: &str| -> Result<Option<String>, CryptoError> {
            store.get(name).map(|blob| codec.decrypt(&blob)).transpose()
        };

        Ok(Self {
            openai_api_key: decrypt(keys::OPENAI)?,
            anthropic_api_key: decrypt(keys::ANTHROPIC)?,
            gemini_api_key: decrypt(keys::GEMINI)?,
            youtube_api_key: decrypt(keys::YOUTUBE)?,
            google_search_api_key: decrypt(keys::GOOGLE_SEARCH)?,
            google_search_engine_id: decrypt(keys::GOOGLE_SEARCH_ENGINE_ID)?,
        })
    }
}
