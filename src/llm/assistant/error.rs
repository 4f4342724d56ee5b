use std::fmt;

use crate::llm::core::error::LlmError;
use crate::llm::core::provider::Provider;

/// Which of the two provider rounds failed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Round {
    First,
    Second,
}

impl fmt::Display for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Round::First => f.write_str("first"),
            Round::Second => f.write_str("second"),
        }
    }
}

/// Errors that can occur while driving a chat turn.
///
/// Tool execution failures never appear here: they are converted into
/// in-band error results the provider sees on the next round.
#[derive(Debug, thiserror::Error)]
pub enum AssistantError {
    /// The user message was empty
    #[error("Message is required")]
    EmptyMessage,

    /// The selected provider's API key is missing; resolve before calling
    #[error("{provider} API key not configured")]
    MissingCredential { provider: Provider },

    /// The provider client could not be constructed
    #[error("failed to initialize {provider} client: {source}")]
    ClientInit {
        provider: Provider,
        #[source]
        source: LlmError,
    },

    /// A completion round failed; carries which round and provider
    #[error("{provider} request failed during the {round} round: {source}")]
    Upstream {
        provider: Provider,
        round: Round,
        #[source]
        source: LlmError,
    },
}
