//! Two-round tool-calling orchestrator
//!
//! One call to [`Assistant::run`] drives a full chat turn:
//! - round one goes out with the tool catalog and tool use forced,
//! - requested lookups are executed against the injected services,
//! - the transcript grows by the assistant's tool-request turn and a
//!   tool-result turn, and round two produces the final prose.
//!
//! If the model answers round one without calling any tool there is no
//! round two; its text is returned directly.

mod error;

pub use error::{AssistantError, Round};

use std::sync::Arc;

use crate::credentials::ApiCredentials;
use crate::llm::core::{
    config::GenerationConfig,
    provider::{create_provider, ChatProvider, Provider},
    types::{CompletionRequest, ContentBlock, Message, ToolChoice},
};
use crate::llm::tools::{tool_catalog, ToolOutput, ToolRouter};
use crate::search::{Article, Video, VideoSearch, WebSearch};

/// Returned when the final round carries no text content
const FALLBACK_MESSAGE: &str = "Sorry, I could not generate a response.";

/// Directive prompt shared by all three providers. The tool-choice
/// flag forces the first call; the prompt keeps the model using both
/// tools and structuring its answer around what they return.
const DEFAULT_SYSTEM_PROMPT: &str = "\
# Role
You are a friendly learning assistant. Guide the user step-by-step whenever they want to learn something new.

# Core Principles
1. Beginner's perspective: assume the user is unfamiliar with the topic.
2. Clarity: minimize jargon and explain technical terms when used.
3. Step-by-step approach: break complex content into smaller steps.
4. Practicality: prefer actionable methods over theory.

# Tool Usage - CRITICAL INSTRUCTIONS
- You MUST use the video_search and web_search functions for EVERY user request
- Call BOTH functions for every query:
  1. video_search - find video tutorials on the topic
  2. web_search - find articles, guides, and written tutorials
- Make the function calls FIRST, BEFORE writing any explanation
- The resources you find will be displayed to the user automatically

# Search Query Creation
Extract the core subject from the user's message and turn it into a
natural search phrase (topic + learning intent, e.g. \"... tutorial\",
\"... for beginners\", \"... step by step\").

# Response Structure
1. Use your tools to find resources first
2. Brief summary (2-3 sentences) stating the core information
3. Detailed step-by-step explanation with exact measurements, times,
   and observable criteria instead of vague phrases
4. Reference the videos and articles you found
5. Tips and common pitfalls for beginners
6. Suggested next steps

# Constraints
- Do not provide uncertain information
- Always include safety warnings for dangerous activities
- Prioritize beginner-friendly materials";

/// Configuration shared by every turn: the directive prompt and the
/// generation parameters sent on both rounds. Built once at startup.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub system_prompt: String,
    pub generation: GenerationConfig,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            system_prompt: DEFAULT_SYSTEM_PROMPT.to_string(),
            generation: GenerationConfig::new(3000).with_temperature(0.7),
        }
    }
}

/// Result of one chat turn
#[derive(Debug, Clone)]
pub struct AssistantReply {
    /// Final assistant prose
    pub message: String,
    /// Output of the last `video_search` call this turn, if any
    pub videos: Vec<Video>,
    /// Output of the last `web_search` call this turn, if any
    pub articles: Vec<Article>,
}

/// A normalized tool invocation lifted out of the assistant turn
struct ToolCallRequest {
    id: String,
    name: String,
    input: serde_json::Value,
}

/// Stateless orchestrator for the two-round tool-calling exchange.
///
/// Holds only the injected lookup services and the per-process
/// configuration; conversation state is passed into each call.
pub struct Assistant {
    router: ToolRouter,
    config: AssistantConfig,
}

impl Assistant {
    /// Create an assistant over the given lookup services
    pub fn new(video: Arc<dyn VideoSearch>, web: Arc<dyn WebSearch>) -> Self {
        Self {
            router: ToolRouter::new(video, web),
            config: AssistantConfig::default(),
        }
    }

    /// Replace the default prompt/generation configuration
    pub fn with_config(mut self, config: AssistantConfig) -> Self {
        self.config = config;
        self
    }

    /// Drive one chat turn against the selected provider.
    ///
    /// `history` is the prior conversation (may be empty); `credentials`
    /// must contain the selected provider's completion key. Lookup-key
    /// problems surface as degraded (empty) result lists, not errors.
    pub async fn run(
        &self,
        provider: Provider,
        user_message: &str,
        history: Vec<Message>,
        credentials: &ApiCredentials,
    ) -> Result<AssistantReply, AssistantError> {
        if user_message.trim().is_empty() {
            return Err(AssistantError::EmptyMessage);
        }

        let api_key = credentials
            .chat_key(provider)
            .ok_or(AssistantError::MissingCredential { provider })?;

        let client = create_provider(provider, api_key.to_string())
            .map_err(|source| AssistantError::ClientInit { provider, source })?;

        self.run_with_provider(client.as_ref(), provider, user_message, history)
            .await
    }

    /// Drive one chat turn against an already-built client.
    ///
    /// This is the seam [`run`](Self::run) goes through after resolving
    /// credentials; tests inject mock providers here.
    pub async fn run_with_provider(
        &self,
        client: &dyn ChatProvider,
        provider: Provider,
        user_message: &str,
        history: Vec<Message>,
    ) -> Result<AssistantReply, AssistantError> {
        let catalog = tool_catalog();

        let mut transcript = history;
        transcript.push(Message::user(user_message));

        tracing::debug!(%provider, "starting first completion round");
        let round_one = client
            .complete(CompletionRequest {
                messages: transcript.clone(),
                tools: catalog.clone(),
                tool_choice: ToolChoice::Required,
                config: self.config.generation.clone(),
                system: Some(self.config.system_prompt.clone()),
            })
            .await
            .map_err(|source| AssistantError::Upstream {
                provider,
                round: Round::First,
                source,
            })?;

        let requests: Vec<ToolCallRequest> = round_one
            .message
            .tool_uses()
            .map(|(id, name, input)| ToolCallRequest {
                id: id.to_string(),
                name: name.to_string(),
                input: input.clone(),
            })
            .collect();

        // Degenerate path: the model answered in prose despite the
        // forced-tool flag; one round only
        if requests.is_empty() {
            return Ok(AssistantReply {
                message: final_text(&round_one.message),
                videos: Vec::new(),
                articles: Vec::new(),
            });
        }

        // The calls are independent; dispatch them concurrently and
        // merge in request order so duplicate calls stay
        // last-writer-wins deterministically
        let outcomes = futures::future::join_all(
            requests
                .iter()
                .map(|request| self.router.dispatch(&request.name, &request.input)),
        )
        .await;

        let mut videos: Vec<Video> = Vec::new();
        let mut articles: Vec<Article> = Vec::new();
        let mut result_blocks = Vec::with_capacity(requests.len());

        for (request, outcome) in requests.iter().zip(outcomes) {
            match outcome {
                Ok(output) => {
                    let content = output.wire_payload();
                    match output {
                        ToolOutput::Videos(list) => videos = list,
                        ToolOutput::Articles(list) => articles = list,
                    }
                    result_blocks.push(ContentBlock::ToolResult {
                        tool_use_id: request.id.clone(),
                        name: request.name.clone(),
                        content,
                        is_error: false,
                    });
                }
                Err(err) => {
                    tracing::warn!(tool = %request.name, error = %err, "tool execution failed");
                    let payload =
                        serde_json::json!({"error": format!("Failed to execute {}", request.name)});
                    result_blocks.push(ContentBlock::ToolResult {
                        tool_use_id: request.id.clone(),
                        name: request.name.clone(),
                        content: payload.to_string(),
                        is_error: true,
                    });
                }
            }
        }

        transcript.push(round_one.message);
        transcript.push(Message::tool_results(result_blocks));

        tracing::debug!(%provider, "starting second completion round");
        let round_two = client
            .complete(CompletionRequest {
                messages: transcript,
                tools: catalog,
                tool_choice: ToolChoice::Auto,
                config: self.config.generation.clone(),
                system: Some(self.config.system_prompt.clone()),
            })
            .await
            .map_err(|source| AssistantError::Upstream {
                provider,
                round: Round::Second,
                source,
            })?;

        Ok(AssistantReply {
            message: final_text(&round_two.message),
            videos,
            articles,
        })
    }
}

fn final_text(message: &Message) -> String {
    message
        .text()
        .filter(|text| !text.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| FALLBACK_MESSAGE.to_string())
}
