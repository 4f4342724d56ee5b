//! The fixed two-tool catalog offered to every provider

use serde::Deserialize;
use serde_json::json;

use crate::llm::core::types::ToolDeclaration;

/// Name of the video lookup tool
pub const VIDEO_SEARCH: &str = "video_search";
/// Name of the web lookup tool
pub const WEB_SEARCH: &str = "web_search";

const DEFAULT_MAX_RESULTS: u32 = 10;

/// The catalog attached to every completion request: exactly the video
/// and web lookup tools, in that order.
pub fn tool_catalog() -> Vec<ToolDeclaration> {
    vec![video_search_declaration(), web_search_declaration()]
}

fn video_search_declaration() -> ToolDeclaration {
    ToolDeclaration {
        name: VIDEO_SEARCH.to_string(),
        description: "Search for educational videos related to the topic. Use this when the \
                      user wants to learn something or needs video tutorials."
            .to_string(),
        input_schema: search_parameters(
            "The search query for finding relevant videos (e.g., \"how to make fried rice tutorial\")",
            "Maximum number of videos to return (default: 10)",
        ),
    }
}

fn web_search_declaration() -> ToolDeclaration {
    ToolDeclaration {
        name: WEB_SEARCH.to_string(),
        description: "Search the web for articles, tutorials, and guides related to the topic. \
                      Use this to find written resources and step-by-step guides."
            .to_string(),
        input_schema: search_parameters(
            "The search query for finding relevant articles and tutorials (e.g., \"fried rice recipe guide\")",
            "Maximum number of results to return (default: 10)",
        ),
    }
}

fn search_parameters(query_description: &str, max_description: &str) -> serde_json::Value {
    json!({
        "type": "object",
        "properties": {
            "query": {
                "type": "string",
                "description": query_description,
            },
            "maxResults": {
                "type": "number",
                "description": max_description,
                "default": DEFAULT_MAX_RESULTS,
            },
        },
        "required": ["query"],
    })
}

/// Arguments both tools accept, decoded from a provider's wire shape
#[derive(Debug, Clone, Deserialize)]
pub struct SearchArgs {
    pub query: String,
    #[serde(rename = "maxResults", default = "default_max_results")]
    pub max_results: u32,
}

fn default_max_results() -> u32 {
    DEFAULT_MAX_RESULTS
}
