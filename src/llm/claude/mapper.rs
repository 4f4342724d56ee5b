//! Mapping between abstraction types and Claude-specific types

use crate::llm::core::{
    error::LlmError,
    types::{CompletionRequest, ContentBlock, Message, MessageRole, ToolChoice, ToolDeclaration},
};

use super::types::{
    ClaudeContent, ClaudeContentBlock, ClaudeMessage, ClaudeTool, ClaudeToolChoice,
    MessagesRequest, MessagesResponse,
};

/// Convert our abstraction request to Claude's request format
pub fn to_claude_request(request: CompletionRequest, model: &str) -> MessagesRequest {
    let tools: Vec<ClaudeTool> = request.tools.into_iter().map(to_claude_tool).collect();

    MessagesRequest {
        model: model.to_string(),
        max_tokens: request.config.max_tokens,
        messages: request.messages.into_iter().map(to_claude_message).collect(),
        system: request.system,
        tools: if tools.is_empty() { None } else { Some(tools) },
        tool_choice: match request.tool_choice {
            ToolChoice::Required => Some(ClaudeToolChoice {
                kind: "any".to_string(),
            }),
            ToolChoice::Auto => None,
        },
        temperature: request.config.temperature,
        top_p: request.config.top_p,
        stop_sequences: request.config.stop_sequences,
    }
}

/// Convert our Message to Claude's ClaudeMessage
fn to_claude_message(message: Message) -> ClaudeMessage {
    let role = match message.role {
        MessageRole::User => "user".to_string(),
        MessageRole::Assistant => "assistant".to_string(),
        // Tool results go back in a user message for Claude
        MessageRole::Tool => "user".to_string(),
    };

    // A single text block stays a plain string
    if message.content.len() == 1 {
        if let ContentBlock::Text { text } = &message.content[0] {
            return ClaudeMessage {
                role,
                content: ClaudeContent::Text(text.clone()),
            };
        }
    }

    let blocks = message
        .content
        .into_iter()
        .map(to_claude_content_block)
        .collect();

    ClaudeMessage {
        role,
        content: ClaudeContent::Blocks(blocks),
    }
}

/// Convert our ContentBlock to Claude's ClaudeContentBlock
fn to_claude_content_block(block: ContentBlock) -> ClaudeContentBlock {
    match block {
        ContentBlock::Text { text } => ClaudeContentBlock::Text { text },
        ContentBlock::ToolUse { id, name, input } => {
            ClaudeContentBlock::ToolUse { id, name, input }
        }
        ContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error,
            ..
        } => ClaudeContentBlock::ToolResult {
            tool_use_id,
            content,
            is_error: if is_error { Some(true) } else { None },
        },
    }
}

/// Convert our ToolDeclaration to Claude's ClaudeTool
fn to_claude_tool(tool: ToolDeclaration) -> ClaudeTool {
    ClaudeTool {
        name: tool.name,
        description: tool.description,
        input_schema: tool.input_schema,
    }
}

/// Convert Claude's response to the unified assistant turn
pub fn from_claude_response(response: MessagesResponse) -> Result<Message, LlmError> {
    let mut content = Vec::new();

    for block in response.content {
        match block {
            ClaudeContentBlock::Text { text } => content.push(ContentBlock::Text { text }),
            ClaudeContentBlock::ToolUse { id, name, input } => {
                content.push(ContentBlock::ToolUse { id, name, input });
            }
            // Never present in assistant output
            ClaudeContentBlock::ToolResult { .. } => {}
        }
    }

    Ok(Message {
        role: MessageRole::Assistant,
        content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::core::config::GenerationConfig;
    use crate::llm::tools::tool_catalog;

    fn request(tool_choice: ToolChoice) -> CompletionRequest {
        CompletionRequest {
            messages: vec![Message::user("How do I knit a scarf?")],
            tools: tool_catalog(),
            tool_choice,
            config: GenerationConfig::new(3000).with_temperature(0.7),
            system: Some("Always call your tools first.".to_string()),
        }
    }

    #[test]
    fn test_to_claude_request_basic() {
        let wire = to_claude_request(request(ToolChoice::Required), "claude-sonnet-4-5");

        assert_eq!(wire.model, "claude-sonnet-4-5");
        assert_eq!(wire.max_tokens, 3000);
        assert_eq!(wire.temperature, Some(0.7));
        assert_eq!(
            wire.system.as_deref(),
            Some("Always call your tools first.")
        );
        assert_eq!(wire.messages.len(), 1);
        assert_eq!(wire.tools.as_ref().unwrap().len(), 2);
    }

    #[test]
    fn test_forced_tool_choice_literal() {
        let wire = to_claude_request(request(ToolChoice::Required), "claude-sonnet-4-5");
        assert_eq!(wire.tool_choice.unwrap().kind, "any");

        let wire = to_claude_request(request(ToolChoice::Auto), "claude-sonnet-4-5");
        assert!(wire.tool_choice.is_none());
    }

    #[test]
    fn test_to_claude_message_simple_text() {
        let claude_message = to_claude_message(Message::user("Hello"));

        assert_eq!(claude_message.role, "user");
        match claude_message.content {
            ClaudeContent::Text(text) => assert_eq!(text, "Hello"),
            _ => panic!("Expected simple text content"),
        }
    }

    #[test]
    fn test_tool_results_become_one_user_message() {
        let message = Message::tool_results(vec![
            ContentBlock::ToolResult {
                tool_use_id: "toolu_1".to_string(),
                name: "video_search".to_string(),
                content: "[]".to_string(),
                is_error: false,
            },
            ContentBlock::ToolResult {
                tool_use_id: "toolu_2".to_string(),
                name: "web_search".to_string(),
                content: r#"{"error":"Failed to execute web_search"}"#.to_string(),
                is_error: true,
            },
        ]);

        let claude_message = to_claude_message(message);
        assert_eq!(claude_message.role, "user");

        match claude_message.content {
            ClaudeContent::Blocks(blocks) => {
                assert_eq!(blocks.len(), 2);
                match &blocks[0] {
                    ClaudeContentBlock::ToolResult {
                        tool_use_id,
                        is_error,
                        ..
                    } => {
                        assert_eq!(tool_use_id, "toolu_1");
                        assert_eq!(*is_error, None);
                    }
                    _ => panic!("Expected tool result block"),
                }
                match &blocks[1] {
                    ClaudeContentBlock::ToolResult {
                        tool_use_id,
                        is_error,
                        ..
                    } => {
                        assert_eq!(tool_use_id, "toolu_2");
                        assert_eq!(*is_error, Some(true));
                    }
                    _ => panic!("Expected tool result block"),
                }
            }
            _ => panic!("Expected blocks content"),
        }
    }

    #[test]
    fn test_assistant_tool_turn_round_trips() {
        let message = Message {
            role: MessageRole::Assistant,
            content: vec![
                ContentBlock::Text {
                    text: "Let me check".to_string(),
                },
                ContentBlock::ToolUse {
                    id: "toolu_1".to_string(),
                    name: "video_search".to_string(),
                    input: serde_json::json!({"query": "knitting"}),
                },
            ],
        };

        let claude_message = to_claude_message(message);
        assert_eq!(claude_message.role, "assistant");
        match claude_message.content {
            ClaudeContent::Blocks(blocks) => assert_eq!(blocks.len(), 2),
            _ => panic!("Expected blocks content"),
        }
    }

    #[test]
    fn test_from_claude_response_with_tool_use() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{
                "id": "msg_1",
                "content": [
                    {"type": "text", "text": "Checking."},
                    {"type": "tool_use", "id": "toolu_1", "name": "web_search", "input": {"query": "scarf"}}
                ],
                "stop_reason": "tool_use"
            }"#,
        )
        .unwrap();

        let message = from_claude_response(response).unwrap();
        assert_eq!(message.role, MessageRole::Assistant);
        assert_eq!(message.text(), Some("Checking."));
        let uses: Vec<_> = message.tool_uses().collect();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].0, "toolu_1");
        assert_eq!(uses[0].1, "web_search");
    }

    #[test]
    fn test_from_claude_response_text_only() {
        let response: MessagesResponse = serde_json::from_str(
            r#"{"id":"msg_2","content":[{"type":"text","text":"All done."}],"stop_reason":"end_turn"}"#,
        )
        .unwrap();

        let message = from_claude_response(response).unwrap();
        assert_eq!(message.text(), Some("All done."));
        assert_eq!(message.tool_uses().count(), 0);
    }
}
