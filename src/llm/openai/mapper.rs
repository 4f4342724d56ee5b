//! Mapping between abstraction types and OpenAI-specific types

use crate::llm::core::{
    error::LlmError,
    types::{CompletionRequest, ContentBlock, Message, MessageRole, ToolChoice, ToolDeclaration},
};

use super::types::{
    ChatCompletionRequest, ChatCompletionResponse, OpenAiFunctionCall, OpenAiFunctionDef,
    OpenAiMessage, OpenAiTool, OpenAiToolCall,
};

/// Convert our abstraction request to OpenAI's request format
pub fn to_openai_request(request: CompletionRequest, model: &str) -> ChatCompletionRequest {
    let mut messages = Vec::with_capacity(request.messages.len() + 1);

    // The system prompt rides as a leading system message
    if let Some(system) = request.system {
        messages.push(OpenAiMessage {
            role: "system".to_string(),
            content: Some(system),
            tool_calls: None,
            tool_call_id: None,
        });
    }

    for message in request.messages {
        messages.extend(to_openai_messages(message));
    }

    let tools: Vec<OpenAiTool> = request.tools.into_iter().map(to_openai_tool).collect();

    ChatCompletionRequest {
        model: model.to_string(),
        messages,
        temperature: request.config.temperature,
        max_tokens: Some(request.config.max_tokens),
        top_p: request.config.top_p,
        tools: if tools.is_empty() { None } else { Some(tools) },
        tool_choice: match request.tool_choice {
            ToolChoice::Required => Some("required".to_string()),
            ToolChoice::Auto => None,
        },
    }
}

/// Convert one unified message to its wire form.
///
/// A tool message fans out into one `role: "tool"` message per result
/// block; everything else maps one-to-one.
fn to_openai_messages(message: Message) -> Vec<OpenAiMessage> {
    match message.role {
        MessageRole::User | MessageRole::Assistant => {
            let role = match message.role {
                MessageRole::User => "user",
                _ => "assistant",
            };

            let mut text = String::new();
            let mut tool_calls = Vec::new();
            for block in message.content {
                match block {
                    ContentBlock::Text { text: t } => text.push_str(&t),
                    ContentBlock::ToolUse { id, name, input } => {
                        tool_calls.push(OpenAiToolCall {
                            id,
                            kind: "function".to_string(),
                            function: OpenAiFunctionCall {
                                name,
                                arguments: input.to_string(),
                            },
                        });
                    }
                    ContentBlock::ToolResult { .. } => {}
                }
            }

            vec![OpenAiMessage {
                role: role.to_string(),
                content: if text.is_empty() { None } else { Some(text) },
                tool_calls: if tool_calls.is_empty() {
                    None
                } else {
                    Some(tool_calls)
                },
                tool_call_id: None,
            }]
        }
        MessageRole::Tool => message
            .content
            .into_iter()
            .filter_map(|block| match block {
                ContentBlock::ToolResult {
                    tool_use_id,
                    content,
                    ..
                } => Some(OpenAiMessage {
                    role: "tool".to_string(),
                    content: Some(content),
                    tool_calls: None,
                    tool_call_id: Some(tool_use_id),
                }),
                _ => None,
            })
            .collect(),
    }
}

/// Convert our ToolDeclaration to OpenAI's function wrapper
fn to_openai_tool(tool: ToolDeclaration) -> OpenAiTool {
    OpenAiTool {
        kind: "function".to_string(),
        function: OpenAiFunctionDef {
            name: tool.name,
            description: tool.description,
            parameters: tool.input_schema,
        },
    }
}

/// Convert OpenAI's response to the unified assistant turn.
///
/// Tool-call arguments arrive as JSON-encoded strings; an undecodable
/// argument string fails the whole round.
pub fn from_openai_response(response: ChatCompletionResponse) -> Result<Message, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::MalformedResponse("response contained no choices".to_string()))?;

    let mut content = Vec::new();
    if let Some(text) = choice.message.content {
        if !text.is_empty() {
            content.push(ContentBlock::Text { text });
        }
    }

    for call in choice.message.tool_calls.unwrap_or_default() {
        let input: serde_json::Value = serde_json::from_str(&call.function.arguments)?;
        content.push(ContentBlock::ToolUse {
            id: call.id,
            name: call.function.name,
            input,
        });
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
    fn test_request_has_leading_system_message() {
        let wire = to_openai_request(request(ToolChoice::Required), "gpt-4o-mini");
        assert_eq!(wire.messages[0].role, "system");
        assert_eq!(
            wire.messages[0].content.as_deref(),
            Some("Always call your tools first.")
        );
        assert_eq!(wire.messages[1].role, "user");
    }

    #[test]
    fn test_forced_tool_choice_literal() {
        let wire = to_openai_request(request(ToolChoice::Required), "gpt-4o-mini");
        assert_eq!(wire.tool_choice.as_deref(), Some("required"));

        let wire = to_openai_request(request(ToolChoice::Auto), "gpt-4o-mini");
        assert!(wire.tool_choice.is_none());
    }

    #[test]
    fn test_catalog_is_wrapped_in_function_objects() {
        let wire = to_openai_request(request(ToolChoice::Required), "gpt-4o-mini");
        let tools = wire.tools.unwrap();
        assert_eq!(tools.len(), 2);
        assert_eq!(tools[0].kind, "function");
        assert_eq!(tools[0].function.name, "video_search");
        assert_eq!(tools[1].function.name, "web_search");
        assert_eq!(tools[0].function.parameters["required"][0], "query");
    }

    #[test]
    fn test_assistant_tool_turn_round_trips() {
        let message = Message {
            role: MessageRole::Assistant,
            content: vec![ContentBlock::ToolUse {
                id: "call_1".to_string(),
                name: "video_search".to_string(),
                input: serde_json::json!({"query": "knitting"}),
            }],
        };

        let wire = to_openai_messages(message);
        assert_eq!(wire.len(), 1);
        assert!(wire[0].content.is_none());
        let calls = wire[0].tool_calls.as_ref().unwrap();
        assert_eq!(calls[0].id, "call_1");
        assert_eq!(calls[0].function.arguments, r#"{"query":"knitting"}"#);
    }

    #[test]
    fn test_tool_results_fan_out_one_message_per_result() {
        let message = Message::tool_results(vec![
            ContentBlock::ToolResult {
                tool_use_id: "call_1".to_string(),
                name: "video_search".to_string(),
                content: "[]".to_string(),
                is_error: false,
            },
            ContentBlock::ToolResult {
                tool_use_id: "call_2".to_string(),
                name: "web_search".to_string(),
                content: r#"{"error":"Failed to execute web_search"}"#.to_string(),
                is_error: true,
            },
        ]);

        let wire = to_openai_messages(message);
        assert_eq!(wire.len(), 2);
        assert_eq!(wire[0].role, "tool");
        assert_eq!(wire[0].tool_call_id.as_deref(), Some("call_1"));
        assert_eq!(wire[1].tool_call_id.as_deref(), Some("call_2"));
    }

    #[test]
    fn test_from_response_extracts_tool_calls() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": null,
                        "tool_calls": [{
                            "id": "call_abc",
                            "type": "function",
                            "function": {"name": "web_search", "arguments": "{\"query\":\"scarf\"}"}
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            }"#,
        )
        .unwrap();

        let message = from_openai_response(response).unwrap();
        let uses: Vec<_> = message.tool_uses().collect();
        assert_eq!(uses.len(), 1);
        assert_eq!(uses[0].0, "call_abc");
        assert_eq!(uses[0].2["query"], "scarf");
    }

    #[test]
    fn test_from_response_bad_arguments_fail_the_round() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "tool_calls": [{
                            "id": "call_abc",
                            "type": "function",
                            "function": {"name": "web_search", "arguments": "{not json"}
                        }]
                    },
                    "finish_reason": "tool_calls"
                }]
            }"#,
        )
        .unwrap();

        let err = from_openai_response(response).unwrap_err();
        assert!(matches!(err, LlmError::SerializationError(_)));
    }

    #[test]
    fn test_from_response_no_choices_is_malformed() {
        let response: ChatCompletionResponse = serde_json::from_str("{}").unwrap();
        let err = from_openai_response(response).unwrap_err();
        assert!(matches!(err, LlmError::MalformedResponse(_)));
    }

    #[test]
    fn test_from_response_text_only() {
        let response: ChatCompletionResponse = serde_json::from_str(
            r#"{"choices":[{"message":{"role":"assistant","content":"Here is how."},"finish_reason":"stop"}]}"#,
        )
        .unwrap();

        let message = from_openai_response(response).unwrap();
        assert_eq!(message.text(), Some("Here is how."));
        assert_eq!(message.tool_uses().count(), 0);
    }
}
