//! Mapping between abstraction types and Gemini types

use uuid::Uuid;

use crate::llm::core::{
    config::GenerationConfig,
    error::LlmError,
    types::{CompletionRequest, ContentBlock, Message, MessageRole, ToolChoice, ToolDeclaration},
};

use super::types::{
    Content, FunctionCall, FunctionCallingConfig, FunctionDeclaration, FunctionResponse,
    GeminiGenerationConfig, GenerateContentRequest, GenerateContentResponse, Part,
    SystemInstruction, Tool, ToolConfig,
};

/// Convert our abstraction request to Gemini's request format
pub fn to_gemini_request(request: CompletionRequest) -> GenerateContentRequest {
    let declarations: Vec<FunctionDeclaration> = request
        .tools
        .into_iter()
        .map(to_gemini_function_declaration)
        .collect();

    GenerateContentRequest {
        contents: request.messages.into_iter().map(to_gemini_content).collect(),
        system_instruction: request.system.map(|s| SystemInstruction {
            parts: vec![Part::Text { text: s }],
        }),
        tools: if declarations.is_empty() {
            None
        } else {
            Some(vec![Tool {
                function_declarations: declarations,
            }])
        },
        tool_config: Some(ToolConfig {
            function_calling_config: FunctionCallingConfig {
                mode: match request.tool_choice {
                    ToolChoice::Required => "ANY".to_string(),
                    ToolChoice::Auto => "AUTO".to_string(),
                },
            },
        }),
        generation_config: Some(to_gemini_generation_config(request.config)),
    }
}

/// Convert a message to Gemini's content format
fn to_gemini_content(message: Message) -> Content {
    let role = match message.role {
        MessageRole::User => "user".to_string(),
        MessageRole::Assistant => "model".to_string(),
        // Tool results ride in a dedicated function turn
        MessageRole::Tool => "function".to_string(),
    };

    let parts = message.content.into_iter().map(to_gemini_part).collect();

    Content { role, parts }
}

/// Convert a content block to a Gemini part
fn to_gemini_part(block: ContentBlock) -> Part {
    match block {
        ContentBlock::Text { text } => Part::Text { text },
        // Gemini does not carry call ids on the wire; the id is dropped
        // here and fabricated again on decode
        ContentBlock::ToolUse { id: _, name, input } => Part::FunctionCall {
            function_call: FunctionCall { name, args: input },
        },
        ContentBlock::ToolResult {
            name,
            content,
            is_error,
            ..
        } => {
            let result = if is_error {
                serde_json::json!({"error": content})
            } else {
                serde_json::from_str(&content)
                    .unwrap_or_else(|_| serde_json::Value::String(content))
            };

            Part::FunctionResponse {
                function_response: FunctionResponse {
                    name,
                    response: serde_json::json!({"result": result}),
                },
            }
        }
    }
}

/// Convert a tool declaration to Gemini's function declaration
fn to_gemini_function_declaration(tool: ToolDeclaration) -> FunctionDeclaration {
    FunctionDeclaration {
        name: tool.name,
        description: tool.description,
        parameters: tool.input_schema,
    }
}

/// Convert generation config to Gemini's format
fn to_gemini_generation_config(config: GenerationConfig) -> GeminiGenerationConfig {
    GeminiGenerationConfig {
        max_output_tokens: Some(config.max_tokens),
        temperature: config.temperature,
        top_p: config.top_p,
        top_k: config.top_k,
        stop_sequences: config.stop_sequences,
    }
}

/// Convert Gemini's response to the unified assistant turn.
///
/// Gemini supplies no call identifiers, so each function call gets a
/// fresh UUID; the same id flows back through the transcript and is
/// dropped again on encode. An empty candidate list decodes to an
/// empty assistant message so the caller's fallback-text path applies.
pub fn from_gemini_response(response: GenerateContentResponse) -> Result<Message, LlmError> {
    let mut content = Vec::new();

    if let Some(candidate) = response.candidates.into_iter().next() {
        for part in candidate.content.parts {
            match part {
                Part::Text { text } => content.push(ContentBlock::Text { text }),
                Part::FunctionCall { function_call } => content.push(ContentBlock::ToolUse {
                    id: Uuid::new_v4().to_string(),
                    name: function_call.name,
                    input: function_call.args,
                }),
                // Only present in requests
                Part::FunctionResponse { .. } => {}
            }
        }
    }

    Ok(Message {
        role: MessageRole::Assistant,
        content,
    })
}
