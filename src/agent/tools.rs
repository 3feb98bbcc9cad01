//! Tool definitions and implementations for the agent system.

use crate::error::{Result, VaktError};
use crate::schedule::ShiftExtractor;
use serde_json::json;

/// Available tools for the agent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolCall {
    /// Extract structured shift data from a natural-language request.
    ExtractShiftDetails { query: String },
}

/// Tool execution context with access to the shift extractor.
pub struct ToolContext {
    extractor: ShiftExtractor,
}

impl ToolContext {
    /// Create a new tool context.
    pub fn new(extractor: ShiftExtractor) -> Self {
        Self { extractor }
    }

    /// Execute a tool call and return the result as a string.
    ///
    /// Extraction failure is reported in the payload, not as an error, so
    /// the agent can tell the user what went wrong.
    pub async fn execute(&self, tool: &ToolCall) -> Result<String> {
        match tool {
            ToolCall::ExtractShiftDetails { query } => self.execute_extract(query).await,
        }
    }

    async fn execute_extract(&self, query: &str) -> Result<String> {
        let payload = match self.extractor.extract(query).await? {
            Some(shift) => json!({
                "status": "success",
                "data": shift,
            }),
            None => json!({
                "status": "error",
                "error": "Could not extract shift details from the request",
                "data": null,
            }),
        };

        Ok(payload.to_string())
    }
}

/// Tool descriptions for the agent prompt.
pub fn tool_descriptions() -> String {
    "extract_shift_details: Extracts structured shift scheduling data (date, day, \
     start_time, end_time) from a natural-language request. Input is the user's \
     scheduling text."
        .to_string()
}

/// Comma-separated tool names for the agent prompt.
pub fn tool_names() -> String {
    "extract_shift_details".to_string()
}

/// Parse a tool call from the agent's Action/Action Input lines.
pub fn parse_tool_call(name: &str, input: &str) -> Result<ToolCall> {
    match name.trim() {
        "extract_shift_details" => {
            let query = input.trim();
            if query.is_empty() {
                return Err(VaktError::Agent(
                    "extract_shift_details requires an input query".to_string(),
                ));
            }
            Ok(ToolCall::ExtractShiftDetails {
                query: query.to_string(),
            })
        }
        other => Err(VaktError::Agent(format!("Unknown tool: {}", other))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Prompts;
    use crate::llm::TextGenerator;
    use std::sync::Arc;

    struct Canned(String);

    #[async_trait::async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }

        fn model_info(&self) -> String {
            "canned".to_string()
        }
    }

    fn context(completion: &str) -> ToolContext {
        ToolContext::new(ShiftExtractor::new(
            Arc::new(Canned(completion.to_string())),
            Prompts::default(),
        ))
    }

    #[test]
    fn test_parse_extract_tool() {
        let tool = parse_tool_call("extract_shift_details", "work tomorrow 9 to 5").unwrap();
        assert_eq!(
            tool,
            ToolCall::ExtractShiftDetails {
                query: "work tomorrow 9 to 5".to_string()
            }
        );
    }

    #[test]
    fn test_parse_unknown_tool() {
        assert!(parse_tool_call("check_weather", "Oslo").is_err());
    }

    #[test]
    fn test_parse_empty_input() {
        assert!(parse_tool_call("extract_shift_details", "   ").is_err());
    }

    #[tokio::test]
    async fn test_execute_success_payload() {
        let ctx = context(r#"{"day_name": "tonight", "start_time": "21:00", "end_time": "23:00"}"#);
        let result = ctx
            .execute(&ToolCall::ExtractShiftDetails {
                query: "tonight 9pm-11pm".to_string(),
            })
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["status"], "success");
        assert_eq!(value["data"]["start_time"], "21:00");
    }

    #[tokio::test]
    async fn test_execute_failure_payload() {
        let ctx = context("no json here");
        let result = ctx
            .execute(&ToolCall::ExtractShiftDetails {
                query: "gibberish".to_string(),
            })
            .await
            .unwrap();

        let value: serde_json::Value = serde_json::from_str(&result).unwrap();
        assert_eq!(value["status"], "error");
        assert!(value["data"].is_null());
    }
}
