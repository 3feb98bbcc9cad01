//! Agent system for tool-augmented scheduling requests.
//!
//! Provides an LLM agent that can call the shift-extraction tool and answer
//! conversationally. The local generate API has no native tool calling, so
//! tools are driven through a text protocol (Action / Action Input /
//! Final Answer) parsed out of each completion.

mod runner;
mod tools;

pub use runner::{Agent, AgentResponse, ToolCallRecord};
pub use tools::{parse_tool_call, tool_descriptions, tool_names, ToolCall, ToolContext};
