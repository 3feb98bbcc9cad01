//! Agent runner with tool calling loop.

use super::tools::{parse_tool_call, tool_descriptions, tool_names, ToolContext};
use crate::config::Prompts;
use crate::error::{Result, VaktError};
use crate::llm::TextGenerator;
use regex::Regex;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info};

/// Agent that can use the shift-extraction tool to answer scheduling requests.
pub struct Agent {
    generator: Arc<dyn TextGenerator>,
    tools: ToolContext,
    prompts: Prompts,
    max_iterations: usize,
}

/// One step parsed out of a completion.
#[derive(Debug, PartialEq, Eq)]
enum Step {
    Action { name: String, input: String },
    FinalAnswer(String),
}

impl Agent {
    /// Create a new agent.
    pub fn new(generator: Arc<dyn TextGenerator>, tools: ToolContext, prompts: Prompts) -> Self {
        Self {
            generator,
            tools,
            prompts,
            max_iterations: 3,
        }
    }

    /// Set maximum iterations for the agent loop.
    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Run the agent with a user task.
    pub async fn run(&self, task: &str) -> Result<AgentResponse> {
        let mut scratchpad = String::new();
        let mut tool_calls_made = Vec::new();

        for iteration in 1..=self.max_iterations {
            debug!("Agent iteration {}", iteration);

            let mut vars = HashMap::new();
            vars.insert("tools".to_string(), tool_descriptions());
            vars.insert("tool_names".to_string(), tool_names());
            vars.insert("input".to_string(), task.to_string());
            vars.insert("scratchpad".to_string(), scratchpad.clone());

            let prompt = self
                .prompts
                .render_with_custom(&self.prompts.agent.system, &vars);

            let completion = self.generator.generate(&prompt).await?;
            debug!("Agent completion: {}", completion);

            match parse_step(&completion) {
                Step::FinalAnswer(content) => {
                    return Ok(AgentResponse {
                        content,
                        tool_calls: tool_calls_made,
                        iterations: iteration,
                    });
                }
                Step::Action { name, input } => {
                    let record = self.execute_tool_call(&name, &input).await;

                    scratchpad.push_str(&format!(
                        "Action: {}\nAction Input: {}\nObservation: {}\n",
                        record.name, record.input, record.result
                    ));
                    tool_calls_made.push(record);
                }
            }
        }

        Err(VaktError::Agent(format!(
            "Agent exceeded maximum iterations ({})",
            self.max_iterations
        )))
    }

    /// Execute a single tool call and return a record of it.
    async fn execute_tool_call(&self, name: &str, input: &str) -> ToolCallRecord {
        info!("Agent calling tool: {} with input: {}", name, input);

        let result = match parse_tool_call(name, input) {
            Ok(tool) => match self.tools.execute(&tool).await {
                Ok(output) => output,
                Err(e) => format!("Tool error: {}", e),
            },
            Err(e) => format!("Failed to parse tool call: {}", e),
        };

        ToolCallRecord {
            name: name.to_string(),
            input: input.to_string(),
            result,
        }
    }
}

/// Parse a completion into the next agent step.
///
/// A completion that follows neither protocol form is treated as a final
/// answer, so a model that just chats (off-topic questions, refusals) still
/// produces a usable reply.
fn parse_step(completion: &str) -> Step {
    static FINAL: OnceLock<Regex> = OnceLock::new();
    static ACTION: OnceLock<Regex> = OnceLock::new();

    let final_re = FINAL
        .get_or_init(|| Regex::new(r"(?s)Final Answer:\s*(.*)").expect("valid literal pattern"));
    let action_re = ACTION.get_or_init(|| {
        Regex::new(r"(?m)^\s*Action:\s*(.+?)\s*$\s*^\s*Action Input:\s*(.+?)\s*$")
            .expect("valid literal pattern")
    });

    if let Some(captures) = final_re.captures(completion) {
        return Step::FinalAnswer(captures[1].trim().to_string());
    }

    if let Some(captures) = action_re.captures(completion) {
        return Step::Action {
            name: captures[1].to_string(),
            input: captures[2].to_string(),
        };
    }

    Step::FinalAnswer(completion.trim().to_string())
}

/// Response from an agent run.
#[derive(Debug)]
pub struct AgentResponse {
    /// The final response content from the agent.
    pub content: String,
    /// Record of all tool calls made during execution.
    pub tool_calls: Vec<ToolCallRecord>,
    /// Number of iterations (LLM calls) used.
    pub iterations: usize,
}

/// Record of a tool call made by the agent.
#[derive(Debug, Clone)]
pub struct ToolCallRecord {
    /// Name of the tool called.
    pub name: String,
    /// Input text passed to the tool.
    pub input: String,
    /// Result returned by the tool.
    pub result: String,
}

impl std::fmt::Display for ToolCallRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}({})", self.name, self.input)
    }
}
