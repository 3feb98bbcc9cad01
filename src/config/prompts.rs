//! Prompt templates for Vakt.
//!
//! Prompts can be customized by placing TOML files in the custom prompts directory.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Collection of all prompt templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
#[derive(Default)]
pub struct Prompts {
    pub chat: ChatPrompts,
    pub extraction: ExtractionPrompts,
    pub agent: AgentPrompts,
    /// Custom variables from config, available in all prompts.
    #[serde(skip)]
    pub variables: std::collections::HashMap<String, String>,
}


/// Prompts for the conversational assistant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChatPrompts {
    pub system: String,
}

impl Default for ChatPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a helpful and efficient scheduling assistant for an intern management system.

Your primary goal is to gather all necessary information to schedule a shift:
- Date (which day?)
- Start time (what time does it start?)
- End time (what time does it end?)

Be friendly, professional, and clear in your communication.
Ask ONE question at a time.
Do not perform any other tasks.

Today's date is: {{today_date}}

Example conversation:
User: I need to book a shift
Assistant: Of course! What day would you like to schedule the shift?
User: Tomorrow
Assistant: Great! What time does the shift start?
User: 10am
Assistant: Perfect. And what time does it end?
User: 2pm
Assistant: Excellent! Shift scheduled for tomorrow from 10:00 AM to 2:00 PM."#
                .to_string(),
        }
    }
}

/// Prompts for structured shift extraction.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractionPrompts {
    pub user: String,
}

impl Default for ExtractionPrompts {
    fn default() -> Self {
        Self {
            user: r#"From the text "{{query}}", extract the shift details.
Today is {{today_date}} ({{today_day}}).

Return ONLY a valid JSON object with these keys:
- "day_name": The name of the day mentioned (e.g., "Monday", "tonight", "tomorrow").
- "start_time": The start time in HH:MM format.
- "end_time": The end time in HH:MM format.

Example for "I want to work tonight 9pm-11pm":
{
  "day_name": "tonight",
  "start_time": "21:00",
  "end_time": "23:00"
}

Your Response:"#
                .to_string(),
        }
    }
}

/// Prompts for the tool-calling agent.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AgentPrompts {
    pub system: String,
}

impl Default for AgentPrompts {
    fn default() -> Self {
        Self {
            system: r#"You are a friendly and helpful shift scheduling assistant.

You have access to the following tools:
{{tools}}

Tool Names: {{tool_names}}

When a user wants to schedule a shift, use the extract_shift_details tool to get structured data.

Always be conversational and friendly. Confirm shift details back to the user.

To use a tool, respond with exactly:
Action: <tool name>
Action Input: <input text>

When you have a final reply for the user, respond with exactly:
Final Answer: <your reply>

Question: {{input}}
{{scratchpad}}"#
                .to_string(),
        }
    }
}

impl Prompts {
    /// Load prompts from the default location, with optional custom directory and variables.
    pub fn load(
        custom_dir: Option<&str>,
        custom_variables: Option<&std::collections::HashMap<String, String>>,
    ) -> crate::error::Result<Self> {
        let mut prompts = Prompts::default();

        // Store custom variables
        if let Some(vars) = custom_variables {
            prompts.variables = vars.clone();
        }

        if let Some(dir) = custom_dir {
            let custom_path = PathBuf::from(shellexpand::tilde(dir).to_string());

            // Load chat prompts if file exists
            let chat_path = custom_path.join("chat.toml");
            if chat_path.exists() {
                let content = std::fs::read_to_string(&chat_path)?;
                prompts.chat = toml::from_str(&content)?;
            }

            // Load extraction prompts if file exists
            let extraction_path = custom_path.join("extraction.toml");
            if extraction_path.exists() {
                let content = std::fs::read_to_string(&extraction_path)?;
                prompts.extraction = toml::from_str(&content)?;
            }

            // Load agent prompts if file exists
            let agent_path = custom_path.join("agent.toml");
            if agent_path.exists() {
                let content = std::fs::read_to_string(&agent_path)?;
                prompts.agent = toml::from_str(&content)?;
            }
        }

        Ok(prompts)
    }

    /// Render a prompt template with the given variables.
    pub fn render(template: &str, vars: &std::collections::HashMap<String, String>) -> String {
        let mut result = template.to_string();
        for (key, value) in vars {
            result = result.replace(&format!("{{{{{}}}}}", key), value);
        }
        result
    }

    /// Render a prompt template with both provided variables and custom config variables.
    /// Provided variables take precedence over custom config variables.
    pub fn render_with_custom(
        &self,
        template: &str,
        vars: &std::collections::HashMap<String, String>,
    ) -> String {
        // Start with custom variables, then override with provided vars
        let mut merged = self.variables.clone();
        for (key, value) in vars {
            merged.insert(key.clone(), value.clone());
        }
        Self::render(template, &merged)
    }
}
