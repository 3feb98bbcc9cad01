//! Transcript-based chat session.

use crate::config::Prompts;
use crate::error::Result;
use crate::llm::TextGenerator;
use chrono::NaiveDate;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    fn label(self) -> &'static str {
        match self {
            Role::User => "User",
            Role::Assistant => "Assistant",
        }
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone)]
pub struct ChatTurn {
    pub role: Role,
    pub content: String,
}

/// Interactive chat session with conversational memory.
pub struct ChatSession {
    generator: Arc<dyn TextGenerator>,
    system_prompt: String,
    history: Vec<ChatTurn>,
    max_history_messages: usize,
}

impl ChatSession {
    /// Create a session with the system prompt anchored to today's date.
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        prompts: &Prompts,
        today: NaiveDate,
        max_history_messages: usize,
    ) -> Self {
        let mut vars = HashMap::new();
        vars.insert(
            "today_date".to_string(),
            today.format("%A, %B %d, %Y").to_string(),
        );
        let system_prompt = prompts.render_with_custom(&prompts.chat.system, &vars);

        Self {
            generator,
            system_prompt,
            history: Vec::new(),
            max_history_messages,
        }
    }

    /// Send a message and get the assistant's reply.
    pub async fn send(&mut self, input: &str) -> Result<String> {
        let prompt = self.render_prompt(input);
        debug!("Chat prompt: {} chars, {} turns", prompt.len(), self.history.len());

        let reply = self.generator.generate(&prompt).await?;
        let reply = reply.trim().to_string();

        self.history.push(ChatTurn {
            role: Role::User,
            content: input.to_string(),
        });
        self.history.push(ChatTurn {
            role: Role::Assistant,
            content: reply.clone(),
        });
        self.trim_history();

        Ok(reply)
    }

    /// Clear the transcript (keeps the system prompt).
    pub fn clear(&mut self) {
        self.history.clear();
    }

    /// Number of transcript turns currently held.
    pub fn history_len(&self) -> usize {
        self.history.len()
    }

    /// Render the system prompt, the transcript so far, and the new input
    /// into a single prompt for the generate API.
    fn render_prompt(&self, input: &str) -> String {
        let mut prompt = String::with_capacity(self.system_prompt.len() + 256);
        prompt.push_str(&self.system_prompt);
        prompt.push_str("\n\nCurrent conversation:\n");
        for turn in &self.history {
            prompt.push_str(turn.role.label());
            prompt.push_str(": ");
            prompt.push_str(&turn.content);
            prompt.push('\n');
        }
        prompt.push_str("\nUser: ");
        prompt.push_str(input);
        prompt.push_str("\nAssistant:");
        prompt
    }

    /// Drop the oldest turns once the transcript exceeds the cap.
    fn trim_history(&mut self) {
        if self.history.len() > self.max_history_messages {
            let excess = self.history.len() - self.max_history_messages;
            self.history.drain(..excess);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

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

    /// Generator that records the prompt it was given.
    struct Recording(std::sync::Mutex<Vec<String>>);

    #[async_trait::async_trait]
    impl TextGenerator for Recording {
        async fn generate(&self, prompt: &str) -> Result<String> {
            self.0.lock().unwrap().push(prompt.to_string());
            Ok("  Of course! What day?  ".to_string())
        }

        fn model_info(&self) -> String {
            "recording".to_string()
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
    }

    #[test]
    fn test_system_prompt_includes_date() {
        let session = ChatSession::new(
            Arc::new(Canned(String::new())),
            &Prompts::default(),
            today(),
            30,
        );
        assert!(session.system_prompt.contains("Wednesday, June 05, 2024"));
    }

    #[tokio::test]
    async fn test_send_appends_turns_and_trims_reply() {
        let recorder = Arc::new(Recording(std::sync::Mutex::new(Vec::new())));
        let mut session = ChatSession::new(recorder.clone(), &Prompts::default(), today(), 30);

        let reply = session.send("I need to book a shift").await.unwrap();
        assert_eq!(reply, "Of course! What day?");
        assert_eq!(session.history_len(), 2);

        let prompts = recorder.0.lock().unwrap();
        assert!(prompts[0].ends_with("User: I need to book a shift\nAssistant:"));
    }

    #[tokio::test]
    async fn test_transcript_renders_in_order() {
        let recorder = Arc::new(Recording(std::sync::Mutex::new(Vec::new())));
        let mut session = ChatSession::new(recorder.clone(), &Prompts::default(), today(), 30);

        session.send("first").await.unwrap();
        session.send("second").await.unwrap();

        let prompts = recorder.0.lock().unwrap();
        let second_prompt = &prompts[1];
        let first_pos = second_prompt.find("User: first").unwrap();
        let reply_pos = second_prompt.find("Assistant: Of course!").unwrap();
        let second_pos = second_prompt.find("User: second").unwrap();
        assert!(first_pos < reply_pos && reply_pos < second_pos);
    }

    #[tokio::test]
    async fn test_history_trims_oldest_turns() {
        let mut session = ChatSession::new(
            Arc::new(Canned("ok".to_string())),
            &Prompts::default(),
            today(),
            4,
        );

        for i in 0..5 {
            session.send(&format!("message {}", i)).await.unwrap();
        }

        assert_eq!(session.history_len(), 4);
        assert_eq!(session.history[0].content, "message 3");
    }

    #[tokio::test]
    async fn test_clear_resets_transcript() {
        let mut session = ChatSession::new(
            Arc::new(Canned("ok".to_string())),
            &Prompts::default(),
            today(),
            30,
        );
        session.send("hello").await.unwrap();
        session.clear();
        assert_eq!(session.history_len(), 0);
    }
}
