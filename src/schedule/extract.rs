//! Structured shift extraction from natural language.
//!
//! The model is asked for a small JSON object; everything around that call
//! is scraping and validation. Extraction failure is a value (`Ok(None)`),
//! never a panic: the model returning prose, a truncated object, or a bad
//! time format all degrade to "couldn't extract".

use super::{parse_hhmm, resolve_day_reference, Shift};
use crate::config::Prompts;
use crate::error::Result;
use crate::llm::TextGenerator;
use chrono::{Local, NaiveDate};
use regex::Regex;
use serde::Deserialize;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};
use tracing::{debug, info, warn};

/// Extracts structured shift data from free-text scheduling requests.
pub struct ShiftExtractor {
    generator: Arc<dyn TextGenerator>,
    prompts: Prompts,
}

/// The fields the model is asked to return.
#[derive(Debug, Deserialize)]
struct ExtractedFields {
    #[serde(default)]
    day_name: String,
    start_time: Option<String>,
    end_time: Option<String>,
}

impl ShiftExtractor {
    /// Create a new extractor over the given backend.
    pub fn new(generator: Arc<dyn TextGenerator>, prompts: Prompts) -> Self {
        Self { generator, prompts }
    }

    /// Extract a shift from the query, resolving dates against today.
    pub async fn extract(&self, query: &str) -> Result<Option<Shift>> {
        self.extract_at(query, Local::now().date_naive()).await
    }

    /// Extract a shift with an explicit "today" for date resolution.
    pub async fn extract_at(&self, query: &str, today: NaiveDate) -> Result<Option<Shift>> {
        let mut vars = HashMap::new();
        vars.insert("query".to_string(), query.to_string());
        vars.insert("today_date".to_string(), today.format("%Y-%m-%d").to_string());
        vars.insert("today_day".to_string(), super::weekday_name(today));

        let prompt = self
            .prompts
            .render_with_custom(&self.prompts.extraction.user, &vars);

        let completion = self.generator.generate(&prompt).await?;
        debug!("Raw extraction completion: {}", completion);

        let shift = parse_completion(&completion, query, today);
        match &shift {
            Some(s) => info!("Extracted shift: {}", s),
            None => warn!("No shift could be extracted from completion"),
        }

        Ok(shift)
    }
}

/// Parse a raw model completion into a shift, if possible.
///
/// Tolerates markdown fences and surrounding prose by scraping the first
/// JSON object out of the text.
fn parse_completion(completion: &str, query: &str, today: NaiveDate) -> Option<Shift> {
    let json_str = first_json_object(completion)?;

    let fields: ExtractedFields = match serde_json::from_str(json_str) {
        Ok(fields) => fields,
        Err(e) => {
            warn!("Completion contained unparseable JSON: {}", e);
            return None;
        }
    };

    let start_time = parse_hhmm(&fields.start_time?)?;
    let end_time = parse_hhmm(&fields.end_time?)?;

    let date = resolve_day_reference(&fields.day_name, query, today);

    Some(Shift::new(date, start_time, end_time))
}

/// Find the first `{...}` object in the text.
fn first_json_object(text: &str) -> Option<&str> {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    let re = PATTERN.get_or_init(|| Regex::new(r"(?s)\{.*?\}").expect("valid literal pattern"));
    re.find(text).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VaktError;
    use async_trait::async_trait;

    /// Generator that returns a canned completion.
    struct Canned(String);

    #[async_trait]
    impl TextGenerator for Canned {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Ok(self.0.clone())
        }

        fn model_info(&self) -> String {
            "canned".to_string()
        }
    }

    /// Generator that always fails, like an unreachable server.
    struct Failing;

    #[async_trait]
    impl TextGenerator for Failing {
        async fn generate(&self, _prompt: &str) -> Result<String> {
            Err(VaktError::Llm("connection refused".to_string()))
        }

        fn model_info(&self) -> String {
            "failing".to_string()
        }
    }

    fn extractor(completion: &str) -> ShiftExtractor {
        ShiftExtractor::new(Arc::new(Canned(completion.to_string())), Prompts::default())
    }

    // 2024-06-05 is a Wednesday.
    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 5).unwrap()
    }

    #[tokio::test]
    async fn test_extracts_clean_json() {
        let ex = extractor(r#"{"day_name": "tomorrow", "start_time": "09:00", "end_time": "17:00"}"#);
        let shift = ex
            .extract_at("work tomorrow 9 to 5", today())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(shift.date, NaiveDate::from_ymd_opt(2024, 6, 6).unwrap());
        assert_eq!(shift.day, "Thursday");
        assert_eq!(shift.start_time, parse_hhmm("09:00").unwrap());
        assert_eq!(shift.end_time, parse_hhmm("17:00").unwrap());
    }

    #[tokio::test]
    async fn test_extracts_json_inside_markdown_fence() {
        let completion = "Here you go:\n```json\n{\"day_name\": \"Friday\", \"start_time\": \"10:00\", \"end_time\": \"14:00\"}\n```\nLet me know!";
        let shift = ex_shift(completion, "schedule me for Friday 10 to 2").await;
        assert_eq!(shift.unwrap().date, NaiveDate::from_ymd_opt(2024, 6, 7).unwrap());
    }

    #[tokio::test]
    async fn test_extracts_json_surrounded_by_prose() {
        let completion = r#"Sure! The extracted details are {"day_name": "tonight", "start_time": "21:00", "end_time": "23:00"} as requested."#;
        let shift = ex_shift(completion, "tonight 9pm-11pm").await.unwrap();
        assert_eq!(shift.date, today());
    }

    #[tokio::test]
    async fn test_no_json_yields_none() {
        assert!(ex_shift("I'm sorry, I can't help with that.", "gibberish")
            .await
            .is_none());
        assert!(ex_shift("", "empty").await.is_none());
    }

    #[tokio::test]
    async fn test_missing_fields_yield_none() {
        assert!(
            ex_shift(r#"{"day_name": "Monday", "start_time": "09:00"}"#, "Monday 9")
                .await
                .is_none()
        );
        assert!(ex_shift(r#"{"day_name": "Monday"}"#, "Monday").await.is_none());
    }

    #[tokio::test]
    async fn test_invalid_time_format_yields_none() {
        assert!(ex_shift(
            r#"{"day_name": "Monday", "start_time": "9am", "end_time": "5pm"}"#,
            "Monday 9am to 5pm"
        )
        .await
        .is_none());
    }

    #[tokio::test]
    async fn test_missing_day_name_defaults_to_today() {
        let shift = ex_shift(
            r#"{"start_time": "09:00", "end_time": "17:00"}"#,
            "work 9 to 5",
        )
        .await
        .unwrap();
        assert_eq!(shift.date, today());
    }

    #[tokio::test]
    async fn test_backend_error_propagates() {
        let ex = ShiftExtractor::new(Arc::new(Failing), Prompts::default());
        let result = ex.extract_at("work tomorrow", today()).await;
        assert!(matches!(result, Err(VaktError::Llm(_))));
    }

    async fn ex_shift(completion: &str, query: &str) -> Option<Shift> {
        extractor(completion)
            .extract_at(query, today())
            .await
            .unwrap()
    }

    #[test]
    fn test_first_json_object_is_non_greedy() {
        let text = r#"{"a": 1} and {"b": 2}"#;
        assert_eq!(first_json_object(text), Some(r#"{"a": 1}"#));
    }

    #[test]
    fn test_first_json_object_spans_newlines() {
        let text = "{\n  \"day_name\": \"tonight\"\n}";
        assert!(first_json_object(text).is_some());
    }
}
