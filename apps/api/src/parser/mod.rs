//! Resume structuring: turns extracted resume text into a `ResumeRecord`
//! via the generative model, under a strict JSON-only response contract.

use std::sync::Arc;

use tracing::{error, warn};

use crate::gemini::{GeminiError, TextGenerator};
use crate::models::ResumeRecord;

pub mod fallback;
pub mod prompts;

use self::prompts::RESUME_PARSE_PROMPT;

/// Converts free-form resume text into a structured record.
///
/// Holds the injected model handle; tests substitute a local fake.
#[derive(Clone)]
pub struct ResumeStructurer {
    model: Arc<dyn TextGenerator>,
}

impl ResumeStructurer {
    pub fn new(model: Arc<dyn TextGenerator>) -> Self {
        Self { model }
    }

    /// Structures resume text with one model call.
    ///
    /// Two degradations happen here rather than at the caller:
    /// - empty input short-circuits to the empty record without a model call;
    /// - a response that is not valid record JSON is logged raw and also
    ///   yields the empty record.
    /// Only service failures (transport, API status, empty body) surface as
    /// errors; those are the caller's signal to switch to the local path.
    pub async fn structure(&self, text: &str) -> Result<ResumeRecord, GeminiError> {
        if text.trim().is_empty() {
            warn!("Extracted text is empty, skipping model call");
            return Ok(ResumeRecord::default());
        }

        let prompt = RESUME_PARSE_PROMPT.replace("{resume_text}", text);
        let raw = self.model.generate(&prompt).await?;

        let cleaned = strip_json_fences(&raw);
        match serde_json::from_str::<ResumeRecord>(cleaned) {
            Ok(record) => Ok(record),
            Err(e) => {
                error!("Unable to parse record JSON from model response: {e}");
                error!("Model response: {raw}");
                Ok(ResumeRecord::default())
            }
        }
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from model output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;

    use super::*;

    /// Test double for the model seam: canned response plus a call counter.
    struct FakeModel {
        response: Result<&'static str, ()>,
        calls: AtomicUsize,
    }

    impl FakeModel {
        fn responding(response: &'static str) -> Self {
            Self {
                response: Ok(response),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing() -> Self {
            Self {
                response: Err(()),
                calls: AtomicUsize::new(0),
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl TextGenerator for FakeModel {
        async fn generate(&self, _prompt: &str) -> Result<String, GeminiError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match self.response {
                Ok(text) => Ok(text.to_string()),
                Err(()) => Err(GeminiError::Api {
                    status: 503,
                    message: "service unavailable".to_string(),
                }),
            }
        }
    }

    const VALID_RESPONSE: &str = r#"{
        "Name": "Jane Doe",
        "Skills": ["Rust", "SQL"],
        "Education": [{"degree": "BSc", "institution": "MIT", "graduation_year": "2019"}],
        "Projects": [],
        "Experience": []
    }"#;

    #[tokio::test]
    async fn test_empty_input_short_circuits_without_model_call() {
        let model = Arc::new(FakeModel::responding(VALID_RESPONSE));
        let structurer = ResumeStructurer::new(model.clone());

        let record = structurer.structure("   \n\t ").await.unwrap();

        assert_eq!(record, ResumeRecord::default());
        assert_eq!(model.call_count(), 0);
    }

    #[tokio::test]
    async fn test_valid_response_parses_to_record() {
        let model = Arc::new(FakeModel::responding(VALID_RESPONSE));
        let structurer = ResumeStructurer::new(model.clone());

        let record = structurer.structure("Jane Doe\nRust, SQL").await.unwrap();

        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.skills, vec!["Rust", "SQL"]);
        assert_eq!(record.education.len(), 1);
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_fenced_response_parses_after_stripping() {
        let model = Arc::new(FakeModel::responding(
            "```json\n{\"Name\": \"Jane Doe\", \"Skills\": [\"Rust\"]}\n```",
        ));
        let structurer = ResumeStructurer::new(model);

        let record = structurer.structure("Jane Doe").await.unwrap();

        assert_eq!(record.name, "Jane Doe");
        assert_eq!(record.skills, vec!["Rust"]);
    }

    #[tokio::test]
    async fn test_malformed_response_degrades_to_empty_record() {
        let model = Arc::new(FakeModel::responding(
            "Sure! Here is the resume information you asked for.",
        ));
        let structurer = ResumeStructurer::new(model.clone());

        let record = structurer.structure("Jane Doe").await.unwrap();

        assert_eq!(record, ResumeRecord::default());
        assert_eq!(model.call_count(), 1);
    }

    #[tokio::test]
    async fn test_service_failure_surfaces_as_error() {
        let model = Arc::new(FakeModel::failing());
        let structurer = ResumeStructurer::new(model);

        let err = structurer.structure("Jane Doe").await.unwrap_err();

        assert!(matches!(err, GeminiError::Api { status: 503, .. }));
    }

    #[test]
    fn test_prompt_embeds_resume_text() {
        let prompt = RESUME_PARSE_PROMPT.replace("{resume_text}", "Jane Doe\nRust");
        assert!(prompt.contains("Jane Doe\nRust"));
        assert!(prompt.contains("\"Skills\""));
        assert!(!prompt.contains("{resume_text}"));
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }
}
