use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::application::TextGenerator;
use crate::domain::{DomainError, ViewState};

/// Shown when the trimmed query is empty. No request is issued.
pub const EMPTY_QUERY_MESSAGE: &str = "Please enter a search query.";

/// Shown when no API key was configured at startup. No request is issued
/// and the entry control stays disabled for the rest of the session.
pub const MISSING_KEY_MESSAGE: &str = "API Key is not configured. Cannot perform search. \
     Please ensure GEMINI_API_KEY is set in the deployment environment.";

/// Shown when the call succeeded but the model returned no text.
pub const EMPTY_RESPONSE_MESSAGE: &str =
    "The AI didn't return a description. Please try a different query.";

/// Classified failure messages, matched against the raised error text.
pub const INVALID_KEY_MESSAGE: &str =
    "The provided API Key is invalid. Please check your configuration.";
pub const QUOTA_MESSAGE: &str = "You have exceeded your API quota. Please try again later.";
pub const FORBIDDEN_MESSAGE: &str = "API Key is not valid or missing permissions for the \
     Gemini API. Please check your Google Cloud project and API key settings.";

/// Fallback when no classification rule matches.
pub const GENERIC_FAILURE_MESSAGE: &str =
    "An error occurred while generating the description. Please try again.";

/// Drives the request lifecycle for one description query: validate the
/// input, guard on the configured generator, issue exactly one generation
/// call, and fold the outcome into a [`ViewState`].
///
/// The generator is `None` when no credential was found at startup; every
/// submit then yields the configuration error without touching the network.
pub struct DescribeModelUseCase {
    generator: Option<Arc<dyn TextGenerator>>,
}

impl DescribeModelUseCase {
    pub fn new(generator: Option<Arc<dyn TextGenerator>>) -> Self {
        Self { generator }
    }

    /// True when a generator was wired at startup. The front-end keeps the
    /// entry control permanently disabled when this is false.
    pub fn is_configured(&self) -> bool {
        self.generator.is_some()
    }

    /// Check the submit preconditions, in order: non-empty trimmed query,
    /// then configured credential. Returns the trimmed query on success, so
    /// callers can surface precondition errors without entering Loading.
    pub fn validate(&self, query: &str) -> Result<String, DomainError> {
        let trimmed = query.trim();

        if trimmed.is_empty() {
            return Err(DomainError::validation("query is empty after trimming"));
        }

        if self.generator.is_none() {
            return Err(DomainError::configuration("no API key configured"));
        }

        Ok(trimmed.to_string())
    }

    /// Run one full submit cycle and return the resulting display state,
    /// always exactly one of `Result` or `Error`.
    pub async fn submit(&self, query: &str) -> ViewState {
        let trimmed = match self.validate(query) {
            Ok(q) => q,
            Err(e) => return error_state(&e),
        };

        // validate() checked the generator; re-match instead of unwrapping.
        let Some(ref generator) = self.generator else {
            return ViewState::error(MISSING_KEY_MESSAGE);
        };

        info!(
            "Generating 3D model description for \"{}\" with {}",
            trimmed,
            generator.model_name()
        );

        let start_time = Instant::now();
        let prompt = build_prompt(&trimmed);
        debug!("Prompt: {prompt}");

        match generator.generate(&prompt).await {
            Ok(text) if !text.is_empty() => {
                info!(
                    "Received {} chars in {:.2}s",
                    text.len(),
                    start_time.elapsed().as_secs_f64()
                );
                ViewState::Result(text)
            }
            Ok(_) => {
                warn!("Model returned no text for \"{trimmed}\"");
                error_state(&DomainError::EmptyResponse)
            }
            Err(e) => {
                warn!("Generation failed: {e}");
                error_state(&e)
            }
        }
    }
}

/// Fold a failed submit into its user-facing display state.
pub fn error_state(err: &DomainError) -> ViewState {
    match err {
        DomainError::Validation(_) => ViewState::error(EMPTY_QUERY_MESSAGE),
        DomainError::Configuration(_) => ViewState::error(MISSING_KEY_MESSAGE),
        DomainError::EmptyResponse => ViewState::error(EMPTY_RESPONSE_MESSAGE),
        other => ViewState::error(classify_failure(&other.to_string())),
    }
}

/// Embed the trimmed query into the fixed instruction template.
pub fn build_prompt(query: &str) -> String {
    format!(
        "You are a creative assistant. Based on the following user query, \
         describe in detail the first 3D model that comes to mind. \n\
         Focus on its visual characteristics like shape, materials, textures, \
         colors, and any unique features or overall artistic style.\n\
         User query: \"{query}\""
    )
}

/// Map a raised error's message text to a user-readable message.
///
/// First match wins. The invalid-key and quota rules are case-sensitive,
/// matching the provider's error strings exactly; the forbidden rule is
/// case-insensitive.
pub fn classify_failure(detail: &str) -> &'static str {
    if detail.contains("API key not valid") {
        INVALID_KEY_MESSAGE
    } else if detail.contains("quota") {
        QUOTA_MESSAGE
    } else if detail.to_lowercase().contains("api key service forbidden") {
        FORBIDDEN_MESSAGE
    } else {
        GENERIC_FAILURE_MESSAGE
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classify_matches_invalid_key() {
        let msg = classify_failure("400 Bad Request: API key not valid. Pass a valid key.");
        assert_eq!(msg, INVALID_KEY_MESSAGE);
    }

    #[test]
    fn classify_matches_quota() {
        let msg = classify_failure("429: you have exhausted your quota for today");
        assert_eq!(msg, QUOTA_MESSAGE);
    }

    #[test]
    fn classify_invalid_key_wins_over_quota() {
        // Both substrings present: the table is checked in order.
        let msg = classify_failure("API key not valid, and quota exceeded too");
        assert_eq!(msg, INVALID_KEY_MESSAGE);
    }

    #[test]
    fn classify_forbidden_is_case_insensitive() {
        let msg = classify_failure("403: API KEY SERVICE FORBIDDEN for this project");
        assert_eq!(msg, FORBIDDEN_MESSAGE);
    }

    #[test]
    fn classify_key_rules_are_case_sensitive() {
        // Lowercased "api key not valid" must not match the first rule.
        let msg = classify_failure("api key not valid");
        assert_eq!(msg, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn classify_falls_back_to_generic() {
        let msg = classify_failure("connection reset by peer");
        assert_eq!(msg, GENERIC_FAILURE_MESSAGE);
    }

    #[test]
    fn prompt_embeds_quoted_query() {
        let prompt = build_prompt("glowing crystal dragon");

        assert!(prompt.contains("User query: \"glowing crystal dragon\""));
        assert!(prompt.contains("the first 3D model that comes to mind"));
        assert!(prompt.contains("shape, materials, textures"));
    }

    #[test]
    fn validate_rejects_whitespace_query() {
        let handler = DescribeModelUseCase::new(None);

        let err = handler.validate("   \t  ").unwrap_err();
        assert!(err.is_validation());
    }

    #[test]
    fn validate_checks_query_before_credential() {
        // Both preconditions fail; the empty-query check runs first.
        let handler = DescribeModelUseCase::new(None);

        let err = handler.validate("").unwrap_err();
        assert!(err.is_validation());
        assert!(!err.is_configuration());
    }

    #[test]
    fn error_states_carry_the_mapped_messages() {
        let state = error_state(&DomainError::validation("empty"));
        assert_eq!(state.error_text(), Some(EMPTY_QUERY_MESSAGE));

        let state = error_state(&DomainError::configuration("no key"));
        assert_eq!(state.error_text(), Some(MISSING_KEY_MESSAGE));

        let state = error_state(&DomainError::EmptyResponse);
        assert_eq!(state.error_text(), Some(EMPTY_RESPONSE_MESSAGE));

        let state = error_state(&DomainError::transport("quota exceeded"));
        assert_eq!(state.error_text(), Some(QUOTA_MESSAGE));
    }

    #[test]
    fn validate_trims_the_query() {
        use crate::connector::MockGenerator;
        use std::sync::Arc;

        let handler =
            DescribeModelUseCase::new(Some(Arc::new(MockGenerator::with_reply("a cube"))));

        assert_eq!(handler.validate("  teapot  ").unwrap(), "teapot");
    }

    #[tokio::test]
    async fn submit_without_credential_yields_configuration_error() {
        let handler = DescribeModelUseCase::new(None);

        let state = handler.submit("glowing crystal dragon").await;
        assert_eq!(state.error_text(), Some(MISSING_KEY_MESSAGE));
        assert!(!handler.is_configured());
    }
}
