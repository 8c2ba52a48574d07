use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use tracing::warn;

use crate::application::TextGenerator;
use crate::domain::DomainError;

const API_VERSION_PATH: &str = "/v1beta/models";

/// Gemini `generateContent` request payload.
#[derive(serde::Serialize)]
struct ApiRequest<'a> {
    contents: Vec<Content<'a>>,
}

#[derive(serde::Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(serde::Serialize)]
struct Part<'a> {
    text: &'a str,
}

/// Minimal subset of the `generateContent` response envelope we care about.
#[derive(Deserialize)]
struct ApiResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}

/// HTTP client for the Gemini `generateContent` endpoint.
///
/// Implements [`TextGenerator`] so the submit flow stays decoupled from
/// transport and serialization details. Failed calls surface the response
/// status and body inside the [`DomainError::Transport`] message, because
/// the provider's error text ("API key not valid", "quota", ...) is what
/// the failure-classification table matches against.
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    /// Full endpoint URL (base + path + model + `:generateContent`).
    url: String,
}

impl GeminiClient {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        let base: String = base_url.into();
        let model: String = model.into();
        let url = build_url(&base, &model);
        Self {
            client: reqwest::Client::builder()
                .timeout(Duration::from_secs(30))
                .build()
                .unwrap_or_default(),
            api_key: api_key.into(),
            model,
            url,
        }
    }
}

fn build_url(base_url: &str, model: &str) -> String {
    format!(
        "{}{API_VERSION_PATH}/{model}:generateContent",
        base_url.trim_end_matches('/')
    )
}

/// Concatenate the text parts of the first candidate, mirroring the hosted
/// SDK's `response.text` accessor. Empty when there are no candidates.
fn extract_text(response: ApiResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .map(|candidate| {
            candidate
                .content
                .parts
                .into_iter()
                .map(|part| part.text)
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        let request = ApiRequest {
            contents: vec![Content {
                parts: vec![Part { text: prompt }],
            }],
        };

        let response = self
            .client
            .post(&self.url)
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| DomainError::transport(format!("GeminiClient: request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!("GeminiClient: API returned {status}: {body}");
            // Keep the body in the error: it carries the provider's message
            // text that the failure classification matches on.
            return Err(DomainError::transport(format!(
                "GeminiClient: API returned {status}: {body}"
            )));
        }

        let api_response: ApiResponse = response.json().await.map_err(|e| {
            DomainError::transport(format!("GeminiClient: failed to parse response: {e}"))
        })?;

        Ok(extract_text(api_response))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_includes_model_and_action() {
        let url = build_url("https://generativelanguage.googleapis.com/", "gemini-test");
        assert_eq!(
            url,
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-test:generateContent"
        );
    }

    #[test]
    fn extract_text_joins_candidate_parts() {
        let response: ApiResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "A matte "}, {"text": "ceramic teapot."}]}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(extract_text(response), "A matte ceramic teapot.");
    }

    #[test]
    fn extract_text_uses_first_candidate_only() {
        let response: ApiResponse = serde_json::from_str(
            r#"{
                "candidates": [
                    {"content": {"parts": [{"text": "first"}]}},
                    {"content": {"parts": [{"text": "second"}]}}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(extract_text(response), "first");
    }

    #[test]
    fn extract_text_is_empty_without_candidates() {
        let response: ApiResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(extract_text(response), "");
    }

    #[test]
    fn extract_text_tolerates_missing_parts() {
        let response: ApiResponse =
            serde_json::from_str(r#"{"candidates": [{"content": {}}]}"#).unwrap();
        assert_eq!(extract_text(response), "");
    }
}
