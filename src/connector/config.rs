use crate::domain::DomainError;

pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-04-17";

/// Startup configuration for the Gemini adapter.
///
/// Read once at process start; this is the single authoritative credential
/// check for the session. When it fails the front-end still runs, but with
/// the entry control permanently disabled.
#[derive(Debug, Clone)]
pub struct Settings {
    api_key: String,
    model: String,
    base_url: String,
}

impl Settings {
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        base_url: impl Into<String>,
    ) -> Self {
        Self {
            api_key: api_key.into(),
            model: model.into(),
            base_url: base_url.into(),
        }
    }

    /// Read configuration from the environment:
    ///
    /// | Variable          | Default                                     | Purpose              |
    /// |-------------------|---------------------------------------------|----------------------|
    /// | `GEMINI_API_KEY`  | required (`API_KEY` accepted as fallback)   | Credential           |
    /// | `GEMINI_MODEL`    | `gemini-2.5-flash-preview-04-17`            | Model identifier     |
    /// | `GEMINI_BASE_URL` | `https://generativelanguage.googleapis.com` | Any compatible server|
    pub fn from_env() -> Result<Self, DomainError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .or_else(|_| std::env::var("API_KEY"))
            .ok()
            .filter(|key| !key.trim().is_empty())
            .ok_or_else(|| {
                DomainError::configuration("GEMINI_API_KEY environment variable not set")
            })?;

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let base_url =
            std::env::var("GEMINI_BASE_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.to_string());

        Ok(Self::new(api_key, model, base_url))
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_accessors() {
        let settings = Settings::new("sk-test", "gemini-test", "http://localhost:8080");

        assert_eq!(settings.api_key(), "sk-test");
        assert_eq!(settings.model(), "gemini-test");
        assert_eq!(settings.base_url(), "http://localhost:8080");
    }
}
