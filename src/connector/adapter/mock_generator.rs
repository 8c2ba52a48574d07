use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use tracing::debug;

use crate::application::TextGenerator;
use crate::domain::DomainError;

enum Reply {
    Text(String),
    Failure(String),
}

/// A deterministic [`TextGenerator`] for tests and offline demos
/// (`--mock-generator`).
///
/// Counts every `generate` call so tests can assert that precondition
/// failures never reach the transport.
pub struct MockGenerator {
    reply: Reply,
    calls: AtomicUsize,
}

impl MockGenerator {
    /// Succeed with the given text on every call.
    pub fn with_reply(text: impl Into<String>) -> Self {
        Self {
            reply: Reply::Text(text.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Succeed with empty text, the "model returned nothing" case.
    pub fn empty() -> Self {
        Self::with_reply("")
    }

    /// Fail every call with a transport error carrying `detail`.
    pub fn failing(detail: impl Into<String>) -> Self {
        Self {
            reply: Reply::Failure(detail.into()),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `generate` calls seen so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn generate(&self, prompt: &str) -> Result<String, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        debug!("MockGenerator received prompt ({} chars)", prompt.len());

        match &self.reply {
            Reply::Text(text) => Ok(text.clone()),
            Reply::Failure(detail) => Err(DomainError::transport(detail.clone())),
        }
    }

    fn model_name(&self) -> &str {
        "mock-generator"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_counts_calls() {
        let mock = MockGenerator::with_reply("a cube");
        assert_eq!(mock.calls(), 0);

        let text = mock.generate("prompt").await.unwrap();
        assert_eq!(text, "a cube");
        assert_eq!(mock.calls(), 1);

        mock.generate("prompt").await.unwrap();
        assert_eq!(mock.calls(), 2);
    }

    #[tokio::test]
    async fn test_mock_failure_is_transport_error() {
        let mock = MockGenerator::failing("quota exceeded");

        let err = mock.generate("prompt").await.unwrap_err();
        assert!(err.is_transport());
        assert!(err.to_string().contains("quota exceeded"));
    }
}
