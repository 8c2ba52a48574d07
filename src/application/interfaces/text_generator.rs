use async_trait::async_trait;

use crate::domain::DomainError;

/// An interface for sending a single prompt to a hosted text-generation
/// model and receiving the response text.
///
/// Implementors encapsulate transport, serialization, and vendor-specific
/// API details. Consumers (e.g. [`crate::application::DescribeModelUseCase`])
/// remain decoupled from any particular provider or HTTP client library.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Send `prompt` and return the model's response text.
    ///
    /// The returned string may be empty; deciding what an empty response
    /// means is the caller's concern, not the transport's.
    async fn generate(&self, prompt: &str) -> Result<String, DomainError>;

    /// Model identifier, for logging.
    fn model_name(&self) -> &str;
}
