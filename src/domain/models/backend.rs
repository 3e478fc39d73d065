use anyhow::Result;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("GEMINI_API_KEY is not configured")]
    MissingCredential,
    #[error("failed to reach the Gemini API: {0}")]
    Transport(#[source] reqwest::Error),
    #[error("Gemini API error: {status}")]
    Upstream { status: u16 },
    #[error("invalid API response from Gemini")]
    Malformed,
}

#[async_trait]
pub trait Backend {
    /// Used at startup to verify all configurations are available to work
    /// with the backend.
    async fn health_check(&self) -> Result<()>;

    /// Sends one fully composed prompt and returns the counselor reply text.
    async fn generate_reply(&self, prompt: &str) -> Result<String, GatewayError>;
}
