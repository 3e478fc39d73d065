use anyhow::Result;
use async_trait::async_trait;

use super::AuthResponse;
use super::ChatTurn;

/// The terminal client's view of a running counseling room server.
#[async_trait]
pub trait CounselorClient {
    /// Submits the access password and returns the server's verdict.
    async fn authenticate(&self, password: &str) -> Result<AuthResponse>;

    /// Sends one user message plus the prior transcript and returns the
    /// counselor reply text.
    async fn request_reply(&self, message: &str, history: &[ChatTurn]) -> Result<String>;
}

pub type ClientBox = Box<dyn CounselorClient + Send + Sync>;
