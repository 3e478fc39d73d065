#[cfg(test)]
#[path = "http_test.rs"]
mod tests;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthRequest;
use crate::domain::models::AuthResponse;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::models::ChatTurn;
use crate::domain::models::CounselorClient;

/// Talks to a running counseling room server over its JSON endpoints.
pub struct HttpCounselorClient {
    url: String,
}

impl Default for HttpCounselorClient {
    fn default() -> HttpCounselorClient {
        return HttpCounselorClient {
            url: Config::get(ConfigKey::ServerURL),
        };
    }
}

#[async_trait]
impl CounselorClient for HttpCounselorClient {
    async fn authenticate(&self, password: &str) -> Result<AuthResponse> {
        // Denials come back with a 401 and a message in the body, so the
        // status itself is not an error here.
        let res = reqwest::Client::new()
            .post(format!("{url}/api/auth", url = self.url))
            .json(&AuthRequest {
                password: password.to_string(),
            })
            .send()
            .await?
            .json::<AuthResponse>()
            .await?;

        return Ok(res);
    }

    async fn request_reply(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
        let res = reqwest::Client::new()
            .post(format!("{url}/api/chat", url = self.url))
            .json(&ChatRequest {
                message: message.to_string(),
                conversation_history: history.to_vec(),
            })
            .send()
            .await?;

        if !res.status().is_success() {
            let status = res.status().as_u16();
            tracing::error!(status = status, "chat endpoint returned an error");
            bail!(format!("chat endpoint returned status {status}"));
        }

        let res = res.json::<ChatResponse>().await?;
        if res.success {
            if let Some(reply) = res.response {
                return Ok(reply);
            }
        }

        bail!(res
            .error
            .unwrap_or_else(|| return "API response error".to_string()));
    }
}
