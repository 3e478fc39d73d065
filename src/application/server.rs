#[cfg(test)]
#[path = "server_test.rs"]
mod tests;

use std::sync::Arc;

use anyhow::Result;
use axum::extract::State;
use axum::http::header;
use axum::http::Method;
use axum::http::StatusCode;
use axum::routing::post;
use axum::Json;
use axum::Router;
use chrono::SecondsFormat;
use chrono::Utc;
use tower_http::cors::Any;
use tower_http::cors::CorsLayer;

use crate::configuration::Config;
use crate::configuration::ConfigKey;
use crate::domain::models::AuthRequest;
use crate::domain::models::AuthResponse;
use crate::domain::models::Backend;
use crate::domain::models::ChatRequest;
use crate::domain::models::ChatResponse;
use crate::domain::services::AuthOutcome;
use crate::domain::services::Authenticator;
use crate::domain::services::PromptComposer;
use crate::domain::services::AUTH_GRANTED_MESSAGE;
use crate::infrastructure::backends::gemini::Gemini;

/// Returned on any upstream failure, pointing at the national mental health
/// consultation line instead of leaking the error to the visitor.
pub const SERVER_FALLBACK_MESSAGE: &str = "申し訳ありません。一時的に接続に問題があります。しばらく待ってから再度お試しください。お急ぎの場合は、専門機関（こころの健康相談統一ダイヤル: 0570-064-556）にご相談ください。";

const MESSAGE_REQUIRED_ERROR: &str = "Message is required";

#[derive(Clone)]
pub struct AppState {
    authenticator: Arc<Authenticator>,
    backend: Arc<dyn Backend + Send + Sync>,
}

impl AppState {
    pub fn new(authenticator: Authenticator, backend: Arc<dyn Backend + Send + Sync>) -> AppState {
        return AppState {
            authenticator: Arc::new(authenticator),
            backend,
        };
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    return Router::new()
        .route("/api/auth", post(auth))
        .route("/api/chat", post(chat))
        .with_state(state)
        .layer(cors);
}

async fn auth(
    State(state): State<AppState>,
    Json(req): Json<AuthRequest>,
) -> (StatusCode, Json<AuthResponse>) {
    match state.authenticator.authenticate(&req.password) {
        AuthOutcome::Granted { session, timestamp } => {
            tracing::info!(session_id = %session.id, "login granted");
            let res = AuthResponse {
                success: true,
                session_id: Some(session.id),
                message: Some(AUTH_GRANTED_MESSAGE.to_string()),
                timestamp: Some(timestamp),
            };
            return (StatusCode::OK, Json(res));
        }
        AuthOutcome::Denied { message } => {
            tracing::info!("login denied");
            let res = AuthResponse {
                success: false,
                session_id: None,
                message: Some(message),
                timestamp: None,
            };
            return (StatusCode::UNAUTHORIZED, Json(res));
        }
    }
}

async fn chat(
    State(state): State<AppState>,
    Json(req): Json<ChatRequest>,
) -> (StatusCode, Json<ChatResponse>) {
    if req.message.is_empty() {
        let res = ChatResponse {
            success: false,
            response: None,
            error: Some(MESSAGE_REQUIRED_ERROR.to_string()),
            timestamp: None,
        };
        return (StatusCode::BAD_REQUEST, Json(res));
    }

    let prompt = PromptComposer::compose(&req.conversation_history, &req.message);
    match state.backend.generate_reply(&prompt).await {
        Ok(reply) => {
            let res = ChatResponse {
                success: true,
                response: Some(reply),
                error: None,
                timestamp: Some(Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)),
            };
            return (StatusCode::OK, Json(res));
        }
        Err(err) => {
            tracing::error!(error = %err, "completion request failed");
            let res = ChatResponse {
                success: false,
                response: None,
                error: Some(SERVER_FALLBACK_MESSAGE.to_string()),
                timestamp: None,
            };
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(res));
        }
    }
}

pub async fn start() -> Result<()> {
    if Config::get(ConfigKey::AccessPassword).is_empty() {
        tracing::warn!("no access password is configured, all logins will be denied");
    }

    let backend = Gemini::default();
    if let Err(err) = backend.health_check().await {
        tracing::warn!(error = %err, "backend health check failed, replies will fall back to the apology message");
    }

    let state = AppState::new(
        Authenticator::new(&Config::get(ConfigKey::AccessPassword)),
        Arc::new(backend),
    );

    let address = format!(
        "{host}:{port}",
        host = Config::get(ConfigKey::Host),
        port = Config::get(ConfigKey::Port)
    );
    let listener = tokio::net::TcpListener::bind(&address).await?;
    tracing::info!(address = %address, "counseling room server listening");

    axum::serve(listener, build_router(state)).await?;

    return Ok(());
}
