use std::sync::Arc;
use std::sync::Mutex;

use anyhow::bail;
use anyhow::Result;
use async_trait::async_trait;

use super::ConversationController;
use super::ConversationState;
use super::LoginOutcome;
use super::END_SESSION_CONFIRM;
use super::FALLBACK_MESSAGE;
use super::NETWORK_ERROR_MESSAGE;
use super::NEW_SESSION_CONFIRM;
use super::NEW_SESSION_MESSAGE;
use super::WELCOME_MESSAGE;
use crate::domain::models::AuthResponse;
use crate::domain::models::ChatTurn;
use crate::domain::models::ConfirmPrompt;
use crate::domain::models::CounselorClient;

#[derive(Default, Clone)]
struct ScriptedClient {
    deny_auth: bool,
    fail_auth: bool,
    fail_reply: bool,
    reply: String,
    requests: Arc<Mutex<Vec<(String, usize)>>>,
}

#[async_trait]
impl CounselorClient for ScriptedClient {
    async fn authenticate(&self, _password: &str) -> Result<AuthResponse> {
        if self.fail_auth {
            bail!("connection refused");
        }
        if self.deny_auth {
            return Ok(AuthResponse {
                success: false,
                session_id: None,
                message: Some("パスワードが間違っています".to_string()),
                timestamp: None,
            });
        }

        return Ok(AuthResponse {
            success: true,
            session_id: Some("session_abc123def".to_string()),
            message: Some("Authentication successful".to_string()),
            timestamp: Some("2025-01-01T12:00:00.000Z".to_string()),
        });
    }

    async fn request_reply(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
        self.requests
            .lock()
            .unwrap()
            .push((message.to_string(), history.len()));

        if self.fail_reply {
            bail!("connection refused");
        }

        return Ok(self.reply.clone());
    }
}

struct ScriptedConfirm {
    answer: bool,
    asked: Arc<Mutex<Vec<String>>>,
}

impl ConfirmPrompt for ScriptedConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        self.asked.lock().unwrap().push(prompt.to_string());
        return self.answer;
    }
}

fn controller(client: ScriptedClient, answer: bool) -> ConversationController {
    return ConversationController::new(
        Box::new(client),
        Box::new(ScriptedConfirm {
            answer,
            asked: Arc::new(Mutex::new(vec![])),
        }),
    );
}

#[tokio::test]
async fn it_logs_in_and_seeds_the_welcome_turn() {
    let mut controller = controller(ScriptedClient::default(), true);

    assert!(matches!(
        controller.login("counseling2025").await,
        LoginOutcome::Granted
    ));
    assert_eq!(controller.state(), ConversationState::Idle);
    assert_eq!(controller.session_id(), Some("session_abc123def"));
    assert_eq!(controller.transcript().len(), 1);
    assert_eq!(controller.transcript()[0].message, WELCOME_MESSAGE);
    assert!(!controller.transcript()[0].is_user);
}

#[tokio::test]
async fn it_surfaces_denial_messages() {
    let client = ScriptedClient {
        deny_auth: true,
        ..ScriptedClient::default()
    };
    let mut controller = controller(client, true);

    match controller.login("wrong").await {
        LoginOutcome::Denied(message) => {
            assert_eq!(message, "パスワードが間違っています");
        }
        LoginOutcome::Granted => panic!("expected the login to be denied"),
    }
    assert_eq!(controller.state(), ConversationState::Unauthenticated);
    assert!(controller.transcript().is_empty());
}

#[tokio::test]
async fn it_folds_transport_failures_into_a_denial() {
    let client = ScriptedClient {
        fail_auth: true,
        ..ScriptedClient::default()
    };
    let mut controller = controller(client, true);

    match controller.login("counseling2025").await {
        LoginOutcome::Denied(message) => {
            assert_eq!(message, NETWORK_ERROR_MESSAGE);
        }
        LoginOutcome::Granted => panic!("expected the login to be denied"),
    }
}

#[tokio::test]
async fn it_appends_user_and_counselor_turns() {
    let client = ScriptedClient {
        reply: "お気持ちお察しします".to_string(),
        ..ScriptedClient::default()
    };
    let mut controller = controller(client, true);
    controller.login("counseling2025").await;

    assert!(controller.send_message("疲れました").await);

    let transcript = controller.transcript();
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].message, "疲れました");
    assert!(transcript[1].is_user);
    assert_eq!(transcript[2].message, "お気持ちお察しします");
    assert!(!transcript[2].is_user);
    assert_eq!(controller.state(), ConversationState::Idle);
}

#[tokio::test]
async fn it_snapshots_history_before_the_new_turn() {
    let client = ScriptedClient {
        reply: "お気持ちお察しします".to_string(),
        ..ScriptedClient::default()
    };
    let requests = client.requests.clone();
    let mut controller = controller(client, true);
    controller.login("counseling2025").await;

    controller.send_message("疲れました").await;
    controller.send_message("眠れません").await;

    let requests = requests.lock().unwrap();
    assert_eq!(requests[0], ("疲れました".to_string(), 1));
    assert_eq!(requests[1], ("眠れません".to_string(), 3));
}

#[tokio::test]
async fn it_ignores_blank_messages() {
    let client = ScriptedClient::default();
    let requests = client.requests.clone();
    let mut controller = controller(client, true);
    controller.login("counseling2025").await;

    assert!(!controller.send_message("   ").await);
    assert_eq!(controller.transcript().len(), 1);
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn it_refuses_sends_when_unauthenticated() {
    let client = ScriptedClient::default();
    let requests = client.requests.clone();
    let mut controller = controller(client, true);

    assert!(!controller.send_message("疲れました").await);
    assert!(requests.lock().unwrap().is_empty());
}

#[tokio::test]
async fn it_refuses_sends_while_a_reply_is_pending() {
    let mut controller = controller(ScriptedClient::default(), true);
    controller.login("counseling2025").await;
    controller.state = ConversationState::AwaitingReply;

    assert!(!controller.send_message("疲れました").await);
}

#[tokio::test]
async fn it_falls_back_when_the_reply_fails() {
    let client = ScriptedClient {
        fail_reply: true,
        ..ScriptedClient::default()
    };
    let mut controller = controller(client, true);
    controller.login("counseling2025").await;

    assert!(controller.send_message("疲れました").await);

    let last = controller.transcript().last().unwrap();
    assert_eq!(last.message, FALLBACK_MESSAGE);
    assert!(last.message.contains("0570-064-556"));
    assert!(!last.is_user);
    assert_eq!(controller.state(), ConversationState::Idle);
}

#[tokio::test]
async fn it_resets_the_transcript_on_new_session() {
    let mut controller = controller(ScriptedClient::default(), true);
    controller.login("counseling2025").await;
    controller.send_message("疲れました").await;
    let old_session = controller.session_id().unwrap().to_string();

    assert!(controller.start_new_session());

    assert_ne!(controller.session_id().unwrap(), old_session);
    assert_eq!(controller.transcript().len(), 1);
    assert_eq!(controller.transcript()[0].message, NEW_SESSION_MESSAGE);
    assert_eq!(controller.state(), ConversationState::Idle);
}

#[tokio::test]
async fn it_keeps_the_transcript_when_new_session_is_declined() {
    let asked = Arc::new(Mutex::new(vec![]));
    let mut controller = ConversationController::new(
        Box::new(ScriptedClient::default()),
        Box::new(ScriptedConfirm {
            answer: false,
            asked: asked.clone(),
        }),
    );
    controller.login("counseling2025").await;

    assert!(!controller.start_new_session());
    assert_eq!(controller.transcript()[0].message, WELCOME_MESSAGE);
    assert_eq!(asked.lock().unwrap()[0], NEW_SESSION_CONFIRM);
}

#[tokio::test]
async fn it_ends_the_session_after_confirmation() {
    let asked = Arc::new(Mutex::new(vec![]));
    let mut controller = ConversationController::new(
        Box::new(ScriptedClient::default()),
        Box::new(ScriptedConfirm {
            answer: true,
            asked: asked.clone(),
        }),
    );
    controller.login("counseling2025").await;
    controller.send_message("疲れました").await;

    assert!(controller.end_session());

    assert_eq!(controller.state(), ConversationState::Unauthenticated);
    assert!(controller.transcript().is_empty());
    assert_eq!(controller.session_id(), None);
    assert_eq!(asked.lock().unwrap()[0], END_SESSION_CONFIRM);
}

#[tokio::test]
async fn it_stays_authenticated_when_end_is_declined() {
    let mut controller = controller(ScriptedClient::default(), false);
    controller.login("counseling2025").await;

    assert!(!controller.end_session());
    assert_eq!(controller.state(), ConversationState::Idle);
    assert_eq!(controller.transcript().len(), 1);
}
