#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::domain::models::ChatTurn;
use crate::domain::models::ClientBox;
use crate::domain::models::ConfirmBox;
use crate::domain::models::Session;

use super::authenticator::AUTH_DENIED_MESSAGE;

pub const WELCOME_MESSAGE: &str = "こんにちは。匿名カウンセリング室へようこそ。\n\nここは完全に安全で匿名の空間です。どんなことでも遠慮なくお話しください。\n\n今日はどんなことでお困りですか？";
pub const NEW_SESSION_MESSAGE: &str =
    "新しいセッションを開始しました。\n\n今日はどんなことでお困りですか？";
pub const FALLBACK_MESSAGE: &str = "申し訳ありません。システムに問題が発生しました。しばらく待ってから再度お試しください。お急ぎの場合は、専門機関（こころの健康相談統一ダイヤル: 0570-064-556）にご相談ください。";
pub const NETWORK_ERROR_MESSAGE: &str = "ネットワークエラーが発生しました";
pub const NEW_SESSION_CONFIRM: &str =
    "新しいセッションを開始しますか？\n現在の会話内容は削除されます。";
pub const END_SESSION_CONFIRM: &str =
    "セッションを終了しますか？\n会話内容は完全に削除され、復元できません。";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConversationState {
    /// No valid login yet, only `login` is accepted.
    Unauthenticated,
    /// Logged in and ready to accept a message or a session command.
    Idle,
    /// A message is in flight, further sends are refused until it resolves.
    AwaitingReply,
}

pub enum LoginOutcome {
    Granted,
    Denied(String),
}

/// Drives one anonymous counseling conversation on the client side. The
/// transcript only ever lives here in memory, ending a session cannot be
/// undone.
pub struct ConversationController {
    state: ConversationState,
    session: Option<Session>,
    transcript: Vec<ChatTurn>,
    client: ClientBox,
    confirm: ConfirmBox,
}

impl ConversationController {
    pub fn new(client: ClientBox, confirm: ConfirmBox) -> ConversationController {
        return ConversationController {
            state: ConversationState::Unauthenticated,
            session: None,
            transcript: vec![],
            client,
            confirm,
        };
    }

    pub fn state(&self) -> ConversationState {
        return self.state;
    }

    pub fn session_id(&self) -> Option<&str> {
        return self.session.as_ref().map(|session| return session.id.as_str());
    }

    pub fn transcript(&self) -> &[ChatTurn] {
        return &self.transcript;
    }

    pub async fn login(&mut self, password: &str) -> LoginOutcome {
        if self.state != ConversationState::Unauthenticated {
            // Already logged in, nothing to do.
            return LoginOutcome::Granted;
        }

        match self.client.authenticate(password).await {
            Ok(res) => {
                if res.success {
                    if let Some(session_id) = res.session_id {
                        self.session = Some(Session { id: session_id });
                        self.transcript = vec![ChatTurn::counselor(WELCOME_MESSAGE)];
                        self.state = ConversationState::Idle;
                        return LoginOutcome::Granted;
                    }
                }

                let message = res
                    .message
                    .unwrap_or_else(|| return AUTH_DENIED_MESSAGE.to_string());
                return LoginOutcome::Denied(message);
            }
            Err(err) => {
                tracing::error!(error = %err, "authentication request failed");
                return LoginOutcome::Denied(NETWORK_ERROR_MESSAGE.to_string());
            }
        }
    }

    /// Dispatches one user message. Returns false when nothing was sent, on
    /// blank input or when no send is currently allowed. Every dispatched
    /// message produces a counselor turn, a fixed apology when the server
    /// cannot be reached.
    pub async fn send_message(&mut self, text: &str) -> bool {
        if self.state != ConversationState::Idle {
            return false;
        }
        if text.trim().is_empty() {
            return false;
        }

        // The history snapshot is taken before the new turn is appended, the
        // server receives the message itself separately.
        let history = self.transcript.clone();
        self.transcript.push(ChatTurn::user(text));
        self.state = ConversationState::AwaitingReply;

        match self.client.request_reply(text, &history).await {
            Ok(reply) => {
                self.transcript.push(ChatTurn::counselor(&reply));
            }
            Err(err) => {
                tracing::error!(error = %err, "chat request failed");
                self.transcript.push(ChatTurn::counselor(FALLBACK_MESSAGE));
            }
        }

        self.state = ConversationState::Idle;
        return true;
    }

    /// Discards the transcript and greets the user under a fresh local
    /// session id. Asks for confirmation first, declining leaves everything
    /// untouched.
    pub fn start_new_session(&mut self) -> bool {
        if self.state != ConversationState::Idle {
            return false;
        }
        if !self.confirm.confirm(NEW_SESSION_CONFIRM) {
            return false;
        }

        self.session = Some(Session::generate());
        self.transcript = vec![ChatTurn::counselor(NEW_SESSION_MESSAGE)];
        return true;
    }

    /// Wipes the conversation and drops back to the login gate. Asks for
    /// confirmation first.
    pub fn end_session(&mut self) -> bool {
        if self.state == ConversationState::Unauthenticated {
            return false;
        }
        if !self.confirm.confirm(END_SESSION_CONFIRM) {
            return false;
        }

        self.transcript.clear();
        self.session = None;
        self.state = ConversationState::Unauthenticated;
        return true;
    }
}
