#[cfg(test)]
#[path = "authenticator_test.rs"]
mod tests;

use chrono::SecondsFormat;
use chrono::Utc;

use crate::domain::models::Session;

pub const AUTH_GRANTED_MESSAGE: &str = "Authentication successful";
pub const AUTH_DENIED_MESSAGE: &str = "パスワードが間違っています";

pub enum AuthOutcome {
    Granted { session: Session, timestamp: String },
    Denied { message: String },
}

/// Checks login attempts against the shared access password. There are no
/// accounts, every visitor who knows the password is admitted anonymously.
pub struct Authenticator {
    password: String,
}

impl Authenticator {
    pub fn new(password: &str) -> Authenticator {
        return Authenticator {
            password: password.to_string(),
        };
    }

    pub fn authenticate(&self, candidate: &str) -> AuthOutcome {
        if self.password.is_empty() {
            tracing::error!("no access password is configured, denying all logins");
            return AuthOutcome::Denied {
                message: AUTH_DENIED_MESSAGE.to_string(),
            };
        }

        if candidate != self.password {
            return AuthOutcome::Denied {
                message: AUTH_DENIED_MESSAGE.to_string(),
            };
        }

        return AuthOutcome::Granted {
            session: Session::generate(),
            timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
        };
    }
}
