#[cfg(test)]
#[path = "turn_test.rs"]
mod tests;

use chrono::Local;
use serde::Deserialize;
use serde::Serialize;

use super::Author;

/// A single transcript entry, serialized with the field names the chat
/// endpoint expects in `conversationHistory`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    pub message: String,
    pub is_user: bool,
    pub timestamp: String,
}

impl ChatTurn {
    pub fn user(message: &str) -> ChatTurn {
        return ChatTurn {
            message: message.to_string(),
            is_user: true,
            timestamp: display_time(),
        };
    }

    pub fn counselor(message: &str) -> ChatTurn {
        return ChatTurn {
            message: message.to_string(),
            is_user: false,
            timestamp: display_time(),
        };
    }

    pub fn author(&self) -> Author {
        if self.is_user {
            return Author::User;
        }

        return Author::Counselor;
    }
}

fn display_time() -> String {
    return Local::now().format("%H:%M:%S").to_string();
}
