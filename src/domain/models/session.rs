#[cfg(test)]
#[path = "session_test.rs"]
mod tests;

use rand::Rng;

const ID_CHARSET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789";
const ID_LENGTH: usize = 9;

/// An opaque chat session handle. The identifier is never persisted and never
/// checked again after login, it only marks one anonymous conversation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Session {
    pub id: String,
}

impl Session {
    pub fn generate() -> Session {
        let mut rng = rand::thread_rng();
        let suffix = (0..ID_LENGTH)
            .map(|_| {
                let idx = rng.gen_range(0..ID_CHARSET.len());
                return ID_CHARSET[idx] as char;
            })
            .collect::<String>();

        return Session {
            id: format!("session_{suffix}"),
        };
    }
}
