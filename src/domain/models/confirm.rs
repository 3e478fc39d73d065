/// Gate in front of destructive transcript actions. The terminal client backs
/// this with an interactive prompt, tests answer it directly.
pub trait ConfirmPrompt {
    fn confirm(&self, prompt: &str) -> bool;
}

pub type ConfirmBox = Box<dyn ConfirmPrompt + Send + Sync>;
