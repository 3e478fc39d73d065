mod authenticator;
mod composer;
mod conversation;

pub use authenticator::*;
pub use composer::*;
pub use conversation::*;
