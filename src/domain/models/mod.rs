mod api;
mod author;
mod backend;
mod client;
mod confirm;
mod session;
mod slash_commands;
mod turn;

pub use api::*;
pub use author::*;
pub use backend::*;
pub use client::*;
pub use confirm::*;
pub use session::*;
pub use slash_commands::*;
pub use turn::*;
