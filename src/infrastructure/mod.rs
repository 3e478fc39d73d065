pub mod backends;
pub mod client;
