//! Matchmaking session tokens

pub mod token;

pub use token::{issue_token, TokenRequest};
