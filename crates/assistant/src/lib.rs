//! Access to the generative-language backend: plan generation and doctor chat.

mod chat;
mod client;
mod error;
mod plan;
pub mod prompt;
pub mod reply;

pub use chat::*;
pub use client::*;
pub use error::*;
pub use plan::*;
