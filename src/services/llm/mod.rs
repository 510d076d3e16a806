pub mod client;
pub mod prompt;

pub use client::{GenerativeBackend, LLMService};
