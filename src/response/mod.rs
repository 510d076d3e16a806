pub mod types;
pub mod synthesizer;

pub use types::*;
pub use synthesizer::{chart_for, ResponseSynthesizer};
