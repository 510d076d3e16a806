pub mod types;
pub mod classifier;

pub use types::*;
pub use classifier::{extract_task_title, IntentClassifier};
