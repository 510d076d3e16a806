pub mod types;
pub mod mock;
pub mod search;
pub mod store;

pub use types::*;
pub use search::search;
pub use store::{FallbackTaskStore, MockTaskStore, TaskStore};
