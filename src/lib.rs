pub mod analytics;
pub mod api;
pub mod config;
pub mod error;
pub mod history;
pub mod intent;
pub mod resolver;
pub mod response;
pub mod services;
pub mod tasks;

pub use config::AppConfig;
pub use intent::{Intent, IntentClassifier, Query};
pub use resolver::{QueryResolver, ResolverChain};
pub use response::{ResponseResult, ResponseSynthesizer};
pub use tasks::{Task, TaskStatus, TaskStore};
