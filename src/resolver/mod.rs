//! Query resolution: a local rule-based resolver that always answers, an
//! optional generative one, and the chain that picks between them.

pub mod chain;
pub mod generative;
pub mod local;

use async_trait::async_trait;

use crate::error::ResolveError;
use crate::intent::Query;
use crate::response::ResponseResult;
use crate::tasks::Task;

pub use chain::ResolverChain;
pub use generative::GenerativeResolver;
pub use local::LocalResolver;

#[async_trait]
pub trait QueryResolver: Send + Sync {
    async fn resolve(&self, query: &Query, tasks: &[Task]) -> Result<ResponseResult, ResolveError>;
}
