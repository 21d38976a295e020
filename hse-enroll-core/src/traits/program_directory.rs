//! Program directory abstract Trait

use async_trait::async_trait;

use crate::error::CoreResult;
use crate::types::Program;

#[async_trait]
pub trait ProgramDirectory: Send + Sync {
    /// Programs open for admission, in backend order
    async fn list_programs(&self) -> CoreResult<Vec<Program>>;
}
