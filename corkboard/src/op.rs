//! The command trait
//!
//! Commands are structs whose fields are the parameters; executing one runs
//! the whole operation — permission check, sequencing, transaction, activity
//! log, broadcast — against the context and returns the JSON payload handed
//! back to the caller.

use crate::context::BoardContext;
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Execute a command against a context.
#[async_trait]
pub trait Execute {
    async fn execute(&self, ctx: &BoardContext) -> Result<Value>;
}
