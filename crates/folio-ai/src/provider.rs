use anyhow::Result;
use async_trait::async_trait;

use crate::session::ChatMessage;

/// Trait for chat model providers
#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Generate the next assistant reply for a running conversation.
    async fn reply(&self, system_instruction: &str, transcript: &[ChatMessage]) -> Result<String>;

    /// Get the model name being used
    fn model_name(&self) -> &str;
}
