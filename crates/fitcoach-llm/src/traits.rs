use anyhow::Result;
use async_trait::async_trait;

/// Trait for the external coaching LLM.
///
/// The model is an opaque collaborator: prompt string in, completion text
/// out. No streaming, no tool use.
#[async_trait]
pub trait CoachClient: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;
}
