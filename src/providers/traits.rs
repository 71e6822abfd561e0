use anyhow::Result;
use async_trait::async_trait;

/// Seam for the generative text collaborator. The server only ever needs
/// prompt-in, free-text-out.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String>;

    fn model_name(&self) -> &str;
}
