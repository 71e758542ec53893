mod anthropic;
mod factory;
mod fallback;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use fallback::FallbackProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_user_message, parse_reply, EXTRACTION_PROMPT, MAX_INPUT_CHARS};

use crate::model::ExtractedRecipe;
use async_trait::async_trait;
use std::error::Error;

/// An external extraction service (typically an LLM completion endpoint).
///
/// Providers return a candidate recipe in the same shape as the local
/// engine; the caller decides whether it replaces the local result.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Extract a recipe from raw post text
    async fn extract(&self, text: &str)
        -> Result<ExtractedRecipe, Box<dyn Error + Send + Sync>>;
}
