use std::time::Duration;

use log::{debug, warn};

use crate::config::{CaptureConfig, ProviderConfig};
use crate::error::CaptureError;
use crate::model::ExtractedRecipe;
use crate::pipelines;
use crate::providers::{self, ProviderFactory};

/// Optional LLM provider configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LlmProvider {
    OpenAI,
    Anthropic,
}

impl LlmProvider {
    /// Convert to provider name string used by the factory
    pub fn as_str(&self) -> &'static str {
        match self {
            LlmProvider::OpenAI => "openai",
            LlmProvider::Anthropic => "anthropic",
        }
    }
}

/// Builder for configuring and executing a recipe capture
#[derive(Debug, Default)]
pub struct RecipeCaptureBuilder {
    text: Option<String>,
    url: Option<String>,
    image: Option<String>,
    provider: Option<LlmProvider>,
    api_key: Option<String>,
    model: Option<String>,
    timeout: Option<Duration>,
    config: Option<CaptureConfig>,
    local_only: bool,
}

impl RecipeCaptureBuilder {
    /// Set the recipe text (a pasted post, or the caption of a video link)
    ///
    /// # Example
    /// ```
    /// use recipe_capture::RecipeCapture;
    ///
    /// let builder = RecipeCapture::builder()
    ///     .text("【材料】牛肉，豆腐\n做法：\n1. 切牛肉\n2. 炒豆腐");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Set the source URL
    ///
    /// Web pages are fetched and their text extracted. Video links are not
    /// fetched; combine with [`text`](Self::text) to supply the caption.
    ///
    /// # Example
    /// ```
    /// use recipe_capture::RecipeCapture;
    ///
    /// let builder = RecipeCapture::builder()
    ///     .url("https://example.com/recipe");
    /// ```
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Set the image URL stored with the recipe
    pub fn image(mut self, image_url: impl Into<String>) -> Self {
        self.image = Some(image_url.into());
        self
    }

    /// Race local extraction against this LLM provider
    ///
    /// # Example
    /// ```
    /// use recipe_capture::{RecipeCapture, LlmProvider};
    ///
    /// let builder = RecipeCapture::builder()
    ///     .text("...")
    ///     .provider(LlmProvider::Anthropic);
    /// ```
    pub fn provider(mut self, provider: LlmProvider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the LLM provider
    ///
    /// Without an explicit [`provider`](Self::provider) the key applies to
    /// the configured default provider.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    ///
    /// # Example
    /// ```
    /// use recipe_capture::{RecipeCapture, LlmProvider};
    ///
    /// let builder = RecipeCapture::builder()
    ///     .text("...")
    ///     .provider(LlmProvider::OpenAI)
    ///     .model("gpt-4o");
    /// ```
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set a timeout for page fetches and provider calls
    ///
    /// # Example
    /// ```
    /// use recipe_capture::RecipeCapture;
    /// use std::time::Duration;
    ///
    /// let builder = RecipeCapture::builder()
    ///     .url("https://example.com/recipe")
    ///     .timeout(Duration::from_secs(10));
    /// ```
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Use this configuration instead of loading `recipe-capture.toml` and
    /// the environment
    pub fn config(mut self, config: CaptureConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Never consult an LLM provider
    pub fn local_only(mut self) -> Self {
        self.local_only = true;
        self
    }

    /// Build and execute the capture
    ///
    /// # Errors
    /// Returns `CaptureError` if:
    /// - No text or URL was specified
    /// - The text is blank and no URL was given
    /// - The configuration file or environment is invalid
    /// - An explicitly requested provider cannot be set up
    /// - The page fetch fails
    ///
    /// Failed or slow provider calls never surface here; the local result is
    /// used.
    ///
    /// # Example
    /// ```no_run
    /// # use recipe_capture::RecipeCapture;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipe = RecipeCapture::builder()
    ///     .url("https://example.com/recipe")
    ///     .build()
    ///     .await?;
    /// println!("{}", recipe.title);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn build(mut self) -> Result<ExtractedRecipe, CaptureError> {
        let config = match self.config.take() {
            Some(config) => config,
            None => CaptureConfig::load()?,
        };

        let extractor = config.extractor();
        let timeout = self
            .timeout
            .unwrap_or(Duration::from_secs(config.timeout));
        let provider = self.resolve_provider(&config)?;

        match (self.url.as_deref(), self.text.as_deref()) {
            (Some(url), text) => {
                pipelines::url::process(
                    &extractor,
                    url,
                    text,
                    self.image.as_deref(),
                    provider.as_deref(),
                    timeout,
                )
                .await
            }
            (None, Some(text)) => {
                if text.trim().is_empty() {
                    return Err(CaptureError::BuilderError(
                        "Recipe text cannot be empty".to_string(),
                    ));
                }
                Ok(pipelines::text::process(
                    &extractor,
                    text,
                    self.image.as_deref(),
                    None,
                    provider.as_deref(),
                    timeout,
                )
                .await)
            }
            (None, None) => Err(CaptureError::BuilderError(
                "No input source specified. Use .text() or .url()".to_string(),
            )),
        }
    }

    /// The provider to race against, if any.
    ///
    /// A provider requested through [`provider`](Self::provider),
    /// [`api_key`](Self::api_key) or [`model`](Self::model) must be
    /// constructible. Configured providers that cannot be set up are skipped
    /// with a warning.
    fn resolve_provider(
        &self,
        config: &CaptureConfig,
    ) -> Result<Option<Box<dyn providers::LlmProvider>>, CaptureError> {
        if self.local_only {
            return Ok(None);
        }

        let explicit = self.provider.map(|p| p.as_str().to_string()).or_else(|| {
            (self.api_key.is_some() || self.model.is_some())
                .then(|| config.default_provider.clone())
        });

        if let Some(name) = explicit {
            let mut provider_config = config
                .providers
                .get(&name)
                .cloned()
                .unwrap_or_else(|| ProviderConfig::for_provider(&name));
            provider_config.enabled = true;
            if let Some(key) = &self.api_key {
                provider_config.api_key = Some(key.clone());
            }
            if let Some(model) = &self.model {
                provider_config.model = model.clone();
            }

            return ProviderFactory::create(&name, &provider_config)
                .map(Some)
                .map_err(|e| CaptureError::ProviderError(e.to_string()));
        }

        match ProviderFactory::from_config(config) {
            Ok(Some(provider)) => Ok(Some(provider)),
            Ok(None) => {
                debug!("No LLM provider configured, using local extraction only");
                Ok(None)
            }
            Err(e) => {
                warn!("LLM provider unavailable, using local extraction only: {}", e);
                Ok(None)
            }
        }
    }
}

/// Main entry point for the builder API
pub struct RecipeCapture;

impl RecipeCapture {
    /// Creates a new builder for capturing recipes
    ///
    /// # Example
    /// ```
    /// use recipe_capture::RecipeCapture;
    ///
    /// let builder = RecipeCapture::builder();
    /// ```
    pub fn builder() -> RecipeCaptureBuilder {
        RecipeCaptureBuilder::default()
    }
}
