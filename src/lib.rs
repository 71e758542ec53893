//! Capture cooking recipes from unstructured sources.
//!
//! The core is a deterministic, heuristic text engine
//! ([`RecipeTextExtractor`]) that segments a free-form post into a title,
//! ingredients, steps and a cuisine label. Around it sit optional
//! collaborators: LLM providers raced against the local result, a page
//! fetcher for web URLs and video-link recognition.

pub mod builder;
pub mod config;
pub mod error;
pub mod extractors;
pub mod fetcher;
pub mod model;
pub mod pipelines;
pub mod providers;
pub mod video;

// Re-export builder API
pub use builder::{LlmProvider, RecipeCapture, RecipeCaptureBuilder};

pub use config::CaptureConfig;
pub use error::CaptureError;
pub use extractors::{extract, KeywordTables, Placeholders, RecipeTextExtractor};
pub use model::{Cuisine, ExtractedRecipe, DEFAULT_IMAGE};
pub use video::{VideoMetadata, VideoPlatform};

/// Capture a recipe from pasted text using the configured providers.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipe = recipe_capture::capture_text("【材料】牛肉，豆腐\n做法：\n1. 切牛肉\n2. 炒豆腐").await?;
/// assert_eq!(recipe.ingredients, vec!["牛肉", "豆腐"]);
/// # Ok(())
/// # }
/// ```
pub async fn capture_text(text: &str) -> Result<ExtractedRecipe, CaptureError> {
    RecipeCapture::builder().text(text).build().await
}

/// Capture a recipe from a web page or video link.
///
/// # Example
/// ```no_run
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let recipe = recipe_capture::capture_url("https://example.com/recipe").await?;
/// println!("{}", recipe.title);
/// # Ok(())
/// # }
/// ```
pub async fn capture_url(url: &str) -> Result<ExtractedRecipe, CaptureError> {
    RecipeCapture::builder().url(url).build().await
}
