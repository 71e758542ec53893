use crate::extractors::RecipeTextExtractor;
use crate::model::ExtractedRecipe;
use crate::providers::LlmProvider;
use log::{debug, info, warn};
use std::time::Duration;

/// Extract a recipe from pasted text.
///
/// The local result is computed first and is always available. When a
/// provider is given its reply is awaited for at most `timeout`, and it
/// replaces the local result only if it has strictly more ingredients and
/// strictly more steps. Provider errors and timeouts fall back to the local
/// result.
pub async fn process(
    extractor: &RecipeTextExtractor,
    text: &str,
    image_url: Option<&str>,
    source_url: Option<&str>,
    provider: Option<&dyn LlmProvider>,
    timeout: Duration,
) -> ExtractedRecipe {
    let local = extractor.extract(text, image_url, source_url);

    let Some(provider) = provider else {
        return local;
    };

    let candidate = match tokio::time::timeout(timeout, provider.extract(text)).await {
        Ok(Ok(candidate)) => candidate,
        Ok(Err(e)) => {
            warn!("{} extraction failed: {}", provider.provider_name(), e);
            return local;
        }
        Err(_) => {
            warn!(
                "{} extraction timed out after {:?}",
                provider.provider_name(),
                timeout
            );
            return local;
        }
    };

    let (local_ingredients, local_steps) = extractor.richness(&local);
    let (ingredients, steps) = extractor.richness(&candidate);
    debug!(
        "Local result {}/{}, {} result {}/{}",
        local_ingredients,
        local_steps,
        provider.provider_name(),
        ingredients,
        steps
    );

    if ingredients > local_ingredients && steps > local_steps {
        info!("Using {} extraction result", provider.provider_name());
        ExtractedRecipe {
            image: local.image,
            ..candidate
        }
    } else {
        local
    }
}
