use crate::extractors::{classify, UNTITLED};
use crate::model::ExtractedRecipe;
use serde::Deserialize;
use std::error::Error;

/// The system prompt used for structured recipe extraction.
///
/// Loaded from `prompt.txt` at compile time so it can be edited without
/// dealing with Rust string syntax.
pub const EXTRACTION_PROMPT: &str = include_str!("prompt.txt");

/// Longest input (in characters) forwarded to a provider.
pub const MAX_INPUT_CHARS: usize = 8000;

/// Build the user message for `text`, truncated to [`MAX_INPUT_CHARS`].
pub fn build_user_message(text: &str) -> String {
    let truncated: String = text.chars().take(MAX_INPUT_CHARS).collect();
    format!("Extract the recipe from the following post:\n\n{}", truncated)
}

#[derive(Debug, Deserialize)]
struct ReplyRecipe {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    ingredients: Vec<String>,
    #[serde(default)]
    steps: Vec<String>,
    #[serde(default)]
    cuisine: Option<String>,
}

/// Parse a provider reply into a recipe.
///
/// Tolerates code fences or prose around the JSON object. Blank entries are
/// dropped and the cuisine string goes through the keyword classifier. The
/// image is left empty for the caller to fill.
pub fn parse_reply(content: &str) -> Result<ExtractedRecipe, Box<dyn Error + Send + Sync>> {
    let start = content.find('{').ok_or("No JSON object in provider reply")?;
    let end = content.rfind('}').ok_or("No JSON object in provider reply")?;
    if end < start {
        return Err("Malformed JSON object in provider reply".into());
    }

    let reply: ReplyRecipe = serde_json::from_str(&content[start..=end])?;

    let clean = |items: Vec<String>| -> Vec<String> {
        items
            .into_iter()
            .map(|item| item.trim().to_string())
            .filter(|item| !item.is_empty())
            .collect()
    };

    Ok(ExtractedRecipe {
        title: reply
            .title
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| UNTITLED.to_string()),
        image: String::new(),
        ingredients: clean(reply.ingredients),
        steps: clean(reply.steps),
        cuisine: classify(reply.cuisine.as_deref().unwrap_or_default()),
    })
}
