//! Heuristic recipe-text extraction.
//!
//! Takes an arbitrary block of free-form text (typically a recipe post) and
//! segments it into title, ingredients, steps and a cuisine label. Pure and
//! synchronous: no I/O and no shared state, so it can be called from any
//! number of threads at once.

pub mod cuisine;
pub mod ingredients;
pub mod keywords;
pub mod section;
pub mod steps;
pub mod title;

pub use self::cuisine::{classify, classify_with};
pub use self::ingredients::extract_ingredients;
pub use self::keywords::{CuisineKeywords, KeywordTables};
pub use self::steps::extract_steps;
pub use self::title::{extract_title, UNTITLED};

use crate::model::{Cuisine, ExtractedRecipe, DEFAULT_IMAGE};
use log::debug;
use serde::Deserialize;

/// Fallback strings substituted when extraction finds nothing usable.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Placeholders {
    pub title: String,
    pub ingredients: String,
    pub steps: String,
}

impl Default for Placeholders {
    fn default() -> Self {
        Self {
            title: "食谱".to_string(),
            ingredients: "请手动输入食材".to_string(),
            steps: "请手动输入步骤".to_string(),
        }
    }
}

impl Placeholders {
    pub fn english() -> Self {
        Self {
            title: "Recipe".to_string(),
            ingredients: "Enter ingredients manually".to_string(),
            steps: "Enter steps manually".to_string(),
        }
    }
}

/// The extraction engine: keyword tables plus the fallback values used to
/// keep every result complete.
#[derive(Debug, Clone)]
pub struct RecipeTextExtractor {
    keywords: KeywordTables,
    placeholders: Placeholders,
    default_image: String,
}

impl Default for RecipeTextExtractor {
    fn default() -> Self {
        Self::new(KeywordTables::default(), Placeholders::default())
    }
}

impl RecipeTextExtractor {
    pub fn new(keywords: KeywordTables, placeholders: Placeholders) -> Self {
        Self {
            keywords,
            placeholders,
            default_image: DEFAULT_IMAGE.to_string(),
        }
    }

    pub fn with_default_image(mut self, image: impl Into<String>) -> Self {
        self.default_image = image.into();
        self
    }

    pub fn keywords(&self) -> &KeywordTables {
        &self.keywords
    }

    pub fn placeholders(&self) -> &Placeholders {
        &self.placeholders
    }

    /// Extract a complete recipe from `text`.
    ///
    /// Never fails: empty title, ingredients or steps are replaced by
    /// placeholders. `image_url` is passed through (or the default image is
    /// used); `source_url` only feeds the title fallback.
    pub fn extract(
        &self,
        text: &str,
        image_url: Option<&str>,
        source_url: Option<&str>,
    ) -> ExtractedRecipe {
        let title = extract_title(text, source_url, &self.keywords);
        let ingredients = extract_ingredients(text, &self.keywords);
        let steps = extract_steps(text, &self.keywords);
        let cuisine = self.classify(text);

        debug!(
            "Extracted '{}' with {} ingredients, {} steps, cuisine {}",
            title,
            ingredients.len(),
            steps.len(),
            cuisine
        );

        ExtractedRecipe {
            title: non_empty_or(title.trim().to_string(), &self.placeholders.title),
            image: self.image_or_default(image_url),
            ingredients: list_or_placeholder(ingredients, &self.placeholders.ingredients),
            steps: list_or_placeholder(steps, &self.placeholders.steps),
            cuisine,
        }
    }

    pub fn classify(&self, text: &str) -> Cuisine {
        classify_with(text, &self.keywords.cuisines)
    }

    pub fn image_or_default(&self, image_url: Option<&str>) -> String {
        image_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .unwrap_or(self.default_image.as_str())
            .to_string()
    }

    /// Number of real (non-placeholder) ingredients and steps in `recipe`.
    pub fn richness(&self, recipe: &ExtractedRecipe) -> (usize, usize) {
        let count = |list: &[String], placeholder: &str| {
            list.iter()
                .filter(|entry| entry.as_str() != placeholder)
                .count()
        };
        (
            count(
                recipe.ingredients.as_slice(),
                self.placeholders.ingredients.as_str(),
            ),
            count(recipe.steps.as_slice(), self.placeholders.steps.as_str()),
        )
    }
}

fn non_empty_or(value: String, placeholder: &str) -> String {
    if value.is_empty() {
        placeholder.to_string()
    } else {
        value
    }
}

fn list_or_placeholder(list: Vec<String>, placeholder: &str) -> Vec<String> {
    if list.is_empty() {
        vec![placeholder.to_string()]
    } else {
        list
    }
}

/// Extract with the built-in keyword tables and Chinese placeholders.
pub fn extract(text: &str, image_url: Option<&str>, source_url: Option<&str>) -> ExtractedRecipe {
    RecipeTextExtractor::default().extract(text, image_url, source_url)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structured_post() {
        let recipe = extract("【材料】牛肉，豆腐\n做法：\n1. 切牛肉\n2. 炒豆腐", None, None);
        assert_eq!(recipe.ingredients, vec!["牛肉", "豆腐"]);
        assert_eq!(recipe.steps, vec!["切牛肉", "炒豆腐"]);
        assert_eq!(recipe.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_unstructured_text_gets_placeholders() {
        let recipe = extract("just some random text with no markers", None, None);
        let placeholders = Placeholders::default();
        assert_eq!(recipe.title, UNTITLED);
        assert_eq!(recipe.ingredients, vec![placeholders.ingredients]);
        assert_eq!(recipe.steps, vec![placeholders.steps]);
        assert_eq!(recipe.cuisine, Cuisine::Western);
    }

    #[test]
    fn test_image_passthrough() {
        let recipe = extract("", Some("https://cdn.example.com/a.jpg"), None);
        assert_eq!(recipe.image, "https://cdn.example.com/a.jpg");

        let recipe = extract("", Some("   "), None);
        assert_eq!(recipe.image, DEFAULT_IMAGE);
    }

    #[test]
    fn test_blank_url_title_uses_placeholder() {
        let recipe = extract("", None, Some("https://example.com/%20"));
        assert_eq!(recipe.title, UNTITLED);
    }

    #[test]
    fn test_english_placeholders() {
        let extractor = RecipeTextExtractor::new(KeywordTables::default(), Placeholders::english());
        let recipe = extractor.extract("nothing", None, None);
        assert_eq!(recipe.ingredients, vec!["Enter ingredients manually"]);
        assert_eq!(extractor.richness(&recipe), (0, 0));
    }

    #[test]
    fn test_richness_counts_real_entries() {
        let extractor = RecipeTextExtractor::default();
        let recipe = extractor.extract("【材料】牛肉，豆腐\n做法：\n1. 切牛肉片", None, None);
        assert_eq!(extractor.richness(&recipe), (2, 1));
    }

    #[test]
    fn test_custom_default_image() {
        let extractor = RecipeTextExtractor::default().with_default_image("https://img/x.png");
        assert_eq!(extractor.extract("", None, None).image, "https://img/x.png");
    }
}
