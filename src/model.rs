use serde::{Deserialize, Serialize};
use std::fmt;

/// Image used when neither the caller nor the source supplies one.
pub const DEFAULT_IMAGE: &str = "https://images.unsplash.com/photo-1556910103-1c02745aae4d?w=800";

/// Cuisine label attached to a recipe.
///
/// `All` is a filter sentinel for list views; the classifier never produces it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Cuisine {
    Chinese,
    #[default]
    Western,
    Italian,
    Japanese,
    Korean,
    All,
}

impl Cuisine {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cuisine::Chinese => "Chinese",
            Cuisine::Western => "Western",
            Cuisine::Italian => "Italian",
            Cuisine::Japanese => "Japanese",
            Cuisine::Korean => "Korean",
            Cuisine::All => "All",
        }
    }
}

impl fmt::Display for Cuisine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Result of running a recipe source through extraction.
///
/// Produced fresh per call; `ingredients` and `steps` are never empty once
/// placeholders have been substituted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedRecipe {
    pub title: String,
    pub image: String,
    pub ingredients: Vec<String>,
    pub steps: Vec<String>,
    pub cuisine: Cuisine,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cuisine_serializes_as_label() {
        let json = serde_json::to_string(&Cuisine::Japanese).unwrap();
        assert_eq!(json, "\"Japanese\"");
        assert_eq!(Cuisine::default(), Cuisine::Western);
        assert_eq!(Cuisine::Korean.to_string(), "Korean");
    }

    #[test]
    fn test_extracted_recipe_json_shape() {
        let recipe = ExtractedRecipe {
            title: "酸汤肥牛".to_string(),
            image: DEFAULT_IMAGE.to_string(),
            ingredients: vec!["肥牛".to_string()],
            steps: vec!["煮开后下肥牛".to_string()],
            cuisine: Cuisine::Chinese,
        };

        let value = serde_json::to_value(&recipe).unwrap();
        assert_eq!(value["cuisine"], "Chinese");
        assert_eq!(value["ingredients"][0], "肥牛");
    }
}
