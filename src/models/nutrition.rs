//! Recipe and nutrition lookup models

use serde::{Deserialize, Deserializer, Serialize};

/// Response of the nutrition endpoint
///
/// Error bodies also carry `categoria` and an empty `recetas`, so the
/// `error` variant has to be tried first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NutritionResult {
    Unavailable { error: String },
    Summary(NutritionSummary),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NutritionSummary {
    #[serde(rename = "categoria")]
    pub category: String,
    #[serde(rename = "total_recetas")]
    pub total_recipes: u32,
    #[serde(rename = "recetas", default)]
    pub recipes: Vec<Recipe>,
    /// Free-form note from the server, e.g. when nothing matched
    #[serde(rename = "mensaje", default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "imagen", default)]
    pub image_url: String,
    #[serde(
        rename = "tags_fitness",
        default,
        deserialize_with = "deserialize_fitness_tags"
    )]
    pub fitness_tags: String,
}

impl NutritionResult {
    /// Recipes to show in the grid; empty for error bodies
    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        match self {
            NutritionResult::Summary(summary) => &summary.recipes,
            NutritionResult::Unavailable { .. } => &[],
        }
    }
}

/// Display emoji for the well-known meal categories
#[must_use]
pub fn category_emoji(category: &str) -> &'static str {
    match category {
        "Chicken" => "🐔",
        "Beef" => "🥩",
        "Seafood" => "🦐",
        "Vegetarian" => "🥬",
        "Dessert" => "🍓",
        _ => "🍽️",
    }
}

/// Tags arrive either as one display string or as a list of tags.
fn deserialize_fitness_tags<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Tags {
        Text(String),
        List(Vec<String>),
        Missing(()),
    }

    Ok(match Tags::deserialize(deserializer)? {
        Tags::Text(text) => text,
        Tags::List(tags) => tags.join(", "),
        Tags::Missing(()) => String::new(),
    })
}
