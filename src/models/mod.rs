//! Data models for `FitDash`
//!
//! Wire shapes of the backend API, organized by concern:
//! - Contact: outgoing contact messages and their receipts
//! - Program: training programs listed on the site
//! - Weather: weather snapshot with an exercise recommendation
//! - Nutrition: recipes for a meal category

pub mod contact;
pub mod nutrition;
pub mod program;
pub mod weather;

// Re-export all public types for convenient access
pub use contact::{ContactMessage, ContactReceipt, is_valid_email};
pub use nutrition::{NutritionResult, NutritionSummary, Recipe, category_emoji};
pub use program::Program;
pub use weather::{TemperatureBand, WeatherReport, WeatherSnapshot};
