//! View state produced by the render functions
//!
//! These types describe what a region of the page shows. They carry no
//! behavior beyond [`fmt::Display`] for terminal output.

use std::fmt;

use crate::models::{
    NutritionResult, Program, Recipe, TemperatureBand, WeatherReport, category_emoji,
};

/// Color hint for a value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Hot,
    Warm,
    Cool,
    Neutral,
}

impl From<TemperatureBand> for Tone {
    fn from(band: TemperatureBand) -> Self {
        match band {
            TemperatureBand::Hot => Tone::Hot,
            TemperatureBand::Warm => Tone::Warm,
            TemperatureBand::Cool => Tone::Cool,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

impl Row {
    fn new(label: &str, value: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            value: value.into(),
            tone: Tone::Neutral,
        }
    }

    fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

/// Weather or nutrition panel
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelView {
    /// Nothing loaded yet
    Placeholder,
    Rows { title: String, rows: Vec<Row> },
    Error { title: String, detail: String },
}

impl PanelView {
    #[must_use]
    pub fn is_error(&self) -> bool {
        matches!(self, PanelView::Error { .. })
    }

    /// Value of the row labelled `label`, if any
    #[must_use]
    pub fn value(&self, label: &str) -> Option<&str> {
        match self {
            PanelView::Rows { rows, .. } => rows
                .iter()
                .find(|row| row.label == label)
                .map(|row| row.value.as_str()),
            _ => None,
        }
    }
}

/// Image with a render-time fallback
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    pub src: String,
    pub fallback: String,
}

impl ImageSource {
    /// Source to display; `load_failed` reports the image URL failing to load
    #[must_use]
    pub fn resolve(&self, load_failed: bool) -> &str {
        if load_failed || self.src.trim().is_empty() {
            &self.fallback
        } else {
            &self.src
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecipeCard {
    pub name: String,
    pub image: ImageSource,
    pub fitness_tags: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecipeGridView {
    Placeholder,
    Empty,
    Cards(Vec<RecipeCard>),
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramCard {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardView {
    pub weather: PanelView,
    pub nutrition: PanelView,
    pub recipes: RecipeGridView,
}

impl Default for DashboardView {
    fn default() -> Self {
        Self {
            weather: PanelView::Placeholder,
            nutrition: PanelView::Placeholder,
            recipes: RecipeGridView::Placeholder,
        }
    }
}

const CONNECTION_ERROR_TITLE: &str = "Connection error";
const CONNECTION_ERROR_DETAIL: &str = "The data could not be loaded";

#[must_use]
pub fn render_weather(report: &WeatherReport) -> PanelView {
    let weather = match report {
        WeatherReport::Unavailable { error } => {
            return PanelView::Error {
                title: "Weather error".to_string(),
                detail: error.clone(),
            };
        }
        WeatherReport::Snapshot(weather) => weather,
    };

    let mut rows = vec![
        Row::new("City", weather.city.clone()),
        Row::new("Temperature", weather.format_temperature())
            .with_tone(weather.temperature_band().into()),
    ];
    if let Some(feels_like) = weather.feels_like_c {
        rows.push(Row::new("Feels like", format!("{feels_like}°C")));
    }
    rows.extend([
        Row::new("Humidity", weather.format_humidity()),
        Row::new("Wind", weather.format_wind()),
        Row::new("Conditions", weather.description.clone()),
        Row::new("Recommendation", weather.exercise_recommendation.clone()),
    ]);

    PanelView::Rows {
        title: "Weather".to_string(),
        rows,
    }
}

#[must_use]
pub fn render_nutrition(result: &NutritionResult) -> PanelView {
    let summary = match result {
        NutritionResult::Unavailable { error } => {
            return PanelView::Error {
                title: "Recipes error".to_string(),
                detail: error.clone(),
            };
        }
        NutritionResult::Summary(summary) => summary,
    };

    let mut rows = vec![
        Row::new(
            "Category",
            format!("{} {}", category_emoji(&summary.category), summary.category),
        ),
        Row::new("Recipes found", format!("{} recipes", summary.total_recipes)),
        Row::new("Fitness benefits", "High in protein, low in carbohydrates"),
    ];
    if let Some(message) = &summary.message {
        rows.push(Row::new("Note", message.clone()));
    }

    PanelView::Rows {
        title: "Nutrition".to_string(),
        rows,
    }
}

#[must_use]
pub fn render_recipes(recipes: &[Recipe], placeholder_image: &str) -> RecipeGridView {
    if recipes.is_empty() {
        return RecipeGridView::Empty;
    }

    RecipeGridView::Cards(
        recipes
            .iter()
            .map(|recipe| RecipeCard {
                name: recipe.name.clone(),
                image: ImageSource {
                    src: recipe.image_url.clone(),
                    fallback: placeholder_image.to_string(),
                },
                fitness_tags: recipe.fitness_tags.clone(),
            })
            .collect(),
    )
}

/// Program cards, or `None` when there is nothing to replace the section with
#[must_use]
pub fn render_programs(programs: &[Program]) -> Option<Vec<ProgramCard>> {
    if programs.is_empty() {
        return None;
    }
    Some(
        programs
            .iter()
            .map(|program| ProgramCard {
                title: program.name.clone(),
                description: program.description.clone(),
            })
            .collect(),
    )
}

/// Connection error in the panel of a fetch that failed outright
#[must_use]
pub fn connection_error_panel() -> PanelView {
    PanelView::Error {
        title: CONNECTION_ERROR_TITLE.to_string(),
        detail: CONNECTION_ERROR_DETAIL.to_string(),
    }
}

/// Every region in its error state
#[must_use]
pub fn render_error_states() -> DashboardView {
    DashboardView {
        weather: connection_error_panel(),
        nutrition: connection_error_panel(),
        recipes: RecipeGridView::Error,
    }
}

impl fmt::Display for Tone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self {
            Tone::Hot => "🔴",
            Tone::Warm => "🟡",
            Tone::Cool => "🔵",
            Tone::Neutral => "",
        };
        f.write_str(marker)
    }
}

impl fmt::Display for PanelView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PanelView::Placeholder => writeln!(f, "   …"),
            PanelView::Rows { title, rows } => {
                writeln!(f, "{title}")?;
                for row in rows {
                    if row.tone == Tone::Neutral {
                        writeln!(f, "   {}: {}", row.label, row.value)?;
                    } else {
                        writeln!(f, "   {}: {} {}", row.label, row.value, row.tone)?;
                    }
                }
                Ok(())
            }
            PanelView::Error { title, detail } => {
                writeln!(f, "⚠️ {title}")?;
                writeln!(f, "   {detail}")
            }
        }
    }
}

impl fmt::Display for RecipeGridView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecipeGridView::Placeholder => writeln!(f, "   …"),
            RecipeGridView::Empty => writeln!(f, "🍴 No recipes available"),
            RecipeGridView::Error => writeln!(f, "😔 Error loading recipes"),
            RecipeGridView::Cards(cards) => {
                for card in cards {
                    writeln!(f, "💪 {}", card.name)?;
                    if !card.fitness_tags.is_empty() {
                        writeln!(f, "   {}", card.fitness_tags)?;
                    }
                    writeln!(f, "   🖼️ {}", card.image.resolve(false))?;
                }
                Ok(())
            }
        }
    }
}

impl fmt::Display for ProgramCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;
        writeln!(f, "   {}", self.description)
    }
}

impl fmt::Display for DashboardView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.weather)?;
        writeln!(f)?;
        write!(f, "{}", self.nutrition)?;
        writeln!(f)?;
        write!(f, "{}", self.recipes)
    }
}
