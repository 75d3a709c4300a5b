//! Weather + recipes dashboard
//!
//! A refresh fetches the weather for a city and the recipes for a meal
//! category concurrently, then renders the weather panel, the nutrition
//! panel and the recipe grid. How a failed fetch affects the other panels
//! is governed by [`JoinPolicy`].

use std::sync::Arc;
use std::time::Instant;

use futures::future;
use tracing::{error, info, instrument, warn};

use crate::Result;
use crate::api::FitnessApi;
use crate::config::{DashboardConfig, JoinPolicy};
use crate::control::TriggerControl;
use crate::models::{NutritionResult, WeatherReport};
use crate::notification::Notifier;
use crate::view::{
    DashboardView, RecipeGridView, connection_error_panel, render_error_states, render_nutrition,
    render_recipes, render_weather,
};

const FAILURE_MESSAGE: &str = "Error loading the dashboard. Try again.";

/// City and category after fallbacks are applied
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardQuery {
    pub city: String,
    pub category: String,
}

impl DashboardQuery {
    /// Blank city or category input resolves to the configured fallback
    #[must_use]
    pub fn resolve(city: &str, category: &str, config: &DashboardConfig) -> Self {
        let city = city.trim();
        let city = if city.is_empty() {
            config.default_city.clone()
        } else {
            city.to_string()
        };

        let category = if category.trim().is_empty() {
            config.default_category.clone()
        } else {
            category.to_string()
        };

        Self { city, category }
    }
}

/// Result of one refresh attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Both fetches succeeded
    Loaded,
    /// One fetch failed; only with [`JoinPolicy::Independent`]
    PartiallyLoaded,
    Failed,
    /// Ignored because a refresh was already running
    Skipped,
}

pub struct Dashboard<A> {
    api: Arc<A>,
    notifier: Notifier,
    config: DashboardConfig,
    trigger: TriggerControl,
    view: DashboardView,
}

impl<A: FitnessApi> Dashboard<A> {
    pub fn new(api: Arc<A>, notifier: Notifier, config: DashboardConfig) -> Self {
        Self {
            api,
            notifier,
            config,
            trigger: TriggerControl::new("🔄 Refresh", "🔄 Loading..."),
            view: DashboardView::default(),
        }
    }

    /// The refresh button
    #[must_use]
    pub fn trigger(&self) -> &TriggerControl {
        &self.trigger
    }

    #[must_use]
    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    /// Fetch both resources and re-render every panel.
    ///
    /// Emits exactly one notification unless the refresh is skipped.
    #[instrument(skip(self))]
    pub async fn refresh(&mut self, city: &str, category: &str) -> RefreshOutcome {
        let Some(_guard) = self.trigger.engage() else {
            warn!("Dashboard refresh already in progress, ignoring trigger");
            return RefreshOutcome::Skipped;
        };

        let query = DashboardQuery::resolve(city, category, &self.config);
        info!(city = %query.city, category = %query.category, "Refreshing dashboard");
        let start = Instant::now();

        let outcome = match self.config.join_policy {
            JoinPolicy::AllOrNothing => self.refresh_all_or_nothing(&query).await,
            JoinPolicy::Independent => self.refresh_independent(&query).await,
        };

        info!(
            ?outcome,
            "Dashboard refresh finished in {:.3}s",
            start.elapsed().as_secs_f64()
        );
        outcome
    }

    async fn refresh_all_or_nothing(&mut self, query: &DashboardQuery) -> RefreshOutcome {
        let weather = self.api.weather(&query.city);
        let nutrition = self.api.nutrition(&query.category);

        // First failure drops the other in-flight request
        let joined = future::try_join(weather, nutrition).await;
        match joined {
            Ok((weather, nutrition)) => {
                self.view = self.render(&weather, &nutrition);
                self.notifier.success(success_message(query));
                RefreshOutcome::Loaded
            }
            Err(err) => {
                error!("Dashboard refresh failed: {}", err);
                self.view = render_error_states();
                self.notifier.error(FAILURE_MESSAGE);
                RefreshOutcome::Failed
            }
        }
    }

    async fn refresh_independent(&mut self, query: &DashboardQuery) -> RefreshOutcome {
        let weather = self.api.weather(&query.city);
        let nutrition = self.api.nutrition(&query.category);

        let (weather, nutrition) = future::join(weather, nutrition).await;
        self.view = self.render_settled(&weather, &nutrition);

        match (&weather, &nutrition) {
            (Ok(_), Ok(_)) => {
                self.notifier.success(success_message(query));
                RefreshOutcome::Loaded
            }
            (Err(err), Ok(_)) => {
                warn!("Weather fetch failed: {}", err);
                self.notifier
                    .error(format!("Could not load the weather for {}", query.city));
                RefreshOutcome::PartiallyLoaded
            }
            (Ok(_), Err(err)) => {
                warn!("Nutrition fetch failed: {}", err);
                self.notifier
                    .error(format!("Could not load {} recipes", query.category));
                RefreshOutcome::PartiallyLoaded
            }
            (Err(weather_err), Err(nutrition_err)) => {
                error!(
                    "Dashboard refresh failed: weather: {}; nutrition: {}",
                    weather_err, nutrition_err
                );
                self.notifier.error(FAILURE_MESSAGE);
                RefreshOutcome::Failed
            }
        }
    }

    fn render(&self, weather: &WeatherReport, nutrition: &NutritionResult) -> DashboardView {
        DashboardView {
            weather: render_weather(weather),
            nutrition: render_nutrition(nutrition),
            recipes: render_recipes(nutrition.recipes(), &self.config.placeholder_image),
        }
    }

    fn render_settled(
        &self,
        weather: &Result<WeatherReport>,
        nutrition: &Result<NutritionResult>,
    ) -> DashboardView {
        let weather = match weather {
            Ok(report) => render_weather(report),
            Err(_) => connection_error_panel(),
        };
        let (nutrition, recipes) = match nutrition {
            Ok(result) => (
                render_nutrition(result),
                render_recipes(result.recipes(), &self.config.placeholder_image),
            ),
            Err(_) => (connection_error_panel(), RecipeGridView::Error),
        };

        DashboardView {
            weather,
            nutrition,
            recipes,
        }
    }
}

fn success_message(query: &DashboardQuery) -> String {
    format!(
        "Dashboard updated for {} with {} recipes!",
        query.city, query.category
    )
}
