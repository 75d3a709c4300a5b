//! `FitDash` - client for the fitness site API
//!
//! This library provides the contact form submitter, the program directory
//! and the weather + recipes dashboard, rendering every response into plain
//! view state.

pub mod api;
pub mod config;
pub mod control;
pub mod dashboard;
pub mod error;
pub mod form;
pub mod logging;
pub mod models;
pub mod notification;
pub mod programs;
pub mod view;

// Re-export core types for public API
pub use api::{FitnessApi, FitnessApiClient};
pub use config::{FitDashConfig, JoinPolicy};
pub use control::TriggerControl;
pub use dashboard::{Dashboard, DashboardQuery, RefreshOutcome};
pub use error::{ContactField, FitDashError};
pub use form::{ContactForm, ContactSubmitter};
pub use models::{ContactMessage, NutritionResult, Program, WeatherReport};
pub use notification::{Notification, NotificationKind, Notifier};
pub use programs::ProgramDirectory;
pub use view::DashboardView;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, FitDashError>;
