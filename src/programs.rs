//! Training program directory
//!
//! Loaded once when the page opens. Failures are logged only; the section
//! keeps whatever it showed before.

use std::sync::Arc;

use tracing::{error, info};

use crate::api::FitnessApi;
use crate::view::{ProgramCard, render_programs};

pub struct ProgramDirectory<A> {
    api: Arc<A>,
    cards: Option<Vec<ProgramCard>>,
}

impl<A: FitnessApi> ProgramDirectory<A> {
    pub fn new(api: Arc<A>) -> Self {
        Self { api, cards: None }
    }

    /// Rendered cards, `None` until a non-empty list has loaded
    #[must_use]
    pub fn cards(&self) -> Option<&[ProgramCard]> {
        self.cards.as_deref()
    }

    /// Fetch the program list and replace the cards if it is non-empty
    pub async fn load(&mut self) -> Option<&[ProgramCard]> {
        match self.api.list_programs().await {
            Ok(programs) => match render_programs(&programs) {
                Some(cards) => {
                    info!("Showing {} programs", cards.len());
                    self.cards = Some(cards);
                }
                None => info!("Program list is empty, keeping current section"),
            },
            Err(err) => error!("Error loading programs: {}", err),
        }
        self.cards()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        ContactMessage, ContactReceipt, NutritionResult, Program, WeatherReport,
    };
    use crate::{FitDashError, Result};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct QueuedPrograms(Mutex<Vec<Result<Vec<Program>>>>);

    #[async_trait]
    impl FitnessApi for QueuedPrograms {
        async fn submit_contact(&self, _message: &ContactMessage) -> Result<ContactReceipt> {
            unreachable!("not used by the program directory")
        }

        async fn list_programs(&self) -> Result<Vec<Program>> {
            self.0.lock().unwrap().remove(0)
        }

        async fn weather(&self, _city: &str) -> Result<WeatherReport> {
            unreachable!("not used by the program directory")
        }

        async fn nutrition(&self, _category: &str) -> Result<NutritionResult> {
            unreachable!("not used by the program directory")
        }
    }

    fn program(name: &str) -> Program {
        Program {
            id: None,
            name: name.into(),
            description: format!("{name} sessions"),
        }
    }

    #[tokio::test]
    async fn test_failures_and_empty_lists_keep_previous_cards() {
        let api = Arc::new(QueuedPrograms(Mutex::new(vec![
            Err(FitDashError::transport("refused")),
            Ok(vec![program("Yoga"), program("CrossFit")]),
            Ok(Vec::new()),
            Err(FitDashError::server(500, None)),
        ])));
        let mut directory = ProgramDirectory::new(api);

        assert!(directory.load().await.is_none());

        let cards = directory.load().await.expect("programs loaded");
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1].title, "CrossFit");

        assert_eq!(directory.load().await.map(<[ProgramCard]>::len), Some(2));
        assert_eq!(directory.load().await.map(<[ProgramCard]>::len), Some(2));
    }
}
