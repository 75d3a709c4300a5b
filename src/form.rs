//! Contact form submission
//!
//! Validates the form locally, sends a single POST and reports the outcome
//! through the [`Notifier`]. The submit control stays disabled while the
//! request is in flight.

use std::sync::Arc;

use tracing::{info, warn};

use crate::api::FitnessApi;
use crate::control::TriggerControl;
use crate::models::{ContactMessage, ContactReceipt};
use crate::notification::Notifier;
use crate::{FitDashError, Result};

const SUCCESS_MESSAGE: &str = "Message sent successfully! We will get in touch soon.";
const FALLBACK_ERROR: &str = "Error sending the message";

/// Input state of the contact form
#[derive(Debug)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub message: String,
    submit: TriggerControl,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            email: String::new(),
            message: String::new(),
            submit: TriggerControl::new("Send message", "Sending..."),
        }
    }
}

impl ContactForm {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// The submit button
    #[must_use]
    pub fn submit_control(&self) -> &TriggerControl {
        &self.submit
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_empty() && self.email.is_empty() && self.message.is_empty()
    }

    pub fn reset(&mut self) {
        self.name.clear();
        self.email.clear();
        self.message.clear();
    }

    fn to_message(&self) -> ContactMessage {
        ContactMessage::new(&self.name, &self.email, &self.message)
    }
}

pub struct ContactSubmitter<A> {
    api: Arc<A>,
    notifier: Notifier,
}

impl<A: FitnessApi> ContactSubmitter<A> {
    pub fn new(api: Arc<A>, notifier: Notifier) -> Self {
        Self { api, notifier }
    }

    /// Validate and send the form. Exactly one request is made for valid
    /// input and none otherwise; the form is cleared only on success.
    pub async fn submit(&self, form: &mut ContactForm) -> Result<ContactReceipt> {
        let message = form.to_message();

        if let Err(err) = message.validate() {
            warn!(field = ?err.field(), "Contact form rejected locally");
            self.notifier.error(err.user_message(FALLBACK_ERROR));
            return Err(err);
        }

        let Some(_guard) = form.submit.engage() else {
            warn!("Contact form is already being submitted");
            return Err(FitDashError::Busy);
        };

        match self.api.submit_contact(&message).await {
            Ok(receipt) => {
                info!(id = ?receipt.id, "Contact message delivered");
                self.notifier.success(SUCCESS_MESSAGE);
                form.reset();
                Ok(receipt)
            }
            Err(err) => {
                warn!("Contact submission failed: {}", err);
                self.notifier.error(err.user_message(FALLBACK_ERROR));
                Err(err)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::NotificationConfig;
    use crate::error::ContactField;
    use crate::models::{NutritionResult, Program, WeatherReport};
    use crate::notification::NotificationKind;
    use async_trait::async_trait;
    use std::sync::Mutex;

    /// Records contact submissions and the submit control state at call time
    struct RecordingApi {
        response: Mutex<Option<Result<ContactReceipt>>>,
        sent: Mutex<Vec<ContactMessage>>,
        control: Mutex<Option<TriggerControl>>,
        control_enabled_during_call: Mutex<Option<bool>>,
    }

    impl RecordingApi {
        fn answering(response: Result<ContactReceipt>) -> Self {
            Self {
                response: Mutex::new(Some(response)),
                sent: Mutex::new(Vec::new()),
                control: Mutex::new(None),
                control_enabled_during_call: Mutex::new(None),
            }
        }

        fn watch(&self, control: &TriggerControl) {
            *self.control.lock().unwrap() = Some(control.clone());
        }

        fn sent(&self) -> Vec<ContactMessage> {
            self.sent.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl FitnessApi for RecordingApi {
        async fn submit_contact(&self, message: &ContactMessage) -> Result<ContactReceipt> {
            self.sent.lock().unwrap().push(message.clone());
            if let Some(control) = self.control.lock().unwrap().as_ref() {
                *self.control_enabled_during_call.lock().unwrap() = Some(control.is_enabled());
            }
            self.response
                .lock()
                .unwrap()
                .take()
                .expect("single submission per test")
        }

        async fn list_programs(&self) -> Result<Vec<Program>> {
            unreachable!("not used by the contact form")
        }

        async fn weather(&self, _city: &str) -> Result<WeatherReport> {
            unreachable!("not used by the contact form")
        }

        async fn nutrition(&self, _category: &str) -> Result<NutritionResult> {
            unreachable!("not used by the contact form")
        }
    }

    fn submitter(api: &Arc<RecordingApi>) -> (ContactSubmitter<RecordingApi>, Notifier) {
        let notifier = Notifier::new(&NotificationConfig::default());
        (ContactSubmitter::new(Arc::clone(api), notifier.clone()), notifier)
    }

    #[tokio::test]
    async fn test_valid_form_is_sent_and_cleared() {
        let api = Arc::new(RecordingApi::answering(Ok(ContactReceipt { id: Some(3) })));
        let (submitter, notifier) = submitter(&api);
        let mut form = ContactForm::new("Al", "a@b.c", "1234567890");
        api.watch(form.submit_control());

        let receipt = submitter.submit(&mut form).await.unwrap();

        assert_eq!(receipt.id, Some(3));
        assert_eq!(api.sent(), vec![ContactMessage::new("Al", "a@b.c", "1234567890")]);
        assert!(form.is_empty());
        assert_eq!(*api.control_enabled_during_call.lock().unwrap(), Some(false));
        assert!(form.submit_control().is_enabled());
        assert_eq!(form.submit_control().label(), "Send message");

        let shown = notifier.current().unwrap();
        assert_eq!(shown.kind, NotificationKind::Success);
    }

    #[tokio::test]
    async fn test_invalid_email_is_rejected_without_request() {
        let api = Arc::new(RecordingApi::answering(Ok(ContactReceipt::default())));
        let (submitter, notifier) = submitter(&api);
        let mut form = ContactForm::new("Al", "bad", "1234567890");

        let err = submitter.submit(&mut form).await.unwrap_err();

        assert_eq!(err.field(), Some(ContactField::Email));
        assert!(api.sent().is_empty());
        assert_eq!(form.email, "bad");
        assert!(form.submit_control().is_enabled());
        assert_eq!(notifier.current().unwrap().kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn test_server_error_keeps_form_and_shows_detail() {
        let api = Arc::new(RecordingApi::answering(Err(FitDashError::server(
            400,
            Some("Email already registered".into()),
        ))));
        let (submitter, notifier) = submitter(&api);
        let mut form = ContactForm::new("Ana", "ana@example.com", "I would like a trial class");

        let err = submitter.submit(&mut form).await.unwrap_err();

        assert!(matches!(err, FitDashError::Server { status: 400, .. }));
        assert_eq!(api.sent().len(), 1);
        assert_eq!(form.name, "Ana");
        assert_eq!(form.message, "I would like a trial class");
        assert!(form.submit_control().is_enabled());

        let shown = notifier.current().unwrap();
        assert_eq!(shown.kind, NotificationKind::Error);
        assert_eq!(shown.message, "Email already registered");
    }

    #[tokio::test]
    async fn test_server_error_without_detail_uses_generic_message() {
        let api = Arc::new(RecordingApi::answering(Err(FitDashError::server(500, None))));
        let (submitter, notifier) = submitter(&api);
        let mut form = ContactForm::new("Ana", "ana@example.com", "I would like a trial class");

        submitter.submit(&mut form).await.unwrap_err();

        assert_eq!(notifier.current().unwrap().message, FALLBACK_ERROR);
        assert!(!form.is_empty());
    }

    #[tokio::test]
    async fn test_transport_error_re_enables_control() {
        let api = Arc::new(RecordingApi::answering(Err(FitDashError::transport(
            "connection refused",
        ))));
        let (submitter, notifier) = submitter(&api);
        let mut form = ContactForm::new("Ana", "ana@example.com", "I would like a trial class");
        api.watch(form.submit_control());

        submitter.submit(&mut form).await.unwrap_err();

        assert_eq!(*api.control_enabled_during_call.lock().unwrap(), Some(false));
        assert!(form.submit_control().is_enabled());
        assert!(notifier.current().unwrap().message.contains("Connection error"));
        assert!(!form.is_empty());
    }
}
