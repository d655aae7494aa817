//! Contact form: submission state, required-field gate and the form-backend seam.
//!
//! Transport and server-side validation belong to the form backend; this module
//! only drives the state machine and reports outcomes to analytics.

use anyhow::Result;
use metrics::counter;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::analytics::{props, Analytics, EventName};

pub mod formspree;

pub use formspree::FormspreeBackend;

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email regex"));

pub const GENERIC_FAILURE: &str = "Something went wrong sending your message. Please try again.";

/// Values as typed by the visitor; echoed back into the form after a failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactFields {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactFields {
    pub fn trimmed(self) -> Self {
        Self {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }

    /// Required-field gate run before anything is sent.
    pub fn check_required(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::field("name", "is required"));
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::field("email", "is required"));
        } else if !EMAIL_SHAPE.is_match(email) {
            errors.push(FieldError::field("email", "should be an email"));
        }
        if self.message.trim().is_empty() {
            errors.push(FieldError::field("message", "is required"));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

/// A validation message; `field == None` marks a form-level error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    #[serde(default)]
    pub field: Option<String>,
    pub message: String,
}

impl FieldError {
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.to_string()),
            message: message.into(),
        }
    }

    pub fn form(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
        }
    }
}

/// What the form backend reports for one submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmissionOutcome {
    pub succeeded: bool,
    pub errors: Vec<FieldError>,
}

#[async_trait::async_trait]
pub trait FormBackend: Send + Sync {
    async fn submit(&self, fields: &ContactFields) -> Result<SubmissionOutcome>;
    fn name(&self) -> &'static str;
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(Vec<FieldError>),
}

impl FormState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, FormState::Submitting)
    }

    pub fn errors(&self) -> &[FieldError] {
        match self {
            FormState::Failed(errors) => errors,
            _ => &[],
        }
    }

    pub fn errors_for<'a>(&'a self, field: &'a str) -> impl Iterator<Item = &'a FieldError> + 'a {
        self.errors()
            .iter()
            .filter(move |e| e.field.as_deref() == Some(field))
    }

    pub fn form_errors(&self) -> impl Iterator<Item = &FieldError> {
        self.errors().iter().filter(|e| e.field.is_none())
    }
}

/// Drives one visitor's contact form through `Idle -> Submitting -> Succeeded | Failed`.
#[derive(Debug, Clone, Default)]
pub struct ContactForm {
    state: FormState,
    fields: ContactFields,
}

impl ContactForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub async fn submit(
        &mut self,
        backend: &dyn FormBackend,
        analytics: &mut Analytics,
        fields: ContactFields,
    ) -> &FormState {
        self.fields = fields.trimmed();

        if let Err(errors) = self.fields.check_required() {
            self.fail(errors, analytics);
            return &self.state;
        }

        self.state = FormState::Submitting;
        match backend.submit(&self.fields).await {
            Ok(outcome) if outcome.succeeded => self.succeed(analytics),
            Ok(outcome) => {
                let errors = if outcome.errors.is_empty() {
                    vec![FieldError::form(GENERIC_FAILURE)]
                } else {
                    outcome.errors
                };
                self.fail(errors, analytics);
            }
            Err(e) => {
                tracing::warn!(error = ?e, backend = backend.name(), "contact form backend unreachable");
                self.fail(vec![FieldError::form(GENERIC_FAILURE)], analytics);
            }
        }
        &self.state
    }

    fn succeed(&mut self, analytics: &mut Analytics) {
        let ContactFields {
            name,
            email,
            subject,
            ..
        } = std::mem::take(&mut self.fields);

        if !email.is_empty() {
            analytics.identify(
                &email,
                Some(props([
                    ("name", json!(name)),
                    ("email", json!(email)),
                    ("contact_method", json!("contact_form")),
                    ("timestamp", json!(chrono::Utc::now().to_rfc3339())),
                ])),
            );
        }

        let has_subject = !subject.is_empty();
        let subject = if has_subject {
            subject
        } else {
            "No subject".to_string()
        };
        analytics.track(
            EventName::ContactFormSubmit,
            Some(props([
                ("name", json!(name)),
                ("email", json!(email)),
                ("subject", json!(subject)),
                ("has_subject", json!(has_subject)),
            ])),
        );

        counter!("site_contact_submissions_total", "outcome" => "succeeded").increment(1);
        tracing::info!(visitor = %crate::analytics::anon_hash(&email), "contact form submitted");
        self.state = FormState::Succeeded;
    }

    fn fail(&mut self, errors: Vec<FieldError>, analytics: &Analytics) {
        let messages: Vec<&str> = errors.iter().map(|e| e.message.as_str()).collect();
        analytics.track(
            EventName::ContactFormError,
            Some(props([("errors", json!(messages))])),
        );
        counter!("site_contact_submissions_total", "outcome" => "failed").increment(1);
        tracing::info!(errors = errors.len(), "contact form rejected");
        self.state = FormState::Failed(errors);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gate_requires_name_email_message() {
        let errs = ContactFields::default().check_required().unwrap_err();
        let fields: Vec<_> = errs.iter().filter_map(|e| e.field.as_deref()).collect();
        assert_eq!(fields, vec!["name", "email", "message"]);
    }

    #[test]
    fn gate_rejects_malformed_email_only() {
        let f = ContactFields {
            name: "Ana".into(),
            email: "ana-at-example".into(),
            subject: String::new(),
            message: "Hola".into(),
        };
        let errs = f.check_required().unwrap_err();
        assert_eq!(errs, vec![FieldError::field("email", "should be an email")]);
    }

    #[test]
    fn subject_is_optional() {
        let f = ContactFields {
            name: "Ana".into(),
            email: "ana@example.com".into(),
            subject: "  ".into(),
            message: "Hola".into(),
        };
        assert!(f.check_required().is_ok());
    }

    #[test]
    fn state_error_accessors_split_field_and_form_errors() {
        let st = FormState::Failed(vec![
            FieldError::field("email", "should be an email"),
            FieldError::form("boom"),
        ]);
        assert_eq!(st.errors_for("email").count(), 1);
        assert_eq!(st.errors_for("message").count(), 0);
        assert_eq!(st.form_errors().count(), 1);
        assert!(FormState::Idle.errors().is_empty());
    }

    struct AcceptAll;

    #[async_trait::async_trait]
    impl FormBackend for AcceptAll {
        async fn submit(&self, _fields: &ContactFields) -> Result<SubmissionOutcome> {
            Ok(SubmissionOutcome {
                succeeded: true,
                errors: Vec::new(),
            })
        }

        fn name(&self) -> &'static str {
            "accept-all"
        }
    }

    #[tokio::test]
    async fn failed_form_can_be_corrected_and_resubmitted() {
        let mut form = ContactForm::new();
        let mut analytics = Analytics::disabled();
        let mut fields = ContactFields {
            name: "Ana".into(),
            email: "ana-at-example".into(),
            subject: String::new(),
            message: "Hola".into(),
        };

        let state = form.submit(&AcceptAll, &mut analytics, fields.clone()).await;
        assert!(matches!(state, FormState::Failed(_)));

        fields.email = "ana@example.com".into();
        let state = form.submit(&AcceptAll, &mut analytics, fields).await;
        assert_eq!(state, &FormState::Succeeded);
        assert_eq!(form.fields(), &ContactFields::default());
    }
}
