use std::{thread, time::Duration};

use thiserror::Error;
use tracing::{debug, info, warn};

pub const DEFAULT_SUBMIT_DELAY: Duration = Duration::from_millis(1500);
pub const SUBMIT_FAILED_MESSAGE: &str =
    "Sorry, something went wrong sending your message. Please call the studio instead.";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    #[error("name is required")]
    MissingName,
    #[error("email is required")]
    MissingEmail,
    #[error("'{0}' is not a valid email address")]
    InvalidEmail(String),
    #[error("message is required")]
    MissingMessage,
}

impl ContactForm {
    /// Returns every failing field, in form order.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.name.trim().is_empty() {
            errors.push(FieldError::MissingName);
        }
        let email = self.email.trim();
        if email.is_empty() {
            errors.push(FieldError::MissingEmail);
        } else if !looks_like_email(email) {
            errors.push(FieldError::InvalidEmail(email.to_string()));
        }
        if self.message.trim().is_empty() {
            errors.push(FieldError::MissingMessage);
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

fn looks_like_email(email: &str) -> bool {
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.starts_with('.')
        && !domain.ends_with('.')
        && domain.contains('.')
        && !email.contains(char::is_whitespace)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmitReceipt {
    pub reference: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("submission rejected")]
    Rejected,
}

pub trait Submitter {
    fn submit(&mut self, form: &ContactForm) -> Result<SubmitReceipt, SubmitError>;
}

/// Stand-in backend: waits a fixed delay, then succeeds unless told to fail.
#[derive(Debug, Clone)]
pub struct SimulatedSubmitter {
    delay: Duration,
    fail: bool,
    sent: u64,
}

impl SimulatedSubmitter {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            fail: false,
            sent: 0,
        }
    }

    pub fn failing(mut self) -> Self {
        self.fail = true;
        self
    }
}

impl Default for SimulatedSubmitter {
    fn default() -> Self {
        Self::new(DEFAULT_SUBMIT_DELAY)
    }
}

impl Submitter for SimulatedSubmitter {
    fn submit(&mut self, form: &ContactForm) -> Result<SubmitReceipt, SubmitError> {
        debug!(delay_ms = self.delay.as_millis() as u64, "simulating submission");
        if !self.delay.is_zero() {
            thread::sleep(self.delay);
        }
        if self.fail {
            return Err(SubmitError::Rejected);
        }
        self.sent += 1;
        info!(name = %form.name, reference = self.sent, "contact form submitted");
        Ok(SubmitReceipt {
            reference: self.sent,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormState {
    Idle,
    Invalid(Vec<FieldError>),
    Submitting,
    Submitted(SubmitReceipt),
    Failed(&'static str),
}

#[derive(Debug, Clone)]
pub struct FormFlow {
    state: FormState,
}

impl Default for FormFlow {
    fn default() -> Self {
        Self {
            state: FormState::Idle,
        }
    }
}

impl FormFlow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &FormState {
        &self.state
    }

    /// Validates the form and moves to `Submitting`. Ignored unless idle or invalid.
    pub fn begin(&mut self, form: &ContactForm) -> &FormState {
        match self.state {
            FormState::Idle | FormState::Invalid(_) => {}
            _ => {
                debug!(state = ?self.state, "ignoring submit");
                return &self.state;
            }
        }
        self.state = match form.validate() {
            Ok(()) => FormState::Submitting,
            Err(errors) => FormState::Invalid(errors),
        };
        &self.state
    }

    /// Sends a form accepted by [`FormFlow::begin`]. Only acts while submitting.
    pub fn finish(&mut self, form: &ContactForm, submitter: &mut dyn Submitter) -> &FormState {
        if self.state != FormState::Submitting {
            return &self.state;
        }
        self.state = match submitter.submit(form) {
            Ok(receipt) => FormState::Submitted(receipt),
            Err(err) => {
                warn!(%err, "contact form submission failed");
                FormState::Failed(SUBMIT_FAILED_MESSAGE)
            }
        };
        &self.state
    }

    /// Validates and submits in one go. Once submitted or failed, further submits are ignored.
    pub fn submit(&mut self, form: &ContactForm, submitter: &mut dyn Submitter) -> &FormState {
        if *self.begin(form) == FormState::Submitting {
            return self.finish(form, submitter);
        }
        &self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ContactForm {
        ContactForm {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            phone: None,
            message: "Do you run adult ballet?".to_string(),
        }
    }

    #[test]
    fn valid_form_passes() {
        assert_eq!(form().validate(), Ok(()));
    }

    #[test]
    fn every_missing_field_is_reported() {
        let errors = ContactForm::default().validate().unwrap_err();
        assert_eq!(
            errors,
            vec![
                FieldError::MissingName,
                FieldError::MissingEmail,
                FieldError::MissingMessage
            ]
        );
    }

    #[test]
    fn malformed_emails_are_rejected() {
        for email in ["ada", "ada@", "@example.com", "ada@example", "ada@.com", "a da@x.io"] {
            let f = ContactForm {
                email: email.to_string(),
                ..form()
            };
            assert!(
                matches!(f.validate(), Err(ref e) if e == &vec![FieldError::InvalidEmail(email.to_string())]),
                "{email}"
            );
        }
    }

    #[test]
    fn successful_submission_is_final() {
        let mut flow = FormFlow::new();
        let mut submitter = SimulatedSubmitter::new(Duration::ZERO);
        assert_eq!(
            flow.submit(&form(), &mut submitter),
            &FormState::Submitted(SubmitReceipt { reference: 1 })
        );
        flow.submit(&form(), &mut submitter);
        assert_eq!(
            flow.state(),
            &FormState::Submitted(SubmitReceipt { reference: 1 })
        );
    }

    #[test]
    fn failure_shows_static_message_without_retry() {
        let mut flow = FormFlow::new();
        let mut failing = SimulatedSubmitter::new(Duration::ZERO).failing();
        assert_eq!(
            flow.submit(&form(), &mut failing),
            &FormState::Failed(SUBMIT_FAILED_MESSAGE)
        );
        let mut working = SimulatedSubmitter::new(Duration::ZERO);
        assert_eq!(
            flow.submit(&form(), &mut working),
            &FormState::Failed(SUBMIT_FAILED_MESSAGE)
        );
    }

    #[test]
    fn submitting_is_observable_between_phases() {
        let mut flow = FormFlow::new();
        let mut submitter = SimulatedSubmitter::new(Duration::ZERO);
        assert_eq!(flow.begin(&form()), &FormState::Submitting);
        // A second click while in flight is ignored.
        assert_eq!(flow.begin(&form()), &FormState::Submitting);
        assert_eq!(
            flow.finish(&form(), &mut submitter),
            &FormState::Submitted(SubmitReceipt { reference: 1 })
        );
        assert_eq!(
            flow.finish(&form(), &mut submitter),
            &FormState::Submitted(SubmitReceipt { reference: 1 })
        );
    }

    #[test]
    fn finish_without_begin_does_nothing() {
        let mut flow = FormFlow::new();
        let mut submitter = SimulatedSubmitter::new(Duration::ZERO);
        assert_eq!(flow.finish(&form(), &mut submitter), &FormState::Idle);
    }

    #[test]
    fn invalid_form_can_be_corrected() {
        let mut flow = FormFlow::new();
        let mut submitter = SimulatedSubmitter::new(Duration::ZERO);
        let bad = ContactForm {
            name: String::new(),
            ..form()
        };
        assert!(matches!(
            flow.submit(&bad, &mut submitter),
            FormState::Invalid(_)
        ));
        assert!(matches!(
            flow.submit(&form(), &mut submitter),
            FormState::Submitted(_)
        ));
    }
}
