//! Two-step registration wizard
//!
//! Step 1 collects email and password, step 2 username, blog name and the
//! terms checkbox. Each forward transition needs local validation to pass
//! and then one server uniqueness check to come back "available". Checks are
//! run by the caller; the wizard only hands out tickets and judges results.

use super::forms::{rules, run_chain, FormError, FormField, FormSnapshot};
use crate::service::{CheckOutcome, UniquenessQuery};
use tokio_util::sync::CancellationToken;

pub const EMAIL_TAKEN: &str = "This email is already registered. Please try another one.";
pub const USERNAME_TAKEN: &str = "This username is already taken. Please choose another username.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WizardStep {
    #[default]
    Step1,
    Step2,
}

/// A uniqueness check the caller must run and report back with `resolve`
#[derive(Debug, Clone)]
pub struct PendingCheck {
    pub ticket: u64,
    pub query: UniquenessQuery,
    pub cancel: CancellationToken,
}

/// Result of feeding a check outcome back into the wizard
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WizardEvent {
    AdvancedToStep2,
    /// Both checks passed; the payload is the registration POST body
    ReadyToSubmit(FormSnapshot),
    Rejected(FormError),
    /// Stale or cancelled result; nothing changed
    Ignored,
}

#[derive(Debug, Clone)]
struct InFlight {
    ticket: u64,
    step: WizardStep,
    cancel: CancellationToken,
    /// Step values exactly as validated when the check was requested
    checked: FormSnapshot,
}

#[derive(Debug, Clone)]
pub struct RegistrationWizard {
    step: WizardStep,
    pub email: FormField,
    pub password: FormField,
    pub username: FormField,
    pub blogname: FormField,
    pub terms: FormField,
    pub active_field_index: usize,
    pending: Option<InFlight>,
    /// Step 1 values whose email came back available
    verified_step1: Option<FormSnapshot>,
    next_ticket: u64,
}

impl Default for RegistrationWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl RegistrationWizard {
    pub fn new() -> Self {
        Self {
            step: WizardStep::Step1,
            email: FormField::text("email", "Email", false),
            password: FormField::secret("password", "Password"),
            username: FormField::text("username", "Username", false),
            blogname: FormField::text("blogname", "Blog name", false),
            terms: FormField::toggle("terms", "I have read the terms"),
            active_field_index: 0,
            pending: None,
            verified_step1: None,
            next_ticket: 0,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Fields shown on the current step
    pub fn fields(&self) -> Vec<&FormField> {
        match self.step {
            WizardStep::Step1 => vec![&self.email, &self.password],
            WizardStep::Step2 => vec![&self.username, &self.blogname, &self.terms],
        }
    }

    fn fields_mut(&mut self) -> Vec<&mut FormField> {
        match self.step {
            WizardStep::Step1 => vec![&mut self.email, &mut self.password],
            WizardStep::Step2 => vec![&mut self.username, &mut self.blogname, &mut self.terms],
        }
    }

    pub fn next_field(&mut self) {
        let count = self.fields().len();
        self.active_field_index = (self.active_field_index + 1) % count;
    }

    pub fn prev_field(&mut self) {
        let count = self.fields().len();
        self.active_field_index = (self.active_field_index + count - 1) % count;
    }

    pub fn get_active_field_mut(&mut self) -> Option<&mut FormField> {
        let index = self.active_field_index;
        self.fields_mut().into_iter().nth(index)
    }

    /// Advance using the values currently typed into the wizard
    pub fn advance(&mut self) -> Result<PendingCheck, FormError> {
        match self.step {
            WizardStep::Step1 => {
                let email = self.email.as_text().to_string();
                let password = self.password.as_text().to_string();
                self.advance_from_step1(&email, &password)
            }
            WizardStep::Step2 => {
                let username = self.username.as_text().to_string();
                let blogname = self.blogname.as_text().to_string();
                let terms = self.terms.is_checked();
                self.advance_from_step2(&username, &blogname, terms)
            }
        }
    }

    /// Validate step 1 locally and request the email uniqueness check
    pub fn advance_from_step1(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<PendingCheck, FormError> {
        self.ensure_ready(WizardStep::Step1)?;
        self.email.set_text(email.to_string());
        self.password.set_text(password.to_string());

        let snapshot = FormSnapshot::new()
            .with("email", email)
            .with("password", password);
        run_chain(rules::REGISTRATION_STEP1, &snapshot)?;

        Ok(self.begin_check(UniquenessQuery::Email(email.to_string()), snapshot))
    }

    /// Validate step 2 locally and request the username uniqueness check
    pub fn advance_from_step2(
        &mut self,
        username: &str,
        blogname: &str,
        terms_accepted: bool,
    ) -> Result<PendingCheck, FormError> {
        self.ensure_ready(WizardStep::Step2)?;
        self.username.set_text(username.to_string());
        self.blogname.set_text(blogname.to_string());
        if self.terms.is_checked() != terms_accepted {
            self.terms.activate();
        }

        let snapshot = FormSnapshot::new()
            .with("username", username)
            .with("blogname", blogname)
            .with("terms", self.terms.as_text());
        run_chain(rules::REGISTRATION_STEP2, &snapshot)?;

        Ok(self.begin_check(UniquenessQuery::Username(username.to_string()), snapshot))
    }

    fn ensure_ready(&self, step: WizardStep) -> Result<(), FormError> {
        if self.step != step {
            return Err(FormError::NotOnStep);
        }
        if self.pending.is_some() {
            return Err(FormError::CheckPending);
        }
        Ok(())
    }

    fn begin_check(&mut self, query: UniquenessQuery, checked: FormSnapshot) -> PendingCheck {
        self.next_ticket += 1;
        let ticket = self.next_ticket;
        let cancel = CancellationToken::new();
        self.pending = Some(InFlight {
            ticket,
            step: self.step,
            cancel: cancel.clone(),
            checked,
        });
        tracing::debug!(ticket, param = query.param(), "uniqueness check requested");
        PendingCheck {
            ticket,
            query,
            cancel,
        }
    }

    /// Apply the outcome of the check carrying `ticket`
    pub fn resolve(&mut self, ticket: u64, outcome: CheckOutcome) -> WizardEvent {
        let in_flight = match self.pending.take() {
            Some(p) if p.ticket == ticket => p,
            other => {
                self.pending = other;
                tracing::debug!(ticket, "ignoring stale uniqueness result");
                return WizardEvent::Ignored;
            }
        };

        let taken_message = match in_flight.step {
            WizardStep::Step1 => EMAIL_TAKEN,
            WizardStep::Step2 => USERNAME_TAKEN,
        };

        match outcome {
            CheckOutcome::Available if self.step_values() != in_flight.checked => {
                tracing::debug!(ticket, "step values changed while the check was in flight");
                WizardEvent::Rejected(FormError::ChangedDuringCheck)
            }
            CheckOutcome::Available => match in_flight.step {
                WizardStep::Step1 => {
                    self.verified_step1 = Some(in_flight.checked);
                    self.step = WizardStep::Step2;
                    self.active_field_index = 0;
                    tracing::info!("registration advanced to step 2");
                    WizardEvent::AdvancedToStep2
                }
                WizardStep::Step2 => match &self.verified_step1 {
                    Some(step1) => {
                        WizardEvent::ReadyToSubmit(registration_payload(step1, &in_flight.checked))
                    }
                    None => WizardEvent::Rejected(FormError::NotOnStep),
                },
            },
            CheckOutcome::Taken => {
                WizardEvent::Rejected(FormError::RemoteConflict(taken_message.to_string()))
            }
            CheckOutcome::Failed(detail) => WizardEvent::Rejected(FormError::Transport(detail)),
            CheckOutcome::TimedOut => {
                WizardEvent::Rejected(FormError::Transport("request timed out".to_string()))
            }
            CheckOutcome::Cancelled => WizardEvent::Ignored,
        }
    }

    /// Abandon any check in flight and go back to step 1
    pub fn cancel(&mut self) {
        if let Some(in_flight) = self.pending.take() {
            in_flight.cancel.cancel();
            tracing::debug!(ticket = in_flight.ticket, "uniqueness check cancelled");
        }
        self.verified_step1 = None;
        self.step = WizardStep::Step1;
        self.active_field_index = 0;
    }

    /// Current values of the fields on this step
    fn step_values(&self) -> FormSnapshot {
        FormSnapshot::from_fields(self.fields())
    }
}

/// Body of the `/signup` POST, built only from checked values
fn registration_payload(step1: &FormSnapshot, step2: &FormSnapshot) -> FormSnapshot {
    let mut payload = FormSnapshot::new();
    for (name, value) in step1.pairs().iter().chain(step2.pairs()) {
        payload.push(name.as_str(), value.as_str());
    }
    payload
}
