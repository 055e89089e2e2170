//! # Landing Flow
//!
//! Headless orchestration of the landing page: button press opens the form,
//! submit posts the contact details, success swaps the form for the scratch
//! card. The rendering layer reads the state and accessors; transitions are
//! synchronous so they stay testable without I/O, with one async wrapper
//! around the actual request.

use rand::{Rng, thread_rng};
use reqwest::Client;
use thiserror::Error;

use crate::{
    client::{ClientError, send_submission},
    user::SubmissionPayload,
};

const SUBMIT_FAILED_NOTICE: &str = "Something went wrong. Please try again!";

#[derive(Error, Debug, PartialEq, Eq)]
pub enum FlowError {
    #[error("Already past the landing view")]
    AlreadyOpen,

    #[error("Form is not open")]
    FormNotOpen,

    #[error("Form fields do not satisfy input constraints")]
    ConstraintViolation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowState {
    Landing,
    FormOpen,
    Submitting,
    ScratchCardShown,
}

/// Mirror of the three form inputs and their browser-side constraints
/// (`required` on all, `pattern="[0-9]{10}"` on the phone field).
#[derive(Default, Debug, Clone)]
pub struct FormData {
    pub name: String,
    pub number: String,
    pub email: String,
}

impl FormData {
    pub fn constraints_ok(&self) -> bool {
        !self.name.is_empty()
            && !self.email.is_empty()
            && self.number.len() == 10
            && self.number.chars().all(|c| c.is_ascii_digit())
    }

    fn payload(&self) -> SubmissionPayload {
        SubmissionPayload {
            name: self.name.clone(),
            number: self.number.clone(),
            email: self.email.clone(),
        }
    }
}

pub struct LandingFlow {
    state: FlowState,
    pub form: FormData,
    notice: Option<String>,
    discount: Option<u8>,
}

impl Default for LandingFlow {
    fn default() -> Self {
        Self::new()
    }
}

impl LandingFlow {
    pub fn new() -> Self {
        Self {
            state: FlowState::Landing,
            form: FormData::default(),
            notice: None,
            discount: None,
        }
    }

    pub fn open_form(&mut self) -> Result<(), FlowError> {
        if self.state != FlowState::Landing {
            return Err(FlowError::AlreadyOpen);
        }

        self.state = FlowState::FormOpen;

        Ok(())
    }

    /// Takes the flow into `Submitting` and hands back the payload to send.
    /// Rejects the attempt while already submitting, so the disabled submit
    /// control cannot double-fire.
    pub fn begin_submit(&mut self) -> Result<SubmissionPayload, FlowError> {
        if self.state != FlowState::FormOpen {
            return Err(FlowError::FormNotOpen);
        }

        if !self.form.constraints_ok() {
            return Err(FlowError::ConstraintViolation);
        }

        self.state = FlowState::Submitting;

        Ok(self.form.payload())
    }

    /// On success the discount is drawn client-side, independent of anything
    /// the server stored. On failure the blocking notice is set and the form
    /// reopens with its fields intact.
    pub fn complete_submit(&mut self, result: Result<(), ClientError>) {
        match result {
            Ok(()) => {
                self.discount = Some(thread_rng().gen_range(5..=75));
                self.state = FlowState::ScratchCardShown;
            }
            Err(_) => {
                self.notice = Some(SUBMIT_FAILED_NOTICE.to_string());
                self.state = FlowState::FormOpen;
            }
        }
    }

    /// Full submit: the flow's only suspend point.
    pub async fn submit(&mut self, http: &Client, base_url: &str) -> Result<(), FlowError> {
        let payload = self.begin_submit()?;

        let result = send_submission(http, base_url, &payload).await.map(|_| ());
        self.complete_submit(result);

        Ok(())
    }

    pub fn state(&self) -> FlowState {
        self.state
    }

    pub fn is_submitting(&self) -> bool {
        self.state == FlowState::Submitting
    }

    pub fn discount(&self) -> Option<u8> {
        self.discount
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }
}
