//! Submission state container.
//!
//! Transitions: `Idle -> Loading -> Ready(list) | Failed(message)`. Each
//! submission takes a `Ticket`; only the holder of the newest ticket may
//! complete it, so a response arriving after a newer submission started is
//! dropped instead of overwriting fresher state.

use tracing::{debug, error, info};

use crate::client::RecommendationService;
use crate::error::{ClientError, ValidationError, REQUEST_FAILED_BANNER};
use crate::form::ProfileForm;
use crate::models::{Profile, Recommendation};

#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionState {
    Idle,
    Loading,
    Ready(Vec<Recommendation>),
    Failed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Form,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ticket(u64);

#[derive(Debug)]
pub struct Session {
    state: SubmissionState,
    screen: Screen,
    generation: u64,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            state: SubmissionState::Idle,
            screen: Screen::Form,
            generation: 0,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, SubmissionState::Loading)
    }

    pub fn recommendations(&self) -> &[Recommendation] {
        match &self.state {
            SubmissionState::Ready(list) => list.as_slice(),
            _ => &[],
        }
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            SubmissionState::Failed(message) => Some(message.as_str()),
            _ => None,
        }
    }

    /// Starts a submission from the form: previous results and errors are
    /// dropped and any ticket handed out earlier becomes stale.
    pub fn begin(&mut self) -> Ticket {
        self.generation += 1;
        self.state = SubmissionState::Loading;
        self.screen = Screen::Form;
        Ticket(self.generation)
    }

    /// Applies the outcome of a submission. Returns false, leaving the state
    /// untouched, when the ticket has been superseded.
    pub fn complete(
        &mut self,
        ticket: Ticket,
        outcome: Result<Vec<Recommendation>, ClientError>,
    ) -> bool {
        if ticket.0 != self.generation || !self.is_loading() {
            debug!(ticket = ticket.0, current = self.generation, "dropping stale response");
            return false;
        }

        match outcome {
            Ok(list) => {
                info!(count = list.len(), "recommendations received");
                self.state = SubmissionState::Ready(list);
                self.screen = Screen::Results;
            }
            Err(err) => {
                error!("recommendation request failed: {err}");
                self.state = SubmissionState::Failed(REQUEST_FAILED_BANNER.to_string());
            }
        }
        true
    }

    pub async fn submit<S>(&mut self, service: &S, profile: &Profile)
    where
        S: RecommendationService + ?Sized,
    {
        let ticket = self.begin();
        let outcome = service.recommend(profile).await;
        self.complete(ticket, outcome);
    }

    /// Validates the form first; an invalid form never reaches the service.
    pub async fn submit_form<S>(
        &mut self,
        service: &S,
        form: &ProfileForm,
    ) -> Result<(), ValidationError>
    where
        S: RecommendationService + ?Sized,
    {
        let profile = form.finish()?;
        self.submit(service, &profile).await;
        Ok(())
    }
}
