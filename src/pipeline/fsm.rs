use crate::{Error, Result};
use tracing::{debug, info, warn};

/// Why a run ended without answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unauthorized,
    BadRequest,
    Fetch,
    Extraction,
    Service,
    Internal,
}

// Run states
#[derive(Debug, Clone, PartialEq)]
pub enum RunState {
    AuthCheck,
    ValidateBody,
    Fetching,
    Extracting,
    Querying,
    Responding,
    Failed(FailureKind),
}

// Run events
#[derive(Debug, Clone, PartialEq)]
pub enum RunEvent {
    Authorized,
    BodyValidated,
    DocumentFetched,
    TextExtracted,
    AnswersReceived,
    Failed(FailureKind),
}

/// Tracks a single run request through its stages.
pub struct RunStateMachine {
    state: RunState,
}

impl Default for RunStateMachine {
    fn default() -> Self {
        Self::new()
    }
}

impl RunStateMachine {
    pub fn new() -> Self {
        Self {
            state: RunState::AuthCheck,
        }
    }

    pub fn current_state(&self) -> &RunState {
        &self.state
    }

    pub fn transition(&mut self, event: RunEvent) -> Result<()> {
        let old_state = self.state.clone();

        let new_state = match (&self.state, &event) {
            (RunState::AuthCheck, RunEvent::Authorized) => RunState::ValidateBody,
            (RunState::ValidateBody, RunEvent::BodyValidated) => RunState::Fetching,
            (RunState::Fetching, RunEvent::DocumentFetched) => RunState::Extracting,
            (RunState::Extracting, RunEvent::TextExtracted) => RunState::Querying,
            (RunState::Querying, RunEvent::AnswersReceived) => RunState::Responding,
            (state, RunEvent::Failed(kind)) if !is_terminal_state(state) => RunState::Failed(*kind),
            _ => {
                warn!(
                    "Invalid run transition from {:?} with event {:?}",
                    self.state, event
                );
                return Err(Error::InvalidTransition {
                    current: format!("{:?}", self.state),
                    requested: format!("{:?}", event),
                });
            }
        };

        match &new_state {
            RunState::Failed(kind) => info!("Run failed in state {:?}: {:?}", old_state, kind),
            _ => debug!("Run state transition: {:?} -> {:?}", old_state, new_state),
        }

        self.state = new_state;
        Ok(())
    }

    pub fn is_terminal(&self) -> bool {
        is_terminal_state(&self.state)
    }
}

fn is_terminal_state(state: &RunState) -> bool {
    matches!(state, RunState::Responding | RunState::Failed(_))
}
