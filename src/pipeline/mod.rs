pub mod fsm;
mod runner;

pub use fsm::{FailureKind, RunEvent, RunState, RunStateMachine};
pub use runner::{QueryPipeline, RunFailure, RunRequest};
