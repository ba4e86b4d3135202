// src/workflow/mod.rs
//! Workflow state machines.
//!
//! Each machine is a plain value; `step` consumes it together with one event
//! and returns the next state plus the side effects the caller must carry
//! out. Machines never perform I/O themselves.

pub mod dispatcher;
pub mod features;
pub mod upload;

pub use dispatcher::{dispatch, SessionEvent};
pub use features::{
    CoverLetterEvent, CoverLetterFlow, FeaturesEvent, FeaturesSession, InterviewEvent,
    InterviewFlow, MutationStatus,
};
pub use upload::{UploadEvent, UploadPhase, UploadSession};

use crate::core::query_cache::QueryKey;
use crate::core::resume_api::UploadPayload;
use crate::navigation::Route;
use crate::notification::Notification;
use crate::types::{CoverLetterRequest, InterviewQuestionRequest, ResumeId};

/// Backend mutation requested by a machine
#[derive(Debug, Clone, PartialEq)]
pub enum ApiCall {
    Upload {
        generation: u64,
        payload: UploadPayload,
    },
    Analyze(ResumeId),
    GenerateCoverLetter(ResumeId, CoverLetterRequest),
    GenerateInterviewQuestions(ResumeId, InterviewQuestionRequest),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Request(ApiCall),
    Notify(Notification),
    Navigate(Route),
    Invalidate(QueryKey),
}

/// Result of one transition
#[derive(Debug)]
pub struct Step<S> {
    pub state: S,
    pub effects: Vec<Effect>,
}

impl<S> Step<S> {
    pub fn stay(state: S) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }

    pub fn with(state: S, effects: Vec<Effect>) -> Self {
        Self { state, effects }
    }

    pub fn map<T>(self, f: impl FnOnce(S) -> T) -> Step<T> {
        Step {
            state: f(self.state),
            effects: self.effects,
        }
    }
}

pub trait Machine: Sized {
    type Event;

    fn step(self, event: Self::Event) -> Step<Self>;
}
