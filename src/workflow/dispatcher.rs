// src/workflow/dispatcher.rs
//! Runs workflow effects: backend calls, notifications, cache invalidation, navigation

use std::collections::VecDeque;
use tracing::{debug, warn};

use super::{
    ApiCall, CoverLetterEvent, Effect, FeaturesEvent, InterviewEvent, UploadEvent,
};
use crate::core::resume_api::ResumeApi;
use crate::navigation::Route;
use crate::session::SessionHandle;

#[derive(Debug)]
pub enum SessionEvent {
    Upload(UploadEvent),
    Features(FeaturesEvent),
}

impl From<UploadEvent> for SessionEvent {
    fn from(event: UploadEvent) -> Self {
        SessionEvent::Upload(event)
    }
}

impl From<FeaturesEvent> for SessionEvent {
    fn from(event: FeaturesEvent) -> Self {
        SessionEvent::Features(event)
    }
}

/// Apply `event` to the session and drive every resulting request to completion.
///
/// The session lock is released while a backend call is running, so reads and
/// other mutation kinds stay available. Returns the route to navigate to, if
/// any transition asked for one.
pub async fn dispatch(
    session: &SessionHandle,
    api: &dyn ResumeApi,
    event: impl Into<SessionEvent>,
) -> Option<Route> {
    let mut queue = VecDeque::from([event.into()]);
    let mut destination = None;

    while let Some(event) = queue.pop_front() {
        let calls = {
            let mut guard = session.lock().await;

            let mut calls = Vec::new();
            for effect in guard.apply(event) {
                match effect {
                    Effect::Request(call) => calls.push(call),
                    Effect::Notify(notification) => guard.notify(notification),
                    Effect::Invalidate(key) => guard.cache.invalidate(&key),
                    Effect::Navigate(route) => {
                        debug!("Navigating to {}", route);
                        destination = Some(route);
                    }
                }
            }
            calls
        };

        for call in calls {
            queue.push_back(perform(api, call).await);
        }
    }

    destination
}

/// Issue one backend call and translate its outcome into the completion event
async fn perform(api: &dyn ResumeApi, call: ApiCall) -> SessionEvent {
    match call {
        ApiCall::Upload {
            generation,
            payload,
        } => match api.upload_resume(&payload).await {
            Ok(response) => UploadEvent::UploadSucceeded {
                generation,
                response,
            }
            .into(),
            Err(e) => {
                warn!("Upload #{} failed: {}", generation, e);
                UploadEvent::UploadFailed {
                    generation,
                    message: e.to_string(),
                }
                .into()
            }
        },
        ApiCall::Analyze(resume_id) => match api.analyze(resume_id).await {
            Ok(_) => UploadEvent::AnalyzeSucceeded(resume_id).into(),
            Err(e) => {
                warn!("Analysis of resume {} failed: {}", resume_id, e);
                UploadEvent::AnalyzeFailed {
                    resume_id,
                    message: e.to_string(),
                }
                .into()
            }
        },
        ApiCall::GenerateCoverLetter(resume_id, request) => {
            let event = match api.generate_cover_letter(resume_id, &request).await {
                Ok(letter) => CoverLetterEvent::Succeeded(letter),
                Err(e) => {
                    warn!("Cover letter for resume {} failed: {}", resume_id, e);
                    CoverLetterEvent::Failed(e.to_string())
                }
            };
            FeaturesEvent::CoverLetter(event).into()
        }
        ApiCall::GenerateInterviewQuestions(resume_id, request) => {
            let event = match api.generate_interview_questions(resume_id, &request).await {
                Ok(questions) => InterviewEvent::Succeeded(questions),
                Err(e) => {
                    warn!("Interview questions for resume {} failed: {}", resume_id, e);
                    InterviewEvent::Failed(e.to_string())
                }
            };
            FeaturesEvent::Interview(event).into()
        }
    }
}
