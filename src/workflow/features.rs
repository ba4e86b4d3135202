// src/workflow/features.rs
//! Cover-letter and interview-question generation.
//!
//! The two flows sit side by side and share only the résumé id; each tracks
//! its own status so a failure in one never shows up in the other.

use tracing::{debug, info};

use super::{ApiCall, Effect, Machine, Step};
use crate::core::endpoints;
use crate::notification::Notification;
use crate::types::{
    CoverLetter, CoverLetterRequest, CoverLetterStyle, InterviewQuestion,
    InterviewQuestionRequest, ResumeId,
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MutationStatus {
    #[default]
    Idle,
    Pending,
    Succeeded,
    Failed(String),
}

impl MutationStatus {
    pub fn is_pending(&self) -> bool {
        matches!(self, MutationStatus::Pending)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            MutationStatus::Failed(message) => Some(message),
            _ => None,
        }
    }
}

// ===== Cover letter =====

#[derive(Debug)]
pub enum CoverLetterEvent {
    CompanyEntered(String),
    PositionEntered(String),
    StyleChosen(Option<CoverLetterStyle>),
    Requested,
    Succeeded(CoverLetter),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct CoverLetterFlow {
    company: String,
    position: String,
    style: Option<CoverLetterStyle>,
    status: MutationStatus,
}

impl CoverLetterFlow {
    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn style(&self) -> Option<CoverLetterStyle> {
        self.style
    }

    pub fn status(&self) -> &MutationStatus {
        &self.status
    }

    /// Request body if every input is filled in
    pub fn request(&self) -> Option<CoverLetterRequest> {
        let company = self.company.trim();
        let position = self.position.trim();
        match self.style {
            Some(style) if !company.is_empty() && !position.is_empty() => {
                Some(CoverLetterRequest {
                    company: company.to_string(),
                    position: position.to_string(),
                    style,
                })
            }
            _ => None,
        }
    }

    pub fn can_submit(&self) -> bool {
        !self.status.is_pending() && self.request().is_some()
    }

    fn step(mut self, resume_id: ResumeId, event: CoverLetterEvent) -> Step<Self> {
        match event {
            CoverLetterEvent::CompanyEntered(company) => {
                self.company = company;
                Step::stay(self)
            }
            CoverLetterEvent::PositionEntered(position) => {
                self.position = position;
                Step::stay(self)
            }
            CoverLetterEvent::StyleChosen(style) => {
                self.style = style;
                Step::stay(self)
            }
            CoverLetterEvent::Requested => {
                if self.status.is_pending() {
                    debug!("Cover letter already pending for resume {}", resume_id);
                    return Step::stay(self);
                }
                let Some(request) = self.request() else {
                    return Step::stay(self);
                };
                self.status = MutationStatus::Pending;
                Step::with(
                    self,
                    vec![Effect::Request(ApiCall::GenerateCoverLetter(
                        resume_id, request,
                    ))],
                )
            }
            CoverLetterEvent::Succeeded(letter) => {
                info!(
                    "Cover letter for {} generated (resume {})",
                    letter.company, resume_id
                );
                self.status = MutationStatus::Succeeded;
                Step::with(
                    self,
                    vec![
                        Effect::Notify(Notification::success(
                            "자기소개서 생성 완료",
                            "맞춤형 자기소개서가 생성되었습니다.",
                        )),
                        Effect::Invalidate(endpoints::cover_letters_key(resume_id)),
                    ],
                )
            }
            CoverLetterEvent::Failed(message) => {
                self.status = MutationStatus::Failed(message.clone());
                Step::with(
                    self,
                    vec![Effect::Notify(Notification::error("생성 실패", message))],
                )
            }
        }
    }
}

// ===== Interview questions =====

#[derive(Debug)]
pub enum InterviewEvent {
    PositionEntered(String),
    Requested,
    Succeeded(Vec<InterviewQuestion>),
    Failed(String),
}

#[derive(Debug, Clone, Default)]
pub struct InterviewFlow {
    position: String,
    status: MutationStatus,
}

impl InterviewFlow {
    pub fn position(&self) -> &str {
        &self.position
    }

    pub fn status(&self) -> &MutationStatus {
        &self.status
    }

    pub fn request(&self) -> Option<InterviewQuestionRequest> {
        let position = self.position.trim();
        (!position.is_empty()).then(|| InterviewQuestionRequest {
            position: position.to_string(),
        })
    }

    pub fn can_submit(&self) -> bool {
        !self.status.is_pending() && self.request().is_some()
    }

    fn step(mut self, resume_id: ResumeId, event: InterviewEvent) -> Step<Self> {
        match event {
            InterviewEvent::PositionEntered(position) => {
                self.position = position;
                Step::stay(self)
            }
            InterviewEvent::Requested => {
                if self.status.is_pending() {
                    debug!("Interview questions already pending for resume {}", resume_id);
                    return Step::stay(self);
                }
                let Some(request) = self.request() else {
                    return Step::stay(self);
                };
                self.status = MutationStatus::Pending;
                Step::with(
                    self,
                    vec![Effect::Request(ApiCall::GenerateInterviewQuestions(
                        resume_id, request,
                    ))],
                )
            }
            InterviewEvent::Succeeded(questions) => {
                info!(
                    "{} interview questions generated (resume {})",
                    questions.len(),
                    resume_id
                );
                self.status = MutationStatus::Succeeded;
                Step::with(
                    self,
                    vec![
                        Effect::Notify(Notification::success(
                            "면접 질문 생성 완료",
                            "맞춤형 면접 질문이 생성되었습니다.",
                        )),
                        Effect::Invalidate(endpoints::interview_questions_key(resume_id)),
                    ],
                )
            }
            InterviewEvent::Failed(message) => {
                self.status = MutationStatus::Failed(message.clone());
                Step::with(
                    self,
                    vec![Effect::Notify(Notification::error("생성 실패", message))],
                )
            }
        }
    }
}

// ===== Composition =====

#[derive(Debug)]
pub enum FeaturesEvent {
    CoverLetter(CoverLetterEvent),
    Interview(InterviewEvent),
}

#[derive(Debug, Clone, Default)]
pub struct FeaturesSession {
    resume_id: Option<ResumeId>,
    cover_letter: CoverLetterFlow,
    interview: InterviewFlow,
}

impl FeaturesSession {
    pub fn for_resume(resume_id: Option<ResumeId>) -> Self {
        Self {
            resume_id,
            ..Self::default()
        }
    }

    pub fn resume_id(&self) -> Option<ResumeId> {
        self.resume_id
    }

    pub fn cover_letter(&self) -> &CoverLetterFlow {
        &self.cover_letter
    }

    pub fn interview(&self) -> &InterviewFlow {
        &self.interview
    }
}

impl Machine for FeaturesSession {
    type Event = FeaturesEvent;

    fn step(mut self, event: FeaturesEvent) -> Step<Self> {
        let Some(resume_id) = self.resume_id else {
            debug!("Features event without a resume: {:?}", event);
            return Step::stay(self);
        };

        match event {
            FeaturesEvent::CoverLetter(event) => {
                let flow = std::mem::take(&mut self.cover_letter);
                flow.step(resume_id, event).map(|cover_letter| Self {
                    cover_letter,
                    ..self
                })
            }
            FeaturesEvent::Interview(event) => {
                let flow = std::mem::take(&mut self.interview);
                flow.step(resume_id, event)
                    .map(|interview| Self { interview, ..self })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::QuestionKind;

    fn id() -> ResumeId {
        ResumeId::new(42).unwrap()
    }

    fn apply(session: FeaturesSession, events: Vec<FeaturesEvent>) -> (FeaturesSession, Vec<Effect>) {
        let mut state = session;
        let mut effects = Vec::new();
        for event in events {
            let step = state.step(event);
            state = step.state;
            effects.extend(step.effects);
        }
        (state, effects)
    }

    fn filled_cover_letter() -> Vec<FeaturesEvent> {
        vec![
            FeaturesEvent::CoverLetter(CoverLetterEvent::CompanyEntered("카카오".into())),
            FeaturesEvent::CoverLetter(CoverLetterEvent::PositionEntered("백엔드".into())),
            FeaturesEvent::CoverLetter(CoverLetterEvent::StyleChosen(Some(
                CoverLetterStyle::Professional,
            ))),
        ]
    }

    #[test]
    fn test_cover_letter_requires_all_inputs() {
        let (s, effects) = apply(
            FeaturesSession::for_resume(Some(id())),
            vec![
                FeaturesEvent::CoverLetter(CoverLetterEvent::CompanyEntered("카카오".into())),
                FeaturesEvent::CoverLetter(CoverLetterEvent::PositionEntered("  ".into())),
                FeaturesEvent::CoverLetter(CoverLetterEvent::StyleChosen(Some(
                    CoverLetterStyle::Creative,
                ))),
                FeaturesEvent::CoverLetter(CoverLetterEvent::Requested),
            ],
        );
        assert!(effects.is_empty());
        assert!(!s.cover_letter().can_submit());
    }

    #[test]
    fn test_cover_letter_success_invalidates_list() {
        let mut events = filled_cover_letter();
        events.push(FeaturesEvent::CoverLetter(CoverLetterEvent::Requested));
        let (s, effects) = apply(FeaturesSession::for_resume(Some(id())), events);

        assert_eq!(
            effects,
            vec![Effect::Request(ApiCall::GenerateCoverLetter(
                id(),
                CoverLetterRequest {
                    company: "카카오".into(),
                    position: "백엔드".into(),
                    style: CoverLetterStyle::Professional,
                }
            ))]
        );
        assert!(s.cover_letter().status().is_pending());

        let letter = CoverLetter {
            company: "카카오".into(),
            position: "백엔드".into(),
            style: "professional".into(),
            content: "안녕하세요".into(),
        };
        let (s, effects) = apply(
            s,
            vec![FeaturesEvent::CoverLetter(CoverLetterEvent::Succeeded(letter))],
        );
        assert_eq!(*s.cover_letter().status(), MutationStatus::Succeeded);
        assert!(effects.contains(&Effect::Invalidate(endpoints::cover_letters_key(id()))));
    }

    #[test]
    fn test_flows_do_not_affect_each_other() {
        let mut events = filled_cover_letter();
        events.push(FeaturesEvent::CoverLetter(CoverLetterEvent::Requested));
        events.push(FeaturesEvent::Interview(InterviewEvent::PositionEntered(
            "프론트엔드".into(),
        )));
        events.push(FeaturesEvent::Interview(InterviewEvent::Requested));
        let (s, effects) = apply(FeaturesSession::for_resume(Some(id())), events);
        assert_eq!(effects.len(), 2, "both requests issued independently");

        let (s, _) = apply(
            s,
            vec![FeaturesEvent::CoverLetter(CoverLetterEvent::Failed(
                "500: LLM timeout".into(),
            ))],
        );
        assert_eq!(s.cover_letter().status().error(), Some("500: LLM timeout"));
        assert!(s.interview().status().is_pending());

        let question = InterviewQuestion {
            question: "가장 어려웠던 장애 대응은?".into(),
            kind: QuestionKind::Experience,
            answer_points: vec!["상황".into(), "행동".into()],
        };
        let (s, effects) = apply(
            s,
            vec![FeaturesEvent::Interview(InterviewEvent::Succeeded(vec![question]))],
        );
        assert_eq!(*s.interview().status(), MutationStatus::Succeeded);
        assert!(s.cover_letter().status().error().is_some());
        assert!(effects.contains(&Effect::Invalidate(endpoints::interview_questions_key(id()))));
    }

    #[test]
    fn test_pending_flow_ignores_second_request() {
        let (s, _) = apply(
            FeaturesSession::for_resume(Some(id())),
            vec![
                FeaturesEvent::Interview(InterviewEvent::PositionEntered("데브옵스".into())),
                FeaturesEvent::Interview(InterviewEvent::Requested),
            ],
        );
        let (_, effects) = apply(s, vec![FeaturesEvent::Interview(InterviewEvent::Requested)]);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_without_resume_nothing_is_requested() {
        let (_, effects) = apply(
            FeaturesSession::for_resume(None),
            vec![
                FeaturesEvent::Interview(InterviewEvent::PositionEntered("백엔드".into())),
                FeaturesEvent::Interview(InterviewEvent::Requested),
            ],
        );
        assert!(effects.is_empty());
    }
}
