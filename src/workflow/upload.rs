// src/workflow/upload.rs
//! Upload workflow: file selection → upload → parsed preview → job context → analysis

use tracing::{debug, info};

use super::{ApiCall, Effect, Machine, Step};
use crate::core::endpoints;
use crate::core::resume_api::UploadPayload;
use crate::navigation::Route;
use crate::notification::Notification;
use crate::types::{
    ExperienceLevel, JobPosition, ParsedResumeData, ResumeId, StagedFile, UploadResponse,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadPhase {
    Idle,
    FileSelected,
    Uploaded,
    Analyzing,
}

/// Parsed data and identifier always travel together
#[derive(Debug, Clone, PartialEq)]
pub struct UploadedResume {
    pub resume_id: ResumeId,
    pub parsed: ParsedResumeData,
}

#[derive(Debug)]
pub enum UploadEvent {
    FileSelected(StagedFile),
    FileRemoved,
    PositionChosen(Option<JobPosition>),
    ExperienceChosen(Option<ExperienceLevel>),
    SalaryEntered(String),
    UploadRequested,
    UploadSucceeded { generation: u64, response: UploadResponse },
    UploadFailed { generation: u64, message: String },
    AnalyzeRequested,
    AnalyzeSucceeded(ResumeId),
    AnalyzeFailed { resume_id: ResumeId, message: String },
}

#[derive(Debug, Clone, Default)]
pub struct UploadSession {
    file: Option<StagedFile>,
    position: Option<JobPosition>,
    experience: Option<ExperienceLevel>,
    expected_salary: String,
    uploaded: Option<UploadedResume>,
    /// Bumped on every file change so late upload results can be recognised
    generation: u64,
    upload_in_flight: Option<u64>,
    analyze_in_flight: Option<ResumeId>,
}

impl UploadSession {
    pub fn phase(&self) -> UploadPhase {
        match (&self.uploaded, &self.file) {
            (Some(_), _) if self.analyze_in_flight.is_some() => UploadPhase::Analyzing,
            (Some(_), _) => UploadPhase::Uploaded,
            (None, Some(_)) => UploadPhase::FileSelected,
            (None, None) => UploadPhase::Idle,
        }
    }

    pub fn file(&self) -> Option<&StagedFile> {
        self.file.as_ref()
    }

    pub fn position(&self) -> Option<JobPosition> {
        self.position
    }

    pub fn experience(&self) -> Option<ExperienceLevel> {
        self.experience
    }

    pub fn expected_salary(&self) -> &str {
        &self.expected_salary
    }

    pub fn uploaded(&self) -> Option<&UploadedResume> {
        self.uploaded.as_ref()
    }

    pub fn resume_id(&self) -> Option<ResumeId> {
        self.uploaded.as_ref().map(|u| u.resume_id)
    }

    pub fn parsed_data(&self) -> Option<&ParsedResumeData> {
        self.uploaded.as_ref().map(|u| &u.parsed)
    }

    pub fn is_uploading(&self) -> bool {
        self.upload_in_flight.is_some()
    }

    pub fn is_analyzing(&self) -> bool {
        self.analyze_in_flight.is_some()
    }

    pub fn can_upload(&self) -> bool {
        self.file.is_some() && self.uploaded.is_none() && self.upload_in_flight.is_none()
    }

    pub fn can_analyze(&self) -> bool {
        self.uploaded.is_some() && self.position.is_some() && self.analyze_in_flight.is_none()
    }

    fn clear_upload(&mut self) {
        self.uploaded = None;
        self.generation += 1;
    }

    fn request_upload(mut self) -> Step<Self> {
        if !self.can_upload() {
            debug!("Upload ignored in phase {:?}", self.phase());
            return Step::stay(self);
        }
        let Some(file) = self.file.clone() else {
            return Step::stay(self);
        };

        let payload = UploadPayload {
            file,
            position: self.position,
            experience: self.experience,
            expected_salary: self.expected_salary.clone(),
        };
        let generation = self.generation;
        self.upload_in_flight = Some(generation);

        info!("Upload #{} requested", generation);
        Step::with(
            self,
            vec![Effect::Request(ApiCall::Upload {
                generation,
                payload,
            })],
        )
    }

    fn finish_upload(
        mut self,
        generation: u64,
        outcome: std::result::Result<UploadResponse, String>,
    ) -> Step<Self> {
        if self.upload_in_flight == Some(generation) {
            self.upload_in_flight = None;
        }

        if generation != self.generation || self.file.is_none() {
            debug!("Dropping result of superseded upload #{}", generation);
            return Step::stay(self);
        }

        match outcome {
            Ok(response) => {
                info!("Upload #{} stored as resume {}", generation, response.resume_id);
                self.uploaded = Some(UploadedResume {
                    resume_id: response.resume_id,
                    parsed: response.parsed_data,
                });
                Step::with(
                    self,
                    vec![Effect::Notify(Notification::success(
                        "업로드 완료",
                        "이력서가 성공적으로 분석되었습니다.",
                    ))],
                )
            }
            Err(message) => Step::with(
                self,
                vec![Effect::Notify(Notification::error("업로드 실패", message))],
            ),
        }
    }

    fn request_analysis(mut self) -> Step<Self> {
        if !self.can_analyze() {
            debug!("Analyze ignored in phase {:?}", self.phase());
            return Step::stay(self);
        }
        let Some(resume_id) = self.resume_id() else {
            return Step::stay(self);
        };

        self.analyze_in_flight = Some(resume_id);
        info!("Analysis requested for resume {}", resume_id);
        Step::with(self, vec![Effect::Request(ApiCall::Analyze(resume_id))])
    }

    fn finish_analysis(
        mut self,
        resume_id: ResumeId,
        outcome: std::result::Result<(), String>,
    ) -> Step<Self> {
        if self.analyze_in_flight == Some(resume_id) {
            self.analyze_in_flight = None;
        }

        match outcome {
            Ok(()) => Step::with(
                self,
                vec![
                    Effect::Notify(Notification::success(
                        "분석 완료",
                        "이력서 분석이 완료되었습니다.",
                    )),
                    Effect::Invalidate(endpoints::analysis_key(resume_id)),
                    Effect::Navigate(Route::Results(Some(resume_id))),
                ],
            ),
            Err(message) => Step::with(
                self,
                vec![Effect::Notify(Notification::error("분석 실패", message))],
            ),
        }
    }
}

impl Machine for UploadSession {
    type Event = UploadEvent;

    fn step(mut self, event: UploadEvent) -> Step<Self> {
        match event {
            UploadEvent::FileSelected(file) => {
                debug!("File selected: {:?}", file);
                self.file = Some(file);
                self.clear_upload();
                Step::stay(self)
            }
            UploadEvent::FileRemoved => {
                self.file = None;
                self.clear_upload();
                Step::stay(self)
            }
            UploadEvent::PositionChosen(position) => {
                self.position = position;
                Step::stay(self)
            }
            UploadEvent::ExperienceChosen(experience) => {
                self.experience = experience;
                Step::stay(self)
            }
            UploadEvent::SalaryEntered(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() || trimmed.parse::<u32>().is_ok() {
                    self.expected_salary = trimmed.to_string();
                    Step::stay(self)
                } else {
                    Step::with(
                        self,
                        vec![Effect::Notify(Notification::error(
                            "입력 오류",
                            "희망 연봉은 숫자로 입력해주세요.",
                        ))],
                    )
                }
            }
            UploadEvent::UploadRequested => self.request_upload(),
            UploadEvent::UploadSucceeded {
                generation,
                response,
            } => self.finish_upload(generation, Ok(response)),
            UploadEvent::UploadFailed {
                generation,
                message,
            } => self.finish_upload(generation, Err(message)),
            UploadEvent::AnalyzeRequested => self.request_analysis(),
            UploadEvent::AnalyzeSucceeded(resume_id) => self.finish_analysis(resume_id, Ok(())),
            UploadEvent::AnalyzeFailed { resume_id, message } => {
                self.finish_analysis(resume_id, Err(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::notification::NotificationLevel;

    fn pdf(name: &str) -> StagedFile {
        StagedFile::new(name, None, vec![b'%'; 2 * 1024 * 1024], 10 * 1024 * 1024).unwrap()
    }

    fn id(raw: u64) -> ResumeId {
        ResumeId::new(raw).unwrap()
    }

    fn response(raw_id: u64, skills: &[&str]) -> UploadResponse {
        UploadResponse {
            resume_id: id(raw_id),
            parsed_data: ParsedResumeData {
                name: "홍길동".to_string(),
                email: "hong@example.com".to_string(),
                phone: "010-0000-0000".to_string(),
                skills: skills.iter().map(|s| s.to_string()).collect(),
                experience: "3년".to_string(),
                education: vec![],
                projects: vec![],
            },
        }
    }

    fn run(state: UploadSession, event: UploadEvent) -> (UploadSession, Vec<Effect>) {
        let step = state.step(event);
        (step.state, step.effects)
    }

    fn upload_generation(effects: &[Effect]) -> u64 {
        match effects {
            [Effect::Request(ApiCall::Upload { generation, .. })] => *generation,
            other => panic!("unexpected effects {:?}", other),
        }
    }

    /// Drives a session to `Uploaded` with the given resume id
    fn uploaded(position: Option<JobPosition>, raw_id: u64) -> UploadSession {
        let (s, _) = run(UploadSession::default(), UploadEvent::PositionChosen(position));
        let (s, _) = run(s, UploadEvent::FileSelected(pdf("cv.pdf")));
        let (s, effects) = run(s, UploadEvent::UploadRequested);
        let generation = upload_generation(&effects);
        let (s, _) = run(
            s,
            UploadEvent::UploadSucceeded {
                generation,
                response: response(raw_id, &["Java", "Spring"]),
            },
        );
        s
    }

    #[test]
    fn test_select_then_upload_issues_one_request_with_form_fields() {
        let (s, _) = run(
            UploadSession::default(),
            UploadEvent::PositionChosen(Some(JobPosition::Backend)),
        );
        let (s, _) = run(s, UploadEvent::ExperienceChosen(Some(ExperienceLevel::ThreeYears)));
        let (s, _) = run(s, UploadEvent::SalaryEntered("4000".to_string()));
        let (s, _) = run(s, UploadEvent::FileSelected(pdf("cv.pdf")));
        assert_eq!(s.phase(), UploadPhase::FileSelected);

        let (s, effects) = run(s, UploadEvent::UploadRequested);
        assert_eq!(effects.len(), 1);
        match &effects[0] {
            Effect::Request(ApiCall::Upload { payload, .. }) => {
                assert_eq!(payload.file.file_name(), "cv.pdf");
                assert_eq!(payload.position, Some(JobPosition::Backend));
                assert_eq!(payload.experience, Some(ExperienceLevel::ThreeYears));
                assert_eq!(payload.expected_salary, "4000");
            }
            other => panic!("unexpected effect {:?}", other),
        }
        assert!(s.is_uploading());

        // Second trigger while pending is a no-op
        let (_, effects) = run(s, UploadEvent::UploadRequested);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_upload_success_sets_id_and_data_together() {
        let s = uploaded(Some(JobPosition::Backend), 42);
        assert_eq!(s.phase(), UploadPhase::Uploaded);
        assert_eq!(s.resume_id(), Some(id(42)));
        assert_eq!(s.parsed_data().unwrap().skills, vec!["Java", "Spring"]);
        assert!(s.can_analyze());
        assert!(!s.can_upload());
    }

    #[test]
    fn test_analyze_disabled_without_position() {
        let s = uploaded(None, 42);
        assert_eq!(s.phase(), UploadPhase::Uploaded);
        assert!(!s.can_analyze());

        let (s, effects) = run(s, UploadEvent::AnalyzeRequested);
        assert!(effects.is_empty());
        assert!(!s.is_analyzing());
    }

    #[test]
    fn test_analyze_is_noop_without_resume_id() {
        let (s, _) = run(
            UploadSession::default(),
            UploadEvent::PositionChosen(Some(JobPosition::Data)),
        );
        let (s, _) = run(s, UploadEvent::FileSelected(pdf("cv.pdf")));
        let (_, effects) = run(s, UploadEvent::AnalyzeRequested);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_upload_failure_stays_selected_and_is_retryable() {
        let (s, _) = run(UploadSession::default(), UploadEvent::FileSelected(pdf("cv.pdf")));
        let (s, effects) = run(s, UploadEvent::UploadRequested);
        let generation = upload_generation(&effects);
        let (s, effects) = run(
            s,
            UploadEvent::UploadFailed {
                generation,
                message: "500: parser crashed".to_string(),
            },
        );
        assert_eq!(s.phase(), UploadPhase::FileSelected);
        match &effects[..] {
            [Effect::Notify(n)] => {
                assert_eq!(n.level, NotificationLevel::Error);
                assert_eq!(n.description, "500: parser crashed");
            }
            other => panic!("unexpected effects {:?}", other),
        }

        let (_, effects) = run(s, UploadEvent::UploadRequested);
        assert!(matches!(
            &effects[..],
            [Effect::Request(ApiCall::Upload { .. })]
        ));
    }

    #[test]
    fn test_remove_file_always_returns_to_idle() {
        let states = vec![
            UploadSession::default(),
            run(UploadSession::default(), UploadEvent::FileSelected(pdf("a.pdf"))).0,
            uploaded(Some(JobPosition::Frontend), 5),
        ];
        for state in states {
            let (s, _) = run(state, UploadEvent::FileRemoved);
            assert_eq!(s.phase(), UploadPhase::Idle);
            assert!(s.file().is_none());
            assert!(s.resume_id().is_none());
            assert!(s.parsed_data().is_none());
        }
    }

    #[test]
    fn test_new_file_invalidates_previous_upload() {
        let s = uploaded(Some(JobPosition::Backend), 42);
        let (s, _) = run(s, UploadEvent::FileSelected(pdf("other.pdf")));
        assert_eq!(s.phase(), UploadPhase::FileSelected);
        assert!(s.resume_id().is_none());
        assert!(s.parsed_data().is_none());
        assert!(s.can_upload());
    }

    #[test]
    fn test_late_upload_result_for_replaced_file_is_dropped() {
        let (s, _) = run(UploadSession::default(), UploadEvent::FileSelected(pdf("a.pdf")));
        let (s, effects) = run(s, UploadEvent::UploadRequested);
        let generation = upload_generation(&effects);
        let (s, _) = run(s, UploadEvent::FileSelected(pdf("b.pdf")));
        assert!(!s.can_upload(), "old upload still in flight");

        let (s, effects) = run(
            s,
            UploadEvent::UploadSucceeded {
                generation,
                response: response(9, &[]),
            },
        );
        assert!(effects.is_empty());
        assert!(s.resume_id().is_none());
        assert!(s.can_upload());
    }

    #[test]
    fn test_analyze_success_navigates_to_results() {
        let s = uploaded(Some(JobPosition::Backend), 42);
        let (s, effects) = run(s, UploadEvent::AnalyzeRequested);
        assert_eq!(effects, vec![Effect::Request(ApiCall::Analyze(id(42)))]);
        assert_eq!(s.phase(), UploadPhase::Analyzing);

        let (_, repeat) = run(s.clone(), UploadEvent::AnalyzeRequested);
        assert!(repeat.is_empty());

        let (s, effects) = run(s, UploadEvent::AnalyzeSucceeded(id(42)));
        assert_eq!(s.phase(), UploadPhase::Uploaded);
        assert!(effects.contains(&Effect::Navigate(Route::Results(Some(id(42))))));
        assert!(effects.contains(&Effect::Invalidate(endpoints::analysis_key(id(42)))));
    }

    #[test]
    fn test_analyze_failure_stays_uploaded() {
        let s = uploaded(Some(JobPosition::Backend), 42);
        let (s, _) = run(s, UploadEvent::AnalyzeRequested);
        let (s, effects) = run(
            s,
            UploadEvent::AnalyzeFailed {
                resume_id: id(42),
                message: "503: busy".to_string(),
            },
        );
        assert_eq!(s.phase(), UploadPhase::Uploaded);
        assert!(s.can_analyze());
        assert!(matches!(&effects[..], [Effect::Notify(n)] if n.is_error()));
    }

    #[test]
    fn test_non_numeric_salary_is_rejected() {
        let (s, _) = run(UploadSession::default(), UploadEvent::SalaryEntered("4000".into()));
        let (s, effects) = run(s, UploadEvent::SalaryEntered("많이".into()));
        assert_eq!(s.expected_salary(), "4000");
        assert!(matches!(&effects[..], [Effect::Notify(n)] if n.is_error()));
    }
}
