// src/views/upload.rs
//! Upload page model: progress, file summary, job context form, parsed preview

use serde::Serialize;

use crate::types::{ExperienceLevel, FileKind, JobPosition, ParsedResumeData, Project};
use crate::utils::format_megabytes;
use crate::workflow::UploadSession;

const PREVIEW_PROJECTS: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProgressStep {
    pub number: u8,
    pub title: &'static str,
    pub completed: bool,
    pub active: bool,
}

/// The three progress markers shown above the upload form
pub fn progress_steps(session: &UploadSession) -> Vec<ProgressStep> {
    let parsed = session.parsed_data().is_some();
    vec![
        ProgressStep {
            number: 1,
            title: "파일 업로드",
            completed: parsed,
            active: !parsed,
        },
        ProgressStep {
            number: 2,
            title: "직무 선택",
            completed: false,
            active: parsed,
        },
        ProgressStep {
            number: 3,
            title: "분석 결과",
            completed: false,
            active: false,
        },
    ]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileSummary {
    pub name: String,
    pub size: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResumePreview {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub experience: String,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
}

impl From<&ParsedResumeData> for ResumePreview {
    fn from(data: &ParsedResumeData) -> Self {
        Self {
            name: data.name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            experience: data.experience.clone(),
            skills: data.skills.clone(),
            projects: data.projects.iter().take(PREVIEW_PROJECTS).cloned().collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadView {
    pub steps: Vec<ProgressStep>,
    pub accept: String,
    pub max_size: String,
    pub file: Option<FileSummary>,
    pub is_uploading: bool,
    /// The upload button only exists while a file waits to be sent
    pub show_upload_button: bool,
    pub upload_disabled: bool,
    pub upload_label: &'static str,
    pub positions: Vec<ChoiceOption>,
    pub experiences: Vec<ChoiceOption>,
    pub expected_salary: String,
    pub preview: Option<ResumePreview>,
    pub is_analyzing: bool,
    /// No résumé id or position yet, or an analysis is pending
    pub analyze_disabled: bool,
    pub analyze_label: &'static str,
}

impl UploadView {
    pub fn build(session: &UploadSession, max_upload_bytes: u64) -> Self {
        let file = session.file().map(|file| FileSummary {
            name: file.file_name().to_string(),
            size: format_megabytes(file.size()),
        });

        let positions = JobPosition::ALL
            .iter()
            .map(|p| ChoiceOption {
                value: p.value(),
                label: p.label(),
                selected: session.position() == Some(*p),
            })
            .collect();

        let experiences = ExperienceLevel::ALL
            .iter()
            .map(|e| ChoiceOption {
                value: e.value(),
                label: e.label(),
                selected: session.experience() == Some(*e),
            })
            .collect();

        Self {
            steps: progress_steps(session),
            accept: FileKind::accept_list(),
            max_size: format_megabytes(max_upload_bytes),
            show_upload_button: file.is_some() && session.uploaded().is_none(),
            file,
            is_uploading: session.is_uploading(),
            upload_disabled: !session.can_upload(),
            upload_label: if session.is_uploading() {
                "분석 중..."
            } else {
                "파일 분석하기"
            },
            positions,
            experiences,
            expected_salary: session.expected_salary().to_string(),
            preview: session.parsed_data().map(ResumePreview::from),
            is_analyzing: session.is_analyzing(),
            analyze_disabled: !session.can_analyze(),
            analyze_label: if session.is_analyzing() {
                "분석 중..."
            } else {
                "AI 분석 시작하기"
            },
        }
    }
}
