// src/core/resume_api.rs
//! The backend operations the portal depends on

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{
    AnalysisResult, CoverLetter, CoverLetterRequest, ExperienceLevel, InterviewQuestion,
    InterviewQuestionRequest, JobPosition, StagedFile, UploadResponse, ResumeId,
};

/// Multipart body of `POST /api/resumes/upload`
#[derive(Debug, Clone, PartialEq)]
pub struct UploadPayload {
    pub file: StagedFile,
    pub position: Option<JobPosition>,
    pub experience: Option<ExperienceLevel>,
    pub expected_salary: String,
}

impl UploadPayload {
    /// Text fields in the order the backend expects them; unset choices are sent empty
    pub fn text_fields(&self) -> [(&'static str, String); 3] {
        [
            (
                "selectedPosition",
                self.position.map(|p| p.value().to_string()).unwrap_or_default(),
            ),
            (
                "experienceYears",
                self.experience.map(|e| e.value().to_string()).unwrap_or_default(),
            ),
            ("expectedSalary", self.expected_salary.trim().to_string()),
        ]
    }
}

#[async_trait]
pub trait ResumeApi: Send + Sync {
    /// `POST /api/resumes/upload`
    async fn upload_resume(&self, payload: &UploadPayload) -> Result<UploadResponse>;

    /// `POST /api/resumes/{id}/analyze`; the payload is opaque to the portal
    async fn analyze(&self, id: ResumeId) -> Result<serde_json::Value>;

    /// `GET /api/resumes/{id}/analysis`; `None` when the backend has no analysis
    async fn get_analysis(&self, id: ResumeId) -> Result<Option<AnalysisResult>>;

    /// `GET /api/resumes/{id}/cover-letters`
    async fn list_cover_letters(&self, id: ResumeId) -> Result<Vec<CoverLetter>>;

    /// `POST /api/resumes/{id}/cover-letter`
    async fn generate_cover_letter(
        &self,
        id: ResumeId,
        request: &CoverLetterRequest,
    ) -> Result<CoverLetter>;

    /// `GET /api/resumes/{id}/interview-questions`
    async fn get_interview_questions(&self, id: ResumeId) -> Result<Vec<InterviewQuestion>>;

    /// `POST /api/resumes/{id}/interview-questions`
    async fn generate_interview_questions(
        &self,
        id: ResumeId,
        request: &InterviewQuestionRequest,
    ) -> Result<Vec<InterviewQuestion>>;
}
