use serde::{Deserialize, Serialize};

use crate::types::{AnalysisResult, InterviewQuestion, ParsedResumeData, ResumeId};

// ===== Backend Response Types =====

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub resume_id: ResumeId,
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub parsed_data: ParsedResumeData,
}

/// `GET /api/resumes/{id}/analysis`; a missing `analysis` means "not analysed yet"
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisEnvelope {
    #[serde(default)]
    pub analysis: Option<AnalysisResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewQuestionsResponse {
    #[serde(default, deserialize_with = "crate::types::null_as_default")]
    pub questions: Vec<InterviewQuestion>,
}

/// Error bodies the backend may send alongside a non-success status
#[derive(Debug, Deserialize)]
pub(crate) struct BackendErrorBody {
    pub message: Option<String>,
    pub error: Option<String>,
}
