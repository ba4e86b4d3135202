// src/core/endpoints.rs
//! Backend endpoint paths. Read paths double as query-cache keys.

use crate::core::query_cache::QueryKey;
use crate::types::ResumeId;

pub const UPLOAD_ENDPOINT: &str = "/api/resumes/upload";

pub fn analyze(id: ResumeId) -> String {
    format!("/api/resumes/{}/analyze", id)
}

pub fn analysis(id: ResumeId) -> String {
    format!("/api/resumes/{}/analysis", id)
}

pub fn cover_letters(id: ResumeId) -> String {
    format!("/api/resumes/{}/cover-letters", id)
}

pub fn cover_letter(id: ResumeId) -> String {
    format!("/api/resumes/{}/cover-letter", id)
}

pub fn interview_questions(id: ResumeId) -> String {
    format!("/api/resumes/{}/interview-questions", id)
}

pub fn analysis_key(id: ResumeId) -> QueryKey {
    QueryKey::new(analysis(id))
}

pub fn cover_letters_key(id: ResumeId) -> QueryKey {
    QueryKey::new(cover_letters(id))
}

pub fn interview_questions_key(id: ResumeId) -> QueryKey {
    QueryKey::new(interview_questions(id))
}
