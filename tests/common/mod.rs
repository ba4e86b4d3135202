#![allow(dead_code)]

use async_trait::async_trait;
use resume_portal::core::{PortalConfig, ResumeApi, UploadPayload};
use resume_portal::error::{PortalError, Result};
use resume_portal::types::{
    AnalysisResult, CompetitiveAnalysis, CoverLetter, CoverLetterRequest, InterviewQuestion,
    InterviewQuestionRequest, ParsedResumeData, Project, QuestionKind, RecommendedPosition,
    ResumeId, TechStackItem, UploadResponse,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

pub const RESUME_ID: u64 = 42;

/// In-process stand-in for the analysis backend
#[derive(Default)]
pub struct FakeApi {
    pub fail_upload: Option<String>,
    pub letters: Mutex<Vec<CoverLetter>>,
    pub questions: Mutex<Vec<InterviewQuestion>>,
    pub uploads: Mutex<Vec<UploadPayload>>,
    pub analyzed: AtomicUsize,
    pub analysis_reads: AtomicUsize,
}

impl FakeApi {
    pub fn failing_upload(message: &str) -> Self {
        Self {
            fail_upload: Some(message.to_string()),
            ..Self::default()
        }
    }

    pub fn analyzed(&self) -> usize {
        self.analyzed.load(Ordering::SeqCst)
    }
}

pub fn resume_id() -> ResumeId {
    ResumeId::new(RESUME_ID).unwrap()
}

pub fn parsed_resume() -> ParsedResumeData {
    ParsedResumeData {
        name: "홍길동".into(),
        email: "gildong@example.com".into(),
        phone: "010-1234-5678".into(),
        skills: vec!["Java".into(), "Spring".into()],
        experience: "3년".into(),
        education: vec![],
        projects: vec![Project {
            name: "주문 시스템".into(),
            description: "MSA 기반 주문 처리".into(),
            technologies: vec!["Kafka".into()],
        }],
    }
}

pub fn sample_analysis() -> AnalysisResult {
    AnalysisResult {
        overall_score: 85.0,
        tech_match: 78.5,
        experience: "3년".into(),
        recommended_positions: vec![RecommendedPosition {
            title: "백엔드 개발자".into(),
            match_percentage: 92.0,
            description: "Spring 기반 서버 개발".into(),
            salary_range: "4000-5000만원".into(),
        }],
        improvement_suggestions: vec![],
        skill_recommendations: vec![],
        competitive_analysis: CompetitiveAnalysis {
            tech_skills: "상위 20%".into(),
            career_competitiveness: "평균".into(),
            project_quality: "하위 30%".into(),
        },
        tech_stack_analysis: vec![TechStackItem {
            skill: "Java".into(),
            percentage: 90.0,
        }],
    }
}

#[async_trait]
impl ResumeApi for FakeApi {
    async fn upload_resume(&self, payload: &UploadPayload) -> Result<UploadResponse> {
        self.uploads.lock().unwrap().push(payload.clone());
        if let Some(message) = &self.fail_upload {
            return Err(PortalError::Request {
                status: 400,
                message: message.clone(),
            });
        }
        Ok(UploadResponse {
            resume_id: resume_id(),
            parsed_data: parsed_resume(),
        })
    }

    async fn analyze(&self, _id: ResumeId) -> Result<serde_json::Value> {
        self.analyzed.fetch_add(1, Ordering::SeqCst);
        Ok(serde_json::json!({ "success": true }))
    }

    async fn get_analysis(&self, id: ResumeId) -> Result<Option<AnalysisResult>> {
        self.analysis_reads.fetch_add(1, Ordering::SeqCst);
        if id == resume_id() && self.analyzed() > 0 {
            Ok(Some(sample_analysis()))
        } else {
            Ok(None)
        }
    }

    async fn list_cover_letters(&self, _id: ResumeId) -> Result<Vec<CoverLetter>> {
        Ok(self.letters.lock().unwrap().clone())
    }

    async fn generate_cover_letter(
        &self,
        _id: ResumeId,
        request: &CoverLetterRequest,
    ) -> Result<CoverLetter> {
        let letter = CoverLetter {
            company: request.company.clone(),
            position: request.position.clone(),
            style: request.style.value().to_string(),
            content: format!("{}에 지원하는 이유는 다음과 같습니다.", request.company),
        };
        self.letters.lock().unwrap().push(letter.clone());
        Ok(letter)
    }

    async fn get_interview_questions(&self, _id: ResumeId) -> Result<Vec<InterviewQuestion>> {
        Ok(self.questions.lock().unwrap().clone())
    }

    async fn generate_interview_questions(
        &self,
        _id: ResumeId,
        request: &InterviewQuestionRequest,
    ) -> Result<Vec<InterviewQuestion>> {
        let questions = vec![InterviewQuestion {
            question: format!("{} 직무에서 가장 어려웠던 장애 대응은?", request.position),
            kind: QuestionKind::Experience,
            answer_points: vec!["원인 분석".into(), "재발 방지".into()],
        }];
        *self.questions.lock().unwrap() = questions.clone();
        Ok(questions)
    }
}

pub fn test_config() -> PortalConfig {
    PortalConfig {
        secret_key: Some(
            "bWs4qRHwLFok5etsf0TJVeKvBZIDjuOhOuO6o9+kYvfkBPKNlnmE8PcIvYxgGrH65g0DOOMa47pAhyiK2VgTbw=="
                .to_string(),
        ),
        ..PortalConfig::default()
    }
}
