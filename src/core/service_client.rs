// src/core/service_client.rs
//! HTTP client for the résumé-analysis backend

use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::core::endpoints;
use crate::core::resume_api::{ResumeApi, UploadPayload};
use crate::error::{PortalError, Result};
use crate::types::response::BackendErrorBody;
use crate::types::{
    AnalysisEnvelope, AnalysisResult, CoverLetter, CoverLetterRequest, InterviewQuestion,
    InterviewQuestionRequest, InterviewQuestionsResponse, ResumeId, UploadResponse,
};
use crate::utils::normalize_base_url;

pub struct ApiClient {
    client: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Create new API client; `timeout` applies to every request
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                PortalError::Configuration(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self {
            client,
            base_url: normalize_base_url(base_url),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str) -> String {
        format!("{}{}", self.base_url, endpoint)
    }

    /// Generic GET request
    async fn get<R>(&self, endpoint: &str) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!("GET {}", url);

        let response = self.client.get(&url).send().await?;
        Self::parse(response).await
    }

    /// Generic POST request with JSON
    async fn post_json<T, R>(&self, endpoint: &str, payload: &T) -> Result<R>
    where
        T: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let url = self.url(endpoint);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(payload).send().await?;
        Self::parse(response).await
    }

    /// Turn a response into `R`, or into a `PortalError::Request` carrying the backend message
    async fn parse<R: DeserializeOwned>(response: Response) -> Result<R> {
        let status = response.status();
        let body = response.text().await?;

        if status.is_success() {
            // Endpoints with no body still have to decode into `Value`
            let body = if body.trim().is_empty() { "null" } else { body.as_str() };
            Ok(serde_json::from_str(body)?)
        } else {
            let message = error_message(status, &body);
            error!("Backend returned {}: {}", status, message);
            Err(PortalError::Request {
                status: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl ResumeApi for ApiClient {
    async fn upload_resume(&self, payload: &UploadPayload) -> Result<UploadResponse> {
        let url = self.url(endpoints::UPLOAD_ENDPOINT);
        let file = &payload.file;

        let mut form = Form::new().part(
            "resume",
            Part::bytes(file.data().to_vec())
                .file_name(file.file_name().to_string())
                .mime_str(file.kind().mime())?,
        );
        for (name, value) in payload.text_fields() {
            form = form.text(name, value);
        }

        info!(
            "Uploading {} ({} bytes) to {}",
            file.file_name(),
            file.size(),
            url
        );

        let response = self.client.post(&url).multipart(form).send().await?;
        Self::parse(response).await
    }

    async fn analyze(&self, id: ResumeId) -> Result<serde_json::Value> {
        info!("Requesting analysis for resume {}", id);
        let url = self.url(&endpoints::analyze(id));
        let response = self.client.post(&url).send().await?;
        Self::parse(response).await
    }

    async fn get_analysis(&self, id: ResumeId) -> Result<Option<AnalysisResult>> {
        match self.get::<AnalysisEnvelope>(&endpoints::analysis(id)).await {
            Ok(envelope) => Ok(envelope.analysis),
            Err(PortalError::Request { status: 404, .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }

    async fn list_cover_letters(&self, id: ResumeId) -> Result<Vec<CoverLetter>> {
        let letters: Option<Vec<CoverLetter>> = self.get(&endpoints::cover_letters(id)).await?;
        Ok(letters.unwrap_or_default())
    }

    async fn generate_cover_letter(
        &self,
        id: ResumeId,
        request: &CoverLetterRequest,
    ) -> Result<CoverLetter> {
        info!(
            "Generating cover letter for resume {} ({} / {})",
            id, request.company, request.position
        );
        self.post_json(&endpoints::cover_letter(id), request).await
    }

    async fn get_interview_questions(&self, id: ResumeId) -> Result<Vec<InterviewQuestion>> {
        let response: Option<InterviewQuestionsResponse> =
            self.get(&endpoints::interview_questions(id)).await?;
        Ok(response.map(|r| r.questions).unwrap_or_default())
    }

    async fn generate_interview_questions(
        &self,
        id: ResumeId,
        request: &InterviewQuestionRequest,
    ) -> Result<Vec<InterviewQuestion>> {
        info!(
            "Generating interview questions for resume {} ({})",
            id, request.position
        );
        let response: InterviewQuestionsResponse = self
            .post_json(&endpoints::interview_questions(id), request)
            .await?;
        Ok(response.questions)
    }
}

/// Best human-readable message for a failed response
pub(crate) fn error_message(status: StatusCode, body: &str) -> String {
    let body = body.trim();

    if let Ok(parsed) = serde_json::from_str::<BackendErrorBody>(body) {
        if let Some(message) = parsed.message.or(parsed.error) {
            if !message.trim().is_empty() {
                return message;
            }
        }
    }

    if !body.is_empty() {
        return body.to_string();
    }

    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}
