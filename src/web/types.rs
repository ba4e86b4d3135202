// src/web/types.rs

use rocket::form::FromForm;
use rocket::fs::TempFile;
use rocket::http::ContentType;
use rocket::request::{FromRequest, Outcome};
use rocket::response::{self, Responder};
use rocket::serde::Serialize;
use rocket::{Request, Response};
use std::str::FromStr;
use std::sync::Arc;
use tracing::warn;

use crate::core::config_manager::PortalConfig;
use crate::core::resume_api::ResumeApi;
use crate::navigation::Route;

/// Shared state managed by Rocket
pub struct PortalState {
    pub api: Arc<dyn ResumeApi>,
    pub config: PortalConfig,
}

#[derive(Serialize)]
#[serde(crate = "rocket::serde")]
pub struct HealthResponse {
    pub status: &'static str,
    pub sessions: usize,
    pub backend: String,
}

/// Plain-text attachment, used for downloading generated cover letters
pub struct TextDownload {
    pub body: String,
    pub filename: String,
}

impl TextDownload {
    pub fn new(body: String, filename: String) -> Self {
        Self { body, filename }
    }
}

impl<'r> Responder<'r, 'static> for TextDownload {
    fn respond_to(self, _: &'r Request<'_>) -> response::Result<'static> {
        let bytes = self.body.into_bytes();
        Response::build()
            .header(ContentType::Plain)
            .raw_header(
                "Content-Disposition",
                format!("attachment; filename=\"{}\"", self.filename),
            )
            .sized_body(bytes.len(), std::io::Cursor::new(bytes))
            .ok()
    }
}

/// The page a request addresses, with its résumé id already validated
#[rocket::async_trait]
impl<'r> FromRequest<'r> for Route {
    type Error = std::convert::Infallible;

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        Outcome::Success(Route::parse(req.uri().path().as_str()))
    }
}

#[derive(FromForm)]
pub struct ResumeFileForm<'f> {
    pub resume: TempFile<'f>,
}

/// Job context fields shared by the details, upload and analyze actions
#[derive(Debug, FromForm)]
pub struct JobContextForm {
    #[field(default = String::new())]
    pub position: String,
    #[field(default = String::new())]
    pub experience: String,
    #[field(default = String::new())]
    pub expected_salary: String,
}

#[derive(Debug, FromForm)]
pub struct CoverLetterForm {
    #[field(default = String::new())]
    pub company: String,
    #[field(default = String::new())]
    pub position: String,
    #[field(default = String::new())]
    pub style: String,
}

#[derive(Debug, FromForm)]
pub struct InterviewForm {
    #[field(default = String::new())]
    pub position: String,
}

/// Empty select values mean "nothing chosen"; unknown values are ignored
pub fn parse_choice<T: FromStr>(raw: &str) -> Option<T>
where
    T::Err: std::fmt::Display,
{
    let raw = raw.trim();
    if raw.is_empty() {
        return None;
    }
    match raw.parse() {
        Ok(choice) => Some(choice),
        Err(e) => {
            warn!("Ignoring form value: {}", e);
            None
        }
    }
}
