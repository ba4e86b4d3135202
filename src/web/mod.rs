// src/web/mod.rs

pub mod handlers;
pub mod pages;
pub mod session_store;
pub mod types;

pub use session_store::{PortalSession, SessionStore, SESSION_COOKIE};
pub use types::*;

use anyhow::Result;
use rocket::data::{Data, Limits, ToByteUnit};
use rocket::fairing::{Fairing, Info, Kind};
use rocket::form::{Errors, Form};
use rocket::http::{Header, Status};
use rocket::response::content::RawHtml;
use rocket::response::Redirect;
use rocket::serde::json::Json;
use rocket::{catchers, get, post, routes, Build, Request, Response, Rocket, State};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info, warn};

use crate::core::config_manager::PortalConfig;
use crate::core::resume_api::ResumeApi;
use crate::core::service_client::ApiClient;
use crate::navigation::Route;

/// Room for the job-context fields and multipart framing around the file
const FORM_OVERHEAD_BYTES: u64 = 64 * 1024;

struct RequestStart(Instant);

/// Logs one line per request with status and latency, and keeps
/// session-specific pages out of shared caches
pub struct RequestTrace;

#[rocket::async_trait]
impl Fairing for RequestTrace {
    fn info(&self) -> Info {
        Info {
            name: "Request tracing",
            kind: Kind::Request | Kind::Response,
        }
    }

    async fn on_request(&self, request: &mut Request<'_>, _: &mut Data<'_>) {
        request.local_cache(|| RequestStart(Instant::now()));
    }

    async fn on_response<'r>(&self, request: &'r Request<'_>, response: &mut Response<'r>) {
        let started = request.local_cache(|| RequestStart(Instant::now()));
        info!(
            method = %request.method(),
            uri = %request.uri(),
            status = response.status().code,
            elapsed_ms = started.0.elapsed().as_millis() as u64,
            "Handled request"
        );
        response.set_header(Header::new("Cache-Control", "no-store"));
    }
}

// Pages

#[get("/")]
pub async fn home(session: PortalSession) -> Result<RawHtml<String>, Status> {
    handlers::home_handler(session).await
}

#[get("/upload")]
pub async fn upload_page(
    session: PortalSession,
    state: &State<PortalState>,
) -> Result<RawHtml<String>, Status> {
    handlers::upload_page_handler(session, state).await
}

#[get("/results/<_>")]
pub async fn results(
    route: Route,
    session: PortalSession,
    state: &State<PortalState>,
) -> Result<RawHtml<String>, Status> {
    handlers::results_handler(route, session, state).await
}

#[get("/features")]
pub async fn features_current(
    route: Route,
    session: PortalSession,
    state: &State<PortalState>,
) -> Result<RawHtml<String>, Status> {
    handlers::features_page_handler(route, session, state).await
}

#[get("/features/<_>")]
pub async fn features(
    route: Route,
    session: PortalSession,
    state: &State<PortalState>,
) -> Result<RawHtml<String>, Status> {
    handlers::features_page_handler(route, session, state).await
}

// Upload workflow actions

#[post("/upload/file", data = "<upload>")]
pub async fn select_file(
    upload: std::result::Result<Form<ResumeFileForm<'_>>, Errors<'_>>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    handlers::select_file_handler(upload, session, state).await
}

#[post("/upload/remove")]
pub async fn remove_file(session: PortalSession, state: &State<PortalState>) -> Redirect {
    handlers::remove_file_handler(session, state).await
}

#[post("/upload/details", data = "<form>")]
pub async fn job_context(
    form: Form<JobContextForm>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    handlers::job_context_handler(form, session, state).await
}

#[post("/upload/submit", data = "<form>")]
pub async fn submit_upload(
    form: Form<JobContextForm>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    handlers::submit_upload_handler(form, session, state).await
}

#[post("/upload/analyze", data = "<form>")]
pub async fn analyze(
    form: Form<JobContextForm>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    handlers::analyze_handler(form, session, state).await
}

// Feature generators

#[post("/features/<id>/cover-letter", data = "<form>")]
pub async fn generate_cover_letter(
    id: &str,
    form: Form<CoverLetterForm>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    handlers::cover_letter_handler(id, form, session, state).await
}

#[post("/features/<id>/interview-questions", data = "<form>")]
pub async fn generate_interview_questions(
    id: &str,
    form: Form<InterviewForm>,
    session: PortalSession,
    state: &State<PortalState>,
) -> Redirect {
    handlers::interview_questions_handler(id, form, session, state).await
}

#[get("/features/<id>/cover-letters/<index>/download")]
pub async fn download_cover_letter(
    id: &str,
    index: usize,
    session: PortalSession,
    state: &State<PortalState>,
) -> Result<TextDownload, Status> {
    handlers::download_cover_letter_handler(id, index, session, state).await
}

#[get("/health")]
pub async fn health(
    store: &State<SessionStore>,
    state: &State<PortalState>,
) -> Json<HealthResponse> {
    handlers::health_handler(store, state).await
}

// Error catchers

#[rocket::catch(404)]
pub fn not_found() -> Result<RawHtml<String>, Status> {
    handlers::not_found_handler()
}

#[rocket::catch(500)]
pub fn internal_error() -> RawHtml<&'static str> {
    RawHtml(
        "<!DOCTYPE html><html lang=\"ko\"><meta charset=\"utf-8\"><title>ResumeAI</title>\
         <body><h1>일시적인 오류가 발생했습니다</h1><p>잠시 후 다시 시도해주세요.</p>\
         <a href=\"/\">홈으로</a></body></html>",
    )
}

/// Assemble the portal around an existing backend client
pub fn build_rocket(config: PortalConfig, api: Arc<dyn ResumeApi>) -> Rocket<Build> {
    let upload_limit = config.max_upload_bytes.saturating_mul(2);
    let limits = Limits::default()
        .limit("file", upload_limit.bytes())
        .limit("data-form", upload_limit.saturating_add(FORM_OVERHEAD_BYTES).bytes());

    let mut figment = rocket::Config::figment()
        .merge(("port", config.port))
        .merge(("limits", limits));
    match &config.secret_key {
        Some(secret) => figment = figment.merge(("secret_key", secret.as_str())),
        None => warn!("No secret_key configured; session cookies will not survive a restart"),
    }

    let sessions = SessionStore::new(config.session_idle_timeout(), config.cache_stale_after());

    rocket::custom(figment)
        .attach(RequestTrace)
        .manage(sessions)
        .manage(PortalState { api, config })
        .register("/", catchers![not_found, internal_error])
        .mount(
            "/",
            routes![
                home,
                upload_page,
                results,
                features_current,
                features,
                select_file,
                remove_file,
                job_context,
                submit_upload,
                analyze,
                generate_cover_letter,
                generate_interview_questions,
                download_cover_letter,
                health,
            ],
        )
}

// Main server start function
pub async fn start_web_server(config: PortalConfig) -> Result<()> {
    let client = ApiClient::new(&config.api_base_url, config.request_timeout())?;

    info!("Starting ResumeAI portal on port {}", config.port);
    info!("Backend API: {}", client.base_url());
    info!(
        "Upload limit: {} bytes, session idle timeout: {} min",
        config.max_upload_bytes, config.session_idle_minutes
    );

    build_rocket(config, Arc::new(client))
        .launch()
        .await
        .map_err(|e| anyhow::anyhow!("Portal server failed: {}", e))?;

    Ok(())
}
