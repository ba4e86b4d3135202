// src/web/handlers/system_handlers.rs
use rocket::http::Status;
use rocket::response::content::RawHtml;
use rocket::serde::json::Json;
use rocket::State;
use tracing::info;

use crate::web::handlers::page_layout;
use crate::web::pages::{render, HomePage, Layout, NotFoundPage};
use crate::web::session_store::{PortalSession, SessionStore};
use crate::web::types::{HealthResponse, PortalState};

pub async fn home_handler(session: PortalSession) -> Result<RawHtml<String>, Status> {
    let layout = page_layout(session.handle(), None).await;
    render(&HomePage { layout })
}

pub async fn health_handler(
    store: &State<SessionStore>,
    state: &State<PortalState>,
) -> Json<HealthResponse> {
    let sessions = store.len().await;
    info!("Health check ({} active sessions)", sessions);
    Json(HealthResponse {
        status: "OK",
        sessions,
        backend: state.config.api_base_url.clone(),
    })
}

/// Unknown paths render the 404 page. Catchers have no session guard, so
/// pending notifications stay queued for the next page.
pub fn not_found_handler() -> Result<RawHtml<String>, Status> {
    render(&NotFoundPage {
        layout: Layout::new(Vec::new(), None),
    })
}
