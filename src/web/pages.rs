// src/web/pages.rs
//! Askama page templates

use askama::Template;
use rocket::http::Status;
use rocket::response::content::RawHtml;
use tracing::error;

use crate::navigation::Route;
use crate::notification::Notification;
use crate::types::ResumeId;
use crate::views::{FeaturesView, ListState, ResultsView, UploadView};

/// Data every page shares: navigation links and pending notifications
pub struct Layout {
    pub notifications: Vec<Notification>,
    pub results_link: Option<String>,
    pub features_link: String,
}

impl Layout {
    pub fn new(notifications: Vec<Notification>, resume_id: Option<ResumeId>) -> Self {
        Self {
            notifications,
            results_link: resume_id.map(|id| Route::Results(Some(id)).path()),
            features_link: Route::Features(resume_id).path(),
        }
    }
}

#[derive(Template)]
#[template(path = "home.html")]
pub struct HomePage {
    pub layout: Layout,
}

#[derive(Template)]
#[template(path = "upload.html")]
pub struct UploadPage {
    pub layout: Layout,
    pub view: UploadView,
}

#[derive(Template)]
#[template(path = "results.html")]
pub struct ResultsPage {
    pub layout: Layout,
    pub view: ResultsView,
}

#[derive(Template)]
#[template(path = "features.html")]
pub struct FeaturesPage {
    pub layout: Layout,
    pub view: FeaturesView,
}

#[derive(Template)]
#[template(path = "not_found.html")]
pub struct NotFoundPage {
    pub layout: Layout,
}

/// Render a page, logging template failures
pub fn render<T: Template>(page: &T) -> Result<RawHtml<String>, Status> {
    page.render().map(RawHtml).map_err(|e| {
        error!("Failed to render page: {}", e);
        Status::InternalServerError
    })
}
