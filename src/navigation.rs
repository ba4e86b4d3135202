// src/navigation.rs
//! Client-facing page routes

use serde::Serialize;
use std::fmt;

use crate::types::ResumeId;

/// One of the portal pages.
///
/// `Results(None)` and `Features(None)` are valid routes: the pages render
/// their "no résumé" state instead of a 404.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Route {
    Home,
    Upload,
    Results(Option<ResumeId>),
    Features(Option<ResumeId>),
    NotFound,
}

impl Route {
    pub fn parse(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or("");
        let segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();

        match segments.as_slice() {
            [] => Route::Home,
            ["upload"] => Route::Upload,
            ["results", id] => Route::Results(id.parse().ok()),
            ["features"] => Route::Features(None),
            ["features", id] => Route::Features(id.parse().ok()),
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> String {
        match self {
            Route::Home => "/".to_string(),
            Route::Upload => "/upload".to_string(),
            Route::Results(Some(id)) => format!("/results/{}", id),
            Route::Results(None) => "/results/0".to_string(),
            Route::Features(Some(id)) => format!("/features/{}", id),
            Route::Features(None) => "/features".to_string(),
            Route::NotFound => "/404".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}
