//! ResumeAI portal: résumé upload, AI analysis dashboard, cover letters and
//! interview preparation, served as HTML pages over a résumé-analysis backend.

pub mod cli;
pub mod core;
pub mod error;
pub mod navigation;
pub mod notification;
pub mod session;
pub mod types;
pub mod utils;
pub mod views;
pub mod web;
pub mod workflow;

pub use error::{PortalError, Result};
pub use web::{build_rocket, start_web_server};
