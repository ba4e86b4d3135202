// src/views/mod.rs
//! Page models. Built from session state and query results, rendered by the
//! web templates and printed as JSON by the CLI.

pub mod features;
pub mod results;
pub mod upload;

pub use features::{FeaturesModel, FeaturesView, ListState};
pub use results::{CompetitiveStanding, MatchTier, ResultsModel, ResultsView};
pub use upload::UploadView;
