// src/core/mod.rs
//! Core services: configuration, the backend client and the response cache

pub mod config_manager;
pub mod endpoints;
pub mod query_cache;
pub mod resume_api;
pub mod service_client;

pub use config_manager::{ConfigManager, ConfigOverrides, PortalConfig};
pub use query_cache::{QueryCache, QueryKey};
pub use resume_api::{ResumeApi, UploadPayload};
pub use service_client::ApiClient;
