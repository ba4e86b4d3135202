// src/session.rs
//! Per-user workflow state: the machines, the query cache and pending notifications

use serde::de::DeserializeOwned;
use serde::Serialize;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::{Mutex, MutexGuard};
use tracing::warn;

use crate::core::query_cache::{Lookup, QueryCache, QueryKey};
use crate::error::Result;
use crate::notification::Notification;
use crate::types::ResumeId;
use crate::workflow::{Effect, FeaturesSession, Machine, SessionEvent, UploadSession};

#[derive(Debug)]
pub struct Session {
    pub upload: UploadSession,
    pub features: FeaturesSession,
    pub cache: QueryCache,
    notifications: Vec<Notification>,
}

impl Session {
    pub fn new(cache: QueryCache) -> Self {
        Self {
            upload: UploadSession::default(),
            features: FeaturesSession::default(),
            cache,
            notifications: Vec::new(),
        }
    }

    /// Run one event through the matching machine
    pub fn apply(&mut self, event: SessionEvent) -> Vec<Effect> {
        match event {
            SessionEvent::Upload(event) => {
                let step = std::mem::take(&mut self.upload).step(event);
                self.upload = step.state;
                step.effects
            }
            SessionEvent::Features(event) => {
                let step = std::mem::take(&mut self.features).step(event);
                self.features = step.state;
                step.effects
            }
        }
    }

    /// Point the features workflow at `resume_id`, resetting its forms when it changes
    pub fn open_features(&mut self, resume_id: Option<ResumeId>) {
        if self.features.resume_id() != resume_id {
            self.features = FeaturesSession::for_resume(resume_id);
        }
    }

    pub fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }

    /// Hand over pending notifications; each is shown once
    pub fn take_notifications(&mut self) -> Vec<Notification> {
        std::mem::take(&mut self.notifications)
    }
}

/// Outcome of a cached read
#[derive(Debug, Clone, PartialEq)]
pub enum QueryState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

#[derive(Debug, Clone)]
pub struct SessionHandle(Arc<Mutex<Session>>);

impl SessionHandle {
    pub fn new(session: Session) -> Self {
        Self(Arc::new(Mutex::new(session)))
    }

    pub async fn lock(&self) -> MutexGuard<'_, Session> {
        self.0.lock().await
    }

    /// Read `key` through the session cache, calling `fetch` on a miss.
    /// The session lock is not held while `fetch` runs.
    pub async fn query<T, F, Fut>(&self, key: QueryKey, fetch: F) -> QueryState<T>
    where
        T: Serialize + DeserializeOwned,
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        let ticket = match self.lock().await.cache.begin::<T>(&key) {
            Lookup::Fresh(value) => return QueryState::Ready(value),
            Lookup::InFlight => return QueryState::Loading,
            Lookup::Miss(ticket) => ticket,
        };

        match fetch().await {
            Ok(value) => {
                self.lock().await.cache.complete(ticket, &value);
                QueryState::Ready(value)
            }
            Err(e) => {
                warn!("Fetching {} failed: {}", key, e);
                self.lock().await.cache.abandon(ticket);
                QueryState::Failed(e.to_string())
            }
        }
    }
}
