// src/web/session_store.rs
//! Browser sessions: one workflow session per private cookie

use rocket::http::{Cookie, SameSite};
use rocket::request::{FromRequest, Outcome};
use rocket::{Request, State};
use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info};
use uuid::Uuid;

use crate::core::query_cache::QueryCache;
use crate::session::{Session, SessionHandle};

pub const SESSION_COOKIE: &str = "resumeai_session";

struct Entry {
    handle: SessionHandle,
    last_seen: Instant,
}

pub struct SessionStore {
    sessions: Mutex<HashMap<String, Entry>>,
    idle_timeout: Duration,
    stale_after: Option<Duration>,
}

impl SessionStore {
    pub fn new(idle_timeout: Duration, stale_after: Option<Duration>) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            idle_timeout,
            stale_after,
        }
    }

    /// Session for `id`, or a fresh one when the id is unknown or expired.
    /// Returns the id actually in use.
    pub async fn resolve(&self, id: Option<&str>) -> (String, SessionHandle) {
        let mut sessions = self.sessions.lock().await;
        self.prune(&mut sessions);

        if let Some(id) = id {
            if let Some(entry) = sessions.get_mut(id) {
                entry.last_seen = Instant::now();
                return (id.to_string(), entry.handle.clone());
            }
        }

        let id = Uuid::new_v4().to_string();
        let handle = SessionHandle::new(Session::new(QueryCache::with_stale_after(
            self.stale_after,
        )));
        sessions.insert(
            id.clone(),
            Entry {
                handle: handle.clone(),
                last_seen: Instant::now(),
            },
        );
        info!("Created session {} ({} active)", id, sessions.len());
        (id, handle)
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }

    fn prune(&self, sessions: &mut HashMap<String, Entry>) {
        let before = sessions.len();
        sessions.retain(|_, entry| entry.last_seen.elapsed() < self.idle_timeout);
        let pruned = before - sessions.len();
        if pruned > 0 {
            debug!("Pruned {} idle sessions", pruned);
        }
    }
}

/// Request guard handing the caller's workflow session to a handler
pub struct PortalSession(pub SessionHandle);

#[rocket::async_trait]
impl<'r> FromRequest<'r> for PortalSession {
    type Error = ();

    async fn from_request(req: &'r Request<'_>) -> Outcome<Self, Self::Error> {
        let store = match req.guard::<&State<SessionStore>>().await {
            Outcome::Success(store) => store,
            Outcome::Error((status, _)) => return Outcome::Error((status, ())),
            Outcome::Forward(f) => return Outcome::Forward(f),
        };

        let cookies = req.cookies();
        let current = cookies
            .get_private(SESSION_COOKIE)
            .map(|cookie| cookie.value().to_string());

        let (id, handle) = store.resolve(current.as_deref()).await;
        if current.as_deref() != Some(id.as_str()) {
            cookies.add_private(
                Cookie::build((SESSION_COOKIE, id))
                    .path("/")
                    .http_only(true)
                    .same_site(SameSite::Lax),
            );
        }

        Outcome::Success(PortalSession(handle))
    }
}

impl PortalSession {
    pub fn handle(&self) -> &SessionHandle {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_known_id_returns_same_session() {
        let store = SessionStore::new(Duration::from_secs(60), None);
        let (id, _) = store.resolve(None).await;

        let (again, _) = store.resolve(Some(&id)).await;
        assert_eq!(again, id);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_unknown_id_gets_new_session() {
        let store = SessionStore::new(Duration::from_secs(60), None);
        let (id, _) = store.resolve(Some("forged")).await;
        assert_ne!(id, "forged");
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_idle_sessions_are_pruned() {
        let store = SessionStore::new(Duration::from_millis(10), None);
        let (old, _) = store.resolve(None).await;
        tokio::time::sleep(Duration::from_millis(30)).await;

        let (new, _) = store.resolve(Some(&old)).await;
        assert_ne!(new, old);
        assert_eq!(store.len().await, 1);
    }
}
