//! Admin session bookkeeping
//!
//! Sessions live in process memory only; a restart logs every admin out.

use chrono::Utc;
use dashmap::DashMap;
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone)]
pub struct Session {
    pub id: Uuid,
    pub created_at: i64,
    pub expires_at: i64,
}

impl Session {
    pub fn new(ttl_seconds: i64) -> Self {
        let now = Utc::now().timestamp();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            expires_at: now + ttl_seconds,
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now >= self.expires_at
    }
}

/// Authenticated admin sessions keyed by the id carried in the session cookie.
#[derive(Debug)]
pub struct SessionStore {
    sessions: DashMap<Uuid, Session>,
    ttl_seconds: i64,
}

impl SessionStore {
    pub fn new(ttl_seconds: i64) -> Self {
        Self {
            sessions: DashMap::new(),
            ttl_seconds,
        }
    }

    /// Starts a new authenticated session.
    pub fn create(&self) -> Session {
        let session = Session::new(self.ttl_seconds);
        self.sessions.insert(session.id, session.clone());
        debug!("Admin session {} created", session.id);
        session
    }

    /// Whether `id` names a live session. Expired entries are dropped on the way.
    pub fn is_active(&self, id: &Uuid) -> bool {
        let now = Utc::now().timestamp();
        let expired = match self.sessions.get(id) {
            Some(session) => session.is_expired(now),
            None => return false,
        };
        if expired {
            self.sessions.remove(id);
            debug!("Admin session {} expired", id);
            return false;
        }
        true
    }

    pub fn revoke(&self, id: &Uuid) {
        if self.sessions.remove(id).is_some() {
            debug!("Admin session {} revoked", id);
        }
    }

    /// Removes every expired session, returning how many were dropped.
    pub fn purge_expired(&self) -> usize {
        let now = Utc::now().timestamp();
        let before = self.sessions.len();
        self.sessions.retain(|_, session| !session.is_expired(now));
        before - self.sessions.len()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_created_session_is_active() {
        let store = SessionStore::new(3600);
        let session = store.create();
        assert!(store.is_active(&session.id));
        assert!(!store.is_active(&Uuid::new_v4()));
    }

    #[test]
    fn test_revoked_session_is_inactive() {
        let store = SessionStore::new(3600);
        let session = store.create();
        store.revoke(&session.id);
        assert!(!store.is_active(&session.id));
        assert!(store.is_empty());
    }

    #[test]
    fn test_expired_session_is_dropped() {
        let store = SessionStore::new(0);
        let session = store.create();
        assert!(!store.is_active(&session.id));
        assert_eq!(store.len(), 0);
    }

    #[test]
    fn test_purge_expired() {
        let expired = SessionStore::new(-10);
        expired.create();
        expired.create();
        assert_eq!(expired.purge_expired(), 2);

        let live = SessionStore::new(3600);
        live.create();
        assert_eq!(live.purge_expired(), 0);
        assert_eq!(live.len(), 1);
    }
}
