//! In-memory session store with idle eviction
//!
//! Each session sits behind its own async mutex so that turns on one id are
//! serialized while different ids proceed independently. The outer map lock
//! is only held for short, non-async critical sections. A summary of every
//! session is kept beside its mutex and refreshed whenever a guard is
//! released, so listings never wait on an in-flight turn.

use super::{Session, SessionSummary};
use crate::agent::Conversation;
use crate::error::{AssistantError, Result};
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::ops::{Deref, DerefMut};
use std::sync::{Arc, Mutex as StdMutex, PoisonError, RwLock};
use tokio::sync::{Mutex, OwnedMutexGuard};

#[derive(Debug, Clone)]
struct SessionHandle {
    session: Arc<Mutex<Session>>,
    summary: Arc<StdMutex<SessionSummary>>,
}

impl SessionHandle {
    fn new(session: Session) -> Self {
        Self {
            summary: Arc::new(StdMutex::new(session.summary())),
            session: Arc::new(Mutex::new(session)),
        }
    }

    fn same_as(&self, other: &SessionHandle) -> bool {
        Arc::ptr_eq(&self.session, &other.session)
    }

    fn summary(&self) -> SessionSummary {
        self.summary
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

/// Exclusive access to one session for the duration of a turn
///
/// Dropping the guard publishes the session's summary to listings.
#[derive(Debug)]
pub struct SessionGuard {
    session: OwnedMutexGuard<Session>,
    summary: Arc<StdMutex<SessionSummary>>,
}

impl SessionGuard {
    fn publish(&self) {
        *self
            .summary
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = self.session.summary();
    }
}

impl Deref for SessionGuard {
    type Target = Session;

    fn deref(&self) -> &Session {
        &self.session
    }
}

impl DerefMut for SessionGuard {
    fn deref_mut(&mut self) -> &mut Session {
        &mut self.session
    }
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        self.publish();
    }
}

/// Map from session id to session state
///
/// # Examples
///
/// ```
/// use profile_assistant::session::SessionStore;
///
/// # tokio_test::block_on(async {
/// let store = SessionStore::new();
/// let session = store.get_or_create("visitor-1").await;
/// assert!(session.conversation.is_empty());
/// assert_eq!(store.len(), 1);
/// assert!(store.delete("visitor-1"));
/// assert!(!store.delete("visitor-1"));
/// # });
/// ```
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl SessionStore {
    /// Creates an empty store
    pub fn new() -> Self {
        Self::default()
    }

    fn handle(&self, id: &str) -> SessionHandle {
        if let Some(handle) = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
        {
            return handle.clone();
        }

        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        sessions
            .entry(id.to_string())
            .or_insert_with(|| {
                tracing::debug!(session_id = %id, "Creating session");
                SessionHandle::new(Session::new(id))
            })
            .clone()
    }

    fn is_current(&self, id: &str, handle: &SessionHandle) -> bool {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .is_some_and(|current| current.same_as(handle))
    }

    /// Locks the session for `id`, creating it on a miss
    ///
    /// Waits for any in-flight turn on the same id. The returned guard is
    /// already touched. If the session was swept or reset while this call
    /// waited, a fresh session is created and locked instead.
    pub async fn lock(&self, id: &str) -> SessionGuard {
        loop {
            let handle = self.handle(id);
            let session = Arc::clone(&handle.session).lock_owned().await;
            if self.is_current(id, &handle) {
                let mut guard = SessionGuard {
                    session,
                    summary: handle.summary,
                };
                guard.touch();
                guard.publish();
                return guard;
            }
        }
    }

    /// Returns a snapshot of the session, creating it on a miss
    ///
    /// A hit refreshes `last_activity`.
    pub async fn get_or_create(&self, id: &str) -> Session {
        (*self.lock(id).await).clone()
    }

    /// Returns a snapshot of an existing session without touching it
    ///
    /// # Errors
    ///
    /// Returns [`AssistantError::NotFound`] when no session has this id
    pub async fn get(&self, id: &str) -> Result<Session> {
        let handle = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(id)
            .cloned()
            .ok_or_else(|| AssistantError::NotFound(format!("No session with id '{}'", id)))?;
        let session = handle.session.lock().await.clone();
        Ok(session)
    }

    /// Replaces the conversation of `id`, creating the session if needed
    pub async fn save(&self, id: &str, conversation: Conversation) {
        let mut guard = self.lock(id).await;
        guard.conversation = conversation;
    }

    /// Inserts a session as-is, replacing any session with the same id
    pub fn insert(&self, session: Session) {
        self.sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(session.id.clone(), SessionHandle::new(session));
    }

    /// Removes a session; returns whether one existed
    ///
    /// Removing an unknown id is a no-op.
    pub fn delete(&self, id: &str) -> bool {
        let removed = self
            .sessions
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id)
            .is_some();
        if removed {
            tracing::debug!(session_id = %id, "Deleted session");
        }
        removed
    }

    /// Removes every session idle for longer than `timeout`
    ///
    /// Returns the number of sessions removed.
    pub fn sweep(&self, timeout: Duration) -> usize {
        self.sweep_at(Utc::now(), timeout)
    }

    /// [`SessionStore::sweep`] against an explicit clock reading
    ///
    /// Sessions locked by an in-flight turn are in use and always kept.
    pub fn sweep_at(&self, now: DateTime<Utc>, timeout: Duration) -> usize {
        let mut sessions = self.sessions.write().unwrap_or_else(PoisonError::into_inner);
        let before = sessions.len();
        sessions.retain(|_, handle| match handle.session.try_lock() {
            Ok(session) => !session.is_expired(timeout, now),
            Err(_) => true,
        });
        let removed = before - sessions.len();
        if removed > 0 {
            tracing::info!(removed, active = sessions.len(), "Swept idle sessions");
        }
        removed
    }

    /// Lists every session, ordered by id
    ///
    /// Never waits on a session lock. A session in the middle of a turn is
    /// reported as it stood when that turn took the lock.
    pub fn list(&self) -> Vec<SessionSummary> {
        let mut summaries: Vec<SessionSummary> = self
            .sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .map(SessionHandle::summary)
            .collect();
        summaries.sort_by(|a, b| a.session_id.cmp(&b.session_id));
        summaries
    }

    /// Number of sessions held
    pub fn len(&self) -> usize {
        self.sessions
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::providers::Turn;

    fn conversation() -> Conversation {
        Conversation::from_turns(vec![
            Turn::system("sys"),
            Turn::user("hi"),
            Turn::assistant("hello"),
        ])
    }

    #[tokio::test]
    async fn test_get_or_create_creates_once() {
        let store = SessionStore::new();
        store.get_or_create("a").await;
        store.get_or_create("a").await;
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn test_get_or_create_touches_on_hit() {
        let store = SessionStore::new();
        let mut stale = Session::new("a");
        stale.last_activity = Utc::now() - Duration::hours(1);
        store.insert(stale.clone());

        let session = store.get_or_create("a").await;
        assert!(session.last_activity > stale.last_activity);
    }

    #[tokio::test]
    async fn test_save_then_get_round_trip() {
        let store = SessionStore::new();
        store.get_or_create("a").await;
        store.save("a", conversation()).await;
        let session = store.get_or_create("a").await;
        assert_eq!(session.conversation, conversation());
    }

    #[tokio::test]
    async fn test_save_creates_missing_session() {
        let store = SessionStore::new();
        store.save("new", conversation()).await;
        assert_eq!(store.get("new").await.unwrap().conversation, conversation());
    }

    #[tokio::test]
    async fn test_get_unknown_is_not_found() {
        let store = SessionStore::new();
        let err = store.get("missing").await.unwrap_err();
        assert!(matches!(err, AssistantError::NotFound(_)));
        assert!(store.is_empty());
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let store = SessionStore::new();
        assert!(!store.delete("ghost"));
        let session = store.get_or_create("ghost").await;
        assert!(session.conversation.is_empty());
    }

    #[tokio::test]
    async fn test_delete_then_recreate_is_fresh() {
        let store = SessionStore::new();
        store.save("a", conversation()).await;
        assert!(store.delete("a"));
        assert!(store.get_or_create("a").await.conversation.is_empty());
    }

    #[tokio::test]
    async fn test_sweep_removes_only_idle_sessions() {
        let store = SessionStore::new();
        let mut idle = Session::new("idle");
        idle.last_activity = Utc::now() - Duration::minutes(45);
        store.insert(idle);
        store.get_or_create("fresh").await;

        let removed = store.sweep(Duration::minutes(30));

        assert_eq!(removed, 1);
        let ids: Vec<String> = store.list().into_iter().map(|s| s.session_id).collect();
        assert_eq!(ids, vec!["fresh".to_string()]);
    }

    #[tokio::test]
    async fn test_sweep_keeps_locked_sessions() {
        let store = SessionStore::new();
        let guard = store.lock("busy").await;
        let removed = store.sweep_at(Utc::now() + Duration::hours(2), Duration::minutes(30));
        assert_eq!(removed, 0);
        drop(guard);
        let removed = store.sweep_at(Utc::now() + Duration::hours(2), Duration::minutes(30));
        assert_eq!(removed, 1);
    }

    #[tokio::test]
    async fn test_list_reports_message_counts() {
        let store = SessionStore::new();
        store.save("b", conversation()).await;
        store.get_or_create("a").await;

        let list = store.list();
        assert_eq!(list.len(), 2);
        assert_eq!(list[0].session_id, "a");
        assert_eq!(list[0].message_count, 0);
        assert_eq!(list[1].session_id, "b");
        assert_eq!(list[1].message_count, 2);
    }

    #[tokio::test]
    async fn test_lock_after_delete_uses_fresh_session() {
        let store = Arc::new(SessionStore::new());
        store.save("a", conversation()).await;

        let guard = store.lock("a").await;
        let waiter = {
            let store = Arc::clone(&store);
            tokio::spawn(async move { store.lock("a").await.conversation.len() })
        };
        tokio::task::yield_now().await;
        store.delete("a");
        drop(guard);

        assert_eq!(waiter.await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_does_not_wait_for_locked_session() {
        let store = SessionStore::new();
        store.save("idle", conversation()).await;
        let mut busy = store.lock("busy").await;
        busy.conversation = conversation();

        let list = store.list();

        assert_eq!(list.len(), 2);
        assert_eq!(list[0].session_id, "busy");
        assert_eq!(list[0].message_count, 0);
        assert_eq!(list[1].message_count, 2);

        drop(busy);
        assert_eq!(store.list()[0].message_count, 2);
    }

    #[tokio::test]
    async fn test_list_reflects_touch_from_lock() {
        let store = SessionStore::new();
        let mut stale = Session::new("a");
        stale.last_activity = Utc::now() - Duration::hours(1);
        store.insert(stale.clone());
        assert_eq!(store.list()[0].last_activity, stale.last_activity);

        let _guard = store.lock("a").await;
        assert!(store.list()[0].last_activity > stale.last_activity);
    }
}
