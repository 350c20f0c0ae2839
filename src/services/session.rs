use std::time::Duration;
use uuid::Uuid;

/// Process-local session store for the single admin user.
///
/// Tokens are opaque UUIDs handed out in an HttpOnly cookie and resolved
/// back to the user id on every request. Entries expire after the
/// configured time-to-live; nothing is persisted across restarts.
pub struct SessionStore {
    sessions: moka::sync::Cache<String, i32>,
}

impl SessionStore {
    pub fn new(ttl: Duration) -> Self {
        let sessions = moka::sync::Cache::builder()
            .time_to_live(ttl)
            .build();

        Self { sessions }
    }

    /// Issue a fresh session token for `user_id`.
    pub fn create(&self, user_id: i32) -> String {
        let token = Uuid::new_v4().simple().to_string();
        self.sessions.insert(token.clone(), user_id);

        tracing::debug!("Issued session for user {}", user_id);

        token
    }

    /// Resolve a token to its user id, if the session is still live.
    pub fn get(&self, token: &str) -> Option<i32> {
        self.sessions.get(token)
    }

    pub fn revoke(&self, token: &str) {
        self.sessions.invalidate(token);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_resolve_revoke() {
        let store = SessionStore::new(Duration::from_secs(60));

        let token = store.create(1);
        assert_eq!(store.get(&token), Some(1));

        store.revoke(&token);
        assert_eq!(store.get(&token), None);
    }

    #[test]
    fn test_tokens_are_unique() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert_ne!(store.create(1), store.create(1));
    }

    #[test]
    fn test_unknown_token_resolves_to_none() {
        let store = SessionStore::new(Duration::from_secs(60));
        assert_eq!(store.get("not-a-session"), None);
    }
}
