use std::collections::HashSet;

use crate::error::SessionError;

/// The host's view of one authentication session.
///
/// The engine reads and replaces the user through this trait and keeps its
/// idempotency marker in the session's key/value store. Nothing else about
/// the host is visible.
pub trait Session {
    /// The user name currently associated with the session.
    fn user(&self) -> Result<String, SessionError>;

    /// Replace the session's user name.
    fn set_user(&mut self, user: &str) -> Result<(), SessionError>;

    /// Whether a marker has been stored under `key`.
    fn has_marker(&self, key: &str) -> bool;

    /// Store a presence-only marker under `key`.
    fn set_marker(&mut self, key: &str) -> Result<(), SessionError>;
}

/// In-process session, used by the dry-run binary and tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySession {
    user: Option<String>,
    markers: HashSet<String>,
}

impl MemorySession {
    pub fn new(user: impl Into<String>) -> Self {
        Self {
            user: Some(user.into()),
            markers: HashSet::new(),
        }
    }

    /// A session with no user set yet.
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Current user, if any.
    pub fn current_user(&self) -> Option<&str> {
        self.user.as_deref()
    }
}

impl Session for MemorySession {
    fn user(&self) -> Result<String, SessionError> {
        self.user.clone().ok_or(SessionError::NoUser)
    }

    fn set_user(&mut self, user: &str) -> Result<(), SessionError> {
        self.user = Some(user.to_string());
        Ok(())
    }

    fn has_marker(&self, key: &str) -> bool {
        self.markers.contains(key)
    }

    fn set_marker(&mut self, key: &str) -> Result<(), SessionError> {
        self.markers.insert(key.to_string());
        Ok(())
    }
}
