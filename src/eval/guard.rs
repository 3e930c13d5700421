use log::warn;

use crate::eval::Session;

/// Session data key under which the "already processed" marker is stored.
pub const MODULE_ID: &str = "pam_alias.0x2c.org";

/// Per-session marker that limits the module to one resolution pass.
#[derive(Debug, Clone, Copy)]
pub struct IdempotencyGuard {
    key: &'static str,
}

impl Default for IdempotencyGuard {
    fn default() -> Self {
        Self { key: MODULE_ID }
    }
}

impl IdempotencyGuard {
    pub fn is_set<S: Session + ?Sized>(&self, session: &S) -> bool {
        session.has_marker(self.key)
    }

    /// Mark the session as processed. A failed write is logged; there is
    /// nothing else to do about it.
    pub fn set<S: Session + ?Sized>(&self, session: &mut S) {
        if let Err(e) = session.set_marker(self.key) {
            warn!("{e}");
        }
    }
}
