//! Session State
//!
//! In-memory half of the session: the bearer token and the per-route 401
//! retry marks. The durable half is the [`platform::token_store::TokenStore`].

use std::collections::HashSet;
use std::sync::{Mutex, MutexGuard, RwLock};

use zeroize::Zeroizing;

/// Session state machine
///
/// `Unauthenticated --confirm_sms_code--> Authenticated`
/// `Authenticated --logout | unrecoverable 401--> Unauthenticated`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    Unauthenticated,
    Authenticated,
}

#[derive(Default)]
pub(crate) struct Session {
    token: RwLock<Option<Zeroizing<String>>>,
    /// Routes (`METHOD path`) that already got one 401 and were retried
    retried: Mutex<HashSet<String>>,
}

impl Session {
    pub(crate) fn new(token: Option<Zeroizing<String>>) -> Self {
        Self {
            token: RwLock::new(token),
            retried: Mutex::new(HashSet::new()),
        }
    }

    pub(crate) fn token(&self) -> Option<Zeroizing<String>> {
        self.token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    pub(crate) fn set_token(&self, token: Zeroizing<String>) {
        let mut slot = self.token.write().unwrap_or_else(|p| p.into_inner());
        *slot = Some(token);
    }

    /// Drop the token and every retry mark; returns whether a token was held
    pub(crate) fn clear(&self) -> bool {
        let had_token = self
            .token
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take()
            .is_some();
        self.retried().clear();
        had_token
    }

    pub(crate) fn state(&self) -> SessionState {
        let held = self
            .token
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .is_some();
        if held {
            SessionState::Authenticated
        } else {
            SessionState::Unauthenticated
        }
    }

    /// Mark `route` as retried; false if it was already marked
    pub(crate) fn mark_retry(&self, route: &str) -> bool {
        self.retried().insert(route.to_string())
    }

    pub(crate) fn clear_retry(&self, route: &str) {
        self.retried().remove(route);
    }

    pub(crate) fn pending_retries(&self) -> usize {
        self.retried().len()
    }

    fn retried(&self) -> MutexGuard<'_, HashSet<String>> {
        self.retried
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}
