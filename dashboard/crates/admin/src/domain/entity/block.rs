//! Block Command
//!
//! Command sent to the backend to block an account. Never persisted here.

use chrono::{DateTime, Utc};
use kernel::id::UserId;

use crate::domain::value_object::BlockDuration;
use crate::error::{AdminError, AdminResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlockRequest {
    pub user_id: UserId,
    pub reason: String,
    /// `None` blocks permanently
    pub blocked_until: Option<DateTime<Utc>>,
}

impl BlockRequest {
    pub fn new(
        user_id: impl Into<UserId>,
        reason: impl Into<String>,
        blocked_until: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            reason: reason.into(),
            blocked_until,
        }
    }

    /// Build a request whose expiry is `duration` counted from `now`
    pub fn for_duration(
        user_id: impl Into<UserId>,
        reason: impl Into<String>,
        duration: &BlockDuration,
        now: DateTime<Utc>,
    ) -> AdminResult<Self> {
        let blocked_until = duration.blocked_until(now)?;
        Ok(Self::new(user_id, reason, blocked_until))
    }

    /// Check the command before it is sent
    ///
    /// The reason must not be blank and an expiry must lie after `now`.
    pub fn validate(&self, now: DateTime<Utc>) -> AdminResult<()> {
        if self.user_id.as_str().trim().is_empty() {
            return Err(AdminError::InvalidInput(
                "User id must not be empty".to_string(),
            ));
        }
        if self.reason.trim().is_empty() {
            return Err(AdminError::InvalidInput(
                "Block reason must not be empty".to_string(),
            ));
        }
        if let Some(until) = self.blocked_until
            && until <= now
        {
            return Err(AdminError::InvalidInput(
                "Block expiry must be in the future".to_string(),
            ));
        }
        Ok(())
    }
}
