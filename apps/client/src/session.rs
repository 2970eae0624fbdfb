use chrono::{DateTime, Utc};
use serde::Serialize;

/// Prefix the backend gives sessions created from manually entered skills.
pub const MANUAL_SESSION_PREFIX: &str = "manual_session_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionOrigin {
    Upload,
    Manual,
}

/// The one server-tracked session the controller currently holds.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SessionContext {
    pub session_id: String,
    pub origin: SessionOrigin,
    pub adopted_at: DateTime<Utc>,
}

impl SessionContext {
    /// Origin is read from the id the server issued, not from which request
    /// produced it.
    pub fn adopt(session_id: String) -> Self {
        let origin = if session_id.starts_with(MANUAL_SESSION_PREFIX) {
            SessionOrigin::Manual
        } else {
            SessionOrigin::Upload
        };
        Self {
            session_id,
            origin,
            adopted_at: Utc::now(),
        }
    }

    pub fn is_manual(&self) -> bool {
        self.origin == SessionOrigin::Manual
    }
}
