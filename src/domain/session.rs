use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A login session binding an issued token to an active/expiry status.
///
/// Tokens are stateless on their own; this row is what makes logout work.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: i32,
    pub user_id: i32,
    /// The exact token string issued at login.
    pub token: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    /// Deactivated at logout; checked on every authenticated request.
    pub is_active: bool,
    pub expires_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

impl Session {
    /// Whether the session still admits requests at `now`.
    pub fn is_valid_at(&self, now: NaiveDateTime) -> bool {
        self.is_active && self.expires_at > now
    }
}

/// Payload required to insert a session row at login.
#[derive(Debug, Clone)]
pub struct NewSession {
    pub user_id: i32,
    pub token: String,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub expires_at: NaiveDateTime,
}

impl NewSession {
    pub fn new(user_id: i32, token: impl Into<String>, expires_at: NaiveDateTime) -> Self {
        Self {
            user_id,
            token: token.into(),
            ip_address: None,
            user_agent: None,
            expires_at,
        }
    }

    pub fn with_ip_address(mut self, ip_address: impl Into<String>) -> Self {
        self.ip_address = Some(ip_address.into());
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }
}
