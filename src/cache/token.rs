use chrono::{DateTime, TimeDelta, Utc};

/// Bearer token issued by the auth server.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub value: String,
    pub expires_in_seconds: u64,
    pub issued_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn new(value: String, expires_in_seconds: u64) -> Self {
        Self {
            value,
            expires_in_seconds,
            issued_at: Utc::now(),
        }
    }

    /// Saturates at the latest representable time for lifetimes chrono
    /// cannot express.
    pub fn expires_at(&self) -> DateTime<Utc> {
        i64::try_from(self.expires_in_seconds)
            .ok()
            .and_then(TimeDelta::try_seconds)
            .and_then(|lifetime| self.issued_at.checked_add_signed(lifetime))
            .unwrap_or(DateTime::<Utc>::MAX_UTC)
    }

    /// `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.value)
    }
}

// token value must never reach logs
impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessToken")
            .field("value", &"<redacted>")
            .field("expires_in_seconds", &self.expires_in_seconds)
            .field("issued_at", &self.issued_at)
            .finish()
    }
}
