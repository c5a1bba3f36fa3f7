//! Session domain model.
//!
//! Sessions are issued and verified by the identity service. The plugin only ever
//! decodes what the service reports and observes transitions between states.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The signed-in user as reported by the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// An authenticated session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: SessionUser,
    #[serde(default)]
    pub expires: Option<DateTime<Utc>>,
}

impl Session {
    /// Name shown in the header greeting.
    ///
    /// Falls back to the email address, then to a generic label.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.user
            .name
            .as_deref()
            .or(self.user.email.as_deref())
            .unwrap_or("there")
    }
}

/// Session status as observed from the identity service.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SessionStatus {
    /// Verification is in flight; nothing else may act.
    #[default]
    Loading,
    /// No session. Only the sign-in affordance is available.
    Unauthenticated,
    /// A verified session.
    Authenticated(Session),
}

impl SessionStatus {
    /// Returns the session when authenticated.
    #[must_use]
    pub const fn session(&self) -> Option<&Session> {
        match self {
            Self::Authenticated(session) => Some(session),
            Self::Loading | Self::Unauthenticated => None,
        }
    }

    #[must_use]
    pub const fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }
}

/// Session facts handed explicitly to the link and search controllers.
///
/// `epoch` changes on every sign-in and sign-out so replies issued under an older
/// session can be recognized and dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    pub epoch: u64,
    pub user_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_session_payload() {
        let payload = r#"{"user":{"name":"Ada","email":"ada@example.com","image":null},"expires":"2026-11-18T10:00:00.000Z"}"#;
        let session: Session = serde_json::from_str(payload).unwrap();
        assert_eq!(session.display_name(), "Ada");
        assert!(session.expires.is_some());
    }

    #[test]
    fn display_name_falls_back_to_email() {
        let session = Session {
            user: SessionUser {
                name: None,
                email: Some("ada@example.com".to_string()),
                image: None,
            },
            expires: None,
        };
        assert_eq!(session.display_name(), "ada@example.com");
    }
}
