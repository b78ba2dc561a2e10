use tracing::debug;

use devmarket_types::models::User;

use crate::api::ApiClient;

/// Where session resolution currently stands. `Pending` only exists before
/// [`Session::resolve`] completes; after that the session is either
/// `Authenticated` or `Anonymous` for the rest of its life.
#[derive(Debug, Clone)]
pub enum SessionState {
    Pending,
    Authenticated(User),
    Anonymous,
}

/// The caller's authenticated identity as resolved by the external auth
/// service. Cookie issuance and expiry are the backend's concern; this
/// object only reads the result of `GET /me`.
///
/// Passed explicitly into every view that needs it. There is deliberately
/// no process-wide session singleton.
#[derive(Debug, Clone)]
pub struct Session {
    state: SessionState,
}

impl Session {
    /// A session that has not been resolved yet.
    pub fn pending() -> Self {
        Self {
            state: SessionState::Pending,
        }
    }

    /// Probe the identity endpoint. Any failure resolves to `Anonymous`;
    /// distinguishing "not logged in" from "backend down" is not this
    /// layer's job.
    pub async fn resolve(api: &ApiClient) -> Self {
        let state = match api.me().await {
            Ok(user) => SessionState::Authenticated(user),
            Err(e) => {
                debug!("identity probe failed, treating session as anonymous: {e}");
                SessionState::Anonymous
            }
        };
        Self { state }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.state, SessionState::Pending)
    }

    /// The current identity, or `None` while pending or anonymous.
    pub fn user(&self) -> Option<&User> {
        match &self.state {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }
}
