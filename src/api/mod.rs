//! Remote data access for the health backend.
//!
//! Every call attaches the session's bearer token and reports failures as a
//! [`FetchError`]. Dashboards treat a failed list fetch as "no data"; actions
//! surface the error to the caller.

mod client;
mod health;
mod meals;
mod moods;
mod reminders;
mod sleep;

pub use client::ApiClient;

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("network error: {0}")]
    Network(#[source] reqwest::Error),

    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("could not decode response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl FetchError {
    pub fn status(&self) -> Option<u16> {
        match self {
            FetchError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// The backend rejected the credentials or token.
    pub fn is_auth_rejection(&self) -> bool {
        matches!(self.status(), Some(400 | 401 | 403))
    }
}
