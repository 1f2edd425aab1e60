use std::fmt;

use packager_logging::packager_warn;
use serde::Deserialize;

pub const SUCCESS_PREFIX: &str = "Export started: ";
pub const SERVER_ERROR_FALLBACK: &str = "Server error occurred";
pub const CONNECTIVITY_MESSAGE: &str = "Failed to connect to backend. Please try again later.";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum SubmissionState {
    #[default]
    Idle,
    Submitting,
    Succeeded(String),
    Failed(String),
}

impl SubmissionState {
    pub fn is_submitting(&self) -> bool {
        matches!(self, SubmissionState::Submitting)
    }
}

/// How a dispatched request resolved, as reported by the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestOutcome {
    /// The service answered with a status code and a (possibly empty) body.
    Responded { status: u16, body: String },
    /// The request never produced a usable response.
    Unreachable { reason: String },
}

/// Remote failures, kept apart so the user can tell a rejected request from
/// an unreachable service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteError {
    Server(String),
    Connectivity,
}

impl RemoteError {
    pub fn message(&self) -> &str {
        match self {
            RemoteError::Server(message) => message,
            RemoteError::Connectivity => CONNECTIVITY_MESSAGE,
        }
    }
}

impl fmt::Display for RemoteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

#[derive(Debug, Deserialize)]
struct ServiceReply {
    message: Option<String>,
}

fn reply_message(body: &str) -> Option<String> {
    serde_json::from_str::<ServiceReply>(body)
        .ok()
        .and_then(|reply| reply.message)
        .filter(|message| !message.is_empty())
}

/// Maps a settled request onto the terminal submission state.
pub fn classify(outcome: &RequestOutcome) -> SubmissionState {
    match outcome {
        RequestOutcome::Responded { status, body } if (200..300).contains(status) => {
            match reply_message(body) {
                Some(message) => SubmissionState::Succeeded(format!("{SUCCESS_PREFIX}{message}")),
                None => {
                    packager_warn!("Success response {} carried no message; body={:?}", status, body);
                    SubmissionState::Failed(RemoteError::Connectivity.to_string())
                }
            }
        }
        RequestOutcome::Responded { status, body } => {
            let message = reply_message(body).unwrap_or_else(|| SERVER_ERROR_FALLBACK.to_string());
            packager_warn!("Service rejected request: status={} message={}", status, message);
            SubmissionState::Failed(RemoteError::Server(message).to_string())
        }
        RequestOutcome::Unreachable { reason } => {
            packager_warn!("Service unreachable: {}", reason);
            SubmissionState::Failed(RemoteError::Connectivity.to_string())
        }
    }
}
