use crate::transport::{ApiResponse, TransportError};
use thiserror::Error;

/// What the caller was trying to do; drives the user-facing wording.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Login,
    CurrentUser,
    UserRoles,
    Endpoint(&'static str),
}

impl Operation {
    fn action(self) -> &'static str {
        match self {
            Operation::Login => "authenticate",
            Operation::CurrentUser => "fetch user data",
            Operation::UserRoles => "fetch user roles",
            Operation::Endpoint(_) => "call the backend",
        }
    }

    fn generic_failure(self) -> String {
        match self {
            Operation::Login => "Failed to authenticate. Please try again.".to_owned(),
            Operation::CurrentUser => "Failed to fetch user data.".to_owned(),
            Operation::UserRoles => "Failed to fetch user roles.".to_owned(),
            Operation::Endpoint(path) => format!("Request to {path} failed."),
        }
    }

    fn unauthorized(self) -> &'static str {
        match self {
            Operation::Login => "Authentication failed: Invalid or expired Telegram data.",
            _ => "Authorization failed: Invalid or expired Telegram data.",
        }
    }
}

/// Non-2xx response kept verbatim as the cause of a server failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("HTTP {status} {status_text}: {body}")]
pub struct HttpStatusError {
    pub status: u16,
    pub status_text: String,
    pub body: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A protected call was attempted without a credential.
    LocalPrecondition,
    /// Failed while building or handing off the request.
    Local,
    /// No response received.
    Transport,
    Server { status: u16 },
    Unclassified,
}

/// Every variant displays a single human-readable message; the underlying
/// failure is reachable through `std::error::Error::source`.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Telegram initData is missing. Cannot {action}.")]
    MissingCredential { action: &'static str },
    #[error("{message}")]
    Local {
        message: String,
        #[source]
        source: TransportError,
    },
    #[error("{message}")]
    Transport {
        message: String,
        #[source]
        source: TransportError,
    },
    #[error("{message}")]
    Server {
        message: String,
        #[source]
        source: HttpStatusError,
    },
    #[error("{message}")]
    Unclassified {
        message: String,
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ApiError::MissingCredential { .. } => ErrorKind::LocalPrecondition,
            ApiError::Local { .. } => ErrorKind::Local,
            ApiError::Transport { .. } => ErrorKind::Transport,
            ApiError::Server { source, .. } => ErrorKind::Server {
                status: source.status,
            },
            ApiError::Unclassified { .. } => ErrorKind::Unclassified,
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { source, .. } => Some(source.status),
            _ => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }

    /// The rejected response, for server failures.
    pub fn response(&self) -> Option<&HttpStatusError> {
        match self {
            ApiError::Server { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Message plus whatever the backend sent back, for developer-facing
    /// output. JSON bodies are pretty-printed.
    pub fn report(&self) -> String {
        let Some(response) = self.response() else {
            return self.to_string();
        };
        let body = match serde_json::from_str::<serde_json::Value>(&response.body) {
            Ok(json) => serde_json::to_string_pretty(&json).unwrap_or_else(|_| response.body.clone()),
            Err(_) => response.body.clone(),
        };
        let status_line = format!("HTTP {} {}", response.status, response.status_text);
        let status_line = status_line.trim_end();
        if body.trim().is_empty() {
            format!("{self}\n{status_line}")
        } else {
            format!("{self}\n{status_line}\n{body}")
        }
    }

    pub(crate) fn missing_credential(op: Operation) -> Self {
        ApiError::MissingCredential {
            action: op.action(),
        }
    }

    pub(crate) fn from_transport(op: Operation, source: TransportError) -> Self {
        match source {
            TransportError::Dispatch(_) => ApiError::Local {
                message: op.generic_failure(),
                source,
            },
            TransportError::Offline => ApiError::Transport {
                message: "Network connection lost. Please check your internet connection."
                    .to_owned(),
                source,
            },
            TransportError::NoResponse(_) => ApiError::Transport {
                message: "Network error. The server might be unavailable.".to_owned(),
                source,
            },
        }
    }

    pub(crate) fn from_status(op: Operation, response: ApiResponse) -> Self {
        let message = if response.status == 401 {
            op.unauthorized().to_owned()
        } else {
            op.generic_failure()
        };
        ApiError::Server {
            message,
            source: HttpStatusError {
                status: response.status,
                status_text: response.status_text,
                body: response.body,
            },
        }
    }

    pub(crate) fn decode(op: Operation, source: serde_json::Error) -> Self {
        ApiError::Unclassified {
            message: op.generic_failure(),
            source,
        }
    }
}
