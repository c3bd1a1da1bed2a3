use thiserror::Error;

/// Errors raised while talking to the table endpoint.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The endpoint answered with a non-success status.
    #[error("unable to {method} {url} for table {table}: {status} {reason}")]
    Http {
        method: &'static str,
        url: String,
        table: String,
        status: u16,
        reason: String,
        body: String,
    },

    /// The request never produced a response (DNS, connect, timeout, ...).
    #[error("unable to {method} {url}")]
    Transport {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response was a success but its body could not be decoded.
    #[error("invalid JSON from {method} {url}")]
    Decode {
        method: &'static str,
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("could not encode query")]
    Encode(#[from] serde_json::Error),

    #[error("could not build HTTP client")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// HTTP status of the failed response, if there was one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body of the failed response, if there was one.
    pub fn body(&self) -> Option<&str> {
        match self {
            ApiError::Http { body, .. } => Some(body),
            _ => None,
        }
    }

    pub fn is_forbidden(&self) -> bool {
        self.status() == Some(403)
    }
}
