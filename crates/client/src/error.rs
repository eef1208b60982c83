// ABOUTME: Error types for the client: transport failures, API error payloads, and decode failures.
// ABOUTME: ApiError parses the service's JSON error body and falls back to the HTTP status when it cannot.

use std::fmt;

use serde::Deserialize;

/// Error codes representing the categories of client failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Transport,
    Api,
    Decode,
    Config,
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::Transport => "transport error",
            ErrorCode::Api => "api error",
            ErrorCode::Decode => "decode error",
            ErrorCode::Config => "configuration error",
        };
        write!(f, "{}", s)
    }
}

/// An error reported by the remote service.
///
/// `raw` always holds the response body exactly as received, including any
/// analysis fields the service attaches that are not modelled here.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("api error {code}: {message}")]
pub struct ApiError {
    pub code: i64,
    pub message: String,
    pub raw: String,
}

#[derive(Deserialize)]
struct ErrorBody {
    error: String,
    #[serde(rename = "errorCode")]
    error_code: i64,
}

impl ApiError {
    /// Parse a `{"error": ..., "errorCode": ...}` body. Extra fields are ignored.
    pub fn parse_json(body: &str) -> Result<Self, serde_json::Error> {
        let parsed: ErrorBody = serde_json::from_str(body)?;
        Ok(Self {
            code: parsed.error_code,
            message: parsed.error,
            raw: body.to_string(),
        })
    }

    /// Build the error for a non-200 response.
    ///
    /// An empty body yields the status line as the message; a body that is
    /// not a well-formed error payload becomes the message verbatim.
    pub fn from_response(status: reqwest::StatusCode, body: &str) -> Self {
        if body.is_empty() {
            return Self {
                code: i64::from(status.as_u16()),
                message: status.to_string(),
                raw: String::new(),
            };
        }
        match Self::parse_json(body) {
            Ok(err) => err,
            Err(e) => {
                tracing::warn!(status = status.as_u16(), error = %e, "unparseable error body");
                Self {
                    code: i64::from(status.as_u16()),
                    message: body.to_string(),
                    raw: body.to_string(),
                }
            }
        }
    }
}

/// A response body that did not match the shape expected for its endpoint.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    /// The frontpage tree root was not tagged `dml`.
    #[error("invalid frontpage tree: root tag is {found:?}, expected \"dml\"")]
    InvalidRoot { found: String },
}

/// The main error type for client operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent or no response was received.
    #[error("diffbot: {endpoint}: {source}")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    /// The service answered with a non-200 status.
    #[error("diffbot: {endpoint}: {source}")]
    Api {
        endpoint: String,
        #[source]
        source: ApiError,
    },

    /// The response body did not decode into the expected result.
    #[error("diffbot: {endpoint}: {source}")]
    Decode {
        endpoint: String,
        #[source]
        source: DecodeError,
    },

    #[error("diffbot: {0}")]
    Config(String),
}

impl Error {
    pub fn transport(endpoint: impl Into<String>, source: reqwest::Error) -> Self {
        Error::Transport {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn api(endpoint: impl Into<String>, source: ApiError) -> Self {
        Error::Api {
            endpoint: endpoint.into(),
            source,
        }
    }

    pub fn decode(endpoint: impl Into<String>, source: impl Into<DecodeError>) -> Self {
        Error::Decode {
            endpoint: endpoint.into(),
            source: source.into(),
        }
    }

    pub fn config(msg: impl Into<String>) -> Self {
        Error::Config(msg.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Error::Transport { .. } => ErrorCode::Transport,
            Error::Api { .. } => ErrorCode::Api,
            Error::Decode { .. } => ErrorCode::Decode,
            Error::Config(_) => ErrorCode::Config,
        }
    }

    /// The service's error payload, if this is an API error.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Error::Api { source, .. } => Some(source),
            _ => None,
        }
    }

    /// Returns true if this is a Transport error.
    pub fn is_transport(&self) -> bool {
        self.code() == ErrorCode::Transport
    }

    /// Returns true if this is an Api error.
    pub fn is_api(&self) -> bool {
        self.code() == ErrorCode::Api
    }

    /// Returns true if this is a Decode error.
    pub fn is_decode(&self) -> bool {
        self.code() == ErrorCode::Decode
    }
}
