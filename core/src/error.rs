//! Error types for the todo API client.
//!
//! # Design
//! `Remote` is the only failure the service reports on purpose: the envelope
//! came back with `success = false`. The view controller catches it at every
//! action boundary and shows the message. Everything below the envelope
//! (transport, status, JSON) is a different variant and propagates to the
//! caller untouched.

/// Errors returned by `TodoClient` parse methods and by `Transport`s.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The envelope reported `success = false`.
    #[error("{message}")]
    Remote { message: String },

    /// The server returned a status other than 200.
    #[error("HTTP {status}: {body}")]
    HttpError { status: u16, body: String },

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The request never produced a response.
    #[error("transport failed: {0}")]
    Transport(String),
}

impl ApiError {
    /// Message of a `RemoteOperationError`, if this is one.
    pub fn remote_message(&self) -> Option<&str> {
        match self {
            ApiError::Remote { message } => Some(message),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn remote_displays_bare_message() {
        let err = ApiError::Remote {
            message: "abc is not found".to_string(),
        };
        assert_eq!(err.to_string(), "abc is not found");
        assert_eq!(err.remote_message(), Some("abc is not found"));
    }

    #[test]
    fn http_error_display() {
        let err = ApiError::HttpError {
            status: 500,
            body: "boom".to_string(),
        };
        assert_eq!(err.to_string(), "HTTP 500: boom");
        assert!(err.remote_message().is_none());
    }
}
