//! Core error types for the flow pipeline
//!
//! `FlowError` covers diagram and session bookkeeping, `CompletionError`
//! covers the outbound chat-completion request.

use thiserror::Error;

/// Errors raised while editing the diagram or the session around it
#[derive(Error, Debug)]
pub enum FlowError {
    #[error("Unknown node: {id}")]
    UnknownNode { id: String },

    #[error("Duplicate node: {id} is already on the diagram")]
    DuplicateNode { id: String },

    #[error("Unknown item: {id}")]
    UnknownItem { id: String },

    #[error("Duplicate item: {id}")]
    DuplicateItem { id: String },

    #[error("Unknown uploaded file: {id}")]
    UnknownFile { id: String },

    #[error("Unsupported export format: {format}")]
    UnsupportedFormat { format: String },

    #[error("Unsupported upload type: {name}")]
    UnsupportedUpload { name: String },

    #[error("Failed to read '{name}': {source}")]
    FileRead {
        name: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid diagram document: {message}")]
    InvalidDocument { message: String },

    #[error("IO error: {source}")]
    IoError {
        #[from]
        source: std::io::Error,
    },
}

impl FlowError {
    /// Create a new unknown node error
    pub fn unknown_node(id: impl Into<String>) -> Self {
        Self::UnknownNode { id: id.into() }
    }

    /// Create a new duplicate node error
    pub fn duplicate_node(id: impl Into<String>) -> Self {
        Self::DuplicateNode { id: id.into() }
    }

    /// Create a new unknown item error
    pub fn unknown_item(id: impl Into<String>) -> Self {
        Self::UnknownItem { id: id.into() }
    }

    /// Create a new duplicate item error
    pub fn duplicate_item(id: impl Into<String>) -> Self {
        Self::DuplicateItem { id: id.into() }
    }

    /// Create a new unknown file error
    pub fn unknown_file(id: impl Into<String>) -> Self {
        Self::UnknownFile { id: id.into() }
    }

    /// Create a new unsupported format error
    pub fn unsupported_format(format: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format: format.into(),
        }
    }

    /// Create a new unsupported upload error
    pub fn unsupported_upload(name: impl Into<String>) -> Self {
        Self::UnsupportedUpload { name: name.into() }
    }

    /// Create a new file read error
    pub fn file_read(name: impl Into<String>, source: std::io::Error) -> Self {
        Self::FileRead {
            name: name.into(),
            source,
        }
    }

    /// Create a new invalid document error
    pub fn invalid_document(message: impl Into<String>) -> Self {
        Self::InvalidDocument {
            message: message.into(),
        }
    }
}

/// Failure of a chat-completion request
///
/// Every variant aborts the "create item" action; none of them touch
/// existing items or nodes.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompletionError {
    #[error("Missing API credential: set {variable}")]
    MissingCredential { variable: String },

    #[error("Network error: {message}")]
    NetworkError { message: String },

    #[error("HTTP error! status: {status}")]
    HttpError { status: u16, body: String },

    #[error("Malformed response: {message}")]
    MalformedResponseError { message: String },
}

impl CompletionError {
    /// Create a new missing credential error
    pub fn missing_credential(variable: impl Into<String>) -> Self {
        Self::MissingCredential {
            variable: variable.into(),
        }
    }

    /// Create a new network error
    pub fn network(message: impl Into<String>) -> Self {
        Self::NetworkError {
            message: message.into(),
        }
    }

    /// Create a new HTTP status error
    pub fn http(status: u16, body: impl Into<String>) -> Self {
        Self::HttpError {
            status,
            body: body.into(),
        }
    }

    /// Create a new malformed response error
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::MalformedResponseError {
            message: message.into(),
        }
    }

    /// HTTP status code, if the server answered
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_node() {
        let error = FlowError::unknown_node("item-9");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Unknown node"));
        assert!(error_msg.contains("item-9"));
    }

    #[test]
    fn test_duplicate_node() {
        let error = FlowError::duplicate_node("item-1");
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("Duplicate node"));
        assert!(error_msg.contains("item-1"));
    }

    #[test]
    fn test_unsupported_format() {
        let error = FlowError::unsupported_format(".rs");
        assert!(error.to_string().contains(".rs"));
    }

    #[test]
    fn test_file_read_keeps_source() {
        use std::error::Error as _;
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = FlowError::file_read("a.txt", io_err);
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("a.txt"));
        assert!(error_msg.contains("File not found"));
        assert!(error.source().is_some());
    }

    #[test]
    fn test_io_error_conversion() {
        use std::io;
        let io_err = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error: FlowError = io_err.into();
        let error_msg = format!("{}", error);
        assert!(error_msg.contains("IO error"));
        assert!(error_msg.contains("File not found"));
    }

    #[test]
    fn test_http_error() {
        let error = CompletionError::http(401, "unauthorized");
        assert_eq!(error.to_string(), "HTTP error! status: 401");
        assert_eq!(error.status(), Some(401));
    }

    #[test]
    fn test_network_and_malformed_have_no_status() {
        assert_eq!(CompletionError::network("refused").status(), None);
        assert_eq!(CompletionError::malformed("no choices").status(), None);
    }

    #[test]
    fn test_missing_credential() {
        let error = CompletionError::missing_credential("CODEFLOW_API_KEY");
        assert!(error.to_string().contains("CODEFLOW_API_KEY"));
    }
}
