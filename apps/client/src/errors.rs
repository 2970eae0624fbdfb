#![allow(dead_code)]

use serde::Serialize;
use thiserror::Error;

/// Client-level error type.
/// Every variant is non-fatal; `ClientError::user_message` turns it into the
/// message shown to the user.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No active session")]
    MissingSession,

    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unreadable response (status {status}): {body}")]
    Decode { status: u16, body: String },

    #[error("Server error: {0}")]
    Server(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Superseded by a newer request")]
    Superseded,
}

/// Three-way split of failures as they surface to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Rejected before any request was issued.
    Validation,
    /// Network failure or a response that could not be read.
    Transport,
    /// The backend answered `success: false`.
    Server,
}

impl ClientError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            ClientError::Validation(_) | ClientError::MissingSession | ClientError::Io(_) => {
                ErrorCategory::Validation
            }
            ClientError::Transport(_) | ClientError::Decode { .. } | ClientError::Superseded => {
                ErrorCategory::Transport
            }
            ClientError::Server(_) => ErrorCategory::Server,
        }
    }

    /// User-facing text. Server text is passed through verbatim; transport
    /// failures get `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ClientError::Validation(msg) | ClientError::Server(msg) => msg.clone(),
            ClientError::MissingSession => {
                "Please upload a resume first or add skills manually.".to_string()
            }
            ClientError::Io(e) => format!("Could not read file: {e}"),
            _ => fallback.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Warning,
}

impl NoticeKind {
    pub fn css_class(self) -> &'static str {
        match self {
            NoticeKind::Success => "notice-success",
            NoticeKind::Warning => "notice-warning",
        }
    }
}

/// Transient message for the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Warning,
            text: text.into(),
        }
    }
}
