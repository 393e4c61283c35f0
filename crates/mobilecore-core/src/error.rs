// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for MobileCore.
//
// Script callers only ever see the `Display` text of these errors; the kind
// is for Rust callers and logs.

use std::fmt;

use thiserror::Error;

/// Top-level error type for all MobileCore operations.
#[derive(Debug, Error)]
pub enum MobileCoreError {
    // -- Host lookups --
    /// The host could not resolve the application identifier or its version.
    /// Carries the host's own message, shown verbatim.
    #[error("{0}")]
    Resolution(String),

    #[error("host returned an empty application identifier")]
    EmptyAppId,

    #[error("feature not available on this platform")]
    PlatformUnavailable,

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    // -- Assembly / configuration --
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid bridge configuration: {0}")]
    Config(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// The two failure classes a metrics request can end in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The host could not tell us who the app is or which version is installed.
    ResolutionFailure,
    /// Anything else that went wrong while building the response.
    UnexpectedFault,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ResolutionFailure => f.write_str("resolution-failure"),
            Self::UnexpectedFault => f.write_str("unexpected-fault"),
        }
    }
}

impl MobileCoreError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Resolution(_) | Self::EmptyAppId | Self::PlatformUnavailable => {
                ErrorKind::ResolutionFailure
            }
            Self::Bridge(_) | Self::Serialization(_) | Self::Config(_) | Self::Io(_) => {
                ErrorKind::UnexpectedFault
            }
        }
    }

    /// Error for a Java exception raised during `context`.
    ///
    /// `not_found` marks the package manager's "no such package" exception,
    /// which is a resolution failure carrying Java's own text. `message` is
    /// the exception message (or class name); when Java gave neither, the
    /// context stands in so the text is never empty.
    pub fn from_java_exception(context: &str, not_found: bool, message: Option<String>) -> Self {
        let message = message.filter(|m| !m.trim().is_empty());
        match (not_found, message) {
            (true, Some(message)) => Self::Resolution(message),
            (true, None) => Self::Resolution(format!("{context}: package not found")),
            (false, Some(message)) => Self::Bridge(format!("{context}: {message}")),
            (false, None) => Self::Bridge(format!("{context}: Java exception")),
        }
    }

    /// The plain string handed to the response sink's error path.
    ///
    /// Never empty: a host that fails without saying why still yields the
    /// failure kind.
    pub fn wire_message(&self) -> String {
        let message = self.to_string();
        if message.trim().is_empty() {
            format!("{}: host gave no error message", self.kind())
        } else {
            message
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, MobileCoreError>;
