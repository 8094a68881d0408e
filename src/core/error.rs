//! Error handling for agentdocs.
//!
//! Two layers, the same way the rest of the CLI is built:
//!
//! - [`DocsError`] is the strongly-typed error used inside the library. Each
//!   variant maps to one failure class: bad user input, a failed fetch, a git
//!   transport problem, an unreadable archive, or filesystem trouble.
//! - [`ErrorContext`] wraps a [`DocsError`] with an optional suggestion and
//!   details for terminal display. [`user_friendly_error`] converts any
//!   [`anyhow::Error`] into one.
//!
//! `BadInput` and `FetchFailed` are the classes the user can act on; both end
//! the process with exit code 1 and are never retried. Everything else is
//! shown with its full cause chain.
//!
//! # Examples
//!
//! ```rust,no_run
//! use agentdocs::core::{DocsError, user_friendly_error};
//!
//! let err = anyhow::Error::from(DocsError::BadInput {
//!     message: "Gemfile.lock not found".to_string(),
//! });
//! user_friendly_error(err).display();
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The error type for agentdocs operations.
#[derive(Error, Debug)]
pub enum DocsError {
    /// User or environment misconfiguration.
    ///
    /// Raised when the lock file is missing, the dependency is not declared, or
    /// a git-sourced dependency has no explicit version in non-interactive
    /// mode.
    #[error("{message}")]
    BadInput {
        /// Human readable description of what was wrong
        message: String,
    },

    /// A remote archive could not be downloaded.
    ///
    /// `reason` is the full message and names the URL.
    #[error("{reason}")]
    FetchFailed {
        /// The URL that was requested
        url: String,
        /// HTTP status code when the server answered
        status: Option<u16>,
        /// Why the fetch failed
        reason: String,
    },

    /// The downloaded archive could not be read or extracted.
    #[error("Invalid archive: {reason}")]
    ArchiveError {
        /// What went wrong while reading the archive
        reason: String,
    },

    /// Git executable not found in PATH
    #[error("Git is not installed or not found in PATH")]
    GitNotFound,

    /// Cloning a documentation repository failed.
    #[error("Failed to clone repository: {url}")]
    GitCloneFailed {
        /// The repository URL that failed to clone
        url: String,
        /// The reason for the clone failure
        reason: String,
    },

    /// Git operation failed during execution
    #[error("Git operation failed: {operation}")]
    GitCommandError {
        /// The git operation that failed (e.g., "clone")
        operation: String,
        /// The error output from the git command
        stderr: String,
    },

    /// Configuration file could not be parsed.
    #[error("Invalid configuration in {file}: {reason}")]
    ConfigError {
        /// Path of the config file
        file: String,
        /// Parse failure
        reason: String,
    },

    /// File system error
    #[error("File system error: {operation}")]
    FileSystemError {
        /// The file system operation that failed
        operation: String,
        /// The path where the error occurred
        path: String,
    },

    /// Permission denied
    #[error("Permission denied: {operation}")]
    PermissionDenied {
        /// The operation that was denied
        operation: String,
        /// The path where permission was denied
        path: String,
    },

    /// Catch-all with the rendered cause chain.
    #[error("{message}")]
    Other {
        /// The error message
        message: String,
    },
}

impl DocsError {
    /// Shorthand for [`DocsError::BadInput`].
    pub fn bad_input(message: impl Into<String>) -> Self {
        Self::BadInput {
            message: message.into(),
        }
    }

    /// HTTP status carried by a fetch failure, if any.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::FetchFailed {
                status,
                ..
            } => *status,
            _ => None,
        }
    }
}

impl Clone for DocsError {
    fn clone(&self) -> Self {
        match self {
            Self::BadInput {
                message,
            } => Self::BadInput {
                message: message.clone(),
            },
            Self::FetchFailed {
                url,
                status,
                reason,
            } => Self::FetchFailed {
                url: url.clone(),
                status: *status,
                reason: reason.clone(),
            },
            Self::ArchiveError {
                reason,
            } => Self::ArchiveError {
                reason: reason.clone(),
            },
            Self::GitNotFound => Self::GitNotFound,
            Self::GitCloneFailed {
                url,
                reason,
            } => Self::GitCloneFailed {
                url: url.clone(),
                reason: reason.clone(),
            },
            Self::GitCommandError {
                operation,
                stderr,
            } => Self::GitCommandError {
                operation: operation.clone(),
                stderr: stderr.clone(),
            },
            Self::ConfigError {
                file,
                reason,
            } => Self::ConfigError {
                file: file.clone(),
                reason: reason.clone(),
            },
            Self::FileSystemError {
                operation,
                path,
            } => Self::FileSystemError {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::PermissionDenied {
                operation,
                path,
            } => Self::PermissionDenied {
                operation: operation.clone(),
                path: path.clone(),
            },
            Self::Other {
                message,
            } => Self::Other {
                message: message.clone(),
            },
        }
    }
}

/// A [`DocsError`] decorated for terminal display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: DocsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: DocsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add an actionable suggestion, shown in green.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add details explaining the error, shown in yellow.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error, details and suggestion to stderr.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with suggestions.
///
/// Recognizes [`DocsError`] (also when wrapped in an [`ErrorContext`]),
/// [`std::io::Error`] kinds and [`toml::de::Error`]. Anything else is shown
/// with its cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(ctx) = error.downcast_ref::<ErrorContext>() {
        return ErrorContext {
            error: ctx.error.clone(),
            suggestion: ctx.suggestion.clone(),
            details: ctx.details.clone(),
        };
    }

    if let Some(docs_error) = error.downcast_ref::<DocsError>() {
        return create_error_context(docs_error.clone());
    }

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        match io_error.kind() {
            std::io::ErrorKind::PermissionDenied => {
                return ErrorContext::new(DocsError::PermissionDenied {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check file ownership or choose another --output path")
                .with_details(error_chain(&error));
            }
            std::io::ErrorKind::NotFound => {
                return ErrorContext::new(DocsError::FileSystemError {
                    operation: "file access".to_string(),
                    path: "unknown".to_string(),
                })
                .with_suggestion("Check that the file or directory exists and the path is correct")
                .with_details(error_chain(&error));
            }
            _ => {}
        }
    }

    if let Some(toml_error) = error.downcast_ref::<toml::de::Error>() {
        return ErrorContext::new(DocsError::ConfigError {
            file: "config.toml".to_string(),
            reason: toml_error.to_string(),
        })
        .with_suggestion("Fix the TOML syntax in your agentdocs config file or remove it");
    }

    ErrorContext::new(DocsError::Other {
        message: error_chain(&error),
    })
}

/// Render an error and its causes as one message.
fn error_chain(error: &anyhow::Error) -> String {
    let mut message = error.to_string();
    let chain: Vec<String> = error.chain().skip(1).map(ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    message
}

fn create_error_context(error: DocsError) -> ErrorContext {
    match &error {
        DocsError::BadInput {
            message,
        } => {
            let ctx = ErrorContext::new(error.clone());
            if message.contains("Gemfile.lock") || message.contains("git source") {
                ctx.with_suggestion(
                    "Run from a Rails project or pass --rails-version (e.g. --rails-version 7.1.3)",
                )
            } else {
                ctx
            }
        }
        DocsError::FetchFailed {
            status: Some(404),
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check that the version exists as a git tag upstream")
            .with_details("The archive server answered 404 Not Found"),
        DocsError::FetchFailed {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check your network connection and re-run, optionally with --force"),
        DocsError::ArchiveError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Re-run with --force to download a fresh copy"),
        DocsError::GitNotFound => ErrorContext::new(DocsError::GitNotFound)
            .with_suggestion("Install git from https://git-scm.com/ and make sure it is on PATH")
            .with_details("Sources distributed as git repositories are cloned with the system git"),
        DocsError::GitCloneFailed {
            reason,
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check the repository URL and your network connection")
            .with_details(reason.clone()),
        DocsError::GitCommandError {
            stderr,
            ..
        } => ErrorContext::new(error.clone()).with_details(stderr.clone()),
        DocsError::ConfigError {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Fix the config file or point --config at another one"),
        DocsError::PermissionDenied {
            ..
        } => ErrorContext::new(error.clone())
            .with_suggestion("Check file ownership or choose another --output path"),
        DocsError::FileSystemError {
            ..
        }
        | DocsError::Other {
            ..
        } => ErrorContext::new(error.clone()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_input_message_is_verbatim() {
        let err = DocsError::bad_input("Rails gem not found in Gemfile.lock");
        assert_eq!(err.to_string(), "Rails gem not found in Gemfile.lock");
    }

    #[test]
    fn test_fetch_failed_carries_status() {
        let err = DocsError::FetchFailed {
            url: "https://example.com/a.zip".to_string(),
            status: Some(404),
            reason: "rails docs not found at https://example.com/a.zip".to_string(),
        };
        assert_eq!(err.status_code(), Some(404));
        assert!(err.to_string().contains("https://example.com/a.zip"));
        assert_eq!(DocsError::GitNotFound.status_code(), None);
    }

    #[test]
    fn test_user_friendly_error_for_404() {
        let err = anyhow::Error::from(DocsError::FetchFailed {
            url: "u".to_string(),
            status: Some(404),
            reason: "not found".to_string(),
        });
        let ctx = user_friendly_error(err);
        assert!(ctx.suggestion.unwrap().contains("git tag"));
    }

    #[test]
    fn test_user_friendly_error_for_missing_lockfile() {
        let err = anyhow::Error::from(DocsError::bad_input(
            "Gemfile.lock not found. Use --rails-version or run from a Rails project.",
        ));
        let ctx = user_friendly_error(err);
        assert!(matches!(ctx.error, DocsError::BadInput { .. }));
        assert!(ctx.suggestion.is_some());
    }

    #[test]
    fn test_user_friendly_error_keeps_cause_chain() {
        let err = anyhow::anyhow!("inner").context("outer");
        let ctx = user_friendly_error(err);
        let rendered = ctx.to_string();
        assert!(rendered.contains("outer"));
        assert!(rendered.contains("Caused by:"));
        assert!(rendered.contains("inner"));
    }

    #[test]
    fn test_user_friendly_error_io_permission() {
        let io = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let ctx = user_friendly_error(anyhow::Error::from(io));
        assert!(matches!(ctx.error, DocsError::PermissionDenied { .. }));
    }

    #[test]
    fn test_error_context_display_includes_suggestion() {
        let ctx = ErrorContext::new(DocsError::GitNotFound)
            .with_suggestion("Install git")
            .with_details("needed for alpine");
        let rendered = ctx.to_string();
        assert!(rendered.contains("Suggestion: Install git"));
        assert!(rendered.contains("Details: needed for alpine"));
    }
}
