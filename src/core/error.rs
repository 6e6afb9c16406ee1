//! Error handling for ideadeps
//!
//! This module provides the error types and user-friendly error reporting for the
//! scope resolver. The error system is built around two types:
//! - [`IdeDepsError`] - Enumerated error types for every failure the crate reports
//! - [`ErrorContext`] - Wrapper that adds user-friendly details and suggestions
//!
//! Resolution itself never fails on missing buckets or unresolved artifacts; those are
//! tolerated and reported through the normal result. Errors here come from loading the
//! project descriptor, validating bucket hierarchies, and reading the artifact repository.
//!
//! # Examples
//!
//! ```rust,no_run
//! use ideadeps_cli::core::{IdeDepsError, ErrorContext, user_friendly_error};
//!
//! fn load() -> anyhow::Result<()> {
//!     Err(IdeDepsError::ConfigNotFound { path: "ideadeps.toml".to_string() }.into())
//! }
//!
//! if let Err(e) = load() {
//!     let ctx = user_friendly_error(e);
//!     ctx.display(); // Shows colored error with suggestions
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for ideadeps operations
///
/// # Error Categories
///
/// ## Configuration
/// - [`ConfigNotFound`] - descriptor file missing
/// - [`ConfigParseError`] - invalid TOML in the descriptor
/// - [`ConfigValidationError`] - descriptor parsed but is inconsistent
/// - [`UnknownScope`] - scope name not recognised
///
/// ## Buckets and declarations
/// - [`UnknownBucket`] - a bucket references a parent or snapshot source that does not exist
/// - [`CircularBucketHierarchy`] - bucket `extends` chain loops back on itself
/// - [`InvalidCoordinate`] - artifact coordinate could not be parsed
///
/// ## Wrapped errors
/// - [`IoError`]
///
/// [`ConfigNotFound`]: IdeDepsError::ConfigNotFound
/// [`ConfigParseError`]: IdeDepsError::ConfigParseError
/// [`ConfigValidationError`]: IdeDepsError::ConfigValidationError
/// [`UnknownScope`]: IdeDepsError::UnknownScope
/// [`UnknownBucket`]: IdeDepsError::UnknownBucket
/// [`CircularBucketHierarchy`]: IdeDepsError::CircularBucketHierarchy
/// [`InvalidCoordinate`]: IdeDepsError::InvalidCoordinate
/// [`IoError`]: IdeDepsError::IoError
#[derive(Error, Debug)]
pub enum IdeDepsError {
    /// Project descriptor not found
    #[error("Project descriptor not found: {path}")]
    ConfigNotFound {
        /// Path that was searched
        path: String,
    },

    /// Project descriptor parsing error
    #[error("Invalid project descriptor syntax in {file}")]
    ConfigParseError {
        /// Path to the descriptor that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    /// Project descriptor validation error
    #[error("Project descriptor validation failed: {reason}")]
    ConfigValidationError {
        /// Reason why validation failed
        reason: String,
    },

    /// Scope name not recognised
    #[error("Unknown scope: {scope}")]
    UnknownScope {
        /// The scope name as written
        scope: String,
    },

    /// Bucket referenced but never defined
    ///
    /// Raised while building a registry, when a bucket `extends` or snapshots a bucket
    /// that does not exist. Scope rules never raise this: a missing bucket there simply
    /// contributes nothing.
    #[error("Bucket '{name}' referenced by '{referenced_by}' is not defined")]
    UnknownBucket {
        /// Name of the missing bucket
        name: String,
        /// Bucket holding the dangling reference
        referenced_by: String,
        /// Defined bucket names close to the missing one
        similar: Vec<String>,
    },

    /// Circular bucket hierarchy
    #[error("Circular bucket hierarchy detected: {chain}")]
    CircularBucketHierarchy {
        /// The chain of bucket names forming the cycle
        chain: String,
    },

    /// Invalid artifact coordinate
    #[error("Invalid artifact coordinate '{coordinate}': {reason}")]
    InvalidCoordinate {
        /// The coordinate as written
        coordinate: String,
        /// Why it was rejected
        reason: String,
    },

    /// IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),



    /// Other error
    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error wrapper carrying a user-facing suggestion and details.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: IdeDepsError,
    /// Optional suggestion for resolving the error
    pub suggestion: Option<String>,
    /// Optional additional details about the error
    pub details: Option<String>,
}

impl ErrorContext {
    /// Create a new error context with no suggestion or details.
    #[must_use]
    pub const fn new(error: IdeDepsError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    /// Add a suggestion for resolving the error.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Add additional details explaining the error.
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Display the error context to stderr with terminal colors
    ///
    /// - Error message: Red and bold
    /// - Details: Yellow
    /// - Suggestion: Green
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

/// Convert any error into a user-friendly [`ErrorContext`].
///
/// Known [`IdeDepsError`] variants get tailored suggestions and a missing file gets a
/// path hint. Anything else is wrapped as
/// [`IdeDepsError::Other`] with the full anyhow chain as the message.
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if error.downcast_ref::<ErrorContext>().is_some() {
        return match error.downcast::<ErrorContext>() {
            Ok(ctx) => ctx,
            Err(error) => ErrorContext::new(IdeDepsError::Other {
                message: format!("{error:#}"),
            }),
        };
    }

    let error = match error.downcast::<IdeDepsError>() {
        Ok(error) => return create_error_context(error),
        Err(error) => error,
    };

    if let Some(io_error) = error.downcast_ref::<std::io::Error>() {
        if io_error.kind() == std::io::ErrorKind::NotFound {
            return ErrorContext::new(IdeDepsError::Other {
                message: format!("{error:#}"),
            })
            .with_suggestion("Check that the file or directory exists and the path is correct");
        }
    }

    ErrorContext::new(IdeDepsError::Other {
        message: format!("{error:#}"),
    })
}

fn create_error_context(error: IdeDepsError) -> ErrorContext {
    match &error {
        IdeDepsError::ConfigNotFound { .. } => ErrorContext::new(error)
            .with_suggestion("Create an ideadeps.toml next to the module or pass --config <path>")
            .with_details("ideadeps reads the module's buckets and scope rules from a TOML project descriptor"),
        IdeDepsError::ConfigParseError { reason, .. } => {
            let reason = reason.clone();
            ErrorContext::new(error)
                .with_details(reason)
                .with_suggestion("Check the TOML syntax. Verify quotes, brackets, and table names")
        }
        IdeDepsError::UnknownScope { .. } => ErrorContext::new(error)
            .with_suggestion("Use one of PROVIDED, COMPILE, TEST or RUNTIME"),
        IdeDepsError::UnknownBucket { similar, .. } => {
            let suggestion = if similar.is_empty() {
                "Define the bucket under [buckets.<name>] or remove the reference".to_string()
            } else {
                format!("Did you mean: {}?", similar.join(", "))
            };
            ErrorContext::new(error).with_suggestion(suggestion)
        }
        IdeDepsError::CircularBucketHierarchy { .. } => ErrorContext::new(error)
            .with_suggestion("Remove one of the 'extends' entries so the bucket hierarchy forms a tree")
            .with_details("A bucket cannot inherit from itself, directly or through its parents"),
        IdeDepsError::InvalidCoordinate { .. } => ErrorContext::new(error)
            .with_suggestion("Write artifacts as 'group:name:version' or 'group:name:version:classifier'"),
        _ => ErrorContext::new(error),
    }
}
