//! Core types for ideadeps
//!
//! This module holds the pieces every other module leans on:
//!
//! ## `error` - Error Handling
//! - [`IdeDepsError`] - Enumerated error types
//! - [`ErrorContext`] - User-friendly error wrapper with suggestions and details
//! - [`user_friendly_error`] - Convert any error to user-friendly format
//!
//! ## `scope` - Scope Labels
//! - [`IdeaScope`] - The four labels an emitted dependency can carry
//! - [`GeneratedScope`] - Override keys, including legacy composite aliases

pub mod error;
pub mod scope;

pub use error::{ErrorContext, IdeDepsError, user_friendly_error};
pub use scope::{GeneratedScope, IdeaScope};
