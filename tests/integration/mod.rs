//! Integration test suite for ideadeps
//!
//! These tests drive the `ideadeps` binary against temporary module directories.
//!
//! ```bash
//! cargo test --test integration
//! ```
//!
//! # Test Organization
//!
//! - **resolve**: `resolve` output, scope filter, JSON, offline mode
//! - **unresolved**: `unresolved` output
//! - **buckets**: `buckets` rule listing
//! - **errors**: descriptor errors and their suggestions

#[path = "../common/mod.rs"]
mod common;

mod buckets;
mod errors;
mod resolve;
