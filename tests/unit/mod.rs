//! Unit test suite for the ideadeps library API
//!
//! These tests use the public library surface directly, with in-memory registries and
//! Maven-layout repositories in temporary directories.
//!
//! ```bash
//! cargo test --test unit
//! ```

mod config;
mod resolution;
