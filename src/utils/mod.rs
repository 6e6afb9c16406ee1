//! Utilities
//!
//! - [`paths`] - Lexical normalization, descriptor path expansion, and conversion to
//!   the portable `$MODULE_DIR$`/`$USER_HOME$` form written to IDE files

pub mod paths;
