//! IDE classpath scopes.
//!
//! Two enums live here:
//! - [`IdeaScope`] - the four labels an IDE module understands (`PROVIDED`, `COMPILE`,
//!   `TEST`, `RUNTIME`). Every emitted dependency carries exactly one of these.
//! - [`GeneratedScope`] - the names accepted in scope override tables. Besides the four
//!   primitives it keeps a handful of legacy aliases that combine several labels. The
//!   aliases are still accepted as override keys so older descriptors load, but they are
//!   never matched during resolution.
//!
//! # Examples
//!
//! ```rust
//! use ideadeps_cli::core::{GeneratedScope, IdeaScope};
//!
//! let scope: GeneratedScope = "runtime_test".parse().unwrap();
//! assert!(scope.is_composite());
//! assert_eq!(scope.labels(), &[IdeaScope::Runtime, IdeaScope::Test]);
//!
//! let primitives: Vec<_> = GeneratedScope::primitives().collect();
//! assert_eq!(primitives.len(), 4);
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::core::IdeDepsError;

/// Classpath scope label of an IDE module dependency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum IdeaScope {
    /// Available at compile time, supplied by the runtime container
    Provided,
    /// Available everywhere
    Compile,
    /// Only on the test classpath
    Test,
    /// Only on the runtime classpath
    Runtime,
}

impl IdeaScope {
    /// All labels in declaration order.
    pub const ALL: [IdeaScope; 4] =
        [IdeaScope::Provided, IdeaScope::Compile, IdeaScope::Test, IdeaScope::Runtime];

    /// Upper-case label written into IDE module files.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            IdeaScope::Provided => "PROVIDED",
            IdeaScope::Compile => "COMPILE",
            IdeaScope::Test => "TEST",
            IdeaScope::Runtime => "RUNTIME",
        }
    }
}

impl fmt::Display for IdeaScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for IdeaScope {
    type Err = IdeDepsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "PROVIDED" => Ok(IdeaScope::Provided),
            "COMPILE" => Ok(IdeaScope::Compile),
            "TEST" => Ok(IdeaScope::Test),
            "RUNTIME" => Ok(IdeaScope::Runtime),
            _ => Err(IdeDepsError::UnknownScope {
                scope: s.to_string(),
            }),
        }
    }
}

/// Scope names usable as keys in scope override tables.
///
/// The primitive variants map one-to-one onto [`IdeaScope`]. The remaining variants are
/// legacy aliases that leaked into descriptor files as plain strings; they are kept so
/// those files keep loading, and they are excluded from matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum GeneratedScope {
    Provided,
    Compile,
    Test,
    Runtime,
    ProvidedTest,
    RuntimeCompileClasspath,
    RuntimeTestCompileClasspath,
    RuntimeTest,
    CompileClasspath,
}

impl GeneratedScope {
    /// Every generated scope, primitives first.
    pub const ALL: [GeneratedScope; 9] = [
        GeneratedScope::Provided,
        GeneratedScope::Compile,
        GeneratedScope::Test,
        GeneratedScope::Runtime,
        GeneratedScope::ProvidedTest,
        GeneratedScope::RuntimeCompileClasspath,
        GeneratedScope::RuntimeTestCompileClasspath,
        GeneratedScope::RuntimeTest,
        GeneratedScope::CompileClasspath,
    ];

    /// The scopes that take part in matching.
    pub fn primitives() -> impl Iterator<Item = GeneratedScope> {
        Self::ALL.into_iter().filter(|scope| scope.primitive().is_some())
    }

    /// Labels carried by this scope.
    #[must_use]
    pub const fn labels(self) -> &'static [IdeaScope] {
        match self {
            GeneratedScope::Provided => &[IdeaScope::Provided],
            GeneratedScope::Compile => &[IdeaScope::Compile],
            GeneratedScope::Test => &[IdeaScope::Test],
            GeneratedScope::Runtime => &[IdeaScope::Runtime],
            GeneratedScope::ProvidedTest => &[IdeaScope::Provided, IdeaScope::Test],
            GeneratedScope::RuntimeCompileClasspath => &[IdeaScope::Provided, IdeaScope::Runtime],
            GeneratedScope::RuntimeTestCompileClasspath => {
                &[IdeaScope::Provided, IdeaScope::Test]
            }
            GeneratedScope::RuntimeTest => &[IdeaScope::Runtime, IdeaScope::Test],
            GeneratedScope::CompileClasspath => &[IdeaScope::Provided],
        }
    }

    /// True when the scope combines more than one label.
    #[must_use]
    pub const fn is_composite(self) -> bool {
        self.labels().len() > 1
    }

    /// The primitive label, or `None` for legacy aliases.
    #[must_use]
    pub const fn primitive(self) -> Option<IdeaScope> {
        match self {
            GeneratedScope::Provided => Some(IdeaScope::Provided),
            GeneratedScope::Compile => Some(IdeaScope::Compile),
            GeneratedScope::Test => Some(IdeaScope::Test),
            GeneratedScope::Runtime => Some(IdeaScope::Runtime),
            _ => None,
        }
    }

    /// Name as written in descriptor files.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            GeneratedScope::Provided => "PROVIDED",
            GeneratedScope::Compile => "COMPILE",
            GeneratedScope::Test => "TEST",
            GeneratedScope::Runtime => "RUNTIME",
            GeneratedScope::ProvidedTest => "PROVIDED_TEST",
            GeneratedScope::RuntimeCompileClasspath => "RUNTIME_COMPILE_CLASSPATH",
            GeneratedScope::RuntimeTestCompileClasspath => "RUNTIME_TEST_COMPILE_CLASSPATH",
            GeneratedScope::RuntimeTest => "RUNTIME_TEST",
            GeneratedScope::CompileClasspath => "COMPILE_CLASSPATH",
        }
    }
}

impl From<IdeaScope> for GeneratedScope {
    fn from(scope: IdeaScope) -> Self {
        match scope {
            IdeaScope::Provided => GeneratedScope::Provided,
            IdeaScope::Compile => GeneratedScope::Compile,
            IdeaScope::Test => GeneratedScope::Test,
            IdeaScope::Runtime => GeneratedScope::Runtime,
        }
    }
}

impl fmt::Display for GeneratedScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for GeneratedScope {
    type Err = IdeDepsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.to_uppercase().replace('-', "_");
        Self::ALL.into_iter().find(|scope| scope.name() == wanted).ok_or_else(|| {
            IdeDepsError::UnknownScope {
                scope: s.to_string(),
            }
        })
    }
}
