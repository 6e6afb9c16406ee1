//! Repository artifact coordinates.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

use crate::core::IdeDepsError;

static SEGMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.+\-\[\]()]+$").expect("segment pattern is valid")
});

/// Requested coordinate of a repository artifact: `group:name:version[:classifier]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ArtifactCoordinate {
    pub group: String,
    pub name: String,
    pub version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classifier: Option<String>,
}

impl ArtifactCoordinate {
    /// Create a coordinate without a classifier.
    pub fn new(
        group: impl Into<String>,
        name: impl Into<String>,
        version: impl Into<String>,
    ) -> Self {
        Self {
            group: group.into(),
            name: name.into(),
            version: version.into(),
            classifier: None,
        }
    }

    /// Builder-style classifier.
    #[must_use]
    pub fn with_classifier(mut self, classifier: impl Into<String>) -> Self {
        self.classifier = Some(classifier.into());
        self
    }

    /// Module version this artifact belongs to (classifier dropped).
    pub fn module_version(&self) -> ModuleVersionId {
        ModuleVersionId {
            group: self.group.clone(),
            name: self.name.clone(),
            version: self.version.clone(),
        }
    }
}

impl fmt::Display for ArtifactCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{classifier}")?;
        }
        Ok(())
    }
}

impl FromStr for ArtifactCoordinate {
    type Err = IdeDepsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| IdeDepsError::InvalidCoordinate {
            coordinate: s.to_string(),
            reason: reason.to_string(),
        };

        let parts: Vec<&str> = s.trim().split(':').collect();
        if !(3..=4).contains(&parts.len()) {
            return Err(invalid("expected 3 or 4 ':'-separated parts"));
        }
        if let Some(bad) = parts.iter().find(|part| !SEGMENT.is_match(part)) {
            return Err(invalid(&format!("invalid segment '{bad}'")));
        }

        let mut coordinate = ArtifactCoordinate::new(parts[0], parts[1], parts[2]);
        if let Some(classifier) = parts.get(3) {
            coordinate = coordinate.with_classifier(*classifier);
        }
        Ok(coordinate)
    }
}

/// Resolved module version, `group:name:version`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ModuleVersionId {
    pub group: String,
    pub name: String,
    pub version: String,
}

impl fmt::Display for ModuleVersionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)
    }
}
