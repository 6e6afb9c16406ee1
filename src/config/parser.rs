//! TOML loading with typed errors.

use anyhow::Result;
use std::path::Path;

use crate::core::IdeDepsError;

/// Read and deserialize a TOML file.
///
/// A missing file becomes [`IdeDepsError::ConfigNotFound`] and a syntax or shape error
/// becomes [`IdeDepsError::ConfigParseError`].
pub fn parse_config<T>(path: &Path) -> Result<T>
where
    T: serde::de::DeserializeOwned,
{
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(IdeDepsError::ConfigNotFound {
                path: path.display().to_string(),
            }
            .into());
        }
        Err(e) => return Err(IdeDepsError::IoError(e).into()),
    };

    let config: T = toml::from_str(&content).map_err(|e| IdeDepsError::ConfigParseError {
        file: path.display().to_string(),
        reason: e.to_string().trim_end().to_string(),
    })?;

    Ok(config)
}
