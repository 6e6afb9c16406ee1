//! Path handling: lexical normalization, descriptor path expansion, and conversion of
//! absolute paths into the portable form written to IDE files.

use anyhow::{Context, Result};
use std::path::{Component, Path, PathBuf};

use crate::models::FilePath;

/// Path variable for the module directory.
pub const MODULE_DIR: &str = "$MODULE_DIR$";
/// Path variable for the user's home directory.
pub const USER_HOME: &str = "$USER_HOME$";

/// Lexically normalize a path, removing `.` and resolving `..` without touching disk.
///
/// ```rust
/// use ideadeps_cli::utils::paths::normalize_path;
/// use std::path::{Path, PathBuf};
///
/// assert_eq!(normalize_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
/// ```
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                // `..` at the root stays at the root
                Some(Component::RootDir | Component::Prefix(_)) => {}
                _ => components.push(Component::ParentDir),
            },
            c => components.push(c),
        }
    }

    components.iter().collect()
}

/// Render a path with forward slashes regardless of platform.
#[must_use]
pub fn normalize_path_for_storage<P: AsRef<Path>>(path: P) -> String {
    path.as_ref().to_string_lossy().replace('\\', "/")
}

/// Expand `~` and environment variables in a descriptor path, then anchor relative
/// results at `base` and normalize.
pub fn resolve_path(raw: &str, base: &Path) -> Result<PathBuf> {
    let expanded = shellexpand::full(raw)
        .with_context(|| format!("Failed to expand variables in path: {raw}"))?;
    let path = PathBuf::from(expanded.as_ref());
    let absolute = if path.is_absolute() { path } else { base.join(path) };
    Ok(normalize_path(&absolute))
}

/// Converts absolute paths into [`FilePath`]s relative to named path variables.
///
/// The longest variable root containing the path wins; paths outside every root stay
/// absolute.
#[derive(Debug, Clone, Default)]
pub struct PathFactory {
    variables: Vec<(String, PathBuf)>,
}

impl PathFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory with `$MODULE_DIR$` and, when known, `$USER_HOME$`.
    pub fn for_module(module_dir: &Path) -> Self {
        let mut factory = Self::new().with_variable(MODULE_DIR, module_dir);
        if let Some(home) = dirs::home_dir() {
            factory = factory.with_variable(USER_HOME, home);
        }
        factory
    }

    /// Register a path variable.
    #[must_use]
    pub fn with_variable(mut self, name: impl Into<String>, root: impl AsRef<Path>) -> Self {
        self.variables.push((name.into(), normalize_path(root.as_ref())));
        self
    }

    /// Convert an absolute path.
    pub fn path(&self, file: &Path) -> FilePath {
        let canonical = normalize_path(file);
        let best = self
            .variables
            .iter()
            .filter_map(|(name, root)| {
                canonical.strip_prefix(root).ok().map(|rest| (name, root, rest))
            })
            .max_by_key(|(_, root, _)| root.components().count());

        let path = match best {
            Some((name, _, rest)) if rest.as_os_str().is_empty() => name.clone(),
            Some((name, _, rest)) => format!("{name}/{}", normalize_path_for_storage(rest)),
            None => normalize_path_for_storage(&canonical),
        };

        let url = if is_archive(&canonical) {
            format!("jar://{path}!/")
        } else {
            format!("file://{path}")
        };

        FilePath {
            url,
            path,
            canonical,
        }
    }
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("jar") || ext.eq_ignore_ascii_case("zip"))
}
