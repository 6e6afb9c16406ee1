//! Directory libraries attached to a scope directly, bypassing bucket matching.

use tracing::{debug, trace};

use crate::models::{
    DependencyIdentity, IdeDependency, ResolvedDependency, SingleEntryLibrary,
};
use crate::module::ModuleDescriptor;
use crate::utils::paths::normalize_path;

/// One library record per configured path that is an existing directory.
///
/// Missing paths and plain files are dropped. No deduplication against bucket-derived
/// records happens here.
pub fn inject_explicit(module: &ModuleDescriptor) -> Vec<ResolvedDependency> {
    let mut injected = Vec::new();

    for (&scope, dirs) in &module.single_entry_libraries {
        for dir in dirs {
            if !dir.is_dir() {
                trace!("Skipping library {} for {}: not a directory", dir.display(), scope);
                continue;
            }
            let path = normalize_path(dir);
            injected.push(ResolvedDependency {
                dependency: IdeDependency::Library(SingleEntryLibrary::plain(
                    module.path_factory.path(&path),
                )),
                identity: DependencyIdentity::LocalFile { path },
                scope,
            });
        }
    }

    if !injected.is_empty() {
        debug!("Injected {} explicit libraries", injected.len());
    }
    injected
}
