//! Command implementations

mod build;
mod sync;
mod validate;

pub use build::{run_build, run_check};
pub use sync::run_sync;
pub use validate::run_validate;

use std::path::Path;

use registry_fs::{NormalizedPath, RegistryConfig, RegistryLayout};

use crate::error::Result;

/// Resolve the working-tree layout for a registry root.
///
/// Canonicalizes the root and applies any `registry.toml` overrides.
pub(crate) fn resolve_layout(root: &Path) -> Result<RegistryLayout> {
    let canonical = dunce::canonicalize(root).unwrap_or_else(|_| root.to_path_buf());
    let root = NormalizedPath::new(canonical);
    let config = RegistryConfig::load(&root)?;
    Ok(config.resolve_layout(root))
}
