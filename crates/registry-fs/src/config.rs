//! Registry configuration loading
//!
//! `registry.toml` at the registry root may override the default layout
//! paths. The file is optional; every field is optional.

use serde::{Deserialize, Serialize};

use crate::{Error, NormalizedPath, Result, io, layout::RegistryLayout};

/// File name of the optional registry configuration.
pub const CONFIG_FILE: &str = "registry.toml";

/// Top-level `registry.toml` contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RegistryConfig {
    #[serde(default)]
    pub layout: LayoutOverrides,
}

/// `[layout]` section: paths relative to the registry root.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LayoutOverrides {
    pub index: Option<String>,
    pub records: Option<String>,
    pub exports: Option<String>,
    pub schema: Option<String>,
}

impl RegistryConfig {
    /// Load `registry.toml` from the root, falling back to defaults when
    /// the file does not exist.
    pub fn load(root: &NormalizedPath) -> Result<Self> {
        let path = root.join(CONFIG_FILE);
        if !path.is_file() {
            return Ok(Self::default());
        }
        let content = io::read_text(&path)?;
        toml::from_str(&content).map_err(|e| Error::ConfigParse {
            path: path.to_native(),
            format: "TOML".into(),
            message: e.to_string(),
        })
    }

    /// Resolve the working-tree layout for `root` under this config.
    pub fn resolve_layout(&self, root: NormalizedPath) -> RegistryLayout {
        RegistryLayout::with_overrides(root, &self.layout)
    }
}
