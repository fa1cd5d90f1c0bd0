//! Filesystem abstraction for the TOIL registry pipeline
//!
//! Provides the registry directory layout, safe atomic I/O, and content
//! checksums used for drift and mutation checks.

pub mod checksum;
pub mod config;
pub mod error;
pub mod io;
pub mod layout;
pub mod path;

pub use config::RegistryConfig;
pub use error::{Error, Result};
pub use layout::RegistryLayout;
pub use path::NormalizedPath;
