pub mod config;
pub mod manifest;

pub use config::{CopyKind, CopyRule, PublishConfig, ResolvedConfig};
pub use manifest::{MANIFEST_FILE, Manifest};
