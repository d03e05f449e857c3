use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

pub const DEFAULT_PUBLISH_DIR: &str = "publish";
pub const DEFAULT_PACK_COMMAND: &str = "npm pack";
pub const DEFAULT_PUBLISH_COMMAND: &str = "npm publish";

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CopyKind {
    File,
    Dir,
}

impl std::fmt::Display for CopyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::File => write!(f, "file"),
            Self::Dir => write!(f, "dir"),
        }
    }
}

/// One file or directory tree to copy into the publish directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CopyRule {
    #[serde(rename = "type")]
    pub kind: CopyKind,
    pub source: PathBuf,
    pub target: PathBuf,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl CopyRule {
    pub fn label(&self) -> String {
        self.description
            .clone()
            .unwrap_or_else(|| self.source.display().to_string())
    }
}

/// Contents of `publish.config.toml`. Every field is optional so that an
/// absent key can be told apart from an explicitly empty one.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct PublishConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pack_command: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publish_command: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub copy: Vec<CopyRule>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub filter: BTreeMap<String, Vec<String>>,
}

impl PublishConfig {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Merge CLI overrides and fill in defaults.
    pub fn resolve(self, build_command: Option<String>) -> ResolvedConfig {
        ResolvedConfig {
            build_command: build_command
                .filter(|c| !c.trim().is_empty())
                .or(self.build_command)
                .filter(|c| !c.trim().is_empty()),
            publish_dir: self
                .publish_dir
                .unwrap_or_else(|| DEFAULT_PUBLISH_DIR.to_string()),
            pack_command: self
                .pack_command
                .unwrap_or_else(|| DEFAULT_PACK_COMMAND.to_string()),
            publish_command: self
                .publish_command
                .unwrap_or_else(|| DEFAULT_PUBLISH_COMMAND.to_string()),
            copy: self.copy,
            filter: self.filter,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub build_command: Option<String>,
    /// Empty means publish in the working directory itself.
    pub publish_dir: String,
    pub pack_command: String,
    pub publish_command: String,
    pub copy: Vec<CopyRule>,
    pub filter: BTreeMap<String, Vec<String>>,
}
