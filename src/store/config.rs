use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PublishError;
use crate::model::PublishConfig;

pub const CONFIG_FILE: &str = "publish.config.toml";

const CONFIG_TEMPLATE: &str = r#"# pkg-publish configuration

# Command run before the publish directory is assembled.
build_command = "npm run build"

# Staging directory, relative to this file. An empty string publishes from
# the current directory.
publish_dir = "publish"

# Registry commands run inside the publish directory with --yes.
# pack_command = "npm pack"
# publish_command = "npm publish"

# Extra files copied into the publish directory.
# [[copy]]
# type = "file"
# source = "LICENSE"
# target = "LICENSE"
# description = "LICENSE"
#
# [[copy]]
# type = "file"
# source = "README.md"
# target = "README.md"
# description = "README.md"
#
# [[copy]]
# type = "dir"
# source = "docs"
# target = "docs"
# description = "docs directory"

# Entries removed from object fields of the published package.json.
[filter]
scripts = [
    # "test",
    # "dev",
]
devDependencies = [
    # "@types/jest",
    # "jest",
    # "typescript",
]
"#;

/// Locates and reads `publish.config.toml` in a project root.
pub struct ConfigStore {
    root: PathBuf,
}

impl ConfigStore {
    pub fn new(root: &Path) -> Self {
        Self {
            root: root.to_path_buf(),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.root.join(CONFIG_FILE)
    }

    /// Write the commented template. Never overwrites an existing file.
    pub fn init(&self) -> Result<PathBuf, PublishError> {
        let path = self.path();
        if path.exists() {
            return Err(PublishError::ConfigExists(path));
        }
        fs::write(&path, CONFIG_TEMPLATE).map_err(|source| PublishError::FileWrite {
            path: path.clone(),
            source,
        })?;
        Ok(path)
    }

    /// Load the configuration, falling back to an empty one when the file is
    /// missing or unreadable.
    pub fn load(&self) -> PublishConfig {
        let path = self.path();
        if !path.exists() {
            tracing::debug!(path = %path.display(), "no configuration file");
            return PublishConfig::default();
        }

        println!("Loading config from ./{CONFIG_FILE}");
        match read_config(&path) {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load configuration");
                PublishConfig::default()
            }
        }
    }
}

fn read_config(path: &Path) -> Result<PublishConfig, PublishError> {
    let content = fs::read_to_string(path).map_err(|source| PublishError::FileRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config: PublishConfig = toml::from_str(&content)?;
    Ok(config)
}
