use std::path::Path;

use anyhow::{Context, Result};

use crate::error::PublishError;
use crate::store::{ConfigStore, PublishDir};

pub fn run(root: &Path) -> Result<()> {
    let config = ConfigStore::new(root).load();
    if config.is_empty() {
        return Err(PublishError::ConfigNotFound.into());
    }
    let config = config.resolve(None);

    let dir = PublishDir::new(root, &config.publish_dir);
    let removed = dir
        .clean()
        .with_context(|| format!("failed to clean {}", dir.path().display()))?;

    if removed {
        println!("Removed publish directory {}", config.publish_dir);
    } else {
        tracing::warn!(dir = %config.publish_dir, "publish directory does not exist");
        println!("Nothing to clean: {} does not exist", config.publish_dir);
    }
    Ok(())
}
