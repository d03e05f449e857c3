use std::path::Path;

use anyhow::{Context, Result};

use crate::store::{CONFIG_FILE, ConfigStore};

pub fn run(root: &Path) -> Result<()> {
    let path = ConfigStore::new(root)
        .init()
        .context("failed to create configuration")?;

    println!("Created {CONFIG_FILE} at {}", path.display());
    println!("Edit it for your project, then run pkg-publish again.");
    Ok(())
}
