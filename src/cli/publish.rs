use std::path::Path;

use anyhow::{Context, Result};

use crate::cli::Cli;
use crate::error::PublishError;
use crate::model::{MANIFEST_FILE, Manifest, ResolvedConfig};
use crate::process;
use crate::store::{ConfigStore, PublishDir};
use crate::version;

pub fn run(root: &Path, cli: &Cli) -> Result<()> {
    println!("Starting publish process...");

    let config = ConfigStore::new(root).load();
    if config.is_empty() {
        return Err(PublishError::ConfigNotFound.into());
    }
    let config = config.resolve(cli.build_command.clone());
    let Some(build_command) = config.build_command.clone() else {
        return Err(PublishError::MissingBuildCommand.into());
    };

    let dir = PublishDir::new(root, &config.publish_dir);
    print_summary(&config, &dir, &build_command);

    if dir.is_in_place() {
        println!("Publishing in current directory");
    } else {
        println!("Cleaning publish directory: {}", config.publish_dir);
        dir.reset()
            .with_context(|| format!("failed to prepare {}", dir.path().display()))?;
        println!("Publish directory created");
    }

    println!("Building project with: {build_command}");
    process::run_shell(&build_command, Some(root)).context("build failed")?;
    println!("Build completed");

    let manifest_path = root.join(MANIFEST_FILE);
    let manifest = Manifest::load(&manifest_path).context("failed to read package manifest")?;

    let summary = dir
        .copy_rules(root, &config.copy)
        .context("failed to copy files")?;
    println!(
        "Files copied: {} copied, {} skipped",
        summary.copied, summary.skipped
    );

    let increment = cli.should_increment();
    let current = manifest.version().map(str::to_string);
    let new_version = match (&current, increment) {
        (Some(v), true) => Some(version::increment_patch(v)?),
        (None, true) => return Err(PublishError::MissingVersion(manifest_path).into()),
        (v, false) => v.clone(),
    };

    write_manifests(
        &manifest,
        &manifest_path,
        current.as_deref(),
        new_version.as_deref(),
        &config,
        &dir,
        increment,
    )?;

    if cli.yes {
        registry_publish(&config, &dir)?;
    }

    println!("Process completed successfully!");
    Ok(())
}

fn print_summary(config: &ResolvedConfig, dir: &PublishDir, build_command: &str) {
    let publish_dir = if dir.is_in_place() {
        "(current directory)"
    } else {
        config.publish_dir.as_str()
    };
    println!("Using configuration:");
    println!("  build command:  {build_command}");
    println!("  publish dir:    {publish_dir}");
    println!("  copy rules:     {}", config.copy.len());
    println!("  filter rules:   {}", config.filter.len());
    println!();
}

fn write_manifests(
    manifest: &Manifest,
    manifest_path: &Path,
    current: Option<&str>,
    new_version: Option<&str>,
    config: &ResolvedConfig,
    dir: &PublishDir,
    increment: bool,
) -> Result<()> {
    let changed = new_version != current;
    if let (true, Some(from), Some(to)) = (changed, current, new_version) {
        println!("Updating version from {from} to {to}");
    }

    let published = manifest.for_publish(new_version, &config.filter);

    let publish_manifest = dir.path().join(MANIFEST_FILE);
    published
        .save(&publish_manifest)
        .context("failed to write publish manifest")?;
    println!("Publish manifest written to {}", publish_manifest.display());

    if increment && changed {
        if let Some(v) = new_version {
            let mut source = manifest.clone();
            source.set_version(v);
            source
                .save(manifest_path)
                .context("failed to update package manifest")?;
            println!("Updated version in {MANIFEST_FILE}");
        }
    }
    Ok(())
}

fn registry_publish(config: &ResolvedConfig, dir: &PublishDir) -> Result<()> {
    println!("Creating package with: {}", config.pack_command);
    process::run_shell(&config.pack_command, Some(dir.path())).context("pack failed")?;
    println!("Package created");

    println!("Publishing with: {}", config.publish_command);
    process::run_shell(&config.publish_command, Some(dir.path())).context("publish failed")?;
    println!("Package published successfully!");

    let removed = dir.remove_artifacts();
    tracing::debug!(removed, "cleaned pack artifacts");
    println!("Temporary files cleaned");
    Ok(())
}
