use std::fs;
use std::path::{Component, Path, PathBuf};

use globset::Glob;

use crate::error::PublishError;
use crate::model::{CopyKind, CopyRule};

/// Files left behind by the registry pack step.
const ARTIFACT_PATTERN: &str = "*.tgz";

/// The staging directory a package is assembled in.
pub struct PublishDir {
    path: PathBuf,
    in_place: bool,
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct CopySummary {
    pub copied: usize,
    pub skipped: usize,
}

impl PublishDir {
    /// `dir` is relative to `root`. Anything resolving to `root` or one of
    /// its ancestors (`""`, `.`, `publish/..`) stages in `root` itself.
    pub fn new(root: &Path, dir: &str) -> Self {
        let candidate = normalize(&root.join(dir));
        let in_place = contains(&candidate, root);
        let path = if in_place {
            root.to_path_buf()
        } else {
            candidate
        };
        Self { path, in_place }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn is_in_place(&self) -> bool {
        self.in_place
    }

    /// Remove the directory tree. Returns `false` when there was nothing to
    /// remove.
    pub fn clean(&self) -> Result<bool, PublishError> {
        if self.in_place {
            return Err(PublishError::InPlacePublish);
        }
        if !self.path.exists() {
            return Ok(false);
        }
        fs::remove_dir_all(&self.path).map_err(|source| PublishError::DirRemove {
            path: self.path.clone(),
            source,
        })?;
        Ok(true)
    }

    /// Clean and recreate an empty directory.
    pub fn reset(&self) -> Result<(), PublishError> {
        self.clean()?;
        fs::create_dir_all(&self.path).map_err(|source| PublishError::DirCreate {
            path: self.path.clone(),
            source,
        })?;
        Ok(())
    }

    /// Apply copy rules with sources relative to `root`. Missing sources are
    /// skipped with a warning.
    pub fn copy_rules(&self, root: &Path, rules: &[CopyRule]) -> Result<CopySummary, PublishError> {
        let mut summary = CopySummary::default();

        for rule in rules {
            println!("Copying {}...", rule.label());
            let source = root.join(&rule.source);
            let target = self.path.join(&rule.target);

            if !source.exists() {
                tracing::warn!(
                    source = %rule.source.display(),
                    "copy source not found, skipping"
                );
                summary.skipped += 1;
                continue;
            }

            match rule.kind {
                CopyKind::File => copy_file(&source, &target)?,
                CopyKind::Dir => copy_dir_recursive(&source, &target)?,
            }
            tracing::debug!(kind = %rule.kind, from = %source.display(), to = %target.display(), "copied");
            summary.copied += 1;
        }
        Ok(summary)
    }

    /// Delete pack artifacts from the top level of the directory. Individual
    /// failures are logged and do not stop the sweep.
    pub fn remove_artifacts(&self) -> usize {
        let matcher = match Glob::new(ARTIFACT_PATTERN) {
            Ok(glob) => glob.compile_matcher(),
            Err(e) => {
                tracing::warn!(error = %e, "invalid artifact pattern");
                return 0;
            }
        };

        let entries = match fs::read_dir(&self.path) {
            Ok(entries) => entries,
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "failed to list publish directory");
                return 0;
            }
        };

        let mut removed = 0;
        for entry in entries.flatten() {
            let path = entry.path();
            if !path.is_file() || !matcher.is_match(entry.file_name()) {
                continue;
            }
            match fs::remove_file(&path) {
                Ok(()) => removed += 1,
                Err(e) => {
                    tracing::warn!(path = %path.display(), error = %e, "failed to remove artifact")
                }
            }
        }
        removed
    }
}

fn copy_file(src: &Path, dst: &Path) -> Result<(), PublishError> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent).map_err(|source| PublishError::DirCreate {
            path: parent.to_path_buf(),
            source,
        })?;
    }
    fs::copy(src, dst).map_err(|source| PublishError::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    })?;
    Ok(())
}

/// Resolve `.` and `..` without touching the filesystem.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push(component);
                }
            }
            other => out.push(other),
        }
    }
    out
}

/// Whether `dir` is `root` or one of its ancestors.
fn contains(dir: &Path, root: &Path) -> bool {
    if normalize(root).starts_with(dir) {
        return true;
    }
    match (dir.canonicalize(), root.canonicalize()) {
        (Ok(dir), Ok(root)) => root.starts_with(dir),
        _ => false,
    }
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> Result<(), PublishError> {
    fs::create_dir_all(dst).map_err(|source| PublishError::DirCreate {
        path: dst.to_path_buf(),
        source,
    })?;

    for entry in walkdir::WalkDir::new(src).min_depth(1) {
        let entry = entry.map_err(|e| PublishError::FileRead {
            path: src.to_path_buf(),
            source: e.into(),
        })?;

        let Ok(relative) = entry.path().strip_prefix(src) else {
            continue;
        };
        let target = dst.join(relative);

        if entry.file_type().is_symlink() {
            copy_symlink(entry.path(), &target)?;
        } else if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(|source| PublishError::DirCreate {
                path: target.clone(),
                source,
            })?;
        } else {
            fs::copy(entry.path(), &target).map_err(|source| PublishError::Copy {
                from: entry.path().to_path_buf(),
                to: target.clone(),
                source,
            })?;
        }
    }
    Ok(())
}

/// Recreate a link inside a copied tree instead of following it.
fn copy_symlink(src: &Path, dst: &Path) -> Result<(), PublishError> {
    let copy_err = |source: std::io::Error| PublishError::Copy {
        from: src.to_path_buf(),
        to: dst.to_path_buf(),
        source,
    };
    let link = fs::read_link(src).map_err(copy_err)?;

    #[cfg(unix)]
    std::os::unix::fs::symlink(&link, dst).map_err(copy_err)?;

    #[cfg(windows)]
    {
        if src.is_dir() {
            std::os::windows::fs::symlink_dir(&link, dst).map_err(copy_err)?;
        } else {
            std::os::windows::fs::symlink_file(&link, dst).map_err(copy_err)?;
        }
    }
    Ok(())
}
