use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("failed to read file: {path}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write file: {path}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to create directory: {path}")]
    DirCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to remove directory: {path}")]
    DirRemove {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to copy {from} to {to}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no configuration found; run `pkg-publish --init` first")]
    ConfigNotFound,

    #[error("configuration file already exists at {0}; delete it to re-initialize")]
    ConfigExists(PathBuf),

    #[error("no build command configured; set `build_command` in publish.config.toml or pass --build-command")]
    MissingBuildCommand,

    #[error("no publish directory configured (publishing in place); nothing to clean")]
    InPlacePublish,

    #[error("invalid version '{version}': expected MAJOR.MINOR.PATCH")]
    InvalidVersion { version: String },

    #[error("manifest {0} has no version field")]
    MissingVersion(PathBuf),

    #[error("failed to parse manifest {path}")]
    ManifestParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("manifest {0} is not a JSON object")]
    ManifestNotObject(PathBuf),

    #[error("failed to serialize manifest: {0}")]
    ManifestSerialize(#[from] serde_json::Error),

    #[error("command `{command}` failed: {reason}")]
    CommandFailed { command: String, reason: String },

    #[error("failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),
}
