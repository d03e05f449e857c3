pub mod clean;
pub mod init;
pub mod publish;

use clap::Parser;

const EXAMPLES: &str = "\
Examples:
  pkg-publish --init                              Create publish.config.toml
  pkg-publish                                     Build and stage the package
  pkg-publish -y                                  Build, bump patch version and publish
  pkg-publish --increment-version                 Bump patch version without publishing
  pkg-publish --build-command \"npm run build\"     Override the build command
  pkg-publish --clean                             Remove the publish directory";

#[derive(Debug, Parser)]
#[command(
    name = "pkg-publish",
    about = "Build, stage and publish a package from a filtered manifest",
    version,
    args_override_self = true,
    after_help = EXAMPLES
)]
pub struct Cli {
    /// Create a starter publish.config.toml in the current directory
    #[arg(long, conflicts_with = "clean")]
    pub init: bool,

    /// Remove the configured publish directory and exit
    #[arg(long)]
    pub clean: bool,

    /// Pack and publish to the registry (bumps the patch version unless --no-increment-version)
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Bump the patch version even without publishing
    #[arg(long, overrides_with = "no_increment_version")]
    pub increment_version: bool,

    /// Keep the current version, even with --yes
    #[arg(long, overrides_with = "increment_version")]
    pub no_increment_version: bool,

    /// Build command to run instead of the configured one
    #[arg(long, env = "PKG_PUBLISH_BUILD_COMMAND", value_name = "COMMAND")]
    pub build_command: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Cli {
    /// Explicit version choice from the command line, if any.
    pub fn increment_override(&self) -> Option<bool> {
        match (self.increment_version, self.no_increment_version) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        }
    }

    pub fn should_increment(&self) -> bool {
        self.increment_override().unwrap_or(self.yes)
    }
}
