pub mod config;
pub mod publish_dir;

pub use config::{CONFIG_FILE, ConfigStore};
pub use publish_dir::PublishDir;
