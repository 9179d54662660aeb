//! Configuration system for amxbuild projects

pub mod loader;
pub mod schema;

pub use loader::{default_config, find_config, load_config, CliOverrides, ConfigError};
pub use schema::*;
