//! Configuration loading and discovery for `amxbuild.toml`
//!
//! Provides functions to find, load, and merge configuration.

use super::schema::{AmxConfig, ProjectConfig};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Configuration file name searched for in the project tree.
pub const CONFIG_FILE: &str = "amxbuild.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// File I/O error
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error
    #[error("Failed to parse amxbuild.toml: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    /// Override the plugins output directory
    pub plugins: Option<PathBuf>,
    /// Override the script input directories
    pub scripts: Option<Vec<PathBuf>>,
    /// Override the compiler installation directory
    pub compiler_dir: Option<PathBuf>,
    /// Override the flat-compilation rule
    pub flat: Option<bool>,
}

/// Find amxbuild.toml by walking up from the current working directory.
///
/// # Returns
/// - `Some(path)` if a config file is found
/// - `None` if no config file is found
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find amxbuild.toml by walking up from a specific directory.
///
/// This is the internal implementation that allows specifying the start
/// directory, useful for testing.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        // Reached the filesystem root without finding one
        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration from an amxbuild.toml file.
///
/// If a path is provided, loads from that file. Otherwise, uses
/// [`find_config`] to locate one. If no config file is found, returns a
/// default configuration.
pub fn load_config(path: Option<&Path>) -> Result<AmxConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => Ok(default_config()),
    }
}

/// Load configuration from a specific file path.
pub fn load_config_file(path: &Path) -> Result<AmxConfig, ConfigError> {
    let contents = fs::read_to_string(path)?;
    let config: AmxConfig = toml::from_str(&contents)?;

    let issues = config.validate();
    if !issues.is_empty() {
        return Err(ConfigError::Validation(issues));
    }

    Ok(config)
}

/// Create a default configuration when no amxbuild.toml is found.
///
/// Returns a minimal valid configuration with the project name set to the
/// current directory name.
pub fn default_config() -> AmxConfig {
    let project_name = env::current_dir()
        .ok()
        .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "unnamed".to_string());

    AmxConfig {
        project: ProjectConfig { name: project_name, version: "0.1.0".to_string() },
        input: Default::default(),
        output: Default::default(),
        compiler: Default::default(),
        rules: Default::default(),
        watch: Default::default(),
    }
}

/// Apply CLI overrides on top of a loaded configuration.
pub fn merge_cli_overrides(config: &mut AmxConfig, overrides: &CliOverrides) {
    if let Some(plugins) = &overrides.plugins {
        config.output.plugins = plugins.clone();
    }
    if let Some(scripts) = &overrides.scripts {
        config.input.scripts = scripts.clone();
    }
    if let Some(dir) = &overrides.compiler_dir {
        config.compiler.dir = dir.clone();
    }
    if let Some(flat) = overrides.flat {
        config.rules.flat_compilation = flat;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let path = dir.join(CONFIG_FILE);
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_find_config_from_same_dir() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "[project]\nname = \"x\"\n");

        assert_eq!(find_config_from(temp.path().to_path_buf()), Some(path));
    }

    #[test]
    fn test_find_config_from_walks_up() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "[project]\nname = \"x\"\n");
        let nested = temp.path().join("src/scripts/maps");
        fs::create_dir_all(&nested).unwrap();

        assert_eq!(find_config_from(nested), Some(path));
    }

    #[test]
    fn test_find_config_from_none() {
        let temp = TempDir::new().unwrap();
        // A temp dir has no amxbuild.toml anywhere up its (short) chain in
        // practice; guard against one existing in an ancestor by nesting.
        let nested = temp.path().join("a/b");
        fs::create_dir_all(&nested).unwrap();
        let found = find_config_from(nested);
        if let Some(path) = found {
            assert!(!path.starts_with(temp.path()));
        }
    }

    #[test]
    #[serial]
    fn test_find_config_uses_current_dir() {
        let temp = TempDir::new().unwrap();
        write_config(temp.path(), "[project]\nname = \"x\"\n");

        let previous = env::current_dir().unwrap();
        env::set_current_dir(temp.path()).unwrap();
        let found = find_config();
        env::set_current_dir(previous).unwrap();

        let found = found.expect("config should be discovered from the working directory");
        assert!(found.ends_with(CONFIG_FILE));
    }

    #[test]
    fn test_load_config_file() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "[project]\nname = \"my-mod\"\n");

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.project.name, "my-mod");
    }

    #[test]
    fn test_load_config_file_parse_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "not valid toml {{{");

        assert!(matches!(load_config_file(&path), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_load_config_file_validation_error() {
        let temp = TempDir::new().unwrap();
        let path = write_config(temp.path(), "[project]\nname = \"\"\n");

        assert!(matches!(load_config_file(&path), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_config_missing_file_io_error() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join(CONFIG_FILE);

        assert!(matches!(load_config_file(&missing), Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_default_config_is_valid() {
        let config = default_config();
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = default_config();
        let overrides = CliOverrides {
            plugins: Some(PathBuf::from("custom/plugins")),
            scripts: Some(vec![PathBuf::from("other/scripts")]),
            compiler_dir: Some(PathBuf::from("tools/amxx")),
            flat: Some(false),
        };

        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.output.plugins, PathBuf::from("custom/plugins"));
        assert_eq!(config.input.scripts, vec![PathBuf::from("other/scripts")]);
        assert_eq!(config.compiler.dir, PathBuf::from("tools/amxx"));
        assert!(!config.rules.flat_compilation);
    }

    #[test]
    fn test_merge_cli_overrides_empty_keeps_config() {
        let mut config = default_config();
        let before = config.output.plugins.clone();
        merge_cli_overrides(&mut config, &CliOverrides::default());
        assert_eq!(config.output.plugins, before);
    }
}
