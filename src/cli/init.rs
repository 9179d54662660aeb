//! Init command implementation (project scaffolding)

use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use super::{EXIT_ERROR, EXIT_INVALID_ARGS, EXIT_SUCCESS};
use crate::config::loader::CONFIG_FILE;
use crate::config::{AmxConfig, ProjectConfig};

/// Error during project initialization
#[derive(Debug)]
pub enum InitError {
    /// An amxbuild.toml already exists at the target
    ConfigExists(PathBuf),
    /// IO error while creating the project
    Io(std::io::Error),
    /// Config could not be serialized
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for InitError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InitError::ConfigExists(path) => {
                write!(f, "Config already exists: {}", path.display())
            }
            InitError::Io(e) => write!(f, "IO error: {}", e),
            InitError::Serialize(e) => write!(f, "Failed to write config: {}", e),
        }
    }
}

impl std::error::Error for InitError {}

impl From<std::io::Error> for InitError {
    fn from(e: std::io::Error) -> Self {
        InitError::Io(e)
    }
}

/// Scaffold an amxbuild project at `path`.
pub fn init_project(path: &Path, name: &str) -> Result<(), InitError> {
    let config_path = path.join(CONFIG_FILE);
    if config_path.exists() {
        return Err(InitError::ConfigExists(config_path));
    }

    let config = AmxConfig {
        project: ProjectConfig { name: name.to_string(), version: "0.1.0".to_string() },
        input: Default::default(),
        output: Default::default(),
        compiler: Default::default(),
        rules: Default::default(),
        watch: Default::default(),
    };

    fs::create_dir_all(path)?;
    for dir in config.input.scripts.iter().chain(config.input.include.iter()) {
        fs::create_dir_all(path.join(dir))?;
    }
    fs::create_dir_all(path.join(&config.output.plugins))?;
    fs::create_dir_all(path.join(&config.output.include))?;

    let contents = toml::to_string_pretty(&config).map_err(InitError::Serialize)?;
    fs::write(&config_path, contents)?;
    Ok(())
}

/// Run the init command
pub fn run_init(path: Option<&Path>, name: Option<&str>) -> ExitCode {
    let project_path = match path {
        Some(p) => p.to_path_buf(),
        None => std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
    };

    let project_name = name
        .map(|n| n.to_string())
        .or_else(|| project_path.file_name().map(|n| n.to_string_lossy().into_owned()))
        .unwrap_or_else(|| "my-mod".to_string());

    if project_name.trim().is_empty() || project_name.contains(['/', '\\']) {
        eprintln!("Error: Invalid project name '{}'", project_name);
        return ExitCode::from(EXIT_INVALID_ARGS);
    }

    match init_project(&project_path, &project_name) {
        Ok(()) => {
            println!("Created amxbuild project '{}' at {}", project_name, project_path.display());
            println!();
            println!("Project structure:");
            println!("  {}/", project_path.display());
            println!("  ├── amxbuild.toml");
            println!("  ├── src/scripts/");
            println!("  ├── src/include/");
            println!("  └── dist/");
            println!();
            println!("Next steps:");
            println!("  cd {}", project_path.display());
            println!("  amxbuild build");
            ExitCode::from(EXIT_SUCCESS)
        }
        Err(InitError::ConfigExists(path)) => {
            eprintln!("Error: {} already exists", path.display());
            ExitCode::from(EXIT_ERROR)
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::from(EXIT_ERROR)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::loader::load_config_file;
    use tempfile::TempDir;

    #[test]
    fn test_init_project_creates_layout() {
        let temp = TempDir::new().unwrap();
        init_project(temp.path(), "my-mod").unwrap();

        assert!(temp.path().join(CONFIG_FILE).is_file());
        assert!(temp.path().join("src/scripts").is_dir());
        assert!(temp.path().join("src/include").is_dir());
        assert!(temp.path().join("dist/plugins").is_dir());
        assert!(temp.path().join("dist/include").is_dir());
    }

    #[test]
    fn test_init_project_config_is_loadable() {
        let temp = TempDir::new().unwrap();
        init_project(temp.path(), "my-mod").unwrap();

        let config = load_config_file(&temp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config.project.name, "my-mod");
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_init_project_refuses_existing_config() {
        let temp = TempDir::new().unwrap();
        init_project(temp.path(), "my-mod").unwrap();

        let result = init_project(temp.path(), "other");
        assert!(matches!(result, Err(InitError::ConfigExists(_))));
    }
}
