//! Configuration schema types for `amxbuild.toml`
//!
//! Defines the structure and validation rules for amxbuild project
//! configuration. Optional pieces of the layout (asset directories, raw
//! script output) are explicit `Option`s; consumers branch on presence.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Project metadata section
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Project name (required)
    pub name: String,
    /// Project version
    #[serde(default = "default_version")]
    pub version: String,
}

fn default_version() -> String {
    "0.1.0".to_string()
}

/// Input directory sets
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InputConfig {
    /// Directories containing `.sma` script sources
    #[serde(default = "default_scripts_in")]
    pub scripts: Vec<PathBuf>,
    /// Directories containing `.inc` include files
    #[serde(default = "default_include_in")]
    pub include: Vec<PathBuf>,
    /// Directories containing game assets, if the project ships any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<Vec<PathBuf>>,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            scripts: default_scripts_in(),
            include: default_include_in(),
            assets: None,
        }
    }
}

fn default_scripts_in() -> Vec<PathBuf> {
    vec![PathBuf::from("src/scripts")]
}

fn default_include_in() -> Vec<PathBuf> {
    vec![PathBuf::from("src/include")]
}

/// Output directory layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory receiving raw script copies; omit to skip copying sources
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scripts: Option<PathBuf>,
    /// Directory receiving compiled plugins
    #[serde(default = "default_plugins_out")]
    pub plugins: PathBuf,
    /// Directory receiving include files (flat)
    #[serde(default = "default_include_out")]
    pub include: PathBuf,
    /// Directory receiving assets (mirrored), if assets are configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub assets: Option<PathBuf>,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            scripts: None,
            plugins: default_plugins_out(),
            include: default_include_out(),
            assets: None,
        }
    }
}

fn default_plugins_out() -> PathBuf {
    PathBuf::from("dist/plugins")
}

fn default_include_out() -> PathBuf {
    PathBuf::from("dist/include")
}

/// External compiler toolchain descriptor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompilerConfig {
    /// Compiler installation directory
    #[serde(default = "default_compiler_dir")]
    pub dir: PathBuf,
    /// Executable name within the installation directory
    #[serde(default = "default_executable")]
    pub executable: String,
    /// Toolchain version, for display
    #[serde(default = "default_compiler_version")]
    pub version: String,
    /// Whether this is a development build of the toolchain
    #[serde(default)]
    pub dev: bool,
}

impl CompilerConfig {
    /// Full path of the compiler executable.
    pub fn executable_path(&self) -> PathBuf {
        self.dir.join(&self.executable)
    }

    /// The compiler's bundled include directory, searched first.
    pub fn bundled_include_dir(&self) -> PathBuf {
        self.dir.join("include")
    }
}

impl Default for CompilerConfig {
    fn default() -> Self {
        Self {
            dir: default_compiler_dir(),
            executable: default_executable(),
            version: default_compiler_version(),
            dev: false,
        }
    }
}

fn default_compiler_dir() -> PathBuf {
    PathBuf::from(".compiler")
}

fn default_executable() -> String {
    "amxxpc".to_string()
}

fn default_compiler_version() -> String {
    "1.8.2".to_string()
}

/// Build placement rules
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RulesConfig {
    /// Place every plugin directly in the plugins directory, discarding
    /// source sub-directory structure; false mirrors the source layout
    #[serde(default = "default_true")]
    pub flat_compilation: bool,
    /// Extra include directories searched after the compiler's own
    #[serde(default)]
    pub include: Vec<PathBuf>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self { flat_compilation: true, include: Vec::new() }
    }
}

fn default_true() -> bool {
    true
}

/// Watch mode configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WatchConfig {
    /// Debounce delay in milliseconds
    #[serde(default = "default_debounce_ms")]
    pub debounce_ms: u32,
    /// Clear terminal between rebuilds
    #[serde(default)]
    pub clear_screen: bool,
}

fn default_debounce_ms() -> u32 {
    300
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 300, clear_screen: false }
    }
}

/// Complete amxbuild.toml configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AmxConfig {
    /// Project metadata (required)
    pub project: ProjectConfig,
    /// Input directory sets
    #[serde(default)]
    pub input: InputConfig,
    /// Output directory layout
    #[serde(default)]
    pub output: OutputConfig,
    /// Compiler toolchain descriptor
    #[serde(default)]
    pub compiler: CompilerConfig,
    /// Build placement rules
    #[serde(default)]
    pub rules: RulesConfig,
    /// Watch mode settings
    #[serde(default)]
    pub watch: WatchConfig,
}

impl AmxConfig {
    /// Validate the configuration, collecting every issue found.
    pub fn validate(&self) -> Vec<String> {
        let mut issues = Vec::new();

        if self.project.name.trim().is_empty() {
            issues.push("project.name must not be empty".to_string());
        }
        if self.input.scripts.is_empty() {
            issues.push("input.scripts must list at least one directory".to_string());
        }
        if self.compiler.executable.trim().is_empty() {
            issues.push("compiler.executable must not be empty".to_string());
        }
        if self.watch.debounce_ms == 0 {
            issues.push("watch.debounce_ms must be greater than zero".to_string());
        }
        if let Some(assets) = &self.input.assets {
            if assets.is_empty() {
                issues.push("input.assets must list at least one directory when present".to_string());
            }
            if self.output.assets.is_none() {
                issues.push(
                    "input.assets is configured but output.assets is missing".to_string(),
                );
            }
        }

        issues
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AmxConfig {
        AmxConfig {
            project: ProjectConfig { name: "test".to_string(), version: "0.1.0".to_string() },
            input: InputConfig::default(),
            output: OutputConfig::default(),
            compiler: CompilerConfig::default(),
            rules: RulesConfig::default(),
            watch: WatchConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(valid_config().validate().is_empty());
    }

    #[test]
    fn test_empty_name_rejected() {
        let mut config = valid_config();
        config.project.name = " ".to_string();
        assert_eq!(config.validate().len(), 1);
    }

    #[test]
    fn test_empty_scripts_rejected() {
        let mut config = valid_config();
        config.input.scripts.clear();
        assert!(config.validate().iter().any(|i| i.contains("input.scripts")));
    }

    #[test]
    fn test_assets_without_output_rejected() {
        let mut config = valid_config();
        config.input.assets = Some(vec![PathBuf::from("assets")]);
        assert!(config.validate().iter().any(|i| i.contains("output.assets")));

        config.output.assets = Some(PathBuf::from("dist/assets"));
        assert!(config.validate().is_empty());
    }

    #[test]
    fn test_zero_debounce_rejected() {
        let mut config = valid_config();
        config.watch.debounce_ms = 0;
        assert!(!config.validate().is_empty());
    }

    #[test]
    fn test_compiler_paths() {
        let compiler = CompilerConfig::default();
        assert_eq!(compiler.executable_path(), PathBuf::from(".compiler/amxxpc"));
        assert_eq!(compiler.bundled_include_dir(), PathBuf::from(".compiler/include"));
    }

    #[test]
    fn test_parse_minimal_toml() {
        let config: AmxConfig = toml::from_str("[project]\nname = \"mod\"\n").unwrap();
        assert_eq!(config.project.name, "mod");
        assert_eq!(config.input.scripts, vec![PathBuf::from("src/scripts")]);
        assert_eq!(config.output.plugins, PathBuf::from("dist/plugins"));
        assert!(config.rules.flat_compilation);
        assert_eq!(config.watch.debounce_ms, 300);
        assert!(config.input.assets.is_none());
        assert!(config.output.scripts.is_none());
    }

    #[test]
    fn test_parse_full_toml() {
        let toml_src = r#"
[project]
name = "cstrike-mod"
version = "2.0.0"

[input]
scripts = ["src/scripts", "vendor/scripts"]
include = ["src/include"]
assets = ["assets"]

[output]
scripts = "dist/scripts"
plugins = "dist/plugins"
include = "dist/include"
assets = "dist/assets"

[compiler]
dir = "toolchain/amxx"
executable = "amxxpc"
version = "1.9.0"
dev = true

[rules]
flat_compilation = false
include = ["third_party/include"]

[watch]
debounce_ms = 500
clear_screen = true
"#;
        let config: AmxConfig = toml::from_str(toml_src).unwrap();
        assert_eq!(config.input.scripts.len(), 2);
        assert_eq!(config.input.assets.as_deref(), Some(&[PathBuf::from("assets")][..]));
        assert_eq!(config.output.scripts.as_deref(), Some(std::path::Path::new("dist/scripts")));
        assert!(config.compiler.dev);
        assert!(!config.rules.flat_compilation);
        assert_eq!(config.rules.include, vec![PathBuf::from("third_party/include")]);
        assert_eq!(config.watch.debounce_ms, 500);
        assert!(config.validate().is_empty());
    }
}
