//! Configuration loading and discovery for `hexpanel.toml`

use super::schema::HexpanelConfig;
use crate::panel::Overflow;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Config file name searched for in the working directory and its parents
pub const CONFIG_FILE: &str = "hexpanel.toml";

/// Configuration loading error
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse hexpanel.toml: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Config validation failed:\n{}", .0.iter().map(|e| format!("  - {}", e)).collect::<Vec<_>>().join("\n"))]
    Validation(Vec<String>),
}

/// CLI arguments that can override config values
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub sheet: Option<PathBuf>,
    pub output: Option<PathBuf>,
    pub overflow: Option<Overflow>,
    pub background: Option<String>,
}

/// Find hexpanel.toml by walking up from the current working directory.
pub fn find_config() -> Option<PathBuf> {
    env::current_dir().ok().and_then(find_config_from)
}

/// Find hexpanel.toml by walking up from a specific directory.
pub fn find_config_from(start: PathBuf) -> Option<PathBuf> {
    let mut current = start;

    loop {
        let config_path = current.join(CONFIG_FILE);
        if config_path.is_file() {
            return Some(config_path);
        }

        if !current.pop() {
            return None;
        }
    }
}

/// Load configuration.
///
/// An explicit `path` must exist. Without one, the nearest hexpanel.toml is
/// used, or the built-in defaults when there is none. Relative `sheet` and
/// `output` paths in a file are resolved against the file's directory.
///
/// The result is not validated; call [`check_config`] once CLI overrides
/// have been merged.
pub fn load_config(path: Option<&Path>) -> Result<HexpanelConfig, ConfigError> {
    let config_path = match path {
        Some(p) => Some(p.to_path_buf()),
        None => find_config(),
    };

    match config_path {
        Some(p) => load_config_file(&p),
        None => {
            log::debug!("No {} found, using defaults", CONFIG_FILE);
            Ok(HexpanelConfig::default())
        }
    }
}

fn load_config_file(path: &Path) -> Result<HexpanelConfig, ConfigError> {
    log::debug!("Loading config from {}", path.display());
    let contents = fs::read_to_string(path)?;
    let mut config: HexpanelConfig = toml::from_str(&contents)?;

    if let Some(root) = project_root(path) {
        config.panel.sheet = resolve_path(root, &config.panel.sheet);
        config.panel.output = resolve_path(root, &config.panel.output);
    }

    Ok(config)
}

/// Validate a fully merged configuration.
pub fn check_config(config: &HexpanelConfig) -> Result<(), ConfigError> {
    let errors = config.validate();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(ConfigError::Validation(errors.into_iter().map(|e| e.to_string()).collect()))
    }
}

/// Directory holding a config file.
pub fn project_root(config_path: &Path) -> Option<&Path> {
    config_path.parent()
}

/// Resolve a path relative to the project root. Absolute paths are kept.
pub fn resolve_path(project_root: &Path, path: &Path) -> PathBuf {
    if path.is_absolute() {
        path.to_path_buf()
    } else {
        project_root.join(path)
    }
}

/// Merge CLI overrides into a configuration. CLI arguments win.
pub fn merge_cli_overrides(config: &mut HexpanelConfig, overrides: &CliOverrides) {
    if let Some(ref sheet) = overrides.sheet {
        config.panel.sheet = sheet.clone();
    }

    if let Some(ref output) = overrides.output {
        config.panel.output = output.clone();
    }

    if let Some(overflow) = overrides.overflow {
        config.panel.overflow = overflow;
    }

    if let Some(ref background) = overrides.background {
        config.panel.background = background.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::io::Write;
    use tempfile::TempDir;

    fn write_config(dir: &Path, contents: &str) -> PathBuf {
        let config_path = dir.join(CONFIG_FILE);
        File::create(&config_path)
            .expect("should create config file")
            .write_all(contents.as_bytes())
            .expect("should write config content");
        config_path
    }

    #[test]
    fn test_find_config_in_current_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[panel]\ngrid = 16");

        let found = find_config_from(temp.path().to_path_buf());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "");

        let subdir = temp.path().join("roms").join("8080");
        fs::create_dir_all(&subdir).expect("should create subdirectories");

        let found = find_config_from(subdir);
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_load_explicit_path() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(
            temp.path(),
            "[panel]\nsheet = \"z80.png\"\noverflow = \"extend\"\n",
        );

        let config = load_config(Some(&config_path)).expect("should load config");
        assert_eq!(config.panel.sheet, temp.path().join("z80.png"));
        assert_eq!(config.panel.output, temp.path().join("8080_instruction_panel.png"));
        assert_eq!(config.panel.overflow, Overflow::Extend);
    }

    #[test]
    fn test_relative_paths_resolve_against_config_dir() {
        let temp = TempDir::new().expect("should create temp dir");
        let absolute = temp.path().join("elsewhere/sheet.png");
        let config_path = write_config(
            temp.path(),
            &format!(
                "[panel]\nsheet = \"{}\"\noutput = \"out/panel.png\"\n",
                absolute.display().to_string().replace('\\', "\\\\")
            ),
        );

        let mut config = load_config(Some(&config_path)).expect("should load config");
        assert_eq!(config.panel.sheet, absolute);
        assert_eq!(config.panel.output, temp.path().join("out/panel.png"));

        // CLI overrides stay relative to the working directory
        let overrides = CliOverrides { output: Some(PathBuf::from("cli.png")), ..Default::default() };
        merge_cli_overrides(&mut config, &overrides);
        assert_eq!(config.panel.output, PathBuf::from("cli.png"));
    }

    #[test]
    fn test_resolve_path() {
        let root = Path::new("/projects/roms");
        assert_eq!(resolve_path(root, Path::new("ops.png")), PathBuf::from("/projects/roms/ops.png"));
        assert_eq!(resolve_path(root, Path::new("/abs/ops.png")), PathBuf::from("/abs/ops.png"));
        assert_eq!(resolve_path(Path::new(""), Path::new("ops.png")), PathBuf::from("ops.png"));
    }

    #[test]
    fn test_load_missing_explicit_path_is_io_error() {
        let temp = TempDir::new().expect("should create temp dir");
        let result = load_config(Some(&temp.path().join("nope.toml")));
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[panel\ngrid = ");
        assert!(matches!(load_config(Some(&config_path)), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_validation_runs_after_merge() {
        let temp = TempDir::new().expect("should create temp dir");
        let config_path = write_config(temp.path(), "[panel]\nbackground = \"#12\"\n");

        let mut config = load_config(Some(&config_path)).expect("loading does not validate");
        let err = check_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref v) if v.len() == 1));
        assert!(err.to_string().contains("panel.background"));

        let overrides = CliOverrides { background: Some("#FFF".to_string()), ..Default::default() };
        merge_cli_overrides(&mut config, &overrides);
        assert!(check_config(&config).is_ok());
    }

    #[test]
    fn test_merge_cli_overrides() {
        let mut config = HexpanelConfig::default();
        let overrides = CliOverrides {
            output: Some(PathBuf::from("out.png")),
            overflow: Some(Overflow::Extend),
            ..Default::default()
        };

        merge_cli_overrides(&mut config, &overrides);

        assert_eq!(config.panel.output, PathBuf::from("out.png"));
        assert_eq!(config.panel.overflow, Overflow::Extend);
        assert_eq!(config.panel.sheet, PathBuf::from("8080_instruction.png"));
        assert_eq!(config.panel.background, "#000000");
    }
}
