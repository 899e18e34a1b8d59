use anyhow::{Context, Result};
use icsplit_core::ByteSize;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Defaults read from ~/.config/icsplit/config.toml. Flags override them.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Maximum size per output file, e.g. "500K" or "1M"
    pub max_size: Option<ByteSize>,

    /// Maximum number of events per output file
    pub max_events: Option<usize>,

    /// Input/output text encoding label
    pub encoding: Option<String>,

    /// Replace existing output files without asking
    #[serde(default)]
    pub overwrite: bool,

    /// Directory for output files (defaults to the input file's directory)
    pub output_dir: Option<String>,
}

/// Get the config directory path (~/.config/icsplit)
pub fn config_dir() -> Result<PathBuf> {
    let config_dir = dirs::config_dir()
        .context("Could not determine config directory")?
        .join("icsplit");
    Ok(config_dir)
}

/// Get the config file path (~/.config/icsplit/config.toml)
pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join("config.toml"))
}

/// Load the config file.
///
/// An explicitly requested file must exist; the default one is optional.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) => path.to_path_buf(),
        None => match config_path() {
            Ok(path) if path.exists() => path,
            _ => return Ok(Config::default()),
        },
    };

    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("Failed to read config file at {}", path.display()))?;

    parse_config(&contents)
        .with_context(|| format!("Failed to parse config file at {}", path.display()))
}

fn parse_config(contents: &str) -> Result<Config> {
    Ok(toml::from_str(contents)?)
}

/// Expand ~ in paths to the home directory
pub fn expand_path(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indoc::indoc;

    #[test]
    fn test_parse_full_config() {
        let config = parse_config(indoc! {r#"
            max_size = "500K"
            max_events = 50
            encoding = "latin1"
            overwrite = true
            output_dir = "/tmp/out"
        "#})
        .unwrap();

        assert_eq!(config.max_size, Some(ByteSize::new(500 * 1024)));
        assert_eq!(config.max_events, Some(50));
        assert_eq!(config.encoding.as_deref(), Some("latin1"));
        assert!(config.overwrite);
        assert_eq!(config.output_dir.as_deref(), Some("/tmp/out"));
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config = parse_config("").unwrap();
        assert!(config.max_size.is_none());
        assert!(!config.overwrite);
    }

    #[test]
    fn test_invalid_size_in_config_is_an_error() {
        let err = parse_config("max_size = \"1G\"").unwrap_err();
        assert!(
            format!("{err:#}").contains("Cannot understand size specification 1G"),
            "unexpected error: {err:#}"
        );
    }

    #[test]
    fn test_missing_explicit_config_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_config(Some(&dir.path().join("nope.toml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_explicit_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "max_events = 3\n").unwrap();

        let config = load_config(Some(&path)).unwrap();
        assert_eq!(config.max_events, Some(3));
    }

    #[test]
    fn test_expand_path_leaves_plain_paths() {
        assert_eq!(expand_path("/var/cal"), PathBuf::from("/var/cal"));
        assert_eq!(expand_path("relative/dir"), PathBuf::from("relative/dir"));
    }
}
