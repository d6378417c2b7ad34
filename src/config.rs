//! Configuration management for swiftstrip.
//!
//! This module provides the [`Config`] struct which controls stripping
//! behavior. Configuration can be loaded from:
//! - TOML files (`swiftstrip.toml`)
//! - CLI arguments (which override file settings)
//!
//! Config files are auto-discovered by searching parent directories from the
//! file being processed up to the filesystem root, plus the user's home
//! directory.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::scanner::ScanOptions;

/// Config file names to search for (in order of priority, later overrides earlier)
const CONFIG_FILE_NAMES: &[&str] = &["swiftstrip.toml"];

/// Get the user's home directory
fn dirs_home() -> Option<PathBuf> {
    // Try HOME environment variable first (works on Unix and some Windows setups)
    if let Ok(home) = std::env::var("HOME") {
        return Some(PathBuf::from(home));
    }
    // Fallback for Windows
    if let Ok(userprofile) = std::env::var("USERPROFILE") {
        return Some(PathBuf::from(userprofile));
    }
    None
}

/// Main configuration struct for swiftstrip
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Keep `///` and `/** */` documentation comments (default: false)
    #[serde(default)]
    pub keep_doc_comments: bool,

    /// Keep comments that appear before the first statement of a file,
    /// such as license headers (default: false)
    #[serde(default)]
    pub keep_header: bool,

    /// Additional file extensions to treat as Swift sources
    #[serde(default)]
    pub extensions: Vec<String>,
}

/// Partial configuration for TOML parsing
///
/// All fields are `Option<T>` so we can distinguish between
/// "explicitly set" and "not specified" when merging configs.
#[derive(Debug, Clone, Default, Deserialize)]
struct PartialConfig {
    pub keep_doc_comments: Option<bool>,
    pub keep_header: Option<bool>,
    #[serde(default)]
    pub extensions: Vec<String>,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_toml_file(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        let partial: PartialConfig = toml::from_str(&contents)?;
        let mut config = Self::default();
        config.apply_partial(&partial);
        Ok(config)
    }

    /// Apply a partial config, only overriding fields that are explicitly set
    fn apply_partial(&mut self, partial: &PartialConfig) {
        if let Some(v) = partial.keep_doc_comments {
            self.keep_doc_comments = v;
        }
        if let Some(v) = partial.keep_header {
            self.keep_header = v;
        }
        for ext in &partial.extensions {
            if !self.extensions.contains(ext) {
                self.extensions.push(ext.clone());
            }
        }
    }

    /// Discover config files from parent directories of a given path
    ///
    /// Searches from the file's directory up to the root, then adds home directory config.
    /// Returns list of config file paths in order of priority (least specific first).
    #[must_use]
    pub fn discover_config_files(start_path: &Path) -> Vec<PathBuf> {
        let mut config_files = Vec::new();

        // Add home directory config first (lowest priority)
        if let Some(home) = dirs_home() {
            for config_name in CONFIG_FILE_NAMES {
                let home_config = home.join(config_name);
                if home_config.is_file() {
                    config_files.push(home_config);
                }
            }
        }

        // Start from the file's parent directory (or the path itself if it's a directory)
        let start_dir = if start_path.is_file() {
            start_path.parent().map(Path::to_path_buf)
        } else if start_path.is_dir() {
            Some(start_path.to_path_buf())
        } else {
            // Path doesn't exist, use current directory
            std::env::current_dir().ok()
        };

        // Collect config files from parent directories (from root to current)
        if let Some(dir) = start_dir {
            let mut ancestors: Vec<PathBuf> = dir.ancestors().map(Path::to_path_buf).collect();
            // Reverse so we go from root to current (less specific to more specific)
            ancestors.reverse();

            for ancestor in ancestors {
                for config_name in CONFIG_FILE_NAMES {
                    let config_path = ancestor.join(config_name);
                    if config_path.is_file() && !config_files.contains(&config_path) {
                        config_files.push(config_path);
                    }
                }
            }
        }

        config_files
    }

    /// Load and merge configuration from discovered config files
    ///
    /// Later files override earlier ones (only explicitly set values).
    /// Returns default config if no files found.
    #[must_use]
    pub fn from_discovered_files(start_path: &Path) -> Self {
        let config_files = Self::discover_config_files(start_path);

        if config_files.is_empty() {
            return Self::default();
        }

        let mut config = Self::default();
        for path in &config_files {
            match std::fs::read_to_string(path) {
                Ok(contents) => match toml::from_str::<PartialConfig>(&contents) {
                    Ok(partial) => config.apply_partial(&partial),
                    Err(e) => eprintln!("Warning: failed to parse {}: {e}", path.display()),
                },
                Err(e) => eprintln!("Warning: failed to read {}: {e}", path.display()),
            }
        }
        config
    }

    /// Scanner options corresponding to this configuration
    #[must_use]
    pub fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            keep_doc_comments: self.keep_doc_comments,
            keep_header: self.keep_header,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(!config.keep_doc_comments);
        assert!(!config.keep_header);
        assert!(config.extensions.is_empty());
    }

    #[test]
    fn test_config_apply_partial() {
        let mut base = Config::default();
        let partial = PartialConfig {
            keep_doc_comments: Some(true),
            ..Default::default()
        };

        base.apply_partial(&partial);
        assert!(base.keep_doc_comments);
        // Other fields should remain at defaults
        assert!(!base.keep_header);
    }

    #[test]
    fn test_config_apply_partial_preserves_unset() {
        let mut base = Config {
            keep_header: true,
            ..Default::default()
        };

        // Partial config that only sets keep_doc_comments
        let partial = PartialConfig {
            keep_doc_comments: Some(true),
            ..Default::default()
        };

        base.apply_partial(&partial);
        // keep_header should be preserved (not reset to default)
        assert!(base.keep_header);
        assert!(base.keep_doc_comments);
    }

    #[test]
    fn test_config_apply_partial_merges_extensions() {
        let mut base = Config {
            extensions: vec!["swiftinterface".to_string()],
            ..Default::default()
        };

        let partial = PartialConfig {
            extensions: vec!["swiftinterface".to_string(), "playground".to_string()],
            ..Default::default()
        };

        base.apply_partial(&partial);
        assert_eq!(base.extensions, vec!["swiftinterface", "playground"]);
    }

    #[test]
    fn test_parse_toml() {
        let partial: PartialConfig =
            toml::from_str("keep_doc_comments = true\nextensions = [\"playground\"]").unwrap();
        assert_eq!(partial.keep_doc_comments, Some(true));
        assert_eq!(partial.keep_header, None);
        assert_eq!(partial.extensions, vec!["playground"]);
    }

    #[test]
    fn test_discover_config_files_nonexistent_path() {
        // Discovery from a path that doesn't exist should not panic
        let path = PathBuf::from("/nonexistent/path/file.swift");
        let _files = Config::discover_config_files(&path);
    }

    #[test]
    fn test_from_discovered_files_returns_default_when_empty() {
        let path = PathBuf::from("/nonexistent/unique/path/file.swift");
        let config = Config::from_discovered_files(&path);
        assert!(!config.keep_doc_comments);
        assert!(!config.keep_header);
    }

    #[test]
    fn test_scan_options_mapping() {
        let config = Config {
            keep_doc_comments: true,
            keep_header: true,
            ..Default::default()
        };
        let options = config.scan_options();
        assert!(options.keep_doc_comments);
        assert!(options.keep_header);
    }
}
