//! Configuration.
//!
//! Two layers: the TOML file `~/.config/arxiv-digest/config.toml` holds the
//! look and the keys of the TUI and is created with commented defaults when
//! missing; [`Settings`] carries everything that comes from the environment
//! (patterns, external programs, paths, network timeout).

pub mod colors;
pub mod keybindings;
pub mod settings;

pub use colors::ColorConfig;
pub use keybindings::KeybindingConfig;
pub use settings::Settings;

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub colors: ColorConfig,
    pub keybindings: KeybindingConfig,
}

impl Config {
    /// Load from the default path, writing the commented default file first
    /// if there is none. Fields absent from the file keep their defaults.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(&Self::default_config_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            Self::create_default_config(path)?;
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    pub fn default_config_path() -> Result<PathBuf, ConfigError> {
        let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
        Ok(config_dir.join("arxiv-digest").join("config.toml"))
    }

    fn create_default_config(path: &Path) -> Result<(), ConfigError> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| ConfigError::Io {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        fs::write(path, DEFAULT_CONFIG).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

const DEFAULT_CONFIG: &str = r##"# arxiv-digest configuration
#
# Patterns, programs and paths are read from the environment:
#   ARXIV_AUTHORS, ARXIV_ABSTRACT_PATTERN, ARXIV_PATTERN_IGNORE_CASE,
#   BROWSER, PDFREADER, ARXIV_DOWNLOAD_DIR, ARXIV_DB, ARXIV_LOG,
#   ARXIV_HTTP_TIMEOUT
#
# Colors: Black, Red, Green, Yellow, Blue, Magenta, Cyan, Gray, DarkGray,
# LightRed, LightGreen, LightYellow, LightBlue, LightMagenta, LightCyan,
# White, Reset, or "#RRGGBB" / "#RGB".
#
# Keys: single characters ("a", "?"), Enter, Tab, Backspace, Delete, Home,
# End, PageUp, PageDown, Up, Down, Left, Right, Esc, Space, F1-F12, with
# optional modifiers ("Ctrl+e", "Alt+Enter").

[colors]
# Ordinal marker: entry is in the store / is not
marker_saved = "Red"
marker_unsaved = "Green"

# Ordinal marker under the cursor
cursor_fg = "White"
cursor_saved_bg = "Blue"
cursor_unsaved_bg = "Green"

# Title text of matching entries
author_match = "Red"
content_match = "Green"

# Detail view
detail_border = "Cyan"
detail_title = "Red"
detail_label = "Yellow"

# Status line
status_fg = "White"
status_bg = "DarkGray"

[keybindings]
quit = ["q", "Ctrl+c"]
move_down = ["j", "Down"]
move_up = ["k", "Up"]
scroll_down = ["Ctrl+e"]
scroll_up = ["Ctrl+y"]
activate = ["Enter", "Space", "a"]
close = ["Esc"]
open_url = ["u"]
save = ["s"]
delete = ["d"]
fetch_document = ["g"]
open_document = ["o", "O"]
help = ["h", "?", "F1"]
"##;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Could not determine config directory")]
    NoConfigDir,

    #[error("Failed to read/write config file at {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::style::Color;
    use tempfile::TempDir;

    #[test]
    fn test_default_file_matches_defaults() {
        let config: Config = toml::from_str(DEFAULT_CONFIG).unwrap();
        let defaults = Config::default();

        assert_eq!(config.colors.marker_saved, defaults.colors.marker_saved);
        assert_eq!(config.colors.status_bg, defaults.colors.status_bg);
        assert_eq!(config.keybindings.help, defaults.keybindings.help);
        assert_eq!(config.keybindings.activate, defaults.keybindings.activate);
    }

    #[test]
    fn test_partial_config() {
        let content = r##"
[colors]
author_match = "#FF8800"

[keybindings]
quit = ["x"]
"##;
        let config: Config = toml::from_str(content).unwrap();

        assert_eq!(config.colors.author_match, Color::Rgb(255, 136, 0));
        assert_eq!(config.colors.content_match, Color::Green);
        assert_eq!(config.keybindings.quit, vec!["x"]);
        assert_eq!(config.keybindings.move_down, vec!["j", "Down"]);
    }

    #[test]
    fn test_load_creates_default_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let config = Config::load_from(&path).unwrap();
        assert!(path.exists());
        assert_eq!(config.keybindings.quit, vec!["q", "Ctrl+c"]);

        // Second load reads the file just written.
        let again = Config::load_from(&path).unwrap();
        assert_eq!(again.colors.detail_border, Color::Cyan);
    }

    #[test]
    fn test_invalid_file_is_parse_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[colors]\nmarker_saved = \"Chartreuse\"\n").unwrap();

        assert!(matches!(
            Config::load_from(&path),
            Err(ConfigError::Parse { .. })
        ));
    }
}
