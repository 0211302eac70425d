/// External configuration loader.
///
/// Reads `config.toml` from the executable's directory (or CWD).
/// Missing keys take defaults; a missing file means all defaults.
/// An unreadable or malformed file is reported to the caller, which
/// falls back to defaults after logging it.

use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

// ── Public Config Struct ──

#[derive(Clone, Debug, PartialEq)]
pub struct GameConfig {
    pub speed: SpeedConfig,
    pub display: DisplayConfig,
    pub gamepad: GamepadConfig,
    pub log_level: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SpeedConfig {
    pub tick_rate_ms: u64,
}

#[derive(Clone, Debug, PartialEq)]
pub struct DisplayConfig {
    /// Terminal columns per grid cell.
    pub cell_width: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct GamepadConfig {
    pub pause: Vec<String>,
    pub restart: Vec<String>,
    pub quit: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    display: TomlDisplay,
    #[serde(default)]
    gamepad: TomlGamepad,
    #[serde(default)]
    general: TomlGeneral,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_tick_rate")]
    tick_rate_ms: u64,
}

#[derive(Deserialize, Debug)]
struct TomlDisplay {
    #[serde(default = "default_cell_width")]
    cell_width: usize,
}

#[derive(Deserialize, Debug)]
struct TomlGamepad {
    #[serde(default = "default_pause")]
    pause: Vec<String>,
    #[serde(default = "default_restart")]
    restart: Vec<String>,
    #[serde(default = "default_quit")]
    quit: Vec<String>,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_log_level")]
    log_level: String,
}

// ── Defaults ──

fn default_tick_rate() -> u64 { 33 }     // ~30 ticks per second
fn default_cell_width() -> usize { 2 }   // terminal cells are roughly 1:2
fn default_pause() -> Vec<String> { vec!["Start".into()] }
fn default_restart() -> Vec<String> { vec!["Select".into()] }
fn default_quit() -> Vec<String> { vec!["East".into()] }
fn default_log_level() -> String { "warn".into() }

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { tick_rate_ms: default_tick_rate() }
    }
}

impl Default for TomlDisplay {
    fn default() -> Self {
        TomlDisplay { cell_width: default_cell_width() }
    }
}

impl Default for TomlGamepad {
    fn default() -> Self {
        TomlGamepad {
            pause: default_pause(),
            restart: default_restart(),
            quit: default_quit(),
        }
    }
}

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral { log_level: default_log_level() }
    }
}

impl From<TomlConfig> for GameConfig {
    fn from(t: TomlConfig) -> Self {
        GameConfig {
            speed: SpeedConfig {
                tick_rate_ms: t.speed.tick_rate_ms.max(1),
            },
            display: DisplayConfig {
                cell_width: t.display.cell_width.clamp(1, 4),
            },
            gamepad: GamepadConfig {
                pause: t.gamepad.pause,
                restart: t.gamepad.restart,
                quit: t.gamepad.quit,
            },
            log_level: t.general.log_level,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        TomlConfig::default().into()
    }
}

// ── Loading ──

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read {}: {source}", path.display())]
    Read { path: PathBuf, source: std::io::Error },
    #[error("{}: parse error: {source}", path.display())]
    Parse { path: PathBuf, source: toml::de::Error },
}

impl GameConfig {
    /// Load config from `config.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// No file at all is not an error: every key takes its default.
    pub fn load() -> Result<Self, ConfigError> {
        for dir in candidate_dirs() {
            let path = dir.join("config.toml");
            if path.exists() {
                return Self::read(&path);
            }
        }
        Ok(GameConfig::default())
    }

    pub fn read(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| ConfigError::Read { path: path.to_path_buf(), source })?;
        Self::from_toml_str(&text)
            .map_err(|source| ConfigError::Parse { path: path.to_path_buf(), source })
    }

    /// Parse config text. Missing keys take their defaults.
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str::<TomlConfig>(text).map(Into::into)
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    // Resolve symlinks so a linked binary still finds its own config.
    if let Ok(exe) = std::env::current_exe() {
        let resolved = exe.canonicalize().unwrap_or(exe);
        if let Some(parent) = resolved.parent() {
            dirs.push(parent.to_path_buf());
        }
    }

    if let Ok(cwd) = std::env::current_dir() {
        if !dirs.iter().any(|d| d == &cwd) {
            dirs.push(cwd);
        }
    }

    if dirs.is_empty() {
        dirs.push(PathBuf::from("."));
    }

    dirs
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        let cfg = GameConfig::from_toml_str("").unwrap();
        assert_eq!(cfg, GameConfig::default());
        assert_eq!(cfg.speed.tick_rate_ms, 33);
        assert_eq!(cfg.display.cell_width, 2);
        assert_eq!(cfg.log_level, "warn");
    }

    #[test]
    fn partial_file_keeps_other_defaults() {
        let cfg = GameConfig::from_toml_str("[speed]\ntick_rate_ms = 50\n").unwrap();
        assert_eq!(cfg.speed.tick_rate_ms, 50);
        assert_eq!(cfg.gamepad.pause, vec!["Start".to_string()]);
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let cfg = GameConfig::from_toml_str(
            "[speed]\ntick_rate_ms = 0\n[display]\ncell_width = 9\n",
        ).unwrap();
        assert_eq!(cfg.speed.tick_rate_ms, 1);
        assert_eq!(cfg.display.cell_width, 4);
    }

    #[test]
    fn bad_toml_is_an_error() {
        assert!(GameConfig::from_toml_str("[speed\n").is_err());
    }

    #[test]
    fn unreadable_file_is_a_read_error() {
        let err = GameConfig::read(Path::new("/nonexistent/rockfall/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
