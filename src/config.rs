/// External configuration loader.
///
/// Reads `config.toml` from an explicit path, or else from the executable's
/// directory, or else the CWD. A searched file that is missing or
/// unparsable falls back to defaults; an explicit path that cannot be read
/// is an error. The special food pool is validated: unknown names, `normal`
/// and an empty pool are all errors, not silent defaults.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::domain::entity::FoodKind;
use crate::error::GameError;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct GameConfig {
    pub board: BoardConfig,
    pub speed: SpeedConfig,
    pub food: FoodConfig,
}

#[derive(Clone, Debug)]
pub struct BoardConfig {
    pub step: i32,
    /// Board pixels; `None` means "fit the terminal".
    pub width: Option<i32>,
    pub height: Option<i32>,
}

#[derive(Clone, Debug)]
pub struct SpeedConfig {
    pub initial: u32,    // ticks per second
}

#[derive(Clone, Debug)]
pub struct FoodConfig {
    pub count: usize,
    pub max_count: usize,
    pub value: u32,
    pub special_every: u32,
    pub special_pool: Vec<FoodKind>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    board: TomlBoard,
    #[serde(default)]
    speed: TomlSpeed,
    #[serde(default)]
    food: TomlFood,
}

#[derive(Deserialize, Debug)]
struct TomlBoard {
    #[serde(default = "default_step")]
    step: i32,
    #[serde(default)]
    width: Option<i32>,
    #[serde(default)]
    height: Option<i32>,
}

#[derive(Deserialize, Debug)]
struct TomlSpeed {
    #[serde(default = "default_initial_speed")]
    initial: u32,
}

#[derive(Deserialize, Debug)]
struct TomlFood {
    #[serde(default = "default_food_count")]
    count: usize,
    #[serde(default = "default_food_max")]
    max_count: usize,
    #[serde(default = "default_food_value")]
    value: u32,
    #[serde(default = "default_special_every")]
    special_every: u32,
    #[serde(default = "default_special_pool")]
    special_pool: Vec<String>,
}

// ── Defaults ──

fn default_step() -> i32 { 32 }
fn default_initial_speed() -> u32 { 8 }
fn default_food_count() -> usize { 3 }
fn default_food_max() -> usize { 10 }
fn default_food_value() -> u32 { 1 }
fn default_special_every() -> u32 { 10 }
fn default_special_pool() -> Vec<String> {
    FoodKind::SPECIAL.iter().map(|k| k.name().to_string()).collect()
}

impl Default for TomlBoard {
    fn default() -> Self {
        TomlBoard { step: default_step(), width: None, height: None }
    }
}

impl Default for TomlSpeed {
    fn default() -> Self {
        TomlSpeed { initial: default_initial_speed() }
    }
}

impl Default for TomlFood {
    fn default() -> Self {
        TomlFood {
            count: default_food_count(),
            max_count: default_food_max(),
            value: default_food_value(),
            special_every: default_special_every(),
            special_pool: default_special_pool(),
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            board: BoardConfig { step: default_step(), width: None, height: None },
            speed: SpeedConfig { initial: default_initial_speed() },
            food: FoodConfig {
                count: default_food_count(),
                max_count: default_food_max(),
                value: default_food_value(),
                special_every: default_special_every(),
                special_pool: FoodKind::SPECIAL.to_vec(),
            },
        }
    }
}

// ── Loading ──

impl GameConfig {
    /// Load config from `explicit`, or search the candidate directories
    /// for `config.toml`. Missing keys fall back to defaults.
    pub fn load(explicit: Option<&Path>) -> Result<Self, GameError> {
        if let Some(path) = explicit {
            let text = std::fs::read_to_string(path).map_err(|source| GameError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
            return GameConfig::parse(&text);
        }
        GameConfig::from_toml(load_toml(&candidate_dirs()))
    }

    /// Parse a config document already read into memory.
    pub fn parse(text: &str) -> Result<Self, GameError> {
        GameConfig::from_toml(decode(text, "config"))
    }

    fn from_toml(cfg: TomlConfig) -> Result<Self, GameError> {
        let special_pool = cfg.food.special_pool.iter()
            .map(|name| name.parse::<FoodKind>())
            .collect::<Result<Vec<_>, _>>()?;
        if special_pool.is_empty() {
            return Err(GameError::InvalidFoodPool("pool is empty".to_string()));
        }
        if special_pool.contains(&FoodKind::Normal) {
            return Err(GameError::InvalidFoodPool("normal is not a special kind".to_string()));
        }
        let count = cfg.food.count.max(1);

        Ok(GameConfig {
            board: BoardConfig {
                step: cfg.board.step.max(1),
                width: cfg.board.width,
                height: cfg.board.height,
            },
            speed: SpeedConfig {
                initial: cfg.speed.initial.max(1),
            },
            food: FoodConfig {
                count,
                max_count: cfg.food.max_count.max(count),
                value: cfg.food.value,
                special_every: cfg.food.special_every.max(1),
                special_pool,
            },
        })
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

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

/// Search for config.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("config.toml");
        if path.exists() {
            if let Some(cfg) = load_toml_file(&path) {
                return cfg;
            }
        }
    }
    TomlConfig::default()
}

fn load_toml_file(path: &Path) -> Option<TomlConfig> {
    match std::fs::read_to_string(path) {
        Ok(text) => Some(decode(&text, &path.display().to_string())),
        Err(e) => {
            log::warn!("could not read {}: {e}", path.display());
            None
        }
    }
}

/// Parse TOML text; a syntax error falls back to defaults.
fn decode(text: &str, origin: &str) -> TomlConfig {
    match toml::from_str::<TomlConfig>(text) {
        Ok(cfg) => {
            log::info!("loaded {origin}");
            cfg
        }
        Err(e) => {
            log::warn!("{origin}: parse error: {e}; using default settings");
            TomlConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let cfg = GameConfig::parse("").unwrap();
        assert_eq!(cfg.board.step, 32);
        assert_eq!(cfg.board.width, None);
        assert_eq!(cfg.speed.initial, 8);
        assert_eq!(cfg.food.count, 3);
        assert_eq!(cfg.food.max_count, 10);
        assert_eq!(cfg.food.special_every, 10);
        assert_eq!(cfg.food.special_pool, FoodKind::SPECIAL.to_vec());
    }

    #[test]
    fn partial_sections_keep_other_defaults() {
        let cfg = GameConfig::parse(
            "[board]\nwidth = 320\nheight = 320\n\n[food]\nspecial_pool = [\"ghost\", \"speed_up\"]\n",
        ).unwrap();
        assert_eq!(cfg.board.width, Some(320));
        assert_eq!(cfg.board.step, 32);
        assert_eq!(cfg.food.count, 3);
        assert_eq!(cfg.food.special_pool, vec![FoodKind::Ghost, FoodKind::SpeedUp]);
    }

    #[test]
    fn unknown_kind_in_pool_is_fatal() {
        let err = GameConfig::parse("[food]\nspecial_pool = [\"anvil\"]\n").unwrap_err();
        assert!(matches!(err, GameError::UnknownFoodKind(ref k) if k == "anvil"));
    }

    #[test]
    fn empty_pool_is_fatal() {
        let err = GameConfig::parse("[food]\nspecial_pool = []\n").unwrap_err();
        assert!(matches!(err, GameError::InvalidFoodPool(_)));
    }

    #[test]
    fn normal_in_pool_is_fatal() {
        let err = GameConfig::parse("[food]\nspecial_pool = [\"ghost\", \"normal\"]\n").unwrap_err();
        assert!(matches!(err, GameError::InvalidFoodPool(_)));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let path = std::env::temp_dir().join("wrapsnake-no-such-dir").join("config.toml");
        let err = GameConfig::load(Some(path.as_path())).unwrap_err();
        assert!(matches!(err, GameError::ConfigRead { path: ref p, .. } if *p == path));
    }

    #[test]
    fn explicit_file_is_read() {
        let path = std::env::temp_dir().join(format!("wrapsnake-cfg-{}.toml", std::process::id()));
        std::fs::write(&path, "[speed]\ninitial = 12\n").unwrap();
        let cfg = GameConfig::load(Some(path.as_path()));
        std::fs::remove_file(&path).unwrap();
        assert_eq!(cfg.unwrap().speed.initial, 12);
    }

    #[test]
    fn garbage_falls_back_to_defaults() {
        let cfg = GameConfig::parse("this is = = not toml").unwrap();
        assert_eq!(cfg.speed.initial, 8);
    }

    #[test]
    fn max_count_never_below_count() {
        let cfg = GameConfig::parse("[food]\ncount = 5\nmax_count = 2\n").unwrap();
        assert_eq!(cfg.food.max_count, 5);
    }
}
