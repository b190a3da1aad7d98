/// External configuration loader.
///
/// Reads `pocketport.toml` from the executable's directory (or CWD).
/// Falls back to sensible defaults if the file is missing or incomplete.
use serde::Deserialize;
use std::path::PathBuf;

// ── Public Config Struct ──

#[derive(Clone, Debug)]
pub struct PortConfig {
    /// Directory searched for the asset container.
    pub assets_dir: PathBuf,
    /// Optional ZSPR player-sprite override. Set but unloadable is fatal.
    pub player_sprite: Option<PathBuf>,
    /// Extra pixels of horizontal aspect on each side (0 = stock 256 wide).
    pub extended_aspect: u32,
    /// Render 240 rows instead of 224.
    pub extend_y: bool,
    pub bindings: BindingsConfig,
}

/// Chord strings per command, e.g. `"Guide+L1"`. The last name in a chord
/// is the trigger button, everything before it must be held.
/// For the slot commands (load/save/replay and the referenced bands) the
/// list position picks the slot: the n-th chord binds slot n.
#[derive(Clone, Debug)]
pub struct BindingsConfig {
    pub load: Vec<String>,
    pub save: Vec<String>,
    pub replay: Vec<String>,
    pub load_ref: Vec<String>,
    pub replay_ref: Vec<String>,
    pub reset: Vec<String>,
    pub pause: Vec<String>,
    pub pause_dimmed: Vec<String>,
    pub turbo: Vec<String>,
    pub replay_turbo: Vec<String>,
    pub display_perf: Vec<String>,
    pub toggle_cursor: Vec<String>,
    pub volume_up: Vec<String>,
    pub volume_down: Vec<String>,
}

// ── TOML Schema (with serde defaults) ──

#[derive(Deserialize, Debug, Default)]
struct TomlConfig {
    #[serde(default)]
    general: TomlGeneral,
    #[serde(default)]
    video: TomlVideo,
    #[serde(default)]
    bindings: TomlBindings,
}

#[derive(Deserialize, Debug)]
struct TomlGeneral {
    #[serde(default = "default_assets_dir")]
    assets_dir: String,
    #[serde(default)]
    player_sprite: Option<String>,
}

#[derive(Deserialize, Debug, Default)]
struct TomlVideo {
    #[serde(default)]
    extended_aspect: u32,
    #[serde(default)]
    extend_y: bool,
}

#[derive(Deserialize, Debug)]
struct TomlBindings {
    #[serde(default = "default_load")]
    load: Vec<String>,
    #[serde(default = "default_save")]
    save: Vec<String>,
    #[serde(default = "default_replay")]
    replay: Vec<String>,
    #[serde(default)]
    load_ref: Vec<String>,
    #[serde(default)]
    replay_ref: Vec<String>,
    #[serde(default = "default_reset")]
    reset: Vec<String>,
    #[serde(default = "default_pause")]
    pause: Vec<String>,
    #[serde(default)]
    pause_dimmed: Vec<String>,
    #[serde(default = "default_turbo")]
    turbo: Vec<String>,
    #[serde(default = "default_replay_turbo")]
    replay_turbo: Vec<String>,
    #[serde(default = "default_display_perf")]
    display_perf: Vec<String>,
    #[serde(default = "default_toggle_cursor")]
    toggle_cursor: Vec<String>,
    #[serde(default = "default_volume_up")]
    volume_up: Vec<String>,
    #[serde(default = "default_volume_down")]
    volume_down: Vec<String>,
}

// ── Defaults ──

fn default_assets_dir() -> String { ".".into() }

fn default_load() -> Vec<String> { vec!["Guide+L1".into()] }
fn default_save() -> Vec<String> { vec!["Guide+R1".into()] }
fn default_replay() -> Vec<String> { vec!["Guide+Left".into()] }
fn default_reset() -> Vec<String> { vec!["Guide+Start".into()] }
fn default_pause() -> Vec<String> { vec!["Guide+X".into()] }
fn default_turbo() -> Vec<String> { vec!["Guide+A".into()] }
fn default_replay_turbo() -> Vec<String> { vec!["Guide+Y".into()] }
fn default_display_perf() -> Vec<String> { vec!["Guide+B".into()] }
fn default_toggle_cursor() -> Vec<String> { vec!["Guide+Right".into()] }
fn default_volume_up() -> Vec<String> { vec!["Guide+Up".into()] }
fn default_volume_down() -> Vec<String> { vec!["Guide+Down".into()] }

impl Default for TomlGeneral {
    fn default() -> Self {
        TomlGeneral {
            assets_dir: default_assets_dir(),
            player_sprite: None,
        }
    }
}

impl Default for TomlBindings {
    fn default() -> Self {
        TomlBindings {
            load: default_load(),
            save: default_save(),
            replay: default_replay(),
            load_ref: vec![],
            replay_ref: vec![],
            reset: default_reset(),
            pause: default_pause(),
            pause_dimmed: vec![],
            turbo: default_turbo(),
            replay_turbo: default_replay_turbo(),
            display_perf: default_display_perf(),
            toggle_cursor: default_toggle_cursor(),
            volume_up: default_volume_up(),
            volume_down: default_volume_down(),
        }
    }
}

impl Default for BindingsConfig {
    fn default() -> Self {
        BindingsConfig::from_toml(TomlBindings::default())
    }
}

impl Default for PortConfig {
    fn default() -> Self {
        PortConfig::from_toml(TomlConfig::default(), &[PathBuf::from(".")])
    }
}

// ── Loading ──

impl PortConfig {
    /// Load config from `pocketport.toml`.
    /// Search order: (1) exe directory, (2) current working directory.
    /// Missing file or missing keys gracefully fall back to defaults.
    pub fn load() -> Self {
        let search_dirs = candidate_dirs();
        let toml_cfg = load_toml(&search_dirs);
        PortConfig::from_toml(toml_cfg, &search_dirs)
    }

    /// Parse config from TOML text (defaults on parse error, with a warning).
    pub fn parse(text: &str) -> Self {
        let toml_cfg = match toml::from_str::<TomlConfig>(text) {
            Ok(cfg) => cfg,
            Err(e) => {
                log::warn!("config parse error, using defaults: {e}");
                TomlConfig::default()
            }
        };
        PortConfig::from_toml(toml_cfg, &[PathBuf::from(".")])
    }

    fn from_toml(cfg: TomlConfig, search_dirs: &[PathBuf]) -> Self {
        // Resolve the assets directory: absolute paths are taken as-is,
        // relative ones are searched in the candidate directories.
        let assets_dir_str = &cfg.general.assets_dir;
        let assets_dir = if PathBuf::from(assets_dir_str).is_absolute() {
            PathBuf::from(assets_dir_str)
        } else {
            search_dirs
                .iter()
                .map(|d| d.join(assets_dir_str))
                .find(|p| p.is_dir())
                .unwrap_or_else(|| PathBuf::from(assets_dir_str))
        };

        PortConfig {
            assets_dir,
            player_sprite: cfg.general.player_sprite.map(PathBuf::from),
            extended_aspect: cfg.video.extended_aspect,
            extend_y: cfg.video.extend_y,
            bindings: BindingsConfig::from_toml(cfg.bindings),
        }
    }
}

impl BindingsConfig {
    fn from_toml(b: TomlBindings) -> Self {
        BindingsConfig {
            load: b.load,
            save: b.save,
            replay: b.replay,
            load_ref: b.load_ref,
            replay_ref: b.replay_ref,
            reset: b.reset,
            pause: b.pause,
            pause_dimmed: b.pause_dimmed,
            turbo: b.turbo,
            replay_turbo: b.replay_turbo,
            display_perf: b.display_perf,
            toggle_cursor: b.toggle_cursor,
            volume_up: b.volume_up,
            volume_down: b.volume_down,
        }
    }
}

/// Candidate directories to search: exe dir + CWD (deduplicated).
fn candidate_dirs() -> Vec<PathBuf> {
    let mut dirs = vec![];

    if let Ok(exe) = std::env::current_exe() {
        // Resolve symlinks so data is found relative to the real binary.
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

/// Search for pocketport.toml in candidate directories.
fn load_toml(search_dirs: &[PathBuf]) -> TomlConfig {
    for dir in search_dirs {
        let path = dir.join("pocketport.toml");
        if path.exists() {
            match std::fs::read_to_string(&path) {
                Ok(text) => match toml::from_str::<TomlConfig>(&text) {
                    Ok(cfg) => return cfg,
                    Err(e) => {
                        log::warn!("pocketport.toml parse error: {e}");
                        log::warn!("using default settings");
                        return TomlConfig::default();
                    }
                },
                Err(e) => {
                    log::warn!("could not read {}: {e}", path.display());
                }
            }
        }
    }
    TomlConfig::default()
}

// ══════════════════════════════════════════════════════════════
// Unit tests
// ══════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_gives_defaults() {
        let cfg = PortConfig::parse("");
        assert_eq!(cfg.extended_aspect, 0);
        assert!(!cfg.extend_y);
        assert!(cfg.player_sprite.is_none());
        assert_eq!(cfg.bindings.load, vec!["Guide+L1".to_string()]);
        assert_eq!(cfg.bindings.volume_down, vec!["Guide+Down".to_string()]);
        assert!(cfg.bindings.load_ref.is_empty());
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let cfg = PortConfig::parse(
            "[video]\nextend_y = true\n\n[bindings]\nload = [\"Guide+L1\", \"Guide+L1+A\"]\n",
        );
        assert!(cfg.extend_y);
        assert_eq!(cfg.extended_aspect, 0);
        assert_eq!(cfg.bindings.load.len(), 2);
        // untouched action keeps its default
        assert_eq!(cfg.bindings.save, vec!["Guide+R1".to_string()]);
    }

    #[test]
    fn player_sprite_path_is_picked_up() {
        let cfg = PortConfig::parse("[general]\nplayer_sprite = \"sprites/hero.zspr\"\n");
        assert_eq!(
            cfg.player_sprite.as_deref(),
            Some(std::path::Path::new("sprites/hero.zspr"))
        );
    }

    #[test]
    fn malformed_toml_falls_back_to_defaults() {
        let cfg = PortConfig::parse("[video\nextend_y = maybe");
        assert!(!cfg.extend_y);
        assert_eq!(cfg.bindings.reset, vec!["Guide+Start".to_string()]);
    }
}
