//! Load config from file and environment.

use serde::Deserialize;
use std::path::PathBuf;

/// Host configuration. File: ~/.config/protonpack/config.toml or /etc/protonpack/config.toml.
/// Env overrides: PROTONPACK_WAND_PORT, PROTONPACK_SERIAL1_PORT, PROTONPACK_TICK_MS.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// TCP port standing in for the wand's serial line (default 47100).
    #[serde(default = "default_wand_port")]
    pub wand_port: u16,
    /// TCP port standing in for the serial1 line (default 47101).
    #[serde(default = "default_serial1_port")]
    pub serial1_port: u16,
    /// Timer service period (default 10).
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Tracks reported as present on the pack's storage.
    #[serde(default)]
    pub music_tracks: u16,
    #[serde(default)]
    pub core: pack_core::Config,
}

fn default_wand_port() -> u16 {
    47100
}
fn default_serial1_port() -> u16 {
    47101
}
fn default_tick_ms() -> u64 {
    10
}

impl Default for Config {
    fn default() -> Self {
        Self {
            wand_port: default_wand_port(),
            serial1_port: default_serial1_port(),
            tick_ms: default_tick_ms(),
            music_tracks: 0,
            core: pack_core::Config::default(),
        }
    }
}

/// Load config: merge default, then config file (if present), then env vars.
pub fn load() -> Config {
    let mut c = load_file().unwrap_or_default();
    if let Some(p) = env_parse("PROTONPACK_WAND_PORT") {
        c.wand_port = p;
    }
    if let Some(p) = env_parse("PROTONPACK_SERIAL1_PORT") {
        c.serial1_port = p;
    }
    if let Some(ms) = env_parse::<u64>("PROTONPACK_TICK_MS") {
        c.tick_ms = ms.max(1);
    }
    c
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok()?.parse().ok()
}

fn config_paths() -> Vec<PathBuf> {
    let home = std::env::var_os("HOME").map(PathBuf::from);
    let mut out = Vec::new();
    if let Some(h) = home {
        out.push(h.join(".config/protonpack/config.toml"));
    }
    out.push(PathBuf::from("/etc/protonpack/config.toml"));
    out
}

/// First existing file wins; a file that fails to parse is reported and ignored.
fn load_file() -> Option<Config> {
    let path = config_paths().into_iter().find(|p| p.exists())?;
    let text = match std::fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "cannot read config");
            return None;
        }
    };
    match toml::from_str::<Config>(&text) {
        Ok(c) => {
            tracing::info!(path = %path.display(), "loaded config");
            Some(c)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "invalid config, using defaults");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_is_all_defaults() {
        let c: Config = toml::from_str("").unwrap();
        assert_eq!(c.wand_port, 47100);
        assert_eq!(c.serial1_port, 47101);
        assert_eq!(c.core, pack_core::Config::default());
    }

    #[test]
    fn core_section_overrides_tunables() {
        let c: Config = toml::from_str(
            r#"
            tick_ms = 5
            music_tracks = 12

            [core]
            wand_disconnect_delay_ms = 4000
            volume_step = 10
            "#,
        )
        .unwrap();
        assert_eq!(c.tick_ms, 5);
        assert_eq!(c.music_tracks, 12);
        assert_eq!(c.core.wand_disconnect_delay_ms, 4000);
        assert_eq!(c.core.volume_step, 10);
        assert_eq!(c.core.mash_max, pack_core::Config::default().mash_max);
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(toml::from_str::<Config>("proxy_port = 1").is_err());
    }
}
