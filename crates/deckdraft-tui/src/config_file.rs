use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use deckdraft_core::DetailLevel;

use crate::model::config::ConfigState;

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerConfig>,
    pub editor: Option<EditorConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServerConfig {
    pub url: Option<String>,
    pub download_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EditorConfig {
    /// 0 (very concise) to 4 (very detailed).
    pub detail_level: Option<u8>,
    pub theme: Option<String>,
}

/// Platform config directory path: `<config_dir>/deckdraft/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("deckdraft").join("config.toml"))
}

/// Load config by cascading CWD `.deckdraft.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(&PathBuf::from(".deckdraft.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

fn load_from_path(path: &PathBuf) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    toml::from_str(&content).ok()
}

/// Merge two configs: `overlay` values take precedence over `base`.
fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        server: Some(ServerConfig {
            url: overlay
                .server
                .as_ref()
                .and_then(|s| s.url.clone())
                .or_else(|| base.server.as_ref().and_then(|s| s.url.clone())),
            download_dir: overlay
                .server
                .as_ref()
                .and_then(|s| s.download_dir.clone())
                .or_else(|| base.server.as_ref().and_then(|s| s.download_dir.clone())),
        }),
        editor: Some(EditorConfig {
            detail_level: overlay
                .editor
                .as_ref()
                .and_then(|e| e.detail_level)
                .or_else(|| base.editor.as_ref().and_then(|e| e.detail_level)),
            theme: overlay
                .editor
                .as_ref()
                .and_then(|e| e.theme.clone())
                .or_else(|| base.editor.as_ref().and_then(|e| e.theme.clone())),
        }),
    }
}

/// Save the current config to the platform config directory.
pub fn save_config(config: &ConfigFile) -> Result<PathBuf, String> {
    let path = config_path().ok_or_else(|| "Could not determine config directory".to_string())?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .map_err(|e| format!("Failed to create config directory: {}", e))?;
    }
    let content =
        toml::to_string_pretty(config).map_err(|e| format!("Failed to serialize config: {}", e))?;
    std::fs::write(&path, content).map_err(|e| format!("Failed to write config: {}", e))?;
    Ok(path)
}

/// Convert a `ConfigFile` into partial fills on a `ConfigState`.
/// Only sets values that are `Some` in the file config (doesn't overwrite
/// with defaults).
pub fn apply_to_config_state(file_cfg: &ConfigFile, state: &mut ConfigState) {
    if let Some(server) = &file_cfg.server {
        if let Some(ref url) = server.url {
            if !url.is_empty() {
                state.server_url = url.clone();
            }
        }
        if let Some(ref dir) = server.download_dir {
            if !dir.is_empty() {
                state.download_dir = PathBuf::from(dir);
            }
        }
    }
    if let Some(editor) = &file_cfg.editor {
        if let Some(value) = editor.detail_level {
            if let Some(level) = DetailLevel::from_value(value) {
                state.detail_level = level;
            }
        }
        if let Some(ref theme) = editor.theme {
            if !theme.is_empty() {
                state.theme_name = theme.clone();
            }
        }
    }
}

/// Convert a `ConfigState` into a `ConfigFile` for saving.
pub fn from_config_state(state: &ConfigState) -> ConfigFile {
    ConfigFile {
        server: Some(ServerConfig {
            url: Some(state.server_url.clone()),
            download_dir: Some(state.download_dir.display().to_string()),
        }),
        editor: Some(EditorConfig {
            detail_level: Some(state.detail_level.value()),
            theme: Some(state.theme_name.clone()),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_overlay_wins() {
        let base = ConfigFile {
            server: Some(ServerConfig {
                url: Some("http://base:8000".to_string()),
                download_dir: Some("/base".to_string()),
            }),
            editor: Some(EditorConfig {
                detail_level: Some(1),
                theme: None,
            }),
        };
        let overlay = ConfigFile {
            server: Some(ServerConfig {
                url: Some("http://overlay:9000".to_string()),
                download_dir: None,
            }),
            editor: None,
        };

        let merged = merge(base, overlay);
        let server = merged.server.unwrap();
        assert_eq!(server.url.as_deref(), Some("http://overlay:9000"));
        assert_eq!(server.download_dir.as_deref(), Some("/base"));
        assert_eq!(merged.editor.unwrap().detail_level, Some(1));
    }

    #[test]
    fn test_apply_ignores_invalid_detail_level() {
        let mut state = ConfigState::default();
        let before = state.detail_level;
        apply_to_config_state(
            &ConfigFile {
                server: None,
                editor: Some(EditorConfig {
                    detail_level: Some(9),
                    theme: None,
                }),
            },
            &mut state,
        );
        assert_eq!(state.detail_level, before);
    }

    #[test]
    fn test_config_state_round_trip() {
        let mut state = ConfigState::default();
        state.server_url = "http://example:8000".to_string();
        state.detail_level = DetailLevel::Detailed;

        let mut restored = ConfigState::default();
        apply_to_config_state(&from_config_state(&state), &mut restored);
        assert_eq!(restored.server_url, state.server_url);
        assert_eq!(restored.detail_level, state.detail_level);
    }
}
