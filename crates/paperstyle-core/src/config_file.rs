use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// On-disk TOML configuration structure.
/// All fields are optional so partial configs work (merge with defaults).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    pub defaults: Option<DefaultsConfig>,
    pub render: Option<RenderConfig>,
    pub history: Option<HistoryConfig>,
    pub parsing: Option<ParsingOverrides>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub style: Option<String>,
    pub paper_type: Option<String>,
    pub author: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Lines printed under the author on institution title pages.
    pub institution_lines: Option<Vec<String>>,
    /// Affiliation line printed on APA and Springer title blocks.
    pub affiliation: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HistoryConfig {
    pub enabled: Option<bool>,
    pub capacity: Option<usize>,
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsingOverrides {
    /// Extra labels recognised as subsection headings.
    pub extra_headings: Option<Vec<String>>,
    /// Extra labels that end an abstract or keywords block.
    pub extra_stop_labels: Option<Vec<String>>,
}

/// Platform config directory path: `<config_dir>/paperstyle/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("paperstyle").join("config.toml"))
}

/// Load config by cascading CWD `.paperstyle.toml` over platform config.
/// CWD values override platform values.
pub fn load_config() -> ConfigFile {
    let platform = config_path().and_then(|p| load_from_path(&p));
    let cwd = load_from_path(Path::new(".paperstyle.toml"));

    match (platform, cwd) {
        (None, None) => ConfigFile::default(),
        (Some(p), None) => p,
        (None, Some(c)) => c,
        (Some(p), Some(c)) => merge(p, c),
    }
}

/// Load a config from a specific path. Returns `None` if the file doesn't
/// exist or can't be parsed.
pub fn load_from_path(path: &Path) -> Option<ConfigFile> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "ignoring unparseable config file");
            None
        }
    }
}

/// Pick `overlay.section.field`, falling back to `base.section.field`.
macro_rules! pick {
    ($overlay:expr, $base:expr, $section:ident, $field:ident) => {
        $overlay
            .$section
            .as_ref()
            .and_then(|s| s.$field.clone())
            .or_else(|| $base.$section.as_ref().and_then(|s| s.$field.clone()))
    };
}

/// Merge two configs: `overlay` values take precedence over `base`.
pub fn merge(base: ConfigFile, overlay: ConfigFile) -> ConfigFile {
    ConfigFile {
        defaults: Some(DefaultsConfig {
            style: pick!(overlay, base, defaults, style),
            paper_type: pick!(overlay, base, defaults, paper_type),
            author: pick!(overlay, base, defaults, author),
        }),
        render: Some(RenderConfig {
            institution_lines: pick!(overlay, base, render, institution_lines),
            affiliation: pick!(overlay, base, render, affiliation),
        }),
        history: Some(HistoryConfig {
            enabled: pick!(overlay, base, history, enabled),
            capacity: pick!(overlay, base, history, capacity),
            path: pick!(overlay, base, history, path),
        }),
        parsing: Some(ParsingOverrides {
            extra_headings: pick!(overlay, base, parsing, extra_headings),
            extra_stop_labels: pick!(overlay, base, parsing, extra_stop_labels),
        }),
    }
}

/// Save the config to the platform config directory.
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
