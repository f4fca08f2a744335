//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--config`, `--sort`, `--theme`, etc.)
//! 2. `$CINEMATE_CONFIG` environment variable (path to config file)
//! 3. Project-local `.cinemate.toml` in the current working directory
//! 4. Global `~/.config/cinemate/config.toml`
//! 5. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;
use tracing::warn;

use crate::catalog::sort::SortDirection;

// ── Section configs ──────────────────────────────────────────────────────────

/// General application settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Catalog JSON file (overridden by CLI positional arg).
    pub movies_path: Option<String>,
    /// Directory of cached poster images.
    pub posters_dir: Option<String>,
}

/// Catalog browsing settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct CatalogConfig {
    /// Initial title sort: "ascending" or "descending".
    pub sort: Option<String>,
}

/// Layout settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct UiConfig {
    /// Show the movie detail panel next to the list.
    pub show_detail: Option<bool>,
}

/// Color settings for a single theme palette.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub list_selected_bg: Option<String>,
    pub list_selected_fg: Option<String>,
    pub category_fg: Option<String>,
    pub subcategory_fg: Option<String>,
    pub movie_fg: Option<String>,
    pub detail_fg: Option<String>,
    pub status_fg: Option<String>,
    pub border_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub catalog: CatalogConfig,
    pub ui: UiConfig,
    pub theme: ThemeConfig,
}

// ── Default constants ────────────────────────────────────────────────────────

/// Default catalog file, relative to the working directory.
pub const DEFAULT_MOVIES_PATH: &str = "data/movies.json";

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path, which is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("CINEMATE_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".cinemate.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("cinemate").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning logged).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = std::fs::read_to_string(path).ok()?;
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "failed to parse config file");
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                movies_path: other
                    .general
                    .movies_path
                    .clone()
                    .or(self.general.movies_path),
                posters_dir: other
                    .general
                    .posters_dir
                    .clone()
                    .or(self.general.posters_dir),
            },
            catalog: CatalogConfig {
                sort: other.catalog.sort.clone().or(self.catalog.sort),
            },
            ui: UiConfig {
                show_detail: other.ui.show_detail.or(self.ui.show_detail),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: other.theme.custom.clone().or(self.theme.custom),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Walk in reverse so that highest-priority (env var) overwrites lower.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    /// Catalog JSON path.
    pub fn movies_path(&self) -> PathBuf {
        PathBuf::from(
            self.general
                .movies_path
                .as_deref()
                .unwrap_or(DEFAULT_MOVIES_PATH),
        )
    }

    /// Poster cache directory, if configured.
    pub fn posters_dir(&self) -> Option<PathBuf> {
        self.general.posters_dir.as_deref().map(PathBuf::from)
    }

    /// Initial sort direction.
    pub fn sort_direction(&self) -> SortDirection {
        self.catalog
            .sort
            .as_deref()
            .map(SortDirection::from_str)
            .unwrap_or_default()
    }

    /// Whether the detail panel is shown.
    pub fn show_detail(&self) -> bool {
        self.ui.show_detail.unwrap_or(true)
    }

    /// Theme scheme: "dark", "light", or "custom".
    pub fn theme_scheme(&self) -> &str {
        self.theme.scheme.as_deref().unwrap_or("dark")
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_values() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.movies_path(), PathBuf::from("data/movies.json"));
        assert!(cfg.posters_dir().is_none());
        assert_eq!(cfg.sort_direction(), SortDirection::Ascending);
        assert!(cfg.show_detail());
        assert_eq!(cfg.theme_scheme(), "dark");
    }

    #[test]
    fn test_toml_parsing_full() {
        let toml = r#"
[general]
movies_path = "/srv/movies.json"
posters_dir = "/srv/posters"

[catalog]
sort = "descending"

[ui]
show_detail = false

[theme]
scheme = "light"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.movies_path(), PathBuf::from("/srv/movies.json"));
        assert_eq!(cfg.posters_dir(), Some(PathBuf::from("/srv/posters")));
        assert_eq!(cfg.sort_direction(), SortDirection::Descending);
        assert!(!cfg.show_detail());
        assert_eq!(cfg.theme_scheme(), "light");
    }

    #[test]
    fn test_toml_parsing_partial() {
        let toml = r#"
[catalog]
sort = "desc"
"#;
        let cfg: AppConfig = toml::from_str(toml).expect("parse failed");
        assert_eq!(cfg.sort_direction(), SortDirection::Descending);
        // Everything else should be defaults
        assert!(cfg.show_detail());
        assert_eq!(cfg.movies_path(), PathBuf::from(DEFAULT_MOVIES_PATH));
    }

    #[test]
    fn test_toml_parsing_empty() {
        let cfg: AppConfig = toml::from_str("").expect("parse failed");
        assert_eq!(cfg.sort_direction(), SortDirection::Ascending);
        assert_eq!(cfg.theme_scheme(), "dark");
    }

    #[test]
    fn test_merge_overrides() {
        let base = AppConfig {
            general: GeneralConfig {
                movies_path: Some("base.json".into()),
                posters_dir: Some("/base/posters".into()),
            },
            ui: UiConfig {
                show_detail: Some(false),
            },
            ..Default::default()
        };

        let over = AppConfig {
            general: GeneralConfig {
                movies_path: Some("over.json".into()),
                // posters_dir not set, base value kept
                ..Default::default()
            },
            ..Default::default()
        };

        let merged = base.merge(&over);
        assert_eq!(merged.movies_path(), PathBuf::from("over.json"));
        assert_eq!(merged.posters_dir(), Some(PathBuf::from("/base/posters")));
        assert!(!merged.show_detail());
    }

    #[test]
    fn test_merge_none_does_not_clear_some() {
        let base = AppConfig {
            catalog: CatalogConfig {
                sort: Some("descending".into()),
            },
            ..Default::default()
        };
        let merged = base.merge(&AppConfig::default());
        assert_eq!(merged.sort_direction(), SortDirection::Descending);
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("test-config.toml");
        let mut f = std::fs::File::create(&cfg_path).expect("create");
        writeln!(
            f,
            r#"
[general]
movies_path = "catalog.json"

[catalog]
sort = "descending"
"#
        )
        .expect("write");

        let cfg = load_file(&cfg_path).expect("load");
        assert_eq!(cfg.movies_path(), PathBuf::from("catalog.json"));
        assert_eq!(cfg.sort_direction(), SortDirection::Descending);
        // Unset fields fall through to defaults
        assert!(cfg.show_detail());
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_file(Path::new("/nonexistent/config.toml")).is_none());
    }

    #[test]
    fn test_load_invalid_toml_returns_none() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("bad.toml");
        std::fs::write(&cfg_path, "this is { not valid toml").expect("write");
        assert!(load_file(&cfg_path).is_none());
    }

    #[test]
    fn test_load_with_cli_overrides() {
        let dir = tempfile::tempdir().expect("tempdir");
        let cfg_path = dir.path().join("config.toml");
        std::fs::write(
            &cfg_path,
            r#"
[general]
posters_dir = "/file/posters"

[catalog]
sort = "ascending"
"#,
        )
        .expect("write");

        let cli_overrides = AppConfig {
            catalog: CatalogConfig {
                sort: Some("descending".into()),
            },
            ..Default::default()
        };

        let cfg = AppConfig::load(Some(&cfg_path), Some(&cli_overrides));
        // CLI override wins
        assert_eq!(cfg.sort_direction(), SortDirection::Descending);
        // File value preserved (not overridden by CLI)
        assert_eq!(cfg.posters_dir(), Some(PathBuf::from("/file/posters")));
    }

    #[test]
    fn test_theme_custom_colors() {
        let toml = r##"
[theme]
scheme = "custom"

[theme.custom]
category_fg = "#89b4fa"
border_fg = "#565f89"
"##;
        let cfg: AppConfig = toml::from_str(toml).expect("parse");
        assert_eq!(cfg.theme_scheme(), "custom");
        let custom = cfg.theme.custom.as_ref().expect("custom present");
        assert_eq!(custom.category_fg.as_deref(), Some("#89b4fa"));
        assert_eq!(custom.border_fg.as_deref(), Some("#565f89"));
        assert!(custom.movie_fg.is_none());
    }
}
