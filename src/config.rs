use anyhow::{Context, Result};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::panels::{CollapsePolicy, DEFAULT_LINK_BASE, DEFAULT_MAX_DEPTH, RenderOptions};
use crate::tui::ThemeVariant;

/// Environment variable that overrides `link_base`
pub const LINK_BASE_ENV: &str = "CHUNKVIEW_LINK_BASE";

const APP_DIR: &str = "chunkview";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Prefix joined with a panel's `link` field to form the link target
    #[serde(default = "default_link_base")]
    pub link_base: String,
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    #[serde(default)]
    pub theme: ThemeVariant,
    #[serde(default)]
    pub view: ViewSettings,
    #[serde(default)]
    pub compare: CompareSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewSettings {
    #[serde(default)]
    pub collapse_linked: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompareSettings {
    #[serde(default = "default_true")]
    pub collapse_linked: bool,
}

/// Which screen a set of render options is for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    View,
    Compare,
}

fn default_link_base() -> String {
    DEFAULT_LINK_BASE.to_string()
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_true() -> bool {
    true
}

impl Default for ViewSettings {
    fn default() -> Self {
        Self {
            collapse_linked: false,
        }
    }
}

impl Default for CompareSettings {
    fn default() -> Self {
        Self {
            collapse_linked: default_true(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            link_base: default_link_base(),
            max_depth: default_max_depth(),
            theme: ThemeVariant::default(),
            view: ViewSettings::default(),
            compare: CompareSettings::default(),
        }
    }
}

impl Config {
    pub fn get_config_dir() -> Result<PathBuf> {
        let config_dir = if cfg!(target_os = "linux") {
            // Use XDG config directory on Linux
            dirs::config_dir()
                .context("Failed to get XDG config directory")?
                .join(APP_DIR)
        } else {
            // Use home directory with dot prefix on Windows/Mac
            dirs::home_dir()
                .context("Failed to get home directory")?
                .join(format!(".{}", APP_DIR))
        };

        if !config_dir.exists() {
            fs::create_dir_all(&config_dir)
                .with_context(|| format!("Failed to create config directory: {:?}", config_dir))?;
            info!("Created config directory: {:?}", config_dir);
        }

        Ok(config_dir)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    /// Load the user config and apply environment overrides
    pub fn load() -> Result<Self> {
        let mut config = Self::load_or_default(Self::get_config_path())?;
        config.apply_link_base_override(std::env::var(LINK_BASE_ENV).ok());
        Ok(config)
    }

    /// Defaults when the config location cannot be resolved or created
    fn load_or_default(config_path: Result<PathBuf>) -> Result<Self> {
        match config_path {
            Ok(config_path) => Self::load_from(&config_path),
            Err(e) => {
                warn!("Config directory unavailable, using defaults: {:#}", e);
                Ok(Self::default())
            }
        }
    }

    /// Load a config file, falling back to defaults when it does not exist
    pub fn load_from(config_path: &Path) -> Result<Self> {
        debug!("Loading config from: {:?}", config_path);

        if !config_path.exists() {
            info!("Config file doesn't exist, using defaults");
            return Ok(Self::default());
        }

        let config_content = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config file: {:?}", config_path))?;

        let config: Config = toml::from_str(&config_content)
            .with_context(|| format!("Failed to parse config file: {:?}", config_path))?;

        debug!(
            "Loaded config: link_base={}, max_depth={}",
            config.link_base, config.max_depth
        );
        Ok(config)
    }

    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        debug!("Saving config to: {:?}", config_path);

        let config_content =
            toml::to_string_pretty(self).context("Failed to serialize config to TOML")?;

        fs::write(config_path, config_content)
            .with_context(|| format!("Failed to write config file: {:?}", config_path))?;

        info!("Config saved successfully");
        Ok(())
    }

    pub fn apply_link_base_override(&mut self, link_base: Option<String>) {
        if let Some(link_base) = link_base {
            debug!("Overriding link_base with {}", link_base);
            self.link_base = link_base;
        }
    }

    pub fn collapse_policy(&self, mode: Mode) -> CollapsePolicy {
        match mode {
            Mode::View => CollapsePolicy::from_flag(self.view.collapse_linked),
            Mode::Compare => CollapsePolicy::from_flag(self.compare.collapse_linked),
        }
    }

    pub fn render_options(&self, mode: Mode) -> RenderOptions {
        RenderOptions::default()
            .with_policy(self.collapse_policy(mode))
            .with_link_base(self.link_base.clone())
            .with_max_depth(self.max_depth)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.link_base, DEFAULT_LINK_BASE);
        assert_eq!(config.max_depth, DEFAULT_MAX_DEPTH);
        assert_eq!(config.collapse_policy(Mode::View), CollapsePolicy::Expanded);
        assert_eq!(config.collapse_policy(Mode::Compare), CollapsePolicy::CollapseLinked);
    }

    #[test]
    fn test_unavailable_config_dir_uses_defaults() {
        let config = Config::load_or_default(Err(anyhow::anyhow!("read-only home"))).unwrap();
        assert_eq!(config, Config::default());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_depth = 9").unwrap();
        assert_eq!(Config::load_or_default(Ok(path)).unwrap().max_depth, 9);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(
            r#"
            link_base = "file:///srv/"
            theme = "latte"

            [compare]
            "#,
        )
        .unwrap();

        assert_eq!(config.link_base, "file:///srv/");
        assert_eq!(config.theme, ThemeVariant::Latte);
        assert!(config.compare.collapse_linked);
        assert!(!config.view.collapse_linked);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::default();
        config.max_depth = 12;
        config.view.collapse_linked = true;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
        assert_eq!(
            loaded.render_options(Mode::View),
            RenderOptions::default()
                .with_policy(CollapsePolicy::CollapseLinked)
                .with_max_depth(12)
        );
    }

    #[test]
    fn test_invalid_toml_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "max_depth = \"deep\"").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_link_base_override() {
        let mut config = Config::default();
        config.apply_link_base_override(None);
        assert_eq!(config.link_base, DEFAULT_LINK_BASE);
        config.apply_link_base_override(Some("x://".to_string()));
        assert_eq!(config.link_base, "x://");
    }
}
