use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = "mdsite.json";

/// Top-level mdsite.json schema.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteConfig {
    #[serde(default = "default_content_dir")]
    pub content_dir: String,

    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    #[serde(default = "default_template")]
    pub template: String,

    #[serde(default = "default_out_dir")]
    pub out_dir: String,

    #[serde(default = "default_base_path")]
    pub base_path: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            content_dir: default_content_dir(),
            static_dir: default_static_dir(),
            template: default_template(),
            out_dir: default_out_dir(),
            base_path: default_base_path(),
        }
    }
}

fn default_content_dir() -> String {
    "content".to_string()
}
fn default_static_dir() -> String {
    "static".to_string()
}
fn default_template() -> String {
    "template.html".to_string()
}
fn default_out_dir() -> String {
    "public".to_string()
}
fn default_base_path() -> String {
    "/".to_string()
}

/// A loaded config together with the directory its relative paths resolve against.
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: SiteConfig,
    pub root: PathBuf,
}

impl LoadedConfig {
    pub fn content_dir(&self) -> PathBuf {
        self.root.join(&self.config.content_dir)
    }

    pub fn static_dir(&self) -> PathBuf {
        self.root.join(&self.config.static_dir)
    }

    pub fn template(&self) -> PathBuf {
        self.root.join(&self.config.template)
    }

    pub fn out_dir(&self) -> PathBuf {
        self.root.join(&self.config.out_dir)
    }
}

/// Load config from `explicit`, or from `mdsite.json` in `cwd`, or return defaults.
///
/// An explicitly named file must exist; the implicit one is optional.
pub fn load_config(explicit: Option<&Path>, cwd: &Path) -> Result<LoadedConfig> {
    let config_path = match explicit {
        Some(path) => {
            if !path.exists() {
                anyhow::bail!("Config file {} does not exist", path.display());
            }
            path.to_path_buf()
        }
        None => cwd.join(CONFIG_FILE),
    };

    if config_path.exists() {
        let raw = std::fs::read_to_string(&config_path)
            .with_context(|| format!("Failed to read {}", config_path.display()))?;
        let config: SiteConfig = serde_json::from_str(&raw)
            .with_context(|| format!("Failed to parse {}", config_path.display()))?;
        let root = config_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| cwd.to_path_buf());
        log::debug!("loaded config from {}", config_path.display());
        Ok(LoadedConfig { config, root })
    } else {
        log::debug!("no {} in {}, using defaults", CONFIG_FILE, cwd.display());
        Ok(LoadedConfig {
            config: SiteConfig::default(),
            root: cwd.to_path_buf(),
        })
    }
}
