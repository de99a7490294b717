use std::{collections::HashSet, env, fs, path::PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::nav::menu::{default_calls_to_action, default_menu, MobileRenderMode};
use crate::nav::{Breakpoints, MenuConfig, MenuItem, MenuLink};

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub breakpoints: Option<Breakpoints>,

    /// Replaces the built-in menu when present.
    #[serde(default)]
    pub menu: Option<Vec<MenuItem>>,

    #[serde(default)]
    pub calls_to_action: Option<Vec<MenuLink>>,
}

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub breakpoints: Breakpoints,
    pub menu: MenuConfig,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MenuError {
    #[error("menu item #{0} has an empty label")]
    EmptyLabel(usize),
    #[error("duplicate menu label '{0}'")]
    DuplicateLabel(String),
    #[error("menu item '{0}' renders as a mobile link but has no target")]
    MissingMobileHref(String),
    #[error("breakpoints must satisfy 0 < md < lg (got md={md}, lg={lg})")]
    InvalidBreakpoints { md: i32, lg: i32 },
    #[error("expected exactly two calls-to-action, got {0}")]
    CallsToAction(usize),
}

pub fn load_optional() -> Result<Option<Config>> {
    let Some(path) = resolve_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    let bytes = fs::read(&path).with_context(|| format!("reading config {}", path.display()))?;
    let cfg: Config =
        serde_json::from_slice(&bytes).with_context(|| format!("parsing {}", path.display()))?;
    Ok(Some(cfg))
}

pub fn resolve_config_path() -> Option<PathBuf> {
    if let Ok(p) = env::var("STUDIONAV_CONFIG") {
        if !p.trim().is_empty() {
            return Some(PathBuf::from(p));
        }
    }

    let local = PathBuf::from("studionav.json");
    if local.exists() {
        return Some(local);
    }

    if let Some(appdata) = env::var_os("APPDATA") {
        return Some(PathBuf::from(appdata).join("studionav").join("config.json"));
    }

    if let Some(home) = env::var_os("HOME") {
        return Some(PathBuf::from(home).join(".config").join("studionav").join("config.json"));
    }

    None
}

/// Writes a template holding the built-in defaults unless a config already exists.
pub fn ensure_config_file_exists() -> Result<PathBuf> {
    let Some(path) = resolve_config_path() else {
        return Err(anyhow!(
            "No config path available (set STUDIONAV_CONFIG or ensure APPDATA/HOME is present)"
        ));
    };

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir {}", parent.display()))?;
        }
    }

    if !path.exists() {
        let template = Config {
            breakpoints: Some(Breakpoints::default()),
            menu: Some(default_menu()),
            calls_to_action: Some(default_calls_to_action()),
        };
        let mut s = serde_json::to_string_pretty(&template).context("serialize config template")?;
        s.push('\n');
        fs::write(&path, s.as_bytes()).with_context(|| format!("write {}", path.display()))?;
    }

    Ok(path)
}

/// Merges file values over the built-in defaults and validates the result.
pub fn resolve(config: Option<&Config>) -> Result<ResolvedConfig> {
    let mut resolved = ResolvedConfig {
        breakpoints: Breakpoints::default(),
        menu: MenuConfig::default(),
    };

    if let Some(cfg) = config {
        if let Some(bp) = cfg.breakpoints {
            resolved.breakpoints = bp;
        }
        if let Some(items) = &cfg.menu {
            let builtin = default_menu();
            resolved.menu.items = items
                .iter()
                .cloned()
                .map(|item| keep_mobile_link(item, &builtin))
                .collect();
        }
        if let Some(cta) = &cfg.calls_to_action {
            resolved.menu.calls_to_action = cta.clone();
        }
    }

    validate(&resolved).context("invalid navigation config")?;
    Ok(resolved)
}

/// File items cannot express "no override", so an accordion-mode item inherits
/// the built-in item's mobile link of the same label.
fn keep_mobile_link(mut item: MenuItem, builtin: &[MenuItem]) -> MenuItem {
    if item.mobile_render_mode != MobileRenderMode::Accordion {
        return item;
    }
    let inherited = builtin
        .iter()
        .find(|b| b.label == item.label)
        .map(|b| &b.mobile_render_mode)
        .filter(|mode| matches!(mode, MobileRenderMode::Link { .. }));
    if let Some(mode) = inherited {
        debug!(label = %item.label, "keeping built-in mobile link");
        item.mobile_render_mode = mode.clone();
    }
    item
}

pub fn validate(resolved: &ResolvedConfig) -> Result<(), MenuError> {
    let Breakpoints { md, lg } = resolved.breakpoints;
    if md <= 0 || md >= lg {
        return Err(MenuError::InvalidBreakpoints { md, lg });
    }

    let mut seen = HashSet::new();
    for (idx, item) in resolved.menu.items.iter().enumerate() {
        if item.label.trim().is_empty() {
            return Err(MenuError::EmptyLabel(idx));
        }
        if !seen.insert(item.label.as_str()) {
            return Err(MenuError::DuplicateLabel(item.label.clone()));
        }
        if let MobileRenderMode::Link { href } = &item.mobile_render_mode {
            if href.trim().is_empty() {
                return Err(MenuError::MissingMobileHref(item.label.clone()));
            }
        }
    }

    let cta = resolved.menu.calls_to_action.len();
    if cta != 2 {
        return Err(MenuError::CallsToAction(cta));
    }
    Ok(())
}
