use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::Context;
use serde::Deserialize;

use crate::normalize_base_url;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000";
pub const DEFAULT_CONFIG_FILE: &str = "companies.toml";
const DEFAULT_REDIRECT_DELAY: Duration = Duration::from_millis(1000);
const DEFAULT_NOTICE_DURATION: Duration = Duration::from_millis(1500);

/// Delays applied after a successful submit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub redirect_delay: Duration,
    pub notice_duration: Duration,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            redirect_delay: DEFAULT_REDIRECT_DELAY,
            notice_duration: DEFAULT_NOTICE_DURATION,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientSettings {
    pub api_base_url: String,
    pub timing: Timing,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timing: Timing::default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct FileSettings {
    api_base_url: Option<String>,
    redirect_delay_ms: Option<u64>,
    notice_duration_ms: Option<u64>,
}

/// Layers defaults, the TOML file, the process environment and an explicit
/// base url override, in that order.
///
/// An explicit `config_path` must exist; the default `companies.toml` in the
/// working directory is optional.
pub fn load_settings(
    config_path: Option<&Path>,
    api_url_override: Option<&str>,
) -> anyhow::Result<ClientSettings> {
    let mut settings = ClientSettings::default();

    let (path, required) = match config_path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    match fs::read_to_string(&path) {
        Ok(raw) => apply_file(&mut settings, &raw)
            .with_context(|| format!("invalid config file '{}'", path.display()))?,
        Err(err) if required => {
            return Err(err)
                .with_context(|| format!("failed to read config file '{}'", path.display()));
        }
        Err(_) => {}
    }

    apply_env(&mut settings, |name| std::env::var(name).ok());

    if let Some(url) = api_url_override {
        settings.api_base_url = url.to_string();
    }

    settings.api_base_url = normalize_base_url(&settings.api_base_url)?;
    Ok(settings)
}

fn apply_file(settings: &mut ClientSettings, raw: &str) -> anyhow::Result<()> {
    let file: FileSettings = toml::from_str(raw)?;
    if let Some(url) = file.api_base_url {
        settings.api_base_url = url;
    }
    if let Some(ms) = file.redirect_delay_ms {
        settings.timing.redirect_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = file.notice_duration_ms {
        settings.timing.notice_duration = Duration::from_millis(ms);
    }
    Ok(())
}

fn apply_env(settings: &mut ClientSettings, lookup: impl Fn(&str) -> Option<String>) {
    if let Some(v) = lookup("COMPANIES_API_URL") {
        settings.api_base_url = v;
    }
    if let Some(v) = lookup("APP__API_BASE_URL") {
        settings.api_base_url = v;
    }

    if let Some(ms) = lookup("APP__REDIRECT_DELAY_MS").and_then(|v| v.parse::<u64>().ok()) {
        settings.timing.redirect_delay = Duration::from_millis(ms);
    }
    if let Some(ms) = lookup("APP__NOTICE_DURATION_MS").and_then(|v| v.parse::<u64>().ok()) {
        settings.timing.notice_duration = Duration::from_millis(ms);
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
