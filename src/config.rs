use std::path::PathBuf;

use anyhow::{anyhow, Context, Result};
use directories::ProjectDirs;
use tracing::warn;

use crate::domain::entities::pagination::{DEFAULT_LIMIT, LIMIT_OPTIONS};

pub const DB_ENV: &str = "CAMPUS_ADMIN_DB";
pub const PAGE_SIZE_ENV: &str = "CAMPUS_ADMIN_PAGE_SIZE";
pub const SEED_ENV: &str = "CAMPUS_ADMIN_SEED";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub default_limit: u32,
    pub limit_options: Vec<u32>,
    pub seed_demo_data: bool,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an environment lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_path = match lookup(DB_ENV).filter(|value| !value.trim().is_empty()) {
            Some(path) => PathBuf::from(path),
            None => default_db_path()?,
        };

        let default_limit = match lookup(PAGE_SIZE_ENV) {
            Some(raw) => match raw.trim().parse::<u32>() {
                Ok(limit) if limit > 0 => limit,
                _ => {
                    warn!(value = %raw, "ignoring invalid {PAGE_SIZE_ENV}");
                    DEFAULT_LIMIT
                }
            },
            None => DEFAULT_LIMIT,
        };

        let mut limit_options = LIMIT_OPTIONS.to_vec();
        if !limit_options.contains(&default_limit) {
            limit_options.push(default_limit);
            limit_options.sort_unstable();
        }

        let seed_demo_data = !matches!(
            lookup(SEED_ENV).as_deref().map(str::trim),
            Some("0") | Some("false") | Some("no")
        );

        Ok(Self {
            db_path,
            default_limit,
            limit_options,
            seed_demo_data,
        })
    }
}

fn project_dirs() -> Result<ProjectDirs> {
    ProjectDirs::from("es", "campus", "campus-admin")
        .ok_or_else(|| anyhow!("unable to resolve data directory"))
}

pub fn default_db_path() -> Result<PathBuf> {
    Ok(project_dirs()?.data_local_dir().join("campus.sqlite"))
}

/// WebView profile directory of the desktop shell, created on demand.
#[cfg_attr(not(feature = "desktop"), allow(dead_code))]
pub fn default_webview_data_dir() -> Result<PathBuf> {
    let webview_data_dir = project_dirs()?.data_local_dir().join("webview");
    std::fs::create_dir_all(&webview_data_dir).with_context(|| {
        format!(
            "failed to create webview dir: {}",
            webview_data_dir.display()
        )
    })?;
    Ok(webview_data_dir)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn env_overrides_db_path_and_page_size() {
        let config = AppConfig::from_lookup(lookup(&[
            (DB_ENV, "/tmp/campus-test.sqlite"),
            (PAGE_SIZE_ENV, "25"),
            (SEED_ENV, "false"),
        ]))
        .expect("config should load");

        assert_eq!(config.db_path, PathBuf::from("/tmp/campus-test.sqlite"));
        assert_eq!(config.default_limit, 25);
        assert_eq!(config.limit_options, [5, 10, 20, 25, 50]);
        assert!(!config.seed_demo_data);
    }

    #[test]
    fn invalid_page_size_falls_back_to_default() {
        let config = AppConfig::from_lookup(lookup(&[
            (DB_ENV, "/tmp/x.sqlite"),
            (PAGE_SIZE_ENV, "zero"),
        ]))
        .expect("config should load");

        assert_eq!(config.default_limit, DEFAULT_LIMIT);
        assert_eq!(config.limit_options, LIMIT_OPTIONS);
        assert!(config.seed_demo_data);
    }
}
