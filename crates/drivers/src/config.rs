use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use facematch_application::{DateStyle, ViewSettings};
use facematch_domain::{PageRequest, TopK};
use serde::Deserialize;

const DEFAULT_SERVER_URL: &str = "http://127.0.0.1:8000";
const DEFAULT_API_BASE: &str = "/api";
const DEFAULT_OUTPUT_PATH: &str = "facematch.html";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TOP_K: u32 = 5;
const DEFAULT_FACES_PAGE_LIMIT: u32 = 100;
const DEFAULT_HISTORY_PAGE_LIMIT: u32 = 50;
const DEFAULT_UPLOAD_PAUSE_MS: u64 = 500;
const DEFAULT_DATE_LOCALE: &str = "vi-VN";

#[derive(Debug, Deserialize, Default)]
struct ConfigFile {
    output_path: Option<PathBuf>,
    server: Option<ServerConfigFile>,
    view: Option<ViewConfigFile>,
    upload: Option<UploadConfigFile>,
}

#[derive(Debug, Deserialize, Default)]
struct ServerConfigFile {
    url: Option<String>,
    api_base: Option<String>,
    timeout_secs: Option<u64>,
}

#[derive(Debug, Deserialize, Default)]
struct ViewConfigFile {
    default_top_k: Option<u32>,
    faces_page_limit: Option<u32>,
    history_page_limit: Option<u32>,
    date_locale: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct UploadConfigFile {
    pause_ms: Option<u64>,
}

/// Values given on the command line; they win over file and environment.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    pub server: Option<String>,
    pub out: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub server_url: String,
    pub api_base: String,
    pub output_path: PathBuf,
    pub timeout: Duration,
    pub default_top_k: u32,
    pub faces_page_limit: u32,
    pub history_page_limit: u32,
    pub upload_pause: Duration,
    pub date_locale: String,
}

impl AppConfig {
    pub fn load(overrides: &Overrides) -> Result<Self> {
        Self::load_with(&|key: &str| std::env::var(key).ok(), overrides)
    }

    fn load_with(env: &dyn Fn(&str) -> Option<String>, overrides: &Overrides) -> Result<Self> {
        let file_cfg = match env("FACEMATCH_CONFIG").filter(|path| !path.trim().is_empty()) {
            Some(path) => read_config_file(Path::new(&path))?,
            None => ConfigFile::default(),
        };
        let mut cfg = Self::from_file(file_cfg);
        cfg.apply_env(env)?;
        cfg.apply_overrides(overrides);
        cfg.validate()?;
        Ok(cfg)
    }

    fn from_file(file: ConfigFile) -> Self {
        let server = file.server.unwrap_or_default();
        let view = file.view.unwrap_or_default();
        Self {
            server_url: server
                .url
                .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string()),
            api_base: server
                .api_base
                .unwrap_or_else(|| DEFAULT_API_BASE.to_string()),
            output_path: file
                .output_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH)),
            timeout: Duration::from_secs(server.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
            default_top_k: view.default_top_k.unwrap_or(DEFAULT_TOP_K),
            faces_page_limit: view.faces_page_limit.unwrap_or(DEFAULT_FACES_PAGE_LIMIT),
            history_page_limit: view
                .history_page_limit
                .unwrap_or(DEFAULT_HISTORY_PAGE_LIMIT),
            upload_pause: Duration::from_millis(
                file.upload
                    .and_then(|upload| upload.pause_ms)
                    .unwrap_or(DEFAULT_UPLOAD_PAUSE_MS),
            ),
            date_locale: view
                .date_locale
                .unwrap_or_else(|| DEFAULT_DATE_LOCALE.to_string()),
        }
    }

    fn apply_env(&mut self, env: &dyn Fn(&str) -> Option<String>) -> Result<()> {
        if let Some(url) = env("FACEMATCH_SERVER").filter(|url| !url.trim().is_empty()) {
            self.server_url = url;
        }
        if let Some(base) = env("FACEMATCH_API_BASE") {
            self.api_base = base;
        }
        if let Some(out) = env("FACEMATCH_OUT").filter(|out| !out.trim().is_empty()) {
            self.output_path = PathBuf::from(out);
        }
        if let Some(timeout) = env("FACEMATCH_TIMEOUT_SECS") {
            let seconds: u64 = timeout.trim().parse().map_err(|_| {
                anyhow!("FACEMATCH_TIMEOUT_SECS must be an integer number of seconds")
            })?;
            self.timeout = Duration::from_secs(seconds);
        }
        Ok(())
    }

    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(server) = &overrides.server {
            self.server_url = server.clone();
        }
        if let Some(out) = &overrides.out {
            self.output_path = out.clone();
        }
    }

    fn validate(&self) -> Result<()> {
        let url = self.server_url.trim();
        if url.is_empty() {
            return Err(anyhow!("server url must not be empty"));
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(anyhow!("server url must start with http:// or https://: {url}"));
        }
        if self.timeout.is_zero() {
            return Err(anyhow!("timeout must be greater than zero"));
        }
        if self.default_top_k == 0 {
            return Err(anyhow!("default_top_k must be at least 1"));
        }
        if self.faces_page_limit == 0 || self.history_page_limit == 0 {
            return Err(anyhow!("page limits must be at least 1"));
        }
        if DateStyle::from_locale(&self.date_locale).is_none() {
            return Err(anyhow!("unsupported date locale: {}", self.date_locale));
        }
        Ok(())
    }

    pub fn view_settings(&self) -> Result<ViewSettings> {
        Ok(ViewSettings {
            default_top_k: TopK::new(i64::from(self.default_top_k))?,
            faces_page: PageRequest::new(0, self.faces_page_limit),
            history_page: PageRequest::new(0, self.history_page_limit),
            dates: DateStyle::from_locale(&self.date_locale)
                .ok_or_else(|| anyhow!("unsupported date locale: {}", self.date_locale))?,
        })
    }
}

fn read_config_file(path: &Path) -> Result<ConfigFile> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("reading config file {}", path.display()))?;
    toml::from_str(&raw).with_context(|| format!("parsing config file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use tempfile::TempDir;

    use super::*;

    fn env_of(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars = pairs
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect::<HashMap<_, _>>();
        move |key: &str| vars.get(key).cloned()
    }

    #[test]
    fn defaults_apply_without_file_or_env() {
        let cfg = AppConfig::load_with(&env_of(&[]), &Overrides::default()).expect("config");

        assert_eq!(cfg.server_url, "http://127.0.0.1:8000");
        assert_eq!(cfg.api_base, "/api");
        assert_eq!(cfg.output_path, PathBuf::from("facematch.html"));
        assert_eq!(cfg.timeout, Duration::from_secs(30));
        assert_eq!(cfg.upload_pause, Duration::from_millis(500));

        let view = cfg.view_settings().expect("view");
        assert_eq!(view.default_top_k.get(), 5);
        assert_eq!(view.faces_page, PageRequest::new(0, 100));
        assert_eq!(view.history_page, PageRequest::new(0, 50));
        assert_eq!(view.dates, DateStyle::Vietnamese);
    }

    #[test]
    fn file_then_env_then_flags() {
        let dir = TempDir::new().expect("tempdir");
        let path = dir.path().join("facematch.toml");
        std::fs::write(
            &path,
            r#"
output_path = "from-file.html"

[server]
url = "http://file:9000"
timeout_secs = 10

[view]
default_top_k = 3
date_locale = "en-US"

[upload]
pause_ms = 0
"#,
        )
        .expect("write");
        let path = path.to_string_lossy().to_string();

        let env = env_of(&[
            ("FACEMATCH_CONFIG", path.as_str()),
            ("FACEMATCH_SERVER", "http://env:9001"),
            ("FACEMATCH_TIMEOUT_SECS", "12"),
        ]);
        let cfg = AppConfig::load_with(
            &env,
            &Overrides {
                server: None,
                out: Some(PathBuf::from("flag.html")),
            },
        )
        .expect("config");

        assert_eq!(cfg.server_url, "http://env:9001");
        assert_eq!(cfg.timeout, Duration::from_secs(12));
        assert_eq!(cfg.output_path, PathBuf::from("flag.html"));
        assert_eq!(cfg.default_top_k, 3);
        assert!(cfg.upload_pause.is_zero());
        assert_eq!(cfg.view_settings().expect("view").dates, DateStyle::UsEnglish);

        let cfg = AppConfig::load_with(
            &env,
            &Overrides {
                server: Some("https://flag".to_string()),
                out: None,
            },
        )
        .expect("config");
        assert_eq!(cfg.server_url, "https://flag");
        assert_eq!(cfg.output_path, PathBuf::from("from-file.html"));
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(AppConfig::load_with(
            &env_of(&[("FACEMATCH_TIMEOUT_SECS", "soon")]),
            &Overrides::default()
        )
        .is_err());
        assert!(AppConfig::load_with(
            &env_of(&[("FACEMATCH_TIMEOUT_SECS", "0")]),
            &Overrides::default()
        )
        .is_err());
        assert!(AppConfig::load_with(
            &env_of(&[]),
            &Overrides {
                server: Some("ftp://host".to_string()),
                out: None,
            }
        )
        .is_err());
        assert!(AppConfig::load_with(
            &env_of(&[("FACEMATCH_CONFIG", "/definitely/not/here.toml")]),
            &Overrides::default()
        )
        .is_err());
    }
}
