//! Site configuration, read from a RON file.
//!
//! Every field has a default so an empty or missing file yields a working
//! configuration that reads content from `./public`.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use folio_core::SiteSettings;
use folio_engine::{ContentOrigin, EngineConfig, FetchSettings};
use folio_logging::folio_info;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "folio.ron";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("cannot parse {path}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("invalid {field} {value:?}: {message}")]
    InvalidUrl {
        field: &'static str,
        value: String,
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub site_title: String,
    pub owner_name: String,
    pub contact_address: String,
    pub resume_href: String,
    /// Remote form relay; without one every message goes through `mailto:`.
    pub form_endpoint: Option<String>,
    /// Base URL serving `projects.json` and `achievements.json`.
    pub content_url: Option<String>,
    /// Directory holding the content documents, used when no URL is set.
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub viewport_height: f64,
    /// Animate scrolls; when false every scroll is an immediate jump.
    pub smooth_scroll: bool,
    /// Hand `mailto:` links to the desktop; when false they are only logged.
    pub launch_mail_client: bool,
    pub max_content_bytes: u64,
    pub request_timeout_secs: u64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        let settings = SiteSettings::default();
        Self {
            site_title: "Portfolio".to_string(),
            owner_name: "Portfolio Owner".to_string(),
            contact_address: settings.contact_address,
            resume_href: settings.resume_href,
            form_endpoint: None,
            content_url: None,
            content_dir: PathBuf::from("public"),
            output_dir: PathBuf::from("site"),
            viewport_height: 900.0,
            smooth_scroll: true,
            launch_mail_client: true,
            max_content_bytes: FetchSettings::default().max_bytes,
            request_timeout_secs: 30,
        }
    }
}

impl SiteConfig {
    /// Loads `path`, or `folio.ron` in the working directory when `path` is
    /// `None`. Only an explicitly named file must exist.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let (path, required) = match path {
            Some(path) => (path.to_path_buf(), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            }
            Err(source) => return Err(ConfigError::Read { path, source }),
        };
        let config = Self::parse(&text).map_err(|message| ConfigError::Parse {
            path: path.clone(),
            message,
        })?;
        folio_info!("loaded configuration from {:?}", path);
        Ok(config)
    }

    pub fn parse(text: &str) -> Result<Self, String> {
        ron::from_str(text).map_err(|err| err.to_string())
    }

    pub fn site_settings(&self) -> SiteSettings {
        SiteSettings {
            contact_address: self.contact_address.clone(),
            resume_href: self.resume_href.clone(),
        }
    }

    pub fn engine_config(&self) -> Result<EngineConfig, ConfigError> {
        let origin = match &self.content_url {
            Some(raw) => ContentOrigin::Remote(parse_url("content_url", &with_trailing_slash(raw))?),
            None => ContentOrigin::Directory(self.content_dir.clone()),
        };
        let form_endpoint = self
            .form_endpoint
            .as_deref()
            .map(|raw| parse_url("form_endpoint", raw))
            .transpose()?;
        let timeout = Duration::from_secs(self.request_timeout_secs.max(1));
        Ok(EngineConfig {
            origin,
            fetch: FetchSettings {
                request_timeout: timeout,
                max_bytes: self.max_content_bytes,
                ..FetchSettings::default()
            },
            form_endpoint,
            submit_timeout: timeout,
        })
    }
}

fn with_trailing_slash(raw: &str) -> String {
    if raw.ends_with('/') {
        raw.to_string()
    } else {
        format!("{raw}/")
    }
}

fn parse_url(field: &'static str, raw: &str) -> Result<Url, ConfigError> {
    Url::parse(raw).map_err(|err| ConfigError::InvalidUrl {
        field,
        value: raw.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(SiteConfig::parse("()").unwrap(), SiteConfig::default());
    }

    #[test]
    fn partial_file_overrides_named_fields() {
        let config = SiteConfig::parse(
            r#"(
                contact_address: "me@folio.dev",
                content_url: Some("https://folio.dev"),
                smooth_scroll: false,
            )"#,
        )
        .unwrap();
        assert_eq!(config.contact_address, "me@folio.dev");
        assert!(!config.smooth_scroll);
        assert_eq!(config.output_dir, PathBuf::from("site"));

        let engine = config.engine_config().unwrap();
        assert_eq!(
            engine.origin,
            ContentOrigin::Remote(Url::parse("https://folio.dev/").unwrap())
        );
        assert_eq!(engine.form_endpoint, None);
    }

    #[test]
    fn bad_endpoint_is_reported() {
        let config = SiteConfig {
            form_endpoint: Some("not a url".to_string()),
            ..SiteConfig::default()
        };
        assert!(matches!(
            config.engine_config(),
            Err(ConfigError::InvalidUrl {
                field: "form_endpoint",
                ..
            })
        ));
    }

    #[test]
    fn named_config_file_must_exist() {
        let temp = tempfile::TempDir::new().unwrap();
        let missing = temp.path().join("nope.ron");
        assert!(matches!(
            SiteConfig::load(Some(&missing)),
            Err(ConfigError::Read { .. })
        ));
    }
}
