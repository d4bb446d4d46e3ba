use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};
use std::time::Duration;

use folio_logging::folio_debug;
use futures_util::StreamExt;
use reqwest::header::CONTENT_TYPE;
use url::Url;

use crate::{FailureKind, FetchError, FetchMetadata, FetchOutput};

#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub redirect_limit: usize,
    pub max_bytes: u64,
    pub allowed_content_types: Vec<String>,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            redirect_limit: 5,
            max_bytes: 2 * 1024 * 1024,
            allowed_content_types: vec![
                "application/json".to_string(),
                "text/json".to_string(),
                "text/plain".to_string(),
            ],
        }
    }
}

/// Where content documents are served from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ContentOrigin {
    /// Base URL the document names are joined onto.
    Remote(Url),
    /// Local directory holding the documents.
    Directory(PathBuf),
}

impl ContentOrigin {
    pub fn fetcher(&self, settings: FetchSettings) -> Arc<dyn ContentFetcher> {
        match self {
            ContentOrigin::Remote(base) => Arc::new(ReqwestFetcher::new(base.clone(), settings)),
            ContentOrigin::Directory(dir) => {
                Arc::new(DirectoryFetcher::new(dir.clone(), settings.max_bytes))
            }
        }
    }
}

/// Loads one named content document, e.g. `projects.json`.
#[async_trait::async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch(&self, document: &str) -> Result<FetchOutput, FetchError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    base: Url,
    settings: FetchSettings,
}

impl ReqwestFetcher {
    pub fn new(base: Url, settings: FetchSettings) -> Self {
        Self { base, settings }
    }

    fn build_client(
        &self,
        redirect_counter: Arc<AtomicUsize>,
    ) -> Result<reqwest::Client, FetchError> {
        let redirect_limit = self.settings.redirect_limit;
        let policy = reqwest::redirect::Policy::custom(move |attempt| {
            let count = attempt.previous().len();
            redirect_counter.store(count, Ordering::Relaxed);
            if count >= redirect_limit {
                attempt.error("redirect limit exceeded")
            } else {
                attempt.follow()
            }
        });

        reqwest::Client::builder()
            .connect_timeout(self.settings.connect_timeout)
            .timeout(self.settings.request_timeout)
            .redirect(policy)
            .build()
            .map_err(|err| FetchError::new(FailureKind::Network, err.to_string()))
    }

    fn is_content_type_allowed(&self, content_type: &str) -> bool {
        let ct = content_type.split(';').next().unwrap_or(content_type).trim();
        self.settings
            .allowed_content_types
            .iter()
            .any(|allowed| allowed.eq_ignore_ascii_case(ct))
    }

    fn too_large(&self, actual: u64) -> FetchError {
        FetchError::new(
            FailureKind::TooLarge {
                max_bytes: self.settings.max_bytes,
                actual: Some(actual),
            },
            "response too large",
        )
    }
}

#[async_trait::async_trait]
impl ContentFetcher for ReqwestFetcher {
    async fn fetch(&self, document: &str) -> Result<FetchOutput, FetchError> {
        let url = self
            .base
            .join(document)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let redirect_counter = Arc::new(AtomicUsize::new(0));
        let client = self.build_client(redirect_counter.clone())?;

        let response = client
            .get(url.clone())
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        if let Some(content_len) = response.content_length() {
            if content_len > self.settings.max_bytes {
                return Err(self.too_large(content_len));
            }
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());

        if let Some(ct) = content_type.as_deref() {
            if !self.is_content_type_allowed(ct) {
                return Err(FetchError::new(
                    FailureKind::UnsupportedContentType {
                        content_type: ct.to_string(),
                    },
                    "unsupported content type",
                ));
            }
        }

        let mut bytes = Vec::new();
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(map_reqwest_error)?;
            let next_len = bytes.len() as u64 + chunk.len() as u64;
            if next_len > self.settings.max_bytes {
                return Err(self.too_large(next_len));
            }
            bytes.extend_from_slice(&chunk);
        }

        folio_debug!(
            "fetched {} ({} bytes, {} redirects)",
            url,
            bytes.len(),
            redirect_counter.load(Ordering::Relaxed)
        );
        let metadata = FetchMetadata {
            origin: url.to_string(),
            content_type,
            byte_len: bytes.len() as u64,
        };
        Ok(FetchOutput { bytes, metadata })
    }
}

/// Reads documents from a directory, for offline builds.
#[derive(Debug, Clone)]
pub struct DirectoryFetcher {
    dir: PathBuf,
    max_bytes: u64,
}

impl DirectoryFetcher {
    pub fn new(dir: PathBuf, max_bytes: u64) -> Self {
        Self { dir, max_bytes }
    }
}

#[async_trait::async_trait]
impl ContentFetcher for DirectoryFetcher {
    async fn fetch(&self, document: &str) -> Result<FetchOutput, FetchError> {
        if document.contains(['/', '\\']) || document.starts_with('.') {
            return Err(FetchError::new(
                FailureKind::InvalidUrl,
                format!("{document:?} is not a plain file name"),
            ));
        }
        let path = self.dir.join(document);
        let meta = tokio::fs::metadata(&path).await.map_err(|err| {
            let kind = if err.kind() == std::io::ErrorKind::NotFound {
                FailureKind::NotFound
            } else {
                FailureKind::Io
            };
            FetchError::new(kind, format!("{}: {err}", path.display()))
        })?;
        if meta.len() > self.max_bytes {
            return Err(FetchError::new(
                FailureKind::TooLarge {
                    max_bytes: self.max_bytes,
                    actual: Some(meta.len()),
                },
                "file too large",
            ));
        }
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|err| FetchError::new(FailureKind::Io, format!("{}: {err}", path.display())))?;
        let metadata = FetchMetadata {
            origin: path.display().to_string(),
            content_type: None,
            byte_len: bytes.len() as u64,
        };
        Ok(FetchOutput { bytes, metadata })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        return FetchError::new(FailureKind::Timeout, err.to_string());
    }
    if err.is_redirect() {
        return FetchError::new(FailureKind::RedirectLimitExceeded, err.to_string());
    }
    FetchError::new(FailureKind::Network, err.to_string())
}
