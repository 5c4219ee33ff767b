use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use reqwest::blocking::Client;
use reqwest::header::USER_AGENT;
use thiserror::Error;
use tracing::{debug, info};

use crate::dom::Document;

pub const DEFAULT_SOURCE_URL: &str =
    "https://en.wikipedia.org/w/rest.php/v1/page/List_of_HTTP_status_codes/html";
pub const DEFAULT_USER_AGENT: &str = concat!("hst/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Error)]
pub enum SourceFetchError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("bad status {status} from {url}")]
    Status { url: String, status: u16 },
    #[error("failed to read response body from {url}")]
    Body {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("failed to read {}", .path.display())]
    File {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where the status code page comes from.
pub trait DocumentSource {
    fn fetch(&self) -> Result<Document, SourceFetchError>;

    fn describe(&self) -> String;
}

#[derive(Debug, Clone)]
pub struct HttpSourceConfig {
    pub url: String,
    pub user_agent: String,
    pub timeout_ms: u64,
}

impl Default for HttpSourceConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_SOURCE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            timeout_ms: 10_000,
        }
    }
}

pub struct HttpSource {
    client: Client,
    config: HttpSourceConfig,
}

impl HttpSource {
    pub fn new(config: HttpSourceConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .context("failed to build HTTP client")?;

        Ok(Self { client, config })
    }
}

impl DocumentSource for HttpSource {
    fn fetch(&self) -> Result<Document, SourceFetchError> {
        let url = &self.config.url;
        debug!(url = %url, timeout_ms = self.config.timeout_ms, "requesting source page");

        let response = self
            .client
            .get(url)
            .header(USER_AGENT, &self.config.user_agent)
            .send()
            .map_err(|source| SourceFetchError::Transport {
                url: url.clone(),
                source,
            })?;

        let status = response.status();
        if status.as_u16() >= 400 {
            return Err(SourceFetchError::Status {
                url: url.clone(),
                status: status.as_u16(),
            });
        }

        let body = response.text().map_err(|source| SourceFetchError::Body {
            url: url.clone(),
            source,
        })?;

        info!(url = %url, bytes = body.len(), "fetched source page");
        Ok(Document::parse_html(&body))
    }

    fn describe(&self) -> String {
        self.config.url.clone()
    }
}

pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl DocumentSource for FileSource {
    fn fetch(&self) -> Result<Document, SourceFetchError> {
        let markup = fs::read_to_string(&self.path).map_err(|source| SourceFetchError::File {
            path: self.path.clone(),
            source,
        })?;

        info!(path = %self.path.display(), bytes = markup.len(), "read source page");
        Ok(Document::parse_html(&markup))
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
