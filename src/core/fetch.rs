use std::future::Future;
use std::path::PathBuf;
use crate::core::error::{Error, ErrorKind, Result};

/// Source of the serialized index. The worker calls it once per `init`.
pub trait IndexFetcher: Send + Sync + 'static {
    fn fetch(&self, source: &str) -> impl Future<Output = Result<String>> + Send;
}

/// Reads the payload from the local filesystem. Accepts plain paths and
/// `file://` URLs, relative paths resolve against `base_dir` when set.
#[derive(Debug, Clone, Default)]
pub struct FileFetcher {
    pub base_dir: Option<PathBuf>,
}

impl FileFetcher {
    pub fn new() -> Self {
        FileFetcher::default()
    }

    pub fn with_base_dir(base_dir: impl Into<PathBuf>) -> Self {
        FileFetcher { base_dir: Some(base_dir.into()) }
    }

    pub fn resolve(&self, source: &str) -> PathBuf {
        let path = PathBuf::from(source.strip_prefix("file://").unwrap_or(source));
        match &self.base_dir {
            Some(base) if path.is_relative() => base.join(path),
            _ => path,
        }
    }
}

impl IndexFetcher for FileFetcher {
    async fn fetch(&self, source: &str) -> Result<String> {
        let path = self.resolve(source);
        tokio::fs::read_to_string(&path).await.map_err(|e| {
            Error::new(ErrorKind::Io, format!("reading index from {}: {}", path.display(), e))
        })
    }
}

/// Fetches the payload over HTTP(S). Relative sources resolve against
/// `base_url`, the way a page resolves `data/index.json` against its origin.
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: Option<reqwest::Url>,
}

#[cfg(feature = "http")]
impl HttpFetcher {
    pub fn new() -> Self {
        HttpFetcher::default()
    }

    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let base_url = reqwest::Url::parse(base_url).map_err(|e| {
            Error::new(ErrorKind::InvalidInput, format!("base url '{}': {}", base_url, e))
        })?;
        Ok(HttpFetcher { client: reqwest::Client::new(), base_url: Some(base_url) })
    }

    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    pub fn resolve(&self, source: &str) -> Result<reqwest::Url> {
        let url = match &self.base_url {
            Some(base) => base.join(source),
            None => reqwest::Url::parse(source),
        };
        url.map_err(|e| Error::new(ErrorKind::InvalidInput, format!("index url '{}': {}", source, e)))
    }
}

#[cfg(feature = "http")]
impl IndexFetcher for HttpFetcher {
    async fn fetch(&self, source: &str) -> Result<String> {
        let url = self.resolve(source)?;
        let response = self.client.get(url.clone()).send().await.map_err(|e| {
            Error::new(ErrorKind::Io, format!("requesting index from {}: {}", url, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::new(ErrorKind::Io, format!("index at {} answered {}", url, status)));
        }

        response.text().await.map_err(|e| {
            Error::new(ErrorKind::Io, format!("reading index body from {}: {}", url, e))
        })
    }
}
