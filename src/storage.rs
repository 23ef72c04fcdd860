use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::error::{CatalogError, Result};

/// Where the catalog document comes from. Implementations only fetch text;
/// parsing and indexing happen in the catalog store.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Human-readable location used in logs and errors.
    fn location(&self) -> String;
    async fn fetch(&self) -> Result<String>;
}

/// Catalog document on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSource {
    path: PathBuf,
}

impl FileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self { Self { path: path.into() } }
}

#[async_trait]
impl CatalogSource for FileSource {
    fn location(&self) -> String { self.path.display().to_string() }

    async fn fetch(&self) -> Result<String> {
        tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| CatalogError::load(self.location(), e))
    }
}

/// Catalog document served over http(s).
#[derive(Debug, Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    url: Url,
}

impl HttpSource {
    pub fn new(url: Url, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent("kinolex/0.1")
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::load(url.as_str(), e))?;
        Ok(Self { client, url })
    }
}

#[async_trait]
impl CatalogSource for HttpSource {
    fn location(&self) -> String { self.url.to_string() }

    async fn fetch(&self) -> Result<String> {
        let resp = self.client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| CatalogError::load(self.location(), e))?;
        let resp = resp
            .error_for_status()
            .map_err(|e| CatalogError::load(self.location(), e))?;
        resp.text().await.map_err(|e| CatalogError::load(self.location(), e))
    }
}

/// An already-fetched document; handy for embedding and tests.
#[derive(Debug, Clone)]
pub struct StaticSource {
    name: String,
    body: String,
}

impl StaticSource {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self { name: name.into(), body: body.into() }
    }
}

#[async_trait]
impl CatalogSource for StaticSource {
    fn location(&self) -> String { self.name.clone() }
    async fn fetch(&self) -> Result<String> { Ok(self.body.clone()) }
}

/// Pick a source for a location string: `http(s)://` goes over the network,
/// `file://` and anything that is not a URL are treated as filesystem paths.
pub fn source_for(location: &str, timeout: Duration) -> Result<Box<dyn CatalogSource>> {
    match Url::parse(location) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => Ok(Box::new(HttpSource::new(url, timeout)?)),
        Ok(url) if url.scheme() == "file" => {
            let path = url
                .to_file_path()
                .map_err(|_| CatalogError::load(location, "file URL has no usable path"))?;
            Ok(Box::new(FileSource::new(path)))
        }
        // Windows drive letters parse as a one-letter scheme
        Ok(url) if url.scheme().len() > 1 => Err(CatalogError::load(
            location,
            format!("unsupported scheme `{}`", url.scheme()),
        )),
        _ => Ok(Box::new(FileSource::new(location))),
    }
}
