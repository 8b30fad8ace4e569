//! Catalog data provider: where the catalog comes from.
//!
//! A source is either a local JSON file or an HTTP(S) endpoint.  Endpoints
//! are queried with a single parameterless `POST`, the way the menu backend
//! expects.  The catalog is fetched once; there is no automatic retry.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

use super::catalog::Catalog;

/// Network fetches give up after this long.
const HTTP_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Error)]
pub enum FetchError {
    #[error("failed to read catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("catalog server answered {0}")]
    Status(reqwest::StatusCode),

    #[error("catalog response is not valid: {0}")]
    Decode(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    File(PathBuf),
    Http(String),
}

impl CatalogSource {
    /// Interpret a CLI argument: `http://` / `https://` prefixes mean an
    /// endpoint, anything else is a file path.
    pub fn parse(arg: &str) -> Self {
        let lower = arg.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            CatalogSource::Http(arg.to_owned())
        } else {
            CatalogSource::File(PathBuf::from(arg))
        }
    }

    /// Human-readable label for the title bar.
    pub fn label(&self) -> String {
        match self {
            CatalogSource::File(path) => path.display().to_string(),
            CatalogSource::Http(url) => url.clone(),
        }
    }

    pub async fn fetch(&self) -> Result<Catalog, FetchError> {
        let body = match self {
            CatalogSource::File(path) => tokio::fs::read_to_string(path)
                .await
                .map_err(|source| FetchError::Io {
                    path: path.clone(),
                    source,
                })?,
            CatalogSource::Http(url) => {
                let client = reqwest::Client::builder().timeout(HTTP_TIMEOUT).build()?;
                let response = client.post(url).send().await?;
                let status = response.status();
                if !status.is_success() {
                    return Err(FetchError::Status(status));
                }
                response.text().await?
            }
        };

        let catalog = Catalog::from_json(&body)?;
        tracing::debug!(
            source = %self.label(),
            categories = catalog.categories().len(),
            "catalog loaded"
        );
        Ok(catalog)
    }
}
