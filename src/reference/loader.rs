//! Fetch reference resources from disk or over HTTP, falling back to built-in tables.

use std::fmt;
use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

use super::mapping::{parse_mapping, ReferenceMapping};

/// Where a reference resource lives. Values starting with `http://` or
/// `https://` are URLs, anything else is a filesystem path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceSource {
    Path(PathBuf),
    Url(String),
}

impl ReferenceSource {
    pub fn parse(raw: &str) -> Self {
        let raw = raw.trim();
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::Path(PathBuf::from(raw))
        }
    }
}

impl fmt::Display for ReferenceSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Path(path) => write!(f, "{}", path.display()),
            Self::Url(url) => write!(f, "{url}"),
        }
    }
}

#[derive(Debug, Error)]
pub enum ReferenceError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("request to {url} returned status {status}")]
    Status { url: String, status: u16 },
}

/// How a mapping in the store was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MappingOrigin {
    Loaded { source: String },
    Fallback { reason: String },
    Provided,
}

impl MappingOrigin {
    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }
}

/// Fetch the raw text of a reference resource.
pub async fn fetch_text(source: &ReferenceSource) -> Result<String, ReferenceError> {
    match source {
        ReferenceSource::Path(path) => {
            tokio::fs::read_to_string(path)
                .await
                .map_err(|source| ReferenceError::Read {
                    path: path.clone(),
                    source,
                })
        }
        ReferenceSource::Url(url) => {
            let response = reqwest::get(url).await.map_err(|source| ReferenceError::Http {
                url: url.clone(),
                source,
            })?;
            let status = response.status();
            if !status.is_success() {
                return Err(ReferenceError::Status {
                    url: url.clone(),
                    status: status.as_u16(),
                });
            }
            response.text().await.map_err(|source| ReferenceError::Http {
                url: url.clone(),
                source,
            })
        }
    }
}

/// Load and parse a mapping. Any fetch failure is logged and replaced by
/// `fallback()`; a successfully fetched resource with no entries stays empty.
pub async fn load_mapping(
    source: &ReferenceSource,
    fallback: fn() -> ReferenceMapping,
) -> (ReferenceMapping, MappingOrigin) {
    match fetch_text(source).await {
        Ok(text) => {
            let mapping = parse_mapping(&text);
            tracing::info!(source = %source, entries = mapping.len(), "reference mapping loaded");
            (
                mapping,
                MappingOrigin::Loaded {
                    source: source.to_string(),
                },
            )
        }
        Err(err) => {
            tracing::warn!(source = %source, error = %err, "reference load failed, using built-in table");
            (
                fallback(),
                MappingOrigin::Fallback {
                    reason: err.to_string(),
                },
            )
        }
    }
}
