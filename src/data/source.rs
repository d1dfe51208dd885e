use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::error::LoadError;

// ---------------------------------------------------------------------------
// Source – where the spreadsheet (or logo) bytes come from
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Path(PathBuf),
    Url(url::Url),
}

impl Source {
    /// `http://` and `https://` locations are URLs; anything else is a path.
    pub fn parse(location: &str) -> Result<Self, LoadError> {
        let trimmed = location.trim();
        let lower = trimmed.to_ascii_lowercase();
        if lower.starts_with("http://") || lower.starts_with("https://") {
            let url = url::Url::parse(trimmed)
                .map_err(|e| LoadError::unavailable(trimmed, e))?;
            Ok(Source::Url(url))
        } else {
            Ok(Source::Path(PathBuf::from(trimmed)))
        }
    }

    /// Lower-cased extension of the path, or of the URL's last path segment.
    pub fn extension(&self) -> Option<String> {
        let name = match self {
            Source::Path(p) => p.file_name()?.to_str()?.to_string(),
            Source::Url(u) => u.path_segments()?.next_back()?.to_string(),
        };
        Path::new(&name)
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
    }

    /// Read the raw bytes. Every failure is [`LoadError::SourceUnavailable`].
    pub fn fetch(&self, timeout: Option<Duration>) -> Result<Vec<u8>, LoadError> {
        match self {
            Source::Path(path) => {
                std::fs::read(path).map_err(|e| LoadError::unavailable(self.to_string(), e))
            }
            Source::Url(url) => fetch_url(url, timeout),
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Path(p) => write!(f, "{}", p.display()),
            Source::Url(u) => write!(f, "{u}"),
        }
    }
}

fn fetch_url(url: &url::Url, timeout: Option<Duration>) -> Result<Vec<u8>, LoadError> {
    let location = url.to_string();
    let mut builder = reqwest::blocking::Client::builder();
    if let Some(timeout) = timeout {
        builder = builder.timeout(timeout);
    }
    let client = builder
        .build()
        .map_err(|e| LoadError::unavailable(&location, e))?;

    log::debug!("GET {location}");
    let response = client
        .get(url.clone())
        .send()
        .and_then(|r| r.error_for_status())
        .map_err(|e| LoadError::unavailable(&location, e))?;
    let body = response
        .bytes()
        .map_err(|e| LoadError::unavailable(&location, e))?;
    Ok(body.to_vec())
}

// ---------------------------------------------------------------------------
// Format – how to parse the bytes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    Workbook,
    Csv,
    Json,
    Parquet,
}

impl Format {
    /// Dispatch by extension. Unknown or missing extensions read as workbooks.
    pub fn detect(source: &Source) -> Self {
        match source.extension().as_deref() {
            Some("csv") => Format::Csv,
            Some("json") => Format::Json,
            Some("parquet") | Some("pq") => Format::Parquet,
            _ => Format::Workbook,
        }
    }
}
