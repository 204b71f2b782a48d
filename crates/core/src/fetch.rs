//! Retrieving and parsing the API description.
//!
//! The input is an `http(s)://` URL, a `file://` URL, or a filesystem path.
//! The body is parsed as JSON or YAML, picked from the file extension or the
//! response content type, falling back to sniffing the first character.

use std::path::{Path, PathBuf};
use std::time::Duration;

use tracing::{debug, info};
use url::Url;

use crate::error::GenerateError;
use crate::openapi::spec::ApiDescription;

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Where the description comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLocation {
    /// Fetched over HTTP(S).
    Remote(Url),
    /// Read from the local filesystem.
    Local(PathBuf),
}

impl InputLocation {
    /// Classify an input string.
    pub fn parse(input: &str) -> Result<Self, GenerateError> {
        let input = input.trim();
        if input.is_empty() {
            return Err(GenerateError::InvalidInput(input.to_string()));
        }

        match Url::parse(input) {
            Ok(url) => match url.scheme() {
                "http" | "https" => Ok(InputLocation::Remote(url)),
                "file" => url
                    .to_file_path()
                    .map(InputLocation::Local)
                    .map_err(|()| GenerateError::InvalidInput(input.to_string())),
                // Windows drive letters parse as a one-letter scheme
                scheme if scheme.len() == 1 => Ok(InputLocation::Local(PathBuf::from(input))),
                _ => Err(GenerateError::InvalidInput(input.to_string())),
            },
            Err(_) => Ok(InputLocation::Local(PathBuf::from(input))),
        }
    }
}

/// Serialization format of a description.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl Format {
    fn from_path(path: &Path) -> Option<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Some(Format::Json),
            Some("yaml" | "yml") => Some(Format::Yaml),
            _ => None,
        }
    }

    fn from_content_type(content_type: &str) -> Option<Self> {
        if content_type.contains("json") {
            Some(Format::Json)
        } else if content_type.contains("yaml") {
            Some(Format::Yaml)
        } else {
            None
        }
    }

    fn sniff(text: &str) -> Self {
        if text.trim_start().starts_with('{') {
            Format::Json
        } else {
            Format::Yaml
        }
    }
}

/// Parse a description in the given (or sniffed) format.
pub fn parse_description(text: &str, format: Option<Format>) -> Result<ApiDescription, GenerateError> {
    match format.unwrap_or_else(|| Format::sniff(text)) {
        Format::Json => Ok(ApiDescription::from_json(text)?),
        Format::Yaml => Ok(ApiDescription::from_yaml(text)?),
    }
}

/// Fetch and parse the description at `input`.
pub async fn fetch_description(input: &str) -> Result<ApiDescription, GenerateError> {
    let (text, format) = match InputLocation::parse(input)? {
        InputLocation::Remote(url) => fetch_remote(url).await?,
        InputLocation::Local(path) => read_local(&path).await?,
    };

    let doc = parse_description(&text, format)?;
    if let Some(info) = &doc.info {
        info!(
            title = info.title.as_deref().unwrap_or("-"),
            version = info.version.as_deref().unwrap_or("-"),
            "Loaded API description"
        );
    }
    debug!(
        paths = doc.paths.len(),
        schemas = doc.components.schemas.len(),
        "Parsed API description"
    );
    Ok(doc)
}

async fn fetch_remote(url: Url) -> Result<(String, Option<Format>), GenerateError> {
    let fetch_error = |source| GenerateError::Fetch {
        url: url.to_string(),
        source,
    };

    debug!(%url, "Fetching API description");
    let client = reqwest::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .map_err(fetch_error)?;
    let response = client.get(url.clone()).send().await.map_err(fetch_error)?;

    let status = response.status();
    if !status.is_success() {
        return Err(GenerateError::HttpStatus {
            url: url.to_string(),
            status: status.as_u16(),
        });
    }

    let format = response
        .headers()
        .get(reqwest::header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .and_then(Format::from_content_type)
        .or_else(|| Format::from_path(Path::new(url.path())));
    let text = response.text().await.map_err(fetch_error)?;
    Ok((text, format))
}

async fn read_local(path: &Path) -> Result<(String, Option<Format>), GenerateError> {
    debug!(path = %path.display(), "Reading API description");
    let text = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| GenerateError::io("failed to read", path, e))?;
    Ok((text, Format::from_path(path)))
}
