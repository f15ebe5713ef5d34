use thiserror::Error;

pub type SourceResult<T> = Result<T, SourceError>;

/// Text carried by a 404 download failure when no status is available.
const NOT_FOUND_MARKER: &str = "HTTP error 404";

#[derive(Error, Debug)]
pub enum SourceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The transport could not fetch a URL.
    ///
    /// `status` is set whenever the server answered; it is `None` for
    /// connection-level failures.
    #[error("Error downloading {url}: {}", render_download(.status, .message))]
    Download {
        url: String,
        status: Option<u16>,
        message: String,
    },

    /// A response was fetched but did not have the expected shape.
    #[error("Client error: {0}")]
    Client(String),

    #[error("Path error: {0}")]
    Path(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Version error: {0}")]
    Version(String),
}

fn render_download(status: &Option<u16>, message: &str) -> String {
    match *status {
        Some(code) if message.is_empty() => format!("HTTP error {}", code),
        Some(code) => format!("HTTP error {} - {}", code, message),
        None => message.to_string(),
    }
}

impl SourceError {
    /// Shorthand for a transport failure carrying an HTTP status.
    pub fn http_status(url: impl Into<String>, status: u16, message: impl Into<String>) -> Self {
        SourceError::Download {
            url: url.into(),
            status: Some(status),
            message: message.into(),
        }
    }

    /// HTTP status code of a transport failure, if one is known.
    pub fn status(&self) -> Option<u16> {
        match self {
            SourceError::Download { status, .. } => *status,
            SourceError::Http(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Whether this failure means the requested resource does not exist.
    ///
    /// The structured status is authoritative. Transports that only report
    /// text are still recognised by the `HTTP error 404` marker in the
    /// rendered message.
    pub fn is_not_found(&self) -> bool {
        match self.status() {
            Some(code) => code == 404,
            None => match self {
                SourceError::Download { .. } | SourceError::Http(_) => {
                    self.to_string().contains(NOT_FOUND_MARKER)
                }
                _ => false,
            },
        }
    }
}
