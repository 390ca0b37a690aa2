#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Http(#[from] HttpError),

    #[error("{0}")]
    Request(#[from] reqwest::Error),

    #[error("JSON deserialization error: {0}")]
    JSON(#[from] JSONError),

    #[error("invalid base URL: {0}")]
    Url(#[from] url::ParseError),

    #[error("base URL cannot take path segments: {0}")]
    InvalidBaseUrl(String),

    #[error("API key is not a valid header value")]
    InvalidApiKey,

    #[error(transparent)]
    EnvVar(#[from] EnvVarError),
}

impl Error {
    /// Status code of an upstream failure, if this is one.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Http(e) => Some(e.status()),
            _ => None,
        }
    }
}

/// Non-success response from the API.
#[derive(thiserror::Error, Debug)]
#[error("HTTP {status} from {url}: {body}")]
pub struct HttpError {
    status: u16,
    url: String,
    body: String,
}

impl HttpError {
    pub fn new(status: u16, url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            status,
            url: url.into(),
            body: body.into(),
        }
    }

    pub fn status(&self) -> u16 {
        self.status
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> &str {
        &self.body
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{source} ({var})")]
pub struct EnvVarError {
    var: String,
    #[source]
    source: std::env::VarError,
}

impl EnvVarError {
    pub fn new(var: &str, source: std::env::VarError) -> Self {
        Self {
            var: var.into(),
            source,
        }
    }
}

#[derive(thiserror::Error, Debug)]
#[error("{source} ({url})")]
pub struct JSONError {
    url: String,
    #[source]
    source: serde_json::Error,
}

impl JSONError {
    pub fn new(url: impl Into<String>, source: serde_json::Error) -> Self {
        Self {
            url: url.into(),
            source,
        }
    }
}
