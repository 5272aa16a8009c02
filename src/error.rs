use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// One or more required inputs were absent or empty.
    #[error("missing required configuration: {}", .0.join(", "))]
    Configuration(Vec<String>),

    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("HTTP {status} from {url}")]
    Status { status: u16, url: String },

    #[error("login failed: {0}")]
    Authentication(String),

    /// The wiki rejected an edit; carries the server-supplied message.
    #[error("edit failed: {0}")]
    Api(String),

    #[error("unexpected response: {0}")]
    Response(String),

    #[error("failed to parse feed: {0}")]
    Feed(#[from] feed_rs::parser::ParseFeedError),

    #[error("invalid config file: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Network-class failures: transport errors and non-OK statuses.
    pub fn is_network(&self) -> bool {
        matches!(self, Error::Network(_) | Error::Status { .. })
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Response(err.to_string())
    }
}
