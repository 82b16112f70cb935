use reqwest::StatusCode;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("authentication failed: {reason}")]
    Authentication {
        status: Option<StatusCode>,
        reason: String,
    },

    #[error("request to {endpoint} failed")]
    Transport {
        endpoint: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("{endpoint} responded with {status}: {body}")]
    Api {
        endpoint: String,
        status: StatusCode,
        body: String,
    },

    #[error("unexpected response from {endpoint}")]
    Decoding {
        endpoint: String,
        body: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("invalid command name {0:?}")]
    InvalidCommand(String),

    #[error("could not build http client")]
    HttpClient(#[source] reqwest::Error),
}

impl Error {
    /// Status code reported by the server, if the request got that far.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Error::Authentication { status, .. } => *status,
            Error::Api { status, .. } => Some(*status),
            Error::Transport { source, .. } => source.status(),
            _ => None,
        }
    }
}
