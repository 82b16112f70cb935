use std::time::Duration;

use url::Url;

use crate::result::{Error, Result};

pub const DEFAULT_API_URL: &str = "https://owner-api.teslamotors.com/api/1";
pub const DEFAULT_AUTH_URL: &str = "https://owner-api.teslamotors.com";
pub const DEFAULT_STREAMING_URL: &str = "https://streaming.vn.teslamotors.com";

/// Where the client talks to and how long it waits.
///
/// `api_url` is the base for every vehicle endpoint and `auth_url` the base
/// for `/oauth/token`. `streaming_url` is never requested; it is only echoed
/// to the token endpoint.
#[derive(Debug, Clone)]
pub struct Config {
    api_url: Url,
    auth_url: Url,
    streaming_url: String,
    timeout: Option<Duration>,
}

impl Config {
    pub fn new(api_url: &str, auth_url: &str, streaming_url: &str) -> Result<Self> {
        Ok(Config {
            api_url: parse_base(api_url)?,
            auth_url: parse_base(auth_url)?,
            streaming_url: streaming_url.to_owned(),
            timeout: None,
        })
    }

    /// Serves both the API (under `/api/1`) and the token endpoint from
    /// `host`, the way the owner API itself is laid out.
    pub fn with_host(host: &str) -> Result<Self> {
        let host = host.trim_end_matches('/');
        Self::new(&format!("{host}/api/1"), host, DEFAULT_STREAMING_URL)
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_streaming_url(mut self, streaming_url: &str) -> Self {
        self.streaming_url = streaming_url.to_owned();
        self
    }

    pub fn api_url(&self) -> &Url {
        &self.api_url
    }

    pub fn auth_url(&self) -> &Url {
        &self.auth_url
    }

    pub fn streaming_url(&self) -> &str {
        &self.streaming_url
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_API_URL, DEFAULT_AUTH_URL, DEFAULT_STREAMING_URL)
            .expect("default owner API urls are valid")
    }
}

fn parse_base(raw: &str) -> Result<Url> {
    let invalid = |reason: String| Error::InvalidUrl {
        url: raw.to_owned(),
        reason,
    };

    let url = Url::parse(raw).map_err(|err| invalid(err.to_string()))?;
    if url.cannot_be_a_base() {
        return Err(invalid("cannot carry a path".to_owned()));
    }

    Ok(url)
}
