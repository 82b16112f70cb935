use reqwest::{
    blocking::{Client, RequestBuilder},
    header::{ACCEPT, CONTENT_TYPE},
    Method, Url,
};
use serde::de::DeserializeOwned;

use super::{
    auth::{Token, TokenRequest},
    config::Config,
};
use crate::result::{Error, Result};

const JSON: &str = "application/json";

/// Builds and executes requests against the configured owner API.
#[derive(Clone)]
pub struct Request {
    api_url: Url,
    auth_url: Url,
    client: Client,
}

impl Request {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(Error::HttpClient)?;

        Ok(Self {
            api_url: config.api_url().clone(),
            auth_url: config.auth_url().clone(),
            client,
        })
    }

    pub fn token(&self, body: &TokenRequest) -> RequestBuilder {
        let builder = self.client.post(url(&self.auth_url, "/oauth/token"));
        json_headers(builder).json(body)
    }

    pub fn authorized(&self, method: Method, path: &str, token: &Token) -> RequestBuilder {
        let builder = self
            .client
            .request(method, url(&self.api_url, path))
            .bearer_auth(&token.access_token);
        json_headers(builder)
    }

    /// Executes `builder` and decodes a 2xx body as `T`.
    pub fn send<T: DeserializeOwned>(&self, endpoint: &str, builder: RequestBuilder) -> Result<T> {
        log::debug!("Requesting {endpoint}...");
        let response = builder.send().map_err(|source| Error::Transport {
            endpoint: endpoint.to_owned(),
            source,
        })?;

        let status = response.status();
        let body = response.text().map_err(|source| Error::Transport {
            endpoint: endpoint.to_owned(),
            source,
        })?;
        log::debug!("{endpoint} responded with {status}");

        if !status.is_success() {
            log::warn!("{endpoint} failed with {status}");
            return Err(Error::Api {
                endpoint: endpoint.to_owned(),
                status,
                body,
            });
        }

        serde_json::from_str(&body).map_err(|source| Error::Decoding {
            endpoint: endpoint.to_owned(),
            body,
            source,
        })
    }
}

fn json_headers(builder: RequestBuilder) -> RequestBuilder {
    builder.header(ACCEPT, JSON).header(CONTENT_TYPE, JSON)
}

// appends to the base path instead of replacing it like `Url::join` would
fn url(base: &Url, path: &str) -> Url {
    let mut url = base.clone();
    if let Ok(mut segments) = url.path_segments_mut() {
        segments
            .pop_if_empty()
            .extend(path.split('/').filter(|segment| !segment.is_empty()));
    }

    url
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::owner_api::auth::Auth;
    use reqwest::header::AUTHORIZATION;

    fn token(access_token: &str) -> Token {
        serde_json::from_value(serde_json::json!({ "access_token": access_token })).unwrap()
    }

    #[test]
    fn should_set_the_http_headers() {
        // given
        let request = Request::new(&Config::default()).unwrap();

        // when
        let built = request
            .authorized(Method::GET, "/vehicles", &token("ghi789"))
            .build()
            .unwrap();

        // then
        let headers = built.headers();
        assert_eq!(headers[AUTHORIZATION], "Bearer ghi789");
        assert_eq!(headers[ACCEPT], JSON);
        assert_eq!(headers[CONTENT_TYPE], JSON);
    }

    #[test]
    fn should_keep_base_path() {
        // given
        let base: Url = "https://owner-api.teslamotors.com/api/1".parse().unwrap();

        // expect
        assert_eq!(
            url(&base, "/vehicles/1234/data_request/charge_state").as_str(),
            "https://owner-api.teslamotors.com/api/1/vehicles/1234/data_request/charge_state"
        );
    }

    #[test]
    fn should_tolerate_trailing_slash() {
        let base: Url = "http://127.0.0.1:8080/api/1/".parse().unwrap();

        assert_eq!(url(&base, "/vehicles").as_str(), "http://127.0.0.1:8080/api/1/vehicles");
    }

    #[test]
    fn should_not_authorize_token_request() {
        // given
        let config = Config::default();
        let auth = Auth::default();
        let request = Request::new(&config).unwrap();
        let body = TokenRequest::new(&auth, &config);

        // when
        let built = request.token(&body).build().unwrap();

        // then
        assert_eq!(built.url().as_str(), "https://owner-api.teslamotors.com/oauth/token");
        assert_eq!(built.method(), &Method::POST);
        assert!(!built.headers().contains_key(AUTHORIZATION));
        assert_eq!(built.headers()[ACCEPT], JSON);
        assert_eq!(built.headers()[CONTENT_TYPE], JSON);
    }
}
