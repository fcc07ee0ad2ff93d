use std::time::Duration;

use crate::error::FetchError;
use crate::model::{self, User};

use super::UserSource;

pub const DEFAULT_ENDPOINT: &str = "https://jsonplaceholder.typicode.com/users";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the collection with a single blocking `GET`.
pub struct HttpUserSource {
    client: reqwest::blocking::Client,
    endpoint: String,
}

impl HttpUserSource {
    pub fn new(endpoint: impl Into<String>, connect_timeout: Duration) -> Result<Self, FetchError> {
        let client = reqwest::blocking::Client::builder()
            .connect_timeout(connect_timeout)
            .user_agent(concat!("user-roster/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(FetchError::Client)?;
        Ok(Self {
            client,
            endpoint: endpoint.into(),
        })
    }
}

impl UserSource for HttpUserSource {
    fn fetch_users(&self) -> Result<Vec<User>, FetchError> {
        let transport = |source: reqwest::Error| FetchError::Transport {
            url: self.endpoint.clone(),
            source,
        };
        tracing::debug!(url = %self.endpoint, "GET");
        let resp = self
            .client
            .get(&self.endpoint)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .map_err(transport)?;
        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: self.endpoint.clone(),
                status: status.as_u16(),
            });
        }
        let body = resp.bytes().map_err(transport)?;
        Ok(model::parse_users(&body)?)
    }

    fn label(&self) -> String {
        self.endpoint.clone()
    }
}
