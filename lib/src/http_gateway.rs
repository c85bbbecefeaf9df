use std::time::Duration;

use crate::error::CapabilityError;
use reqwest::Client;
use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};

#[derive(Clone)]
pub struct HttpGateway {
    pub base_url: String,
    pub client: ClientWithMiddleware,
}

impl HttpGateway {
    pub fn new(
        base_url: &str,
        request_timeout_in_millis: u64,
    ) -> Result<Self, CapabilityError> {
        let client = ClientBuilder::new(
            Client::builder()
                .timeout(Duration::from_millis(request_timeout_in_millis))
                .build()
                .map_err(|error| CapabilityError::new(&error.to_string(), "Failed to create bridge http client"))?,
        )
        .build();

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        })
    }

    pub fn url(
        &self,
        path: &str,
    ) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}
