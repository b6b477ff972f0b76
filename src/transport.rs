//! HTTP transport abstraction
//!
//! The client only needs "GET this URL, give me the body". Keeping that behind
//! a trait lets tests swap in a canned transport.

use crate::{
    constants::USER_AGENT,
    error::{ClientError, Result},
};
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Trait for HTTP transports
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issues a GET for `url` and returns the response body text
    ///
    /// Non-success statuses are reported as [`ClientError::Http`].
    async fn get(&self, url: &str) -> Result<String>;
}

/// Transport backed by `reqwest`
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a transport with the given request timeout
    pub fn new(timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
            .map_err(ClientError::Network)?;

        Ok(Self { client })
    }

    /// Wraps an already configured `reqwest::Client`
    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, url: &str) -> Result<String> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(ClientError::Network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::Http {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }

        response.text().await.map_err(ClientError::Network)
    }
}
