use crate::app::ports::{HttpClientPort, HttpGetResult};
use crate::config::HttpConfig;
use crate::error::{Result, ScraperError};
use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

/// Builds the single client shared by every adapter in a run.
pub fn build_client(config: &HttpConfig) -> Result<Client> {
    Ok(Client::builder()
        .timeout(config.timeout())
        .user_agent(config.user_agent.clone())
        .gzip(true)
        .build()?)
}

pub struct ReqwestHttp {
    client: Client,
}

impl ReqwestHttp {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl HttpClientPort for ReqwestHttp {
    async fn get(&self, url: &str) -> Result<HttpGetResult> {
        debug!("GET {}", url);
        let resp = self.client.get(url).send().await?;
        let status = resp.status();
        if !status.is_success() {
            return Err(ScraperError::Api {
                status: status.as_u16(),
                message: format!("GET {} returned {}", url, status),
            });
        }

        let bytes = resp.bytes().await?.to_vec();
        Ok(HttpGetResult { bytes })
    }
}
