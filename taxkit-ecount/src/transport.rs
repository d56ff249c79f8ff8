//! HTTP seam for the Ecount client.

use anyhow::{Context, Result};
use serde_json::Value;

/// Status line and body of one HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpReply {
    pub status: u16,
    pub reason: String,
    pub body: String,
}

impl HttpReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// POSTs a JSON body. Implemented over reqwest in production and by scripted
/// fakes in tests.
#[allow(async_fn_in_trait)]
pub trait Transport {
    async fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<HttpReply>;
}

#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Transport for ReqwestTransport {
    async fn post_json(&self, url: &str, headers: &[(&str, &str)], body: &Value) -> Result<HttpReply> {
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let resp = request.send().await.context("ecount request")?;
        let status = resp.status();
        let body = resp.text().await.context("read ecount response")?;

        Ok(HttpReply {
            status: status.as_u16(),
            reason: status.canonical_reason().unwrap_or_default().to_string(),
            body,
        })
    }
}
