//! Fetch Transport
//!
//! `reqwest` on wasm32 goes through the browser's `fetch`, so session cookies ride along.

use ajax_controls::{ActionError, Transport};
use async_trait::async_trait;
use reqwest::{Client, Url};
use serde_json::Value;

/// POSTs JSON to endpoints resolved against the current page
pub struct FetchTransport {
    client: Client,
    base: Url,
}

impl FetchTransport {
    pub fn for_page() -> Result<Self, String> {
        let href = web_sys::window()
            .ok_or("no window")?
            .location()
            .href()
            .map_err(|e| format!("{e:?}"))?;
        let base = Url::parse(&href).map_err(|e| e.to_string())?;
        Ok(Self { client: Client::new(), base })
    }
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn post_json(&self, path: &str, headers: &[(&str, &str)], body: &Value) -> Result<String, ActionError> {
        let url = self.base.join(path).map_err(|e| ActionError::Transport(e.to_string()))?;
        let mut request = self.client.post(url).json(body);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }
        let response = request
            .send()
            .await
            .map_err(|e| ActionError::Transport(e.to_string()))?;
        tracing::debug!(status = %response.status(), "{path} answered");
        response.text().await.map_err(|e| ActionError::Transport(e.to_string()))
    }
}
