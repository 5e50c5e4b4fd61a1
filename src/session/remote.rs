use async_trait::async_trait;
use base64::{Engine as _, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};
use uuid::Uuid;

use crate::{
    error::{Error, Result},
    session::{BrowserSession, SessionFactory},
};

/// Opens sessions against a browser-automation agent service speaking JSON
/// over HTTP. The per-action timeout is forwarded to the service rather than
/// enforced here.
pub struct RemoteFactory {
    client: reqwest::Client,
    endpoint: String,
    headless: bool,
    timeout_secs: u64,
}

#[derive(Debug, Serialize)]
struct OpenSessionRequest<'a> {
    starting_page: &'a str,
    headless: bool,
    timeout_secs: u64,
    client_ref: String,
}

#[derive(Debug, Deserialize)]
struct OpenSessionResponse {
    session_id: String,
    #[serde(default)]
    capabilities: Vec<String>,
}

impl RemoteFactory {
    pub fn new(endpoint: &str, headless: bool, timeout_secs: u64) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            headless,
            timeout_secs,
        }
    }
}

#[async_trait]
impl SessionFactory for RemoteFactory {
    async fn open(&self, starting_url: Option<&str>) -> Result<Box<dyn BrowserSession>> {
        let client_ref = Uuid::new_v4().simple().to_string();
        let request = OpenSessionRequest {
            starting_page: starting_url.unwrap_or("about:blank"),
            headless: self.headless,
            timeout_secs: self.timeout_secs,
            client_ref: client_ref.clone(),
        };

        let response = self
            .client
            .post(format!("{}/api/sessions", self.endpoint))
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Session(format!(
                "session open failed ({status}): {body}"
            )));
        }

        let opened: OpenSessionResponse = response.json().await?;
        info!(
            session_id = %opened.session_id,
            client_ref = %client_ref,
            "remote session opened"
        );

        let supports_extraction = opened.capabilities.iter().any(|c| c == "extract");

        Ok(Box::new(RemoteSession {
            client: self.client.clone(),
            endpoint: self.endpoint.clone(),
            session_id: opened.session_id,
            supports_extraction,
        }))
    }
}

/// Handle to one live session on the automation service.
pub struct RemoteSession {
    client: reqwest::Client,
    endpoint: String,
    session_id: String,
    supports_extraction: bool,
}

#[derive(Debug, Deserialize)]
struct ScreenshotResponse {
    data: String,
}

impl RemoteSession {
    fn session_url(&self, verb: &str) -> String {
        format!("{}/api/sessions/{}/{verb}", self.endpoint, self.session_id)
    }

    async fn post_action(&self, verb: &str, body: Value) -> Result<Value> {
        debug!(session_id = %self.session_id, verb, "dispatching action");

        let response = self
            .client
            .post(self.session_url(verb))
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Action(format!("{verb} failed ({status}): {body}")));
        }

        Ok(response.json().await?)
    }
}

#[async_trait]
impl BrowserSession for RemoteSession {
    async fn act(&self, task: &str) -> Result<Value> {
        self.post_action("act", serde_json::json!({ "task": task }))
            .await
    }

    async fn act_get(&self, task: &str) -> Result<Value> {
        self.post_action("extract", serde_json::json!({ "task": task }))
            .await
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        let raw = self.post_action("screenshot", Value::Null).await?;
        let shot: ScreenshotResponse = serde_json::from_value(raw)?;
        STANDARD
            .decode(shot.data)
            .map_err(|e| Error::Action(format!("screenshot decode failed: {e}")))
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        self.post_action("navigate", serde_json::json!({ "url": url }))
            .await?;
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        let response = self
            .client
            .delete(format!("{}/api/sessions/{}", self.endpoint, self.session_id))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Session(format!(
                "session close failed ({status}): {body}"
            )));
        }

        debug!(session_id = %self.session_id, "remote session closed");
        Ok(())
    }

    fn supports_extraction(&self) -> bool {
        self.supports_extraction
    }
}
