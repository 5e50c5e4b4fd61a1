use async_trait::async_trait;
use serde_json::{Value, json};
use tokio::sync::RwLock;
use tracing::{info, warn};

use crate::{
    error::Result,
    session::{BrowserSession, SessionFactory},
};

/// Stand-in backend used when no automation service is configured. Every
/// action succeeds with a deterministic placeholder result, so the
/// orchestration control flow can be exercised offline.
#[derive(Debug, Default)]
pub struct MockFactory;

#[async_trait]
impl SessionFactory for MockFactory {
    async fn open(&self, starting_url: Option<&str>) -> Result<Box<dyn BrowserSession>> {
        warn!("no automation backend configured, running in mock mode");
        Ok(Box::new(MockSession::new(starting_url)))
    }
}

#[derive(Debug)]
pub struct MockSession {
    current_url: RwLock<Option<String>>,
}

impl MockSession {
    pub fn new(starting_url: Option<&str>) -> Self {
        Self {
            current_url: RwLock::new(starting_url.map(|u| u.to_string())),
        }
    }

    pub async fn current_url(&self) -> Option<String> {
        self.current_url.read().await.clone()
    }
}

#[async_trait]
impl BrowserSession for MockSession {
    async fn act(&self, task: &str) -> Result<Value> {
        info!("mock executing: {task}");
        Ok(json!({ "status": "mock", "task": task }))
    }

    async fn act_get(&self, _task: &str) -> Result<Value> {
        Ok(json!({ "data": [], "status": "mock" }))
    }

    async fn screenshot(&self) -> Result<Vec<u8>> {
        Ok(Vec::new())
    }

    async fn navigate(&self, url: &str) -> Result<()> {
        *self.current_url.write().await = Some(url.to_string());
        Ok(())
    }

    async fn stop(&self) -> Result<()> {
        Ok(())
    }

    fn supports_extraction(&self) -> bool {
        true
    }
}
