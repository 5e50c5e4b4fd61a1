pub mod mock;
pub mod remote;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

pub use mock::{MockFactory, MockSession};
pub use remote::{RemoteFactory, RemoteSession};

/// A scoped browser-automation context. One session drives one browser, and
/// `stop` must be called on every exit path once `open` has succeeded.
#[async_trait]
pub trait BrowserSession: Send + Sync {
    /// Execute a natural-language action against the live page.
    async fn act(&self, task: &str) -> Result<Value>;

    /// Structured extraction. Only meaningful when `supports_extraction`.
    async fn act_get(&self, task: &str) -> Result<Value>;

    async fn screenshot(&self) -> Result<Vec<u8>>;

    async fn navigate(&self, url: &str) -> Result<()>;

    async fn stop(&self) -> Result<()>;

    /// Capability flag resolved once when the session is opened.
    fn supports_extraction(&self) -> bool;
}

#[async_trait]
pub trait SessionFactory: Send + Sync {
    async fn open(&self, starting_url: Option<&str>) -> Result<Box<dyn BrowserSession>>;
}
