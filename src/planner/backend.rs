use async_trait::async_trait;
use model_gateway_rs::{
    clients::llm::LlmClient,
    model::llm::{LlmInput, LlmOutput},
    sdk::{ModelSDK, openai::OpenAiSdk},
    traits::ModelClient,
};

use crate::{
    config::LlmConfig,
    error::{Error, Result},
};

/// Chat completion seam: takes the prepared messages, returns the reply
/// content text. Kept narrow so tests can script replies and failures.
#[async_trait]
pub trait LlmBackend: Send + Sync {
    async fn complete(&self, input: LlmInput) -> Result<String>;
}

/// Production backend over the model gateway's OpenAI-style client.
pub struct GatewayBackend<T>
where
    T: ModelSDK<Input = LlmInput, Output = LlmOutput> + Sync + Send,
{
    llm_client: LlmClient<T>,
}

impl GatewayBackend<OpenAiSdk> {
    pub fn new(config: &LlmConfig) -> Result<Self> {
        let client = OpenAiSdk::new(
            config.api_key.as_str(),
            config.base_url.as_str(),
            config.model.as_str(),
        )?;
        Ok(Self {
            llm_client: LlmClient::new(client),
        })
    }
}

#[async_trait]
impl<T> LlmBackend for GatewayBackend<T>
where
    T: ModelSDK<Input = LlmInput, Output = LlmOutput> + Sync + Send,
{
    async fn complete(&self, input: LlmInput) -> Result<String> {
        let output = self.llm_client.infer(input).await?;
        let content = output.get_message().ok_or(Error::EmptyModelReply)?;
        Ok(content.content.to_string())
    }
}
