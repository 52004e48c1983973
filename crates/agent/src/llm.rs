use async_trait::async_trait;
use descarte_core::errors::GuidanceError;
use descarte_core::schema::ResponseSchema;

/// One structured completion: the prompt goes out as the sole user message,
/// the raw reply text comes back unvalidated.
#[async_trait]
pub trait LlmClient: Send + Sync {
    async fn complete_structured(
        &self,
        prompt: &str,
        schema: &ResponseSchema,
    ) -> Result<String, GuidanceError>;

    fn model_name(&self) -> &str;
}
