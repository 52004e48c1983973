use descarte_core::domain::guidance::GuidanceRecord;
use descarte_core::errors::GuidanceError;
use descarte_core::schema::ResponseSchema;
use tracing::{info, warn};

use crate::llm::LlmClient;

/// Sends a guidance prompt and only lets a schema-valid record through.
///
/// One attempt per call. Every failure comes back as a [`GuidanceError`];
/// the caller decides how to show it.
pub struct GuidanceGuard<C> {
    client: C,
    schema: ResponseSchema,
}

impl<C> GuidanceGuard<C>
where
    C: LlmClient,
{
    pub fn new(client: C) -> Self {
        Self::with_schema(client, ResponseSchema::default())
    }

    pub fn with_schema(client: C, schema: ResponseSchema) -> Self {
        Self { client, schema }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn schema(&self) -> &ResponseSchema {
        &self.schema
    }

    pub async fn submit(&self, request_text: &str) -> Result<GuidanceRecord, GuidanceError> {
        info!(
            event_name = "agent.guidance.submitted",
            model = self.client.model_name(),
            prompt_len = request_text.len(),
            "guidance request submitted"
        );

        let outcome = match self.client.complete_structured(request_text, &self.schema).await {
            Ok(raw) => self.schema.validate(&raw),
            Err(error) => Err(error),
        };

        match &outcome {
            Ok(record) => info!(
                event_name = "agent.guidance.validated",
                packaging_type = %record.packaging_type,
                "guidance reply passed schema validation"
            ),
            Err(error) => warn!(
                event_name = "agent.guidance.failed",
                error_class = error.error_class(),
                error = %error,
                "guidance request failed"
            ),
        }

        outcome
    }
}
