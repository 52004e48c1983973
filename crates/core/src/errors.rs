use thiserror::Error;

/// Failure of one guidance request. `Display` is the text shown to the user.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum GuidanceError {
    #[error("credencial do provedor LLM ausente (defina OPENAI_API_KEY)")]
    MissingCredential,
    #[error("falha de comunicação com o provedor: {0}")]
    Transport(String),
    #[error("o provedor respondeu com status {status}: {body}")]
    Provider { status: u16, body: String },
    #[error("o provedor retornou uma resposta vazia")]
    EmptyReply,
    #[error("resposta do modelo não é JSON válido: {0}")]
    MalformedReply(String),
    #[error("resposta do modelo viola o esquema no campo `{field}`: {reason}")]
    SchemaViolation { field: String, reason: String },
}

impl GuidanceError {
    pub fn schema(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::SchemaViolation { field: field.into(), reason: reason.into() }
    }

    /// Short machine-readable class for log fields.
    pub fn error_class(&self) -> &'static str {
        match self {
            Self::MissingCredential => "missing_credential",
            Self::Transport(_) => "transport",
            Self::Provider { .. } => "provider",
            Self::EmptyReply => "empty_reply",
            Self::MalformedReply(_) => "malformed_reply",
            Self::SchemaViolation { .. } => "schema_violation",
        }
    }

    /// The line printed by the interaction loop.
    pub fn user_line(&self) -> String {
        format!("Erro: Erro ao gerar orientação: {self}")
    }
}
