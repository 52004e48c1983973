//! Guidance agent - structured LLM requests for packaging disposal
//!
//! - `llm` declares the provider seam (`LlmClient`)
//! - `openai` implements it against the chat-completions API
//! - `guardrails` submits a prompt and validates the reply against the
//!   declared response schema
//!
//! The model only writes the guidance text. Packaging-type validation and
//! answer classification happen before any request is made.

pub mod guardrails;
pub mod llm;
pub mod openai;

pub use guardrails::GuidanceGuard;
pub use llm::LlmClient;
pub use openai::OpenAiClient;
