pub mod ambiguity;
pub mod config;
pub mod domain;
pub mod errors;
pub mod packaging;
pub mod prompt;
pub mod schema;
pub mod text;

pub use ambiguity::{AnswerClassifier, AnswerContext, AnswerVocabulary, TriStateAnswer};
pub use domain::guidance::{GuidanceRecord, GuidanceRequest};
pub use errors::GuidanceError;
pub use packaging::{PackagingTaxonomy, PackagingType, TypeInput, EXIT_SENTINEL};
pub use prompt::GuidanceRequestBuilder;
pub use schema::ResponseSchema;
pub use text::{normalize, normalize_answer};
