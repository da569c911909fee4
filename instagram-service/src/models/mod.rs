//! Domain models for the Instagram identity service.

pub mod completion;
pub mod identity;

pub use completion::{CompletionResult, FallbackResult, PARSE_FAILURE_MARKER};
pub use identity::{FieldPresence, IdentityRequest, IdentitySuggestion, REQUIRED_FIELDS};
