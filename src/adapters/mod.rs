//! Name source adapters and interaction implementations.

pub mod auto_interaction;
pub mod local;
pub mod mock;
pub mod registry;
pub mod web;

pub use auto_interaction::AutoInteraction;
pub use mock::{CallLog, MockNameSource};
pub use registry::SourceRegistry;

/// Trimmed value, or `None` when blank.
pub(crate) fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Blank strings carry no information; treat them as absent.
pub(crate) fn non_empty(value: Option<String>) -> Option<String> {
    value.as_deref().and_then(non_blank)
}
