use html::Id;
use thiserror::Error;

/// Contract violations between host markup and the widget. None of these are recoverable at
/// runtime: they mean the host produced markup the widget cannot honor.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ViewerError {
    #[error("toggle element {node} is missing its `{attribute}` attribute")]
    MissingToggleData { node: Id, attribute: &'static str },

    #[error("toggle target {node} is not an element")]
    NotAnElement { node: Id },

    #[error("content container is missing from the rendered tree")]
    ContainerMissing,
}

pub type ViewerResult<T> = Result<T, ViewerError>;
