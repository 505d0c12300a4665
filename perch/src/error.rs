use thiserror::Error;

/// Errors returned by select operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectError {
    /// The requested option index is outside the option list.
    #[error("no option at index {index} (select has {len} options)")]
    NoSuchOption { index: usize, len: usize },
}
