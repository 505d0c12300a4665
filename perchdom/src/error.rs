use thiserror::Error;

use crate::platform::ElementId;

/// Errors reported by a [`Platform`](crate::Platform) implementation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlatformError {
    /// The element was never created or has already been removed.
    #[error("element {0} does not exist")]
    UnknownElement(ElementId),

    /// The element exists but is not part of the rendered document.
    #[error("element {0} is not attached to the document")]
    Detached(ElementId),
}
