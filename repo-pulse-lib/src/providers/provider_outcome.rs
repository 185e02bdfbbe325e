use std::sync::Arc;

/// The result of a single provider call, isolated from its siblings.
#[derive(Debug, Clone)]
pub enum ProviderOutcome<T> {
    /// The call completed. `None` means the provider answered with a non-success status.
    Fulfilled(Option<T>),

    /// The call failed at the transport level.
    Failed(Arc<ohno::AppError>),
}

impl<T> ProviderOutcome<T> {
    /// Returns `true` if the call completed, whether or not data came back.
    #[must_use]
    pub const fn is_fulfilled(&self) -> bool {
        matches!(self, Self::Fulfilled(_))
    }

    /// Returns a reference to the contained data if the call produced any.
    #[must_use]
    pub const fn value(&self) -> Option<&T> {
        match self {
            Self::Fulfilled(Some(data)) => Some(data),
            _ => None,
        }
    }

    /// Consumes the outcome, returning the data if the call produced any.
    #[must_use]
    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Fulfilled(data) => data,
            Self::Failed(_) => None,
        }
    }
}

impl<T> From<crate::Result<Option<T>>> for ProviderOutcome<T> {
    fn from(result: crate::Result<Option<T>>) -> Self {
        match result {
            Ok(data) => Self::Fulfilled(data),
            Err(e) => Self::Failed(Arc::new(e)),
        }
    }
}
