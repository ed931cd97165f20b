//! Engine-level error type.

use warroom_core::DraftError;
use warroom_store::StoreError;

/// Anything a draft operation can fail with: a domain rejection or a
/// store failure that could not be translated into one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Draft(#[from] DraftError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl EngineError {
    /// Whether this is the benign lost-race outcome rather than a fault.
    pub fn is_stale_pick(&self) -> bool {
        matches!(self, Self::Draft(DraftError::PickNoLongerValid { .. }))
    }
}
