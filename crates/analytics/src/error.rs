use pingboard_core::error::CoreError;

use crate::store::StoreError;

/// Failure of an analytics operation.
///
/// Domain errors (an unknown category) come through as [`CoreError`]; store
/// failures pass through unchanged. Nothing here is retried.
#[derive(Debug, thiserror::Error)]
pub enum AnalyticsError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Store(#[from] StoreError),
}
