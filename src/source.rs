use futures::future::BoxFuture;

use crate::history::{HandHistory, HistoryError};

/// Fetching a hand failed. The only failure surfaced to the end user: it is
/// shown once as an error state and the request control re-arms, with no
/// automatic retry.
#[derive(Debug, thiserror::Error)]
pub enum AcquisitionError {
    #[error("hand data could not be loaded: {0}")]
    Unavailable(String),
    #[error("hand history is malformed: {0}")]
    Malformed(#[from] HistoryError),
}

/// The data-source capability the engine needs: fetch one hand history,
/// async, may fail. Boxed futures keep the seam object-safe.
pub trait HandSource {
    fn fetch_hand(&mut self) -> BoxFuture<'_, Result<HandHistory, AcquisitionError>>;
}
