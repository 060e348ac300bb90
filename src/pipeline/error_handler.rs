use std::sync::{Arc, Mutex, PoisonError};

/// Take the traversal error recorded by the walk, if any. Call after joining walk and workers.
pub fn take_traversal_error(
    first_error: &Arc<Mutex<Option<anyhow::Error>>>,
) -> Option<anyhow::Error> {
    first_error
        .lock()
        .unwrap_or_else(PoisonError::into_inner)
        .take()
}
