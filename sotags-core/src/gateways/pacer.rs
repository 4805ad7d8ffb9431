use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Interrupted while waiting for the next request")]
pub struct Interrupted;

/// Paces consecutive requests to an external service.
pub trait RequestPacer {
    /// Blocks the current thread for the given delay.
    ///
    /// Returns early with an error if the pacer has been interrupted,
    /// either before or while waiting.
    fn pause(&self, delay: Duration) -> Result<(), Interrupted>;

    /// Aborts the current and all subsequent pauses.
    fn interrupt(&self);
}
