use thiserror::Error;

/// Failure taxonomy surfaced by [`ClearanceCoordinator::get`].
///
/// [`ClearanceCoordinator::get`]: crate::coordinator::ClearanceCoordinator::get
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum AcquisitionError {
    /// No remote service is configured. Callers are expected to check
    /// `is_enabled()` up front and fall back to a static credential.
    #[error("clearance service is not configured")]
    Disabled,
    /// The waiter path exhausted its bounded polling window.
    #[error("timed out waiting for an in-flight clearance refresh")]
    Timeout,
    /// The remote call errored, returned non-success, or returned an
    /// unusable payload. Details are logged at the fetcher boundary.
    #[error("remote clearance acquisition failed")]
    FetchFailed,
}
