//! Error taxonomy for game operations.
//!
//! Every failure is transient. Callers recover locally and wait for the
//! next frame or timer firing.

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GameError {
    /// The tracking service has no current camera frame.
    #[error("tracking unavailable: no current camera frame")]
    TrackingUnavailable,
    /// The magazine is empty.
    #[error("out of ammo")]
    OutOfAmmo,
}
