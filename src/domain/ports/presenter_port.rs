//! Port definition for showing loaded images.

use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::entities::DisplayUnit;

/// Errors raised while turning bytes into something on screen.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PresentError {
    /// The bytes are not a decodable image.
    #[error("Decode error: {0}")]
    DecodeError(String),
}

/// Receives raw image bytes for a unit.
///
/// The implementation decodes the bytes, fits them into the unit's rect,
/// resets the unit's placement and asks the unit's parent to re-layout.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait PresenterPort: Send + Sync {
    /// Shows `bytes` on `unit`.
    async fn present(&self, bytes: Bytes, unit: &DisplayUnit) -> Result<(), PresentError>;
}
