//! Domain layer with core entities, errors and port definitions.

/// Entity definitions.
pub mod entities;
/// Error types.
pub mod errors;
/// Port definitions.
pub mod ports;

pub use entities::{DisplayRect, DisplayUnit, ImageSource, LoadState};
pub use errors::{CacheError, FetchError, LoadError};
pub use ports::{FetcherPort, PresenterPort, ReachabilityPort};
