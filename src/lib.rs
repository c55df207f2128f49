//! imgdisp - fetch-or-cache image loading for display units.
//!
//! Each display unit asks for an image by URL. The image is read from the
//! local store when a copy exists, otherwise downloaded, persisted and then
//! handed to the presenter, which fits it to the unit's rect.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

/// Application layer containing use cases and DTOs.
pub mod application;
/// Domain layer containing entities, errors, and port definitions.
pub mod domain;
/// Infrastructure layer containing adapters for external services.
pub mod infrastructure;
/// Presentation layer turning image bytes into sprites.
pub mod presentation;

/// Current version of the application.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name.
pub const NAME: &str = "imgdisp";
