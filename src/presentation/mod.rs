//! Presentation layer: turns loaded bytes into sprites on display units.

/// Sprite presenter and layout events.
pub mod sprite_presenter;

pub use sprite_presenter::{LayoutEvent, SpritePresenter};
