//! Domain entity definitions.

mod display_unit;
mod image;

pub use display_unit::{
    DisplayRect, DisplayUnit, LoadState, LoadingGuard, Sprite, Transform, UnitId,
};
pub use image::{Fetched, ImageSource, LoadRequest, file_name_of};
