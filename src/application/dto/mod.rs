//! Data transfer objects.

mod gallery_dto;

pub use gallery_dto::{GallerySummary, UnitReport};
