//! Use case implementations.

mod populate_gallery_use_case;

pub use populate_gallery_use_case::PopulateGalleryUseCase;
