//! Default presenter: decodes bytes into a sprite sized to the unit.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use image::imageops::FilterType;
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::domain::entities::{DisplayRect, DisplayUnit, Sprite, UnitId};
use crate::domain::ports::{PresentError, PresenterPort};

/// Request sent to whoever owns layout once a unit's content changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LayoutEvent {
    /// The unit's parent container needs to re-run layout.
    Rebuild {
        /// Container holding the unit, if it has one.
        parent: Option<String>,
        /// Unit whose sprite changed.
        unit: UnitId,
    },
}

/// Decodes images with the `image` crate and stretches them over the unit's rect.
#[derive(Debug, Clone)]
pub struct SpritePresenter {
    layout_tx: mpsc::UnboundedSender<LayoutEvent>,
    filter: FilterType,
}

impl SpritePresenter {
    /// Creates a presenter that reports layout requests on `layout_tx`.
    #[must_use]
    pub const fn new(layout_tx: mpsc::UnboundedSender<LayoutEvent>) -> Self {
        Self {
            layout_tx,
            filter: FilterType::Lanczos3,
        }
    }

    /// Sets the resampling filter used when fitting.
    #[must_use]
    pub const fn with_filter(mut self, filter: FilterType) -> Self {
        self.filter = filter;
        self
    }
}

#[async_trait]
impl PresenterPort for SpritePresenter {
    #[allow(clippy::cast_precision_loss)]
    async fn present(&self, bytes: Bytes, unit: &DisplayUnit) -> Result<(), PresentError> {
        let rect = unit.rect();
        let filter = self.filter;

        let (fitted, source_size) = tokio::task::spawn_blocking(move || {
            let img = image::load_from_memory(&bytes)
                .map_err(|e| PresentError::DecodeError(format!("Failed to decode image: {e}")))?;
            let source_size = (img.width(), img.height());
            let fitted = if rect.is_degenerate() || source_size == (rect.width, rect.height) {
                img
            } else {
                img.resize_exact(rect.width, rect.height, filter)
            };
            Ok::<_, PresentError>((fitted, source_size))
        })
        .await
        .map_err(|e| PresentError::DecodeError(format!("Decode task panicked: {e}")))??;

        let size = DisplayRect::new(fitted.width(), fitted.height());
        trace!(unit = %unit.id(), ?source_size, ?size, "Decoded sprite");

        unit.set_sprite(Sprite {
            image: Arc::new(fitted),
            size,
            source_size,
            pivot: [0.5, 0.5],
            pixels_per_unit: source_size.0 as f32,
        });
        unit.reset_transform();

        let event = LayoutEvent::Rebuild {
            parent: unit.parent().map(str::to_string),
            unit: unit.id(),
        };
        if self.layout_tx.send(event).is_err() {
            debug!(unit = %unit.id(), "No layout listener, skipping rebuild");
        }
        Ok(())
    }
}

/// Encodes a solid test image as PNG.
#[cfg(test)]
pub(crate) fn png_bytes(width: u32, height: u32) -> Bytes {
    let mut out = std::io::Cursor::new(Vec::new());
    image::DynamicImage::new_rgb8(width, height)
        .write_to(&mut out, image::ImageFormat::Png)
        .unwrap();
    Bytes::from(out.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::Transform;

    #[tokio::test]
    async fn test_present_fits_sprite_to_rect() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let presenter = SpritePresenter::new(tx);
        let unit = DisplayUnit::new(DisplayRect::new(8, 6)).with_parent("gallery");
        unit.set_transform(Transform {
            position: [10.0, -4.0, 0.0],
            scale: [0.5; 3],
        });

        presenter.present(png_bytes(4, 2), &unit).await.unwrap();

        let sprite = unit.sprite().unwrap();
        assert_eq!(sprite.size, DisplayRect::new(8, 6));
        assert_eq!((sprite.image.width(), sprite.image.height()), (8, 6));
        assert_eq!(sprite.source_size, (4, 2));
        assert!((sprite.pixels_per_unit - 4.0).abs() < f32::EPSILON);
        assert!(unit.transform().is_identity());
        assert_eq!(
            rx.recv().await,
            Some(LayoutEvent::Rebuild {
                parent: Some("gallery".to_string()),
                unit: unit.id(),
            })
        );
    }

    #[tokio::test]
    async fn test_degenerate_rect_keeps_source_size() {
        let (tx, _rx) = mpsc::unbounded_channel();
        let presenter = SpritePresenter::new(tx).with_filter(FilterType::Nearest);
        let unit = DisplayUnit::new(DisplayRect::new(0, 0));

        presenter.present(png_bytes(5, 3), &unit).await.unwrap();

        assert_eq!(unit.sprite().unwrap().size, DisplayRect::new(5, 3));
    }

    #[tokio::test]
    async fn test_garbage_bytes_fail_to_decode() {
        let (tx, mut rx) = mpsc::unbounded_channel();
        let presenter = SpritePresenter::new(tx);
        let unit = DisplayUnit::new(DisplayRect::default());

        let err = presenter
            .present(Bytes::from_static(b"definitely not a png"), &unit)
            .await
            .unwrap_err();

        assert!(matches!(err, PresentError::DecodeError(_)));
        assert!(unit.sprite().is_none());
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn test_missing_layout_listener_is_not_an_error() {
        let (tx, rx) = mpsc::unbounded_channel();
        drop(rx);
        let presenter = SpritePresenter::new(tx);
        let unit = DisplayUnit::new(DisplayRect::new(2, 2));

        assert!(presenter.present(png_bytes(2, 2), &unit).await.is_ok());
    }
}
