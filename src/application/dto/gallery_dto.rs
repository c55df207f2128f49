//! Gallery DTOs.

use crate::domain::entities::{DisplayRect, DisplayUnit, ImageSource, UnitId};

/// What one unit ended up showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitReport {
    /// The unit.
    pub id: UnitId,
    /// Drawn sprite size, if an image was presented.
    pub sprite_size: Option<DisplayRect>,
    /// True while a load is still in flight.
    pub loading: bool,
    /// Where the image came from, when the load was awaited.
    pub source: Option<ImageSource>,
    /// Why the load failed, when the load was awaited.
    pub error: Option<String>,
}

impl UnitReport {
    /// Snapshots a unit.
    #[must_use]
    pub fn from_unit(unit: &DisplayUnit) -> Self {
        Self {
            id: unit.id(),
            sprite_size: unit.sprite().map(|sprite| sprite.size),
            loading: !unit.is_ready(),
            source: None,
            error: None,
        }
    }

    /// Returns true if an image is on screen.
    #[must_use]
    pub const fn is_presented(&self) -> bool {
        self.sprite_size.is_some()
    }
}

/// Outcome of populating a gallery.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GallerySummary {
    /// One report per unit, in creation order.
    pub units: Vec<UnitReport>,
}

impl GallerySummary {
    /// Number of units showing an image.
    #[must_use]
    pub fn presented(&self) -> usize {
        self.units.iter().filter(|u| u.is_presented()).count()
    }

    /// Number of units still loading.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.units.iter().filter(|u| u.loading).count()
    }

    /// Number of finished units with nothing shown.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.units
            .iter()
            .filter(|u| !u.loading && !u.is_presented())
            .count()
    }
}
