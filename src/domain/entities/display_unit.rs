//! Display unit entity: the UI element that ultimately shows a fetched image.

use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};

use parking_lot::RwLock;
use uuid::Uuid;

/// Load state of a single display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoadState {
    /// No load in flight.
    #[default]
    Idle = 0,
    /// A load has been accepted and has not finished.
    Loading = 1,
}

impl std::fmt::Display for LoadState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Loading => write!(f, "loading"),
        }
    }
}

#[derive(Debug)]
struct AtomicLoadState(AtomicU8);

impl AtomicLoadState {
    const fn new(state: LoadState) -> Self {
        Self(AtomicU8::new(state as u8))
    }

    fn load(&self) -> LoadState {
        match self.0.load(Ordering::Acquire) {
            0 => LoadState::Idle,
            _ => LoadState::Loading,
        }
    }

    fn store(&self, state: LoadState) {
        self.0.store(state as u8, Ordering::Release);
    }

    /// Idle -> Loading. Returns false if the unit was already loading.
    fn begin(&self) -> bool {
        self.0
            .compare_exchange(
                LoadState::Idle as u8,
                LoadState::Loading as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .is_ok()
    }
}

/// Unique identifier of a display unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UnitId(Uuid);

impl UnitId {
    /// Generates a fresh identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for UnitId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for UnitId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Size of the area an image is fitted into, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayRect {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl DisplayRect {
    /// Creates a rect.
    #[must_use]
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Returns true if either side is zero.
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

impl Default for DisplayRect {
    fn default() -> Self {
        Self::new(128, 128)
    }
}

/// Placement of a unit relative to its parent.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Local position.
    pub position: [f32; 3],
    /// Local scale.
    pub scale: [f32; 3],
}

impl Transform {
    /// Origin, unit scale.
    pub const IDENTITY: Self = Self {
        position: [0.0; 3],
        scale: [1.0; 3],
    };

    /// Returns true if this is the identity placement.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// A decoded image sized for display.
#[derive(Debug, Clone)]
pub struct Sprite {
    /// Pixels, already fitted to `size`.
    pub image: Arc<image::DynamicImage>,
    /// Drawn size.
    pub size: DisplayRect,
    /// Width and height of the image before fitting.
    pub source_size: (u32, u32),
    /// Pivot in normalized coordinates.
    pub pivot: [f32; 2],
    /// Source pixels per world unit.
    pub pixels_per_unit: f32,
}

/// The UI element that receives a loaded image.
///
/// Each unit owns its [`LoadState`]; at most one load runs per unit.
#[derive(Debug)]
pub struct DisplayUnit {
    id: UnitId,
    default_url: String,
    rect: DisplayRect,
    parent: Option<String>,
    state: AtomicLoadState,
    sprite: RwLock<Option<Sprite>>,
    transform: RwLock<Transform>,
}

impl DisplayUnit {
    /// Creates an idle unit with the given display rect.
    #[must_use]
    pub fn new(rect: DisplayRect) -> Self {
        Self {
            id: UnitId::new(),
            default_url: String::new(),
            rect,
            parent: None,
            state: AtomicLoadState::new(LoadState::Idle),
            sprite: RwLock::new(None),
            transform: RwLock::new(Transform::IDENTITY),
        }
    }

    /// Sets the URL used when `load` is called with an empty one.
    #[must_use]
    pub fn with_default_url(mut self, url: impl Into<String>) -> Self {
        self.default_url = url.into();
        self
    }

    /// Sets the container this unit lives in.
    #[must_use]
    pub fn with_parent(mut self, parent: impl Into<String>) -> Self {
        self.parent = Some(parent.into());
        self
    }

    /// Stable identity of the unit.
    #[must_use]
    pub const fn id(&self) -> UnitId {
        self.id
    }

    /// URL loaded when a load is requested with an empty URL.
    #[must_use]
    pub fn default_url(&self) -> &str {
        &self.default_url
    }

    /// Size the sprite is fitted to.
    #[must_use]
    pub const fn rect(&self) -> DisplayRect {
        self.rect
    }

    /// Container whose layout depends on this unit.
    #[must_use]
    pub fn parent(&self) -> Option<&str> {
        self.parent.as_deref()
    }

    /// Current load state.
    #[must_use]
    pub fn state(&self) -> LoadState {
        self.state.load()
    }

    /// True when no load is in flight.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.state() == LoadState::Idle
    }

    /// Atomically moves the unit from Idle to Loading.
    ///
    /// Returns `None` if a load is already in flight. The unit returns to
    /// Idle when the returned guard is dropped.
    #[must_use]
    pub fn try_begin_load(self: &Arc<Self>) -> Option<LoadingGuard> {
        self.state.begin().then(|| LoadingGuard {
            unit: Arc::clone(self),
        })
    }

    /// The sprite currently shown, if any.
    #[must_use]
    pub fn sprite(&self) -> Option<Sprite> {
        self.sprite.read().clone()
    }

    /// Replaces the shown sprite.
    pub fn set_sprite(&self, sprite: Sprite) {
        *self.sprite.write() = Some(sprite);
    }

    /// Current placement.
    #[must_use]
    pub fn transform(&self) -> Transform {
        *self.transform.read()
    }

    /// Replaces the placement.
    pub fn set_transform(&self, transform: Transform) {
        *self.transform.write() = transform;
    }

    /// Moves the unit back to the identity placement.
    pub fn reset_transform(&self) {
        self.set_transform(Transform::IDENTITY);
    }
}

/// Holds a unit in [`LoadState::Loading`] until dropped.
#[derive(Debug)]
pub struct LoadingGuard {
    unit: Arc<DisplayUnit>,
}

impl Drop for LoadingGuard {
    fn drop(&mut self) {
        self.unit.state.store(LoadState::Idle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit() -> Arc<DisplayUnit> {
        Arc::new(DisplayUnit::new(DisplayRect::default()))
    }

    #[test]
    fn test_new_unit_is_ready() {
        let unit = unit();
        assert!(unit.is_ready());
        assert_eq!(unit.state(), LoadState::Idle);
        assert!(unit.sprite().is_none());
        assert!(unit.transform().is_identity());
    }

    #[test]
    fn test_guard_rejects_second_begin() {
        let unit = unit();
        let guard = unit.try_begin_load();
        assert!(guard.is_some());
        assert!(!unit.is_ready());

        assert!(unit.try_begin_load().is_none());
        assert_eq!(unit.state(), LoadState::Loading);

        drop(guard);
        assert!(unit.is_ready());
        assert!(unit.try_begin_load().is_some());
    }

    #[test]
    fn test_guards_are_per_unit() {
        let a = unit();
        let b = unit();
        let _ga = a.try_begin_load().unwrap();
        assert!(b.try_begin_load().is_some());
    }

    #[test]
    fn test_reset_transform() {
        let unit = unit();
        unit.set_transform(Transform {
            position: [3.0, 4.0, 0.0],
            scale: [2.0; 3],
        });
        assert!(!unit.transform().is_identity());
        unit.reset_transform();
        assert!(unit.transform().is_identity());
    }

    #[test]
    fn test_builder_fields() {
        let unit = DisplayUnit::new(DisplayRect::new(64, 32))
            .with_default_url("http://x/fallback.png")
            .with_parent("gallery");
        assert_eq!(unit.default_url(), "http://x/fallback.png");
        assert_eq!(unit.parent(), Some("gallery"));
        assert_eq!(unit.rect(), DisplayRect::new(64, 32));
        assert_ne!(unit.id(), DisplayUnit::new(DisplayRect::default()).id());
    }
}
