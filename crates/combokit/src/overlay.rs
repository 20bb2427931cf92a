//! Floating-panel overlay: placement math and attach/detach lifecycle.
//!
//! The overlay never resizes or pushes the panel to fit: each
//! [`OverlayPlacement`] is an exact corner-to-corner alignment against the
//! anchor rectangle, and [`PositionStrategy`] picks the first placement whose
//! resulting rect fits fully inside the viewport.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use combokit_core::Signal;
use combokit_core::logging::targets;

use crate::geometry::{Point, Rect, Size};

/// How the floating panel aligns to its anchor.
///
/// `Below*` placements hang the panel off the anchor's bottom edge, `Above*`
/// sit it on the top edge. `*Start` aligns left edges, `*End` aligns right
/// edges.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OverlayPlacement {
    /// Panel top-left on the anchor's bottom-left corner.
    BelowStart,
    /// Panel top-right on the anchor's bottom-right corner.
    BelowEnd,
    /// Panel bottom-left on the anchor's top-left corner.
    AboveStart,
    /// Panel bottom-right on the anchor's top-right corner.
    AboveEnd,
}

impl OverlayPlacement {
    /// The panel origin for this placement given the anchor rect and the
    /// panel size.
    pub fn position(&self, anchor: &Rect, size: Size) -> Point {
        match self {
            Self::BelowStart => Point::new(anchor.left(), anchor.bottom()),
            Self::BelowEnd => Point::new(anchor.right() - size.width, anchor.bottom()),
            Self::AboveStart => Point::new(anchor.left(), anchor.top() - size.height),
            Self::AboveEnd => {
                Point::new(anchor.right() - size.width, anchor.top() - size.height)
            }
        }
    }
}

/// Default placement priority: below before above, start before end.
pub const DEFAULT_PLACEMENTS: [OverlayPlacement; 4] = [
    OverlayPlacement::BelowStart,
    OverlayPlacement::BelowEnd,
    OverlayPlacement::AboveStart,
    OverlayPlacement::AboveEnd,
];

/// Picks a placement for the panel against the viewport.
#[derive(Debug, Clone)]
pub struct PositionStrategy {
    viewport: Rect,
    placements: Vec<OverlayPlacement>,
}

impl PositionStrategy {
    /// Strategy with the default placement priority.
    pub fn new(viewport: Rect) -> Self {
        Self {
            viewport,
            placements: DEFAULT_PLACEMENTS.to_vec(),
        }
    }

    /// Strategy with an explicit placement priority. An empty list falls
    /// back to the default priority.
    pub fn with_placements(viewport: Rect, placements: Vec<OverlayPlacement>) -> Self {
        if placements.is_empty() {
            return Self::new(viewport);
        }
        Self {
            viewport,
            placements,
        }
    }

    /// The viewport rect placements are tested against.
    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    /// Replace the viewport (e.g. after a host resize).
    pub fn set_viewport(&mut self, viewport: Rect) {
        self.viewport = viewport;
    }

    /// Resolve the panel rect for `anchor` and `size`: the first placement
    /// in priority order whose rect fits fully inside the viewport, falling
    /// back to the first placement when none fit.
    pub fn resolve(&self, anchor: &Rect, size: Size) -> (OverlayPlacement, Rect) {
        for placement in &self.placements {
            let rect = Rect::from_origin_size(placement.position(anchor, size), size);
            if self.viewport.contains_rect(&rect) {
                return (*placement, rect);
            }
        }
        let fallback = self.placements[0];
        let rect = Rect::from_origin_size(fallback.position(anchor, size), size);
        tracing::debug!(
            target: targets::OVERLAY,
            ?fallback,
            "no placement fits the viewport, using first placement"
        );
        (fallback, rect)
    }
}

/// Handle to the floating panel content hosted outside the normal layout
/// flow.
///
/// Built once on the first open and reused for every subsequent open until
/// the owning trigger is torn down. Disposal is terminal.
pub struct PanelPortal {
    disposed: AtomicBool,
}

impl PanelPortal {
    pub(crate) fn new() -> Arc<Self> {
        tracing::debug!(target: targets::OVERLAY, "portal created");
        Arc::new(Self {
            disposed: AtomicBool::new(false),
        })
    }

    /// Whether this portal has been torn down.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Tear the portal down. Idempotent.
    pub(crate) fn dispose(&self) {
        if !self.disposed.swap(true, Ordering::SeqCst) {
            tracing::debug!(target: targets::OVERLAY, "portal disposed");
        }
    }
}

struct OverlayState {
    portal: Option<Arc<PanelPortal>>,
    rect: Option<Rect>,
    placement: Option<OverlayPlacement>,
}

/// The overlay lifecycle: the attachable slot the portal plugs into.
///
/// # Signals
///
/// - `detached`: Emitted once per actual detach, whatever initiated it, so
///   the trigger can reconcile its open state with detachment from any
///   cause.
pub struct Overlay {
    attached: AtomicBool,
    state: parking_lot::Mutex<OverlayState>,
    strategy: parking_lot::Mutex<PositionStrategy>,

    /// Emitted after every actual detach.
    pub detached: Signal<()>,
}

impl Overlay {
    /// Create a detached overlay positioning against `strategy`.
    pub fn new(strategy: PositionStrategy) -> Self {
        Self {
            attached: AtomicBool::new(false),
            state: parking_lot::Mutex::new(OverlayState {
                portal: None,
                rect: None,
                placement: None,
            }),
            strategy: parking_lot::Mutex::new(strategy),
            detached: Signal::new(),
        }
    }

    /// Whether the overlay currently hosts the portal.
    pub fn is_attached(&self) -> bool {
        self.attached.load(Ordering::SeqCst)
    }

    /// The last-resolved panel rect, available while attached. Used for
    /// outside-pointer hit tests.
    pub fn rect(&self) -> Option<Rect> {
        self.state.lock().rect
    }

    /// The placement the last resolution chose.
    pub fn placement(&self) -> Option<OverlayPlacement> {
        self.state.lock().placement
    }

    /// Update the viewport used for placement resolution.
    pub fn set_viewport(&self, viewport: Rect) {
        self.strategy.lock().set_viewport(viewport);
    }

    /// Attach `portal`, resolving its rect against `anchor` and `size`.
    /// Attaching while attached only re-resolves the position.
    pub fn attach(&self, portal: Arc<PanelPortal>, anchor: &Rect, size: Size) {
        let (placement, rect) = self.strategy.lock().resolve(anchor, size);
        {
            let mut state = self.state.lock();
            state.portal = Some(portal);
            state.rect = Some(rect);
            state.placement = Some(placement);
        }
        if !self.attached.swap(true, Ordering::SeqCst) {
            tracing::debug!(target: targets::OVERLAY, ?placement, "overlay attached");
        }
    }

    /// Re-resolve the position against a fresh anchor rect while attached.
    /// No-op while detached.
    pub fn reposition(&self, anchor: &Rect, size: Size) {
        if !self.is_attached() {
            return;
        }
        let (placement, rect) = self.strategy.lock().resolve(anchor, size);
        let mut state = self.state.lock();
        state.rect = Some(rect);
        state.placement = Some(placement);
    }

    /// Detach the portal. Idempotent; emits `detached` once per actual
    /// detach, after the attached flag and cached rect are cleared.
    pub fn detach(&self) {
        if !self.attached.swap(false, Ordering::SeqCst) {
            return;
        }
        {
            let mut state = self.state.lock();
            state.portal = None;
            state.rect = None;
            state.placement = None;
        }
        tracing::debug!(target: targets::OVERLAY, "overlay detached");
        self.detached.emit(());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    fn anchor() -> Rect {
        Rect::new(100.0, 100.0, 200.0, 40.0)
    }

    #[test]
    fn test_placement_positions() {
        let anchor = anchor();
        let size = Size::new(200.0, 256.0);

        assert_eq!(
            OverlayPlacement::BelowStart.position(&anchor, size),
            Point::new(100.0, 140.0)
        );
        assert_eq!(
            OverlayPlacement::BelowEnd.position(&anchor, size),
            Point::new(100.0, 140.0) // same width as anchor, edges coincide
        );
        assert_eq!(
            OverlayPlacement::AboveStart.position(&anchor, size),
            Point::new(100.0, -156.0)
        );
    }

    #[test]
    fn test_resolve_prefers_below_start() {
        let strategy = PositionStrategy::new(Rect::new(0.0, 0.0, 1000.0, 1000.0));
        let (placement, rect) = strategy.resolve(&anchor(), Size::new(300.0, 256.0));

        assert_eq!(placement, OverlayPlacement::BelowStart);
        assert_eq!(rect.origin, Point::new(100.0, 140.0));
    }

    #[test]
    fn test_resolve_flips_above_when_below_overflows() {
        // Viewport ends just under the anchor, no room below.
        let strategy = PositionStrategy::new(Rect::new(0.0, 0.0, 1000.0, 300.0));
        let (placement, rect) = strategy.resolve(&anchor(), Size::new(150.0, 100.0));

        assert_eq!(placement, OverlayPlacement::AboveStart);
        assert_eq!(rect.origin, Point::new(100.0, 0.0));
    }

    #[test]
    fn test_resolve_falls_back_to_first_placement() {
        // Panel larger than the viewport: nothing fits.
        let strategy = PositionStrategy::new(Rect::new(0.0, 0.0, 100.0, 100.0));
        let (placement, _) = strategy.resolve(&anchor(), Size::new(500.0, 500.0));

        assert_eq!(placement, OverlayPlacement::BelowStart);
    }

    #[test]
    fn test_attach_detach_idempotent() {
        let overlay = Overlay::new(PositionStrategy::new(Rect::new(0.0, 0.0, 1000.0, 1000.0)));
        let detach_count = Arc::new(AtomicUsize::new(0));

        let count_clone = detach_count.clone();
        overlay.detached.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        overlay.detach(); // detached already, no emission
        assert_eq!(detach_count.load(Ordering::SeqCst), 0);

        let portal = PanelPortal::new();
        overlay.attach(portal.clone(), &anchor(), Size::new(200.0, 256.0));
        assert!(overlay.is_attached());
        assert!(overlay.rect().is_some());

        overlay.attach(portal, &anchor(), Size::new(200.0, 256.0)); // still attached

        overlay.detach();
        overlay.detach(); // second detach is a no-op
        assert!(!overlay.is_attached());
        assert!(overlay.rect().is_none());
        assert_eq!(detach_count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_portal_dispose_idempotent() {
        let portal = PanelPortal::new();
        assert!(!portal.is_disposed());
        portal.dispose();
        portal.dispose();
        assert!(portal.is_disposed());
    }

    #[test]
    fn test_reposition_updates_rect() {
        let overlay = Overlay::new(PositionStrategy::new(Rect::new(0.0, 0.0, 1000.0, 1000.0)));
        overlay.attach(PanelPortal::new(), &anchor(), Size::new(200.0, 100.0));

        let moved = Rect::new(300.0, 100.0, 200.0, 40.0);
        overlay.reposition(&moved, Size::new(200.0, 100.0));
        assert_eq!(overlay.rect().map(|r| r.left()), Some(300.0));
    }
}
