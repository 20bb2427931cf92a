//! The autocomplete trigger: overlay lifecycle and keyboard routing for a
//! panel anchored to a text input.
//!
//! The trigger owns the open/close state machine. It lazily builds the
//! [`PanelPortal`] on first open and reuses it for every later open, resolves
//! the overlay position against the anchor on each open, and merges the
//! close conditions (single-mode selection commit, tab-out, outside pointer,
//! backdrop interaction, detachment from any cause) into one close path.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use combokit_core::ConnectionGuard;
use combokit_core::logging::targets;
use parking_lot::Mutex;

use crate::error::{AutoCompleteError, Result};
use crate::events::{Key, KeyPressEvent};
use crate::geometry::{Point, Rect, Size};
use crate::overlay::{Overlay, PanelPortal, PositionStrategy};
use crate::panel::AutoCompletePanel;
use crate::selection::SelectionMode;

/// Host seam for the anchored input element.
///
/// The trigger never assumes the anchor stays connected: an anchor that has
/// left the host's layout returns `None` from
/// [`AnchorHandle::anchor_rect`], which surfaces as
/// [`AutoCompleteError::AnchorUnresolved`] when the overlay needs a
/// position.
pub trait AnchorHandle: Send + Sync {
    /// The anchor's current rectangle, if it is connected.
    fn anchor_rect(&self) -> Option<Rect>;

    /// Return keyboard focus to the anchored input.
    fn focus(&self);
}

/// Builder for [`AutoCompleteTrigger`]. The panel and the anchor are
/// required; everything else has defaults.
pub struct AutoCompleteTriggerBuilder<T> {
    panel: Option<AutoCompletePanel<T>>,
    anchor: Option<Arc<dyn AnchorHandle>>,
    viewport: Rect,
    panel_width: Option<f32>,
    panel_height: Option<f32>,
    auto_activate_first_option: bool,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> Default for AutoCompleteTriggerBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> AutoCompleteTriggerBuilder<T> {
    pub fn new() -> Self {
        Self {
            panel: None,
            anchor: None,
            viewport: Rect::new(0.0, 0.0, f32::INFINITY, f32::INFINITY),
            panel_width: None,
            panel_height: None,
            auto_activate_first_option: false,
        }
    }

    /// The panel this trigger opens. Required.
    pub fn panel(mut self, panel: AutoCompletePanel<T>) -> Self {
        self.panel = Some(panel);
        self
    }

    /// The anchored input. Required.
    pub fn anchor(mut self, anchor: Arc<dyn AnchorHandle>) -> Self {
        self.anchor = Some(anchor);
        self
    }

    /// Bounds placements are tested against. Defaults to unbounded.
    pub fn viewport_bounds(mut self, viewport: Rect) -> Self {
        self.viewport = viewport;
        self
    }

    /// Explicit panel width; defaults to the anchor's current width.
    pub fn panel_width(mut self, width: f32) -> Self {
        self.panel_width = Some(width);
        self
    }

    /// Explicit panel height; defaults to the panel's preferred height.
    pub fn panel_height(mut self, height: f32) -> Self {
        self.panel_height = Some(height);
        self
    }

    /// Activate the first navigable option on every open.
    pub fn auto_activate_first_option(mut self, auto: bool) -> Self {
        self.auto_activate_first_option = auto;
        self
    }

    /// Build the trigger and wire its auto-close conditions.
    pub fn build(self) -> Result<AutoCompleteTrigger<T>> {
        let panel = self.panel.ok_or(AutoCompleteError::MissingPanel)?;
        let anchor = self.anchor.ok_or(AutoCompleteError::MissingAnchor)?;

        let shared = Arc::new(TriggerShared {
            panel,
            anchor,
            overlay: Overlay::new(PositionStrategy::new(self.viewport)),
            portal: Mutex::new(None),
            panel_width: self.panel_width,
            panel_height: self.panel_height,
            auto_activate_first: self.auto_activate_first_option,
            disposed: AtomicBool::new(false),
            guards: Mutex::new(None),
        });

        let trigger = AutoCompleteTrigger { shared };
        trigger.wire();
        Ok(trigger)
    }
}

/// Subscriptions held for their `Drop` side effect.
#[allow(dead_code)]
struct TriggerGuards<T> {
    completed: ConnectionGuard<T>,
    tabbed_out: ConnectionGuard<()>,
    detached: ConnectionGuard<()>,
}

struct TriggerShared<T> {
    panel: AutoCompletePanel<T>,
    anchor: Arc<dyn AnchorHandle>,
    overlay: Overlay,
    portal: Mutex<Option<Arc<PanelPortal>>>,
    panel_width: Option<f32>,
    panel_height: Option<f32>,
    auto_activate_first: bool,
    disposed: AtomicBool,
    guards: Mutex<Option<TriggerGuards<T>>>,
}

/// Connects a panel to its anchored input: opens and closes the overlay and
/// routes keyboard events.
pub struct AutoCompleteTrigger<T> {
    shared: Arc<TriggerShared<T>>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> AutoCompleteTrigger<T> {
    /// Start building a trigger.
    pub fn builder() -> AutoCompleteTriggerBuilder<T> {
        AutoCompleteTriggerBuilder::new()
    }

    fn wire(&self) {
        let weak = Arc::downgrade(&self.shared);
        let completed = self
            .shared
            .panel
            .single_selection_completed()
            .connect_scoped(move |_| {
                if let Some(shared) = weak.upgrade() {
                    tracing::debug!(target: targets::TRIGGER, "selection committed, closing");
                    Self::detach(&shared);
                    shared.anchor.focus();
                }
            });

        let weak = Arc::downgrade(&self.shared);
        let tabbed_out = self.shared.panel.tabbed_out().connect_scoped(move |_| {
            if let Some(shared) = weak.upgrade() {
                tracing::debug!(target: targets::TRIGGER, "tabbed out, closing");
                Self::detach(&shared);
            }
        });

        // Whatever detaches the overlay, the panel state follows.
        let weak = Arc::downgrade(&self.shared);
        let detached = self.shared.overlay.detached.connect_scoped(move |_| {
            if let Some(shared) = weak.upgrade() {
                shared.panel.clear_active_item();
                shared.panel.set_open(false);
            }
        });

        *self.shared.guards.lock() = Some(TriggerGuards {
            completed,
            tabbed_out,
            detached,
        });
    }

    fn detach(shared: &Arc<TriggerShared<T>>) {
        // Idempotent via the overlay's attached flag; the detached slot
        // reconciles the panel.
        shared.overlay.detach();
    }

    /// Whether the overlay is currently attached.
    pub fn is_open(&self) -> bool {
        self.shared.overlay.is_attached()
    }

    /// The overlay's last-resolved rect, while open.
    pub fn overlay_rect(&self) -> Option<Rect> {
        self.shared.overlay.rect()
    }

    /// The portal, once the first open has built it.
    pub fn portal(&self) -> Option<Arc<PanelPortal>> {
        self.shared.portal.lock().clone()
    }

    /// Update the viewport used for placement resolution.
    pub fn set_viewport_bounds(&self, viewport: Rect) {
        self.shared.overlay.set_viewport(viewport);
    }

    /// Open the overlay. No-op when already open or after teardown.
    ///
    /// Fails with [`AutoCompleteError::AnchorUnresolved`] when the anchor
    /// cannot supply a positioning rectangle.
    pub fn open(&self) -> Result<()> {
        let shared = &self.shared;
        if shared.disposed.load(Ordering::SeqCst) || shared.overlay.is_attached() {
            return Ok(());
        }
        let anchor_rect = shared
            .anchor
            .anchor_rect()
            .ok_or(AutoCompleteError::AnchorUnresolved)?;

        let size = Size::new(
            shared.panel_width.unwrap_or_else(|| anchor_rect.width()),
            shared
                .panel_height
                .unwrap_or_else(|| shared.panel.preferred_height()),
        );

        let portal = {
            let mut portal = shared.portal.lock();
            portal
                .get_or_insert_with(PanelPortal::new)
                .clone()
        };

        shared.overlay.attach(portal, &anchor_rect, size);
        tracing::debug!(target: targets::TRIGGER, "overlay opened");
        shared.panel.set_open(true);
        if shared.auto_activate_first {
            shared.panel.activate_first_item();
        }
        Ok(())
    }

    /// Close the overlay. No-op when already closed.
    pub fn close(&self) {
        Self::detach(&self.shared);
    }

    /// Route a key press from the anchored input.
    ///
    /// Evaluation order: close keys first, then open keys (which fall
    /// through so the same press also navigates), select-all, commit keys,
    /// and finally plain navigation.
    pub fn handle_keydown(&self, event: &mut KeyPressEvent) -> Result<()> {
        let shared = &self.shared;

        // 1. Close keys: Escape, Alt+ArrowUp.
        if self.is_open() {
            let escape = event.key == Key::Escape && event.modifiers.is_none();
            let alt_up = event.key == Key::ArrowUp
                && event.modifiers.alt
                && !event.modifiers.control
                && !event.modifiers.shift
                && !event.modifiers.meta;
            if escape || alt_up {
                event.accept();
                self.close();
                return Ok(());
            }
        }

        // 2. Open keys: plain arrows or Alt+ArrowDown while closed. The
        // event keeps flowing so the same press also navigates.
        if !self.is_open() {
            let plain_arrow = event.modifiers.is_none()
                && matches!(event.key, Key::ArrowUp | Key::ArrowDown);
            let alt_down = event.key == Key::ArrowDown
                && event.modifiers.alt
                && !event.modifiers.control
                && !event.modifiers.shift
                && !event.modifiers.meta;
            if plain_arrow || alt_down {
                self.open()?;
            }
        }

        // 3. Select-all toggle, multiple mode only.
        if self.is_open()
            && shared.panel.mode() == SelectionMode::Multiple
            && event.key == Key::A
            && event.modifiers.control
        {
            event.accept();
            for option in shared.panel.options().snapshot() {
                option.toggle();
            }
            return Ok(());
        }

        // 4. Commit keys: Enter/Space on the active option.
        if self.is_open()
            && event.modifiers.is_none()
            && matches!(event.key, Key::Enter | Key::Space)
            && let Some(active) = shared.panel.active_option()
        {
            event.accept();
            active.toggle();
            if shared.panel.mode() == SelectionMode::Single {
                shared.panel.set_active_option(&active);
                shared.anchor.focus();
            }
            return Ok(());
        }

        // 5. Plain navigation.
        shared.panel.handle_navigation_key(event);
        Ok(())
    }

    /// A pointer interaction somewhere in the host. Closes the overlay when
    /// the point lands outside both the panel and the anchor.
    pub fn handle_outside_pointer(&self, point: Point) {
        if !self.is_open() {
            return;
        }
        let in_overlay = self
            .shared
            .overlay
            .rect()
            .is_some_and(|rect| rect.contains(point));
        let in_anchor = self
            .shared
            .anchor
            .anchor_rect()
            .is_some_and(|rect| rect.contains(point));
        if !in_overlay && !in_anchor {
            tracing::debug!(target: targets::TRIGGER, "outside pointer, closing");
            self.close();
        }
    }

    /// A click on the overlay backdrop. Hosts without a rendered backdrop
    /// never call this.
    pub fn handle_backdrop_click(&self) {
        self.close();
    }

    /// Focus left the anchored input. Closes unless the host reports that
    /// focus moved into the overlay.
    pub fn handle_focus_out(&self, focus_moved_into_overlay: bool) {
        if !focus_moved_into_overlay {
            self.close();
        }
    }

    /// Tear the trigger down: close, sever the auto-close wiring, and
    /// dispose the portal. Idempotent.
    pub fn dispose(&self) {
        if self.shared.disposed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.close();
        *self.shared.guards.lock() = None;
        if let Some(portal) = self.shared.portal.lock().take() {
            portal.dispose();
        }
        tracing::debug!(target: targets::TRIGGER, "trigger disposed");
    }
}

impl<T> Drop for TriggerShared<T> {
    fn drop(&mut self) {
        if let Some(portal) = self.portal.get_mut().take() {
            portal.dispose();
        }
    }
}
