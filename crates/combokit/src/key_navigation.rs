//! Active-item key navigation over a live option collection.
//!
//! [`KeyNavigationManager`] tracks which item is *active* (focus-highlighted
//! but not necessarily selected) within the ordered, mutable option list.
//! Navigation wraps from last to first and first to last, and skips items
//! matching a predicate (disabled items, typically).
//!
//! The manager holds a live view of the collection, not a copy: every command
//! resolves against the current membership, and
//! [`KeyNavigationManager::validate_active_item`] reconciles an index that no
//! longer refers to a live, non-skipped item.

use std::sync::Arc;

use combokit_core::Signal;
use combokit_core::logging::targets;

use crate::events::{Key, KeyPressEvent};
use crate::option::{OptionList, SelectOption};

/// Predicate excluding items from navigation.
pub type SkipPredicate<T> = Arc<dyn Fn(&SelectOption<T>) -> bool + Send + Sync>;

/// Preset predicate that skips disabled options.
pub fn skip_disabled<T>() -> SkipPredicate<T> {
    Arc::new(|option| option.is_disabled())
}

/// Tracks the active (highlighted) item among navigable options.
///
/// # Signals
///
/// - `active_item_changed`: Emitted with the new active index (`-1` for
///   none) after every successful transition; never on no-ops.
/// - `tabbed_out`: Emitted when the user tabs away instead of navigating,
///   so the owning trigger can close the overlay and hand focus back to the
///   normal tab order.
pub struct KeyNavigationManager<T> {
    items: OptionList<T>,
    active_index: i32,
    skip: SkipPredicate<T>,

    /// Emitted after every active-item transition. Args: new index, -1 none.
    pub active_item_changed: Signal<i32>,
    /// Emitted when a Tab key is routed here instead of a navigation key.
    pub tabbed_out: Signal<()>,
}

impl<T: 'static> KeyNavigationManager<T> {
    /// Create a manager over the live `items` view. The default skip
    /// predicate is permissive (never skips); use
    /// [`KeyNavigationManager::set_skip_predicate`] with [`skip_disabled`]
    /// to exclude disabled items.
    pub fn new(items: OptionList<T>) -> Self {
        Self {
            items,
            active_index: -1,
            skip: Arc::new(|_| false),
            active_item_changed: Signal::new(),
            tabbed_out: Signal::new(),
        }
    }

    /// Replace the skip predicate. Does not retroactively move an active
    /// item that the new predicate would skip; call
    /// [`KeyNavigationManager::validate_active_item`] for that.
    pub fn set_skip_predicate(&mut self, skip: SkipPredicate<T>) {
        self.skip = skip;
    }

    /// The active item's index, or `-1` when none is active.
    pub fn active_index(&self) -> i32 {
        self.active_index
    }

    /// The active item, re-validated against the live collection.
    ///
    /// Returns `None` when no item is active or when the cached index no
    /// longer resolves to a live, non-skipped item.
    pub fn active_item(&self) -> Option<Arc<SelectOption<T>>> {
        if self.active_index < 0 {
            return None;
        }
        let item = self.items.get(self.active_index as usize)?;
        if (self.skip)(&item) {
            return None;
        }
        Some(item)
    }

    /// Set the active item by index; `-1` clears it. An index that does not
    /// resolve to a live, non-skipped item clears the active item.
    pub fn set_active_index(&mut self, index: i32) {
        let resolved = if index < 0 {
            -1
        } else {
            match self.items.get(index as usize) {
                Some(item) if !(self.skip)(&item) => index,
                _ => -1,
            }
        };
        self.transition_to(resolved);
    }

    /// Set the active item directly.
    pub fn set_active_item(&mut self, item: &Arc<SelectOption<T>>) {
        match self.items.index_of(item.id()) {
            Some(index) => self.set_active_index(index as i32),
            None => self.transition_to(-1),
        }
    }

    /// Activate the first non-skipped item; no-op if every item is skipped
    /// or the list is empty.
    pub fn set_first_item_active(&mut self) {
        if let Some(index) = self.find_from(0, 1) {
            self.transition_to(index as i32);
        }
    }

    /// Activate the last non-skipped item; no-op if every item is skipped
    /// or the list is empty.
    pub fn set_last_item_active(&mut self) {
        let len = self.items.len();
        if len == 0 {
            return;
        }
        if let Some(index) = self.find_from(len as i32 - 1, -1) {
            self.transition_to(index as i32);
        }
    }

    /// Activate the next non-skipped item, wrapping from last to first.
    /// When nothing is active, activates the first item.
    pub fn set_next_item_active(&mut self) {
        if self.active_index < 0 {
            self.set_first_item_active();
        } else {
            self.step(1);
        }
    }

    /// Activate the previous non-skipped item, wrapping from first to last.
    /// When nothing is active, activates the last item.
    pub fn set_previous_item_active(&mut self) {
        if self.active_index < 0 {
            self.set_last_item_active();
        } else {
            self.step(-1);
        }
    }

    /// Reconcile the active index against the current collection: if it no
    /// longer resolves to a live, non-skipped item, treat it as none rather
    /// than silently pointing at a stale or wrong item.
    pub fn validate_active_item(&mut self) {
        if self.active_index >= 0 && self.active_item().is_none() {
            tracing::debug!(
                target: targets::KEY_NAVIGATION,
                index = self.active_index,
                "active item no longer resolves, clearing"
            );
            self.transition_to(-1);
        }
    }

    /// Interpret directional keys as navigation commands.
    ///
    /// Recognized keys (no modifiers held) are accepted and return `true`:
    /// ArrowDown/ArrowUp move to the next/previous item, Home/End jump to
    /// the first/last. Tab emits [`KeyNavigationManager::tabbed_out`]
    /// without moving the active item and is left unaccepted so the host's
    /// normal tab order proceeds. Anything else passes through untouched.
    pub fn handle_keydown(&mut self, event: &mut KeyPressEvent) -> bool {
        if event.key == Key::Tab {
            self.tabbed_out.emit(());
            return false;
        }
        if !event.modifiers.is_none() {
            return false;
        }
        match event.key {
            Key::ArrowDown => self.set_next_item_active(),
            Key::ArrowUp => self.set_previous_item_active(),
            Key::Home => self.set_first_item_active(),
            Key::End => self.set_last_item_active(),
            _ => return false,
        }
        event.accept();
        true
    }

    /// Step from the current active index by `direction` (+1/-1), wrapping,
    /// skipping per the predicate. Gives up after one full cycle.
    fn step(&mut self, direction: i32) {
        let len = self.items.len() as i32;
        if len == 0 {
            self.transition_to(-1);
            return;
        }
        let start = self.active_index.clamp(0, len - 1);
        let mut index = start;
        for _ in 0..len {
            index = (index + direction).rem_euclid(len);
            if let Some(item) = self.items.get(index as usize)
                && !(self.skip)(&item)
            {
                self.transition_to(index);
                return;
            }
        }
        // Every item skipped; leave the active item untouched.
    }

    /// Scan from `start` in `direction` without wrapping, returning the
    /// first non-skipped index.
    fn find_from(&self, start: i32, direction: i32) -> Option<usize> {
        let len = self.items.len() as i32;
        let mut index = start;
        while index >= 0 && index < len {
            if let Some(item) = self.items.get(index as usize)
                && !(self.skip)(&item)
            {
                return Some(index as usize);
            }
            index += direction;
        }
        None
    }

    /// Commit a transition, emitting exactly one notification per actual
    /// change of active index.
    fn transition_to(&mut self, index: i32) {
        if self.active_index == index {
            return;
        }
        self.active_index = index;
        tracing::trace!(target: targets::KEY_NAVIGATION, index, "active item changed");
        self.active_item_changed.emit(index);
    }
}
