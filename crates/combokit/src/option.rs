//! The selectable option abstraction and its live collection.
//!
//! Options are created and destroyed by the host as the rendered list
//! changes; the panel observes additions and removals through
//! [`OptionList::changed`] and never creates or destroys an option itself.
//! The panel only mutates the `selected` flags of list members, never the
//! collection's membership.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use combokit_core::Signal;
use combokit_core::logging::targets;
use parking_lot::Mutex;

/// Process-unique identifier for an option instance.
///
/// Identity of the *instance*, not the value: two options may carry equal
/// values (selection-wise identity is the caller-supplied equality function,
/// see [`crate::selection::SelectionModel`]) while remaining distinct list
/// members.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionId(u64);

static NEXT_OPTION_ID: AtomicU64 = AtomicU64::new(1);

impl OptionId {
    fn next() -> Self {
        Self(NEXT_OPTION_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One selectable item with a value and a selection flag.
///
/// # Signals
///
/// - `toggled`: Emitted when the selected flag actually changes, with the
///   originating option's id and the new flag. Panel reconciliation writes
///   through [`SelectOption::set_selected_silent`], which does not emit.
pub struct SelectOption<T> {
    id: OptionId,
    value: T,
    selected: AtomicBool,
    disabled: AtomicBool,

    /// Emitted on every actual selection-state change. Args: (id, selected)
    pub toggled: Signal<(OptionId, bool)>,
}

impl<T> SelectOption<T> {
    /// Create a new unselected, enabled option carrying `value`.
    pub fn new(value: T) -> Self {
        Self {
            id: OptionId::next(),
            value,
            selected: AtomicBool::new(false),
            disabled: AtomicBool::new(false),
            toggled: Signal::new(),
        }
    }

    /// Create a disabled option (navigable but excludable via a skip
    /// predicate).
    pub fn new_disabled(value: T) -> Self {
        let option = Self::new(value);
        option.disabled.store(true, Ordering::SeqCst);
        option
    }

    /// This option's instance id.
    pub fn id(&self) -> OptionId {
        self.id
    }

    /// The value this option carries.
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Whether this option is currently selected.
    pub fn is_selected(&self) -> bool {
        self.selected.load(Ordering::SeqCst)
    }

    /// Whether this option is disabled.
    pub fn is_disabled(&self) -> bool {
        self.disabled.load(Ordering::SeqCst)
    }

    /// Set the disabled flag.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Select this option. Idempotent; emits `toggled` only when the flag
    /// actually flips.
    pub fn select(&self) {
        if !self.selected.swap(true, Ordering::SeqCst) {
            self.toggled.emit((self.id, true));
        }
    }

    /// Deselect this option. Idempotent; emits `toggled` only when the flag
    /// actually flips.
    pub fn deselect(&self) {
        if self.selected.swap(false, Ordering::SeqCst) {
            self.toggled.emit((self.id, false));
        }
    }

    /// Flip the selected flag, emitting `toggled` with the new state.
    pub fn toggle(&self) {
        if self.is_selected() {
            self.deselect();
        } else {
            self.select();
        }
    }

    /// Write the selected flag without emitting `toggled`.
    ///
    /// Used by panel reconciliation to re-synchronize the visual state of
    /// externally re-rendered options from the selection model.
    pub fn set_selected_silent(&self, selected: bool) {
        self.toggled.set_blocked(true);
        self.selected.store(selected, Ordering::SeqCst);
        self.toggled.set_blocked(false);
    }
}

impl<T: std::fmt::Debug> std::fmt::Debug for SelectOption<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SelectOption")
            .field("id", &self.id)
            .field("value", &self.value)
            .field("selected", &self.is_selected())
            .field("disabled", &self.is_disabled())
            .finish()
    }
}

struct OptionListInner<T> {
    options: Mutex<Vec<Arc<SelectOption<T>>>>,
    version: AtomicU64,
    changed: Signal<u64>,
}

/// A live, order-preserving, externally-owned collection of options.
///
/// `OptionList` is a cheap handle ([`Clone`] shares the same collection); the
/// host keeps one handle to mutate membership while the panel and the key
/// navigation manager keep handles as read-only live views.
///
/// Every membership mutation bumps the collection version and emits
/// [`OptionList::changed`] with the new version, so observers re-derive any
/// state cached against the previous membership.
pub struct OptionList<T> {
    inner: Arc<OptionListInner<T>>,
}

impl<T> Clone for OptionList<T> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<T: 'static> Default for OptionList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: 'static> OptionList<T> {
    /// Create an empty collection.
    pub fn new() -> Self {
        Self {
            inner: Arc::new(OptionListInner {
                options: Mutex::new(Vec::new()),
                version: AtomicU64::new(0),
                changed: Signal::new(),
            }),
        }
    }

    /// The change notification signal. Emitted with the new version after
    /// every membership mutation.
    pub fn changed(&self) -> Signal<u64> {
        self.inner.changed.clone()
    }

    /// The current collection version.
    pub fn version(&self) -> u64 {
        self.inner.version.load(Ordering::SeqCst)
    }

    /// Number of options currently rendered.
    pub fn len(&self) -> usize {
        self.inner.options.lock().len()
    }

    /// Whether the collection is empty.
    pub fn is_empty(&self) -> bool {
        self.inner.options.lock().is_empty()
    }

    /// The option at `index`, if any.
    pub fn get(&self, index: usize) -> Option<Arc<SelectOption<T>>> {
        self.inner.options.lock().get(index).cloned()
    }

    /// A point-in-time copy of the membership, in rendered order.
    pub fn snapshot(&self) -> Vec<Arc<SelectOption<T>>> {
        self.inner.options.lock().clone()
    }

    /// The index of the option with `id`, if it is still a member.
    pub fn index_of(&self, id: OptionId) -> Option<usize> {
        self.inner.options.lock().iter().position(|o| o.id() == id)
    }

    /// The index of the first option whose value matches `value` under `eq`.
    pub fn position_of_value<F>(&self, eq: F, value: &T) -> Option<usize>
    where
        F: Fn(&T, &T) -> bool,
    {
        self.inner
            .options
            .lock()
            .iter()
            .position(|o| eq(o.value(), value))
    }

    /// Append an option built from `value`, returning the created option.
    pub fn push_value(&self, value: T) -> Arc<SelectOption<T>> {
        let option = Arc::new(SelectOption::new(value));
        self.push(Arc::clone(&option));
        option
    }

    /// Append an existing option.
    pub fn push(&self, option: Arc<SelectOption<T>>) {
        self.inner.options.lock().push(option);
        self.bump();
    }

    /// Insert an option at `index` (clamped to the current length).
    pub fn insert(&self, index: usize, option: Arc<SelectOption<T>>) {
        {
            let mut options = self.inner.options.lock();
            let index = index.min(options.len());
            options.insert(index, option);
        }
        self.bump();
    }

    /// Remove and return the option at `index`, if any.
    pub fn remove(&self, index: usize) -> Option<Arc<SelectOption<T>>> {
        let removed = {
            let mut options = self.inner.options.lock();
            if index < options.len() {
                Some(options.remove(index))
            } else {
                None
            }
        };
        if removed.is_some() {
            self.bump();
        }
        removed
    }

    /// Remove the option with `id`, if it is a member.
    pub fn remove_by_id(&self, id: OptionId) -> Option<Arc<SelectOption<T>>> {
        let index = self.index_of(id)?;
        self.remove(index)
    }

    /// Replace the entire membership.
    pub fn set_options(&self, options: Vec<Arc<SelectOption<T>>>) {
        *self.inner.options.lock() = options;
        self.bump();
    }

    /// Remove every option.
    pub fn clear(&self) {
        let was_empty = {
            let mut options = self.inner.options.lock();
            let was_empty = options.is_empty();
            options.clear();
            was_empty
        };
        if !was_empty {
            self.bump();
        }
    }

    fn bump(&self) {
        let version = self.inner.version.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::trace!(target: targets::OPTION, version, "option collection changed");
        // Emitted outside the membership lock so slots can read the list.
        self.inner.changed.emit(version);
    }
}
