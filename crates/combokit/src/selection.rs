//! Selection model for the autocomplete panel.
//!
//! [`SelectionModel`] tracks the set of currently-selected values under a
//! single/multiple multiplicity constraint. Membership is decided by a
//! caller-supplied equality function, not reference or structural equality,
//! because values may be primitives or records with a different identity
//! notion.
//!
//! # Example
//!
//! ```
//! use combokit::selection::{SelectionMode, SelectionModel};
//!
//! let mut selection = SelectionModel::new(SelectionMode::Multiple);
//!
//! selection.toggle("apple");
//! selection.toggle("banana");
//! assert!(selection.is_selected(&"apple"));
//! assert_eq!(selection.values(), ["apple", "banana"]);
//!
//! selection.toggle("apple");
//! assert_eq!(selection.values(), ["banana"]);
//! ```

use std::sync::Arc;

use combokit_core::Signal;
use combokit_core::logging::targets;

/// Selection multiplicity for the panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SelectionMode {
    /// Only one value can be selected at a time (default).
    #[default]
    Single,
    /// Any number of values can be selected.
    Multiple,
}

/// Caller-supplied value equality used for selection membership.
pub type ValueEquality<T> = Arc<dyn Fn(&T, &T) -> bool + Send + Sync>;

/// Tracks the set of currently-selected values.
///
/// Values are kept in insertion order. In [`SelectionMode::Single`] the set
/// never exceeds one entry; selecting a new value implicitly evicts the
/// previous one.
///
/// # Signals
///
/// - `selection_changed`: Emitted with the full selected set after every
///   mutating operation that actually changed it (never on no-ops).
pub struct SelectionModel<T> {
    mode: SelectionMode,
    values: Vec<T>,
    eq: ValueEquality<T>,

    /// Emitted after every effective mutation. Args: the selected values, in
    /// insertion order.
    pub selection_changed: Signal<Vec<T>>,
}

impl<T: Clone + PartialEq + Send + Sync + 'static> SelectionModel<T> {
    /// Create a model using `PartialEq` for value identity.
    pub fn new(mode: SelectionMode) -> Self {
        Self::with_equality(mode, Arc::new(|a: &T, b: &T| a == b))
    }
}

impl<T: Clone + Send + Sync + 'static> SelectionModel<T> {
    /// Create a model with an explicit equality function.
    pub fn with_equality(mode: SelectionMode, eq: ValueEquality<T>) -> Self {
        Self {
            mode,
            values: Vec::new(),
            eq,
            selection_changed: Signal::new(),
        }
    }

    /// The configured multiplicity.
    pub fn mode(&self) -> SelectionMode {
        self.mode
    }

    /// The equality function this model selects by.
    pub fn equality(&self) -> ValueEquality<T> {
        Arc::clone(&self.eq)
    }

    /// The selected values, in insertion order.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// Number of selected values.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether nothing is selected.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Membership test via the equality function.
    pub fn is_selected(&self, value: &T) -> bool {
        self.position(value).is_some()
    }

    /// Toggle `value`: remove it if present, add it otherwise. In single
    /// mode, adding replaces any existing entry.
    pub fn toggle(&mut self, value: T) {
        match self.position(&value) {
            Some(index) => {
                self.values.remove(index);
            }
            None => {
                if self.mode == SelectionMode::Single {
                    self.values.clear();
                }
                self.values.push(value);
            }
        }
        self.notify();
    }

    /// Add `value` to the selection. Idempotent.
    pub fn select(&mut self, value: T) {
        if self.is_selected(&value) {
            return;
        }
        if self.mode == SelectionMode::Single {
            self.values.clear();
        }
        self.values.push(value);
        self.notify();
    }

    /// Remove `value` from the selection. Idempotent.
    pub fn deselect(&mut self, value: &T) {
        if let Some(index) = self.position(value) {
            self.values.remove(index);
            self.notify();
        }
    }

    /// Replace the entire selected set.
    ///
    /// Values equal (per the equality function) to an earlier entry are kept
    /// once. In single mode the model keeps exactly the **last** value
    /// supplied, silently discarding the rest; supplying several values is
    /// not an error.
    pub fn set_selection<I>(&mut self, values: I)
    where
        I: IntoIterator<Item = T>,
    {
        let mut next: Vec<T> = Vec::new();
        for value in values {
            if !next.iter().any(|v| (self.eq)(v, &value)) {
                next.push(value);
            }
        }
        if self.mode == SelectionMode::Single && next.len() > 1 {
            next.drain(..next.len() - 1);
        }

        if self.sets_equal(&next) {
            return;
        }
        self.values = next;
        self.notify();
    }

    /// Empty the selected set.
    pub fn clear(&mut self) {
        if self.values.is_empty() {
            return;
        }
        self.values.clear();
        self.notify();
    }

    fn position(&self, value: &T) -> Option<usize> {
        self.values.iter().position(|v| (self.eq)(v, value))
    }

    fn sets_equal(&self, other: &[T]) -> bool {
        self.values.len() == other.len()
            && self
                .values
                .iter()
                .zip(other.iter())
                .all(|(a, b)| (self.eq)(a, b))
    }

    fn notify(&self) {
        tracing::trace!(target: targets::SELECTION, selected = self.values.len(), "selection changed");
        self.selection_changed.emit(self.values.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_single_mode_size_invariant() {
        let mut model = SelectionModel::new(SelectionMode::Single);

        model.toggle("a");
        assert_eq!(model.values(), ["a"]);

        model.toggle("b");
        assert_eq!(model.values(), ["b"]); // not ["a", "b"]
        assert!(model.len() <= 1);
    }

    #[test]
    fn test_toggle_is_own_inverse() {
        let mut model = SelectionModel::new(SelectionMode::Multiple);
        model.select("a");
        model.select("b");

        model.toggle("c");
        model.toggle("c");

        assert_eq!(model.values(), ["a", "b"]);
    }

    #[test]
    fn test_select_deselect_idempotent() {
        let mut model = SelectionModel::new(SelectionMode::Multiple);
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        model.selection_changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        model.select("a");
        model.select("a"); // no-op, no emission
        model.deselect(&"b"); // absent, no emission
        model.deselect(&"a");
        model.deselect(&"a"); // no-op

        assert!(model.is_empty());
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_set_selection_single_keeps_last() {
        let mut model = SelectionModel::new(SelectionMode::Single);
        model.set_selection(["a", "b", "c"]);
        assert_eq!(model.values(), ["c"]);
    }

    #[test]
    fn test_set_selection_multiple() {
        let mut model = SelectionModel::new(SelectionMode::Multiple);
        model.set_selection(["a", "b", "b", "c"]);
        assert_eq!(model.values(), ["a", "b", "c"]);
    }

    #[test]
    fn test_clear() {
        let mut model = SelectionModel::new(SelectionMode::Multiple);
        model.select(1);
        model.select(2);

        model.clear();
        assert!(model.is_empty());
    }

    #[test]
    fn test_clear_empty_does_not_notify() {
        let mut model: SelectionModel<i32> = SelectionModel::new(SelectionMode::Multiple);
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        model.selection_changed.connect(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        model.clear();
        assert_eq!(count.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_custom_equality() {
        // Select case-insensitively.
        let mut model: SelectionModel<String> = SelectionModel::with_equality(
            SelectionMode::Multiple,
            Arc::new(|a: &String, b: &String| a.eq_ignore_ascii_case(b)),
        );

        model.select("Apple".to_string());
        assert!(model.is_selected(&"APPLE".to_string()));

        model.toggle("apple".to_string());
        assert!(model.is_empty());
    }

    #[test]
    fn test_selection_changed_payload() {
        let mut model = SelectionModel::new(SelectionMode::Multiple);
        let published = Arc::new(Mutex::new(Vec::new()));

        let published_clone = published.clone();
        model.selection_changed.connect(move |values| {
            published_clone.lock().push(values.clone());
        });

        model.select("a");
        model.select("b");

        let published = published.lock();
        assert_eq!(*published, vec![vec!["a"], vec!["a", "b"]]);
    }
}
