//! The autocomplete panel: selection source of truth for a rendered option
//! list.
//!
//! The panel composes the externally-owned [`OptionList`], an owned
//! [`SelectionModel`], and a [`KeyNavigationManager`]. It observes option
//! toggles and membership changes, reconciles the model and the option
//! `selected` flags, and publishes the resulting value set. It never creates
//! or destroys options and never mutates list membership.
//!
//! `AutoCompletePanel` is a cheap handle; [`Clone`] shares the same core, so
//! the host and the trigger can each hold one.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use combokit_core::logging::targets;
use combokit_core::{ConnectionGuard, Signal};
use parking_lot::Mutex;

use crate::events::{Key, KeyPressEvent};
use crate::key_navigation::KeyNavigationManager;
use crate::option::{OptionId, OptionList, SelectOption};
use crate::selection::{SelectionMode, SelectionModel, ValueEquality};

/// Static configuration for an [`AutoCompletePanel`].
pub struct PanelConfig<T> {
    /// Selection multiplicity. Defaults to [`SelectionMode::Single`].
    pub mode: SelectionMode,
    /// Explicit accessible label. When set, the panel is labelled by this
    /// text and [`AutoCompletePanel::panel_aria_labelledby`] returns `None`.
    pub label: Option<String>,
    /// Ids of external labelling elements, joined with the field label id.
    pub aria_labelledby: Option<String>,
    /// Height of one option row, used for scroll-into-view math.
    pub item_height: f32,
    /// Height of the visible scroll window.
    pub max_visible_height: f32,
    /// Value equality override; defaults to `PartialEq`.
    pub equality: Option<ValueEquality<T>>,
}

impl<T> Default for PanelConfig<T> {
    fn default() -> Self {
        Self {
            mode: SelectionMode::default(),
            label: None,
            aria_labelledby: None,
            item_height: 48.0,
            max_visible_height: 256.0,
            equality: None,
        }
    }
}

/// Subscriptions held for their `Drop` side effect.
#[allow(dead_code)]
struct PanelGuards {
    options_changed: Option<ConnectionGuard<u64>>,
    option_toggles: Vec<ConnectionGuard<(OptionId, bool)>>,
    active_item: Option<ConnectionGuard<i32>>,
}

struct PanelShared<T> {
    options: OptionList<T>,
    selection: Mutex<SelectionModel<T>>,
    navigation: Mutex<KeyNavigationManager<T>>,
    guards: Mutex<PanelGuards>,
    open: AtomicBool,
    scroll_top: Mutex<f32>,
    label: Option<String>,
    aria_labelledby: Option<String>,
    item_height: f32,
    max_visible_height: f32,

    option_selected: Signal<T>,
    selection_changed: Signal<Vec<T>>,
    single_selection_completed: Signal<T>,
    option_activated: Signal<T>,
    opened: Signal<()>,
    closed: Signal<()>,
}

/// The selection-coordinating core of an autocomplete panel.
///
/// # Signals
///
/// - `option_selected`: the value whose option was toggled by interaction.
/// - `selection_changed`: the full selected set after reconciliation; this
///   is the bidirectional value the host binds to.
/// - `single_selection_completed`: single-mode commit, used by the trigger
///   to auto-close.
/// - `option_activated`: the value under the navigation highlight.
/// - `opened` / `closed`: open-state flips (the trigger drives the flag).
pub struct AutoCompletePanel<T> {
    shared: Arc<PanelShared<T>>,
}

impl<T> Clone for AutoCompletePanel<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Arc::clone(&self.shared),
        }
    }
}

impl<T: Clone + PartialEq + Send + Sync + 'static> AutoCompletePanel<T> {
    /// Create a panel over the host's live `options` collection.
    pub fn new(options: OptionList<T>, config: PanelConfig<T>) -> Self {
        let selection = match config.equality {
            Some(eq) => SelectionModel::with_equality(config.mode, eq),
            None => SelectionModel::new(config.mode),
        };
        let navigation = KeyNavigationManager::new(options.clone());

        let shared = Arc::new(PanelShared {
            options,
            selection: Mutex::new(selection),
            navigation: Mutex::new(navigation),
            guards: Mutex::new(PanelGuards {
                options_changed: None,
                option_toggles: Vec::new(),
                active_item: None,
            }),
            open: AtomicBool::new(false),
            scroll_top: Mutex::new(0.0),
            label: config.label,
            aria_labelledby: config.aria_labelledby,
            item_height: config.item_height,
            max_visible_height: config.max_visible_height,
            option_selected: Signal::new(),
            selection_changed: Signal::new(),
            single_selection_completed: Signal::new(),
            option_activated: Signal::new(),
            opened: Signal::new(),
            closed: Signal::new(),
        });

        let panel = Self { shared };
        panel.wire();
        panel.reconcile_membership();
        panel
    }

    /// Wire membership and navigation observers. Slots hold a `Weak` back
    /// reference so dropping every panel handle severs the cycle.
    fn wire(&self) {
        let weak = Arc::downgrade(&self.shared);
        let membership_guard = self.shared.options.changed().connect_scoped(move |_| {
            if let Some(shared) = weak.upgrade() {
                Self::on_membership_changed(&shared);
            }
        });

        let weak = Arc::downgrade(&self.shared);
        let active_guard = {
            let navigation = self.shared.navigation.lock();
            // This slot fires while the navigation lock is held by the
            // caller of the navigation method, so it must not re-lock it.
            navigation.active_item_changed.connect_scoped(move |&index| {
                if let Some(shared) = weak.upgrade() {
                    Self::on_active_item_changed(&shared, index);
                }
            })
        };

        let mut guards = self.shared.guards.lock();
        guards.options_changed = Some(membership_guard);
        guards.active_item = Some(active_guard);
    }

    // ---- membership / toggle reconciliation --------------------------------

    fn on_membership_changed(shared: &Arc<PanelShared<T>>) {
        let snapshot = shared.options.snapshot();
        tracing::debug!(
            target: targets::PANEL,
            options = snapshot.len(),
            "reconciling rendered options"
        );

        // Re-sync every rendered option's flag from the model. Silent writes:
        // externally re-rendered options must not echo back as user toggles.
        {
            let selection = shared.selection.lock();
            for option in &snapshot {
                option.set_selected_silent(selection.is_selected(option.value()));
            }
        }

        // Re-derive the per-option toggle subscriptions.
        let mut toggles = Vec::with_capacity(snapshot.len());
        for option in &snapshot {
            let weak = Arc::downgrade(shared);
            toggles.push(option.toggled.connect_scoped(move |&(id, selected)| {
                if let Some(shared) = weak.upgrade() {
                    Self::on_option_toggled(&shared, id, selected);
                }
            }));
        }
        shared.guards.lock().option_toggles = toggles;

        shared.navigation.lock().validate_active_item();
    }

    fn on_option_toggled(shared: &Arc<PanelShared<T>>, id: OptionId, selected: bool) {
        let Some(index) = shared.options.index_of(id) else {
            return;
        };
        let Some(option) = shared.options.get(index) else {
            return;
        };
        let value = option.value().clone();
        let snapshot = shared.options.snapshot();

        let mut completed_single = false;
        let values = {
            let mut selection = shared.selection.lock();
            selection.toggle(value.clone());

            match selection.mode() {
                SelectionMode::Multiple => {
                    // Saturation: when the rendered flags reach all-on or
                    // all-off, snap the model to the same extreme.
                    if snapshot.iter().all(|o| o.is_selected()) {
                        selection
                            .set_selection(snapshot.iter().map(|o| o.value().clone()));
                    } else if snapshot.iter().all(|o| !o.is_selected()) {
                        selection.clear();
                    }
                }
                SelectionMode::Single => {
                    if selected {
                        for other in &snapshot {
                            other.set_selected_silent(other.id() == id);
                        }
                        completed_single = true;
                    }
                }
            }
            selection.values().to_vec()
        };

        tracing::debug!(
            target: targets::PANEL,
            selected,
            total = values.len(),
            "option toggled"
        );
        shared.option_selected.emit(value.clone());
        shared.selection_changed.emit(values);
        if completed_single {
            shared.single_selection_completed.emit(value);
        }
    }

    fn on_active_item_changed(shared: &Arc<PanelShared<T>>, index: i32) {
        if index < 0 {
            return;
        }
        Self::scroll_into_view(shared, index as usize);
        if let Some(option) = shared.options.get(index as usize) {
            shared.option_activated.emit(option.value().clone());
        }
    }

    /// Nearest-alignment scroll: adjust only when the item sits outside the
    /// visible window.
    fn scroll_into_view(shared: &PanelShared<T>, index: usize) {
        let top = index as f32 * shared.item_height;
        let bottom = top + shared.item_height;

        let mut scroll_top = shared.scroll_top.lock();
        if top < *scroll_top {
            *scroll_top = top;
        } else if bottom > *scroll_top + shared.max_visible_height {
            *scroll_top = bottom - shared.max_visible_height;
        }
    }

    fn reconcile_membership(&self) {
        Self::on_membership_changed(&self.shared);
    }

    // ---- host API ----------------------------------------------------------

    /// The live option collection this panel coordinates.
    pub fn options(&self) -> OptionList<T> {
        self.shared.options.clone()
    }

    /// The configured multiplicity.
    pub fn mode(&self) -> SelectionMode {
        self.shared.selection.lock().mode()
    }

    /// The equality function selection membership is decided by.
    pub fn equality(&self) -> ValueEquality<T> {
        self.shared.selection.lock().equality()
    }

    /// The currently-selected values, in insertion order.
    pub fn selected_values(&self) -> Vec<T> {
        self.shared.selection.lock().values().to_vec()
    }

    /// Whether `value` is selected.
    pub fn is_value_selected(&self, value: &T) -> bool {
        self.shared.selection.lock().is_selected(value)
    }

    /// Whether the panel has anything to show.
    pub fn panel_visible(&self) -> bool {
        !self.shared.options.is_empty()
    }

    /// Natural panel height: all rendered rows, capped at the visible
    /// window.
    pub fn preferred_height(&self) -> f32 {
        (self.shared.options.len() as f32 * self.shared.item_height)
            .min(self.shared.max_visible_height)
    }

    /// Programmatic selection write from the host's form value.
    ///
    /// Applied only while the overlay is closed; interactive selection owns
    /// the state while it is open. Returns whether the write was applied.
    pub fn set_selection<I>(&self, values: I) -> bool
    where
        I: IntoIterator<Item = T>,
    {
        if self.is_open() {
            tracing::debug!(
                target: targets::PANEL,
                "ignoring programmatic selection while open"
            );
            return false;
        }
        let (changed, next) = {
            let mut selection = self.shared.selection.lock();
            let before = selection.values().to_vec();
            let eq = selection.equality();
            selection.selection_changed.set_blocked(true);
            selection.set_selection(values);
            selection.selection_changed.set_blocked(false);
            let next = selection.values().to_vec();
            let changed = before.len() != next.len()
                || before.iter().zip(next.iter()).any(|(a, b)| !eq(a, b));
            (changed, next)
        };

        {
            let selection = self.shared.selection.lock();
            for option in self.shared.options.snapshot() {
                option.set_selected_silent(selection.is_selected(option.value()));
            }
        }

        if changed {
            self.shared.selection_changed.emit(next);
        }
        true
    }

    // ---- open state --------------------------------------------------------

    /// Whether the overlay currently shows this panel.
    pub fn is_open(&self) -> bool {
        self.shared.open.load(Ordering::SeqCst)
    }

    /// Flip the open flag. Driven by the trigger; emits `opened`/`closed`
    /// once per actual flip.
    pub fn set_open(&self, open: bool) {
        if self.shared.open.swap(open, Ordering::SeqCst) == open {
            return;
        }
        tracing::debug!(target: targets::PANEL, open, "panel open state changed");
        if open {
            self.shared.opened.emit(());
        } else {
            self.shared.closed.emit(());
        }
    }

    // ---- navigation delegation --------------------------------------------

    /// Route a navigation key to the key manager.
    pub fn handle_navigation_key(&self, event: &mut KeyPressEvent) -> bool {
        // Tab is raised outside the navigation lock: the tab-out close path
        // re-enters navigation state to clear the highlight.
        if event.key == Key::Tab {
            let tabbed_out = self.shared.navigation.lock().tabbed_out.clone();
            tabbed_out.emit(());
            return false;
        }
        self.shared.navigation.lock().handle_keydown(event)
    }

    /// Activate the first navigable item.
    pub fn activate_first_item(&self) {
        self.shared.navigation.lock().set_first_item_active();
    }

    /// Clear the navigation highlight.
    pub fn clear_active_item(&self) {
        self.shared.navigation.lock().set_active_index(-1);
    }

    /// The option under the navigation highlight, if any.
    pub fn active_option(&self) -> Option<Arc<SelectOption<T>>> {
        self.shared.navigation.lock().active_item()
    }

    /// The active item index, `-1` for none.
    pub fn active_index(&self) -> i32 {
        self.shared.navigation.lock().active_index()
    }

    /// Re-affirm `option` as the active item.
    pub fn set_active_option(&self, option: &Arc<SelectOption<T>>) {
        self.shared.navigation.lock().set_active_item(option);
    }

    // ---- scroll ------------------------------------------------------------

    /// Current scroll offset of the option viewport.
    pub fn scroll_top(&self) -> f32 {
        *self.shared.scroll_top.lock()
    }

    /// Set the scroll offset (clamped at zero).
    pub fn set_scroll_top(&self, scroll_top: f32) {
        *self.shared.scroll_top.lock() = scroll_top.max(0.0);
    }

    // ---- accessibility -----------------------------------------------------

    /// The panel's explicit accessible label, if configured.
    pub fn label(&self) -> Option<&str> {
        self.shared.label.as_deref()
    }

    /// Compute the `aria-labelledby` id list for the panel.
    ///
    /// An explicit label wins (returns `None`). Otherwise the host field's
    /// label id and the configured id list are joined with a space; when
    /// both are absent there is nothing to point at.
    pub fn panel_aria_labelledby(&self, field_label_id: Option<&str>) -> Option<String> {
        if self.shared.label.is_some() {
            return None;
        }
        let ids: Vec<&str> = field_label_id
            .into_iter()
            .chain(self.shared.aria_labelledby.as_deref())
            .collect();
        if ids.is_empty() {
            None
        } else {
            Some(ids.join(" "))
        }
    }

    // ---- signal accessors --------------------------------------------------

    /// Value whose option was toggled by interaction.
    pub fn option_selected(&self) -> Signal<T> {
        self.shared.option_selected.clone()
    }

    /// Full selected set after every reconciliation.
    pub fn selection_changed(&self) -> Signal<Vec<T>> {
        self.shared.selection_changed.clone()
    }

    /// Single-mode selection commit.
    pub fn single_selection_completed(&self) -> Signal<T> {
        self.shared.single_selection_completed.clone()
    }

    /// Value under the navigation highlight.
    pub fn option_activated(&self) -> Signal<T> {
        self.shared.option_activated.clone()
    }

    /// Open-state flip to open.
    pub fn opened(&self) -> Signal<()> {
        self.shared.opened.clone()
    }

    /// Open-state flip to closed.
    pub fn closed(&self) -> Signal<()> {
        self.shared.closed.clone()
    }

    /// Signal the key manager raises when the user tabs away.
    pub fn tabbed_out(&self) -> Signal<()> {
        self.shared.navigation.lock().tabbed_out.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::AtomicUsize;

    use crate::events::Key;

    fn panel_with(
        mode: SelectionMode,
        values: &[&'static str],
    ) -> (OptionList<&'static str>, AutoCompletePanel<&'static str>) {
        let options = OptionList::new();
        for v in values {
            options.push_value(*v);
        }
        let panel = AutoCompletePanel::new(
            options.clone(),
            PanelConfig {
                mode,
                ..PanelConfig::default()
            },
        );
        (options, panel)
    }

    #[test]
    fn test_toggle_updates_model_and_publishes() {
        let (options, panel) = panel_with(SelectionMode::Multiple, &["a", "b", "c"]);
        let published = Arc::new(Mutex::new(Vec::new()));

        let published_clone = published.clone();
        let _guard = panel.selection_changed().connect_scoped(move |values| {
            published_clone.lock().push(values.clone());
        });

        options.get(0).unwrap().toggle();
        options.get(2).unwrap().toggle();

        assert_eq!(panel.selected_values(), ["a", "c"]);
        assert_eq!(*published.lock(), vec![vec!["a"], vec!["a", "c"]]);
    }

    #[test]
    fn test_single_mode_forces_other_flags_off() {
        let (options, panel) = panel_with(SelectionMode::Single, &["a", "b"]);

        options.get(0).unwrap().toggle();
        options.get(1).unwrap().toggle();

        assert_eq!(panel.selected_values(), ["b"]);
        assert!(!options.get(0).unwrap().is_selected());
        assert!(options.get(1).unwrap().is_selected());
    }

    #[test]
    fn test_single_mode_completion_signal() {
        let (options, panel) = panel_with(SelectionMode::Single, &["a", "b"]);
        let completed = Arc::new(Mutex::new(Vec::new()));

        let completed_clone = completed.clone();
        let _guard = panel
            .single_selection_completed()
            .connect_scoped(move |value| {
                completed_clone.lock().push(*value);
            });

        options.get(1).unwrap().toggle(); // select -> completes
        options.get(1).unwrap().toggle(); // deselect -> no completion

        assert_eq!(*completed.lock(), vec!["b"]);
    }

    #[test]
    fn test_multi_mode_saturation_all_selected() {
        let (options, panel) = panel_with(SelectionMode::Multiple, &["a", "b", "c"]);

        // Selecting in reverse order saturates the flags; the model snaps to
        // the full rendered set in rendered order.
        options.get(2).unwrap().toggle();
        options.get(1).unwrap().toggle();
        options.get(0).unwrap().toggle();

        assert_eq!(panel.selected_values(), ["a", "b", "c"]);
    }

    #[test]
    fn test_multi_mode_saturation_none_selected() {
        let (options, panel) = panel_with(SelectionMode::Multiple, &["a", "b"]);

        options.get(0).unwrap().toggle();
        options.get(1).unwrap().toggle();
        options.get(0).unwrap().toggle();
        options.get(1).unwrap().toggle();

        assert!(panel.selected_values().is_empty());
    }

    #[test]
    fn test_rerendered_options_resync_from_model() {
        let (options, panel) = panel_with(SelectionMode::Multiple, &["a", "b"]);
        options.get(0).unwrap().toggle();
        assert_eq!(panel.selected_values(), ["a"]);

        // Host re-renders: fresh option instances for the same values.
        options.set_options(vec![
            Arc::new(SelectOption::new("a")),
            Arc::new(SelectOption::new("b")),
            Arc::new(SelectOption::new("c")),
        ]);

        // The model survives and the fresh flags reflect it.
        assert_eq!(panel.selected_values(), ["a"]);
        assert!(options.get(0).unwrap().is_selected());
        assert!(!options.get(1).unwrap().is_selected());

        // Fresh instances are wired: toggling one reaches the model.
        options.get(2).unwrap().toggle();
        assert_eq!(panel.selected_values(), ["a", "c"]);
    }

    #[test]
    fn test_removed_active_option_clears_highlight() {
        let (options, panel) = panel_with(SelectionMode::Single, &["a", "b", "c"]);

        let mut end = KeyPressEvent::plain(Key::End);
        panel.handle_navigation_key(&mut end);
        assert_eq!(panel.active_index(), 2);

        options.remove(2);
        assert_eq!(panel.active_index(), -1);
        assert!(panel.active_option().is_none());
    }

    #[test]
    fn test_option_activated_payload() {
        let (_, panel) = panel_with(SelectionMode::Single, &["a", "b"]);
        let activated = Arc::new(Mutex::new(Vec::new()));

        let activated_clone = activated.clone();
        let _guard = panel.option_activated().connect_scoped(move |value| {
            activated_clone.lock().push(*value);
        });

        panel.activate_first_item();
        let mut down = KeyPressEvent::plain(Key::ArrowDown);
        panel.handle_navigation_key(&mut down);

        assert_eq!(*activated.lock(), vec!["a", "b"]);
    }

    #[test]
    fn test_scroll_into_view_nearest() {
        let options = OptionList::new();
        for i in 0..20 {
            options.push_value(i);
        }
        let panel = AutoCompletePanel::new(
            options,
            PanelConfig {
                item_height: 48.0,
                max_visible_height: 256.0,
                ..PanelConfig::default()
            },
        );

        // Item 0 is already visible; no adjustment.
        panel.activate_first_item();
        assert_eq!(panel.scroll_top(), 0.0);

        // Jump to the last item: window slides down just enough.
        let mut end = KeyPressEvent::plain(Key::End);
        panel.handle_navigation_key(&mut end);
        assert_eq!(panel.scroll_top(), 20.0 * 48.0 - 256.0);

        // Back to the first: window snaps to its top edge.
        let mut home = KeyPressEvent::plain(Key::Home);
        panel.handle_navigation_key(&mut home);
        assert_eq!(panel.scroll_top(), 0.0);
    }

    #[test]
    fn test_open_close_emissions() {
        let (_, panel) = panel_with(SelectionMode::Single, &["a"]);
        let opened = Arc::new(AtomicUsize::new(0));
        let closed = Arc::new(AtomicUsize::new(0));

        let opened_clone = opened.clone();
        let _g1 = panel.opened().connect_scoped(move |_| {
            opened_clone.fetch_add(1, Ordering::SeqCst);
        });
        let closed_clone = closed.clone();
        let _g2 = panel.closed().connect_scoped(move |_| {
            closed_clone.fetch_add(1, Ordering::SeqCst);
        });

        panel.set_open(true);
        panel.set_open(true); // already open, no second emission
        panel.set_open(false);
        panel.set_open(false);

        assert_eq!(opened.load(Ordering::SeqCst), 1);
        assert_eq!(closed.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_set_selection_only_while_closed() {
        let (options, panel) = panel_with(SelectionMode::Multiple, &["a", "b"]);

        assert!(panel.set_selection(["b"]));
        assert_eq!(panel.selected_values(), ["b"]);
        assert!(options.get(1).unwrap().is_selected());

        panel.set_open(true);
        assert!(!panel.set_selection(["a"]));
        assert_eq!(panel.selected_values(), ["b"]);
    }

    #[test]
    fn test_set_selection_publishes_once() {
        let (_, panel) = panel_with(SelectionMode::Multiple, &["a", "b"]);
        let count = Arc::new(AtomicUsize::new(0));

        let count_clone = count.clone();
        let _guard = panel.selection_changed().connect_scoped(move |_| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        panel.set_selection(["a"]);
        panel.set_selection(["a"]); // unchanged, no emission

        assert_eq!(count.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_panel_visible_follows_membership() {
        let (options, panel) = panel_with(SelectionMode::Single, &[]);
        assert!(!panel.panel_visible());

        options.push_value("a");
        assert!(panel.panel_visible());

        options.clear();
        assert!(!panel.panel_visible());
    }

    #[test]
    fn test_aria_labelledby_cases() {
        // Explicit label wins.
        let labelled = AutoCompletePanel::new(
            OptionList::<&str>::new(),
            PanelConfig {
                label: Some("Fruits".into()),
                aria_labelledby: Some("ext-1".into()),
                ..PanelConfig::default()
            },
        );
        assert_eq!(labelled.panel_aria_labelledby(Some("field-1")), None);

        // Field id joined with configured ids.
        let joined = AutoCompletePanel::new(
            OptionList::<&str>::new(),
            PanelConfig {
                aria_labelledby: Some("ext-1 ext-2".into()),
                ..PanelConfig::default()
            },
        );
        assert_eq!(
            joined.panel_aria_labelledby(Some("field-1")),
            Some("field-1 ext-1 ext-2".into())
        );
        assert_eq!(joined.panel_aria_labelledby(None), Some("ext-1 ext-2".into()));

        // Nothing to point at.
        let bare = AutoCompletePanel::new(OptionList::<&str>::new(), PanelConfig::default());
        assert_eq!(bare.panel_aria_labelledby(None), None);
    }

    #[test]
    fn test_dropping_all_handles_severs_subscriptions() {
        let options: OptionList<&str> = OptionList::new();
        let a = options.push_value("a");
        {
            let panel = AutoCompletePanel::new(options.clone(), PanelConfig::default());
            assert_eq!(panel.selected_values().len(), 0);
            assert!(a.toggled.connection_count() > 0);
        }
        // Guards dropped with the last handle; toggling is inert now.
        assert_eq!(a.toggled.connection_count(), 0);
        a.toggle();
        assert!(a.is_selected());
    }
}
