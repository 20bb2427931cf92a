//! Combokit - the logic core of an autocomplete/combobox widget.
//!
//! Combokit implements the three coordinated state machines behind a
//! dropdown select: the selection model (which values are chosen, under a
//! single/multiple constraint), key navigation (which option is highlighted
//! and how arrow keys move it), and the overlay lifecycle (when the floating
//! panel opens, where it sits, and what closes it). It performs no
//! rendering: the host renders options and the panel, feeds keyboard and
//! pointer events in, and observes state through signals.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use combokit::geometry::Rect;
//! use combokit::option::OptionList;
//! use combokit::panel::{AutoCompletePanel, PanelConfig};
//! use combokit::selection::SelectionMode;
//! use combokit::trigger::{AnchorHandle, AutoCompleteTrigger};
//!
//! struct Input;
//!
//! impl AnchorHandle for Input {
//!     fn anchor_rect(&self) -> Option<Rect> {
//!         Some(Rect::new(0.0, 0.0, 200.0, 40.0))
//!     }
//!     fn focus(&self) {}
//! }
//!
//! # fn main() -> combokit::error::Result<()> {
//! let options = OptionList::new();
//! options.push_value("apple");
//! options.push_value("banana");
//!
//! let panel = AutoCompletePanel::new(
//!     options.clone(),
//!     PanelConfig {
//!         mode: SelectionMode::Single,
//!         ..PanelConfig::default()
//!     },
//! );
//! let trigger = AutoCompleteTrigger::builder()
//!     .panel(panel.clone())
//!     .anchor(Arc::new(Input))
//!     .build()?;
//!
//! trigger.open()?;
//! options.get(0).unwrap().toggle();
//!
//! // Single-mode commit auto-closed the overlay.
//! assert!(!trigger.is_open());
//! assert_eq!(panel.selected_values(), ["apple"]);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod events;
pub mod geometry;
pub mod key_navigation;
pub mod option;
pub mod overlay;
pub mod panel;
pub mod selection;
pub mod trigger;

pub use error::{AutoCompleteError, Result};
pub use events::{Key, KeyPressEvent, KeyboardModifiers};
pub use geometry::{Point, Rect, Size};
pub use key_navigation::KeyNavigationManager;
pub use option::{OptionId, OptionList, SelectOption};
pub use overlay::{Overlay, OverlayPlacement, PanelPortal, PositionStrategy};
pub use panel::{AutoCompletePanel, PanelConfig};
pub use selection::{SelectionMode, SelectionModel};
pub use trigger::{AnchorHandle, AutoCompleteTrigger, AutoCompleteTriggerBuilder};

pub use combokit_core::{ConnectionGuard, ConnectionId, Signal};

static_assertions::assert_impl_all!(AutoCompletePanel<String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(AutoCompleteTrigger<String>: Send, Sync);
static_assertions::assert_impl_all!(OptionList<String>: Send, Sync, Clone);
static_assertions::assert_impl_all!(SelectOption<String>: Send, Sync);
