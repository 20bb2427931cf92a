//! Keyboard event types routed through the widget kit.
//!
//! The host environment translates its native input events into
//! [`KeyPressEvent`] values and feeds them to the trigger
//! ([`crate::trigger::AutoCompleteTrigger::handle_keydown`]). An event that a
//! component recognizes is *accepted* (the Rust rendition of
//! `preventDefault`); unrecognized events pass through untouched so the host
//! can apply its default handling.

/// Keyboard modifier state held during an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyboardModifiers {
    /// The Shift key is held.
    pub shift: bool,
    /// The Control key is held (Cmd on macOS).
    pub control: bool,
    /// The Alt key is held (Option on macOS).
    pub alt: bool,
    /// The Meta/Super key is held (Windows key, Cmd on macOS).
    pub meta: bool,
}

impl KeyboardModifiers {
    /// No modifiers pressed.
    pub const NONE: Self = Self {
        shift: false,
        control: false,
        alt: false,
        meta: false,
    };

    /// Shift modifier only.
    pub const SHIFT: Self = Self {
        shift: true,
        control: false,
        alt: false,
        meta: false,
    };

    /// Control modifier only.
    pub const CTRL: Self = Self {
        shift: false,
        control: true,
        alt: false,
        meta: false,
    };

    /// Alt modifier only.
    pub const ALT: Self = Self {
        shift: false,
        control: false,
        alt: true,
        meta: false,
    };

    /// Whether no modifier keys are held.
    #[inline]
    pub fn is_none(&self) -> bool {
        !self.shift && !self.control && !self.alt && !self.meta
    }
}

/// Physical keys recognized by the widget kit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[rustfmt::skip]
pub enum Key {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers (main keyboard)
    Digit0, Digit1, Digit2, Digit3, Digit4,
    Digit5, Digit6, Digit7, Digit8, Digit9,

    // Navigation
    ArrowUp, ArrowDown, ArrowLeft, ArrowRight,
    Home, End, PageUp, PageDown,

    // Editing
    Backspace, Delete,
    Enter, Tab,

    // Whitespace
    Space,

    // Control
    Escape,
}

/// Key press event, routed from the host input element.
#[derive(Debug, Clone)]
pub struct KeyPressEvent {
    /// The key that was pressed.
    pub key: Key,
    /// Keyboard modifiers held during the event.
    pub modifiers: KeyboardModifiers,
    /// Whether a component consumed this event.
    accepted: bool,
}

impl KeyPressEvent {
    /// Create a new key press event.
    pub fn new(key: Key, modifiers: KeyboardModifiers) -> Self {
        Self {
            key,
            modifiers,
            accepted: false,
        }
    }

    /// Create an event with no modifiers held.
    pub fn plain(key: Key) -> Self {
        Self::new(key, KeyboardModifiers::NONE)
    }

    /// Mark this event as consumed; the host should suppress its default
    /// handling for it.
    pub fn accept(&mut self) {
        self.accepted = true;
    }

    /// Whether a component consumed this event.
    pub fn is_accepted(&self) -> bool {
        self.accepted
    }
}
