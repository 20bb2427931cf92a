//! Logging facilities for Combokit.
//!
//! Combokit uses the `tracing` crate for instrumentation. To see logs, install
//! a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt::init();
//!
//!     // Your application code...
//! }
//! ```
//!
//! Every subsystem logs under a stable target name so hosts can filter by
//! directive, e.g. `RUST_LOG=combokit::trigger=debug`.

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core crate target.
    pub const CORE: &str = "combokit_core";
    /// Signal/slot system target.
    pub const SIGNAL: &str = "combokit_core::signal";
    /// Option collection target.
    pub const OPTION: &str = "combokit::option";
    /// Selection model target.
    pub const SELECTION: &str = "combokit::selection";
    /// Key navigation manager target.
    pub const KEY_NAVIGATION: &str = "combokit::key_navigation";
    /// Panel component target.
    pub const PANEL: &str = "combokit::panel";
    /// Trigger component target.
    pub const TRIGGER: &str = "combokit::trigger";
    /// Overlay lifecycle target.
    pub const OVERLAY: &str = "combokit::overlay";
}
