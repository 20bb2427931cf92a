//! Error types for Combokit.

use std::fmt;

/// The main error type for Combokit operations.
///
/// All variants are configuration errors: they are unrecoverable at the
/// point of use and fail loudly rather than silently degrading, since
/// continuing would break positioning or event routing. Idempotent no-ops
/// (closing an unattached overlay, re-opening an open one) are not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AutoCompleteError {
    /// The trigger was built without the required panel reference.
    MissingPanel,
    /// The trigger was built without an anchor handle.
    MissingAnchor,
    /// The anchor handle could not resolve a positioning rectangle when the
    /// overlay needed one.
    AnchorUnresolved,
}

impl fmt::Display for AutoCompleteError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingPanel => {
                write!(f, "Trigger requires a panel reference; none was supplied")
            }
            Self::MissingAnchor => {
                write!(f, "Trigger requires an anchor handle; none was supplied")
            }
            Self::AnchorUnresolved => {
                write!(
                    f,
                    "No connected anchor element could be resolved for overlay positioning"
                )
            }
        }
    }
}

impl std::error::Error for AutoCompleteError {}

/// A specialized Result type for Combokit operations.
pub type Result<T> = std::result::Result<T, AutoCompleteError>;
