//! Audit configuration error types.

/// Errors that can occur while building an audit configuration.
#[derive(thiserror::Error, Debug)]
pub enum AuditConfigError {
    /// Location mode string is not recognized.
    #[error("Unknown location mode: {0}")]
    UnknownMode(String),

    /// Only some of mode, minimum interval and max age were given.
    #[error("Location auditing needs a mode, a minimum interval and a max age")]
    IncompleteLocation,

    /// Minimum interval between updates was zero.
    #[error("Location minimum interval must be greater than zero")]
    ZeroMinInterval,
}
