//! Error taxonomy for Waypost's core.
//!
//! Everything here is recoverable: errors are converted into an alert modal
//! or a redirect to the Login page at the point where they surface. Nothing
//! in this crate treats these as fatal to the process.

use std::error::Error;
use std::fmt;

/// Convenience alias used at the runtime boundary.
pub type RuntimeResult<T> = std::result::Result<T, Box<dyn Error + Send + Sync>>;

/// Recoverable error conditions raised by the session store, place cache and
/// location tracker.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum CoreError {
    /// An operation that requires a resolved session ran without one.
    /// Blocking precondition failure; the user is routed back to Login.
    NoUser,
    /// The remote API answered non-2xx or the request never completed. The
    /// message is surfaced to the user verbatim.
    FetchFailed {
        /// Server-provided (or transport-derived) error text.
        message: String,
    },
    /// The local session store could not be opened or written. Non-fatal;
    /// the app continues without a persisted session.
    StorageUnavailable {
        /// Underlying cause, for the notice and the logs.
        reason: String,
    },
    /// A geolocation failure carrying the platform error code and message.
    Location {
        /// Platform error code (1 denied, 2 unavailable, 3 timeout).
        code: u8,
        /// Platform error message.
        message: String,
    },
}

impl fmt::Display for CoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CoreError::NoUser => write!(f, "User not found."),
            CoreError::FetchFailed { message } => write!(f, "{message}"),
            CoreError::StorageUnavailable { reason } => {
                write!(f, "Can't open local session storage: {reason}")
            }
            CoreError::Location { code, message } => write!(f, "{code}: {message}"),
        }
    }
}

impl Error for CoreError {}

#[cfg(test)]
mod tests {
    use super::CoreError;

    #[test]
    /// What: Display output matches the user-facing alert wording.
    ///
    /// - Input: Each `CoreError` variant
    /// - Output: `FetchFailed` passes the server message through unchanged;
    ///   `Location` renders as `code: message`
    fn core_error_display_wording() {
        let fetch = CoreError::FetchFailed {
            message: "place not found".into(),
        };
        assert_eq!(fetch.to_string(), "place not found");
        let loc = CoreError::Location {
            code: 1,
            message: "User denied Geolocation".into(),
        };
        assert_eq!(loc.to_string(), "1: User denied Geolocation");
        assert_eq!(CoreError::NoUser.to_string(), "User not found.");
    }
}
