//! Owned session/location context.
//!
//! The current user and the last position fix travel together: both are
//! session-scoped, and both are cleared on logout. Keeping them in one
//! explicitly owned object with controlled update methods makes the event
//! loop the single writer.

use crate::state::{Coordinate, Session};

/// The current session identity and last known device position.
///
/// Invariants: the session is either fully absent or fully populated, and the
/// location is either unset or a complete coordinate pair. All mutation goes
/// through the methods below.
#[derive(Clone, Debug, Default)]
pub struct SessionContext {
    /// Authenticated identity, when resolved.
    session: Option<Session>,
    /// Latest fix from the location tracker; lost on restart.
    location: Option<Coordinate>,
}

impl SessionContext {
    /// Empty context: no session, no location.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly resolved or logged-in session.
    pub fn set_session(&mut self, session: Session) {
        self.session = Some(session);
    }

    /// Drop the in-memory session and any location tied to it.
    pub fn clear(&mut self) {
        self.session = None;
        self.location = None;
    }

    /// Record the latest fix. Called once per fix by the runtime.
    pub fn update_location(&mut self, fix: Coordinate) {
        self.location = Some(fix);
    }

    /// Whether a session is currently resolved.
    #[must_use]
    pub fn has_session(&self) -> bool {
        self.session.is_some()
    }

    /// Current user id, when a session is resolved.
    #[must_use]
    pub fn user_id(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_id.as_str())
    }

    /// Current user display name, when a session is resolved.
    #[must_use]
    pub fn user_name(&self) -> Option<&str> {
        self.session.as_ref().map(|s| s.user_name.as_str())
    }

    /// Latest known device position, if any fix has arrived.
    #[must_use]
    pub fn location(&self) -> Option<&Coordinate> {
        self.location.as_ref()
    }
}
