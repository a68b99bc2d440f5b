//! Page navigation state machine.
//!
//! Navigation owns the current page plus its arrival flags (success banner,
//! back button) and applies the two side effects a transition can carry:
//! arming the cache's one-shot refresh, and tearing down session state when
//! the user lands on Login. Until the persisted session is resolved the
//! machine sits in a `Resolving` state that renders nothing.

use crate::cache::PlaceCache;
use crate::session::SessionOutcome;
use crate::state::SessionContext;

/// The pages a navigation request can target.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum NavPage {
    /// Main reminder list (home).
    #[default]
    ReminderList,
    /// Map of the user's places around the last fix.
    MapView,
    /// Add-a-place form.
    AddList,
    /// EV battery range helper.
    EvBattery,
    /// Settings (profile, ordering, logout).
    Setting,
    /// Login form; entering it clears session-dependent state.
    Login,
    /// Registration form.
    Register,
}

/// A navigation request: target page plus arrival flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PageRequest {
    /// Page to show.
    pub page: NavPage,
    /// Transient success banner to show on arrival.
    pub success_banner: Option<String>,
    /// Arm the cache's one-shot refresh on arrival.
    pub force_fetch: bool,
    /// Show a back control on the target page.
    pub back_button: bool,
}

impl PageRequest {
    /// Plain request for `page` with no flags.
    #[must_use]
    pub fn to(page: NavPage) -> Self {
        Self {
            page,
            ..Self::default()
        }
    }

    /// Attach a success banner.
    #[must_use]
    pub fn with_banner(mut self, banner: impl Into<String>) -> Self {
        self.success_banner = Some(banner.into());
        self
    }

    /// Arm a forced refresh on arrival.
    #[must_use]
    pub fn with_force_fetch(mut self) -> Self {
        self.force_fetch = true;
        self
    }

    /// Show the back control on the target page.
    #[must_use]
    pub fn with_back_button(mut self) -> Self {
        self.back_button = true;
        self
    }
}

/// The page currently shown, with its arrival flags.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CurrentPage {
    /// Page on screen.
    pub page: NavPage,
    /// Banner still showing, until dismissed or expired.
    pub success_banner: Option<String>,
    /// Whether the page shows a back control.
    pub back_button: bool,
}

/// Navigation state: resolving the persisted session, or at a page.
#[derive(Clone, Debug, PartialEq, Eq)]
enum NavState {
    /// Session store not yet consulted; nothing renders.
    Resolving,
    /// A page is on screen.
    At(CurrentPage),
}

/// The page state machine.
#[derive(Debug)]
pub struct Navigator {
    /// Current state.
    state: NavState,
}

impl Default for Navigator {
    fn default() -> Self {
        Self::new()
    }
}

impl Navigator {
    /// Fresh machine in the resolving state.
    #[must_use]
    pub fn new() -> Self {
        Self {
            state: NavState::Resolving,
        }
    }

    /// Whether the persisted session is still being resolved.
    #[must_use]
    pub fn is_resolving(&self) -> bool {
        matches!(self.state, NavState::Resolving)
    }

    /// Leave `Resolving` based on the session store's answer: an active
    /// session lands on the reminder list, anything else on Login.
    pub fn resolve(&mut self, outcome: &SessionOutcome) {
        let page = match outcome {
            SessionOutcome::Active(_) => NavPage::ReminderList,
            SessionOutcome::NoSession(_) => NavPage::Login,
        };
        tracing::info!(?page, "[Nav] session resolved");
        self.state = NavState::At(CurrentPage {
            page,
            ..CurrentPage::default()
        });
    }

    /// Apply a navigation request and its side effects.
    ///
    /// `force_fetch` arms the cache's one-shot refresh; landing on Login
    /// drops the in-memory session, its location and the cached place list
    /// so nothing session-scoped survives into the next login.
    pub fn navigate(
        &mut self,
        request: PageRequest,
        cache: &mut PlaceCache,
        ctx: &mut SessionContext,
    ) {
        if request.force_fetch {
            cache.request_force_fetch();
        }
        if request.page == NavPage::Login {
            ctx.clear();
            cache.invalidate();
        }
        tracing::debug!(page = ?request.page, forced = request.force_fetch, "[Nav] navigate");
        self.state = NavState::At(CurrentPage {
            page: request.page,
            success_banner: request.success_banner,
            back_button: request.back_button,
        });
    }

    /// The page on screen, or `None` while resolving.
    #[must_use]
    pub fn current(&self) -> Option<&CurrentPage> {
        match &self.state {
            NavState::Resolving => None,
            NavState::At(current) => Some(current),
        }
    }

    /// Drop the current page's success banner (timeout or keypress).
    pub fn dismiss_banner(&mut self) {
        if let NavState::At(current) = &mut self.state {
            current.success_banner = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{NavPage, Navigator, PageRequest};
    use crate::cache::PlaceCache;
    use crate::session::{NoSessionCause, SessionOutcome};
    use crate::state::{Session, SessionContext};

    fn resolved_navigator() -> Navigator {
        let mut nav = Navigator::new();
        nav.resolve(&SessionOutcome::Active(Session {
            user_id: "u1".into(),
            user_name: "ada".into(),
        }));
        nav
    }

    #[test]
    /// What: Resolution routes by session presence.
    ///
    /// - Input: Active outcome; each no-session cause
    /// - Output: ReminderList for active, Login otherwise; `current` is
    ///   `None` before resolving
    fn resolve_routes_by_session() {
        let nav = Navigator::new();
        assert!(nav.is_resolving());
        assert!(nav.current().is_none());

        let nav = resolved_navigator();
        assert_eq!(nav.current().map(|c| c.page), Some(NavPage::ReminderList));

        for cause in [
            NoSessionCause::FirstRun,
            NoSessionCause::MissingRecord,
            NoSessionCause::StorageUnavailable {
                reason: "disk".into(),
            },
        ] {
            let mut nav = Navigator::new();
            nav.resolve(&SessionOutcome::NoSession(cause));
            assert_eq!(nav.current().map(|c| c.page), Some(NavPage::Login));
        }
    }

    #[test]
    /// What: A force-fetch request arms the cache exactly once.
    ///
    /// - Input: Navigate with `with_force_fetch`, then a plain navigate
    /// - Output: Flag armed after the first, untouched by the second
    fn force_fetch_arms_cache_once() {
        let mut nav = resolved_navigator();
        let mut cache = PlaceCache::new();
        let mut ctx = SessionContext::new();

        nav.navigate(
            PageRequest::to(NavPage::ReminderList).with_force_fetch(),
            &mut cache,
            &mut ctx,
        );
        assert!(cache.force_fetch_pending());

        nav.navigate(PageRequest::to(NavPage::MapView), &mut cache, &mut ctx);
        assert!(cache.force_fetch_pending(), "plain navigation must not disarm");
    }

    #[test]
    /// What: Landing on Login clears the session context and the cache.
    ///
    /// - Input: Context with a session, navigate to Login
    /// - Output: No session, no armed refresh; page is Login
    fn login_clears_session_state() {
        let mut nav = resolved_navigator();
        let mut cache = PlaceCache::new();
        cache.request_force_fetch();
        let mut ctx = SessionContext::new();
        ctx.set_session(Session {
            user_id: "u1".into(),
            user_name: "ada".into(),
        });

        nav.navigate(PageRequest::to(NavPage::Login), &mut cache, &mut ctx);
        assert!(!ctx.has_session());
        assert!(!cache.force_fetch_pending());
        assert_eq!(nav.current().map(|c| c.page), Some(NavPage::Login));
    }

    #[test]
    /// What: Arrival flags carry through and the banner can be dismissed.
    ///
    /// - Input: Request with banner and back button
    /// - Output: Both visible on the current page; banner gone after dismiss
    fn banner_and_back_button_carry() {
        let mut nav = resolved_navigator();
        let mut cache = PlaceCache::new();
        let mut ctx = SessionContext::new();

        nav.navigate(
            PageRequest::to(NavPage::ReminderList)
                .with_banner("Create Success")
                .with_back_button(),
            &mut cache,
            &mut ctx,
        );
        let current = nav.current().expect("page on screen");
        assert_eq!(current.success_banner.as_deref(), Some("Create Success"));
        assert!(current.back_button);

        nav.dismiss_banner();
        let current = nav.current().expect("page on screen");
        assert!(current.success_banner.is_none());
    }
}
