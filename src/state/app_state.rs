//! Top-level application state threaded through the event loop.

use std::time::{Duration, Instant};

use ratatui::widgets::ListState;

use crate::cache::PlaceCache;
use crate::nav::Navigator;
use crate::state::forms::{AddPlaceForm, LoginForm};
use crate::state::{DisplayPlace, Modal, SessionContext, SortOrder};

/// How long a success banner stays on screen without a keypress.
pub const BANNER_TTL: Duration = Duration::from_secs(3);

/// EV battery page inputs: current charge percent against a full-charge
/// range, yielding a remaining-range estimate to compare with place
/// distances.
#[derive(Clone, Debug)]
pub struct EvBatteryForm {
    /// Battery percent text, parsed on the fly.
    pub percent_text: String,
    /// Range on a full charge, in kilometers.
    pub full_range_km: f64,
}

impl Default for EvBatteryForm {
    fn default() -> Self {
        Self {
            percent_text: String::new(),
            full_range_km: 300.0,
        }
    }
}

impl EvBatteryForm {
    /// Remaining range for the entered percent, when it parses to 0..=100.
    #[must_use]
    pub fn estimated_range_km(&self) -> Option<f64> {
        let percent = self.percent_text.trim().parse::<f64>().ok()?;
        if !(0.0..=100.0).contains(&percent) {
            return None;
        }
        Some(self.full_range_km * percent / 100.0)
    }

    /// Reset the input (used when entering the page).
    pub fn reset(&mut self) {
        self.percent_text.clear();
    }
}

/// Everything the event loop and renderer share.
#[derive(Debug, Default)]
pub struct AppState {
    /// Page state machine.
    pub navigator: Navigator,
    /// Session identity and last fix.
    pub ctx: SessionContext,
    /// Owner-keyed place cache.
    pub cache: PlaceCache,
    /// Current list ordering.
    pub order: SortOrder,
    /// Rows currently shown on the reminder list and map.
    pub display: Vec<DisplayPlace>,
    /// List cursor for the reminder list.
    pub list: ListState,
    /// Modal on top of the current page, if any.
    pub modal: Modal,
    /// Login page inputs.
    pub login_form: LoginForm,
    /// Register page inputs (same two-field shape as login).
    pub register_form: LoginForm,
    /// Add-a-place page inputs.
    pub add_form: AddPlaceForm,
    /// EV battery page inputs.
    pub ev_form: EvBatteryForm,
    /// When the current success banner expires, if one is showing.
    pub banner_deadline: Option<Instant>,
    /// Set by the quit action; the runtime exits at the top of the loop.
    pub should_quit: bool,
}

impl AppState {
    /// Fresh state with `order` as the initial list ordering.
    #[must_use]
    pub fn new(order: SortOrder) -> Self {
        Self {
            order,
            ..Self::default()
        }
    }

    /// Replace the display rows, clamping the cursor into range.
    pub fn set_display(&mut self, rows: Vec<DisplayPlace>) {
        self.display = rows;
        if self.display.is_empty() {
            self.list.select(None);
        } else {
            let idx = self.list.selected().unwrap_or(0);
            self.list.select(Some(idx.min(self.display.len() - 1)));
        }
    }

    /// The row under the cursor, if any.
    #[must_use]
    pub fn selected_place(&self) -> Option<&DisplayPlace> {
        self.list.selected().and_then(|i| self.display.get(i))
    }

    /// Move the cursor down one row, saturating at the end.
    pub fn select_next(&mut self) {
        if self.display.is_empty() {
            return;
        }
        let idx = self.list.selected().map_or(0, |i| i + 1);
        self.list.select(Some(idx.min(self.display.len() - 1)));
    }

    /// Move the cursor up one row, saturating at the start.
    pub fn select_prev(&mut self) {
        if self.display.is_empty() {
            return;
        }
        let idx = self.list.selected().map_or(0, |i| i.saturating_sub(1));
        self.list.select(Some(idx));
    }

    /// Show an alert modal with `message`, replacing any current modal.
    pub fn show_alert(&mut self, message: impl Into<String>) {
        self.modal = Modal::Alert {
            message: message.into(),
        };
    }

    /// Start (or restart) the success-banner expiry clock.
    pub fn arm_banner(&mut self) {
        self.banner_deadline = Some(Instant::now() + BANNER_TTL);
    }

    /// Drop an expired banner; returns whether anything changed.
    pub fn expire_banner(&mut self, now: Instant) -> bool {
        match self.banner_deadline {
            Some(deadline) if now >= deadline => {
                self.banner_deadline = None;
                self.navigator.dismiss_banner();
                true
            }
            _ => false,
        }
    }
}
