//! Keyboard handling: terminal key events in, [`Action`]s out.
//!
//! Handlers mutate form and cursor state directly; anything that needs the
//! network or the session store comes back as an `Action` for the runtime
//! to execute, keeping the await points in one place.

mod forms;
mod list;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::nav::{NavPage, PageRequest};
use crate::state::{AppState, Modal};

/// What the runtime should do after a key was handled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    /// Nothing beyond the state mutation already applied.
    None,
    /// Exit the application.
    Quit,
    /// Re-resolve the display list from the cache.
    Refresh,
    /// Apply a navigation request.
    Navigate(PageRequest),
    /// Submit the login form.
    SubmitLogin,
    /// Submit the register form.
    SubmitRegister,
    /// Submit the add-place form as a create.
    SubmitAddPlace,
    /// Submit the add-place form as an edit of the place it was prefilled
    /// from.
    SubmitEditPlace,
    /// Flip the selected place's disable state remotely and locally.
    TogglePlace {
        /// Place to toggle.
        place_id: String,
        /// New disable state.
        disabled: bool,
    },
    /// Delete the place after the user confirmed the modal.
    DeletePlace {
        /// Place to delete.
        place_id: String,
    },
    /// Clear the persisted and in-memory session, then go to Login.
    Logout,
    /// Flip the list ordering and re-sort.
    ToggleOrder,
}

/// Route a key event to the modal or the current page's handler.
pub fn handle_key(state: &mut AppState, key: KeyEvent) -> Action {
    // A keypress dismisses a lingering success banner regardless of target.
    if state.banner_deadline.is_some() {
        state.banner_deadline = None;
        state.navigator.dismiss_banner();
    }

    if state.modal != Modal::None {
        return handle_modal_key(state, key);
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('q') {
        return Action::Quit;
    }

    let Some(page) = state.navigator.current().map(|c| c.page) else {
        return Action::None;
    };
    match page {
        NavPage::ReminderList => list::handle_key(state, key),
        NavPage::MapView => handle_passive_page_key(key),
        NavPage::EvBattery => forms::handle_ev_key(state, key),
        NavPage::Setting => handle_setting_key(key),
        NavPage::AddList => forms::handle_add_key(state, key),
        NavPage::Login => forms::handle_login_key(state, key),
        NavPage::Register => forms::handle_register_key(state, key),
    }
}

/// Modal keys: alerts dismiss, delete confirmations resolve.
fn handle_modal_key(state: &mut AppState, key: KeyEvent) -> Action {
    match &state.modal {
        Modal::Alert { .. } => {
            if matches!(key.code, KeyCode::Enter | KeyCode::Esc | KeyCode::Char(' ')) {
                state.modal = Modal::None;
            }
            Action::None
        }
        Modal::ConfirmDelete { place_id, .. } => match key.code {
            KeyCode::Enter | KeyCode::Char('y') => {
                let place_id = place_id.clone();
                state.modal = Modal::None;
                Action::DeletePlace { place_id }
            }
            KeyCode::Esc | KeyCode::Char('n') => {
                state.modal = Modal::None;
                Action::None
            }
            _ => Action::None,
        },
        Modal::None => Action::None,
    }
}

/// Pages with no inputs of their own: back out or quit.
fn handle_passive_page_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace => {
            Action::Navigate(PageRequest::to(NavPage::ReminderList))
        }
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

/// Setting page: ordering toggle and logout on top of the passive keys.
fn handle_setting_key(key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('o') => Action::ToggleOrder,
        KeyCode::Char('l') => Action::Logout,
        _ => handle_passive_page_key(key),
    }
}
