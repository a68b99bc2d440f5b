//! Reminder-list page keys: cursor movement, toggles, deletion and page
//! shortcuts.

use crossterm::event::{KeyCode, KeyEvent};

use crate::events::Action;
use crate::nav::{NavPage, PageRequest};
use crate::state::{AppState, Modal};

pub(super) fn handle_key(state: &mut AppState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Char('q') => Action::Quit,
        KeyCode::Down | KeyCode::Char('j') => {
            state.select_next();
            Action::None
        }
        KeyCode::Up | KeyCode::Char('k') => {
            state.select_prev();
            Action::None
        }
        KeyCode::Char(' ') | KeyCode::Enter => match state.selected_place() {
            Some(row) => Action::TogglePlace {
                place_id: row.place.id.clone(),
                disabled: !row.place.is_disable,
            },
            None => Action::None,
        },
        KeyCode::Char('d') | KeyCode::Delete => {
            if let Some(row) = state.selected_place() {
                state.modal = Modal::ConfirmDelete {
                    place_id: row.place.id.clone(),
                    place_name: row.place.name.clone(),
                };
            }
            Action::None
        }
        KeyCode::Char('u') => {
            if let Some(row) = state.selected_place() {
                let place = row.place.clone();
                state.add_form.prefill(&place);
                return Action::Navigate(PageRequest::to(NavPage::AddList).with_back_button());
            }
            Action::None
        }
        KeyCode::Char('r') => {
            state.cache.request_force_fetch();
            Action::Refresh
        }
        KeyCode::Char('o') => Action::ToggleOrder,
        KeyCode::Char('a') => {
            state.add_form.reset();
            Action::Navigate(PageRequest::to(NavPage::AddList).with_back_button())
        }
        KeyCode::Char('m') => {
            Action::Navigate(PageRequest::to(NavPage::MapView).with_back_button())
        }
        KeyCode::Char('e') => {
            state.ev_form.reset();
            Action::Navigate(PageRequest::to(NavPage::EvBattery).with_back_button())
        }
        KeyCode::Char('s') => {
            Action::Navigate(PageRequest::to(NavPage::Setting).with_back_button())
        }
        _ => Action::None,
    }
}
