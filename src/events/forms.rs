//! Form page keys: Login, Register, AddList and the EV battery input.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::events::Action;
use crate::nav::{NavPage, PageRequest};
use crate::state::AppState;

pub(super) fn handle_login_key(state: &mut AppState, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('r') {
        state.register_form.reset();
        return Action::Navigate(PageRequest::to(NavPage::Register));
    }
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            state.login_form.cycle_focus();
            Action::None
        }
        KeyCode::Enter => {
            if state.login_form.is_complete() {
                Action::SubmitLogin
            } else {
                state.show_alert("Enter both a username and a password.");
                Action::None
            }
        }
        KeyCode::Backspace => {
            state.login_form.focused_text().pop();
            Action::None
        }
        KeyCode::Char(c) => {
            state.login_form.focused_text().push(c);
            Action::None
        }
        _ => Action::None,
    }
}

pub(super) fn handle_register_key(state: &mut AppState, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('l') {
        state.login_form.reset();
        return Action::Navigate(PageRequest::to(NavPage::Login));
    }
    match key.code {
        KeyCode::Tab | KeyCode::BackTab => {
            state.register_form.cycle_focus();
            Action::None
        }
        KeyCode::Enter => {
            if state.register_form.is_complete() {
                Action::SubmitRegister
            } else {
                state.show_alert("Enter both a username and a password.");
                Action::None
            }
        }
        KeyCode::Backspace => {
            state.register_form.focused_text().pop();
            Action::None
        }
        KeyCode::Char(c) => {
            state.register_form.focused_text().push(c);
            Action::None
        }
        _ => Action::None,
    }
}

pub(super) fn handle_add_key(state: &mut AppState, key: KeyEvent) -> Action {
    if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('a') {
        state.add_form.auto_activate = !state.add_form.auto_activate;
        return Action::None;
    }
    match key.code {
        KeyCode::Esc => Action::Navigate(PageRequest::to(NavPage::ReminderList)),
        KeyCode::Tab => {
            state.add_form.focus = state.add_form.focus.next();
            Action::None
        }
        KeyCode::BackTab => {
            state.add_form.focus = state.add_form.focus.prev();
            Action::None
        }
        KeyCode::Enter => {
            if state.add_form.validated().is_none() {
                state.show_alert("A place needs a name and numeric coordinates.");
                Action::None
            } else if state.add_form.is_editing() {
                Action::SubmitEditPlace
            } else {
                Action::SubmitAddPlace
            }
        }
        KeyCode::Backspace => {
            state.add_form.focused_text().pop();
            Action::None
        }
        KeyCode::Char(c) => {
            state.add_form.focused_text().push(c);
            Action::None
        }
        _ => Action::None,
    }
}

pub(super) fn handle_ev_key(state: &mut AppState, key: KeyEvent) -> Action {
    match key.code {
        KeyCode::Esc | KeyCode::Backspace if state.ev_form.percent_text.is_empty() => {
            Action::Navigate(PageRequest::to(NavPage::ReminderList))
        }
        KeyCode::Backspace => {
            state.ev_form.percent_text.pop();
            Action::None
        }
        KeyCode::Char(c) if c.is_ascii_digit() || c == '.' => {
            state.ev_form.percent_text.push(c);
            Action::None
        }
        KeyCode::Char('q') => Action::Quit,
        _ => Action::None,
    }
}

#[cfg(test)]
mod tests {
    use crate::events::{handle_key, Action};
    use crate::nav::{NavPage, PageRequest, Navigator};
    use crate::session::{NoSessionCause, SessionOutcome};
    use crate::state::{AppState, Modal, SortOrder};
    use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

    fn login_state() -> AppState {
        let mut state = AppState::new(SortOrder::NearestFirst);
        let mut nav = Navigator::new();
        nav.resolve(&SessionOutcome::NoSession(NoSessionCause::FirstRun));
        state.navigator = nav;
        state
    }

    fn at(state: &mut AppState, page: NavPage) {
        let mut cache = std::mem::take(&mut state.cache);
        let mut ctx = std::mem::take(&mut state.ctx);
        state
            .navigator
            .navigate(PageRequest::to(page), &mut cache, &mut ctx);
        state.cache = cache;
        state.ctx = ctx;
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(state: &mut AppState, text: &str) {
        for c in text.chars() {
            let _ = handle_key(state, key(KeyCode::Char(c)));
        }
    }

    #[test]
    /// What: Typing, tabbing and submitting the login form.
    ///
    /// - Input: Username, Tab, password, Enter
    /// - Output: Fields populated per focus; `SubmitLogin`
    fn login_flow_keys() {
        let mut state = login_state();
        type_text(&mut state, "ada");
        let _ = handle_key(&mut state, key(KeyCode::Tab));
        type_text(&mut state, "secret");
        assert_eq!(state.login_form.username, "ada");
        assert_eq!(state.login_form.password, "secret");
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), Action::SubmitLogin);
    }

    #[test]
    /// What: Submitting an incomplete login raises an alert, not a request.
    ///
    /// - Input: Enter with an empty password
    /// - Output: `None` and an alert modal
    fn incomplete_login_alerts() {
        let mut state = login_state();
        type_text(&mut state, "ada");
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), Action::None);
        assert!(matches!(state.modal, Modal::Alert { .. }));
    }

    #[test]
    /// What: Login and Register link to each other with fresh forms.
    ///
    /// - Input: Ctrl+R on Login, then Ctrl+L on Register
    /// - Output: Navigation actions both ways; forms reset
    fn login_register_round_trip() {
        let mut state = login_state();
        type_text(&mut state, "leftover");
        let action = handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('r'), KeyModifiers::CONTROL),
        );
        assert_eq!(action, Action::Navigate(PageRequest::to(NavPage::Register)));
        assert!(state.register_form.username.is_empty());

        at(&mut state, NavPage::Register);
        let action = handle_key(
            &mut state,
            KeyEvent::new(KeyCode::Char('l'), KeyModifiers::CONTROL),
        );
        assert_eq!(action, Action::Navigate(PageRequest::to(NavPage::Login)));
        assert!(state.login_form.username.is_empty());
    }

    #[test]
    /// What: Add form submits only when it validates.
    ///
    /// - Input: Name typed, Enter; then junk latitude, Enter
    /// - Output: `SubmitAddPlace`, then alert without an action
    fn add_form_submit_gate() {
        let mut state = login_state();
        at(&mut state, NavPage::AddList);
        type_text(&mut state, "Office");
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Enter)),
            Action::SubmitAddPlace
        );

        let _ = handle_key(&mut state, key(KeyCode::Tab));
        let _ = handle_key(&mut state, key(KeyCode::Tab));
        let _ = handle_key(&mut state, key(KeyCode::Tab));
        type_text(&mut state, "north");
        assert_eq!(handle_key(&mut state, key(KeyCode::Enter)), Action::None);
        assert!(matches!(state.modal, Modal::Alert { .. }));
    }

    #[test]
    /// What: The add form submits as an edit when it was prefilled.
    ///
    /// - Input: Form in edit mode, Enter
    /// - Output: `SubmitEditPlace` rather than `SubmitAddPlace`
    fn prefilled_form_submits_as_edit() {
        let mut state = login_state();
        at(&mut state, NavPage::AddList);
        state.add_form.name = "Office".into();
        state.add_form.editing_id = Some("p1".into());
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Enter)),
            Action::SubmitEditPlace
        );
    }

    #[test]
    /// What: EV page accepts only numeric input and backs out when empty.
    ///
    /// - Input: `7`, `x`, `5`, backspaces past empty, Esc
    /// - Output: Text `75`; Esc on empty navigates back
    fn ev_input_is_numeric() {
        let mut state = login_state();
        at(&mut state, NavPage::EvBattery);
        for code in [KeyCode::Char('7'), KeyCode::Char('x'), KeyCode::Char('5')] {
            let _ = handle_key(&mut state, key(code));
        }
        assert_eq!(state.ev_form.percent_text, "75");
        let _ = handle_key(&mut state, key(KeyCode::Backspace));
        let _ = handle_key(&mut state, key(KeyCode::Backspace));
        assert_eq!(
            handle_key(&mut state, key(KeyCode::Esc)),
            Action::Navigate(PageRequest::to(NavPage::ReminderList))
        );
    }
}
