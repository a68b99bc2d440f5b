//! Form pages: Login, Register and AddList.

use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::forms::{AddField, LoginField, LoginForm};
use crate::state::AppState;

pub(super) fn draw_login(f: &mut Frame, area: Rect, state: &AppState) {
    draw_credentials(f, area, &state.login_form, " login ");
}

pub(super) fn draw_register(f: &mut Frame, area: Rect, state: &AppState) {
    draw_credentials(f, area, &state.register_form, " register ");
}

/// The shared two-field username/password layout.
fn draw_credentials(f: &mut Frame, area: Rect, form: &LoginForm, title: &str) {
    let block = Block::default().borders(Borders::ALL).title(title.to_string());
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Length(3), Constraint::Min(0)])
        .split(inner);

    f.render_widget(
        field_widget(
            "username",
            &form.username,
            form.focus == LoginField::Username,
        ),
        rows[0],
    );
    let masked = "*".repeat(form.password.chars().count());
    f.render_widget(
        field_widget("password", &masked, form.focus == LoginField::Password),
        rows[1],
    );
}

pub(super) fn draw_add(f: &mut Frame, area: Rect, state: &AppState) {
    let form = &state.add_form;
    let title = if form.is_editing() {
        " edit place "
    } else {
        " add place "
    };
    let block = Block::default().borders(Borders::ALL).title(title);
    let inner = block.inner(area);
    f.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    f.render_widget(
        field_widget("name", &form.name, form.focus == AddField::Name),
        rows[0],
    );
    f.render_widget(
        field_widget("message", &form.message, form.focus == AddField::Message),
        rows[1],
    );
    f.render_widget(
        field_widget("date (YYYY-MM-DD)", &form.date, form.focus == AddField::Date),
        rows[2],
    );
    f.render_widget(
        field_widget("latitude", &form.latitude, form.focus == AddField::Latitude),
        rows[3],
    );
    f.render_widget(
        field_widget(
            "longitude",
            &form.longitude,
            form.focus == AddField::Longitude,
        ),
        rows[4],
    );

    let toggle = if form.auto_activate {
        "[x] start enabled (Ctrl+A)"
    } else {
        "[ ] start enabled (Ctrl+A)"
    };
    f.render_widget(
        Paragraph::new(toggle).style(Style::default().fg(Color::DarkGray)),
        rows[5],
    );
}

/// A bordered single-line input, highlighted when focused.
fn field_widget<'a>(label: &'a str, value: &'a str, focused: bool) -> Paragraph<'a> {
    let style = if focused {
        Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    };
    Paragraph::new(value).block(
        Block::default()
            .borders(Borders::ALL)
            .title(format!(" {label} "))
            .border_style(style),
    )
}
