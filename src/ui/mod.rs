//! Rendering: one frame per draw call, dispatched on the current page.

mod forms;
mod list;
mod map;
mod misc;

use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Clear, Paragraph};
use ratatui::Frame;

use crate::nav::NavPage;
use crate::state::{AppState, Modal};

/// Draw the whole frame: chrome, current page, then overlays.
pub fn draw(f: &mut Frame, state: &mut AppState) {
    let Some(current) = state.navigator.current().cloned() else {
        // Session still resolving; render nothing but the frame border.
        let block = Block::default().borders(Borders::ALL).title(" waypost ");
        f.render_widget(block, f.area());
        return;
    };

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(3),
            Constraint::Length(1),
        ])
        .split(f.area());

    draw_header(f, rows[0], state, current.page);
    match current.page {
        NavPage::ReminderList => list::draw(f, rows[1], state),
        NavPage::MapView => map::draw(f, rows[1], state),
        NavPage::AddList => forms::draw_add(f, rows[1], state),
        NavPage::Login => forms::draw_login(f, rows[1], state),
        NavPage::Register => forms::draw_register(f, rows[1], state),
        NavPage::EvBattery => misc::draw_ev_battery(f, rows[1], state),
        NavPage::Setting => misc::draw_setting(f, rows[1], state),
    }
    draw_footer(f, rows[2], current.page, current.back_button);

    if let Some(banner) = &current.success_banner {
        draw_banner(f, banner);
    }
    draw_modal(f, &state.modal);
}

/// Title bar with the app name and, when logged in, the user.
fn draw_header(f: &mut Frame, area: Rect, state: &AppState, page: NavPage) {
    let title = match page {
        NavPage::ReminderList => "Reminders",
        NavPage::MapView => "Map",
        NavPage::AddList => "Add place",
        NavPage::EvBattery => "EV battery",
        NavPage::Setting => "Settings",
        NavPage::Login => "Login",
        NavPage::Register => "Register",
    };
    let who = state
        .ctx
        .user_name()
        .map(|name| format!(" {name} "))
        .unwrap_or_default();
    let header = Paragraph::new(Line::from(title))
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" waypost ")
                .title_bottom(Line::from(who).alignment(Alignment::Right)),
        )
        .alignment(Alignment::Center);
    f.render_widget(header, area);
}

/// One-line key hints for the current page.
fn draw_footer(f: &mut Frame, area: Rect, page: NavPage, back_button: bool) {
    let hints = match page {
        NavPage::ReminderList => {
            "j/k move · space toggle · u edit · d delete · r refresh · o order · a add · m map · e ev · s settings · q quit"
        }
        NavPage::MapView | NavPage::EvBattery => "q quit",
        NavPage::Setting => "o order · l logout · q quit",
        NavPage::AddList => "Tab next field · Ctrl+A auto-activate · Enter save",
        NavPage::Login => "Tab switch · Enter login · Ctrl+R register · Ctrl+Q quit",
        NavPage::Register => "Tab switch · Enter register · Ctrl+L login · Ctrl+Q quit",
    };
    let hints = if back_button {
        format!("Esc back · {hints}")
    } else {
        hints.to_string()
    };
    let footer = Paragraph::new(hints).style(Style::default().fg(Color::DarkGray));
    f.render_widget(footer, area);
}

/// Success banner across the top of the body.
fn draw_banner(f: &mut Frame, banner: &str) {
    let area = f.area();
    if area.height < 4 {
        return;
    }
    let line = Rect::new(area.x + 1, area.y + 3, area.width.saturating_sub(2), 1);
    let widget = Paragraph::new(banner.to_string())
        .style(
            Style::default()
                .fg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .alignment(Alignment::Center);
    f.render_widget(Clear, line);
    f.render_widget(widget, line);
}

/// Centered modal overlay, when one is active.
fn draw_modal(f: &mut Frame, modal: &Modal) {
    let (title, body, hint) = match modal {
        Modal::None => return,
        Modal::Alert { message } => (" Notice ", message.clone(), "Enter to dismiss"),
        Modal::ConfirmDelete { place_name, .. } => (
            " Delete ",
            format!("Delete \"{place_name}\"?"),
            "y confirm · n cancel",
        ),
    };
    let area = centered_rect(f.area(), 60, 20);
    let widget = Paragraph::new(vec![
        Line::from(body),
        Line::from(""),
        Line::from(hint).style(Style::default().fg(Color::DarkGray)),
    ])
    .wrap(ratatui::widgets::Wrap { trim: true })
    .block(Block::default().borders(Borders::ALL).title(title));
    f.render_widget(Clear, area);
    f.render_widget(widget, area);
}

/// Rect centered in `area` taking the given percentages of each dimension.
fn centered_rect(area: Rect, percent_x: u16, percent_y: u16) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);
    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
