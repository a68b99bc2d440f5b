//! Settings and EV battery pages.

use ratatui::layout::Rect;
use ratatui::style::{Color, Style};
use ratatui::text::Line;
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::{AppState, SortOrder};
use crate::util;

pub(super) fn draw_setting(f: &mut Frame, area: Rect, state: &AppState) {
    let who = state.ctx.user_name().unwrap_or("(not logged in)");
    let order = match state.order {
        SortOrder::NearestFirst => "nearest first",
        SortOrder::FarthestFirst => "farthest first",
    };
    let lines = vec![
        Line::from(format!("Signed in as: {who}")),
        Line::from(""),
        Line::from(format!("List ordering: {order}  (press 'o' to flip)")),
        Line::from(""),
        Line::from("Press 'l' to log out."),
    ];
    let widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" settings "));
    f.render_widget(widget, area);
}

pub(super) fn draw_ev_battery(f: &mut Frame, area: Rect, state: &AppState) {
    let form = &state.ev_form;
    let mut lines = vec![
        Line::from(format!(
            "Full-charge range: {}",
            util::format_distance_km(form.full_range_km)
        )),
        Line::from(format!("Battery percent: {}_", form.percent_text)),
        Line::from(""),
    ];
    match form.estimated_range_km() {
        Some(range) => {
            lines.push(Line::from(format!(
                "Estimated range: {}",
                util::format_distance_km(range)
            )));
            let reachable = state
                .display
                .iter()
                .filter(|row| {
                    row.place.coordinate().is_some() && row.location_distance <= range
                })
                .count();
            lines.push(Line::from(format!(
                "Places within range: {reachable} of {}",
                state.display.len()
            )));
        }
        None if !form.percent_text.is_empty() => {
            lines.push(
                Line::from("Enter a percent between 0 and 100.")
                    .style(Style::default().fg(Color::Red)),
            );
        }
        None => {
            lines.push(
                Line::from("Type the current battery percent.")
                    .style(Style::default().fg(Color::DarkGray)),
            );
        }
    }
    let widget =
        Paragraph::new(lines).block(Block::default().borders(Borders::ALL).title(" ev battery "));
    f.render_widget(widget, area);
}
