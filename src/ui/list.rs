//! Reminder list page.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, List, ListItem};
use ratatui::Frame;

use crate::state::{AppState, DisplayPlace, SortOrder};
use crate::util;

pub(super) fn draw(f: &mut Frame, area: Rect, state: &mut AppState) {
    let order = match state.order {
        SortOrder::NearestFirst => "nearest first",
        SortOrder::FarthestFirst => "farthest first",
    };
    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" places · {order} "));

    if state.display.is_empty() {
        let empty = ratatui::widgets::Paragraph::new("No places yet. Press 'a' to add one.")
            .style(Style::default().fg(Color::DarkGray))
            .block(block);
        f.render_widget(empty, area);
        return;
    }

    let name_width = usize::from(area.width.saturating_sub(24)).max(8);
    let items: Vec<ListItem> = state
        .display
        .iter()
        .map(|row| ListItem::new(render_row(row, name_width)))
        .collect();
    let list = List::new(items)
        .block(block)
        .highlight_style(Style::default().add_modifier(Modifier::REVERSED))
        .highlight_symbol("> ");
    f.render_stateful_widget(list, area, &mut state.list);
}

/// One list row: toggle marker, name, distance and any reminder date.
fn render_row(row: &DisplayPlace, name_width: usize) -> Line<'static> {
    let marker = if row.place.is_disable { "[ ]" } else { "[x]" };
    let marker_style = if row.place.is_disable {
        Style::default().fg(Color::DarkGray)
    } else {
        Style::default().fg(Color::Green)
    };
    let mut spans = vec![
        Span::styled(marker.to_string(), marker_style),
        Span::raw(" "),
        Span::raw(format!(
            "{:<width$}",
            util::truncate_to_width(&row.place.name, name_width),
            width = name_width
        )),
        Span::styled(
            format!(" {:>9}", util::format_distance_km(row.location_distance)),
            Style::default().fg(Color::Cyan),
        ),
    ];
    if let Some(date) = &row.display_date {
        spans.push(Span::styled(
            format!("  {date}"),
            Style::default().fg(Color::DarkGray),
        ));
    }
    Line::from(spans)
}
