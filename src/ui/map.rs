//! Map page: the user's places plotted around the last fix on a braille
//! canvas.

use ratatui::layout::Rect;
use ratatui::style::Color;
use ratatui::widgets::canvas::{Canvas, Points};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::state::AppState;

/// Degrees of latitude/longitude shown around the center on each axis.
const VIEW_SPAN_DEG: f64 = 0.5;

pub(super) fn draw(f: &mut Frame, area: Rect, state: &AppState) {
    let block = Block::default().borders(Borders::ALL).title(" map ");
    let Some(center) = state.ctx.location().copied() else {
        let waiting = Paragraph::new("Waiting for a position fix...").block(block);
        f.render_widget(waiting, area);
        return;
    };

    let place_points: Vec<(f64, f64)> = state
        .display
        .iter()
        .filter_map(|row| row.place.coordinate())
        .map(|c| (c.longitude, c.latitude))
        .collect();
    let labels: Vec<(f64, f64, String)> = state
        .display
        .iter()
        .filter_map(|row| {
            row.place
                .coordinate()
                .map(|c| (c.longitude, c.latitude, row.place.name.clone()))
        })
        .collect();

    let canvas = Canvas::default()
        .block(block)
        .x_bounds([center.longitude - VIEW_SPAN_DEG, center.longitude + VIEW_SPAN_DEG])
        .y_bounds([center.latitude - VIEW_SPAN_DEG, center.latitude + VIEW_SPAN_DEG])
        .paint(move |ctx| {
            ctx.draw(&Points {
                coords: &place_points,
                color: Color::Yellow,
            });
            for (x, y, name) in &labels {
                ctx.print(*x, *y, name.clone());
            }
            // Center marker last so it stays visible over dense clusters.
            ctx.print(center.longitude, center.latitude, "@");
        });
    f.render_widget(canvas, area);
}
