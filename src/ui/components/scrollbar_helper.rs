//! Scrollbar strip for the roster list.
//!
//! The strip only appears once rows overflow the bordered viewport, and it
//! sits inside the border so the frame stays intact.

use ratatui::{
    layout::Rect,
    style::{Color, Style},
    widgets::{Scrollbar, ScrollbarOrientation, ScrollbarState},
    Frame,
};

#[derive(Default)]
pub struct ScrollbarHelper {
    state: ScrollbarState,
}

impl ScrollbarHelper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Reserve a one column strip inside the right border when `total_rows`
    /// cannot fit. Returns the list area and the strip, if any.
    pub fn calculate_areas(rect: Rect, total_rows: usize) -> (Rect, Option<Rect>) {
        let viewport_rows = rect.height.saturating_sub(2) as usize;
        if total_rows <= viewport_rows {
            return (rect, None);
        }

        let list = Rect::new(rect.x, rect.y, rect.width.saturating_sub(1), rect.height);
        let strip = Rect::new(
            rect.right().saturating_sub(1),
            rect.y + 1,
            1,
            rect.height.saturating_sub(2),
        );
        (list, Some(strip))
    }

    pub fn update_state(&mut self, total_rows: usize, position: usize, viewport_rows: usize) {
        self.state = self
            .state
            .content_length(total_rows)
            .position(position)
            .viewport_content_length(viewport_rows);
    }

    pub fn render(&mut self, f: &mut Frame, strip: Option<Rect>) {
        let Some(area) = strip else { return };
        let bar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
            .begin_symbol(Some("↑"))
            .end_symbol(Some("↓"))
            .track_symbol(Some("│"))
            .thumb_symbol("█")
            .style(Style::default().fg(Color::DarkGray))
            .thumb_style(Style::default().fg(Color::DarkGray));
        f.render_stateful_widget(bar, area, &mut self.state);
    }
}
