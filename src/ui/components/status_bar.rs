//! Status bar component

use ratatui::{
    layout::Alignment,
    style::{Color, Style},
    widgets::{Block, Paragraph},
    Frame,
};

/// One line at the bottom: background activity when there is some,
/// otherwise the key hints.
pub struct StatusBar;

impl StatusBar {
    pub fn render(f: &mut Frame, area: ratatui::layout::Rect, loading: bool, background_tasks: usize, generating: bool) {
        let status_text = if loading {
            "Loading...".to_string()
        } else if generating {
            "🔄 Generating mock orders...".to_string()
        } else if background_tasks > 0 {
            format!("🔄 Working ({} background tasks)...", background_tasks)
        } else {
            "J/K: section • j/k: rows • Enter: edit • A: new • D: delete • r: reload • ?: help • q: quit".to_string()
        };

        let status_color = if loading || generating || background_tasks > 0 {
            Color::Yellow
        } else {
            Color::Gray
        };

        let status_bar = Paragraph::new(status_text)
            .block(Block::default())
            .alignment(Alignment::Center)
            .style(Style::default().fg(status_color));

        f.render_widget(status_bar, area);
    }
}
