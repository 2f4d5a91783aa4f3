use crate::constants::DIALOG_TITLE_LOGS;
use crate::icons::IconService;
use crate::logger::Logger;
use crate::ui::core::AdminSection;
use crate::ui::layout::LayoutManager;
use ratatui::{
    layout::{Alignment, Constraint, Layout, Margin, Rect},
    style::{Color, Style},
    widgets::{Block, Borders, Clear, Paragraph, Scrollbar, ScrollbarOrientation, Wrap},
    Frame,
};

use super::scroll_behavior::ScrollState;

const HELP_TEXT: &str = r"
USHER - Box Office Console
==========================

NAVIGATION
----------
j/k         Move through rows (down/up)
J/K         Switch section (down/up)
Enter       Edit the selected row
Esc         Close the open dialog

SECTIONS
--------
A           New entry in the current section
E           Edit the selected entry
D           Delete the selected entry (with confirmation)
r           Reload the current section from the server

EVENTS ONLY
-----------
p           New promo code for the selected event
m           Mock order generation panel
o           Count a click and show the public page path

PICKER FIELDS
-------------
Enter       Open the picker on a searchable field
Type to search; an empty query lists recent picks
Up/Down     Move through results
Enter       Take the highlighted row
The bottom row creates a new entry from what you typed
Esc         Close the picker, keep the field as it was

GENERAL CONTROLS
----------------
?           Toggle this help panel
h           Toggle this help panel
G           Open the log viewer
i           Change icon theme
q           Quit application
Ctrl+C      Quit application

SCROLLING (help and logs)
-------------------------
j/k         Scroll down/up
Up/Down     Scroll up/down
PageUp/Down Page through the content
Home        Jump to the top
End         Jump to the bottom

Press 'Esc', '?' or 'h' to close this help panel
";

pub fn render_delete_confirmation_dialog(
    f: &mut Frame,
    area: Rect,
    icons: &IconService,
    section: AdminSection,
    name: &str,
) {
    let dialog_area = LayoutManager::centered_rect_lines(50, 6, area);
    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!("{} Confirm Delete", icons.warning()))
        .style(Style::default().fg(Color::Red));
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let [message_area, hint_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let message = Paragraph::new(format!("Delete {} '{}'?", section.singular(), name))
        .style(Style::default().fg(Color::White))
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true });
    let hint = Paragraph::new("y / Enter to confirm • n / Esc to cancel")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(message, message_area);
    f.render_widget(hint, hint_area);
}

pub fn render_info_dialog(f: &mut Frame, area: Rect, icons: &IconService, message: &str, scroll: &mut ScrollState) {
    render_message_dialog(
        f,
        &format!("{} Info", icons.info()),
        Color::Blue,
        message,
        scroll,
        LayoutManager::centered_rect_lines(60, 10, area),
    );
}

pub fn render_error_dialog(f: &mut Frame, area: Rect, icons: &IconService, message: &str, scroll: &mut ScrollState) {
    render_message_dialog(
        f,
        &format!("{} Error", icons.error()),
        Color::Red,
        message,
        scroll,
        LayoutManager::centered_rect_lines(70, 12, area),
    );
}

fn render_message_dialog(
    f: &mut Frame,
    title: &str,
    color: Color,
    message: &str,
    scroll: &mut ScrollState,
    dialog_area: Rect,
) {
    f.render_widget(Clear, dialog_area);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(title.to_string())
        .style(Style::default().fg(color));
    let inner = block.inner(dialog_area);
    f.render_widget(block, dialog_area);

    let [content_area, hint_area] = Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(inner);

    let lines: Vec<&str> = message.lines().collect();
    let visible = content_area.height as usize;
    let text = if lines.len() > visible {
        scroll.clamp(lines.len(), visible);
        window(&lines, scroll.offset, visible)
    } else {
        message.to_string()
    };

    let body = Paragraph::new(text)
        .style(Style::default().fg(Color::White))
        .wrap(Wrap { trim: true });
    let hint = Paragraph::new("Press any key to continue • j/k to scroll if needed")
        .style(Style::default().fg(Color::Gray))
        .alignment(Alignment::Center);

    f.render_widget(body, content_area);
    f.render_widget(hint, hint_area);

    if lines.len() > visible {
        f.render_stateful_widget(dialog_scrollbar(), content_area, &mut scroll.bar);
    }
}

pub fn render_help_dialog(f: &mut Frame, area: Rect, scroll: &mut ScrollState) {
    render_scrolled_panel(f, area, "📖 Help", HELP_TEXT, scroll);
}

pub fn render_logs_dialog(f: &mut Frame, area: Rect, logger: &Logger, scroll: &mut ScrollState) {
    let logs = logger.get_logs();
    let content = if logs.is_empty() {
        "No logs recorded yet".to_string()
    } else {
        logs.join("\n")
    };
    render_scrolled_panel(f, area, DIALOG_TITLE_LOGS, &content, scroll);
}

/// Full-screen panel with a border, a centered title, and j/k scrolling.
fn render_scrolled_panel(f: &mut Frame, area: Rect, title: &str, content: &str, scroll: &mut ScrollState) {
    let popup = LayoutManager::centered_rect(90, 90, area);
    f.render_widget(Clear, popup);

    let panel = popup.inner(Margin {
        horizontal: 2,
        vertical: 1,
    });
    let lines: Vec<&str> = content.lines().collect();
    let visible = panel.height.saturating_sub(2) as usize;

    scroll.clamp(lines.len(), visible);
    let text = window(&lines, scroll.offset, visible);

    let paragraph = Paragraph::new(text)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(title.to_string())
                .title_alignment(Alignment::Center),
        )
        .style(Style::default().fg(Color::White));

    f.render_widget(paragraph, panel);
    if lines.len() > visible {
        f.render_stateful_widget(dialog_scrollbar(), panel, &mut scroll.bar);
    }
}

fn window(lines: &[&str], offset: usize, visible: usize) -> String {
    lines.iter().skip(offset).take(visible).copied().collect::<Vec<_>>().join("\n")
}

fn dialog_scrollbar() -> Scrollbar<'static> {
    Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(Some("↑"))
        .end_symbol(Some("↓"))
        .track_symbol(Some("│"))
        .thumb_symbol("▐")
        .style(Style::default().fg(Color::Gray))
        .thumb_style(Style::default().fg(Color::White))
}
