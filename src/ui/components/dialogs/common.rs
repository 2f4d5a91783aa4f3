use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Paragraph},
};

/// Creates a styled main dialog block
pub fn create_dialog_block<'a>(title: &'a str, theme_color: Color) -> Block<'a> {
    Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(title)
        .title_style(Style::default().fg(theme_color).add_modifier(Modifier::BOLD))
        .style(Style::default().fg(theme_color))
}

/// Creates an input field block with a visual cursor at the caret position.
/// The cursor only appears on the focused field.
pub fn create_input_paragraph<'a>(
    input_buffer: &'a str,
    cursor_position: usize,
    field_title: &str,
    focused: bool,
) -> Paragraph<'a> {
    let line = if focused {
        let byte_index: usize = input_buffer.chars().take(cursor_position).map(|c| c.len_utf8()).sum();
        let (before, after) = input_buffer.split_at(byte_index);
        Line::from(vec![
            Span::raw(before),
            Span::styled("█", Style::default().fg(Color::White)),
            Span::raw(after),
        ])
    } else {
        Line::from(input_buffer)
    };

    let border_color = if focused { Color::Cyan } else { Color::Gray };
    let input_block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", field_title))
        .title_style(Style::default().fg(Color::White))
        .style(Style::default().fg(border_color));

    Paragraph::new(line)
        .block(input_block)
        .style(Style::default().fg(Color::White))
}

/// Creates a selection field block (read-only display with title)
pub fn create_selection_paragraph(value: String, field_title: &str, focused: bool) -> Paragraph<'static> {
    let border_color = if focused { Color::Cyan } else { Color::Gray };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .title(format!(" {} ", field_title))
        .title_style(Style::default().fg(Color::White))
        .style(Style::default().fg(border_color));

    Paragraph::new(value).block(block).style(Style::default().fg(Color::White))
}

/// Creates a red line for a field validation message shown after an
/// attempted submit.
pub fn create_error_line(message: &str) -> Line<'_> {
    Line::from(Span::styled(
        format!("  ⚠ {}", message),
        Style::default().fg(Color::Red),
    ))
}

/// Insert `c` at the caret. The caret counts characters, not bytes.
pub fn insert_char(buffer: &mut String, cursor_position: &mut usize, c: char) {
    let byte_index: usize = buffer.chars().take(*cursor_position).map(|ch| ch.len_utf8()).sum();
    buffer.insert(byte_index, c);
    *cursor_position += 1;
}

/// Remove the character before the caret, if any.
pub fn delete_char_before(buffer: &mut String, cursor_position: &mut usize) {
    if *cursor_position == 0 {
        return;
    }
    let byte_index: usize = buffer
        .chars()
        .take(*cursor_position - 1)
        .map(|ch| ch.len_utf8())
        .sum();
    buffer.remove(byte_index);
    *cursor_position -= 1;
}

/// Trimmed content of a free-text field, `None` when blank.
pub fn none_if_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Instruction shortcut definition: (key, color, description)
pub type InstructionShortcut = (&'static str, Color, &'static str);

/// Creates a paragraph with color-coded instruction shortcuts
pub fn create_instructions_paragraph<'a>(instructions: &[InstructionShortcut]) -> Paragraph<'a> {
    let mut instruction_text = Vec::new();
    for (key, color, desc) in instructions {
        instruction_text.push(Span::styled(
            *key,
            Style::default().fg(*color).add_modifier(Modifier::BOLD),
        ));
        instruction_text.push(Span::styled(*desc, Style::default().fg(Color::Gray)));
    }

    Paragraph::new(Line::from(instruction_text)).alignment(Alignment::Center)
}

/// Common instruction shortcuts used across dialogs
pub mod shortcuts {
    use super::*;

    pub const SEPARATOR: InstructionShortcut = (" • ", Color::Gray, "");
    pub const ESC_CANCEL: InstructionShortcut = ("Esc", Color::Red, " Cancel");
    pub const TAB_NEXT: InstructionShortcut = ("Tab", Color::Cyan, " Next field");
    pub const ENTER_SAVE: InstructionShortcut = ("Ctrl+S", Color::Green, " Save");
    pub const ENTER_OPEN: InstructionShortcut = ("Enter", Color::Cyan, " Open picker");
}
