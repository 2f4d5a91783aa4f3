//! Venue create/edit form. The city field holds a plain name; the picker
//! over the cities table is a convenience that writes its selection's label
//! into the field.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    widgets::{Clear, Paragraph},
    Frame,
};

use crate::constants::PICKER_LIST_HEIGHT;
use crate::icons::IconService;
use crate::models::{VenueArgs, VenueRow};
use crate::search::{city_source, EntityKind, SearchHit, SearchResponse};
use crate::ui::core::{Action, ReturnTo};
use crate::ui::layout::LayoutManager;

use super::super::picker::{EntityPicker, PickerEvent};
use super::common::{
    create_dialog_block, create_error_line, create_input_paragraph, create_instructions_paragraph, delete_char_before,
    insert_char, none_if_blank, shortcuts, InstructionShortcut,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum VenueField {
    Name,
    Address,
    City,
}

pub struct VenueForm {
    existing: Option<VenueRow>,
    return_to: Option<ReturnTo>,
    name: String,
    address: String,
    city: String,
    city_picker: EntityPicker,
    focus: VenueField,
    cursor: usize,
    error: Option<String>,
}

impl VenueForm {
    pub fn new(existing: Option<VenueRow>, return_to: Option<ReturnTo>) -> Self {
        let (name, address, city) = match &existing {
            Some(row) => (
                row.name.clone(),
                row.address.clone().unwrap_or_default(),
                row.city.clone().unwrap_or_default(),
            ),
            None => (String::new(), String::new(), String::new()),
        };
        let cursor = name.chars().count();

        Self {
            existing,
            return_to,
            name,
            address,
            city,
            city_picker: EntityPicker::new(city_source()),
            focus: VenueField::Name,
            cursor,
            error: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.existing.is_some()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.city_picker.is_open() {
            if let PickerEvent::Picked(hit) = self.city_picker.handle_key(key) {
                self.city = hit.label;
                self.cursor = self.city.chars().count();
            }
            return Action::None;
        }

        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return self.submit();
        }

        match key.code {
            KeyCode::Esc => Action::HideDialog,
            KeyCode::Tab | KeyCode::Down => {
                self.cycle_focus(true);
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.cycle_focus(false);
                Action::None
            }
            KeyCode::Enter => {
                if self.focus == VenueField::City {
                    match self.city_picker.open() {
                        PickerEvent::LoadRecents(kind) => Action::RecentsRequested(kind),
                        _ => Action::None,
                    }
                } else {
                    self.cycle_focus(true);
                    Action::None
                }
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Action::None
            }
            KeyCode::Right => {
                if self.cursor < self.focused_text().chars().count() {
                    self.cursor += 1;
                }
                Action::None
            }
            KeyCode::Backspace => {
                let mut cursor = self.cursor;
                delete_char_before(self.focused_text_mut(), &mut cursor);
                self.cursor = cursor;
                Action::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut cursor = self.cursor;
                insert_char(self.focused_text_mut(), &mut cursor, c);
                self.cursor = cursor;
                Action::None
            }
            _ => Action::None,
        }
    }

    fn submit(&mut self) -> Action {
        let name = self.name.trim();
        if name.is_empty() {
            self.error = Some("Name is required".to_string());
            return Action::None;
        }

        let args = VenueArgs {
            name: name.to_string(),
            address: none_if_blank(&self.address),
            city: none_if_blank(&self.city),
        };

        Action::SaveVenue {
            existing: self.existing.as_ref().map(|row| row.id),
            args,
            return_to: self.return_to.clone(),
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        self.focus = match (self.focus, forward) {
            (VenueField::Name, true) => VenueField::Address,
            (VenueField::Address, true) => VenueField::City,
            (VenueField::City, true) => VenueField::Name,
            (VenueField::Name, false) => VenueField::City,
            (VenueField::Address, false) => VenueField::Name,
            (VenueField::City, false) => VenueField::Address,
        };
        self.cursor = self.focused_text().chars().count();
    }

    fn focused_text(&self) -> &String {
        match self.focus {
            VenueField::Name => &self.name,
            VenueField::Address => &self.address,
            VenueField::City => &self.city,
        }
    }

    fn focused_text_mut(&mut self) -> &mut String {
        match self.focus {
            VenueField::Name => &mut self.name,
            VenueField::Address => &mut self.address,
            VenueField::City => &mut self.city,
        }
    }

    pub fn tick(&mut self, now: Instant) -> Option<Action> {
        self.city_picker.poll_debounce(now).map(Action::SearchIssued)
    }

    pub fn apply_search(&mut self, response: &SearchResponse) {
        self.city_picker.apply_response(response);
    }

    pub fn apply_recents(&mut self, kind: EntityKind, hits: Vec<SearchHit>) {
        self.city_picker.apply_recents(kind, hits);
    }

    pub fn render(&self, f: &mut Frame, icons: &IconService) {
        let area = LayoutManager::centered_rect_lines(60, 15, f.area());
        f.render_widget(Clear, area);

        let title = if self.is_edit() {
            format!(" {} Edit Venue ", icons.entity(EntityKind::Venue))
        } else {
            format!(" {} New Venue ", icons.entity(EntityKind::Venue))
        };
        let block = create_dialog_block(&title, Color::Blue);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        f.render_widget(
            create_input_paragraph(&self.name, self.cursor, "Name", self.focus == VenueField::Name),
            chunks[0],
        );
        f.render_widget(
            create_input_paragraph(&self.address, self.cursor, "Address", self.focus == VenueField::Address),
            chunks[1],
        );

        f.render_widget(
            create_input_paragraph(
                &self.city,
                self.cursor,
                "City (Enter to search)",
                self.focus == VenueField::City,
            ),
            chunks[2],
        );

        if let Some(error) = &self.error {
            f.render_widget(Paragraph::new(create_error_line(error)), chunks[3]);
        }

        let instructions: Vec<InstructionShortcut> = vec![
            shortcuts::ENTER_SAVE,
            shortcuts::SEPARATOR,
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ];
        f.render_widget(create_instructions_paragraph(&instructions), chunks[5]);

        if self.city_picker.is_open() {
            let popover = Rect {
                x: inner.x + 1,
                y: chunks[2].y,
                width: inner.width.saturating_sub(2),
                height: 3 + PICKER_LIST_HEIGHT,
            }
            .intersection(f.area());
            self.city_picker.render(f, popover, icons);
        }
    }
}
