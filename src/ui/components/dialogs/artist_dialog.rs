//! Artist create/edit form: name, bio, an optional image to attach, and the
//! owning organization picked from a search popover.

use std::path::PathBuf;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    widgets::{Clear, Paragraph},
    Frame,
};
use uuid::Uuid;

use crate::constants::PICKER_LIST_HEIGHT;
use crate::icons::IconService;
use crate::media;
use crate::models::{ArtistArgs, ArtistRow};
use crate::search::{organization_source, EntityKind, SearchHit, SearchResponse};
use crate::ui::core::{Action, ReturnTo};
use crate::ui::layout::LayoutManager;

use super::super::picker::{EntityPicker, PickerEvent};
use super::common::{
    create_dialog_block, create_error_line, create_input_paragraph, create_instructions_paragraph,
    create_selection_paragraph, delete_char_before, insert_char, none_if_blank, shortcuts, InstructionShortcut,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ArtistField {
    Name,
    Bio,
    ImagePath,
    Organization,
}

pub struct ArtistForm {
    existing: Option<ArtistRow>,
    return_to: Option<ReturnTo>,
    name: String,
    bio: String,
    image_path: String,
    organization: EntityPicker,
    focus: ArtistField,
    cursor: usize,
    error: Option<String>,
}

impl ArtistForm {
    pub fn new(existing: Option<ArtistRow>, return_to: Option<ReturnTo>) -> Self {
        let mut organization = EntityPicker::new(organization_source());
        let (name, bio) = match &existing {
            Some(row) => {
                if let Some(org_id) = row.organization_id {
                    organization.set_selected_id(org_id);
                }
                (row.name.clone(), row.bio.clone().unwrap_or_default())
            }
            None => (String::new(), String::new()),
        };
        let cursor = name.chars().count();

        Self {
            existing,
            return_to,
            name,
            bio,
            image_path: String::new(),
            organization,
            focus: ArtistField::Name,
            cursor,
            error: None,
        }
    }

    pub fn is_edit(&self) -> bool {
        self.existing.is_some()
    }

    /// Ids whose labels still need resolving, for the app to hydrate.
    pub fn hydration_needs(&self) -> Vec<(EntityKind, Uuid)> {
        self.organization
            .needs_hydration()
            .map(|id| (EntityKind::Organization, id))
            .into_iter()
            .collect()
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if self.organization.is_open() {
            return match self.organization.handle_key(key) {
                PickerEvent::Picked(hit) if self.organization.records_recents() => Action::RecordRecent {
                    kind: EntityKind::Organization,
                    hit,
                },
                _ => Action::None,
            };
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
                if self.focus == ArtistField::Organization {
                    match self.organization.open() {
                        PickerEvent::LoadRecents(kind) => Action::RecentsRequested(kind),
                        _ => Action::None,
                    }
                } else {
                    self.cycle_focus(true);
                    Action::None
                }
            }
            KeyCode::Delete if self.focus == ArtistField::Organization => {
                self.organization.clear_selected();
                Action::None
            }
            KeyCode::Left => {
                self.cursor = self.cursor.saturating_sub(1);
                Action::None
            }
            KeyCode::Right => {
                if let Some(text) = self.focused_text() {
                    if self.cursor < text.chars().count() {
                        self.cursor += 1;
                    }
                }
                Action::None
            }
            KeyCode::Backspace => {
                let mut cursor = self.cursor;
                if let Some(text) = self.focused_text_mut() {
                    delete_char_before(text, &mut cursor);
                }
                self.cursor = cursor;
                Action::None
            }
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                let mut cursor = self.cursor;
                if let Some(text) = self.focused_text_mut() {
                    insert_char(text, &mut cursor, c);
                }
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

        let image_path = none_if_blank(&self.image_path).map(PathBuf::from);
        if let Some(ref path) = image_path {
            if let Err(e) = media::validate_file(path) {
                self.error = Some(e.to_string());
                return Action::None;
            }
        }
        let args = ArtistArgs {
            name: name.to_string(),
            bio: none_if_blank(&self.bio),
            image_url: self.existing.as_ref().and_then(|row| row.image_url.clone()),
            organization_id: self.organization.selected_id(),
        };

        Action::SaveArtist {
            existing: self.existing.as_ref().map(|row| row.id),
            args,
            image_path,
            return_to: self.return_to.clone(),
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        self.focus = match (self.focus, forward) {
            (ArtistField::Name, true) => ArtistField::Bio,
            (ArtistField::Bio, true) => ArtistField::ImagePath,
            (ArtistField::ImagePath, true) => ArtistField::Organization,
            (ArtistField::Organization, true) => ArtistField::Name,
            (ArtistField::Name, false) => ArtistField::Organization,
            (ArtistField::Bio, false) => ArtistField::Name,
            (ArtistField::ImagePath, false) => ArtistField::Bio,
            (ArtistField::Organization, false) => ArtistField::ImagePath,
        };
        self.cursor = self.focused_text().map(|t| t.chars().count()).unwrap_or(0);
    }

    fn focused_text(&self) -> Option<&String> {
        match self.focus {
            ArtistField::Name => Some(&self.name),
            ArtistField::Bio => Some(&self.bio),
            ArtistField::ImagePath => Some(&self.image_path),
            ArtistField::Organization => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            ArtistField::Name => Some(&mut self.name),
            ArtistField::Bio => Some(&mut self.bio),
            ArtistField::ImagePath => Some(&mut self.image_path),
            ArtistField::Organization => None,
        }
    }

    pub fn tick(&mut self, now: Instant) -> Option<Action> {
        self.organization.poll_debounce(now).map(Action::SearchIssued)
    }

    pub fn apply_search(&mut self, response: &SearchResponse) {
        self.organization.apply_response(response);
    }

    pub fn apply_recents(&mut self, kind: EntityKind, hits: Vec<SearchHit>) {
        self.organization.apply_recents(kind, hits);
    }

    pub fn apply_hydrated(&mut self, kind: EntityKind, hit: &SearchHit) {
        self.organization.apply_hydrated(kind, hit);
    }

    pub fn render(&self, f: &mut Frame, icons: &IconService) {
        let area = LayoutManager::centered_rect_lines(60, 18, f.area());
        f.render_widget(Clear, area);

        let title = if self.is_edit() {
            format!(" {} Edit Artist ", icons.entity(EntityKind::Artist))
        } else {
            format!(" {} New Artist ", icons.entity(EntityKind::Artist))
        };
        let block = create_dialog_block(&title, Color::Magenta);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(1),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        f.render_widget(
            create_input_paragraph(&self.name, self.cursor, "Name", self.focus == ArtistField::Name),
            chunks[0],
        );
        f.render_widget(
            create_input_paragraph(&self.bio, self.cursor, "Bio", self.focus == ArtistField::Bio),
            chunks[1],
        );
        f.render_widget(
            create_input_paragraph(
                &self.image_path,
                self.cursor,
                "Image file (optional)",
                self.focus == ArtistField::ImagePath,
            ),
            chunks[2],
        );
        f.render_widget(
            create_selection_paragraph(
                self.organization.trigger_label(),
                "Organization",
                self.focus == ArtistField::Organization,
            ),
            chunks[3],
        );

        if let Some(error) = &self.error {
            f.render_widget(Paragraph::new(create_error_line(error)), chunks[4]);
        }

        let instructions: Vec<InstructionShortcut> = vec![
            shortcuts::ENTER_SAVE,
            shortcuts::SEPARATOR,
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ];
        f.render_widget(create_instructions_paragraph(&instructions), chunks[6]);

        if self.organization.is_open() {
            let popover = Rect {
                x: inner.x + 1,
                y: chunks[3].y,
                width: inner.width.saturating_sub(2),
                height: 3 + PICKER_LIST_HEIGHT,
            }
            .intersection(f.area());
            self.organization.render(f, popover, icons);
        }
    }
}
