//! Event create/edit form: name, start date, and five picker-backed
//! references (venue, headliner artist, organization, manager, gallery).
//! The venue and headliner pickers offer creation rows; choosing one swaps
//! this form out for the corresponding creation form, carrying the current
//! draft so the flow can come back with the new entity preselected.

use std::time::Instant;

use chrono::NaiveDateTime;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::Color,
    widgets::{Clear, Paragraph},
    Frame,
};
use uuid::Uuid;

use crate::api::Filter;
use crate::constants::PICKER_LIST_HEIGHT;
use crate::icons::IconService;
use crate::models::{EventArgs, EventRow};
use crate::search::{artist_source, gallery_source, organization_source, user_source, venue_source};
use crate::search::{EntityKind, SearchHit, SearchResponse};
use crate::ui::core::actions::EventResume;
use crate::ui::core::{Action, DialogType, ReturnTo};
use crate::ui::layout::LayoutManager;
use crate::utils::datetime::{format_ymd, parse_date};

use super::super::picker::{EntityPicker, PickerEvent};
use super::common::{
    create_dialog_block, create_error_line, create_input_paragraph, create_instructions_paragraph,
    create_selection_paragraph, delete_char_before, insert_char, shortcuts, InstructionShortcut,
};

/// Everything the operator has typed or picked in the event form, in the
/// shape it round-trips through a creation detour.
#[derive(Debug, Clone)]
pub struct EventDraft {
    pub existing_id: Option<Uuid>,
    pub name: String,
    pub event_start: String,
    pub venue: Option<SearchHit>,
    pub headliner: Option<SearchHit>,
    pub organization: Option<SearchHit>,
    pub manager: Option<SearchHit>,
    pub gallery: Option<SearchHit>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EventField {
    Name,
    Date,
    Venue,
    Headliner,
    Organization,
    Manager,
    Gallery,
}

pub struct EventForm {
    existing_id: Option<Uuid>,
    name: String,
    event_start: String,
    venue: EntityPicker,
    headliner: EntityPicker,
    organization: EntityPicker,
    manager: EntityPicker,
    gallery: EntityPicker,
    focus: EventField,
    cursor: usize,
    error: Option<String>,
}

impl EventForm {
    pub fn new(existing: Option<EventRow>) -> Self {
        let mut venue = EntityPicker::new(venue_source());
        let mut headliner = EntityPicker::new(artist_source());
        let mut organization = EntityPicker::new(organization_source());
        let mut manager = EntityPicker::new(user_source());
        let mut gallery = EntityPicker::new(gallery_source());
        manager.set_placeholder("Assign a manager");

        let (existing_id, name, event_start) = match existing {
            Some(row) => {
                if let Some(id) = row.venue_id {
                    venue.set_selected_id(id);
                }
                if let Some(id) = row.headliner_artist_id {
                    headliner.set_selected_id(id);
                }
                if let Some(id) = row.organization_id {
                    organization.set_selected_id(id);
                }
                if let Some(id) = row.manager_user_id {
                    manager.set_selected_id(id);
                }
                if let Some(id) = row.gallery_id {
                    gallery.set_selected_id(id);
                }
                let start = row.event_start.as_deref().map(editable_start).unwrap_or_default();
                (Some(row.id), row.name, start)
            }
            None => (None, String::new(), String::new()),
        };
        let cursor = name.chars().count();

        let mut form = Self {
            existing_id,
            name,
            event_start,
            venue,
            headliner,
            organization,
            manager,
            gallery,
            focus: EventField::Name,
            cursor,
            error: None,
        };
        form.sync_headliner_scope();
        form
    }

    /// Rebuild the form from a draft that went through a creation detour,
    /// with the freshly created entity preselected.
    pub fn resume(resume: EventResume) -> Self {
        let EventResume { draft, kind, hit } = resume;
        let mut form = Self::new(None);
        form.existing_id = draft.existing_id;
        form.name = draft.name;
        form.event_start = draft.event_start;
        form.cursor = form.name.chars().count();
        form.venue.set_selected(draft.venue);
        form.headliner.set_selected(draft.headliner);
        form.organization.set_selected(draft.organization);
        form.manager.set_selected(draft.manager);
        form.gallery.set_selected(draft.gallery);

        match kind {
            EntityKind::Venue => form.venue.set_selected(Some(hit)),
            EntityKind::Artist => form.headliner.set_selected(Some(hit)),
            _ => {}
        }
        form.sync_headliner_scope();
        form
    }

    pub fn is_edit(&self) -> bool {
        self.existing_id.is_some()
    }

    fn draft(&self) -> EventDraft {
        EventDraft {
            existing_id: self.existing_id,
            name: self.name.clone(),
            event_start: self.event_start.clone(),
            venue: self.venue.selected().cloned(),
            headliner: self.headliner.selected().cloned(),
            organization: self.organization.selected().cloned(),
            manager: self.manager.selected().cloned(),
            gallery: self.gallery.selected().cloned(),
        }
    }

    pub fn hydration_needs(&self) -> Vec<(EntityKind, Uuid)> {
        let mut needs = Vec::new();
        for picker in [
            &self.venue,
            &self.headliner,
            &self.organization,
            &self.manager,
            &self.gallery,
        ] {
            if let Some(id) = picker.needs_hydration() {
                needs.push((picker.kind(), id));
            }
        }
        needs
    }

    fn open_picker_mut(&mut self) -> Option<&mut EntityPicker> {
        [
            &mut self.venue,
            &mut self.headliner,
            &mut self.organization,
            &mut self.manager,
            &mut self.gallery,
        ]
        .into_iter()
        .find(|p| p.is_open())
    }

    fn picker_for_focus_mut(&mut self) -> Option<&mut EntityPicker> {
        match self.focus {
            EventField::Venue => Some(&mut self.venue),
            EventField::Headliner => Some(&mut self.headliner),
            EventField::Organization => Some(&mut self.organization),
            EventField::Manager => Some(&mut self.manager),
            EventField::Gallery => Some(&mut self.gallery),
            EventField::Name | EventField::Date => None,
        }
    }

    /// Scope the headliner search to the chosen organization's artists.
    fn sync_headliner_scope(&mut self) {
        let filters = match self.organization.selected_id() {
            Some(org_id) => vec![Filter::Eq("organization_id".to_string(), org_id.to_string())],
            None => Vec::new(),
        };
        self.headliner.set_filters(filters);
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if let Some(picker) = self.open_picker_mut() {
            let records = picker.records_recents();
            let kind = picker.kind();
            let event = picker.handle_key(key);
            if kind == EntityKind::Organization {
                self.sync_headliner_scope();
            }
            return match event {
                PickerEvent::Picked(hit) if records => Action::RecordRecent { kind, hit },
                PickerEvent::CreateRequested(_) => self.creation_detour(kind),
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
                if let Some(picker) = self.picker_for_focus_mut() {
                    match picker.open() {
                        PickerEvent::LoadRecents(kind) => Action::RecentsRequested(kind),
                        _ => Action::None,
                    }
                } else {
                    self.cycle_focus(true);
                    Action::None
                }
            }
            KeyCode::Delete => {
                if let Some(picker) = self.picker_for_focus_mut() {
                    picker.clear_selected();
                }
                self.sync_headliner_scope();
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

    /// Swap this form for the creation form of `kind`, carrying the draft.
    fn creation_detour(&self, kind: EntityKind) -> Action {
        let return_to = Some(ReturnTo::EventForm(Box::new(self.draft())));
        match kind {
            EntityKind::Venue => Action::ShowDialog(DialogType::VenueForm {
                existing: None,
                return_to,
            }),
            EntityKind::Artist => Action::ShowDialog(DialogType::ArtistForm {
                existing: None,
                return_to,
            }),
            _ => Action::None,
        }
    }

    fn submit(&mut self) -> Action {
        let name = self.name.trim();
        if name.is_empty() {
            self.error = Some("Name is required".to_string());
            return Action::None;
        }
        let event_start = match normalize_event_start(&self.event_start) {
            Ok(value) => value,
            Err(message) => {
                self.error = Some(message);
                return Action::None;
            }
        };

        let args = EventArgs {
            name: name.to_string(),
            event_start,
            organization_id: self.organization.selected_id(),
            venue_id: self.venue.selected_id(),
            headliner_artist_id: self.headliner.selected_id(),
            manager_user_id: self.manager.selected_id(),
            gallery_id: self.gallery.selected_id(),
        };

        Action::SaveEvent {
            existing: self.existing_id,
            args,
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        const ORDER: [EventField; 7] = [
            EventField::Name,
            EventField::Date,
            EventField::Venue,
            EventField::Headliner,
            EventField::Organization,
            EventField::Manager,
            EventField::Gallery,
        ];
        let index = ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (index + 1) % ORDER.len()
        } else {
            (index + ORDER.len() - 1) % ORDER.len()
        };
        self.focus = ORDER[next];
        self.cursor = self.focused_text().map(|t| t.chars().count()).unwrap_or(0);
    }

    fn focused_text(&self) -> Option<&String> {
        match self.focus {
            EventField::Name => Some(&self.name),
            EventField::Date => Some(&self.event_start),
            _ => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            EventField::Name => Some(&mut self.name),
            EventField::Date => Some(&mut self.event_start),
            _ => None,
        }
    }

    pub fn tick(&mut self, now: Instant) -> Option<Action> {
        for picker in [
            &mut self.venue,
            &mut self.headliner,
            &mut self.organization,
            &mut self.manager,
            &mut self.gallery,
        ] {
            if let Some(request) = picker.poll_debounce(now) {
                return Some(Action::SearchIssued(request));
            }
        }
        None
    }

    pub fn apply_search(&mut self, response: &SearchResponse) {
        // Each picker drops responses for foreign kinds on its own
        self.venue.apply_response(response);
        self.headliner.apply_response(response);
        self.organization.apply_response(response);
        self.manager.apply_response(response);
        self.gallery.apply_response(response);
    }

    pub fn apply_recents(&mut self, kind: EntityKind, hits: Vec<SearchHit>) {
        self.venue.apply_recents(kind, hits.clone());
        self.headliner.apply_recents(kind, hits.clone());
        self.organization.apply_recents(kind, hits.clone());
        self.manager.apply_recents(kind, hits.clone());
        self.gallery.apply_recents(kind, hits);
    }

    pub fn apply_hydrated(&mut self, kind: EntityKind, hit: &SearchHit) {
        self.venue.apply_hydrated(kind, hit);
        self.headliner.apply_hydrated(kind, hit);
        self.organization.apply_hydrated(kind, hit);
        self.manager.apply_hydrated(kind, hit);
        self.gallery.apply_hydrated(kind, hit);
    }

    pub fn render(&self, f: &mut Frame, icons: &IconService) {
        let area = LayoutManager::centered_rect_lines(70, 27, f.area());
        f.render_widget(Clear, area);

        let title = if self.is_edit() {
            format!(" {} Edit Event ", icons.entity(EntityKind::Event))
        } else {
            format!(" {} New Event ", icons.entity(EntityKind::Event))
        };
        let block = create_dialog_block(&title, Color::Yellow);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
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
            create_input_paragraph(&self.name, self.cursor, "Name", self.focus == EventField::Name),
            chunks[0],
        );
        f.render_widget(
            create_input_paragraph(
                &self.event_start,
                self.cursor,
                "Starts (YYYY-MM-DD [HH:MM])",
                self.focus == EventField::Date,
            ),
            chunks[1],
        );

        let picker_fields = [
            (&self.venue, "Venue", EventField::Venue, 2usize),
            (&self.headliner, "Headliner", EventField::Headliner, 3),
            (&self.organization, "Organization", EventField::Organization, 4),
            (&self.manager, "Manager", EventField::Manager, 5),
            (&self.gallery, "Gallery", EventField::Gallery, 6),
        ];
        for (picker, label, field, chunk) in picker_fields {
            f.render_widget(
                create_selection_paragraph(picker.trigger_label(), label, self.focus == field),
                chunks[chunk],
            );
        }

        if let Some(error) = &self.error {
            f.render_widget(Paragraph::new(create_error_line(error)), chunks[7]);
        }

        let instructions: Vec<InstructionShortcut> = vec![
            shortcuts::ENTER_SAVE,
            shortcuts::SEPARATOR,
            shortcuts::ENTER_OPEN,
            shortcuts::SEPARATOR,
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ];
        f.render_widget(create_instructions_paragraph(&instructions), chunks[9]);

        let open = [
            (&self.venue, 2usize),
            (&self.headliner, 3),
            (&self.organization, 4),
            (&self.manager, 5),
            (&self.gallery, 6),
        ]
        .into_iter()
        .find(|(p, _)| p.is_open());
        if let Some((picker, chunk)) = open {
            let popover = Rect {
                x: inner.x + 1,
                y: chunks[chunk].y,
                width: inner.width.saturating_sub(2),
                height: 3 + PICKER_LIST_HEIGHT,
            }
            .intersection(f.area());
            picker.render(f, popover, icons);
        }
    }
}

/// Parse the editable date field into the stored timestamp format.
/// Blank means no start set; a bare date gets a midnight time.
fn normalize_event_start(input: &str) -> Result<Option<String>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M") {
        return Ok(Some(dt.format("%Y-%m-%dT%H:%M:%S").to_string()));
    }
    if let Ok(date) = parse_date(trimmed) {
        return Ok(Some(format!("{}T00:00:00", format_ymd(date))));
    }
    Err("Starts must be YYYY-MM-DD or YYYY-MM-DD HH:MM".to_string())
}

/// Turn a stored timestamp back into the editable field format.
fn editable_start(stored: &str) -> String {
    if let Ok(dt) = chrono::DateTime::parse_from_rfc3339(stored) {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(stored, "%Y-%m-%dT%H:%M:%S") {
        return dt.format("%Y-%m-%d %H:%M").to_string();
    }
    stored.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_start_is_absent() {
        assert_eq!(normalize_event_start("   "), Ok(None));
    }

    #[test]
    fn test_date_only_gets_midnight() {
        assert_eq!(
            normalize_event_start("2026-09-01"),
            Ok(Some("2026-09-01T00:00:00".to_string()))
        );
    }

    #[test]
    fn test_date_with_time_is_kept() {
        assert_eq!(
            normalize_event_start("2026-09-01 19:30"),
            Ok(Some("2026-09-01T19:30:00".to_string()))
        );
    }

    #[test]
    fn test_garbage_start_is_rejected() {
        assert!(normalize_event_start("next friday").is_err());
    }

    #[test]
    fn test_stored_timestamps_become_editable() {
        assert_eq!(editable_start("2026-09-01T19:30:00"), "2026-09-01 19:30");
        assert_eq!(editable_start("2026-09-01T19:30:00+02:00"), "2026-09-01 19:30");
        assert_eq!(editable_start("soon"), "soon");
    }

    #[test]
    fn test_stored_gallery_is_hydrated_and_kept_on_save() {
        let gallery_id = Uuid::new_v4();
        let row = EventRow {
            id: Uuid::new_v4(),
            name: "Harvest Nights".to_string(),
            status: "draft".to_string(),
            event_start: None,
            organization_id: None,
            venue_id: None,
            headliner_artist_id: None,
            manager_user_id: None,
            gallery_id: Some(gallery_id),
            promo_image_url: None,
        };
        let mut form = EventForm::new(Some(row));
        assert!(form.hydration_needs().contains(&(EntityKind::Gallery, gallery_id)));

        form.apply_hydrated(EntityKind::Gallery, &SearchHit::new(gallery_id, "Harvest Nights Photos"));
        assert!(form.hydration_needs().is_empty());

        match form.submit() {
            Action::SaveEvent { args, .. } => assert_eq!(args.gallery_id, Some(gallery_id)),
            other => panic!("expected a save, got {:?}", other),
        }
    }

    #[test]
    fn test_organization_choice_scopes_the_headliner_search() {
        let mut form = EventForm::new(None);
        let org = SearchHit::new(Uuid::new_v4(), "Bright Lights Collective");
        form.organization.set_selected(Some(org.clone()));
        form.sync_headliner_scope();

        let base = Instant::now();
        form.headliner.open();
        form.headliner
            .handle_key_at(KeyEvent::new(KeyCode::Char('a'), KeyModifiers::NONE), base);
        let request = form
            .headliner
            .poll_debounce(base + std::time::Duration::from_millis(300))
            .unwrap();
        assert_eq!(
            request.extra,
            vec![Filter::Eq("organization_id".to_string(), org.id.to_string())]
        );

        form.organization.clear_selected();
        form.sync_headliner_scope();
        form.headliner
            .handle_key_at(KeyEvent::new(KeyCode::Char('b'), KeyModifiers::NONE), base);
        let request = form
            .headliner
            .poll_debounce(base + std::time::Duration::from_millis(600))
            .unwrap();
        assert!(request.extra.is_empty());
    }
}
