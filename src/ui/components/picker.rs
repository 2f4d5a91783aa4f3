//! The entity picker: one widget, many search sources.
//!
//! A picker is a trigger that shows the current selection and, when opened,
//! a popover with a query input and a result list. Keystrokes arm a quiet
//! period timer polled from the app tick; only a timer that survives the
//! window issues a search. Every issued search carries a per-picker sequence
//! number and only a response matching the latest issued number is applied,
//! so a slow early response can never overwrite a later query's results.

use std::sync::Arc;
use std::time::{Duration, Instant};

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Clear, List, ListItem, ListState},
    Frame,
};
use uuid::Uuid;

use crate::api::Filter;
use crate::constants::{NO_RESULTS, RECENT_HEADER, SEARCHING, SEARCH_DEBOUNCE_MS};
use crate::icons::IconService;
use crate::search::{EntityKind, SearchHit, SearchRequest, SearchResponse, SearchSource};

use super::dialogs::common::create_input_paragraph;

/// What a key press or state change asks the host dialog to do.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerEvent {
    None,
    /// Load the remembered selections for the popover's empty-query state.
    LoadRecents(EntityKind),
    /// The operator confirmed this option.
    Picked(SearchHit),
    /// The operator chose the creation row; the string is the trimmed query
    /// they had typed. The picker has already closed and reset itself.
    CreateRequested(String),
    /// The popover closed without changing the selection.
    Dismissed,
}

/// One line of the popover list.
#[derive(Debug, Clone)]
enum PickerRow {
    Header(&'static str),
    Hit(SearchHit),
    Create(&'static str),
    Notice(&'static str),
}

impl PickerRow {
    fn selectable(&self) -> bool {
        matches!(self, PickerRow::Hit(_) | PickerRow::Create(_))
    }
}

pub struct EntityPicker {
    source: Arc<dyn SearchSource>,
    extra: Vec<Filter>,
    placeholder: Option<&'static str>,
    selected: Option<SearchHit>,
    open: bool,
    query: String,
    cursor_position: usize,
    /// Armed by the latest edit; a search goes out once it is older than
    /// the debounce window.
    pending_since: Option<Instant>,
    next_seq: u64,
    /// Sequence number of the latest issued search. `None` means any
    /// response still in flight is unwanted.
    issued_seq: Option<u64>,
    searching: bool,
    hits: Vec<SearchHit>,
    /// Whether a response for the current query generation has landed.
    /// Distinguishes "no results" from "nothing searched yet".
    has_results: bool,
    recents: Vec<SearchHit>,
    rows: Vec<PickerRow>,
    list_index: usize,
}

impl EntityPicker {
    pub fn new(source: Arc<dyn SearchSource>) -> Self {
        Self {
            source,
            extra: Vec::new(),
            placeholder: None,
            selected: None,
            open: false,
            query: String::new(),
            cursor_position: 0,
            pending_since: None,
            next_seq: 1,
            issued_seq: None,
            searching: false,
            hits: Vec::new(),
            has_results: false,
            recents: Vec::new(),
            rows: Vec::new(),
            list_index: 0,
        }
    }

    /// Extra filters ANDed onto every search this picker issues.
    pub fn set_filters(&mut self, extra: Vec<Filter>) {
        self.extra = extra;
    }

    /// Replaces the source's placeholder on the trigger and the popover input.
    pub fn set_placeholder(&mut self, placeholder: &'static str) {
        self.placeholder = Some(placeholder);
    }

    fn placeholder(&self) -> &'static str {
        self.placeholder.unwrap_or_else(|| self.source.placeholder())
    }

    pub fn kind(&self) -> EntityKind {
        self.source.kind()
    }

    /// Whether confirmed selections should be written to the recents cache.
    pub fn records_recents(&self) -> bool {
        self.source.uses_recents()
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn selected(&self) -> Option<&SearchHit> {
        self.selected.as_ref()
    }

    pub fn selected_id(&self) -> Option<Uuid> {
        self.selected.as_ref().map(|hit| hit.id)
    }

    pub fn set_selected(&mut self, hit: Option<SearchHit>) {
        self.selected = hit;
    }

    /// Seed the selection from a bare id. The label stays empty until a
    /// hydrate response fills it in.
    pub fn set_selected_id(&mut self, id: Uuid) {
        self.selected = Some(SearchHit::new(id, String::new()));
    }

    /// The id whose label is still unresolved, if any.
    pub fn needs_hydration(&self) -> Option<Uuid> {
        match &self.selected {
            Some(hit) if hit.label.is_empty() => Some(hit.id),
            _ => None,
        }
    }

    pub fn clear_selected(&mut self) {
        self.selected = None;
    }

    /// Text for the closed trigger: the selected label, or the placeholder
    /// while nothing is selected.
    pub fn trigger_label(&self) -> String {
        match &self.selected {
            Some(hit) => hit.label.clone(),
            None => self.placeholder().to_string(),
        }
    }

    pub fn has_selection(&self) -> bool {
        self.selected.is_some()
    }

    /// Open the popover with a fresh query.
    pub fn open(&mut self) -> PickerEvent {
        self.open = true;
        self.reset_query_state();
        self.rebuild_rows();
        if self.source.uses_recents() {
            PickerEvent::LoadRecents(self.source.kind())
        } else {
            PickerEvent::None
        }
    }

    /// Close the popover and discard the query. The committed selection is
    /// untouched.
    pub fn close(&mut self) {
        self.open = false;
        self.reset_query_state();
        self.rows.clear();
    }

    fn reset_query_state(&mut self) {
        self.query.clear();
        self.cursor_position = 0;
        self.pending_since = None;
        self.issued_seq = None;
        self.searching = false;
        self.hits.clear();
        self.has_results = false;
        self.list_index = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> PickerEvent {
        self.handle_key_at(key, Instant::now())
    }

    /// Key handling with an explicit clock, so the debounce window can be
    /// driven deterministically.
    pub fn handle_key_at(&mut self, key: KeyEvent, now: Instant) -> PickerEvent {
        match key.code {
            KeyCode::Esc => {
                self.close();
                PickerEvent::Dismissed
            }
            KeyCode::Up => {
                self.move_selection(-1);
                PickerEvent::None
            }
            KeyCode::Down => {
                self.move_selection(1);
                PickerEvent::None
            }
            KeyCode::Enter => self.confirm(),
            KeyCode::Left => {
                self.cursor_position = self.cursor_position.saturating_sub(1);
                PickerEvent::None
            }
            KeyCode::Right => {
                if self.cursor_position < self.query.chars().count() {
                    self.cursor_position += 1;
                }
                PickerEvent::None
            }
            KeyCode::Backspace => {
                if self.cursor_position > 0 {
                    let byte_index: usize = self
                        .query
                        .chars()
                        .take(self.cursor_position - 1)
                        .map(|c| c.len_utf8())
                        .sum();
                    self.query.remove(byte_index);
                    self.cursor_position -= 1;
                    self.note_edit(now);
                }
                PickerEvent::None
            }
            KeyCode::Char(c) => {
                let byte_index: usize = self
                    .query
                    .chars()
                    .take(self.cursor_position)
                    .map(|c| c.len_utf8())
                    .sum();
                self.query.insert(byte_index, c);
                self.cursor_position += 1;
                self.note_edit(now);
                PickerEvent::None
            }
            _ => PickerEvent::None,
        }
    }

    fn note_edit(&mut self, now: Instant) {
        if self.query.trim().is_empty() {
            // Back to the recents view. A late response for the abandoned
            // query must not resurface, so the issued sequence is forgotten.
            self.pending_since = None;
            self.issued_seq = None;
            self.searching = false;
            self.hits.clear();
            self.has_results = false;
        } else {
            self.pending_since = Some(now);
        }
        self.rebuild_rows();
    }

    /// Called from the app tick. Issues the armed search once the quiet
    /// period has fully elapsed, at most one per keystroke burst.
    pub fn poll_debounce(&mut self, now: Instant) -> Option<SearchRequest> {
        if !self.open {
            return None;
        }
        let armed = self.pending_since?;
        if now.duration_since(armed) < Duration::from_millis(SEARCH_DEBOUNCE_MS) {
            return None;
        }
        self.pending_since = None;

        let query = self.query.trim().to_string();
        if query.is_empty() {
            return None;
        }

        let seq = self.next_seq;
        self.next_seq += 1;
        self.issued_seq = Some(seq);
        self.searching = true;

        Some(SearchRequest {
            kind: self.source.kind(),
            query,
            seq,
            extra: self.extra.clone(),
        })
    }

    /// Apply a search response. Anything but the latest issued sequence
    /// number is stale and dropped.
    pub fn apply_response(&mut self, response: &SearchResponse) {
        if !self.open || response.kind != self.source.kind() {
            return;
        }
        if self.issued_seq != Some(response.seq) {
            log::debug!(
                "dropping stale {} search response seq {} for '{}'",
                response.kind.as_str(),
                response.seq,
                response.query
            );
            return;
        }
        self.searching = false;
        self.has_results = true;
        self.hits = response.hits.clone();
        self.list_index = 0;
        self.rebuild_rows();
    }

    pub fn apply_recents(&mut self, kind: EntityKind, hits: Vec<SearchHit>) {
        if kind != self.source.kind() {
            return;
        }
        self.recents = hits;
        if self.open && self.query.trim().is_empty() {
            self.rebuild_rows();
        }
    }

    /// Fill in the label of a selection that was seeded from a bare id.
    pub fn apply_hydrated(&mut self, kind: EntityKind, hit: &SearchHit) {
        if kind != self.source.kind() {
            return;
        }
        if self.selected.as_ref().map(|s| s.id) == Some(hit.id) {
            self.selected = Some(hit.clone());
        }
    }

    fn rebuild_rows(&mut self) {
        let mut rows = Vec::new();

        if self.query.trim().is_empty() {
            if self.source.uses_recents() && !self.recents.is_empty() {
                rows.push(PickerRow::Header(RECENT_HEADER));
                rows.extend(self.recents.iter().cloned().map(PickerRow::Hit));
            }
        } else {
            if self.has_results {
                if self.hits.is_empty() {
                    rows.push(PickerRow::Notice(NO_RESULTS));
                } else {
                    rows.extend(self.hits.iter().cloned().map(PickerRow::Hit));
                }
            } else if self.searching {
                rows.push(PickerRow::Notice(SEARCHING));
            }
            if let Some(label) = self.source.create_label() {
                rows.push(PickerRow::Create(label));
            }
        }

        self.rows = rows;
        self.clamp_selection();
    }

    fn clamp_selection(&mut self) {
        if self.rows.is_empty() {
            self.list_index = 0;
            return;
        }
        if self.list_index >= self.rows.len() || !self.rows[self.list_index].selectable() {
            self.list_index = self.rows.iter().position(PickerRow::selectable).unwrap_or(0);
        }
    }

    fn move_selection(&mut self, delta: i32) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as i32;
        let mut index = self.list_index as i32;
        // Wrap around, skipping headers and notices
        for _ in 0..len {
            index = (index + delta).rem_euclid(len);
            if self.rows[index as usize].selectable() {
                self.list_index = index as usize;
                return;
            }
        }
    }

    fn confirm(&mut self) -> PickerEvent {
        match self.rows.get(self.list_index).cloned() {
            Some(PickerRow::Hit(hit)) => {
                self.selected = Some(hit.clone());
                self.close();
                PickerEvent::Picked(hit)
            }
            Some(PickerRow::Create(_)) => {
                let draft = self.query.trim().to_string();
                self.close();
                PickerEvent::CreateRequested(draft)
            }
            _ => PickerEvent::None,
        }
    }

    /// Render the open popover: query input on top, option list below.
    pub fn render(&self, f: &mut Frame, area: Rect, icons: &IconService) {
        if !self.open {
            return;
        }

        f.render_widget(Clear, area);

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(3), Constraint::Min(1)])
            .split(area);

        let title = format!("{} {}", icons.search(), self.placeholder());
        let input = create_input_paragraph(&self.query, self.cursor_position, &title, true);
        f.render_widget(input, chunks[0]);

        let entity_icon = icons.entity(self.source.kind());
        let items: Vec<ListItem> = self
            .rows
            .iter()
            .map(|row| match row {
                PickerRow::Header(text) => ListItem::new(Line::from(Span::styled(
                    *text,
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::BOLD),
                ))),
                PickerRow::Hit(hit) => {
                    let mut spans = vec![
                        Span::raw(format!("{} ", entity_icon)),
                        Span::styled(hit.label.clone(), Style::default().fg(Color::White)),
                    ];
                    if let Some(sublabel) = &hit.sublabel {
                        spans.push(Span::styled(
                            format!("  {}", sublabel),
                            Style::default().fg(Color::DarkGray),
                        ));
                    }
                    ListItem::new(Line::from(spans))
                }
                PickerRow::Create(label) => ListItem::new(Line::from(Span::styled(
                    format!("{} {}", icons.create(), label),
                    Style::default().fg(Color::Green),
                ))),
                PickerRow::Notice(text) => ListItem::new(Line::from(Span::styled(
                    *text,
                    Style::default().fg(Color::DarkGray),
                ))),
            })
            .collect();

        let list = List::new(items).highlight_style(Style::default().bg(Color::DarkGray));
        let mut state = ListState::default();
        if self.rows.get(self.list_index).map(PickerRow::selectable) == Some(true) {
            state.select(Some(self.list_index));
        }
        f.render_stateful_widget(list, chunks[1], &mut state);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiClient, ApiError};
    use async_trait::async_trait;
    use crossterm::event::KeyModifiers;

    struct DummySource {
        kind: EntityKind,
        create: Option<&'static str>,
        recents: bool,
    }

    #[async_trait]
    impl SearchSource for DummySource {
        fn kind(&self) -> EntityKind {
            self.kind
        }

        fn placeholder(&self) -> &'static str {
            "Pick one"
        }

        fn create_label(&self) -> Option<&'static str> {
            self.create
        }

        fn uses_recents(&self) -> bool {
            self.recents
        }

        async fn search(&self, _api: &ApiClient, _query: &str, _extra: &[Filter]) -> Result<Vec<SearchHit>, ApiError> {
            Ok(Vec::new())
        }

        async fn hydrate(&self, _api: &ApiClient, _id: Uuid) -> Result<Option<SearchHit>, ApiError> {
            Ok(None)
        }
    }

    fn picker(create: Option<&'static str>, recents: bool) -> EntityPicker {
        EntityPicker::new(Arc::new(DummySource {
            kind: EntityKind::Artist,
            create,
            recents,
        }))
    }

    fn key(c: char) -> KeyEvent {
        KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn code(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn ms(base: Instant, offset: u64) -> Instant {
        base + Duration::from_millis(offset)
    }

    fn response(seq: u64, query: &str, hits: Vec<SearchHit>) -> SearchResponse {
        SearchResponse {
            kind: EntityKind::Artist,
            query: query.to_string(),
            seq,
            hits,
        }
    }

    #[test]
    fn test_burst_of_keystrokes_issues_one_search() {
        let mut p = picker(None, true);
        p.open();
        let base = Instant::now();

        p.handle_key_at(key('a'), ms(base, 0));
        p.handle_key_at(key('r'), ms(base, 100));
        p.handle_key_at(key('t'), ms(base, 200));

        assert!(p.poll_debounce(ms(base, 250)).is_none());
        assert!(p.poll_debounce(ms(base, 450)).is_none());

        let request = p.poll_debounce(ms(base, 500)).unwrap();
        assert_eq!(request.query, "art");
        assert_eq!(request.seq, 1);

        // The window only fires once per burst
        assert!(p.poll_debounce(ms(base, 600)).is_none());
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let mut p = picker(None, true);
        p.open();
        let base = Instant::now();

        p.handle_key_at(key('a'), ms(base, 0));
        let first = p.poll_debounce(ms(base, 300)).unwrap();

        p.handle_key_at(key('b'), ms(base, 350));
        let second = p.poll_debounce(ms(base, 650)).unwrap();
        assert!(second.seq > first.seq);

        let late = SearchHit::new(Uuid::new_v4(), "Stale Artist");
        p.apply_response(&response(first.seq, "a", vec![late]));
        assert!(p.hits.is_empty());

        let fresh = SearchHit::new(Uuid::new_v4(), "Fresh Artist");
        p.apply_response(&response(second.seq, "ab", vec![fresh.clone()]));
        assert_eq!(p.hits, vec![fresh]);
    }

    #[test]
    fn test_clearing_the_query_abandons_the_inflight_search() {
        let mut p = picker(None, true);
        p.open();
        let base = Instant::now();

        p.handle_key_at(key('a'), ms(base, 0));
        let request = p.poll_debounce(ms(base, 300)).unwrap();

        p.handle_key_at(code(KeyCode::Backspace), ms(base, 320));
        assert!(p.poll_debounce(ms(base, 700)).is_none());

        p.apply_response(&response(request.seq, "a", vec![SearchHit::new(Uuid::new_v4(), "Ghost")]));
        assert!(p.hits.is_empty());
        assert!(!p.has_results);
    }

    #[test]
    fn test_empty_query_shows_recents_and_nonempty_replaces_them() {
        let mut p = picker(None, true);
        p.open();
        let recent = SearchHit::new(Uuid::new_v4(), "Recently Picked");
        p.apply_recents(EntityKind::Artist, vec![recent.clone()]);

        assert!(matches!(p.rows.first(), Some(PickerRow::Header(_))));
        assert!(matches!(&p.rows[1], PickerRow::Hit(hit) if hit.label == "Recently Picked"));

        let base = Instant::now();
        p.handle_key_at(key('x'), ms(base, 0));
        assert!(!p.rows.iter().any(|r| matches!(r, PickerRow::Header(_))));

        let request = p.poll_debounce(ms(base, 300)).unwrap();
        p.apply_response(&response(request.seq, "x", Vec::new()));
        assert!(matches!(p.rows.first(), Some(PickerRow::Notice(text)) if *text == NO_RESULTS));
    }

    #[test]
    fn test_blank_labelled_recent_stays_selectable() {
        let mut p = picker(None, true);
        p.open();
        let blank = SearchHit::new(Uuid::new_v4(), "");
        p.apply_recents(EntityKind::Artist, vec![blank.clone()]);

        // Selection lands on the hit row below the header
        assert_eq!(p.list_index, 1);
        let event = p.handle_key_at(code(KeyCode::Enter), Instant::now());
        assert_eq!(event, PickerEvent::Picked(blank.clone()));
        assert_eq!(p.selected(), Some(&blank));
        assert!(!p.is_open());
    }

    #[test]
    fn test_create_row_closes_and_resets() {
        let mut p = picker(Some("Create new artist"), true);
        p.open();
        let base = Instant::now();

        for (i, c) in "New Band".chars().enumerate() {
            p.handle_key_at(key(c), ms(base, i as u64 * 10));
        }
        let request = p.poll_debounce(ms(base, 1000)).unwrap();
        p.apply_response(&response(request.seq, "New Band", Vec::new()));

        // Rows are the no-results notice plus the creation row
        p.handle_key_at(code(KeyCode::Down), ms(base, 1010));
        let event = p.handle_key_at(code(KeyCode::Enter), ms(base, 1020));
        assert_eq!(event, PickerEvent::CreateRequested("New Band".to_string()));
        assert!(!p.is_open());
        assert!(p.query.is_empty());
        assert!(p.selected().is_none());
    }

    #[test]
    fn test_picking_a_hit_commits_and_closes() {
        let mut p = picker(None, true);
        p.open();
        let base = Instant::now();
        p.handle_key_at(key('a'), ms(base, 0));
        let request = p.poll_debounce(ms(base, 300)).unwrap();

        let hit = SearchHit::new(Uuid::new_v4(), "The Act").with_sublabel("Berlin");
        p.apply_response(&response(request.seq, "a", vec![hit.clone()]));

        let event = p.handle_key_at(code(KeyCode::Enter), ms(base, 350));
        assert_eq!(event, PickerEvent::Picked(hit.clone()));
        assert_eq!(p.selected_id(), Some(hit.id));
        assert!(!p.is_open());
        assert!(p.query.is_empty());
    }

    #[test]
    fn test_hydration_fills_in_a_bare_id() {
        let mut p = picker(None, true);
        let id = Uuid::new_v4();
        p.set_selected_id(id);
        assert_eq!(p.needs_hydration(), Some(id));

        let hit = SearchHit::new(id, "Resolved Label");
        p.apply_hydrated(EntityKind::Artist, &hit);
        assert_eq!(p.needs_hydration(), None);
        assert_eq!(p.trigger_label(), "Resolved Label");

        // A hit for a different id leaves the selection alone
        p.apply_hydrated(EntityKind::Artist, &SearchHit::new(Uuid::new_v4(), "Other"));
        assert_eq!(p.trigger_label(), "Resolved Label");
    }

    #[test]
    fn test_responses_for_other_kinds_are_ignored() {
        let mut p = picker(None, true);
        p.open();
        let base = Instant::now();
        p.handle_key_at(key('a'), ms(base, 0));
        let request = p.poll_debounce(ms(base, 300)).unwrap();

        let foreign = SearchResponse {
            kind: EntityKind::Venue,
            query: "a".to_string(),
            seq: request.seq,
            hits: vec![SearchHit::new(Uuid::new_v4(), "Wrong Kind")],
        };
        p.apply_response(&foreign);
        assert!(p.hits.is_empty());
    }

    #[test]
    fn test_sources_without_recents_open_empty() {
        let mut p = picker(None, false);
        let event = p.open();
        assert_eq!(event, PickerEvent::None);
        assert!(p.rows.is_empty());
    }

    #[test]
    fn test_placeholder_override_replaces_the_source_text() {
        let mut p = picker(None, false);
        assert_eq!(p.trigger_label(), "Pick one");

        p.set_placeholder("Assign a manager");
        assert_eq!(p.trigger_label(), "Assign a manager");

        p.set_selected(Some(SearchHit::new(Uuid::new_v4(), "Sam Porter")));
        assert_eq!(p.trigger_label(), "Sam Porter");
    }
}
