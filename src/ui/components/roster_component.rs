//! Main list pane showing the rows of the active section.
//!
//! Holds the loaded rows and the selection, and turns row-level keys into
//! actions: editing, creating, deleting, and the event-only extras (promo
//! codes, mock orders, opening the public page).

use crate::config::DisplayConfig;
use crate::icons::IconService;
use crate::models::{ArtistRow, EventOverviewRow, OrganizationRow, PromoCodeRow, VenueRow};
use crate::search::EntityKind;
use crate::ui::components::scrollbar_helper::ScrollbarHelper;
use crate::ui::core::{
    actions::{Action, AdminSection, DialogType, SectionData},
    Component,
};
use crate::utils::datetime::{format_human_date, format_human_datetime};
use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};

pub struct RosterComponent {
    pub section: AdminSection,
    pub data: Option<SectionData>,
    pub selected_index: usize,
    pub loading: bool,
    pub icons: IconService,
    pub display: DisplayConfig,
    list_state: ListState,
    scrollbar: ScrollbarHelper,
}

impl Default for RosterComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl RosterComponent {
    pub fn new() -> Self {
        Self {
            section: AdminSection::default(),
            data: None,
            selected_index: 0,
            loading: true,
            icons: IconService::default(),
            display: DisplayConfig::default(),
            list_state: ListState::default(),
            scrollbar: ScrollbarHelper::new(),
        }
    }

    pub fn update_data(&mut self, section: AdminSection, data: Option<SectionData>, loading: bool) {
        self.section = section;
        self.data = data;
        self.loading = loading;
        self.update_list_state();
    }

    fn len(&self) -> usize {
        self.data.as_ref().map_or(0, SectionData::len)
    }

    fn section_icon(&self) -> &'static str {
        match self.section {
            AdminSection::Events => self.icons.entity(EntityKind::Event),
            AdminSection::Artists => self.icons.entity(EntityKind::Artist),
            AdminSection::Venues => self.icons.entity(EntityKind::Venue),
            AdminSection::Organizations => self.icons.entity(EntityKind::Organization),
            AdminSection::PromoCodes => self.icons.promo(),
        }
    }

    fn update_list_state(&mut self) {
        if self.len() == 0 {
            self.selected_index = 0;
            self.list_state.select(None);
        } else {
            if self.selected_index >= self.len() {
                self.selected_index = self.len() - 1;
            }
            self.list_state.select(Some(self.selected_index));
        }
    }

    fn selected_event(&self) -> Option<&EventOverviewRow> {
        match &self.data {
            Some(SectionData::Events(rows)) => rows.get(self.selected_index),
            _ => None,
        }
    }

    /// Id and display name of the selected row, for delete confirmations.
    fn selected_identity(&self) -> Option<(uuid::Uuid, String)> {
        match &self.data {
            Some(SectionData::Events(rows)) => rows.get(self.selected_index).map(|r| (r.id, r.name.clone())),
            Some(SectionData::Artists(rows)) => rows.get(self.selected_index).map(|r| (r.id, r.name.clone())),
            Some(SectionData::Venues(rows)) => rows.get(self.selected_index).map(|r| (r.id, r.name.clone())),
            Some(SectionData::Organizations(rows)) => rows.get(self.selected_index).map(|r| (r.id, r.name.clone())),
            Some(SectionData::PromoCodes(rows)) => rows.get(self.selected_index).map(|r| (r.id, r.code.clone())),
            None => None,
        }
    }

    fn edit_selected(&self) -> Action {
        match &self.data {
            Some(SectionData::Events(rows)) => match rows.get(self.selected_index) {
                // The overview row is a projection; fetch the full row first
                Some(row) => Action::EditEvent(row.id),
                None => Action::None,
            },
            Some(SectionData::Artists(rows)) => match rows.get(self.selected_index) {
                Some(row) => Action::ShowDialog(DialogType::ArtistForm {
                    existing: Some(row.clone()),
                    return_to: None,
                }),
                None => Action::None,
            },
            Some(SectionData::Venues(rows)) => match rows.get(self.selected_index) {
                Some(row) => Action::ShowDialog(DialogType::VenueForm {
                    existing: Some(row.clone()),
                    return_to: None,
                }),
                None => Action::None,
            },
            Some(SectionData::Organizations(_)) => {
                Action::ShowDialog(DialogType::Info("Organizations are managed in the web console".to_string()))
            }
            Some(SectionData::PromoCodes(rows)) => match rows.get(self.selected_index) {
                Some(row) => Action::ShowDialog(DialogType::PromoForm {
                    event_id: row.event_id,
                    existing: Some(row.clone()),
                }),
                None => Action::None,
            },
            None => Action::None,
        }
    }

    fn create_new(&self) -> Action {
        match self.section {
            AdminSection::Events => Action::ShowDialog(DialogType::EventForm {
                existing: None,
                resume: None,
            }),
            AdminSection::Artists => Action::ShowDialog(DialogType::ArtistForm {
                existing: None,
                return_to: None,
            }),
            AdminSection::Venues => Action::ShowDialog(DialogType::VenueForm {
                existing: None,
                return_to: None,
            }),
            AdminSection::Organizations => {
                Action::ShowDialog(DialogType::Info("Organizations are managed in the web console".to_string()))
            }
            AdminSection::PromoCodes => Action::ShowDialog(DialogType::Info(
                "Promo codes belong to an event. Select the event and press 'p'.".to_string(),
            )),
        }
    }

    fn event_line(&self, row: &EventOverviewRow) -> Line<'static> {
        let mut spans = vec![Span::styled(row.name.clone(), Style::default().fg(Color::White))];
        if let Some(venue) = &row.venue_name {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(format!("@{}", venue), Style::default().fg(Color::Cyan)));
        }
        if let Some(start) = &row.event_start {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format_human_datetime(start),
                Style::default().fg(Color::Rgb(255, 165, 0)),
            ));
        }
        if let Some(headliner) = &row.headliner_name {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("({})", headliner),
                Style::default().fg(Color::DarkGray),
            ));
        }
        if self.display.show_clicks {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("[{} clicks]", row.click_count),
                Style::default().fg(Color::DarkGray).add_modifier(Modifier::DIM),
            ));
        }
        Line::from(spans)
    }

    fn artist_line(&self, row: &ArtistRow) -> Line<'static> {
        let mut spans = vec![Span::styled(row.name.clone(), Style::default().fg(Color::White))];
        if let Some(bio) = &row.bio {
            let snippet: String = bio.chars().take(48).collect();
            spans.push(Span::raw(" "));
            spans.push(Span::styled(snippet, Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    }

    fn venue_line(&self, row: &VenueRow) -> Line<'static> {
        let mut spans = vec![Span::styled(row.name.clone(), Style::default().fg(Color::White))];
        if let Some(city) = &row.city {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(city.clone(), Style::default().fg(Color::Cyan)));
        }
        if let Some(address) = &row.address {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(address.clone(), Style::default().fg(Color::DarkGray)));
        }
        Line::from(spans)
    }

    fn organization_line(&self, row: &OrganizationRow) -> Line<'static> {
        let mut spans = vec![Span::styled(row.name.clone(), Style::default().fg(Color::White))];
        if let Some(city) = &row.city {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(city.clone(), Style::default().fg(Color::Cyan)));
        }
        Line::from(spans)
    }

    fn promo_line(&self, row: &PromoCodeRow) -> Line<'static> {
        let discount = if let Some(pct) = row.discount_percentage {
            format!("{}% off", pct)
        } else if let Some(cents) = row.discount_in_cents {
            format!("${:.2} off", cents as f64 / 100.0)
        } else {
            "no discount".to_string()
        };

        let mut spans = vec![
            Span::styled(row.code.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            Span::raw(" "),
            Span::styled(discount, Style::default().fg(Color::Green)),
            Span::raw(" "),
            Span::styled(row.scope.clone(), Style::default().fg(Color::DarkGray)),
        ];
        if let Some(expires) = &row.expires_on {
            spans.push(Span::raw(" "));
            spans.push(Span::styled(
                format!("expires {}", format_human_date(expires)),
                Style::default().fg(Color::Rgb(255, 165, 0)),
            ));
        }
        Line::from(spans)
    }

    fn create_items(&self) -> Vec<ListItem<'static>> {
        match &self.data {
            Some(SectionData::Events(rows)) => rows.iter().map(|r| ListItem::new(self.event_line(r))).collect(),
            Some(SectionData::Artists(rows)) => rows.iter().map(|r| ListItem::new(self.artist_line(r))).collect(),
            Some(SectionData::Venues(rows)) => rows.iter().map(|r| ListItem::new(self.venue_line(r))).collect(),
            Some(SectionData::Organizations(rows)) => {
                rows.iter().map(|r| ListItem::new(self.organization_line(r))).collect()
            }
            Some(SectionData::PromoCodes(rows)) => rows.iter().map(|r| ListItem::new(self.promo_line(r))).collect(),
            None => Vec::new(),
        }
    }

    fn empty_message(&self) -> &'static str {
        if self.loading {
            return "Loading...";
        }
        match self.section {
            AdminSection::Events => "No events. Press 'A' to create one or 'r' to reload.",
            AdminSection::Artists => "No artists. Press 'A' to create one or 'r' to reload.",
            AdminSection::Venues => "No venues. Press 'A' to create one or 'r' to reload.",
            AdminSection::Organizations => "No organizations. Press 'r' to reload.",
            AdminSection::PromoCodes => "No promo codes. Press 'p' on an event to create one.",
        }
    }
}

impl Component for RosterComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => Action::NextRow,
            KeyCode::Up | KeyCode::Char('k') => Action::PreviousRow,
            KeyCode::Enter | KeyCode::Char('E') => self.edit_selected(),
            KeyCode::Char('A') => self.create_new(),
            KeyCode::Char('D') => match self.selected_identity() {
                Some((id, name)) => Action::ShowDialog(DialogType::DeleteConfirmation {
                    section: self.section,
                    id,
                    name,
                }),
                None => Action::None,
            },
            KeyCode::Char('p') => match self.selected_event() {
                Some(event) => Action::ShowDialog(DialogType::PromoForm {
                    event_id: event.id,
                    existing: None,
                }),
                None => Action::None,
            },
            KeyCode::Char('m') => match self.selected_event() {
                Some(event) => Action::ShowDialog(DialogType::MockOrders {
                    event_id: event.id,
                    event_name: event.name.clone(),
                }),
                None => Action::None,
            },
            KeyCode::Char('o') => match self.selected_event() {
                Some(event) => Action::OpenEventLink(event.id),
                None => Action::None,
            },
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::NextRow => {
                if self.len() > 0 {
                    self.selected_index = (self.selected_index + 1) % self.len();
                    self.update_list_state();
                }
                Action::None
            }
            Action::PreviousRow => {
                if self.len() > 0 {
                    self.selected_index = if self.selected_index == 0 {
                        self.len() - 1
                    } else {
                        self.selected_index - 1
                    };
                    self.update_list_state();
                }
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let title = format!(" {} {} ({}) ", self.section_icon(), self.section.title(), self.len());

        if self.len() == 0 {
            let empty_list = List::new(vec![ListItem::new(self.empty_message())])
                .block(Block::default().borders(Borders::ALL).title(title));
            f.render_stateful_widget(empty_list, rect, &mut self.list_state);
            return;
        }

        let items = self.create_items();
        let total_items = items.len();
        let (list_area, scrollbar_area) = ScrollbarHelper::calculate_areas(rect, total_items);

        let viewport_rows = rect.height.saturating_sub(2) as usize;
        self.scrollbar
            .update_state(total_items, self.selected_index, viewport_rows);

        let list = List::new(items)
            .block(Block::default().borders(Borders::ALL).title(title))
            .highlight_style(Style::default().bg(Color::DarkGray).add_modifier(Modifier::BOLD));

        f.render_stateful_widget(list, list_area, &mut self.list_state);
        self.scrollbar.render(f, scrollbar_area);
    }
}
