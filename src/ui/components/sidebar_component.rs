//! Sidebar navigation between the admin sections.
//!
//! The five sections are fixed, so this stays a flat list: Shift+J/K or the
//! mouse wheel moves the highlight, a click jumps straight to a section.

use crate::icons::IconService;
use crate::search::EntityKind;
use crate::ui::core::{actions::Action, AdminSection, Component};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    layout::{Position, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{block::BorderType, Block, Borders, List, ListItem, ListState},
    Frame,
};

pub struct SidebarComponent {
    pub section: AdminSection,
    pub icons: IconService,
    list_state: ListState,
}

impl Default for SidebarComponent {
    fn default() -> Self {
        Self::new()
    }
}

impl SidebarComponent {
    pub fn new() -> Self {
        let mut list_state = ListState::default();
        list_state.select(Some(0));
        Self {
            section: AdminSection::default(),
            icons: IconService::default(),
            list_state,
        }
    }

    pub fn set_section(&mut self, section: AdminSection) {
        self.section = section;
        self.sync_list_state();
    }

    fn sync_list_state(&mut self) {
        let index = AdminSection::ALL.iter().position(|s| *s == self.section).unwrap_or(0);
        self.list_state.select(Some(index));
    }

    fn step(&self, delta: isize) -> AdminSection {
        let len = AdminSection::ALL.len() as isize;
        let current = AdminSection::ALL.iter().position(|s| *s == self.section).unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len) as usize;
        AdminSection::ALL[next]
    }

    fn section_icon(&self, section: AdminSection) -> &'static str {
        match section {
            AdminSection::Events => self.icons.entity(EntityKind::Event),
            AdminSection::Artists => self.icons.entity(EntityKind::Artist),
            AdminSection::Venues => self.icons.entity(EntityKind::Venue),
            AdminSection::Organizations => self.icons.entity(EntityKind::Organization),
            AdminSection::PromoCodes => self.icons.promo(),
        }
    }

    pub fn handle_mouse(&mut self, mouse: MouseEvent, area: Rect) -> Action {
        if !area.contains(Position::new(mouse.column, mouse.row)) {
            return Action::None;
        }

        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                // Rows start below the top border
                if mouse.row > area.y && mouse.row < area.y + area.height - 1 {
                    let clicked = (mouse.row - area.y - 1) as usize;
                    if let Some(section) = AdminSection::ALL.get(clicked) {
                        return Action::NavigateToSection(*section);
                    }
                }
                Action::None
            }
            MouseEventKind::ScrollUp => Action::NavigateToSection(self.step(-1)),
            MouseEventKind::ScrollDown => Action::NavigateToSection(self.step(1)),
            _ => Action::None,
        }
    }
}

impl Component for SidebarComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('J') | KeyCode::Down if key.modifiers.contains(KeyModifiers::SHIFT) => {
                Action::NavigateToSection(self.step(1))
            }
            KeyCode::Char('K') | KeyCode::Up if key.modifiers.contains(KeyModifiers::SHIFT) => {
                Action::NavigateToSection(self.step(-1))
            }
            _ => Action::None,
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::NavigateToSection(section) => {
                self.set_section(section);
                // Pass through so the app schedules the section load
                Action::NavigateToSection(section)
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        self.sync_list_state();

        let items: Vec<ListItem> = AdminSection::ALL
            .iter()
            .map(|section| {
                let style = if *section == self.section {
                    Style::default().fg(Color::Cyan).add_modifier(Modifier::BOLD)
                } else {
                    Style::default().fg(Color::White)
                };
                ListItem::new(Line::from(vec![
                    Span::raw(format!("{} ", self.section_icon(*section))),
                    Span::styled(section.title(), style),
                ]))
            })
            .collect();

        let list = List::new(items)
            .block(
                Block::default()
                    .borders(Borders::ALL)
                    .border_type(BorderType::Rounded)
                    .title("Sections")
                    .title_style(Style::default().fg(Color::White))
                    .border_style(Style::default().fg(Color::DarkGray)),
            )
            .highlight_style(Style::default().bg(Color::DarkGray));

        f.render_stateful_widget(list, rect, &mut self.list_state);
    }
}
