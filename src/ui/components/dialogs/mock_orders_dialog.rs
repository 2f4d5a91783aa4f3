//! Mock order generation panel for one event: the generation knobs, a live
//! progress gauge while a run is active, the last run's persisted snapshot
//! when idle, and the bulk clear of previously generated data.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Clear, Gauge, Paragraph},
    Frame,
};
use uuid::Uuid;

use crate::config::GenerationDefaults;
use crate::icons::IconService;
use crate::mock::{GenField, GenFieldError, GenerationConfig, GenerationOutcome, GenerationProgress};
use crate::ui::core::Action;
use crate::ui::layout::LayoutManager;

use super::common::{
    create_dialog_block, create_error_line, create_input_paragraph, create_instructions_paragraph, delete_char_before,
    insert_char, InstructionShortcut,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum GenFocus {
    Orders,
    Tickets,
    RsvpRatio,
    FreeRatio,
}

pub struct MockOrdersPanel {
    event_id: Uuid,
    event_name: String,
    orders: String,
    tickets: String,
    rsvp_ratio: String,
    free_ratio: String,
    focus: GenFocus,
    cursor: usize,
    errors: Vec<GenFieldError>,
    running: bool,
    progress: Option<GenerationProgress>,
    snapshot: Option<GenerationProgress>,
    outcome: Option<GenerationOutcome>,
    cleared: Option<i64>,
}

impl MockOrdersPanel {
    pub fn new(event_id: Uuid, event_name: String, defaults: &GenerationDefaults) -> Self {
        let orders = defaults.order_count.to_string();
        let cursor = orders.chars().count();
        Self {
            event_id,
            event_name,
            orders,
            tickets: defaults.max_tickets_per_order.to_string(),
            rsvp_ratio: defaults.rsvp_ratio.to_string(),
            free_ratio: defaults.free_ratio.to_string(),
            focus: GenFocus::Orders,
            cursor,
            errors: Vec::new(),
            running: false,
            progress: None,
            snapshot: None,
            outcome: None,
            cleared: None,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn apply_progress(&mut self, progress: &GenerationProgress) {
        if progress.event_id != self.event_id {
            return;
        }
        self.running = !progress.finished;
        self.progress = Some(progress.clone());
    }

    pub fn apply_finished(&mut self, event_id: Uuid, outcome: GenerationOutcome) {
        if event_id != self.event_id {
            return;
        }
        self.running = false;
        self.outcome = Some(outcome);
    }

    pub fn apply_failed(&mut self, event_id: Uuid) {
        if event_id == self.event_id {
            self.running = false;
        }
    }

    pub fn apply_snapshot(&mut self, event_id: Uuid, snapshot: Option<GenerationProgress>) {
        if event_id != self.event_id {
            return;
        }
        if self.progress.is_none() {
            self.snapshot = snapshot;
        }
    }

    pub fn apply_cleared(&mut self, event_id: Uuid, affected: i64) {
        if event_id != self.event_id {
            return;
        }
        self.cleared = Some(affected);
        self.snapshot = None;
        self.progress = None;
        self.outcome = None;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('s') => return self.start(),
                KeyCode::Char('d') => return Action::ClearMockOrders(self.event_id),
                _ => {}
            }
        }

        match key.code {
            KeyCode::Esc => Action::HideDialog,
            KeyCode::Tab | KeyCode::Down | KeyCode::Enter => {
                self.cycle_focus(true);
                Action::None
            }
            KeyCode::BackTab | KeyCode::Up => {
                self.cycle_focus(false);
                Action::None
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

    /// Parse and validate the knobs, then hand the run to the app. A second
    /// start while one is running is refused here.
    fn start(&mut self) -> Action {
        if self.running {
            return Action::None;
        }

        let mut errors = Vec::new();
        let order_count = parse_count(&self.orders, GenField::Orders, "Order count", &mut errors);
        let max_tickets = parse_count(&self.tickets, GenField::TicketsPerOrder, "Tickets per order", &mut errors);
        let rsvp_ratio = parse_ratio(&self.rsvp_ratio, GenField::RsvpRatio, "RSVP ratio", &mut errors);
        let free_ratio = parse_ratio(&self.free_ratio, GenField::FreeRatio, "Free ratio", &mut errors);

        if !errors.is_empty() {
            self.errors = errors;
            return Action::None;
        }

        let config = GenerationConfig {
            order_count,
            max_tickets_per_order: max_tickets,
            rsvp_ratio,
            free_ratio,
        };
        if let Err(errors) = config.validate() {
            self.errors = errors;
            return Action::None;
        }

        self.errors.clear();
        self.running = true;
        self.outcome = None;
        self.cleared = None;
        Action::StartGeneration {
            event_id: self.event_id,
            config,
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        const ORDER: [GenFocus; 4] = [
            GenFocus::Orders,
            GenFocus::Tickets,
            GenFocus::RsvpRatio,
            GenFocus::FreeRatio,
        ];
        let index = ORDER.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (index + 1) % ORDER.len()
        } else {
            (index + ORDER.len() - 1) % ORDER.len()
        };
        self.focus = ORDER[next];
        self.cursor = self.focused_text().chars().count();
    }

    fn focused_text(&self) -> &String {
        match self.focus {
            GenFocus::Orders => &self.orders,
            GenFocus::Tickets => &self.tickets,
            GenFocus::RsvpRatio => &self.rsvp_ratio,
            GenFocus::FreeRatio => &self.free_ratio,
        }
    }

    fn focused_text_mut(&mut self) -> &mut String {
        match self.focus {
            GenFocus::Orders => &mut self.orders,
            GenFocus::Tickets => &mut self.tickets,
            GenFocus::RsvpRatio => &mut self.rsvp_ratio,
            GenFocus::FreeRatio => &mut self.free_ratio,
        }
    }

    pub fn render(&self, f: &mut Frame, icons: &IconService) {
        let area = LayoutManager::centered_rect_lines(60, 22, f.area());
        f.render_widget(Clear, area);

        let title = format!(" {} Mock Orders - {} ", icons.working(), self.event_name);
        let block = create_dialog_block(&title, Color::Cyan);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let error_lines = self.errors.len().min(3) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(error_lines),
                Constraint::Length(3),
                Constraint::Min(0),
                Constraint::Length(1),
            ])
            .split(inner);

        f.render_widget(
            create_input_paragraph(&self.orders, self.cursor, "Orders", self.focus == GenFocus::Orders),
            chunks[0],
        );
        f.render_widget(
            create_input_paragraph(
                &self.tickets,
                self.cursor,
                "Max tickets per order",
                self.focus == GenFocus::Tickets,
            ),
            chunks[1],
        );
        f.render_widget(
            create_input_paragraph(
                &self.rsvp_ratio,
                self.cursor,
                "RSVP ratio (0.0 - 1.0)",
                self.focus == GenFocus::RsvpRatio,
            ),
            chunks[2],
        );
        f.render_widget(
            create_input_paragraph(
                &self.free_ratio,
                self.cursor,
                "Free order ratio (0.0 - 1.0)",
                self.focus == GenFocus::FreeRatio,
            ),
            chunks[3],
        );

        if !self.errors.is_empty() {
            let lines: Vec<Line> = self.errors.iter().take(3).map(|e| create_error_line(&e.message)).collect();
            f.render_widget(Paragraph::new(lines), chunks[4]);
        }

        self.render_status(f, chunks[5]);

        let instructions: Vec<InstructionShortcut> = vec![
            ("Ctrl+S", Color::Green, " Generate"),
            (" • ", Color::Gray, ""),
            ("Ctrl+D", Color::Red, " Clear mock data"),
            (" • ", Color::Gray, ""),
            ("Esc", Color::Red, " Close"),
        ];
        f.render_widget(create_instructions_paragraph(&instructions), chunks[7]);
    }

    fn render_status(&self, f: &mut Frame, area: Rect) {
        if let Some(progress) = &self.progress {
            let ratio = if progress.orders_total == 0 {
                0.0
            } else {
                f64::from(progress.orders_done) / f64::from(progress.orders_total)
            };
            let label = format!(
                "{}/{} orders • {} tickets • {} RSVPs",
                progress.orders_done, progress.orders_total, progress.tickets_done, progress.rsvps_done
            );
            let gauge = Gauge::default()
                .gauge_style(Style::default().fg(Color::Cyan))
                .ratio(ratio.clamp(0.0, 1.0))
                .label(label);
            f.render_widget(gauge, area);
            return;
        }

        let line = if let Some(affected) = self.cleared {
            Line::from(format!("Cleared {} mock orders", affected))
        } else if let Some(outcome) = &self.outcome {
            Line::from(format!(
                "Done: {} orders, {} tickets, {} RSVPs",
                outcome.orders, outcome.tickets, outcome.rsvps
            ))
        } else if let Some(snapshot) = &self.snapshot {
            if snapshot.finished {
                Line::from(format!(
                    "Last run: {} orders, {} tickets, {} RSVPs",
                    snapshot.orders_done, snapshot.tickets_done, snapshot.rsvps_done
                ))
            } else {
                Line::from(format!(
                    "Last run stopped at {}/{} orders",
                    snapshot.orders_done, snapshot.orders_total
                ))
            }
        } else {
            Line::from("No mock data generated yet")
        };
        f.render_widget(
            Paragraph::new(line).style(Style::default().fg(Color::DarkGray)),
            area,
        );
    }
}

fn parse_count(input: &str, field: GenField, label: &str, errors: &mut Vec<GenFieldError>) -> u32 {
    match input.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            errors.push(GenFieldError {
                field,
                message: format!("{} must be a whole number", label),
            });
            0
        }
    }
}

fn parse_ratio(input: &str, field: GenField, label: &str, errors: &mut Vec<GenFieldError>) -> f64 {
    match input.trim().parse() {
        Ok(value) => value,
        Err(_) => {
            errors.push(GenFieldError {
                field,
                message: format!("{} must be a number", label),
            });
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> GenerationDefaults {
        GenerationDefaults {
            order_count: 25,
            max_tickets_per_order: 4,
            rsvp_ratio: 0.3,
            free_ratio: 0.1,
        }
    }

    #[test]
    fn test_defaults_prefill_the_fields() {
        let panel = MockOrdersPanel::new(Uuid::new_v4(), "Test Night".to_string(), &defaults());
        assert_eq!(panel.orders, "25");
        assert_eq!(panel.tickets, "4");
        assert_eq!(panel.rsvp_ratio, "0.3");
        assert_eq!(panel.free_ratio, "0.1");
    }

    #[test]
    fn test_start_validates_before_dispatching() {
        let mut panel = MockOrdersPanel::new(Uuid::new_v4(), "Test Night".to_string(), &defaults());
        panel.orders = "zero".to_string();
        assert!(matches!(panel.start(), Action::None));
        assert!(!panel.errors.is_empty());
        assert!(!panel.running);

        panel.orders = "50".to_string();
        match panel.start() {
            Action::StartGeneration { config, .. } => {
                assert_eq!(config.order_count, 50);
                assert_eq!(config.max_tickets_per_order, 4);
            }
            other => panic!("expected StartGeneration, got {:?}", other),
        }
        assert!(panel.running);
    }

    #[test]
    fn test_second_start_while_running_is_refused() {
        let mut panel = MockOrdersPanel::new(Uuid::new_v4(), "Test Night".to_string(), &defaults());
        assert!(matches!(panel.start(), Action::StartGeneration { .. }));
        assert!(matches!(panel.start(), Action::None));
    }

    #[test]
    fn test_foreign_event_updates_are_ignored() {
        let mut panel = MockOrdersPanel::new(Uuid::new_v4(), "Test Night".to_string(), &defaults());
        let other = Uuid::new_v4();
        panel.apply_cleared(other, 10);
        assert_eq!(panel.cleared, None);

        panel.apply_cleared(panel.event_id, 10);
        assert_eq!(panel.cleared, Some(10));
    }
}
