//! Promo code form. Field errors stay hidden until a submit attempt; a
//! failed attempt pins each message under the fields and marks the fields
//! it belongs to. The scope's group/tier checkboxes are fed by a background
//! load of the event's real ticket structure.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Style},
    text::Line,
    widgets::{Block, BorderType, Borders, Clear, List, ListItem, ListState, Paragraph},
    Frame,
};
use uuid::Uuid;

use crate::icons::IconService;
use crate::models::{PromoCodeRow, TicketGroupRow, TicketTierRow};
use crate::promo::{code_at_capacity, errors_for, validate, DiscountKind, FieldError, PromoDraft, PromoField, PromoScope};
use crate::ui::core::Action;
use crate::ui::layout::LayoutManager;
use crate::utils::datetime;

use super::common::{
    create_dialog_block, create_error_line, create_input_paragraph, create_instructions_paragraph,
    create_selection_paragraph, delete_char_before, insert_char, shortcuts, InstructionShortcut,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PromoFocus {
    Code,
    Kind,
    Value,
    Expires,
    Scope,
    Choices,
}

pub struct PromoForm {
    event_id: Uuid,
    existing_id: Option<Uuid>,
    draft: PromoDraft,
    focus: PromoFocus,
    cursor: usize,
    /// Populated only by a failed submit attempt.
    errors: Vec<FieldError>,
    groups: Vec<TicketGroupRow>,
    tiers: Vec<TicketTierRow>,
    choices_loaded: bool,
    list_index: usize,
}

impl PromoForm {
    pub fn new(event_id: Uuid, existing: Option<PromoCodeRow>) -> Self {
        let (existing_id, draft) = match existing {
            Some(row) => {
                let (kind, value) = stored_discount(&row);
                let draft = PromoDraft {
                    code: row.code,
                    kind,
                    value,
                    expires: row.expires_on.unwrap_or_default(),
                    scope: PromoScope::parse(&row.scope).unwrap_or(PromoScope::All),
                    group_ids: row.ticket_group_ids,
                    tier_ids: row.ticket_tier_ids,
                };
                (Some(row.id), draft)
            }
            None => (
                None,
                PromoDraft {
                    code: String::new(),
                    kind: DiscountKind::Percentage,
                    value: String::new(),
                    expires: String::new(),
                    scope: PromoScope::All,
                    group_ids: Vec::new(),
                    tier_ids: Vec::new(),
                },
            ),
        };
        let cursor = draft.code.chars().count();

        Self {
            event_id,
            existing_id,
            draft,
            focus: PromoFocus::Code,
            cursor,
            errors: Vec::new(),
            groups: Vec::new(),
            tiers: Vec::new(),
            choices_loaded: false,
            list_index: 0,
        }
    }

    pub fn event_id(&self) -> Uuid {
        self.event_id
    }

    pub fn is_edit(&self) -> bool {
        self.existing_id.is_some()
    }

    pub fn apply_scope_choices(&mut self, event_id: Uuid, groups: Vec<TicketGroupRow>, tiers: Vec<TicketTierRow>) {
        if event_id != self.event_id {
            return;
        }
        self.groups = groups;
        self.tiers = tiers;
        self.choices_loaded = true;
        self.list_index = 0;
    }

    pub fn handle_key(&mut self, key: KeyEvent) -> Action {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('s') {
            return self.submit();
        }

        match key.code {
            KeyCode::Esc => Action::HideDialog,
            KeyCode::Tab => {
                self.cycle_focus(true);
                Action::None
            }
            KeyCode::BackTab => {
                self.cycle_focus(false);
                Action::None
            }
            KeyCode::Up if self.focus == PromoFocus::Choices => {
                self.list_index = self.list_index.saturating_sub(1);
                Action::None
            }
            KeyCode::Down if self.focus == PromoFocus::Choices => {
                let len = self.choice_count();
                if len > 0 && self.list_index + 1 < len {
                    self.list_index += 1;
                }
                Action::None
            }
            KeyCode::Up => {
                self.cycle_focus(false);
                Action::None
            }
            KeyCode::Down => {
                self.cycle_focus(true);
                Action::None
            }
            KeyCode::Enter | KeyCode::Char(' ') => match self.focus {
                PromoFocus::Kind => {
                    self.draft.kind = self.draft.kind.toggle();
                    Action::None
                }
                PromoFocus::Scope => {
                    self.draft.scope = self.draft.scope.next();
                    self.list_index = 0;
                    Action::None
                }
                PromoFocus::Choices => {
                    self.toggle_choice();
                    Action::None
                }
                _ => {
                    if key.code == KeyCode::Enter {
                        self.cycle_focus(true);
                        Action::None
                    } else {
                        self.insert(' ');
                        Action::None
                    }
                }
            },
            KeyCode::Left | KeyCode::Right if self.focus == PromoFocus::Kind => {
                self.draft.kind = self.draft.kind.toggle();
                Action::None
            }
            KeyCode::Left | KeyCode::Right if self.focus == PromoFocus::Scope => {
                self.draft.scope = self.draft.scope.next();
                self.list_index = 0;
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
                self.insert(c);
                Action::None
            }
            _ => Action::None,
        }
    }

    fn insert(&mut self, c: char) {
        // The code field truncates at its maximum length as you type
        if self.focus == PromoFocus::Code && code_at_capacity(&self.draft.code) {
            return;
        }
        let mut cursor = self.cursor;
        if let Some(text) = self.focused_text_mut() {
            insert_char(text, &mut cursor, c);
        }
        self.cursor = cursor;
    }

    fn submit(&mut self) -> Action {
        match validate(&self.draft, datetime::today()) {
            Ok(valid) => Action::SavePromo {
                existing: self.existing_id,
                args: valid.into_args(self.event_id),
            },
            Err(errors) => {
                self.errors = errors;
                Action::None
            }
        }
    }

    fn choices_focusable(&self) -> bool {
        matches!(self.draft.scope, PromoScope::Groups | PromoScope::Tiers)
    }

    fn choice_count(&self) -> usize {
        match self.draft.scope {
            PromoScope::Groups => self.groups.len(),
            PromoScope::Tiers => self.tiers.len(),
            _ => 0,
        }
    }

    fn toggle_choice(&mut self) {
        match self.draft.scope {
            PromoScope::Groups => {
                if let Some(group) = self.groups.get(self.list_index) {
                    toggle_id(&mut self.draft.group_ids, group.id);
                }
            }
            PromoScope::Tiers => {
                if let Some(tier) = self.tiers.get(self.list_index) {
                    toggle_id(&mut self.draft.tier_ids, tier.id);
                }
            }
            _ => {}
        }
    }

    fn cycle_focus(&mut self, forward: bool) {
        let mut order = vec![
            PromoFocus::Code,
            PromoFocus::Kind,
            PromoFocus::Value,
            PromoFocus::Expires,
            PromoFocus::Scope,
        ];
        if self.choices_focusable() {
            order.push(PromoFocus::Choices);
        }
        let index = order.iter().position(|f| *f == self.focus).unwrap_or(0);
        let next = if forward {
            (index + 1) % order.len()
        } else {
            (index + order.len() - 1) % order.len()
        };
        self.focus = order[next];
        self.cursor = self.focused_text().map(|t| t.chars().count()).unwrap_or(0);
    }

    fn focused_text(&self) -> Option<&String> {
        match self.focus {
            PromoFocus::Code => Some(&self.draft.code),
            PromoFocus::Value => Some(&self.draft.value),
            PromoFocus::Expires => Some(&self.draft.expires),
            _ => None,
        }
    }

    fn focused_text_mut(&mut self) -> Option<&mut String> {
        match self.focus {
            PromoFocus::Code => Some(&mut self.draft.code),
            PromoFocus::Value => Some(&mut self.draft.value),
            PromoFocus::Expires => Some(&mut self.draft.expires),
            _ => None,
        }
    }

    pub fn render(&self, f: &mut Frame, icons: &IconService) {
        let area = LayoutManager::centered_rect(70, 85, f.area());
        f.render_widget(Clear, area);

        let title = if self.is_edit() {
            format!(" {} Edit Promo Code ", icons.promo())
        } else {
            format!(" {} New Promo Code ", icons.promo())
        };
        let block = create_dialog_block(&title, Color::Green);
        let inner = block.inner(area);
        f.render_widget(block, area);

        let error_lines = self.errors.len().min(4) as u16;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(3),
                Constraint::Length(error_lines),
                Constraint::Length(1),
            ])
            .split(inner);

        f.render_widget(
            create_input_paragraph(
                &self.draft.code,
                self.cursor,
                &self.field_title("Code", PromoField::Code),
                self.focus == PromoFocus::Code,
            ),
            chunks[0],
        );
        f.render_widget(
            create_selection_paragraph(
                self.draft.kind.label().to_string(),
                "Discount type",
                self.focus == PromoFocus::Kind,
            ),
            chunks[1],
        );

        let value_title = match self.draft.kind {
            DiscountKind::Percentage => self.field_title("Discount (%)", PromoField::Value),
            DiscountKind::Flat => self.field_title("Discount ($)", PromoField::Value),
        };
        f.render_widget(
            create_input_paragraph(
                &self.draft.value,
                self.cursor,
                &value_title,
                self.focus == PromoFocus::Value,
            ),
            chunks[2],
        );
        f.render_widget(
            create_input_paragraph(
                &self.draft.expires,
                self.cursor,
                &self.field_title("Expires (YYYY-MM-DD, optional)", PromoField::Expires),
                self.focus == PromoFocus::Expires,
            ),
            chunks[3],
        );
        f.render_widget(
            create_selection_paragraph(
                self.draft.scope.label().to_string(),
                &self.field_title("Applies to", PromoField::Scope),
                self.focus == PromoFocus::Scope,
            ),
            chunks[4],
        );

        self.render_choices(f, chunks[5]);

        if !self.errors.is_empty() {
            let lines: Vec<Line> = self.errors.iter().take(4).map(|e| create_error_line(&e.message)).collect();
            f.render_widget(Paragraph::new(lines), chunks[6]);
        }

        let instructions: Vec<InstructionShortcut> = vec![
            shortcuts::ENTER_SAVE,
            shortcuts::SEPARATOR,
            shortcuts::TAB_NEXT,
            shortcuts::SEPARATOR,
            shortcuts::ESC_CANCEL,
        ];
        f.render_widget(create_instructions_paragraph(&instructions), chunks[7]);
    }

    fn render_choices(&self, f: &mut Frame, area: Rect) {
        if !self.choices_focusable() {
            return;
        }

        let (label, items): (&str, Vec<ListItem>) = match self.draft.scope {
            PromoScope::Groups => (
                "Ticket groups",
                self.groups
                    .iter()
                    .map(|g| checkbox_item(&g.name, self.draft.group_ids.contains(&g.id)))
                    .collect(),
            ),
            PromoScope::Tiers => (
                "Ticket tiers",
                self.tiers
                    .iter()
                    .map(|t| {
                        let name = format!("{} (${:.2})", t.name, t.price_in_cents as f64 / 100.0);
                        checkbox_item(&name, self.draft.tier_ids.contains(&t.id))
                    })
                    .collect(),
            ),
            _ => return,
        };

        let empty_hint = if items.is_empty() {
            if self.choices_loaded {
                Some("  none defined for this event")
            } else {
                Some("  loading...")
            }
        } else {
            None
        };

        let focused = self.focus == PromoFocus::Choices;
        let border_color = if focused { Color::Cyan } else { Color::Gray };
        let block = Block::default()
            .borders(Borders::ALL)
            .border_type(BorderType::Rounded)
            .title(format!(" {} ", label))
            .style(Style::default().fg(border_color));

        if let Some(hint) = empty_hint {
            f.render_widget(Paragraph::new(hint).block(block).style(Style::default().fg(Color::DarkGray)), area);
            return;
        }

        let list = List::new(items).block(block).highlight_style(Style::default().bg(Color::DarkGray));
        let mut state = ListState::default();
        if focused {
            state.select(Some(self.list_index.min(self.choice_count().saturating_sub(1))));
        }
        f.render_stateful_widget(list, area, &mut state);
    }

    fn field_title(&self, base: &str, field: PromoField) -> String {
        if errors_for(&self.errors, field).is_empty() {
            base.to_string()
        } else {
            format!("⚠ {}", base)
        }
    }
}

fn checkbox_item(name: &str, checked: bool) -> ListItem<'static> {
    let marker = if checked { "[x]" } else { "[ ]" };
    ListItem::new(format!("{} {}", marker, name))
}

fn toggle_id(ids: &mut Vec<Uuid>, id: Uuid) {
    if let Some(position) = ids.iter().position(|existing| *existing == id) {
        ids.remove(position);
    } else {
        ids.push(id);
    }
}

fn stored_discount(row: &PromoCodeRow) -> (DiscountKind, String) {
    if let Some(percentage) = row.discount_percentage {
        (DiscountKind::Percentage, trim_float(percentage))
    } else if let Some(cents) = row.discount_in_cents {
        (DiscountKind::Flat, trim_float(cents as f64 / 100.0))
    } else {
        (DiscountKind::Percentage, String::new())
    }
}

fn trim_float(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_id_adds_then_removes() {
        let id = Uuid::new_v4();
        let mut ids = Vec::new();
        toggle_id(&mut ids, id);
        assert_eq!(ids, vec![id]);
        toggle_id(&mut ids, id);
        assert!(ids.is_empty());
    }

    #[test]
    fn test_stored_discounts_prefill_the_value_field() {
        let row = PromoCodeRow {
            id: Uuid::new_v4(),
            event_id: Uuid::new_v4(),
            code: "SUMMER".to_string(),
            discount_percentage: Some(15.0),
            discount_in_cents: None,
            expires_on: None,
            scope: "all".to_string(),
            ticket_group_ids: Vec::new(),
            ticket_tier_ids: Vec::new(),
        };
        assert_eq!(stored_discount(&row), (DiscountKind::Percentage, "15".to_string()));

        let flat = PromoCodeRow {
            discount_percentage: None,
            discount_in_cents: Some(2550),
            ..row
        };
        assert_eq!(stored_discount(&flat), (DiscountKind::Flat, "25.5".to_string()));
    }
}
