//! Modal dialog container.
//!
//! One dialog is open at a time. Entity forms carry their own input state and
//! pickers; this component owns the slot, routes actions into whichever
//! dialog is open, and closes the slot when a submit or cancel comes back out.

use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent};
use ratatui::{layout::Rect, Frame};
use uuid::Uuid;

use crate::config::GenerationDefaults;
use crate::icons::IconService;
use crate::logger::Logger;
use crate::search::EntityKind;
use crate::ui::core::{
    actions::{Action, AdminSection, DialogType},
    Component,
};

use crate::ui::components::dialogs::{
    render_delete_confirmation_dialog, render_error_dialog, render_help_dialog, render_info_dialog,
    render_logs_dialog, ArtistForm, EventForm, MockOrdersPanel, PromoForm, ScrollState, VenueForm,
};

enum ActiveDialog {
    Artist(ArtistForm),
    Venue(VenueForm),
    Event(EventForm),
    Promo(PromoForm),
    MockOrders(MockOrdersPanel),
    DeleteConfirmation {
        section: AdminSection,
        id: Uuid,
        name: String,
    },
    Info {
        message: String,
        scroll: ScrollState,
    },
    Error {
        message: String,
        scroll: ScrollState,
    },
    Help {
        scroll: ScrollState,
    },
    Logs {
        scroll: ScrollState,
    },
}

pub struct DialogComponent {
    active: Option<ActiveDialog>,
    icons: IconService,
    generation_defaults: GenerationDefaults,
    logger: Logger,
}

impl DialogComponent {
    pub fn new(generation_defaults: GenerationDefaults, logger: Logger) -> Self {
        Self {
            active: None,
            icons: IconService::default(),
            generation_defaults,
            logger,
        }
    }

    pub fn set_icons(&mut self, icons: IconService) {
        self.icons = icons;
    }

    pub fn is_visible(&self) -> bool {
        self.active.is_some()
    }

    /// Selections the open form carries as bare ids, waiting for labels.
    pub fn hydration_needs(&self) -> Vec<(EntityKind, Uuid)> {
        match &self.active {
            Some(ActiveDialog::Artist(form)) => form.hydration_needs(),
            Some(ActiveDialog::Event(form)) => form.hydration_needs(),
            _ => Vec::new(),
        }
    }

    /// Poll the open form's pickers; a due debounce turns into a search.
    pub fn tick(&mut self, now: Instant) -> Option<Action> {
        match &mut self.active {
            Some(ActiveDialog::Artist(form)) => form.tick(now),
            Some(ActiveDialog::Venue(form)) => form.tick(now),
            Some(ActiveDialog::Event(form)) => form.tick(now),
            _ => None,
        }
    }

    fn open(&mut self, dialog_type: DialogType) {
        self.active = Some(match dialog_type {
            DialogType::ArtistForm { existing, return_to } => {
                ActiveDialog::Artist(ArtistForm::new(existing, return_to))
            }
            DialogType::VenueForm { existing, return_to } => ActiveDialog::Venue(VenueForm::new(existing, return_to)),
            DialogType::EventForm { existing, resume } => match resume {
                Some(resume) => ActiveDialog::Event(EventForm::resume(*resume)),
                None => ActiveDialog::Event(EventForm::new(existing)),
            },
            DialogType::PromoForm { event_id, existing } => ActiveDialog::Promo(PromoForm::new(event_id, existing)),
            DialogType::MockOrders { event_id, event_name } => {
                ActiveDialog::MockOrders(MockOrdersPanel::new(event_id, event_name, &self.generation_defaults))
            }
            DialogType::DeleteConfirmation { section, id, name } => {
                ActiveDialog::DeleteConfirmation { section, id, name }
            }
            DialogType::Info(message) => ActiveDialog::Info {
                message,
                scroll: ScrollState::default(),
            },
            DialogType::Error(message) => ActiveDialog::Error {
                message,
                scroll: ScrollState::default(),
            },
            DialogType::Help => ActiveDialog::Help {
                scroll: ScrollState::default(),
            },
            DialogType::Logs => ActiveDialog::Logs {
                scroll: ScrollState::default(),
            },
        });
    }

    fn handle_scroll_key(scroll: &mut ScrollState, key: KeyEvent) -> bool {
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => scroll.up(),
            KeyCode::Down | KeyCode::Char('j') => scroll.down(),
            KeyCode::PageUp => scroll.page_up(),
            KeyCode::PageDown => scroll.page_down(),
            KeyCode::Home => scroll.to_top(),
            KeyCode::End => scroll.to_bottom(),
            _ => return false,
        }
        true
    }
}

impl Component for DialogComponent {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action {
        match &mut self.active {
            None => Action::None,
            Some(ActiveDialog::Artist(form)) => form.handle_key(key),
            Some(ActiveDialog::Venue(form)) => form.handle_key(key),
            Some(ActiveDialog::Event(form)) => form.handle_key(key),
            Some(ActiveDialog::Promo(form)) => form.handle_key(key),
            Some(ActiveDialog::MockOrders(panel)) => panel.handle_key(key),
            Some(ActiveDialog::DeleteConfirmation { section, id, .. }) => match key.code {
                KeyCode::Char('y') | KeyCode::Enter => Action::DeleteEntity {
                    section: *section,
                    id: *id,
                },
                KeyCode::Char('n') | KeyCode::Esc => Action::HideDialog,
                _ => Action::None,
            },
            Some(ActiveDialog::Info { scroll, .. }) | Some(ActiveDialog::Error { scroll, .. }) => {
                if Self::handle_scroll_key(scroll, key) {
                    Action::None
                } else {
                    // Any other key dismisses the dialog
                    Action::HideDialog
                }
            }
            Some(ActiveDialog::Help { scroll }) => match key.code {
                KeyCode::Esc | KeyCode::Char('?') | KeyCode::Char('h') => Action::HideDialog,
                _ => {
                    Self::handle_scroll_key(scroll, key);
                    Action::None
                }
            },
            Some(ActiveDialog::Logs { scroll }) => match key.code {
                KeyCode::Esc | KeyCode::Char('G') | KeyCode::Char('q') => Action::HideDialog,
                _ => {
                    Self::handle_scroll_key(scroll, key);
                    Action::None
                }
            },
        }
    }

    fn update(&mut self, action: Action) -> Action {
        match action {
            Action::ShowDialog(dialog_type) => {
                // Construct here, pass the action on so the app can kick off
                // the loads the new dialog is waiting for.
                self.open(dialog_type.clone());
                Action::ShowDialog(dialog_type)
            }
            Action::HideDialog => {
                self.active = None;
                Action::HideDialog
            }
            // A submitted form or confirmed delete closes the slot; the app
            // picks the action up from here.
            Action::SaveArtist { .. }
            | Action::SaveVenue { .. }
            | Action::SaveEvent { .. }
            | Action::SavePromo { .. }
            | Action::DeleteEntity { .. } => {
                self.active = None;
                action
            }
            Action::SearchLoaded(response) => {
                match &mut self.active {
                    Some(ActiveDialog::Artist(form)) => form.apply_search(&response),
                    Some(ActiveDialog::Venue(form)) => form.apply_search(&response),
                    Some(ActiveDialog::Event(form)) => form.apply_search(&response),
                    _ => {}
                }
                Action::None
            }
            Action::RecentsLoaded { kind, hits } => {
                match &mut self.active {
                    Some(ActiveDialog::Artist(form)) => form.apply_recents(kind, hits),
                    Some(ActiveDialog::Venue(form)) => form.apply_recents(kind, hits),
                    Some(ActiveDialog::Event(form)) => form.apply_recents(kind, hits),
                    _ => {}
                }
                Action::None
            }
            Action::HydrateLoaded { kind, hit } => {
                match &mut self.active {
                    Some(ActiveDialog::Artist(form)) => form.apply_hydrated(kind, &hit),
                    Some(ActiveDialog::Event(form)) => form.apply_hydrated(kind, &hit),
                    _ => {}
                }
                Action::None
            }
            Action::ScopeChoicesLoaded {
                event_id,
                groups,
                tiers,
            } => {
                if let Some(ActiveDialog::Promo(form)) = &mut self.active {
                    form.apply_scope_choices(event_id, groups, tiers);
                }
                Action::None
            }
            Action::GenerationProgressed(progress) => {
                if let Some(ActiveDialog::MockOrders(panel)) = &mut self.active {
                    panel.apply_progress(&progress);
                }
                Action::None
            }
            Action::GenerationFinished { event_id, outcome } => {
                if let Some(ActiveDialog::MockOrders(panel)) = &mut self.active {
                    panel.apply_finished(event_id, outcome);
                }
                // The app still clears its generation slot
                Action::GenerationFinished { event_id, outcome }
            }
            Action::GenerationFailed { event_id, error } => {
                if let Some(ActiveDialog::MockOrders(panel)) = &mut self.active {
                    panel.apply_failed(event_id);
                }
                Action::GenerationFailed { event_id, error }
            }
            Action::MockOrdersCleared { event_id, affected } => {
                if let Some(ActiveDialog::MockOrders(panel)) = &mut self.active {
                    panel.apply_cleared(event_id, affected);
                }
                Action::None
            }
            Action::ProgressSnapshotLoaded { event_id, progress } => {
                if let Some(ActiveDialog::MockOrders(panel)) = &mut self.active {
                    panel.apply_snapshot(event_id, progress);
                }
                Action::None
            }
            _ => action,
        }
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let icons = self.icons.clone();
        match &mut self.active {
            None => {}
            Some(ActiveDialog::Artist(form)) => form.render(f, &icons),
            Some(ActiveDialog::Venue(form)) => form.render(f, &icons),
            Some(ActiveDialog::Event(form)) => form.render(f, &icons),
            Some(ActiveDialog::Promo(form)) => form.render(f, &icons),
            Some(ActiveDialog::MockOrders(panel)) => panel.render(f, &icons),
            Some(ActiveDialog::DeleteConfirmation { section, name, .. }) => {
                render_delete_confirmation_dialog(f, rect, &icons, *section, name);
            }
            Some(ActiveDialog::Info { message, scroll }) => {
                render_info_dialog(f, rect, &icons, message, scroll);
            }
            Some(ActiveDialog::Error { message, scroll }) => {
                render_error_dialog(f, rect, &icons, message, scroll);
            }
            Some(ActiveDialog::Help { scroll }) => {
                render_help_dialog(f, rect, scroll);
            }
            Some(ActiveDialog::Logs { scroll }) => {
                let logger = self.logger.clone();
                render_logs_dialog(f, rect, &logger, scroll);
            }
        }
    }
}
