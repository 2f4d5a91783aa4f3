//! Root component of the console.
//!
//! Owns the section state, routes terminal input to whichever component
//! should see it first, and turns the actions they emit into background
//! work through the [`TaskManager`]. Results come back over the action
//! channel and are drained on every tick.

use std::sync::Arc;
use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{layout::Rect, Frame};
use tokio::sync::mpsc;

use crate::api::{ApiClient, ObjectStorage};
use crate::config::Config;
use crate::constants::SUCCESS_GENERATION_DONE;
use crate::icons::IconService;
use crate::logger::Logger;
use crate::models::{ArtistRow, EventOverviewRow, OrganizationRow, PromoCodeRow, VenueRow};
use crate::search::{self, EntityKind, SearchSource};
use crate::store::LocalStore;
use crate::ui::components::{DialogComponent, RosterComponent, SidebarComponent, StatusBar};
use crate::ui::core::actions::EventResume;
use crate::ui::core::{
    Action, AdminSection, Component, DialogType, EventType, ReturnTo, SectionData, TaskId, TaskManager, TaskResult,
};
use crate::ui::layout::LayoutManager;

/// Rows loaded so far, kept per section so switching back is instant.
#[derive(Default)]
pub struct AppState {
    pub section: AdminSection,
    pub events: Vec<EventOverviewRow>,
    pub artists: Vec<ArtistRow>,
    pub venues: Vec<VenueRow>,
    pub organizations: Vec<OrganizationRow>,
    pub promo_codes: Vec<PromoCodeRow>,
    pub loading: bool,
}

pub struct AppComponent {
    sidebar: SidebarComponent,
    roster: RosterComponent,
    dialog: DialogComponent,
    state: AppState,

    api: ApiClient,
    storage: ObjectStorage,
    store: LocalStore,
    config: Config,
    icons: IconService,

    task_manager: TaskManager,
    background_action_rx: mpsc::UnboundedReceiver<Action>,
    logger: Logger,

    should_quit: bool,
    /// At most one generation runs at a time; the task id lets a vanished
    /// task clear the slot even if its final action got lost.
    active_generation: Option<(TaskId, uuid::Uuid)>,
    /// Where the sidebar landed on the last draw, for mouse hit testing.
    sidebar_area: Rect,
}

impl AppComponent {
    pub fn new(api: ApiClient, storage: ObjectStorage, store: LocalStore, config: Config, logger: Logger) -> Self {
        let (task_manager, background_action_rx) = TaskManager::new();
        let section = AdminSection::parse(&config.ui.default_section).unwrap_or_default();

        let mut app = Self {
            sidebar: SidebarComponent::new(),
            roster: RosterComponent::new(),
            dialog: DialogComponent::new(config.generation.clone(), logger.clone()),
            state: AppState {
                section,
                ..AppState::default()
            },
            api,
            storage,
            store,
            config,
            icons: IconService::default(),
            task_manager,
            background_action_rx,
            logger,
            should_quit: false,
            active_generation: None,
            sidebar_area: Rect::default(),
        };
        app.sync_component_data();
        app
    }

    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Kick off the first section load before the event loop starts.
    pub fn trigger_initial_load(&mut self) {
        self.state.loading = true;
        self.task_manager.spawn_section_load(self.api.clone(), self.state.section);
        self.logger
            .log(format!("Loading {} on startup", self.state.section.title().to_lowercase()));
        self.sync_component_data();
    }

    /// Route one terminal event to the component that should see it.
    ///
    /// An open dialog takes every key. Otherwise the sidebar gets a shot
    /// (section switching), then the roster (row keys), then the global
    /// bindings.
    pub async fn handle_event(&mut self, event: EventType) -> anyhow::Result<()> {
        match event {
            EventType::Key(key) => {
                let action = if self.dialog.is_visible() {
                    self.dialog.handle_key_events(key)
                } else {
                    let mut action = self.sidebar.handle_key_events(key);
                    if matches!(action, Action::None) {
                        action = self.roster.handle_key_events(key);
                    }
                    if matches!(action, Action::None) {
                        action = self.handle_global_key(key);
                    }
                    action
                };
                self.dispatch(action).await;
            }
            EventType::Mouse(mouse) => {
                if self.config.ui.mouse_enabled && !self.dialog.is_visible() {
                    let action = self.sidebar.handle_mouse(mouse, self.sidebar_area);
                    self.dispatch(action).await;
                }
            }
            // The next draw picks up the new size on its own.
            EventType::Resize(_, _) => {}
            EventType::Tick | EventType::Other => {}
        }
        Ok(())
    }

    /// Advance everything time based: picker debounce windows and the
    /// results of finished background tasks. Returns whether anything
    /// happened, so the caller knows to redraw.
    pub async fn process_tick(&mut self) -> bool {
        let mut worked = false;

        if let Some(action) = self.dialog.tick(Instant::now()) {
            self.dispatch(action).await;
            worked = true;
        }

        let actions = self.process_background_actions();
        if !actions.is_empty() {
            worked = true;
        }
        for action in actions {
            self.dispatch(action).await;
        }

        worked
    }

    /// Drain the action channel and clean up finished tasks.
    pub fn process_background_actions(&mut self) -> Vec<Action> {
        let mut actions = Vec::new();
        while let Ok(action) = self.background_action_rx.try_recv() {
            actions.push(action);
        }

        for (task_id, result) in self.task_manager.cleanup_finished_tasks() {
            if matches!(self.active_generation, Some((id, _)) if id == task_id) {
                self.active_generation = None;
            }
            match result {
                Ok(TaskResult::Other(summary)) => self.logger.log(format!("Task {}: {}", task_id, summary)),
                Ok(summary) => self.logger.log(format!("Task {}: {:?}", task_id, summary)),
                Err(e) => self.logger.log(format!("Task {} failed: {}", task_id, e)),
            }
        }

        actions
    }

    /// Run an action through the component chain, then act on whatever
    /// survives. Follow-ups re-enter the chain until one step consumes
    /// them; every chain ends after a few hops.
    async fn dispatch(&mut self, mut action: Action) {
        while !matches!(action, Action::None) {
            let routed = self.update(action);
            action = self.handle_app_action(routed).await;
        }
    }

    fn handle_global_key(&mut self, key: KeyEvent) -> Action {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.logger.log("Ctrl+C pressed, quitting".to_string());
                Action::Quit
            }
            KeyCode::Char('q') => {
                self.logger.log("Quit requested".to_string());
                Action::Quit
            }
            KeyCode::Esc => {
                self.logger.log("Esc with no dialog open, quitting".to_string());
                Action::Quit
            }
            KeyCode::Char('?') | KeyCode::Char('h') => Action::ShowDialog(DialogType::Help),
            KeyCode::Char('G') => Action::ShowDialog(DialogType::Logs),
            KeyCode::Char('i') => Action::CycleIconTheme,
            KeyCode::Char('r') => {
                self.logger.log("Manual refresh".to_string());
                Action::RefreshData
            }
            _ => Action::None,
        }
    }

    /// App-level handling for actions the components passed through.
    /// Returns a follow-up action for the dispatch loop, or `None`.
    pub async fn handle_app_action(&mut self, action: Action) -> Action {
        match action {
            Action::Quit => {
                self.should_quit = true;
                Action::None
            }

            Action::NavigateToSection(section) => {
                self.state.section = section;
                self.state.loading = true;
                self.task_manager.spawn_section_load(self.api.clone(), section);
                self.sync_component_data();
                self.logger.log(format!("Switched to {}", section.title().to_lowercase()));
                Action::None
            }

            Action::RowsLoaded(data) => {
                let section = data.section();
                let count = data.len();
                if section == self.state.section {
                    self.state.loading = false;
                }
                match data {
                    SectionData::Events(rows) => self.state.events = rows,
                    SectionData::Artists(rows) => self.state.artists = rows,
                    SectionData::Venues(rows) => self.state.venues = rows,
                    SectionData::Organizations(rows) => self.state.organizations = rows,
                    SectionData::PromoCodes(rows) => self.state.promo_codes = rows,
                }
                self.sync_component_data();
                self.logger
                    .log(format!("Loaded {} {}", count, section.title().to_lowercase()));
                Action::None
            }

            Action::RefreshData => {
                self.state.loading = true;
                self.task_manager.spawn_section_load(self.api.clone(), self.state.section);
                self.sync_component_data();
                Action::None
            }

            Action::SearchIssued(request) => {
                self.logger
                    .log(format!("Search {}: '{}'", request.kind.as_str(), request.query));
                let source = source_for(request.kind);
                self.task_manager.spawn_search(self.api.clone(), source, request);
                Action::None
            }

            Action::RecentsRequested(kind) => {
                self.task_manager.spawn_recents_load(self.store.clone(), kind);
                Action::None
            }

            Action::HydrateRequested { kind, id } => {
                self.task_manager.spawn_hydrate(self.api.clone(), source_for(kind), id);
                Action::None
            }

            Action::RecordRecent { kind, hit } => {
                self.task_manager.spawn_recent_record(self.store.clone(), kind, hit);
                Action::None
            }

            Action::SaveArtist {
                existing,
                args,
                image_path,
                return_to,
            } => {
                self.logger.log(format!("Saving artist '{}'", args.name));
                self.task_manager.spawn_artist_save(
                    self.api.clone(),
                    self.storage.clone(),
                    existing,
                    args,
                    image_path,
                    return_to,
                );
                Action::None
            }

            Action::SaveVenue {
                existing,
                args,
                return_to,
            } => {
                self.logger.log(format!("Saving venue '{}'", args.name));
                self.task_manager
                    .spawn_venue_save(self.api.clone(), existing, args, return_to);
                Action::None
            }

            Action::SaveEvent { existing, args } => {
                self.logger.log(format!("Saving event '{}'", args.name));
                self.task_manager.spawn_event_save(self.api.clone(), existing, args);
                Action::None
            }

            Action::SavePromo { existing, args } => {
                self.logger.log(format!("Saving promo code '{}'", args.code));
                self.task_manager.spawn_promo_save(self.api.clone(), existing, args);
                Action::None
            }

            Action::DeleteEntity { section, id } => {
                self.logger.log(format!("Deleting {} {}", section.singular(), id));
                self.task_manager.spawn_delete(self.api.clone(), section, id);
                Action::None
            }

            Action::EditEvent(id) => {
                self.logger.log(format!("Fetching event {} for editing", id));
                self.task_manager.spawn_event_fetch(self.api.clone(), id);
                Action::None
            }

            Action::EntityCreated { kind, hit, return_to } => {
                self.task_manager
                    .spawn_recent_record(self.store.clone(), kind, hit.clone());
                match return_to {
                    Some(ReturnTo::EventForm(draft)) => {
                        self.logger
                            .log(format!("Resuming event form with new {} '{}'", kind.as_str(), hit.label));
                        Action::ShowDialog(DialogType::EventForm {
                            existing: None,
                            resume: Some(Box::new(EventResume {
                                draft: *draft,
                                kind,
                                hit,
                            })),
                        })
                    }
                    None => Action::None,
                }
            }

            Action::StartGeneration { event_id, config } => {
                if self.active_generation.is_some() {
                    self.logger.log("Generation refused: one is already running".to_string());
                    Action::ShowDialog(DialogType::Info(
                        "A mock order generation is already running. Wait for it to finish.".to_string(),
                    ))
                } else {
                    let task_id =
                        self.task_manager
                            .spawn_generation(self.api.clone(), self.store.clone(), event_id, config);
                    self.active_generation = Some((task_id, event_id));
                    self.logger
                        .log(format!("Mock order generation started for event {}", event_id));
                    Action::None
                }
            }

            Action::GenerationFinished { event_id, outcome } => {
                if matches!(self.active_generation, Some((_, id)) if id == event_id) {
                    self.active_generation = None;
                }
                self.logger.log(format!(
                    "{}: {} orders, {} tickets, {} RSVPs",
                    SUCCESS_GENERATION_DONE, outcome.orders, outcome.tickets, outcome.rsvps
                ));
                Action::None
            }

            Action::GenerationFailed { event_id, error } => {
                if matches!(self.active_generation, Some((_, id)) if id == event_id) {
                    self.active_generation = None;
                }
                self.logger.log(error.clone());
                Action::ShowDialog(DialogType::Error(error))
            }

            Action::ClearMockOrders(event_id) => {
                self.logger.log(format!("Clearing mock orders for event {}", event_id));
                self.task_manager
                    .spawn_clear_mock_orders(self.api.clone(), self.store.clone(), event_id);
                Action::None
            }

            Action::OpenEventLink(event_id) => {
                // The console cannot launch a browser; count the click and
                // hand the operator the path to visit.
                self.logger.log(format!("Public link requested for event {}", event_id));
                self.task_manager.spawn_click_increment(self.api.clone(), event_id);
                Action::ShowDialog(DialogType::Info(format!(
                    "Click counted. Public page path: /events/{}",
                    event_id
                )))
            }

            Action::ClickCountUpdated { event_id, count } => {
                if let Some(row) = self.state.events.iter_mut().find(|e| e.id == event_id) {
                    row.click_count = count;
                    self.sync_component_data();
                }
                self.logger.log(format!("Event {} click count now {}", event_id, count));
                Action::None
            }

            Action::ShowDialog(dialog_type) => {
                // The dialog component already built the form when this
                // passed through the chain; start the loads it waits on.
                match &dialog_type {
                    DialogType::PromoForm { event_id, .. } => {
                        self.task_manager.spawn_scope_choices_load(self.api.clone(), *event_id);
                    }
                    DialogType::MockOrders { event_id, .. } => {
                        self.task_manager.spawn_progress_load(self.store.clone(), *event_id);
                    }
                    _ => {}
                }
                for (kind, id) in self.dialog.hydration_needs() {
                    self.task_manager.spawn_hydrate(self.api.clone(), source_for(kind), id);
                }
                self.logger.log(format!("Opened {} dialog", dialog_label(&dialog_type)));
                Action::None
            }

            Action::HideDialog => {
                self.logger.log("Dialog closed".to_string());
                Action::None
            }

            Action::CycleIconTheme => {
                self.icons.cycle_icon_theme();
                self.sync_component_data();
                self.logger.log(format!("Icon theme now {:?}", self.icons.theme()));
                Action::None
            }

            // Routed into the open dialog or the roster by the component
            // chain; nothing is left to do if they reach this far.
            Action::SearchLoaded(_)
            | Action::RecentsLoaded { .. }
            | Action::HydrateLoaded { .. }
            | Action::ScopeChoicesLoaded { .. }
            | Action::GenerationProgressed(_)
            | Action::MockOrdersCleared { .. }
            | Action::ProgressSnapshotLoaded { .. }
            | Action::NextRow
            | Action::PreviousRow => Action::None,

            Action::None => Action::None,
        }
    }

    /// Push the current section's rows, icons, and display settings into
    /// the components that draw them.
    fn sync_component_data(&mut self) {
        let data = match self.state.section {
            AdminSection::Events => SectionData::Events(self.state.events.clone()),
            AdminSection::Artists => SectionData::Artists(self.state.artists.clone()),
            AdminSection::Venues => SectionData::Venues(self.state.venues.clone()),
            AdminSection::Organizations => SectionData::Organizations(self.state.organizations.clone()),
            AdminSection::PromoCodes => SectionData::PromoCodes(self.state.promo_codes.clone()),
        };
        self.roster.update_data(self.state.section, Some(data), self.state.loading);
        self.roster.icons = self.icons.clone();
        self.roster.display = self.config.display.clone();
        self.sidebar.set_section(self.state.section);
        self.sidebar.icons = self.icons.clone();
        self.dialog.set_icons(self.icons.clone());
    }
}

impl Component for AppComponent {
    fn handle_key_events(&mut self, _key: KeyEvent) -> Action {
        // Key routing happens in handle_event, which needs async dispatch.
        Action::None
    }

    fn update(&mut self, action: Action) -> Action {
        let action = self.dialog.update(action);
        if matches!(action, Action::None) {
            return Action::None;
        }
        let action = self.sidebar.update(action);
        if matches!(action, Action::None) {
            return Action::None;
        }
        self.roster.update(action)
    }

    fn render(&mut self, f: &mut Frame, rect: Rect) {
        let chunks = LayoutManager::main_layout(rect);
        let panes = LayoutManager::top_pane_layout(chunks[0], self.config.ui.sidebar_width);
        self.sidebar_area = panes[0];

        self.sidebar.render(f, panes[0]);
        self.roster.render(f, panes[1]);
        StatusBar::render(
            f,
            chunks[1],
            self.state.loading,
            self.task_manager.task_count(),
            self.active_generation.is_some(),
        );

        if self.dialog.is_visible() {
            self.dialog.render(f, rect);
        }
    }
}

fn source_for(kind: EntityKind) -> Arc<dyn SearchSource> {
    match kind {
        EntityKind::Event => search::event_source(),
        EntityKind::Artist => search::artist_source(),
        EntityKind::Venue => search::venue_source(),
        EntityKind::Organization => search::organization_source(),
        EntityKind::City => search::city_source(),
        EntityKind::Gallery => search::gallery_source(),
        EntityKind::User => search::user_source(),
    }
}

fn dialog_label(dialog_type: &DialogType) -> &'static str {
    match dialog_type {
        DialogType::ArtistForm { .. } => "artist form",
        DialogType::VenueForm { .. } => "venue form",
        DialogType::EventForm { .. } => "event form",
        DialogType::PromoForm { .. } => "promo form",
        DialogType::MockOrders { .. } => "mock orders",
        DialogType::DeleteConfirmation { .. } => "delete confirmation",
        DialogType::Error(_) => "error",
        DialogType::Info(_) => "info",
        DialogType::Help => "help",
        DialogType::Logs => "logs",
    }
}
