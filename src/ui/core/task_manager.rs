use super::actions::{Action, AdminSection, DialogType, ReturnTo, SectionData};
use crate::api::{ApiClient, Filter, ObjectStorage, SelectQuery};
use crate::constants::{
    ERROR_ARTIST_SAVE_FAILED, ERROR_CLEAR_MOCK_FAILED, ERROR_DELETE_FAILED, ERROR_EVENT_SAVE_FAILED,
    ERROR_GENERATION_FAILED, ERROR_LOAD_FAILED, ERROR_PROMO_SAVE_FAILED, ERROR_UPLOAD_FAILED,
    ERROR_VENUE_SAVE_FAILED, SECTION_ROWS_LIMIT, SUCCESS_ARTIST_CREATED, SUCCESS_ARTIST_UPDATED,
    SUCCESS_ENTITY_DELETED, SUCCESS_EVENT_CREATED, SUCCESS_EVENT_UPDATED, SUCCESS_MOCK_DATA_CLEARED,
    SUCCESS_PROMO_SAVED, SUCCESS_VENUE_CREATED, SUCCESS_VENUE_UPDATED,
};
use crate::media;
use crate::mock::{self, GenerationConfig, GenerationOutcome};
use crate::models::{
    ArtistArgs, ArtistRow, EventArgs, EventOverviewRow, EventRow, OrganizationRow, PromoCodeArgs, PromoCodeRow,
    TicketGroupRow, TicketTierRow, VenueArgs, VenueRow,
};
use crate::search::{EntityKind, SearchHit, SearchRequest, SearchResponse, SearchSource};
use crate::store::LocalStore;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use uuid::Uuid;

pub type TaskId = u64;

#[derive(Debug)]
pub struct BackgroundTask {
    pub id: TaskId,
    pub handle: JoinHandle<anyhow::Result<TaskResult>>,
    pub description: String,
    pub started_at: std::time::Instant,
}

/// Summary of what a finished task did. The data itself has already gone
/// out over the action channel by the time this exists.
#[derive(Debug, Clone)]
pub enum TaskResult {
    RowsLoaded { section: AdminSection, count: usize },
    SearchCompleted { kind: EntityKind, query: String, hits: usize },
    OperationCompleted(String),
    GenerationCompleted(GenerationOutcome),
    Other(String),
}

/// Spawns and tracks every background task the console runs: section
/// loads, picker searches, entity writes, uploads, RPCs, and mock order
/// generation. Results come back to the UI as [`Action`]s on the channel
/// handed out by [`TaskManager::new`].
pub struct TaskManager {
    tasks: HashMap<TaskId, BackgroundTask>,
    next_task_id: TaskId,
    action_sender: mpsc::UnboundedSender<Action>,
}

impl TaskManager {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<Action>) {
        let (tx, rx) = mpsc::unbounded_channel();

        (
            Self {
                tasks: HashMap::new(),
                next_task_id: 1,
                action_sender: tx,
            },
            rx,
        )
    }

    fn register(&mut self, handle: JoinHandle<anyhow::Result<TaskResult>>, description: String) -> TaskId {
        let task_id = self.next_task_id;
        self.next_task_id += 1;

        let task = BackgroundTask {
            id: task_id,
            handle,
            description,
            started_at: std::time::Instant::now(),
        };
        self.tasks.insert(task_id, task);
        task_id
    }

    /// Load the rows for a sidebar section.
    pub fn spawn_section_load(&mut self, api: ApiClient, section: AdminSection) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Loading {}", section.title().to_lowercase());

        let handle = tokio::spawn(async move {
            let loaded: Result<SectionData, crate::api::ApiError> = match section {
                AdminSection::Events => {
                    let query = SelectQuery::new("id,name,event_start,venue_name,headliner_name,click_count")
                        .order_desc("event_start")
                        .limit(SECTION_ROWS_LIMIT);
                    api.select::<EventOverviewRow>("events_overview", &query)
                        .await
                        .map(SectionData::Events)
                }
                AdminSection::Artists => {
                    let query = SelectQuery::new("id,name,bio,image_url,organization_id")
                        .order_asc("name")
                        .limit(SECTION_ROWS_LIMIT);
                    api.select::<ArtistRow>("artists", &query).await.map(SectionData::Artists)
                }
                AdminSection::Venues => {
                    let query = SelectQuery::new("id,name,address,city")
                        .order_asc("name")
                        .limit(SECTION_ROWS_LIMIT);
                    api.select::<VenueRow>("venues", &query).await.map(SectionData::Venues)
                }
                AdminSection::Organizations => {
                    let query = SelectQuery::new("id,name,city").order_asc("name").limit(SECTION_ROWS_LIMIT);
                    api.select::<OrganizationRow>("organizations", &query)
                        .await
                        .map(SectionData::Organizations)
                }
                AdminSection::PromoCodes => {
                    let query = SelectQuery::new(
                        "id,event_id,code,discount_percentage,discount_in_cents,expires_on,scope,ticket_group_ids,ticket_tier_ids",
                    )
                    .order_asc("code")
                    .limit(SECTION_ROWS_LIMIT);
                    api.select::<PromoCodeRow>("promo_codes", &query).await.map(SectionData::PromoCodes)
                }
            };

            match loaded {
                Ok(data) => {
                    let count = data.len();
                    let _ = action_sender.send(Action::RowsLoaded(data));
                    Ok(TaskResult::RowsLoaded { section, count })
                }
                Err(e) => {
                    let error_msg = format!("{}: {}", ERROR_LOAD_FAILED, e);
                    let _ = action_sender.send(Action::ShowDialog(DialogType::Error(error_msg.clone())));
                    Ok(TaskResult::Other(error_msg))
                }
            }
        });

        self.register(handle, description)
    }

    /// Run a picker search against its source.
    ///
    /// Failures never surface as dialogs: the picker gets an empty result
    /// set carrying the request's sequence number and the error goes to the
    /// log.
    pub fn spawn_search(&mut self, api: ApiClient, source: Arc<dyn SearchSource>, request: SearchRequest) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Searching {}: '{}'", request.kind.as_str(), request.query);

        let handle = tokio::spawn(async move {
            let hits = match source.search(&api, &request.query, &request.extra).await {
                Ok(hits) => hits,
                Err(e) => {
                    log::warn!("{} search for '{}' failed: {}", request.kind.as_str(), request.query, e);
                    Vec::new()
                }
            };

            let count = hits.len();
            let response = SearchResponse {
                kind: request.kind,
                query: request.query.clone(),
                seq: request.seq,
                hits,
            };
            let _ = action_sender.send(Action::SearchLoaded(response));

            Ok(TaskResult::SearchCompleted {
                kind: request.kind,
                query: request.query,
                hits: count,
            })
        });

        self.register(handle, description)
    }

    /// Resolve the display hit for a picker opened on an existing id.
    pub fn spawn_hydrate(&mut self, api: ApiClient, source: Arc<dyn SearchSource>, id: Uuid) -> TaskId {
        let action_sender = self.action_sender.clone();
        let kind = source.kind();
        let description = format!("Hydrating {} {}", kind.as_str(), id);

        let handle = tokio::spawn(async move {
            match source.hydrate(&api, id).await {
                Ok(Some(hit)) => {
                    let _ = action_sender.send(Action::HydrateLoaded { kind, hit });
                }
                Ok(None) => {
                    log::warn!("{} {} not found during hydration", kind.as_str(), id);
                }
                Err(e) => {
                    log::warn!("hydrating {} {} failed: {}", kind.as_str(), id, e);
                }
            }
            Ok(TaskResult::Other(format!("Hydrated {}", kind.as_str())))
        });

        self.register(handle, description)
    }

    /// Load the remembered selections for a picker's empty-query state.
    pub fn spawn_recents_load(&mut self, store: LocalStore, kind: EntityKind) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Loading recent {}s", kind.as_str());

        let handle = tokio::spawn(async move {
            let hits = store.recents_for(kind).await;
            let count = hits.len();
            let _ = action_sender.send(Action::RecentsLoaded { kind, hits });
            Ok(TaskResult::Other(format!("Loaded {} recent {}s", count, kind.as_str())))
        });

        self.register(handle, description)
    }

    /// Remember a confirmed picker selection. Fire and forget.
    pub fn spawn_recent_record(&mut self, store: LocalStore, kind: EntityKind, hit: SearchHit) -> TaskId {
        let description = format!("Recording recent {}", kind.as_str());

        let handle = tokio::spawn(async move {
            if let Err(e) = store.record_recent(kind, &hit).await {
                log::warn!("recording recent {} failed: {}", kind.as_str(), e);
            }
            Ok(TaskResult::Other(format!("Recorded recent {}", kind.as_str())))
        });

        self.register(handle, description)
    }

    /// Create or update an artist, uploading the image first when one was
    /// picked. New artists are inserted before the upload so the storage
    /// object can be named after their id.
    pub fn spawn_artist_save(
        &mut self,
        api: ApiClient,
        storage: ObjectStorage,
        existing: Option<Uuid>,
        args: ArtistArgs,
        image_path: Option<PathBuf>,
        return_to: Option<ReturnTo>,
    ) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Saving artist '{}'", args.name);

        let handle = tokio::spawn(async move {
            let result: anyhow::Result<(SearchHit, &'static str)> = async {
                match existing {
                    Some(id) => {
                        let image_url = match image_path {
                            Some(ref path) => {
                                let prepared = media::prepare_file(path)?;
                                let object = media::object_name("artists", id, prepared.kind);
                                Some(storage.upload(&object, prepared.bytes, prepared.kind.content_type()).await?)
                            }
                            None => args.image_url.clone(),
                        };
                        let patch = ArtistArgs { image_url, ..args.clone() };
                        api.update("artists", &[Filter::eq("id", id)], &patch).await?;
                        Ok((SearchHit::new(id, patch.name), SUCCESS_ARTIST_UPDATED))
                    }
                    None => {
                        let created: ArtistRow = api.insert_one("artists", &args).await?;
                        if let Some(ref path) = image_path {
                            let prepared = media::prepare_file(path)?;
                            let object = media::object_name("artists", created.id, prepared.kind);
                            let url = storage.upload(&object, prepared.bytes, prepared.kind.content_type()).await?;
                            api.update(
                                "artists",
                                &[Filter::eq("id", created.id)],
                                &serde_json::json!({ "image_url": url }),
                            )
                            .await?;
                        }
                        Ok((SearchHit::new(created.id, created.name), SUCCESS_ARTIST_CREATED))
                    }
                }
            }
            .await;

            match result {
                Ok((hit, message)) => {
                    let _ = action_sender.send(Action::RefreshData);
                    if return_to.is_some() {
                        let _ = action_sender.send(Action::EntityCreated {
                            kind: EntityKind::Artist,
                            hit,
                            return_to,
                        });
                    }
                    Ok(TaskResult::OperationCompleted(message.to_string()))
                }
                Err(e) => {
                    // An image that fails preparation mid-save is an upload
                    // problem, not a row problem
                    let prefix = if e.downcast_ref::<media::MediaError>().is_some() {
                        ERROR_UPLOAD_FAILED
                    } else {
                        ERROR_ARTIST_SAVE_FAILED
                    };
                    let error_msg = format!("{}: {}", prefix, e);
                    let _ = action_sender.send(Action::ShowDialog(DialogType::Error(error_msg.clone())));
                    Ok(TaskResult::Other(error_msg))
                }
            }
        });

        self.register(handle, description)
    }

    /// Create or update a venue.
    pub fn spawn_venue_save(
        &mut self,
        api: ApiClient,
        existing: Option<Uuid>,
        args: VenueArgs,
        return_to: Option<ReturnTo>,
    ) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Saving venue '{}'", args.name);

        let handle = tokio::spawn(async move {
            let result: anyhow::Result<(SearchHit, &'static str)> = async {
                match existing {
                    Some(id) => {
                        api.update("venues", &[Filter::eq("id", id)], &args).await?;
                        Ok((SearchHit::new(id, args.name), SUCCESS_VENUE_UPDATED))
                    }
                    None => {
                        let created: VenueRow = api.insert_one("venues", &args).await?;
                        Ok((SearchHit::new(created.id, created.name), SUCCESS_VENUE_CREATED))
                    }
                }
            }
            .await;

            match result {
                Ok((hit, message)) => {
                    let _ = action_sender.send(Action::RefreshData);
                    if return_to.is_some() {
                        let _ = action_sender.send(Action::EntityCreated {
                            kind: EntityKind::Venue,
                            hit,
                            return_to,
                        });
                    }
                    Ok(TaskResult::OperationCompleted(message.to_string()))
                }
                Err(e) => {
                    let error_msg = format!("{}: {}", ERROR_VENUE_SAVE_FAILED, e);
                    let _ = action_sender.send(Action::ShowDialog(DialogType::Error(error_msg.clone())));
                    Ok(TaskResult::Other(error_msg))
                }
            }
        });

        self.register(handle, description)
    }

    /// Create or update an event.
    pub fn spawn_event_save(&mut self, api: ApiClient, existing: Option<Uuid>, args: EventArgs) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Saving event '{}'", args.name);

        let handle = tokio::spawn(async move {
            let result: anyhow::Result<&'static str> = async {
                match existing {
                    Some(id) => {
                        api.update("events", &[Filter::eq("id", id)], &args).await?;
                        Ok(SUCCESS_EVENT_UPDATED)
                    }
                    None => {
                        let _created: EventRow = api.insert_one("events", &args).await?;
                        Ok(SUCCESS_EVENT_CREATED)
                    }
                }
            }
            .await;

            match result {
                Ok(message) => {
                    let _ = action_sender.send(Action::RefreshData);
                    Ok(TaskResult::OperationCompleted(message.to_string()))
                }
                Err(e) => {
                    let error_msg = format!("{}: {}", ERROR_EVENT_SAVE_FAILED, e);
                    let _ = action_sender.send(Action::ShowDialog(DialogType::Error(error_msg.clone())));
                    Ok(TaskResult::Other(error_msg))
                }
            }
        });

        self.register(handle, description)
    }

    /// Store a validated promo code.
    pub fn spawn_promo_save(&mut self, api: ApiClient, existing: Option<Uuid>, args: PromoCodeArgs) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Saving promo code '{}'", args.code);

        let handle = tokio::spawn(async move {
            let result: anyhow::Result<()> = async {
                match existing {
                    Some(id) => api.update("promo_codes", &[Filter::eq("id", id)], &args).await?,
                    None => {
                        let _created: PromoCodeRow = api.insert_one("promo_codes", &args).await?;
                    }
                }
                Ok(())
            }
            .await;

            match result {
                Ok(()) => {
                    let _ = action_sender.send(Action::RefreshData);
                    Ok(TaskResult::OperationCompleted(SUCCESS_PROMO_SAVED.to_string()))
                }
                Err(e) => {
                    let error_msg = format!("{}: {}", ERROR_PROMO_SAVE_FAILED, e);
                    let _ = action_sender.send(Action::ShowDialog(DialogType::Error(error_msg.clone())));
                    Ok(TaskResult::Other(error_msg))
                }
            }
        });

        self.register(handle, description)
    }

    /// Delete one row from a section's table.
    pub fn spawn_delete(&mut self, api: ApiClient, section: AdminSection, id: Uuid) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Deleting {} {}", section.singular(), id);

        let handle = tokio::spawn(async move {
            match api.delete(section.table(), &[Filter::eq("id", id)]).await {
                Ok(()) => {
                    let _ = action_sender.send(Action::RefreshData);
                    Ok(TaskResult::OperationCompleted(SUCCESS_ENTITY_DELETED.to_string()))
                }
                Err(e) => {
                    let error_msg = format!("{} {}: {}", ERROR_DELETE_FAILED, section.singular(), e);
                    let _ = action_sender.send(Action::ShowDialog(DialogType::Error(error_msg.clone())));
                    Ok(TaskResult::Other(error_msg))
                }
            }
        });

        self.register(handle, description)
    }

    /// Fetch the full event row and open the edit form on it.
    pub fn spawn_event_fetch(&mut self, api: ApiClient, id: Uuid) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Fetching event {}", id);

        let handle = tokio::spawn(async move {
            let query = SelectQuery::new(
                "id,name,status,event_start,organization_id,venue_id,headliner_artist_id,manager_user_id,gallery_id,promo_image_url",
            )
            .filter(Filter::eq("id", id));

            match api.select_one::<EventRow>("events", &query).await {
                Ok(Some(event)) => {
                    let _ = action_sender.send(Action::ShowDialog(DialogType::EventForm {
                        existing: Some(event),
                        resume: None,
                    }));
                    Ok(TaskResult::Other("Event fetched".to_string()))
                }
                Ok(None) => {
                    let error_msg = format!("{}: event {} no longer exists", ERROR_LOAD_FAILED, id);
                    let _ = action_sender.send(Action::ShowDialog(DialogType::Error(error_msg.clone())));
                    Ok(TaskResult::Other(error_msg))
                }
                Err(e) => {
                    let error_msg = format!("{}: {}", ERROR_LOAD_FAILED, e);
                    let _ = action_sender.send(Action::ShowDialog(DialogType::Error(error_msg.clone())));
                    Ok(TaskResult::Other(error_msg))
                }
            }
        });

        self.register(handle, description)
    }

    /// Load the ticket groups and tiers the promo form scopes against.
    ///
    /// Failures degrade to empty choice lists, same as searches.
    pub fn spawn_scope_choices_load(&mut self, api: ApiClient, event_id: Uuid) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Loading ticket scopes for event {}", event_id);

        let handle = tokio::spawn(async move {
            let groups_query = SelectQuery::new("id,event_id,name")
                .filter(Filter::eq("event_id", event_id))
                .order_asc("name");
            let tiers_query = SelectQuery::new("id,event_id,name,price_in_cents")
                .filter(Filter::eq("event_id", event_id))
                .order_asc("name");

            let groups = match api.select::<TicketGroupRow>("ticket_groups", &groups_query).await {
                Ok(rows) => rows,
                Err(e) => {
                    log::warn!("loading ticket groups for {} failed: {}", event_id, e);
                    Vec::new()
                }
            };
            let tiers = match api.select::<TicketTierRow>("ticket_tiers", &tiers_query).await {
                Ok(rows) => rows,
                Err(e) => {
                    log::warn!("loading ticket tiers for {} failed: {}", event_id, e);
                    Vec::new()
                }
            };

            let _ = action_sender.send(Action::ScopeChoicesLoaded { event_id, groups, tiers });
            Ok(TaskResult::Other("Scope choices loaded".to_string()))
        });

        self.register(handle, description)
    }

    /// Bump an event's public-link click counter. Errors only reach the
    /// log; the link opens regardless of whether the count landed.
    pub fn spawn_click_increment(&mut self, api: ApiClient, event_id: Uuid) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Counting click for event {}", event_id);

        let handle = tokio::spawn(async move {
            match api.increment_event_clicks(event_id).await {
                Ok(count) => {
                    let _ = action_sender.send(Action::ClickCountUpdated { event_id, count });
                    Ok(TaskResult::Other(format!("Click count now {}", count)))
                }
                Err(e) => {
                    log::warn!("incrementing clicks for {} failed: {}", event_id, e);
                    Ok(TaskResult::Other(format!("Click increment failed: {}", e)))
                }
            }
        });

        self.register(handle, description)
    }

    /// Bulk-delete the mock orders generated against an event and drop the
    /// stale local progress snapshot with them.
    pub fn spawn_clear_mock_orders(&mut self, api: ApiClient, store: LocalStore, event_id: Uuid) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Clearing mock orders for event {}", event_id);

        let handle = tokio::spawn(async move {
            match api.delete_mock_orders(event_id).await {
                Ok(affected) => {
                    if let Err(e) = store.clear_progress(event_id).await {
                        log::warn!("clearing progress snapshot for {} failed: {}", event_id, e);
                    }
                    let _ = action_sender.send(Action::MockOrdersCleared { event_id, affected });
                    let _ = action_sender.send(Action::RefreshData);
                    Ok(TaskResult::OperationCompleted(format!(
                        "{} ({} rows)",
                        SUCCESS_MOCK_DATA_CLEARED, affected
                    )))
                }
                Err(e) => {
                    let error_msg = format!("{}: {}", ERROR_CLEAR_MOCK_FAILED, e);
                    let _ = action_sender.send(Action::ShowDialog(DialogType::Error(error_msg.clone())));
                    Ok(TaskResult::Other(error_msg))
                }
            }
        });

        self.register(handle, description)
    }

    /// Run a full mock order generation: fetch the event's real tiers,
    /// synthesize a plan, insert it order by order with progress reported
    /// back after each one.
    pub fn spawn_generation(
        &mut self,
        api: ApiClient,
        store: LocalStore,
        event_id: Uuid,
        config: GenerationConfig,
    ) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Generating mock orders for event {}", event_id);

        let handle = tokio::spawn(async move {
            let tiers_query = SelectQuery::new("id,event_id,name,price_in_cents")
                .filter(Filter::eq("event_id", event_id))
                .order_asc("name");
            let tiers = match api.select::<TicketTierRow>("ticket_tiers", &tiers_query).await {
                Ok(rows) => rows,
                Err(e) => {
                    let error_msg = format!("{}: {}", ERROR_GENERATION_FAILED, e);
                    let _ = action_sender.send(Action::GenerationFailed {
                        event_id,
                        error: error_msg.clone(),
                    });
                    return Ok(TaskResult::Other(error_msg));
                }
            };

            let mut rng = StdRng::from_entropy();
            let plan = match mock::plan_orders(event_id, &tiers, &config, &mut rng) {
                Ok(plan) => plan,
                Err(e) => {
                    let error_msg = format!("{}: {}", ERROR_GENERATION_FAILED, e);
                    let _ = action_sender.send(Action::GenerationFailed {
                        event_id,
                        error: error_msg.clone(),
                    });
                    return Ok(TaskResult::Other(error_msg));
                }
            };

            let progress_sender = action_sender.clone();
            let run = mock::run_generation(&api, &store, plan, |progress| {
                let _ = progress_sender.send(Action::GenerationProgressed(progress.clone()));
            })
            .await;

            match run {
                Ok(outcome) => {
                    let _ = action_sender.send(Action::GenerationFinished { event_id, outcome });
                    let _ = action_sender.send(Action::RefreshData);
                    Ok(TaskResult::GenerationCompleted(outcome))
                }
                Err(e) => {
                    let error_msg = format!("{}: {}", ERROR_GENERATION_FAILED, e);
                    let _ = action_sender.send(Action::GenerationFailed {
                        event_id,
                        error: error_msg.clone(),
                    });
                    Ok(TaskResult::Other(error_msg))
                }
            }
        });

        self.register(handle, description)
    }

    /// Load the persisted progress snapshot for the mock orders dialog.
    pub fn spawn_progress_load(&mut self, store: LocalStore, event_id: Uuid) -> TaskId {
        let action_sender = self.action_sender.clone();
        let description = format!("Loading generation snapshot for event {}", event_id);

        let handle = tokio::spawn(async move {
            let progress = store.progress_for(event_id).await;
            let _ = action_sender.send(Action::ProgressSnapshotLoaded { event_id, progress });
            Ok(TaskResult::Other("Snapshot loaded".to_string()))
        });

        self.register(handle, description)
    }

    /// Check for completed tasks and clean them up
    pub fn cleanup_finished_tasks(&mut self) -> Vec<(TaskId, anyhow::Result<TaskResult>)> {
        let mut completed = Vec::new();
        let mut to_remove = Vec::new();

        for (task_id, task) in &self.tasks {
            if task.handle.is_finished() {
                to_remove.push(*task_id);
            }
        }

        for task_id in to_remove {
            if let Some(task) = self.tasks.remove(&task_id) {
                // The actual result was already sent via the action channel
                let result = Ok(TaskResult::Other(format!("Finished: {}", task.description)));
                completed.push((task_id, result));
            }
        }

        completed
    }

    /// Cancel all running tasks
    pub fn cancel_all_tasks(&mut self) {
        for (_, task) in self.tasks.drain() {
            task.handle.abort();
        }
    }

    /// Get the number of active tasks
    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }
}

impl Drop for TaskManager {
    fn drop(&mut self) {
        // Cancel all tasks when the manager is dropped
        self.cancel_all_tasks();
    }
}
