//! Local state store.
//!
//! The console keeps two things on disk: recent picker selections and
//! mock-generation progress snapshots. Both are convenience state; the
//! hosted backend never sees them and losing them costs nothing but a
//! little polish. The store is handed to the UI explicitly (never reached
//! through a global), and a store that failed to open degrades to a no-op:
//! reads yield nothing, writes are dropped, both logged once at open time.

pub mod db;

use anyhow::Result;
use chrono::Utc;
use sea_orm::DatabaseConnection;
use std::path::Path;
use uuid::Uuid;

use crate::constants::RECENTS_CAP;
use crate::entities::generation_progress;
use crate::mock::GenerationProgress;
use crate::repositories::{ProgressRepository, RecentRepository};
use crate::search::{EntityKind, SearchHit};

/// Handle to the local SQLite store.
///
/// Cloneable; all clones share the same connection.
#[derive(Clone)]
pub struct LocalStore {
    conn: Option<DatabaseConnection>,
}

impl LocalStore {
    /// Open the store at the default path, degrading to a disabled store
    /// when anything goes wrong.
    pub async fn open_default() -> Self {
        let path = match db::default_db_path() {
            Ok(path) => path,
            Err(e) => {
                log::warn!("local store disabled: {}", e);
                return Self::disabled();
            }
        };
        match db::connect_file(&path).await {
            Ok(conn) => Self { conn: Some(conn) },
            Err(e) => {
                log::warn!("local store disabled: {}", e);
                Self::disabled()
            }
        }
    }

    /// Open a store at an explicit path.
    pub async fn open(path: &Path) -> Result<Self> {
        let conn = db::connect_file(path).await?;
        Ok(Self { conn: Some(conn) })
    }

    /// In-memory store, used by tests.
    pub async fn open_in_memory() -> Result<Self> {
        let conn = db::connect_in_memory().await?;
        Ok(Self { conn: Some(conn) })
    }

    /// A store that answers every read with nothing and drops every write.
    pub fn disabled() -> Self {
        Self { conn: None }
    }

    pub fn is_active(&self) -> bool {
        self.conn.is_some()
    }

    /// Recent selections for a kind, newest first, capped.
    ///
    /// Labels are returned exactly as recorded; a whitespace-only label
    /// renders blank but the entry stays selectable.
    pub async fn recents_for(&self, kind: EntityKind) -> Vec<SearchHit> {
        let Some(ref conn) = self.conn else {
            return Vec::new();
        };
        match RecentRepository::list_for_kind(conn, kind.as_str(), RECENTS_CAP).await {
            Ok(rows) => rows
                .into_iter()
                .filter_map(|row| {
                    let id = Uuid::parse_str(&row.entity_id).ok()?;
                    Some(SearchHit::new(id, row.label))
                })
                .collect(),
            Err(e) => {
                log::warn!("recents read failed for {}: {}", kind.as_str(), e);
                Vec::new()
            }
        }
    }

    /// Remember a selection: dedupe by id, newest wins, cap enforced.
    pub async fn record_recent(&self, kind: EntityKind, hit: &SearchHit) -> Result<()> {
        let Some(ref conn) = self.conn else {
            return Ok(());
        };
        let now = Utc::now().to_rfc3339();
        RecentRepository::upsert(conn, kind.as_str(), &hit.id.to_string(), &hit.label, &now).await?;
        RecentRepository::prune(conn, kind.as_str(), RECENTS_CAP).await?;
        Ok(())
    }

    /// Forget all recents for a kind.
    pub async fn clear_recents(&self, kind: EntityKind) -> Result<u64> {
        let Some(ref conn) = self.conn else {
            return Ok(0);
        };
        RecentRepository::clear_kind(conn, kind.as_str()).await
    }

    /// Last persisted generation snapshot for an event.
    pub async fn progress_for(&self, event_id: Uuid) -> Option<GenerationProgress> {
        let conn = self.conn.as_ref()?;
        match ProgressRepository::get_for_event(conn, &event_id.to_string()).await {
            Ok(row) => row.map(|m| GenerationProgress {
                event_id,
                orders_total: m.orders_total.max(0) as u32,
                orders_done: m.orders_done.max(0) as u32,
                tickets_done: m.tickets_done.max(0) as u32,
                rsvps_done: m.rsvps_done.max(0) as u32,
                finished: m.finished,
            }),
            Err(e) => {
                log::warn!("progress read failed for {}: {}", event_id, e);
                None
            }
        }
    }

    /// Persist a generation snapshot, replacing the previous one.
    pub async fn save_progress(&self, progress: &GenerationProgress) -> Result<()> {
        let Some(ref conn) = self.conn else {
            return Ok(());
        };
        let model = generation_progress::Model {
            event_id: progress.event_id.to_string(),
            orders_total: progress.orders_total as i32,
            orders_done: progress.orders_done as i32,
            tickets_done: progress.tickets_done as i32,
            rsvps_done: progress.rsvps_done as i32,
            finished: progress.finished,
            updated_at: Utc::now().to_rfc3339(),
        };
        ProgressRepository::save(conn, model).await
    }

    /// Drop an event's snapshot.
    pub async fn clear_progress(&self, event_id: Uuid) -> Result<()> {
        let Some(ref conn) = self.conn else {
            return Ok(());
        };
        ProgressRepository::clear(conn, &event_id.to_string()).await
    }
}
