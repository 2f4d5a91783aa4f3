//! Generation-progress repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ConnectionTrait, EntityTrait, Set};

use crate::entities::generation_progress;

/// Repository for per-event generation progress snapshots.
pub struct ProgressRepository;

impl ProgressRepository {
    /// Latest snapshot for an event, if one was ever persisted.
    pub async fn get_for_event<C>(conn: &C, event_id: &str) -> Result<Option<generation_progress::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(generation_progress::Entity::find_by_id(event_id.to_string())
            .one(conn)
            .await?)
    }

    /// Write a snapshot, replacing the previous one for the event.
    pub async fn save<C>(conn: &C, model: generation_progress::Model) -> Result<()>
    where
        C: ConnectionTrait,
    {
        generation_progress::Entity::delete_by_id(model.event_id.clone())
            .exec(conn)
            .await?;

        let row = generation_progress::ActiveModel {
            event_id: Set(model.event_id),
            orders_total: Set(model.orders_total),
            orders_done: Set(model.orders_done),
            tickets_done: Set(model.tickets_done),
            rsvps_done: Set(model.rsvps_done),
            finished: Set(model.finished),
            updated_at: Set(model.updated_at),
        };
        row.insert(conn).await?;
        Ok(())
    }

    /// Drop an event's snapshot, typically after its mock data is cleared.
    pub async fn clear<C>(conn: &C, event_id: &str) -> Result<()>
    where
        C: ConnectionTrait,
    {
        generation_progress::Entity::delete_by_id(event_id.to_string())
            .exec(conn)
            .await?;
        Ok(())
    }
}
