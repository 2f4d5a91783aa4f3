//! Recent-selection repository for database operations.

use anyhow::Result;
use sea_orm::{ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use crate::entities::recent_selection;

/// Repository for the per-kind recent selection cache.
pub struct RecentRepository;

impl RecentRepository {
    /// Newest selections first for one entity kind, capped at `limit`.
    pub async fn list_for_kind<C>(conn: &C, kind: &str, limit: usize) -> Result<Vec<recent_selection::Model>>
    where
        C: ConnectionTrait,
    {
        Ok(recent_selection::Entity::find()
            .filter(recent_selection::Column::Kind.eq(kind))
            .order_by_desc(recent_selection::Column::SelectedAt)
            .limit(limit as u64)
            .all(conn)
            .await?)
    }

    /// Record a selection, replacing any older entry for the same id.
    pub async fn upsert<C>(conn: &C, kind: &str, entity_id: &str, label: &str, selected_at: &str) -> Result<()>
    where
        C: ConnectionTrait,
    {
        recent_selection::Entity::delete_by_id((kind.to_string(), entity_id.to_string()))
            .exec(conn)
            .await?;

        let row = recent_selection::ActiveModel {
            kind: Set(kind.to_string()),
            entity_id: Set(entity_id.to_string()),
            label: Set(label.to_string()),
            selected_at: Set(selected_at.to_string()),
        };
        row.insert(conn).await?;
        Ok(())
    }

    /// Delete everything older than the newest `cap` entries for a kind.
    pub async fn prune<C>(conn: &C, kind: &str, cap: usize) -> Result<()>
    where
        C: ConnectionTrait,
    {
        let keep: Vec<String> = Self::list_for_kind(conn, kind, cap)
            .await?
            .into_iter()
            .map(|m| m.entity_id)
            .collect();

        recent_selection::Entity::delete_many()
            .filter(recent_selection::Column::Kind.eq(kind))
            .filter(recent_selection::Column::EntityId.is_not_in(keep))
            .exec(conn)
            .await?;
        Ok(())
    }

    /// Forget all recents for one kind.
    pub async fn clear_kind<C>(conn: &C, kind: &str) -> Result<u64>
    where
        C: ConnectionTrait,
    {
        let result = recent_selection::Entity::delete_many()
            .filter(recent_selection::Column::Kind.eq(kind))
            .exec(conn)
            .await?;
        Ok(result.rows_affected)
    }
}
