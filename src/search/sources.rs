//! Concrete search sources.
//!
//! The simple entities are all instances of [`TableSource`] with different
//! configuration: table, projection, search column, labels. Events get a
//! bespoke source because they match across joined display names.

use std::marker::PhantomData;
use std::sync::Arc;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use uuid::Uuid;

use super::{EntityKind, SearchHit, SearchSource};
use crate::api::{ApiClient, ApiError, Filter, SelectQuery};
use crate::constants::SEARCH_RESULT_LIMIT;
use crate::models::{ArtistRow, CityRow, EventOverviewRow, GalleryRow, OrganizationRow, VenueRow};
use crate::utils::datetime;

/// Static configuration for one table-backed source.
pub struct SourceConfig {
    pub kind: EntityKind,
    pub table: &'static str,
    pub columns: &'static str,
    pub search_column: &'static str,
    pub placeholder: &'static str,
    pub create_label: Option<&'static str>,
    pub uses_recents: bool,
}

/// A search source over one table, matching a single column.
pub struct TableSource<R> {
    config: SourceConfig,
    _row: PhantomData<fn() -> R>,
}

impl<R> TableSource<R> {
    pub fn new(config: SourceConfig) -> Self {
        Self {
            config,
            _row: PhantomData,
        }
    }
}

#[async_trait]
impl<R> SearchSource for TableSource<R>
where
    R: DeserializeOwned + Into<SearchHit> + Send + Sync + 'static,
{
    fn kind(&self) -> EntityKind {
        self.config.kind
    }

    fn placeholder(&self) -> &'static str {
        self.config.placeholder
    }

    fn create_label(&self) -> Option<&'static str> {
        self.config.create_label
    }

    fn uses_recents(&self) -> bool {
        self.config.uses_recents
    }

    async fn search(&self, api: &ApiClient, query: &str, extra: &[Filter]) -> Result<Vec<SearchHit>, ApiError> {
        let select = SelectQuery::new(self.config.columns)
            .filter(Filter::ilike(self.config.search_column, query))
            .filters(extra.iter().cloned())
            .order_asc(self.config.search_column)
            .limit(SEARCH_RESULT_LIMIT);
        let rows: Vec<R> = api.select(self.config.table, &select).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn hydrate(&self, api: &ApiClient, id: Uuid) -> Result<Option<SearchHit>, ApiError> {
        let select = SelectQuery::new(self.config.columns).filter(Filter::eq("id", id));
        let row: Option<R> = api.select_one(self.config.table, &select).await?;
        Ok(row.map(Into::into))
    }
}

impl From<ArtistRow> for SearchHit {
    fn from(row: ArtistRow) -> Self {
        SearchHit::new(row.id, row.name)
    }
}

impl From<VenueRow> for SearchHit {
    fn from(row: VenueRow) -> Self {
        let hit = SearchHit::new(row.id, row.name);
        match row.city {
            Some(city) => hit.with_sublabel(city),
            None => hit,
        }
    }
}

impl From<OrganizationRow> for SearchHit {
    fn from(row: OrganizationRow) -> Self {
        let hit = SearchHit::new(row.id, row.name);
        match row.city {
            Some(city) => hit.with_sublabel(city),
            None => hit,
        }
    }
}

impl From<CityRow> for SearchHit {
    fn from(row: CityRow) -> Self {
        let hit = SearchHit::new(row.id, row.name);
        match row.country {
            Some(country) => hit.with_sublabel(country),
            None => hit,
        }
    }
}

impl From<GalleryRow> for SearchHit {
    fn from(row: GalleryRow) -> Self {
        let hit = SearchHit::new(row.id, row.name);
        match row.city {
            Some(city) => hit.with_sublabel(city),
            None => hit,
        }
    }
}

impl From<EventOverviewRow> for SearchHit {
    fn from(row: EventOverviewRow) -> Self {
        let mut parts = Vec::new();
        if let Some(venue) = row.venue_name {
            parts.push(venue);
        }
        if let Some(start) = row.event_start {
            parts.push(datetime::format_human_datetime(&start));
        }
        let hit = SearchHit::new(row.id, row.name);
        if parts.is_empty() {
            hit
        } else {
            hit.with_sublabel(parts.join(", "))
        }
    }
}

pub fn artist_source() -> Arc<dyn SearchSource> {
    Arc::new(TableSource::<ArtistRow>::new(SourceConfig {
        kind: EntityKind::Artist,
        table: "artists",
        columns: "id,name,bio,image_url,organization_id",
        search_column: "name",
        placeholder: "Search artists",
        create_label: Some("Create new artist"),
        uses_recents: true,
    }))
}

pub fn venue_source() -> Arc<dyn SearchSource> {
    Arc::new(TableSource::<VenueRow>::new(SourceConfig {
        kind: EntityKind::Venue,
        table: "venues",
        columns: "id,name,address,city",
        search_column: "name",
        placeholder: "Search venues",
        create_label: Some("Create new venue"),
        uses_recents: true,
    }))
}

pub fn organization_source() -> Arc<dyn SearchSource> {
    Arc::new(TableSource::<OrganizationRow>::new(SourceConfig {
        kind: EntityKind::Organization,
        table: "organizations",
        columns: "id,name,city",
        search_column: "name",
        placeholder: "Search organizations",
        create_label: None,
        uses_recents: true,
    }))
}

pub fn city_source() -> Arc<dyn SearchSource> {
    Arc::new(TableSource::<CityRow>::new(SourceConfig {
        kind: EntityKind::City,
        table: "cities",
        columns: "id,name,country",
        search_column: "name",
        placeholder: "Search cities",
        create_label: None,
        uses_recents: false,
    }))
}

pub fn gallery_source() -> Arc<dyn SearchSource> {
    Arc::new(TableSource::<GalleryRow>::new(SourceConfig {
        kind: EntityKind::Gallery,
        table: "galleries",
        columns: "id,name,city",
        search_column: "name",
        placeholder: "Search galleries",
        create_label: None,
        uses_recents: true,
    }))
}

/// Event search matches the event name and the joined venue and headliner
/// names in one OR predicate against the overview view.
pub struct EventSource;

#[async_trait]
impl SearchSource for EventSource {
    fn kind(&self) -> EntityKind {
        EntityKind::Event
    }

    fn placeholder(&self) -> &'static str {
        "Search events"
    }

    async fn search(&self, api: &ApiClient, query: &str, extra: &[Filter]) -> Result<Vec<SearchHit>, ApiError> {
        let matched = Filter::Or(vec![
            Filter::ilike("name", query),
            Filter::ilike("venue_name", query),
            Filter::ilike("headliner_name", query),
        ]);
        let select = SelectQuery::new("id,name,event_start,venue_name,headliner_name,click_count")
            .filter(matched)
            .filters(extra.iter().cloned())
            .order_desc("event_start")
            .limit(SEARCH_RESULT_LIMIT);
        let rows: Vec<EventOverviewRow> = api.select("events_overview", &select).await?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    async fn hydrate(&self, api: &ApiClient, id: Uuid) -> Result<Option<SearchHit>, ApiError> {
        let select =
            SelectQuery::new("id,name,event_start,venue_name,headliner_name,click_count").filter(Filter::eq("id", id));
        let row: Option<EventOverviewRow> = api.select_one("events_overview", &select).await?;
        Ok(row.map(Into::into))
    }
}

pub fn event_source() -> Arc<dyn SearchSource> {
    Arc::new(EventSource)
}
