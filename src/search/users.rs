//! User search with field match priority.
//!
//! A user can match on their own name, their handle, their email, or on the
//! name of an artist or organization linked to their profile. The matched
//! field decides both how the hit is labeled and where it sorts: a name
//! match always outranks a handle match, which outranks an email match, and
//! so on. Ties keep the order the backend returned.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use super::{EntityKind, SearchHit, SearchSource};
use crate::api::{ApiClient, ApiError, Filter, SelectQuery};
use crate::constants::SEARCH_RESULT_LIMIT;
use crate::models::ProfileRow;

const PROFILE_COLUMNS: &str = "id,full_name,username,email,artist_name,organization_name";

/// Which profile field matched the query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    FullName,
    Username,
    Email,
    Artist,
    Organization,
}

impl MatchField {
    /// Sort rank, lower sorts first.
    pub fn priority(self) -> u8 {
        match self {
            Self::FullName => 1,
            Self::Username => 2,
            Self::Email => 3,
            Self::Artist => 4,
            Self::Organization => 5,
        }
    }
}

/// Decide which field of a profile matched the query, preferring the
/// highest-priority field when several match.
pub fn classify_match(row: &ProfileRow, query: &str) -> Option<MatchField> {
    let needle = query.to_lowercase();
    let contains = |field: &Option<String>| {
        field
            .as_deref()
            .map(|value| value.to_lowercase().contains(&needle))
            .unwrap_or(false)
    };

    if contains(&row.full_name) {
        Some(MatchField::FullName)
    } else if contains(&row.username) {
        Some(MatchField::Username)
    } else if contains(&row.email) {
        Some(MatchField::Email)
    } else if contains(&row.artist_name) {
        Some(MatchField::Artist)
    } else if contains(&row.organization_name) {
        Some(MatchField::Organization)
    } else {
        None
    }
}

/// Build the display hit for a profile given its matched field.
///
/// The label is always the person (name, falling back to handle and email);
/// the sublabel explains an indirect match so "why is this user in the
/// list" stays visible.
pub fn hit_for(row: &ProfileRow, field: Option<MatchField>) -> SearchHit {
    let label = row
        .full_name
        .clone()
        .or_else(|| row.username.clone())
        .or_else(|| row.email.clone())
        .unwrap_or_else(|| row.id.to_string());

    let sublabel = match field {
        Some(MatchField::Username) => row.username.clone().map(|u| format!("@{}", u)),
        Some(MatchField::Email) => row.email.clone(),
        Some(MatchField::Artist) => row.artist_name.clone().map(|a| format!("artist: {}", a)),
        Some(MatchField::Organization) => row.organization_name.clone().map(|o| format!("org: {}", o)),
        Some(MatchField::FullName) | None => row.email.clone(),
    };

    let hit = SearchHit::new(row.id, label);
    match sublabel {
        Some(sublabel) => hit.with_sublabel(sublabel),
        None => hit,
    }
}

/// Rank profile rows by matched-field priority, keeping remote order for
/// ties, and convert to hits.
pub fn rank_profiles(rows: Vec<ProfileRow>, query: &str) -> Vec<SearchHit> {
    let mut classified: Vec<(u8, ProfileRow, Option<MatchField>)> = rows
        .into_iter()
        .map(|row| {
            let field = classify_match(&row, query);
            // A row the backend matched but the projection can't explain
            // sorts last rather than disappearing.
            let rank = field.map(MatchField::priority).unwrap_or(u8::MAX);
            (rank, row, field)
        })
        .collect();
    classified.sort_by_key(|(rank, _, _)| *rank);
    classified.into_iter().map(|(_, row, field)| hit_for(&row, field)).collect()
}

/// Bespoke source for user pickers (event managers, order buyers).
pub struct UserSource;

#[async_trait]
impl SearchSource for UserSource {
    fn kind(&self) -> EntityKind {
        EntityKind::User
    }

    fn placeholder(&self) -> &'static str {
        "Search users"
    }

    async fn search(&self, api: &ApiClient, query: &str, extra: &[Filter]) -> Result<Vec<SearchHit>, ApiError> {
        let matched = Filter::Or(vec![
            Filter::ilike("full_name", query),
            Filter::ilike("username", query),
            Filter::ilike("email", query),
            Filter::ilike("artist_name", query),
            Filter::ilike("organization_name", query),
        ]);
        let select = SelectQuery::new(PROFILE_COLUMNS)
            .filter(matched)
            .filters(extra.iter().cloned())
            .order_asc("full_name")
            .limit(SEARCH_RESULT_LIMIT);
        let rows: Vec<ProfileRow> = api.select("profiles_overview", &select).await?;
        Ok(rank_profiles(rows, query))
    }

    async fn hydrate(&self, api: &ApiClient, id: Uuid) -> Result<Option<SearchHit>, ApiError> {
        let select = SelectQuery::new(PROFILE_COLUMNS).filter(Filter::eq("id", id));
        let row: Option<ProfileRow> = api.select_one("profiles_overview", &select).await?;
        Ok(row.map(|row| hit_for(&row, None)))
    }
}

pub fn user_source() -> Arc<dyn SearchSource> {
    Arc::new(UserSource)
}
