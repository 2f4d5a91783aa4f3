//! Search sources behind the entity pickers.
//!
//! Every picker in the console is the same widget pointed at a different
//! [`SearchSource`]. Simple entities share a configuration-driven table
//! source; events and users have bespoke sources (multi-column OR matching,
//! match-priority ranking). Sources return at most
//! [`crate::constants::SEARCH_RESULT_LIMIT`] hits and never an error state
//! the user sees: a failed search degrades to an empty result list at the
//! call site.

use async_trait::async_trait;
use uuid::Uuid;

use crate::api::{ApiClient, ApiError, Filter};

pub mod sources;
pub mod users;

pub use sources::{artist_source, city_source, event_source, gallery_source, organization_source, venue_source};
pub use users::user_source;

/// The kinds of entity a picker can search for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Event,
    Artist,
    Venue,
    Organization,
    City,
    Gallery,
    User,
}

impl EntityKind {
    /// Stable identifier, also the recents bucket key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Event => "event",
            Self::Artist => "artist",
            Self::Venue => "venue",
            Self::Organization => "organization",
            Self::City => "city",
            Self::Gallery => "gallery",
            Self::User => "user",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "event" => Some(Self::Event),
            "artist" => Some(Self::Artist),
            "venue" => Some(Self::Venue),
            "organization" => Some(Self::Organization),
            "city" => Some(Self::City),
            "gallery" => Some(Self::Gallery),
            "user" => Some(Self::User),
            _ => None,
        }
    }
}

/// One selectable option produced by a search source.
///
/// Hits are ephemeral: they exist to be rendered and picked, and are
/// discarded when the popover closes. Only the id and label of a selection
/// survive, in the owning form and in the recents cache.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit {
    pub id: Uuid,
    pub label: String,
    pub sublabel: Option<String>,
}

impl SearchHit {
    pub fn new(id: Uuid, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            sublabel: None,
        }
    }

    #[must_use]
    pub fn with_sublabel(mut self, sublabel: impl Into<String>) -> Self {
        self.sublabel = Some(sublabel.into());
        self
    }
}

/// A debounced search issued by a picker.
///
/// `seq` increases monotonically per picker; responses carrying an older
/// sequence number than the latest issued one are dropped on arrival.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    pub kind: EntityKind,
    pub query: String,
    pub seq: u64,
    pub extra: Vec<Filter>,
}

/// Results delivered back to the issuing picker. `query` echoes the request
/// for the logs; staleness is decided by `seq` alone.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    pub kind: EntityKind,
    pub query: String,
    pub seq: u64,
    pub hits: Vec<SearchHit>,
}

/// A searchable entity kind as seen by the picker widget.
#[async_trait]
pub trait SearchSource: Send + Sync {
    fn kind(&self) -> EntityKind;

    /// Input placeholder shown while nothing is selected.
    fn placeholder(&self) -> &'static str;

    /// Label for the creation row at the bottom of the popover, for kinds
    /// that support inline creation.
    fn create_label(&self) -> Option<&'static str> {
        None
    }

    /// Whether selections of this kind are remembered and offered while the
    /// query is empty.
    fn uses_recents(&self) -> bool {
        true
    }

    /// Case-insensitive substring search, capped at the shared result limit.
    /// `extra` filters are ANDed onto the source's own predicate.
    async fn search(&self, api: &ApiClient, query: &str, extra: &[Filter]) -> Result<Vec<SearchHit>, ApiError>;

    /// Resolve the display hit for a known id, for pickers opened on an
    /// existing value.
    async fn hydrate(&self, api: &ApiClient, id: Uuid) -> Result<Option<SearchHit>, ApiError>;
}
