use std::path::PathBuf;

use uuid::Uuid;

use crate::mock::{GenerationConfig, GenerationOutcome, GenerationProgress};
use crate::models::{
    ArtistArgs, ArtistRow, EventArgs, EventOverviewRow, EventRow, OrganizationRow, PromoCodeArgs, PromoCodeRow,
    TicketGroupRow, TicketTierRow, VenueArgs, VenueRow,
};
use crate::search::{EntityKind, SearchHit, SearchRequest, SearchResponse};
use crate::ui::components::dialogs::EventDraft;

/// Represents the currently selected section in the sidebar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AdminSection {
    #[default]
    Events,
    Artists,
    Venues,
    Organizations,
    PromoCodes,
}

impl AdminSection {
    pub const ALL: [AdminSection; 5] = [
        Self::Events,
        Self::Artists,
        Self::Venues,
        Self::Organizations,
        Self::PromoCodes,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Self::Events => "Events",
            Self::Artists => "Artists",
            Self::Venues => "Venues",
            Self::Organizations => "Organizations",
            Self::PromoCodes => "Promo Codes",
        }
    }

    /// Lowercase singular, used in confirmation prompts and log lines.
    pub fn singular(self) -> &'static str {
        match self {
            Self::Events => "event",
            Self::Artists => "artist",
            Self::Venues => "venue",
            Self::Organizations => "organization",
            Self::PromoCodes => "promo code",
        }
    }

    /// Remote table the section's rows live in.
    pub fn table(self) -> &'static str {
        match self {
            Self::Events => "events",
            Self::Artists => "artists",
            Self::Venues => "venues",
            Self::Organizations => "organizations",
            Self::PromoCodes => "promo_codes",
        }
    }

    /// Identifier used in the config file's `default_section`.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "events" => Some(Self::Events),
            "artists" => Some(Self::Artists),
            "venues" => Some(Self::Venues),
            "organizations" => Some(Self::Organizations),
            "promo-codes" => Some(Self::PromoCodes),
            _ => None,
        }
    }
}

/// Rows loaded for one sidebar section, typed per section.
#[derive(Debug, Clone)]
pub enum SectionData {
    Events(Vec<EventOverviewRow>),
    Artists(Vec<ArtistRow>),
    Venues(Vec<VenueRow>),
    Organizations(Vec<OrganizationRow>),
    PromoCodes(Vec<PromoCodeRow>),
}

impl SectionData {
    pub fn section(&self) -> AdminSection {
        match self {
            Self::Events(_) => AdminSection::Events,
            Self::Artists(_) => AdminSection::Artists,
            Self::Venues(_) => AdminSection::Venues,
            Self::Organizations(_) => AdminSection::Organizations,
            Self::PromoCodes(_) => AdminSection::PromoCodes,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            Self::Events(rows) => rows.len(),
            Self::Artists(rows) => rows.len(),
            Self::Venues(rows) => rows.len(),
            Self::Organizations(rows) => rows.len(),
            Self::PromoCodes(rows) => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Where to resume after an inline create-new detour closes.
///
/// The event form is the only dialog whose pickers offer creation rows, so
/// the detour always saves an event draft. The draft travels with the
/// creation and comes back untouched whether the save succeeded or not.
#[derive(Debug, Clone)]
pub enum ReturnTo {
    EventForm(Box<EventDraft>),
}

#[derive(Debug, Clone)]
pub enum Action {
    // Navigation
    NavigateToSection(AdminSection),
    NextRow,
    PreviousRow,

    // Section data
    RowsLoaded(SectionData),
    RefreshData,

    // Picker plumbing: requests go out through the task manager, results
    // come back kind-routed to whichever picker is open.
    SearchIssued(SearchRequest),
    SearchLoaded(SearchResponse),
    RecentsRequested(EntityKind),
    RecentsLoaded {
        kind: EntityKind,
        hits: Vec<SearchHit>,
    },
    HydrateRequested {
        kind: EntityKind,
        id: Uuid,
    },
    HydrateLoaded {
        kind: EntityKind,
        hit: SearchHit,
    },
    RecordRecent {
        kind: EntityKind,
        hit: SearchHit,
    },

    // Entity writes
    SaveArtist {
        existing: Option<Uuid>,
        args: ArtistArgs,
        image_path: Option<PathBuf>,
        return_to: Option<ReturnTo>,
    },
    SaveVenue {
        existing: Option<Uuid>,
        args: VenueArgs,
        return_to: Option<ReturnTo>,
    },
    SaveEvent {
        existing: Option<Uuid>,
        args: EventArgs,
    },
    SavePromo {
        existing: Option<Uuid>,
        args: PromoCodeArgs,
    },
    DeleteEntity {
        section: AdminSection,
        id: Uuid,
    },
    /// Fetch the full event row, then open the edit form on it.
    EditEvent(Uuid),
    /// An inline create-new save landed; reopen the originating form with
    /// the fresh entity preselected.
    EntityCreated {
        kind: EntityKind,
        hit: SearchHit,
        return_to: Option<ReturnTo>,
    },

    // Promo scope choices for the open promo form
    ScopeChoicesLoaded {
        event_id: Uuid,
        groups: Vec<TicketGroupRow>,
        tiers: Vec<TicketTierRow>,
    },

    // Mock order generation
    StartGeneration {
        event_id: Uuid,
        config: GenerationConfig,
    },
    GenerationProgressed(GenerationProgress),
    GenerationFinished {
        event_id: Uuid,
        outcome: GenerationOutcome,
    },
    GenerationFailed {
        event_id: Uuid,
        error: String,
    },
    ProgressSnapshotLoaded {
        event_id: Uuid,
        progress: Option<GenerationProgress>,
    },
    ClearMockOrders(Uuid),
    MockOrdersCleared {
        event_id: Uuid,
        affected: i64,
    },

    // Public link handling
    OpenEventLink(Uuid),
    ClickCountUpdated {
        event_id: Uuid,
        count: i64,
    },

    // UI operations
    ShowDialog(DialogType),
    HideDialog,
    CycleIconTheme,

    // App control
    Quit,
    None,
}

#[derive(Debug, Clone)]
pub enum DialogType {
    ArtistForm {
        existing: Option<ArtistRow>,
        return_to: Option<ReturnTo>,
    },
    VenueForm {
        existing: Option<VenueRow>,
        return_to: Option<ReturnTo>,
    },
    EventForm {
        existing: Option<EventRow>,
        resume: Option<Box<EventResume>>,
    },
    PromoForm {
        event_id: Uuid,
        existing: Option<PromoCodeRow>,
    },
    MockOrders {
        event_id: Uuid,
        event_name: String,
    },
    DeleteConfirmation {
        section: AdminSection,
        id: Uuid,
        name: String,
    },
    Error(String),
    Info(String),
    Help,
    Logs,
}

/// Saved event form state plus the entity whose creation interrupted it.
#[derive(Debug, Clone)]
pub struct EventResume {
    pub draft: EventDraft,
    pub kind: EntityKind,
    pub hit: SearchHit,
}
