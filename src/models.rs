//! Wire models for rows read from and written to the data API.
//!
//! These mirror the projected columns the console actually selects, not the
//! full remote schema. Timestamps travel as strings (RFC3339 from the
//! backend, `YYYY-MM-DD` for date-only fields) and are parsed only where a
//! comparison is needed.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Artist row projection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ArtistRow {
    pub id: Uuid,
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub organization_id: Option<Uuid>,
}

/// Venue row projection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct VenueRow {
    pub id: Uuid,
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Organization row projection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct OrganizationRow {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
}

/// City row projection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CityRow {
    pub id: Uuid,
    pub name: String,
    pub country: Option<String>,
}

/// Gallery row projection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GalleryRow {
    pub id: Uuid,
    pub name: String,
    pub city: Option<String>,
}

/// Event row as stored, with foreign keys unresolved.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventRow {
    pub id: Uuid,
    pub name: String,
    pub status: String,
    pub event_start: Option<String>,
    pub organization_id: Option<Uuid>,
    pub venue_id: Option<Uuid>,
    pub headliner_artist_id: Option<Uuid>,
    pub manager_user_id: Option<Uuid>,
    pub gallery_id: Option<Uuid>,
    pub promo_image_url: Option<String>,
}

/// Row of the `events_overview` view: an event with its joined display
/// names and the public-link click counter.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct EventOverviewRow {
    pub id: Uuid,
    pub name: String,
    pub event_start: Option<String>,
    pub venue_name: Option<String>,
    pub headliner_name: Option<String>,
    pub click_count: i64,
}

/// Row of the `profiles_overview` view used by user search.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ProfileRow {
    pub id: Uuid,
    pub full_name: Option<String>,
    pub username: Option<String>,
    pub email: Option<String>,
    pub artist_name: Option<String>,
    pub organization_name: Option<String>,
}

/// Promo code row projection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PromoCodeRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub code: String,
    pub discount_percentage: Option<f64>,
    pub discount_in_cents: Option<i64>,
    pub expires_on: Option<String>,
    pub scope: String,
    pub ticket_group_ids: Vec<Uuid>,
    pub ticket_tier_ids: Vec<Uuid>,
}

/// Ticket group row projection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketGroupRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
}

/// Ticket tier row projection.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TicketTierRow {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub price_in_cents: i64,
}

/// Arguments for creating or updating an artist.
#[derive(Clone, Debug, Serialize)]
pub struct ArtistArgs {
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub organization_id: Option<Uuid>,
}

/// Arguments for creating or updating a venue.
#[derive(Clone, Debug, Serialize)]
pub struct VenueArgs {
    pub name: String,
    pub address: Option<String>,
    pub city: Option<String>,
}

/// Arguments for creating or updating an event.
#[derive(Clone, Debug, Serialize)]
pub struct EventArgs {
    pub name: String,
    pub event_start: Option<String>,
    pub organization_id: Option<Uuid>,
    pub venue_id: Option<Uuid>,
    pub headliner_artist_id: Option<Uuid>,
    pub manager_user_id: Option<Uuid>,
    pub gallery_id: Option<Uuid>,
}

/// Arguments for storing a validated promo code.
#[derive(Clone, Debug, Serialize)]
pub struct PromoCodeArgs {
    pub event_id: Uuid,
    pub code: String,
    pub discount_percentage: Option<f64>,
    pub discount_in_cents: Option<i64>,
    pub expires_on: Option<String>,
    pub scope: String,
    pub ticket_group_ids: Vec<Uuid>,
    pub ticket_tier_ids: Vec<Uuid>,
}

/// Mock order insert. Ids are generated client side so ticket rows in the
/// same batch can reference their order.
#[derive(Clone, Debug, Serialize)]
pub struct NewOrder {
    pub id: Uuid,
    pub event_id: Uuid,
    pub buyer_name: String,
    pub buyer_email: String,
    pub status: String,
    pub is_mock: bool,
    pub is_free: bool,
    pub total_in_cents: i64,
}

/// Mock ticket insert.
#[derive(Clone, Debug, Serialize)]
pub struct NewTicket {
    pub id: Uuid,
    pub order_id: Uuid,
    pub event_id: Uuid,
    pub tier_id: Uuid,
    pub price_in_cents: i64,
}

/// Mock RSVP insert.
#[derive(Clone, Debug, Serialize)]
pub struct NewRsvp {
    pub id: Uuid,
    pub event_id: Uuid,
    pub name: String,
    pub email: String,
    pub is_mock: bool,
}
