//! Dialog components module

pub mod common;
mod scroll_behavior;

mod artist_dialog;
mod event_dialog;
mod mock_orders_dialog;
mod promo_dialog;
mod system_dialogs;
mod venue_dialog;

pub use artist_dialog::ArtistForm;
pub use event_dialog::{EventDraft, EventForm};
pub use mock_orders_dialog::MockOrdersPanel;
pub use promo_dialog::PromoForm;
pub use scroll_behavior::ScrollState;
pub use system_dialogs::{
    render_delete_confirmation_dialog, render_error_dialog, render_help_dialog, render_info_dialog,
    render_logs_dialog,
};
pub use venue_dialog::VenueForm;
