//! Constants used throughout the application
//!
//! This module centralizes business thresholds, magic strings, UI text, and
//! other constant values to improve maintainability and consistency.

// Promo Code Rules
/// Maximum length of a promo code, extra input is truncated
pub const PROMO_CODE_MAX_LEN: usize = 20;
/// Smallest accepted percentage discount
pub const PROMO_PERCENT_MIN: f64 = 1.0;
/// Largest accepted percentage discount
pub const PROMO_PERCENT_MAX: f64 = 100.0;
/// Smallest accepted flat discount in dollars
pub const PROMO_FLAT_MIN_DOLLARS: f64 = 1.0;
/// Largest accepted flat discount in dollars
pub const PROMO_FLAT_MAX_DOLLARS: f64 = 10_000.0;
/// Cents per dollar, flat discounts are stored in cents
pub const CENTS_PER_DOLLAR: f64 = 100.0;

// Search & Recents
/// Quiet period after the last keystroke before a search is issued
pub const SEARCH_DEBOUNCE_MS: u64 = 300;
/// Maximum number of hits a search source returns
pub const SEARCH_RESULT_LIMIT: u32 = 10;
/// Maximum recent selections remembered per entity kind
pub const RECENTS_CAP: usize = 5;
/// Maximum rows fetched into a section list
pub const SECTION_ROWS_LIMIT: u32 = 200;

// Image Uploads
/// Upload size ceiling in bytes (5 MB)
pub const UPLOAD_MAX_BYTES: usize = 5 * 1024 * 1024;
/// Square bounding box images are downscaled to fit, in pixels
pub const IMAGE_MAX_EDGE: u32 = 500;

// Mock Data Generation
/// Smallest number of mock orders per run
pub const GENERATION_MIN_ORDERS: u32 = 1;
/// Largest number of mock orders per run
pub const GENERATION_MAX_ORDERS: u32 = 500;
/// Largest number of tickets on a single mock order
pub const GENERATION_MAX_TICKETS_PER_ORDER: u32 = 10;
/// Progress snapshot is persisted every this many orders
pub const GENERATION_SNAPSHOT_EVERY: u32 = 10;

// Success Messages
pub const SUCCESS_ARTIST_CREATED: &str = "✅ Artist created";
pub const SUCCESS_ARTIST_UPDATED: &str = "✅ Artist updated";
pub const SUCCESS_VENUE_CREATED: &str = "✅ Venue created";
pub const SUCCESS_VENUE_UPDATED: &str = "✅ Venue updated";
pub const SUCCESS_EVENT_CREATED: &str = "✅ Event created";
pub const SUCCESS_EVENT_UPDATED: &str = "✅ Event updated";
pub const SUCCESS_PROMO_SAVED: &str = "✅ Promo code saved";
pub const SUCCESS_ENTITY_DELETED: &str = "✅ Deleted";
pub const SUCCESS_MOCK_DATA_CLEARED: &str = "✅ Mock orders cleared";
pub const SUCCESS_GENERATION_DONE: &str = "✅ Mock data generation finished";

// Error Messages
pub const ERROR_ARTIST_SAVE_FAILED: &str = "❌ Failed to save artist";
pub const ERROR_VENUE_SAVE_FAILED: &str = "❌ Failed to save venue";
pub const ERROR_EVENT_SAVE_FAILED: &str = "❌ Failed to save event";
pub const ERROR_PROMO_SAVE_FAILED: &str = "❌ Failed to save promo code";
pub const ERROR_DELETE_FAILED: &str = "❌ Failed to delete";
pub const ERROR_UPLOAD_FAILED: &str = "❌ Failed to upload image";
pub const ERROR_GENERATION_FAILED: &str = "❌ Mock data generation failed";
pub const ERROR_CLEAR_MOCK_FAILED: &str = "❌ Failed to clear mock orders";
pub const ERROR_LOAD_FAILED: &str = "❌ Failed to load data";

// UI Messages
pub const CONFIG_GENERATED: &str = "✅ Generated default configuration file";
pub const ERROR_NO_API_URL: &str = "❌ Error: USHER_API_URL environment variable not set";
pub const ERROR_NO_API_KEY: &str = "❌ Error: USHER_API_KEY environment variable not set";
pub const DIALOG_TITLE_LOGS: &str = "🔍 Logs - Press 'Esc', 'G' or 'q' to close";
pub const NO_RESULTS: &str = "No results";
pub const SEARCHING: &str = "Searching...";
pub const RECENT_HEADER: &str = "Recent";

// UI Layout Constants
/// Minimum sidebar width in columns
pub const SIDEBAR_MIN_WIDTH: u16 = 15;
/// Maximum sidebar width in columns
pub const SIDEBAR_MAX_WIDTH: u16 = 50;
/// Default sidebar width in columns
pub const SIDEBAR_DEFAULT_WIDTH: u16 = 26;
/// Minimum main area width to preserve usability
pub const MAIN_AREA_MIN_WIDTH: u16 = 20;
/// Rows visible inside a picker popover list
pub const PICKER_LIST_HEIGHT: u16 = 12;
