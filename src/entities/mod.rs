pub mod generation_progress;
pub mod recent_selection;

pub use generation_progress::Entity as GenerationProgressRow;
pub use recent_selection::Entity as RecentSelection;
