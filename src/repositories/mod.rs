//! Query helpers over the local store's tables.
//!
//! Repositories keep the SeaORM queries in one place so the store's public
//! surface stays small. Entities stay plain data models.

pub mod progress;
pub mod recent;

pub use progress::ProgressRepository;
pub use recent::RecentRepository;
