//! Building blocks for the console UI.
//!
//! Input arrives as [`EventType`]s from the [`EventHandler`], components turn
//! it into [`Action`]s, and the app loop routes each action through the
//! component chain before acting on whatever is left over. Long-running work
//! goes through the [`TaskManager`], which reports back as more actions over
//! an unbounded channel drained on every tick.

pub mod actions;
pub mod component;
pub mod event_handler;
pub mod task_manager;

pub use actions::{Action, AdminSection, DialogType, ReturnTo, SectionData};
pub use component::Component;
pub use event_handler::{EventHandler, EventType};
pub use task_manager::{TaskId, TaskManager, TaskResult};
