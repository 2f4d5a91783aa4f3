//! Widgets making up the console: the section sidebar, the roster list,
//! the status bar, and the dialog stack with its pickers.

pub mod dialog_component;
pub mod dialogs;
pub mod picker;
pub mod roster_component;
pub mod scrollbar_helper;
pub mod sidebar_component;
pub mod status_bar;

pub use dialog_component::DialogComponent;
pub use roster_component::RosterComponent;
pub use sidebar_component::SidebarComponent;
pub use status_bar::StatusBar;
