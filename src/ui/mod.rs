//! Terminal user interface for the box office console.
//!
//! Input flows from the terminal through [`app_component::AppComponent`],
//! which routes it to the sidebar, the roster, or whichever dialog is
//! open. Components answer with [`core::Action`]s; the app component
//! turns those into background tasks and pushes results back down.

pub mod app_component;
pub mod components;
pub mod core;
pub mod layout;
pub mod renderer;

pub use layout::LayoutManager;
pub use renderer::run_app;
