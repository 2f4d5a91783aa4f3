use super::actions::Action;
use crossterm::event::KeyEvent;
use ratatui::{layout::Rect, Frame};

/// Behavior shared by every widget in the console.
///
/// A component turns key presses into [`Action`]s, reacts to actions flowing
/// down the hierarchy in [`Component::update`], and draws itself into a rect.
/// `update` either consumes an action (returning [`Action::None`]) or passes
/// it along, possibly rewritten, for the next component in the chain.
pub trait Component {
    fn handle_key_events(&mut self, key: KeyEvent) -> Action;

    fn update(&mut self, action: Action) -> Action {
        action
    }

    fn render(&mut self, f: &mut Frame, rect: Rect);
}
