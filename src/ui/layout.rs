//! Screen partitioning for the console.

use ratatui::layout::{Constraint, Flex, Layout, Rect};

use crate::constants::{MAIN_AREA_MIN_WIDTH, SIDEBAR_MAX_WIDTH, SIDEBAR_MIN_WIDTH};

/// Layout math shared by the app shell and the dialogs.
pub struct LayoutManager;

impl LayoutManager {
    /// Split the screen into the working area and a one line status bar.
    #[must_use]
    pub fn main_layout(area: Rect) -> Vec<Rect> {
        Layout::vertical([Constraint::Min(0), Constraint::Length(1)])
            .split(area)
            .to_vec()
    }

    /// Sidebar and roster side by side. The configured sidebar width is
    /// clamped so the roster always keeps a usable minimum.
    #[must_use]
    pub fn top_pane_layout(area: Rect, sidebar_width: u16) -> Vec<Rect> {
        let clamped = sidebar_width
            .clamp(SIDEBAR_MIN_WIDTH, SIDEBAR_MAX_WIDTH)
            .min(area.width.saturating_sub(MAIN_AREA_MIN_WIDTH));

        Layout::horizontal([Constraint::Length(clamped), Constraint::Min(0)])
            .split(area)
            .to_vec()
    }

    /// Popup rect sized as a percentage of the screen on both axes.
    #[must_use]
    pub fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
        let [mid] = Layout::vertical([Constraint::Percentage(percent_y)])
            .flex(Flex::Center)
            .areas(r);
        let [rect] = Layout::horizontal([Constraint::Percentage(percent_x)])
            .flex(Flex::Center)
            .areas(mid);
        rect
    }

    /// Popup rect with a percentage width and a fixed height in lines.
    #[must_use]
    pub fn centered_rect_lines(percent_x: u16, height_lines: u16, r: Rect) -> Rect {
        let [mid] = Layout::vertical([Constraint::Length(height_lines)])
            .flex(Flex::Center)
            .areas(r);
        let [rect] = Layout::horizontal([Constraint::Percentage(percent_x)])
            .flex(Flex::Center)
            .areas(mid);
        rect
    }
}
