use ratatui::widgets::ScrollbarState;

/// Scroll position shared by the scrollable dialogs (info, error, help,
/// logs). The offset is clamped against the content at render time, so
/// jumping to the bottom just saturates.
#[derive(Debug, Default)]
pub struct ScrollState {
    pub offset: usize,
    pub bar: ScrollbarState,
}

impl ScrollState {
    pub fn up(&mut self) {
        self.offset = self.offset.saturating_sub(1);
        self.bar = self.bar.position(self.offset);
    }

    pub fn down(&mut self) {
        self.offset = self.offset.saturating_add(1);
        self.bar = self.bar.position(self.offset);
    }

    pub fn page_up(&mut self) {
        self.offset = self.offset.saturating_sub(10);
        self.bar = self.bar.position(self.offset);
    }

    pub fn page_down(&mut self) {
        self.offset = self.offset.saturating_add(10);
        self.bar = self.bar.position(self.offset);
    }

    pub fn to_top(&mut self) {
        self.offset = 0;
        self.bar = self.bar.position(0);
    }

    pub fn to_bottom(&mut self) {
        self.offset = usize::MAX;
        self.bar = self.bar.position(usize::MAX);
    }

    /// Cap the offset to the scrollable range and sync the bar with it.
    pub fn clamp(&mut self, content_lines: usize, viewport_lines: usize) {
        let max_offset = content_lines.saturating_sub(viewport_lines);
        if self.offset > max_offset {
            self.offset = max_offset;
        }
        self.bar = self.bar.content_length(max_offset).position(self.offset);
    }
}
