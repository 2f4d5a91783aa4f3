use crossterm::event::{poll, Event, KeyEvent, MouseEvent};
use tokio::time::Duration;

/// How long the poll loop sleeps when the terminal has nothing to say.
/// Ticks drive everything time based: picker debounce windows and the
/// draining of background task results both ride on them.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Polls the terminal for input without blocking the async runtime.
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    pub async fn next_event(&mut self) -> anyhow::Result<EventType> {
        // Pending terminal input goes out before any tick
        if poll(Duration::ZERO)? {
            let event = match crossterm::event::read()? {
                Event::Key(key) => EventType::Key(key),
                Event::Mouse(mouse) => EventType::Mouse(mouse),
                Event::Resize(w, h) => EventType::Resize(w, h),
                _ => EventType::Other,
            };
            return Ok(event);
        }

        tokio::time::sleep(TICK_INTERVAL).await;
        Ok(EventType::Tick)
    }
}

#[derive(Debug, Clone)]
pub enum EventType {
    Key(KeyEvent),
    Mouse(MouseEvent),
    Resize(u16, u16),
    Tick,
    Other,
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
