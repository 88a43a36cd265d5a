use std::io;

use crossterm::event::{self, Event};

/// Events processed by TUI applications.
#[derive(Debug, Clone)]
pub(super) enum TuiEvent {
    /// The screen is stale and must be redrawn.
    Render,
    /// Terminal events such as key input, mouse, and resize.
    Crossterm(Event),
}

/// Event source for views that only change in response to input.
///
/// Every terminal event marks the screen dirty, and a render is emitted
/// before waiting for the next one.
#[derive(Debug)]
pub(super) struct EventLoop {
    dirty: bool,
}

impl Default for EventLoop {
    fn default() -> Self {
        // initial render on startup
        Self { dirty: true }
    }
}

impl EventLoop {
    /// Returns the next event, blocking on terminal input when nothing is stale.
    pub(super) fn next(&mut self) -> io::Result<TuiEvent> {
        if self.dirty {
            self.dirty = false;
            return Ok(TuiEvent::Render);
        }
        let event = event::read()?;
        self.dirty = true;
        Ok(TuiEvent::Crossterm(event))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_event_is_render() {
        let mut events = EventLoop::default();
        assert!(matches!(events.next().unwrap(), TuiEvent::Render));
    }
}
