/// Everything the application reacts to between ticks
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Event {
    /// Stop or resume ticking. Drawing and polling continue while paused.
    TogglePause,

    /// The terminal changed size and must be redrawn from scratch
    Resize { cols: u16, rows: u16 },

    /// Exit the application
    Exit,
}

impl Event {
    /// Whether the screen has to be wiped before the next frame. Resizes leave stale characters
    /// behind, and anything the event logs to stderr lands on top of the frame.
    pub fn forces_redraw(&self) -> bool {
        matches!(self, Event::TogglePause | Event::Resize { .. })
    }
}
