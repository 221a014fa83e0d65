pub enum Event {
    EngineEvent(EngineEvent),
    AppEvent(AppEvent),
}

pub enum EngineEvent {
    /// Stop or resume stepping
    TogglePause,

    /// Advance a paused automaton by one generation
    Step,
}

pub enum AppEvent {
    /// The terminal changed size
    Resize { cols: u16, rows: u16 },

    /// Exit the application
    Exit,
}
