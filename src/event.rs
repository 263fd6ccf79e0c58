pub enum Event {
    Quit,
    ToggleTimer,
    ResetTimer,
    ResetCycles,
    /// Pick the n-th duration choice of the active mode (zero-based).
    SelectDuration(u8),
    Redraw,
}

pub struct EventConversionUndefinedError;
