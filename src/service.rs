use crate::timer::{Mode, SessionDuration};
use crossterm::terminal::SetTitle;
use std::io;

/// Mirrors the running countdown in the terminal title so progress stays
/// visible while the window is backgrounded. Best effort: write errors are
/// ignored and never affect the countdown itself.
pub struct VisibleCountdown {
    active: bool,
}

impl VisibleCountdown {
    pub fn new() -> Self {
        Self { active: false }
    }

    pub fn begin(&mut self, mode: Mode, remaining: SessionDuration) {
        self.active = true;
        self.update(mode, remaining);
    }

    pub fn update(&mut self, mode: Mode, remaining: SessionDuration) {
        if !self.active {
            return;
        }
        let _ = crossterm::execute!(io::stdout(), SetTitle(format!("{remaining} {mode} · tomato")));
    }

    pub fn end(&mut self) {
        if !self.active {
            return;
        }
        self.active = false;
        let _ = crossterm::execute!(io::stdout(), SetTitle("tomato"));
    }
}
