use std::fmt::{Display, Formatter};

/// The two alternating session kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Work,
    Break,
}

impl Mode {
    pub fn other(self) -> Mode {
        match self {
            Mode::Work => Mode::Break,
            Mode::Break => Mode::Work,
        }
    }

    /// Durations (in minutes) the user can pick interactively for this mode.
    pub fn duration_choices(self) -> [u64; 3] {
        match self {
            Mode::Work => [25, 30, 45],
            Mode::Break => [5, 10, 15],
        }
    }
}

impl Display for Mode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Work => write!(f, "work"),
            Mode::Break => write!(f, "break"),
        }
    }
}

#[derive(Clone, Copy)]
pub struct Settings {
    pub work_minutes: u64,
    pub break_minutes: u64,
    /// 60 normally, 1 in dry-run mode so a "minute" passes every tick.
    pub seconds_per_minute: u64,
}

impl Settings {
    fn default_remaining(&self, mode: Mode) -> SessionDuration {
        let minutes = match mode {
            Mode::Work => self.work_minutes,
            Mode::Break => self.break_minutes,
        };
        SessionDuration(minutes * self.seconds_per_minute)
    }
}

/// Emitted by [`State::tick`] when a countdown reaches zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Completion {
    pub finished: Mode,
    pub next: Mode,
}

#[derive(Clone)]
pub struct State {
    mode: Mode,
    remaining: SessionDuration,
    session_length: SessionDuration,
    work_cycles: u32,
    break_cycles: u32,
    running: bool,
    settings: Settings,
}

impl State {
    pub fn new(settings: Settings) -> State {
        let remaining = settings.default_remaining(Mode::Work);
        State {
            mode: Mode::Work,
            remaining,
            session_length: remaining,
            work_cycles: 0,
            break_cycles: 0,
            running: false,
            settings,
        }
    }

    pub fn start(&mut self) {
        if self.running {
            return;
        }
        self.running = true;
    }

    pub fn pause(&mut self) {
        self.running = false;
    }

    pub fn toggle(&mut self) {
        if self.running {
            self.pause();
        } else {
            self.start();
        }
    }

    /// Stops the countdown and restores the active mode's default duration.
    pub fn reset(&mut self) {
        self.running = false;
        self.set_remaining(self.settings.default_remaining(self.mode));
    }

    pub fn reset_cycles(&mut self) {
        self.work_cycles = 0;
        self.break_cycles = 0;
    }

    /// Advances the countdown by one second. Returns the completion event
    /// when the running session reaches zero; the state is then flipped to
    /// the other mode at its default duration and stopped.
    pub fn tick(&mut self) -> Option<Completion> {
        if !self.running {
            return None;
        }

        self.remaining.0 = self.remaining.0.saturating_sub(1);
        if self.remaining.0 > 0 {
            return None;
        }

        let finished = self.mode;
        match finished {
            Mode::Work => self.work_cycles += 1,
            Mode::Break => self.break_cycles += 1,
        }
        self.mode = finished.other();
        self.set_remaining(self.settings.default_remaining(self.mode));
        self.running = false;

        Some(Completion {
            finished,
            next: self.mode,
        })
    }

    /// Silently ignored while running or when a break session is active.
    pub fn set_work_duration(&mut self, minutes: u64) {
        if self.running || self.mode != Mode::Work {
            return;
        }
        self.set_remaining(SessionDuration(minutes * self.settings.seconds_per_minute));
    }

    /// Silently ignored while running or when a work session is active.
    pub fn set_break_duration(&mut self, minutes: u64) {
        if self.running || self.mode != Mode::Break {
            return;
        }
        self.set_remaining(SessionDuration(minutes * self.settings.seconds_per_minute));
    }

    fn set_remaining(&mut self, duration: SessionDuration) {
        self.remaining = duration;
        self.session_length = duration;
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn time_remaining(&self) -> SessionDuration {
        self.remaining
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn work_cycles(&self) -> u32 {
        self.work_cycles
    }

    pub fn break_cycles(&self) -> u32 {
        self.break_cycles
    }

    /// Fraction of the current session already elapsed, in `0.0..=1.0`.
    pub fn progress_percentage(&self) -> f64 {
        if self.session_length.0 == 0 {
            return 1.0;
        }
        1.0 - self.remaining.0 as f64 / self.session_length.0 as f64
    }
}

/// A countdown value in whole seconds.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct SessionDuration(pub u64);

impl Display for SessionDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let minutes = self.0 / 60;
        let seconds = self.0 % 60;
        write!(f, "{minutes}:{seconds:02}")
    }
}
