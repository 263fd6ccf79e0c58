use crate::event::Event;
use crate::notification;
use crate::service::VisibleCountdown;
use crate::timer::{Mode, State};
use crate::tui::{DisplayData, Tui, TuiError};
use std::ops::Deref;
use std::time::Duration;
use thiserror::Error;
use tokio::select;
use tokio::time::{interval, MissedTickBehavior};

pub struct App {
    timer_state: State,
    tui: Tui,
    visible_countdown: VisibleCountdown,
}

impl App {
    pub fn new(timer_state: State) -> Result<Self, UnrecoverableError> {
        let tui = Tui::new()?;

        Ok(Self {
            timer_state,
            tui,
            visible_countdown: VisibleCountdown::new(),
        })
    }

    pub async fn run(&mut self) -> Result<(), UnrecoverableError> {
        self.tui.enable()?;
        let maybe_err = self.run_inner().await;
        self.tui.disable()?;

        maybe_err?;
        Ok(())
    }

    async fn run_inner(&mut self) -> Result<(), UnrecoverableError> {
        let mut countdown_clock = interval(Duration::from_secs(1));
        countdown_clock.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            let display_data = DisplayData::from(&self.timer_state);
            self.tui.render(&display_data)?;

            select! {
                _ = countdown_clock.tick() => {
                    if let Some(completion) = self.timer_state.tick() {
                        self.visible_countdown.end();
                        notification::notify_completion(completion);
                    } else if self.timer_state.is_running() {
                        self.visible_countdown
                            .update(self.timer_state.mode(), self.timer_state.time_remaining());
                    }
                }
                tui_event = self.tui.read_event() => {
                    let event = tui_event?;
                    let was_running = self.timer_state.is_running();

                    if *handle_event(&event, &mut self.timer_state) {
                        break;
                    }

                    match (was_running, self.timer_state.is_running()) {
                        (false, true) => {
                            // first decrement lands a full second after start
                            countdown_clock.reset();
                            self.visible_countdown
                                .begin(self.timer_state.mode(), self.timer_state.time_remaining());
                        }
                        (true, false) => self.visible_countdown.end(),
                        _ => (),
                    }
                }
            }
        }

        self.visible_countdown.end();

        Ok(())
    }
}

fn handle_event(event: &Event, state: &mut State) -> AppShouldQuit {
    match event {
        Event::ToggleTimer => state.toggle(),
        Event::ResetTimer => state.reset(),
        Event::ResetCycles => state.reset_cycles(),
        Event::SelectDuration(choice) => {
            let choices = state.mode().duration_choices();
            if let Some(minutes) = choices.get(*choice as usize) {
                match state.mode() {
                    Mode::Work => state.set_work_duration(*minutes),
                    Mode::Break => state.set_break_duration(*minutes),
                }
            }
        }
        Event::Redraw => (),
        Event::Quit => return AppShouldQuit(true),
    };

    AppShouldQuit(false)
}

struct AppShouldQuit(bool);

impl Deref for AppShouldQuit {
    type Target = bool;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

/// Represents errors the app has no control over.
#[derive(Debug, Error)]
pub enum UnrecoverableError {
    #[error("error while interfacing with the terminal: {0}")]
    Tui(#[from] TuiError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{SessionDuration, Settings};

    fn dry_state() -> State {
        State::new(Settings {
            work_minutes: 3,
            break_minutes: 2,
            seconds_per_minute: 1,
        })
    }

    #[test]
    fn toggle_event_starts_and_pauses() {
        let mut state = dry_state();

        assert!(!*handle_event(&Event::ToggleTimer, &mut state));
        assert!(state.is_running());

        assert!(!*handle_event(&Event::ToggleTimer, &mut state));
        assert!(!state.is_running());
    }

    #[test]
    fn select_duration_uses_the_active_modes_choices() {
        let mut state = dry_state();

        handle_event(&Event::SelectDuration(0), &mut state);
        assert_eq!(state.time_remaining(), SessionDuration(25));

        handle_event(&Event::SelectDuration(2), &mut state);
        assert_eq!(state.time_remaining(), SessionDuration(45));
    }

    #[test]
    fn select_duration_is_ignored_while_running() {
        let mut state = dry_state();

        state.start();
        handle_event(&Event::SelectDuration(0), &mut state);

        assert_eq!(state.time_remaining(), SessionDuration(3));
    }

    #[test]
    fn out_of_range_choice_is_ignored() {
        let mut state = dry_state();

        handle_event(&Event::SelectDuration(7), &mut state);

        assert_eq!(state.time_remaining(), SessionDuration(3));
    }

    #[test]
    fn reset_event_restores_the_default_duration() {
        let mut state = dry_state();

        state.start();
        state.tick();
        handle_event(&Event::ResetTimer, &mut state);

        assert!(!state.is_running());
        assert_eq!(state.time_remaining(), SessionDuration(3));
    }

    #[test]
    fn quit_event_requests_shutdown() {
        let mut state = dry_state();
        assert!(*handle_event(&Event::Quit, &mut state));
    }
}
