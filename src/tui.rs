use crate::event::{Event, EventConversionUndefinedError};
use crate::timer::State as TimerState;
use crossterm::event::{Event as CrosstermEvent, EventStream, KeyCode, KeyModifiers};
use futures::StreamExt;
use itertools::Itertools;
use std::io;
use thiserror::Error;
use tui::{
    backend::CrosstermBackend,
    layout::{Alignment, Constraint, Direction, Layout},
    style::{Color, Modifier, Style},
    text::{Span, Spans},
    widgets, Frame, Terminal,
};

pub struct Tui {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    events: EventStream,
    raw_mode_enabled: bool,
    alternate_screen_enabled: bool,
}

impl Tui {
    pub fn new() -> Result<Self, TuiError> {
        let backend = CrosstermBackend::new(io::stdout());

        Ok(Tui {
            terminal: Terminal::new(backend).map_err(TuiError::Creation)?,
            events: EventStream::new(),
            alternate_screen_enabled: false,
            raw_mode_enabled: false,
        })
    }

    /// Has to be explicitly disabled, because disabling can cause errors that have to be catched.
    /// Is not disabled by dropping.
    pub fn enable(&mut self) -> Result<(), TuiError> {
        crossterm::terminal::enable_raw_mode().map_err(TuiError::RawModeToggle)?;
        self.raw_mode_enabled = true;

        crossterm::execute!(
            self.terminal.backend_mut(),
            crossterm::terminal::EnterAlternateScreen,
            crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
        )
        .map_err(TuiError::AlternateScreenToggle)?;
        self.alternate_screen_enabled = true;

        Ok(())
    }

    pub fn disable(&mut self) -> Result<(), TuiError> {
        if self.alternate_screen_enabled {
            crossterm::execute!(
                self.terminal.backend_mut(),
                crossterm::terminal::Clear(crossterm::terminal::ClearType::All),
                crossterm::terminal::LeaveAlternateScreen,
            )
            .map_err(TuiError::AlternateScreenToggle)?;
        }
        if self.raw_mode_enabled {
            crossterm::terminal::disable_raw_mode().map_err(TuiError::RawModeToggle)?;
        }

        Ok(())
    }

    pub fn render(&mut self, display_data: &DisplayData) -> Result<(), TuiError> {
        self.terminal
            .draw(|f| {
                render_ui(f, display_data);
            })
            .map_err(TuiError::Rendering)?;

        Ok(())
    }

    /// Waits for the next terminal event that maps to an app [`Event`].
    pub async fn read_event(&mut self) -> Result<Event, TuiError> {
        loop {
            match self.events.next().await {
                Some(Ok(event)) => {
                    if let Ok(event) = Event::try_from(event) {
                        return Ok(event);
                    }
                }
                Some(Err(err)) => return Err(TuiError::ReadInputEvent(err)),
                None => return Err(TuiError::InputStreamClosed),
            }
        }
    }
}

pub struct DisplayData {
    pub timer_text: String,
    pub mode_name: String,
    pub progress_percentage: f64,
    pub is_paused: bool,
    pub work_cycles: u32,
    pub break_cycles: u32,
    pub duration_legend: String,
}

#[derive(Debug, Error)]
pub enum TuiError {
    #[error("failed to initialize terminal ui: {0}")]
    Creation(io::Error),
    #[error("failed to toggle terminal raw mode: {0}")]
    RawModeToggle(io::Error),
    #[error("failed to toggle alternate terminal screen: {0}")]
    AlternateScreenToggle(io::Error),
    #[error("failed to render terminal ui: {0}")]
    Rendering(io::Error),
    #[error("failed to read input event from terminal: {0}")]
    ReadInputEvent(io::Error),
    #[error("terminal input stream closed unexpectedly")]
    InputStreamClosed,
}

fn render_ui(frame: &mut Frame<CrosstermBackend<io::Stdout>>, display_data: &DisplayData) {
    let timer_chunk = frame.size();

    let timer_clock_sub_chunk = {
        let (clock_width, clock_height) = (21, 11);
        let (left_padding, right_padding);
        {
            let leftover_width = timer_chunk.width.saturating_sub(clock_width);
            left_padding = leftover_width / 2;
            right_padding = leftover_width.saturating_sub(left_padding);
        }
        let (top_padding, bottom_padding);
        {
            let leftover_height = timer_chunk.height.saturating_sub(clock_height);
            top_padding = leftover_height / 2;
            bottom_padding = leftover_height.saturating_sub(top_padding);
        }
        let vertically_centered_sub_chunk;
        {
            let vertical_sub_chunks = Layout::default()
                .direction(Direction::Vertical)
                .constraints([
                    Constraint::Length(top_padding),
                    Constraint::Length(clock_height),
                    Constraint::Length(bottom_padding),
                ])
                .split(timer_chunk);
            vertically_centered_sub_chunk = vertical_sub_chunks[1];
        }
        let horizontal_sub_chunks = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Length(left_padding),
                Constraint::Length(clock_width),
                Constraint::Length(right_padding),
            ])
            .split(vertically_centered_sub_chunk);

        horizontal_sub_chunks[1]
    };

    let timer_text = format!(
        "work {} · break {}\n{}\n{} {}\n{}",
        display_data.work_cycles,
        display_data.break_cycles,
        display_data.timer_text,
        display_data.mode_name,
        if display_data.is_paused { "▶" } else { "⏸" },
        display_data.duration_legend,
    );

    let timer_text_sub_chunk = {
        let text_height = timer_text.lines().count() as u16;
        let ceil_padding = (timer_clock_sub_chunk.height / 2).saturating_sub(text_height / 2);
        let floor_padding = timer_clock_sub_chunk
            .height
            .saturating_sub(ceil_padding)
            .saturating_sub(text_height / 2);
        let vertical_sub_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(ceil_padding),
                Constraint::Length(text_height),
                Constraint::Length(floor_padding),
            ])
            .split(timer_clock_sub_chunk);

        vertical_sub_chunks[1]
    };

    let widget_timer_block = {
        let title_text_initial_style = Style::default().fg(Color::Red).add_modifier(Modifier::BOLD);
        let title_text_base_style = Style::default()
            .fg(Color::White)
            .add_modifier(Modifier::BOLD);

        widgets::Block::default()
            .borders(widgets::Borders::ALL)
            .title(Spans::from(vec![
                Span::styled("t", title_text_initial_style),
                Span::styled("omato", title_text_base_style),
            ]))
    };

    let widget_timer_text = widgets::Paragraph::new(timer_text).alignment(Alignment::Center);

    let widget_clock_animation = {
        let outline = animations::session_outline(1.0 - display_data.progress_percentage);

        widgets::Paragraph::new(outline).alignment(Alignment::Left)
    };

    frame.render_widget(widget_clock_animation, timer_clock_sub_chunk);
    frame.render_widget(widget_timer_text, timer_text_sub_chunk);
    frame.render_widget(widget_timer_block, timer_chunk);
}

mod animations {
    use unicode_segmentation::UnicodeSegmentation;

    const OUTLINE: &str = "╭───────────────────╮
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
│                   │
╰───────────────────╯";

    const OUTLINE_WIDTH: usize = 21;
    const OUTLINE_HEIGHT: usize = 11;
    const OUTLINE_SEGMENTS: usize = 60;

    /// Draws the session outline with only `fraction` of its border segments
    /// left, vanishing from twelve o'clock around the dial.
    pub fn session_outline(fraction: f64) -> String {
        let fraction = fraction.clamp(0.0, 1.0);

        let draw_n_segments = (OUTLINE_SEGMENTS as f64 * fraction).ceil() as usize;
        let skip_n_segments = OUTLINE_SEGMENTS - draw_n_segments;

        let mut grapheme_matrix: Vec<Vec<&str>> = OUTLINE
            .lines()
            .map(|line| line.graphemes(true).collect())
            .collect();

        for (row, col) in border_path().into_iter().take(skip_n_segments) {
            grapheme_matrix[row][col] = " ";
        }

        grapheme_matrix
            .iter()
            .map(|row| row.concat() + "\n")
            .collect()
    }

    /// Border cells in the order they are blanked, starting at the top center.
    fn border_path() -> Vec<(usize, usize)> {
        let mut path = Vec::with_capacity(OUTLINE_SEGMENTS);
        for col in (0..OUTLINE_WIDTH / 2).rev() {
            path.push((0, col));
        }
        for row in 1..OUTLINE_HEIGHT {
            path.push((row, 0));
        }
        for col in 1..OUTLINE_WIDTH {
            path.push((OUTLINE_HEIGHT - 1, col));
        }
        for row in (0..OUTLINE_HEIGHT - 1).rev() {
            path.push((row, OUTLINE_WIDTH - 1));
        }
        for col in ((OUTLINE_WIDTH / 2)..(OUTLINE_WIDTH - 1)).rev() {
            path.push((0, col));
        }
        path
    }

}

impl TryFrom<CrosstermEvent> for Event {
    type Error = EventConversionUndefinedError;

    fn try_from(value: CrosstermEvent) -> Result<Self, Self::Error> {
        match value {
            CrosstermEvent::Key(key_event)
                if key_event.modifiers.contains(KeyModifiers::CONTROL) =>
            {
                match key_event.code {
                    KeyCode::Char('c') => Some(Event::Quit),
                    _ => None,
                }
            }
            CrosstermEvent::Key(key_event) => match key_event.code {
                KeyCode::Char('q') => Some(Event::Quit),
                KeyCode::Char('r') => Some(Event::ResetTimer),
                KeyCode::Char('c') => Some(Event::ResetCycles),
                KeyCode::Char(' ') => Some(Event::ToggleTimer),
                KeyCode::Char('1') => Some(Event::SelectDuration(0)),
                KeyCode::Char('2') => Some(Event::SelectDuration(1)),
                KeyCode::Char('3') => Some(Event::SelectDuration(2)),
                KeyCode::Esc => Some(Event::Quit),
                _ => None,
            },
            CrosstermEvent::Resize(..) => Some(Event::Redraw),
            _ => None,
        }
        .ok_or(EventConversionUndefinedError)
    }
}

impl From<&TimerState> for DisplayData {
    fn from(state: &TimerState) -> Self {
        let duration_legend = state
            .mode()
            .duration_choices()
            .iter()
            .enumerate()
            .map(|(i, minutes)| format!("{}·{minutes}m", i + 1))
            .join(" ");

        Self {
            timer_text: state.time_remaining().to_string(),
            mode_name: state.mode().to_string(),
            progress_percentage: state.progress_percentage(),
            is_paused: !state.is_running(),
            work_cycles: state.work_cycles(),
            break_cycles: state.break_cycles(),
            duration_legend,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::{Settings, State};
    use crossterm::event::KeyEvent;

    fn key(code: KeyCode) -> CrosstermEvent {
        CrosstermEvent::Key(KeyEvent::new(code, KeyModifiers::NONE))
    }

    #[test]
    fn keys_map_to_app_events() {
        assert!(matches!(
            Event::try_from(key(KeyCode::Char(' '))),
            Ok(Event::ToggleTimer)
        ));
        assert!(matches!(
            Event::try_from(key(KeyCode::Char('r'))),
            Ok(Event::ResetTimer)
        ));
        assert!(matches!(
            Event::try_from(key(KeyCode::Char('c'))),
            Ok(Event::ResetCycles)
        ));
        assert!(matches!(
            Event::try_from(key(KeyCode::Char('2'))),
            Ok(Event::SelectDuration(1))
        ));
        assert!(matches!(
            Event::try_from(key(KeyCode::Char('q'))),
            Ok(Event::Quit)
        ));
        assert!(matches!(
            Event::try_from(key(KeyCode::Esc)),
            Ok(Event::Quit)
        ));
    }

    #[test]
    fn ctrl_c_quits() {
        let event = CrosstermEvent::Key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(matches!(Event::try_from(event), Ok(Event::Quit)));
    }

    #[test]
    fn unmapped_input_is_discarded() {
        assert!(Event::try_from(key(KeyCode::Char('x'))).is_err());
        assert!(Event::try_from(key(KeyCode::Enter)).is_err());
    }

    #[test]
    fn display_data_reflects_the_active_mode() {
        let state = State::new(Settings {
            work_minutes: 45,
            break_minutes: 10,
            seconds_per_minute: 60,
        });
        let display = DisplayData::from(&state);

        assert_eq!(display.timer_text, "45:00");
        assert_eq!(display.mode_name, "work");
        assert!(display.is_paused);
        assert_eq!(display.duration_legend, "1·25m 2·30m 3·45m");
    }
}
