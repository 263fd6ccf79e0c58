use crate::timer::{Completion, Mode};
use rodio::source::{SineWave, Source};
use rodio::{OutputStream, Sink};
use std::thread;
use std::time::Duration;
use thiserror::Error;

/// Fires the completion side effects. Delivery failures never stop the timer.
pub fn notify_completion(completion: Completion) {
    let title = match completion.finished {
        Mode::Work => "Work time complete!",
        Mode::Break => "Break time complete!",
    };
    let message = match completion.next {
        Mode::Work => "Ready to get back to work?",
        Mode::Break => "Time for a break!",
    };

    let _ = show_desktop_notification(title, message);
    play_notification_sound();
}

pub fn show_desktop_notification(title: &str, message: &str) -> Result<(), NotificationError> {
    notify_rust::Notification::new()
        .summary(title)
        .body(message)
        .show()?;
    Ok(())
}

pub fn play_notification_sound() {
    thread::spawn(move || {
        // ignore errors, too insignificant for crash
        let _ = play_notification_sound_sync();
    });
}

fn play_notification_sound_sync() -> Result<(), NotificationError> {
    let (_stream, stream_handle) = OutputStream::try_default()?;
    let sink = Sink::try_new(&stream_handle)?;

    let chime = SineWave::new(880.0)
        .take_duration(Duration::from_millis(350))
        .amplify(0.6);
    sink.append(chime);
    sink.set_volume(1.0);
    sink.sleep_until_end();

    Ok(())
}

#[derive(Debug, Error)]
pub enum NotificationError {
    #[error("failed to show desktop notification")]
    Show(#[from] notify_rust::error::Error),
    #[error("failed to create audio stream for notification sound: {0}")]
    StreamCreation(#[from] rodio::StreamError),
    #[error("failed to play notification sound: {0}")]
    Play(#[from] rodio::PlayError),
}
