use crate::app::{App, UnrecoverableError};
use crate::args::{Args, Parser};
use std::process::ExitCode;

mod app;
mod args;
mod event;
mod notification;
mod service;
mod timer;
mod tui;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let args = Args::parse();

    match run(args).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            ExitCode::FAILURE
        }
    }
}

async fn run(args: Args) -> Result<(), UnrecoverableError> {
    let settings = timer::Settings {
        work_minutes: args.work,
        break_minutes: args.break_minutes,
        seconds_per_minute: if args.dry_run { 1 } else { 60 },
    };

    let mut app = App::new(timer::State::new(settings))?;
    app.run().await
}
