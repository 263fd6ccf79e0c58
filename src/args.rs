use clap::value_parser;
pub use clap::Parser;

#[derive(Parser)]
#[command(version)]
pub struct Args {
    /// Starting work session duration in minutes
    #[arg(short, long, default_value_t = 45, value_parser = value_parser!(u64).range(1..))]
    pub work: u64,

    /// Starting break session duration in minutes
    #[arg(short, long = "break", default_value_t = 10, value_parser = value_parser!(u64).range(1..))]
    pub break_minutes: u64,

    /// Compress minutes into single-second ticks for fast testing
    #[arg(long)]
    pub dry_run: bool,
}
