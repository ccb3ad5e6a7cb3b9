use std::path::PathBuf;
use std::process::ExitCode;

use campus_calendar::render::{LoadError, MonthView, SidePanelView, Stats};
use campus_calendar::{refresh, CalendarCursor, CalendarView, EventsClient, LoadState};
use campus_core::{AppError, Config};
use chrono::{Local, Utc};
use clap::Parser;

#[derive(Parser)]
#[command(name = "campus")]
#[command(about = "Show the campus events calendar")]
struct Cli {
    /// Month to display as YYYY-MM (defaults to the current month)
    #[arg(short, long)]
    month: Option<CalendarCursor>,

    /// Show the details of the event with this id
    #[arg(short, long)]
    event: Option<String>,

    /// Read configuration from this file instead of the user config directory
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            tracing::error!("{}", e);
            eprintln!("{}", e.user_message());
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode, AppError> {
    campus_core::init()?;

    let (config, _) = match &cli.config {
        Some(path) => Config::load_validated_from(path)?,
        None => Config::load_validated()?,
    };

    let client = EventsClient::from_config(&config)?;
    tracing::info!("Fetching events from {}", client.endpoint());

    let cursor = cli.month.unwrap_or_else(CalendarCursor::today);
    let mut view = CalendarView::new(cursor).with_upcoming_limit(config.calendar.upcoming_limit);
    refresh(&mut view, &client).await;

    if let LoadState::Failed(message) = view.state() {
        eprint!("{}", LoadError(message));
        return Ok(ExitCode::FAILURE);
    }

    if let Some(id) = &cli.event {
        if !view.select_by_id(id) {
            tracing::warn!("Event {} is not in the loaded set", id);
            eprintln!("Evento {} no encontrado", id);
        }
    }

    let today = Local::now().date_naive();
    println!("{}", MonthView(&view.grid(today)));
    println!("{}", SidePanelView(&view.side_panel(Utc::now())));
    print!("{}", Stats(view.event_count()));

    Ok(ExitCode::SUCCESS)
}
