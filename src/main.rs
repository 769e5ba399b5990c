mod api;
mod app;
mod config;
mod display;
mod error;
mod logging;
mod theme;
mod ui;

use anyhow::Result;
use clap::Parser;
use crossterm::{
    event::{Event, EventStream, KeyEventKind},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use futures::StreamExt;
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;

use api::{BmiClient, HeightUnit};
use app::App;
use config::AppConfig;
use theme::Theme;

#[derive(Parser, Debug)]
#[command(name = "bmi-tui")]
#[command(author = "Sean Fournier")]
#[command(version = "0.1.0")]
#[command(about = "A terminal BMI calculator client for a remote BMI service")]
struct Args {
    /// Base URL of the BMI service (overrides config)
    #[arg(long)]
    server: Option<String>,

    /// Weight in kilograms (one-shot mode, needs --height)
    #[arg(short, long, requires = "height", allow_hyphen_values = true)]
    weight: Option<String>,

    /// Height in the chosen unit (one-shot mode, needs --weight)
    #[arg(short = 'H', long, requires = "weight", allow_hyphen_values = true)]
    height: Option<String>,

    /// Unit of --height
    #[arg(short, long, value_enum, default_value_t = HeightUnit::Cm)]
    unit: HeightUnit,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let one_shot = args.weight.is_some() && args.height.is_some();

    logging::init(!one_shot);

    let config = AppConfig::load();
    let server_url = args.server.clone().unwrap_or(config.server_url.clone());
    tracing::debug!("Using BMI service at {}", server_url);

    let app = App::new(BmiClient::new(&server_url), Theme::from_config(&config.theme));

    if let (Some(weight), Some(height)) = (args.weight, args.height) {
        return run_once(app, weight, height, args.unit).await;
    }

    run_tui(app).await
}

/// Run one submit cycle without the TUI and print the result as JSON
async fn run_once(mut app: App, weight: String, height: String, unit: HeightUnit) -> Result<()> {
    app.weight = weight;
    app.height = height;
    app.unit = unit;

    app.submit().await;

    if let Some(alert) = app.alert.take() {
        anyhow::bail!(alert);
    }

    let view = &app.result;
    let output = serde_json::json!({
        "bmi": view.bmi,
        "category": view.category,
        "note": view.note,
        "healthy_range": view.healthy_range,
        "progress_percent": view.progress_percent(),
    });

    println!("{}", serde_json::to_string(&output)?);
    Ok(())
}

async fn run_tui(mut app: App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Main loop
    let result = run_app(&mut terminal, &mut app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

async fn run_app(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> Result<()> {
    let mut events = EventStream::new();

    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        // A submit was started: the frame above shows the busy button.
        // Wait for the service, but keep listening for Ctrl-C.
        if app.is_in_flight() {
            tokio::select! {
                _ = app.finish_submit() => {}
                quit = wait_for_interrupt(&mut events) => return quit,
            }
            continue;
        }

        match events.next().await {
            Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                if app.is_quit_key(&key) {
                    return Ok(());
                }
                app.handle_key(key);
            }
            Some(Ok(_)) => {}
            Some(Err(e)) => return Err(e.into()),
            None => return Ok(()),
        }
    }
}

/// Drain input while a request is out, ignoring everything but Ctrl-C
async fn wait_for_interrupt(events: &mut EventStream) -> Result<()> {
    while let Some(event) = events.next().await {
        if let Event::Key(key) = event? {
            if key.kind == KeyEventKind::Press && App::is_interrupt(&key) {
                tracing::info!("Quit while a request was in flight");
                return Ok(());
            }
        }
    }
    Ok(())
}
