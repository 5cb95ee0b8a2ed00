//! Booking Desk - appointment booking form and mail relay
//!
//! Runs either the terminal booking form, which validates requests as they
//! are typed and posts accepted ones to the relay, or the relay itself,
//! which turns posted requests into notification mail.

mod app;
mod client;
mod config;
mod platform;
mod relay;
mod state;
mod ui;

use anyhow::Result;
use app::App;
use clap::{Args, Parser, Subcommand};
use config::{BookingConfig, TransportKind};
use crossterm::{
    event::{self, Event, KeyCode, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::io;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "booking-desk", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Open the booking form (default)
    Form(FormArgs),
    /// Run the mail relay
    Serve(ServeArgs),
    /// Write the effective configuration to the config file
    InitConfig,
}

#[derive(Debug, Default, Args)]
struct FormArgs {
    /// Relay endpoint to post accepted requests to
    #[arg(long)]
    relay_url: Option<String>,
    /// Confirm requests locally without contacting a relay
    #[arg(long)]
    local: bool,
}

#[derive(Debug, Args)]
struct ServeArgs {
    /// Address to listen on
    #[arg(long)]
    bind: Option<String>,
    /// Address booking notifications are sent to
    #[arg(long)]
    recipient: Option<String>,
    /// Sender used when a request carries no usable address
    #[arg(long)]
    sender: Option<String>,
    /// How mail is handed off
    #[arg(long, value_enum)]
    transport: Option<TransportKind>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let command = cli.command.unwrap_or(Command::Form(FormArgs::default()));

    // The form owns the terminal, so it logs to a file
    let _log_guard = init_tracing(matches!(command, Command::Form(_)));

    let mut config = BookingConfig::load()?;

    match command {
        Command::Serve(args) => {
            if let Some(bind) = args.bind {
                config.bind = bind;
            }
            if let Some(recipient) = args.recipient {
                config.recipient = recipient;
            }
            if let Some(sender) = args.sender {
                config.sender = sender;
            }
            if let Some(transport) = args.transport {
                config.transport = transport;
            }
            relay::serve(&config).await
        }
        Command::InitConfig => {
            match config.save()? {
                Some(path) => println!("{}", path.display()),
                None => anyhow::bail!("no configuration directory on this platform"),
            }
            Ok(())
        }
        Command::Form(args) => {
            args.apply(&mut config);
            let mut app = App::new(&config, args.local)?;
            run_terminal(&mut app).await
        }
    }
}

impl FormArgs {
    /// Apply form flags on top of the loaded configuration
    fn apply(&self, config: &mut BookingConfig) {
        if let Some(url) = &self.relay_url {
            config.relay_url = Some(url.clone()).filter(|u| !u.is_empty());
        }
    }
}

/// Initialize logging, to a daily log file when `to_file` is set and to
/// stderr otherwise. The returned guard flushes the file writer on drop.
fn init_tracing(to_file: bool) -> Option<WorkerGuard> {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| "booking_desk=info".into());
    let registry = tracing_subscriber::registry().with(filter);

    if !to_file {
        registry.with(fmt::layer().with_writer(io::stderr)).init();
        return None;
    }

    let appender = BookingConfig::log_dir().and_then(|dir| {
        RollingFileAppender::builder()
            .rotation(Rotation::DAILY)
            .filename_prefix("booking-desk")
            .filename_suffix("log")
            .build(dir)
            .ok()
    });
    // Without a writable log directory the form runs without logs
    let appender = appender?;
    let (writer, guard) = tracing_appender::non_blocking(appender);
    registry
        .with(fmt::layer().with_ansi(false).with_writer(writer))
        .init();
    Some(guard)
}

/// Set up the terminal, run the form and restore the terminal
async fn run_terminal(app: &mut App) -> Result<()> {
    // Setup terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    // Handle any errors
    if let Err(err) = result {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }

    Ok(())
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()> {
    loop {
        // Draw the UI
        terminal.draw(|frame| ui::draw(frame, app))?;

        if event::poll(std::time::Duration::from_millis(100))? {
            if let Event::Key(key) = event::read()? {
                if key.kind != KeyEventKind::Press {
                    continue;
                }
                // Global quit: Ctrl+C
                if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL)
                {
                    return Ok(());
                }

                app.handle_key(key)?;
                if app.has_pending() {
                    // Show the sending status before waiting on the relay
                    terminal.draw(|frame| ui::draw(frame, app))?;
                    app.deliver_pending().await;
                }
            }
        }

        // Check if app wants to quit
        if app.should_quit() {
            return Ok(());
        }
    }
}
