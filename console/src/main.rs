mod config;
mod output;

use std::{io::IsTerminal, path::PathBuf};

use anyhow::{Context, Result, anyhow, bail};
use chrono::Datelike;
use clap::{Args, Parser, Subcommand};
use entity::{LeaveRecord, Reminder};
use platform_api::{Geocoder, HrClient};
use platform_obs::{ObsConfig, init_tracing};
use platform_session::{Session, SessionSettings};
use products_hr::{
    Candidate, Directory, HrError,
    dashboard::{self, DashboardSnapshot},
    leave::{LeaveDesk, LeaveSummary, StatusFilter},
    letterhead::{self, Letterhead, LetterheadConfig},
    tracking::{LocationTracker, TrackOutcome},
};
use serde::Serialize;
use tracing::{info, warn};
use url::Url;

use crate::{config::AppConfig, output::Output};

#[derive(Parser, Debug)]
#[command(name = "hrm-console", version, about = "HRM console for the subadmin dashboard")]
struct Cli {
    /// Session JSON file (overrides HRM_SESSION_FILE).
    #[arg(long, global = true, value_name = "FILE")]
    session: Option<PathBuf>,
    /// Backend origin (overrides HRM_API_BASE_URL).
    #[arg(long, global = true, value_name = "URL")]
    base_url: Option<Url>,
    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,
    /// Increase log verbosity (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List every employee of the tenant.
    Employees,
    /// Rank employee names against a query.
    Search { query: String },
    /// Show the live location of an employee.
    Track(TrackCommand),
    /// Review leave applications.
    #[command(subcommand)]
    Leaves(LeavesCommand),
    /// Headcount, payroll and today's birthdays and reminder.
    Dashboard {
        #[arg(long, help = "Budget the payroll is measured against")]
        budget: Option<f64>,
    },
    /// Due-date reminders.
    #[command(subcommand)]
    Reminders(RemindersCommand),
    /// Company letterhead content.
    Letterhead {
        #[arg(long, value_name = "FILE", help = "JSON letterhead settings")]
        config: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct TrackCommand {
    /// Name query; the best-ranked match is tracked.
    query: Option<String>,
    #[arg(long, help = "Track this employee id instead of searching")]
    id: Option<String>,
}

#[derive(Subcommand, Debug)]
enum LeavesCommand {
    /// List applications with optional filters.
    List {
        #[arg(long, default_value = "all", help = "all, pending, approved or rejected")]
        status: StatusFilter,
        #[arg(long, default_value = "", help = "Employee name contains")]
        employee: String,
    },
    /// Approve an application.
    Approve { id: String },
    /// Reject an application.
    Reject { id: String },
    /// Delete an application.
    Delete { id: String },
}

#[derive(Subcommand, Debug)]
enum RemindersCommand {
    /// Report the reminder due today, if any.
    Check,
    /// Keep checking at every local midnight until interrupted.
    Watch,
}

#[derive(Serialize)]
struct LeaveListing<'a> {
    summary: LeaveSummary,
    records: Vec<&'a LeaveRecord>,
}

struct App {
    config: AppConfig,
    client: HrClient,
    session: Session,
    out: Output,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let _obs = init_tracing(
        ObsConfig {
            ansi: std::io::stderr().is_terminal(),
            ..ObsConfig::default()
        }
        .verbosity(cli.verbose),
    )?;

    let mut config = AppConfig::load()?;
    if let Some(path) = cli.session {
        config.session_file = path;
    }
    if let Some(base_url) = cli.base_url {
        config.base_url = base_url;
    }
    let app = build_app(config, Output::new(cli.json))?;

    match cli.command {
        Command::Employees => list_employees(&app).await,
        Command::Search { query } => search(&app, &query).await,
        Command::Track(cmd) => track(&app, cmd).await,
        Command::Leaves(cmd) => leaves(&app, cmd).await,
        Command::Dashboard { budget } => show_dashboard(&app, budget).await,
        Command::Reminders(RemindersCommand::Check) => check_reminder(&app).await,
        Command::Reminders(RemindersCommand::Watch) => watch(&app).await,
        Command::Letterhead { config } => show_letterhead(&app, config).await,
    }
}

fn build_app(config: AppConfig, out: Output) -> Result<App> {
    let session = SessionSettings::at(&config.session_file)
        .load()
        .with_context(|| format!("cannot use session {}", config.session_file.display()))?;

    let mut client = HrClient::new(config.client_config()).context("invalid backend URL")?;
    match &config.geocode_api_key {
        Some(key) => {
            let geocoder = Geocoder::new(client.http().clone(), config.geocode_url.clone(), key);
            client = client.with_geocoder(geocoder);
        }
        None => info!("HRM_GEOCODE_API_KEY not set; addresses will be empty"),
    }

    Ok(App {
        config,
        client,
        session,
        out,
    })
}

fn user_error(err: HrError) -> anyhow::Error {
    anyhow!(err.user_message())
}

async fn list_employees(app: &App) -> Result<()> {
    let directory = Directory::load(&app.client, &app.session).await.map_err(user_error)?;
    app.out.emit(directory.records(), output::employees)
}

async fn search(app: &App, query: &str) -> Result<()> {
    let directory = Directory::load(&app.client, &app.session).await.map_err(user_error)?;
    let matches = directory.suggest(query);
    app.out.emit(&matches, |matches| output::candidates(matches))
}

async fn track(app: &App, cmd: TrackCommand) -> Result<()> {
    let directory = Directory::load(&app.client, &app.session).await.map_err(user_error)?;
    let employee = match (&cmd.id, &cmd.query) {
        (Some(id), _) => directory
            .find(id)
            .cloned()
            .unwrap_or_else(|| Candidate::new(id.as_str(), "")),
        (None, Some(query)) => directory
            .suggest(query)
            .first()
            .map(|candidate| (*candidate).clone())
            .ok_or_else(|| user_error(HrError::NoMatch(query.clone())))?,
        (None, None) => bail!("give a name query or --id"),
    };

    let tracker = LocationTracker::new(app.client.clone());
    match tracker.track(&app.session, &employee).await {
        Ok(TrackOutcome::Located(location)) => app.out.emit(&location, output::location),
        Ok(TrackOutcome::Superseded) => Ok(()),
        Err(err) => {
            eprintln!("{}", err.user_message());
            Ok(())
        }
    }
}

async fn leaves(app: &App, cmd: LeavesCommand) -> Result<()> {
    let mut desk = LeaveDesk::load(&app.client, &app.session).await.map_err(user_error)?;
    match cmd {
        LeavesCommand::List { status, employee } => {
            let listing = LeaveListing {
                summary: desk.summary(),
                records: desk.view(status, &employee),
            };
            app.out.emit(&listing, |listing| {
                output::leaves(&listing.summary, &listing.records)
            })
        }
        LeavesCommand::Approve { id } => {
            let record = desk.approve(&app.client, &id).await.map_err(user_error)?;
            app.out.emit(record, output::leave)
        }
        LeavesCommand::Reject { id } => {
            let record = desk.reject(&app.client, &id).await.map_err(user_error)?;
            app.out.emit(record, output::leave)
        }
        LeavesCommand::Delete { id } => {
            let record = desk.delete(&app.client, &id).await.map_err(user_error)?;
            app.out.emit(&record, output::leave)
        }
    }
}

async fn show_dashboard(app: &App, budget: Option<f64>) -> Result<()> {
    let budget = budget.unwrap_or(app.config.budget);
    let today = chrono::Local::now().date_naive();
    let snapshot = DashboardSnapshot::load(&app.client, &app.session, budget, today)
        .await
        .map_err(user_error)?;
    app.out.emit(&snapshot, output::dashboard)
}

async fn check_reminder(app: &App) -> Result<()> {
    let today = chrono::Local::now().date_naive();
    let due = dashboard::check_due_reminder(&app.client, &app.session, today).await;
    app.out.emit(&due, output::reminder)
}

async fn watch(app: &App) -> Result<()> {
    let out = app.out;
    let on_due = move |reminder: &Reminder| {
        if let Err(err) = out.emit(reminder, |reminder| output::reminder(&Some(reminder.clone()))) {
            warn!(error = %err, "failed to print reminder");
        }
    };
    tokio::select! {
        _ = dashboard::watch_reminders(&app.client, &app.session, on_due) => {}
        _ = shutdown_signal() => info!("reminder watch stopped"),
    }
    Ok(())
}

async fn show_letterhead(app: &App, settings: Option<PathBuf>) -> Result<()> {
    let settings = match settings {
        Some(path) => {
            let raw = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            serde_json::from_str(&raw)
                .with_context(|| format!("invalid letterhead settings in {}", path.display()))?
        }
        None => LetterheadConfig::default(),
    };

    let company = match letterhead::load_company(&app.client, &app.session).await {
        Ok(company) => company,
        Err(err) => {
            warn!(error = %err, "company profile unavailable; using placeholders");
            None
        }
    };
    let logo_url = company
        .as_ref()
        .and_then(|company| company.companylogo.as_deref())
        .and_then(|file| app.client.logo_url(file).ok())
        .map(String::from);
    let year = chrono::Local::now().year();
    let letterhead = Letterhead::compose(company.as_ref(), &settings, logo_url, year);
    app.out.emit(&letterhead, output::letterhead)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "failed to install CTRL+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{SignalKind, signal};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                warn!(error = %err, "failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    ctrl_c.await;

    #[cfg(unix)]
    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    };
}
