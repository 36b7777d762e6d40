use std::sync::Arc;

use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use digiling::api::auth::AuthClient;
use digiling::api::{AttendanceHttpClient, AttendanceService, NoopAttendanceService};
use digiling::config::AppConfig;
use digiling::error::AppError;
use digiling::location::{FixedLocationProvider, LocationProvider, NoopLocationProvider};
use digiling::models::{AttendanceMode, AttendanceStatus};
use digiling::services::CheckInFlow;
use digiling::session::{Destination, Session};

#[derive(Parser)]
#[command(name = "digiling", about = "Attendance client for the DIGILING portal")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Exchange credentials for a bearer token
    Login {
        #[arg(long)]
        username: String,
        /// Falls back to DIGILING_PASSWORD
        #[arg(long)]
        password: Option<String>,
    },
    /// Record today's attendance
    CheckIn {
        #[arg(long, value_enum)]
        mode: ModeArg,
        #[arg(long, value_enum)]
        status: StatusArg,
        /// Required for excused/sick
        #[arg(long)]
        reason: Option<String>,
        /// Run the flow without calling the service
        #[arg(long)]
        dry_run: bool,
    },
    /// Show today's recorded status
    Today,
    /// Daily attendance report (counselors and admins)
    Report {
        #[arg(long)]
        date: NaiveDate,
    },
    /// Show the session user and allowed pages
    Whoami {
        /// Fetch the profile from the backend instead of the token claims
        #[arg(long)]
        remote: bool,
    },
    /// Invalidate the bearer token server-side
    Logout,
}

#[derive(Clone, Copy, ValueEnum)]
enum ModeArg {
    OnSite,
    Remote,
}

impl From<ModeArg> for AttendanceMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::OnSite => AttendanceMode::OnSite,
            ModeArg::Remote => AttendanceMode::Remote,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum StatusArg {
    Present,
    Excused,
    Sick,
}

impl From<StatusArg> for AttendanceStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Present => AttendanceStatus::Present,
            StatusArg::Excused => AttendanceStatus::Excused,
            StatusArg::Sick => AttendanceStatus::Sick,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "digiling=debug".to_string()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    match cli.command {
        Command::Login { username, password } => {
            let password = password
                .or_else(|| std::env::var("DIGILING_PASSWORD").ok())
                .ok_or_else(|| {
                    AppError::Config(
                        "no password given (use --password or DIGILING_PASSWORD)".to_string(),
                    )
                })?;

            let auth = AuthClient::new(&config.api_base_url)?;
            let token = auth.login(&username, &password).await?;
            println!("{}", token);
        }
        Command::CheckIn {
            mode,
            status,
            reason,
            dry_run,
        } => {
            let session = Session::from_token(AppConfig::token_from_env()?)?;
            if !session.user.role.can_access(Destination::Attendance) {
                return Err(AppError::Auth(format!(
                    "role {:?} cannot record attendance",
                    session.user.role
                ))
                .into());
            }

            let service: Arc<dyn AttendanceService> = if dry_run {
                Arc::new(NoopAttendanceService)
            } else {
                Arc::new(AttendanceHttpClient::new(
                    &config.api_base_url,
                    &session.token,
                )?)
            };
            let locations: Arc<dyn LocationProvider> = match AppConfig::position_from_env()? {
                Some(coordinate) => Arc::new(FixedLocationProvider::new(coordinate)),
                None => Arc::new(NoopLocationProvider),
            };

            let mut flow = CheckInFlow::new(service, locations, config.campus);
            if let Some(confirmed) = flow.load_today().await? {
                println!("already recorded today: {}", confirmed);
                return Ok(());
            }

            let status = AttendanceStatus::from(status);

            // Excused/sick may proceed without a position; present may not.
            if let Err(err) = flow.select_mode(mode.into()).await {
                if status == AttendanceStatus::Present {
                    return Err(err.into());
                }
            }

            let confirmed = flow.choose_status(status, reason.as_deref()).await?;
            println!("recorded: {}", confirmed);
        }
        Command::Today => {
            let session = Session::from_token(AppConfig::token_from_env()?)?;
            let service = AttendanceHttpClient::new(&config.api_base_url, &session.token)?;

            match service.today().await? {
                Some(record) => match record.mode {
                    Some(mode) => println!("{} ({})", record.status, mode),
                    None => println!("{}", record.status),
                },
                None => println!("no attendance recorded yet today"),
            }
        }
        Command::Report { date } => {
            let session = Session::from_token(AppConfig::token_from_env()?)?;
            if !session.user.role.can_access(Destination::AttendanceReport) {
                return Err(AppError::Auth(format!(
                    "role {:?} cannot view attendance reports",
                    session.user.role
                ))
                .into());
            }

            let service = AttendanceHttpClient::new(&config.api_base_url, &session.token)?;
            let records = service.daily_report(date).await?;

            if records.is_empty() {
                println!("no records for {}", date);
            }
            for record in records {
                println!(
                    "{}  {}",
                    record.student_name.as_deref().unwrap_or("(unknown)"),
                    record.status
                );
            }
        }
        Command::Whoami { remote } => {
            let session = Session::from_token(AppConfig::token_from_env()?)?;
            let user = if remote {
                AuthClient::new(&config.api_base_url)?
                    .me(&session.token)
                    .await?
            } else {
                session.user
            };

            println!("{} <{}> ({:?})", user.name, user.email, user.role);
            for destination in user.role.allowed_destinations() {
                println!("  {}", destination.path());
            }
        }
        Command::Logout => {
            let session = Session::from_token(AppConfig::token_from_env()?)?;
            AuthClient::new(&config.api_base_url)?
                .logout(&session.token)
                .await?;
            println!("logged out");
        }
    }

    Ok(())
}
