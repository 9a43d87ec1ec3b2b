use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod client;
mod config;
mod error;
mod form;
mod models;
mod normalize;
mod report;
mod results;
mod session;
mod ui;

use crate::client::HttpRecommendationClient;
use crate::config::Config;
use crate::form::{GradeEntry, ProfileForm};
use crate::models::StudyField;
use crate::results::{LoggingFeedback, ResultsView};
use crate::session::{Screen, Session};

#[derive(Parser)]
#[command(name = "study-program-recommender")]
#[command(about = "Match a student profile against the program scoring service", long_about = None)]
struct Cli {
    /// Scoring service base URL (overrides RECOMMENDER_API_BASE)
    #[arg(long, global = true)]
    api_base: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a profile and browse the matching programs
    Recommend {
        #[command(flatten)]
        profile: ProfileArgs,
        /// Print the results and exit without the accept/open prompt
        #[arg(long)]
        no_interactive: bool,
    },
    /// Submit a profile and write the matches as a markdown report
    Report {
        #[command(flatten)]
        profile: ProfileArgs,
        #[arg(long, default_value = "recommendations.md")]
        out: PathBuf,
    },
    /// Check that the scoring service is up and has programs loaded
    Status,
}

#[derive(Args)]
struct ProfileArgs {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    email: Option<String>,
    #[arg(long, value_enum)]
    field: Option<StudyField>,
    /// Interest tag; repeat for several
    #[arg(long = "interest")]
    interests: Vec<String>,
    /// Grade as subject=value (0-100); an empty value clears the subject
    #[arg(long = "grade")]
    grades: Vec<String>,
    /// CSV with subject,grade columns, applied before --grade flags
    #[arg(long)]
    grades_csv: Option<PathBuf>,
}

impl ProfileArgs {
    fn into_form(self) -> anyhow::Result<ProfileForm> {
        let mut form = ProfileForm::new();
        form.name = self.name.unwrap_or_default().trim().to_string();
        form.email = self.email.unwrap_or_default().trim().to_string();
        form.field = self.field;

        for interest in &self.interests {
            let interest = interest.trim();
            if interest.is_empty() || form.interests().iter().any(|i| i == interest) {
                continue;
            }
            if !form::AVAILABLE_INTERESTS.contains(&interest) {
                warn!("Interest {interest:?} is not one the service knows; sending anyway");
            }
            form.toggle_interest(interest);
        }

        if let Some(path) = &self.grades_csv {
            let stored = form::import_grades_csv(&mut form, path)?;
            info!("Loaded {stored} grades from {}", path.display());
        }

        for arg in &self.grades {
            let (subject, value) = form::parse_grade_arg(arg);
            if !form::SUBJECTS.contains(&subject) {
                warn!("Grade subject {subject:?} is not a form subject; keeping it");
            }
            if form.set_grade(subject, value) == GradeEntry::Rejected {
                warn!("Ignoring grade {arg:?}: expected a number from 0 to 100");
            }
        }

        Ok(form)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = Config::from_env().with_api_base(cli.api_base);

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={}",
                env!("CARGO_PKG_NAME").replace('-', "_"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let client = HttpRecommendationClient::new(&config.api_base)
        .context("failed to build HTTP client")?;
    info!("Using scoring service at {}", client.base_url());

    match cli.command {
        Commands::Recommend {
            profile,
            no_interactive,
        } => {
            let form = profile.into_form()?;
            let mut session = Session::new();
            ui::print_header();

            if let Err(err) = session.submit_form(&client, &form).await {
                ui::print_alert(&err.to_string());
                return Ok(ExitCode::from(2));
            }
            if session.screen() != Screen::Results {
                ui::print_error_banner(session.error().unwrap_or(error::REQUEST_FAILED_BANNER));
                return Ok(ExitCode::FAILURE);
            }

            let feedback = LoggingFeedback;
            let mut view = ResultsView::new(session.recommendations(), &feedback);
            ui::print_results(&view);
            if !no_interactive {
                ui::run_results_prompt(&mut view)?;
            }
        }
        Commands::Report { profile, out } => {
            let form = profile.into_form()?;
            let profile = match form.finish() {
                Ok(profile) => profile,
                Err(err) => {
                    ui::print_alert(&err.to_string());
                    return Ok(ExitCode::from(2));
                }
            };

            let mut session = Session::new();
            session.submit(&client, &profile).await;
            if let Some(message) = session.error() {
                ui::print_error_banner(message);
                return Ok(ExitCode::FAILURE);
            }

            let report =
                report::build_report(&profile, session.recommendations(), chrono::Utc::now());
            std::fs::write(&out, report)
                .with_context(|| format!("failed to write {}", out.display()))?;
            println!("Report written to {}.", out.display());
        }
        Commands::Status => match client.status().await {
            Ok(status) => ui::print_status(client.base_url(), &status),
            Err(err) => {
                warn!("status check failed: {err}");
                ui::print_error_banner(error::REQUEST_FAILED_BANNER);
                return Ok(ExitCode::FAILURE);
            }
        },
    }

    Ok(ExitCode::SUCCESS)
}
