//! TaskAgile registration command-line front end.
//!
//! Drives the registration page controller against a TaskAgile backend.
//!
//! # Commands
//!
//! - `taskagile-register register`: Validate and submit a new account
//! - `taskagile-register check`: Validate the fields without submitting
//!
//! # Environment Variables
//!
//! See the [`config`] module for available configuration options.

use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use taskagile_register::client::HttpRegistrationClient;
use taskagile_register::config::Config;
use taskagile_register::controller::RegisterPage;
use taskagile_register::form::{Field, RegistrationForm};
use taskagile_register::router::{Destination, TracingRouter};
use taskagile_register::validation::{validate, ValidationResult};

/// TaskAgile registration - create an account from the command line.
#[derive(Parser, Debug)]
#[command(name = "taskagile-register")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "\
ENVIRONMENT VARIABLES:
    TASKAGILE_API_URL               Backend origin (default: http://localhost:8080)
    TASKAGILE_REQUEST_TIMEOUT_SECS  Request timeout in seconds (default: 30)

EXAMPLES:
    # Check the fields without contacting the server
    taskagile-register check -u sunny -e sunny@taskagile.com -p 'JestRocks!'

    # Create the account
    export TASKAGILE_API_URL=https://taskagile.example
    taskagile-register register -u sunny -e sunny@taskagile.com -p 'JestRocks!'
")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

/// CLI subcommands.
#[derive(Subcommand, Debug)]
enum Command {
    /// Validate the fields and submit them to the registration service.
    Register(FormArgs),

    /// Validate the fields only.
    Check(FormArgs),
}

/// Values for the three form fields.
#[derive(Args, Debug)]
struct FormArgs {
    /// Username (2-50 letters and digits).
    #[arg(short, long)]
    username: String,

    /// Email address.
    #[arg(short, long)]
    email_address: String,

    /// Password (6-30 characters).
    #[arg(short, long)]
    password: String,
}

impl From<FormArgs> for RegistrationForm {
    fn from(args: FormArgs) -> Self {
        RegistrationForm::new(args.username, args.email_address, args.password)
    }
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Command::Check(args) => Ok(run_check(args.into())),
        Command::Register(args) => {
            let runtime = tokio::runtime::Builder::new_multi_thread()
                .enable_all()
                .build()
                .context("Failed to create tokio runtime")?;

            runtime.block_on(run_register(args.into()))
        }
    }
}

/// Runs the check command.
fn run_check(form: RegistrationForm) -> ExitCode {
    let result = validate(&form);
    if result.is_valid() {
        println!("All fields are valid.");
        ExitCode::SUCCESS
    } else {
        print_violations(&result);
        ExitCode::FAILURE
    }
}

/// Runs the register command.
async fn run_register(form: RegistrationForm) -> Result<ExitCode> {
    init_logging();

    let config = Config::from_env().context("Failed to load configuration")?;
    info!(api_url = %config.api_url, "Configuration loaded");

    let client =
        HttpRegistrationClient::from_config(&config).context("Failed to create HTTP client")?;
    let router = TracingRouter::new();
    let mut page = RegisterPage::new(client, &router);

    for field in Field::ALL {
        page.update_field(field, form.get(field));
    }

    let result = page.validate();
    if !result.is_valid() {
        print_violations(&result);
        return Ok(ExitCode::FAILURE);
    }

    page.submit_form().await;

    if page.is_failed() {
        eprintln!("{}", page.error_message().unwrap_or("Failed to register user."));
        return Ok(ExitCode::FAILURE);
    }

    match router.last_destination() {
        Some(destination) if destination == Destination::login_page() => {
            println!("Account created for {}. Continue at {destination}.", form.username);
            Ok(ExitCode::SUCCESS)
        }
        _ => Ok(ExitCode::FAILURE),
    }
}

fn print_violations(result: &ValidationResult) {
    eprintln!("The form has {} problem(s):", result.len());
    for violation in result.violations() {
        eprintln!("  - {violation}");
    }
}

/// Initializes the logging subsystem.
fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_level(true)
        .with_writer(std::io::stderr)
        .init();
}
