//! Bounty Board CLI
//!
//! Terminal dashboard for the bounty platform.

mod commands;
mod style;

use std::sync::Arc;
use std::time::Duration;

use bounty_board::{ApiClient, Config, FileTokenStore};
use clap::{Parser, Subcommand};
use style::*;

const BANNER: &str = r#"
  ██████╗  ██████╗ ██╗   ██╗███╗   ██╗████████╗██╗   ██╗
  ██╔══██╗██╔═══██╗██║   ██║████╗  ██║╚══██╔══╝╚██╗ ██╔╝
  ██████╔╝██║   ██║██║   ██║██╔██╗ ██║   ██║    ╚████╔╝
  ██╔══██╗██║   ██║██║   ██║██║╚██╗██║   ██║     ╚██╔╝
  ██████╔╝╚██████╔╝╚██████╔╝██║ ╚████║   ██║      ██║
  ╚═════╝  ╚═════╝  ╚═════╝ ╚═╝  ╚═══╝   ╚═╝      ╚═╝
"#;

const VERSION: &str = env!("CARGO_PKG_VERSION");

#[derive(Parser)]
#[command(name = "bounty")]
#[command(version)]
#[command(about = "Bounty Board - dashboard for hackers and startups", long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Platform API base URL
    #[arg(short, long, env = "BOUNTY_API_URL", global = true)]
    api: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive signin - store a session token (default)
    #[command(visible_aliases = ["login", "si"])]
    Signin,

    /// Drop the stored session token
    #[command(visible_alias = "logout")]
    Signout,

    /// Request a password-reset email
    ForgotPassword {
        /// Account email address
        email: String,
    },

    /// Complete a password reset with the emailed token
    ResetPassword {
        /// Reset token from the email
        token: String,
    },

    /// Confirm an email address with a verification token
    VerifyEmail {
        /// Verification token from the email
        token: String,
    },

    /// Bounty programs
    #[command(visible_alias = "p")]
    Programs {
        #[command(subcommand)]
        action: commands::programs::ProgramAction,
    },

    /// Vulnerability reports
    #[command(visible_alias = "r")]
    Reports {
        #[command(subcommand)]
        action: commands::reports::ReportAction,
    },

    /// Monetary rewards
    #[command(visible_alias = "rw")]
    Rewards {
        #[command(subcommand)]
        action: commands::rewards::RewardAction,
    },

    /// Vulnerability test submissions
    #[command(visible_alias = "t")]
    Testing {
        #[command(subcommand)]
        action: commands::testing::TestingAction,
    },

    /// Startup and hacker profiles
    Profile {
        #[command(subcommand)]
        action: commands::profile::ProfileAction,
    },

    /// Show effective configuration
    Config,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if cli.verbose {
        tracing_subscriber::fmt().with_env_filter("info").init();
    }

    let config = Config::load().unwrap_or_default();
    let base_url = cli.api.clone().unwrap_or_else(|| config.api_url());
    let tokens = Arc::new(FileTokenStore::new(config.token_path()));
    let api = ApiClient::with_timeout(
        &base_url,
        tokens,
        Duration::from_secs(config.api.timeout_secs),
    );

    // Default to the signin wizard if no command specified
    let command = cli.command.unwrap_or(Commands::Signin);

    let result = match command {
        Commands::Signin => {
            print_banner();
            commands::auth::signin(&api).await
        }
        Commands::Signout => commands::auth::signout(&api),
        Commands::ForgotPassword { email } => commands::auth::forgot_password(&api, &email).await,
        Commands::ResetPassword { token } => commands::auth::reset_password(&api, &token).await,
        Commands::VerifyEmail { token } => commands::auth::verify_email(&api, &token).await,
        Commands::Programs { action } => commands::programs::run(&api, action).await,
        Commands::Reports { action } => commands::reports::run(&api, action).await,
        Commands::Rewards { action } => commands::rewards::run(&api, action).await,
        Commands::Testing { action } => commands::testing::run(&api, action).await,
        Commands::Profile { action } => commands::profile::run(&api, action).await,
        Commands::Config => commands::config::run(&config, &base_url),
    };

    if let Err(e) = result {
        print_error(&format!("{}", e));
        std::process::exit(1);
    }
}

pub fn print_banner() {
    println!("{}", style_cyan(BANNER));
    println!(
        "  {} {}",
        style_dim("Bounty Board"),
        style_dim(&format!("v{}", VERSION))
    );
    println!();
}
