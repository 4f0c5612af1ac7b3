//! congress - command-line client for the congress events backend
//!
//! Usage:
//!   congress login [email]            - Start a session
//!   congress events list              - Browse current and upcoming events
//!   congress events create ...        - Create an event (needs events.create)
//!   congress access check <resource>  - Check a resource permission
//!   congress resources assign <k> <id> - Gate a resource behind a permission

use anyhow::Context;
use app::AppCore;
use clap::{Parser, Subcommand};
use cli::commands::{
    auth, AccessCommand, EventsCommand, InscriptionsCommand, LoginCommand,
    NotificationsCommand, PermissionsCommand, RegisterCommand, ResetPasswordCommand,
    ResourcesCommand, RolesCommand,
};
use cli::Output;
use console::style;
use shared::{ClientConfig, TracingLogger};
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "congress")]
#[command(about = "Congress events client: sessions, events and resource permissions")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// YAML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Backend base URL
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Local storage file
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in and keep the session locally
    Login(LoginCommand),
    /// End the session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Create an account
    Register(RegisterCommand),
    /// Set a new password
    ResetPassword(ResetPasswordCommand),
    /// Browse and manage events
    Events(EventsCommand),
    /// Inspect resource and route access
    Access(AccessCommand),
    /// Map resources to permissions
    Resources(ResourcesCommand),
    /// Role administration
    Roles(RolesCommand),
    /// Permission administration
    Permissions(PermissionsCommand),
    /// Local and server notifications
    Notifications(NotificationsCommand),
    /// Participant inscriptions
    Inscriptions(InscriptionsCommand),
}

impl Cli {
    fn client_config(&self) -> anyhow::Result<ClientConfig> {
        let config = match &self.config {
            Some(path) => ClientConfig::from_file(path)
                .with_context(|| format!("failed to load {}", path.display()))?,
            None => ClientConfig::default(),
        };
        let mut config = config.with_env();

        if let Some(url) = &self.api_url {
            config = config.with_base_url(url.clone());
        }
        if let Some(path) = &self.storage {
            config.storage_path = Some(path.clone());
        }
        Ok(config)
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let out = Output::new(cli.json);
    let core = AppCore::open(cli.client_config()?, Arc::new(TracingLogger))?;

    if core.session().is_authenticated() {
        core.session().touch()?;
    }

    match &cli.command {
        Commands::Login(cmd) => cmd.run(&core, &out).await,
        Commands::Logout => auth::logout(&core, &out).await,
        Commands::Whoami => auth::whoami(&core, &out),
        Commands::Register(cmd) => cmd.run(&core, &out).await,
        Commands::ResetPassword(cmd) => cmd.run(&core, &out).await,
        Commands::Events(cmd) => cmd.run(&core, &out).await,
        Commands::Access(cmd) => cmd.run(&core, &out).await,
        Commands::Resources(cmd) => cmd.run(&core, &out).await,
        Commands::Roles(cmd) => cmd.run(&core, &out).await,
        Commands::Permissions(cmd) => cmd.run(&core, &out).await,
        Commands::Notifications(cmd) => cmd.run(&core, &out).await,
        Commands::Inscriptions(cmd) => cmd.run(&core, &out).await,
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("{} {:#}", style("✗").red().bold(), e);
        std::process::exit(1);
    }
}
