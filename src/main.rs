mod cli;
mod commands;

use backup_console::auth::SessionService;
use backup_console::config;
use backup_console::errors::Result;
use backup_console::gateway::Rest;
use cli::Commands;
use dotenvy::dotenv;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    // 1. Initialize tracing (as early as possible)
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    // 2. Load .env file; env vars can also be set externally
    dotenv().ok();

    let args = cli::parse_cli();

    // 3. Resolve configuration and build the gateway once; everything
    // downstream receives this handle
    let app_config = config::load_app_configuration()
        .inspect_err(|e| error!("Critical error loading application configuration: {e}"))?;
    let rest = Rest::new(&app_config)
        .inspect_err(|e| error!("Failed to initialize backend gateway: {e}"))?;
    info!("Backend gateway initialized for {}", app_config.backend_url);

    let mut session = SessionService::new(rest.clone(), app_config.session_file.clone());

    match args.command {
        Commands::Login { email } => commands::auth::login(&mut session, &email).await?,
        Commands::Logout => commands::auth::logout(&mut session).await,
        command => {
            // Route guard for everything behind the authenticated shell
            if !session.can_activate().await {
                eprintln!("Sessão não autenticada. Use `backup-console login <email>`.");
                return Ok(());
            }
            match command {
                Commands::Clientes { action } => commands::clientes::run(rest, action).await?,
                Commands::Servidores { action } => commands::servidores::run(rest, action).await?,
                Commands::Agendamentos { action } => {
                    commands::agendamentos::run(rest, action).await?;
                }
                Commands::Playbook { action } => commands::playbook::run(rest, action).await?,
                Commands::Exec { action } => commands::execucao::run(rest, action).await?,
                Commands::Logs(logs_args) => commands::logs::run(rest, logs_args).await?,
                Commands::Login { .. } | Commands::Logout => unreachable!(),
            }
        }
    }

    Ok(())
}
