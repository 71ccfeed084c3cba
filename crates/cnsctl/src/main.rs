use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::{generate, shells};
use cns_core::Settings;
use tracing::{debug, error, info, trace, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod commands;
mod error;

use cli::{Cli, Commands};
use error::CnsCtlError;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing based on verbosity level
    init_tracing(cli.verbose);

    // Completions never read settings, so a broken .env cannot block them
    if let Commands::Completions { shell } = &cli.command {
        debug!("Generating completions for {:?}", shell);
        generate_completions(*shell);
        return Ok(());
    }

    let result = match Settings::load() {
        Ok(settings) => {
            let settings = settings.apply(&cli.overrides());
            debug!("Resolved settings: {:?}", settings);
            execute_command(&cli, &settings).await
        }
        Err(e) => Err(e.into()),
    };

    if let Err(e) = result {
        report_error(&cli.command, &e);
        std::process::exit(1);
    }

    Ok(())
}

fn init_tracing(verbose: u8) {
    // Check for RUST_LOG env var first, then fall back to verbosity flag
    let filter = if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::EnvFilter::from_default_env()
    } else {
        let level = match verbose {
            0 => "cnsctl=warn,cns_core=warn",
            1 => "cnsctl=info,cns_core=info",
            2 => "cnsctl=debug,cns_core=debug",
            _ => "cnsctl=trace,cns_core=trace",
        };
        tracing_subscriber::EnvFilter::new(level)
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(true)
                .with_thread_ids(false)
                .with_thread_names(false)
                .compact(),
        )
        .init();

    debug!("Tracing initialized with verbosity level: {}", verbose);
}

async fn execute_command(cli: &Cli, settings: &Settings) -> Result<(), CnsCtlError> {
    trace!("Executing command: {:?}", cli.command);
    info!("Command: {}", format_command(&cli.command));

    let start = std::time::Instant::now();
    let result = match &cli.command {
        Commands::Conns { filter } => {
            commands::conns::handle_conns(settings, filter.as_deref()).await
        }
        Commands::Watch => commands::watch::handle_watch(settings).await,
        Commands::Post { path, data } => {
            let path = path.as_deref().unwrap_or_default();
            let response = commands::post::handle_post(settings, path, data.as_deref()).await?;
            println!("{}", serde_json::to_string_pretty(&response)?);
            Ok(())
        }
        Commands::Profile { profile } => {
            commands::profile::handle_profile(settings, profile.as_deref()).await
        }
        Commands::Publish { data } => {
            commands::publish::handle_publish(settings, data.as_deref()).await
        }
        Commands::Subscribe => commands::subscribe::handle_subscribe(settings).await,
        // Answered in main before settings are loaded
        Commands::Completions { .. } => Ok(()),
    };

    let duration = start.elapsed();
    match &result {
        Ok(_) => info!("Command completed successfully in {:?}", duration),
        Err(e) if e.is_bad_request() => warn!("Request failed after {:?}: {}", duration, e),
        Err(e) => error!("Command failed after {:?}: {}", duration, e),
    }

    result
}

/// Print a failure the way the command reports errors
fn report_error(command: &Commands, err: &CnsCtlError) {
    match command {
        Commands::Post { .. } => {
            let document = commands::post::error_document(err);
            match serde_json::to_string_pretty(&document) {
                Ok(text) => println!("{}", text),
                Err(_) => eprintln!("{}", err.display_line()),
            }
        }
        _ => eprintln!("{}", err.display_line()),
    }
}

/// Generate shell completions
fn generate_completions(shell: cli::Shell) {
    let mut cmd = cli::Cli::command();
    let name = cmd.get_name().to_string();

    match shell {
        cli::Shell::Bash => generate(shells::Bash, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Zsh => generate(shells::Zsh, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::Fish => generate(shells::Fish, &mut cmd, name, &mut std::io::stdout()),
        cli::Shell::PowerShell => {
            generate(shells::PowerShell, &mut cmd, name, &mut std::io::stdout())
        }
        cli::Shell::Elvish => generate(shells::Elvish, &mut cmd, name, &mut std::io::stdout()),
    }
}

/// Format command for human-readable logging (without message bodies)
fn format_command(command: &Commands) -> String {
    match command {
        Commands::Conns { filter } => match filter {
            Some(filter) => format!("conns {}", filter),
            None => "conns".to_string(),
        },
        Commands::Watch => "watch".to_string(),
        Commands::Post { path, data } => format!(
            "post '{}' {}",
            path.as_deref().unwrap_or_default(),
            if data.is_some() { "with data" } else { "no data" }
        ),
        Commands::Profile { profile } => format!("profile {}", profile.as_deref().unwrap_or("")),
        Commands::Publish { data } => format!(
            "publish {}",
            if data.is_some() { "with data" } else { "no data" }
        ),
        Commands::Subscribe => "subscribe".to_string(),
        Commands::Completions { shell } => format!("completions {:?}", shell),
    }
}
