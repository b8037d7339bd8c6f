use cachorro::cli::{Cli, Commands};
use cachorro::types::config::Config;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration first (no logging yet)
    let config = Config::load_or_default(&cli.config);

    // Determine log level: CLI flags take precedence over config
    let log_level = if cli.quiet {
        "error".to_string()
    } else if cli.verbose {
        "debug".to_string()
    } else {
        config.general.log_level.clone()
    };

    let filter = EnvFilter::from_default_env().add_directive(
        format!("cachorro={}", log_level)
            .parse()
            .unwrap_or_else(|_| "cachorro=info".parse().expect("fallback directive is valid")),
    );

    let registry = tracing_subscriber::registry().with(filter);
    if config.general.log_format == "json" {
        registry
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(fmt::layer().with_writer(std::io::stderr))
            .init();
    }

    tracing::debug!("Configuration loaded from: {}", cli.config.display());

    match cli.command {
        Commands::Init { path } => {
            cachorro::cli::commands::init(path)?;
        }
        Commands::Path { function, program } => {
            cachorro::cli::commands::path(&function, program.as_deref(), &config)?;
        }
        Commands::List { program } => {
            cachorro::cli::commands::list(program.as_deref(), &config)?;
        }
        Commands::Clear { functions, program } => {
            cachorro::cli::commands::clear(&functions, program.as_deref(), &config)?;
        }
        Commands::Purge { program } => {
            cachorro::cli::commands::purge(program.as_deref(), &config)?;
        }
        Commands::Version => {
            cachorro::cli::commands::version();
        }
    }

    Ok(())
}
