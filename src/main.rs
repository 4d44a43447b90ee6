mod cli;

use anyhow::Result;
use clap::Parser;

use cli::{Cli, Commands};
use moviweb_core::config::Config;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG if set, otherwise pick defaults based on the verbose
    // flag.
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "moviweb=trace,moviweb_db=debug,moviweb_core=debug,tower_http=debug".to_string()
        } else {
            "moviweb=debug,moviweb_db=info,tower_http=info".to_string()
        }
    });

    tracing_subscriber::fmt().with_env_filter(&env_filter).init();

    match cli.command {
        Commands::Serve { host, port } => {
            let mut config = Config::load_or_default(cli.config.as_deref());
            config.apply_env();

            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }

            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(moviweb::start(config))?;
            Ok(())
        }
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            let mut config = Config::load_or_default(path.as_deref());
            config.apply_env();

            println!("Server: {}:{}", config.server.host, config.server.port);
            println!("Database: {}", config.server.db_path.display());
            println!(
                "Metadata API key: {}",
                if config.metadata.api_key.is_some() {
                    "set"
                } else {
                    "missing"
                }
            );

            let warnings = config.validate();
            if warnings.is_empty() {
                println!("Configuration is valid");
            } else {
                for warning in &warnings {
                    println!("warning: {warning}");
                }
            }
            Ok(())
        }
        Commands::Version => {
            println!("moviweb {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
