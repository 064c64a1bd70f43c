//! `formcol` - CLI for formcollector
//!
//! This binary starts the contact preference web server and offers a few
//! configuration helpers.

#![warn(missing_debug_implementations)]
#![deny(unsafe_code)]

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;

use formcollector::cli::{Cli, Command, ConfigCommand, ServeCommand};
use formcollector::{init_logging, serve, AppState, Config};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    init_logging(cli.verbosity());

    match cli.command {
        Command::Serve(serve_cmd) => handle_serve(cli.config, &serve_cmd),
        Command::Config(config_cmd) => handle_config(cli.config, config_cmd),
    }
}

fn handle_serve(config_path: Option<PathBuf>, cmd: &ServeCommand) -> anyhow::Result<()> {
    let mut config = Config::load_from(config_path).context("loading configuration")?;
    cmd.apply(&mut config);
    config.validate().context("checking command-line overrides")?;

    let state = AppState::from_config(&config).context("loading templates")?;

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("starting async runtime")?;
    runtime
        .block_on(serve(&config, state))
        .context("running HTTP server")
}

fn handle_config(config_path: Option<PathBuf>, cmd: ConfigCommand) -> anyhow::Result<()> {
    match cmd {
        ConfigCommand::Show { json } => {
            let config = Config::load_from(config_path).context("loading configuration")?;
            if json {
                println!("{}", serde_json::to_string_pretty(&config)?);
            } else {
                println!("Current Configuration");
                println!("=====================");
                println!();
                println!("[Server]");
                println!("  Host:               {}", config.server.host);
                println!("  Port:               {}", config.server.port);
                println!();
                println!("[Views]");
                match &config.views.template_dir {
                    Some(dir) => println!("  Template dir:       {}", dir.display()),
                    None => println!("  Template dir:       (built-in)"),
                }
                println!();
                println!("[Static files]");
                println!(
                    "  Public dir:         {}",
                    config.static_files.public_dir.display()
                );
                println!(
                    "  GOV.UK Frontend:    {}",
                    config.static_files.govuk_frontend_dir.display()
                );
                println!();
                println!("[Admin]");
                println!("  Listing enabled:    {}", config.admin.listing_enabled);
            }
        }
        ConfigCommand::Path => {
            let path = config_path.unwrap_or_else(Config::default_config_path);
            println!("{}", path.display());
        }
        ConfigCommand::Validate { file } => {
            let path = file
                .or(config_path)
                .unwrap_or_else(Config::default_config_path);
            println!("Validating configuration: {}", path.display());
            Config::load_from(Some(path)).context("configuration is invalid")?;
            println!("Configuration is valid.");
        }
    }
    Ok(())
}
