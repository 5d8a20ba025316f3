use std::path::Path;
use std::sync::Arc;

use anyhow::Context;
use colored::Colorize;
use relay_backend::Backend;
use relay_linera::{resolve_app_endpoint, LineraClient, RemoteLedger};
use relay_schema::{validate_event, validate_status_update};
use relay_server::RelayServer;
use relay_types::resolve_limit;

use crate::cli::*;
use crate::config::RelayerConfig;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config_path = cli.config.as_deref();
    match cli.command {
        Command::Serve(args) => cmd_serve(load(config_path)?, args).await,
        Command::Validate(args) => cmd_validate(args),
        Command::Endpoint => cmd_endpoint(&load(config_path)?),
        Command::Events(args) => cmd_events(&load(config_path)?, args).await,
    }
}

fn load(path: Option<&Path>) -> anyhow::Result<RelayerConfig> {
    RelayerConfig::load(path)
}

async fn cmd_serve(mut config: RelayerConfig, args: ServeArgs) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind;
    }
    let backend = Arc::new(Backend::from_linera_config(
        config.backend_config(),
        &config.linera,
    ));
    tracing::info!(
        bind = %config.server.bind_addr,
        retention = config.backend.retention,
        mirror = ?config.backend.mirror,
        linera = resolve_app_endpoint(&config.linera).as_deref().unwrap_or("disabled"),
        "starting relayer"
    );
    RelayServer::new(config.server, backend).serve().await?;
    Ok(())
}

fn cmd_validate(args: ValidateArgs) -> anyhow::Result<()> {
    let raw = std::fs::read_to_string(&args.file)
        .with_context(|| format!("reading {}", args.file.display()))?;
    let payload: serde_json::Value = match serde_json::from_str(&raw) {
        Ok(payload) => payload,
        Err(err) => {
            println!("{} invalid_json: {err}", "✗".red().bold());
            anyhow::bail!("{} is not valid JSON", args.file.display());
        }
    };

    let (kind, result) = if args.status {
        ("status update", validate_status_update(&payload))
    } else {
        ("event", validate_event(&payload))
    };

    match result {
        Ok(()) => {
            println!("{} valid {kind}", "✓".green().bold());
            Ok(())
        }
        Err(errors) => {
            println!("{} {} violation(s):", "✗".red().bold(), errors.len());
            for error in errors.errors() {
                println!("  {}", error.yellow());
            }
            anyhow::bail!("validation_failed")
        }
    }
}

fn cmd_endpoint(config: &RelayerConfig) -> anyhow::Result<()> {
    match resolve_app_endpoint(&config.linera) {
        Some(endpoint) => println!("{}", endpoint.cyan()),
        None => println!("{}", "not configured".dimmed()),
    }
    Ok(())
}

async fn cmd_events(config: &RelayerConfig, args: EventsArgs) -> anyhow::Result<()> {
    let client = LineraClient::new(&config.linera);
    let page = client
        .get_events(&args.actor, resolve_limit(args.limit), args.cursor.as_deref())
        .await
        .map_err(|err| anyhow::anyhow!("{}: {err}", err.code()))?;
    println!("{}", serde_json::to_string_pretty(&page)?);
    Ok(())
}
