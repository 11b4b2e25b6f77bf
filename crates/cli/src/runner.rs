// runner.rs
use anyhow::{anyhow, Context, Result};
use std::time::{Duration, Instant};
use tio_client::{ClientConfig, TenableIoClient};
use tio_common::FoldersApi;
use tio_helpers::{ScanHelper, SessionHelper, TemplateQuery, TemplateResolver};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::args::{Cli, Commands, FolderCommand, ScanCommand, SessionCommand, TemplateCommand};
use crate::output::{print_folders, print_scans, print_stop_report, print_template};

pub async fn run(cli: Cli) -> Result<()> {
    let client = build_client(&cli)?;
    let format = cli.output_format.as_str();

    match cli.command {
        Commands::Session { command: SessionCommand::Validate } => {
            SessionHelper::new(&client)
                .validate()
                .await
                .context("Session validation failed")?;
            info!("Session is active and authorized");
        }
        Commands::Templates { command: TemplateCommand::Get { name, title } } => {
            let query = match (name.as_deref(), title.as_deref()) {
                (Some(name), _) => TemplateQuery::Name(name),
                (None, Some(title)) => TemplateQuery::Title(title),
                (None, None) => return Err(anyhow!("Pass --name or --title")),
            };
            let template = TemplateResolver::new(&client)
                .resolve(query)
                .await
                .context("Failed to fetch scan templates")?;
            match template {
                Some(template) => print_template(&template, format)?,
                None => return Err(anyhow!("No scan template matches {}", query_label(&query))),
            }
        }
        Commands::Scans { command } => run_scans(&client, command, format).await?,
        Commands::Folders { command: FolderCommand::List } => {
            let folders = client.list_folders().await.context("Failed to list folders")?;
            print_folders(&folders, format)?;
        }
    }

    Ok(())
}

async fn run_scans(client: &TenableIoClient, command: ScanCommand, format: &str) -> Result<()> {
    match command {
        ScanCommand::List { folder, name, regex } => {
            let scans = ScanHelper::new(client)
                .scan_records(folder, name.as_deref(), regex.as_deref())
                .await
                .context("Failed to list scans")?;
            print_scans(&scans, format)?;
        }
        ScanCommand::Create { name, targets, template, launch, wait, poll_ms } => {
            let helper = ScanHelper::new(client).with_poll_interval(Duration::from_millis(poll_ms));
            let scan = helper
                .create_scan(&name, &targets, &template)
                .await
                .with_context(|| format!("Failed to create scan '{}'", name))?;
            info!("Created scan {} ({})", scan.id(), name);

            if launch {
                let uuid = scan.launch(None).await.context("Failed to launch scan")?;
                info!("Launched scan {} (run {})", scan.id(), uuid);
            }
            if wait {
                let status = scan.wait_until_stopped().await?;
                info!("Scan {} settled as {}", scan.id(), status);
            }
            println!("{}", scan.id());
        }
        ScanCommand::StopAll { folder, poll_ms, timeout_secs, concurrent } => {
            let cancel = CancellationToken::new();
            spawn_interrupt_handler(cancel.clone());

            let helper = ScanHelper::new(client)
                .with_poll_interval(Duration::from_millis(poll_ms))
                .with_wait_timeout(timeout_secs.map(Duration::from_secs))
                .with_cancellation(cancel);

            info!("Stopping scans{}", folder.map(|id| format!(" in folder {}", id)).unwrap_or_default());
            let start = Instant::now();
            let scans = helper.scans(folder).await.context("Failed to list scans")?;
            let report = if concurrent {
                helper.stop_all_concurrently(&scans).await
            } else {
                helper.stop_scans(&scans).await
            }
            .context("Stop-all did not complete")?;

            print_stop_report(&report, format, start.elapsed())?;
        }
    }
    Ok(())
}

fn build_client(cli: &Cli) -> Result<TenableIoClient> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_toml_file(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => ClientConfig::from_env().context("Failed to load config from environment")?,
    };
    if let Some(endpoint) = &cli.endpoint {
        config = config.with_endpoint(endpoint.as_str());
    }
    config.validate()?;
    TenableIoClient::new(config).context("Failed to build API client")
}

fn spawn_interrupt_handler(cancel: CancellationToken) {
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, abandoning remaining waits");
            cancel.cancel();
        }
    });
}

fn query_label(query: &TemplateQuery<'_>) -> String {
    match query {
        TemplateQuery::Name(name) => format!("name '{}'", name),
        TemplateQuery::Title(title) => format!("title '{}'", title),
    }
}
