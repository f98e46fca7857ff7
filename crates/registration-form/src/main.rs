//! Registration form host - Entry point.

use anyhow::Context;
use cep_client::CepClient;
use registration_core::FieldRegistry;
use registration_form::{parse_command, AppResult, Command, Config, JsonLinesSink, Session};
use registration_store::Store;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::signal;
use tokio_stream::wrappers::LinesStream;
use tokio_stream::StreamExt;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> AppResult<()> {
    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.log.level);

    info!("Starting registration form host...");

    let lookup = CepClient::new(&config.cep.base_url, config.cep.timeout)?;
    info!("CEP lookup endpoint: {}", lookup.base_url());

    // Health check
    if lookup.health_check().await {
        info!("CEP service healthy");
    } else {
        warn!("CEP service health check failed - lookups will report errors");
    }

    let store = if config.store.persist {
        Store::open(&config.store.path).await?
    } else {
        info!("Persistence disabled, using in-memory storage");
        Store::memory()
    };

    let tracks = config.form.track_list();
    if tracks.is_empty() {
        warn!("No tracks configured - submissions can never be accepted");
    }

    let registry = FieldRegistry::standard(tracks);
    let mut session = Session::new(registry, config.form.login_url.clone(), store, lookup);
    let mut sink = JsonLinesSink::new(std::io::stdout());

    session.start(&mut sink).await?;
    info!("Listening for events on stdin...");

    let mut lines = LinesStream::new(BufReader::new(tokio::io::stdin()).lines());

    loop {
        tokio::select! {
            line = lines.next() => {
                let line = match line {
                    Some(Ok(line)) => line,
                    Some(Err(e)) => {
                        error!("Failed to read input: {}", e);
                        break;
                    }
                    None => {
                        info!("Input closed");
                        break;
                    }
                };

                if line.trim().is_empty() {
                    continue;
                }

                let result = match parse_command(&line) {
                    Ok(Command::Form(event)) => session.dispatch(event, &mut sink).await,
                    Ok(Command::ToggleDarkMode) => {
                        session.toggle_dark_mode(&mut sink).await.map(|_| ())
                    }
                    Err(e) => {
                        warn!("Skipping malformed event: {}", e);
                        continue;
                    }
                };

                if let Err(e) = result {
                    error!("Event handling error: {}", e);
                }
            }
            _ = signal::ctrl_c() => {
                info!("Shutdown signal received");
                break;
            }
        }
    }

    info!("Shutting down...");
    Ok(())
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level));

    // stdout carries effects; logs go to stderr.
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
