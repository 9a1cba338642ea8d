mod app;
mod components;
mod config;
mod data;
mod events;
mod theme;
mod utils;
mod wallet;

use std::fs;
use std::sync::Arc;

use clap::Parser;
use color_eyre::eyre::Result;
use tokio::sync::mpsc;

use crate::app::App;
use crate::config::Config;
use crate::data::ContractService;
use crate::data::live::LiveWaveService;
use crate::data::provider::EthProvider;
use crate::wallet::WalletGateway;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;

    let config = Config::parse();

    init_tracing();

    // Connect to the Ethereum node
    eprintln!("Connecting to {}...", config.rpc_url);
    let provider = EthProvider::connect(&config.rpc_url).await?;
    let chain_id = provider.chain_id();
    tracing::info!(chain_id, contract = %config.contract, "connected");

    // Create event channel
    let (event_tx, event_rx) = mpsc::unbounded_channel();

    // Send initial connected event
    let _ = event_tx.send(events::AppEvent::Connected(chain_id));

    // Create contract service
    let service = Arc::new(ContractService::new(
        provider,
        config.rpc_url.clone(),
        config.contract,
        event_tx.clone(),
    ));

    // Detect configured wallet credentials; the app connects them
    let gateway = WalletGateway::from_config(&config);

    // Open the live NewWave subscription when a WS endpoint is configured.
    // The service lives until after the app exits so its Drop tears the
    // subscription down.
    let mut live = LiveWaveService::new(event_tx.clone());
    if let Some(ref ws_url) = config.ws_url {
        live.connect(ws_url, config.contract);
    }

    let mut app = App::with_service(service, gateway, event_rx, config.tick_rate_ms);

    // Initialize terminal
    let terminal = ratatui::init();
    let result = app.run(terminal).await;

    // Restore terminal
    ratatui::restore();

    live.disconnect();

    result
}

/// Route tracing output to a file under the user data dir; the terminal
/// itself belongs to the TUI.
fn init_tracing() {
    let Some(log_dir) = dirs::data_dir().map(|d| d.join("waveportal-tui")) else {
        return;
    };
    if fs::create_dir_all(&log_dir).is_err() {
        return;
    }
    let Ok(log_file) = fs::File::create(log_dir.join("waveportal-tui.log")) else {
        return;
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_ansi(false)
        .with_writer(Arc::new(log_file))
        .init();
}
