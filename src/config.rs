use std::path::PathBuf;

use alloy::primitives::Address;
use clap::Parser;

use crate::data::contract::WAVE_PORTAL_ADDRESS;

#[derive(Parser, Debug)]
#[command(name = "waveportal-tui", about = "Terminal client for the WavePortal contract")]
pub struct Config {
    /// HTTP JSON-RPC endpoint
    #[arg(short, long, default_value = "https://ethereum-sepolia-rpc.publicnode.com")]
    pub rpc_url: String,

    /// WebSocket JSON-RPC endpoint for live NewWave events
    #[arg(long)]
    pub ws_url: Option<String>,

    /// WavePortal contract address
    #[arg(long, default_value_t = WAVE_PORTAL_ADDRESS)]
    pub contract: Address,

    /// Hex-encoded private key used to sign wave transactions
    #[arg(long, env = "WAVEPORTAL_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Path to an encrypted keystore JSON file
    #[arg(long, env = "WAVEPORTAL_KEYSTORE")]
    pub keystore: Option<PathBuf>,

    /// Password for the keystore file
    #[arg(long, env = "WAVEPORTAL_KEYSTORE_PASSWORD", hide_env_values = true)]
    pub keystore_password: Option<String>,

    /// Tick rate in milliseconds for UI refresh
    #[arg(long, default_value = "100")]
    pub tick_rate_ms: u64,
}

#[cfg(test)]
impl Config {
    /// Baseline config for unit tests, bypassing clap and the process
    /// environment.
    pub fn for_tests() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            ws_url: None,
            contract: WAVE_PORTAL_ADDRESS,
            private_key: None,
            keystore: None,
            keystore_password: None,
            tick_rate_ms: 100,
        }
    }
}
