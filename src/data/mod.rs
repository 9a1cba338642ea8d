pub mod contract;
pub mod export;
pub mod live;
pub mod provider;
pub mod store;
pub mod types;

use std::sync::{Arc, RwLock};

use alloy::network::EthereumWallet;
use alloy::primitives::{Address, Bytes};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use color_eyre::eyre::{Result, eyre};
use tokio::sync::mpsc;

use crate::data::contract::{
    WAVE_GAS_LIMIT, getAllWavesCall, getTotalWavesCall, wave_to_record, waveCall,
};
use crate::data::provider::EthProvider;
use crate::data::types::WaveRecord;
use crate::events::AppEvent;

/// Issues contract reads and writes against the WavePortal. Every
/// operation runs on a spawned task and reports its outcome through the
/// event channel; the UI loop never blocks on the chain.
pub struct ContractService {
    provider: Arc<EthProvider>,
    rpc_url: String,
    contract: Address,
    wallet: RwLock<Option<EthereumWallet>>,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl ContractService {
    pub fn new(
        provider: EthProvider,
        rpc_url: String,
        contract: Address,
        event_tx: mpsc::UnboundedSender<AppEvent>,
    ) -> Self {
        Self {
            provider: Arc::new(provider),
            rpc_url,
            contract,
            wallet: RwLock::new(None),
            event_tx,
        }
    }

    /// Attach the wallet used for the write path once the gateway has
    /// connected it.
    pub fn set_wallet(&self, wallet: EthereumWallet) {
        if let Ok(mut slot) = self.wallet.write() {
            *slot = Some(wallet);
        }
    }

    /// Read the complete wave history and seed the store with it. On
    /// failure the store is left untouched and the view shows the error;
    /// there is no automatic retry.
    pub fn fetch_all_waves(&self) {
        let provider = Arc::clone(&self.provider);
        let contract = self.contract;
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match read_all_waves(&provider, contract).await {
                Ok(records) => {
                    let _ = tx.send(AppEvent::WavesLoaded(records));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::LoadFailed(format!("Failed to load waves: {e}")));
                }
            }
        });
    }

    /// Read the total-wave counter.
    pub fn fetch_total_waves(&self) {
        let provider = Arc::clone(&self.provider);
        let contract = self.contract;
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            match read_total(&provider, contract).await {
                Ok(total) => {
                    let _ = tx.send(AppEvent::TotalWaves(total));
                }
                Err(e) => {
                    let _ = tx.send(AppEvent::Error(format!("Failed to read wave count: {e}")));
                }
            }
        });
    }

    /// Submit a wave carrying `message`. Requires a connected wallet; the
    /// counter is read before and after, the transaction carries the fixed
    /// gas limit, and the task waits for inclusion before reporting. Any
    /// failure is terminal for this attempt - the user retries manually.
    pub fn submit_wave(&self, message: String) {
        let wallet = match self.wallet.read() {
            Ok(slot) => slot.clone(),
            Err(_) => None,
        };
        let Some(wallet) = wallet else {
            let _ = self.event_tx.send(AppEvent::SubmitFailed(
                "No wallet connected - press c to connect".to_string(),
            ));
            return;
        };

        let read_provider = Arc::clone(&self.provider);
        let rpc_url = self.rpc_url.clone();
        let contract = self.contract;
        let tx = self.event_tx.clone();

        tokio::spawn(async move {
            let before = match read_total(&read_provider, contract).await {
                Ok(n) => n,
                Err(e) => {
                    let _ = tx.send(AppEvent::SubmitFailed(format!(
                        "Failed to read wave count: {e}"
                    )));
                    return;
                }
            };
            tracing::info!(total = before, "wave count before submission");

            let wallet_provider = match EthProvider::connect_with_wallet(&rpc_url, wallet).await {
                Ok(p) => p,
                Err(e) => {
                    let _ = tx.send(AppEvent::SubmitFailed(format!(
                        "Failed to connect signer: {e}"
                    )));
                    return;
                }
            };

            let calldata = waveCall { message }.abi_encode();
            let request = TransactionRequest::default()
                .to(contract)
                .input(Bytes::from(calldata).into())
                .gas_limit(WAVE_GAS_LIMIT);

            let receipt = match wallet_provider.send_and_confirm(request).await {
                Ok(r) => r,
                Err(e) => {
                    let _ = tx.send(AppEvent::SubmitFailed(format!("Wave failed: {e}")));
                    return;
                }
            };

            if !receipt.status() {
                let _ = tx.send(AppEvent::SubmitFailed(format!(
                    "Wave transaction reverted: {}",
                    receipt.transaction_hash
                )));
                return;
            }
            tracing::info!(tx_hash = %receipt.transaction_hash, "wave mined");

            // A counter hiccup after a mined wave should not report the
            // wave itself as failed.
            let total = match read_total(&read_provider, contract).await {
                Ok(n) => {
                    tracing::info!(total = n, "wave count after submission");
                    n
                }
                Err(e) => {
                    tracing::warn!("failed to re-read wave count: {e}");
                    before + 1
                }
            };

            let _ = tx.send(AppEvent::WaveSubmitted {
                tx_hash: receipt.transaction_hash,
                total,
            });
        });
    }
}

// --- Call helpers ---

async fn read_all_waves(provider: &EthProvider, contract: Address) -> Result<Vec<WaveRecord>> {
    let calldata = getAllWavesCall {}.abi_encode();
    let request = TransactionRequest::default()
        .to(contract)
        .input(Bytes::from(calldata).into());

    let data = provider.call(request).await?;
    let decoded = getAllWavesCall::abi_decode_returns(&data, true)
        .map_err(|e| eyre!("bad getAllWaves response: {e}"))?;

    Ok(decoded.waves.iter().map(wave_to_record).collect())
}

async fn read_total(provider: &EthProvider, contract: Address) -> Result<u64> {
    let calldata = getTotalWavesCall {}.abi_encode();
    let request = TransactionRequest::default()
        .to(contract)
        .input(Bytes::from(calldata).into());

    let data = provider.call(request).await?;
    let decoded = getTotalWavesCall::abi_decode_returns(&data, true)
        .map_err(|e| eyre!("bad getTotalWaves response: {e}"))?;

    Ok(decoded.total.to::<u64>())
}
