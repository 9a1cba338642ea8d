use std::time::Duration;

use alloy::primitives::{Address, LogData};
use alloy::providers::{Provider, ProviderBuilder, WsConnect};
use alloy::rpc::types::Filter;
use alloy::sol_types::SolEvent;
use futures::StreamExt;
use tokio::sync::mpsc;

use crate::data::contract::{NewWave, event_to_record};
use crate::data::types::WaveRecord;
use crate::events::AppEvent;

/// WebSocket subscription for live `NewWave` events from the contract.
/// Events are delivered in emission order; the connection reconnects with
/// exponential backoff and is torn down through `disconnect` or on drop
/// so handlers never outlive the component that opened them.
pub struct LiveWaveService {
    event_tx: mpsc::UnboundedSender<AppEvent>,
    shutdown_tx: Option<mpsc::UnboundedSender<()>>,
}

impl LiveWaveService {
    pub fn new(event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            event_tx,
            shutdown_tx: None,
        }
    }

    /// Connect to the WebSocket endpoint and subscribe to the contract's
    /// `NewWave` logs. Spawns the long-lived subscription task.
    pub fn connect(&mut self, ws_url: &str, contract: Address) {
        let (shutdown_tx, mut shutdown_rx) = mpsc::unbounded_channel::<()>();
        self.shutdown_tx = Some(shutdown_tx);

        let url = ws_url.to_string();
        let event_tx = self.event_tx.clone();

        tokio::spawn(async move {
            let mut backoff = Duration::from_secs(1);
            let max_backoff = Duration::from_secs(30);

            loop {
                match Self::subscribe(&url, contract, event_tx.clone(), &mut shutdown_rx).await {
                    Ok(()) => {
                        // Clean shutdown requested
                        let _ = event_tx.send(AppEvent::LiveDisconnected);
                        return;
                    }
                    Err(e) => {
                        tracing::warn!("live subscription dropped: {e}");
                        let _ = event_tx.send(AppEvent::LiveDisconnected);
                        tokio::select! {
                            _ = tokio::time::sleep(backoff) => {
                                backoff = (backoff * 2).min(max_backoff);
                            }
                            _ = shutdown_rx.recv() => {
                                return;
                            }
                        }
                    }
                }
            }
        });
    }

    async fn subscribe(
        url: &str,
        contract: Address,
        event_tx: mpsc::UnboundedSender<AppEvent>,
        shutdown_rx: &mut mpsc::UnboundedReceiver<()>,
    ) -> Result<(), color_eyre::eyre::Report> {
        let ws = WsConnect::new(url.to_string());
        let provider = ProviderBuilder::new().on_ws(ws).await?;

        let filter = Filter::new()
            .address(contract)
            .event_signature(NewWave::SIGNATURE_HASH);
        let sub = provider.subscribe_logs(&filter).await?;
        let mut stream = sub.into_stream();

        let _ = event_tx.send(AppEvent::LiveConnected);

        loop {
            tokio::select! {
                Some(log) = stream.next() => {
                    match decode_new_wave(&log.inner.data) {
                        Some(record) => {
                            let _ = event_tx.send(AppEvent::NewWave(record));
                        }
                        None => {
                            tracing::warn!("undecodable log matched the NewWave filter");
                        }
                    }
                }
                _ = shutdown_rx.recv() => {
                    return Ok(());
                }
                else => {
                    return Err(color_eyre::eyre::eyre!("log stream ended"));
                }
            }
        }
    }

    /// Stop the subscription. Safe to call more than once; subsequent
    /// events produce no further store mutations.
    pub fn disconnect(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for LiveWaveService {
    fn drop(&mut self) {
        self.disconnect();
    }
}

/// Decode a raw log body into a wave record. Returns None for logs that
/// are not a well-formed `NewWave`.
fn decode_new_wave(data: &LogData) -> Option<WaveRecord> {
    let event = NewWave::decode_log_data(data, true).ok()?;
    Some(event_to_record(&event))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{B256, Bytes, U256, address};

    #[test]
    fn test_decode_new_wave() {
        let event = NewWave {
            from: address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            timestamp: U256::from(1700000000u64),
            message: "gm".to_string(),
        };
        let data = event.encode_log_data();

        let record = decode_new_wave(&data).expect("well-formed event should decode");
        assert_eq!(record.waver, event.from);
        assert_eq!(record.timestamp.timestamp(), 1700000000);
        assert_eq!(record.message, "gm");
    }

    #[test]
    fn test_decode_rejects_foreign_log() {
        let data = LogData::new_unchecked(vec![B256::ZERO], Bytes::new());
        assert!(decode_new_wave(&data).is_none());
    }

    #[tokio::test]
    async fn test_disconnect_is_idempotent() {
        let (event_tx, _event_rx) = mpsc::unbounded_channel();
        let mut service = LiveWaveService::new(event_tx);
        service.disconnect();
        service.disconnect();
        assert!(service.shutdown_tx.is_none());
    }
}
