use alloy::primitives::B256;

use crate::data::types::WaveRecord;

/// Events sent from background tasks to the main app loop. Each contract
/// operation reports a distinct success/failure pair so the view renders
/// the outcome instead of losing it to a log line.
#[derive(Debug)]
pub enum AppEvent {
    // Provider
    Connected(u64), // chain_id

    // Bulk read
    WavesLoaded(Vec<WaveRecord>),
    LoadFailed(String),

    // Counter read
    TotalWaves(u64),

    // Write
    WaveSubmitted { tx_hash: B256, total: u64 },
    SubmitFailed(String),

    // Live subscription
    NewWave(WaveRecord),
    LiveConnected,
    LiveDisconnected,

    // Status
    Error(String),
}
