use alloy::primitives::Address;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// A single wave as rendered and exported: who waved, when, and what they
/// said. Built either from the `getAllWaves` bulk read or from a live
/// `NewWave` event, and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WaveRecord {
    pub waver: Address,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

impl WaveRecord {
    /// Build a record from raw on-chain fields. The contract stores the
    /// timestamp as seconds since the Unix epoch.
    pub fn new(waver: Address, timestamp_secs: u64, message: String) -> Self {
        Self {
            waver,
            timestamp: DateTime::from_timestamp(timestamp_secs as i64, 0)
                .unwrap_or(DateTime::UNIX_EPOCH),
            message,
        }
    }

    /// Identity key used for duplicate suppression across the bulk read
    /// and the live event stream.
    pub fn key(&self) -> WaveKey {
        (self.waver, self.timestamp.timestamp(), self.message.clone())
    }
}

/// (sender, epoch seconds, message) - two records with the same key are
/// the same on-chain wave seen through different delivery paths.
pub type WaveKey = (Address, i64, String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_timestamp_is_seconds_since_epoch() {
        let record = WaveRecord::new(Address::ZERO, 1000, "hi".to_string());
        assert_eq!(record.timestamp.timestamp(), 1000);
        assert_eq!(record.message, "hi");
    }

    #[test]
    fn test_same_wave_same_key() {
        let a = WaveRecord::new(Address::ZERO, 1700000000, "gm".to_string());
        let b = WaveRecord::new(Address::ZERO, 1700000000, "gm".to_string());
        assert_eq!(a.key(), b.key());
    }

    #[test]
    fn test_different_message_different_key() {
        let a = WaveRecord::new(Address::ZERO, 1700000000, "gm".to_string());
        let b = WaveRecord::new(Address::ZERO, 1700000000, "gn".to_string());
        assert_ne!(a.key(), b.key());
    }
}
