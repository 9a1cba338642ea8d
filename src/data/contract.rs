use alloy::primitives::{Address, address};
use alloy::sol;

use crate::data::types::WaveRecord;

/// Deployed WavePortal contract.
pub const WAVE_PORTAL_ADDRESS: Address = address!("9F3eEA739a2Ac999c6545eF57a7DEd2ffEA7ae4E");

/// Fixed upper bound on gas for a `wave` transaction. The contract's write
/// path is a push plus an event, so this leaves generous headroom without
/// estimating per call.
pub const WAVE_GAS_LIMIT: u64 = 300_000;

// WavePortal surface: two views, one write, one event. The struct layout
// and event argument order are those of the deployed contract.
sol! {
    #[derive(Debug)]
    struct Wave {
        address waver;
        string message;
        uint256 timestamp;
    }

    function getAllWaves() external view returns (Wave[] memory waves);

    function getTotalWaves() external view returns (uint256 total);

    function wave(string memory message) external;

    #[derive(Debug)]
    event NewWave(address indexed from, uint256 timestamp, string message);
}

/// Convert a raw wave from the `getAllWaves` response into a `WaveRecord`.
pub fn wave_to_record(raw: &Wave) -> WaveRecord {
    WaveRecord::new(raw.waver, raw.timestamp.to::<u64>(), raw.message.clone())
}

/// Convert a decoded `NewWave` event into a `WaveRecord`.
pub fn event_to_record(event: &NewWave) -> WaveRecord {
    WaveRecord::new(event.from, event.timestamp.to::<u64>(), event.message.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::U256;

    #[test]
    fn test_wave_to_record() {
        let raw = Wave {
            waver: address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            message: "hello".to_string(),
            timestamp: U256::from(1700000000u64),
        };
        let record = wave_to_record(&raw);
        assert_eq!(record.waver, raw.waver);
        assert_eq!(record.message, "hello");
        assert_eq!(record.timestamp.timestamp(), 1700000000);
    }

    #[test]
    fn test_event_to_record() {
        let event = NewWave {
            from: address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045"),
            timestamp: U256::from(1000u64),
            message: "hi".to_string(),
        };
        let record = event_to_record(&event);
        assert_eq!(record.waver, event.from);
        assert_eq!(record.timestamp.timestamp(), 1000);
    }

    #[test]
    fn test_event_and_bulk_read_agree_on_key() {
        let from = address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");
        let raw = Wave {
            waver: from,
            message: "gm".to_string(),
            timestamp: U256::from(1700000000u64),
        };
        let event = NewWave {
            from,
            timestamp: U256::from(1700000000u64),
            message: "gm".to_string(),
        };
        assert_eq!(wave_to_record(&raw).key(), event_to_record(&event).key());
    }
}
