use alloy::primitives::{Address, B256};
use chrono::{DateTime, Utc};

/// Truncate an address to "0xabcd...ef12" format
pub fn truncate_address(addr: &Address) -> String {
    let s = format!("{addr}");
    if s.len() > 14 {
        format!("{}...{}", &s[..8], &s[s.len() - 4..])
    } else {
        s
    }
}

/// Truncate a transaction hash to "0xabcd...ef12" format
pub fn truncate_hash(hash: &B256) -> String {
    let s = format!("{hash}");
    if s.len() > 14 {
        format!("{}...{}", &s[..8], &s[s.len() - 4..])
    } else {
        s
    }
}

/// Format a number with comma separators
pub fn format_number(n: u64) -> String {
    let s = n.to_string();
    let mut result = String::with_capacity(s.len() + s.len() / 3);
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            result.push(',');
        }
        result.push(c);
    }
    result.chars().rev().collect()
}

/// Format a wave timestamp as "Xm ago", "Xh ago", etc.
pub fn format_time_ago(timestamp: &DateTime<Utc>) -> String {
    let now = Utc::now();
    if *timestamp > now {
        return "just now".to_string();
    }
    let diff = (now - *timestamp).num_seconds() as u64;
    if diff < 60 {
        format!("{diff}s ago")
    } else if diff < 3600 {
        format!("{}m ago", diff / 60)
    } else if diff < 86400 {
        format!("{}h ago", diff / 3600)
    } else {
        format!("{}d ago", diff / 86400)
    }
}

/// Format a wave timestamp as a full datetime string
pub fn format_timestamp(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%b %d, %Y %H:%M:%S UTC").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1,000");
        assert_eq!(format_number(1234567), "1,234,567");
    }

    #[test]
    fn test_truncate_address() {
        let addr: Address = "0xd8dA6BF26964aF9D7eEd9e03E53415D37aA96045"
            .parse()
            .unwrap();
        let truncated = truncate_address(&addr);
        assert!(truncated.starts_with("0x"));
        assert!(truncated.contains("..."));
        assert!(truncated.len() < 20);
    }

    #[test]
    fn test_format_timestamp() {
        let ts = DateTime::from_timestamp(0, 0).unwrap();
        assert_eq!(format_timestamp(&ts), "Jan 01, 1970 00:00:00 UTC");
    }

    #[test]
    fn test_future_timestamp_is_just_now() {
        let ts = Utc::now() + chrono::Duration::seconds(120);
        assert_eq!(format_time_ago(&ts), "just now");
    }
}
