use std::fs;
use std::io::Write;
use std::path::PathBuf;

use chrono::Utc;

use crate::data::types::WaveRecord;

/// Export the wave list to CSV.
///
/// Columns: waver, timestamp, message
pub fn export_waves_csv(waves: &[WaveRecord], path: &str) -> Result<String, String> {
    let file = fs::File::create(path).map_err(|e| format!("Failed to create file: {e}"))?;
    let mut wtr = csv::Writer::from_writer(file);

    wtr.write_record(["waver", "timestamp", "message"])
        .map_err(|e| format!("Failed to write CSV header: {e}"))?;

    for wave in waves {
        wtr.write_record(&[
            format!("{:#x}", wave.waver),
            wave.timestamp.to_rfc3339(),
            wave.message.clone(),
        ])
        .map_err(|e| format!("Failed to write CSV row: {e}"))?;
    }

    wtr.flush().map_err(|e| format!("Failed to flush CSV: {e}"))?;

    Ok(format!("Exported {} waves to {path}", waves.len()))
}

/// Export the wave list to pretty-printed JSON.
pub fn export_waves_json(waves: &[WaveRecord], path: &str) -> Result<String, String> {
    let formatted =
        serde_json::to_string_pretty(waves).map_err(|e| format!("Failed to serialize JSON: {e}"))?;

    let mut file = fs::File::create(path).map_err(|e| format!("Failed to create file: {e}"))?;
    file.write_all(formatted.as_bytes())
        .map_err(|e| format!("Failed to write file: {e}"))?;

    Ok(format!("Exported {} waves to {path}", waves.len()))
}

/// Default export location: the download directory when one exists, the
/// home directory otherwise. The file name carries a timestamp so
/// repeated exports never clobber each other.
pub fn default_export_path(extension: &str) -> Option<PathBuf> {
    let dir = dirs::download_dir().or_else(dirs::home_dir)?;
    let stamp = Utc::now().format("%Y%m%d-%H%M%S");
    Some(dir.join(format!("waves-{stamp}.{extension}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::Address;
    use std::fs;

    fn sample_waves() -> Vec<WaveRecord> {
        vec![
            WaveRecord::new(
                Address::from_slice(&[0x0a; 20]),
                1700000000,
                "hi there".to_string(),
            ),
            WaveRecord::new(
                Address::from_slice(&[0x0b; 20]),
                1700000012,
                "gm".to_string(),
            ),
        ]
    }

    #[test]
    fn test_export_waves_csv() {
        let waves = sample_waves();
        let path = "/tmp/waveportal-test-waves.csv";
        let result = export_waves_csv(&waves, path);
        assert!(result.is_ok());

        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.contains("waver"));
        assert!(contents.contains("hi there"));
        assert!(contents.contains("gm"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_export_waves_csv_empty() {
        let path = "/tmp/waveportal-test-waves-empty.csv";
        let result = export_waves_csv(&[], path);
        assert!(result.is_ok());
        assert!(result.unwrap().contains("0 waves"));

        let _ = fs::remove_file(path);
    }

    #[test]
    fn test_export_waves_json() {
        let waves = sample_waves();
        let path = "/tmp/waveportal-test-waves.json";
        let result = export_waves_json(&waves, path);
        assert!(result.is_ok());

        let contents = fs::read_to_string(path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&contents).unwrap();
        assert_eq!(parsed.as_array().unwrap().len(), 2);
        assert_eq!(parsed[1]["message"], "gm");

        let _ = fs::remove_file(path);
    }
}
