use anyhow::{anyhow, Result};
use chrono::{TimeZone, Utc};

/// Renders unix seconds as `YYYY-MM-DD HH:MM:SS TZ` in the configured timezone.
pub fn format_timestamp(unix_secs: i64, tz: &str) -> Result<String> {
    let tz: chrono_tz::Tz = tz.parse().map_err(|_| anyhow!("invalid tz: {tz}"))?;
    let utc = Utc
        .timestamp_opt(unix_secs, 0)
        .single()
        .ok_or_else(|| anyhow!("timestamp out of range: {unix_secs}"))?;
    Ok(utc.with_timezone(&tz).format("%Y-%m-%d %H:%M:%S %Z").to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_in_zone() {
        assert_eq!(format_timestamp(1_700_000_000, "UTC").unwrap(), "2023-11-14 22:13:20 UTC");
        assert_eq!(
            format_timestamp(1_700_000_000, "Europe/Berlin").unwrap(),
            "2023-11-14 23:13:20 CET"
        );
        assert!(format_timestamp(0, "Mars/Olympus").is_err());
    }
}
