use chrono::Utc;

/// The current unix timestamp in seconds.
pub fn now_in_epoch_seconds() -> u64 {
    // Clocks set before 1970 are not something we need to support.
    Utc::now().timestamp().try_into().unwrap_or_default()
}
