use {
    alloy::primitives::U256,
    model::{Diagnostics, issue::TimeIssue, order::OrderParameters},
    std::time::Duration,
};

/// Checks the active window of the order against `now` (seconds since the
/// epoch).
///
/// An order that can never be filled, because it ends before it starts or
/// has already ended, gets exactly one error and nothing else.
pub fn validate_time(
    parameters: &OrderParameters,
    now: u64,
    short_order_duration: Duration,
    distant_order_expiration: Duration,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();
    let (start, end) = (parameters.start_time, parameters.end_time);
    let now = U256::from(now);

    if end <= start {
        diagnostics.add_error(TimeIssue::EndTimeBeforeStartTime);
        return diagnostics;
    }
    if end < now {
        diagnostics.add_error(TimeIssue::Expired);
        return diagnostics;
    }
    if end > now.saturating_add(U256::from(distant_order_expiration.as_secs())) {
        diagnostics.add_warning(TimeIssue::DistantExpiration);
    }
    if start > now {
        diagnostics.add_warning(TimeIssue::NotActive);
    }
    if end - start.max(now) < U256::from(short_order_duration.as_secs()) {
        diagnostics.add_warning(TimeIssue::ShortOrder);
    }
    diagnostics
}
