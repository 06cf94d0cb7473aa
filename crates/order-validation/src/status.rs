use {
    crate::{chain::Exchange, query::QueryExt},
    model::{Diagnostics, issue::StatusIssue, order::OrderParameters},
};

/// Checks that the order, hashed at the offerer's current counter, is
/// neither cancelled nor completely filled.
pub async fn validate_status(parameters: &OrderParameters, exchange: &dyn Exchange) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();
    let counter = exchange
        .counter(parameters.offerer)
        .await
        .or_conservative("getCounter");
    let order_hash = parameters.order_hash(counter);
    let status = exchange
        .order_status(order_hash)
        .await
        .or_conservative("getOrderStatus");

    if status.is_cancelled {
        diagnostics.add_error(StatusIssue::Cancelled);
    }
    if !status.total_size.is_zero() && status.total_filled == status.total_size {
        diagnostics.add_error(StatusIssue::FullyFilled);
    }
    diagnostics
}
