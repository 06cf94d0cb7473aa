use {
    crate::{chain::ConduitRegistry, query::QueryExt},
    alloy::primitives::{Address, B256},
    model::{Diagnostics, issue::ConduitIssue},
};

/// Resolves the address offerers have to approve for an order using
/// `conduit_key`.
///
/// The zero key approves the exchange directly. Any other key must name an
/// existing conduit; otherwise the null address is returned together with a
/// [`ConduitIssue::KeyInvalid`] error.
pub async fn approval_address(
    conduit_key: B256,
    exchange: Address,
    conduits: &dyn ConduitRegistry,
) -> (Address, Diagnostics) {
    let mut diagnostics = Diagnostics::empty();
    if conduit_key.is_zero() {
        return (exchange, diagnostics);
    }

    let conduit = conduits.conduit(conduit_key).await.or_conservative("getConduit");
    if !conduit.exists {
        diagnostics.add_error(ConduitIssue::KeyInvalid);
        return (Address::ZERO, diagnostics);
    }
    (conduit.address, diagnostics)
}
