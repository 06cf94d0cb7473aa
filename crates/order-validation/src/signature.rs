use {
    crate::{chain::Exchange, query::QueryExt},
    alloy::primitives::U256,
    model::{Diagnostics, hashed_eip712_message, issue::SignatureIssue, order::Order},
    signature_validator::{SignatureCheck, SignatureValidating},
};

/// Counters further ahead of the offerer's current counter than this need a
/// lot of cancellations before the order becomes valid.
const MAX_COUNTER_GAP: u64 = 2;

/// Checks the order signature as if the order had been signed at `counter`.
///
/// A counter below the offerer's current counter can never become valid
/// again, so no signature verification happens in that case. Orders the
/// exchange already marked as validated need no signature.
pub async fn validate_signature_with_counter(
    order: &Order,
    counter: U256,
    exchange: &dyn Exchange,
    signatures: &dyn SignatureValidating,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();
    let parameters = &order.parameters;

    let current_counter = exchange
        .counter(parameters.offerer)
        .await
        .or_conservative("getCounter");
    if current_counter > counter {
        diagnostics.add_error(SignatureIssue::LowCounter);
        return diagnostics;
    }
    let gap = U256::from(MAX_COUNTER_GAP);
    if counter > gap && current_counter < counter - gap {
        diagnostics.add_warning(SignatureIssue::HighCounter);
    }

    let order_hash = parameters.order_hash(counter);
    let status = exchange
        .order_status(order_hash)
        .await
        .or_conservative("getOrderStatus");
    if status.is_validated {
        return diagnostics;
    }

    let valid = match exchange.domain_separator().await {
        Ok(domain_separator) => {
            let check = SignatureCheck {
                signer: parameters.offerer,
                hash: hashed_eip712_message(&domain_separator, &order_hash),
                signature: order.signature.clone(),
            };
            signatures
                .validate_signature(check)
                .await
                .inspect_err(|err| tracing::debug!(?err, "signature verification failed"))
                .is_ok()
        }
        Err(err) => {
            tracing::debug!(?err, "failed to read domain separator");
            false
        }
    };
    if !valid {
        if parameters.consideration_count_changed() {
            diagnostics.add_warning(SignatureIssue::OriginalConsiderationItems);
        }
        diagnostics.add_error(SignatureIssue::Invalid);
    }
    diagnostics
}

/// [`validate_signature_with_counter`] at the offerer's current counter.
pub async fn validate_signature(
    order: &Order,
    exchange: &dyn Exchange,
    signatures: &dyn SignatureValidating,
) -> Diagnostics {
    let counter = exchange
        .counter(order.parameters.offerer)
        .await
        .or_conservative("getCounter");
    validate_signature_with_counter(order, counter, exchange, signatures).await
}
