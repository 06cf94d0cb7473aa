//! Strict checks of marketplace orders: one non-fungible item traded for a
//! fungible payment, followed by the protocol fee, the royalty and an
//! optional private sale recipient at fixed consideration positions.

use {
    crate::{
        chain::RoyaltyRegistry,
        config::Config,
        query::QueryExt,
    },
    alloy::primitives::{Address, U256},
    model::{
        Diagnostics,
        ItemType,
        issue::{ConsiderationIssue, FeeIssue, GenericIssue},
        order::{ConsiderationItem, OrderParameters},
    },
};

const BIPS_DENOMINATOR: u64 = 10_000;

/// Which side of the order pays with the fungible item.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Side {
    /// The offerer pays for the non-fungible consideration item.
    Bid,
    /// The offerer sells the non-fungible offer item.
    Ask,
}

/// The order reduced to the terms fees are derived from.
#[derive(Debug)]
struct Trade {
    side: Side,
    currency_type: ItemType,
    currency: Address,
    start_amount: U256,
    end_amount: U256,
    asset: Address,
    asset_id: U256,
}

impl Trade {
    /// Exactly one offer item, at least one consideration item, and exactly
    /// one fungible side.
    fn classify(parameters: &OrderParameters) -> Option<Self> {
        let ([offer], Some(primary)) = (&parameters.offer[..], parameters.consideration.first())
        else {
            return None;
        };
        let (side, payment, asset) = match (
            offer.item_type.is_fungible(),
            primary.item_type.is_fungible(),
        ) {
            (true, false) => (
                Side::Bid,
                (offer.item_type, offer.token, offer.start_amount, offer.end_amount),
                (primary.token, primary.identifier_or_criteria),
            ),
            (false, true) => (
                Side::Ask,
                (primary.item_type, primary.token, primary.start_amount, primary.end_amount),
                (offer.token, offer.identifier_or_criteria),
            ),
            _ => return None,
        };
        Some(Self {
            side,
            currency_type: payment.0,
            currency: payment.1,
            start_amount: payment.2,
            end_amount: payment.3,
            asset: asset.0,
            asset_id: asset.1,
        })
    }
}

/// `amount * bips / 10000` rounded down, without overflowing for large
/// amounts.
fn fee_amount(amount: U256, bips: u64) -> U256 {
    let denominator = U256::from(BIPS_DENOMINATOR);
    let bips = U256::from(bips);
    let (quotient, remainder) = amount.div_rem(denominator);
    quotient
        .saturating_mul(bips)
        .saturating_add(remainder * bips / denominator)
}

/// The consideration item a fee has to be paid with.
struct ExpectedFee {
    item_type: ItemType,
    token: Address,
    start_amount: U256,
    end_amount: U256,
    recipient: Address,
}

impl ExpectedFee {
    /// Every field of `item` not matching the expected fee. Amounts only
    /// have to be at least the expected ones.
    fn mismatches(&self, item: &ConsiderationItem) -> Vec<FeeIssue> {
        [
            (item.item_type != self.item_type, FeeIssue::ItemType),
            (item.token != self.token, FeeIssue::Token),
            (item.start_amount < self.start_amount, FeeIssue::StartAmount),
            (item.end_amount < self.end_amount, FeeIssue::EndAmount),
            (item.recipient != self.recipient, FeeIssue::Recipient),
        ]
        .into_iter()
        .filter_map(|(mismatch, issue)| mismatch.then_some(issue))
        .collect()
    }
}

/// Runs the strict checks. Nothing is checked beyond the shape of the order
/// if it is not a plain bid or ask.
#[tracing::instrument(skip_all)]
pub async fn validate_strict_logic(
    parameters: &OrderParameters,
    config: &Config,
    royalties: &dyn RoyaltyRegistry,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();
    let Some(trade) = Trade::classify(parameters) else {
        diagnostics.add_error(GenericIssue::InvalidOrderFormat);
        return diagnostics;
    };
    tracing::trace!(?trade, "classified order");

    let Some(private_sale_index) =
        validate_fee_items(parameters, &trade, config, royalties, &mut diagnostics).await
    else {
        return diagnostics;
    };
    validate_private_sale(parameters, &trade, private_sale_index, &mut diagnostics);
    diagnostics
}

/// Checks the protocol fee and royalty items. Returns the index of the
/// first consideration item after them, or `None` if an expected fee item
/// is missing.
async fn validate_fee_items(
    parameters: &OrderParameters,
    trade: &Trade,
    config: &Config,
    royalties: &dyn RoyaltyRegistry,
    diagnostics: &mut Diagnostics,
) -> Option<usize> {
    let consideration = &parameters.consideration;

    let protocol_fee = ExpectedFee {
        item_type: trade.currency_type,
        token: trade.currency,
        start_amount: fee_amount(trade.start_amount, config.protocol_fee_bips),
        end_amount: fee_amount(trade.end_amount, config.protocol_fee_bips),
        recipient: config.protocol_fee_recipient,
    };
    let protocol_fee_present = !protocol_fee.recipient.is_zero()
        && !(protocol_fee.start_amount.is_zero() && protocol_fee.end_amount.is_zero());
    if protocol_fee_present {
        let Some(item) = consideration.get(1) else {
            diagnostics.add_error(FeeIssue::Missing);
            return None;
        };
        for issue in protocol_fee.mismatches(item) {
            diagnostics.add_error(issue);
        }
    }

    let royalty = if config.check_royalty_fee {
        royalty_fee(trade, royalties).await
    } else {
        None
    };
    // Royalties are expected right after the protocol fee.
    let royalty_index = if protocol_fee_present { 2 } else { 1 };
    if let Some(royalty) = &royalty {
        let Some(item) = consideration.get(royalty_index) else {
            diagnostics.add_error(FeeIssue::Missing.royalty());
            return None;
        };
        for issue in royalty.mismatches(item) {
            diagnostics.add_error(issue.royalty());
        }
    }

    Some(royalty_index + usize::from(royalty.is_some()))
}

/// The royalty owed for the traded asset at the start and end payment
/// amounts. Failed registry queries mean no royalty.
async fn royalty_fee(trade: &Trade, royalties: &dyn RoyaltyRegistry) -> Option<ExpectedFee> {
    let (start, end) = futures::join!(
        royalties.royalty(trade.asset, trade.asset_id, trade.start_amount),
        royalties.royalty(trade.asset, trade.asset_id, trade.end_amount),
    );
    let start = start
        .or_conservative("getRoyaltyView")
        .filter(|royalty| !royalty.recipient.is_zero())?;
    let end_amount = end
        .or_conservative("getRoyaltyView")
        .map(|royalty| royalty.amount)
        .unwrap_or_default();
    Some(ExpectedFee {
        item_type: trade.currency_type,
        token: trade.currency,
        start_amount: start.amount,
        end_amount,
        recipient: start.recipient,
    })
}

/// Checks consideration items from `index` on. Only an ask may carry one
/// more item, which hands the offered asset to a designated buyer.
fn validate_private_sale(
    parameters: &OrderParameters,
    trade: &Trade,
    index: usize,
    diagnostics: &mut Diagnostics,
) {
    let Some(item) = parameters.consideration.get(index) else {
        return;
    };
    if trade.side == Side::Bid {
        diagnostics.add_error(ConsiderationIssue::ExtraItems);
        return;
    }
    if item.recipient == parameters.offerer {
        diagnostics.add_error(ConsiderationIssue::PrivateSaleToSelf);
        return;
    }
    let offer = &parameters.offer[0];
    let mirrors_offer = item.item_type == offer.item_type
        && item.token == offer.token
        && item.identifier_or_criteria == offer.identifier_or_criteria
        && item.start_amount == offer.start_amount
        && item.end_amount == offer.end_amount;
    if !mirrors_offer || parameters.consideration.len() > index + 1 {
        diagnostics.add_error(ConsiderationIssue::ExtraItems);
    }
}
