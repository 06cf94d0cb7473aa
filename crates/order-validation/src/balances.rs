//! Balance and approval checks of offer items against the offerer's funds.

use {
    crate::{chain::TokenLedger, query::QueryExt},
    alloy::primitives::{Address, U256},
    model::{
        Diagnostics,
        ItemType,
        issue::{Erc20Issue, Erc721Issue, Erc1155Issue, NativeIssue, OfferIssue},
        order::{Item, OfferItem},
    },
};

/// Checks that `offerer` holds enough of the offered item and that
/// `approval_target` may transfer it.
///
/// Ownership or balance and approval are checked independently, so both
/// errors can be reported for the same item. Criteria items only require
/// approval for all tokens of the collection.
pub async fn offer_item_approval_and_balance(
    item: &OfferItem,
    offerer: Address,
    approval_target: Address,
    tokens: &dyn TokenLedger,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();
    let min_amount = item.min_amount();
    let (token, id) = (item.token, item.identifier_or_criteria);

    match item.item_type {
        ItemType::Erc721 => {
            let owns = tokens
                .erc721_owner(token, id)
                .await
                .confirms("ownerOf", |owner| *owner == offerer);
            if !owns {
                diagnostics.add_error(Erc721Issue::NotOwner);
            }
            let approved = tokens
                .erc721_approved(token, id)
                .await
                .confirms("getApproved", |approved| *approved == approval_target)
                || approved_for_all(tokens, token, offerer, approval_target).await;
            if !approved {
                diagnostics.add_error(Erc721Issue::NotApproved);
            }
        }
        ItemType::Erc721WithCriteria => {
            if !approved_for_all(tokens, token, offerer, approval_target).await {
                diagnostics.add_error(Erc721Issue::NotApproved);
            }
        }
        ItemType::Erc1155 => {
            if !approved_for_all(tokens, token, offerer, approval_target).await {
                diagnostics.add_error(Erc1155Issue::NotApproved);
            }
            let sufficient = tokens
                .erc1155_balance(token, offerer, id)
                .await
                .confirms("balanceOf", |balance| *balance >= min_amount);
            if !sufficient {
                diagnostics.add_error(Erc1155Issue::InsufficientBalance);
            }
        }
        ItemType::Erc1155WithCriteria => {
            if !approved_for_all(tokens, token, offerer, approval_target).await {
                diagnostics.add_error(Erc1155Issue::NotApproved);
            }
        }
        ItemType::Erc20 => {
            let allowed = tokens
                .erc20_allowance(token, offerer, approval_target)
                .await
                .confirms("allowance", |allowance| *allowance >= min_amount);
            if !allowed {
                diagnostics.add_error(Erc20Issue::InsufficientAllowance);
            }
            let sufficient = tokens
                .erc20_balance(token, offerer)
                .await
                .confirms("balanceOf", |balance| *balance >= min_amount);
            if !sufficient {
                diagnostics.add_error(Erc20Issue::InsufficientBalance);
            }
        }
        ItemType::Native => {
            let balance: U256 = tokens
                .native_balance(offerer)
                .await
                .or_conservative("balance");
            if balance < min_amount {
                diagnostics.add_error(NativeIssue::InsufficientBalance);
            }
            // Native currency cannot be pulled from the offerer by the
            // exchange.
            diagnostics.add_warning(OfferIssue::NativeItem);
        }
    }
    diagnostics
}

async fn approved_for_all(
    tokens: &dyn TokenLedger,
    token: Address,
    owner: Address,
    operator: Address,
) -> bool {
    tokens
        .is_approved_for_all(token, owner, operator)
        .await
        .confirms("isApprovedForAll", |approved| *approved)
}
