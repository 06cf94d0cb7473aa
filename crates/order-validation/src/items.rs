//! Structural checks of offer and consideration items.

use {
    crate::{chain::TokenLedger, query::QueryExt},
    alloy::primitives::{Address, FixedBytes, U256},
    contracts::alloy::{ERC721_INTERFACE_ID, ERC1155_INTERFACE_ID},
    itertools::Itertools,
    model::{
        Diagnostics,
        Issue,
        ItemType,
        issue::{
            ConsiderationIssue,
            Erc20Issue,
            Erc721Issue,
            Erc1155Issue,
            NativeIssue,
            OfferIssue,
        },
        order::{ConsiderationItem, Item, OfferItem, OrderParameters},
    },
};

/// Checks of a single offer item that need no knowledge of the offerer.
pub async fn offer_item_parameters(
    item: &OfferItem,
    exchange: Address,
    tokens: &dyn TokenLedger,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();
    if item.start_amount.is_zero() && item.end_amount.is_zero() {
        diagnostics.add_error(OfferIssue::AmountZero);
        return diagnostics;
    }
    diagnostics.extend(token_parameters(item, exchange, tokens).await);
    diagnostics
}

/// Checks of a single consideration item.
pub async fn consideration_item_parameters(
    item: &ConsiderationItem,
    exchange: Address,
    tokens: &dyn TokenLedger,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();
    if item.start_amount.is_zero() && item.end_amount.is_zero() {
        diagnostics.add_error(ConsiderationIssue::AmountZero);
    }
    if item.recipient.is_zero() {
        diagnostics.add_error(ConsiderationIssue::NullRecipient);
    }

    let token = token_parameters(item, exchange, tokens).await;
    let invalid_token = token
        .errors()
        .contains(&Issue::from(Erc721Issue::InvalidToken));
    diagnostics.extend(token);

    // The identifier of a criteria item is a root, not a token id.
    if item.item_type == ItemType::Erc721 && !invalid_token {
        let exists = tokens
            .erc721_owner(item.token, item.identifier_or_criteria)
            .await
            .confirms("ownerOf", |owner| !owner.is_zero());
        if !exists {
            diagnostics.add_error(Erc721Issue::IdentifierDne);
        }
    }
    diagnostics
}

/// Item type specific checks shared by offer and consideration items.
async fn token_parameters(
    item: &(impl Item + Sync),
    exchange: Address,
    tokens: &dyn TokenLedger,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();
    match item.item_type() {
        ItemType::Native => {
            if !item.token().is_zero() {
                diagnostics.add_error(NativeIssue::TokenAddress);
            }
            if !item.identifier_or_criteria().is_zero() {
                diagnostics.add_error(NativeIssue::IdentifierNonZero);
            }
        }
        ItemType::Erc20 => {
            if !item.identifier_or_criteria().is_zero() {
                diagnostics.add_error(Erc20Issue::IdentifierNonZero);
            }
            // Any token answering an allowance query with a number is taken
            // to be an ERC-20.
            let responds = tokens
                .erc20_allowance(item.token(), exchange, exchange)
                .await
                .confirms("allowance", |_| true);
            if !responds {
                diagnostics.add_error(Erc20Issue::InvalidToken);
            }
        }
        item_type @ (ItemType::Erc721 | ItemType::Erc721WithCriteria) => {
            let one = U256::from(1);
            if item_type == ItemType::Erc721
                && (item.start_amount() != one || item.end_amount() != one)
            {
                diagnostics.add_error(Erc721Issue::AmountNotOne);
            }
            if !supports(tokens, item.token(), ERC721_INTERFACE_ID).await {
                diagnostics.add_error(Erc721Issue::InvalidToken);
            }
        }
        ItemType::Erc1155 | ItemType::Erc1155WithCriteria => {
            if !supports(tokens, item.token(), ERC1155_INTERFACE_ID).await {
                diagnostics.add_error(Erc1155Issue::InvalidToken);
            }
        }
    }
    diagnostics
}

async fn supports(tokens: &dyn TokenLedger, token: Address, interface: FixedBytes<4>) -> bool {
    tokens
        .supports_interface(token, interface)
        .await
        .confirms("supportsInterface", |supported| *supported)
}

/// Checks of the offer as a whole: it must not be empty, should hold a
/// single item, and must not offer the same token twice.
pub fn offer_list(offer: &[OfferItem]) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();
    for _ in offer
        .iter()
        .tuple_combinations()
        .filter(|(a, b)| a.token == b.token && a.identifier_or_criteria == b.identifier_or_criteria)
    {
        diagnostics.add_error(OfferIssue::DuplicateItem);
    }
    if offer.is_empty() {
        diagnostics.add_error(OfferIssue::ZeroItems);
    }
    if offer.len() > 1 {
        diagnostics.add_warning(OfferIssue::MoreThanOneItem);
    }
    diagnostics
}

/// Checks of the consideration as a whole. Returns the diagnostics and
/// whether there are any items left to check individually.
pub fn consideration_list(parameters: &OrderParameters) -> (Diagnostics, bool) {
    let mut diagnostics = Diagnostics::empty();
    let consideration = &parameters.consideration;
    if parameters.total_original_consideration_items > U256::from(consideration.len()) {
        diagnostics.add_error(ConsiderationIssue::MissingOriginalConsiderationItems);
    }
    if consideration.is_empty() {
        diagnostics.add_warning(ConsiderationIssue::ZeroItems);
        return (diagnostics, false);
    }
    for _ in consideration.iter().tuple_combinations().filter(|(a, b)| {
        a.item_type == b.item_type
            && a.token == b.token
            && a.identifier_or_criteria == b.identifier_or_criteria
            && a.recipient == b.recipient
    }) {
        diagnostics.add_warning(ConsiderationIssue::DuplicateItem);
    }
    (diagnostics, true)
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{chain::MockTokenLedger, query::QueryError},
        alloy::primitives::address,
        mockall::predicate::eq,
        rstest::rstest,
    };

    const EXCHANGE: Address = address!("0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");
    const TOKEN: Address = address!("0x7070707070707070707070707070707070707070");

    fn offer_item(item_type: ItemType, start: u64, end: u64) -> OfferItem {
        OfferItem {
            item_type,
            token: if item_type == ItemType::Native {
                Address::ZERO
            } else {
                TOKEN
            },
            identifier_or_criteria: if item_type.is_fungible() {
                U256::ZERO
            } else {
                U256::from(7)
            },
            start_amount: U256::from(start),
            end_amount: U256::from(end),
        }
    }

    fn consideration_item(item_type: ItemType) -> ConsiderationItem {
        let item = offer_item(item_type, 1, 1);
        ConsiderationItem {
            item_type: item.item_type,
            token: item.token,
            identifier_or_criteria: item.identifier_or_criteria,
            start_amount: item.start_amount,
            end_amount: item.end_amount,
            recipient: Address::repeat_byte(0x11),
        }
    }

    /// A ledger where every token is a well behaved token of every kind.
    fn conforming_ledger() -> MockTokenLedger {
        let mut tokens = MockTokenLedger::new();
        tokens
            .expect_supports_interface()
            .returning(|_, _| Ok(true));
        tokens
            .expect_erc20_allowance()
            .returning(|_, _, _| Ok(U256::ZERO));
        tokens
            .expect_erc721_owner()
            .returning(|_, _| Ok(Address::repeat_byte(0x22)));
        tokens
    }

    #[rstest]
    #[case(ItemType::Native)]
    #[case(ItemType::Erc20)]
    #[case(ItemType::Erc721)]
    #[case(ItemType::Erc1155)]
    #[case(ItemType::Erc721WithCriteria)]
    #[case(ItemType::Erc1155WithCriteria)]
    #[tokio::test]
    async fn zero_amounts_are_an_error_for_every_type(#[case] item_type: ItemType) {
        let tokens = MockTokenLedger::new();
        let diagnostics =
            offer_item_parameters(&offer_item(item_type, 0, 0), EXCHANGE, &tokens).await;
        assert_eq!(diagnostics.errors(), [Issue::from(OfferIssue::AmountZero)]);

        let mut item = consideration_item(item_type);
        item.start_amount = U256::ZERO;
        item.end_amount = U256::ZERO;
        let diagnostics =
            consideration_item_parameters(&item, EXCHANGE, &conforming_ledger()).await;
        assert_eq!(
            diagnostics.errors().first(),
            Some(&Issue::from(ConsiderationIssue::AmountZero))
        );
    }

    #[rstest]
    #[case(ItemType::Native)]
    #[case(ItemType::Erc20)]
    #[case(ItemType::Erc721)]
    #[case(ItemType::Erc1155)]
    #[case(ItemType::Erc721WithCriteria)]
    #[case(ItemType::Erc1155WithCriteria)]
    #[tokio::test]
    async fn well_formed_items_pass(#[case] item_type: ItemType) {
        let tokens = conforming_ledger();
        let offer = offer_item_parameters(&offer_item(item_type, 1, 1), EXCHANGE, &tokens).await;
        assert!(offer.is_empty(), "{offer:?}");
        let consideration =
            consideration_item_parameters(&consideration_item(item_type), EXCHANGE, &tokens).await;
        assert!(consideration.is_empty(), "{consideration:?}");
    }

    #[tokio::test]
    async fn native_item_fields() {
        let mut item = offer_item(ItemType::Native, 1, 1);
        item.token = TOKEN;
        item.identifier_or_criteria = U256::from(1);
        let diagnostics = offer_item_parameters(&item, EXCHANGE, &MockTokenLedger::new()).await;
        assert_eq!(
            diagnostics.errors(),
            [
                Issue::from(NativeIssue::TokenAddress),
                Issue::from(NativeIssue::IdentifierNonZero),
            ]
        );
    }

    #[tokio::test]
    async fn erc20_probe_failure_is_invalid_token() {
        let mut tokens = MockTokenLedger::new();
        tokens
            .expect_erc20_allowance()
            .with(eq(TOKEN), eq(EXCHANGE), eq(EXCHANGE))
            .returning(|_, _, _| Err(QueryError::Reverted));
        let mut item = offer_item(ItemType::Erc20, 5, 5);
        item.identifier_or_criteria = U256::from(3);
        let diagnostics = offer_item_parameters(&item, EXCHANGE, &tokens).await;
        assert_eq!(
            diagnostics.errors(),
            [
                Issue::from(Erc20Issue::IdentifierNonZero),
                Issue::from(Erc20Issue::InvalidToken),
            ]
        );
    }

    #[tokio::test]
    async fn erc721_amount_must_be_one_unless_criteria() {
        let tokens = conforming_ledger();
        let diagnostics =
            offer_item_parameters(&offer_item(ItemType::Erc721, 1, 2), EXCHANGE, &tokens).await;
        assert_eq!(diagnostics.errors(), [Issue::from(Erc721Issue::AmountNotOne)]);

        let diagnostics = offer_item_parameters(
            &offer_item(ItemType::Erc721WithCriteria, 3, 3),
            EXCHANGE,
            &tokens,
        )
        .await;
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn interface_probe() {
        let mut tokens = MockTokenLedger::new();
        tokens
            .expect_supports_interface()
            .with(eq(TOKEN), eq(ERC721_INTERFACE_ID))
            .returning(|_, _| Ok(false));
        tokens
            .expect_supports_interface()
            .with(eq(TOKEN), eq(ERC1155_INTERFACE_ID))
            .returning(|_, _| Err(QueryError::Malformed));

        let diagnostics =
            offer_item_parameters(&offer_item(ItemType::Erc721, 1, 1), EXCHANGE, &tokens).await;
        assert_eq!(diagnostics.errors(), [Issue::from(Erc721Issue::InvalidToken)]);
        let diagnostics =
            offer_item_parameters(&offer_item(ItemType::Erc1155, 1, 1), EXCHANGE, &tokens).await;
        assert_eq!(diagnostics.errors(), [Issue::from(Erc1155Issue::InvalidToken)]);
    }

    #[tokio::test]
    async fn consideration_recipient_and_identifier() {
        let mut tokens = MockTokenLedger::new();
        tokens
            .expect_supports_interface()
            .returning(|_, _| Ok(true));
        tokens
            .expect_erc721_owner()
            .returning(|_, _| Err(QueryError::Reverted));

        let mut item = consideration_item(ItemType::Erc721);
        item.recipient = Address::ZERO;
        let diagnostics = consideration_item_parameters(&item, EXCHANGE, &tokens).await;
        assert_eq!(
            diagnostics.errors(),
            [
                Issue::from(ConsiderationIssue::NullRecipient),
                Issue::from(Erc721Issue::IdentifierDne),
            ]
        );
    }

    #[tokio::test]
    async fn invalid_erc721_token_skips_identifier_probe() {
        let mut tokens = MockTokenLedger::new();
        tokens
            .expect_supports_interface()
            .returning(|_, _| Ok(false));
        tokens.expect_erc721_owner().never();

        let diagnostics = consideration_item_parameters(
            &consideration_item(ItemType::Erc721),
            EXCHANGE,
            &tokens,
        )
        .await;
        assert_eq!(diagnostics.errors(), [Issue::from(Erc721Issue::InvalidToken)]);
    }

    #[test]
    fn duplicate_offer_items_regardless_of_amounts() {
        let a = offer_item(ItemType::Erc1155, 1, 1);
        let b = offer_item(ItemType::Erc1155, 10, 3);
        let diagnostics = offer_list(&[a, b]);
        assert_eq!(diagnostics.errors(), [Issue::from(OfferIssue::DuplicateItem)]);
        assert_eq!(diagnostics.warnings(), [Issue::from(OfferIssue::MoreThanOneItem)]);
    }

    #[test]
    fn duplicates_are_counted_per_pair() {
        let item = offer_item(ItemType::Erc1155, 1, 1);
        let diagnostics = offer_list(&[item.clone(), item.clone(), item]);
        assert_eq!(diagnostics.errors().len(), 3);
    }

    #[test]
    fn empty_offer() {
        let diagnostics = offer_list(&[]);
        assert_eq!(diagnostics.errors(), [Issue::from(OfferIssue::ZeroItems)]);
        assert!(!diagnostics.has_warnings());
    }

    #[test]
    fn consideration_list_checks() {
        let mut parameters = OrderParameters {
            total_original_consideration_items: U256::from(1),
            ..Default::default()
        };
        let (diagnostics, has_items) = consideration_list(&parameters);
        assert!(!has_items);
        assert_eq!(
            diagnostics.errors(),
            [Issue::from(
                ConsiderationIssue::MissingOriginalConsiderationItems
            )]
        );
        assert_eq!(
            diagnostics.warnings(),
            [Issue::from(ConsiderationIssue::ZeroItems)]
        );

        let item = consideration_item(ItemType::Native);
        parameters.consideration = vec![item.clone(), item];
        parameters.total_original_consideration_items = U256::from(2);
        let (diagnostics, has_items) = consideration_list(&parameters);
        assert!(has_items);
        assert!(!diagnostics.has_errors());
        assert_eq!(
            diagnostics.warnings(),
            [Issue::from(ConsiderationIssue::DuplicateItem)]
        );
    }
}
