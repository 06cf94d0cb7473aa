use {
    crate::{
        chain::{CodeFetching, Exchange, ZoneCallback},
        query::QueryExt,
    },
    alloy::{primitives::Address, sol_types::SolCall},
    contracts::alloy::Zone,
    model::{Diagnostics, issue::ZoneIssue, order::OrderParameters},
};

/// Asks the order's zone whether it accepts the order.
///
/// A zone without code accepts everything. A zone contract has to answer
/// `isValidOrder` with the function's selector; any other answer, or a
/// revert, rejects the order.
pub async fn validate_zone(
    parameters: &OrderParameters,
    caller: Address,
    exchange: &dyn Exchange,
    code_fetcher: &dyn CodeFetching,
    zones: &dyn ZoneCallback,
) -> Diagnostics {
    let mut diagnostics = Diagnostics::empty();
    // If the code cannot be fetched the zone still has to accept the order.
    let is_account = code_fetcher
        .code_size(parameters.zone)
        .await
        .confirms("getCode", |size| *size == 0);
    if is_account {
        return diagnostics;
    }

    let counter = exchange
        .counter(parameters.offerer)
        .await
        .or_conservative("getCounter");
    let accepted = zones
        .is_valid_order(
            parameters.zone,
            parameters.order_hash(counter),
            caller,
            parameters.offerer,
            parameters.zone_hash,
        )
        .await
        .confirms("isValidOrder", |magic| {
            magic.0 == Zone::Zone::isValidOrderCall::SELECTOR
        });
    if !accepted {
        diagnostics.add_error(ZoneIssue::RejectedOrder);
    }
    diagnostics
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::{
            chain::{MockCodeFetching, MockExchange, MockZoneCallback},
            query::QueryError,
        },
        alloy::primitives::{B256, FixedBytes, U256},
        mockall::predicate::eq,
        model::Issue,
    };

    fn parameters() -> OrderParameters {
        OrderParameters {
            offerer: Address::repeat_byte(0x0f),
            zone: Address::repeat_byte(0x20),
            zone_hash: B256::repeat_byte(0x21),
            ..Default::default()
        }
    }

    fn exchange() -> MockExchange {
        let mut exchange = MockExchange::new();
        exchange.expect_counter().returning(|_| Ok(U256::from(1)));
        exchange
    }

    fn contract_zone() -> MockCodeFetching {
        let mut code = MockCodeFetching::new();
        code.expect_code_size()
            .with(eq(Address::repeat_byte(0x20)))
            .returning(|_| Ok(100));
        code
    }

    #[tokio::test]
    async fn zone_without_code_is_valid() {
        let mut code = MockCodeFetching::new();
        code.expect_code_size().returning(|_| Ok(0));
        let mut zones = MockZoneCallback::new();
        zones.expect_is_valid_order().never();

        let diagnostics = validate_zone(
            &parameters(),
            Address::ZERO,
            &MockExchange::new(),
            &code,
            &zones,
        )
        .await;
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn zone_returns_magic_value() {
        let parameters = parameters();
        let caller = Address::repeat_byte(0xca);
        let mut zones = MockZoneCallback::new();
        zones
            .expect_is_valid_order()
            .with(
                eq(parameters.zone),
                eq(parameters.order_hash(U256::from(1))),
                eq(caller),
                eq(parameters.offerer),
                eq(parameters.zone_hash),
            )
            .returning(|_, _, _, _, _| Ok(FixedBytes(Zone::Zone::isValidOrderCall::SELECTOR)));

        let diagnostics =
            validate_zone(&parameters, caller, &exchange(), &contract_zone(), &zones).await;
        assert!(diagnostics.is_empty());
    }

    #[tokio::test]
    async fn wrong_value_and_revert_are_rejections() {
        for answer in [Ok(FixedBytes([0xff; 4])), Err(QueryError::Reverted)] {
            let mut zones = MockZoneCallback::new();
            zones
                .expect_is_valid_order()
                .return_once(move |_, _, _, _, _| answer);

            let diagnostics = validate_zone(
                &parameters(),
                Address::ZERO,
                &exchange(),
                &contract_zone(),
                &zones,
            )
            .await;
            assert_eq!(diagnostics.errors(), [Issue::from(ZoneIssue::RejectedOrder)]);
        }
    }
}
