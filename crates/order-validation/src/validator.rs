use {
    crate::{
        balances,
        chain::{
            CodeFetching,
            ConduitRegistry,
            Exchange,
            RoyaltyRegistry,
            TokenLedger,
            ZoneCallback,
        },
        conduit,
        config::{Addresses, Config},
        items,
        onchain::Onchain,
        signature,
        status,
        strict,
        time,
        zone,
    },
    alloy::primitives::{Address, B256, U256},
    ethrpc::AlloyProvider,
    futures::future::join_all,
    model::{
        Diagnostics,
        order::{OfferItem, Order, OrderParameters},
    },
    signature_validator::{Eip1271Validator, SignatureValidating, Validator},
    std::sync::Arc,
    tracing::instrument,
};

/// Runs every check of the validation pipeline against the chain.
///
/// All checks are read-only. A check whose query fails reports what it can
/// prove, so a broken node connection shows up as issues rather than as an
/// error.
pub struct OrderValidator {
    exchange: Arc<dyn Exchange>,
    conduits: Arc<dyn ConduitRegistry>,
    tokens: Arc<dyn TokenLedger>,
    royalties: Arc<dyn RoyaltyRegistry>,
    zones: Arc<dyn ZoneCallback>,
    code_fetcher: Arc<dyn CodeFetching>,
    signature_validator: Arc<dyn SignatureValidating>,
    config: Config,
}

impl OrderValidator {
    #[expect(clippy::too_many_arguments)]
    pub fn new(
        exchange: Arc<dyn Exchange>,
        conduits: Arc<dyn ConduitRegistry>,
        tokens: Arc<dyn TokenLedger>,
        royalties: Arc<dyn RoyaltyRegistry>,
        zones: Arc<dyn ZoneCallback>,
        code_fetcher: Arc<dyn CodeFetching>,
        signature_validator: Arc<dyn SignatureValidating>,
        config: Config,
    ) -> Self {
        Self {
            exchange,
            conduits,
            tokens,
            royalties,
            zones,
            code_fetcher,
            signature_validator,
            config,
        }
    }

    /// Validator consulting the contracts at `addresses` through `provider`.
    pub fn onchain(provider: &AlloyProvider, addresses: Addresses, config: Config) -> Self {
        let onchain = Arc::new(Onchain::new(provider, addresses));
        let signature_validator = Validator::new(Arc::new(Eip1271Validator::new(provider)));
        Self::new(
            onchain.clone(),
            onchain.clone(),
            onchain.clone(),
            onchain.clone(),
            onchain.clone(),
            onchain,
            Arc::new(signature_validator),
            config,
        )
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Runs all checks and concatenates their diagnostics in a fixed order:
    /// time, status, offer, consideration, zone, signature and the strict
    /// checks if enabled.
    #[instrument(skip_all, fields(offerer = ?order.parameters.offerer))]
    pub async fn validate_order(&self, order: &Order) -> Diagnostics {
        let parameters = &order.parameters;
        let time = self.validate_time(parameters);
        let (status, offer, consideration, zone, signature, strict) = futures::join!(
            self.validate_status(parameters),
            self.validate_offer_items(parameters),
            self.validate_consideration_items(parameters),
            self.validate_zone(parameters),
            self.validate_signature(order),
            async {
                if self.config.skip_strict_validation {
                    Diagnostics::empty()
                } else {
                    self.validate_strict_logic(parameters).await
                }
            },
        );
        let diagnostics: Diagnostics = [
            time,
            status,
            offer,
            consideration,
            zone,
            signature,
            strict,
        ]
        .into_iter()
        .collect();
        tracing::debug!(
            errors = diagnostics.errors().len(),
            warnings = diagnostics.warnings().len(),
            "validated order"
        );
        diagnostics
    }

    pub fn validate_time(&self, parameters: &OrderParameters) -> Diagnostics {
        time::validate_time(
            parameters,
            model::time::now_in_epoch_seconds(),
            self.config.short_order_duration,
            self.config.distant_order_expiration,
        )
    }

    pub async fn validate_status(&self, parameters: &OrderParameters) -> Diagnostics {
        status::validate_status(parameters, self.exchange.as_ref()).await
    }

    /// Checks every offer item on its own, followed by the offer as a
    /// whole.
    #[instrument(skip_all)]
    pub async fn validate_offer_items(&self, parameters: &OrderParameters) -> Diagnostics {
        let per_item = join_all(
            parameters
                .offer
                .iter()
                .map(|item| self.validate_offer_item(item, parameters)),
        )
        .await;
        per_item
            .into_iter()
            .chain([items::offer_list(&parameters.offer)])
            .collect()
    }

    async fn validate_offer_item(
        &self,
        item: &OfferItem,
        parameters: &OrderParameters,
    ) -> Diagnostics {
        let exchange = self.exchange.address();
        let mut diagnostics =
            items::offer_item_parameters(item, exchange, self.tokens.as_ref()).await;
        if diagnostics.has_errors() {
            return diagnostics;
        }

        let (approval_target, conduit) = self.approval_address(parameters.conduit_key).await;
        if conduit.has_errors() {
            diagnostics.extend(conduit);
            return diagnostics;
        }
        diagnostics.extend(
            balances::offer_item_approval_and_balance(
                item,
                parameters.offerer,
                approval_target,
                self.tokens.as_ref(),
            )
            .await,
        );
        diagnostics
    }

    /// Checks the consideration as a whole, followed by every item on its
    /// own.
    #[instrument(skip_all)]
    pub async fn validate_consideration_items(&self, parameters: &OrderParameters) -> Diagnostics {
        let (mut diagnostics, has_items) = items::consideration_list(parameters);
        if !has_items {
            return diagnostics;
        }
        let exchange = self.exchange.address();
        let per_item = join_all(parameters.consideration.iter().map(|item| {
            items::consideration_item_parameters(item, exchange, self.tokens.as_ref())
        }))
        .await;
        diagnostics.extend(per_item.into_iter().collect());
        diagnostics
    }

    pub async fn validate_zone(&self, parameters: &OrderParameters) -> Diagnostics {
        zone::validate_zone(
            parameters,
            self.config.caller,
            self.exchange.as_ref(),
            self.code_fetcher.as_ref(),
            self.zones.as_ref(),
        )
        .await
    }

    pub async fn validate_signature(&self, order: &Order) -> Diagnostics {
        signature::validate_signature(
            order,
            self.exchange.as_ref(),
            self.signature_validator.as_ref(),
        )
        .await
    }

    pub async fn validate_signature_with_counter(
        &self,
        order: &Order,
        counter: U256,
    ) -> Diagnostics {
        signature::validate_signature_with_counter(
            order,
            counter,
            self.exchange.as_ref(),
            self.signature_validator.as_ref(),
        )
        .await
    }

    pub async fn approval_address(&self, conduit_key: B256) -> (Address, Diagnostics) {
        conduit::approval_address(
            conduit_key,
            self.exchange.address(),
            self.conduits.as_ref(),
        )
        .await
    }

    pub async fn validate_strict_logic(&self, parameters: &OrderParameters) -> Diagnostics {
        strict::validate_strict_logic(parameters, &self.config, self.royalties.as_ref()).await
    }
}

#[cfg(test)]
mod tests {
    use {
        super::*,
        crate::chain::{
            Conduit,
            MockCodeFetching,
            MockConduitRegistry,
            MockExchange,
            MockRoyaltyRegistry,
            MockTokenLedger,
            MockZoneCallback,
            OrderStatus,
        },
        alloy::primitives::{Bytes, address},
        model::{
            Issue,
            ItemType,
            issue::{ConduitIssue, FeeIssue, SignatureIssue, StatusIssue, TimeIssue},
            order::ConsiderationItem,
            time::now_in_epoch_seconds,
        },
        signature_validator::{MockSignatureValidating, SignatureValidationError},
    };

    const EXCHANGE: Address = address!("0xeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeeee");
    const OFFERER: Address = address!("0x0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f0f");
    const NFT: Address = address!("0x7272727272727272727272727272727272727272");
    const DOMAIN: B256 = B256::repeat_byte(0xd0);

    /// Sells one NFT for 10000 wei.
    fn order() -> Order {
        let now = now_in_epoch_seconds();
        Order {
            parameters: OrderParameters {
                offerer: OFFERER,
                offer: vec![OfferItem {
                    item_type: ItemType::Erc721,
                    token: NFT,
                    identifier_or_criteria: U256::from(7),
                    start_amount: U256::from(1),
                    end_amount: U256::from(1),
                }],
                consideration: vec![ConsiderationItem {
                    item_type: ItemType::Native,
                    token: Address::ZERO,
                    identifier_or_criteria: U256::ZERO,
                    start_amount: U256::from(10_000),
                    end_amount: U256::from(10_000),
                    recipient: OFFERER,
                }],
                start_time: U256::from(now - 60),
                end_time: U256::from(now + 24 * 60 * 60),
                total_original_consideration_items: U256::from(1),
                ..Default::default()
            },
            signature: Bytes::from(vec![0; 65]),
        }
    }

    /// Collaborators of a chain on which [`order`] is valid.
    struct Chain {
        exchange: MockExchange,
        conduits: MockConduitRegistry,
        tokens: MockTokenLedger,
        royalties: MockRoyaltyRegistry,
        zones: MockZoneCallback,
        code_fetcher: MockCodeFetching,
        signatures: MockSignatureValidating,
    }

    impl Chain {
        fn healthy(status: OrderStatus) -> Self {
            let mut exchange = MockExchange::new();
            exchange.expect_address().return_const(EXCHANGE);
            exchange.expect_counter().returning(|_| Ok(U256::ZERO));
            exchange.expect_order_status().returning(move |_| Ok(status));
            exchange.expect_domain_separator().returning(|| Ok(DOMAIN));

            let mut tokens = MockTokenLedger::new();
            tokens.expect_supports_interface().returning(|_, _| Ok(true));
            tokens.expect_erc721_owner().returning(|_, _| Ok(OFFERER));
            tokens.expect_erc721_approved().returning(|_, _| Ok(EXCHANGE));

            let mut code_fetcher = MockCodeFetching::new();
            code_fetcher.expect_code_size().returning(|_| Ok(0));

            let mut signatures = MockSignatureValidating::new();
            signatures.expect_validate_signature().returning(|_| Ok(()));

            Self {
                exchange,
                conduits: MockConduitRegistry::new(),
                tokens,
                royalties: MockRoyaltyRegistry::new(),
                zones: MockZoneCallback::new(),
                code_fetcher,
                signatures,
            }
        }

        fn validator(self, config: Config) -> OrderValidator {
            OrderValidator::new(
                Arc::new(self.exchange),
                Arc::new(self.conduits),
                Arc::new(self.tokens),
                Arc::new(self.royalties),
                Arc::new(self.zones),
                Arc::new(self.code_fetcher),
                Arc::new(self.signatures),
                config,
            )
        }
    }

    #[tokio::test]
    async fn valid_order_has_no_issues() {
        let validator = Chain::healthy(Default::default()).validator(Config::default());
        let diagnostics = validator.validate_order(&order()).await;
        assert!(diagnostics.is_empty(), "{diagnostics:?}");
    }

    #[tokio::test]
    async fn issues_are_reported_in_pipeline_order() {
        let mut chain = Chain::healthy(OrderStatus {
            is_cancelled: true,
            ..Default::default()
        });
        chain.signatures = MockSignatureValidating::new();
        chain
            .signatures
            .expect_validate_signature()
            .returning(|_| Err(SignatureValidationError::Invalid));
        let validator = chain.validator(Config::default());

        let mut order = order();
        order.parameters.end_time = U256::from(now_in_epoch_seconds() - 1);
        let diagnostics = validator.validate_order(&order).await;
        assert_eq!(
            diagnostics.errors(),
            [
                Issue::from(TimeIssue::Expired),
                Issue::from(StatusIssue::Cancelled),
                Issue::from(SignatureIssue::Invalid),
            ]
        );
    }

    #[tokio::test]
    async fn strict_checks_are_opt_in() {
        let config = Config {
            protocol_fee_recipient: Address::repeat_byte(0xfe),
            protocol_fee_bips: 250,
            ..Default::default()
        };
        let validator = Chain::healthy(Default::default()).validator(config.clone());
        assert!(validator.validate_order(&order()).await.is_empty());

        let validator = Chain::healthy(Default::default()).validator(Config {
            skip_strict_validation: false,
            ..config
        });
        let diagnostics = validator.validate_order(&order()).await;
        assert_eq!(diagnostics.errors(), [Issue::from(FeeIssue::Missing)]);
    }

    #[tokio::test]
    async fn invalid_conduit_skips_balance_checks() {
        let mut chain = Chain::healthy(Default::default());
        chain.tokens = MockTokenLedger::new();
        chain
            .tokens
            .expect_supports_interface()
            .returning(|_, _| Ok(true));
        chain.tokens.expect_erc721_owner().never();
        chain
            .conduits
            .expect_conduit()
            .returning(|_| Ok(Conduit::default()));
        let validator = chain.validator(Config::default());

        let mut order = order();
        order.parameters.conduit_key = B256::repeat_byte(1);
        let diagnostics = validator.validate_offer_items(&order.parameters).await;
        assert_eq!(diagnostics.errors(), [Issue::from(ConduitIssue::KeyInvalid)]);
    }

    #[tokio::test]
    async fn signature_at_explicit_counter() {
        let mut chain = Chain::healthy(Default::default());
        chain.exchange = MockExchange::new();
        chain
            .exchange
            .expect_counter()
            .returning(|_| Ok(U256::from(3)));
        let validator = chain.validator(Config::default());

        let diagnostics = validator
            .validate_signature_with_counter(&order(), U256::from(2))
            .await;
        assert_eq!(diagnostics.errors(), [Issue::from(SignatureIssue::LowCounter)]);
    }
}
