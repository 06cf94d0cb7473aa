//! Collaborators backed by an Ethereum node.

use {
    crate::{
        chain::{
            CodeFetching,
            Conduit,
            ConduitRegistry,
            Exchange,
            OrderStatus,
            Royalty,
            RoyaltyRegistry,
            TokenLedger,
            ZoneCallback,
        },
        config::Addresses,
        query::{Query, QueryError},
    },
    alloy::{
        primitives::{Address, B256, FixedBytes, U256},
        providers::Provider,
    },
    contracts::alloy::{
        ConduitController,
        ERC165,
        ERC20,
        ERC721,
        ERC1155,
        RoyaltyEngine,
        Seaport,
        Zone,
    },
    ethrpc::{AlloyProvider, alloy::ProviderLabelingExt},
};

pub struct Onchain {
    provider: AlloyProvider,
    exchange: Seaport::Instance,
    conduit_controller: ConduitController::Instance,
    royalty_engine: Option<RoyaltyEngine::Instance>,
}

impl Onchain {
    pub fn new(provider: &AlloyProvider, addresses: Addresses) -> Self {
        let provider = provider.labeled("orderValidation");
        Self {
            exchange: Seaport::Instance::new(addresses.exchange, provider.clone()),
            conduit_controller: ConduitController::Instance::new(
                addresses.conduit_controller,
                provider.clone(),
            ),
            royalty_engine: addresses
                .royalty_engine
                .map(|address| RoyaltyEngine::Instance::new(address, provider.clone())),
            provider,
        }
    }
}

#[async_trait::async_trait]
impl Exchange for Onchain {
    fn address(&self) -> Address {
        *self.exchange.address()
    }

    async fn counter(&self, offerer: Address) -> Query<U256> {
        Ok(self.exchange.getCounter(offerer).call().await?)
    }

    async fn order_status(&self, order_hash: B256) -> Query<OrderStatus> {
        let status = self.exchange.getOrderStatus(order_hash).call().await?;
        Ok(OrderStatus {
            is_validated: status.isValidated,
            is_cancelled: status.isCancelled,
            total_filled: status.totalFilled,
            total_size: status.totalSize,
        })
    }

    async fn domain_separator(&self) -> Query<B256> {
        Ok(self.exchange.information().call().await?.domainSeparator)
    }
}

#[async_trait::async_trait]
impl ConduitRegistry for Onchain {
    async fn conduit(&self, conduit_key: B256) -> Query<Conduit> {
        let conduit = self.conduit_controller.getConduit(conduit_key).call().await?;
        Ok(Conduit {
            address: conduit.conduit,
            exists: conduit.exists,
        })
    }
}

#[async_trait::async_trait]
impl TokenLedger for Onchain {
    async fn supports_interface(&self, token: Address, interface: FixedBytes<4>) -> Query<bool> {
        let token = ERC165::Instance::new(token, self.provider.clone());
        Ok(token.supportsInterface(interface).call().await?)
    }

    async fn erc20_allowance(
        &self,
        token: Address,
        owner: Address,
        spender: Address,
    ) -> Query<U256> {
        let token = ERC20::Instance::new(token, self.provider.clone());
        Ok(token.allowance(owner, spender).call().await?)
    }

    async fn erc20_balance(&self, token: Address, owner: Address) -> Query<U256> {
        let token = ERC20::Instance::new(token, self.provider.clone());
        Ok(token.balanceOf(owner).call().await?)
    }

    async fn erc721_owner(&self, token: Address, id: U256) -> Query<Address> {
        let token = ERC721::Instance::new(token, self.provider.clone());
        Ok(token.ownerOf(id).call().await?)
    }

    async fn erc721_approved(&self, token: Address, id: U256) -> Query<Address> {
        let token = ERC721::Instance::new(token, self.provider.clone());
        Ok(token.getApproved(id).call().await?)
    }

    async fn is_approved_for_all(
        &self,
        token: Address,
        owner: Address,
        operator: Address,
    ) -> Query<bool> {
        let token = ERC721::Instance::new(token, self.provider.clone());
        Ok(token.isApprovedForAll(owner, operator).call().await?)
    }

    async fn erc1155_balance(&self, token: Address, owner: Address, id: U256) -> Query<U256> {
        let token = ERC1155::Instance::new(token, self.provider.clone());
        Ok(token.balanceOf(owner, id).call().await?)
    }

    async fn native_balance(&self, owner: Address) -> Query<U256> {
        Ok(self.provider.get_balance(owner).await?)
    }
}

#[async_trait::async_trait]
impl RoyaltyRegistry for Onchain {
    async fn royalty(&self, token: Address, id: U256, value: U256) -> Query<Option<Royalty>> {
        let Some(engine) = &self.royalty_engine else {
            return Ok(None);
        };
        let view = engine.getRoyaltyView(token, id, value).call().await?;
        match (view.recipients.first(), view.amounts.first()) {
            (None, _) => Ok(None),
            (Some(recipient), Some(amount)) => Ok(Some(Royalty {
                recipient: *recipient,
                amount: *amount,
            })),
            (Some(_), None) => Err(QueryError::Malformed),
        }
    }
}

#[async_trait::async_trait]
impl ZoneCallback for Onchain {
    async fn is_valid_order(
        &self,
        zone: Address,
        order_hash: B256,
        caller: Address,
        offerer: Address,
        zone_hash: B256,
    ) -> Query<FixedBytes<4>> {
        let zone = Zone::Instance::new(zone, self.provider.clone());
        Ok(zone
            .isValidOrder(order_hash, caller, offerer, zone_hash)
            .call()
            .await?)
    }
}

#[async_trait::async_trait]
impl CodeFetching for Onchain {
    async fn code_size(&self, address: Address) -> Query<usize> {
        Ok(self.provider.get_code_at(address).await?.len())
    }
}
