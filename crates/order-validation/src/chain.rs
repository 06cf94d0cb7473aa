//! Traits abstracting the external contracts consulted during validation so
//! that checkers can be tested against mocked state.

use {
    crate::query::Query,
    alloy::primitives::{Address, B256, FixedBytes, U256},
};

/// Status of an order as recorded by the exchange.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct OrderStatus {
    pub is_validated: bool,
    pub is_cancelled: bool,
    pub total_filled: U256,
    pub total_size: U256,
}

/// The exchange contract: counter store and order status registry.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait Exchange: Send + Sync {
    /// Address of the exchange itself. Offerers approve it directly when the
    /// order does not use a conduit.
    fn address(&self) -> Address;

    async fn counter(&self, offerer: Address) -> Query<U256>;

    async fn order_status(&self, order_hash: B256) -> Query<OrderStatus>;

    /// The EIP-712 domain separator orders are signed under.
    async fn domain_separator(&self) -> Query<B256>;
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Conduit {
    pub address: Address,
    pub exists: bool,
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait ConduitRegistry: Send + Sync {
    async fn conduit(&self, conduit_key: B256) -> Query<Conduit>;
}

/// Read-only views of ERC-20, ERC-721 and ERC-1155 tokens and of native
/// balances.
#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait TokenLedger: Send + Sync {
    /// ERC-165 capability probe.
    async fn supports_interface(&self, token: Address, interface: FixedBytes<4>) -> Query<bool>;

    async fn erc20_allowance(&self, token: Address, owner: Address, spender: Address)
    -> Query<U256>;

    async fn erc20_balance(&self, token: Address, owner: Address) -> Query<U256>;

    async fn erc721_owner(&self, token: Address, id: U256) -> Query<Address>;

    async fn erc721_approved(&self, token: Address, id: U256) -> Query<Address>;

    /// `isApprovedForAll`, shared by ERC-721 and ERC-1155.
    async fn is_approved_for_all(
        &self,
        token: Address,
        owner: Address,
        operator: Address,
    ) -> Query<bool>;

    async fn erc1155_balance(&self, token: Address, owner: Address, id: U256) -> Query<U256>;

    async fn native_balance(&self, owner: Address) -> Query<U256>;
}

/// First recipient and amount reported by the royalty registry.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Royalty {
    pub recipient: Address,
    pub amount: U256,
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait RoyaltyRegistry: Send + Sync {
    /// Royalty owed on a sale of `id` of `token` for `value`. `None` if the
    /// registry knows no recipient.
    async fn royalty(&self, token: Address, id: U256, value: U256) -> Query<Option<Royalty>>;
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait ZoneCallback: Send + Sync {
    /// Calls `isValidOrder` on the zone and returns the 4 byte answer.
    async fn is_valid_order(
        &self,
        zone: Address,
        order_hash: B256,
        caller: Address,
        offerer: Address,
        zone_hash: B256,
    ) -> Query<FixedBytes<4>>;
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait CodeFetching: Send + Sync {
    /// Fetches the code size at the specified address.
    async fn code_size(&self, address: Address) -> Query<usize>;
}
