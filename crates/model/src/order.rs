//! Contains the order type as it is signed by the offerer, with the JSON
//! serialization used by order books and front-ends.

use {
    crate::{
        item::{ItemType, OrderType},
        u256_decimal::DecimalU256,
    },
    alloy_primitives::{Address, B256, Bytes, U256},
    alloy_sol_types::SolStruct,
    serde::{Deserialize, Serialize},
    serde_with::serde_as,
};

/// The EIP-712 struct definitions the offerer signs.
mod eip712 {
    alloy_sol_types::sol! {
        struct OfferItem {
            uint8 itemType;
            address token;
            uint256 identifierOrCriteria;
            uint256 startAmount;
            uint256 endAmount;
        }

        struct ConsiderationItem {
            uint8 itemType;
            address token;
            uint256 identifierOrCriteria;
            uint256 startAmount;
            uint256 endAmount;
            address recipient;
        }

        struct OrderComponents {
            address offerer;
            address zone;
            OfferItem[] offer;
            ConsiderationItem[] consideration;
            uint8 orderType;
            uint256 startTime;
            uint256 endTime;
            bytes32 zoneHash;
            uint256 salt;
            bytes32 conduitKey;
            uint256 counter;
        }
    }
}

#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferItem {
    pub item_type: ItemType,
    #[serde(default)]
    pub token: Address,
    #[serde_as(as = "DecimalU256")]
    #[serde(default)]
    pub identifier_or_criteria: U256,
    #[serde_as(as = "DecimalU256")]
    pub start_amount: U256,
    #[serde_as(as = "DecimalU256")]
    pub end_amount: U256,
}

#[serde_as]
#[derive(Clone, Debug, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsiderationItem {
    pub item_type: ItemType,
    #[serde(default)]
    pub token: Address,
    #[serde_as(as = "DecimalU256")]
    #[serde(default)]
    pub identifier_or_criteria: U256,
    #[serde_as(as = "DecimalU256")]
    pub start_amount: U256,
    #[serde_as(as = "DecimalU256")]
    pub end_amount: U256,
    pub recipient: Address,
}

/// Fields shared by offer and consideration items.
pub trait Item {
    fn item_type(&self) -> ItemType;
    fn token(&self) -> Address;
    fn identifier_or_criteria(&self) -> U256;
    fn start_amount(&self) -> U256;
    fn end_amount(&self) -> U256;

    /// The amount that has to be available over the whole active window of
    /// the order.
    fn min_amount(&self) -> U256 {
        self.start_amount().min(self.end_amount())
    }
}

macro_rules! impl_item {
    ($item:ty) => {
        impl Item for $item {
            fn item_type(&self) -> ItemType {
                self.item_type
            }

            fn token(&self) -> Address {
                self.token
            }

            fn identifier_or_criteria(&self) -> U256 {
                self.identifier_or_criteria
            }

            fn start_amount(&self) -> U256 {
                self.start_amount
            }

            fn end_amount(&self) -> U256 {
                self.end_amount
            }
        }
    };
}

impl_item!(OfferItem);
impl_item!(ConsiderationItem);

#[serde_as]
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderParameters {
    pub offerer: Address,
    #[serde(default)]
    pub zone: Address,
    pub offer: Vec<OfferItem>,
    pub consideration: Vec<ConsiderationItem>,
    #[serde(default)]
    pub order_type: OrderType,
    #[serde_as(as = "DecimalU256")]
    pub start_time: U256,
    #[serde_as(as = "DecimalU256")]
    pub end_time: U256,
    #[serde(default)]
    pub zone_hash: B256,
    #[serde_as(as = "DecimalU256")]
    #[serde(default)]
    pub salt: U256,
    #[serde(default)]
    pub conduit_key: B256,
    #[serde_as(as = "DecimalU256")]
    pub total_original_consideration_items: U256,
}

impl OrderParameters {
    /// The EIP-712 struct hash of the order components at `counter`. This is
    /// the hash the exchange keys order status by.
    pub fn order_hash(&self, counter: U256) -> B256 {
        self.components(counter).eip712_hash_struct()
    }

    fn components(&self, counter: U256) -> eip712::OrderComponents {
        eip712::OrderComponents {
            offerer: self.offerer,
            zone: self.zone,
            offer: self
                .offer
                .iter()
                .map(|item| eip712::OfferItem {
                    itemType: item.item_type.tag(),
                    token: item.token,
                    identifierOrCriteria: item.identifier_or_criteria,
                    startAmount: item.start_amount,
                    endAmount: item.end_amount,
                })
                .collect(),
            consideration: self
                .consideration
                .iter()
                .map(|item| eip712::ConsiderationItem {
                    itemType: item.item_type.tag(),
                    token: item.token,
                    identifierOrCriteria: item.identifier_or_criteria,
                    startAmount: item.start_amount,
                    endAmount: item.end_amount,
                    recipient: item.recipient,
                })
                .collect(),
            orderType: self.order_type.tag(),
            startTime: self.start_time,
            endTime: self.end_time,
            zoneHash: self.zone_hash,
            salt: self.salt,
            conduitKey: self.conduit_key,
            counter,
        }
    }

    /// Whether consideration items were added or removed after signing.
    pub fn consideration_count_changed(&self) -> bool {
        U256::from(self.consideration.len()) != self.total_original_consideration_items
    }
}

/// Signed order as submitted to an order book.
#[derive(Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub parameters: OrderParameters,
    #[serde(default)]
    pub signature: Bytes,
}
