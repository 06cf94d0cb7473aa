//! Bindings for the on-chain collaborators the order validator reads from.

pub mod alloy;

pub use alloy::{
    ConduitController,
    ERC1155,
    ERC1271,
    ERC165,
    ERC20,
    ERC721,
    Provider,
    RoyaltyEngine,
    Seaport,
    Zone,
};
