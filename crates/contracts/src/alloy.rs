pub mod networks {
    pub const MAINNET: u64 = 1;
    pub const OPTIMISM: u64 = 10;
    pub const BNB: u64 = 56;
    pub const GNOSIS: u64 = 100;
    pub const POLYGON: u64 = 137;
    pub const ARBITRUM_ONE: u64 = 42161;
    pub const AVALANCHE: u64 = 43114;
    pub const SEPOLIA: u64 = 11155111;
}

use alloy::primitives::{FixedBytes, fixed_bytes};

pub use alloy::providers::DynProvider as Provider;

/// ERC-165 interface id of ERC-721.
pub const ERC721_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("0x80ac58cd");

/// ERC-165 interface id of ERC-1155.
pub const ERC1155_INTERFACE_ID: FixedBytes<4> = fixed_bytes!("0xd9b67a26");

/// Value returned by `isValidSignature` for a valid EIP-1271 signature.
pub const ERC1271_MAGIC_VALUE: FixedBytes<4> = fixed_bytes!("0x1626ba7e");

crate::bindings!(
    Seaport,
    {
        function getCounter(address offerer) external view returns (uint256 counter);
        function getOrderStatus(bytes32 orderHash)
            external
            view
            returns (bool isValidated, bool isCancelled, uint256 totalFilled, uint256 totalSize);
        function information()
            external
            view
            returns (string memory version, bytes32 domainSeparator, address conduitController);
    },
    maplit::hashmap! {
        MAINNET => address!("0x00000000006c3852cbEf3e08E8dF289169EdE581"),
        OPTIMISM => address!("0x00000000006c3852cbEf3e08E8dF289169EdE581"),
        BNB => address!("0x00000000006c3852cbEf3e08E8dF289169EdE581"),
        GNOSIS => address!("0x00000000006c3852cbEf3e08E8dF289169EdE581"),
        POLYGON => address!("0x00000000006c3852cbEf3e08E8dF289169EdE581"),
        ARBITRUM_ONE => address!("0x00000000006c3852cbEf3e08E8dF289169EdE581"),
        AVALANCHE => address!("0x00000000006c3852cbEf3e08E8dF289169EdE581"),
        SEPOLIA => address!("0x00000000006c3852cbEf3e08E8dF289169EdE581"),
    }
);

crate::bindings!(
    ConduitController,
    {
        function getConduit(bytes32 conduitKey) external view returns (address conduit, bool exists);
    },
    maplit::hashmap! {
        MAINNET => address!("0x00000000F9490004C11Cef243f5400493c00Ad63"),
        OPTIMISM => address!("0x00000000F9490004C11Cef243f5400493c00Ad63"),
        BNB => address!("0x00000000F9490004C11Cef243f5400493c00Ad63"),
        GNOSIS => address!("0x00000000F9490004C11Cef243f5400493c00Ad63"),
        POLYGON => address!("0x00000000F9490004C11Cef243f5400493c00Ad63"),
        ARBITRUM_ONE => address!("0x00000000F9490004C11Cef243f5400493c00Ad63"),
        AVALANCHE => address!("0x00000000F9490004C11Cef243f5400493c00Ad63"),
        SEPOLIA => address!("0x00000000F9490004C11Cef243f5400493c00Ad63"),
    }
);

crate::bindings!(
    RoyaltyEngine,
    {
        function getRoyaltyView(address tokenAddress, uint256 tokenId, uint256 value)
            external
            view
            returns (address[] memory recipients, uint256[] memory amounts);
    },
    maplit::hashmap! {
        MAINNET => address!("0x0385603ab55642cb4Dd5De3aE9e306809991804f"),
        POLYGON => address!("0x28EdFcF0Be7E86b07493466e7631a213bDe8eEF2"),
    }
);

crate::bindings!(
    ERC165,
    {
        function supportsInterface(bytes4 interfaceId) external view returns (bool);
    }
);

crate::bindings!(
    ERC20,
    {
        function allowance(address owner, address spender) external view returns (uint256);
        function balanceOf(address account) external view returns (uint256);
    }
);

crate::bindings!(
    ERC721,
    {
        function ownerOf(uint256 tokenId) external view returns (address owner);
        function getApproved(uint256 tokenId) external view returns (address operator);
        function isApprovedForAll(address owner, address operator) external view returns (bool);
    }
);

crate::bindings!(
    ERC1155,
    {
        function balanceOf(address account, uint256 id) external view returns (uint256);
        function isApprovedForAll(address account, address operator) external view returns (bool);
    }
);

crate::bindings!(
    Zone,
    {
        function isValidOrder(bytes32 orderHash, address caller, address offerer, bytes32 zoneHash)
            external
            view
            returns (bytes4 validOrderMagicValue);
    }
);

crate::bindings!(
    ERC1271,
    {
        function isValidSignature(bytes32 hash, bytes memory signature)
            external
            view
            returns (bytes4 magicValue);
    }
);

#[macro_export]
macro_rules! bindings {
    ($contract:ident, { $($interface:tt)* } $(, $deployment_info:expr)? $(,)?) => {
        paste::paste! {
            // Generate the main bindings in a private module. That allows
            // us to re-export all items in our own module while also adding
            // some items ourselves.
            #[allow(non_snake_case)]
            mod [<$contract Private>] {
                alloy::sol!(
                    #[allow(missing_docs)]
                    #[sol(rpc)]
                    interface $contract {
                        $($interface)*
                    }
                );
            }

            #[allow(non_snake_case)]
            pub mod $contract {
                use alloy::providers::DynProvider;

                pub use super::[<$contract Private>]::*;
                pub type Instance = $contract::[<$contract Instance>]<DynProvider>;

                $(
                use {
                    std::{sync::LazyLock, collections::HashMap},
                    alloy::primitives::{address, Address},
                    $crate::alloy::networks::*,
                };

                pub static DEPLOYMENT_INFO: LazyLock<HashMap<u64, Address>> = LazyLock::new(|| {
                    $deployment_info
                });

                /// The canonical deployment of the contract on the given
                /// chain, if there is one.
                pub fn deployment_address(chain_id: u64) -> Option<Address> {
                    DEPLOYMENT_INFO.get(&chain_id).copied()
                }
                )*
            }
        }
    };
}
