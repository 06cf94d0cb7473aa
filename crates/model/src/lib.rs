//! Contains the order model shared between the validation pipeline, the
//! Merkle utility and the command line front-end.

pub mod diagnostics;
pub mod issue;
pub mod item;
pub mod order;
pub mod time;
pub mod u256_decimal;

pub use {
    diagnostics::Diagnostics,
    issue::Issue,
    item::{ItemType, OrderType},
};

use alloy_primitives::{B256, keccak256};

/// Computes the EIP-712 signing digest for a struct hash under the given
/// domain separator:
/// `keccak256("\x19\x01" ‖ domainSeparator ‖ structHash)`.
pub fn hashed_eip712_message(domain_separator: &B256, struct_hash: &B256) -> B256 {
    let mut message = [0u8; 66];
    message[0..2].copy_from_slice(&[0x19, 0x01]);
    message[2..34].copy_from_slice(domain_separator.as_slice());
    message[34..66].copy_from_slice(struct_hash.as_slice());
    keccak256(message)
}
