use alloy_primitives::{Address, B256, Signature, U256};

/// Recovers the account that produced `signature` over the prehashed
/// `hash`.
///
/// Accepts the 65 byte `r ‖ s ‖ v` encoding (`v` either `0/1` or `27/28`)
/// and the 64 byte EIP-2098 compact encoding `r ‖ yParityAndS`. Returns
/// `None` for any other length or an unrecoverable signature.
pub fn recover(hash: B256, signature: &[u8]) -> Option<Address> {
    let signature = match signature.len() {
        65 => {
            let parity = match signature[64] {
                0 | 27 => false,
                1 | 28 => true,
                _ => return None,
            };
            Signature::new(
                U256::from_be_slice(&signature[..32]),
                U256::from_be_slice(&signature[32..64]),
                parity,
            )
        }
        64 => {
            let vs = U256::from_be_slice(&signature[32..]);
            Signature::new(
                U256::from_be_slice(&signature[..32]),
                vs & (U256::MAX >> 1),
                vs.bit(255),
            )
        }
        _ => return None,
    };
    signature
        .recover_address_from_prehash(&hash)
        .inspect_err(|err| tracing::trace!(?err, "signature recovery failed"))
        .ok()
}
