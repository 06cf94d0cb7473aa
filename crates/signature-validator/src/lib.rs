//! Checks that a digest was signed by a given account, either with an ECDSA
//! signature of the account key or through the account's EIP-1271
//! `isValidSignature` implementation.

mod ecdsa;
mod eip1271;

pub use {ecdsa::recover, eip1271::Eip1271Validator};
use {
    alloy_primitives::{Address, B256, Bytes},
    std::sync::Arc,
    thiserror::Error,
};

/// Structure used to represent a signature.
#[derive(Clone, Debug, PartialEq)]
pub struct SignatureCheck {
    pub signer: Address,
    pub hash: B256,
    pub signature: Bytes,
}

#[derive(Debug, Error)]
pub enum SignatureValidationError {
    /// The signature is invalid.
    ///
    /// Either the signature does not recover to the signer, the signer
    /// contract reverted, or it did not return the magic value.
    #[error("invalid signature")]
    Invalid,
    /// The node failed to execute the verification call.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

#[cfg_attr(any(test, feature = "test-util"), mockall::automock)]
#[async_trait::async_trait]
pub trait SignatureValidating: Send + Sync {
    async fn validate_signature(
        &self,
        check: SignatureCheck,
    ) -> Result<(), SignatureValidationError>;
}

/// Accepts signatures that recover to the signer locally and falls back to
/// asking the signer contract otherwise.
pub struct Validator {
    contract: Arc<dyn SignatureValidating>,
}

impl Validator {
    pub fn new(contract: Arc<dyn SignatureValidating>) -> Self {
        Self { contract }
    }
}

#[async_trait::async_trait]
impl SignatureValidating for Validator {
    async fn validate_signature(
        &self,
        check: SignatureCheck,
    ) -> Result<(), SignatureValidationError> {
        if !check.signer.is_zero() && recover(check.hash, &check.signature) == Some(check.signer) {
            return Ok(());
        }
        self.contract.validate_signature(check).await
    }
}
