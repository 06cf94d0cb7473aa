use {
    super::{SignatureCheck, SignatureValidating, SignatureValidationError},
    contracts::alloy::{ERC1271, ERC1271_MAGIC_VALUE},
    ethrpc::{
        AlloyProvider,
        alloy::{ProviderLabelingExt, errors::ContractErrorExt},
    },
};

/// Verifies signatures by calling `isValidSignature` on the signer.
///
/// <https://eips.ethereum.org/EIPS/eip-1271>
pub struct Eip1271Validator {
    provider: AlloyProvider,
}

impl Eip1271Validator {
    pub fn new(provider: &AlloyProvider) -> Self {
        Self {
            provider: provider.labeled("signatureValidation"),
        }
    }
}

#[async_trait::async_trait]
impl SignatureValidating for Eip1271Validator {
    async fn validate_signature(
        &self,
        check: SignatureCheck,
    ) -> Result<(), SignatureValidationError> {
        let contract = ERC1271::Instance::new(check.signer, self.provider.clone());
        let result = contract
            .isValidSignature(check.hash, check.signature)
            .call()
            .await;

        match result {
            Ok(value) if value == ERC1271_MAGIC_VALUE => Ok(()),
            Ok(_) => Err(SignatureValidationError::Invalid),
            // Calls to accounts without code or with an incompatible ABI end
            // up here as well.
            Err(err) if err.is_contract_error() => {
                tracing::debug!(?err, "isValidSignature failed");
                Err(SignatureValidationError::Invalid)
            }
            Err(err) => Err(SignatureValidationError::Other(err.into())),
        }
    }
}
