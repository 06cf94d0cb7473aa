use alloy::{contract::Error as ContractError, transports::RpcError};

/// Splits contract call failures into failures of the called contract and
/// failures of the node serving the call.
pub trait ContractErrorExt {
    /// The call reached the contract and failed there: it reverted, returned
    /// data that does not decode, or targeted an account without code.
    fn is_contract_error(&self) -> bool;

    /// The node could not serve the call at all.
    fn is_node_error(&self) -> bool;
}

impl ContractErrorExt for ContractError {
    fn is_contract_error(&self) -> bool {
        !self.is_node_error()
    }

    fn is_node_error(&self) -> bool {
        match self {
            // Reverts surface as error responses carrying revert data. Empty
            // revert data still counts as a revert, so only look at whether
            // any data is present instead of trying to decode it.
            ContractError::TransportError(RpcError::ErrorResp(err)) => {
                let no_revert_data = err.as_revert_data().is_none();
                tracing::debug!(?err, %no_revert_data, "transport rpc error");
                no_revert_data
            }
            ContractError::TransportError(_) => true,
            _ => false,
        }
    }
}

/// An arbitrary error classified as a contract error.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_alloy_contract_error() -> ContractError {
    ContractError::NotADeploymentTransaction
}

/// An arbitrary error classified as a node error.
#[cfg(any(test, feature = "test-util"))]
pub fn testing_alloy_node_error() -> ContractError {
    ContractError::TransportError(alloy::transports::TransportError::ErrorResp(
        alloy::rpc::json_rpc::ErrorPayload::internal_error(),
    ))
}
