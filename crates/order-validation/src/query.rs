//! Read-only queries against external contracts.
//!
//! Any query may fail: the contract can revert, answer with data that does
//! not decode, or the node may not answer at all. None of these failures may
//! abort a validation, so every collaborator returns a [`Query`] and the
//! checkers decide through [`QueryExt`] which conservative value stands in
//! for a failed query.

use {
    alloy::{contract::Error as ContractError, transports::TransportError},
    ethrpc::alloy::errors::ContractErrorExt,
    thiserror::Error,
};

#[derive(Debug, Error)]
pub enum QueryError {
    #[error("call reverted")]
    Reverted,
    #[error("malformed return data")]
    Malformed,
    #[error(transparent)]
    Transport(anyhow::Error),
}

pub type Query<T> = Result<T, QueryError>;

impl From<ContractError> for QueryError {
    fn from(err: ContractError) -> Self {
        match err {
            ContractError::ZeroData(..) | ContractError::AbiError(_) => Self::Malformed,
            err if err.is_node_error() => Self::Transport(err.into()),
            _ => Self::Reverted,
        }
    }
}

impl From<TransportError> for QueryError {
    fn from(err: TransportError) -> Self {
        Self::Transport(err.into())
    }
}

pub trait QueryExt<T> {
    /// The queried value, or `T::default()` (`false`, zero, the null
    /// address) if the query failed.
    fn or_conservative(self, probe: &'static str) -> T
    where
        T: Default;

    /// Whether the query succeeded and its value satisfies `condition`. A
    /// failed query never confirms anything.
    fn confirms(self, probe: &'static str, condition: impl FnOnce(&T) -> bool) -> bool;
}

impl<T> QueryExt<T> for Query<T> {
    fn or_conservative(self, probe: &'static str) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(|err| {
            tracing::debug!(probe, ?err, "query failed");
            T::default()
        })
    }

    fn confirms(self, probe: &'static str, condition: impl FnOnce(&T) -> bool) -> bool {
        match self {
            Ok(value) => condition(&value),
            Err(err) => {
                tracing::debug!(probe, ?err, "query failed");
                false
            }
        }
    }
}
