use stacking::ContractError;
use thiserror::Error;

/// Why a model operation was refused.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Error)]
pub enum ModelError {
    /// The ledger itself rejected the call; the contract reverts the same way.
    #[error("{}", .0.reason())]
    Rejected(ContractError),

    /// The caller's wallet cannot cover a token transfer.
    #[error("insufficient token balance: needed {needed}, available {available}")]
    InsufficientFunds { needed: i128, available: i128 },
}

impl ModelError {
    /// The contract error this corresponds to, if the ledger rejected the call.
    pub fn contract_error(&self) -> Option<ContractError> {
        match self {
            ModelError::Rejected(err) => Some(*err),
            ModelError::InsufficientFunds { .. } => None,
        }
    }
}

impl From<ContractError> for ModelError {
    fn from(err: ContractError) -> Self {
        ModelError::Rejected(err)
    }
}
