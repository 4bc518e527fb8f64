use soroban_sdk::{log, Env};

#[soroban_sdk::contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum ContractError {
    NotInitialized = 1,
    AlreadyInitialized = 2,
    Unauthorized = 3,
    InvalidPlan = 4,
    BelowMinimumDeposit = 5,
    InvalidDepositId = 6,
    DepositAlreadyTaken = 7,
    ExceedsAdminTokens = 8,
    InsufficientRewards = 9,
    InvalidAmount = 10,
    MathOverflow = 11,
}

impl ContractError {
    /// Fixed human-readable revert reason for this error.
    pub fn reason(&self) -> &'static str {
        match self {
            ContractError::NotInitialized => "Contract is not initialized",
            ContractError::AlreadyInitialized => "Contract is already initialized",
            ContractError::Unauthorized => "Ownable: caller is not the owner",
            ContractError::InvalidPlan => "Invalid plan",
            ContractError::BelowMinimumDeposit => "min limit 0.001 is required",
            ContractError::InvalidDepositId => "Invalid depositId",
            ContractError::DepositAlreadyTaken => "deposit is already taken",
            ContractError::ExceedsAdminTokens => "Admin can withdraw less than adminTokens amount",
            ContractError::InsufficientRewards => "Not enough reward tokens for dividends",
            ContractError::InvalidAmount => "Amount must not be negative",
            ContractError::MathOverflow => "Arithmetic overflow",
        }
    }
}

/// Log a rejection and hand the error back for returning.
pub(crate) fn reject(env: &Env, err: ContractError) -> ContractError {
    log!(env, "stacking: rejected with code {}", err as u32);
    err
}
