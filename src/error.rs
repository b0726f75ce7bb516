use thiserror::Error;

use crate::types::{AccountId, Amount};

/// Everything that can make a ledger operation fail
#[derive(Error, Debug)]
pub enum LedgerError {
    /// Zero or negative amount given to a balance-changing operation
    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds { requested: Amount, available: Amount },

    /// The resulting balance would not fit into an `Amount`
    #[error("Amount too large: balance {balance} cannot take {amount} more")]
    AmountOverflow { balance: Amount, amount: Amount },

    #[error("Cannot transfer to the same account")]
    SameAccountTransfer,

    #[error("Account not found: {0}")]
    AccountNotFound(AccountId),

    #[error("Owner name must not be empty")]
    EmptyOwnerName,

    /// Backend specific failure, passed through unchanged
    #[error("Storage error: {0}")]
    Storage(#[from] anyhow::Error),
}

pub type Result<T> = std::result::Result<T, LedgerError>;
