use anyhow::{anyhow, Result};
use serde::Deserialize;

use crate::bank::Operation;
use crate::types::Amount;

/// The different operation identifiers as in the input CSV
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RawOperationType {
    Open,
    Deposit,
    Withdraw,
    Transfer,
}

/// A single row of the input CSV, `target` and `amount` are missing for certain operations
///
/// For `open` the `account` column carries the owner name instead of an account id.
#[derive(Debug, Deserialize)]
pub struct RawOperation {
    #[serde(rename = "type")]
    operation_type: RawOperationType,

    #[serde(rename = "account")]
    account: String,

    #[serde(rename = "target")]
    target: Option<String>,

    #[serde(rename = "amount")]
    amount: Option<Amount>,
}

/// Turn a `RawOperation` into an `Operation` that can be handled in a nicer way (no optional!)
///
/// Superfluous `target` or `amount` values are silently discarded but the record is kept.
fn raw_to_operation(raw: RawOperation) -> Result<Operation> {
    let RawOperation {
        operation_type,
        account,
        target,
        amount,
    } = raw;

    match operation_type {
        RawOperationType::Open => Ok(Operation::Open { owner: account }),
        RawOperationType::Deposit => {
            let amount = amount.ok_or_else(|| anyhow!("No 'amount' for deposit ({})", account))?;
            Ok(Operation::Deposit { account, amount })
        }
        RawOperationType::Withdraw => {
            let amount =
                amount.ok_or_else(|| anyhow!("No 'amount' for withdrawal ({})", account))?;
            Ok(Operation::Withdraw { account, amount })
        }
        RawOperationType::Transfer => {
            let target =
                target.ok_or_else(|| anyhow!("No 'target' for transfer ({})", account))?;
            let amount =
                amount.ok_or_else(|| anyhow!("No 'amount' for transfer ({})", account))?;
            Ok(Operation::Transfer {
                account,
                target,
                amount,
            })
        }
    }
}

/// For each line of the input (skipping the header), read a line by line `Operation` record.
pub fn iter_operations(reader: impl std::io::Read) -> impl Iterator<Item = Result<Operation>> {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader)
        .into_deserialize()
        .map(|raw| raw.map_err(Into::into).and_then(raw_to_operation))
}
