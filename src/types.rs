use chrono::{DateTime, Local};
use rust_decimal::Decimal;

pub type AccountId = String;

pub type TransactionId = String;

pub type Amount = Decimal;

pub type Timestamp = DateTime<Local>;

/// The kind of balance change a `Transaction` records
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    Deposit,
    Withdraw,
    TransferOut,
    TransferIn,
}

impl TransactionKind {
    /// Whether this kind of transaction increases the balance of its account
    pub fn is_credit(self) -> bool {
        matches!(self, TransactionKind::Deposit | TransactionKind::TransferIn)
    }
}

/// A single immutable balance change of an account
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    pub id: TransactionId,
    pub kind: TransactionKind,
    pub amount: Amount,
    pub timestamp: Timestamp,
    /// Source account, only set for `TransferIn`
    pub from: Option<AccountId>,
    /// Target account, only set for `TransferOut`
    pub to: Option<AccountId>,
    pub description: String,
}

impl Transaction {
    /// Amount with the sign of its effect on the balance
    pub fn signed_amount(&self) -> Amount {
        if self.kind.is_credit() {
            self.amount
        } else {
            -self.amount
        }
    }
}

/// A named balance with its full transaction history
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    pub id: AccountId,
    pub owner_name: String,
    pub balance: Amount,
    /// Append-only, in chronological order
    pub transactions: Vec<Transaction>,
    pub created_at: Timestamp,
}

impl Account {
    /// A fresh account without any funds or history
    pub fn new(id: impl Into<AccountId>, owner_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            owner_name: owner_name.into(),
            balance: Amount::ZERO,
            transactions: Vec::new(),
            created_at: Local::now(),
        }
    }

    /// Recompute the balance from the transaction history alone
    pub fn ledger_total(&self) -> Amount {
        self.transactions.iter().map(Transaction::signed_amount).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rust_decimal_macros::dec;

    fn transaction(kind: TransactionKind, amount: Amount) -> Transaction {
        Transaction {
            id: "TXN00000001".into(),
            kind,
            amount,
            timestamp: Local::now(),
            from: None,
            to: None,
            description: String::new(),
        }
    }

    #[test]
    fn new_account_is_empty() {
        let account = Account::new("ACC00000001", "Alice");
        assert_eq!(account.balance, Amount::ZERO);
        assert!(account.transactions.is_empty());
        assert_eq!(account.ledger_total(), Amount::ZERO);
    }

    #[test]
    fn signed_amounts() {
        assert_eq!(
            transaction(TransactionKind::Deposit, dec!(2)).signed_amount(),
            dec!(2)
        );
        assert_eq!(
            transaction(TransactionKind::TransferIn, dec!(2)).signed_amount(),
            dec!(2)
        );
        assert_eq!(
            transaction(TransactionKind::Withdraw, dec!(2)).signed_amount(),
            dec!(-2)
        );
        assert_eq!(
            transaction(TransactionKind::TransferOut, dec!(2)).signed_amount(),
            dec!(-2)
        );
    }

    #[test]
    fn ledger_total() {
        let mut account = Account::new("ACC00000001", "Alice");
        account
            .transactions
            .push(transaction(TransactionKind::Deposit, dec!(10.5)));
        account
            .transactions
            .push(transaction(TransactionKind::TransferOut, dec!(3)));
        assert_eq!(account.ledger_total(), dec!(7.5));
    }
}
