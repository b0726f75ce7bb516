use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::types::{AccountId, TransactionId};

/// Hands out process-wide unique identifiers
///
/// A single generator must be shared by everything that creates transactions, otherwise
/// uniqueness across accounts cannot be guaranteed.
pub trait IdGenerator {
    fn next_transaction_id(&self) -> TransactionId;

    fn next_account_id(&self) -> AccountId;
}

/// Monotonic counters, formatted as `TXN00000001` and `ACC00000001`
#[derive(Debug, Default)]
pub struct SequentialIdGenerator {
    transactions: AtomicU64,
    accounts: AtomicU64,
}

impl SequentialIdGenerator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdGenerator for SequentialIdGenerator {
    fn next_transaction_id(&self) -> TransactionId {
        let n = self.transactions.fetch_add(1, Ordering::Relaxed) + 1;
        format!("TXN{:08}", n)
    }

    fn next_account_id(&self) -> AccountId {
        let n = self.accounts.fetch_add(1, Ordering::Relaxed) + 1;
        format!("ACC{:08}", n)
    }
}

/// Random (UUID v4) identifiers, unique without any shared counter
#[derive(Debug, Default)]
pub struct RandomIdGenerator;

impl IdGenerator for RandomIdGenerator {
    fn next_transaction_id(&self) -> TransactionId {
        format!("TXN-{}", Uuid::new_v4())
    }

    fn next_account_id(&self) -> AccountId {
        format!("ACC-{}", Uuid::new_v4())
    }
}

impl<G: IdGenerator + ?Sized> IdGenerator for Box<G> {
    fn next_transaction_id(&self) -> TransactionId {
        (**self).next_transaction_id()
    }

    fn next_account_id(&self) -> AccountId {
        (**self).next_account_id()
    }
}
