use log::{info, warn};

use crate::account_store::{AccountStore, HashMapAccountStore};
use crate::error::{LedgerError, Result};
use crate::id_generator::{IdGenerator, SequentialIdGenerator};
use crate::ledger::{render_statement, AccountLedger};
use crate::types::{Account, Amount};

/// A single request against the bank, as read from a batch file
#[derive(Debug, Clone, PartialEq)]
pub enum Operation {
    Open { owner: String },
    Deposit { account: String, amount: Amount },
    Withdraw { account: String, amount: Amount },
    Transfer {
        account: String,
        target: String,
        amount: Amount,
    },
}

/// Owns the account store and the id generator, works on accounts by their id
pub struct Bank<S, G> {
    store: S,
    ids: G,
}

impl Bank<HashMapAccountStore, SequentialIdGenerator> {
    pub fn in_memory() -> Self {
        Self::new(HashMapAccountStore::new(), SequentialIdGenerator::new())
    }
}

impl<S: AccountStore, G: IdGenerator> Bank<S, G> {
    pub fn new(store: S, ids: G) -> Self {
        Self { store, ids }
    }

    /// Create and persist an empty account for the given owner
    pub fn open_account(&mut self, owner: &str) -> Result<Account> {
        let owner = owner.trim();
        if owner.is_empty() {
            return Err(LedgerError::EmptyOwnerName);
        }

        let account = Account::new(self.ids.next_account_id(), owner);
        self.store.save_account(&account)?;
        info!("Opened account (id = {}, owner = {})", account.id, owner);

        Ok(account)
    }

    /// Deposit into an account, returns the new balance
    pub fn deposit(&mut self, id: &str, amount: Amount) -> Result<Amount> {
        let mut account = self.store.load_account(id)?;
        let mut ledger = AccountLedger::new(&mut account, &mut self.store, &self.ids);
        ledger.deposit(amount)?;
        Ok(ledger.balance())
    }

    /// Withdraw from an account, returns the new balance
    pub fn withdraw(&mut self, id: &str, amount: Amount) -> Result<Amount> {
        let mut account = self.store.load_account(id)?;
        let mut ledger = AccountLedger::new(&mut account, &mut self.store, &self.ids);
        ledger.withdraw(amount)?;
        Ok(ledger.balance())
    }

    /// Transfer between two accounts, returns the new balance of the source
    pub fn transfer(&mut self, from: &str, to: &str, amount: Amount) -> Result<Amount> {
        let mut source = self.store.load_account(from)?;
        let mut target = self.store.load_account(to)?;
        let mut ledger = AccountLedger::new(&mut source, &mut self.store, &self.ids);
        ledger.transfer(&mut target, amount)?;
        Ok(ledger.balance())
    }

    pub fn balance(&self, id: &str) -> Result<Amount> {
        Ok(self.store.load_account(id)?.balance)
    }

    pub fn account(&self, id: &str) -> Result<Account> {
        self.store.load_account(id)
    }

    pub fn statement(&self, id: &str) -> Result<String> {
        Ok(render_statement(&self.store.load_account(id)?))
    }

    /// All accounts, ordered by id
    pub fn accounts(&self) -> Result<Vec<Account>> {
        let mut accounts = self.store.all_accounts()?;
        accounts.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(accounts)
    }

    fn handle_operation(&mut self, operation: Operation) -> Result<()> {
        match operation {
            Operation::Open { owner } => self.open_account(&owner).map(|_| ()),
            Operation::Deposit { account, amount } => self.deposit(&account, amount).map(|_| ()),
            Operation::Withdraw { account, amount } => {
                self.withdraw(&account, amount).map(|_| ())
            }
            Operation::Transfer {
                account,
                target,
                amount,
            } => self.transfer(&account, &target, amount).map(|_| ()),
        }
    }

    /// Handle all given operations
    /// This method is infallible, all bogus operations are skipped, errors will be logged.
    pub fn handle_operations(
        &mut self,
        operations: impl Iterator<Item = anyhow::Result<Operation>>,
    ) {
        for (line, operation) in operations.enumerate() {
            let result = operation.and_then(|operation| Ok(self.handle_operation(operation)?));
            if let Err(err) = result {
                warn!("Skipping operation (record = {}): {}", line + 1, err);
            }
        }
    }
}
