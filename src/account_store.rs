use log::debug;
use std::collections::HashMap;

use crate::error::{LedgerError, Result};
use crate::types::{Account, AccountId};

/// Persist accounts by their identifier
pub trait AccountStore {
    /// Insert or replace the account with the same id
    /// Saving the same account twice has no further effect.
    fn save_account(&mut self, account: &Account) -> Result<()>;

    /// Look up a single account, fails with `AccountNotFound` for unknown ids
    fn load_account(&self, id: &str) -> Result<Account>;

    /// All stored accounts, in no particular order
    fn all_accounts(&self) -> Result<Vec<Account>>;
}

/// A simple RAM-backed account store using a standard Rust `HashMap`
#[derive(Debug, Default)]
pub struct HashMapAccountStore {
    data_store: HashMap<AccountId, Account>,
}

impl HashMapAccountStore {
    pub fn new() -> Self {
        Self {
            data_store: HashMap::new(),
        }
    }
}

impl<'a> IntoIterator for &'a HashMapAccountStore {
    type Item = &'a Account;

    type IntoIter = Box<dyn Iterator<Item = Self::Item> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        Box::new(self.data_store.values())
    }
}

impl AccountStore for HashMapAccountStore {
    fn save_account(&mut self, account: &Account) -> Result<()> {
        debug!(
            "Saving account (id = {}, balance = {})",
            account.id, account.balance
        );
        self.data_store.insert(account.id.clone(), account.clone());
        Ok(())
    }

    fn load_account(&self, id: &str) -> Result<Account> {
        self.data_store
            .get(id)
            .cloned()
            .ok_or_else(|| LedgerError::AccountNotFound(id.to_owned()))
    }

    fn all_accounts(&self) -> Result<Vec<Account>> {
        Ok(self.into_iter().cloned().collect())
    }
}
