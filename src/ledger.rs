use chrono::Local;
use log::{debug, info, warn};

use crate::account_store::AccountStore;
use crate::error::{LedgerError, Result};
use crate::id_generator::IdGenerator;
use crate::types::{Account, AccountId, Amount, Transaction, TransactionKind};

const STATEMENT_RULE: &str = "================================";
const TIMESTAMP_FORMAT: &str = "%d.%m.%Y %H:%M";

/// Applies deposits, withdrawals and transfers to a single account
///
/// Every operation validates first and only then touches the account, so a rejected
/// operation leaves balance and history exactly as they were. Balance and history are
/// always changed together before the account is handed to the store.
pub struct AccountLedger<'a, S: ?Sized, G: ?Sized> {
    account: &'a mut Account,
    store: &'a mut S,
    ids: &'a G,
}

impl<'a, S, G> AccountLedger<'a, S, G>
where
    S: AccountStore + ?Sized,
    G: IdGenerator + ?Sized,
{
    pub fn new(account: &'a mut Account, store: &'a mut S, ids: &'a G) -> Self {
        Self {
            account,
            store,
            ids,
        }
    }

    /// The bound account in its current in-memory state
    pub fn account(&self) -> &Account {
        &*self.account
    }

    pub fn deposit(&mut self, amount: Amount) -> Result<()> {
        ensure_positive(amount)?;
        let balance = credited(&*self.account, amount)?;

        self.account.balance = balance;
        let transaction = self.new_transaction(
            TransactionKind::Deposit,
            amount,
            None,
            format!("Deposit: {:.2}", amount),
        );
        self.account.transactions.push(transaction);
        debug!("Deposited {} (account = {})", amount, self.account.id);

        self.store.save_account(&*self.account)
    }

    pub fn withdraw(&mut self, amount: Amount) -> Result<()> {
        ensure_positive(amount)?;
        ensure_funds(&*self.account, amount)?;

        self.account.balance -= amount;
        let transaction = self.new_transaction(
            TransactionKind::Withdraw,
            amount,
            None,
            format!("Withdrawal: {:.2}", amount),
        );
        self.account.transactions.push(transaction);
        debug!("Withdrew {} (account = {})", amount, self.account.id);

        self.store.save_account(&*self.account)
    }

    /// Move funds from the bound account to `target`
    ///
    /// Both accounts are saved one after the other without any rollback: when saving the
    /// target fails, the source is already persisted as debited and both in-memory accounts
    /// stay mutated. The error is reported to the caller.
    pub fn transfer(&mut self, target: &mut Account, amount: Amount) -> Result<()> {
        if target.id == self.account.id {
            return Err(LedgerError::SameAccountTransfer);
        }
        ensure_positive(amount)?;
        ensure_funds(&*self.account, amount)?;
        let target_balance = credited(target, amount)?;

        self.account.balance -= amount;
        let outgoing = self.new_transaction(
            TransactionKind::TransferOut,
            amount,
            Some(target.id.clone()),
            format!("Transfer to {}: {:.2}", target.id, amount),
        );
        self.account.transactions.push(outgoing);

        target.balance = target_balance;
        let incoming = self.new_transaction(
            TransactionKind::TransferIn,
            amount,
            Some(self.account.id.clone()),
            format!("Transfer from {}: {:.2}", self.account.id, amount),
        );
        target.transactions.push(incoming);

        info!(
            "Transferring {} (from = {}, to = {})",
            amount, self.account.id, target.id
        );

        self.store.save_account(&*self.account)?;
        self.store.save_account(target).map_err(|err| {
            warn!(
                "Source saved but target not, ledger is inconsistent (from = {}, to = {})",
                self.account.id, target.id
            );
            err
        })
    }

    pub fn balance(&self) -> Amount {
        self.account.balance
    }

    /// Human readable report of the account and its full history
    pub fn statement(&self) -> String {
        render_statement(&*self.account)
    }

    fn new_transaction(
        &self,
        kind: TransactionKind,
        amount: Amount,
        counterparty: Option<AccountId>,
        description: String,
    ) -> Transaction {
        let (from, to) = match kind {
            TransactionKind::TransferIn => (counterparty, None),
            TransactionKind::TransferOut => (None, counterparty),
            TransactionKind::Deposit | TransactionKind::Withdraw => (None, None),
        };

        Transaction {
            id: self.ids.next_transaction_id(),
            kind,
            amount,
            timestamp: Local::now(),
            from,
            to,
            description,
        }
    }
}

fn ensure_positive(amount: Amount) -> Result<()> {
    if amount <= Amount::ZERO {
        return Err(LedgerError::InvalidAmount);
    }
    Ok(())
}

fn credited(account: &Account, amount: Amount) -> Result<Amount> {
    account
        .balance
        .checked_add(amount)
        .ok_or(LedgerError::AmountOverflow {
            balance: account.balance,
            amount,
        })
}

fn ensure_funds(account: &Account, amount: Amount) -> Result<()> {
    if amount > account.balance {
        return Err(LedgerError::InsufficientFunds {
            requested: amount,
            available: account.balance,
        });
    }
    Ok(())
}

/// Render the statement of any account, see `AccountLedger::statement`
pub fn render_statement(account: &Account) -> String {
    let mut out = format!(
        "{rule}\nAccount: {}\nOwner: {}\nBalance: {:.2}\nTransactions:\n",
        account.id,
        account.owner_name,
        account.balance,
        rule = STATEMENT_RULE
    );

    if account.transactions.is_empty() {
        out.push_str("No transactions\n");
    }
    for transaction in &account.transactions {
        out.push_str(&format!(
            "{} {}\n",
            transaction.timestamp.format(TIMESTAMP_FORMAT),
            transaction.description
        ));
    }

    out.push_str(STATEMENT_RULE);
    out.push('\n');
    out
}
