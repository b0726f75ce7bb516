#![forbid(unsafe_code)]

pub mod account_store;
pub mod bank;
pub mod config;
pub mod csv_parser;
pub mod csv_writer;
pub mod error;
pub mod id_generator;
pub mod ledger;
pub mod menu;
pub mod types;

pub use account_store::{AccountStore, HashMapAccountStore};
pub use bank::{Bank, Operation};
pub use error::{LedgerError, Result};
pub use ledger::AccountLedger;
pub use types::{Account, Transaction, TransactionKind};
