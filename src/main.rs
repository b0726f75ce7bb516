#![forbid(unsafe_code)]

use anyhow::Result;
use log::info;

use bank_ledger::{
    config::{Config, IdStrategy},
    csv_parser::iter_operations,
    csv_writer::write_accounts,
    id_generator::{IdGenerator, RandomIdGenerator, SequentialIdGenerator},
    menu::Menu,
    Bank, HashMapAccountStore,
};

fn main() -> Result<()> {
    pretty_env_logger::init();

    let config = Config::from_args(std::env::args().skip(1))?; // skip executable name

    let ids: Box<dyn IdGenerator> = match config.id_strategy {
        IdStrategy::Sequential => Box::new(SequentialIdGenerator::new()),
        IdStrategy::Random => Box::new(RandomIdGenerator),
    };
    let mut bank = Bank::new(HashMapAccountStore::new(), ids);

    match config.batch_file {
        Some(path) => {
            info!("Running batch file {}", path.display());
            let file = std::fs::File::open(path)?;
            bank.handle_operations(iter_operations(file));

            let accounts = bank.accounts()?;
            let mut stdout = std::io::stdout();
            write_accounts(&mut stdout, accounts.iter())?;
        }
        None => {
            let stdin = std::io::stdin();
            Menu::new(&mut bank, stdin.lock(), std::io::stdout()).run()?;
        }
    }

    Ok(())
}
