use anyhow::Result;
use std::io::{BufRead, Write};
use std::str::FromStr;

use crate::account_store::AccountStore;
use crate::bank::Bank;
use crate::error::LedgerError;
use crate::id_generator::IdGenerator;
use crate::types::{AccountId, Amount};

const MENU: &str = "
BANKING OPERATIONS
1. Open account
2. Deposit
3. Withdraw
4. Transfer
5. Balance
6. Statement
7. All accounts
8. Exit";

/// Line-oriented text interface on top of a `Bank`
///
/// Opening an account selects it; while nothing is selected, every operation first asks
/// for an account id. Ledger errors are printed and the menu continues, only I/O errors
/// end the session early. End of input ends it regularly.
pub struct Menu<'b, R, W, S, G> {
    bank: &'b mut Bank<S, G>,
    input: R,
    output: W,
    current: Option<AccountId>,
}

impl<'b, R, W, S, G> Menu<'b, R, W, S, G>
where
    R: BufRead,
    W: Write,
    S: AccountStore,
    G: IdGenerator,
{
    pub fn new(bank: &'b mut Bank<S, G>, input: R, output: W) -> Self {
        Self {
            bank,
            input,
            output,
            current: None,
        }
    }

    pub fn run(mut self) -> Result<()> {
        loop {
            writeln!(self.output, "{}", MENU)?;
            write!(self.output, "Choose: ")?;
            self.output.flush()?;

            let choice = match self.read_line()? {
                Some(choice) => choice,
                None => return Ok(()),
            };

            match choice.as_str() {
                "1" => self.open_account()?,
                "2" => self.deposit()?,
                "3" => self.withdraw()?,
                "4" => self.transfer()?,
                "5" => self.balance()?,
                "6" => self.statement()?,
                "7" => self.list_accounts()?,
                "8" => {
                    writeln!(self.output, "Exiting...")?;
                    return Ok(());
                }
                _ => writeln!(self.output, "Invalid choice")?,
            }
        }
    }

    fn open_account(&mut self) -> Result<()> {
        let owner = self.prompt("Owner name: ")?;
        let result = self.bank.open_account(&owner);
        if let Some(account) = self.report(result)? {
            writeln!(self.output, "Account created: {}", account.id)?;
            self.current = Some(account.id);
        }
        Ok(())
    }

    fn deposit(&mut self) -> Result<()> {
        let id = match self.current_account("Account ID: ")? {
            Some(id) => id,
            None => return Ok(()),
        };
        if let Some(amount) = self.read_amount()? {
            let result = self.bank.deposit(&id, amount);
            if let Some(balance) = self.report(result)? {
                writeln!(self.output, "Done. Balance: {:.2}", balance)?;
            }
        }
        Ok(())
    }

    fn withdraw(&mut self) -> Result<()> {
        let id = match self.current_account("Account ID: ")? {
            Some(id) => id,
            None => return Ok(()),
        };
        if let Some(amount) = self.read_amount()? {
            let result = self.bank.withdraw(&id, amount);
            if let Some(balance) = self.report(result)? {
                writeln!(self.output, "Done. Balance: {:.2}", balance)?;
            }
        }
        Ok(())
    }

    fn transfer(&mut self) -> Result<()> {
        let id = match self.current_account("Your account ID: ")? {
            Some(id) => id,
            None => return Ok(()),
        };

        let target = self.prompt("Recipient account ID: ")?;
        let lookup = self.bank.account(&target);
        if self.report(lookup)?.is_none() {
            return Ok(());
        }

        if let Some(amount) = self.read_amount()? {
            let result = self.bank.transfer(&id, &target, amount);
            if let Some(balance) = self.report(result)? {
                writeln!(self.output, "Transfer complete. New balance: {:.2}", balance)?;
            }
        }
        Ok(())
    }

    fn balance(&mut self) -> Result<()> {
        let id = match self.current_account("Account ID: ")? {
            Some(id) => id,
            None => return Ok(()),
        };
        let result = self.bank.account(&id);
        if let Some(account) = self.report(result)? {
            writeln!(self.output, "Account: {}", account.id)?;
            writeln!(self.output, "Owner: {}", account.owner_name)?;
            writeln!(self.output, "Balance: {:.2}", account.balance)?;
        }
        Ok(())
    }

    fn statement(&mut self) -> Result<()> {
        let id = match self.current_account("Account ID: ")? {
            Some(id) => id,
            None => return Ok(()),
        };
        let result = self.bank.statement(&id);
        if let Some(statement) = self.report(result)? {
            write!(self.output, "{}", statement)?;
        }
        Ok(())
    }

    fn list_accounts(&mut self) -> Result<()> {
        let result = self.bank.accounts();
        if let Some(accounts) = self.report(result)? {
            if accounts.is_empty() {
                writeln!(self.output, "No accounts")?;
            }
            for account in accounts {
                writeln!(
                    self.output,
                    "{}: {} - {:.2}",
                    account.id, account.owner_name, account.balance
                )?;
            }
        }
        Ok(())
    }

    /// The selected account, asking for (and selecting) one if there is none yet
    fn current_account(&mut self, question: &str) -> Result<Option<AccountId>> {
        if let Some(id) = &self.current {
            return Ok(Some(id.clone()));
        }

        let id = self.prompt(question)?;
        let lookup = self.bank.account(&id).map(|account| account.id);
        let found = self.report(lookup)?;
        self.current = found.clone();
        Ok(found)
    }

    fn read_amount(&mut self) -> Result<Option<Amount>> {
        let text = self.prompt("Amount: ")?;
        let amount = Amount::from_str(&text).map_err(|_| LedgerError::InvalidAmount);
        self.report(amount)
    }

    /// Print a failed ledger operation, keep the value of a successful one
    fn report<T>(&mut self, result: Result<T, LedgerError>) -> Result<Option<T>> {
        match result {
            Ok(value) => Ok(Some(value)),
            Err(err) => {
                writeln!(self.output, "Error: {}", err)?;
                Ok(None)
            }
        }
    }

    /// Missing input reads as an empty answer
    fn prompt(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        Ok(self.read_line()?.unwrap_or_default())
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use std::io::Cursor;

    fn run_script<S, G>(bank: &mut Bank<S, G>, script: &str) -> String
    where
        S: AccountStore,
        G: IdGenerator,
    {
        let mut output = vec![];
        Menu::new(bank, Cursor::new(script.as_bytes()), &mut output)
            .run()
            .unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn open_deposit_overdraw() {
        let mut bank = Bank::in_memory();

        let output = run_script(&mut bank, "1\nAlice\n2\n100\n3\n150\n5\n8\n");

        assert!(output.contains("Account created: ACC00000001"));
        assert!(output.contains("Done. Balance: 100.00"));
        assert!(output.contains("Error: Insufficient funds: requested 150, available 100"));
        assert!(output.contains("Owner: Alice\nBalance: 100.00"));
        assert!(output.ends_with("Exiting...\n"));
        assert_eq!(bank.balance("ACC00000001").unwrap(), dec!(100));
    }

    #[test]
    fn transfer_from_selected_account() {
        let mut bank = Bank::in_memory();

        let output = run_script(
            &mut bank,
            "1\nAlice\n1\nBob\n2\n50\n4\nACC00000001\n20\n4\nACC00000002\n5\n",
        );

        assert!(output.contains("Transfer complete. New balance: 30.00"));
        assert!(output.contains("Error: Cannot transfer to the same account"));
        assert_eq!(bank.balance("ACC00000001").unwrap(), dec!(20));
        assert_eq!(bank.balance("ACC00000002").unwrap(), dec!(30));
    }

    #[test]
    fn transfer_to_unknown_account() {
        let mut bank = Bank::in_memory();

        let output = run_script(&mut bank, "1\nAlice\n2\n10\n4\nACC00000042\n");

        assert!(output.contains("Error: Account not found: ACC00000042"));
        assert!(!output.contains("Transfer complete"));
        assert_eq!(bank.balance("ACC00000001").unwrap(), dec!(10));
    }

    #[test]
    fn unknown_account_is_not_selected() {
        let mut bank = Bank::in_memory();

        let output = run_script(&mut bank, "2\nACC00000009\n7\n");

        assert!(output.contains("Error: Account not found: ACC00000009"));
        assert!(!output.contains("Amount: "));
        assert!(output.contains("No accounts"));
    }

    #[test]
    fn invalid_input() {
        let mut bank = Bank::in_memory();

        let output = run_script(&mut bank, "1\n\n1\nAlice\n2\nabc\n3\n-5\n9\n");

        assert!(output.contains("Error: Owner name must not be empty"));
        assert_eq!(output.matches("Error: Invalid amount").count(), 2);
        assert!(output.contains("Invalid choice"));
        assert!(bank.account("ACC00000001").unwrap().transactions.is_empty());
    }

    #[test]
    fn statement_and_listing() {
        let mut bank = Bank::in_memory();

        let output = run_script(&mut bank, "1\nAlice\n6\n2\n12.5\n7\n");

        assert!(output.contains("No transactions"));
        assert!(output.contains("ACC00000001: Alice - 12.50"));
    }
}
