use anyhow::Result;
use serde::{ser::SerializeStruct, Serialize, Serializer};

use crate::types::Account;

const CREATED_AT_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

impl Serialize for Account {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut state = serializer.serialize_struct("Account", 5)?;
        state.serialize_field("id", &self.id)?;
        state.serialize_field("owner", &self.owner_name)?;
        state.serialize_field("balance", &self.balance)?;
        state.serialize_field("transactions", &self.transactions.len())?;
        state.serialize_field(
            "created_at",
            &self.created_at.format(CREATED_AT_FORMAT).to_string(),
        )?;
        state.end()
    }
}

/// Write a summary of all accounts to the provided destination (in CSV format)
pub fn write_accounts<'a>(
    destination: &mut dyn std::io::Write,
    accounts: impl Iterator<Item = &'a Account>,
) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().from_writer(destination);

    for account in accounts {
        writer.serialize(account)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::{Local, TimeZone};
    use rust_decimal_macros::dec;

    #[test]
    fn empty_list() {
        let mut buffer = vec![];
        let accounts: Vec<Account> = vec![];

        write_accounts(&mut buffer, accounts.iter()).unwrap();
        let data = String::from_utf8(buffer).unwrap();
        assert_eq!(&data, "");
    }

    #[test]
    fn single_account() {
        let mut buffer = vec![];
        let mut account = Account::new("ACC00000001", "Alice Smith");
        account.balance = dec!(12.50);
        account.created_at = Local.with_ymd_and_hms(2024, 3, 1, 9, 30, 0).unwrap();
        let accounts = vec![account];

        write_accounts(&mut buffer, accounts.iter()).unwrap();
        let data = String::from_utf8(buffer).unwrap();
        assert_eq!(
            &data,
            r#"id,owner,balance,transactions,created_at
ACC00000001,Alice Smith,12.50,0,2024-03-01 09:30:00
"#
        );
    }
}
