use anyhow::{anyhow, Result};
use std::path::PathBuf;

/// How identifiers for new accounts and transactions are produced
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IdStrategy {
    Sequential,
    Random,
}

/// Command-line configuration: `bank-ledger [--random-ids] [BATCH_FILE]`
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub id_strategy: IdStrategy,
    /// Run the operations of this CSV file instead of the interactive menu
    pub batch_file: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::Sequential,
            batch_file: None,
        }
    }
}

impl Config {
    /// Parse the arguments, the executable name must already be skipped
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self> {
        let mut config = Config::default();

        for arg in args {
            match arg.as_str() {
                "--random-ids" => config.id_strategy = IdStrategy::Random,
                flag if flag.starts_with("--") => {
                    return Err(anyhow!("Unknown option '{}'", flag));
                }
                path => {
                    if config.batch_file.is_some() {
                        return Err(anyhow!("Only one input file is supported"));
                    }
                    config.batch_file = Some(PathBuf::from(path));
                }
            }
        }

        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|arg| arg.to_string()).collect()
    }

    #[test]
    fn no_arguments() {
        assert_eq!(Config::from_args(args(&[])).unwrap(), Config::default());
    }

    #[test]
    fn batch_file_and_random_ids() {
        let config = Config::from_args(args(&["ops.csv", "--random-ids"])).unwrap();
        assert_eq!(config.id_strategy, IdStrategy::Random);
        assert_eq!(config.batch_file, Some(PathBuf::from("ops.csv")));
    }

    #[test]
    fn rejects_unknown_flag_and_extra_file() {
        Config::from_args(args(&["--verbose"])).unwrap_err();
        Config::from_args(args(&["a.csv", "b.csv"])).unwrap_err();
    }
}
