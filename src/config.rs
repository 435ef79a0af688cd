//! Runtime configuration for the vanity address generator.

use clap::Parser;

use crate::coordinator::SearchOptions;
use crate::crypto::{is_address_char, ADDRESS_LEN, DEFAULT_CANDIDATE_BYTES};
use crate::worker::DEFAULT_REPORT_INTERVAL;

const AFTER_HELP: &str = "\
Examples:
  krist-vanity test 4        Find 4 wallets whose address ends in \"test\"
  krist-vanity test,foo 4    Find 4 wallets ending in either \"test\" or \"foo\"
  KWG_THREADS=1 krist-vanity test 4
                             Same as the first example on a single worker

By default one worker runs per CPU core. Running more workers than cores
gives diminishing returns, or none at all.";

/// Krist Wallet Generator - find passwords for Krist wallets whose address
/// ends with a chosen suffix.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None, after_help = AFTER_HELP)]
#[command(arg_required_else_help = true)]
pub struct Config {
    /// Suffixes to search for, comma separated (any one of them matches)
    pub targets: String,

    /// Stop after finding N wallets
    #[arg(default_value_t = 1)]
    pub count: usize,

    /// Number of worker threads (default: number of CPU cores)
    #[arg(short = 'w', long, env = "KWG_THREADS")]
    pub workers: Option<usize>,

    /// Candidates each worker tests between throughput samples
    #[arg(short = 'r', long, env = "KWG_REPORT_INTERVAL", default_value_t = DEFAULT_REPORT_INTERVAL)]
    pub report_interval: u64,

    /// Random bytes per candidate password
    #[arg(short = 'b', long, env = "KWG_BYTES", default_value_t = DEFAULT_CANDIDATE_BYTES)]
    pub bytes: usize,
}

impl Config {
    /// Returns the number of workers, defaulting to CPU count
    pub fn worker_count(&self) -> usize {
        self.workers.unwrap_or_else(num_cpus::get)
    }

    /// Returns the individual search terms
    pub fn terms(&self) -> Vec<String> {
        self.targets.split(',').map(str::to_owned).collect()
    }

    /// Validates the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.targets.is_empty() {
            return Err(ConfigError::NoTargets);
        }

        for term in self.terms() {
            if term.is_empty() {
                return Err(ConfigError::InvalidTarget(
                    term,
                    "search terms cannot be empty".into(),
                ));
            }
            if !term.chars().all(is_address_char) {
                return Err(ConfigError::InvalidTarget(
                    term,
                    "addresses only contain 0-9 and lowercase a-z".into(),
                ));
            }
            if term.len() > ADDRESS_LEN {
                return Err(ConfigError::InvalidTarget(
                    term,
                    format!("addresses are only {} characters long", ADDRESS_LEN),
                ));
            }
        }

        if self.count == 0 {
            return Err(ConfigError::Zero("count"));
        }
        if self.worker_count() == 0 {
            return Err(ConfigError::Zero("workers"));
        }
        if self.report_interval == 0 {
            return Err(ConfigError::Zero("report interval"));
        }
        if self.bytes == 0 {
            return Err(ConfigError::Zero("bytes"));
        }

        Ok(())
    }

    /// Converts into the coordinator's options
    pub fn search_options(&self) -> SearchOptions {
        SearchOptions::new(self.terms())
            .with_target(self.count)
            .with_workers(self.worker_count())
            .with_report_interval(self.report_interval)
            .with_candidate_bytes(self.bytes)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("No search terms given")]
    NoTargets,

    #[error("Invalid search term {0:?}: {1}")]
    InvalidTarget(String, String),

    #[error("{0} must be at least 1")]
    Zero(&'static str),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_test_config(targets: &str) -> Config {
        Config {
            targets: targets.into(),
            count: 1,
            workers: None,
            report_interval: 100,
            bytes: 32,
        }
    }

    #[test]
    fn test_valid_targets() {
        assert!(make_test_config("test").validate().is_ok());
        assert!(make_test_config("test,foo,42").validate().is_ok());
    }

    #[test]
    fn test_invalid_targets() {
        assert!(make_test_config("").validate().is_err());
        assert!(make_test_config("test,,foo").validate().is_err());
        assert!(make_test_config("Test").validate().is_err());
        assert!(make_test_config("k1234567890").validate().is_err());
    }

    #[test]
    fn test_zero_values() {
        let mut config = make_test_config("ab");
        config.count = 0;
        assert!(matches!(config.validate(), Err(ConfigError::Zero("count"))));

        let mut config = make_test_config("ab");
        config.workers = Some(0);
        assert!(matches!(config.validate(), Err(ConfigError::Zero("workers"))));

        let mut config = make_test_config("ab");
        config.bytes = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_parse_args() {
        let config = Config::try_parse_from(["krist-vanity", "test,foo", "4", "-w", "2"]).unwrap();
        assert_eq!(config.terms(), vec!["test".to_string(), "foo".to_string()]);
        assert_eq!(config.count, 4);
        assert_eq!(config.worker_count(), 2);
    }

    #[test]
    fn test_search_options() {
        let mut config = make_test_config("ab,cd");
        config.count = 3;
        config.workers = Some(5);
        config.report_interval = 50;
        config.bytes = 16;

        let options = config.search_options();
        assert_eq!(options.suffixes, vec!["ab".to_string(), "cd".to_string()]);
        assert_eq!(options.target, 3);
        assert_eq!(options.workers, 5);
        assert_eq!(options.report_interval, 50);
        assert_eq!(options.candidate_bytes, 16);
    }
}
