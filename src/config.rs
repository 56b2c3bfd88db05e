//! Command-line and environment configuration
//!
//! Every option can also be set through an environment variable; flags on
//! the command line win.

use crate::memory::{Address, DEFAULT_START_ADDRESS};
use clap::Parser;
use log::LevelFilter;
use thiserror::Error;

/// Default number of snapshots kept for undo
pub const DEFAULT_HISTORY_LIMIT: usize = 256;

/// Configuration errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Invalid value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// How addresses are printed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddressFormat {
    /// `0x` followed by decimal digits, the classroom convention
    #[default]
    Decimal,
    /// `0x` followed by lowercase hexadecimal digits
    Hex,
}

impl AddressFormat {
    pub fn format(self, address: Address) -> String {
        match self {
            AddressFormat::Decimal => format!("0x{}", address),
            AddressFormat::Hex if address < 0 => format!("-0x{:x}", address.unsigned_abs()),
            AddressFormat::Hex => format!("0x{:x}", address),
        }
    }
}

/// Interactive call-stack visualizer
#[derive(Parser, Debug, Clone, PartialEq)]
#[command(name = "stackviz", version, about)]
pub struct Cli {
    /// Base address of the simulated region
    #[arg(
        long,
        env = "STACKVIZ_START_ADDRESS",
        default_value_t = DEFAULT_START_ADDRESS,
        allow_negative_numbers = true
    )]
    pub start_address: Address,

    /// Number of snapshots kept for undo/redo
    #[arg(long, env = "STACKVIZ_HISTORY_LIMIT", default_value_t = DEFAULT_HISTORY_LIMIT)]
    pub history_limit: usize,

    /// Minimum level shown in the event log (off, error, warn, info, debug, trace)
    #[arg(long, env = "STACKVIZ_LOG", default_value_t = LevelFilter::Info)]
    pub log_level: LevelFilter,

    /// Print addresses in hexadecimal
    #[arg(long)]
    pub hex: bool,
}

impl Cli {
    /// Reject settings clap cannot express
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "history-limit".to_string(),
                reason: "must keep at least one snapshot".to_string(),
            });
        }
        Ok(())
    }

    pub fn address_format(&self) -> AddressFormat {
        if self.hex {
            AddressFormat::Hex
        } else {
            AddressFormat::Decimal
        }
    }
}
