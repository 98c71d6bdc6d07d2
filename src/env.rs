use crate::store::InventoryStore;
use chrono::{Local, NaiveDate};

/// Settings fixed for the lifetime of a shell session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    /// Prefix used when rendering currency amounts, e.g. `$` or `R$ `.
    pub currency_symbol: String,
    /// Reference date for expiry reports. `None` means "the local date at the
    /// time the report runs".
    pub today: Option<NaiveDate>,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            today: None,
        }
    }
}

/// Mutable state shared by every command of a shell session.
///
/// The environment contains:
/// - `store`: the inventory the commands operate on.
/// - `config`: session settings such as the currency symbol.
/// - `should_exit`: a flag the REPL loop checks to know when to terminate.
#[derive(Debug, Clone, Default)]
pub struct Environment {
    pub store: InventoryStore,
    pub config: ShellConfig,
    pub should_exit: bool,
}

impl Environment {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ShellConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    /// The date expiry reports are computed from.
    pub fn today(&self) -> NaiveDate {
        self.config
            .today
            .unwrap_or_else(|| Local::now().date_naive())
    }
}
