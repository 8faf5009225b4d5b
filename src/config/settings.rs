use serde::{Deserialize, Serialize};

use crate::records::Account;
use crate::statement::StatusFilter;

#[derive(Debug, Deserialize, Serialize, Default)]
pub struct Config {
    #[serde(default)]
    pub account: Account,
    #[serde(default)]
    pub statement: StatementDefaults,
}

/// Fallbacks for the selection flags of `generate` and `show`
#[derive(Debug, Deserialize, Serialize, Default, Clone, Copy, PartialEq)]
pub struct StatementDefaults {
    #[serde(default)]
    pub status: StatusFilter,
    #[serde(default)]
    pub show_payments: bool,
    #[serde(default)]
    pub show_aging: bool,
}
