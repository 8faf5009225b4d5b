use serde::{Deserialize, Serialize};

/// Moment-style pattern used when the account has no preference.
pub const DEFAULT_DATE_FORMAT: &str = "MMM D, YYYY";

#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Client {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
}

/// Account-wide preferences that travel with every statement.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Account {
    /// Date pattern for the presentation layer (e.g. "MMM D, YYYY")
    #[serde(default)]
    pub date_format: Option<String>,
}

impl Account {
    pub fn date_format(&self) -> &str {
        self.date_format.as_deref().unwrap_or(DEFAULT_DATE_FORMAT)
    }
}
