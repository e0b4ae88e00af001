use serde::{Deserialize, Serialize};

use super::{SavedQuery, SortOrder};

/// On-disk `config.json`. Every field is optional; CLI flags win over it.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default)]
    pub user: Option<String>,

    #[serde(default)]
    pub template: Option<String>,

    /// Maximum word-wrap width for ticket text; 0 means "terminal width".
    #[serde(default)]
    pub max_wrap: Option<u64>,

    /// Comma separated list of fields shown on the ticket list.
    #[serde(default)]
    pub queryfields: Option<String>,

    #[serde(default)]
    pub queries: Vec<SavedQuery>,

    #[serde(default)]
    pub sort_orders: Vec<SortOrder>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct StateFile {
    pub version: u32,

    /// Secret per endpoint (API token or password).
    #[serde(default)]
    pub tokens: std::collections::HashMap<String, String>,
}
