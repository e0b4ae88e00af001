use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::model::{ConfigFile, SavedQuery, SortOrder, StateFile};

mod state;
pub use self::state::{load_state, save_state, store_secret};

const CONFIG_DIR_ENV: &str = "JIRA_UI_CONFIG_DIR";
const CONFIG_DIR_NAME: &str = ".jira.d";

pub const DEFAULT_TEMPLATE: &str = "jira_ui_view";
pub const DEFAULT_QUERY_FIELDS: &str = "summary,status,assignee,labels";

/// Values given on the command line; `None` means "not given".
#[derive(Clone, Debug, Default)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub user: Option<String>,
    pub template: Option<String>,
    pub max_wrap: Option<u64>,
    pub query: Option<String>,
    pub queryfields: Option<String>,
    pub skip_login: bool,
    pub boxed: bool,
}

/// Effective options: `config.json` merged under the CLI flags.
#[derive(Clone, Debug, Default)]
pub struct Options {
    pub config_dir: PathBuf,
    pub endpoint: Option<String>,
    pub user: Option<String>,
    pub template: String,
    pub max_wrap: Option<u64>,
    pub query: Option<String>,
    pub queryfields: String,
    pub skip_login: bool,
    pub boxed: bool,
    pub queries: Vec<SavedQuery>,
    pub sort_orders: Vec<SortOrder>,
}

pub fn default_config_dir() -> PathBuf {
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV)
        && !dir.is_empty()
    {
        return PathBuf::from(dir);
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(CONFIG_DIR_NAME)
}

pub fn read_config_file(config_dir: &Path) -> Result<ConfigFile> {
    let path = config_dir.join("config.json");
    if !path.exists() {
        return Ok(ConfigFile::default());
    }
    let bytes = fs::read(&path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

impl Options {
    pub fn load(config_dir: PathBuf, cli: CliOverrides) -> Result<Self> {
        let file = read_config_file(&config_dir)?;
        Ok(Self::resolve(config_dir, file, cli))
    }

    pub fn resolve(config_dir: PathBuf, file: ConfigFile, cli: CliOverrides) -> Self {
        let queries = if file.queries.is_empty() {
            SavedQuery::defaults()
        } else {
            file.queries
        };
        let sort_orders = if file.sort_orders.is_empty() {
            SortOrder::defaults()
        } else {
            file.sort_orders
        };

        Self {
            config_dir,
            endpoint: cli
                .endpoint
                .or(file.endpoint)
                .map(|e| e.trim_end_matches('/').to_string()),
            user: cli.user.or(file.user),
            template: cli
                .template
                .or(file.template)
                .unwrap_or_else(|| DEFAULT_TEMPLATE.to_string()),
            max_wrap: cli.max_wrap.or(file.max_wrap),
            query: cli.query,
            queryfields: cli
                .queryfields
                .or(file.queryfields)
                .unwrap_or_else(|| DEFAULT_QUERY_FIELDS.to_string()),
            skip_login: cli.skip_login,
            boxed: cli.boxed,
            queries,
            sort_orders,
        }
    }

    pub fn state_path(&self) -> PathBuf {
        self.config_dir.join("state.json")
    }

    pub fn log_path(&self) -> PathBuf {
        self.config_dir.join("jira-ui.log")
    }

    pub fn query_fields(&self) -> Vec<String> {
        self.queryfields
            .split(',')
            .map(|f| f.trim().to_string())
            .filter(|f| !f.is_empty())
            .collect()
    }

    /// Options as a loosely typed map, the shape pages read them in.
    pub fn as_map(&self) -> BTreeMap<String, Value> {
        let mut out = BTreeMap::new();
        if let Some(endpoint) = &self.endpoint {
            out.insert("endpoint".to_string(), json!(endpoint));
        }
        if let Some(user) = &self.user {
            out.insert("user".to_string(), json!(user));
        }
        out.insert("template".to_string(), json!(self.template));
        if let Some(max_wrap) = self.max_wrap {
            out.insert("max_wrap".to_string(), json!(max_wrap));
        }
        if let Some(query) = &self.query {
            out.insert("query".to_string(), json!(query));
        }
        out.insert("queryfields".to_string(), json!(self.query_fields()));
        out.insert("skip_login".to_string(), json!(self.skip_login));
        out.insert("boxed".to_string(), json!(self.boxed));
        out.insert("queries".to_string(), json!(self.queries));
        out.insert("sort_orders".to_string(), json!(self.sort_orders));
        out
    }

    pub fn load_state(&self) -> Result<StateFile> {
        load_state(&self.state_path())
    }
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
