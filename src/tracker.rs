use std::collections::BTreeMap;
use std::fmt;

use anyhow::{Context, Result};
use serde_json::Value;

use crate::config::Options;

mod editor;
mod http_client;
mod issues;
mod types;

pub use self::http_client::StatusError;
use self::http_client::with_retries;
pub use self::types::*;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LabelAction {
    Add,
    Remove,
}

impl LabelAction {
    pub fn as_str(self) -> &'static str {
        match self {
            LabelAction::Add => "add",
            LabelAction::Remove => "remove",
        }
    }
}

impl fmt::Display for LabelAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the interactive core needs from the issue tracker.
///
/// Calls are synchronous. The core never retries; an error means the page
/// renders with whatever data it has.
pub trait Tracker {
    fn fetch_ticket(&self, id: &str) -> Result<Value>;

    fn search(&self, jql: &str, fields: &[String], max_results: usize) -> Result<Vec<Value>>;

    fn mutate_labels(&self, id: &str, action: LabelAction, labels: &[String]) -> Result<()>;

    /// Interactive edit of summary and description in `$EDITOR`.
    fn edit_ticket(&self, id: &str) -> Result<()>;

    /// Interactive comment composed in `$EDITOR`.
    fn comment_ticket(&self, id: &str) -> Result<()>;

    fn check_login(&self) -> Result<()>;

    fn store_password(&mut self, secret: &str) -> Result<()>;

    fn options(&self) -> BTreeMap<String, Value>;
}

pub struct JiraClient {
    opts: Options,
    secret: Option<String>,
    client: reqwest::blocking::Client,
}

impl JiraClient {
    pub fn new(opts: Options) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .user_agent(concat!("jira-ui/", env!("CARGO_PKG_VERSION")))
            .build()
            .context("build reqwest client")?;

        let secret = match std::env::var("JIRA_API_TOKEN") {
            Ok(token) if !token.is_empty() => Some(token),
            _ => {
                let state = opts.load_state()?;
                opts.endpoint
                    .as_ref()
                    .and_then(|e| state.tokens.get(e).cloned())
            }
        };

        Ok(Self {
            opts,
            secret,
            client,
        })
    }
}

impl Tracker for JiraClient {
    fn fetch_ticket(&self, id: &str) -> Result<Value> {
        with_retries("fetch ticket", || self.get_issue(id))
    }

    fn search(&self, jql: &str, fields: &[String], max_results: usize) -> Result<Vec<Value>> {
        with_retries("search", || self.search_issues(jql, fields, max_results))
    }

    fn mutate_labels(&self, id: &str, action: LabelAction, labels: &[String]) -> Result<()> {
        self.update_labels(id, action, labels)
    }

    fn edit_ticket(&self, id: &str) -> Result<()> {
        self.edit_issue(id)
    }

    fn comment_ticket(&self, id: &str) -> Result<()> {
        self.comment_issue(id)
    }

    fn check_login(&self) -> Result<()> {
        with_retries("login check", || self.myself().map(|_| ()))
    }

    fn store_password(&mut self, secret: &str) -> Result<()> {
        let endpoint = self.endpoint()?.to_string();
        crate::config::store_secret(&self.opts.state_path(), &endpoint, secret)?;
        self.secret = Some(secret.to_string());
        Ok(())
    }

    fn options(&self) -> BTreeMap<String, Value> {
        self.opts.as_map()
    }
}
