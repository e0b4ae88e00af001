use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedQuery {
    pub name: String,
    pub jql: String,
}

impl SavedQuery {
    pub fn new(name: impl Into<String>, jql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            jql: jql.into(),
        }
    }

    pub fn defaults() -> Vec<SavedQuery> {
        vec![
            SavedQuery::new(
                "My open tickets",
                "assignee = currentUser() AND resolution = Unresolved",
            ),
            SavedQuery::new("Recently updated", "updated >= -7d"),
            SavedQuery::new(
                "Reported by me",
                "reporter = currentUser() AND resolution = Unresolved",
            ),
        ]
    }
}

/// An `ORDER BY` clause offered on the sort order page. An empty clause keeps
/// whatever ordering the query itself carries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SortOrder {
    pub name: String,
    #[serde(default)]
    pub clause: String,
}

impl SortOrder {
    pub fn new(name: impl Into<String>, clause: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            clause: clause.into(),
        }
    }

    pub fn defaults() -> Vec<SortOrder> {
        vec![
            SortOrder::new("default", ""),
            SortOrder::new("created (newest first)", "created DESC"),
            SortOrder::new("updated (newest first)", "updated DESC"),
            SortOrder::new("priority (highest first)", "priority DESC"),
            SortOrder::new("key", "key ASC"),
        ]
    }
}

/// The query a ticket list page is showing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ActiveQuery {
    pub name: String,
    pub jql: String,
    pub order: Option<SortOrder>,
}

impl ActiveQuery {
    pub fn new(name: impl Into<String>, jql: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            jql: jql.into(),
            order: None,
        }
    }

    pub fn with_order(&self, order: SortOrder) -> Self {
        Self {
            order: Some(order),
            ..self.clone()
        }
    }

    /// Narrow the query to tickets carrying `label`.
    pub fn with_label(&self, label: &str) -> Self {
        Self {
            name: format!("{} [label={}]", self.name, label),
            jql: format!("labels = \"{}\" AND ({})", label, strip_order_by(&self.jql)),
            order: self.order.clone(),
        }
    }

    /// The JQL sent to the tracker, with the active sort order applied.
    pub fn effective_jql(&self) -> String {
        match &self.order {
            Some(order) if !order.clause.trim().is_empty() => {
                format!("{} ORDER BY {}", strip_order_by(&self.jql), order.clause.trim())
            }
            _ => self.jql.clone(),
        }
    }
}

fn strip_order_by(jql: &str) -> &str {
    let upper = jql.to_ascii_uppercase();
    match upper.find(" ORDER BY ") {
        Some(pos) => jql[..pos].trim_end(),
        None => jql.trim_end(),
    }
}

#[cfg(test)]
#[path = "../tests/model/query_tests.rs"]
mod tests;
