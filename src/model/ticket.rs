//! Accessors over the tracker's ticket JSON.
//!
//! Tickets stay as `serde_json::Value` end to end so that user templates can
//! reach any field; these helpers cover the fields the UI itself needs.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;

pub fn ticket_key(ticket: &Value) -> &str {
    ticket.get("key").and_then(Value::as_str).unwrap_or("")
}

/// Look up `fields.<name>` and flatten it to display text.
pub fn field_text(ticket: &Value, name: &str) -> String {
    ticket
        .get("fields")
        .and_then(|f| f.get(name))
        .map(value_text)
        .unwrap_or_default()
}

/// Resolve a dotted path (`fields.status.name`) against the ticket.
pub fn lookup_path<'a>(ticket: &'a Value, path: &str) -> Option<&'a Value> {
    let mut cur = ticket;
    for part in path.split('.').filter(|p| !p.is_empty()) {
        cur = match cur {
            Value::Array(items) => items.get(part.parse::<usize>().ok()?)?,
            other => other.get(part)?,
        };
    }
    Some(cur)
}

/// Human text for a JSON value: named objects show their name, arrays join
/// their members with ", ".
pub fn value_text(v: &Value) -> String {
    match v {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(items) => items
            .iter()
            .map(value_text)
            .filter(|s| !s.is_empty())
            .collect::<Vec<_>>()
            .join(", "),
        Value::Object(map) => ["displayName", "name", "value", "key"]
            .iter()
            .find_map(|k| map.get(*k).and_then(Value::as_str))
            .map(str::to_string)
            .unwrap_or_default(),
    }
}

pub fn ticket_labels(ticket: &Value) -> Vec<String> {
    ticket
        .get("fields")
        .and_then(|f| f.get("labels"))
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

pub fn is_epic(ticket: &Value) -> bool {
    lookup_path(ticket, "fields.issuetype.name")
        .and_then(Value::as_str)
        .is_some_and(|name| name.eq_ignore_ascii_case("epic"))
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketLink {
    pub relation: String,
    pub key: String,
    pub summary: String,
}

/// The parent, then issue links, then subtasks.
pub fn ticket_links(ticket: &Value) -> Vec<TicketLink> {
    let mut out = Vec::new();
    let Some(fields) = ticket.get("fields") else {
        return out;
    };

    if let Some(parent) = fields.get("parent") {
        out.push(link_from("parent", parent));
    }

    for link in fields
        .get("issuelinks")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        if let Some(issue) = link.get("outwardIssue") {
            let rel = lookup_path(link, "type.outward").map(value_text);
            out.push(link_from(rel.as_deref().unwrap_or("relates to"), issue));
        }
        if let Some(issue) = link.get("inwardIssue") {
            let rel = lookup_path(link, "type.inward").map(value_text);
            out.push(link_from(rel.as_deref().unwrap_or("relates to"), issue));
        }
    }

    for sub in fields
        .get("subtasks")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
    {
        out.push(link_from("subtask", sub));
    }

    out.retain(|l| !l.key.is_empty());
    out
}

fn link_from(relation: &str, issue: &Value) -> TicketLink {
    TicketLink {
        relation: relation.to_string(),
        key: ticket_key(issue).to_string(),
        summary: field_text(issue, "summary"),
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TicketComment {
    pub author: String,
    pub created: String,
    pub body: String,
}

pub fn ticket_comments(ticket: &Value) -> Vec<TicketComment> {
    lookup_path(ticket, "fields.comment.comments")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|c| TicketComment {
                    author: c.get("author").map(value_text).unwrap_or_default(),
                    created: c.get("created").map(value_text).unwrap_or_default(),
                    body: c.get("body").map(value_text).unwrap_or_default(),
                })
                .collect()
        })
        .unwrap_or_default()
}

fn ticket_id_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b([A-Z][A-Z0-9_]+-[0-9]+)\b").expect("ticket id pattern"))
}

/// First ticket key (`ABC-123`) embedded in `s`.
pub fn find_ticket_id(s: &str) -> Option<&str> {
    ticket_id_re()
        .captures(s)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str())
}

#[cfg(test)]
#[path = "../tests/model/ticket_tests.rs"]
mod tests;
