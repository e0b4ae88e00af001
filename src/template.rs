//! Turns ticket JSON into the plain text lines pages display.

use std::sync::OnceLock;

use regex::Regex;
use serde_json::Value;
use time::OffsetDateTime;
use time::format_description::FormatItem;
use time::format_description::well_known::Rfc3339;

use crate::config::DEFAULT_TEMPLATE;
use crate::model::{
    field_text, is_epic, lookup_path, ticket_comments, ticket_key, ticket_labels, ticket_links,
    value_text,
};

/// Line that separates display blocks in rendered ticket text.
pub const BLOCK_MARKER: &str = "(break)";

/// Render `ticket` with the named template.
///
/// `jira_ui_view` (and an empty name) selects the built-in layout; anything
/// else is read as a template file. An unreadable template file falls back to
/// the built-in layout.
pub fn render_ticket(ticket: &Value, template: &str) -> Vec<String> {
    if ticket.is_null() {
        return Vec::new();
    }
    if template.is_empty() || template == DEFAULT_TEMPLATE {
        return render_builtin(ticket);
    }
    match std::fs::read_to_string(template) {
        Ok(text) => render_template_text(ticket, &text),
        Err(err) => {
            tracing::warn!("template {}: {}; using {}", template, err, DEFAULT_TEMPLATE);
            render_builtin(ticket)
        }
    }
}

fn render_builtin(ticket: &Value) -> Vec<String> {
    let mut out = vec![
        format!("issue: {}", ticket_key(ticket)),
        format!("summary: {}", field_text(ticket, "summary")),
        format!("status: {}", field_text(ticket, "status")),
        format!("type: {}", field_text(ticket, "issuetype")),
        format!("priority: {}", field_text(ticket, "priority")),
        format!("assignee: {}", field_text(ticket, "assignee")),
        format!("reporter: {}", field_text(ticket, "reporter")),
        format!("labels: {}", ticket_labels(ticket).join(" ")),
        format!("created: {}", format_timestamp(&field_text(ticket, "created"))),
        format!("updated: {}", format_timestamp(&field_text(ticket, "updated"))),
    ];
    if is_epic(ticket) {
        out.push(format!("epic_links: tickets in epic {}", ticket_key(ticket)));
    }

    let links = ticket_links(ticket);
    if !links.is_empty() {
        out.push("links:".to_string());
        for link in links {
            out.push(format!("  {} {} {}", link.relation, link.key, link.summary));
        }
    }

    out.push(BLOCK_MARKER.to_string());
    out.push("description:".to_string());
    let description = field_text(ticket, "description");
    out.extend(description.lines().map(str::to_string));

    for comment in ticket_comments(ticket) {
        out.push(BLOCK_MARKER.to_string());
        out.push(format!(
            "comment: {} {}",
            comment.author,
            format_timestamp(&comment.created)
        ));
        out.extend(comment.body.lines().map(str::to_string));
    }
    out
}

fn placeholder_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{\s*([A-Za-z0-9_.]+)\s*\}\}").expect("placeholder pattern"))
}

/// Substitute `{{dotted.path}}` placeholders; unknown paths render empty.
pub fn render_template_text(ticket: &Value, text: &str) -> Vec<String> {
    let rendered = placeholder_re().replace_all(text, |caps: &regex::Captures<'_>| {
        lookup_path(ticket, &caps[1])
            .map(value_text)
            .unwrap_or_default()
    });
    rendered.lines().map(str::to_string).collect()
}

/// One ticket list row: the key followed by the requested fields.
pub fn render_list_row(ticket: &Value, fields: &[String]) -> String {
    let mut row = format!("{:<12}", ticket_key(ticket));
    for field in fields {
        let text = match field.as_str() {
            "labels" => ticket_labels(ticket).join(","),
            "status" => format!("[{}]", field_text(ticket, "status")),
            "created" | "updated" => format_timestamp(&field_text(ticket, field)),
            other => field_text(ticket, other),
        };
        if text.is_empty() || text == "[]" {
            continue;
        }
        row.push_str("  ");
        row.push_str(&text);
    }
    row
}

fn tracker_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond][offset_hour sign:mandatory][offset_minute]",
        )
        .unwrap_or_default()
    })
}

fn display_format() -> &'static [FormatItem<'static>] {
    static FMT: OnceLock<Vec<FormatItem<'static>>> = OnceLock::new();
    FMT.get_or_init(|| {
        time::format_description::parse("[year]-[month]-[day] [hour]:[minute]").unwrap_or_default()
    })
}

/// `YYYY-MM-DD HH:MM` for tracker or RFC 3339 stamps; anything else verbatim.
pub fn format_timestamp(ts: &str) -> String {
    let parsed = OffsetDateTime::parse(ts, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(ts, tracker_format()));
    match parsed {
        Ok(dt) => dt
            .format(display_format())
            .unwrap_or_else(|_| ts.to_string()),
        Err(_) => ts.to_string(),
    }
}

#[cfg(test)]
#[path = "tests/template_tests.rs"]
mod tests;
