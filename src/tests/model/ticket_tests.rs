use serde_json::json;

use super::*;

fn sample() -> Value {
    json!({
        "key": "ABC-1",
        "fields": {
            "summary": "Fix the login page",
            "status": { "name": "In Progress" },
            "assignee": { "displayName": "Sam Doe", "name": "sdoe" },
            "issuetype": { "name": "Epic" },
            "labels": ["ui", "auth"],
            "components": [{ "name": "web" }, { "name": "api" }],
            "parent": { "key": "ABC-0", "fields": { "summary": "Umbrella" } },
            "issuelinks": [
                {
                    "type": { "inward": "is blocked by", "outward": "blocks" },
                    "outwardIssue": { "key": "ABC-2", "fields": { "summary": "Deploy" } }
                },
                {
                    "type": { "inward": "is blocked by", "outward": "blocks" },
                    "inwardIssue": { "key": "XYZ-9", "fields": { "summary": "Design" } }
                }
            ],
            "subtasks": [{ "key": "ABC-3", "fields": { "summary": "Tests" } }],
            "comment": {
                "comments": [
                    { "author": { "displayName": "Kim" }, "created": "2024-01-02T03:04:05.000+0000", "body": "looks good" }
                ]
            }
        }
    })
}

#[test]
fn field_text_prefers_display_names() {
    let t = sample();
    assert_eq!(ticket_key(&t), "ABC-1");
    assert_eq!(field_text(&t, "assignee"), "Sam Doe");
    assert_eq!(field_text(&t, "status"), "In Progress");
    assert_eq!(field_text(&t, "components"), "web, api");
    assert_eq!(field_text(&t, "missing"), "");
}

#[test]
fn lookup_path_walks_objects_and_arrays() {
    let t = sample();
    assert_eq!(
        lookup_path(&t, "fields.components.1.name").and_then(Value::as_str),
        Some("api")
    );
    assert!(lookup_path(&t, "fields.components.7").is_none());
}

#[test]
fn labels_and_epic_flag() {
    let t = sample();
    assert_eq!(ticket_labels(&t), vec!["ui", "auth"]);
    assert!(is_epic(&t));
    assert!(!is_epic(&json!({ "key": "ABC-5" })));
}

#[test]
fn links_list_parent_links_then_subtasks() {
    let links = ticket_links(&sample());
    let keys: Vec<_> = links.iter().map(|l| l.key.as_str()).collect();
    assert_eq!(keys, vec!["ABC-0", "ABC-2", "XYZ-9", "ABC-3"]);
    assert_eq!(links[1].relation, "blocks");
    assert_eq!(links[2].relation, "is blocked by");
    assert_eq!(links[3].summary, "Tests");
}

#[test]
fn comments_are_flattened() {
    let comments = ticket_comments(&sample());
    assert_eq!(comments.len(), 1);
    assert_eq!(comments[0].author, "Kim");
    assert_eq!(comments[0].body, "looks good");
}

#[test]
fn find_ticket_id_takes_first_key() {
    assert_eq!(find_ticket_id("  blocks ABC-2 Deploy"), Some("ABC-2"));
    assert_eq!(find_ticket_id("see XY_Z9-10 and ABC-1"), Some("XY_Z9-10"));
    assert_eq!(find_ticket_id("no ids here - 42"), None);
    assert_eq!(find_ticket_id("lowercase abc-1"), None);
}
