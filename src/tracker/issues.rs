//! Ticket reads and mutations.

use serde_json::{Map, json};

use super::editor::{compose_edit_text, edit_in_editor, parse_edit_text};
use super::*;
use crate::model::field_text;

impl JiraClient {
    pub(super) fn get_issue(&self, id: &str) -> Result<Value> {
        let resp = self
            .authed(self.client.get(self.url(&format!("/rest/api/2/issue/{}", id))?))
            .send()
            .with_context(|| format!("get issue {}", id))?;
        self.ensure_ok(resp, &format!("issue {}", id))?
            .json()
            .with_context(|| format!("parse issue {}", id))
    }

    pub(super) fn search_issues(
        &self,
        jql: &str,
        fields: &[String],
        max_results: usize,
    ) -> Result<Vec<Value>> {
        let resp = self
            .authed(self.client.post(self.url("/rest/api/2/search")?))
            .json(&SearchRequest {
                jql,
                start_at: 0,
                max_results,
                fields,
            })
            .send()
            .context("search request")?;
        let body: SearchResponse = self
            .ensure_ok(resp, "search")?
            .json()
            .context("parse search response")?;
        tracing::debug!(
            "search {:?}: {} of {} issues",
            jql,
            body.issues.len(),
            body.total
        );
        Ok(body.issues)
    }

    pub(super) fn update_labels(
        &self,
        id: &str,
        action: LabelAction,
        labels: &[String],
    ) -> Result<()> {
        if labels.is_empty() {
            return Ok(());
        }
        let ops = labels
            .iter()
            .map(|l| {
                let mut op = Map::new();
                op.insert(action.as_str().to_string(), json!(l));
                op
            })
            .collect();
        let resp = self
            .authed(self.client.put(self.url(&format!("/rest/api/2/issue/{}", id))?))
            .json(&LabelUpdateRequest {
                update: LabelUpdate { labels: ops },
            })
            .send()
            .with_context(|| format!("{} labels on {}", action, id))?;
        self.ensure_ok(resp, &format!("labels on {}", id))?;
        tracing::info!("{} labels {:?} on {}", action, labels, id);
        Ok(())
    }

    pub(super) fn edit_issue(&self, id: &str) -> Result<()> {
        let issue = self.get_issue(id)?;
        let summary = field_text(&issue, "summary");
        let description = field_text(&issue, "description");

        let edited = edit_in_editor(&compose_edit_text(id, &summary, &description))?;
        let (new_summary, new_description) = parse_edit_text(&edited);

        let mut fields = Map::new();
        if !new_summary.is_empty() && new_summary != summary {
            fields.insert("summary".to_string(), json!(new_summary));
        }
        if new_description != description.trim_end() {
            fields.insert("description".to_string(), json!(new_description));
        }
        if fields.is_empty() {
            tracing::info!("edit {}: nothing changed", id);
            return Ok(());
        }

        let resp = self
            .authed(self.client.put(self.url(&format!("/rest/api/2/issue/{}", id))?))
            .json(&EditRequest { fields })
            .send()
            .with_context(|| format!("edit issue {}", id))?;
        self.ensure_ok(resp, &format!("edit {}", id))?;
        Ok(())
    }

    pub(super) fn comment_issue(&self, id: &str) -> Result<()> {
        let body = edit_in_editor("")?;
        let body = body.trim();
        if body.is_empty() {
            tracing::info!("comment on {}: empty, not sent", id);
            return Ok(());
        }
        let resp = self
            .authed(
                self.client
                    .post(self.url(&format!("/rest/api/2/issue/{}/comment", id))?),
            )
            .json(&CommentRequest {
                body: body.to_string(),
            })
            .send()
            .with_context(|| format!("comment on {}", id))?;
        self.ensure_ok(resp, &format!("comment on {}", id))?;
        Ok(())
    }

    pub(super) fn myself(&self) -> Result<Myself> {
        let resp = self
            .authed(self.client.get(self.url("/rest/api/2/myself")?))
            .send()
            .context("myself request")?;
        self.ensure_ok(resp, "myself")?
            .json()
            .context("parse myself response")
    }
}
