use std::io::Write;
use std::process::Command;

use anyhow::{Context, Result};

const DESCRIPTION_SEPARATOR: &str = "---";

pub(super) fn compose_edit_text(id: &str, summary: &str, description: &str) -> String {
    format!(
        "# Editing {}. Lines starting with '#' are ignored.\nsummary: {}\n{}\n{}\n",
        id,
        summary,
        DESCRIPTION_SEPARATOR,
        description.trim_end()
    )
}

/// Inverse of [`compose_edit_text`]: `(summary, description)`.
pub(super) fn parse_edit_text(text: &str) -> (String, String) {
    let mut summary = String::new();
    let mut description = Vec::new();
    let mut in_description = false;
    for line in text.lines() {
        if in_description {
            description.push(line);
            continue;
        }
        if line.starts_with('#') {
            continue;
        }
        if line.trim() == DESCRIPTION_SEPARATOR {
            in_description = true;
        } else if let Some(rest) = line.strip_prefix("summary:") {
            summary = rest.trim().to_string();
        }
    }
    (summary, description.join("\n").trim_end().to_string())
}

/// Write `initial` to a temp file, run `$EDITOR` on it and return the result.
pub(super) fn edit_in_editor(initial: &str) -> Result<String> {
    let mut file = tempfile::Builder::new()
        .prefix("jira-ui-")
        .suffix(".txt")
        .tempfile()
        .context("create editor temp file")?;
    file.write_all(initial.as_bytes())
        .context("write editor temp file")?;
    file.flush().context("flush editor temp file")?;

    let editor = std::env::var("VISUAL")
        .or_else(|_| std::env::var("EDITOR"))
        .unwrap_or_else(|_| "vi".to_string());
    let mut parts = editor.split_whitespace();
    let program = parts.next().unwrap_or("vi");
    let status = Command::new(program)
        .args(parts)
        .arg(file.path())
        .status()
        .with_context(|| format!("run editor {}", editor))?;
    if !status.success() {
        anyhow::bail!("editor {} exited with {}", editor, status);
    }

    std::fs::read_to_string(file.path()).context("read editor temp file")
}

#[cfg(test)]
#[path = "../tests/tracker/editor_tests.rs"]
mod tests;
