use std::fs;
use std::path::Path;

use anyhow::{Context, Result};

use crate::model::StateFile;

pub fn load_state(path: &Path) -> Result<StateFile> {
    if !path.exists() {
        return Ok(StateFile {
            version: 1,
            ..StateFile::default()
        });
    }
    let bytes = fs::read(path).with_context(|| format!("read {}", path.display()))?;
    serde_json::from_slice(&bytes).with_context(|| format!("parse {}", path.display()))
}

pub fn save_state(path: &Path, state: &StateFile) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(state).context("serialize state")?;
    write_private(path, &bytes).with_context(|| format!("write {}", path.display()))
}

/// Remember `secret` for `endpoint`, replacing any previous one.
pub fn store_secret(path: &Path, endpoint: &str, secret: &str) -> Result<()> {
    let mut state = load_state(path)?;
    state.version = 1;
    state
        .tokens
        .insert(endpoint.to_string(), secret.to_string());
    save_state(path, &state)
}

fn write_private(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("create parent directories")?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    fs::write(&tmp, bytes).with_context(|| format!("write temp file {}", tmp.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(&tmp, fs::Permissions::from_mode(0o600))
            .with_context(|| format!("chmod {}", tmp.display()))?;
    }

    fs::rename(&tmp, path)
        .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()))?;
    Ok(())
}
