use super::*;

/// A response the tracker rejected. Client errors (4xx) come back the same on
/// every attempt, so reads do not retry them.
#[derive(Debug)]
pub struct StatusError {
    pub status: reqwest::StatusCode,
    message: String,
}

impl fmt::Display for StatusError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for StatusError {}

fn is_client_error(err: &anyhow::Error) -> bool {
    let status = err
        .downcast_ref::<StatusError>()
        .map(|e| e.status)
        .or_else(|| err.downcast_ref::<reqwest::Error>().and_then(|e| e.status()));
    status.is_some_and(|s| s.is_client_error())
}

pub(super) fn with_retries<T>(label: &str, mut f: impl FnMut() -> Result<T>) -> Result<T> {
    const ATTEMPTS: usize = 3;
    let mut last: Option<anyhow::Error> = None;
    for i in 0..ATTEMPTS {
        match f() {
            Ok(v) => return Ok(v),
            Err(err) if is_client_error(&err) => return Err(err.context(label.to_string())),
            Err(err) => {
                tracing::debug!("{} attempt {} failed: {:#}", label, i + 1, err);
                last = Some(err);
                if i + 1 < ATTEMPTS {
                    std::thread::sleep(std::time::Duration::from_millis(200 * (1 << i)));
                }
            }
        }
    }
    Err(last
        .unwrap_or_else(|| anyhow::anyhow!("unknown error"))
        .context(label.to_string()))
}

impl JiraClient {
    pub(super) fn ensure_ok(
        &self,
        resp: reqwest::blocking::Response,
        label: &str,
    ) -> Result<reqwest::blocking::Response> {
        let status = resp.status();
        let message = match status {
            reqwest::StatusCode::UNAUTHORIZED => {
                "unauthorized (credentials invalid/expired; run `jira-ui password`)".to_string()
            }
            reqwest::StatusCode::FORBIDDEN => {
                format!("forbidden (insufficient permissions for {})", label)
            }
            reqwest::StatusCode::NOT_FOUND => format!("{}: not found", label),
            _ => {
                return resp
                    .error_for_status()
                    .with_context(|| format!("{} status", label));
            }
        };
        Err(StatusError { status, message }.into())
    }

    pub(super) fn endpoint(&self) -> Result<&str> {
        self.opts
            .endpoint
            .as_deref()
            .context("no endpoint configured (use --endpoint or config.json)")
    }

    pub(super) fn url(&self, path: &str) -> Result<String> {
        Ok(format!("{}{}", self.endpoint()?, path))
    }

    pub(super) fn authed(
        &self,
        req: reqwest::blocking::RequestBuilder,
    ) -> reqwest::blocking::RequestBuilder {
        match (&self.opts.user, &self.secret) {
            (Some(user), Some(secret)) => req.basic_auth(user, Some(secret)),
            (None, Some(secret)) => req.bearer_auth(secret),
            _ => req,
        }
    }
}

#[cfg(test)]
#[path = "../tests/tracker/http_client_tests.rs"]
mod tests;
