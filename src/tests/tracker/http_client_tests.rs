use std::cell::Cell;

use super::*;

fn rejected(status: reqwest::StatusCode) -> anyhow::Error {
    StatusError {
        status,
        message: format!("rejected with {}", status),
    }
    .into()
}

#[test]
fn client_errors_are_not_retried() {
    let calls = Cell::new(0);
    let res: Result<()> = with_retries("fetch ticket", || {
        calls.set(calls.get() + 1);
        Err(rejected(reqwest::StatusCode::NOT_FOUND))
    });
    let err = res.unwrap_err();
    assert_eq!(calls.get(), 1);
    assert!(format!("{:#}", err).starts_with("fetch ticket: rejected with 404"));
    assert_eq!(
        err.downcast_ref::<StatusError>().map(|e| e.status),
        Some(reqwest::StatusCode::NOT_FOUND)
    );
}

#[test]
fn other_failures_are_retried_until_success() {
    let calls = Cell::new(0);
    let res = with_retries("search", || {
        calls.set(calls.get() + 1);
        if calls.get() < 2 {
            Err(anyhow::anyhow!("connection reset"))
        } else {
            Ok(7)
        }
    });
    assert_eq!(res.unwrap(), 7);
    assert_eq!(calls.get(), 2);
}

#[test]
fn context_keeps_the_status_visible() {
    let err = rejected(reqwest::StatusCode::UNAUTHORIZED).context("login check");
    assert!(is_client_error(&err));
    assert!(!is_client_error(&anyhow::anyhow!("timed out")));
}
