use std::future::Future;

use crate::error::Error;

/// Runs the primary source when there is one and substitutes the secondary on
/// any failure. The primary gets exactly one attempt; its error is logged and
/// never reaches the caller.
pub async fn attempt_or_else<T, Fut, F>(source: &'static str, primary: Option<Fut>, secondary: F) -> T
where
    Fut: Future<Output = Result<T, Error>>,
    F: FnOnce() -> T,
{
    match primary {
        Some(primary) => match primary.await {
            Ok(value) => {
                tracing::debug!(source, "remote source answered");
                return value;
            }
            Err(err) if err.is_remote_unavailable() => {
                tracing::warn!(source, error = %err, "remote source failed, using local fallback");
            }
            Err(err) => {
                tracing::error!(source, error = %err, "remote source errored, using local fallback");
            }
        },
        None => tracing::debug!(source, "remote source disabled, using local fallback"),
    }

    secondary()
}
