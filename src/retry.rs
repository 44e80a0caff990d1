//! Retrying remote operations that GitHub rejected because of rate limiting.
//!
//! GitHub allows a fixed number of authenticated requests per hour. When the budget is
//! exhausted the API answers `403 Forbidden` with a payload pointing at the rate-limit
//! documentation. Such failures are waited out and the whole operation is started again;
//! every other failure is returned to the caller untouched.

use crate::error::StatsError;
use chrono::Local;
use console::style;
use std::thread;
use std::time::Duration;

const LOG_TARGET: &str = "ghstats::retry";

/// Pause before retrying a rate-limited operation.
pub const RATE_LIMIT_BACKOFF: Duration = Duration::from_secs(60 * 60);

/// Fragment of the `documentation_url` GitHub sends with rate-limit rejections.
pub const RATE_LIMIT_DOC_MARKER: &str = "rate-limit";

pub trait Sleeper {
    fn sleep(&self, duration: Duration);
}

/// Blocks the current thread.
#[derive(Debug, Clone, Copy, Default)]
pub struct ThreadSleeper;

impl Sleeper for ThreadSleeper {
    fn sleep(&self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// Run `op` until it succeeds or fails with an error `is_retryable` rejects.
///
/// Before each retry `on_retry` is told about the error and the backoff, then `sleeper`
/// waits out `backoff`. There is no attempt limit.
pub fn retry_when<T, E, S, P, N, F>(
    sleeper: &S,
    backoff: Duration,
    is_retryable: P,
    mut on_retry: N,
    mut op: F,
) -> Result<T, E>
where
    S: Sleeper + ?Sized,
    P: Fn(&E) -> bool,
    N: FnMut(&E, Duration),
    F: FnMut() -> Result<T, E>,
{
    loop {
        match op() {
            Err(err) if is_retryable(&err) => {
                on_retry(&err, backoff);
                sleeper.sleep(backoff);
            }
            result => return result,
        }
    }
}

/// True for `403` API errors carrying the rate-limit documentation link.
pub fn is_rate_limited(err: &StatsError) -> bool {
    match err {
        StatsError::Api(api) => {
            api.status == 403
                && api
                    .documentation_url
                    .as_deref()
                    .is_some_and(|url| url.contains(RATE_LIMIT_DOC_MARKER))
        }
        _ => false,
    }
}

/// Run `op`, sleeping an hour and starting over whenever GitHub rate-limits it.
pub fn with_rate_limit_retry<T, S, F>(sleeper: &S, op: F) -> Result<T, StatsError>
where
    S: Sleeper + ?Sized,
    F: FnMut() -> Result<T, StatsError>,
{
    retry_when(sleeper, RATE_LIMIT_BACKOFF, is_rate_limited, announce_backoff, op)
}

fn announce_backoff(err: &StatsError, backoff: Duration) {
    let resume_at = chrono::Duration::from_std(backoff)
        .ok()
        .and_then(|d| Local::now().checked_add_signed(d))
        .unwrap_or_else(Local::now);

    log::warn!(target: LOG_TARGET, "rate limited ({err}), retrying in {}s", backoff.as_secs());
    eprintln!();
    eprintln!(
        "{} GitHub rate-limited, sleeping an hour until {}",
        style("------->").yellow().bold(),
        resume_at.format("%Y-%m-%d %H:%M:%S")
    );
}
