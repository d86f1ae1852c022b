use anyhow::Error;
use std::future::Future;
use std::time::Duration;
use tracing::debug;

/// Runs `operation` until it succeeds or `retries` extra attempts have
/// failed, sleeping `delay_ms` between attempts. Returns the last error.
pub async fn with_retry<F, Fut, T, E>(mut operation: F, retries: usize, delay_ms: u64) -> Result<T, Error>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::error::Error + Send + Sync + 'static,
{
    let mut attempt = 1;
    loop {
        match operation().await {
            Ok(val) => return Ok(val),
            Err(err) if attempt > retries => return Err(err.into()),
            Err(err) => {
                debug!("Attempt {}/{} failed: {}. Retrying...", attempt, retries, err);
                attempt += 1;
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::io;

    #[tokio::test]
    async fn test_retries_until_success() {
        let calls = Cell::new(0);
        let result = with_retry(
            || {
                calls.set(calls.get() + 1);
                let n = calls.get();
                async move {
                    if n < 3 {
                        Err(io::Error::other("flaky"))
                    } else {
                        Ok(n)
                    }
                }
            },
            2,
            1,
        )
        .await;
        assert_eq!(result.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_gives_up_after_retries() {
        let calls = Cell::new(0);
        let result: Result<(), Error> = with_retry(
            || {
                calls.set(calls.get() + 1);
                async { Err(io::Error::other("down")) }
            },
            1,
            1,
        )
        .await;
        assert_eq!(result.unwrap_err().to_string(), "down");
        assert_eq!(calls.get(), 2);
    }
}
