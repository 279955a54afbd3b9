use std::time::Duration;

use tokio::time::sleep;

/// Delay between attempts, as a function of the attempt number (1-based).
#[derive(Debug, Clone, Copy)]
pub enum DelaySchedule {
    None,
    /// base × attempt: 1s, 2s, 3s, ...
    Linear(Duration),
}

impl DelaySchedule {
    pub fn delay_for(&self, attempt: u32) -> Duration {
        match self {
            Self::None => Duration::ZERO,
            Self::Linear(base) => *base * attempt,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub schedule: DelaySchedule,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, schedule: DelaySchedule) -> Self {
        Self {
            max_attempts,
            schedule,
        }
    }
}

/// Execute an async operation with retry logic.
///
/// The operation receives the 1-based attempt number so callers can vary
/// their input per attempt (e.g. regenerate a timestamped name). An error
/// is retried only while `should_retry` accepts it and attempts remain.
pub async fn with_retry<F, Fut, T, E, P>(
    policy: &RetryPolicy,
    operation_name: &str,
    should_retry: P,
    mut operation: F,
) -> Result<T, E>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, E>>,
    E: std::fmt::Display,
    P: Fn(&E) -> bool,
{
    let mut attempt = 0;

    loop {
        attempt += 1;

        match operation(attempt).await {
            Ok(result) => {
                if attempt > 1 {
                    log::info!("{} succeeded after {} attempts", operation_name, attempt);
                }
                return Ok(result);
            }
            Err(e) => {
                if !should_retry(&e) || attempt >= policy.max_attempts {
                    log::warn!("{} failed after {} attempts: {}", operation_name, attempt, e);
                    return Err(e);
                }

                let delay = policy.schedule.delay_for(attempt);
                log::debug!(
                    "{} attempt {} failed: {}. Retrying in {:?}",
                    operation_name,
                    attempt,
                    e,
                    delay
                );
                sleep(delay).await;
            }
        }
    }
}
