use crate::domain::model::{AttemptOutcome, DeliveryAttempt, DispatchResult, NotificationRequest};
use crate::domain::ports::DeliveryChannel;
use std::time::Duration;
use tokio::time::Instant;

/// Retry knobs for a dispatcher. Delays grow exponentially:
/// `base_delay * 2^(attempt - 1)`, capped at `max_delay`.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        // 1s, 2s, 4s: same ladder the contact form has always used
        Self {
            max_attempts: 3,
            base_delay: Duration::from_secs(1),
            max_delay: Duration::from_secs(60),
        }
    }
}

impl RetryPolicy {
    /// Delay to wait after the given (1-based) attempt has failed.
    pub fn delay_for(&self, attempt_number: u32) -> Duration {
        let exponent = attempt_number.saturating_sub(1).min(16);
        self.base_delay
            .saturating_mul(1u32 << exponent)
            .min(self.max_delay)
    }
}

/// Delivers one notification through one channel, retrying transient failures
/// up to the attempt budget. Terminal failures stop immediately regardless of
/// remaining budget. Stateless across calls; concurrent dispatches are
/// independent.
///
/// Dropping the returned future cancels any attempts not yet started.
pub struct Dispatcher<C: DeliveryChannel> {
    channel: C,
    policy: RetryPolicy,
}

impl<C: DeliveryChannel> Dispatcher<C> {
    pub fn new(channel: C, policy: RetryPolicy) -> Self {
        Self { channel, policy }
    }

    pub async fn dispatch(&self, request: &NotificationRequest) -> DispatchResult {
        self.run(request, None).await
    }

    /// Like `dispatch`, but gives up early when the next backoff would cross
    /// the deadline, returning the partial attempt log instead of sleeping
    /// past it.
    pub async fn dispatch_with_deadline(
        &self,
        request: &NotificationRequest,
        deadline: Instant,
    ) -> DispatchResult {
        self.run(request, Some(deadline)).await
    }

    async fn run(&self, request: &NotificationRequest, deadline: Option<Instant>) -> DispatchResult {
        let max_attempts = self.policy.max_attempts.max(1);
        let mut attempts = Vec::new();

        for attempt_number in 1..=max_attempts {
            tracing::debug!(
                "Delivery attempt {}/{} to {}",
                attempt_number,
                max_attempts,
                request.recipient
            );

            match self.channel.deliver(request).await {
                Ok(()) => {
                    attempts.push(DeliveryAttempt {
                        attempt_number,
                        outcome: AttemptOutcome::Success,
                        error_detail: None,
                    });
                    tracing::info!(
                        "Notification delivered to {} on attempt {}",
                        request.recipient,
                        attempt_number
                    );
                    return DispatchResult {
                        succeeded: true,
                        attempts,
                    };
                }
                Err(err) => {
                    let retryable = err.is_retryable();
                    attempts.push(DeliveryAttempt {
                        attempt_number,
                        outcome: if retryable {
                            AttemptOutcome::RetryableFailure
                        } else {
                            AttemptOutcome::TerminalFailure
                        },
                        error_detail: Some(err.message().to_string()),
                    });

                    if !retryable {
                        tracing::error!(
                            "Terminal failure on attempt {}: {}",
                            attempt_number,
                            err.message()
                        );
                        break;
                    }

                    if attempt_number == max_attempts {
                        tracing::error!(
                            "Retries exhausted after {} attempts: {}",
                            attempt_number,
                            err.message()
                        );
                        break;
                    }

                    let delay = self.policy.delay_for(attempt_number);

                    // 呼叫端設定的截止時間快到了就不再排下一次嘗試
                    if let Some(deadline) = deadline {
                        if Instant::now() + delay >= deadline {
                            tracing::warn!(
                                "Deadline would pass before the next attempt, giving up after {}",
                                attempt_number
                            );
                            break;
                        }
                    }

                    tracing::warn!(
                        "Attempt {} failed ({}), retrying in {:?}",
                        attempt_number,
                        err.message(),
                        delay
                    );
                    tokio::time::sleep(delay).await;
                }
            }
        }

        DispatchResult {
            succeeded: false,
            attempts,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::ChannelError;
    use async_trait::async_trait;
    use std::collections::VecDeque;
    use std::sync::Arc;
    use tokio::sync::Mutex;

    fn request() -> NotificationRequest {
        NotificationRequest {
            recipient: "frontdesk@hotel-dd.test".to_string(),
            subject: "Test".to_string(),
            body: "Body".to_string(),
        }
    }

    fn retryable() -> ChannelError {
        ChannelError::Retryable {
            message: "connection refused".to_string(),
        }
    }

    fn terminal() -> ChannelError {
        ChannelError::Terminal {
            message: "bad credentials".to_string(),
        }
    }

    /// Plays back a fixed sequence of outcomes and records when each
    /// delivery attempt happened.
    struct ScriptedChannel {
        script: Mutex<VecDeque<std::result::Result<(), ChannelError>>>,
        call_times: Mutex<Vec<Instant>>,
    }

    impl ScriptedChannel {
        fn new(script: Vec<std::result::Result<(), ChannelError>>) -> Self {
            Self {
                script: Mutex::new(script.into()),
                call_times: Mutex::new(Vec::new()),
            }
        }

        async fn call_times(&self) -> Vec<Instant> {
            self.call_times.lock().await.clone()
        }
    }

    #[async_trait]
    impl DeliveryChannel for Arc<ScriptedChannel> {
        async fn deliver(
            &self,
            _request: &NotificationRequest,
        ) -> std::result::Result<(), ChannelError> {
            self.call_times.lock().await.push(Instant::now());
            self.script
                .lock()
                .await
                .pop_front()
                .unwrap_or_else(|| Err(retryable()))
        }
    }

    fn policy(max_attempts: u32, base_ms: u64) -> RetryPolicy {
        RetryPolicy {
            max_attempts,
            base_delay: Duration::from_millis(base_ms),
            max_delay: Duration::from_secs(60),
        }
    }

    #[test]
    fn test_delay_ladder() {
        let policy = policy(5, 1000);
        assert_eq!(policy.delay_for(1), Duration::from_secs(1));
        assert_eq!(policy.delay_for(2), Duration::from_secs(2));
        assert_eq!(policy.delay_for(3), Duration::from_secs(4));
        assert_eq!(policy.delay_for(7), Duration::from_secs(60)); // capped
    }

    #[tokio::test]
    async fn test_success_on_first_attempt() {
        let channel = Arc::new(ScriptedChannel::new(vec![Ok(())]));
        let dispatcher = Dispatcher::new(Arc::clone(&channel), policy(3, 10));

        let result = dispatcher.dispatch(&request()).await;

        assert!(result.succeeded);
        assert_eq!(result.attempt_count(), 1);
        assert_eq!(result.attempts[0].outcome, AttemptOutcome::Success);
        assert!(result.attempts[0].error_detail.is_none());
    }

    #[tokio::test]
    async fn test_terminal_failure_stops_immediately() {
        let channel = Arc::new(ScriptedChannel::new(vec![Err(terminal()), Ok(())]));
        let dispatcher = Dispatcher::new(Arc::clone(&channel), policy(5, 10));

        let result = dispatcher.dispatch(&request()).await;

        assert!(!result.succeeded);
        assert_eq!(result.attempt_count(), 1);
        assert_eq!(result.attempts[0].outcome, AttemptOutcome::TerminalFailure);
        assert_eq!(result.attempts[0].error_detail.as_deref(), Some("bad credentials"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retryable_failures_exhaust_budget_with_backoff() {
        let channel = Arc::new(ScriptedChannel::new(vec![
            Err(retryable()),
            Err(retryable()),
            Err(retryable()),
        ]));
        let dispatcher = Dispatcher::new(Arc::clone(&channel), policy(3, 1000));

        let result = dispatcher.dispatch(&request()).await;

        assert!(!result.succeeded);
        assert_eq!(result.attempt_count(), 3);
        for (i, attempt) in result.attempts.iter().enumerate() {
            assert_eq!(attempt.attempt_number, i as u32 + 1);
            assert_eq!(attempt.outcome, AttemptOutcome::RetryableFailure);
        }

        // base × 1 between attempts 1→2, base × 2 between attempts 2→3
        let times = channel.call_times().await;
        assert_eq!(times.len(), 3);
        assert_eq!(times[1] - times[0], Duration::from_secs(1));
        assert_eq!(times[2] - times[1], Duration::from_secs(2));
    }

    #[tokio::test(start_paused = true)]
    async fn test_retryable_then_success() {
        let channel = Arc::new(ScriptedChannel::new(vec![Err(retryable()), Err(retryable()), Ok(())]));
        let dispatcher = Dispatcher::new(Arc::clone(&channel), policy(3, 1000));

        let result = dispatcher.dispatch(&request()).await;

        assert!(result.succeeded);
        assert_eq!(result.attempt_count(), 3);
        assert_eq!(result.attempts[0].outcome, AttemptOutcome::RetryableFailure);
        assert_eq!(result.attempts[1].outcome, AttemptOutcome::RetryableFailure);
        assert_eq!(result.attempts[2].outcome, AttemptOutcome::Success);
    }

    #[tokio::test(start_paused = true)]
    async fn test_deadline_returns_partial_attempt_log() {
        let channel = Arc::new(ScriptedChannel::new(vec![
            Err(retryable()),
            Err(retryable()),
            Err(retryable()),
            Err(retryable()),
            Err(retryable()),
        ]));
        let dispatcher = Dispatcher::new(Arc::clone(&channel), policy(5, 1000));

        // Second backoff would be 2s starting at t=1s; the deadline at 1.5s
        // cuts the call off after two attempts.
        let deadline = Instant::now() + Duration::from_millis(1500);
        let result = dispatcher.dispatch_with_deadline(&request(), deadline).await;

        assert!(!result.succeeded);
        assert_eq!(result.attempt_count(), 2);
    }

    #[tokio::test]
    async fn test_single_attempt_budget() {
        let channel = Arc::new(ScriptedChannel::new(vec![Err(retryable())]));
        let dispatcher = Dispatcher::new(Arc::clone(&channel), policy(1, 10));

        let result = dispatcher.dispatch(&request()).await;

        assert!(!result.succeeded);
        assert_eq!(result.attempt_count(), 1);
    }
}
