//! Bounded retry loop separating transient recognition failures from
//! strategic aborts and defects.

use std::time::Duration;

use async_trait::async_trait;

use crate::config::RetryConfig;
use crate::errors::{ErrorTier, MowerError, MowerResult};
use crate::solver::state::{LoopState, RetryOutcome, RetryReport};

/// One unit of progress run against a context `C`.
/// `Ok(true)` means the goal is reached.
#[async_trait]
pub trait Attempt<C: Send>: Send {
    async fn attempt(&mut self, ctx: &mut C) -> MowerResult<bool>;
}

/// Pauses and re-acquires observations after a transient failure.
#[async_trait]
pub trait Resample: Send {
    async fn resample(&mut self, pause: Duration) -> MowerResult<()>;
}

/// Remaining transient-failure retries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryBudget {
    max: u32,
    remaining: u32,
}

impl RetryBudget {
    /// A budget always allows at least one retry.
    pub fn new(max: u32) -> Self {
        if max == 0 {
            tracing::warn!("retry budget of 0 raised to 1");
        }
        let max = max.max(1);
        Self {
            max,
            remaining: max,
        }
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    pub fn reset(&mut self) {
        self.remaining = self.max;
    }

    pub fn consume(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }
}

pub struct RetryExecutor {
    budget: RetryBudget,
    pause: Duration,
    state: LoopState,
}

impl RetryExecutor {
    pub fn new(max_retry: u32, pause: Duration) -> Self {
        Self {
            budget: RetryBudget::new(max_retry),
            pause,
            state: LoopState::Running,
        }
    }

    pub fn from_config(config: &RetryConfig) -> Self {
        Self::new(config.max_retry_time, config.retry_pause())
    }

    pub fn budget(&self) -> RetryBudget {
        self.budget
    }

    pub fn state(&self) -> &LoopState {
        &self.state
    }

    /// Drives `body` until it completes, aborts or exhausts the budget.
    ///
    /// Recognition failures consume one retry and trigger a pause plus a fresh
    /// observation, the last one included, so the caller can re-check its goal
    /// against a current screen after `Exhausted`; strategy failures end the loop as `Aborted` without
    /// touching the budget; any other error is returned unchanged. Each
    /// successful attempt refills the budget.
    pub async fn run<C, A>(&mut self, ctx: &mut C, body: &mut A) -> MowerResult<RetryReport>
    where
        C: Resample,
        A: Attempt<C> + ?Sized,
    {
        self.budget.reset();
        self.state = LoopState::Running;
        let mut attempts = 0;
        let mut retries_consumed = 0;

        let outcome = loop {
            attempts += 1;
            match body.attempt(ctx).await {
                Ok(done) => {
                    self.budget.reset();
                    if done {
                        break RetryOutcome::Completed;
                    }
                }
                Err(e) => match e.tier() {
                    ErrorTier::Transient => {
                        self.budget.consume();
                        retries_consumed += 1;
                        tracing::warn!(
                            error = %e,
                            retries_left = self.budget.remaining(),
                            "recognition hiccup, retrying"
                        );
                        ctx.resample(self.pause).await?;
                        if self.budget.is_exhausted() {
                            break RetryOutcome::Exhausted;
                        }
                    }
                    ErrorTier::Strategic => {
                        tracing::error!(error = %e, attempts, "strategy failed, aborting");
                        let reason = match e {
                            MowerError::Strategy(reason) => reason,
                            other => other.to_string(),
                        };
                        break RetryOutcome::Aborted { reason };
                    }
                    ErrorTier::Defect => {
                        self.state = LoopState::Aborted {
                            reason: e.to_string(),
                        };
                        return Err(e);
                    }
                },
            }
        };

        self.state = outcome.clone().into();
        Ok(RetryReport {
            outcome,
            attempts,
            retries_consumed,
        })
    }
}
