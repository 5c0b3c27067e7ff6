/// Phase of a retry loop.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoopState {
    Running,
    Completed,
    Aborted { reason: String },
    Exhausted,
}

/// How a retry loop ended.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RetryOutcome {
    /// The body reported its goal reached.
    Completed,
    /// The body raised a strategy error.
    Aborted { reason: String },
    /// Transient failures used up the whole budget.
    Exhausted,
}

impl RetryOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, RetryOutcome::Completed)
    }
}

impl From<RetryOutcome> for LoopState {
    fn from(outcome: RetryOutcome) -> Self {
        match outcome {
            RetryOutcome::Completed => LoopState::Completed,
            RetryOutcome::Aborted { reason } => LoopState::Aborted { reason },
            RetryOutcome::Exhausted => LoopState::Exhausted,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryReport {
    pub outcome: RetryOutcome,
    /// Calls made to the body, including the final one.
    pub attempts: u32,
    /// Transient failures absorbed over the whole loop.
    pub retries_consumed: u32,
}
