use async_trait::async_trait;

use crate::errors::MowerResult;
use crate::solver::engine::Solver;

/// Task-specific progress logic driven by [`Solver::run`].
///
/// Each call to `transition` should observe the current scene, perform at
/// most one step towards the goal and return `Ok(true)` once the goal holds.
/// Return `MowerError::Recognize` for ambiguous observations (retried) and
/// `MowerError::Strategy` when the goal cannot be reached (aborts the run).
#[async_trait]
pub trait Task: Send {
    fn name(&self) -> &str {
        "task"
    }

    async fn transition(&mut self, solver: &mut Solver) -> MowerResult<bool>;
}
