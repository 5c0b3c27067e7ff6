pub mod builder;
pub mod engine;
pub mod prompt;
pub mod retry;
pub mod state;
pub mod task;

pub use builder::SolverBuilder;
pub use engine::{Settle, Solver};
pub use prompt::{CredentialField, CredentialPrompt, StdinPrompt, TextPrompt};
pub use retry::{Attempt, Resample, RetryBudget, RetryExecutor};
pub use state::{LoopState, RetryOutcome, RetryReport};
pub use task::Task;
