use std::time::Duration;

use async_trait::async_trait;

use crate::errors::{MowerError, MowerResult};
use crate::executor::coordinator::AnchorWeights;
use crate::perception::types::{Coordinate, Landmark, Scene};
use crate::solver::engine::{Settle, Solver};
use crate::solver::prompt::CredentialField;
use crate::solver::retry::Attempt;
use crate::solver::state::RetryOutcome;

/// One step of the login table. Done once the scene is outside the login
/// family, the reserved band and the empty sentinel.
pub struct LoginProcedure;

#[async_trait]
impl Attempt<Solver> for LoginProcedure {
    async fn attempt(&mut self, solver: &mut Solver) -> MowerResult<bool> {
        let scene = solver.scene().await?;
        if scene.is_logged_in() {
            return Ok(true);
        }

        let timing = solver.config().timing.clone();
        let settle = solver.default_settle();
        tracing::debug!(scene = ?scene, "login step");

        match scene {
            Scene::LoginStart => {
                let (w, h) = solver.screen_size();
                solver
                    .tap_point(
                        Coordinate::new(w / 2, h - 10),
                        Settle::after_ms(timing.login_start_settle_ms),
                    )
                    .await?;
            }
            Scene::LoginQuickly => {
                solver
                    .tap_element("login_awake", AnchorWeights::CENTER, settle, false)
                    .await?;
            }
            Scene::LoginMain => {
                solver
                    .tap_element("login_account", AnchorWeights::CENTER, settle, false)
                    .await?;
            }
            Scene::LoginInput => {
                if let Some(area) = solver.find("login_username").await? {
                    solver.input(CredentialField::Username, &area).await?;
                }
                if let Some(area) = solver.find("login_password").await? {
                    solver.input(CredentialField::Password, &area).await?;
                }
                solver
                    .tap_element("login_button", AnchorWeights::CENTER, settle, false)
                    .await?;
            }
            Scene::LoginAnnounce => {
                solver
                    .tap_element("login_iknow", AnchorWeights::CENTER, settle, false)
                    .await?;
            }
            Scene::LoginLoading | Scene::Loading => {
                solver
                    .sleep(Duration::from_millis(timing.loading_wait_ms), true)
                    .await?;
            }
            Scene::Confirm => {
                let confirm = solver.locate(Landmark::Confirm).await?;
                solver
                    .tap(confirm.as_ref(), AnchorWeights::CENTER, settle)
                    .await?;
            }
            other => {
                return Err(MowerError::recognize(format!(
                    "unanticipated scene during login: {other:?}"
                )))
            }
        }
        Ok(false)
    }
}

/// Drives the app into a logged-in state.
pub async fn login(solver: &mut Solver) -> MowerResult<()> {
    tracing::info!(session = %solver.session_id(), "login");
    let mut executor = solver.retry_executor();
    let report = executor.run(solver, &mut LoginProcedure).await?;
    match report.outcome {
        RetryOutcome::Completed => Ok(()),
        RetryOutcome::Exhausted => {
            // the executor re-observed after the last failure
            if solver.is_login().await? {
                return Ok(());
            }
            Err(MowerError::strategy(format!(
                "login gave up after {} recognition failures",
                report.retries_consumed
            )))
        }
        RetryOutcome::Aborted { reason } => Err(MowerError::strategy(reason)),
    }
}
