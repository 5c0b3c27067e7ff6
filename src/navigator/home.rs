use std::time::Duration;

use async_trait::async_trait;

use crate::errors::{MowerError, MowerResult};
use crate::executor::coordinator::AnchorWeights;
use crate::navigator::login::login;
use crate::perception::types::{Coordinate, Landmark, Scene};
use crate::solver::engine::Solver;
use crate::solver::retry::Attempt;
use crate::solver::state::RetryOutcome;

/// Anchor on the accept side of a double-confirmation dialog.
const DOUBLE_CONFIRM_ANCHOR: AnchorWeights = AnchorWeights::new(0.8, 0.5);

/// One step of the return-to-home table. Done once the index scene shows.
pub struct HomeProcedure;

#[async_trait]
impl Attempt<Solver> for HomeProcedure {
    async fn attempt(&mut self, solver: &mut Solver) -> MowerResult<bool> {
        if solver.scene().await? == Scene::Index {
            return Ok(true);
        }

        let settle = solver.default_settle();
        if solver.open_navigation().await? {
            solver
                .tap_element("nav_index", AnchorWeights::CENTER, settle, false)
                .await?;
            return Ok(false);
        }

        let timing = solver.config().timing.clone();
        let scene = solver.scene().await?;
        tracing::debug!(scene = ?scene, "home step");

        match scene {
            Scene::Index => return Ok(true),
            Scene::Announcement => {
                let close = solver.locate(Landmark::AnnouncementClose).await?;
                solver.tap(close.as_ref(), AnchorWeights::CENTER, settle).await?;
            }
            Scene::Materiel => {
                solver
                    .tap_element("materiel_ico", AnchorWeights::CENTER, settle, false)
                    .await?;
            }
            s if s.is_login_band() => login(solver).await?,
            Scene::Confirm => {
                let confirm = solver.locate(Landmark::Confirm).await?;
                solver.tap(confirm.as_ref(), AnchorWeights::CENTER, settle).await?;
            }
            Scene::Loading => {
                solver
                    .sleep(Duration::from_millis(timing.loading_wait_ms), true)
                    .await?;
            }
            Scene::Skip => {
                solver
                    .tap_element("skip", AnchorWeights::CENTER, settle, false)
                    .await?;
            }
            Scene::OperatorOngoing => {
                solver
                    .sleep(Duration::from_millis(timing.operation_wait_ms), true)
                    .await?;
            }
            Scene::OperatorFinish | Scene::OperatorEliminateFinish => {
                let (w, _) = solver.screen_size();
                solver.tap_point(Coordinate::new(w / 2, 10), settle).await?;
            }
            Scene::DoubleConfirm => {
                solver
                    .tap_element("double_confirm", DOUBLE_CONFIRM_ANCHOR, settle, false)
                    .await?;
            }
            Scene::Mail => {
                let mail = solver
                    .find("mail")
                    .await?
                    .ok_or_else(|| MowerError::recognize("mail region not found"))?;
                // the vertical midpoint of the mail region doubles as x
                let mid_y = mail.resolve(0.5, 0.5).y;
                solver.tap_point(Coordinate::new(mid_y, mid_y), settle).await?;
            }
            other => {
                return Err(MowerError::recognize(format!(
                    "unanticipated scene on the way home: {other:?}"
                )))
            }
        }
        Ok(false)
    }
}

/// Drives the app back to its index scene. Does nothing when already there.
pub async fn back_to_index(solver: &mut Solver) -> MowerResult<()> {
    tracing::info!(session = %solver.session_id(), "back to index");
    let mut executor = solver.retry_executor();
    let report = executor.run(solver, &mut HomeProcedure).await?;
    match report.outcome {
        RetryOutcome::Completed => Ok(()),
        RetryOutcome::Exhausted => {
            if solver.scene().await? == Scene::Index {
                return Ok(());
            }
            Err(MowerError::strategy(format!(
                "could not reach the index scene after {} recognition failures",
                report.retries_consumed
            )))
        }
        RetryOutcome::Aborted { reason } => Err(MowerError::strategy(reason)),
    }
}
