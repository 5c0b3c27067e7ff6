use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::config::AppConfig;
use crate::errors::MowerResult;
use crate::executor::coordinator::{resolve_weighted, AnchorWeights};
use crate::executor::device::{Device, KeyCode};
use crate::executor::gesture;
use crate::perception::traits::Perception;
use crate::perception::types::{Coordinate, Landmark, Location, Pixel, Scene};
use crate::solver::builder::SolverBuilder;
use crate::solver::prompt::{CredentialField, TextPrompt};
use crate::solver::retry::{Attempt, Resample, RetryExecutor};
use crate::solver::state::RetryOutcome;
use crate::solver::task::Task;

/// Off-field point tapped after typing to dismiss the soft keyboard.
const NEUTRAL_POINT: Coordinate = Coordinate::new(0, 0);

/// Pause-then-reobserve applied after an action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settle {
    pub interval: Duration,
    /// Drop derived perception caches on refresh.
    pub rebuild: bool,
}

impl Settle {
    pub fn after(interval: Duration) -> Self {
        Self {
            interval,
            rebuild: true,
        }
    }

    pub fn after_ms(ms: u64) -> Self {
        Self::after(Duration::from_millis(ms))
    }

    /// No wait and no re-observation.
    pub fn none() -> Self {
        Self {
            interval: Duration::ZERO,
            rebuild: false,
        }
    }

    pub fn without_rebuild(mut self) -> Self {
        self.rebuild = false;
        self
    }

    pub fn is_none(&self) -> bool {
        self.interval.is_zero()
    }
}

/// Owns one device session and one perception session and exposes the
/// primitive operations task logic is written in.
pub struct Solver {
    session_id: String,
    config: AppConfig,
    device: Arc<dyn Device>,
    recog: Box<dyn Perception>,
    prompt: Box<dyn TextPrompt>,
}

impl Solver {
    pub fn builder(config: AppConfig) -> SolverBuilder {
        SolverBuilder::new(config)
    }

    /// Assembles a solver from ready collaborators without touching the device.
    pub(crate) fn from_parts(
        config: AppConfig,
        device: Arc<dyn Device>,
        recog: Box<dyn Perception>,
        prompt: Box<dyn TextPrompt>,
    ) -> Self {
        Self {
            session_id: uuid::Uuid::new_v4().to_string(),
            config,
            device,
            recog,
            prompt,
        }
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    pub fn device(&self) -> &Arc<dyn Device> {
        &self.device
    }

    /// A fresh executor carrying the configured retry budget.
    pub fn retry_executor(&self) -> RetryExecutor {
        RetryExecutor::from_config(&self.config.retry)
    }

    /// Settle used by plain taps and swipes.
    pub fn default_settle(&self) -> Settle {
        Settle::after_ms(self.config.timing.default_settle_ms)
    }

    /// Runs `task` under the top-level retry loop.
    ///
    /// A strategy failure ends the run as `Aborted` and is not propagated;
    /// defects are.
    pub async fn run(&mut self, task: &mut dyn Task) -> MowerResult<RetryOutcome> {
        let name = task.name().to_string();
        tracing::info!(session = %self.session_id, task = %name, "task started");

        let mut executor = self.retry_executor();
        let mut step = TaskAttempt { task };
        let report = executor.run(self, &mut step).await?;

        match &report.outcome {
            RetryOutcome::Completed => {
                tracing::info!(session = %self.session_id, task = %name, attempts = report.attempts, "task completed")
            }
            RetryOutcome::Aborted { reason } => {
                tracing::error!(session = %self.session_id, task = %name, reason = %reason, "task aborted")
            }
            RetryOutcome::Exhausted => tracing::warn!(
                session = %self.session_id,
                task = %name,
                retries = report.retries_consumed,
                "task gave up after exhausting retries"
            ),
        }
        Ok(report.outcome)
    }

    // ── Observation ───────────────────────────────────────────────────────

    /// Waits, then re-captures the screen.
    pub async fn sleep(&mut self, interval: Duration, rebuild: bool) -> MowerResult<()> {
        tokio::time::sleep(interval).await;
        self.recog.refresh(rebuild).await
    }

    async fn settle(&mut self, settle: Settle) -> MowerResult<()> {
        if settle.is_none() {
            return Ok(());
        }
        self.sleep(settle.interval, settle.rebuild).await
    }

    pub async fn scene(&mut self) -> MowerResult<Scene> {
        self.recog.classify_scene().await
    }

    pub async fn is_login(&mut self) -> MowerResult<bool> {
        Ok(self.scene().await?.is_logged_in())
    }

    pub async fn get_color(&mut self, at: Coordinate) -> MowerResult<Pixel> {
        self.recog.sample_color(at).await
    }

    pub async fn find(&mut self, element: &str) -> MowerResult<Option<Location>> {
        self.recog.find(element, None).await
    }

    pub async fn find_in(&mut self, element: &str, scope: &Location) -> MowerResult<Option<Location>> {
        self.recog.find(element, Some(scope)).await
    }

    pub async fn locate(&mut self, landmark: Landmark) -> MowerResult<Option<Location>> {
        self.recog.locate(landmark).await
    }

    pub fn screen_size(&self) -> (i32, i32) {
        self.recog.screen_size()
    }

    // ── Touch primitives ─────────────────────────────────────────────────

    /// Taps inside `location`; a missing location is a recognition failure.
    pub async fn tap(
        &mut self,
        location: Option<&Location>,
        anchor: AnchorWeights,
        settle: Settle,
    ) -> MowerResult<()> {
        let pos = resolve_weighted(location, anchor)?;
        tracing::debug!(x = pos.x, y = pos.y, "tap");
        self.device.tap(pos).await?;
        self.settle(settle).await
    }

    pub async fn tap_point(&mut self, point: Coordinate, settle: Settle) -> MowerResult<()> {
        self.tap(Some(&Location::Coordinate(point)), AnchorWeights::CENTER, settle)
            .await
    }

    /// Finds `element` and taps it. With `detected` set, an absent element
    /// returns `Ok(false)` instead of failing.
    pub async fn tap_element(
        &mut self,
        element: &str,
        anchor: AnchorWeights,
        settle: Settle,
        detected: bool,
    ) -> MowerResult<bool> {
        let found = self.find(element).await?;
        self.tap_found(element, found, anchor, settle, detected).await
    }

    /// Like [`Solver::tap_element`] for detector-supplied landmarks.
    pub async fn tap_landmark(
        &mut self,
        landmark: Landmark,
        anchor: AnchorWeights,
        settle: Settle,
        detected: bool,
    ) -> MowerResult<bool> {
        let found = self.locate(landmark).await?;
        self.tap_found(&format!("{landmark:?}"), found, anchor, settle, detected)
            .await
    }

    async fn tap_found(
        &mut self,
        what: &str,
        found: Option<Location>,
        anchor: AnchorWeights,
        settle: Settle,
        detected: bool,
    ) -> MowerResult<bool> {
        if found.is_none() {
            if detected {
                return Ok(false);
            }
            tracing::debug!(element = what, "element not on screen");
        }
        self.tap(found.as_ref(), anchor, settle).await?;
        Ok(true)
    }

    /// Single straight drag from `start` to `start + movement`.
    pub async fn swipe(
        &mut self,
        start: Coordinate,
        movement: Coordinate,
        duration_ms: u64,
        settle: Settle,
    ) -> MowerResult<()> {
        let points = gesture::straight(start, movement);
        self.swipe_sequence(&points, duration_ms, settle).await
    }

    /// Drags through explicit waypoints.
    pub async fn swipe_sequence(
        &mut self,
        points: &[Coordinate],
        duration_ms: u64,
        settle: Settle,
    ) -> MowerResult<()> {
        tracing::debug!(points = points.len(), duration_ms, "swipe");
        self.device.swipe(points, duration_ms).await?;
        self.settle(settle).await
    }

    /// Drags from `start` through successive relative movements.
    pub async fn swipe_chain(
        &mut self,
        start: Coordinate,
        movements: &[Coordinate],
        duration_ms: u64,
        settle: Settle,
    ) -> MowerResult<()> {
        let points = gesture::chain(start, movements);
        self.swipe_sequence(&points, duration_ms, settle).await
    }

    /// Axis-aligned drag without trailing momentum; see [`gesture::no_inertia`].
    pub async fn swipe_no_inertia(
        &mut self,
        start: Coordinate,
        movement: Coordinate,
        duration_ms: u64,
        settle: Settle,
    ) -> MowerResult<()> {
        let path = gesture::no_inertia(start, movement, duration_ms)?;
        tracing::debug!(durations = ?path.durations_ms, "no-inertia swipe");
        self.device
            .smooth_swipe(&path.points, &path.durations_ms, path.up_wait_ms)
            .await?;
        self.settle(settle).await
    }

    pub async fn back(&mut self, settle: Settle) -> MowerResult<()> {
        self.device.send_key(KeyCode::Back).await?;
        self.settle(settle).await
    }

    /// Taps the input field, types the prompted text and taps away to close
    /// the keyboard.
    pub async fn input(&mut self, field: CredentialField, area: &Location) -> MowerResult<()> {
        tracing::debug!(field = ?field, area = ?area, "input");
        let pos = area.resolve(0.5, 0.5);
        self.device.tap(pos).await?;
        let text = self.prompt.ask(field).await?;
        self.device.send_text(text.trim()).await?;
        self.device.tap(NEUTRAL_POINT).await
    }

    /// Makes sure the navigation bar is open.
    ///
    /// Returns `Ok(false)` when no navigation toggle is on screen or the bar
    /// never shows up within the retry budget.
    pub async fn open_navigation(&mut self) -> MowerResult<bool> {
        let settle = self.default_settle();
        for _ in 0..self.config.retry.max_retry_time {
            if self.scene().await? == Scene::NavigationBar {
                return Ok(true);
            }
            if !self
                .tap_landmark(Landmark::NavButton, AnchorWeights::CENTER, settle, true)
                .await?
            {
                return Ok(false);
            }
        }
        Ok(false)
    }
}

#[async_trait]
impl Resample for Solver {
    async fn resample(&mut self, pause: Duration) -> MowerResult<()> {
        self.sleep(pause, true).await
    }
}

struct TaskAttempt<'a> {
    task: &'a mut dyn Task,
}

#[async_trait]
impl<'a> Attempt<Solver> for TaskAttempt<'a> {
    async fn attempt(&mut self, solver: &mut Solver) -> MowerResult<bool> {
        self.task.transition(solver).await
    }
}
