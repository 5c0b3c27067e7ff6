//! `adb`-backed [`Device`].
//!
//! Every call spawns `adb [-s serial] <args>` through `tokio::process` and
//! waits for it to exit, so an action has been delivered by the time the call
//! returns. A call that outlives the configured deadline is killed and
//! reported as a device error.

use std::process::Output;
use std::time::Duration;

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;

use crate::config::DeviceConfig;
use crate::errors::{MowerError, MowerResult};
use crate::executor::device::{Device, KeyCode};
use crate::executor::input::{self, MotionAction, MOTION_STEP_MS};
use crate::executor::text_input::escape_for_input;
use crate::perception::types::Coordinate;

pub struct AdbDevice {
    adb_path: String,
    serial: Option<String>,
    timeout: Duration,
    focus_re: Regex,
}

impl AdbDevice {
    pub fn new(adb_path: impl Into<String>, serial: Option<String>) -> MowerResult<Self> {
        let focus_re = Regex::new(r"mCurrentFocus=Window\{\S+ \S+ ([^/\s}]+)")
            .map_err(|e| MowerError::Config(format!("focus pattern: {e}")))?;
        Ok(Self {
            adb_path: adb_path.into(),
            serial,
            timeout: DeviceConfig::default().command_timeout(),
            focus_re,
        })
    }

    pub fn from_config(config: &DeviceConfig) -> MowerResult<Self> {
        Ok(Self::new(config.adb_path.clone(), config.serial.clone())?
            .with_timeout(config.command_timeout()))
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.adb_path);
        cmd.kill_on_drop(true);
        if let Some(serial) = &self.serial {
            cmd.arg("-s").arg(serial);
        }
        cmd
    }

    async fn run(&self, mode: &str, args: &[String]) -> MowerResult<Output> {
        let mut cmd = self.command();
        cmd.arg(mode).args(args);
        let output = tokio::time::timeout(self.timeout, cmd.output())
            .await
            .map_err(|_| {
                MowerError::Device(format!(
                    "adb {mode} {} timed out after {}ms",
                    args.join(" "),
                    self.timeout.as_millis()
                ))
            })??;
        Ok(output)
    }

    async fn exec_out(&self, args: &[String]) -> MowerResult<Vec<u8>> {
        let output = self.run("exec-out", args).await?;
        if !output.status.success() {
            return Err(MowerError::Device(format!(
                "adb exec-out {} failed ({}): {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(output.stdout)
    }

    async fn shell(&self, args: &[String]) -> MowerResult<String> {
        tracing::debug!(args = %args.join(" "), "adb shell");
        let output = self.run("shell", args).await?;
        if !output.status.success() {
            return Err(MowerError::Device(format!(
                "adb shell {} failed ({}): {}",
                args.join(" "),
                output.status,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Extracts the focused package from `dumpsys window` output.
    pub fn parse_focus(&self, dumpsys: &str) -> Option<String> {
        self.focus_re
            .captures(dumpsys)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

#[async_trait]
impl Device for AdbDevice {
    async fn launch(&self, app_id: &str) -> MowerResult<()> {
        tracing::info!(app_id, "launching app");
        self.shell(&input::launch_args(app_id)).await?;
        Ok(())
    }

    async fn current_focus(&self) -> MowerResult<String> {
        let dump = self
            .shell(&["dumpsys".to_string(), "window".to_string()])
            .await?;
        Ok(self.parse_focus(&dump).unwrap_or_default())
    }

    async fn tap(&self, point: Coordinate) -> MowerResult<()> {
        self.shell(&input::tap_args(point)).await?;
        Ok(())
    }

    async fn swipe(&self, points: &[Coordinate], duration_ms: u64) -> MowerResult<()> {
        match points {
            [] | [_] => Err(MowerError::Device(format!(
                "swipe needs at least two points, got {}",
                points.len()
            ))),
            [from, to] => {
                self.shell(&input::swipe_args(*from, *to, duration_ms)).await?;
                Ok(())
            }
            _ => {
                let legs = (points.len() - 1) as u64;
                let per_leg = vec![duration_ms / legs; points.len() - 1];
                self.smooth_swipe(points, &per_leg, 0).await
            }
        }
    }

    async fn smooth_swipe(
        &self,
        points: &[Coordinate],
        durations_ms: &[u64],
        up_wait_ms: u64,
    ) -> MowerResult<()> {
        let Some((&first, rest)) = points.split_first() else {
            return Err(MowerError::Device("smooth swipe without points".into()));
        };
        if durations_ms.len() != rest.len() {
            return Err(MowerError::Device(format!(
                "smooth swipe has {} legs but {} durations",
                rest.len(),
                durations_ms.len()
            )));
        }

        self.shell(&input::motion_args(MotionAction::Down, first)).await?;
        let mut cursor = first;
        for (&target, &leg_ms) in rest.iter().zip(durations_ms) {
            for step in input::interpolate(cursor, target, leg_ms) {
                self.shell(&input::motion_args(MotionAction::Move, step)).await?;
                tokio::time::sleep(Duration::from_millis(MOTION_STEP_MS)).await;
            }
            cursor = target;
        }
        if up_wait_ms > 0 {
            tokio::time::sleep(Duration::from_millis(up_wait_ms)).await;
        }
        self.shell(&input::motion_args(MotionAction::Up, cursor)).await?;
        Ok(())
    }

    async fn send_text(&self, text: &str) -> MowerResult<()> {
        let escaped = escape_for_input(text)?;
        self.shell(&input::text_args(&escaped)).await?;
        Ok(())
    }

    async fn send_key(&self, key: KeyCode) -> MowerResult<()> {
        self.shell(&input::keyevent_args(key)).await?;
        Ok(())
    }

    async fn screencap(&self) -> MowerResult<Vec<u8>> {
        self.exec_out(&["screencap".to_string(), "-p".to_string()])
            .await
    }
}
