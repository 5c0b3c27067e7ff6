// Solver construction: fills in default collaborators and brings the target
// app to the foreground.
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppConfig;
use crate::errors::{MowerError, MowerResult};
use crate::executor::adb::AdbDevice;
use crate::executor::device::Device;
use crate::perception::traits::Perception;
use crate::solver::engine::Solver;
use crate::solver::prompt::{CredentialPrompt, TextPrompt};

pub struct SolverBuilder {
    config: AppConfig,
    device: Option<Arc<dyn Device>>,
    perception: Option<Box<dyn Perception>>,
    prompt: Option<Box<dyn TextPrompt>>,
}

impl SolverBuilder {
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            device: None,
            perception: None,
            prompt: None,
        }
    }

    /// Defaults to an [`AdbDevice`] built from `[device]`.
    pub fn device(mut self, device: Arc<dyn Device>) -> Self {
        self.device = Some(device);
        self
    }

    /// Required.
    pub fn perception(mut self, perception: Box<dyn Perception>) -> Self {
        self.perception = Some(perception);
        self
    }

    /// Defaults to configured credentials with a terminal fallback.
    pub fn prompt(mut self, prompt: Box<dyn TextPrompt>) -> Self {
        self.prompt = Some(prompt);
        self
    }

    /// Connects the collaborators. If the target app is not focused it is
    /// launched and given the configured warm-up before the first capture.
    pub async fn build(self) -> MowerResult<Solver> {
        let SolverBuilder {
            config,
            device,
            perception,
            prompt,
        } = self;

        let device: Arc<dyn Device> = match device {
            Some(device) => device,
            None => Arc::new(AdbDevice::from_config(&config.device)?),
        };
        let mut perception = perception
            .ok_or_else(|| MowerError::Config("no perception session supplied".into()))?;
        let prompt = match prompt {
            Some(prompt) => prompt,
            None => Box::new(CredentialPrompt::new(config.credentials.clone())) as Box<dyn TextPrompt>,
        };

        let focus = device.current_focus().await?;
        if focus != config.app.app_id {
            tracing::info!(focus = %focus, app_id = %config.app.app_id, "target app not focused");
            device.launch(&config.app.app_id).await?;
            tokio::time::sleep(Duration::from_millis(config.timing.launch_warmup_ms)).await;
            perception.refresh(true).await?;
        }

        let solver = Solver::from_parts(config, device, perception, prompt);
        tracing::info!(session = %solver.session_id(), "solver ready");
        Ok(solver)
    }
}
