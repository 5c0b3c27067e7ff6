//! Scripted collaborators shared by the scenario tests.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use mower_lib::config::AppConfig;
use mower_lib::errors::{MowerError, MowerResult};
use mower_lib::executor::device::{Device, KeyCode};
use mower_lib::perception::traits::Perception;
use mower_lib::perception::types::{Coordinate, Landmark, Location, Pixel, Scene};
use mower_lib::solver::prompt::{CredentialField, TextPrompt};
use mower_lib::solver::Solver;

pub const APP_ID: &str = "com.example.game";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeviceAction {
    Launch(String),
    Tap(Coordinate),
    Swipe(Vec<Coordinate>, u64),
    SmoothSwipe(Vec<Coordinate>, Vec<u64>, u64),
    Text(String),
    Key(KeyCode),
}

pub struct MockDevice {
    pub focus: String,
    pub actions: Mutex<Vec<DeviceAction>>,
}

impl MockDevice {
    pub fn focused() -> Arc<Self> {
        Self::with_focus(APP_ID)
    }

    pub fn with_focus(focus: &str) -> Arc<Self> {
        Arc::new(Self {
            focus: focus.to_string(),
            actions: Mutex::new(Vec::new()),
        })
    }

    pub fn actions(&self) -> Vec<DeviceAction> {
        self.actions.lock().unwrap().clone()
    }

    pub fn taps(&self) -> Vec<Coordinate> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                DeviceAction::Tap(p) => Some(p),
                _ => None,
            })
            .collect()
    }

    pub fn texts(&self) -> Vec<String> {
        self.actions()
            .into_iter()
            .filter_map(|a| match a {
                DeviceAction::Text(t) => Some(t),
                _ => None,
            })
            .collect()
    }

    fn record(&self, action: DeviceAction) {
        self.actions.lock().unwrap().push(action);
    }
}

#[async_trait]
impl Device for MockDevice {
    async fn launch(&self, app_id: &str) -> MowerResult<()> {
        self.record(DeviceAction::Launch(app_id.to_string()));
        Ok(())
    }

    async fn current_focus(&self) -> MowerResult<String> {
        Ok(self.focus.clone())
    }

    async fn tap(&self, point: Coordinate) -> MowerResult<()> {
        self.record(DeviceAction::Tap(point));
        Ok(())
    }

    async fn swipe(&self, points: &[Coordinate], duration_ms: u64) -> MowerResult<()> {
        self.record(DeviceAction::Swipe(points.to_vec(), duration_ms));
        Ok(())
    }

    async fn smooth_swipe(
        &self,
        points: &[Coordinate],
        durations_ms: &[u64],
        up_wait_ms: u64,
    ) -> MowerResult<()> {
        self.record(DeviceAction::SmoothSwipe(
            points.to_vec(),
            durations_ms.to_vec(),
            up_wait_ms,
        ));
        Ok(())
    }

    async fn send_text(&self, text: &str) -> MowerResult<()> {
        self.record(DeviceAction::Text(text.to_string()));
        Ok(())
    }

    async fn send_key(&self, key: KeyCode) -> MowerResult<()> {
        self.record(DeviceAction::Key(key));
        Ok(())
    }

    async fn screencap(&self) -> MowerResult<Vec<u8>> {
        Err(MowerError::Device("mock device has no screen".into()))
    }
}

/// Counters the test inspects after the perception box moved into the solver.
#[derive(Debug, Default)]
pub struct PerceptionLog {
    pub refreshes: u32,
    pub finds: HashMap<String, u32>,
    pub classifications: u32,
}

/// Walks through `scenes`, one step per refresh, staying on the last one.
pub struct ScriptedPerception {
    scenes: Vec<MowerResult<Scene>>,
    cursor: usize,
    elements: HashMap<String, Location>,
    landmarks: HashMap<Landmark, Location>,
    size: (i32, i32),
    pub log: Arc<Mutex<PerceptionLog>>,
}

impl ScriptedPerception {
    pub fn new(scenes: &[Scene]) -> Self {
        Self {
            scenes: scenes.iter().map(|s| Ok(*s)).collect(),
            cursor: 0,
            elements: HashMap::new(),
            landmarks: HashMap::new(),
            size: (1280, 720),
            log: Arc::new(Mutex::new(PerceptionLog::default())),
        }
    }

    pub fn failing(error: impl Fn() -> MowerError) -> Self {
        let mut p = Self::new(&[]);
        p.scenes = vec![Err(error())];
        p
    }

    pub fn element(mut self, name: &str, location: Location) -> Self {
        self.elements.insert(name.to_string(), location);
        self
    }

    pub fn landmark(mut self, landmark: Landmark, location: Location) -> Self {
        self.landmarks.insert(landmark, location);
        self
    }

    pub fn log(&self) -> Arc<Mutex<PerceptionLog>> {
        self.log.clone()
    }
}

#[async_trait]
impl Perception for ScriptedPerception {
    async fn classify_scene(&mut self) -> MowerResult<Scene> {
        self.log.lock().unwrap().classifications += 1;
        match self.scenes.get(self.cursor) {
            Some(Ok(scene)) => Ok(*scene),
            Some(Err(MowerError::Recognize(msg))) => Err(MowerError::Recognize(msg.clone())),
            Some(Err(MowerError::Strategy(msg))) => Err(MowerError::Strategy(msg.clone())),
            Some(Err(e)) => Err(MowerError::Device(e.to_string())),
            None => Ok(Scene::None),
        }
    }

    async fn find(
        &mut self,
        element: &str,
        _scope: Option<&Location>,
    ) -> MowerResult<Option<Location>> {
        *self
            .log
            .lock()
            .unwrap()
            .finds
            .entry(element.to_string())
            .or_default() += 1;
        Ok(self.elements.get(element).copied())
    }

    async fn locate(&mut self, landmark: Landmark) -> MowerResult<Option<Location>> {
        Ok(self.landmarks.get(&landmark).copied())
    }

    async fn sample_color(&mut self, _at: Coordinate) -> MowerResult<Pixel> {
        Ok(image::Rgb([255, 255, 255]))
    }

    async fn refresh(&mut self, _rebuild: bool) -> MowerResult<()> {
        self.log.lock().unwrap().refreshes += 1;
        if self.cursor + 1 < self.scenes.len() {
            self.cursor += 1;
        }
        Ok(())
    }

    fn screen_size(&self) -> (i32, i32) {
        self.size
    }
}

/// Answers fixed credentials and remembers what was asked.
pub struct RecordingPrompt {
    pub asked: Arc<Mutex<Vec<CredentialField>>>,
}

impl RecordingPrompt {
    pub fn new() -> (Self, Arc<Mutex<Vec<CredentialField>>>) {
        let asked = Arc::new(Mutex::new(Vec::new()));
        (
            Self {
                asked: asked.clone(),
            },
            asked,
        )
    }
}

#[async_trait]
impl TextPrompt for RecordingPrompt {
    async fn ask(&mut self, field: CredentialField) -> MowerResult<String> {
        self.asked.lock().unwrap().push(field);
        Ok(match field {
            CredentialField::Username => " doctor\n".to_string(),
            CredentialField::Password => "originium".to_string(),
        })
    }
}

pub fn config(max_retry_time: u32) -> AppConfig {
    let mut config = AppConfig::for_app(APP_ID);
    config.retry.max_retry_time = max_retry_time;
    config
}

pub async fn solver_with(
    config: AppConfig,
    device: Arc<MockDevice>,
    perception: ScriptedPerception,
) -> Solver {
    let (prompt, _) = RecordingPrompt::new();
    Solver::builder(config)
        .device(device)
        .perception(Box::new(perception))
        .prompt(Box::new(prompt))
        .build()
        .await
        .unwrap()
}
