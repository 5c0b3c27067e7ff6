// Argument builders for the `adb shell` commands the device issues.
use crate::executor::device::KeyCode;
use crate::perception::types::Coordinate;

/// Step length used when interpolating a held touch, roughly one 60 Hz frame.
pub const MOTION_STEP_MS: u64 = 16;

pub fn tap_args(p: Coordinate) -> Vec<String> {
    vec![
        "input".into(),
        "tap".into(),
        p.x.to_string(),
        p.y.to_string(),
    ]
}

pub fn swipe_args(from: Coordinate, to: Coordinate, duration_ms: u64) -> Vec<String> {
    vec![
        "input".into(),
        "swipe".into(),
        from.x.to_string(),
        from.y.to_string(),
        to.x.to_string(),
        to.y.to_string(),
        duration_ms.to_string(),
    ]
}

pub fn keyevent_args(key: KeyCode) -> Vec<String> {
    vec![
        "input".into(),
        "keyevent".into(),
        key.android_code().to_string(),
    ]
}

/// `escaped` must already be prepared by `text_input::escape_for_input`.
pub fn text_args(escaped: &str) -> Vec<String> {
    vec!["input".into(), "text".into(), escaped.to_string()]
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MotionAction {
    Down,
    Move,
    Up,
}

impl MotionAction {
    fn as_str(self) -> &'static str {
        match self {
            MotionAction::Down => "DOWN",
            MotionAction::Move => "MOVE",
            MotionAction::Up => "UP",
        }
    }
}

pub fn motion_args(action: MotionAction, p: Coordinate) -> Vec<String> {
    vec![
        "input".into(),
        "motionevent".into(),
        action.as_str().into(),
        p.x.to_string(),
        p.y.to_string(),
    ]
}

pub fn launch_args(app_id: &str) -> Vec<String> {
    vec![
        "monkey".into(),
        "-p".into(),
        app_id.to_string(),
        "-c".into(),
        "android.intent.category.LAUNCHER".into(),
        "1".into(),
    ]
}

/// Intermediate touch positions for one leg, excluding `from` and including `to`.
pub fn interpolate(from: Coordinate, to: Coordinate, duration_ms: u64) -> Vec<Coordinate> {
    let steps = (duration_ms / MOTION_STEP_MS).max(1) as i64;
    (1..=steps)
        .map(|i| {
            let x = from.x as i64 + (to.x - from.x) as i64 * i / steps;
            let y = from.y as i64 + (to.y - from.y) as i64 * i / steps;
            Coordinate::new(x as i32, y as i32)
        })
        .collect()
}
