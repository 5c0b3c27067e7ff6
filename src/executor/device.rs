use async_trait::async_trait;

use crate::errors::MowerResult;
use crate::perception::types::Coordinate;

/// Android key events the solver sends.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Home,
    Back,
    Enter,
    Delete,
}

impl KeyCode {
    /// Numeric `KEYCODE_*` value understood by `input keyevent`.
    pub fn android_code(self) -> u32 {
        match self {
            KeyCode::Home => 3,
            KeyCode::Back => 4,
            KeyCode::Enter => 66,
            KeyCode::Delete => 67,
        }
    }
}

/// Touch transport for one device.
///
/// Every call returns once the action has been delivered; the UI may still be
/// animating, so callers settle and re-observe before trusting the screen.
#[async_trait]
pub trait Device: Send + Sync {
    async fn launch(&self, app_id: &str) -> MowerResult<()>;

    /// Package of the currently focused window.
    async fn current_focus(&self) -> MowerResult<String>;

    async fn tap(&self, point: Coordinate) -> MowerResult<()>;

    /// Drags through `points` over `duration_ms` in total.
    async fn swipe(&self, points: &[Coordinate], duration_ms: u64) -> MowerResult<()>;

    /// Drags through `points` with one duration per segment and holds the
    /// touch for `up_wait_ms` before releasing.
    async fn smooth_swipe(
        &self,
        points: &[Coordinate],
        durations_ms: &[u64],
        up_wait_ms: u64,
    ) -> MowerResult<()>;

    async fn send_text(&self, text: &str) -> MowerResult<()>;

    async fn send_key(&self, key: KeyCode) -> MowerResult<()>;

    /// PNG bytes of the current screen.
    async fn screencap(&self) -> MowerResult<Vec<u8>>;
}
