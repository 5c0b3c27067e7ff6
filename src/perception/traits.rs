use async_trait::async_trait;

use crate::errors::MowerResult;
use crate::perception::types::{Coordinate, Landmark, Location, Pixel, Scene};

/// Screen-state recognition for one device session.
///
/// Implementations cache the current frame until [`Perception::refresh`] is
/// called and report any inability to classify or locate through
/// `MowerError::Recognize`, never through an ambiguous success value.
#[async_trait]
pub trait Perception: Send {
    /// Classifies the cached frame.
    async fn classify_scene(&mut self) -> MowerResult<Scene>;

    /// Looks up a named template element, optionally restricted to `scope`.
    /// `Ok(None)` means the element is not on screen.
    async fn find(&mut self, element: &str, scope: Option<&Location>)
        -> MowerResult<Option<Location>>;

    async fn locate(&mut self, landmark: Landmark) -> MowerResult<Option<Location>>;

    async fn sample_color(&mut self, at: Coordinate) -> MowerResult<Pixel>;

    /// Re-captures the screen. `rebuild` also drops derived caches
    /// (scene classification, feature maps).
    async fn refresh(&mut self, rebuild: bool) -> MowerResult<()>;

    /// Width and height of the captured screen in device pixels.
    fn screen_size(&self) -> (i32, i32);
}
