pub mod frame;
pub mod traits;
pub mod types;

pub use traits::Perception;
pub use types::{Coordinate, Landmark, Location, Pixel, Scene};
