use std::ops::Add;

use serde::{Deserialize, Serialize};

/// RGB sample taken from a captured frame.
pub type Pixel = image::Rgb<u8>;

/// A device pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: i32,
    pub y: i32,
}

impl Coordinate {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl Add for Coordinate {
    type Output = Coordinate;

    fn add(self, rhs: Coordinate) -> Coordinate {
        Coordinate::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl From<(i32, i32)> for Coordinate {
    fn from((x, y): (i32, i32)) -> Self {
        Coordinate::new(x, y)
    }
}

/// A screen region reported by perception.
///
/// The shape is an explicit discriminant; a point and a two-corner span are
/// never told apart by how many numbers they carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "shape", content = "points", rename_all = "snake_case")]
pub enum Location {
    Coordinate(Coordinate),
    /// Axis-aligned span: `[top-left, bottom-right]`.
    Scope([Coordinate; 2]),
    /// Quadrilateral in winding order `[top-left, bottom-left, bottom-right, top-right]`.
    Polygon([Coordinate; 4]),
}

impl Location {
    pub fn scope(top_left: impl Into<Coordinate>, bottom_right: impl Into<Coordinate>) -> Self {
        Location::Scope([top_left.into(), bottom_right.into()])
    }
}

impl From<Coordinate> for Location {
    fn from(c: Coordinate) -> Self {
        Location::Coordinate(c)
    }
}

/// Points supplied by dedicated detectors rather than template lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Landmark {
    /// The toggle that opens the navigation bar.
    NavButton,
    /// The accept button of a confirmation dialog.
    Confirm,
    /// The close button of an announcement overlay.
    AnnouncementClose,
}

/// Classified UI screen. Codes share a leading band per family
/// (`1xx` login, `6xx` operation, `99xx` reserved/transient).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "i32", into = "i32")]
pub enum Scene {
    /// Sentinel: nothing detected on screen.
    None,
    Undefined,
    Index,
    Materiel,
    Announcement,
    Mail,
    NavigationBar,
    LoginMain,
    LoginInput,
    LoginQuickly,
    LoginLoading,
    LoginStart,
    LoginAnnounce,
    OperatorOngoing,
    OperatorFinish,
    OperatorEliminateFinish,
    Skip,
    DoubleConfirm,
    Loading,
    Confirm,
    /// A code this crate has no name for.
    Unrecognized(i32),
}

impl Scene {
    pub const LOGIN_BAND: i32 = 1;
    pub const RESERVED_BAND: i32 = 99;

    pub fn code(self) -> i32 {
        match self {
            Scene::None => -1,
            Scene::Undefined => 0,
            Scene::Index => 1,
            Scene::Materiel => 2,
            Scene::Announcement => 3,
            Scene::Mail => 4,
            Scene::NavigationBar => 5,
            Scene::LoginMain => 101,
            Scene::LoginInput => 102,
            Scene::LoginQuickly => 103,
            Scene::LoginLoading => 104,
            Scene::LoginStart => 105,
            Scene::LoginAnnounce => 106,
            Scene::OperatorOngoing => 607,
            Scene::OperatorFinish => 608,
            Scene::OperatorEliminateFinish => 611,
            Scene::Skip => 9995,
            Scene::DoubleConfirm => 9996,
            Scene::Loading => 9998,
            Scene::Confirm => 9999,
            Scene::Unrecognized(code) => code,
        }
    }

    pub fn from_code(code: i32) -> Self {
        match code {
            -1 => Scene::None,
            0 => Scene::Undefined,
            1 => Scene::Index,
            2 => Scene::Materiel,
            3 => Scene::Announcement,
            4 => Scene::Mail,
            5 => Scene::NavigationBar,
            101 => Scene::LoginMain,
            102 => Scene::LoginInput,
            103 => Scene::LoginQuickly,
            104 => Scene::LoginLoading,
            105 => Scene::LoginStart,
            106 => Scene::LoginAnnounce,
            607 => Scene::OperatorOngoing,
            608 => Scene::OperatorFinish,
            611 => Scene::OperatorEliminateFinish,
            9995 => Scene::Skip,
            9996 => Scene::DoubleConfirm,
            9998 => Scene::Loading,
            9999 => Scene::Confirm,
            other => Scene::Unrecognized(other),
        }
    }

    /// Family of the scene: `code / 100`, truncating toward zero.
    pub fn band(self) -> i32 {
        self.code() / 100
    }

    pub fn is_login_band(self) -> bool {
        self.band() == Self::LOGIN_BAND
    }

    pub fn is_reserved_band(self) -> bool {
        self.band() == Self::RESERVED_BAND
    }

    /// Anything outside the login family, the reserved band and the sentinel
    /// counts as being inside the game.
    pub fn is_logged_in(self) -> bool {
        !(self.is_login_band() || self.is_reserved_band() || self == Scene::None)
    }
}

impl From<i32> for Scene {
    fn from(code: i32) -> Self {
        Scene::from_code(code)
    }
}

impl From<Scene> for i32 {
    fn from(scene: Scene) -> Self {
        scene.code()
    }
}
