pub mod adb;
pub mod coordinator;
pub mod device;
pub mod gesture;
pub mod input;
pub mod text_input;

pub use adb::AdbDevice;
pub use device::{Device, KeyCode};
