//! Platform abstraction layer
//!
//! Turns device input (top-left origin, y down) into canonical frame input
//! (bottom-left origin, y up).

pub mod input;

pub use input::{DeviceEvent, InputQueue};
