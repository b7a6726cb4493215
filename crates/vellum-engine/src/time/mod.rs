//! Frame timing.
//!
//! One `FrameClock` per controller; `tick()` once per frame yields the
//! delta handed to the script's update entry point.

mod frame_clock;

pub use frame_clock::{FrameClock, FrameTime};
