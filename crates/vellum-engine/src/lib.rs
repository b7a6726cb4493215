//! Vellum engine crate.
//!
//! A script-driven real-time 2D scene engine: scripts build and mutate a
//! retained scene tree through handle-based bindings, and a pluggable
//! renderer walks that tree once per frame.

pub mod codec;
pub mod coords;
pub mod core;
pub mod logging;
pub mod render;
pub mod scene;
pub mod script;
pub mod time;
