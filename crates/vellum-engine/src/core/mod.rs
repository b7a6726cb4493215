//! Top-level glue: the controller that ties host, scene and renderer into
//! one event-driven loop.

mod controller;

pub use controller::Controller;
