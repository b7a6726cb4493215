//! The script/native boundary: dynamically-typed values, the capability
//! bridge scripts drive the scene through, and the host abstraction that
//! keeps the interpreter itself outside the engine.

mod bridge;
pub mod dispatch;
mod error;
mod host;
mod value;

pub use bridge::Bridge;
pub use error::ScriptError;
pub use host::{CallOutcome, ScriptFault, ScriptHost};
pub use value::Value;
