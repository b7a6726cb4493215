use std::fmt;
use std::path::Path;

use super::{Bridge, Value};

/// Outcome of looking up and invoking a named entry point.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum CallOutcome {
    /// The entry point existed and ran to completion.
    Invoked,
    /// No such entry point is defined; the dispatch is skipped silently.
    Missing,
}

/// A captured script-side failure: message plus whatever stack trace the
/// script environment's introspection produced.
#[derive(Debug, Clone, PartialEq)]
pub struct ScriptFault {
    pub message: String,
    pub trace: Option<String>,
}

impl ScriptFault {
    pub fn new(message: impl Into<String>) -> ScriptFault {
        ScriptFault { message: message.into(), trace: None }
    }

    pub fn with_trace(message: impl Into<String>, trace: impl Into<String>) -> ScriptFault {
        ScriptFault {
            message: message.into(),
            trace: Some(trace.into()),
        }
    }
}

impl fmt::Display for ScriptFault {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.trace {
            Some(trace) => write!(f, "{}\n{}", self.message, trace),
            None => f.write_str(&self.message),
        }
    }
}

/// The external script execution environment.
///
/// The engine never embeds an interpreter; it only defines what crosses
/// this boundary. A host receives the [`Bridge`] for the duration of a call
/// so script code can reach the object factories and mutators, and must run
/// every invocation protected: failures come back as a [`ScriptFault`],
/// never as a panic or abort.
pub trait ScriptHost {
    /// Loads and runs a script file.
    fn load(&mut self, bridge: &mut Bridge, path: &Path) -> Result<(), ScriptFault>;

    /// Invokes the named global entry point with `args`.
    ///
    /// Returns [`CallOutcome::Missing`] when the entry point is undefined —
    /// an expected condition, not an error.
    fn call(
        &mut self,
        bridge: &mut Bridge,
        entry: &str,
        args: &[Value],
    ) -> Result<CallOutcome, ScriptFault>;
}
