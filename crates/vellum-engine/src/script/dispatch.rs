//! Fixed entry-point dispatch from engine events to script code.
//!
//! Entry points are looked up by name on every dispatch, so a script may
//! define or drop them at runtime. A fault in one dispatch is logged and
//! contained; it never stops the frame loop.

use super::{Bridge, CallOutcome, ScriptHost, Value};

pub const ENTRY_RESIZE: &str = "resize";
pub const ENTRY_POINTER_MOVE: &str = "pointer_move";
pub const ENTRY_POINTER_BUTTON: &str = "pointer_button";
pub const ENTRY_KEY_EVENT: &str = "key_event";
pub const ENTRY_TEXT_INPUT: &str = "text_input";
pub const ENTRY_UPDATE: &str = "update";

/// Invokes `entry` on the host, swallowing faults into the log.
///
/// Returns `true` only when the entry point existed and ran cleanly. A
/// missing entry point is a silent skip.
pub fn dispatch<H: ScriptHost>(
    host: &mut H,
    bridge: &mut Bridge,
    entry: &str,
    args: &[Value],
) -> bool {
    match host.call(bridge, entry, args) {
        Ok(CallOutcome::Invoked) => true,
        Ok(CallOutcome::Missing) => false,
        Err(fault) => {
            log::error!(target: "script", "{entry}: {fault}");
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::script::ScriptFault;
    use std::path::Path;

    /// Scripted host: answers each call from a queue of canned outcomes and
    /// records the entry names it saw.
    struct CannedHost {
        outcomes: Vec<Result<CallOutcome, ScriptFault>>,
        calls: Vec<String>,
    }

    impl CannedHost {
        fn new(outcomes: Vec<Result<CallOutcome, ScriptFault>>) -> CannedHost {
            CannedHost { outcomes, calls: Vec::new() }
        }
    }

    impl ScriptHost for CannedHost {
        fn load(&mut self, _bridge: &mut Bridge, _path: &Path) -> Result<(), ScriptFault> {
            Ok(())
        }

        fn call(
            &mut self,
            _bridge: &mut Bridge,
            entry: &str,
            _args: &[Value],
        ) -> Result<CallOutcome, ScriptFault> {
            self.calls.push(entry.to_string());
            self.outcomes.remove(0)
        }
    }

    #[test]
    fn missing_entry_point_is_skipped_silently() {
        let mut host = CannedHost::new(vec![Ok(CallOutcome::Missing)]);
        let mut bridge = Bridge::new();
        assert!(!dispatch(&mut host, &mut bridge, ENTRY_UPDATE, &[]));
        assert_eq!(host.calls, vec![ENTRY_UPDATE]);
    }

    #[test]
    fn fault_is_contained_and_later_dispatches_proceed() {
        let mut host = CannedHost::new(vec![
            Err(ScriptFault::with_trace("boom", "update:12")),
            Ok(CallOutcome::Invoked),
        ]);
        let mut bridge = Bridge::new();
        assert!(!dispatch(&mut host, &mut bridge, ENTRY_UPDATE, &[Value::Num(16.0)]));
        assert!(dispatch(&mut host, &mut bridge, ENTRY_UPDATE, &[Value::Num(16.0)]));
    }

    #[test]
    fn host_can_mutate_the_scene_during_a_call() {
        struct BuildingHost;
        impl ScriptHost for BuildingHost {
            fn load(&mut self, _: &mut Bridge, _: &Path) -> Result<(), ScriptFault> {
                Ok(())
            }
            fn call(
                &mut self,
                bridge: &mut Bridge,
                _entry: &str,
                _args: &[Value],
            ) -> Result<CallOutcome, ScriptFault> {
                let root = bridge.create_transform();
                bridge.set_scene(root).map_err(|e| ScriptFault::new(e.to_string()))?;
                Ok(CallOutcome::Invoked)
            }
        }

        let mut host = BuildingHost;
        let mut bridge = Bridge::new();
        assert!(dispatch(&mut host, &mut bridge, ENTRY_RESIZE, &[]));
        let viewport = bridge.viewport();
        assert_eq!(bridge.stage().children(viewport).len(), 1);
    }
}
