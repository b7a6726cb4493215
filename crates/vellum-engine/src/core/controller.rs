use std::path::Path;

use anyhow::{Context, Result};

use crate::render::Renderer;
use crate::script::dispatch::{
    self, ENTRY_KEY_EVENT, ENTRY_POINTER_BUTTON, ENTRY_POINTER_MOVE, ENTRY_RESIZE,
    ENTRY_TEXT_INPUT, ENTRY_UPDATE,
};
use crate::script::{Bridge, ScriptHost, Value};
use crate::time::FrameClock;

/// Owns the script host, the scene, and a renderer, and routes platform
/// events between them.
///
/// The embedding layer feeds events in (`resize`, `pointer_move`, ...) and
/// calls [`frame`](Controller::frame) once per presented frame; everything
/// else is driven from script code through the [`Bridge`].
pub struct Controller<H: ScriptHost, R: Renderer> {
    host: H,
    bridge: Bridge,
    renderer: R,
    clock: FrameClock,
}

impl<H: ScriptHost, R: Renderer> Controller<H, R> {
    pub fn new(host: H, renderer: R) -> Controller<H, R> {
        Controller {
            host,
            bridge: Bridge::new(),
            renderer,
            clock: FrameClock::new(),
        }
    }

    /// Brings the rendering backend up. Must succeed before the first frame.
    pub fn initialise(&mut self) -> Result<()> {
        self.renderer
            .initialise()
            .context("renderer initialisation failed")?;
        self.clock.reset();
        Ok(())
    }

    pub fn shutdown(&mut self) {
        self.renderer.shutdown();
    }

    /// Loads and runs a script file on the host. A fault is logged and the
    /// controller stays usable.
    pub fn load_script(&mut self, path: &Path) -> bool {
        match self.host.load(&mut self.bridge, path) {
            Ok(()) => true,
            Err(fault) => {
                log::error!(target: "script", "load {}: {fault}", path.display());
                false
            }
        }
    }

    // ── event entry points ────────────────────────────────────────────────

    /// Viewport resize. The renderer learns the new size before the script
    /// does, so scene edits made by the resize handler already see it.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.renderer.set_viewport_size(width, height);
        dispatch::dispatch(
            &mut self.host,
            &mut self.bridge,
            ENTRY_RESIZE,
            &[Value::Int(width as i64), Value::Int(height as i64)],
        );
    }

    pub fn pointer_move(&mut self, x: f64, y: f64) {
        dispatch::dispatch(
            &mut self.host,
            &mut self.bridge,
            ENTRY_POINTER_MOVE,
            &[Value::Num(x), Value::Num(y)],
        );
    }

    pub fn pointer_button(&mut self, button: i64, pressed: bool) {
        dispatch::dispatch(
            &mut self.host,
            &mut self.bridge,
            ENTRY_POINTER_BUTTON,
            &[Value::Int(button), Value::Int(pressed as i64)],
        );
    }

    pub fn key_event(&mut self, key: i64, pressed: bool) {
        dispatch::dispatch(
            &mut self.host,
            &mut self.bridge,
            ENTRY_KEY_EVENT,
            &[Value::Int(key), Value::Int(pressed as i64)],
        );
    }

    pub fn text_input(&mut self, text: &str) {
        dispatch::dispatch(
            &mut self.host,
            &mut self.bridge,
            ENTRY_TEXT_INPUT,
            &[Value::from(text)],
        );
    }

    /// Runs the script update with an explicit delta, in milliseconds.
    pub fn update(&mut self, dt_ms: f64) {
        dispatch::dispatch(
            &mut self.host,
            &mut self.bridge,
            ENTRY_UPDATE,
            &[Value::Num(dt_ms)],
        );
    }

    /// One full frame: tick the clock, run the script update, render.
    pub fn frame(&mut self) {
        let ft = self.clock.tick();
        self.update(ft.dt_ms);
        self.render();
    }

    /// Renders the current scene without advancing simulation time.
    pub fn render(&mut self) {
        let root = self.bridge.viewport();
        self.renderer.render(self.bridge.stage(), root);
    }

    // ── accessors ─────────────────────────────────────────────────────────

    #[inline]
    pub fn bridge(&self) -> &Bridge {
        &self.bridge
    }

    #[inline]
    pub fn bridge_mut(&mut self) -> &mut Bridge {
        &mut self.bridge
    }

    #[inline]
    pub fn renderer(&self) -> &R {
        &self.renderer
    }
}
