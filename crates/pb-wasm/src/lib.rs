//! WASM bridge for Pinboard: exposes the editor engine to JavaScript.
//!
//! Compiled via `wasm-pack build --target web`. The page forwards canvas
//! pointer events and palette drops here and repaints when told to.

mod render2d;

use pb_core::config::BoardConfig;
use pb_editor::input::InputEvent;
use pb_editor::workbench::{Response, Workbench};
use wasm_bindgen::prelude::*;
use web_sys::CanvasRenderingContext2d;

/// The main WASM-facing canvas controller.
#[wasm_bindgen]
pub struct PinboardCanvas {
    bench: Workbench,
    width: f64,
    height: f64,
}

#[wasm_bindgen]
impl PinboardCanvas {
    /// Create a controller for a canvas of the given size.
    #[wasm_bindgen(constructor)]
    pub fn new(width: f64, height: f64) -> Self {
        console_error_panic_hook_setup();

        let config = BoardConfig {
            canvas_width: width as f32,
            canvas_height: height as f32,
            ..BoardConfig::default()
        };
        Self {
            bench: Workbench::new(config),
            width,
            height,
        }
    }

    /// Replace the board config. Placed components are dropped.
    /// Returns `{"ok":true}` or `{"ok":false,"error":"..."}`.
    pub fn set_config_json(&mut self, json: &str) -> String {
        match BoardConfig::from_json(json) {
            Ok(config) => {
                self.width = config.canvas_width as f64;
                self.height = config.canvas_height as f64;
                self.bench = Workbench::new(config);
                r#"{"ok":true}"#.to_string()
            }
            Err(e) => {
                console_warn(&e.to_string());
                serde_json::json!({ "ok": false, "error": e.to_string() }).to_string()
            }
        }
    }

    /// Render the circuit to a Canvas2D context.
    pub fn render(&self, ctx: &CanvasRenderingContext2d) {
        let config = self.bench.config();
        let theme = if config.dark_mode {
            render2d::CanvasTheme::dark()
        } else {
            render2d::CanvasTheme::light()
        };
        let wire = render2d::WirePaint {
            color: &config.wire.color,
            width: config.wire.width as f64,
        };
        render2d::render_circuit(
            ctx,
            self.bench.circuit(),
            &theme,
            &wire,
            self.width,
            self.height,
        );
    }

    /// A palette template was dropped. Returns the new component's id,
    /// or an empty string for an unknown tag.
    pub fn drop_component(&mut self, tag: &str, x: f32, y: f32) -> String {
        self.bench
            .drop_component(tag, x, y)
            .map(|id| id.to_string())
            .unwrap_or_default()
    }

    /// Returns `{"changed":bool,"promptPin":n|null}`.
    pub fn handle_pointer_down(&mut self, x: f32, y: f32) -> String {
        let response = self.bench.handle(InputEvent::from_pointer_down(x, y));
        response_json(response)
    }

    pub fn handle_pointer_move(&mut self, x: f32, y: f32) -> String {
        let response = self.bench.handle(InputEvent::from_pointer_move(x, y));
        response_json(response)
    }

    pub fn handle_pointer_up(&mut self, x: f32, y: f32) -> String {
        let response = self.bench.handle(InputEvent::from_pointer_up(x, y));
        response_json(response)
    }

    pub fn handle_pointer_leave(&mut self) -> String {
        let response = self.bench.handle(InputEvent::PointerLeave);
        response_json(response)
    }

    /// Assign from raw prompt text. Returns `{"ok":true,"changed":bool}`
    /// or `{"ok":false,"warning":"..."}`; warnings are also alerted.
    pub fn assign_pin(&mut self, pin: u8, input: &str) -> String {
        match self.bench.assign_from_input(pin, input) {
            Ok(change) => format!(r#"{{"ok":true,"changed":{}}}"#, change.is_change()),
            Err(e) => {
                let warning = e.to_string();
                alert(&warning);
                serde_json::json!({ "ok": false, "warning": warning }).to_string()
            }
        }
    }

    /// Ask the user for a role with `window.prompt`, then assign it.
    /// A cancelled prompt changes nothing.
    pub fn prompt_and_assign(&mut self, pin: u8) -> String {
        let message = format!("Assign pin {pin} to (led / button / empty to clear):");
        match prompt(&message) {
            Some(input) => self.assign_pin(pin, &input),
            None => r#"{"ok":true,"changed":false}"#.to_string(),
        }
    }

    /// START/STOP button. Alerts and returns the notice.
    pub fn toggle_simulation(&mut self) -> String {
        let notice = self.bench.toggle_simulation();
        alert(notice);
        notice.to_string()
    }

    pub fn is_running(&self) -> bool {
        self.bench.simulator().is_running()
    }

    /// Switch between `"components"` and `"code"`. Returns the active view.
    pub fn set_view(&mut self, name: &str) -> String {
        self.bench.set_view(name).as_str().to_string()
    }

    pub fn get_view(&self) -> String {
        self.bench.view().as_str().to_string()
    }

    /// The generated Arduino sketch.
    pub fn get_code(&self) -> String {
        self.bench.sketch().to_string()
    }

    /// Full editor state as JSON.
    pub fn get_state_json(&self) -> String {
        serde_json::to_string(&self.bench.snapshot()).unwrap_or_else(|_| "{}".to_string())
    }
}

fn response_json(response: Response) -> String {
    let pin = response
        .prompt_pin
        .map_or_else(|| "null".to_string(), |p| p.to_string());
    format!(r#"{{"changed":{},"promptPin":{pin}}}"#, response.changed)
}

// ─── Browser dialogs ─────────────────────────────────────────────────────

fn alert(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
    log::info!("alert: {message}");
}

fn prompt(message: &str) -> Option<String> {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::window()?.prompt_with_message(message).ok().flatten()
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        log::debug!("prompt unavailable off-browser: {message}");
        None
    }
}

fn console_warn(message: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        web_sys::console::warn_1(&message.into());
    }
    log::warn!("{message}");
}

// ─── Panic hook for WASM debugging ───────────────────────────────────────

fn console_error_panic_hook_setup() {
    #[cfg(target_arch = "wasm32")]
    {
        use std::sync::Once;
        static SET_HOOK: Once = Once::new();
        SET_HOOK.call_once(|| {
            std::panic::set_hook(Box::new(|info| {
                let msg = format!("Pinboard WASM panic: {info}");
                web_sys::console::error_1(&msg.into());
            }));
        });
    }
}
