//! The application state engine.
//!
//! `Workbench` owns everything the editor mutates: the placed circuit,
//! the pin assignment, the simulator, the two pointer tools, the view
//! selection and the generated firmware text. Hosts feed it `InputEvent`s
//! and read back a `Response` telling them what to repaint or prompt for.

use crate::input::InputEvent;
use crate::sim::{ButtonState, ReleaseReason, Simulator};
use crate::tools::{DragTool, PressTool, Tool};
use crate::wiring;
use pb_core::config::BoardConfig;
use pb_core::emitter::emit_sketch;
use pb_core::error::AssignError;
use pb_core::id::ComponentId;
use pb_core::layout::{clamp_to_canvas, instantiate};
use pb_core::model::*;
use pb_core::pins::{AssignChange, PinAssignment, PinValues, parse_role_input};
use pb_render::hit::{Hit, hit_test};
use serde::Serialize;
use std::collections::BTreeMap;

/// A state change requested by a tool.
#[derive(Debug, Clone, PartialEq)]
pub enum Mutation {
    /// Move a component so its top-left lands at `(x, y)`.
    MoveComponent { id: ComponentId, x: f32, y: f32 },
    Press { button: ComponentId },
    Release {
        button: ComponentId,
        reason: ReleaseReason,
    },
}

/// Which panel the host shows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum View {
    #[default]
    Components,
    Code,
}

impl View {
    /// `"code"` selects the firmware panel; anything else the canvas.
    pub fn from_name(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "code" => View::Code,
            _ => View::Components,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            View::Components => "components",
            View::Code => "code",
        }
    }
}

/// What the host should do after an event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Response {
    /// Something visible changed; repaint.
    pub changed: bool,
    /// A controller pin was clicked; ask the user which role to bind.
    pub prompt_pin: Option<u8>,
}

/// Serializable view of the whole editor state.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub components: Vec<&'a PlacedComponent>,
    pub wires: Vec<&'a Wire>,
    pub pins: PinAssignment,
    pub values: &'a PinValues,
    pub buttons: BTreeMap<String, ButtonState>,
    pub running: bool,
    pub view: View,
}

pub struct Workbench {
    config: BoardConfig,
    circuit: Circuit,
    pins: PinAssignment,
    sim: Simulator,
    drag: DragTool,
    press: PressTool,
    view: View,
    sketch: String,
}

impl Default for Workbench {
    fn default() -> Self {
        Self::new(BoardConfig::default())
    }
}

impl Workbench {
    pub fn new(config: BoardConfig) -> Self {
        let pins = PinAssignment::new();
        Self {
            config,
            circuit: Circuit::new(),
            sketch: emit_sketch(&pins),
            pins,
            sim: Simulator::new(),
            drag: DragTool::new(),
            press: PressTool::new(),
            view: View::default(),
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    pub fn pins(&self) -> &PinAssignment {
        &self.pins
    }

    pub fn simulator(&self) -> &Simulator {
        &self.sim
    }

    pub fn sketch(&self) -> &str {
        &self.sketch
    }

    pub fn view(&self) -> View {
        self.view
    }

    // ─── Input ───────────────────────────────────────────────────────────

    /// Route one input event through the tools and apply what they ask for.
    pub fn handle(&mut self, event: InputEvent) -> Response {
        if let InputEvent::Drop { tag, x, y } = &event {
            let changed = self.drop_component(tag, *x, *y).is_some();
            return Response {
                changed,
                prompt_pin: None,
            };
        }

        let hit = event
            .position()
            .and_then(|(x, y)| hit_test(&self.circuit, x, y));

        let prompt_pin = match (&event, hit) {
            (
                InputEvent::PointerDown { .. },
                Some(Hit::Terminal {
                    terminal: TerminalKind::Pin(pin),
                    ..
                }),
            ) => Some(pin),
            _ => None,
        };

        let mut mutations = self.drag.handle(&event, hit, &self.circuit);
        mutations.extend(self.press.handle(&event, hit, &self.circuit));

        let mut changed = false;
        for mutation in mutations {
            changed |= self.apply_mutation(mutation);
        }
        Response {
            changed,
            prompt_pin,
        }
    }

    /// Place a palette template. Unknown tags are ignored.
    pub fn drop_component(&mut self, tag: &str, x: f32, y: f32) -> Option<ComponentId> {
        let Some(kind) = ComponentKind::from_tag(tag) else {
            log::debug!("ignoring drop of unknown kind {tag:?}");
            return None;
        };
        let id = ComponentId::with_prefix(kind.tag());
        self.circuit.add(instantiate(kind, id, x, y, &self.config));
        if kind == ComponentKind::Button {
            self.sim.arm(id, &self.pins);
        }
        log::debug!("dropped {} as {id}", kind.label());

        self.redraw();
        self.refresh_visuals();
        Some(id)
    }

    /// Reposition a component directly, as a finished drag would.
    pub fn move_component(&mut self, id: ComponentId, x: f32, y: f32) -> bool {
        self.apply_mutation(Mutation::MoveComponent { id, x, y })
    }

    /// Apply one mutation. Returns whether anything changed.
    pub fn apply_mutation(&mut self, mutation: Mutation) -> bool {
        match mutation {
            Mutation::MoveComponent { id, x, y } => {
                let config = &self.config;
                let Some(component) = self.circuit.get_mut(id) else {
                    return false;
                };
                let (x, y) = clamp_to_canvas(x, y, component.width, component.height, config);
                component.x = x;
                component.y = y;
                log::trace!("move {id} to ({x}, {y})");
                self.redraw();
                true
            }
            Mutation::Press { button } => {
                let pressed = self.sim.press(button, &self.pins);
                if pressed {
                    self.refresh_visuals();
                }
                pressed
            }
            Mutation::Release { button, reason } => {
                let released = self.sim.release(button, &self.pins, reason);
                if released {
                    self.refresh_visuals();
                }
                released
            }
        }
    }

    // ─── Pin assignment ──────────────────────────────────────────────────

    /// Bind `role` to `pin`, or clear `pin` when `role` is `None`.
    ///
    /// On success the wires, the firmware text and both components'
    /// visuals are rebuilt. On failure nothing changes.
    pub fn assign(&mut self, pin: u8, role: Option<Role>) -> Result<AssignChange, AssignError> {
        let result = if self.config.has_pin(pin) {
            self.pins.assign(pin, role)
        } else {
            Err(AssignError::InvalidPin(pin))
        };

        match result {
            Ok(change) => {
                self.sim.on_assignment(change);
                self.redraw();
                self.regenerate();
                self.refresh_visuals();
                log::debug!("assign pin {pin}: {change:?}");
                Ok(change)
            }
            Err(err) => {
                log::warn!("{err}");
                Err(err)
            }
        }
    }

    /// Assign from the raw text typed into the role prompt.
    pub fn assign_from_input(&mut self, pin: u8, input: &str) -> Result<AssignChange, AssignError> {
        match parse_role_input(input) {
            Ok(role) => self.assign(pin, role),
            Err(err) => {
                log::warn!("{err}");
                Err(err)
            }
        }
    }

    // ─── Derived state ───────────────────────────────────────────────────

    /// Rebuild every wire from the assignment and current layout.
    pub fn redraw(&mut self) -> usize {
        wiring::redraw(&mut self.circuit, &self.pins)
    }

    /// Re-emit the firmware text.
    pub fn regenerate(&mut self) {
        self.sketch = emit_sketch(&self.pins);
    }

    /// Copy pin values and button states onto terminal `high` flags.
    pub fn refresh_visuals(&mut self) {
        let led_high = self
            .pins
            .get(Role::Led)
            .is_some_and(|pin| self.sim.values().get(pin));
        let active_led = self.circuit.active_id(ComponentKind::Led);

        for component in self.circuit.graph.node_weights_mut() {
            let high = match component.kind {
                ComponentKind::Controller => continue,
                ComponentKind::Led => active_led == Some(component.id) && led_high,
                ComponentKind::Button => self.sim.is_pressed(component.id),
            };
            if let Some(lead) = component.terminal_mut(TerminalKind::Lead) {
                lead.high = high;
            }
        }
    }

    // ─── Simulation & view ───────────────────────────────────────────────

    /// Start or stop the simulation. Returns the notice to show.
    pub fn toggle_simulation(&mut self) -> &'static str {
        let notice = if self.sim.toggle_running() {
            "Simulation Started"
        } else {
            "Simulation Stopped"
        };
        self.refresh_visuals();
        log::debug!("{notice}");
        notice
    }

    pub fn set_view(&mut self, name: &str) -> View {
        self.view = View::from_name(name);
        if self.view == View::Code {
            self.regenerate();
        }
        self.view
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        let buttons = self
            .circuit
            .components()
            .filter(|c| c.kind == ComponentKind::Button)
            .filter_map(|c| Some((c.id.to_string(), self.sim.state(c.id)?)))
            .collect();
        Snapshot {
            components: self.circuit.components().collect(),
            wires: self.circuit.wires().collect(),
            pins: self.pins,
            values: self.sim.values(),
            buttons,
            running: self.sim.is_running(),
            view: self.view,
        }
    }
}
