//! Pointer tools.
//!
//! Each tool translates input events into `Mutation`s that the
//! `Workbench` applies. Both tools see every pointer event; the hit
//! under the pointer decides which one reacts:
//!
//! | Pointer-down on          | Tool        | Effect                  |
//! |--------------------------|-------------|-------------------------|
//! | component body           | `DragTool`  | start drag              |
//! | button lead              | `PressTool` | press the button        |
//! | controller pin           | (none)      | host prompts for a role |

use crate::input::InputEvent;
use crate::sim::ReleaseReason;
use crate::workbench::Mutation;
use pb_core::id::ComponentId;
use pb_core::model::*;
use pb_render::hit::{Hit, over_terminal};

/// Trait for tools that handle input and produce mutations.
pub trait Tool {
    /// Handle an input event, returning zero or more mutations.
    fn handle(&mut self, event: &InputEvent, hit: Option<Hit>, circuit: &Circuit) -> Vec<Mutation>;
}

// ─── Drag Tool ───────────────────────────────────────────────────────────

/// Moves one component at a time, keeping the grab point under the pointer.
#[derive(Debug, Default)]
pub struct DragTool {
    target: Option<ComponentId>,
    offset_x: f32,
    offset_y: f32,
}

impl DragTool {
    pub fn new() -> Self {
        Self::default()
    }

    /// The component currently being dragged.
    pub fn target(&self) -> Option<ComponentId> {
        self.target
    }
}

impl Tool for DragTool {
    fn handle(&mut self, event: &InputEvent, hit: Option<Hit>, circuit: &Circuit) -> Vec<Mutation> {
        match event {
            InputEvent::PointerDown { x, y } => {
                if let Some(Hit::Body(id)) = hit
                    && let Some(component) = circuit.get(id)
                {
                    self.target = Some(id);
                    self.offset_x = x - component.x;
                    self.offset_y = y - component.y;
                    log::debug!("drag start {id} offset ({}, {})", self.offset_x, self.offset_y);
                }
                vec![]
            }
            InputEvent::PointerMove { x, y } => match self.target {
                Some(id) => vec![Mutation::MoveComponent {
                    id,
                    x: x - self.offset_x,
                    y: y - self.offset_y,
                }],
                None => vec![],
            },
            InputEvent::PointerUp { .. } => {
                if let Some(id) = self.target.take() {
                    log::debug!("drag end {id}");
                }
                vec![]
            }
            InputEvent::PointerLeave => {
                if let Some(id) = self.target.take() {
                    log::debug!("drag cancelled {id}: pointer left canvas");
                }
                vec![]
            }
            _ => vec![],
        }
    }
}

// ─── Press Tool ──────────────────────────────────────────────────────────

/// Presses a button while the pointer is held on its lead.
///
/// Releasing the pointer, moving off the lead, or leaving the canvas all
/// count as a release, so a button can never stay stuck HIGH.
#[derive(Debug, Default)]
pub struct PressTool {
    pressed: Option<ComponentId>,
}

impl PressTool {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Tool for PressTool {
    fn handle(&mut self, event: &InputEvent, hit: Option<Hit>, circuit: &Circuit) -> Vec<Mutation> {
        match event {
            InputEvent::PointerDown { .. } => {
                if let Some(Hit::Terminal {
                    component,
                    terminal: TerminalKind::Lead,
                }) = hit
                    && circuit
                        .get(component)
                        .is_some_and(|c| c.kind == ComponentKind::Button)
                {
                    self.pressed = Some(component);
                    return vec![Mutation::Press { button: component }];
                }
                vec![]
            }
            InputEvent::PointerMove { x, y } => match self.pressed {
                Some(button) if !over_terminal(circuit, button, TerminalKind::Lead, *x, *y) => {
                    self.pressed = None;
                    vec![Mutation::Release {
                        button,
                        reason: ReleaseReason::Leave,
                    }]
                }
                _ => vec![],
            },
            InputEvent::PointerUp { .. } => match self.pressed.take() {
                Some(button) => vec![Mutation::Release {
                    button,
                    reason: ReleaseReason::PressEnd,
                }],
                None => vec![],
            },
            InputEvent::PointerLeave => match self.pressed.take() {
                Some(button) => vec![Mutation::Release {
                    button,
                    reason: ReleaseReason::Leave,
                }],
                None => vec![],
            },
            InputEvent::Drop { .. } => vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_core::BoardConfig;
    use pb_core::layout::instantiate;

    fn one(kind: ComponentKind, name: &str, x: f32, y: f32) -> (Circuit, ComponentId) {
        let id = ComponentId::intern(name);
        let mut circuit = Circuit::new();
        circuit.add(instantiate(kind, id, x, y, &BoardConfig::default()));
        (circuit, id)
    }

    #[test]
    fn drag_keeps_grab_offset() {
        let (circuit, id) = one(ComponentKind::Led, "tool_led", 100.0, 100.0);
        let mut tool = DragTool::new();

        let mutations = tool.handle(
            &InputEvent::from_pointer_down(110.0, 105.0),
            Some(Hit::Body(id)),
            &circuit,
        );
        assert!(mutations.is_empty()); // Press alone doesn't mutate
        assert_eq!(tool.target(), Some(id));

        let mutations = tool.handle(&InputEvent::from_pointer_move(210.0, 305.0), None, &circuit);
        assert_eq!(
            mutations,
            vec![Mutation::MoveComponent {
                id,
                x: 200.0,
                y: 300.0
            }]
        );

        tool.handle(&InputEvent::from_pointer_up(210.0, 305.0), None, &circuit);
        assert_eq!(tool.target(), None);
        assert!(
            tool.handle(&InputEvent::from_pointer_move(0.0, 0.0), None, &circuit)
                .is_empty()
        );
    }

    #[test]
    fn drag_ignores_terminals() {
        let (circuit, id) = one(ComponentKind::Led, "tool_led_pin", 0.0, 0.0);
        let mut tool = DragTool::new();
        tool.handle(
            &InputEvent::from_pointer_down(25.0, 65.0),
            Some(Hit::Terminal {
                component: id,
                terminal: TerminalKind::Lead,
            }),
            &circuit,
        );
        assert_eq!(tool.target(), None);
    }

    #[test]
    fn leaving_canvas_ends_drag() {
        let (circuit, id) = one(ComponentKind::Button, "tool_btn_leave", 100.0, 100.0);
        let mut tool = DragTool::new();
        tool.handle(
            &InputEvent::from_pointer_down(110.0, 110.0),
            Some(Hit::Body(id)),
            &circuit,
        );
        assert!(tool.handle(&InputEvent::PointerLeave, None, &circuit).is_empty());
        assert_eq!(tool.target(), None);

        // Hovering back in without a button held moves nothing.
        assert!(
            tool.handle(&InputEvent::from_pointer_move(300.0, 300.0), None, &circuit)
                .is_empty()
        );
    }

    #[test]
    fn press_then_release() {
        let (circuit, id) = one(ComponentKind::Button, "tool_btn", 0.0, 0.0);
        let lead = Some(Hit::Terminal {
            component: id,
            terminal: TerminalKind::Lead,
        });
        let mut tool = PressTool::new();

        let mutations = tool.handle(&InputEvent::from_pointer_down(30.0, 55.0), lead, &circuit);
        assert_eq!(mutations, vec![Mutation::Press { button: id }]);

        // Wiggling on the lead keeps it pressed.
        assert!(
            tool.handle(&InputEvent::from_pointer_move(31.0, 56.0), lead, &circuit)
                .is_empty()
        );

        let mutations = tool.handle(&InputEvent::from_pointer_up(31.0, 56.0), lead, &circuit);
        assert_eq!(
            mutations,
            vec![Mutation::Release {
                button: id,
                reason: ReleaseReason::PressEnd
            }]
        );
    }

    #[test]
    fn moving_off_lead_releases() {
        let (circuit, id) = one(ComponentKind::Button, "tool_btn_leave", 0.0, 0.0);
        let mut tool = PressTool::new();
        tool.handle(
            &InputEvent::from_pointer_down(30.0, 55.0),
            Some(Hit::Terminal {
                component: id,
                terminal: TerminalKind::Lead,
            }),
            &circuit,
        );

        let mutations = tool.handle(&InputEvent::from_pointer_move(30.0, 10.0), None, &circuit);
        assert_eq!(
            mutations,
            vec![Mutation::Release {
                button: id,
                reason: ReleaseReason::Leave
            }]
        );
        // Already released: pointer-up is a no-op.
        assert!(
            tool.handle(&InputEvent::from_pointer_up(30.0, 10.0), None, &circuit)
                .is_empty()
        );
    }

    #[test]
    fn led_lead_is_not_pressable() {
        let (circuit, id) = one(ComponentKind::Led, "tool_led_press", 0.0, 0.0);
        let mut tool = PressTool::new();
        let mutations = tool.handle(
            &InputEvent::from_pointer_down(25.0, 65.0),
            Some(Hit::Terminal {
                component: id,
                terminal: TerminalKind::Lead,
            }),
            &circuit,
        );
        assert!(mutations.is_empty());
        // Nothing was pressed, so releasing has nothing to report.
        assert!(
            tool.handle(&InputEvent::from_pointer_up(25.0, 65.0), None, &circuit)
                .is_empty()
        );
    }
}
