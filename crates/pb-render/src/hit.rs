//! Hit testing: point → component / terminal lookup.
//!
//! Walks components front-to-back (last dropped = topmost). Within a
//! component, terminals win over the body so a click on a pin never
//! starts a drag.

use pb_core::id::ComponentId;
use pb_core::model::*;

/// What sits under the pointer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Hit {
    /// The component's body, outside any terminal.
    Body(ComponentId),
    Terminal {
        component: ComponentId,
        terminal: TerminalKind,
    },
}

/// Find the topmost thing at canvas position (px, py).
/// Returns `None` for the empty canvas.
pub fn hit_test(circuit: &Circuit, px: f32, py: f32) -> Option<Hit> {
    circuit
        .components()
        .rev()
        .find_map(|component| hit_component(component, px, py))
}

fn hit_component(component: &PlacedComponent, px: f32, py: f32) -> Option<Hit> {
    if let Some(terminal) = component
        .terminals
        .iter()
        .find(|t| component.terminal_bounds(t).contains(px, py))
    {
        return Some(Hit::Terminal {
            component: component.id,
            terminal: terminal.kind,
        });
    }

    component
        .bounds()
        .contains(px, py)
        .then_some(Hit::Body(component.id))
}

/// Whether (px, py) lies on the given terminal of a component.
/// Used to detect the pointer leaving a pressed button's lead.
pub fn over_terminal(
    circuit: &Circuit,
    component: ComponentId,
    terminal: TerminalKind,
    px: f32,
    py: f32,
) -> bool {
    circuit
        .get(component)
        .and_then(|c| c.terminal(terminal).map(|t| c.terminal_bounds(t)))
        .is_some_and(|b| b.contains(px, py))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pb_core::BoardConfig;
    use pb_core::layout::instantiate;

    fn circuit_with(parts: &[(&str, ComponentKind, f32, f32)]) -> Circuit {
        let config = BoardConfig::default();
        let mut circuit = Circuit::new();
        for &(id, kind, x, y) in parts {
            circuit.add(instantiate(kind, ComponentId::intern(id), x, y, &config));
        }
        circuit
    }

    #[test]
    fn empty_canvas_misses() {
        let circuit = circuit_with(&[("hit_led_a", ComponentKind::Led, 100.0, 100.0)]);
        assert_eq!(hit_test(&circuit, 5.0, 5.0), None);
    }

    #[test]
    fn body_and_terminal_are_distinguished() {
        let circuit = circuit_with(&[("hit_led_b", ComponentKind::Led, 100.0, 100.0)]);
        let id = ComponentId::intern("hit_led_b");

        assert_eq!(hit_test(&circuit, 110.0, 110.0), Some(Hit::Body(id)));

        // Lead is centered on the bottom edge: x 120..130, y 160..170.
        assert_eq!(
            hit_test(&circuit, 125.0, 165.0),
            Some(Hit::Terminal {
                component: id,
                terminal: TerminalKind::Lead
            })
        );
    }

    #[test]
    fn controller_pin_terminal() {
        let circuit = circuit_with(&[("hit_uno", ComponentKind::Controller, 0.0, 0.0)]);
        // Pin 2 sits at x = 8 + 2 * 16 = 40, y = 4.
        assert_eq!(
            hit_test(&circuit, 45.0, 9.0),
            Some(Hit::Terminal {
                component: ComponentId::intern("hit_uno"),
                terminal: TerminalKind::Pin(2)
            })
        );
    }

    #[test]
    fn topmost_component_wins() {
        let circuit = circuit_with(&[
            ("hit_under", ComponentKind::Button, 100.0, 100.0),
            ("hit_over", ComponentKind::Button, 110.0, 110.0),
        ]);
        assert_eq!(
            hit_test(&circuit, 120.0, 120.0),
            Some(Hit::Body(ComponentId::intern("hit_over")))
        );
    }

    #[test]
    fn over_terminal_tracks_lead() {
        let circuit = circuit_with(&[("hit_btn", ComponentKind::Button, 0.0, 0.0)]);
        let id = ComponentId::intern("hit_btn");
        // Button 60x60, lead at x 25..35, y 50..60.
        assert!(over_terminal(&circuit, id, TerminalKind::Lead, 30.0, 55.0));
        assert!(!over_terminal(&circuit, id, TerminalKind::Lead, 30.0, 20.0));
        assert!(!over_terminal(&circuit, id, TerminalKind::Pin(1), 30.0, 55.0));
    }
}
