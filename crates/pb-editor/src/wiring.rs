//! Wire derivation.
//!
//! `redraw` throws away every wire and rebuilds from the pin assignment
//! and the live terminal positions. There are at most two wires, so
//! there is nothing to gain from diffing.

use pb_core::id::ComponentId;
use pb_core::model::*;
use pb_core::pins::PinAssignment;
use smallvec::SmallVec;

/// Rebuild all wires. Returns how many were drawn.
///
/// A role gets a wire when it is assigned, its component kind has an
/// active instance on the canvas, and an active controller exposes the
/// assigned pin.
pub fn redraw(circuit: &mut Circuit, pins: &PinAssignment) -> usize {
    circuit.clear_wires();

    let Some(controller) = circuit.active(ComponentKind::Controller) else {
        log::trace!("redraw: no controller placed");
        return 0;
    };
    let controller_id = controller.id;

    let mut planned: SmallVec<[(ComponentId, Wire); 2]> = SmallVec::new();
    for role in Role::ALL {
        let Some(pin) = pins.get(role) else {
            continue;
        };
        let Some(target) = circuit.active(role.component_kind()) else {
            continue;
        };
        let (Some(from), Some(to)) = (
            controller.terminal_center(TerminalKind::Pin(pin)),
            target.terminal_center(TerminalKind::Lead),
        ) else {
            continue;
        };
        planned.push((
            target.id,
            Wire {
                role,
                pin,
                from,
                to,
            },
        ));
    }

    let Some(controller_idx) = circuit.index_of(controller_id) else {
        return 0;
    };
    let count = planned.len();
    for (target_id, wire) in planned {
        let pin = wire.pin;
        if let Some(target_idx) = circuit.index_of(target_id) {
            mark_connected(circuit, controller_id, TerminalKind::Pin(pin));
            mark_connected(circuit, target_id, TerminalKind::Lead);
            circuit.add_wire(controller_idx, target_idx, wire);
        }
    }
    log::trace!("redraw: {count} wire(s)");
    count
}

fn mark_connected(circuit: &mut Circuit, id: ComponentId, kind: TerminalKind) {
    if let Some(terminal) = circuit.get_mut(id).and_then(|c| c.terminal_mut(kind)) {
        terminal.connected = true;
    }
}
