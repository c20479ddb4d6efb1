//! Component templates and canvas placement.
//!
//! A template fixes a component's size and where its terminals sit.
//! The controller's pin terminals run left-to-right along its top edge
//! in ascending pin order; LED and button carry one lead centered on
//! their bottom edge.

use crate::config::{BoardConfig, PIN_ROW_MARGIN, PIN_ROW_TOP};
use crate::id::ComponentId;
use crate::model::*;
use smallvec::SmallVec;

/// Build a component from its template with its top-left at `(x, y)`.
/// The position is clamped so the component stays inside the canvas.
pub fn instantiate(
    kind: ComponentKind,
    id: ComponentId,
    x: f32,
    y: f32,
    config: &BoardConfig,
) -> PlacedComponent {
    let size = match kind {
        ComponentKind::Controller => config.controller,
        ComponentKind::Led => config.led,
        ComponentKind::Button => config.button,
    };
    let (x, y) = clamp_to_canvas(x, y, size.width, size.height, config);

    PlacedComponent {
        id,
        kind,
        x,
        y,
        width: size.width,
        height: size.height,
        terminals: terminals_for(kind, size.width, size.height, config),
    }
}

fn terminals_for(
    kind: ComponentKind,
    width: f32,
    height: f32,
    config: &BoardConfig,
) -> SmallVec<[Terminal; 1]> {
    let t = config.terminal_size;
    match kind {
        ComponentKind::Controller => (config.first_pin..=config.last_pin)
            .enumerate()
            .map(|(i, pin)| {
                let x = PIN_ROW_MARGIN + i as f32 * config.pin_pitch();
                Terminal::new(TerminalKind::Pin(pin), Bounds::new(x, PIN_ROW_TOP, t, t))
            })
            .collect(),
        ComponentKind::Led | ComponentKind::Button => {
            let lead = Bounds::new((width - t) / 2.0, height - t, t, t);
            std::iter::once(Terminal::new(TerminalKind::Lead, lead)).collect()
        }
    }
}

/// Keep a `width × height` box fully inside the canvas.
pub fn clamp_to_canvas(
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    config: &BoardConfig,
) -> (f32, f32) {
    let max_x = (config.canvas_width - width).max(0.0);
    let max_y = (config.canvas_height - height).max(0.0);
    (x.clamp(0.0, max_x), y.clamp(0.0, max_y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn controller_has_one_terminal_per_pin() {
        let config = BoardConfig::default();
        let uno = instantiate(
            ComponentKind::Controller,
            ComponentId::intern("uno_layout"),
            10.0,
            10.0,
            &config,
        );
        assert_eq!(uno.terminals.len(), 14);
        assert_eq!(uno.terminals[0].kind, TerminalKind::Pin(0));
        assert_eq!(uno.terminals[13].kind, TerminalKind::Pin(13));
        // Pins are laid out left to right.
        assert!(uno.terminals[13].rect.x > uno.terminals[0].rect.x);
        // And all fit inside the board.
        let last = uno.terminals[13].rect;
        assert_eq!(last.x + last.width, config.pin_row_extent());
        assert!(last.x + last.width <= uno.width);
    }

    #[test]
    fn led_lead_is_bottom_center() {
        let config = BoardConfig::default();
        let led = instantiate(
            ComponentKind::Led,
            ComponentId::intern("led_layout"),
            100.0,
            200.0,
            &config,
        );
        assert_eq!(led.terminals.len(), 1);
        let (cx, cy) = led.terminal_center(TerminalKind::Lead).unwrap();
        assert!((cx - (100.0 + 25.0)).abs() < 0.01);
        assert!((cy - (200.0 + 70.0 - 5.0)).abs() < 0.01);
    }

    #[test]
    fn drop_outside_canvas_is_clamped() {
        let config = BoardConfig::default();
        let button = instantiate(
            ComponentKind::Button,
            ComponentId::intern("btn_layout"),
            5000.0,
            -40.0,
            &config,
        );
        assert_eq!(button.x, config.canvas_width - config.button.width);
        assert_eq!(button.y, 0.0);
    }
}
