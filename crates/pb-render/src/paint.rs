//! Circuit → Vello drawing commands.
//!
//! Paints component bodies, their terminals and the wires between them.
//! Wires go on top so they stay visible while a component is dragged
//! underneath another one.

use kurbo::{Affine, Circle, Line, Point, Rect, RoundedRect, Stroke as KurboStroke};
use pb_core::BoardConfig;
use pb_core::model::*;
use peniko::{Color, Fill};
use vello::Scene;

/// Colors for the native painter.
#[derive(Debug, Clone)]
pub struct PaintTheme {
    pub background: Color,
    pub controller: Color,
    pub led_off: Color,
    pub led_on: Color,
    pub button: Color,
    pub button_pressed: Color,
    pub terminal: Color,
    pub terminal_connected: Color,
    pub wire: Color,
    pub wire_width: f64,
}

impl PaintTheme {
    pub fn light() -> Self {
        Self {
            background: Color::from_rgb8(0xF5, 0xF5, 0xF7),
            controller: Color::from_rgb8(0x00, 0x79, 0x8C),
            led_off: Color::from_rgb8(0x7A, 0x1F, 0x1F),
            led_on: Color::from_rgb8(0xFF, 0x3B, 0x30),
            button: Color::from_rgb8(0x55, 0x55, 0x5C),
            button_pressed: Color::from_rgb8(0x2C, 0x2C, 0x30),
            terminal: Color::from_rgb8(0xC8, 0xC8, 0xCC),
            terminal_connected: Color::from_rgb8(0xFF, 0xC1, 0x07),
            wire: Color::from_rgb8(0x2E, 0x7D, 0x32),
            wire_width: 2.0,
        }
    }

    pub fn dark() -> Self {
        Self {
            background: Color::from_rgb8(0x1C, 0x1C, 0x1E),
            terminal: Color::from_rgb8(0x63, 0x63, 0x66),
            ..Self::light()
        }
    }

    /// Theme picked by `dark_mode`, with the configured wire style.
    pub fn from_config(config: &BoardConfig) -> Self {
        let mut theme = if config.dark_mode {
            Self::dark()
        } else {
            Self::light()
        };
        if let Some(rgb) = config.wire.rgb() {
            theme.wire = Color::from_rgb8(rgb.r, rgb.g, rgb.b);
        }
        theme.wire_width = config.wire.width as f64;
        theme
    }
}

/// Paint the whole circuit into a freshly-cleared `Scene`.
pub fn paint_circuit(
    scene: &mut Scene,
    circuit: &Circuit,
    theme: &PaintTheme,
    width: f64,
    height: f64,
) {
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        theme.background,
        None,
        &Rect::new(0.0, 0.0, width, height),
    );

    for component in circuit.components() {
        paint_component(scene, component, theme);
    }

    for wire in circuit.wires() {
        paint_wire(scene, wire, theme);
    }
    log::trace!(
        "painted {} component(s), {} wire(s)",
        circuit.len(),
        circuit.wire_count()
    );
}

fn paint_component(scene: &mut Scene, component: &PlacedComponent, theme: &PaintTheme) {
    let b = component.bounds();
    let lit = component.terminals.iter().any(|t| t.high);

    match component.kind {
        ComponentKind::Controller => {
            let body = to_rect(&b).to_rounded_rect(6.0);
            scene.fill(Fill::NonZero, Affine::IDENTITY, theme.controller, None, &body);
        }
        ComponentKind::Led => {
            let (cx, _) = b.center();
            let radius = (b.width as f64 / 2.0) * 0.8;
            let dome = Circle::new(Point::new(cx as f64, b.y as f64 + radius + 4.0), radius);
            let color = if lit { theme.led_on } else { theme.led_off };
            scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, &dome);
            if lit {
                // Glow ring.
                scene.stroke(
                    &KurboStroke::new(3.0),
                    Affine::IDENTITY,
                    theme.led_on,
                    None,
                    &Circle::new(dome.center, radius + 4.0),
                );
            }
        }
        ComponentKind::Button => {
            let body: RoundedRect = to_rect(&b).to_rounded_rect(8.0);
            let color = if lit {
                theme.button_pressed
            } else {
                theme.button
            };
            scene.fill(Fill::NonZero, Affine::IDENTITY, color, None, &body);
        }
    }

    for terminal in &component.terminals {
        paint_terminal(scene, &component.terminal_bounds(terminal), terminal, theme);
    }
}

fn paint_terminal(scene: &mut Scene, b: &Bounds, terminal: &Terminal, theme: &PaintTheme) {
    let color = if terminal.connected {
        theme.terminal_connected
    } else {
        theme.terminal
    };
    scene.fill(
        Fill::NonZero,
        Affine::IDENTITY,
        color,
        None,
        &to_rect(b).to_rounded_rect(2.0),
    );
}

fn paint_wire(scene: &mut Scene, wire: &Wire, theme: &PaintTheme) {
    let line = Line::new(
        (wire.from.0 as f64, wire.from.1 as f64),
        (wire.to.0 as f64, wire.to.1 as f64),
    );
    scene.stroke(
        &KurboStroke::new(theme.wire_width),
        Affine::IDENTITY,
        theme.wire,
        None,
        &line,
    );
}

fn to_rect(b: &Bounds) -> Rect {
    Rect::new(
        b.x as f64,
        b.y as f64,
        (b.x + b.width) as f64,
        (b.y + b.height) as f64,
    )
}
