//! Canvas2D software renderer.
//!
//! Draws the circuit to an HTML `<canvas>` via `CanvasRenderingContext2d`:
//! component bodies first, then their terminals, then wires on top.

use pb_core::model::*;
use std::f64::consts::TAU;
use web_sys::CanvasRenderingContext2d;

/// Theme-dependent colors for the canvas renderer.
pub struct CanvasTheme {
    pub bg: &'static str,
    pub controller: &'static str,
    pub label: &'static str,
    pub led_off: &'static str,
    pub led_on: &'static str,
    pub led_glow: &'static str,
    pub button: &'static str,
    pub button_pressed: &'static str,
    pub terminal: &'static str,
    pub terminal_connected: &'static str,
    pub pin_text: &'static str,
}

impl CanvasTheme {
    pub fn light() -> Self {
        Self {
            bg: "#F5F5F7",
            controller: "#00798C",
            label: "#FFFFFF",
            led_off: "#7A1F1F",
            led_on: "#FF3B30",
            led_glow: "rgba(255, 59, 48, 0.6)",
            button: "#55555C",
            button_pressed: "#2C2C30",
            terminal: "#C8C8CC",
            terminal_connected: "#FFC107",
            pin_text: "#1D1D1F",
        }
    }

    pub fn dark() -> Self {
        Self {
            bg: "#1C1C1E",
            terminal: "#636366",
            pin_text: "#F5F5F7",
            ..Self::light()
        }
    }
}

/// Wire appearance, resolved from the board config.
pub struct WirePaint<'a> {
    pub color: &'a str,
    pub width: f64,
}

/// Render the whole circuit.
pub fn render_circuit(
    ctx: &CanvasRenderingContext2d,
    circuit: &Circuit,
    theme: &CanvasTheme,
    wire: &WirePaint<'_>,
    canvas_width: f64,
    canvas_height: f64,
) {
    ctx.set_fill_style_str(theme.bg);
    ctx.fill_rect(0.0, 0.0, canvas_width, canvas_height);

    for component in circuit.components() {
        draw_component(ctx, component, theme);
    }

    ctx.save();
    ctx.set_stroke_style_str(wire.color);
    ctx.set_line_width(wire.width);
    ctx.set_line_cap("round");
    for w in circuit.wires() {
        ctx.begin_path();
        ctx.move_to(w.from.0 as f64, w.from.1 as f64);
        ctx.line_to(w.to.0 as f64, w.to.1 as f64);
        ctx.stroke();
    }
    ctx.restore();
}

fn draw_component(
    ctx: &CanvasRenderingContext2d,
    component: &PlacedComponent,
    theme: &CanvasTheme,
) {
    let b = component.bounds();
    let (x, y, w, h) = (b.x as f64, b.y as f64, b.width as f64, b.height as f64);
    let lit = component.terminals.iter().any(|t| t.high);

    ctx.save();
    match component.kind {
        ComponentKind::Controller => {
            rounded_rect_path(ctx, x, y, w, h, 6.0);
            ctx.set_fill_style_str(theme.controller);
            ctx.fill();
            draw_label(ctx, component.kind.label(), x + w / 2.0, y + h / 2.0, theme.label);
        }
        ComponentKind::Led => {
            let radius = w / 2.0 * 0.8;
            let (cx, cy) = (x + w / 2.0, y + radius + 4.0);
            if lit {
                ctx.set_shadow_blur(16.0);
                ctx.set_shadow_color(theme.led_glow);
            }
            ctx.begin_path();
            let _ = ctx.arc(cx, cy, radius, 0.0, TAU);
            ctx.set_fill_style_str(if lit { theme.led_on } else { theme.led_off });
            ctx.fill();
            ctx.set_shadow_blur(0.0);
        }
        ComponentKind::Button => {
            rounded_rect_path(ctx, x, y, w, h, 8.0);
            ctx.set_fill_style_str(if lit {
                theme.button_pressed
            } else {
                theme.button
            });
            ctx.fill();
            draw_label(ctx, component.kind.label(), x + w / 2.0, y + h / 2.0 - 5.0, theme.label);
        }
    }
    ctx.restore();

    for terminal in &component.terminals {
        draw_terminal(ctx, &component.terminal_bounds(terminal), terminal, theme);
    }
}

fn draw_terminal(
    ctx: &CanvasRenderingContext2d,
    b: &Bounds,
    terminal: &Terminal,
    theme: &CanvasTheme,
) {
    let (x, y, w, h) = (b.x as f64, b.y as f64, b.width as f64, b.height as f64);
    ctx.save();
    rounded_rect_path(ctx, x, y, w, h, 2.0);
    ctx.set_fill_style_str(if terminal.connected {
        theme.terminal_connected
    } else {
        theme.terminal
    });
    ctx.fill();

    if let TerminalKind::Pin(pin) = terminal.kind {
        ctx.set_font("9px Inter, sans-serif");
        ctx.set_text_align("center");
        ctx.set_text_baseline("top");
        ctx.set_fill_style_str(theme.pin_text);
        let _ = ctx.fill_text(&pin.to_string(), x + w / 2.0, y + h + 2.0);
    }
    ctx.restore();
}

fn draw_label(ctx: &CanvasRenderingContext2d, text: &str, cx: f64, cy: f64, color: &str) {
    ctx.set_font("600 13px Inter, sans-serif");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_fill_style_str(color);
    let _ = ctx.fill_text(text, cx, cy);
}

// ─── Drawing primitives ─────────────────────────────────────────────────

fn rounded_rect_path(ctx: &CanvasRenderingContext2d, x: f64, y: f64, w: f64, h: f64, r: f64) {
    let r = r.min(w / 2.0).min(h / 2.0);
    ctx.begin_path();
    ctx.move_to(x + r, y);
    ctx.line_to(x + w - r, y);
    let _ = ctx.arc_to(x + w, y, x + w, y + r, r);
    ctx.line_to(x + w, y + h - r);
    let _ = ctx.arc_to(x + w, y + h, x + w - r, y + h, r);
    ctx.line_to(x + r, y + h);
    let _ = ctx.arc_to(x, y + h, x, y + h - r, r);
    ctx.line_to(x, y + r);
    let _ = ctx.arc_to(x, y, x + r, y, r);
    ctx.close_path();
}
