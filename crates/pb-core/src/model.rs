//! Circuit data model.
//!
//! The canvas is a directed graph: nodes are placed components, edges are
//! wires running from a controller pin terminal to a component's lead.
//! Wires are derived data: they are dropped and rebuilt wholesale
//! whenever the pin assignment or the layout changes.

use crate::id::ComponentId;
use petgraph::graph::{EdgeIndex, NodeIndex};
use petgraph::stable_graph::StableDiGraph;
use serde::Serialize;
use smallvec::SmallVec;
use std::collections::HashMap;
use std::fmt;

// ─── Roles & kinds ───────────────────────────────────────────────────────

/// The logical function a controller pin can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Led,
    Button,
}

impl Role {
    pub const ALL: [Role; 2] = [Role::Led, Role::Button];

    pub fn as_str(self) -> &'static str {
        match self {
            Role::Led => "led",
            Role::Button => "button",
        }
    }

    pub fn other(self) -> Role {
        match self {
            Role::Led => Role::Button,
            Role::Button => Role::Led,
        }
    }

    /// The component kind that plays this role.
    pub fn component_kind(self) -> ComponentKind {
        match self {
            Role::Led => ComponentKind::Led,
            Role::Button => ComponentKind::Button,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Role::Led => f.write_str("LED"),
            Role::Button => f.write_str("button"),
        }
    }
}

/// The three part templates the palette offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ComponentKind {
    Controller,
    Led,
    Button,
}

impl ComponentKind {
    /// Resolve a palette drag tag. Unknown tags yield `None`.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "arduino" => Some(Self::Controller),
            "led" => Some(Self::Led),
            "button" => Some(Self::Button),
            _ => None,
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::Controller => "arduino",
            Self::Led => "led",
            Self::Button => "button",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Controller => "Arduino UNO",
            Self::Led => "LED",
            Self::Button => "Button",
        }
    }
}

// ─── Colors ──────────────────────────────────────────────────────────────

/// 8-bit RGB color, as used by wire and theme settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

/// Helper to parse a single hex digit.
fn hex_val(c: u8) -> Option<u8> {
    match c {
        b'0'..=b'9' => Some(c - b'0'),
        b'a'..=b'f' => Some(c - b'a' + 10),
        b'A'..=b'F' => Some(c - b'A' + 10),
        _ => None,
    }
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#RGB` or `#RRGGBB`; the `#` is optional.
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.strip_prefix('#').unwrap_or(hex);
        let bytes = hex.as_bytes();
        match bytes.len() {
            3 => Some(Self::new(
                hex_val(bytes[0])? * 17,
                hex_val(bytes[1])? * 17,
                hex_val(bytes[2])? * 17,
            )),
            6 => Some(Self::new(
                hex_val(bytes[0])? << 4 | hex_val(bytes[1])?,
                hex_val(bytes[2])? << 4 | hex_val(bytes[3])?,
                hex_val(bytes[4])? << 4 | hex_val(bytes[5])?,
            )),
            _ => None,
        }
    }

    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

// ─── Geometry ────────────────────────────────────────────────────────────

/// Axis-aligned rectangle in canvas coordinates (origin = canvas top-left).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Bounds {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Bounds {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn contains(&self, px: f32, py: f32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

// ─── Terminals ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "type", content = "pin", rename_all = "lowercase")]
pub enum TerminalKind {
    /// A numbered controller pin.
    Pin(u8),
    /// The single lead of an LED or button.
    Lead,
}

/// A connection point on a component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Terminal {
    pub kind: TerminalKind,
    /// Relative to the owning component's top-left corner.
    pub rect: Bounds,
    /// A wire ends here.
    pub connected: bool,
    /// Mirrors the pin value (HIGH) for LED glow / pressed button.
    pub high: bool,
}

impl Terminal {
    pub fn new(kind: TerminalKind, rect: Bounds) -> Self {
        Self {
            kind,
            rect,
            connected: false,
            high: false,
        }
    }
}

// ─── Placed components ───────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlacedComponent {
    pub id: ComponentId,
    pub kind: ComponentKind,
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub terminals: SmallVec<[Terminal; 1]>,
}

impl PlacedComponent {
    pub fn bounds(&self) -> Bounds {
        Bounds::new(self.x, self.y, self.width, self.height)
    }

    /// Canvas-relative bounds of a terminal.
    pub fn terminal_bounds(&self, terminal: &Terminal) -> Bounds {
        terminal.rect.offset(self.x, self.y)
    }

    pub fn terminal(&self, kind: TerminalKind) -> Option<&Terminal> {
        self.terminals.iter().find(|t| t.kind == kind)
    }

    pub fn terminal_mut(&mut self, kind: TerminalKind) -> Option<&mut Terminal> {
        self.terminals.iter_mut().find(|t| t.kind == kind)
    }

    /// Canvas-relative center of a terminal, if the component has it.
    pub fn terminal_center(&self, kind: TerminalKind) -> Option<(f32, f32)> {
        self.terminal(kind).map(|t| self.terminal_bounds(t).center())
    }
}

// ─── Wires ───────────────────────────────────────────────────────────────

/// A straight line from a controller pin to a component lead.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Wire {
    pub role: Role,
    pub pin: u8,
    pub from: (f32, f32),
    pub to: (f32, f32),
}

// ─── Circuit ─────────────────────────────────────────────────────────────

/// Everything placed on the canvas, plus the currently rendered wires.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    pub graph: StableDiGraph<PlacedComponent, Wire>,
    id_index: HashMap<ComponentId, NodeIndex>,
    /// Most recently dropped instance per kind, the one wiring targets.
    active: HashMap<ComponentKind, ComponentId>,
}

impl Circuit {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a component; it becomes the active instance of its kind.
    pub fn add(&mut self, component: PlacedComponent) -> NodeIndex {
        let id = component.id;
        let kind = component.kind;
        let idx = self.graph.add_node(component);
        self.id_index.insert(id, idx);
        self.active.insert(kind, id);
        idx
    }

    pub fn index_of(&self, id: ComponentId) -> Option<NodeIndex> {
        self.id_index.get(&id).copied()
    }

    pub fn get(&self, id: ComponentId) -> Option<&PlacedComponent> {
        self.index_of(id).and_then(|idx| self.graph.node_weight(idx))
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut PlacedComponent> {
        let idx = self.index_of(id)?;
        self.graph.node_weight_mut(idx)
    }

    pub fn active_id(&self, kind: ComponentKind) -> Option<ComponentId> {
        self.active.get(&kind).copied()
    }

    pub fn active(&self, kind: ComponentKind) -> Option<&PlacedComponent> {
        self.active_id(kind).and_then(|id| self.get(id))
    }

    pub fn active_mut(&mut self, kind: ComponentKind) -> Option<&mut PlacedComponent> {
        let id = self.active_id(kind)?;
        self.get_mut(id)
    }

    /// Components in paint order (first dropped = bottom-most).
    pub fn components(&self) -> impl DoubleEndedIterator<Item = &PlacedComponent> {
        self.graph.node_indices().map(|idx| &self.graph[idx])
    }

    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    // ─── Wires ───────────────────────────────────────────────────────────

    /// Remove every wire and reset all `connected` marks.
    pub fn clear_wires(&mut self) {
        self.graph.clear_edges();
        for component in self.graph.node_weights_mut() {
            for terminal in component.terminals.iter_mut() {
                terminal.connected = false;
            }
        }
    }

    pub fn add_wire(&mut self, from: NodeIndex, to: NodeIndex, wire: Wire) -> EdgeIndex {
        self.graph.add_edge(from, to, wire)
    }

    pub fn wires(&self) -> impl Iterator<Item = &Wire> {
        self.graph.edge_indices().map(|e| &self.graph[e])
    }

    pub fn wire_count(&self) -> usize {
        self.graph.edge_count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use smallvec::smallvec;

    fn part(id: &str, kind: ComponentKind, x: f32) -> PlacedComponent {
        PlacedComponent {
            id: ComponentId::intern(id),
            kind,
            x,
            y: 0.0,
            width: 40.0,
            height: 40.0,
            terminals: smallvec![Terminal::new(
                TerminalKind::Lead,
                Bounds::new(15.0, 30.0, 10.0, 10.0)
            )],
        }
    }

    #[test]
    fn latest_drop_becomes_active() {
        let mut circuit = Circuit::new();
        circuit.add(part("led_a", ComponentKind::Led, 0.0));
        circuit.add(part("led_b", ComponentKind::Led, 100.0));

        assert_eq!(circuit.len(), 2);
        assert_eq!(
            circuit.active_id(ComponentKind::Led),
            Some(ComponentId::intern("led_b"))
        );
        assert!(circuit.active(ComponentKind::Button).is_none());
    }

    #[test]
    fn terminal_center_is_canvas_relative() {
        let mut circuit = Circuit::new();
        circuit.add(part("btn_center", ComponentKind::Button, 100.0));
        let btn = circuit.active(ComponentKind::Button).unwrap();
        assert_eq!(btn.terminal_center(TerminalKind::Lead), Some((120.0, 35.0)));
        assert_eq!(btn.terminal_center(TerminalKind::Pin(3)), None);
    }

    #[test]
    fn clear_wires_resets_connected_marks() {
        let mut circuit = Circuit::new();
        let a = circuit.add(part("wire_a", ComponentKind::Controller, 0.0));
        let b = circuit.add(part("wire_b", ComponentKind::Led, 100.0));
        circuit.graph[b].terminals[0].connected = true;
        circuit.add_wire(
            a,
            b,
            Wire {
                role: Role::Led,
                pin: 13,
                from: (0.0, 0.0),
                to: (1.0, 1.0),
            },
        );
        assert_eq!(circuit.wire_count(), 1);

        circuit.clear_wires();
        assert_eq!(circuit.wire_count(), 0);
        assert!(!circuit.graph[b].terminals[0].connected);
    }

    #[test]
    fn unknown_tag_is_none() {
        assert_eq!(ComponentKind::from_tag("arduino"), Some(ComponentKind::Controller));
        assert_eq!(ComponentKind::from_tag("resistor"), None);
        assert_eq!(ComponentKind::from_tag("LED"), None);
    }

    #[test]
    fn hex_colors() {
        assert_eq!(Rgb::from_hex("#2E7D32"), Some(Rgb::new(0x2E, 0x7D, 0x32)));
        assert_eq!(Rgb::from_hex("fff"), Some(Rgb::new(255, 255, 255)));
        assert_eq!(Rgb::from_hex("#12345"), None);
        assert_eq!(Rgb::from_hex("#GG0000"), None);
        assert_eq!(Rgb::new(1, 2, 255).to_hex(), "#0102FF");
    }

    #[test]
    fn role_display_and_other() {
        assert_eq!(Role::Led.to_string(), "LED");
        assert_eq!(Role::Button.other(), Role::Led);
    }
}
