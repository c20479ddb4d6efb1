//! Board and canvas configuration.
//!
//! Every field has a default, so an empty JSON object (`{}`) is a valid
//! config. Unknown keys are rejected to catch typos early.

use crate::error::ConfigError;
use crate::model::Rgb;
use serde::{Deserialize, Deserializer, Serialize};

/// Left margin before the first controller pin terminal.
pub const PIN_ROW_MARGIN: f32 = 8.0;
/// Gap between the controller's top edge and the pin row.
pub const PIN_ROW_TOP: f32 = 4.0;

/// Size of a component template on the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct TemplateSize {
    pub width: f32,
    pub height: f32,
}

impl TemplateSize {
    pub const CONTROLLER: TemplateSize = TemplateSize::new(240.0, 150.0);
    pub const LED: TemplateSize = TemplateSize::new(50.0, 70.0);
    pub const BUTTON: TemplateSize = TemplateSize::new(60.0, 60.0);

    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// A template size as written in JSON: either side may be omitted and
/// falls back to that template's default.
#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct SizeOverride {
    width: Option<f32>,
    height: Option<f32>,
}

impl SizeOverride {
    fn over(self, base: TemplateSize) -> TemplateSize {
        TemplateSize::new(
            self.width.unwrap_or(base.width),
            self.height.unwrap_or(base.height),
        )
    }
}

fn controller_size<'de, D: Deserializer<'de>>(d: D) -> Result<TemplateSize, D::Error> {
    Ok(SizeOverride::deserialize(d)?.over(TemplateSize::CONTROLLER))
}

fn led_size<'de, D: Deserializer<'de>>(d: D) -> Result<TemplateSize, D::Error> {
    Ok(SizeOverride::deserialize(d)?.over(TemplateSize::LED))
}

fn button_size<'de, D: Deserializer<'de>>(d: D) -> Result<TemplateSize, D::Error> {
    Ok(SizeOverride::deserialize(d)?.over(TemplateSize::BUTTON))
}

/// Wire appearance.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct WireStyle {
    /// Hex color, `#RRGGBB`.
    pub color: String,
    pub width: f32,
}

impl WireStyle {
    /// Parsed wire color; `validate` guarantees this is `Some` for loaded configs.
    pub fn rgb(&self) -> Option<Rgb> {
        Rgb::from_hex(&self.color)
    }
}

impl Default for WireStyle {
    fn default() -> Self {
        Self {
            color: "#2E7D32".into(),
            width: 2.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BoardConfig {
    pub canvas_width: f32,
    pub canvas_height: f32,
    /// Lowest digital pin exposed on the controller.
    pub first_pin: u8,
    /// Highest digital pin exposed on the controller (inclusive).
    pub last_pin: u8,
    /// Edge length of a terminal hit box.
    pub terminal_size: f32,
    #[serde(deserialize_with = "controller_size")]
    pub controller: TemplateSize,
    #[serde(deserialize_with = "led_size")]
    pub led: TemplateSize,
    #[serde(deserialize_with = "button_size")]
    pub button: TemplateSize,
    pub wire: WireStyle,
    pub dark_mode: bool,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            canvas_width: 900.0,
            canvas_height: 600.0,
            first_pin: 0,
            last_pin: 13,
            terminal_size: 10.0,
            controller: TemplateSize::CONTROLLER,
            led: TemplateSize::LED,
            button: TemplateSize::BUTTON,
            wire: WireStyle::default(),
            dark_mode: false,
        }
    }
}

impl BoardConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        log::debug!(
            "loaded board config: pins {}..={}, canvas {}x{}",
            config.first_pin,
            config.last_pin,
            config.canvas_width,
            config.canvas_height
        );
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.first_pin > self.last_pin {
            return Err(ConfigError::Range(format!(
                "first_pin {} is greater than last_pin {}",
                self.first_pin, self.last_pin
            )));
        }
        if self.canvas_width <= 0.0 || self.canvas_height <= 0.0 {
            return Err(ConfigError::Range("canvas size must be positive".into()));
        }
        if self.wire.rgb().is_none() {
            return Err(ConfigError::Range(format!(
                "wire color {:?} is not a hex color",
                self.wire.color
            )));
        }
        if self.terminal_size <= 0.0 {
            return Err(ConfigError::Range("terminal_size must be positive".into()));
        }
        let t = self.terminal_size;
        if self.pin_row_extent() > self.controller.width
            || PIN_ROW_TOP + t > self.controller.height
        {
            return Err(ConfigError::Range(format!(
                "controller {}x{} cannot fit {} pins",
                self.controller.width,
                self.controller.height,
                self.pin_count()
            )));
        }
        for (name, size) in [("led", self.led), ("button", self.button)] {
            if size.width < t || size.height < t {
                return Err(ConfigError::Range(format!(
                    "{name} {}x{} is smaller than its {t}px lead",
                    size.width, size.height
                )));
            }
        }
        Ok(())
    }

    pub fn pin_count(&self) -> usize {
        (self.last_pin - self.first_pin) as usize + 1
    }

    /// Horizontal distance between neighbouring pin terminals.
    pub fn pin_pitch(&self) -> f32 {
        self.terminal_size * 1.6
    }

    /// Distance from the controller's left edge to the far side of the
    /// last pin terminal.
    pub fn pin_row_extent(&self) -> f32 {
        PIN_ROW_MARGIN + (self.pin_count() - 1) as f32 * self.pin_pitch() + self.terminal_size
    }

    pub fn has_pin(&self, pin: u8) -> bool {
        (self.first_pin..=self.last_pin).contains(&pin)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = BoardConfig::from_json("{}").unwrap();
        assert_eq!(config, BoardConfig::default());
        assert_eq!(config.pin_count(), 14);
    }

    #[test]
    fn partial_override_keeps_other_defaults() {
        let config = BoardConfig::from_json(r#"{"last_pin": 7, "wire": {"width": 3}}"#).unwrap();
        assert_eq!(config.last_pin, 7);
        assert_eq!(config.wire.width, 3.0);
        assert_eq!(config.wire.color, "#2E7D32");
        assert!(config.has_pin(7));
        assert!(!config.has_pin(8));
    }

    #[test]
    fn unknown_field_is_rejected() {
        assert!(matches!(
            BoardConfig::from_json(r#"{"pins": 3}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn inverted_pin_range_is_rejected() {
        assert!(matches!(
            BoardConfig::from_json(r#"{"first_pin": 9, "last_pin": 2}"#),
            Err(ConfigError::Range(_))
        ));
    }

    #[test]
    fn bad_wire_color_is_rejected() {
        assert!(matches!(
            BoardConfig::from_json(r#"{"wire": {"color": "green"}}"#),
            Err(ConfigError::Range(_))
        ));
    }

    #[test]
    fn template_sizes_take_partial_overrides() {
        let config = BoardConfig::from_json(r#"{"led": {"width": 80}}"#).unwrap();
        assert_eq!(config.led, TemplateSize::new(80.0, 70.0));
        assert_eq!(config.button, TemplateSize::BUTTON);

        let config = BoardConfig::from_json(r#"{"controller": {"height": 200}}"#).unwrap();
        assert_eq!(config.controller, TemplateSize::new(240.0, 200.0));
    }

    #[test]
    fn unknown_template_key_is_rejected() {
        assert!(matches!(
            BoardConfig::from_json(r#"{"led": {"width": 80, "height": 70, "colour": 1}}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn pin_row_must_fit_controller() {
        // 8 + 13 * 16 + 10 = 226
        assert_eq!(BoardConfig::default().pin_row_extent(), 226.0);
        assert!(matches!(
            BoardConfig::from_json(r#"{"controller": {"width": 224}}"#),
            Err(ConfigError::Range(_))
        ));
        assert!(BoardConfig::from_json(r#"{"controller": {"width": 226}}"#).is_ok());
    }

    #[test]
    fn parts_smaller_than_a_lead_are_rejected() {
        assert!(matches!(
            BoardConfig::from_json(r#"{"button": {"height": 6}}"#),
            Err(ConfigError::Range(_))
        ));
    }

    #[test]
    fn too_many_pins_for_controller_width() {
        let json = r#"{"last_pin": 60}"#;
        assert!(matches!(
            BoardConfig::from_json(json),
            Err(ConfigError::Range(_))
        ));
    }
}
