//! Session scripts: one editor command per line.
//!
//! ```text
//! # comments and blank lines are skipped
//! drop arduino 20 300
//! drop led 400 40
//! assign 13 led
//! assign 13 -        # `-` clears the pin
//! press
//! code
//! ```

use pb_core::id::ComponentId;
use pb_core::model::*;
use pb_editor::input::InputEvent;
use pb_editor::workbench::Workbench;
use std::fmt::Write;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("unknown command `{0}`")]
    UnknownCommand(String),
    #[error("usage: {0}")]
    Usage(&'static str),
    #[error("`{0}` is not a number")]
    BadNumber(String),
    #[error("no component named `{0}`")]
    UnknownComponent(String),
    #[error("no button on the canvas")]
    NoButton,
}

/// A parsed script line.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Drop { kind: String, x: f32, y: f32 },
    Move { id: String, x: f32, y: f32 },
    Assign { pin: u8, role: String },
    Press,
    Release,
    Leave,
    Sim,
    View(String),
    Wires,
    Code,
    State,
}

impl Command {
    /// Parse one line. Blank lines and `#` comments yield `None`.
    pub fn parse(line: &str) -> Result<Option<Command>, ScriptError> {
        let line = line.split('#').next().unwrap_or_default().trim();
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Ok(None);
        };
        let args: Vec<&str> = words.collect();

        let command = match (name, args.as_slice()) {
            ("drop", [kind, x, y]) => Command::Drop {
                kind: kind.to_string(),
                x: number(x)?,
                y: number(y)?,
            },
            ("drop", _) => return Err(ScriptError::Usage("drop <kind> <x> <y>")),
            ("move", [id, x, y]) => Command::Move {
                id: id.to_string(),
                x: number(x)?,
                y: number(y)?,
            },
            ("move", _) => return Err(ScriptError::Usage("move <id> <x> <y>")),
            ("assign", [pin, role]) => Command::Assign {
                pin: number(pin)?,
                role: if *role == "-" { String::new() } else { role.to_string() },
            },
            ("assign", [pin]) => Command::Assign {
                pin: number(pin)?,
                role: String::new(),
            },
            ("assign", _) => return Err(ScriptError::Usage("assign <pin> <led|button|->")),
            ("view", [name]) => Command::View(name.to_string()),
            ("view", _) => return Err(ScriptError::Usage("view <components|code>")),
            ("press", []) => Command::Press,
            ("release", []) => Command::Release,
            ("leave", []) => Command::Leave,
            ("sim", []) => Command::Sim,
            ("wires", []) => Command::Wires,
            ("code", []) => Command::Code,
            ("state", []) => Command::State,
            (other, _) => return Err(ScriptError::UnknownCommand(other.to_string())),
        };
        Ok(Some(command))
    }
}

fn number<T: FromStr>(word: &str) -> Result<T, ScriptError> {
    word.parse().map_err(|_| ScriptError::BadNumber(word.to_string()))
}

/// Result of running a whole script.
#[derive(Debug, Default)]
pub struct Outcome {
    pub output: String,
    /// `(line number, error)` for every line that failed.
    pub errors: Vec<(usize, ScriptError)>,
}

/// Replays commands against a `Workbench`.
pub struct Session {
    bench: Workbench,
}

impl Session {
    pub fn new(bench: Workbench) -> Self {
        Self { bench }
    }

    pub fn bench(&self) -> &Workbench {
        &self.bench
    }

    /// Run every line. A failing line is recorded and skipped.
    pub fn run(&mut self, script: &str) -> Outcome {
        let mut outcome = Outcome::default();
        for (i, line) in script.lines().enumerate() {
            let result = Command::parse(line).and_then(|command| match command {
                Some(command) => self.execute(command),
                None => Ok(String::new()),
            });
            match result {
                Ok(text) => outcome.output.push_str(&text),
                Err(err) => {
                    log::warn!("line {}: {err}", i + 1);
                    outcome.errors.push((i + 1, err));
                }
            }
        }
        outcome
    }

    /// Execute one command, returning what it printed.
    pub fn execute(&mut self, command: Command) -> Result<String, ScriptError> {
        log::debug!("{command:?}");
        let mut out = String::new();
        match command {
            Command::Drop { kind, x, y } => match self.bench.drop_component(&kind, x, y) {
                Some(id) => writeln!(out, "dropped {id}").unwrap(),
                None => writeln!(out, "ignored {kind}").unwrap(),
            },
            Command::Move { id, x, y } => {
                let component = ComponentId::lookup(&id)
                    .filter(|id| self.bench.circuit().get(*id).is_some())
                    .ok_or(ScriptError::UnknownComponent(id))?;
                self.bench.move_component(component, x, y);
            }
            Command::Assign { pin, role } => match self.bench.assign_from_input(pin, &role) {
                Ok(_) => {}
                Err(warning) => writeln!(out, "warning: {warning}").unwrap(),
            },
            Command::Press => {
                let (x, y) = self.button_lead()?;
                self.bench.handle(InputEvent::from_pointer_down(x, y));
            }
            Command::Release => {
                let (x, y) = self.button_lead()?;
                self.bench.handle(InputEvent::from_pointer_up(x, y));
            }
            Command::Leave => {
                self.bench.handle(InputEvent::PointerLeave);
            }
            Command::Sim => writeln!(out, "{}", self.bench.toggle_simulation()).unwrap(),
            Command::View(name) => {
                let view = self.bench.set_view(&name);
                writeln!(out, "view {}", view.as_str()).unwrap();
            }
            Command::Wires => {
                for wire in self.bench.circuit().wires() {
                    writeln!(
                        out,
                        "{} pin {}: ({}, {}) -> ({}, {})",
                        wire.role.as_str(),
                        wire.pin,
                        wire.from.0,
                        wire.from.1,
                        wire.to.0,
                        wire.to.1
                    )
                    .unwrap();
                }
            }
            Command::Code => out.push_str(self.bench.sketch()),
            Command::State => {
                let json = serde_json::to_string_pretty(&self.bench.snapshot())
                    .unwrap_or_else(|_| "{}".to_string());
                writeln!(out, "{json}").unwrap();
            }
        }
        Ok(out)
    }

    /// Center of the active button's lead.
    fn button_lead(&self) -> Result<(f32, f32), ScriptError> {
        self.bench
            .circuit()
            .active(ComponentKind::Button)
            .and_then(|button| button.terminal_center(TerminalKind::Lead))
            .ok_or(ScriptError::NoButton)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn session() -> Session {
        Session::new(Workbench::default())
    }

    #[test]
    fn parse_skips_blank_and_comments() {
        assert_eq!(Command::parse("   "), Ok(None));
        assert_eq!(Command::parse("# just a note"), Ok(None));
        assert_eq!(
            Command::parse("drop led 10 20  # the LED"),
            Ok(Some(Command::Drop {
                kind: "led".into(),
                x: 10.0,
                y: 20.0
            }))
        );
    }

    #[test]
    fn parse_errors() {
        assert_eq!(
            Command::parse("blink 13"),
            Err(ScriptError::UnknownCommand("blink".into()))
        );
        assert_eq!(
            Command::parse("assign thirteen led"),
            Err(ScriptError::BadNumber("thirteen".into()))
        );
        assert_eq!(
            Command::parse("drop led 10"),
            Err(ScriptError::Usage("drop <kind> <x> <y>"))
        );
        assert_eq!(
            Command::parse("assign 13 -"),
            Ok(Some(Command::Assign {
                pin: 13,
                role: String::new()
            }))
        );
    }

    #[test]
    fn full_session_prints_sketch() {
        let mut session = session();
        let outcome = session.run(
            "drop arduino 20 300\n\
             drop led 400 40\n\
             drop button 600 40\n\
             assign 13 led\n\
             assign 2 button\n\
             code\n",
        );
        assert!(outcome.errors.is_empty());
        assert!(outcome.output.contains("  int buttonState = digitalRead(2);\n"));
        assert!(outcome.output.contains("  digitalWrite(13, buttonState);\n"));
        assert_eq!(session.bench().circuit().wire_count(), 2);
    }

    #[test]
    fn conflicts_print_a_warning_and_keep_going() {
        let mut session = session();
        let outcome = session.run("assign 13 led\nassign 13 button\ncode\n");
        assert!(outcome.errors.is_empty());
        assert!(
            outcome
                .output
                .contains("warning: Pin 13 is already used by the LED.\n")
        );
        assert!(outcome.output.contains("pinMode(13, OUTPUT);"));
        assert!(!outcome.output.contains("INPUT"));
    }

    #[test]
    fn errors_carry_line_numbers() {
        let mut session = session();
        let outcome = session.run("drop led 1 1\n\nfrobnicate\npress\nsim\n");
        assert_eq!(
            outcome.errors,
            vec![
                (3, ScriptError::UnknownCommand("frobnicate".into())),
                (4, ScriptError::NoButton),
            ]
        );
        // Later lines still ran.
        assert!(outcome.output.ends_with("Simulation Started\n"));
    }

    #[test]
    fn press_and_release_drive_pins() {
        let mut session = session();
        session.run("drop button 600 40\nassign 13 led\nassign 2 button\npress\n");
        assert!(session.bench().simulator().values().get(13));
        session.run("release\n");
        assert!(!session.bench().simulator().values().get(13));
        session.run("press\nleave\n");
        assert!(!session.bench().simulator().values().get(2));
    }

    #[test]
    fn move_needs_a_known_component() {
        let mut session = session();
        let outcome = session.run("move nowhere 1 1\n");
        assert_eq!(
            outcome.errors,
            vec![(1, ScriptError::UnknownComponent("nowhere".into()))]
        );
    }
}
