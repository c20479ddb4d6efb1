//! Pinboard headless driver.
//!
//! Replays an editor session from a script file (or stdin) and prints
//! what the browser editor would show: notices, warnings, wires and the
//! generated sketch.
//!
//! ```text
//! pinboard [--config board.json] [session.txt]
//! ```

mod script;

use pb_core::config::BoardConfig;
use pb_editor::workbench::Workbench;
use script::Session;
use std::io::Read;

fn main() {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let mut config_path = None;
    let mut script_path = None;
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--config" => match args.next() {
                Some(path) => config_path = Some(path),
                None => fail("--config needs a file path"),
            },
            "-h" | "--help" => {
                println!("usage: pinboard [--config board.json] [session.txt]");
                return;
            }
            _ if script_path.is_none() => script_path = Some(arg),
            _ => fail(&format!("unexpected argument '{arg}'")),
        }
    }

    let config = match config_path {
        Some(path) => {
            let text = std::fs::read_to_string(&path)
                .unwrap_or_else(|e| fail(&format!("cannot read {path}: {e}")));
            BoardConfig::from_json(&text).unwrap_or_else(|e| fail(&format!("{path}: {e}")))
        }
        None => BoardConfig::default(),
    };
    log::debug!("pins {}..={}", config.first_pin, config.last_pin);

    let script = match script_path {
        Some(path) => std::fs::read_to_string(&path)
            .unwrap_or_else(|e| fail(&format!("cannot read {path}: {e}"))),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .unwrap_or_else(|e| fail(&format!("failed to read stdin: {e}")));
            text
        }
    };

    let mut session = Session::new(Workbench::new(config));
    let outcome = session.run(&script);
    print!("{}", outcome.output);

    for (line, err) in &outcome.errors {
        eprintln!("pinboard: line {line}: {err}");
    }
    if !outcome.errors.is_empty() {
        std::process::exit(1);
    }
}

fn fail(message: &str) -> ! {
    eprintln!("pinboard: {message}");
    std::process::exit(2);
}
