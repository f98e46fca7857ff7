//! Parsing of host input lines.

use registration_core::FormEvent;
use serde_json::Value;

/// One line of host input.
#[derive(Debug, Clone)]
pub enum Command {
    Form(FormEvent),
    ToggleDarkMode,
}

/// Parse a JSON input line such as `{"type":"blur","field":"cep"}`.
pub fn parse_command(line: &str) -> Result<Command, serde_json::Error> {
    let value: Value = serde_json::from_str(line)?;

    if value.get("type").and_then(Value::as_str) == Some("toggle_dark_mode") {
        return Ok(Command::ToggleDarkMode);
    }

    Ok(Command::Form(serde_json::from_value(value)?))
}
