//! Destinations for effects the page has to render.

use crate::error::AppResult;
use registration_core::Effect;
use serde_json::json;
use std::io::Write;

/// Receives UI effects, in order.
pub trait EffectSink {
    fn emit(&mut self, effect: &Effect) -> AppResult<()>;

    /// Theme changed; hosts without theming can ignore it.
    fn theme(&mut self, _dark: bool) -> AppResult<()> {
        Ok(())
    }
}

/// Collects effects in memory.
impl EffectSink for Vec<Effect> {
    fn emit(&mut self, effect: &Effect) -> AppResult<()> {
        self.push(effect.clone());
        Ok(())
    }
}

/// Writes one JSON object per line.
pub struct JsonLinesSink<W: Write> {
    writer: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }

    fn write_line(&mut self, value: &impl serde::Serialize) -> AppResult<()> {
        serde_json::to_writer(&mut self.writer, value)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> EffectSink for JsonLinesSink<W> {
    fn emit(&mut self, effect: &Effect) -> AppResult<()> {
        self.write_line(effect)
    }

    fn theme(&mut self, dark: bool) -> AppResult<()> {
        self.write_line(&json!({ "effect": "set_theme", "dark": dark }))
    }
}
