//! Registration form host.
//!
//! Wires the pure form logic to the CEP lookup service and local storage,
//! and speaks a JSON-lines protocol: events in, UI effects out.

pub mod command;
pub mod config;
pub mod error;
pub mod session;
pub mod sink;

pub use command::{parse_command, Command};
pub use config::Config;
pub use error::{AppError, AppResult};
pub use session::Session;
pub use sink::{EffectSink, JsonLinesSink};
