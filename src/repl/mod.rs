//! Interactive Explorer
//!
//! Command parsing and the session that executes commands.

mod command;
mod session;

pub use command::{clean_input, Command, ParseError, HELP_TEXT};
pub use session::{roll_catch, Flow, Session, SessionError};
