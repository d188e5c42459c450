//! gridbatch-core - table model, command parsing, and the batch interpreter.
//!
//! The pipeline: load a delimited table, tokenize the command stream, fold
//! it over the table with [`Interpreter::run`], and save only on success.

pub mod command;
pub mod error;
pub mod format;
pub mod scan;
pub mod table;

pub use command::exec::{Interpreter, Selection};
pub use command::{Action, Command, load_commands};
pub use error::{GridbatchError, Result};
pub use table::Table;
