//! Command-line argument engine.
//!
//! Two layers with one dependency direction:
//!
//! ```text
//! ParamDef (declarations + typed value cells) ← CommandLine (token machine)
//! ```
//!
//! The driver declares its parameters, registers them with a
//! [`CommandLine`], parses the raw argument vector once, then reads back
//! typed values and the positional list.

mod error;
mod param;
mod parser;

pub use error::{ParseError, ValueError};
pub use param::{ParamDef, ParamKind, ParamValue};
pub use parser::CommandLine;
