//! Command-line front end for the K16 assembler.
//!
//! The crate currently ships the argument-parsing engine ([`args`]) and
//! the source-file loader ([`source`]); the assembler passes will build on
//! top of them.

pub mod args;
pub mod source;
