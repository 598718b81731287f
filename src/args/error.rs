//! Error types for the argument engine.

use thiserror::Error;

/// Errors produced while decoding a single parameter value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValueError {
    #[error("Invalid boolean literal '{token}'")]
    InvalidBool { token: String },

    #[error("Invalid integer literal '{token}'")]
    InvalidInt {
        token: String,
        #[source]
        source: std::num::ParseIntError,
    },

    #[error("Value {value} is outside the allowed range [{min}, {max}]")]
    OutOfRange { value: i64, min: i64, max: i64 },
}

/// Errors produced while parsing the command line.
///
/// Every variant aborts the parse at the point of violation; there is no
/// recovery or partial-success state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Option-looking token whose body is empty or dash-led after prefix
    /// stripping. Covers `-`, `--`, `---x`, and the empty token.
    #[error("Invalid command-line token '{token}'")]
    MalformedToken { token: String },

    #[error("Unknown parameter '{name}'{}", suggestion_hint(.suggestion))]
    UnknownParam {
        name: String,
        suggestion: Option<String>,
    },

    #[error("Unexpected value '{value}' for parameter '{name}'")]
    UnexpectedValue { name: String, value: String },

    #[error("Invalid value '{value}' for parameter '{name}': {source}")]
    InvalidValue {
        name: String,
        value: String,
        #[source]
        source: ValueError,
    },

    /// An option token arrived while the previous option was still waiting
    /// for its value.
    #[error("Expected a value for parameter '{name}' but found '{token}'")]
    ExpectedValue { name: String, token: String },

    /// The argument stream ended while an option was waiting for its value.
    #[error("Missing value for parameter '{name}'")]
    MissingValue { name: String },

    #[error("Mandatory parameter '{name}' was not supplied")]
    MissingMandatory { name: String },
}

fn suggestion_hint(suggestion: &Option<String>) -> String {
    match suggestion {
        Some(candidate) => format!(" (did you mean '{}'?)", candidate),
        None => String::new(),
    }
}
