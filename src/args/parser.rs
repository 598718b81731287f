//! Token state machine over the parameter registry.
//!
//! [`CommandLine`] owns the registered declarations and walks the raw
//! argument vector one token at a time. A value-taking option whose name
//! token carried no inline value parks its registry index in the pending
//! slot; the next token must supply the value. Parsing aborts at the first
//! violation and a final pass checks for a dangling pending value and for
//! unset mandatory parameters.

use tracing::debug;

use crate::args::error::ParseError;
use crate::args::param::{ParamDef, ParamKind};

/// Suggestions farther than this edit distance are discarded.
const MAX_SUGGESTION_DISTANCE: usize = 2;

/// The parameter registry plus one parse session's state.
#[derive(Debug, Default)]
pub struct CommandLine {
    params: Vec<ParamDef>,
    positionals: Vec<String>,
    /// Registry index of the declaration currently awaiting its value.
    pending: Option<usize>,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a declaration to the registry.
    ///
    /// Names are not checked for uniqueness; lookup is a linear scan in
    /// registration order, so the first-registered declaration with a
    /// colliding name masks later ones.
    pub fn register(&mut self, def: ParamDef) {
        self.params.push(def);
    }

    /// Find a declaration by short or long name, first match wins.
    pub fn find(&self, name: &str) -> Option<&ParamDef> {
        self.params.iter().find(|p| p.matches_name(name))
    }

    fn find_index(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.matches_name(name))
    }

    /// All declarations in registration order.
    pub fn params(&self) -> &[ParamDef] {
        &self.params
    }

    /// Positional arguments in encounter order.
    pub fn positionals(&self) -> &[String] {
        &self.positionals
    }

    /// Parse the full token sequence, then run final validation.
    ///
    /// Fails at the first violation with no recovery. A failed parse
    /// leaves values set before the failure point in place; callers must
    /// not read parameters after an error.
    pub fn parse(&mut self, args: &[String]) -> Result<(), ParseError> {
        for token in args {
            self.push_token(token)?;
        }
        self.finish()
    }

    /// Feed one token through the state machine.
    fn push_token(&mut self, token: &str) -> Result<(), ParseError> {
        let prefix = if token.len() >= 2 && token.starts_with('-') {
            if let Some(idx) = self.pending {
                return Err(ParseError::ExpectedValue {
                    name: self.params[idx].name(),
                    token: token.to_string(),
                });
            }
            if token.starts_with("--") {
                2
            } else {
                1
            }
        } else {
            0
        };

        // The body must be non-empty and must not lead with another dash.
        // This rejects `-`, `--`, `---x`, and the empty token.
        let body = &token[prefix..];
        if body.is_empty() || body.starts_with('-') {
            return Err(ParseError::MalformedToken {
                token: token.to_string(),
            });
        }

        if prefix == 0 {
            return match self.pending.take() {
                Some(idx) => self.assign_value(idx, token),
                None => {
                    debug!(argument = %token, "Positional argument accepted");
                    self.positionals.push(token.to_string());
                    Ok(())
                }
            };
        }

        // Short form: first character is the name, the rest is an inline
        // value. Long form: split at the first '='; an absent or empty
        // value leaves the option pending.
        let (name, inline) = if prefix == 1 {
            match body.char_indices().nth(1) {
                Some((split, _)) => body.split_at(split),
                None => (body, ""),
            }
        } else {
            match body.split_once('=') {
                Some((name, value)) => (name, value),
                None => (body, ""),
            }
        };

        let Some(idx) = self.find_index(name) else {
            return Err(ParseError::UnknownParam {
                name: name.to_string(),
                suggestion: self.suggest(name),
            });
        };

        if !self.params[idx].takes_value() {
            if !inline.is_empty() {
                return Err(ParseError::UnexpectedValue {
                    name: self.params[idx].name(),
                    value: inline.to_string(),
                });
            }
            // Presence activation.
            return self.assign_value(idx, "");
        }

        if inline.is_empty() {
            self.pending = Some(idx);
            return Ok(());
        }
        self.assign_value(idx, inline)
    }

    /// Decode `value` into the declaration at `idx`.
    fn assign_value(&mut self, idx: usize, value: &str) -> Result<(), ParseError> {
        let def = &mut self.params[idx];
        def.set_value(value).map_err(|source| ParseError::InvalidValue {
            name: def.name(),
            value: value.to_string(),
            source,
        })?;
        debug!(parameter = %def.name(), value = %def.as_str(), "Parameter accepted");
        Ok(())
    }

    /// Validation after the last token: no dangling pending value, every
    /// mandatory parameter set.
    fn finish(&self) -> Result<(), ParseError> {
        if let Some(idx) = self.pending {
            return Err(ParseError::MissingValue {
                name: self.params[idx].name(),
            });
        }
        for p in &self.params {
            if p.is_mandatory() && !p.is_set() {
                return Err(ParseError::MissingMandatory { name: p.name() });
            }
        }
        Ok(())
    }

    /// Closest registered name within the edit-distance threshold, for
    /// unknown-parameter diagnostics.
    fn suggest(&self, name: &str) -> Option<String> {
        self.params
            .iter()
            .flat_map(|p| {
                p.short()
                    .map(String::from)
                    .into_iter()
                    .chain((!p.long().is_empty()).then(|| p.long().to_string()))
            })
            .map(|candidate| (strsim::levenshtein(name, &candidate), candidate))
            .filter(|(distance, _)| *distance <= MAX_SUGGESTION_DISTANCE)
            .min_by_key(|(distance, _)| *distance)
            .map(|(_, candidate)| candidate)
    }

    /// One line per declaration: forms, value placeholder, description,
    /// mandatory marker.
    pub fn usage(&self) -> String {
        let mut rows = Vec::new();
        for p in &self.params {
            let forms = match (p.short(), p.long()) {
                (Some(short), long) if !long.is_empty() => format!("-{}, --{}", short, long),
                (Some(short), _) => format!("-{}", short),
                (None, long) => format!("    --{}", long),
            };
            let placeholder = match p.kind() {
                ParamKind::Str => " <VALUE>",
                ParamKind::Int => " <N>",
                ParamKind::Bool => "",
            };
            rows.push((format!("{}{}", forms, placeholder), p));
        }

        let width = rows.iter().map(|(cell, _)| cell.len()).max().unwrap_or(0);
        let mut out = String::new();
        for (cell, p) in rows {
            let marker = if p.is_mandatory() { " (mandatory)" } else { "" };
            out.push_str(&format!(
                "  {:<width$}  {}{}\n",
                cell,
                p.description(),
                marker
            ));
        }
        out
    }
}
