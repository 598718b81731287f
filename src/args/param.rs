//! Parameter declarations and their typed value cells.
//!
//! A [`ParamDef`] couples one command-line parameter's identity (short and
//! long names), its behavior (mandatory, value-taking), and the decoded
//! value it receives during parsing. The decode rules form a closed set,
//! one per [`ParamKind`], selected by a single match.

use crate::args::error::ValueError;

/// Spellings accepted as explicit boolean values (case-sensitive).
const TRUTHY: &[&str] = &["1", "y", "yes", "t", "true", "on"];
const FALSY: &[&str] = &["0", "n", "no", "f", "false", "off"];

/// Which decode rule set a parameter uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Free-form string, stored verbatim.
    Str,
    /// Presence flag; an explicit value must spell a boolean.
    Bool,
    /// Base-10 signed integer with an optional inclusive range.
    Int,
}

/// Decoded storage for one parameter, tagged by kind.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Bool(bool),
    Int(i64),
}

impl ParamValue {
    /// Canonical text form: verbatim for strings, `true`/`false` for
    /// booleans, decimal for integers.
    fn canonical(&self) -> String {
        match self {
            ParamValue::Str(s) => s.clone(),
            ParamValue::Bool(b) => b.to_string(),
            ParamValue::Int(v) => v.to_string(),
        }
    }
}

/// A single parameter declaration with its embedded value cell.
///
/// Created by the driver before parsing, mutated only through
/// [`ParamDef::set_value`] during parsing, read back afterwards. Repeated
/// assignment is allowed; the last write wins.
#[derive(Debug, Clone)]
pub struct ParamDef {
    /// Single-character form, matched without the leading dash.
    short: Option<char>,
    /// Long form, matched without the leading dashes. May be empty when a
    /// short form exists.
    long: String,
    description: String,
    mandatory: bool,
    takes_value: bool,
    /// Inclusive bounds for integer values; equal bounds disable the check.
    bounds: (i64, i64),
    /// Text mirror of `value`, refreshed on every successful set.
    raw: String,
    value: ParamValue,
    is_set: bool,
}

impl ParamDef {
    fn new(
        short: Option<char>,
        long: &str,
        description: &str,
        takes_value: bool,
        value: ParamValue,
    ) -> Self {
        Self {
            short,
            long: long.to_string(),
            description: description.to_string(),
            mandatory: false,
            takes_value,
            bounds: (0, 0),
            raw: value.canonical(),
            value,
            is_set: false,
        }
    }

    /// A boolean presence flag, default off.
    pub fn flag(short: Option<char>, long: &str, description: &str) -> Self {
        Self::new(short, long, description, false, ParamValue::Bool(false))
    }

    /// A value-taking string parameter, default empty.
    pub fn string(short: Option<char>, long: &str, description: &str) -> Self {
        Self::new(short, long, description, true, ParamValue::Str(String::new()))
    }

    /// A value-taking integer parameter with an explicit default.
    pub fn int(short: Option<char>, long: &str, description: &str, default: i64) -> Self {
        Self::new(short, long, description, true, ParamValue::Int(default))
    }

    /// Mark the parameter as required input.
    pub fn mandatory(mut self) -> Self {
        self.mandatory = true;
        self
    }

    /// Replace the default of a string parameter. Ignored for other kinds.
    pub fn with_default(mut self, default: &str) -> Self {
        if let ParamValue::Str(current) = &mut self.value {
            *current = default.to_string();
            self.raw = default.to_string();
        }
        self
    }

    /// Restrict an integer parameter to the inclusive range `[min, max]`.
    /// Equal bounds disable the check.
    pub fn with_range(mut self, min: i64, max: i64) -> Self {
        self.bounds = (min, max);
        self
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn long(&self) -> &str {
        &self.long
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn is_mandatory(&self) -> bool {
        self.mandatory
    }

    pub fn takes_value(&self) -> bool {
        self.takes_value
    }

    /// True once a command-line token has set the value; false while the
    /// default is in effect.
    pub fn is_set(&self) -> bool {
        self.is_set
    }

    /// The name used in diagnostics: the long form when present, the short
    /// form otherwise.
    pub fn name(&self) -> String {
        if self.long.is_empty() {
            self.short.map(String::from).unwrap_or_default()
        } else {
            self.long.clone()
        }
    }

    pub fn kind(&self) -> ParamKind {
        match self.value {
            ParamValue::Str(_) => ParamKind::Str,
            ParamValue::Bool(_) => ParamKind::Bool,
            ParamValue::Int(_) => ParamKind::Int,
        }
    }

    /// The decoded value cell.
    pub fn value(&self) -> &ParamValue {
        &self.value
    }

    /// True when `name` equals the long form or is exactly the single
    /// short-form character.
    pub fn matches_name(&self, name: &str) -> bool {
        (!self.long.is_empty() && name == self.long)
            || self.short.is_some_and(|short| {
                let mut chars = name.chars();
                chars.next() == Some(short) && chars.next().is_none()
            })
    }

    /// Decode `raw` according to the parameter kind and store the result.
    ///
    /// String cells accept anything verbatim. Boolean cells accept the
    /// empty activation plus the truthy and falsy spellings, and always
    /// store `true`: presence of the flag wins over an explicit falsy
    /// spelling. Integer cells require the whole token to be a base-10
    /// number inside the declared range.
    ///
    /// On success the text mirror is refreshed and the cell is marked set.
    pub fn set_value(&mut self, raw: &str) -> Result<(), ValueError> {
        match &mut self.value {
            ParamValue::Str(current) => {
                *current = raw.to_string();
            }
            ParamValue::Bool(current) => {
                if !raw.is_empty() && !TRUTHY.contains(&raw) && !FALSY.contains(&raw) {
                    return Err(ValueError::InvalidBool {
                        token: raw.to_string(),
                    });
                }
                *current = true;
            }
            ParamValue::Int(current) => {
                let value: i64 = raw.parse().map_err(|source| ValueError::InvalidInt {
                    token: raw.to_string(),
                    source,
                })?;
                let (min, max) = self.bounds;
                if min != max && !(min..=max).contains(&value) {
                    return Err(ValueError::OutOfRange { value, min, max });
                }
                *current = value;
            }
        }
        self.raw = self.value.canonical();
        self.is_set = true;
        Ok(())
    }

    /// Decoded boolean. Non-bool parameters read as `true`.
    pub fn as_bool(&self) -> bool {
        match self.value {
            ParamValue::Bool(b) => b,
            _ => true,
        }
    }

    /// Decoded integer. Non-int parameters read as `0`.
    pub fn as_int(&self) -> i64 {
        match self.value {
            ParamValue::Int(v) => v,
            _ => 0,
        }
    }

    /// Current value as text: verbatim for strings, canonical for booleans
    /// and integers.
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_stores_verbatim_and_mirrors() {
        let mut p = ParamDef::string(Some('o'), "out", "Output path");
        assert!(!p.is_set());
        assert_eq!(p.as_str(), "");

        p.set_value("a.out").unwrap();
        assert!(p.is_set());
        assert_eq!(p.value(), &ParamValue::Str("a.out".to_string()));
        assert_eq!(p.as_str(), "a.out");
    }

    #[test]
    fn string_default_readback_until_set() {
        let p = ParamDef::string(None, "lst", "Listing path").with_default("out.lst");
        assert!(!p.is_set());
        assert_eq!(p.as_str(), "out.lst");
        assert_eq!(p.value(), &ParamValue::Str("out.lst".to_string()));
    }

    #[test]
    fn last_write_wins() {
        let mut p = ParamDef::string(Some('o'), "out", "Output path");
        p.set_value("first").unwrap();
        p.set_value("second").unwrap();
        assert_eq!(p.as_str(), "second");
    }

    #[test]
    fn bool_empty_activation_sets_true() {
        let mut p = ParamDef::flag(Some('v'), "verbose", "Verbose output");
        assert!(!p.as_bool());
        assert_eq!(p.as_str(), "false");

        p.set_value("").unwrap();
        assert!(p.as_bool());
        assert!(p.is_set());
        assert_eq!(p.as_str(), "true");
    }

    #[test]
    fn bool_truthy_spellings_accepted() {
        for spelling in ["1", "y", "yes", "t", "true", "on"] {
            let mut p = ParamDef::flag(Some('v'), "verbose", "Verbose output");
            p.set_value(spelling).unwrap();
            assert!(p.as_bool(), "spelling {:?} should decode", spelling);
        }
    }

    #[test]
    fn bool_explicit_falsy_still_reads_true() {
        // Presence of the flag wins over the spelled-out value.
        for spelling in ["0", "n", "no", "f", "false", "off"] {
            let mut p = ParamDef::flag(Some('v'), "verbose", "Verbose output");
            p.set_value(spelling).unwrap();
            assert!(p.as_bool(), "spelling {:?} should still read true", spelling);
            assert!(p.is_set());
            assert_eq!(p.as_str(), "true");
        }
    }

    #[test]
    fn bool_garbage_rejected() {
        let mut p = ParamDef::flag(Some('v'), "verbose", "Verbose output");
        let err = p.set_value("maybe").unwrap_err();
        assert_eq!(
            err,
            ValueError::InvalidBool {
                token: "maybe".to_string()
            }
        );
        assert!(!p.is_set());
        assert!(!p.as_bool());
    }

    #[test]
    fn bool_spellings_are_case_sensitive() {
        let mut p = ParamDef::flag(Some('v'), "verbose", "Verbose output");
        assert!(p.set_value("YES").is_err());
        assert!(p.set_value("True").is_err());
    }

    #[test]
    fn int_decodes_and_mirrors_canonical() {
        let mut p = ParamDef::int(Some('j'), "threads", "Worker count", 1);
        assert_eq!(p.as_int(), 1);
        assert_eq!(p.as_str(), "1");

        p.set_value("07").unwrap();
        assert_eq!(p.as_int(), 7);
        // The mirror holds the canonical form, not the raw token.
        assert_eq!(p.as_str(), "7");
    }

    #[test]
    fn int_rejects_non_numeric() {
        let mut p = ParamDef::int(Some('j'), "threads", "Worker count", 1);
        assert!(matches!(
            p.set_value("4abc"),
            Err(ValueError::InvalidInt { .. })
        ));
        assert!(matches!(p.set_value(""), Err(ValueError::InvalidInt { .. })));
        assert_eq!(p.as_int(), 1);
        assert!(!p.is_set());
    }

    #[test]
    fn int_range_enforced_inclusive() {
        let mut p = ParamDef::int(Some('j'), "threads", "Worker count", 1).with_range(1, 16);
        p.set_value("1").unwrap();
        p.set_value("16").unwrap();

        let err = p.set_value("17").unwrap_err();
        assert_eq!(
            err,
            ValueError::OutOfRange {
                value: 17,
                min: 1,
                max: 16
            }
        );
        assert!(p.set_value("0").is_err());
        assert_eq!(p.as_int(), 16);
    }

    #[test]
    fn int_equal_bounds_disable_range() {
        let mut p = ParamDef::int(Some('j'), "threads", "Worker count", 1);
        p.set_value("-400000").unwrap();
        assert_eq!(p.as_int(), -400000);

        let mut pinned = ParamDef::int(None, "depth", "Recursion depth", 5).with_range(5, 5);
        pinned.set_value("9000").unwrap();
        assert_eq!(pinned.as_int(), 9000);
    }

    #[test]
    fn cross_kind_readers_have_defined_defaults() {
        let flag = ParamDef::flag(Some('v'), "verbose", "Verbose output");
        let string = ParamDef::string(Some('o'), "out", "Output path");
        let int = ParamDef::int(Some('j'), "threads", "Worker count", 3);

        assert_eq!(flag.as_int(), 0);
        assert!(string.as_bool());
        assert_eq!(string.as_int(), 0);
        assert!(int.as_bool());
        assert_eq!(int.as_str(), "3");
    }

    #[test]
    fn matches_short_and_long_names() {
        let p = ParamDef::flag(Some('v'), "verbose", "Verbose output");
        assert!(p.matches_name("verbose"));
        assert!(p.matches_name("v"));
        assert!(!p.matches_name("verbos"));
        assert!(!p.matches_name("vv"));
        assert!(!p.matches_name(""));
    }

    #[test]
    fn empty_long_name_never_matches() {
        let p = ParamDef::flag(Some('x'), "", "Short-only flag");
        assert!(p.matches_name("x"));
        assert!(!p.matches_name(""));
    }

    #[test]
    fn name_prefers_long_form() {
        let both = ParamDef::flag(Some('v'), "verbose", "Verbose output");
        assert_eq!(both.name(), "verbose");

        let short_only = ParamDef::flag(Some('x'), "", "Short-only flag");
        assert_eq!(short_only.name(), "x");
    }

    #[test]
    fn kind_reflects_constructor() {
        assert_eq!(ParamDef::flag(None, "a", "").kind(), ParamKind::Bool);
        assert_eq!(ParamDef::string(None, "b", "").kind(), ParamKind::Str);
        assert_eq!(ParamDef::int(None, "c", "", 0).kind(), ParamKind::Int);
    }

    #[test]
    fn with_default_ignored_for_non_strings() {
        let p = ParamDef::int(None, "threads", "Worker count", 2).with_default("9");
        assert_eq!(p.as_int(), 2);
        assert_eq!(p.as_str(), "2");
    }
}
