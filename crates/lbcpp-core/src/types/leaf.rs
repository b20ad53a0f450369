// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Leaf (non-composite) value kinds and their capability table.
//!
//! Every leaf type resolves to one [`LeafKind`] at construction time. The kind
//! supplies the missing-value rule, the string parser, the text writer and the
//! comparator, so call sites never inspect concrete types.

use crate::config::{missing_double, MISSING_DOUBLE_BITS, MISSING_INTEGER};
use crate::error::{Error, Result};
use crate::value::Payload;
use std::cmp::Ordering;

/// Payload kind stored by a leaf type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeafKind {
    Boolean,
    Integer,
    Double,
    String,
}

impl LeafKind {
    /// Human-readable payload kind name.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Boolean => "boolean",
            Self::Integer => "integer",
            Self::Double => "double",
            Self::String => "string",
        }
    }

    /// Distinguished missing encoding.
    ///
    /// Booleans have no spare bit pattern, so their absence is [`Payload::Nil`].
    pub fn missing_payload(&self) -> Payload {
        match self {
            Self::Boolean => Payload::Nil,
            Self::Integer => Payload::Integer(MISSING_INTEGER),
            Self::Double => Payload::Double(missing_double()),
            Self::String => Payload::String(String::new()),
        }
    }

    /// True iff `payload` is this kind's missing encoding.
    pub fn is_missing(&self, payload: &Payload) -> bool {
        match (self, payload) {
            (Self::Boolean, Payload::Nil) => true,
            (Self::Integer, Payload::Integer(v)) => *v == MISSING_INTEGER,
            (Self::Double, Payload::Double(v)) => v.to_bits() == MISSING_DOUBLE_BITS,
            (Self::String, Payload::String(s)) => s.is_empty(),
            _ => false,
        }
    }

    /// True iff `payload` has the runtime kind this leaf stores.
    pub fn accepts(&self, payload: &Payload) -> bool {
        matches!(
            (self, payload),
            (Self::Boolean, Payload::Boolean(_) | Payload::Nil)
                | (Self::Integer, Payload::Integer(_))
                | (Self::Double, Payload::Double(_))
                | (Self::String, Payload::String(_))
        )
    }

    /// Value produced by default construction.
    pub fn default_payload(&self) -> Payload {
        match self {
            Self::Boolean => Payload::Boolean(false),
            Self::Integer => Payload::Integer(0),
            Self::Double => Payload::Double(0.0),
            Self::String => Payload::String(String::new()),
        }
    }

    /// Parse `text` (the `loadFromString` rule).
    ///
    /// Surrounding blanks are ignored except for strings, which are kept verbatim.
    pub fn parse(&self, type_name: &str, text: &str) -> Result<Payload> {
        let invalid = || Error::InvalidValue {
            type_name: type_name.to_string(),
            value: text.to_string(),
        };
        match self {
            Self::Boolean => match text.trim().to_ascii_lowercase().as_str() {
                "true" | "yes" | "1" => Ok(Payload::Boolean(true)),
                "false" | "no" | "0" => Ok(Payload::Boolean(false)),
                _ => Err(invalid()),
            },
            Self::Integer => text
                .trim()
                .parse::<i64>()
                .map(Payload::Integer)
                .map_err(|_| invalid()),
            Self::Double => text
                .trim()
                .parse::<f64>()
                .map(Payload::Double)
                .map_err(|_| invalid()),
            Self::String => Ok(Payload::String(text.to_string())),
        }
    }

    /// Write a payload of this kind as text (inverse of [`LeafKind::parse`]).
    pub fn format(&self, payload: &Payload) -> String {
        match payload {
            Payload::Boolean(b) => b.to_string(),
            Payload::Integer(v) => v.to_string(),
            Payload::Double(v) => v.to_string(),
            Payload::String(s) => s.clone(),
            Payload::Nil | Payload::Object(_) => String::new(),
        }
    }

    /// Total order on payloads of this kind.
    pub fn compare(&self, a: &Payload, b: &Payload) -> Ordering {
        match (a, b) {
            (Payload::Boolean(x), Payload::Boolean(y)) => x.cmp(y),
            (Payload::Integer(x), Payload::Integer(y)) => x.cmp(y),
            (Payload::Double(x), Payload::Double(y)) => x.total_cmp(y),
            (Payload::String(x), Payload::String(y)) => x.cmp(y),
            _ => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

/// Extra validity rule carried by derived leaf types (`PositiveInteger`,
/// `Probability`, ...). Bounds are inclusive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueConstraint {
    pub min: Option<f64>,
    pub max: Option<f64>,
}

impl ValueConstraint {
    /// `>= 0`.
    pub fn non_negative() -> Self {
        Self {
            min: Some(0.0),
            max: None,
        }
    }

    /// `[0, 1]`.
    pub fn unit_interval() -> Self {
        Self {
            min: Some(0.0),
            max: Some(1.0),
        }
    }

    /// Inclusive range.
    pub fn between(min: f64, max: f64) -> Self {
        Self {
            min: Some(min),
            max: Some(max),
        }
    }

    /// Check a numeric payload. Non-numeric payloads are not constrained.
    pub fn check(&self, payload: &Payload) -> bool {
        let value = match payload {
            Payload::Integer(v) => *v as f64,
            Payload::Double(v) => *v,
            _ => return true,
        };
        if value.is_nan() {
            return false;
        }
        self.min.map_or(true, |min| value >= min) && self.max.map_or(true, |max| value <= max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_encodings() {
        for kind in [
            LeafKind::Boolean,
            LeafKind::Integer,
            LeafKind::Double,
            LeafKind::String,
        ] {
            assert!(kind.is_missing(&kind.missing_payload()), "{:?}", kind);
            assert!(!kind.is_missing(&kind.default_payload()) || kind == LeafKind::String);
        }
    }

    #[test]
    fn test_parse_and_format() {
        let p = LeafKind::Double.parse("Double", " 3.5 ").expect("parse");
        assert_eq!(LeafKind::Double.format(&p), "3.5");

        let p = LeafKind::Integer.parse("Integer", "-42").expect("parse");
        assert_eq!(LeafKind::Integer.format(&p), "-42");

        assert!(LeafKind::Integer.parse("Integer", "4.2").is_err());
        assert!(matches!(
            LeafKind::Boolean.parse("Boolean", "YES"),
            Ok(Payload::Boolean(true))
        ));

        let p = LeafKind::String.parse("String", "  spaced ").expect("parse");
        assert_eq!(LeafKind::String.format(&p), "  spaced ");
    }

    #[test]
    fn test_nan_is_an_ordinary_double() {
        assert!(!LeafKind::Double.is_missing(&Payload::Double(f64::NAN)));
        let nan = Payload::Double(f64::NAN);
        assert_eq!(LeafKind::Double.compare(&nan, &nan), Ordering::Equal);
    }

    #[test]
    fn test_constraints() {
        let positive = ValueConstraint::non_negative();
        assert!(positive.check(&Payload::Integer(0)));
        assert!(!positive.check(&Payload::Integer(-1)));

        let probability = ValueConstraint::unit_interval();
        assert!(probability.check(&Payload::Double(0.25)));
        assert!(!probability.check(&Payload::Double(1.5)));
        assert!(!probability.check(&Payload::Double(f64::NAN)));
    }
}
