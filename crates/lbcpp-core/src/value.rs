// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Typed values.
//!
//! A [`Variable`] pairs a [`TypeRef`] with a [`Payload`]. Scalars are held
//! inline; class instances are held through a shared [`ObjectRef`].

use crate::error::{Error, Result};
use crate::object::ObjectRef;
use crate::types::{builtin, more_specific, TypeRef};
use std::cmp::Ordering;
use std::fmt;
use std::sync::Arc;

// ============================================================================
// Payload
// ============================================================================

/// Runtime storage of a value.
#[derive(Debug, Clone, Default)]
pub enum Payload {
    /// No value (nil variable, missing boolean).
    #[default]
    Nil,
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
    /// Shared class instance; `None` is the missing object.
    Object(Option<ObjectRef>),
}

impl Payload {
    /// Payload kind name used in diagnostics.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Nil => "nil",
            Self::Boolean(_) => "boolean",
            Self::Integer(_) => "integer",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::Object(_) => "object",
        }
    }

    /// Fallback order between payloads of different kinds.
    pub(crate) fn kind_rank(&self) -> u8 {
        match self {
            Self::Nil => 0,
            Self::Boolean(_) => 1,
            Self::Integer(_) => 2,
            Self::Double(_) => 3,
            Self::String(_) => 4,
            Self::Object(_) => 5,
        }
    }
}

// Doubles compare bit-for-bit so the missing sentinel and NaN behave; objects
// compare by identity.
impl PartialEq for Payload {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Nil, Self::Nil) => true,
            (Self::Boolean(a), Self::Boolean(b)) => a == b,
            (Self::Integer(a), Self::Integer(b)) => a == b,
            (Self::Double(a), Self::Double(b)) => a.to_bits() == b.to_bits(),
            (Self::String(a), Self::String(b)) => a == b,
            (Self::Object(a), Self::Object(b)) => match (a, b) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            },
            _ => false,
        }
    }
}

// ============================================================================
// Variable
// ============================================================================

/// A typed value.
///
/// The default variable is nil: no type, no payload, and missing.
///
/// ```rust
/// use lbcpp_core::Variable;
/// use lbcpp_core::types::builtin;
///
/// let x = Variable::double(3.5);
/// assert_eq!(x.type_name(), "Double");
/// assert_eq!(x.to_string(), "3.5");
///
/// let absent = Variable::missing(&builtin::double_type());
/// assert!(absent.is_missing());
/// assert!(absent < x);
/// ```
#[derive(Clone, Default)]
pub struct Variable {
    ty: Option<TypeRef>,
    payload: Payload,
}

impl Variable {
    /// The nil variable.
    pub fn nil() -> Self {
        Self::default()
    }

    /// Unchecked constructor for payloads already validated against `ty`.
    pub(crate) fn from_parts(ty: TypeRef, payload: Payload) -> Self {
        Self {
            ty: Some(ty),
            payload,
        }
    }

    /// Build a value of type `ty`, validating the payload.
    pub fn new(ty: &TypeRef, payload: Payload) -> Result<Self> {
        ty.check_payload(&payload)?;
        Ok(Self::from_parts(ty.clone(), payload))
    }

    /// Missing value of `ty`.
    pub fn missing(ty: &TypeRef) -> Self {
        ty.missing_value()
    }

    pub fn boolean(value: bool) -> Self {
        Self::from_parts(builtin::boolean_type(), Payload::Boolean(value))
    }

    pub fn integer(value: i64) -> Self {
        Self::from_parts(builtin::integer_type(), Payload::Integer(value))
    }

    pub fn double(value: f64) -> Self {
        Self::from_parts(builtin::double_type(), Payload::Double(value))
    }

    pub fn string(value: impl Into<String>) -> Self {
        Self::from_parts(builtin::string_type(), Payload::String(value.into()))
    }

    /// Reference to `object`, typed by its class.
    pub fn object(object: ObjectRef) -> Self {
        let class = object.class().clone();
        Self::from_parts(class, Payload::Object(Some(object)))
    }

    /// Enumeration value by element name (short names and case-insensitive
    /// matches accepted).
    pub fn enumeration(ty: &TypeRef, name: &str) -> Result<Self> {
        let index = ty.enumeration_index_of(name)?;
        Ok(Self::from_parts(ty.clone(), Payload::Integer(index as i64)))
    }

    /// Enumeration value by index.
    pub fn enumeration_index(ty: &TypeRef, index: usize) -> Result<Self> {
        let elements = ty.enumeration_descriptor().ok_or_else(|| Error::TypeMismatch {
            expected: "enumeration".to_string(),
            got: ty.name().to_string(),
        })?;
        elements.element(index)?;
        Ok(Self::from_parts(ty.clone(), Payload::Integer(index as i64)))
    }

    /// Parse text as a value of `ty`.
    pub fn parse(ty: &TypeRef, text: &str) -> Result<Self> {
        ty.create_from_string(text)
    }

    // ------------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------------

    /// Runtime type (`None` for nil).
    pub fn type_ref(&self) -> Option<&TypeRef> {
        self.ty.as_ref()
    }

    /// Runtime type name (`"Nil"` for nil).
    pub fn type_name(&self) -> &str {
        self.ty.as_ref().map_or("Nil", |t| t.name())
    }

    pub fn payload(&self) -> &Payload {
        &self.payload
    }

    pub fn into_payload(self) -> Payload {
        self.payload
    }

    /// Check if this is the untyped nil variable.
    pub fn is_nil(&self) -> bool {
        self.ty.is_none()
    }

    /// True for nil and for any type's missing encoding.
    pub fn is_missing(&self) -> bool {
        self.ty
            .as_ref()
            .map_or(true, |t| t.is_missing_payload(&self.payload))
    }

    /// True iff the runtime type is `ty` or one of its subtypes.
    pub fn is_instance_of(&self, ty: &TypeRef) -> bool {
        self.ty.as_ref().is_some_and(|t| t.is_subtype_of(ty))
    }

    /// Try to get as bool (`None` when missing or not a boolean).
    pub fn as_bool(&self) -> Option<bool> {
        match self.payload {
            Payload::Boolean(v) => Some(v),
            _ => None,
        }
    }

    /// Try to get as integer (enumerations yield their index).
    pub fn as_integer(&self) -> Option<i64> {
        match self.payload {
            Payload::Integer(v) if !self.is_missing() => Some(v),
            _ => None,
        }
    }

    /// Try to get as double.
    pub fn as_double(&self) -> Option<f64> {
        match self.payload {
            Payload::Double(v) if !self.is_missing() => Some(v),
            _ => None,
        }
    }

    /// Try to get as string slice.
    pub fn as_str(&self) -> Option<&str> {
        match &self.payload {
            Payload::String(s) if !self.is_missing() => Some(s),
            _ => None,
        }
    }

    /// Try to get the referenced object.
    pub fn as_object(&self) -> Option<&ObjectRef> {
        match &self.payload {
            Payload::Object(Some(object)) => Some(object),
            _ => None,
        }
    }

    /// Element index of an enumeration value.
    pub fn enumeration_index_value(&self) -> Option<usize> {
        let ty = self.ty.as_ref()?;
        if !ty.is_enumeration() || self.is_missing() {
            return None;
        }
        self.as_integer().and_then(|i| usize::try_from(i).ok())
    }

    /// Element name of an enumeration value.
    pub fn enumeration_name(&self) -> Option<&str> {
        let index = self.enumeration_index_value()?;
        self.ty
            .as_ref()?
            .enumeration_descriptor()?
            .element_name(index)
            .ok()
    }

    /// Convert to a Rust value.
    pub fn get<T: FromVariable>(&self) -> Result<T> {
        T::from_variable(self)
    }

    fn describe_kind(&self) -> String {
        if self.is_missing() {
            format!("missing {}", self.type_name())
        } else {
            self.type_name().to_string()
        }
    }

    // ------------------------------------------------------------------------
    // Ordering
    // ------------------------------------------------------------------------

    /// Total order over values.
    ///
    /// Nil sorts first. Values of related types use the comparator of the
    /// more derived type, where missing sorts before present. Values of
    /// unrelated types are ordered by type name.
    pub fn compare(&self, other: &Variable) -> Ordering {
        match (&self.ty, &other.ty) {
            (None, None) => Ordering::Equal,
            (None, Some(_)) => Ordering::Less,
            (Some(_), None) => Ordering::Greater,
            (Some(a), Some(b)) => match more_specific(a, b) {
                Some(t) => t.compare_payloads(&self.payload, &other.payload),
                None => a.name().cmp(b.name()),
            },
        }
    }
}

impl PartialEq for Variable {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Variable {}

impl PartialOrd for Variable {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Variable {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl fmt::Debug for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Variable")
            .field("type", &self.type_name())
            .field("payload", &self.payload)
            .finish()
    }
}

impl fmt::Display for Variable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.ty {
            None => f.write_str("nil"),
            Some(_) if self.is_missing() => f.write_str("missing"),
            Some(ty) => match &self.payload {
                Payload::Object(Some(object)) => f.write_str(&object.describe()),
                payload => f.write_str(&ty.format_payload(payload)),
            },
        }
    }
}

// ============================================================================
// Conversions
// ============================================================================

/// Trait for converting from a [`Variable`].
pub trait FromVariable: Sized {
    fn from_variable(value: &Variable) -> Result<Self>;
}

macro_rules! impl_from_variable {
    ($ty:ty, $accessor:ident, $name:expr) => {
        impl FromVariable for $ty {
            fn from_variable(value: &Variable) -> Result<Self> {
                value.$accessor().ok_or_else(|| Error::TypeMismatch {
                    expected: $name.to_string(),
                    got: value.describe_kind(),
                })
            }
        }
    };
}

impl_from_variable!(bool, as_bool, "bool");
impl_from_variable!(i64, as_integer, "i64");
impl_from_variable!(f64, as_double, "f64");

impl FromVariable for String {
    fn from_variable(value: &Variable) -> Result<Self> {
        if let Some(name) = value.enumeration_name() {
            return Ok(name.to_string());
        }
        value
            .as_str()
            .map(str::to_string)
            .ok_or_else(|| Error::TypeMismatch {
                expected: "String".to_string(),
                got: value.describe_kind(),
            })
    }
}

impl FromVariable for ObjectRef {
    fn from_variable(value: &Variable) -> Result<Self> {
        value.as_object().cloned().ok_or_else(|| Error::TypeMismatch {
            expected: "object".to_string(),
            got: value.describe_kind(),
        })
    }
}

impl FromVariable for Variable {
    fn from_variable(value: &Variable) -> Result<Self> {
        Ok(value.clone())
    }
}

impl From<bool> for Variable {
    fn from(v: bool) -> Self {
        Self::boolean(v)
    }
}

impl From<i64> for Variable {
    fn from(v: i64) -> Self {
        Self::integer(v)
    }
}

impl From<i32> for Variable {
    fn from(v: i32) -> Self {
        Self::integer(i64::from(v))
    }
}

impl From<f64> for Variable {
    fn from(v: f64) -> Self {
        Self::double(v)
    }
}

impl From<String> for Variable {
    fn from(v: String) -> Self {
        Self::string(v)
    }
}

impl From<&str> for Variable {
    fn from(v: &str) -> Self {
        Self::string(v)
    }
}

impl From<ObjectRef> for Variable {
    fn from(v: ObjectRef) -> Self {
        Self::object(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EnumerationBuilder;

    fn color() -> TypeRef {
        EnumerationBuilder::new("Color")
            .element("Red")
            .element("Green")
            .element("Blue")
            .build()
            .expect("enumeration")
    }

    #[test]
    fn test_nil_is_missing() {
        let nil = Variable::nil();
        assert!(nil.is_nil());
        assert!(nil.is_missing());
        assert_eq!(nil.to_string(), "nil");
        assert_eq!(nil, Variable::default());
    }

    #[test]
    fn test_primitive_values() {
        assert_eq!(Variable::from(true).as_bool(), Some(true));
        assert_eq!(Variable::from(42i32).as_integer(), Some(42));
        assert_eq!(Variable::from(2.5).as_double(), Some(2.5));
        assert_eq!(Variable::from("hi").as_str(), Some("hi"));
        assert_eq!(Variable::from(2.5).get::<f64>().expect("f64"), 2.5);
        assert!(matches!(
            Variable::from(2.5).get::<i64>(),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_missing_accessors_are_none() {
        let missing = Variable::missing(&builtin::integer_type());
        assert!(missing.is_missing());
        assert_eq!(missing.as_integer(), None);
        assert_eq!(missing.to_string(), "missing");

        let missing = Variable::missing(&builtin::boolean_type());
        assert!(missing.is_missing());
        assert_eq!(missing.as_bool(), None);
    }

    #[test]
    fn test_enumeration_values() {
        let color = color();
        let green = Variable::enumeration(&color, "green").expect("green");
        assert_eq!(green.enumeration_index_value(), Some(1));
        assert_eq!(green.enumeration_name(), Some("Green"));
        assert_eq!(green.to_string(), "Green");
        assert_eq!(green.get::<String>().expect("name"), "Green");

        assert!(matches!(
            Variable::enumeration(&color, "Purple"),
            Err(Error::UnknownEnumerationValue { .. })
        ));
        assert!(matches!(
            Variable::enumeration_index(&color, 3),
            Err(Error::IndexOutOfRange { index: 3, length: 3 })
        ));

        let missing = Variable::missing(&color);
        assert_eq!(missing.payload(), &Payload::Integer(3));
        assert!(missing.is_missing());
    }

    #[test]
    fn test_new_validates_payload() {
        let probability = builtin::probability_type();
        assert!(Variable::new(&probability, Payload::Double(0.3)).is_ok());
        assert!(matches!(
            Variable::new(&probability, Payload::Double(1.3)),
            Err(Error::InvalidValue { .. })
        ));
        assert!(matches!(
            Variable::new(&probability, Payload::String("x".into())),
            Err(Error::TypeMismatch { .. })
        ));
    }

    #[test]
    fn test_ordering() {
        let missing = Variable::missing(&builtin::double_type());
        let one = Variable::double(1.0);
        let two = Variable::double(2.0);
        assert!(missing < one);
        assert!(one < two);
        assert!(Variable::nil() < missing);

        // Related types use the more derived comparator.
        let p = Variable::parse(&builtin::probability_type(), "0.5").expect("parse");
        assert!(p < one);
        assert_eq!(p, Variable::double(0.5));

        // Unrelated types order by type name.
        assert!(Variable::double(100.0) < Variable::integer(1));
    }

    #[test]
    fn test_is_instance_of() {
        let p = Variable::parse(&builtin::probability_type(), "0.5").expect("parse");
        assert!(p.is_instance_of(&builtin::double_type()));
        assert!(!p.is_instance_of(&builtin::integer_type()));
        assert!(!Variable::nil().is_instance_of(&builtin::top_type()));
    }
}
