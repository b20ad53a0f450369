// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Built-in types shared by every registry.
//!
//! ```text
//! Variable
//! ├── Boolean
//! ├── Integer
//! │   ├── PositiveInteger
//! │   └── EnumValue        (base of every enumeration)
//! ├── Double
//! │   ├── PositiveDouble
//! │   └── Probability
//! ├── String
//! │   └── File
//! └── Object               (base of every class)
//! ```

use super::descriptor::{ClassComparator, ClassLayout, TypeDescriptor, TypeRef};
use super::leaf::{LeafKind, ValueConstraint};
use std::sync::{Arc, OnceLock};

// ============================================================================
// Names
// ============================================================================

pub const TOP_TYPE_NAME: &str = "Variable";
pub const BOOLEAN_TYPE_NAME: &str = "Boolean";
pub const INTEGER_TYPE_NAME: &str = "Integer";
pub const POSITIVE_INTEGER_TYPE_NAME: &str = "PositiveInteger";
pub const ENUM_VALUE_TYPE_NAME: &str = "EnumValue";
pub const DOUBLE_TYPE_NAME: &str = "Double";
pub const POSITIVE_DOUBLE_TYPE_NAME: &str = "PositiveDouble";
pub const PROBABILITY_TYPE_NAME: &str = "Probability";
pub const STRING_TYPE_NAME: &str = "String";
pub const FILE_TYPE_NAME: &str = "File";
pub const OBJECT_CLASS_NAME: &str = "Object";

struct Builtins {
    top: TypeRef,
    boolean: TypeRef,
    integer: TypeRef,
    positive_integer: TypeRef,
    enum_value: TypeRef,
    double: TypeRef,
    positive_double: TypeRef,
    probability: TypeRef,
    string: TypeRef,
    file: TypeRef,
    object: TypeRef,
}

static BUILTINS: OnceLock<Builtins> = OnceLock::new();

fn builtins() -> &'static Builtins {
    BUILTINS.get_or_init(|| {
        let top = Arc::new(TypeDescriptor::top(TOP_TYPE_NAME));
        let leaf = |name: &str, base: &TypeRef, kind, constraint, is_abstract| {
            Arc::new(TypeDescriptor::leaf(
                name,
                base.clone(),
                kind,
                constraint,
                is_abstract,
            ))
        };

        let boolean = leaf(BOOLEAN_TYPE_NAME, &top, LeafKind::Boolean, None, false);
        let integer = leaf(INTEGER_TYPE_NAME, &top, LeafKind::Integer, None, false);
        let positive_integer = leaf(
            POSITIVE_INTEGER_TYPE_NAME,
            &integer,
            LeafKind::Integer,
            Some(ValueConstraint::non_negative()),
            false,
        );
        let enum_value = leaf(ENUM_VALUE_TYPE_NAME, &integer, LeafKind::Integer, None, true);
        let double = leaf(DOUBLE_TYPE_NAME, &top, LeafKind::Double, None, false);
        let positive_double = leaf(
            POSITIVE_DOUBLE_TYPE_NAME,
            &double,
            LeafKind::Double,
            Some(ValueConstraint::non_negative()),
            false,
        );
        let probability = leaf(
            PROBABILITY_TYPE_NAME,
            &double,
            LeafKind::Double,
            Some(ValueConstraint::unit_interval()),
            false,
        );
        let string = leaf(STRING_TYPE_NAME, &top, LeafKind::String, None, false);
        let file = leaf(FILE_TYPE_NAME, &string, LeafKind::String, None, false);
        let object = Arc::new(TypeDescriptor::class(
            OBJECT_CLASS_NAME,
            top.clone(),
            ClassLayout::new(Vec::new(), ClassComparator::Structural),
            true,
        ));

        log::debug!("[registry] built-in types initialized");
        Builtins {
            top,
            boolean,
            integer,
            positive_integer,
            enum_value,
            double,
            positive_double,
            probability,
            string,
            file,
            object,
        }
    })
}

/// Root of the hierarchy (`Variable`).
pub fn top_type() -> TypeRef {
    builtins().top.clone()
}

pub fn boolean_type() -> TypeRef {
    builtins().boolean.clone()
}

pub fn integer_type() -> TypeRef {
    builtins().integer.clone()
}

/// Integers `>= 0`.
pub fn positive_integer_type() -> TypeRef {
    builtins().positive_integer.clone()
}

/// Abstract base of every enumeration.
pub fn enum_value_type() -> TypeRef {
    builtins().enum_value.clone()
}

pub fn double_type() -> TypeRef {
    builtins().double.clone()
}

/// Doubles `>= 0`.
pub fn positive_double_type() -> TypeRef {
    builtins().positive_double.clone()
}

/// Doubles in `[0, 1]`.
pub fn probability_type() -> TypeRef {
    builtins().probability.clone()
}

pub fn string_type() -> TypeRef {
    builtins().string.clone()
}

/// Path-valued string.
pub fn file_type() -> TypeRef {
    builtins().file.clone()
}

/// Abstract base of every class.
pub fn object_class() -> TypeRef {
    builtins().object.clone()
}

/// Every built-in type, bases before derived types.
pub fn builtin_types() -> Vec<TypeRef> {
    let b = builtins();
    vec![
        b.top.clone(),
        b.boolean.clone(),
        b.integer.clone(),
        b.positive_integer.clone(),
        b.enum_value.clone(),
        b.double.clone(),
        b.positive_double.clone(),
        b.probability.clone(),
        b.string.clone(),
        b.file.clone(),
        b.object.clone(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtins_are_shared() {
        assert!(Arc::ptr_eq(&double_type(), &double_type()));
        assert_eq!(builtin_types().len(), 11);
    }

    #[test]
    fn test_bases_precede_derived() {
        let types = builtin_types();
        for (i, t) in types.iter().enumerate() {
            if let Some(base) = t.base() {
                let base_pos = types
                    .iter()
                    .position(|x| x.name() == base.name())
                    .expect("base is built-in");
                assert!(base_pos < i, "{} listed before its base", t.name());
            }
        }
    }

    #[test]
    fn test_abstract_flags() {
        assert!(top_type().is_abstract());
        assert!(enum_value_type().is_abstract());
        assert!(object_class().is_abstract());
        assert!(!file_type().is_abstract());
    }
}
