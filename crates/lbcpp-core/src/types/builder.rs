// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Fluent builders for class and enumeration types.

use super::builtin;
use super::descriptor::{
    lock_layouts, validate_type_name, ClassComparator, ClassLayout, MemberVariableSignature,
    TypeDescriptor, TypeRef,
};
use super::enumeration::{EnumerationDescriptor, EnumerationElement};
use crate::error::{Error, Result};
use std::sync::Arc;

/// Builder for class types with a fixed initial member list.
///
/// The built class can still grow through
/// [`DynamicClass`](super::DynamicClass) until its first instance exists.
///
/// ```rust
/// use lbcpp_core::types::{builtin, ClassBuilder};
///
/// let point = ClassBuilder::new("Point")
///     .double_member("x")
///     .double_member("y")
///     .build()
///     .unwrap();
/// assert_eq!(point.total_member_variable_count(), 2);
/// assert!(point.is_subtype_of(&builtin::object_class()));
/// ```
#[derive(Debug)]
pub struct ClassBuilder {
    name: String,
    base: TypeRef,
    members: Vec<MemberVariableSignature>,
    comparator: ClassComparator,
    is_abstract: bool,
}

impl ClassBuilder {
    /// Create a new builder for a class deriving from `Object`.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: builtin::object_class(),
            members: Vec::new(),
            comparator: ClassComparator::default(),
            is_abstract: false,
        }
    }

    /// Set the base class.
    pub fn base(mut self, base: TypeRef) -> Self {
        self.base = base;
        self
    }

    /// Add a member with a type descriptor.
    pub fn member(mut self, name: impl Into<String>, declared_type: TypeRef) -> Self {
        self.members
            .push(MemberVariableSignature::new(name, declared_type));
        self
    }

    /// Add a fully specified member.
    pub fn member_signature(mut self, signature: MemberVariableSignature) -> Self {
        self.members.push(signature);
        self
    }

    pub fn boolean_member(self, name: impl Into<String>) -> Self {
        self.member(name, builtin::boolean_type())
    }

    pub fn integer_member(self, name: impl Into<String>) -> Self {
        self.member(name, builtin::integer_type())
    }

    pub fn double_member(self, name: impl Into<String>) -> Self {
        self.member(name, builtin::double_type())
    }

    pub fn string_member(self, name: impl Into<String>) -> Self {
        self.member(name, builtin::string_type())
    }

    /// Order instances with `comparator` instead of member-by-member.
    pub fn comparator(mut self, comparator: ClassComparator) -> Self {
        self.comparator = comparator;
        self
    }

    /// Forbid generic instantiation.
    pub fn abstract_class(mut self) -> Self {
        self.is_abstract = true;
        self
    }

    /// Build the class type.
    pub fn build(self) -> Result<TypeRef> {
        validate_type_name(&self.name)?;
        let _layouts = lock_layouts();
        if !self.base.is_class() {
            return Err(Error::TypeMismatch {
                expected: "class".to_string(),
                got: self.base.name().to_string(),
            });
        }
        for (i, member) in self.members.iter().enumerate() {
            let clash = self.members[..i].iter().any(|m| m.name == member.name)
                || self.base.find_member_variable_index(&member.name).is_some();
            if clash {
                return Err(Error::DuplicateMember {
                    owner: self.name.clone(),
                    name: member.name.clone(),
                });
            }
        }
        let base = self.base.clone();
        let class = Arc::new(TypeDescriptor::class(
            self.name,
            self.base,
            ClassLayout::new(self.members, self.comparator),
            self.is_abstract,
        ));
        base.add_derived(&class);
        Ok(class)
    }
}

/// Builder for enumeration types.
///
/// ```rust
/// use lbcpp_core::types::EnumerationBuilder;
///
/// let color = EnumerationBuilder::new("Color")
///     .element("Red")
///     .element("Green")
///     .element("Blue")
///     .build()
///     .unwrap();
/// let green = color.create_from_string("green").unwrap();
/// assert_eq!(green.to_string(), "Green");
/// ```
#[derive(Debug)]
pub struct EnumerationBuilder {
    name: String,
    elements: Vec<EnumerationElement>,
    one_letter_codes: Option<String>,
}

impl EnumerationBuilder {
    /// Create a new enumeration builder.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            elements: Vec::new(),
            one_letter_codes: None,
        }
    }

    /// Append an element.
    pub fn element(mut self, name: impl Into<String>) -> Self {
        self.elements.push(EnumerationElement::new(name));
        self
    }

    /// Append an element with an abbreviation.
    pub fn element_with_short_name(
        mut self,
        name: impl Into<String>,
        short_name: impl Into<String>,
    ) -> Self {
        self.elements
            .push(EnumerationElement::new(name).with_short_name(short_name));
        self
    }

    /// One character per element, in element order.
    pub fn one_letter_codes(mut self, codes: impl Into<String>) -> Self {
        self.one_letter_codes = Some(codes.into());
        self
    }

    /// Build the enumeration type (base `EnumValue`).
    pub fn build(self) -> Result<TypeRef> {
        validate_type_name(&self.name)?;
        let mut elements = EnumerationDescriptor::new(&self.name, self.elements)?;
        if let Some(codes) = &self.one_letter_codes {
            elements.set_one_letter_codes(&self.name, codes)?;
        }
        Ok(Arc::new(TypeDescriptor::enumeration(
            self.name,
            builtin::enum_value_type(),
            elements,
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_class_builder_inheritance() {
        let base = ClassBuilder::new("Shape")
            .string_member("label")
            .abstract_class()
            .build()
            .expect("base");
        let circle = ClassBuilder::new("Circle")
            .base(base.clone())
            .double_member("radius")
            .build()
            .expect("derived");

        assert_eq!(circle.total_member_variable_count(), 2);
        assert_eq!(circle.find_member_variable_index("label"), Some(0));
        assert_eq!(circle.find_member_variable_index("radius"), Some(1));
        assert!(circle.is_subtype_of(&base));
        assert!(base.create_instance().is_err());
    }

    #[test]
    fn test_class_builder_rejects_shadowing() {
        let base = ClassBuilder::new("Base")
            .integer_member("id")
            .build()
            .expect("base");
        let result = ClassBuilder::new("Derived")
            .base(base)
            .integer_member("id")
            .build();
        assert!(matches!(result, Err(Error::DuplicateMember { .. })));
    }

    #[test]
    fn test_class_builder_requires_class_base() {
        let result = ClassBuilder::new("Bad")
            .base(builtin::double_type())
            .build();
        assert!(matches!(result, Err(Error::TypeMismatch { .. })));
    }

    #[test]
    fn test_enumeration_builder() {
        let nucleotide = EnumerationBuilder::new("Nucleotide")
            .element_with_short_name("Adenine", "A")
            .element_with_short_name("Cytosine", "C")
            .element_with_short_name("Guanine", "G")
            .element_with_short_name("Thymine", "T")
            .one_letter_codes("ACGT")
            .build()
            .expect("enumeration");

        assert!(nucleotide.is_subtype_of(&builtin::enum_value_type()));
        let e = nucleotide.enumeration_descriptor().expect("enumeration");
        assert_eq!(e.num_elements(), 4);
        assert_eq!(e.index_of_one_letter_code('G'), Some(2));
        assert_eq!(e.index_of_name("t"), Some(3));
    }

    #[test]
    fn test_enumeration_builder_rejects_bad_codes() {
        let result = EnumerationBuilder::new("Bits")
            .element("Zero")
            .element("One")
            .one_letter_codes("0")
            .build();
        assert!(matches!(result, Err(Error::InvalidValue { .. })));
    }
}
