// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Classes whose member list is declared at runtime.

use super::builder::ClassBuilder;
use super::descriptor::{MemberVariableSignature, TypeRef};
use crate::error::Result;

/// Handle on a class that accepts new member variables until its first
/// instance is created.
///
/// The layout is append-only: members keep their index once declared, and
/// indices of a subclass start after those of its base.
///
/// ```rust
/// use lbcpp_core::types::{builtin, DynamicClass};
///
/// let point = DynamicClass::new("Point").unwrap();
/// assert_eq!(point.add_member_variable("x", builtin::double_type()).unwrap(), 0);
/// assert_eq!(point.add_member_variable("y", builtin::double_type()).unwrap(), 1);
///
/// let p = point.type_ref().create_instance().unwrap();
/// assert!(point.add_member_variable("z", builtin::double_type()).is_err());
/// # drop(p);
/// ```
#[derive(Debug, Clone)]
pub struct DynamicClass {
    class: TypeRef,
}

impl DynamicClass {
    /// Declare an empty class deriving from `Object`.
    pub fn new(name: impl Into<String>) -> Result<Self> {
        Self::from_builder(ClassBuilder::new(name))
    }

    /// Declare an empty class deriving from `base`.
    pub fn with_base(name: impl Into<String>, base: TypeRef) -> Result<Self> {
        Self::from_builder(ClassBuilder::new(name).base(base))
    }

    /// Wrap a class built with [`ClassBuilder`].
    pub fn from_builder(builder: ClassBuilder) -> Result<Self> {
        let class = builder.build()?;
        log::debug!("[class] declared '{}'", class.name());
        Ok(Self { class })
    }

    /// Class type being declared.
    pub fn type_ref(&self) -> &TypeRef {
        &self.class
    }

    /// Consume the handle, keeping the class type.
    pub fn into_type_ref(self) -> TypeRef {
        self.class
    }

    /// Class name.
    pub fn name(&self) -> &str {
        self.class.name()
    }

    /// True once instances exist; further additions fail.
    pub fn is_frozen(&self) -> bool {
        self.class.is_frozen()
    }

    /// Append a member; returns its index in the full layout.
    ///
    /// Fails with `DuplicateMember` when the name is already used by this
    /// class or an ancestor, and with `ClassFrozen` once instances exist.
    pub fn add_member_variable(&self, name: impl Into<String>, declared_type: TypeRef) -> Result<usize> {
        self.add_member_signature(MemberVariableSignature::new(name, declared_type))
    }

    /// Append a member with an abbreviation.
    pub fn add_member_variable_with_short_name(
        &self,
        name: impl Into<String>,
        short_name: impl Into<String>,
        declared_type: TypeRef,
    ) -> Result<usize> {
        self.add_member_signature(
            MemberVariableSignature::new(name, declared_type).with_short_name(short_name),
        )
    }

    /// Append a fully specified member.
    pub fn add_member_signature(&self, signature: MemberVariableSignature) -> Result<usize> {
        self.class.add_member_variable(signature)
    }

    /// Copy every member of `source` (inherited ones included), each name
    /// prefixed with `prefix`.
    ///
    /// Stops at the first failing member; members added before it stay.
    pub fn add_member_variables_from(&self, prefix: &str, source: &TypeRef) -> Result<()> {
        for member in source.member_variables() {
            let mut signature = MemberVariableSignature::new(
                format!("{}{}", prefix, member.name),
                member.declared_type,
            );
            signature.short_name = member.short_name.map(|s| format!("{}{}", prefix, s));
            signature.description = member.description;
            self.add_member_signature(signature)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::types::builtin;

    #[test]
    fn test_indices_follow_base_layout() {
        let base = DynamicClass::new("Animal").expect("declare");
        base.add_member_variable("name", builtin::string_type())
            .expect("add");
        let derived = DynamicClass::with_base("Dog", base.type_ref().clone()).expect("declare");
        let idx = derived
            .add_member_variable("good", builtin::boolean_type())
            .expect("add");
        assert_eq!(idx, 1);
        assert_eq!(derived.type_ref().total_member_variable_count(), 2);
    }

    #[test]
    fn test_duplicate_member_rejected() {
        let c = DynamicClass::new("Dup").expect("declare");
        c.add_member_variable("a", builtin::integer_type())
            .expect("add");
        assert!(matches!(
            c.add_member_variable("a", builtin::double_type()),
            Err(Error::DuplicateMember { .. })
        ));
    }

    #[test]
    fn test_base_member_clashing_with_subclass_rejected() {
        let base = DynamicClass::new("Shape3").expect("declare");
        let solid = DynamicClass::with_base("Solid", base.type_ref().clone()).expect("declare");
        let cube = DynamicClass::with_base("Cube", solid.type_ref().clone()).expect("declare");
        cube.add_member_variable("z", builtin::double_type())
            .expect("add");

        assert!(matches!(
            base.add_member_variable("z", builtin::double_type()),
            Err(Error::DuplicateMember { owner, name }) if owner == "Cube" && name == "z"
        ));
        assert_eq!(base.type_ref().own_member_variable_count(), 0);
        assert_eq!(cube.type_ref().member_variable_index("z").expect("z"), 0);

        // Names no subclass uses are still accepted.
        assert_eq!(
            base.add_member_variable("depth", builtin::double_type())
                .expect("add"),
            0
        );
        let names: Vec<String> = cube
            .type_ref()
            .member_variables()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["depth", "z"]);
    }

    #[test]
    fn test_dropped_subclass_no_longer_blocks_base() {
        let base = DynamicClass::new("Shape4").expect("declare");
        {
            let temp = DynamicClass::with_base("Temp", base.type_ref().clone()).expect("declare");
            temp.add_member_variable("w", builtin::double_type())
                .expect("add");
        }
        base.add_member_variable("w", builtin::double_type())
            .expect("subclass gone");
    }

    #[test]
    fn test_subclass_instance_freezes_base() {
        let base = DynamicClass::new("Vehicle").expect("declare");
        let car = DynamicClass::with_base("Car", base.type_ref().clone()).expect("declare");
        let _instance = car.type_ref().create_instance().expect("instance");

        assert!(car.is_frozen());
        assert!(base.is_frozen());
        assert!(matches!(
            base.add_member_variable("wheels", builtin::integer_type()),
            Err(Error::ClassFrozen(_))
        ));
    }

    #[test]
    fn test_add_member_variables_from() {
        let point = DynamicClass::new("Point2").expect("declare");
        point
            .add_member_variable("x", builtin::double_type())
            .expect("add");
        point
            .add_member_variable("y", builtin::double_type())
            .expect("add");

        let segment = DynamicClass::new("Segment").expect("declare");
        segment
            .add_member_variables_from("start.", point.type_ref())
            .expect("copy");
        segment
            .add_member_variables_from("end.", point.type_ref())
            .expect("copy");

        let names: Vec<String> = segment
            .type_ref()
            .member_variables()
            .into_iter()
            .map(|m| m.name)
            .collect();
        assert_eq!(names, ["start.x", "start.y", "end.x", "end.y"]);
    }
}
