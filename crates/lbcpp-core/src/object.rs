// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Generic class instances.
//!
//! An [`Object`] stores one [`Variable`] per member of its class layout.
//! Slots are allocated lazily: a fresh object owns no storage, and reading or
//! writing member `i` fills every slot up to `i` with its declared type's
//! missing value.

use crate::error::{Error, Result};
use crate::types::{more_specific, MemberVariableSignature, TypeRef};
use crate::value::{FromVariable, Payload, Variable};
use parking_lot::RwLock;
use std::cell::RefCell;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Shared handle to an object.
pub type ObjectRef = Arc<Object>;

/// Instance of a class type.
///
/// ```rust
/// use lbcpp_core::types::ClassBuilder;
///
/// let point = ClassBuilder::new("Point")
///     .double_member("x")
///     .double_member("y")
///     .build()
///     .unwrap();
/// let p = point.create_instance().unwrap();
/// p.set_by_name("x", 3.5).unwrap();
///
/// assert_eq!(p.get_as::<f64>("x").unwrap(), 3.5);
/// assert!(p.get_by_name("y").unwrap().is_missing());
/// assert_eq!(p.to_string(), "Point{x = 3.5, y = missing}");
/// ```
pub struct Object {
    class: TypeRef,
    slots: RwLock<Vec<Variable>>,
}

impl Object {
    pub(crate) fn allocate(class: TypeRef) -> ObjectRef {
        Arc::new(Self {
            class,
            slots: RwLock::new(Vec::new()),
        })
    }

    /// Instance class.
    pub fn class(&self) -> &TypeRef {
        &self.class
    }

    /// Instance class name.
    pub fn class_name(&self) -> &str {
        self.class.name()
    }

    /// Number of member variables (inherited ones included).
    pub fn num_member_variables(&self) -> usize {
        self.class.total_member_variable_count()
    }

    /// Number of slots holding storage so far.
    pub fn allocated_slot_count(&self) -> usize {
        self.slots.read().len()
    }

    /// Name of member `index`.
    pub fn member_name(&self, index: usize) -> Result<String> {
        self.class.member_variable(index).map(|m| m.name)
    }

    fn backfill(slots: &mut Vec<Variable>, layout: &[MemberVariableSignature], len: usize) {
        while slots.len() < len {
            match layout.get(slots.len()) {
                Some(member) => slots.push(member.declared_type.missing_value()),
                None => break,
            }
        }
    }

    // ========================================================================
    // Member access
    // ========================================================================

    /// Value of member `index`.
    pub fn get(&self, index: usize) -> Result<Variable> {
        if let Some(value) = self.slots.read().get(index) {
            return Ok(value.clone());
        }
        let layout = self.class.member_variables();
        let out_of_range = Error::IndexOutOfRange {
            index,
            length: layout.len(),
        };
        if index >= layout.len() {
            return Err(out_of_range);
        }
        let mut slots = self.slots.write();
        Self::backfill(&mut slots, &layout, index + 1);
        slots.get(index).cloned().ok_or(out_of_range)
    }

    /// Value of a member by name.
    pub fn get_by_name(&self, name: &str) -> Result<Variable> {
        self.get(self.class.member_variable_index(name)?)
    }

    /// Value of a member by name, converted to a Rust type.
    pub fn get_as<T: FromVariable>(&self, name: &str) -> Result<T> {
        self.get_by_name(name)?.get()
    }

    /// Store `value` in member `index`.
    ///
    /// The value's type must be the declared type or a subtype, missing
    /// values included. Nil and compatible missing values are stored as the
    /// declared type's missing value.
    pub fn set(&self, index: usize, value: impl Into<Variable>) -> Result<()> {
        let value = value.into();
        let layout = self.class.member_variables();
        let member = layout.get(index).ok_or(Error::IndexOutOfRange {
            index,
            length: layout.len(),
        })?;

        let stored = if value.is_nil() {
            member.declared_type.missing_value()
        } else if value.is_instance_of(&member.declared_type) {
            if value.is_missing() {
                member.declared_type.missing_value()
            } else {
                value
            }
        } else {
            return Err(Error::TypeMismatch {
                expected: member.declared_type.name().to_string(),
                got: value.type_name().to_string(),
            });
        };

        let mut slots = self.slots.write();
        Self::backfill(&mut slots, &layout, index + 1);
        if let Some(slot) = slots.get_mut(index) {
            *slot = stored;
        }
        Ok(())
    }

    /// Store a value in a member by name.
    pub fn set_by_name(&self, name: &str, value: impl Into<Variable>) -> Result<()> {
        self.set(self.class.member_variable_index(name)?, value)
    }

    /// Store a raw payload, typed with the member's declared type.
    pub fn assign(&self, index: usize, payload: Payload) -> Result<()> {
        let member = self.class.member_variable(index)?;
        self.set(index, Variable::new(&member.declared_type, payload)?)
    }

    /// Parse `text` with the member's declared type and store the result.
    pub fn set_from_string(&self, name: &str, text: &str) -> Result<()> {
        let index = self.class.member_variable_index(name)?;
        let member = self.class.member_variable(index)?;
        self.set(index, member.declared_type.create_from_string(text)?)
    }

    /// Every member value in layout order, without allocating slots.
    pub fn variables(&self) -> Vec<Variable> {
        let layout = self.class.member_variables();
        let slots = self.slots.read();
        layout
            .iter()
            .enumerate()
            .map(|(i, member)| {
                slots
                    .get(i)
                    .cloned()
                    .unwrap_or_else(|| member.declared_type.missing_value())
            })
            .collect()
    }

    // ========================================================================
    // Cloning
    // ========================================================================

    /// Shallow copy: same class, member values copied, referenced objects
    /// shared.
    pub fn clone_object(&self) -> ObjectRef {
        let copy = Self::allocate(self.class.clone());
        *copy.slots.write() = self.slots.read().clone();
        copy
    }

    /// Recursive copy of the whole reachable graph.
    ///
    /// Sharing and cycles inside the graph are preserved in the copy.
    pub fn deep_clone(&self) -> ObjectRef {
        let mut copies = HashMap::new();
        self.deep_clone_with(&mut copies)
    }

    fn deep_clone_with(&self, copies: &mut HashMap<*const Object, ObjectRef>) -> ObjectRef {
        let key = self as *const Object;
        if let Some(copy) = copies.get(&key) {
            return copy.clone();
        }
        let copy = Self::allocate(self.class.clone());
        copies.insert(key, copy.clone());

        let slots = self.slots.read().clone();
        let cloned: Vec<Variable> = slots
            .into_iter()
            .map(|value| {
                let replacement = match (value.type_ref(), value.as_object()) {
                    (Some(ty), Some(object)) => Some(Variable::from_parts(
                        ty.clone(),
                        Payload::Object(Some(object.deep_clone_with(copies))),
                    )),
                    _ => None,
                };
                replacement.unwrap_or(value)
            })
            .collect();
        *copy.slots.write() = cloned;
        copy
    }

    /// Copy into a fresh instance of `class`, matching members by name.
    ///
    /// Members absent from the source stay missing. Referenced objects whose
    /// class does not fit the target member are converted recursively.
    pub fn clone_to_new_type(&self, class: &TypeRef) -> Result<ObjectRef> {
        if class.name() == self.class.name() {
            return Ok(self.clone_object());
        }
        let target = class.create_instance()?;
        for (index, member) in class.member_variables().iter().enumerate() {
            let Some(source_index) = self.class.find_member_variable_index(&member.name) else {
                continue;
            };
            let value = self.get(source_index)?;
            if value.is_missing() {
                continue;
            }
            let value = match value.as_object() {
                Some(object)
                    if member.declared_type.is_class()
                        && !object.class().is_subtype_of(&member.declared_type) =>
                {
                    Variable::object(object.clone_to_new_type(&member.declared_type)?)
                }
                _ => value,
            };
            target.set(index, value)?;
        }
        log::debug!(
            "[object] converted {} instance to {}",
            self.class.name(),
            class.name()
        );
        Ok(target)
    }

    // ========================================================================
    // Comparison and display
    // ========================================================================

    /// Order using the comparator of the more derived class; unrelated
    /// classes are ordered by name.
    pub fn compare(&self, other: &Object) -> Ordering {
        if std::ptr::eq(self, other) {
            return Ordering::Equal;
        }
        match more_specific(&self.class, &other.class).and_then(|t| t.comparator()) {
            Some(comparator) => comparator.compare(self, other),
            None => self.class.name().cmp(other.class.name()),
        }
    }

    /// `Class{a = x, b = y}`; an object met again while being printed shows
    /// as `Class{...}`.
    pub(crate) fn describe(&self) -> String {
        let mut out = String::new();
        self.describe_into(&mut out, &mut Vec::new());
        out
    }

    fn describe_into(&self, out: &mut String, visiting: &mut Vec<*const Object>) {
        let key = self as *const Object;
        out.push_str(self.class.name());
        if visiting.contains(&key) {
            out.push_str("{...}");
            return;
        }
        visiting.push(key);
        out.push('{');
        let layout = self.class.member_variables();
        for (i, (member, value)) in layout.iter().zip(self.variables()).enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&member.name);
            out.push_str(" = ");
            match value.as_object() {
                Some(object) => object.describe_into(out, visiting),
                None => out.push_str(&value.to_string()),
            }
        }
        out.push('}');
        visiting.pop();
    }
}

thread_local! {
    // Object pairs currently being compared on this thread.
    static COMPARING: RefCell<Vec<(usize, usize)>> = const { RefCell::new(Vec::new()) };
}

/// Member-by-member order over the shared layout prefix; on a tie the less
/// derived instance sorts first.
///
/// A pair met again during its own comparison counts as equal, so cyclic
/// graphs terminate.
pub(crate) fn structural_compare(a: &Object, b: &Object) -> Ordering {
    if std::ptr::eq(a, b) {
        return Ordering::Equal;
    }
    if more_specific(&a.class, &b.class).is_none() {
        return a.class.name().cmp(b.class.name());
    }
    let pair = (a as *const Object as usize, b as *const Object as usize);
    let revisited = COMPARING.with(|active| {
        let mut active = active.borrow_mut();
        if active.contains(&pair) {
            true
        } else {
            active.push(pair);
            false
        }
    });
    if revisited {
        return Ordering::Equal;
    }

    let (left, right) = (a.variables(), b.variables());
    let order = left
        .iter()
        .zip(right.iter())
        .map(|(x, y)| x.compare(y))
        .find(|o| *o != Ordering::Equal)
        .unwrap_or_else(|| left.len().cmp(&right.len()));

    COMPARING.with(|active| {
        active.borrow_mut().retain(|p| *p != pair);
    });
    order
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl fmt::Debug for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Object")
            .field("class", &self.class.name())
            .field("allocated_slots", &self.allocated_slot_count())
            .finish()
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}
