// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors for runtime type information.
//!
//! A [`TypeDescriptor`] is a named node in a single-inheritance tree rooted at
//! the top type `Variable`. Its [`TypeKind`] decides how values of the type
//! are stored, parsed, written and compared.

use super::enumeration::EnumerationDescriptor;
use super::leaf::{LeafKind, ValueConstraint};
use crate::error::{Error, Result};
use crate::object::{structural_compare, Object, ObjectRef};
use crate::value::{Payload, Variable};
use crate::xml::is_xml_char;
use parking_lot::{Mutex, MutexGuard, RwLock};
use std::cmp::Ordering;
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering as AtomicOrdering};
use std::sync::{Arc, Weak};

/// Shared handle to a type descriptor.
pub type TypeRef = Arc<TypeDescriptor>;

/// Signature of a user-supplied object comparator.
pub type CompareFn = dyn Fn(&Object, &Object) -> Ordering + Send + Sync;

// ============================================================================
// Member Variables
// ============================================================================

/// Declared member variable of a class.
#[derive(Clone)]
pub struct MemberVariableSignature {
    /// Member name (unique across the class, its ancestors and its
    /// subclasses).
    pub name: String,
    /// Optional abbreviation.
    pub short_name: Option<String>,
    /// Declared type; stored values must be of this type or a subtype.
    pub declared_type: TypeRef,
    /// Free-form description.
    pub description: Option<String>,
}

impl MemberVariableSignature {
    /// Create a new member signature.
    pub fn new(name: impl Into<String>, declared_type: TypeRef) -> Self {
        Self {
            name: name.into(),
            short_name: None,
            declared_type,
            description: None,
        }
    }

    /// Set short name.
    pub fn with_short_name(mut self, short_name: impl Into<String>) -> Self {
        self.short_name = Some(short_name.into());
        self
    }

    /// Set description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

// Member types may refer back to the owning class, so only names are printed.
impl fmt::Debug for MemberVariableSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemberVariableSignature")
            .field("name", &self.name)
            .field("short_name", &self.short_name)
            .field("declared_type", &self.declared_type.name())
            .finish()
    }
}

// ============================================================================
// Class Comparators
// ============================================================================

/// Ordering used for instances of a class.
#[derive(Clone, Default)]
pub enum ClassComparator {
    /// Member-by-member over the shared layout prefix.
    #[default]
    Structural,
    /// Instance address; distinct instances never compare equal.
    Identity,
    /// User-supplied ordering.
    Custom(Arc<CompareFn>),
}

impl ClassComparator {
    /// Wrap a closure as a comparator.
    pub fn custom<F>(compare: F) -> Self
    where
        F: Fn(&Object, &Object) -> Ordering + Send + Sync + 'static,
    {
        Self::Custom(Arc::new(compare))
    }

    /// Order two instances.
    pub fn compare(&self, a: &Object, b: &Object) -> Ordering {
        if std::ptr::eq(a, b) {
            return Ordering::Equal;
        }
        match self {
            Self::Structural => structural_compare(a, b),
            Self::Identity => (a as *const Object as usize).cmp(&(b as *const Object as usize)),
            Self::Custom(compare) => compare(a, b),
        }
    }
}

impl fmt::Debug for ClassComparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structural => write!(f, "Structural"),
            Self::Identity => write!(f, "Identity"),
            Self::Custom(_) => write!(f, "Custom(..)"),
        }
    }
}

// ============================================================================
// Type Kinds
// ============================================================================

// Held while a class layout is checked and extended, so a base class and
// its subclasses never gain the same member name concurrently.
static LAYOUT_CHANGE: Mutex<()> = parking_lot::const_mutex(());

pub(crate) fn lock_layouts() -> MutexGuard<'static, ()> {
    LAYOUT_CHANGE.lock()
}

/// Own member list and layout state of a class type.
#[derive(Debug)]
pub struct ClassLayout {
    members: RwLock<Vec<MemberVariableSignature>>,
    derived: RwLock<Vec<Weak<TypeDescriptor>>>,
    frozen: AtomicBool,
    comparator: ClassComparator,
}

impl ClassLayout {
    pub(crate) fn new(members: Vec<MemberVariableSignature>, comparator: ClassComparator) -> Self {
        Self {
            members: RwLock::new(members),
            derived: RwLock::new(Vec::new()),
            frozen: AtomicBool::new(false),
            comparator,
        }
    }

    /// Comparator used for instances.
    pub fn comparator(&self) -> &ClassComparator {
        &self.comparator
    }
}

/// Type kind enumeration.
#[derive(Debug)]
pub enum TypeKind {
    /// Root of the hierarchy; its only value is nil.
    Top,
    /// Scalar value stored inline.
    Leaf {
        /// Payload kind.
        kind: LeafKind,
        /// Extra validity rule (derived numeric types).
        constraint: Option<ValueConstraint>,
    },
    /// Named integer indices.
    Enumeration(EnumerationDescriptor),
    /// Instances are shared [`Object`]s.
    Class(ClassLayout),
}

// ============================================================================
// Type Descriptor
// ============================================================================

/// A complete type descriptor.
///
/// Descriptors are immutable except for the member list of a dynamic class,
/// which may grow until the first instance is created.
pub struct TypeDescriptor {
    name: String,
    base: Option<TypeRef>,
    kind: TypeKind,
    is_abstract: bool,
}

/// Reject names that cannot be registered.
pub(crate) fn validate_type_name(name: &str) -> Result<()> {
    if name.is_empty() || name.chars().any(|c| c.is_whitespace() || !is_xml_char(c)) {
        return Err(Error::InvalidTypeName(name.to_string()));
    }
    Ok(())
}

impl TypeDescriptor {
    pub(crate) fn top(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            kind: TypeKind::Top,
            is_abstract: true,
        }
    }

    pub(crate) fn leaf(
        name: impl Into<String>,
        base: TypeRef,
        kind: LeafKind,
        constraint: Option<ValueConstraint>,
        is_abstract: bool,
    ) -> Self {
        Self {
            name: name.into(),
            base: Some(base),
            kind: TypeKind::Leaf { kind, constraint },
            is_abstract,
        }
    }

    pub(crate) fn enumeration(
        name: impl Into<String>,
        base: TypeRef,
        elements: EnumerationDescriptor,
    ) -> Self {
        Self {
            name: name.into(),
            base: Some(base),
            kind: TypeKind::Enumeration(elements),
            is_abstract: false,
        }
    }

    pub(crate) fn class(
        name: impl Into<String>,
        base: TypeRef,
        layout: ClassLayout,
        is_abstract: bool,
    ) -> Self {
        Self {
            name: name.into(),
            base: Some(base),
            kind: TypeKind::Class(layout),
            is_abstract,
        }
    }

    /// Derive a new leaf type from an existing one.
    ///
    /// The new type stores the same payload kind as `base`. `constraint`
    /// replaces the inherited one when given.
    ///
    /// ```rust
    /// use lbcpp_core::types::{builtin, TypeDescriptor, ValueConstraint};
    ///
    /// let percent = TypeDescriptor::derived_leaf(
    ///     "Percentage",
    ///     &builtin::double_type(),
    ///     Some(ValueConstraint::between(0.0, 100.0)),
    /// )
    /// .unwrap();
    /// assert!(percent.create_from_string("42.5").is_ok());
    /// assert!(percent.create_from_string("142.5").is_err());
    /// assert!(percent.is_subtype_of(&builtin::double_type()));
    /// ```
    pub fn derived_leaf(
        name: impl Into<String>,
        base: &TypeRef,
        constraint: Option<ValueConstraint>,
    ) -> Result<TypeRef> {
        let name = name.into();
        validate_type_name(&name)?;
        match &base.kind {
            TypeKind::Leaf {
                kind,
                constraint: inherited,
            } => Ok(Arc::new(Self::leaf(
                name,
                base.clone(),
                *kind,
                constraint.or(*inherited),
                false,
            ))),
            _ => Err(Error::TypeMismatch {
                expected: "leaf type".to_string(),
                got: base.name.clone(),
            }),
        }
    }

    // ------------------------------------------------------------------------
    // Identity and hierarchy
    // ------------------------------------------------------------------------

    /// Type name (unique within a registry).
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Direct base type (`None` only for the top type).
    pub fn base(&self) -> Option<&TypeRef> {
        self.base.as_ref()
    }

    /// Type kind.
    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    /// Abstract types cannot be instantiated generically.
    pub fn is_abstract(&self) -> bool {
        self.is_abstract
    }

    /// Check if this is the top type.
    pub fn is_top(&self) -> bool {
        matches!(self.kind, TypeKind::Top)
    }

    /// Check if this is a leaf (scalar) type.
    pub fn is_leaf(&self) -> bool {
        matches!(self.kind, TypeKind::Leaf { .. })
    }

    /// Check if this is an enumeration.
    pub fn is_enumeration(&self) -> bool {
        matches!(self.kind, TypeKind::Enumeration(_))
    }

    /// Check if this is a class.
    pub fn is_class(&self) -> bool {
        matches!(self.kind, TypeKind::Class(_))
    }

    /// Payload kind for scalar types (enumerations store integers).
    pub fn leaf_kind(&self) -> Option<LeafKind> {
        match &self.kind {
            TypeKind::Leaf { kind, .. } => Some(*kind),
            TypeKind::Enumeration(_) => Some(LeafKind::Integer),
            _ => None,
        }
    }

    /// Get the element table if this is an enumeration.
    pub fn enumeration_descriptor(&self) -> Option<&EnumerationDescriptor> {
        match &self.kind {
            TypeKind::Enumeration(e) => Some(e),
            _ => None,
        }
    }

    /// Element index of `name` in this enumeration, following
    /// [`EnumerationDescriptor::index_of_name`] precedence.
    ///
    /// Fails with [`Error::UnknownEnumerationValue`] when nothing matches.
    pub fn enumeration_index_of(&self, name: &str) -> Result<usize> {
        let elements = self
            .enumeration_descriptor()
            .ok_or_else(|| Error::TypeMismatch {
                expected: "enumeration".to_string(),
                got: self.name.clone(),
            })?;
        elements.index_of_name(name).ok_or_else(|| {
            log::error!("[class] '{}' has no element '{}'", self.name, name);
            Error::UnknownEnumerationValue {
                enumeration: self.name.clone(),
                value: name.to_string(),
            }
        })
    }

    /// Get the instance comparator if this is a class.
    pub fn comparator(&self) -> Option<&ClassComparator> {
        match &self.kind {
            TypeKind::Class(layout) => Some(layout.comparator()),
            _ => None,
        }
    }

    /// This type followed by its bases up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = &TypeDescriptor> {
        std::iter::successors(Some(self), |t| t.base.as_deref())
    }

    /// Reflexive, transitive subtype test.
    ///
    /// Types are matched by name so descriptors built by separate registries
    /// stay compatible.
    pub fn is_subtype_of(&self, other: &TypeDescriptor) -> bool {
        self.ancestors().any(|t| t.name == other.name)
    }

    /// Most derived type both `a` and `b` inherit from.
    pub fn find_common_base_type(a: &TypeRef, b: &TypeRef) -> Option<TypeRef> {
        let mut current = Some(a.clone());
        while let Some(candidate) = current {
            if b.is_subtype_of(&candidate) {
                return Some(candidate);
            }
            current = candidate.base.clone();
        }
        None
    }

    // ------------------------------------------------------------------------
    // Member variables
    // ------------------------------------------------------------------------

    fn class_layout(&self) -> Result<&ClassLayout> {
        match &self.kind {
            TypeKind::Class(layout) => Ok(layout),
            _ => Err(Error::TypeMismatch {
                expected: "class".to_string(),
                got: self.name.clone(),
            }),
        }
    }

    fn inherited_member_count(&self) -> usize {
        self.base
            .as_ref()
            .map_or(0, |b| b.total_member_variable_count())
    }

    /// Number of members declared by this class itself.
    pub fn own_member_variable_count(&self) -> usize {
        match &self.kind {
            TypeKind::Class(layout) => layout.members.read().len(),
            _ => 0,
        }
    }

    /// Number of members including inherited ones (0 for non-classes).
    pub fn total_member_variable_count(&self) -> usize {
        self.inherited_member_count() + self.own_member_variable_count()
    }

    /// Members declared by this class itself.
    pub fn own_member_variables(&self) -> Vec<MemberVariableSignature> {
        match &self.kind {
            TypeKind::Class(layout) => layout.members.read().clone(),
            _ => Vec::new(),
        }
    }

    /// Full layout: inherited members first, then own members.
    pub fn member_variables(&self) -> Vec<MemberVariableSignature> {
        let mut all = self
            .base
            .as_ref()
            .map(|b| b.member_variables())
            .unwrap_or_default();
        all.extend(self.own_member_variables());
        all
    }

    /// Member at a global index.
    pub fn member_variable(&self, index: usize) -> Result<MemberVariableSignature> {
        let inherited = self.inherited_member_count();
        if index < inherited {
            if let Some(base) = &self.base {
                return base.member_variable(index);
            }
        }
        let own = self.own_member_variables();
        own.get(index - inherited)
            .cloned()
            .ok_or(Error::IndexOutOfRange {
                index,
                length: inherited + own.len(),
            })
    }

    /// Global index of a member by name (inherited members included).
    pub fn find_member_variable_index(&self, name: &str) -> Option<usize> {
        if let Some(index) = self
            .base
            .as_ref()
            .and_then(|b| b.find_member_variable_index(name))
        {
            return Some(index);
        }
        match &self.kind {
            TypeKind::Class(layout) => layout
                .members
                .read()
                .iter()
                .position(|m| m.name == name)
                .map(|i| i + self.inherited_member_count()),
            _ => None,
        }
    }

    /// Like [`find_member_variable_index`](Self::find_member_variable_index),
    /// failing with [`Error::UnknownMember`].
    pub fn member_variable_index(&self, name: &str) -> Result<usize> {
        self.find_member_variable_index(name)
            .ok_or_else(|| Error::UnknownMember {
                class: self.name.clone(),
                name: name.to_string(),
            })
    }

    /// Append a member to this class; returns its global index.
    ///
    /// The name must be new to the class, its ancestors and every live
    /// subclass.
    pub(crate) fn add_member_variable(&self, signature: MemberVariableSignature) -> Result<usize> {
        let layout = self.class_layout()?;
        if signature.name.is_empty() {
            return Err(Error::InvalidValue {
                type_name: self.name.clone(),
                value: "empty member name".to_string(),
            });
        }
        let _layouts = lock_layouts();
        let inherited = self.inherited_member_count();
        let inherited_clash = self
            .base
            .as_ref()
            .and_then(|b| b.find_member_variable_index(&signature.name))
            .is_some();

        let mut members = layout.members.write();
        if layout.frozen.load(AtomicOrdering::Acquire) {
            log::warn!(
                "[class] refusing to add '{}' to '{}': instances exist",
                signature.name,
                self.name
            );
            return Err(Error::ClassFrozen(self.name.clone()));
        }
        if inherited_clash || members.iter().any(|m| m.name == signature.name) {
            return Err(Error::DuplicateMember {
                owner: self.name.clone(),
                name: signature.name,
            });
        }
        if let Some(subclass) = self.find_declaring_subclass(&signature.name) {
            log::error!(
                "[class] '{}' cannot be added to '{}': subclass '{}' declares it",
                signature.name,
                self.name,
                subclass
            );
            return Err(Error::DuplicateMember {
                owner: subclass,
                name: signature.name,
            });
        }
        log::debug!(
            "[class] {}.{}: {}",
            self.name,
            signature.name,
            signature.declared_type.name()
        );
        members.push(signature);
        Ok(inherited + members.len() - 1)
    }

    /// Record `class` as a direct subclass of this class.
    pub(crate) fn add_derived(&self, class: &TypeRef) {
        if let TypeKind::Class(layout) = &self.kind {
            let mut derived = layout.derived.write();
            derived.retain(|d| d.strong_count() > 0);
            derived.push(Arc::downgrade(class));
        }
    }

    /// Live direct subclasses.
    fn derived_classes(&self) -> Vec<TypeRef> {
        match &self.kind {
            TypeKind::Class(layout) => layout
                .derived
                .read()
                .iter()
                .filter_map(Weak::upgrade)
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Name of a subclass, at any depth, that declares a member `name`.
    fn find_declaring_subclass(&self, name: &str) -> Option<String> {
        self.derived_classes().into_iter().find_map(|d| {
            if d.own_member_variables().iter().any(|m| m.name == name) {
                Some(d.name.clone())
            } else {
                d.find_declaring_subclass(name)
            }
        })
    }

    /// True once an instance of this class (or of a subclass) exists.
    pub fn is_frozen(&self) -> bool {
        match &self.kind {
            TypeKind::Class(layout) => layout.frozen.load(AtomicOrdering::Acquire),
            _ => false,
        }
    }

    /// Freeze this class and every ancestor class.
    fn freeze(&self) {
        for t in self.ancestors() {
            if let TypeKind::Class(layout) = &t.kind {
                let _members = layout.members.write();
                if !layout.frozen.swap(true, AtomicOrdering::AcqRel) {
                    log::debug!("[class] layout of '{}' is now frozen", t.name);
                }
            }
        }
    }

    // ------------------------------------------------------------------------
    // Values
    // ------------------------------------------------------------------------

    /// Create a fresh instance with every member missing.
    pub fn create_instance(self: &Arc<Self>) -> Result<ObjectRef> {
        if !self.is_class() || self.is_abstract {
            return Err(Error::NoDefaultConstructor(self.name.clone()));
        }
        self.freeze();
        Ok(Object::allocate(self.clone()))
    }

    /// Payload encoding the missing value of this type.
    pub fn missing_payload(&self) -> Payload {
        match &self.kind {
            TypeKind::Top => Payload::Nil,
            TypeKind::Leaf { kind, .. } => kind.missing_payload(),
            TypeKind::Enumeration(e) => Payload::Integer(e.missing_index() as i64),
            TypeKind::Class(_) => Payload::Object(None),
        }
    }

    /// True iff `payload` is this type's missing encoding.
    pub fn is_missing_payload(&self, payload: &Payload) -> bool {
        match (&self.kind, payload) {
            (TypeKind::Top, Payload::Nil) => true,
            (TypeKind::Leaf { kind, .. }, p) => kind.is_missing(p),
            (TypeKind::Enumeration(e), Payload::Integer(i)) => *i == e.missing_index() as i64,
            (TypeKind::Class(_), Payload::Object(None)) => true,
            _ => false,
        }
    }

    /// Missing value of this type.
    pub fn missing_value(self: &Arc<Self>) -> Variable {
        Variable::from_parts(self.clone(), self.missing_payload())
    }

    /// Check that `payload` may be stored under this type.
    pub fn check_payload(&self, payload: &Payload) -> Result<()> {
        if self.is_missing_payload(payload) {
            return Ok(());
        }
        let mismatch = |got: String| Error::TypeMismatch {
            expected: self.name.clone(),
            got,
        };
        match (&self.kind, payload) {
            (TypeKind::Leaf { kind, constraint }, p) if kind.accepts(p) => {
                match constraint {
                    Some(c) if !c.check(p) => Err(Error::InvalidValue {
                        type_name: self.name.clone(),
                        value: kind.format(p),
                    }),
                    _ => Ok(()),
                }
            }
            (TypeKind::Enumeration(e), Payload::Integer(i)) => {
                if *i >= 0 && (*i as usize) < e.num_elements() {
                    Ok(())
                } else {
                    Err(Error::InvalidValue {
                        type_name: self.name.clone(),
                        value: i.to_string(),
                    })
                }
            }
            (TypeKind::Class(_), Payload::Object(Some(object))) => {
                if object.class().is_subtype_of(self) {
                    Ok(())
                } else {
                    Err(mismatch(object.class().name.clone()))
                }
            }
            (_, p) => Err(mismatch(p.kind_name().to_string())),
        }
    }

    /// Default-constructed value (fresh instance for classes).
    pub fn default_value(self: &Arc<Self>) -> Result<Variable> {
        if self.is_abstract {
            return Err(Error::NoDefaultConstructor(self.name.clone()));
        }
        let payload = match &self.kind {
            TypeKind::Top => return Err(Error::NoDefaultConstructor(self.name.clone())),
            TypeKind::Leaf { kind, constraint } => {
                let payload = kind.default_payload();
                match (constraint, kind) {
                    (Some(c), LeafKind::Integer) if !c.check(&payload) => {
                        Payload::Integer(c.min.unwrap_or_default() as i64)
                    }
                    (Some(c), LeafKind::Double) if !c.check(&payload) => {
                        Payload::Double(c.min.unwrap_or_default())
                    }
                    _ => payload,
                }
            }
            TypeKind::Enumeration(e) if e.num_elements() > 0 => Payload::Integer(0),
            TypeKind::Enumeration(_) => self.missing_payload(),
            TypeKind::Class(_) => Payload::Object(Some(self.create_instance()?)),
        };
        Ok(Variable::from_parts(self.clone(), payload))
    }

    /// Parse a value of this type from text.
    ///
    /// Enumerations accept an element name, a short name or a numeric index.
    pub fn create_from_string(self: &Arc<Self>, text: &str) -> Result<Variable> {
        let payload = match &self.kind {
            TypeKind::Leaf { kind, .. } => kind.parse(&self.name, text)?,
            TypeKind::Enumeration(e) => {
                let trimmed = text.trim();
                let index = e
                    .index_of_name(trimmed)
                    .or_else(|| {
                        trimmed
                            .parse::<usize>()
                            .ok()
                            .filter(|i| *i < e.num_elements())
                    })
                    .ok_or_else(|| Error::UnknownEnumerationValue {
                        enumeration: self.name.clone(),
                        value: trimmed.to_string(),
                    })?;
                Payload::Integer(index as i64)
            }
            TypeKind::Top | TypeKind::Class(_) => {
                return Err(Error::InvalidValue {
                    type_name: self.name.clone(),
                    value: text.to_string(),
                })
            }
        };
        self.check_payload(&payload)?;
        Ok(Variable::from_parts(self.clone(), payload))
    }

    /// Text form of a payload of this type.
    pub fn format_payload(&self, payload: &Payload) -> String {
        match (&self.kind, payload) {
            (TypeKind::Leaf { kind, .. }, p) => kind.format(p),
            (TypeKind::Enumeration(e), Payload::Integer(i)) => usize::try_from(*i)
                .ok()
                .and_then(|i| e.element_name(i).ok())
                .map(str::to_string)
                .unwrap_or_default(),
            (TypeKind::Class(_), Payload::Object(Some(object))) => object.to_string(),
            _ => String::new(),
        }
    }

    /// Order two payloads of this type; missing sorts first.
    pub fn compare_payloads(&self, a: &Payload, b: &Payload) -> Ordering {
        match (self.is_missing_payload(a), self.is_missing_payload(b)) {
            (true, true) => return Ordering::Equal,
            (true, false) => return Ordering::Less,
            (false, true) => return Ordering::Greater,
            (false, false) => {}
        }
        match (&self.kind, a, b) {
            (TypeKind::Leaf { kind, .. }, _, _) => kind.compare(a, b),
            (TypeKind::Enumeration(_), _, _) => LeafKind::Integer.compare(a, b),
            (TypeKind::Class(layout), Payload::Object(Some(x)), Payload::Object(Some(y))) => {
                layout.comparator.compare(x, y)
            }
            _ => a.kind_rank().cmp(&b.kind_rank()),
        }
    }
}

/// The more derived of two related types, `None` when unrelated.
pub(crate) fn more_specific<'a>(
    a: &'a TypeDescriptor,
    b: &'a TypeDescriptor,
) -> Option<&'a TypeDescriptor> {
    if a.is_subtype_of(b) {
        Some(a)
    } else if b.is_subtype_of(a) {
        Some(b)
    } else {
        None
    }
}

impl PartialEq for TypeDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for TypeDescriptor {}

impl fmt::Debug for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TypeDescriptor")
            .field("name", &self.name)
            .field("base", &self.base.as_ref().map(|b| b.name()))
            .field("kind", &self.kind)
            .field("is_abstract", &self.is_abstract)
            .finish()
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
