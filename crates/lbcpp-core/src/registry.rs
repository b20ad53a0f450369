// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Name-to-type registry.
//!
//! [`TypeRegistry`] is a concurrent map from type names to descriptors. Any
//! number of isolated registries can coexist; a process-wide one is managed
//! with [`initialize`], [`registry`] and [`shutdown`].
//!
//! # Example
//!
//! ```rust
//! use lbcpp_core::TypeRegistry;
//!
//! let registry = TypeRegistry::with_builtins();
//! let point = registry.declare_class("Point", "Object").unwrap();
//! point.add_member_variable("x", registry.lookup("Double").unwrap()).unwrap();
//!
//! let p = registry.create_instance("Point").unwrap();
//! assert_eq!(p.num_member_variables(), 1);
//! ```

use crate::error::{Error, Result};
use crate::object::ObjectRef;
use crate::types::builtin::builtin_types;
use crate::types::{validate_type_name, DynamicClass, TypeRef};
use arc_swap::ArcSwapOption;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use parking_lot::Mutex;
use std::sync::{Arc, OnceLock};

// ---------------------------------------------------------------------------
// TypeResolver trait + DashMap implementation
// ---------------------------------------------------------------------------

/// Resolves type names to descriptors.
///
/// The XML codec resolves every `type` attribute through this trait.
pub trait TypeResolver {
    /// Look up a type by name; fails with [`Error::UnknownType`].
    fn resolve(&self, name: &str) -> Result<TypeRef>;
}

/// Concurrent [`DashMap`]-backed registry.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: DashMap<String, TypeRef>,
}

/// Strip every blank from a requested type name.
fn normalize(name: &str) -> String {
    name.chars().filter(|c| !c.is_whitespace()).collect()
}

impl TypeRegistry {
    /// Create an empty registry (no built-ins).
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding every built-in type.
    #[must_use]
    pub fn with_builtins() -> Self {
        let registry = Self::new();
        for ty in builtin_types() {
            registry.types.insert(ty.name().to_string(), ty);
        }
        registry
    }

    /// Register `ty` under its name.
    ///
    /// Fails when the name is empty or blank-containing, already taken, or
    /// when the base type is not registered here.
    pub fn register(&self, ty: TypeRef) -> Result<()> {
        if let Err(e) = validate_type_name(ty.name()) {
            log::error!("[registry] rejected type name '{}'", ty.name());
            return Err(e);
        }
        if let Some(base) = ty.base() {
            if !self.types.contains_key(base.name()) {
                log::error!(
                    "[registry] base '{}' of '{}' is not registered",
                    base.name(),
                    ty.name()
                );
                return Err(Error::UnknownType(base.name().to_string()));
            }
        }
        match self.types.entry(ty.name().to_string()) {
            Entry::Occupied(_) => {
                log::error!("[registry] type '{}' has already been declared", ty.name());
                Err(Error::DuplicateTypeName(ty.name().to_string()))
            }
            Entry::Vacant(slot) => {
                log::debug!("[registry] registered '{}'", ty.name());
                slot.insert(ty);
                Ok(())
            }
        }
    }

    /// Register several types in order (bases first).
    pub fn register_all(&self, types: impl IntoIterator<Item = TypeRef>) -> Result<()> {
        types.into_iter().try_for_each(|ty| self.register(ty))
    }

    /// Declare a dynamic class deriving from `base` and register it.
    pub fn declare_class(&self, name: &str, base: &str) -> Result<DynamicClass> {
        let class = DynamicClass::with_base(name, self.lookup(base)?)?;
        self.register(class.type_ref().clone())?;
        Ok(class)
    }

    /// Look up a type; blanks in `name` are ignored.
    pub fn lookup(&self, name: &str) -> Result<TypeRef> {
        self.find(name).ok_or_else(|| {
            log::error!("[registry] could not find type '{}'", name);
            Error::UnknownType(normalize(name))
        })
    }

    /// Look up a type without reporting failure.
    pub fn find(&self, name: &str) -> Option<TypeRef> {
        self.types
            .get(normalize(name).as_str())
            .map(|entry| entry.value().clone())
    }

    /// Returns `true` if a type with this name is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(normalize(name).as_str())
    }

    /// Number of registered types.
    #[must_use]
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Returns `true` if no types are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered names, sorted.
    pub fn type_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.types.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Instantiate a class by name.
    pub fn create_instance(&self, class_name: &str) -> Result<ObjectRef> {
        self.lookup(class_name)?.create_instance()
    }
}

impl TypeResolver for TypeRegistry {
    fn resolve(&self, name: &str) -> Result<TypeRef> {
        self.lookup(name)
    }
}

// ---------------------------------------------------------------------------
// Process-wide registry
// ---------------------------------------------------------------------------

static GLOBAL_REGISTRY: OnceLock<ArcSwapOption<TypeRegistry>> = OnceLock::new();
static LIFECYCLE: Mutex<()> = parking_lot::const_mutex(());

fn global_slot() -> &'static ArcSwapOption<TypeRegistry> {
    GLOBAL_REGISTRY.get_or_init(ArcSwapOption::empty)
}

/// Create the process-wide registry with the built-in types.
///
/// Idempotent: a second call returns the registry already in place.
pub fn initialize() -> Arc<TypeRegistry> {
    let _lifecycle = LIFECYCLE.lock();
    if let Some(existing) = global_slot().load_full() {
        return existing;
    }
    let registry = Arc::new(TypeRegistry::with_builtins());
    global_slot().store(Some(registry.clone()));
    log::debug!(
        "[registry] initialized with {} built-in types",
        registry.len()
    );
    registry
}

/// Drop the process-wide registry.
///
/// Handles obtained earlier stay valid; later [`registry`] calls fail until
/// [`initialize`] runs again.
pub fn shutdown() {
    let _lifecycle = LIFECYCLE.lock();
    if global_slot().swap(None).is_some() {
        log::debug!("[registry] shut down");
    }
}

/// The process-wide registry.
pub fn registry() -> Result<Arc<TypeRegistry>> {
    global_slot().load_full().ok_or(Error::NotInitialized)
}

/// Returns `true` between [`initialize`] and [`shutdown`].
pub fn is_initialized() -> bool {
    global_slot().load().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{ClassBuilder, EnumerationBuilder};

    #[test]
    fn test_builtins_registered() {
        let registry = TypeRegistry::with_builtins();
        assert_eq!(registry.len(), 11);
        for name in ["Variable", "Double", "Probability", "EnumValue", "Object"] {
            assert!(registry.contains(name), "{}", name);
        }
        assert!(TypeRegistry::new().is_empty());
    }

    #[test]
    fn test_lookup_ignores_blanks() {
        let registry = TypeRegistry::with_builtins();
        let t = registry.lookup(" Positive Integer ").expect("lookup");
        assert_eq!(t.name(), "PositiveInteger");
    }

    #[test]
    fn test_register_errors() {
        let registry = TypeRegistry::with_builtins();
        let color = EnumerationBuilder::new("Color")
            .element("Red")
            .build()
            .expect("enumeration");
        registry.register(color.clone()).expect("register");
        assert!(matches!(
            registry.register(color),
            Err(Error::DuplicateTypeName(name)) if name == "Color"
        ));

        let orphan = ClassBuilder::new("Orphan").build().expect("class");
        assert!(matches!(
            TypeRegistry::new().register(orphan),
            Err(Error::UnknownType(name)) if name == "Object"
        ));
    }

    #[test]
    fn test_declare_class() {
        let registry = TypeRegistry::with_builtins();
        let shape = registry.declare_class("Shape", "Object").expect("declare");
        shape
            .add_member_variable("area", registry.lookup("PositiveDouble").expect("type"))
            .expect("add");
        let circle = registry.declare_class("Circle", "Shape").expect("declare");
        assert!(circle.type_ref().is_subtype_of(shape.type_ref()));
        assert!(matches!(
            registry.declare_class("Square", "Polygon"),
            Err(Error::UnknownType(_))
        ));
        assert!(registry
            .type_names()
            .windows(2)
            .all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn test_create_instance_errors() {
        let registry = TypeRegistry::with_builtins();
        assert!(matches!(
            registry.create_instance("Object"),
            Err(Error::NoDefaultConstructor(_))
        ));
        assert!(matches!(
            registry.create_instance("Nope"),
            Err(Error::UnknownType(_))
        ));
    }

    #[test]
    fn test_concurrent_registration() {
        let registry = Arc::new(TypeRegistry::with_builtins());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    let class = ClassBuilder::new(format!("Worker{}", i))
                        .integer_member("id")
                        .build()
                        .expect("class");
                    registry.register(class)
                })
            })
            .collect();
        for handle in handles {
            handle.join().expect("thread").expect("register");
        }
        assert_eq!(registry.len(), 11 + 8);
    }

    // Single test for the process-wide registry: tests in this binary run
    // concurrently and would otherwise race on it.
    #[test]
    fn test_global_lifecycle() {
        let first = initialize();
        let second = initialize();
        assert!(Arc::ptr_eq(&first, &second));
        assert!(is_initialized());
        assert!(registry().expect("initialized").contains("Double"));

        shutdown();
        assert!(matches!(registry(), Err(Error::NotInitialized)));
        assert!(first.contains("Double"));

        let third = initialize();
        assert!(!Arc::ptr_eq(&first, &third));
        shutdown();
    }
}
