// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # lbcpp-core - Dynamic Type Runtime
//!
//! Runtime type system, generic objects and XML persistence for machine
//! learning data structures whose shape is only known at runtime.
//!
//! ## Quick Start
//!
//! ```rust
//! use lbcpp_core::types::EnumerationBuilder;
//! use lbcpp_core::{Result, TypeRegistry, XmlCodec};
//!
//! fn main() -> Result<()> {
//!     let registry = TypeRegistry::with_builtins();
//!     registry.register(
//!         EnumerationBuilder::new("Color")
//!             .element("Red")
//!             .element("Green")
//!             .element("Blue")
//!             .build()?,
//!     )?;
//!
//!     let point = registry.declare_class("Point", "Object")?;
//!     point.add_member_variable("x", registry.lookup("Double")?)?;
//!     point.add_member_variable("color", registry.lookup("Color")?)?;
//!
//!     let p = registry.create_instance("Point")?;
//!     p.set_by_name("x", 3.5)?;
//!     p.set_from_string("color", "Green")?;
//!
//!     let codec = XmlCodec::new(&registry);
//!     let q = codec.load(&codec.save(&p)?)?;
//!     assert_eq!(q.to_string(), "Point{x = 3.5, color = Green}");
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! +---------------------------------------------------------------------+
//! |                        Persistence Layer                            |
//! |   XmlCodec -> XmlElement (roxmltree parse, escaped writer)          |
//! +---------------------------------------------------------------------+
//! |                          Value Layer                                |
//! |   Variable (type + payload) | Object (lazy member slots)            |
//! +---------------------------------------------------------------------+
//! |                          Type Layer                                 |
//! |   TypeDescriptor | Enumeration | DynamicClass | TypeRegistry        |
//! +---------------------------------------------------------------------+
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`TypeDescriptor`] | Named type with base type and kind |
//! | [`DynamicClass`] | Class whose members are declared at runtime |
//! | [`Variable`] | Typed value (scalar or object reference) |
//! | [`Object`] | Instance of a class |
//! | [`TypeRegistry`] | Name-to-type map, isolated or process-wide |
//! | [`XmlCodec`] | XML save/load of values and object graphs |
//!
//! ## Modules Overview
//!
//! - [`types`] - Type descriptors, built-ins and builders
//! - [`value`] - Typed values and conversions
//! - [`object`] - Generic class instances
//! - [`registry`] - Type registry and process-wide lifecycle
//! - [`xml`] - XML persistence
//! - [`config`] - Format constants and codec options

/// Format constants and codec options.
pub mod config;
/// Error type.
pub mod error;
/// Generic class instances.
pub mod object;
/// Type registry and process-wide lifecycle.
pub mod registry;
/// Runtime type system.
pub mod types;
/// Typed values.
pub mod value;
/// XML persistence.
pub mod xml;

pub use config::CodecOptions;
pub use error::{Error, Result};
pub use object::{Object, ObjectRef};
pub use registry::{initialize, is_initialized, registry, shutdown, TypeRegistry, TypeResolver};
pub use types::{
    ClassBuilder, ClassComparator, DynamicClass, EnumerationBuilder, EnumerationDescriptor,
    MemberVariableSignature, TypeDescriptor, TypeRef,
};
pub use value::{FromVariable, Payload, Variable};
pub use xml::{XmlCodec, XmlElement};
