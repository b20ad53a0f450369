// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Runtime Type System
//!
//! Named types arranged in a single-inheritance hierarchy, inspected and
//! extended at runtime.
//!
//! # Features
//!
//! - **TypeDescriptor**: name, base type and kind (leaf, enumeration, class)
//! - **EnumerationDescriptor**: ordered element names with short names and codes
//! - **DynamicClass**: classes whose member list grows until first instantiation
//! - **Builder API**: fluent construction of classes and enumerations
//!
//! # Example
//!
//! ```rust
//! use lbcpp_core::types::{builtin, ClassBuilder, EnumerationBuilder};
//!
//! let color = EnumerationBuilder::new("Color")
//!     .element("Red")
//!     .element("Green")
//!     .build()
//!     .unwrap();
//! let pixel = ClassBuilder::new("Pixel")
//!     .member("color", color.clone())
//!     .member("alpha", builtin::probability_type())
//!     .build()
//!     .unwrap();
//!
//! let p = pixel.create_instance().unwrap();
//! p.set_from_string("color", "green").unwrap();
//! assert_eq!(p.to_string(), "Pixel{color = Green, alpha = missing}");
//! ```

mod builder;
pub mod builtin;
mod descriptor;
mod dynamic_class;
mod enumeration;
mod leaf;

pub use builder::{ClassBuilder, EnumerationBuilder};
pub use descriptor::{
    ClassComparator, ClassLayout, CompareFn, MemberVariableSignature, TypeDescriptor, TypeKind,
    TypeRef,
};
pub(crate) use descriptor::{more_specific, validate_type_name};
pub use dynamic_class::DynamicClass;
pub use enumeration::{EnumerationDescriptor, EnumerationElement};
pub use leaf::{LeafKind, ValueConstraint};
