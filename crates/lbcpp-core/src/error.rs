// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Error type shared by every runtime operation.

use std::fmt;

/// Result type for runtime operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised by the type registry, objects, values and the XML codec.
///
/// # Example
///
/// ```rust
/// use lbcpp_core::{Error, TypeRegistry};
///
/// let registry = TypeRegistry::with_builtins();
/// match registry.lookup("Unicorn") {
///     Err(Error::UnknownType(name)) => assert_eq!(name, "Unicorn"),
///     other => panic!("unexpected: {:?}", other.map(|t| t.name().to_string())),
/// }
/// ```
#[derive(Debug)]
pub enum Error {
    // ========================================================================
    // Registration Errors
    // ========================================================================
    /// A type name could not be resolved through the registry.
    UnknownType(String),
    /// A type with this name is already registered.
    DuplicateTypeName(String),
    /// A member (or enumeration element) with this name already exists.
    DuplicateMember {
        /// Owning class or enumeration.
        owner: String,
        /// Conflicting name.
        name: String,
    },
    /// Type name is empty or otherwise unusable.
    InvalidTypeName(String),
    /// Structural mutation of a class that already has instances.
    ClassFrozen(String),
    /// The process-wide registry has not been initialized (or was shut down).
    NotInitialized,

    // ========================================================================
    // Access Errors
    // ========================================================================
    /// By-name access to a member the class does not declare.
    UnknownMember {
        /// Class searched.
        class: String,
        /// Requested member name.
        name: String,
    },
    /// Indexed access beyond the declared member count.
    IndexOutOfRange {
        /// Requested index.
        index: usize,
        /// Number of valid indices.
        length: usize,
    },
    /// Generic instantiation of an abstract or non-class type.
    NoDefaultConstructor(String),
    /// Value type is not compatible with the expected type.
    TypeMismatch {
        /// Expected (declared) type name.
        expected: String,
        /// Actual type or payload kind.
        got: String,
    },

    // ========================================================================
    // Parse / Serialization Errors
    // ========================================================================
    /// A string matched no enumeration element or short name.
    UnknownEnumerationValue {
        /// Enumeration searched.
        enumeration: String,
        /// Rejected text.
        value: String,
    },
    /// A string could not be parsed into, or violates, a leaf type.
    InvalidValue {
        /// Target type name.
        type_name: String,
        /// Rejected text or reason.
        value: String,
    },
    /// Fewer member elements than the class declares.
    MissingElement {
        /// Class being loaded.
        class: String,
        /// Name of the first member without an element.
        member: String,
    },
    /// XML tree does not have the expected shape.
    MalformedXml(String),
    /// Object graph cycle met while object sharing is disabled.
    CyclicReference(String),
    /// Underlying XML parser failure.
    Xml(roxmltree::Error),
    /// I/O error with underlying cause.
    Io(std::io::Error),
}

impl fmt::Display for Error {
    // @audit-ok: Simple pattern matching - error message dispatch table
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownType(name) => write!(f, "Could not find type '{}'", name),
            Error::DuplicateTypeName(name) => {
                write!(f, "Type '{}' has already been declared", name)
            }
            Error::DuplicateMember { owner, name } => {
                write!(f, "'{}' is already declared in '{}'", name, owner)
            }
            Error::InvalidTypeName(name) => write!(f, "Invalid type name: '{}'", name),
            Error::ClassFrozen(name) => {
                write!(f, "Class '{}' already has instances and cannot change", name)
            }
            Error::NotInitialized => write!(f, "Type registry is not initialized"),
            Error::UnknownMember { class, name } => {
                write!(f, "Could not find member '{}' in class '{}'", name, class)
            }
            Error::IndexOutOfRange { index, length } => {
                write!(f, "Index out of range: {} >= {}", index, length)
            }
            Error::NoDefaultConstructor(name) => {
                write!(f, "Type '{}' cannot be instantiated", name)
            }
            Error::TypeMismatch { expected, got } => {
                write!(f, "Type mismatch: expected {}, got {}", expected, got)
            }
            Error::UnknownEnumerationValue { enumeration, value } => {
                write!(f, "'{}' is not a value of enumeration '{}'", value, enumeration)
            }
            Error::InvalidValue { type_name, value } => {
                write!(f, "'{}' is not a valid {}", value, type_name)
            }
            Error::MissingElement { class, member } => {
                write!(f, "Missing element for member '{}' of '{}'", member, class)
            }
            Error::MalformedXml(msg) => write!(f, "Malformed XML: {}", msg),
            Error::CyclicReference(class) => write!(
                f,
                "Cycle through an instance of '{}' requires shared objects",
                class
            ),
            Error::Xml(e) => write!(f, "XML parse error: {}", e),
            Error::Io(e) => write!(f, "I/O error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Xml(e) => Some(e),
            Error::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(e: std::io::Error) -> Self {
        Error::Io(e)
    }
}

impl From<roxmltree::Error> for Error {
    fn from(e: roxmltree::Error) -> Self {
        Error::Xml(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let e = Error::IndexOutOfRange {
            index: 3,
            length: 2,
        };
        assert_eq!(e.to_string(), "Index out of range: 3 >= 2");

        let e = Error::UnknownMember {
            class: "Point".into(),
            name: "z".into(),
        };
        assert!(e.to_string().contains("'z'"));
        assert!(e.to_string().contains("'Point'"));
    }

    #[test]
    fn test_io_source() {
        let e = Error::from(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert!(std::error::Error::source(&e).is_some());
    }
}
