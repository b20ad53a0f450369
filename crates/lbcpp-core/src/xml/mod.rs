// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XML persistence for values and object graphs.
//!
//! Every value is written as a `<variable>` element carrying its runtime type
//! name. Leaf values are written as text; objects as one child element per
//! member, base-class members first:
//!
//! ```xml
//! <lbcpp version="1">
//!   <variable type="Point">
//!     <variable name="x" type="Double">3.5</variable>
//!     <variable name="color" type="Color">Green</variable>
//!     <variable name="label" type="String" missing="true"/>
//!   </variable>
//! </lbcpp>
//! ```
//!
//! Loading is positional: the n-th child element fills member n.

mod element;
mod exporter;
mod importer;

pub use element::{escape_attribute, escape_text, is_xml_char, XmlElement};

use crate::config::{
    CodecOptions, FORMAT_VERSION, ROOT_TAG, TYPE_NAME_CLOSE, TYPE_NAME_OPEN, VARIABLE_TAG,
    VERSION_ATTRIBUTE, XML_TYPE_NAME_CLOSE, XML_TYPE_NAME_OPEN,
};
use crate::error::{Error, Result};
use crate::object::ObjectRef;
use crate::registry::TypeResolver;
use crate::value::Variable;
use exporter::XmlExporter;
use importer::XmlImporter;
use std::fs;
use std::path::Path;

/// Replace generic-name brackets so type names fit in attributes.
pub fn escape_type_name(name: &str) -> String {
    name.replace(TYPE_NAME_OPEN, &XML_TYPE_NAME_OPEN.to_string())
        .replace(TYPE_NAME_CLOSE, &XML_TYPE_NAME_CLOSE.to_string())
}

/// Inverse of [`escape_type_name`].
pub fn unescape_type_name(name: &str) -> String {
    name.replace(XML_TYPE_NAME_OPEN, &TYPE_NAME_OPEN.to_string())
        .replace(XML_TYPE_NAME_CLOSE, &TYPE_NAME_CLOSE.to_string())
}

/// Saves and loads values through a [`TypeResolver`].
///
/// ```rust
/// use lbcpp_core::{TypeRegistry, XmlCodec};
///
/// let registry = TypeRegistry::with_builtins();
/// let point = registry.declare_class("Point", "Object").unwrap();
/// point.add_member_variable("x", registry.lookup("Double").unwrap()).unwrap();
///
/// let p = registry.create_instance("Point").unwrap();
/// p.set_by_name("x", 3.5).unwrap();
///
/// let codec = XmlCodec::new(&registry);
/// let element = codec.save(&p).unwrap();
/// let q = codec.load(&element).unwrap();
/// assert_eq!(q.get_as::<f64>("x").unwrap(), 3.5);
/// ```
pub struct XmlCodec<'r> {
    resolver: &'r dyn TypeResolver,
    options: CodecOptions,
}

impl<'r> XmlCodec<'r> {
    /// Codec with default options.
    pub fn new(resolver: &'r dyn TypeResolver) -> Self {
        Self::with_options(resolver, CodecOptions::default())
    }

    /// Codec with explicit options.
    pub fn with_options(resolver: &'r dyn TypeResolver, options: CodecOptions) -> Self {
        Self { resolver, options }
    }

    /// Active options.
    pub fn options(&self) -> &CodecOptions {
        &self.options
    }

    // ========================================================================
    // Elements
    // ========================================================================

    /// Write an object graph rooted at `object`.
    pub fn save(&self, object: &ObjectRef) -> Result<XmlElement> {
        self.save_variable(&Variable::object(object.clone()))
    }

    /// Write any value.
    pub fn save_variable(&self, value: &Variable) -> Result<XmlElement> {
        XmlExporter::new(&self.options).export(value)
    }

    /// Read an object graph written by [`save`](Self::save).
    pub fn load(&self, element: &XmlElement) -> Result<ObjectRef> {
        let value = self.load_variable(element)?;
        value.as_object().cloned().ok_or_else(|| Error::TypeMismatch {
            expected: "object".to_string(),
            got: value.type_name().to_string(),
        })
    }

    /// Read any value.
    pub fn load_variable(&self, element: &XmlElement) -> Result<Variable> {
        XmlImporter::new(self.resolver, &self.options).import(element)
    }

    // ========================================================================
    // Documents
    // ========================================================================

    /// Full document: XML declaration, then `<lbcpp version="..">` wrapping
    /// the value.
    pub fn to_document_string(&self, value: &Variable) -> Result<String> {
        let mut root = XmlElement::new(ROOT_TAG);
        root.set_attribute(VERSION_ATTRIBUTE, FORMAT_VERSION.to_string());
        root.add_child(self.save_variable(value)?);

        let mut out = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        if self.options.indent > 0 {
            out.push('\n');
        }
        out.push_str(&root.to_xml_string(self.options.indent));
        Ok(out)
    }

    /// Parse a document; a bare `<variable>` root is accepted too.
    pub fn from_document_str(&self, text: &str) -> Result<Variable> {
        let root = XmlElement::parse(text)?;
        if root.tag() == VARIABLE_TAG {
            return self.load_variable(&root);
        }
        if root.tag() != ROOT_TAG {
            return Err(Error::MalformedXml(format!(
                "unexpected root <{}>",
                root.tag()
            )));
        }
        if let Some(version) = root.attribute(VERSION_ATTRIBUTE) {
            let supported = version
                .trim()
                .parse::<u32>()
                .is_ok_and(|v| v <= FORMAT_VERSION);
            if !supported {
                log::error!("[xml] unsupported format version '{}'", version);
                return Err(Error::MalformedXml(format!(
                    "unsupported format version '{}'",
                    version
                )));
            }
        }
        let child = root
            .find_child(VARIABLE_TAG)
            .ok_or_else(|| Error::MalformedXml("document holds no value".to_string()))?;
        self.load_variable(child)
    }

    /// Write a document to `path`.
    pub fn save_to_file(&self, path: impl AsRef<Path>, value: &Variable) -> Result<()> {
        let path = path.as_ref();
        fs::write(path, self.to_document_string(value)?)?;
        log::debug!("[xml] saved {} to {}", value.type_name(), path.display());
        Ok(())
    }

    /// Read a document from `path`.
    pub fn load_from_file(&self, path: impl AsRef<Path>) -> Result<Variable> {
        let path = path.as_ref();
        let text = fs::read_to_string(path)?;
        let value = self.from_document_str(&text)?;
        log::debug!("[xml] loaded {} from {}", value.type_name(), path.display());
        Ok(value)
    }
}
