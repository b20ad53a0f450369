// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! XML to value graph.

use super::element::XmlElement;
use super::unescape_type_name;
use crate::config::{
    CodecOptions, ID_ATTRIBUTE, MISSING_ATTRIBUTE, NAME_ATTRIBUTE, REF_ATTRIBUTE, TYPE_ATTRIBUTE,
    VARIABLE_TAG,
};
use crate::error::{Error, Result};
use crate::object::ObjectRef;
use crate::registry::TypeResolver;
use crate::types::TypeRef;
use crate::value::Variable;
use std::collections::HashMap;

/// Single-use reader for one document.
///
/// Objects carrying an `id` are recorded before their members are read, so
/// `ref` attributes inside them may point back to an enclosing object.
pub(crate) struct XmlImporter<'r> {
    resolver: &'r dyn TypeResolver,
    options: &'r CodecOptions,
    shared: HashMap<String, ObjectRef>,
}

impl<'r> XmlImporter<'r> {
    pub(crate) fn new(resolver: &'r dyn TypeResolver, options: &'r CodecOptions) -> Self {
        Self {
            resolver,
            options,
            shared: HashMap::new(),
        }
    }

    pub(crate) fn import(mut self, element: &XmlElement) -> Result<Variable> {
        self.load_variable(element)
    }

    fn load_variable(&mut self, element: &XmlElement) -> Result<Variable> {
        if element.tag() != VARIABLE_TAG {
            return Err(Error::MalformedXml(format!(
                "expected <{}>, found <{}>",
                VARIABLE_TAG,
                element.tag()
            )));
        }

        if let Some(id) = element.attribute(REF_ATTRIBUTE) {
            return self
                .shared
                .get(id)
                .cloned()
                .map(Variable::object)
                .ok_or_else(|| {
                    log::error!("[xml] reference to unknown object '{}'", id);
                    Error::MalformedXml(format!("reference to unknown object '{}'", id))
                });
        }

        let type_name = element.attribute(TYPE_ATTRIBUTE).ok_or_else(|| {
            Error::MalformedXml(format!("<{}> without '{}' attribute", VARIABLE_TAG, TYPE_ATTRIBUTE))
        })?;
        let ty = self.resolver.resolve(&unescape_type_name(type_name))?;

        if element.attribute(MISSING_ATTRIBUTE) == Some("true") {
            return Ok(if ty.is_top() {
                Variable::nil()
            } else {
                Variable::missing(&ty)
            });
        }

        if ty.is_class() {
            self.load_object(element, &ty).map(Variable::object)
        } else {
            ty.create_from_string(element.text().unwrap_or_default())
        }
    }

    fn load_object(&mut self, element: &XmlElement, class: &TypeRef) -> Result<ObjectRef> {
        let object = class.create_instance()?;
        if let Some(id) = element.attribute(ID_ATTRIBUTE) {
            if self.shared.insert(id.to_string(), object.clone()).is_some() {
                return Err(Error::MalformedXml(format!("duplicate object id '{}'", id)));
            }
        }

        let layout = class.member_variables();
        let children = element.children();
        for (index, member) in layout.iter().enumerate() {
            let child = children.get(index).ok_or_else(|| {
                log::error!(
                    "[xml] missing element for '{}' in '{}'",
                    member.name,
                    class.name()
                );
                Error::MissingElement {
                    class: class.name().to_string(),
                    member: member.name.clone(),
                }
            })?;
            if self.options.check_member_names {
                if let Some(name) = child.attribute(NAME_ATTRIBUTE) {
                    if name != member.name {
                        return Err(Error::MalformedXml(format!(
                            "member {} of '{}' is '{}', found '{}'",
                            index,
                            class.name(),
                            member.name,
                            name
                        )));
                    }
                }
            }
            let value = self.load_variable(child)?;
            object.set(index, value)?;
        }

        if children.len() > layout.len() {
            log::warn!(
                "[xml] ignoring {} extra element(s) in '{}'",
                children.len() - layout.len(),
                class.name()
            );
        }
        Ok(object)
    }
}
