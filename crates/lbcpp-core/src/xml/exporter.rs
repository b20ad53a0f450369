// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Value graph to XML.

use super::element::{is_xml_char, XmlElement};
use super::escape_type_name;
use crate::config::{
    CodecOptions, ID_ATTRIBUTE, MISSING_ATTRIBUTE, NAME_ATTRIBUTE, REF_ATTRIBUTE, TYPE_ATTRIBUTE,
    VARIABLE_TAG,
};
use crate::error::{Error, Result};
use crate::object::ObjectRef;
use crate::types::{builtin, TypeRef};
use crate::value::Variable;
use std::collections::HashMap;
use std::sync::Arc;

/// Single-use writer for one value graph.
///
/// With object sharing enabled, a first pass counts how often each object is
/// reached; objects reached more than once get an `id` on first write and a
/// `ref` afterwards.
pub(crate) struct XmlExporter<'o> {
    options: &'o CodecOptions,
    reference_counts: HashMap<usize, usize>,
    identifiers: HashMap<usize, String>,
    identifier_counters: HashMap<String, usize>,
    in_progress: Vec<usize>,
}

/// Reject text that XML 1.0 cannot carry.
fn check_representable(type_name: &str, text: &str) -> Result<()> {
    match text.chars().find(|c| !is_xml_char(*c)) {
        None => Ok(()),
        Some(c) => {
            log::error!(
                "[xml] {} value holds U+{:04X}, which XML cannot represent",
                type_name,
                u32::from(c)
            );
            Err(Error::InvalidValue {
                type_name: type_name.to_string(),
                value: text.to_string(),
            })
        }
    }
}

fn object_key(object: &ObjectRef) -> usize {
    Arc::as_ptr(object) as usize
}

impl<'o> XmlExporter<'o> {
    pub(crate) fn new(options: &'o CodecOptions) -> Self {
        Self {
            options,
            reference_counts: HashMap::new(),
            identifiers: HashMap::new(),
            identifier_counters: HashMap::new(),
            in_progress: Vec::new(),
        }
    }

    pub(crate) fn export(mut self, value: &Variable) -> Result<XmlElement> {
        if self.options.share_objects {
            self.count_references(value);
        }
        self.write_variable(value, None)
    }

    fn count_references(&mut self, root: &Variable) {
        let mut pending = vec![root.clone()];
        while let Some(value) = pending.pop() {
            if let Some(object) = value.as_object() {
                let count = self.reference_counts.entry(object_key(object)).or_insert(0);
                *count += 1;
                if *count == 1 {
                    pending.extend(object.variables());
                }
            }
        }
    }

    fn make_identifier(&mut self, class_name: &str) -> String {
        let counter = self
            .identifier_counters
            .entry(class_name.to_string())
            .or_insert(0);
        *counter += 1;
        format!("{}{}", escape_type_name(class_name), counter)
    }

    fn write_variable(&mut self, value: &Variable, name: Option<&str>) -> Result<XmlElement> {
        let mut element = XmlElement::new(VARIABLE_TAG);
        if let Some(name) = name {
            check_representable("member name", name)?;
            element.set_attribute(NAME_ATTRIBUTE, name);
        }

        let Some(ty) = value.type_ref() else {
            element.set_attribute(TYPE_ATTRIBUTE, builtin::TOP_TYPE_NAME);
            element.set_attribute(MISSING_ATTRIBUTE, "true");
            return Ok(element);
        };
        if value.is_missing() {
            element.set_attribute(TYPE_ATTRIBUTE, escape_type_name(ty.name()));
            element.set_attribute(MISSING_ATTRIBUTE, "true");
            return Ok(element);
        }

        match value.as_object() {
            Some(object) => {
                element.set_attribute(TYPE_ATTRIBUTE, escape_type_name(object.class_name()));
                self.write_object(element, object)
            }
            None => {
                let text = ty.format_payload(value.payload());
                check_representable(ty.name(), &text)?;
                element.set_attribute(TYPE_ATTRIBUTE, escape_type_name(ty.name()));
                element.set_text(text);
                Ok(element)
            }
        }
    }

    fn write_object(&mut self, mut element: XmlElement, object: &ObjectRef) -> Result<XmlElement> {
        let key = object_key(object);
        let shared = self.options.share_objects
            && self.reference_counts.get(&key).copied().unwrap_or(0) > 1;

        if shared {
            if let Some(id) = self.identifiers.get(&key) {
                element.set_attribute(REF_ATTRIBUTE, id.clone());
                return Ok(element);
            }
            let id = self.make_identifier(object.class_name());
            element.set_attribute(ID_ATTRIBUTE, id.clone());
            self.identifiers.insert(key, id);
        } else if self.in_progress.contains(&key) {
            log::error!(
                "[xml] cycle through '{}' while object sharing is disabled",
                object.class_name()
            );
            return Err(Error::CyclicReference(object.class_name().to_string()));
        }

        self.in_progress.push(key);
        let values = object.variables();
        let result = self.write_members(&mut element, object.class(), &values);
        self.in_progress.pop();
        result?;
        Ok(element)
    }

    /// Base members first, then the members `class` declares itself.
    fn write_members(
        &mut self,
        element: &mut XmlElement,
        class: &TypeRef,
        values: &[Variable],
    ) -> Result<()> {
        if let Some(base) = class.base().filter(|b| b.is_class()) {
            self.write_members(element, base, values)?;
        }
        let offset = class.total_member_variable_count() - class.own_member_variable_count();
        for (i, member) in class.own_member_variables().iter().enumerate() {
            let value = values.get(offset + i).ok_or(Error::IndexOutOfRange {
                index: offset + i,
                length: values.len(),
            })?;
            element.add_child(self.write_variable(value, Some(&member.name))?);
        }
        Ok(())
    }
}
