// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![no_main]

use libfuzzer_sys::fuzz_target;
use lbcpp_core::types::builtin;
use lbcpp_core::{TypeRegistry, XmlCodec};
use std::sync::OnceLock;

fn registry() -> &'static TypeRegistry {
    static REGISTRY: OnceLock<TypeRegistry> = OnceLock::new();
    REGISTRY.get_or_init(|| {
        let registry = TypeRegistry::with_builtins();
        if let Ok(node) = registry.declare_class("Node", "Object") {
            let _ = node.add_member_variable("value", builtin::double_type());
            let _ = node.add_member_variable("next", node.type_ref().clone());
        }
        registry
    })
}

fuzz_target!(|data: &[u8]| {
    if let Ok(xml) = std::str::from_utf8(data) {
        let codec = XmlCodec::new(registry());
        if let Ok(value) = codec.from_document_str(xml) {
            // Whatever loads must write back out.
            let _ = codec.to_document_string(&value);
            let _ = value.to_string();
        }
    }
});
