// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

#![allow(clippy::uninlined_format_args)] // Test/bench code readability over pedantic
#![allow(clippy::cast_precision_loss)] // Test data conversions
#![allow(clippy::cast_sign_loss)] // Test data conversions
#![allow(clippy::cast_possible_truncation)] // Test parameters
#![allow(clippy::float_cmp)] // Test assertions with constants
#![allow(clippy::unreadable_literal)] // Large test constants
#![allow(clippy::missing_panics_doc)] // Tests panic on failure
#![allow(clippy::too_many_lines)] // Test code
#![allow(clippy::redundant_closure_for_method_calls)] // Test code clarity
#![allow(clippy::similar_names)] // Test variable naming
#![allow(clippy::cast_possible_wrap)] // Test conversions

//! End-to-end scenario: declare types, fill an instance, write and read a
//! document, with registries on both sides.

use lbcpp_core::types::builtin;
use lbcpp_core::{
    CodecOptions, EnumerationBuilder, Error, ObjectRef, TypeRegistry, Variable, XmlCodec,
};

fn point_registry() -> TypeRegistry {
    let registry = TypeRegistry::with_builtins();
    let color = EnumerationBuilder::new("Color")
        .element("Red")
        .element("Green")
        .element("Blue")
        .build()
        .expect("enumeration");
    registry.register(color).expect("register Color");

    let point = registry.declare_class("Point", "Object").expect("declare");
    let double = registry.lookup("Double").expect("Double");
    point
        .add_member_variable("x", double.clone())
        .expect("add x");
    point.add_member_variable("y", double).expect("add y");
    point
        .add_member_variable("color", registry.lookup("Color").expect("Color"))
        .expect("add color");
    registry
}

const POINT_DOCUMENT: &str = concat!(
    r#"<?xml version="1.0" encoding="UTF-8"?>"#,
    r#"<lbcpp version="1">"#,
    r#"<variable type="Point">"#,
    r#"<variable name="x" type="Double">3.5</variable>"#,
    r#"<variable name="y" type="Double" missing="true"/>"#,
    r#"<variable name="color" type="Color">Green</variable>"#,
    r#"</variable>"#,
    r#"</lbcpp>"#,
);

#[test]
fn test_point_document_layout() {
    let registry = point_registry();
    let p = registry.create_instance("Point").expect("instance");
    p.set_by_name("x", 3.5).expect("set x");
    p.set_from_string("color", "Green").expect("set color");

    let codec = XmlCodec::with_options(&registry, CodecOptions::default().with_indent(0));
    let text = codec
        .to_document_string(&Variable::object(p))
        .expect("document");
    assert_eq!(text, POINT_DOCUMENT);
}

#[test]
fn test_point_document_loads_in_fresh_registry() {
    let registry = point_registry();
    let value = XmlCodec::new(&registry)
        .from_document_str(POINT_DOCUMENT)
        .expect("load");
    let p = value.as_object().expect("object");

    assert_eq!(p.class_name(), "Point");
    assert_eq!(p.get_as::<f64>("x").expect("x"), 3.5);
    assert!(p.get_by_name("y").expect("y").is_missing());
    assert_eq!(
        p.get_by_name("color").expect("color").enumeration_index_value(),
        Some(1)
    );
    assert_eq!(p.to_string(), "Point{x = 3.5, y = missing, color = Green}");
}

/// Point with exactly two members, an abscissa and a color.
fn colored_point_registry() -> TypeRegistry {
    let registry = TypeRegistry::with_builtins();
    let color = EnumerationBuilder::new("Color")
        .element("Red")
        .element("Green")
        .element("Blue")
        .build()
        .expect("enumeration");
    registry.register(color).expect("register Color");

    let point = registry.declare_class("Point", "Object").expect("declare");
    point
        .add_member_variable("x", registry.lookup("Double").expect("Double"))
        .expect("add x");
    point
        .add_member_variable("color", registry.lookup("Color").expect("Color"))
        .expect("add color");
    registry
}

#[test]
fn test_two_member_point_document() {
    let registry = colored_point_registry();
    let p = registry.create_instance("Point").expect("instance");
    assert_eq!(p.num_member_variables(), 2);
    p.set_by_name("x", 3.5).expect("set x");
    p.set_from_string("color", "Green").expect("set color");

    let codec = XmlCodec::with_options(&registry, CodecOptions::default().with_indent(0));
    let text = codec
        .to_document_string(&Variable::object(p))
        .expect("document");
    let expected = concat!(
        r#"<?xml version="1.0" encoding="UTF-8"?>"#,
        r#"<lbcpp version="1">"#,
        r#"<variable type="Point">"#,
        r#"<variable name="x" type="Double">3.5</variable>"#,
        r#"<variable name="color" type="Color">Green</variable>"#,
        r#"</variable>"#,
        r#"</lbcpp>"#,
    );
    assert_eq!(text, expected);

    let reader = colored_point_registry();
    let loaded = XmlCodec::new(&reader)
        .from_document_str(&text)
        .expect("load");
    let q = loaded.as_object().expect("object");
    assert_eq!(q.class_name(), "Point");
    assert_eq!(q.get(0).expect("x").as_double(), Some(3.5));
    assert_eq!(q.get_by_name("color").expect("color").to_string(), "Green");
    let names: Vec<String> = (0..q.num_member_variables())
        .map(|i| q.member_name(i).expect("name"))
        .collect();
    assert_eq!(names, ["x", "color"]);
    assert_eq!(q.to_string(), "Point{x = 3.5, color = Green}");
}

#[test]
fn test_pretty_and_compact_documents_load_identically() {
    let registry = point_registry();
    let p = registry.create_instance("Point").expect("instance");
    p.set_by_name("x", -1.25).expect("set x");
    p.set_by_name("y", 1e-3).expect("set y");
    p.set_from_string("color", "blue").expect("case-insensitive name");

    let value = Variable::object(p.clone());
    let pretty = XmlCodec::new(&registry)
        .to_document_string(&value)
        .expect("pretty");
    let compact = XmlCodec::with_options(&registry, CodecOptions::default().with_indent(0))
        .to_document_string(&value)
        .expect("compact");
    assert!(pretty.lines().count() > 3);
    assert_eq!(compact.lines().count(), 1);

    let codec = XmlCodec::new(&registry);
    let a = codec.from_document_str(&pretty).expect("load pretty");
    let b = codec.from_document_str(&compact).expect("load compact");
    assert_eq!(a, b);
    assert_eq!(a, value);
}

#[test]
fn test_unknown_class_in_reader_registry() {
    let writer = point_registry();
    let p = writer.create_instance("Point").expect("instance");
    let text = XmlCodec::new(&writer)
        .to_document_string(&Variable::object(p))
        .expect("document");

    let reader = TypeRegistry::with_builtins();
    assert!(matches!(
        XmlCodec::new(&reader).from_document_str(&text),
        Err(Error::UnknownType(name)) if name == "Point"
    ));
}

#[test]
fn test_reader_layout_shorter_than_document() {
    // Extra trailing elements are ignored.
    let reader = TypeRegistry::with_builtins();
    let point = reader.declare_class("Point", "Object").expect("declare");
    point
        .add_member_variable("x", builtin::double_type())
        .expect("add x");

    let loaded = XmlCodec::new(&reader)
        .from_document_str(
            r#"<lbcpp version="1"><variable type="Point">
                 <variable name="x" type="Double">3.5</variable>
                 <variable name="y" type="Double" missing="true"/>
               </variable></lbcpp>"#,
        )
        .expect("load");
    let p: ObjectRef = loaded.get().expect("object");
    assert_eq!(p.num_member_variables(), 1);
    assert_eq!(p.get_as::<f64>("x").expect("x"), 3.5);
}

#[test]
fn test_malformed_documents() {
    let registry = point_registry();
    let codec = XmlCodec::new(&registry);

    for text in ["", "<lbcpp version=\"1\">"] {
        assert!(matches!(codec.from_document_str(text), Err(Error::Xml(_))));
    }
    for text in [
        "<lbcpp version=\"one\"><variable type=\"Double\">1</variable></lbcpp>",
        "<lbcpp version=\"1\"></lbcpp>",
        "<lbcpp version=\"1\"><variable ref=\"Point7\"/></lbcpp>",
    ] {
        assert!(
            matches!(codec.from_document_str(text), Err(Error::MalformedXml(_))),
            "expected MalformedXml for {:?}",
            text
        );
    }
}
