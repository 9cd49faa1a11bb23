/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! XML catalog rendering
//!
//! The decoded tree serializes into a catalog of `<node>` elements
//! under an `<asl>` root. Every node carries its payload kind in a
//! `type` attribute, leaf payloads travel in a `value` attribute and
//! pattern blobs as CDATA, so the catalog stays greppable while the
//! raster bytes stay opaque.

use crate::node::{AslNode, AslValue};

fn escape_attr(value: &str, out: &mut String) {
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            // escaped so they survive attribute round-trips
            '\t' => out.push_str("&#9;"),
            '\n' => out.push_str("&#10;"),
            '\r' => out.push_str("&#13;"),
            _ => out.push(ch)
        }
    }
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    escape_attr(value, out);
    out.push('"');
}

fn push_indent(out: &mut String, depth: usize) {
    for _ in 0..depth {
        out.push(' ');
    }
}

fn write_node(node: &AslNode, depth: usize, out: &mut String) {
    push_indent(out, depth);
    out.push_str("<node");

    if !node.key.is_empty() {
        push_attr(out, "key", &node.key);
    }
    push_attr(out, "type", node.value.kind_name());

    match &node.value {
        AslValue::Descriptor {
            name,
            class_id,
            children
        } => {
            push_attr(out, "classId", class_id);
            push_attr(out, "name", name);
            write_children(children, depth, out);
        }
        AslValue::List(children) => {
            write_children(children, depth, out);
        }
        AslValue::Integer(value)
        | AslValue::Double(value)
        | AslValue::Text(value)
        | AslValue::Boolean(value) => {
            push_attr(out, "value", value);
            out.push_str("/>\n");
        }
        AslValue::UnitFloat { unit, value } => {
            push_attr(out, "value", value);
            push_attr(out, "unit", unit);
            out.push_str("/>\n");
        }
        AslValue::Enum { type_id, value } => {
            push_attr(out, "value", value);
            push_attr(out, "typeId", type_id);
            out.push_str("/>\n");
        }
        AslValue::PatternBlob(data) => {
            // base64 text, never contains "]]>"
            out.push_str("><![CDATA[");
            out.push_str(data);
            out.push_str("]]></node>\n");
        }
    }
}

fn write_children(children: &[AslNode], depth: usize, out: &mut String) {
    if children.is_empty() {
        out.push_str("/>\n");
        return;
    }
    out.push_str(">\n");

    for child in children {
        write_node(child, depth + 1, out);
    }
    push_indent(out, depth);
    out.push_str("</node>\n");
}

/// Render a decoded tree as its XML catalog
///
/// `root` is the node a decode produced; its children become `<node>`
/// elements inside the `<asl>` document element.
pub fn to_xml(root: &AslNode) -> String {
    let mut out = String::with_capacity(1024);

    out.push_str("<asl>\n");
    for child in root.children() {
        write_node(child, 1, &mut out);
    }
    out.push_str("</asl>\n");
    out
}
