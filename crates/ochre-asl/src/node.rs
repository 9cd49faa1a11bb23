/*
 * Copyright (c) 2026.
 *
 * This software is free software;
 *
 * You can redistribute it or modify it under terms of the MIT, Apache License or Zlib license
 */

//! The decoded tree representation
//!
//! An ASL stream decodes into a recursive tree of [`AslNode`] values,
//! each node pairing the key it was stored under with a typed payload.
//!
//! Numeric and boolean payloads are stored as canonical text, the form
//! the catalog sink emits them in, so a tree can be rendered without a
//! second conversion pass.

/// A single node in the decoded tree
///
/// `key` is the name the parent descriptor stored this value under,
/// it is empty for list elements and for the top-level style
/// descriptors.
#[derive(Clone, Debug, PartialEq)]
pub struct AslNode {
    pub key:   String,
    pub value: AslValue
}

/// The payload of one tree node
#[derive(Clone, Debug, PartialEq)]
pub enum AslValue {
    /// A keyed container with a display name and a class id
    Descriptor {
        name:     String,
        class_id: String,
        children: Vec<AslNode>
    },
    /// An ordered container of un-keyed children
    List(Vec<AslNode>),
    /// 32-bit integer, canonical decimal text
    Integer(String),
    /// 64-bit float, shortest round-trip decimal text
    Double(String),
    /// 64-bit float tagged with a 4-byte unit
    UnitFloat { unit: String, value: String },
    Text(String),
    /// `"0"` or `"1"`
    Boolean(String),
    Enum { type_id: String, value: String },
    /// Base64 text of the compressed serialized pattern raster
    PatternBlob(String)
}

impl AslNode {
    pub fn new<K: Into<String>>(key: K, value: AslValue) -> AslNode {
        AslNode {
            key: key.into(),
            value
        }
    }

    /// Return the child nodes of a container payload, or an empty
    /// slice for leaves
    pub fn children(&self) -> &[AslNode] {
        match &self.value {
            AslValue::Descriptor { children, .. } => children,
            AslValue::List(children) => children,
            _ => &[]
        }
    }

    /// Find the first direct child stored under `key`
    pub fn find(&self, key: &str) -> Option<&AslNode> {
        self.children().iter().find(|c| c.key == key)
    }
}

impl AslValue {
    /// The catalog name for this payload kind
    pub const fn kind_name(&self) -> &'static str {
        match self {
            AslValue::Descriptor { .. } => "Descriptor",
            AslValue::List(_) => "List",
            AslValue::Integer(_) => "Integer",
            AslValue::Double(_) => "Double",
            AslValue::UnitFloat { .. } => "UnitFloat",
            AslValue::Text(_) => "Text",
            AslValue::Boolean(_) => "Boolean",
            AslValue::Enum { .. } => "Enum",
            AslValue::PatternBlob(_) => "OchrePatternData"
        }
    }
}
