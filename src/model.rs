//! Data model for extracted component documentation: format-agnostic.

use indexmap::IndexMap;
use serde::Serialize;

/// Tag key → tag value, in the order the tags were first seen.
pub type TagMap = IndexMap<String, String>;

/// Prop name → prop record, in declaration order.
pub type Props = IndexMap<String, PropItem>;

/// One documentation tag as reported by the host, before canonicalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawTag {
    pub name: String,
    /// Text parts in source order. Joined without separators.
    pub fragments: Vec<String>,
}

impl RawTag {
    pub fn new(name: impl Into<String>, fragments: Vec<String>) -> Self {
        Self {
            name: name.into(),
            fragments,
        }
    }
}

/// Description plus tags of one symbol after reassembly.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JsDoc {
    pub description: String,
    pub tags: TagMap,
}

/// Documentation record for one exported props declaration.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDoc {
    pub export_name: String,
    pub description: String,
    pub tags: TagMap,
    pub props: Props,
    pub methods: Vec<Method>,
    /// Byte span of the declaration in its source file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block: Option<(usize, usize)>,
    /// Modification time of the source file, milliseconds since the Unix
    /// epoch.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mtime: Option<u64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PropItem {
    pub name: String,
    pub required: bool,
    #[serde(rename = "type")]
    pub ty: PropItemType,
    pub description: String,
    pub default_value: Option<DefaultValue>,
    pub tags: TagMap,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DefaultValue {
    pub value: String,
}

/// Type descriptor of a prop: a rendered type string, or an `enum` with the
/// literal members spelled out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PropItemType {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Vec<EnumValue>>,
}

impl PropItemType {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw: None,
            value: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnumValue {
    pub value: String,
}

/// Component identity handed to prop filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    pub name: String,
}

/// Method documentation. Part of the output shape; props declarations never
/// carry methods, so the list stays empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Method {
    pub name: String,
    pub docblock: String,
    pub modifiers: Vec<String>,
    pub params: Vec<MethodParameter>,
    pub returns: Option<MethodReturn>,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodParameter {
    pub name: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: MethodParameterType,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodParameterType {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MethodReturn {
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub ty: Option<String>,
}
