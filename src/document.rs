//! Output document model.
//!
//! Sparse identity, full resource, and document are three distinct types;
//! which fields appear in the serialized JSON is decided by construction,
//! not by conditional assignment.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// A sparse resource: type and id only. Used inside relationship linkage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceIdentifier {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
}

impl ResourceIdentifier {
    pub fn new(resource_type: impl Into<String>, id: Value) -> Self {
        Self {
            resource_type: resource_type.into(),
            id: Some(id),
        }
    }

    /// Builds an identifier from a record's `id` field. Returns `None` when
    /// the record is not an object; a record without an `id` key yields an
    /// id-less identifier.
    pub fn from_record(resource_type: &str, record: &Value) -> Option<Self> {
        let map = record.as_object()?;
        Some(Self {
            resource_type: resource_type.to_string(),
            id: map.get("id").cloned(),
        })
    }
}

/// Links attached to a resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceLinks {
    #[serde(rename = "self")]
    pub self_link: String,
}

/// Links attached to a relationship.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RelationshipLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub related: String,
}

/// Linkage of one relationship.
///
/// `Absent` means no pool entry / no usable foreign key: the relationship is
/// omitted from output entirely. `Many(vec![])` means a pool entry exists but
/// holds no records: the relationship serializes with `"data": []`.
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
#[serde(untagged)]
pub enum Linkage {
    #[default]
    Absent,
    One(ResourceIdentifier),
    Many(Vec<ResourceIdentifier>),
}

impl Linkage {
    pub fn is_absent(&self) -> bool {
        matches!(self, Linkage::Absent)
    }
}

/// One named relationship on a resource.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Relationship {
    #[serde(skip_serializing_if = "Linkage::is_absent")]
    pub data: Linkage,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<RelationshipLinks>,
}

/// A full resource: identity, attributes, self link, relationships.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Resource {
    #[serde(rename = "type")]
    pub resource_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<ResourceLinks>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attributes: Option<Map<String, Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relationships: Option<BTreeMap<String, Relationship>>,
}

/// Primary data: mirrors the shape of the caller's input. A single record
/// serializes as an object (or `null`), an array as an array, even at
/// length 1.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PrimaryData {
    One(Option<Resource>),
    Many(Vec<Resource>),
}

/// A complete response document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub links: Map<String, Value>,
    pub data: PrimaryData,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included: Option<Vec<Resource>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Value>,
}

/// Joins URL path segments with single slashes, skipping empty segments.
/// A leading slash on the first segment is preserved.
pub(crate) fn join_path(segments: &[&str]) -> String {
    let mut out = String::new();
    for segment in segments {
        if segment.is_empty() {
            continue;
        }
        if out.is_empty() {
            out.push_str(segment.trim_end_matches('/'));
        } else {
            out.push('/');
            out.push_str(segment.trim_matches('/'));
        }
    }
    out
}

/// Renders an id value as a URL path segment.
pub(crate) fn id_segment(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
