//! Core types: the schema data model and document options.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::inflect::dasherize;

/// Kind of association a relationship descriptor declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
pub enum RelationKind {
    #[serde(rename = "belongsTo")]
    BelongsTo,
    #[serde(rename = "hasMany")]
    HasMany,
}

/// A relationship declaration inside a schema.
///
/// `related_type` is the related resource's type name as declared; the parser
/// dasherizes it once at construction so output identity types are always in
/// dashed form. `through` names another schema that mediates a many-to-many
/// association; that schema's own descriptor supplies the actual pool type.
#[derive(Debug, Clone, Deserialize)]
pub struct RelationshipDescriptor {
    pub relationship: RelationKind,
    #[serde(rename = "type")]
    pub related_type: String,
    /// Overrides the default foreign-key name (`<field>_id` for belongsTo,
    /// the singularized field name for through lookups).
    #[serde(rename = "foreignKey", default)]
    pub foreign_key: Option<String>,
    #[serde(default)]
    pub through: Option<String>,
}

/// One field of a schema: either a relationship declaration or a plain
/// attribute descriptor (whose value this crate never interprets).
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum FieldDescriptor {
    Relationship(RelationshipDescriptor),
    Attribute(Value),
}

impl FieldDescriptor {
    /// Returns the relationship descriptor, if this field declares one.
    pub fn as_relationship(&self) -> Option<&RelationshipDescriptor> {
        match self {
            FieldDescriptor::Relationship(descriptor) => Some(descriptor),
            FieldDescriptor::Attribute(_) => None,
        }
    }
}

/// A schema: field name mapped to its descriptor.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: BTreeMap<String, FieldDescriptor>,
}

impl Schema {
    pub fn get(&self, field: &str) -> Option<&FieldDescriptor> {
        self.fields.get(field)
    }

    /// Iterates the relationship declarations of this schema.
    pub fn relationships(&self) -> impl Iterator<Item = (&str, &RelationshipDescriptor)> {
        self.fields
            .iter()
            .filter_map(|(name, field)| Some((name.as_str(), field.as_relationship()?)))
    }

    fn dasherize_relationship_types(&mut self) {
        for field in self.fields.values_mut() {
            if let FieldDescriptor::Relationship(descriptor) = field {
                descriptor.related_type = dasherize(&descriptor.related_type);
            }
        }
    }
}

/// Read-only mapping from type name to schema, supplied once at parser
/// construction.
#[derive(Debug, Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Schema>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, type_name: impl Into<String>, schema: Schema) {
        self.schemas.insert(type_name.into(), schema);
    }

    pub fn get(&self, type_name: &str) -> Option<&Schema> {
        self.schemas.get(type_name)
    }

    pub fn contains(&self, type_name: &str) -> bool {
        self.schemas.contains_key(type_name)
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    /// Iterates registered type names and schemas, in type-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Schema)> {
        self.schemas.iter().map(|(name, schema)| (name.as_str(), schema))
    }

    /// Dasherizes every relationship descriptor's type name in place.
    /// Called once when a parser takes ownership of the registry.
    pub(crate) fn dasherize_relationship_types(&mut self) {
        for schema in self.schemas.values_mut() {
            schema.dasherize_relationship_types();
        }
    }
}

/// Auxiliary inputs for one document assembly.
///
/// Mirrors the `info` argument of the serializer: an included pool of
/// side-loaded records, extra links, a meta object, and default attribute
/// values applied before foreign-key resolution.
#[derive(Debug, Clone, Default)]
pub struct DocumentOptions {
    /// Side-loaded records, keyed by type name. Each entry is one record or
    /// an ordered array of records; entry order is preserved in `included`.
    pub included: Option<Map<String, Value>>,
    /// Caller-supplied links. `self` and `related` are joined onto the base
    /// URL; any other keys pass through unchanged.
    pub links: Map<String, Value>,
    /// Attached to the document verbatim.
    pub meta: Option<Value>,
    /// Attribute overrides applied to each resource before foreign-key
    /// lookup. A default only replaces an attribute whose current value is
    /// truthy.
    pub defaults: Map<String, Value>,
}

impl DocumentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the included pool.
    pub fn included(mut self, pool: Map<String, Value>) -> Self {
        self.included = Some(pool);
        self
    }

    /// Adds one caller link.
    pub fn link(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.links.insert(name.into(), value.into());
        self
    }

    /// Sets the meta object.
    pub fn meta(mut self, meta: Value) -> Self {
        self.meta = Some(meta);
        self
    }

    /// Sets the attribute defaults.
    pub fn defaults(mut self, defaults: Map<String, Value>) -> Self {
        self.defaults = defaults;
        self
    }
}
