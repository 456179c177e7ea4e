//! Relationship resolution.
//!
//! Walks a schema's relationship declarations and resolves each into linkage:
//! `belongsTo` reads a foreign key from the parent's attributes, `hasMany`
//! draws identities from the included pool, optionally indirected through a
//! join schema. Relationships that resolve to nothing are omitted, not
//! emitted as empty stubs.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

use crate::document::{
    id_segment, join_path, Linkage, Relationship, RelationshipLinks, Resource,
    ResourceIdentifier,
};
use crate::error::AssembleError;
use crate::inflect::singularize;
use crate::types::{FieldDescriptor, RelationKind, RelationshipDescriptor, SchemaRegistry};

/// Resolves the relationships of `resource` and merges them onto it.
///
/// `defaults` is applied to the resource's attributes first: a default
/// replaces an attribute whose current value is truthy, and the replacement
/// is visible both to foreign-key lookup and in the emitted attributes.
///
/// # Errors
///
/// `UnknownType` when `type_name` or a `through` schema is not registered;
/// `MissingThroughProperty` / `InvalidThroughType` for malformed through
/// declarations.
pub(crate) fn resolve_relationships(
    type_name: &str,
    resource: &mut Resource,
    included: Option<&Map<String, Value>>,
    registry: &SchemaRegistry,
    base_url: &str,
    defaults: &Map<String, Value>,
) -> Result<(), AssembleError> {
    let schema = registry
        .get(type_name)
        .ok_or_else(|| AssembleError::UnknownType {
            type_name: type_name.to_string(),
        })?;

    apply_defaults(resource, defaults);

    let mut relationships = BTreeMap::new();
    for (field, descriptor) in schema.relationships() {
        let data = match descriptor.relationship {
            RelationKind::BelongsTo => resolve_belongs_to(field, descriptor, resource),
            RelationKind::HasMany => {
                resolve_has_many(type_name, field, descriptor, included, registry)?
            }
        };
        if data.is_absent() {
            continue;
        }
        let links = resource
            .id
            .as_ref()
            .map(|id| relationship_links(base_url, type_name, id, field));
        relationships.insert(field.to_string(), Relationship { data, links });
    }

    if !relationships.is_empty() {
        resource.relationships = Some(relationships);
    }
    Ok(())
}

/// Overwrites truthy attributes with their configured defaults.
fn apply_defaults(resource: &mut Resource, defaults: &Map<String, Value>) {
    let Some(attributes) = resource.attributes.as_mut() else {
        return;
    };
    for (key, value) in defaults {
        if attributes.get(key).is_some_and(is_truthy) {
            attributes.insert(key.clone(), value.clone());
        }
    }
}

/// Resolves a belongsTo declaration against the parent's attributes.
///
/// The foreign key defaults to `<field>_id`. A falsy value (null, false, 0,
/// empty string) or a missing key yields no linkage.
fn resolve_belongs_to(
    field: &str,
    descriptor: &RelationshipDescriptor,
    resource: &Resource,
) -> Linkage {
    let id_key = descriptor
        .foreign_key
        .clone()
        .unwrap_or_else(|| format!("{field}_id"));
    let value = resource
        .attributes
        .as_ref()
        .and_then(|attributes| attributes.get(&id_key));
    match value {
        Some(id) if is_truthy(id) => Linkage::One(ResourceIdentifier::new(
            descriptor.related_type.clone(),
            id.clone(),
        )),
        _ => Linkage::Absent,
    }
}

/// Resolves a hasMany declaration against the included pool.
///
/// With `through`, the join schema's own descriptor (keyed by `foreignKey`
/// or the singularized field name) supplies the type looked up in the pool;
/// linkage identities still carry the declaring descriptor's type. A pool
/// entry with no records yields an empty linkage array; no pool entry at all
/// yields `Absent`.
fn resolve_has_many(
    parent_type: &str,
    field: &str,
    descriptor: &RelationshipDescriptor,
    included: Option<&Map<String, Value>>,
    registry: &SchemaRegistry,
) -> Result<Linkage, AssembleError> {
    let Some(pool) = included else {
        return Ok(Linkage::Absent);
    };

    let pool_type = match &descriptor.through {
        Some(through) => through_type(parent_type, field, descriptor, through, registry)?,
        None => descriptor.related_type.clone(),
    };

    let Some(entry) = pool.get(&pool_type) else {
        return Ok(Linkage::Absent);
    };

    let records: Vec<&Value> = match entry {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        one => vec![one],
    };

    Ok(Linkage::Many(
        records
            .into_iter()
            .filter_map(|record| ResourceIdentifier::from_record(&descriptor.related_type, record))
            .collect(),
    ))
}

/// Looks up the actual pool type of a through relationship.
fn through_type(
    parent_type: &str,
    field: &str,
    descriptor: &RelationshipDescriptor,
    through: &str,
    registry: &SchemaRegistry,
) -> Result<String, AssembleError> {
    let through_schema = registry
        .get(through)
        .ok_or_else(|| AssembleError::UnknownType {
            type_name: through.to_string(),
        })?;
    let key = descriptor
        .foreign_key
        .clone()
        .unwrap_or_else(|| singularize(field));
    match through_schema.get(&key) {
        None => Err(AssembleError::MissingThroughProperty {
            parent: parent_type.to_string(),
            field: field.to_string(),
            through: through.to_string(),
            key,
        }),
        Some(FieldDescriptor::Attribute(_)) => Err(AssembleError::InvalidThroughType {
            parent: parent_type.to_string(),
            field: field.to_string(),
            through: through.to_string(),
            key,
        }),
        Some(FieldDescriptor::Relationship(join)) => Ok(join.related_type.clone()),
    }
}

fn relationship_links(
    base_url: &str,
    parent_type: &str,
    parent_id: &Value,
    field: &str,
) -> RelationshipLinks {
    let id = id_segment(parent_id);
    RelationshipLinks {
        self_link: join_path(&[base_url, parent_type, &id, "relationships", field]),
        related: join_path(&[base_url, parent_type, &id, field]),
    }
}

/// JavaScript truthiness for foreign-key values: null, false, 0, and the
/// empty string are absent; everything else links.
fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
