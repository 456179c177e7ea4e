//! Document assembly.
//!
//! `Parser` holds the schema registry and base URL for one endpoint;
//! `TypeParser` is the per-type handle that turns records into documents.

use serde_json::{Map, Value};

use crate::document::{join_path, Document, PrimaryData, Resource};
use crate::error::AssembleError;
use crate::relationships::resolve_relationships;
use crate::resource::format_resource;
use crate::types::{DocumentOptions, SchemaRegistry};

/// Assembles documents from flat records, one schema registry and base URL
/// per instance.
///
/// The registry is moved in and normalized once at construction: every
/// relationship descriptor's type name is dasherized up front, so resolution
/// never mutates schema state. The base URL is immutable for the lifetime of
/// the parser; pass an empty string for relative links.
#[derive(Debug, Clone)]
pub struct Parser {
    registry: SchemaRegistry,
    base_url: String,
}

impl Parser {
    /// Creates a parser over a schema registry.
    ///
    /// # Errors
    ///
    /// Returns `AssembleError::EmptyRegistry` when no schemas are registered.
    pub fn new(registry: SchemaRegistry, base_url: impl Into<String>) -> Result<Self, AssembleError> {
        if registry.is_empty() {
            return Err(AssembleError::EmptyRegistry);
        }
        let mut registry = registry;
        registry.dasherize_relationship_types();
        Ok(Self {
            registry,
            base_url: base_url.into(),
        })
    }

    /// Returns the per-type handle for `type_name`.
    ///
    /// # Errors
    ///
    /// Returns `AssembleError::UnknownType` when the type is not registered.
    pub fn for_type(&self, type_name: &str) -> Result<TypeParser<'_>, AssembleError> {
        if !self.registry.contains(type_name) {
            return Err(AssembleError::UnknownType {
                type_name: type_name.to_string(),
            });
        }
        Ok(TypeParser {
            parser: self,
            type_name: type_name.to_string(),
        })
    }

    pub fn registry(&self) -> &SchemaRegistry {
        &self.registry
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

/// Assembles documents whose primary data is one registered type.
#[derive(Debug, Clone)]
pub struct TypeParser<'a> {
    parser: &'a Parser,
    type_name: String,
}

impl TypeParser<'_> {
    /// Assembles a complete document from primary data and options.
    ///
    /// `data` is one flat record or an array of them; the output `data`
    /// mirrors that shape. Every record in the included pool is formatted as
    /// a full resource and flattened into `included`, pool key order first,
    /// record order within each entry.
    ///
    /// # Errors
    ///
    /// `UnknownType` when an included pool key has no registered schema, and
    /// any error of relationship resolution.
    pub fn to_document(
        &self,
        data: &Value,
        options: &DocumentOptions,
    ) -> Result<Document, AssembleError> {
        let base_url = &self.parser.base_url;

        let mut links = options.links.clone();
        let self_value = links
            .get("self")
            .and_then(Value::as_str)
            .unwrap_or(&self.type_name)
            .to_string();
        links.insert(
            "self".to_string(),
            Value::String(join_path(&[base_url, &self_value])),
        );
        if let Some(related) = links.get("related").and_then(Value::as_str) {
            let joined = join_path(&[base_url, related]);
            links.insert("related".to_string(), Value::String(joined));
        }

        let data = match data {
            Value::Array(records) => {
                let mut resources = Vec::with_capacity(records.len());
                for record in records {
                    if let Some(resource) = self.build_resource(&self.type_name, record, options)? {
                        resources.push(resource);
                    }
                }
                PrimaryData::Many(resources)
            }
            one => PrimaryData::One(self.build_resource(&self.type_name, one, options)?),
        };

        let included = match &options.included {
            None => None,
            Some(pool) => {
                let mut resources = Vec::new();
                for (pool_type, entry) in pool {
                    if !self.parser.registry.contains(pool_type) {
                        return Err(AssembleError::UnknownType {
                            type_name: pool_type.clone(),
                        });
                    }
                    for record in pool_records(entry) {
                        if let Some(resource) = self.build_resource(pool_type, record, options)? {
                            resources.push(resource);
                        }
                    }
                }
                Some(resources)
            }
        };

        Ok(Document {
            links,
            data,
            included,
            meta: options.meta.clone(),
        })
    }

    /// Formats one record and resolves its relationships.
    fn build_resource(
        &self,
        type_name: &str,
        record: &Value,
        options: &DocumentOptions,
    ) -> Result<Option<Resource>, AssembleError> {
        let Some(mut resource) = format_resource(type_name, record, &self.parser.base_url) else {
            return Ok(None);
        };
        resolve_relationships(
            type_name,
            &mut resource,
            options.included.as_ref(),
            &self.parser.registry,
            &self.parser.base_url,
            &options.defaults,
        )?;
        Ok(Some(resource))
    }
}

/// Normalizes a pool entry to its records: one object, an array, or nothing.
fn pool_records(entry: &Value) -> impl Iterator<Item = &Value> {
    let records: Vec<&Value> = match entry {
        Value::Array(items) => items.iter().collect(),
        Value::Null => Vec::new(),
        one => vec![one],
    };
    records.into_iter()
}
