//! JSON:API document assembly
//!
//! Converts flat, schema-described records (as a data store produces them)
//! into JSON:API documents: typed identities, attributes, navigable links,
//! and named relationships resolved against a side-loaded pool of records,
//! including indirect through-table associations.
//!
//! # Example
//!
//! ```
//! use jsonapi_schema::{DocumentOptions, Parser, Schema, SchemaRegistry};
//! use serde_json::json;
//!
//! let mut registry = SchemaRegistry::new();
//! registry.insert(
//!     "books",
//!     serde_json::from_value::<Schema>(json!({
//!         "title": "string",
//!         "author": { "relationship": "belongsTo", "type": "authors" }
//!     }))
//!     .unwrap(),
//! );
//! registry.insert("authors", Schema::default());
//!
//! let parser = Parser::new(registry, "/api").unwrap();
//! let books = parser.for_type("books").unwrap();
//! let document = books
//!     .to_document(
//!         &json!({ "id": 1, "title": "Dune", "author_id": 5 }),
//!         &DocumentOptions::new(),
//!     )
//!     .unwrap();
//!
//! let value = serde_json::to_value(&document).unwrap();
//! assert_eq!(value["links"]["self"], json!("/api/books"));
//! assert_eq!(value["data"]["links"]["self"], json!("/api/books/1"));
//! assert_eq!(
//!     value["data"]["relationships"]["author"]["data"],
//!     json!({ "type": "authors", "id": 5 })
//! );
//! ```
//!
//! # Schemas
//!
//! A schema maps field names to descriptors. Plain attributes pass through
//! untouched; relationship descriptors declare how linkage is resolved:
//!
//! ```json
//! {
//!     "title": "string",
//!     "author": { "relationship": "belongsTo", "type": "authors" },
//!     "genres": { "relationship": "hasMany", "type": "genres", "through": "book_genres" }
//! }
//! ```
//!
//! | Declaration | Linkage source |
//! |-------------|----------------|
//! | `belongsTo` | foreign-key attribute (`<field>_id` or `foreignKey`) |
//! | `hasMany` | included-pool entry for the related type |
//! | `hasMany` + `through` | pool entry for the type the join schema declares |
//!
//! A relationship that resolves to nothing is omitted from output; a pool
//! entry with zero records yields an explicit `"data": []`.

mod document;
mod error;
mod inflect;
mod loader;
mod parser;
mod relationships;
mod resource;
mod types;

pub use document::{
    Document, Linkage, PrimaryData, Relationship, RelationshipLinks, Resource, ResourceIdentifier,
    ResourceLinks,
};
pub use error::{AssembleError, LoadError};
pub use inflect::{dasherize, pluralize, singularize};
pub use loader::load_schemas;
pub use parser::{Parser, TypeParser};
pub use types::{
    DocumentOptions, FieldDescriptor, RelationKind, RelationshipDescriptor, Schema, SchemaRegistry,
};
