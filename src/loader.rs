//! Schema discovery from a directory tree.
//!
//! Two conventional locations are recognized anywhere under the root:
//! `schemas/<name>.json` and `<name>/schema.json`. Registry keys are the
//! pluralized file or folder name, so `schemas/author.json` registers
//! `authors`.

use std::path::Path;

use walkdir::WalkDir;

use crate::error::LoadError;
use crate::inflect::pluralize;
use crate::types::{Schema, SchemaRegistry};

/// Loads every schema file under `root` into a registry.
///
/// # Errors
///
/// Returns `LoadError::DirectoryNotFound` when `root` is not a directory,
/// `LoadError::ReadError` on unreadable entries, and
/// `LoadError::InvalidSchema` when a discovered file is not a valid schema.
pub fn load_schemas(root: &Path) -> Result<SchemaRegistry, LoadError> {
    if !root.is_dir() {
        return Err(LoadError::DirectoryNotFound {
            path: root.to_path_buf(),
        });
    }

    let mut registry = SchemaRegistry::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|source| {
            let path = source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| root.to_path_buf());
            LoadError::ReadError {
                path,
                source: source.into_io_error().unwrap_or_else(|| {
                    std::io::Error::new(std::io::ErrorKind::Other, "directory walk failed")
                }),
            }
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let Some(name) = schema_name(path) else {
            continue;
        };

        let content =
            std::fs::read_to_string(path).map_err(|source| LoadError::ReadError {
                path: path.to_path_buf(),
                source,
            })?;
        let schema: Schema =
            serde_json::from_str(&content).map_err(|source| LoadError::InvalidSchema {
                name: name.clone(),
                path: path.to_path_buf(),
                source,
            })?;
        registry.insert(pluralize(&name), schema);
    }

    Ok(registry)
}

/// Extracts the schema name from a conventional path, or `None` when the
/// file is not at one of the two recognized locations.
fn schema_name(path: &Path) -> Option<String> {
    let file = path.file_name()?.to_str()?;
    let parent = path.parent()?.file_name()?.to_str()?;

    if file == "schema.json" {
        return Some(parent.to_string());
    }
    if parent == "schemas" {
        if let Some(name) = file.strip_suffix(".json") {
            return Some(name.to_string());
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(dir: &Path, relative: &str, content: &str) {
        let path = dir.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn finds_schemas_in_the_schemas_folder() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "schemas/author.json", r#"{ "name": "string" }"#);

        let registry = load_schemas(dir.path()).unwrap();
        assert!(registry.contains("authors"));
    }

    #[test]
    fn finds_schemas_in_a_pod_folder() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "book/schema.json", r#"{ "title": "string" }"#);

        let registry = load_schemas(dir.path()).unwrap();
        assert!(registry.contains("books"));
    }

    #[test]
    fn keys_are_pluralized() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "schemas/category.json", "{}");

        let registry = load_schemas(dir.path()).unwrap();
        assert!(registry.contains("categories"));
        assert!(!registry.contains("category"));
    }

    #[test]
    fn skips_unrelated_files() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "schemas/author.json", "{}");
        write(dir.path(), "README.md", "not a schema");
        write(dir.path(), "data/rows.json", "[1, 2]");

        let registry = load_schemas(dir.path()).unwrap();
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn parses_relationship_declarations() {
        let dir = TempDir::new().unwrap();
        write(
            dir.path(),
            "schemas/book.json",
            r#"{ "author": { "relationship": "belongsTo", "type": "authors" } }"#,
        );

        let registry = load_schemas(dir.path()).unwrap();
        let schema = registry.get("books").unwrap();
        assert!(schema.get("author").unwrap().as_relationship().is_some());
    }

    #[test]
    fn missing_directory_errors() {
        let result = load_schemas(Path::new("/nonexistent/schemas"));
        assert!(matches!(result, Err(LoadError::DirectoryNotFound { .. })));
    }

    #[test]
    fn invalid_json_errors_with_the_schema_name() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "schemas/author.json", "not json");

        let result = load_schemas(dir.path());
        assert!(matches!(
            result,
            Err(LoadError::InvalidSchema { name, .. }) if name == "author"
        ));
    }
}
