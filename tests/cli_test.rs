//! CLI integration tests for the jsonapi-schema binary.

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("jsonapi-schema"))
}

fn write_file(dir: &TempDir, relative: &str, content: &str) -> PathBuf {
    let path = dir.path().join(relative);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, content).unwrap();
    path
}

/// Lays down a book/author schema pair and returns the schemas directory.
fn write_schemas(dir: &TempDir) -> PathBuf {
    write_file(
        dir,
        "app/schemas/book.json",
        r#"{
            "title": "string",
            "author": { "relationship": "belongsTo", "type": "authors" }
        }"#,
    );
    write_file(dir, "app/schemas/author.json", r#"{ "name": "string" }"#);
    dir.path().join("app")
}

mod assemble_command {
    use super::*;

    #[test]
    fn basic_assemble() {
        let dir = TempDir::new().unwrap();
        let schemas = write_schemas(&dir);
        let records = write_file(
            &dir,
            "book.json",
            r#"{ "id": 1, "title": "Dune", "author_id": 5 }"#,
        );

        cmd()
            .args([
                "assemble",
                records.to_str().unwrap(),
                "--schemas",
                schemas.to_str().unwrap(),
                "--type",
                "books",
                "--base-url",
                "/api",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""self":"/api/books""#))
            .stdout(predicate::str::contains(
                r#""author":{"data":{"type":"authors","id":5}"#,
            ));
    }

    #[test]
    fn assemble_with_pretty() {
        let dir = TempDir::new().unwrap();
        let schemas = write_schemas(&dir);
        let records = write_file(&dir, "book.json", r#"{ "id": 1 }"#);

        cmd()
            .args([
                "assemble",
                records.to_str().unwrap(),
                "--schemas",
                schemas.to_str().unwrap(),
                "--type",
                "books",
                "--pretty",
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains("{\n"));
    }

    #[test]
    fn assemble_with_included_pool() {
        let dir = TempDir::new().unwrap();
        write_file(
            &dir,
            "app/schemas/book.json",
            r#"{
                "comments": { "relationship": "hasMany", "type": "comments" }
            }"#,
        );
        write_file(&dir, "app/schemas/comment.json", r#"{ "body": "string" }"#);
        let schemas = dir.path().join("app");
        let records = write_file(&dir, "book.json", r#"{ "id": 1 }"#);
        let included = write_file(
            &dir,
            "included.json",
            r#"{ "comments": [{ "id": 11, "body": "Nice." }] }"#,
        );

        cmd()
            .args([
                "assemble",
                records.to_str().unwrap(),
                "--schemas",
                schemas.to_str().unwrap(),
                "--type",
                "books",
                "--included",
                included.to_str().unwrap(),
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""included":["#))
            .stdout(predicate::str::contains(r#""type":"comments","id":11"#));
    }

    #[test]
    fn assemble_writes_output_file() {
        let dir = TempDir::new().unwrap();
        let schemas = write_schemas(&dir);
        let records = write_file(&dir, "book.json", r#"[{ "id": 1 }, { "id": 2 }]"#);
        let output = dir.path().join("document.json");

        cmd()
            .args([
                "assemble",
                records.to_str().unwrap(),
                "--schemas",
                schemas.to_str().unwrap(),
                "--type",
                "books",
                "--output",
                output.to_str().unwrap(),
            ])
            .assert()
            .success();

        let written = fs::read_to_string(&output).unwrap();
        assert!(written.contains(r#""data":["#));
    }

    #[test]
    fn assemble_with_meta_and_links() {
        let dir = TempDir::new().unwrap();
        let schemas = write_schemas(&dir);
        let records = write_file(&dir, "book.json", r#"{ "id": 1 }"#);

        cmd()
            .args([
                "assemble",
                records.to_str().unwrap(),
                "--schemas",
                schemas.to_str().unwrap(),
                "--type",
                "books",
                "--base-url",
                "/api",
                "--self-link",
                "my-books",
                "--related",
                "authors",
                "--meta",
                r#"{"total": 1}"#,
            ])
            .assert()
            .success()
            .stdout(predicate::str::contains(r#""self":"/api/my-books""#))
            .stdout(predicate::str::contains(r#""related":"/api/authors""#))
            .stdout(predicate::str::contains(r#""meta":{"total":1}"#));
    }

    #[test]
    fn unknown_type_exits_with_schema_error() {
        let dir = TempDir::new().unwrap();
        let schemas = write_schemas(&dir);
        let records = write_file(&dir, "article.json", r#"{ "id": 1 }"#);

        cmd()
            .args([
                "assemble",
                records.to_str().unwrap(),
                "--schemas",
                schemas.to_str().unwrap(),
                "--type",
                "articles",
            ])
            .assert()
            .failure()
            .code(2)
            .stderr(predicate::str::contains("no schema found for type articles"));
    }

    #[test]
    fn missing_schema_directory_exits_with_io_error() {
        let dir = TempDir::new().unwrap();
        let records = write_file(&dir, "book.json", r#"{ "id": 1 }"#);

        cmd()
            .args([
                "assemble",
                records.to_str().unwrap(),
                "--schemas",
                "/nonexistent/schemas",
                "--type",
                "books",
            ])
            .assert()
            .failure()
            .code(3);
    }

    #[test]
    fn invalid_records_file_exits_with_parse_error() {
        let dir = TempDir::new().unwrap();
        let schemas = write_schemas(&dir);
        let records = write_file(&dir, "book.json", "not json");

        cmd()
            .args([
                "assemble",
                records.to_str().unwrap(),
                "--schemas",
                schemas.to_str().unwrap(),
                "--type",
                "books",
            ])
            .assert()
            .failure()
            .code(2);
    }
}

mod schemas_command {
    use super::*;

    #[test]
    fn lists_discovered_schemas() {
        let dir = TempDir::new().unwrap();
        let schemas = write_schemas(&dir);

        cmd()
            .args(["schemas", schemas.to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("books"))
            .stdout(predicate::str::contains("author -> authors (belongsTo)"));
    }

    #[test]
    fn reports_empty_directories() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("empty")).unwrap();

        cmd()
            .args(["schemas", dir.path().join("empty").to_str().unwrap()])
            .assert()
            .success()
            .stdout(predicate::str::contains("No schemas found"));
    }

    #[test]
    fn missing_directory_fails() {
        cmd()
            .args(["schemas", "/nonexistent/schemas"])
            .assert()
            .failure()
            .code(3);
    }
}
