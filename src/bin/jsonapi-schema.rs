//! JSON:API Schema CLI
//!
//! Command-line interface for assembling JSON:API documents from flat
//! records and a directory of schema files.

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser as ClapParser, Subcommand};
use jsonapi_schema::{load_schemas, DocumentOptions, Parser, RelationKind};

#[derive(ClapParser)]
#[command(name = "jsonapi-schema")]
#[command(about = "Assemble JSON:API documents from schema-described records")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Assemble a document from a records file
    Assemble {
        /// Records file: one flat JSON object or an array of them
        records: PathBuf,

        /// Directory to discover schema files in
        #[arg(long)]
        schemas: PathBuf,

        /// Type name of the primary data
        #[arg(long = "type", short)]
        type_name: String,

        /// Path to prepend to generated link URLs
        #[arg(long, default_value = "")]
        base_url: String,

        /// Included pool file: JSON object of type name to record(s)
        #[arg(long)]
        included: Option<PathBuf>,

        /// Meta object to attach, as inline JSON
        #[arg(long)]
        meta: Option<String>,

        /// Override the document self link
        #[arg(long)]
        self_link: Option<String>,

        /// Attach a related link
        #[arg(long)]
        related: Option<String>,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Pretty-print JSON output
        #[arg(long)]
        pretty: bool,
    },

    /// List the schemas discovered in a directory
    Schemas {
        /// Directory to discover schema files in
        dir: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Assemble {
            records,
            schemas,
            type_name,
            base_url,
            included,
            meta,
            self_link,
            related,
            output,
            pretty,
        } => run_assemble(AssembleArgs {
            records,
            schemas,
            type_name,
            base_url,
            included,
            meta,
            self_link,
            related,
            output,
            pretty,
        }),

        Commands::Schemas { dir } => run_schemas(&dir),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(code) => ExitCode::from(code),
    }
}

struct AssembleArgs {
    records: PathBuf,
    schemas: PathBuf,
    type_name: String,
    base_url: String,
    included: Option<PathBuf>,
    meta: Option<String>,
    self_link: Option<String>,
    related: Option<String>,
    output: Option<PathBuf>,
    pretty: bool,
}

fn run_assemble(args: AssembleArgs) -> Result<(), u8> {
    let registry = load_schemas(&args.schemas).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let parser = Parser::new(registry, args.base_url).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    let records = read_json(&args.records)?;

    let mut options = DocumentOptions::new();
    if let Some(path) = &args.included {
        let pool = read_json(path)?;
        let Some(pool) = pool.as_object() else {
            eprintln!(
                "Error: included file {} must hold a JSON object keyed by type",
                path.display()
            );
            return Err(2);
        };
        options = options.included(pool.clone());
    }
    if let Some(meta) = &args.meta {
        let meta = serde_json::from_str(meta).map_err(|e| {
            eprintln!("Error parsing --meta: {}", e);
            2u8
        })?;
        options = options.meta(meta);
    }
    if let Some(self_link) = args.self_link {
        options = options.link("self", self_link);
    }
    if let Some(related) = args.related {
        options = options.link("related", related);
    }

    let document = parser
        .for_type(&args.type_name)
        .and_then(|handle| handle.to_document(&records, &options))
        .map_err(|e| {
            eprintln!("Error: {}", e);
            e.exit_code() as u8
        })?;

    let json_output = if args.pretty {
        serde_json::to_string_pretty(&document)
    } else {
        serde_json::to_string(&document)
    }
    .map_err(|e| {
        eprintln!("Error serializing output: {}", e);
        2u8
    })?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, &json_output).map_err(|e| {
                eprintln!("Error writing to {}: {}", path.display(), e);
                3u8
            })?;
        }
        None => {
            println!("{}", json_output);
        }
    }

    Ok(())
}

fn run_schemas(dir: &Path) -> Result<(), u8> {
    let registry = load_schemas(dir).map_err(|e| {
        eprintln!("Error: {}", e);
        e.exit_code() as u8
    })?;

    if registry.is_empty() {
        println!("No schemas found under {}", dir.display());
        return Ok(());
    }

    for (type_name, schema) in registry.iter() {
        println!("{}", type_name);
        for (field, descriptor) in schema.relationships() {
            let kind = match descriptor.relationship {
                RelationKind::BelongsTo => "belongsTo",
                RelationKind::HasMany => "hasMany",
            };
            match &descriptor.through {
                Some(through) => println!(
                    "  {} -> {} ({} through {})",
                    field, descriptor.related_type, kind, through
                ),
                None => println!("  {} -> {} ({})", field, descriptor.related_type, kind),
            }
        }
    }

    Ok(())
}

fn read_json(path: &Path) -> Result<serde_json::Value, u8> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        eprintln!("Error reading {}: {}", path.display(), e);
        3u8
    })?;
    serde_json::from_str(&content).map_err(|e| {
        eprintln!("Error parsing {}: {}", path.display(), e);
        2u8
    })
}
