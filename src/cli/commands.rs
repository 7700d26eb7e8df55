//! CLI command implementations
//!
//! All command functions return their output (or a `CliError`) instead of printing and exiting.

use std::fs;
use std::path::Path;

use crate::desc::FieldTags;
use crate::encoder::Convention;
use crate::resolver::Resolver;
use crate::schema::Catalog;
use crate::tag::join_path;

use super::{CliError, CliResult, NamesArgs, OutputFormat};

fn load_catalog(path: &Path) -> CliResult<Catalog> {
    let json = fs::read_to_string(path)
        .map_err(|e| CliError::failure(format!("failed to read {}: {e}", path.display())))?;
    Catalog::from_json(&json).map_err(|e| CliError::failure(format!("{}: {e}", path.display())))
}

/// Resolve names for `args.record` in the catalog file `args.schema`.
pub fn names(args: &NamesArgs) -> CliResult<String> {
    let catalog = load_catalog(&args.schema)?;
    names_in_catalog(&catalog, args)
}

/// Resolve names for `args.record` in an already loaded catalog.
#[tracing::instrument(skip_all, fields(record = %args.record))]
pub fn names_in_catalog(catalog: &Catalog, args: &NamesArgs) -> CliResult<String> {
    let ty = catalog
        .type_desc(&args.record)
        .map_err(|e| CliError::failure(e.to_string()))?;
    let resolver = Resolver::builder()
        .tag_key(&args.tag_key)
        .encoder(args.convention.encoder())
        .cache(!args.no_cache)
        .max_depth(args.max_depth)
        .build();

    let labels: Vec<&str> = args.labels.iter().map(String::as_str).collect();
    let names = resolver
        .resolve(&ty, &args.prefix, &labels)
        .map_err(|e| CliError::failure(e.to_string()))?;
    tracing::debug!(count = names.len(), "resolved names");

    match args.format {
        OutputFormat::Lines => Ok(names.join("\n")),
        OutputFormat::Json => {
            serde_json::to_string(&names).map_err(|e| CliError::failure(format!("failed to encode output: {e}")))
        }
    }
}

/// List the record names defined by a catalog file.
pub fn records(schema: &Path) -> CliResult<String> {
    let catalog = load_catalog(schema)?;
    Ok(catalog.record_names().collect::<Vec<_>>().join("\n"))
}

/// Apply `convention` to every identifier, one result per line.
pub fn convert(idents: &[String], convention: Convention, prefix: &str) -> String {
    let tags = FieldTags::new();
    idents
        .iter()
        .map(|ident| match convention.encoder() {
            Some(encode) => encode(&tags, prefix, ident),
            None => join_path(prefix, ident),
        })
        .collect::<Vec<_>>()
        .join("\n")
}
