//! Load record descriptions from a JSON catalog.
//!
//! Records that are not Rust types (or not known at compile time) can be described as data and resolved like
//! derived ones. Catalog shape:
//!
//! ```json
//! {
//!   "module": "school",
//!   "records": {
//!     "Base": { "fields": [ { "name": "HelloWorld", "type": "string", "tags": { "vtag": ",list,detail" } } ] },
//!     "Student": { "fields": [ { "name": "Base", "type": "*Base", "embedded": true } ] }
//!   }
//! }
//! ```
//!
//! ## Notes
//! - A field `type` is a scalar kind (`bool`, `int`, `uint`, `float`, `char`, `string`, `unit`), a record name, a
//!   sequence (`[]T`) or a map (`map[K]V`). Each leading `*` adds one level of indirection.
//! - Scalar spellings take precedence over record names.
//! - Every type is validated at load time; record references are materialized lazily, so catalogs may be
//!   self-referential (walks are still bounded by the resolver's depth limit).
//! - Each load gets its own identity (`module::Name#load`), so two catalogs that reuse a record name never share
//!   resolver cache entries.

use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Deserialize;
use thiserror::Error;

use crate::desc::{FieldDesc, FieldSource, RecordDesc, ScalarKind, TypeDesc};

const DEFAULT_MODULE: &str = "schema";

static NEXT_LOAD: AtomicU64 = AtomicU64::new(0);

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("invalid schema: {0}")]
    Json(#[from] serde_json::Error),

    #[error("record `{record}`, field `{field}`: unknown type `{ty}`")]
    UnknownType { record: String, field: String, ty: String },

    #[error("unknown record or type `{0}`")]
    UnknownRecord(String),
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    module: Option<String>,
    records: BTreeMap<String, RecordSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RecordSchema {
    fields: Vec<FieldSchema>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct FieldSchema {
    name: String,
    #[serde(rename = "type")]
    ty: String,
    #[serde(default = "exported_by_default")]
    exported: bool,
    #[serde(default)]
    embedded: bool,
    #[serde(default)]
    tags: BTreeMap<String, String>,
}

fn exported_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TypeExpr {
    Scalar(ScalarKind),
    Record(String),
    Indirect(Box<TypeExpr>),
}

impl TypeExpr {
    fn parse(raw: &str, is_record: &dyn Fn(&str) -> bool) -> Option<Self> {
        if let Some(inner) = raw.strip_prefix('*') {
            return Self::parse(inner, is_record).map(|inner| TypeExpr::Indirect(Box::new(inner)));
        }
        if let Some(elem) = raw.strip_prefix("[]") {
            return Self::parse(elem, is_record).map(|_| TypeExpr::Scalar(ScalarKind::Sequence));
        }
        if let Some(rest) = raw.strip_prefix("map[") {
            let (key, value) = split_map(rest)?;
            Self::parse(key, is_record)?;
            Self::parse(value, is_record)?;
            return Some(TypeExpr::Scalar(ScalarKind::Map));
        }
        if let Some(kind) = ScalarKind::from_name(raw) {
            return Some(TypeExpr::Scalar(kind));
        }
        is_record(raw).then(|| TypeExpr::Record(raw.to_string()))
    }
}

/// Split `K]V` (the part after `map[`) at the bracket closing the key.
fn split_map(rest: &str) -> Option<(&str, &str)> {
    let mut depth = 0usize;
    for (idx, ch) in rest.char_indices() {
        match ch {
            '[' => depth += 1,
            ']' if depth == 0 => return Some((&rest[..idx], &rest[idx + 1..])),
            ']' => depth -= 1,
            _ => {}
        }
    }
    None
}

#[derive(Debug)]
struct ParsedField {
    name: String,
    exported: bool,
    embedded: bool,
    ty: TypeExpr,
    tags: Vec<(String, String)>,
}

#[derive(Debug)]
struct CatalogInner {
    module: String,
    load: u64,
    records: BTreeMap<String, Vec<ParsedField>>,
}

fn describe(catalog: &Arc<CatalogInner>, ty: &TypeExpr) -> TypeDesc {
    match ty {
        TypeExpr::Scalar(kind) => TypeDesc::Scalar(*kind),
        TypeExpr::Indirect(inner) => TypeDesc::indirect(describe(catalog, inner)),
        TypeExpr::Record(name) => TypeDesc::Record(RecordDesc::from_source(
            format!("{}::{}#{}", catalog.module, name, catalog.load),
            name.clone(),
            Arc::new(CatalogFields {
                catalog: Arc::clone(catalog),
                record: name.clone(),
            }),
        )),
    }
}

struct CatalogFields {
    catalog: Arc<CatalogInner>,
    record: String,
}

impl FieldSource for CatalogFields {
    fn fields(&self) -> Vec<FieldDesc> {
        let Some(fields) = self.catalog.records.get(&self.record) else {
            return Vec::new();
        };
        fields
            .iter()
            .map(|field| {
                let desc = FieldDesc::new(field.name.clone(), describe(&self.catalog, &field.ty))
                    .visible(field.exported)
                    .embed(field.embedded);
                field
                    .tags
                    .iter()
                    .fold(desc, |desc, (key, value)| desc.tag(key.clone(), value.clone()))
            })
            .collect()
    }
}

/// A validated set of record descriptions.
#[derive(Debug, Clone)]
pub struct Catalog {
    inner: Arc<CatalogInner>,
}

impl Catalog {
    /// Parse and validate a JSON catalog.
    pub fn from_json(json: &str) -> Result<Self, SchemaError> {
        let file: CatalogFile = serde_json::from_str(json)?;
        let is_record = |name: &str| file.records.contains_key(name);

        let mut records = BTreeMap::new();
        for (record, schema) in &file.records {
            let mut fields = Vec::with_capacity(schema.fields.len());
            for field in &schema.fields {
                let Some(ty) = TypeExpr::parse(&field.ty, &is_record) else {
                    return Err(SchemaError::UnknownType {
                        record: record.clone(),
                        field: field.name.clone(),
                        ty: field.ty.clone(),
                    });
                };
                fields.push(ParsedField {
                    name: field.name.clone(),
                    exported: field.exported,
                    embedded: field.embedded,
                    ty,
                    tags: field.tags.iter().map(|(k, v)| (k.clone(), v.clone())).collect(),
                });
            }
            records.insert(record.clone(), fields);
        }
        let load = NEXT_LOAD.fetch_add(1, Ordering::Relaxed);
        tracing::debug!(records = records.len(), load, "loaded record catalog");

        Ok(Self {
            inner: Arc::new(CatalogInner {
                module: file.module.unwrap_or_else(|| DEFAULT_MODULE.to_string()),
                load,
                records,
            }),
        })
    }

    pub fn record_names(&self) -> impl Iterator<Item = &str> {
        self.inner.records.keys().map(String::as_str)
    }

    /// Describe a type expression (usually a record name, optionally with leading `*`).
    pub fn type_desc(&self, ty: &str) -> Result<TypeDesc, SchemaError> {
        let is_record = |name: &str| self.inner.records.contains_key(name);
        TypeExpr::parse(ty, &is_record)
            .map(|expr| describe(&self.inner, &expr))
            .ok_or_else(|| SchemaError::UnknownRecord(ty.to_string()))
    }
}
