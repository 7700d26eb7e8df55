//! Resolve the ordered list of external field names of a record type for a set of projection labels.
//!
//! Fields carry annotations (`#[tag(vtag = "name,list,detail")]`): an optional explicit name followed by the labels
//! the field belongs to. Resolving a record for labels such as `list` yields the names of every matching field in
//! declaration order, with embedded records inlined and nested records flattened under a dotted prefix. Fields
//! without an explicit name are named by a pluggable naming convention.
//!
//! ```rust
//! use vtag::{encoder, Record, Resolver};
//!
//! #[derive(Record)]
//! pub struct Ext {
//!     #[tag(vtag = ",list")]
//!     pub dd_value: String,
//! }
//!
//! #[derive(Record)]
//! pub struct User {
//!     #[tag(vtag = ",list")]
//!     pub ext: Ext,
//!     #[tag(vtag = "name,list,detail")]
//!     pub name: String,
//!     #[tag(vtag = "-,list")]
//!     pub password: String,
//! }
//!
//! let resolver = Resolver::new("", Some(encoder::camel), true);
//! assert_eq!(resolver.resolve_type::<User>("", &["list"]).unwrap(), ["ext.dd_value", "name"]);
//! assert_eq!(resolver.resolve_type::<User>("", &["detail"]).unwrap(), ["name"]);
//! ```
//!
//! ## Modules
//!
//! - `desc` - Record type descriptions and the `Describe` trait
//! - `tag` - Annotation parsing
//! - `case` / `encoder` - Naming conventions
//! - `resolver` / `cache` - The field walker and its memoization
//! - `registry` - The process-wide default resolver
//! - `schema` - Record descriptions loaded from JSON
//! - `cli` - The `vtag` command-line tool

#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

// Lets `#[derive(Record)]` expand to `::vtag::...` paths inside this crate too.
extern crate self as vtag;

pub mod cache;
pub mod case;
pub mod cli;
pub mod desc;
pub mod encoder;
pub mod errors;
pub mod registry;
pub mod resolver;
pub mod schema;
pub mod tag;

// Re-export commonly used items
pub use cache::{CacheKey, NameCache};
pub use desc::{Describe, FieldDesc, FieldSource, FieldTags, Kind, RecordDesc, ScalarKind, TypeDesc};
pub use encoder::{Convention, EncoderFn};
pub use errors::{VtagError, VtagResult};
pub use registry::{default_resolver, init_default, names_to_map, resolve, resolve_desc, resolve_value};
pub use resolver::{Resolver, ResolverBuilder};
pub use schema::{Catalog, SchemaError};
pub use vtag_derive::Record;
