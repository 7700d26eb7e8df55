//! Error taxonomy for name resolution.
//!
//! Only the top-level call's own failures reach the caller. Failures while walking an embedded or nested field
//! are absorbed by the parent record, which carries on as if that subtree had no matching fields.

use thiserror::Error;

use crate::desc::Kind;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VtagError {
    /// The input (after stripping one level of indirection) is not a record.
    #[error("unsupported kind `{kind}` for type `{type_name}`: only records can be resolved")]
    UnsupportedKind { kind: Kind, type_name: String },

    /// Record nesting exceeded the configured depth limit (usually a self-referential type).
    #[error("record `{type_name}` nests deeper than the limit of {limit} levels")]
    DepthExceeded { type_name: String, limit: usize },
}

pub type VtagResult<T> = Result<T, VtagError>;
