//! Process-wide default resolver.
//!
//! The default is built once, either by the first [`init_default`] call or lazily by the first resolution through
//! this module, whichever comes first. Later [`init_default`] calls leave it untouched.

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::desc::{Describe, TypeDesc};
use crate::encoder::EncoderFn;
use crate::errors::VtagResult;
use crate::resolver::Resolver;
use crate::tag::DEFAULT_TAG_KEY;

static DEFAULT: OnceLock<Resolver> = OnceLock::new();

/// Return the default resolver, building it (cached, no encoder) on first use.
pub fn default_resolver() -> &'static Resolver {
    DEFAULT.get_or_init(|| Resolver::new(DEFAULT_TAG_KEY, None, true))
}

/// Install a cached default resolver using `encoder`.
///
/// ## Returns
/// - (`bool`): `true` if this call built the default, `false` if it already existed.
pub fn init_default(encoder: EncoderFn) -> bool {
    let mut installed = false;
    DEFAULT.get_or_init(|| {
        installed = true;
        Resolver::new(DEFAULT_TAG_KEY, Some(encoder), true)
    });
    if !installed {
        tracing::debug!("default resolver already initialized; keeping existing encoder");
    }
    installed
}

/// Resolve names for `T` with the default resolver.
pub fn resolve<T: Describe + ?Sized>(prefix: &str, labels: &[&str]) -> VtagResult<Vec<String>> {
    default_resolver().resolve_type::<T>(prefix, labels)
}

/// Resolve names for the type of `value` with the default resolver.
pub fn resolve_value<T: Describe + ?Sized>(value: &T, prefix: &str, labels: &[&str]) -> VtagResult<Vec<String>> {
    default_resolver().resolve_value(value, prefix, labels)
}

/// Resolve names for a type description with the default resolver.
pub fn resolve_desc(ty: &TypeDesc, prefix: &str, labels: &[&str]) -> VtagResult<Vec<String>> {
    default_resolver().resolve(ty, prefix, labels)
}

/// Build a lookup map assigning `value` to every name.
pub fn names_to_map<S, V>(names: impl IntoIterator<Item = S>, value: V) -> HashMap<String, V>
where
    S: Into<String>,
    V: Clone,
{
    names.into_iter().map(|name| (name.into(), value.clone())).collect()
}
