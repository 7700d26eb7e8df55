//! Walk a record description and resolve the ordered list of external field names.
//!
//! A [`Resolver`] is one resolution strategy: the annotation key it reads, the naming encoder applied to fields
//! without an explicit name, an optional shared cache and a nesting limit. It is immutable once built.
//!
//! ## Walk rules
//! 1. Cached lists are returned as-is (the key is taken before any indirection is stripped).
//! 2. One level of indirection is stripped from the input; anything but a record is `UnsupportedKind`.
//! 3. Fields are visited in declaration order:
//!    - embedded fields are walked (through any indirection) with the same prefix and their names inlined;
//!    - unexported fields are skipped;
//!    - excluded fields (`-`) and fields whose labels miss the request are skipped;
//!    - the external name is the explicit name, else the encoder's result (empty means skip), else the raw name;
//!    - fields whose type is a record (through any indirection) are walked with the external name as prefix,
//!      everything else is a leaf.
//! 4. Errors from embedded or nested walks are logged and dropped; the parent continues without that subtree.
//!
//! ## Notes
//! - Record graphs are expected to be acyclic. A cycle is cut off at [`Resolver::max_depth`], and since that
//!   failure happens inside a subtree it is dropped like any other subtree error.
//! - A list cut short by the depth limit depends on where the walk started, so it is never cached.

use std::borrow::Cow;
use std::sync::Arc;

use crate::cache::{CacheKey, NameCache};
use crate::desc::{Describe, FieldDesc, TypeDesc};
use crate::encoder::EncoderFn;
use crate::errors::{VtagError, VtagResult};
use crate::tag::{DEFAULT_TAG_KEY, NameSpec, TagSpec, join_path};

/// Nesting limit used when the builder is not given one.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// A resolver configuration.
///
/// Cloning is cheap and shares the cache.
#[derive(Debug, Clone)]
pub struct Resolver {
    tag_key: Cow<'static, str>,
    encoder: Option<EncoderFn>,
    cache: Option<Arc<NameCache>>,
    max_depth: usize,
}

impl Resolver {
    /// Build a standalone configuration.
    ///
    /// ## Parameters
    /// - `tag_key`: annotation key to read; empty selects [`DEFAULT_TAG_KEY`].
    /// - `encoder`: naming encoder for fields without an explicit name.
    /// - `cache`: whether to memoize resolved lists.
    pub fn new(tag_key: &str, encoder: Option<EncoderFn>, cache: bool) -> Self {
        Self::builder()
            .tag_key(tag_key)
            .encoder(encoder)
            .cache(cache)
            .build()
    }

    pub fn builder() -> ResolverBuilder {
        ResolverBuilder::default()
    }

    pub fn tag_key(&self) -> &str {
        &self.tag_key
    }

    pub fn encoder(&self) -> Option<EncoderFn> {
        self.encoder
    }

    pub fn cache(&self) -> Option<&NameCache> {
        self.cache.as_deref()
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    /// Resolve names for the type `T`.
    pub fn resolve_type<T: Describe + ?Sized>(&self, prefix: &str, labels: &[&str]) -> VtagResult<Vec<String>> {
        self.resolve(&T::type_desc(), prefix, labels)
    }

    /// Resolve names for the type of `value`.
    pub fn resolve_value<T: Describe + ?Sized>(
        &self,
        _value: &T,
        prefix: &str,
        labels: &[&str],
    ) -> VtagResult<Vec<String>> {
        self.resolve_type::<T>(prefix, labels)
    }

    /// Resolve the external names of `ty` whose labels intersect `labels`.
    ///
    /// ## Parameters
    /// - `ty`: a record, or one level of indirection around a record.
    /// - `prefix`: dotted prefix for every produced name; empty for none.
    /// - `labels`: the requested label set.
    ///
    /// ## Returns
    /// - (`Vec<String>`): names in field declaration order, nested records expanded in place.
    ///
    /// ## Errors
    /// - [`VtagError::UnsupportedKind`] when `ty` is not a record.
    #[tracing::instrument(skip_all, fields(ty = %ty.identity(), prefix = prefix, labels = ?labels))]
    pub fn resolve(&self, ty: &TypeDesc, prefix: &str, labels: &[&str]) -> VtagResult<Vec<String>> {
        self.walk(ty, prefix, labels, 0).map(|walked| walked.names.to_vec())
    }

    fn walk(&self, ty: &TypeDesc, prefix: &str, labels: &[&str], depth: usize) -> VtagResult<Walked> {
        let key = self.cache.as_ref().map(|_| CacheKey::new(ty, prefix, labels));
        if let (Some(cache), Some(key)) = (&self.cache, &key) {
            if let Some(names) = cache.get(key) {
                tracing::trace!(ty = key.type_identity(), "name cache hit");
                return Ok(Walked { names, truncated: false });
            }
        }

        let TypeDesc::Record(record) = ty.deref_once() else {
            return Err(VtagError::UnsupportedKind {
                kind: ty.deref_once().kind(),
                type_name: ty.identity().into_owned(),
            });
        };
        if depth > self.max_depth {
            return Err(VtagError::DepthExceeded {
                type_name: record.type_name().to_string(),
                limit: self.max_depth,
            });
        }

        let mut names = Vec::new();
        let mut truncated = false;
        for field in record.fields() {
            if field.embedded {
                match self.walk(field.ty.deref_all(), prefix, labels, depth + 1) {
                    Ok(inner) => inner.append_to(&mut names, &mut truncated),
                    Err(err) => {
                        truncated |= matches!(err, VtagError::DepthExceeded { .. });
                        tracing::debug!(record = record.name(), field = %field.name, %err, "skipping embedded field")
                    }
                }
                continue;
            }
            if !field.exported {
                continue;
            }

            let spec = TagSpec::parse(field.tags.lookup(&self.tag_key));
            if spec.is_excluded() || !spec.matches(labels) {
                continue;
            }
            let Some(name) = self.external_name(&field, &spec, prefix) else {
                continue;
            };

            let target = field.ty.deref_all();
            if target.as_record().is_none() {
                names.push(name);
                continue;
            }
            match self.walk(target, &name, labels, depth + 1) {
                Ok(inner) => inner.append_to(&mut names, &mut truncated),
                Err(err) => {
                    truncated |= matches!(err, VtagError::DepthExceeded { .. });
                    tracing::debug!(record = record.name(), field = %field.name, %err, "skipping nested field")
                }
            }
        }

        let names: Arc<[String]> = names.into();
        if let (Some(cache), Some(key)) = (&self.cache, key) {
            if truncated {
                tracing::trace!(ty = key.type_identity(), "depth-limited list not cached");
            } else {
                tracing::trace!(ty = key.type_identity(), count = names.len(), "name cache store");
                cache.insert(key, Arc::clone(&names));
            }
        }
        Ok(Walked { names, truncated })
    }

    fn external_name(&self, field: &FieldDesc, spec: &TagSpec<'_>, prefix: &str) -> Option<String> {
        match spec.name {
            NameSpec::Explicit(name) => Some(join_path(prefix, name)),
            NameSpec::Default => match self.encoder {
                Some(encode) => Some(encode(&field.tags, prefix, &field.name)).filter(|name| !name.is_empty()),
                None => Some(join_path(prefix, &field.name)),
            },
            NameSpec::Excluded => None,
        }
    }
}

/// Result of one walk; `truncated` is set when the depth limit cut off any subtree.
struct Walked {
    names: Arc<[String]>,
    truncated: bool,
}

impl Walked {
    fn append_to(&self, names: &mut Vec<String>, truncated: &mut bool) {
        names.extend(self.names.iter().cloned());
        *truncated |= self.truncated;
    }
}

impl Default for Resolver {
    fn default() -> Self {
        Self::builder().build()
    }
}

/// Builder for [`Resolver`]. Defaults: key `vtag`, no encoder, cache on, depth limit [`DEFAULT_MAX_DEPTH`].
#[derive(Debug, Clone)]
pub struct ResolverBuilder {
    tag_key: Cow<'static, str>,
    encoder: Option<EncoderFn>,
    cache: bool,
    max_depth: usize,
}

impl Default for ResolverBuilder {
    fn default() -> Self {
        Self {
            tag_key: Cow::Borrowed(DEFAULT_TAG_KEY),
            encoder: None,
            cache: true,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl ResolverBuilder {
    /// Set the annotation key; empty keeps the default key.
    pub fn tag_key(mut self, key: &str) -> Self {
        self.tag_key = if key.is_empty() {
            Cow::Borrowed(DEFAULT_TAG_KEY)
        } else {
            Cow::Owned(key.to_string())
        };
        self
    }

    pub fn encoder(mut self, encoder: Option<EncoderFn>) -> Self {
        self.encoder = encoder;
        self
    }

    pub fn cache(mut self, enabled: bool) -> Self {
        self.cache = enabled;
        self
    }

    pub fn max_depth(mut self, depth: usize) -> Self {
        self.max_depth = depth;
        self
    }

    pub fn build(self) -> Resolver {
        Resolver {
            tag_key: self.tag_key,
            encoder: self.encoder,
            cache: self.cache.then(|| Arc::new(NameCache::new())),
            max_depth: self.max_depth,
        }
    }
}
