//! Describe record types as plain data so they can be walked without runtime reflection.
//!
//! A [`TypeDesc`] is the structural view of a type that the resolver reads: records expose an ordered field list,
//! indirections (`Option`, `Box`, `&T`, ...) wrap another description, and everything else is a scalar kind.
//!
//! ## Notes
//! - Descriptions are read-only. Nothing in this crate mutates a description after it is built.
//! - Record field lists are materialized lazily (see [`RecordDesc::fields`]), so a self-referential type can be
//!   described. Walking such a type is bounded by the resolver's depth guard, not by the description.

use std::borrow::Cow;
use std::collections::{BTreeMap, BTreeSet, HashMap, HashSet, VecDeque};
use std::fmt;
use std::rc::Rc;
use std::sync::Arc;

/// Represent the kind of a non-record, non-indirect type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarKind {
    Bool,
    Int,
    Uint,
    Float,
    Char,
    String,
    Sequence,
    Map,
    Unit,
}

impl ScalarKind {
    /// Every scalar kind, in declaration order.
    pub const ALL: &'static [ScalarKind] = &[
        ScalarKind::Bool,
        ScalarKind::Int,
        ScalarKind::Uint,
        ScalarKind::Float,
        ScalarKind::Char,
        ScalarKind::String,
        ScalarKind::Sequence,
        ScalarKind::Map,
        ScalarKind::Unit,
    ];

    /// Return the canonical lowercase spelling of this kind.
    pub fn as_str(self) -> &'static str {
        match self {
            ScalarKind::Bool => "bool",
            ScalarKind::Int => "int",
            ScalarKind::Uint => "uint",
            ScalarKind::Float => "float",
            ScalarKind::Char => "char",
            ScalarKind::String => "string",
            ScalarKind::Sequence => "sequence",
            ScalarKind::Map => "map",
            ScalarKind::Unit => "unit",
        }
    }

    /// Look up a scalar kind by its canonical spelling.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|kind| kind.as_str() == name)
    }
}

/// Represent the kind of any described type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Record,
    Indirect,
    Scalar(ScalarKind),
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::Record => f.write_str("record"),
            Kind::Indirect => f.write_str("indirect"),
            Kind::Scalar(kind) => f.write_str(kind.as_str()),
        }
    }
}

/// Structural description of a type.
#[derive(Debug, Clone)]
pub enum TypeDesc {
    /// A record with named fields.
    Record(RecordDesc),
    /// One level of optional/pointer indirection around another type.
    Indirect(Box<TypeDesc>),
    /// Anything that is neither a record nor an indirection.
    Scalar(ScalarKind),
}

impl TypeDesc {
    /// Wrap `inner` in one level of indirection.
    pub fn indirect(inner: TypeDesc) -> Self {
        TypeDesc::Indirect(Box::new(inner))
    }

    pub fn kind(&self) -> Kind {
        match self {
            TypeDesc::Record(_) => Kind::Record,
            TypeDesc::Indirect(_) => Kind::Indirect,
            TypeDesc::Scalar(kind) => Kind::Scalar(*kind),
        }
    }

    /// Return a stable identity string for this type.
    ///
    /// ## Returns
    /// - (`Cow<str>`): the record's fully qualified type name, one `*` per indirection level in front of the
    ///   inner identity, or the scalar kind's spelling.
    ///
    /// ## Notes
    /// - `*Student` and `Student` are different identities, matching the fact that they are different inputs.
    pub fn identity(&self) -> Cow<'_, str> {
        match self {
            TypeDesc::Record(record) => Cow::Borrowed(record.type_name()),
            TypeDesc::Indirect(inner) => Cow::Owned(format!("*{}", inner.identity())),
            TypeDesc::Scalar(kind) => Cow::Borrowed(kind.as_str()),
        }
    }

    /// Strip at most one level of indirection.
    pub fn deref_once(&self) -> &TypeDesc {
        match self {
            TypeDesc::Indirect(inner) => inner,
            other => other,
        }
    }

    /// Strip every level of indirection.
    pub fn deref_all(&self) -> &TypeDesc {
        let mut ty = self;
        while let TypeDesc::Indirect(inner) = ty {
            ty = inner;
        }
        ty
    }

    pub fn as_record(&self) -> Option<&RecordDesc> {
        match self {
            TypeDesc::Record(record) => Some(record),
            _ => None,
        }
    }
}

/// Produce a record's field list on demand.
///
/// Implemented by runtime-built descriptions (see [`crate::schema`]). Derived records use a plain function
/// pointer instead.
pub trait FieldSource: Send + Sync {
    fn fields(&self) -> Vec<FieldDesc>;
}

struct FixedFields(Vec<FieldDesc>);

impl FieldSource for FixedFields {
    fn fields(&self) -> Vec<FieldDesc> {
        self.0.clone()
    }
}

#[derive(Clone)]
enum Fields {
    Static(fn() -> Vec<FieldDesc>),
    Shared(Arc<dyn FieldSource>),
}

/// Description of a record type: identity plus a lazily produced, ordered field list.
#[derive(Clone)]
pub struct RecordDesc {
    type_name: Cow<'static, str>,
    name: Cow<'static, str>,
    fields: Fields,
}

impl RecordDesc {
    /// Build a description whose fields come from a function (what `#[derive(Record)]` emits).
    pub fn from_fn(type_name: &'static str, name: &'static str, fields: fn() -> Vec<FieldDesc>) -> Self {
        Self {
            type_name: Cow::Borrowed(type_name),
            name: Cow::Borrowed(name),
            fields: Fields::Static(fields),
        }
    }

    /// Build a description backed by a shared [`FieldSource`].
    pub fn from_source(
        type_name: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        source: Arc<dyn FieldSource>,
    ) -> Self {
        Self {
            type_name: type_name.into(),
            name: name.into(),
            fields: Fields::Shared(source),
        }
    }

    /// Build a description from an already materialized field list.
    pub fn from_fields(
        type_name: impl Into<Cow<'static, str>>,
        name: impl Into<Cow<'static, str>>,
        fields: Vec<FieldDesc>,
    ) -> Self {
        Self::from_source(type_name, name, Arc::new(FixedFields(fields)))
    }

    /// Fully qualified type name; used as the record's identity.
    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    /// Short, unqualified name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Materialize the field list in declaration order.
    pub fn fields(&self) -> Vec<FieldDesc> {
        match &self.fields {
            Fields::Static(fields) => fields(),
            Fields::Shared(source) => source.fields(),
        }
    }
}

// Field lists are left out so self-referential records can be printed.
impl fmt::Debug for RecordDesc {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RecordDesc")
            .field("type_name", &self.type_name)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Annotation tags attached to a field, as `key -> value` pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldTags(Vec<(Cow<'static, str>, Cow<'static, str>)>);

impl FieldTags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a tag. Earlier entries win on lookup.
    pub fn with(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Self {
        self.0.push((key.into(), value.into()));
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v.as_ref())
    }

    /// Like [`FieldTags::get`], but a missing tag reads as the empty string.
    pub fn lookup(&self, key: &str) -> &str {
        self.get(key).unwrap_or("")
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(k, v)| (k.as_ref(), v.as_ref()))
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Description of one record field.
#[derive(Debug, Clone)]
pub struct FieldDesc {
    /// Raw field name as declared.
    pub name: Cow<'static, str>,
    /// Whether the field is visible outside its record (`pub` for derived records).
    pub exported: bool,
    /// Whether the field's own fields are promoted into the parent record.
    pub embedded: bool,
    pub ty: TypeDesc,
    pub tags: FieldTags,
}

impl FieldDesc {
    /// Create an exported, non-embedded field without tags.
    pub fn new(name: impl Into<Cow<'static, str>>, ty: TypeDesc) -> Self {
        Self {
            name: name.into(),
            exported: true,
            embedded: false,
            ty,
            tags: FieldTags::new(),
        }
    }

    pub fn visible(mut self, exported: bool) -> Self {
        self.exported = exported;
        self
    }

    pub fn embed(mut self, embedded: bool) -> Self {
        self.embedded = embedded;
        self
    }

    pub fn tag(mut self, key: impl Into<Cow<'static, str>>, value: impl Into<Cow<'static, str>>) -> Self {
        self.tags = self.tags.with(key, value);
        self
    }
}

/// Types that can describe their own structure.
///
/// Records implement this with `#[derive(Record)]`; the crate covers primitives, strings, smart pointers and the
/// standard collections.
pub trait Describe {
    fn type_desc() -> TypeDesc;
}

macro_rules! describe_scalar {
    ($kind:ident => $($ty:ty),+ $(,)?) => {
        $(
            impl Describe for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::Scalar(ScalarKind::$kind)
                }
            }
        )+
    };
}

describe_scalar!(Bool => bool);
describe_scalar!(Int => i8, i16, i32, i64, i128, isize);
describe_scalar!(Uint => u8, u16, u32, u64, u128, usize);
describe_scalar!(Float => f32, f64);
describe_scalar!(Char => char);
describe_scalar!(String => str, String);
describe_scalar!(Unit => ());

macro_rules! describe_indirect {
    ($($ty:ty),+ $(,)?) => {
        $(
            impl<T: Describe + ?Sized> Describe for $ty {
                fn type_desc() -> TypeDesc {
                    TypeDesc::indirect(T::type_desc())
                }
            }
        )+
    };
}

describe_indirect!(Box<T>, Rc<T>, Arc<T>);

impl<T: Describe + ?Sized> Describe for &T {
    fn type_desc() -> TypeDesc {
        TypeDesc::indirect(T::type_desc())
    }
}

impl<T: Describe + ?Sized> Describe for &mut T {
    fn type_desc() -> TypeDesc {
        TypeDesc::indirect(T::type_desc())
    }
}

impl<T: Describe> Describe for Option<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::indirect(T::type_desc())
    }
}

impl<T> Describe for Vec<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Scalar(ScalarKind::Sequence)
    }
}

impl<T> Describe for VecDeque<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Scalar(ScalarKind::Sequence)
    }
}

impl<T> Describe for [T] {
    fn type_desc() -> TypeDesc {
        TypeDesc::Scalar(ScalarKind::Sequence)
    }
}

impl<T, const N: usize> Describe for [T; N] {
    fn type_desc() -> TypeDesc {
        TypeDesc::Scalar(ScalarKind::Sequence)
    }
}

impl<T, S> Describe for HashSet<T, S> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Scalar(ScalarKind::Sequence)
    }
}

impl<T> Describe for BTreeSet<T> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Scalar(ScalarKind::Sequence)
    }
}

impl<K, V, S> Describe for HashMap<K, V, S> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Scalar(ScalarKind::Map)
    }
}

impl<K, V> Describe for BTreeMap<K, V> {
    fn type_desc() -> TypeDesc {
        TypeDesc::Scalar(ScalarKind::Map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn point() -> TypeDesc {
        TypeDesc::Record(RecordDesc::from_fields(
            "geo::Point",
            "Point",
            vec![
                FieldDesc::new("X", i64::type_desc()),
                FieldDesc::new("Y", i64::type_desc()),
            ],
        ))
    }

    #[test]
    fn test_scalar_names_round_trip() {
        for kind in ScalarKind::ALL {
            assert_eq!(ScalarKind::from_name(kind.as_str()), Some(*kind));
        }
        assert_eq!(ScalarKind::from_name("record"), None);
    }

    #[test]
    fn test_std_types_describe_their_kind() {
        assert_eq!(String::type_desc().kind(), Kind::Scalar(ScalarKind::String));
        assert_eq!(<&str>::type_desc().kind(), Kind::Indirect);
        assert_eq!(Vec::<String>::type_desc().kind(), Kind::Scalar(ScalarKind::Sequence));
        assert_eq!(HashMap::<String, i32>::type_desc().kind(), Kind::Scalar(ScalarKind::Map));
        assert_eq!(Option::<Box<u8>>::type_desc().deref_all().kind(), Kind::Scalar(ScalarKind::Uint));
    }

    #[test]
    fn test_identity_marks_each_indirection() {
        let ty = TypeDesc::indirect(TypeDesc::indirect(point()));
        assert_eq!(ty.identity(), "**geo::Point");
        assert_eq!(ty.deref_once().identity(), "*geo::Point");
        assert_eq!(ty.deref_all().identity(), "geo::Point");
        assert_eq!(f64::type_desc().identity(), "float");
    }

    #[test]
    fn test_deref_once_leaves_non_indirect_types_alone() {
        let ty = point();
        assert_eq!(ty.deref_once().kind(), Kind::Record);
        assert!(ty.as_record().is_some());
        assert!(bool::type_desc().as_record().is_none());
    }

    #[test]
    fn test_field_tags_first_match_wins() {
        let tags = FieldTags::new().with("vtag", "a,list").with("json", "b").with("vtag", "c");
        assert_eq!(tags.get("vtag"), Some("a,list"));
        assert_eq!(tags.lookup("json"), "b");
        assert_eq!(tags.lookup("db"), "");
        assert_eq!(tags.iter().count(), 3);
    }

    #[test]
    fn test_record_fields_are_ordered() {
        let TypeDesc::Record(record) = point() else {
            panic!("expected a record");
        };
        let names: Vec<_> = record.fields().into_iter().map(|f| f.name).collect();
        assert_eq!(names, ["X", "Y"]);
        assert_eq!(record.name(), "Point");
    }
}
