//! Naming-convention encoders.
//!
//! An encoder computes the external name of a field that carries no explicit name in its annotation. It receives
//! the field's tags, the accumulated dotted prefix and the raw field name. Returning an empty string drops the
//! field from the projection.

use std::fmt;
use std::str::FromStr;

use crate::case::to_underscore_case;
use crate::desc::FieldTags;
use crate::tag::join_path;

/// Signature shared by every naming encoder.
pub type EncoderFn = fn(tags: &FieldTags, prefix: &str, name: &str) -> String;

/// `HelloWorld` -> `HELLOWORLD`
pub fn upper(_tags: &FieldTags, prefix: &str, name: &str) -> String {
    join_path(prefix, &name.to_uppercase())
}

/// `HelloWorld` -> `helloworld`
pub fn lower(_tags: &FieldTags, prefix: &str, name: &str) -> String {
    join_path(prefix, &name.to_lowercase())
}

/// `HelloWorld` -> `helloWorld`; only an ASCII uppercase first letter is lowered.
pub fn camel(_tags: &FieldTags, prefix: &str, name: &str) -> String {
    let mut chars = name.chars();
    let name = match chars.next() {
        Some(first) if first.is_ascii_uppercase() => {
            let mut out = String::with_capacity(name.len());
            out.push(first.to_ascii_lowercase());
            out.push_str(chars.as_str());
            out
        }
        _ => name.to_string(),
    };
    join_path(prefix, &name)
}

/// `HelloWorld` -> `hello_world`
pub fn underscore(_tags: &FieldTags, prefix: &str, name: &str) -> String {
    join_path(prefix, &to_underscore_case(name))
}

/// The built-in naming conventions, selectable by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, clap::ValueEnum)]
pub enum Convention {
    /// Keep the raw field name.
    #[default]
    #[value(alias = "none")]
    Raw,
    Upper,
    Lower,
    Camel,
    #[value(alias = "snake")]
    Underscore,
}

impl Convention {
    /// Return the encoder for this convention, or `None` to keep raw field names.
    pub fn encoder(self) -> Option<EncoderFn> {
        match self {
            Convention::Raw => None,
            Convention::Upper => Some(upper as EncoderFn),
            Convention::Lower => Some(lower as EncoderFn),
            Convention::Camel => Some(camel as EncoderFn),
            Convention::Underscore => Some(underscore as EncoderFn),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Convention::Raw => "raw",
            Convention::Upper => "upper",
            Convention::Lower => "lower",
            Convention::Camel => "camel",
            Convention::Underscore => "underscore",
        }
    }
}

impl fmt::Display for Convention {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown convention name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown naming convention `{0}` (expected raw, upper, lower, camel or underscore)")]
pub struct UnknownConvention(pub String);

impl FromStr for Convention {
    type Err = UnknownConvention;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "raw" => Ok(Convention::Raw),
            "upper" => Ok(Convention::Upper),
            "lower" => Ok(Convention::Lower),
            "camel" => Ok(Convention::Camel),
            "underscore" | "snake" => Ok(Convention::Underscore),
            _ => Err(UnknownConvention(s.to_string())),
        }
    }
}
