//! Named attribute values.

use std::borrow::Cow;
use std::fmt;

/// The value of a named attribute.
///
/// Values keep their original type until render time, where they are
/// coerced with their [`Display`](fmt::Display) implementation. A
/// [`Null`](AttrValue::Null) value suppresses the attribute entirely.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    /// A string, rendered verbatim (the empty string is a valid value).
    Str(String),
    /// A boolean, rendered as `true` / `false`.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating-point number.
    Float(f64),
    /// No value: the attribute is omitted from the output.
    Null,
}

impl AttrValue {
    /// Returns `true` for [`AttrValue::Null`].
    pub fn is_null(&self) -> bool {
        matches!(self, AttrValue::Null)
    }

    /// The rendered form of the value, or `None` when it is suppressed.
    pub fn to_markup(&self) -> Option<Cow<'_, str>> {
        match self {
            AttrValue::Str(s) => Some(Cow::Borrowed(s)),
            AttrValue::Null => None,
            other => Some(Cow::Owned(other.to_string())),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttrValue::Str(s) => f.write_str(s),
            AttrValue::Bool(b) => write!(f, "{b}"),
            AttrValue::Int(n) => write!(f, "{n}"),
            AttrValue::UInt(n) => write!(f, "{n}"),
            AttrValue::Float(n) => write!(f, "{n}"),
            AttrValue::Null => Ok(()),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        AttrValue::Str(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        AttrValue::Str(value)
    }
}

impl From<&String> for AttrValue {
    fn from(value: &String) -> Self {
        AttrValue::Str(value.clone())
    }
}

impl From<Cow<'_, str>> for AttrValue {
    fn from(value: Cow<'_, str>) -> Self {
        AttrValue::Str(value.into_owned())
    }
}

impl From<char> for AttrValue {
    fn from(value: char) -> Self {
        AttrValue::Str(value.to_string())
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        AttrValue::Bool(value)
    }
}

impl<T: Into<AttrValue>> From<Option<T>> for AttrValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(AttrValue::Null, Into::into)
    }
}

macro_rules! impl_from_number {
    ($variant:ident as $repr:ty: $($ty:ty),*) => {
        $(
            impl From<$ty> for AttrValue {
                fn from(value: $ty) -> Self {
                    AttrValue::$variant(value as $repr)
                }
            }
        )*
    };
}

impl_from_number!(Int as i64: i8, i16, i32, i64, isize);
impl_from_number!(UInt as u64: u8, u16, u32, u64, usize);
impl_from_number!(Float as f64: f32, f64);
