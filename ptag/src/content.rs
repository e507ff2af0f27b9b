//! Content accepted by constructors and [`Tag::affix`], and the child nodes it normalizes into.

use std::borrow::Cow;
use std::fmt;
use std::ops::Deref;

use crate::Tag;

/// A text leaf: raw string content inside an element.
///
/// Text is written verbatim when rendering, without any entity escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Text(String);

impl Text {
    /// Wrap a string as a text leaf.
    pub fn new(content: impl Into<String>) -> Self {
        Text(content.into())
    }

    /// The text as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Unwrap into the owned string.
    pub fn into_string(self) -> String {
        self.0
    }
}

impl Deref for Text {
    type Target = str;

    fn deref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A child of an element - either a text leaf or another element.
///
/// Text children compare by value, element children by identity.
#[derive(Debug, Clone, PartialEq)]
pub enum Child {
    /// Text content.
    Text(Text),
    /// A nested element.
    Tag(Tag),
}

impl Child {
    /// Returns `Some(&str)` if this is text content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Child::Text(t) => Some(t.as_str()),
            Child::Tag(_) => None,
        }
    }

    /// Returns `Some(&Tag)` if this is an element.
    pub fn as_tag(&self) -> Option<&Tag> {
        match self {
            Child::Tag(t) => Some(t),
            Child::Text(_) => None,
        }
    }
}

/// Everything that can be passed as element content.
///
/// - [`Void`](Content::Void) makes a self-closing element (`<br />`).
/// - [`Text`](Content::Text) becomes one text child; the empty string still
///   produces an element with a closing tag (`<script></script>`).
/// - [`Tag`](Content::Tag) becomes one element child.
/// - [`Many`](Content::Many) is an ordered list of texts and tags. Items
///   that are themselves `Void` or `Many` are rejected with
///   [`ErrorKind::InvalidContentKind`](crate::ErrorKind::InvalidContentKind).
#[derive(Debug, Clone, Default)]
pub enum Content {
    /// No content at all.
    #[default]
    Void,
    /// A single text leaf.
    Text(String),
    /// A single element.
    Tag(Tag),
    /// A sequence of texts and elements, in order.
    Many(Vec<Content>),
}

impl Content {
    /// A short name for the variant, used in error messages.
    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Content::Void => "void",
            Content::Text(_) => "text",
            Content::Tag(_) => "tag",
            Content::Many(_) => "nested sequence",
        }
    }
}

impl From<()> for Content {
    fn from(_: ()) -> Self {
        Content::Void
    }
}

impl From<&str> for Content {
    fn from(value: &str) -> Self {
        Content::Text(value.to_owned())
    }
}

impl From<String> for Content {
    fn from(value: String) -> Self {
        Content::Text(value)
    }
}

impl From<&String> for Content {
    fn from(value: &String) -> Self {
        Content::Text(value.clone())
    }
}

impl From<Cow<'_, str>> for Content {
    fn from(value: Cow<'_, str>) -> Self {
        Content::Text(value.into_owned())
    }
}

impl From<char> for Content {
    fn from(value: char) -> Self {
        Content::Text(value.to_string())
    }
}

impl From<Text> for Content {
    fn from(value: Text) -> Self {
        Content::Text(value.into_string())
    }
}

impl From<Tag> for Content {
    fn from(value: Tag) -> Self {
        Content::Tag(value)
    }
}

impl From<&Tag> for Content {
    fn from(value: &Tag) -> Self {
        Content::Tag(value.clone())
    }
}

impl From<Child> for Content {
    fn from(value: Child) -> Self {
        match value {
            Child::Text(t) => t.into(),
            Child::Tag(t) => t.into(),
        }
    }
}

impl<T: Into<Content>> From<Option<T>> for Content {
    fn from(value: Option<T>) -> Self {
        value.map_or(Content::Void, Into::into)
    }
}

impl<T: Into<Content>> From<Vec<T>> for Content {
    fn from(value: Vec<T>) -> Self {
        Content::Many(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Content>, const N: usize> From<[T; N]> for Content {
    fn from(value: [T; N]) -> Self {
        Content::Many(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Content>> FromIterator<T> for Content {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Content::Many(iter.into_iter().map(Into::into).collect())
    }
}
