//! Error types for element construction, prettifying and comment helpers.

use std::{
    error,
    fmt::{self, Display},
};

use miette::SourceSpan;

/// Error returned by every fallible ptag operation.
#[derive(Debug)]
pub struct Error {
    /// The specific kind of error
    pub(crate) kind: ErrorKind,
    /// Markup being parsed when the error happened, for diagnostics
    pub(crate) source_code: Option<String>,
    /// Primary span where the error occurred
    pub(crate) span: Option<SourceSpan>,
}

impl Error {
    /// Returns a reference to the error kind for detailed error inspection.
    pub fn kind(&self) -> &ErrorKind {
        &self.kind
    }

    /// Create a new error with the given kind.
    pub(crate) fn new(kind: impl Into<ErrorKind>) -> Self {
        Error {
            kind: kind.into(),
            source_code: None,
            span: None,
        }
    }

    /// Attach source markup to this error for diagnostics.
    pub(crate) fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source_code = Some(source.into());
        self
    }

    /// Attach a span to this error for diagnostics.
    pub(crate) fn with_span(mut self, span: impl Into<SourceSpan>) -> Self {
        self.span = Some(span.into());
        self
    }
}

impl Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = &self.kind;
        write!(f, "{kind}")
    }
}

impl error::Error for Error {}

impl<K: Into<ErrorKind>> From<K> for Error {
    fn from(value: K) -> Self {
        Error::new(value)
    }
}

/// Detailed classification of ptag errors.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ErrorKind {
    /// Content was not void, text, an element, or a flat sequence of those.
    InvalidContentKind {
        /// What was found instead.
        found: &'static str,
        /// Position inside the content sequence, if the offender was an item.
        index: Option<usize>,
    },
    /// An element would end up nested inside itself.
    SelfNesting {
        /// Tag name of the element that would contain itself.
        tag: String,
    },
    /// The rendered markup is not well-formed XML.
    Parse(String),
    /// The rendered markup ended with elements still open, or had no root.
    UnbalancedTags,
    /// Comment text that cannot appear inside `<!-- -->`.
    InvalidComment(String),
}

impl ErrorKind {
    /// Returns an error code for this error kind.
    pub fn code(&self) -> &'static str {
        match self {
            ErrorKind::InvalidContentKind { .. } => "ptag::invalid_content_kind",
            ErrorKind::SelfNesting { .. } => "ptag::self_nesting",
            ErrorKind::Parse(_) => "ptag::parse",
            ErrorKind::UnbalancedTags => "ptag::unbalanced_tags",
            ErrorKind::InvalidComment(_) => "ptag::invalid_comment",
        }
    }
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::InvalidContentKind {
                found,
                index: Some(index),
            } => write!(f, "invalid content type: {found} at index {index}"),
            ErrorKind::InvalidContentKind { found, index: None } => {
                write!(f, "invalid content type: {found}")
            }
            ErrorKind::SelfNesting { tag } => {
                write!(f, "<{tag}> cannot be nested inside itself")
            }
            ErrorKind::Parse(msg) => write!(f, "markup parse error: {msg}"),
            ErrorKind::UnbalancedTags => write!(f, "unbalanced tags in markup"),
            ErrorKind::InvalidComment(text) => write!(f, "invalid comment text {text:?}"),
        }
    }
}

// ============================================================================
// Diagnostic Implementation
// ============================================================================

impl miette::Diagnostic for Error {
    fn code<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        Some(Box::new(self.kind.code()))
    }

    fn source_code(&self) -> Option<&dyn miette::SourceCode> {
        self.source_code
            .as_ref()
            .map(|s| s as &dyn miette::SourceCode)
    }

    fn labels(&self) -> Option<Box<dyn Iterator<Item = miette::LabeledSpan> + '_>> {
        let span = self.span?;
        let label = match &self.kind {
            ErrorKind::Parse(_) => "markup stops being well-formed here".to_string(),
            ErrorKind::UnbalancedTags => "input ends here".to_string(),
            _ => "error occurred here".to_string(),
        };
        Some(Box::new(std::iter::once(miette::LabeledSpan::at(
            span, label,
        ))))
    }

    fn help<'a>(&'a self) -> Option<Box<dyn Display + 'a>> {
        match &self.kind {
            ErrorKind::Parse(_) => Some(Box::new(
                "text is rendered without escaping and value-less attributes are not XML; \
                 escape `&` and `<` yourself before prettifying",
            )),
            ErrorKind::InvalidContentKind { .. } => Some(Box::new(
                "content must be text, a tag, or a flat list of texts and tags",
            )),
            ErrorKind::InvalidComment(_) => Some(Box::new(
                "comment text may not contain `--` or end with `-`",
            )),
            ErrorKind::SelfNesting { .. } => Some(Box::new(
                "an element cannot be attached below itself or one of its descendants",
            )),
            _ => None,
        }
    }
}
