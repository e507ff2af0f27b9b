//! Markup that is not an element: comments and doctype declarations.

use crate::error::{Error, ErrorKind};
use crate::tag::Tag;

impl Tag {
    /// A markup comment.
    ///
    /// Text that XML forbids inside a comment (`--` anywhere, or a trailing
    /// `-`) is rejected rather than rewritten.
    ///
    /// ```
    /// use ptag::Tag;
    ///
    /// assert_eq!(Tag::comment("hello")?, "<!--hello-->");
    /// assert!(Tag::comment("a -- b").is_err());
    /// # Ok::<(), ptag::Error>(())
    /// ```
    pub fn comment(text: &str) -> Result<String, Error> {
        if text.contains("--") || text.ends_with('-') {
            return Err(Error::new(ErrorKind::InvalidComment(text.to_owned())));
        }
        Ok(format!("<!--{text}-->"))
    }

    /// A `<!DOCTYPE kind>` declaration. `kind` is not validated.
    pub fn doctype(kind: &str) -> String {
        format!("<!DOCTYPE {kind}>")
    }

    /// The HTML5 doctype, `<!DOCTYPE html>`.
    pub fn html_doctype() -> String {
        Tag::doctype("html")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_wraps_text() {
        assert_eq!(Tag::comment("hello").unwrap(), "<!--hello-->");
        assert_eq!(Tag::comment("").unwrap(), "<!---->");
    }

    #[test]
    fn comment_keeps_markup_characters() {
        assert_eq!(Tag::comment("<b> & </b>").unwrap(), "<!--<b> & </b>-->");
    }

    #[test]
    fn comment_rejects_double_hyphen() {
        let err = Tag::comment("a--b").unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::InvalidComment("a--b".into()));
    }

    #[test]
    fn comment_rejects_trailing_hyphen() {
        assert_eq!(
            Tag::comment("a-").unwrap_err().kind().code(),
            "ptag::invalid_comment"
        );
    }

    #[test]
    fn doctype_is_verbatim() {
        assert_eq!(Tag::html_doctype(), "<!DOCTYPE html>");
        assert_eq!(
            Tag::doctype(r#"svg PUBLIC "-//W3C//DTD SVG 1.1//EN""#),
            r#"<!DOCTYPE svg PUBLIC "-//W3C//DTD SVG 1.1//EN">"#
        );
    }
}
