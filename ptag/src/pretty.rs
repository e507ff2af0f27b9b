//! Indented output, produced by re-parsing rendered markup as generic XML.
//!
//! Prettifying inherits every content decision of [`Tag::render`] and adds
//! only whitespace. Text and attribute values are written back exactly as
//! they appear in the markup, references included.
//!
//! Because text is rendered without escaping, the rendered markup must
//! already be well-formed XML: text containing a bare `&` or `<`, or any
//! value-less attribute (`<option selected>`), makes prettifying fail with
//! a parse error.

use std::borrow::Cow;

use quick_xml::Reader;
use quick_xml::escape::resolve_xml_entity;
use quick_xml::events::{BytesStart, Event};

use crate::error::{Error, ErrorKind};
use crate::escaping::{Escape, escape_into};
use crate::tag::Tag;
use crate::tracing_macros::{trace, trace_span};

/// Options for pretty-printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrettyOptions {
    /// Indentation added per nesting level (default: four spaces)
    pub indent: Cow<'static, str>,
    /// Line terminator written after every line (default: `"\n"`)
    pub newline: Cow<'static, str>,
}

impl Default for PrettyOptions {
    fn default() -> Self {
        Self {
            indent: Cow::Borrowed("    "),
            newline: Cow::Borrowed("\n"),
        }
    }
}

impl PrettyOptions {
    /// Create the default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a custom indentation string.
    pub fn indent(mut self, indent: impl Into<Cow<'static, str>>) -> Self {
        self.indent = indent.into();
        self
    }

    /// Set a custom line terminator.
    pub fn newline(mut self, newline: impl Into<Cow<'static, str>>) -> Self {
        self.newline = newline.into();
        self
    }
}

impl Tag {
    /// Render the element with four-space indentation.
    ///
    /// ```
    /// use ptag::Tag;
    ///
    /// let p = Tag::new("p", "hello")?;
    /// p.affix(Tag::new("i", "world")?)?;
    /// assert_eq!(p.prettify()?, "<p>\n    hello\n    <i>world</i>\n</p>\n");
    /// # Ok::<(), ptag::Error>(())
    /// ```
    pub fn prettify(&self) -> Result<String, Error> {
        self.prettify_with(&PrettyOptions::default())
    }

    /// Render the element with custom indentation.
    pub fn prettify_with(&self, options: &PrettyOptions) -> Result<String, Error> {
        prettify(&self.render(), options)
    }
}

/// Re-indent a rendered markup string.
///
/// The markup must hold exactly one root element.
///
/// Comments before or after the root element are kept, one per line.
pub fn prettify(markup: &str, options: &PrettyOptions) -> Result<String, Error> {
    trace_span!("prettify", len = markup.len());
    let nodes = parse(markup)?;
    let mut out = String::with_capacity(markup.len() * 2);
    for node in &nodes {
        write_node(&mut out, node, 0, options);
    }
    Ok(out)
}

// ============================================================================
// Parsing
// ============================================================================

#[derive(Debug)]
enum Node {
    Element(Element),
    /// Escaped text, as it appears in the markup.
    Text(String),
    Comment(String),
}

#[derive(Debug)]
struct Element {
    name: String,
    /// Values are kept escaped, as they appear in the markup.
    attrs: Vec<(String, String)>,
    /// `None` for a self-closing element.
    children: Option<Vec<Node>>,
}

struct TreeBuilder<'a> {
    markup: &'a str,
    stack: Vec<Element>,
    /// The root element and any comments around it.
    document: Vec<Node>,
    has_root: bool,
}

impl<'a> TreeBuilder<'a> {
    fn error_at(&self, kind: ErrorKind, offset: usize) -> Error {
        Error::new(kind)
            .with_source(self.markup)
            .with_span((offset.min(self.markup.len()), 0))
    }

    fn close(&mut self, element: Element, offset: usize) -> Result<(), Error> {
        match self.stack.last_mut() {
            Some(parent) => {
                parent
                    .children
                    .get_or_insert_with(Vec::new)
                    .push(Node::Element(element));
                Ok(())
            }
            None if !self.has_root => {
                self.document.push(Node::Element(element));
                self.has_root = true;
                Ok(())
            }
            None => Err(self.error_at(
                ErrorKind::Parse("junk after document element".into()),
                offset,
            )),
        }
    }

    /// Append text, merging with a preceding text node.
    fn text(&mut self, text: &str, offset: usize) -> Result<(), Error> {
        let Some(parent) = self.stack.last_mut() else {
            if text.trim().is_empty() {
                return Ok(());
            }
            return Err(self.error_at(
                ErrorKind::Parse("text outside the root element".into()),
                offset,
            ));
        };
        let children = parent.children.get_or_insert_with(Vec::new);
        match children.last_mut() {
            Some(Node::Text(existing)) => existing.push_str(text),
            _ => children.push(Node::Text(text.to_owned())),
        }
        Ok(())
    }

    fn comment(&mut self, text: &str) {
        let comment = Node::Comment(text.to_owned());
        match self.stack.last_mut() {
            Some(parent) => parent.children.get_or_insert_with(Vec::new).push(comment),
            None => self.document.push(comment),
        }
    }
}

fn parse(markup: &str) -> Result<Vec<Node>, Error> {
    let mut reader = Reader::from_str(markup);
    reader.config_mut().trim_text(false);

    let mut tree = TreeBuilder {
        markup,
        stack: Vec::new(),
        document: Vec::new(),
        has_root: false,
    };

    loop {
        let offset = reader.buffer_position() as usize;
        let event = reader.read_event().map_err(|e| {
            tree.error_at(
                ErrorKind::Parse(e.to_string()),
                reader.error_position() as usize,
            )
        })?;
        let parse_err = |msg: String| tree.error_at(ErrorKind::Parse(msg), offset);

        match event {
            Event::Start(ref e) => {
                let element = open_element(e, Some(Vec::new())).map_err(parse_err)?;
                trace!(tag = %element.name, "open");
                tree.stack.push(element);
            }
            Event::Empty(ref e) => {
                let element = open_element(e, None).map_err(parse_err)?;
                tree.close(element, offset)?;
            }
            Event::End(_) => {
                let Some(element) = tree.stack.pop() else {
                    return Err(tree.error_at(ErrorKind::UnbalancedTags, offset));
                };
                tree.close(element, offset)?;
            }
            Event::Text(e) => {
                let text = e.decode().map_err(|e| parse_err(e.to_string()))?;
                tree.text(&text, offset)?;
            }
            Event::GeneralRef(e) => {
                let raw = e.decode().map_err(|e| parse_err(e.to_string()))?;
                check_entity(&raw).map_err(parse_err)?;
                tree.text(&format!("&{raw};"), offset)?;
            }
            Event::CData(e) => {
                let text = core::str::from_utf8(e.as_ref()).map_err(|e| parse_err(e.to_string()))?;
                let mut escaped = String::with_capacity(text.len());
                escape_into(&mut escaped, text, Escape::Text);
                tree.text(&escaped, offset)?;
            }
            Event::Comment(e) => {
                let text = core::str::from_utf8(e.as_ref()).map_err(|e| parse_err(e.to_string()))?;
                tree.comment(text);
            }
            Event::Decl(_) | Event::PI(_) | Event::DocType(_) => {}
            Event::Eof => break,
        }
    }

    if !tree.stack.is_empty() || !tree.has_root {
        return Err(tree.error_at(ErrorKind::UnbalancedTags, markup.len()));
    }
    Ok(tree.document)
}

fn open_element(e: &BytesStart<'_>, children: Option<Vec<Node>>) -> Result<Element, String> {
    let name = core::str::from_utf8(e.name().as_ref())
        .map_err(|e| e.to_string())?
        .to_owned();

    let mut attrs = Vec::new();
    for attr in e.attributes() {
        let attr = attr.map_err(|e| e.to_string())?;
        let key = core::str::from_utf8(attr.key.as_ref())
            .map_err(|e| e.to_string())?
            .to_owned();
        attr.unescape_value().map_err(|e| e.to_string())?;
        let value = core::str::from_utf8(&attr.value)
            .map_err(|e| e.to_string())?
            .to_owned();
        attrs.push((key, value));
    }

    Ok(Element {
        name,
        attrs,
        children,
    })
}

/// Check that a general entity reference names something XML can resolve.
fn check_entity(raw: &str) -> Result<(), String> {
    if resolve_xml_entity(raw).is_some() {
        return Ok(());
    }

    if let Some(rest) = raw.strip_prefix('#') {
        let code = if let Some(hex) = rest.strip_prefix('x').or_else(|| rest.strip_prefix('X')) {
            u32::from_str_radix(hex, 16).map_err(|_| format!("invalid hex entity: &#{rest};"))?
        } else {
            rest.parse::<u32>()
                .map_err(|_| format!("invalid decimal entity: &#{rest};"))?
        };
        char::from_u32(code).ok_or_else(|| format!("invalid unicode: {code}"))?;
        return Ok(());
    }

    Err(format!("undefined entity: &{raw};"))
}

// ============================================================================
// Writing
// ============================================================================

fn write_indent(out: &mut String, depth: usize, options: &PrettyOptions) {
    for _ in 0..depth {
        out.push_str(&options.indent);
    }
}

fn write_node(out: &mut String, node: &Node, depth: usize, options: &PrettyOptions) {
    match node {
        Node::Element(element) => write_element(out, element, depth, options),
        Node::Text(text) => {
            write_indent(out, depth, options);
            out.push_str(text);
            out.push_str(&options.newline);
        }
        Node::Comment(text) => {
            write_indent(out, depth, options);
            out.push_str("<!--");
            out.push_str(text);
            out.push_str("-->");
            out.push_str(&options.newline);
        }
    }
}

fn write_element(out: &mut String, element: &Element, depth: usize, options: &PrettyOptions) {
    write_indent(out, depth, options);
    out.push('<');
    out.push_str(&element.name);
    for (key, value) in &element.attrs {
        out.push(' ');
        out.push_str(key);
        out.push_str("=\"");
        escape_into(out, value, Escape::Quote);
        out.push('"');
    }

    match element.children.as_deref() {
        None => out.push_str(" />"),
        Some([]) => {
            out.push_str("></");
            out.push_str(&element.name);
            out.push('>');
        }
        Some([Node::Text(text)]) => {
            out.push('>');
            out.push_str(text);
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
        Some(children) => {
            out.push('>');
            out.push_str(&options.newline);
            for child in children {
                write_node(out, child, depth + 1, options);
            }
            write_indent(out, depth, options);
            out.push_str("</");
            out.push_str(&element.name);
            out.push('>');
        }
    }
    out.push_str(&options.newline);
}
