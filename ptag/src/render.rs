//! Compact serialization of an element tree to markup.
//!
//! Attribute clause order is fixed: tag name, value-less attributes (sorted),
//! then named attributes in insertion order. Text is written verbatim.

use std::fmt::{self, Write};

use crate::content::Child;
use crate::naming::attr_name;
use crate::tag::Tag;

impl Tag {
    /// Render the element and its descendants to a markup string.
    pub fn render(&self) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out);
        out
    }

    /// Write the rendered markup to any [`fmt::Write`] sink.
    pub fn write_to<W: Write + ?Sized>(&self, out: &mut W) -> fmt::Result {
        let data = self.data();

        out.write_char('<')?;
        out.write_str(&data.name)?;
        for arg in &data.args {
            out.write_char(' ')?;
            out.write_str(arg)?;
        }
        for (key, value) in &data.attrs {
            let Some(value) = value.to_markup() else {
                continue;
            };
            write!(out, " {}=\"{}\"", attr_name(key), value)?;
        }

        let Some(children) = &data.children else {
            return out.write_str(" />");
        };

        out.write_char('>')?;
        for child in children {
            match child {
                Child::Text(text) => out.write_str(text)?,
                Child::Tag(tag) => tag.write_to(out)?,
            }
        }
        write!(out, "</{}>", data.name)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.write_to(f)
    }
}
