#![doc = include_str!("../README.md")]
#![deny(unsafe_code)]
#![warn(missing_docs)]

mod tracing_macros;

pub mod context;
pub mod naming;

mod content;
mod decl;
mod error;
mod escaping;
mod pretty;
mod render;
mod tag;
mod value;

pub use content::{Child, Content, Text};
pub use context::Scope;
pub use error::{Error, ErrorKind};
pub use pretty::{PrettyOptions, prettify};
pub use tag::Tag;
pub use value::AttrValue;
