//! The element node and its construction / attach operations.

use std::cell::{Ref, RefCell};
use std::collections::BTreeSet;
use std::fmt;
use std::rc::{Rc, Weak};

use indexmap::IndexMap;

use crate::content::{Child, Content, Text};
use crate::context;
use crate::error::{Error, ErrorKind};
use crate::tracing_macros::trace;
use crate::value::AttrValue;

/// An HTML / SVG element.
///
/// `Tag` is a handle: cloning it is cheap and every clone refers to the same
/// element, so an element can be kept in a variable, sit on the nesting
/// context, and appear in its parent's children at once. Mutations through any
/// handle are visible through all of them. Handles are not `Send`.
///
/// ```
/// use ptag::Tag;
///
/// // void element, no content
/// assert_eq!(Tag::void("br").to_string(), "<br />");
///
/// // empty string content: closing tag but no content
/// let script = Tag::new("script", "")?.with_attr("src", "url");
/// assert_eq!(script.to_string(), r#"<script src="url"></script>"#);
///
/// // value-less attributes come first, sorted; named ones keep their order
/// let a = Tag::new("a", "foo")?
///     .with_args(["text-teal-400", "m-2", "rounded"])
///     .with_attr("href", "bar")
///     .with_attr("target", None::<&str>);
/// assert_eq!(a.to_string(), r#"<a m-2 rounded text-teal-400 href="bar">foo</a>"#);
///
/// // nesting
/// let div = Tag::new("div", Tag::new("i", "x")?)?;
/// assert_eq!(div.to_string(), "<div><i>x</i></div>");
/// # Ok::<(), ptag::Error>(())
/// ```
#[derive(Clone)]
pub struct Tag(pub(crate) Rc<RefCell<TagData>>);

pub(crate) struct TagData {
    pub(crate) name: String,
    /// Value-less attributes; the set keeps them deduplicated and sorted.
    pub(crate) args: BTreeSet<String>,
    /// Named attributes in insertion order.
    pub(crate) attrs: IndexMap<String, AttrValue>,
    /// `None` means a void (self-closing) element.
    pub(crate) children: Option<Vec<Child>>,
    /// Most recent element this one was attached to. Only ever compared.
    pub(crate) parent: Weak<RefCell<TagData>>,
}

impl Tag {
    /// Create an element with the given content.
    ///
    /// If a nesting context is open on this thread (see [`Tag::enter`]), the
    /// new element is attached to the innermost open element.
    pub fn new(name: impl fmt::Display, content: impl Into<Content>) -> Result<Tag, Error> {
        let tag = Tag::detached(name.to_string());
        let host = context::current();
        let children = tag.normalize(content.into(), host.as_ref())?;
        tag.0.borrow_mut().children = children;
        tag.attach_to(host);
        Ok(tag)
    }

    /// Create a void element (`<name />`).
    ///
    /// Like [`Tag::new`], the element joins the innermost open nesting context.
    pub fn void(name: impl fmt::Display) -> Tag {
        let tag = Tag::detached(name.to_string());
        tag.attach_to(context::current());
        tag
    }

    fn detached(name: String) -> Tag {
        trace!(tag = %name, "creating element");
        Tag(Rc::new(RefCell::new(TagData {
            name,
            args: BTreeSet::new(),
            attrs: IndexMap::new(),
            children: None,
            parent: Weak::new(),
        })))
    }

    fn attach_to(&self, host: Option<Tag>) {
        if let Some(top) = host {
            trace!(tag = %self.name(), parent = %top.name(), "attaching to open context");
            self.set_parent(&top);
            top.append(vec![Child::Tag(self.clone())]);
        }
    }

    /// Turn content into children, re-parenting every element to `self`.
    ///
    /// Everything is validated before any element is re-parented. `host` is
    /// the open element `self` is about to join, if any: no item may contain
    /// it either.
    fn normalize(
        &self,
        content: Content,
        host: Option<&Tag>,
    ) -> Result<Option<Vec<Child>>, Error> {
        let items = match content {
            Content::Void => return Ok(None),
            Content::Many(items) => items,
            single => vec![single],
        };

        for (index, item) in items.iter().enumerate() {
            match item {
                Content::Text(_) => {}
                Content::Tag(tag) if tag.contains(self) => {
                    return Err(Error::new(ErrorKind::SelfNesting { tag: self.name() }));
                }
                Content::Tag(tag) if host.is_some_and(|host| tag.contains(host)) => {
                    let tag = host.map(Tag::name).unwrap_or_default();
                    return Err(Error::new(ErrorKind::SelfNesting { tag }));
                }
                Content::Tag(_) => {}
                other => {
                    return Err(Error::new(ErrorKind::InvalidContentKind {
                        found: other.kind_name(),
                        index: Some(index),
                    }));
                }
            }
        }

        let children = items
            .into_iter()
            .filter_map(|item| match item {
                Content::Text(text) => Some(Child::Text(Text::new(text))),
                Content::Tag(tag) => {
                    tag.set_parent(self);
                    Some(Child::Tag(tag))
                }
                Content::Void | Content::Many(_) => None,
            })
            .collect();
        Ok(Some(children))
    }

    /// Whether `other` is this element or sits anywhere below it.
    fn contains(&self, other: &Tag) -> bool {
        let mut pending = vec![self.clone()];
        while let Some(tag) = pending.pop() {
            if tag == *other {
                return true;
            }
            pending.extend(
                tag.data()
                    .children
                    .iter()
                    .flatten()
                    .filter_map(|child| child.as_tag().cloned()),
            );
        }
        false
    }

    fn set_parent(&self, parent: &Tag) {
        self.0.borrow_mut().parent = Rc::downgrade(&parent.0);
    }

    /// Append children, skipping any equal to a child present before the call.
    /// A void element becomes content-bearing.
    fn append(&self, new_children: Vec<Child>) {
        let mut data = self.0.borrow_mut();
        let children = data.children.get_or_insert_with(Vec::new);
        let existing = children.len();
        for child in new_children {
            if !children[..existing].contains(&child) {
                children.push(child);
            }
        }
    }

    /// Append content to this element.
    ///
    /// Content is normalized as in [`Tag::new`]. A child equal to one already
    /// present (same text, or the very same element) is not added twice.
    /// Attaching non-empty content to a void element gives it a closing tag.
    ///
    /// ```
    /// use ptag::Tag;
    ///
    /// let p = Tag::new("p", "hello-")?;
    /// p.affix("world")?.affix("world")?;
    /// assert_eq!(p.to_string(), "<p>hello-world</p>");
    /// # Ok::<(), ptag::Error>(())
    /// ```
    pub fn affix(&self, content: impl Into<Content>) -> Result<&Self, Error> {
        if let Some(children) = self.normalize(content.into(), None)?
            && !children.is_empty()
        {
            trace!(tag = %self.name(), count = children.len(), "affixing children");
            self.append(children);
        }
        Ok(self)
    }

    /// Same as [`Tag::affix`].
    pub fn add(&self, content: impl Into<Content>) -> Result<&Self, Error> {
        self.affix(content)
    }

    /// Merge value-less attributes into the sorted set.
    pub fn add_args<I, S>(&self, args: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.0
            .borrow_mut()
            .args
            .extend(args.into_iter().map(Into::into));
        self
    }

    /// Set a named attribute, overwriting any previous value for the key.
    pub fn set_attr(&self, key: impl Into<String>, value: impl Into<AttrValue>) -> &Self {
        self.0.borrow_mut().attrs.insert(key.into(), value.into());
        self
    }

    /// Set several named attributes; later keys win.
    pub fn add_attrs<I, K, V>(&self, attrs: I) -> &Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        self.0
            .borrow_mut()
            .attrs
            .extend(attrs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    /// Builder form of [`Tag::add_args`] with a single attribute.
    pub fn with_arg(self, arg: impl Into<String>) -> Self {
        self.add_args([arg]);
        self
    }

    /// Builder form of [`Tag::add_args`].
    pub fn with_args<I, S>(self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.add_args(args);
        self
    }

    /// Builder form of [`Tag::set_attr`].
    pub fn with_attr(self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.set_attr(key, value);
        self
    }

    /// Builder form of [`Tag::add_attrs`].
    pub fn with_attrs<I, K, V>(self, attrs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<AttrValue>,
    {
        self.add_attrs(attrs);
        self
    }

    /// The tag name.
    pub fn name(&self) -> String {
        self.0.borrow().name.clone()
    }

    /// Rename the element.
    pub fn set_name(&self, name: impl fmt::Display) -> &Self {
        self.0.borrow_mut().name = name.to_string();
        self
    }

    /// Value-less attributes, sorted.
    pub fn args(&self) -> Vec<String> {
        self.0.borrow().args.iter().cloned().collect()
    }

    /// Whether the value-less attribute is present.
    pub fn has_arg(&self, arg: &str) -> bool {
        self.0.borrow().args.contains(arg)
    }

    /// Remove a value-less attribute, returning whether it was present.
    pub fn remove_arg(&self, arg: &str) -> bool {
        self.0.borrow_mut().args.remove(arg)
    }

    /// Get a named attribute by its stored key.
    pub fn attr(&self, key: &str) -> Option<AttrValue> {
        self.0.borrow().attrs.get(key).cloned()
    }

    /// All named attributes in insertion order, keyed as stored.
    pub fn attrs(&self) -> IndexMap<String, AttrValue> {
        self.0.borrow().attrs.clone()
    }

    /// Remove a named attribute, keeping the order of the others.
    pub fn remove_attr(&self, key: &str) -> Option<AttrValue> {
        self.0.borrow_mut().attrs.shift_remove(key)
    }

    /// The children, or `None` for a void element.
    pub fn children(&self) -> Option<Vec<Child>> {
        self.0.borrow().children.clone()
    }

    /// Whether the element renders self-closing.
    pub fn is_void(&self) -> bool {
        self.0.borrow().children.is_none()
    }

    /// Drop all children and make the element self-closing.
    pub fn set_void(&self) -> &Self {
        self.0.borrow_mut().children = None;
        self
    }

    /// The element this one was most recently attached to, if it is still alive.
    pub fn parent(&self) -> Option<Tag> {
        self.0.borrow().parent.upgrade().map(Tag)
    }

    /// Whether `parent` is the element this one was most recently attached to.
    pub(crate) fn is_child_of(&self, parent: &Tag) -> bool {
        std::ptr::eq(self.0.borrow().parent.as_ptr(), Rc::as_ptr(&parent.0))
    }

    /// Concatenated text of this element and all its descendants.
    pub fn text_content(&self) -> String {
        let mut result = String::new();
        self.collect_text(&mut result);
        result
    }

    fn collect_text(&self, out: &mut String) {
        for child in self.data().children.iter().flatten() {
            match child {
                Child::Text(t) => out.push_str(t),
                Child::Tag(t) => t.collect_text(out),
            }
        }
    }

    pub(crate) fn data(&self) -> Ref<'_, TagData> {
        self.0.borrow()
    }
}

/// Handles are equal when they refer to the same element.
impl PartialEq for Tag {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}

impl Eq for Tag {}

impl fmt::Debug for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let data = self.data();
        f.debug_struct("Tag")
            .field("name", &data.name)
            .field("args", &data.args)
            .field("attrs", &data.attrs)
            .field("children", &data.children)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn void_by_default() {
        let br = Tag::void("br");
        assert!(br.is_void());
        assert_eq!(br.children(), None);
    }

    #[test]
    fn empty_string_is_not_void() {
        let br = Tag::new("br", "").unwrap();
        assert!(!br.is_void());
        assert_eq!(br.children().map(|c| c.len()), Some(1));
    }

    #[test]
    fn empty_sequence_is_not_void() {
        let ul = Tag::new("ul", Vec::<String>::new()).unwrap();
        assert_eq!(ul.children(), Some(vec![]));
    }

    #[test]
    fn name_is_coerced_from_display() {
        assert_eq!(Tag::void(2).name(), "2");
    }

    #[test]
    fn children_are_reparented() {
        let i = Tag::new("i", "x").unwrap();
        let p = Tag::new("p", &i).unwrap();
        assert_eq!(i.parent(), Some(p.clone()));
        assert!(i.is_child_of(&p));

        let div = Tag::void("div");
        div.affix(&i).unwrap();
        assert!(i.is_child_of(&div));
        assert!(!i.is_child_of(&p));
    }

    #[test]
    fn nested_sequence_is_rejected() {
        let err = Tag::new(
            "div",
            vec![Content::from("a"), Content::from(vec!["b", "c"])],
        )
        .unwrap_err();
        assert_eq!(
            err.kind(),
            &ErrorKind::InvalidContentKind {
                found: "nested sequence",
                index: Some(1),
            }
        );
    }

    #[test]
    fn void_item_is_rejected() {
        let err = Tag::new("div", vec![Content::Void]).unwrap_err();
        assert_eq!(err.kind().code(), "ptag::invalid_content_kind");
    }

    #[test]
    fn failed_affix_leaves_element_untouched() {
        let p = Tag::new("p", "a").unwrap();
        assert!(p.affix(vec![Content::from("b"), Content::Void]).is_err());
        assert_eq!(p.children().map(|c| c.len()), Some(1));
    }

    #[test]
    fn self_nesting_is_rejected() {
        let div = Tag::void("div");
        let err = div.affix(&div).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::SelfNesting { tag: "div".into() });
        assert!(div.is_void());
    }

    #[test]
    fn ancestor_nesting_is_rejected() {
        let a = Tag::void("a");
        let b = Tag::void("b");
        a.affix(&b).unwrap();
        let err = b.affix(&a).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::SelfNesting { tag: "b".into() });
        assert!(b.is_void());
        assert_eq!(a.render(), "<a><b /></a>");
    }

    #[test]
    fn former_parent_still_holding_child_is_rejected() {
        let a = Tag::void("a");
        let b = Tag::void("b");
        let x = Tag::void("x");
        a.affix(&x).unwrap();
        b.affix(&x).unwrap();
        // `x` now points at `b`, but `a` still lists it
        assert!(x.affix(&a).is_err());
        assert!(x.affix(&b).is_err());
    }

    #[test]
    fn open_scope_cannot_be_nested_into_new_child() {
        let a = Tag::void("a");
        let err = a.scope(|a| Tag::new("b", a)).unwrap_err();
        assert_eq!(err.kind(), &ErrorKind::SelfNesting { tag: "a".into() });
        assert_eq!(a.render(), "<a />");
        assert_eq!(a.parent(), None);
    }

    #[test]
    fn affix_dedups_by_text_value_and_tag_identity() {
        let p = Tag::void("p");
        let i = Tag::new("i", "x").unwrap();
        let twin = Tag::new("i", "x").unwrap();
        p.affix("hello").unwrap();
        p.affix(vec![Content::from("hello"), Content::from(&i)]).unwrap();
        p.affix(&i).unwrap();
        p.affix(&twin).unwrap();
        assert_eq!(p.children().map(|c| c.len()), Some(3));
    }

    #[test]
    fn affix_empty_sequence_keeps_void() {
        let img = Tag::void("img");
        img.affix(Vec::<&str>::new()).unwrap();
        assert!(img.is_void());
    }

    #[test]
    fn args_merge_sorted() {
        let t = Tag::new("div", "hello")
            .unwrap()
            .with_args(["world", "foo", "bar", "foo"]);
        assert_eq!(t.args(), ["bar", "foo", "world"]);

        let t3 = Tag::new("div", "hello").unwrap().with_arg("foo");
        t3.affix("world").unwrap().add_args(["baz", "bar", "foo"]);
        assert_eq!(t3.args(), ["bar", "baz", "foo"]);
    }

    #[test]
    fn attrs_overwrite_in_place() {
        let t = Tag::void("a")
            .with_attr("href", "x")
            .with_attr("id", 1)
            .with_attr("href", "y");
        let keys: Vec<_> = t.attrs().into_keys().collect();
        assert_eq!(keys, ["href", "id"]);
        assert_eq!(t.attr("href"), Some(AttrValue::from("y")));
        assert_eq!(t.remove_attr("href"), Some(AttrValue::from("y")));
        assert_eq!(t.attr("href"), None);
    }

    #[test]
    fn text_content_walks_descendants() {
        let p = Tag::new("p", vec![Content::from("a"), Tag::new("b", "c").unwrap().into()]).unwrap();
        assert_eq!(p.text_content(), "ac");
    }
}
