//! Element construction, attach, nesting scopes and rendering.

use insta::assert_snapshot;
use ptag::{AttrValue, Child, Content, Tag};

fn tag(name: &str, content: impl Into<Content>) -> Tag {
    Tag::new(name, content).unwrap()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn void_element() {
    ptag_testhelpers::setup();
    assert_eq!(Tag::void("br").render(), "<br />");
    assert_eq!(tag("br", ()).render(), "<br />");
}

#[test]
fn any_tag_name_is_void_by_default() {
    for name in ["br", "my-widget", "feGaussianBlur", "x"] {
        assert_eq!(Tag::void(name).render(), format!("<{name} />"));
    }
}

#[test]
fn empty_str_content() {
    assert_eq!(tag("br", "").render(), "<br></br>");
}

#[test]
fn str_content() {
    for s in ["hello", "", "🎉", "two words"] {
        assert_eq!(tag("p", s).render(), format!("<p>{s}</p>"));
    }
}

#[test]
fn tag_content() {
    let p = tag("p", tag("span", "world"));
    assert_eq!(p.render(), "<p><span>world</span></p>");
}

#[test]
fn nested_sequence_content_is_rejected() {
    let err = Tag::new("p", vec![Content::from(vec!["a"])]).unwrap_err();
    assert_eq!(err.kind().code(), "ptag::invalid_content_kind");
    assert_eq!(err.to_string(), "invalid content type: nested sequence at index 0");
}

// ============================================================================
// Attach
// ============================================================================

#[test]
fn affix_str() {
    let p = Tag::void("p");
    p.affix("hello").unwrap();
    assert_eq!(p.render(), "<p>hello</p>");
}

#[test]
fn affix_tag() {
    let p = Tag::void("p");
    p.affix(tag("i", "hello")).unwrap();
    assert_eq!(p.render(), "<p><i>hello</i></p>");
}

#[test]
fn affix_multiple_tags() {
    let p = Tag::void("p");
    p.affix([tag("i", "hello"), tag("i", "world")]).unwrap();
    assert_eq!(p.render(), "<p><i>hello</i><i>world</i></p>");
}

#[test]
fn affix_from_str() {
    let p = tag("p", "hello-");
    p.affix("world").unwrap();
    assert_eq!(p.render(), "<p>hello-world</p>");
}

#[test]
fn affix_same_str_twice_is_idempotent() {
    let p = tag("p", "x");
    p.affix("y").unwrap().affix("y").unwrap();
    assert_eq!(p.render(), "<p>xy</p>");
}

#[test]
fn affix_same_tag_twice_is_idempotent() {
    let ul = Tag::void("ul");
    let li = tag("li", "a");
    ul.affix(&li).unwrap().add(&li).unwrap();
    assert_eq!(ul.render(), "<ul><li>a</li></ul>");
}

#[test]
fn equal_looking_tags_are_distinct_children() {
    let ul = Tag::void("ul");
    ul.affix(tag("li", "a")).unwrap();
    ul.affix(tag("li", "a")).unwrap();
    assert_eq!(ul.render(), "<ul><li>a</li><li>a</li></ul>");
}

#[test]
fn args_order() {
    let t = tag("div", "hello").with_args(["world", "foo", "bar"]);
    assert_eq!(t.args(), ["bar", "foo", "world"]);

    // omit duplicate args
    let t2 = tag("div", "hello").with_args(["world", "foo", "bar", "foo"]);
    assert_eq!(t2.args(), ["bar", "foo", "world"]);

    // attach should not add duplicate args, and keep order
    let t3 = tag("div", "hello").with_arg("foo");
    t3.affix("world").unwrap().add_args(["baz", "bar", "foo"]);
    assert_eq!(t3.args(), ["bar", "baz", "foo"]);
}

#[test]
fn attach_with_disjoint_args_is_sorted_union() {
    let t = tag("div", "x");
    t.affix("y").unwrap().add_args(["world", "foo", "bar"]);
    assert_eq!(t.args(), ["bar", "foo", "world"]);
    assert_eq!(t.render(), "<div bar foo world>xy</div>");
}

#[test]
fn attach_overwrites_named_attrs() {
    let label = tag("label", "Agree to terms").with_attr("class_", "a");
    label
        .add("🎉")
        .unwrap()
        .add_attrs([("class_", "some class"), ("for_", "foo-input")])
        .set_attr("data_columns", 3);
    assert_snapshot!(
        label.render(),
        @r#"<label class="some class" for="foo-input" data-columns="3">Agree to terms🎉</label>"#
    );
}

// ============================================================================
// Attributes
// ============================================================================

#[test]
fn restricted_attribute_name() {
    let div = Tag::void("div").with_attr("id", "foo").with_attr("class_", "bar");
    div.scope(|_| {
        tag("p", "rock").with_attr("for_", "baz");
    });
    assert_snapshot!(div.render(), @r#"<div id="foo" class="bar"><p for="baz">rock</p></div>"#);
}

#[test]
fn boolean_attribute() {
    let input = Tag::void("input").with_arg("checked").with_attr("type", "checkbox");
    assert_eq!(input.render(), r#"<input checked type="checkbox" />"#);

    // booleans are coerced with Display
    let input2 = Tag::void("input")
        .with_attr("checked", true)
        .with_attr("type", "checkbox");
    assert_eq!(input2.render(), r#"<input checked="true" type="checkbox" />"#);

    // integers too
    let input3 = Tag::void("input")
        .with_attr("checked", 1)
        .with_attr("type", "checkbox");
    assert_eq!(input3.render(), r#"<input checked="1" type="checkbox" />"#);
}

#[test]
fn none_attr() {
    let t = Tag::void("div").with_attrs([
        ("id", AttrValue::from(3)),
        ("class_", AttrValue::Null),
        ("selected", AttrValue::from("")),
    ]);
    assert_snapshot!(t.render(), @r#"<div id="3" selected="" />"#);
}

// ============================================================================
// Nesting scopes
// ============================================================================

#[test]
fn context_scope() {
    let div = tag("div", "hello");
    {
        let _div = div.enter();
        tag("p", "world");
        tag("p", "🎉");
    }
    assert_eq!(div.render(), "<div>hello<p>world</p><p>🎉</p></div>");
}

#[test]
fn two_level_context() {
    let div = Tag::void("div");
    div.scope(|_| {
        tag("p", "hello");
        tag("p", "shing").scope(|_| {
            tag("span", "world");
        });
    });
    assert_eq!(div.render(), "<div><p>hello</p><p>shing<span>world</span></p></div>");
}

#[test]
fn two_level_context_with_str() {
    let div = Tag::void("div");
    div.scope(|div| {
        tag("p", "hello");
        Tag::void("p").scope(|_| {
            tag("span", "world");
        });
        div.affix("shing").unwrap();
    });
    assert_eq!(div.render(), "<div><p>hello</p><p><span>world</span></p>shing</div>");
}

#[test]
fn str_tag_mix_in_scope() {
    let p = Tag::void("p");
    p.scope(|p| {
        p.affix(vec![Content::from(tag("i", "hello")), "world".into()])
            .unwrap();
    });
    assert_eq!(p.render(), "<p><i>hello</i>world</p>");
}

#[test]
fn last_attach_wins_inside_scope() {
    let a = Tag::void("a");
    let (b, c) = a.scope(|_| {
        let b = Tag::void("b");
        let c = Tag::void("c");
        b.affix(&c).unwrap();
        (b, c)
    });
    assert_eq!(a.children(), Some(vec![Child::Tag(b.clone())]));
    assert_eq!(b.children(), Some(vec![Child::Tag(c)]));
    assert_eq!(a.render(), "<a><b><c /></b></a>");
}

#[test]
fn multiple_content_moves_children() {
    let html = Tag::void("html");
    html.scope(|_| {
        let t1 = tag("i", "hello");
        let t2 = tag("p", "world");
        tag("div", [t1, t2]);
        tag("p", "something").scope(|_| {
            tag("span", "yeah");
        });
    });
    assert_eq!(
        html.render(),
        "<html><div><i>hello</i><p>world</p></div><p>something<span>yeah</span></p></html>"
    );
}

#[test]
fn elements_mutated_after_attach_render_mutated() {
    let html = Tag::void("html");
    html.scope(|_| {
        let div = tag("div", "hello");
        div.affix(tag("p", "world")).unwrap();
        div.set_attr("id", "main");
    });
    assert_eq!(
        html.render(),
        r#"<html><div id="main">hello<p>world</p></div></html>"#
    );
}

#[test]
fn scope_closes_on_panic() {
    let div = Tag::void("div");
    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        div.scope(|_| panic!("boom"))
    }));
    assert!(result.is_err());
    assert_eq!(ptag::context::depth(), 0);
    assert!(Tag::void("free").parent().is_none());
}

#[test]
fn threads_have_independent_contexts() {
    let div = Tag::void("div");
    let _scope = div.enter();
    let rendered = std::thread::spawn(|| {
        assert_eq!(ptag::context::depth(), 0);
        tag("p", "other thread").render()
    })
    .join()
    .unwrap();
    assert_eq!(rendered, "<p>other thread</p>");
    assert!(div.is_void());
}
