//! Integration tests for HTML rendering through the public API.

use hyperrender::{
    Element, Node, RenderError, RenderOptions, Renderer, Value, h, render_to_string,
    render_to_string_with_options, render_to_string_with_state,
};

fn el(tag: &str) -> Element {
    Element::new(tag)
}

fn render(node: impl Into<Node>) -> String {
    render_to_string(node).expect("render failed")
}

// =============================================================================
// Escaping
// =============================================================================

#[test]
fn test_escapes_text_content() {
    for (text, expected) in [
        ("&", "<div>&amp;</div>"),
        ("\"", "<div>&quot;</div>"),
        ("'", "<div>&#39;</div>"),
        (">", "<div>&gt;</div>"),
        ("<", "<div>&lt;</div>"),
    ] {
        assert_eq!(render(el("div").text(text)), expected, "text {text:?}");
    }
}

#[test]
fn test_escapes_script_tag_in_text() {
    let html = render(el("div").text(r#"<script type='' src=""></script>"#));
    assert_eq!(
        html,
        "<div>&lt;script type=&#39;&#39; src=&quot;&quot;&gt;&lt;/script&gt;</div>"
    );
}

#[test]
fn test_escapes_attribute_values() {
    for (value, expected) in [
        ("&", r#"<div data-attr="&amp;"></div>"#),
        ("\"", r#"<div data-attr="&quot;"></div>"#),
        ("'", r#"<div data-attr="&#39;"></div>"#),
        (">", r#"<div data-attr="&gt;"></div>"#),
        ("<", r#"<div data-attr="&lt;"></div>"#),
    ] {
        assert_eq!(render(el("div").attr("data-attr", value)), expected);
    }

    let html = render(el("div").attr("data-attr", r#"<script type='' src=""></script>"#));
    assert_eq!(
        html,
        r#"<div data-attr="&lt;script type=&#39;&#39; src=&quot;&quot;&gt;&lt;/script&gt;"></div>"#
    );
}

#[test]
fn test_escapes_url() {
    let link = el("a")
        .attr("href", "https://example.com/q?a=x&b=y#z")
        .text("ref");
    assert_eq!(
        render(link),
        r#"<a href="https://example.com/q?a=x&amp;b=y#z">ref</a>"#
    );
}

#[test]
fn test_inner_html_is_not_escaped() {
    let html = render(el("div").attr("innerHTML", "<!--comment-->"));
    assert_eq!(html, "<div><!--comment--></div>");
}

// =============================================================================
// Class
// =============================================================================

#[test]
fn test_class_string() {
    assert_eq!(
        render(el("div").attr("class", "foo bar")),
        r#"<div class="foo bar"></div>"#
    );
}

#[test]
fn test_class_empty_forms_are_omitted() {
    assert_eq!(render(el("div").attr("class", "")), "<div></div>");
    assert_eq!(
        render(el("div").attr("class", Value::map::<&str, bool, _>([]))),
        "<div></div>"
    );
    assert_eq!(render(el("div").attr("class", Value::List(vec![]))), "<div></div>");
    let falsy = Value::list([
        Value::from(""),
        Value::Null,
        Value::from(false),
        Value::from(0),
        Value::from(f64::NAN),
    ]);
    assert_eq!(render(el("div").attr("class", falsy)), "<div></div>");
}

#[test]
fn test_class_lists_and_maps() {
    let list = Value::list([
        Value::from("foo"),
        Value::from("bar"),
        Value::from(false),
        Value::from("baz"),
    ]);
    assert_eq!(
        render(el("div").attr("class", list)),
        r#"<div class="foo bar baz"></div>"#
    );

    let nested = Value::list([
        Value::from("foo"),
        Value::list([Value::from("bar"), Value::list([Value::from(false), "baz".into()])]),
    ]);
    assert_eq!(
        render(el("div").attr("class", nested)),
        r#"<div class="foo bar baz"></div>"#
    );

    let map = Value::map([("foo", true), ("bar", true), ("quux", false), ("baz", true)]);
    assert_eq!(
        render(el("div").attr("class", map)),
        r#"<div class="foo bar baz"></div>"#
    );

    let mixed = Value::list([
        Value::from("foo"),
        Value::from("foo-bar"),
        Value::map([("foo-baz", true)]),
        Value::list(["fum", "bam", "pow"]),
    ]);
    assert_eq!(
        render(el("div").attr("class", mixed)),
        r#"<div class="foo foo-bar foo-baz fum bam pow"></div>"#
    );
}

#[test]
fn test_class_name_renders_as_class() {
    let value = Value::list([Value::from("foo"), Value::map([("bar", true)])]);
    assert_eq!(
        render(el("div").attr("className", value)),
        r#"<div class="foo bar"></div>"#
    );
}

// =============================================================================
// Styles
// =============================================================================

fn styled(styles: Value) -> String {
    render(el("div").attr("style", styles))
}

#[test]
fn test_style_object() {
    let styles = Value::map([
        ("left", Value::from(0)),
        ("margin", Value::from(16)),
        ("opacity", Value::from(0.5)),
        ("padding", Value::from("4px")),
    ]);
    assert_eq!(
        styled(styles),
        r#"<div style="left:0;margin:16;opacity:0.5;padding:4px"></div>"#
    );
}

#[test]
fn test_style_values_are_not_trimmed() {
    let styles = Value::map([
        ("left", Value::from("16 ")),
        ("opacity", Value::from(0.5)),
        ("right", Value::from(" 4 ")),
    ]);
    assert_eq!(
        styled(styles),
        r#"<div style="left:16 ;opacity:0.5;right: 4 "></div>"#
    );
}

#[test]
fn test_style_vendor_prefixes() {
    let styles = Value::map([
        ("WebkitTransition", "none"),
        ("MozTransition", "none"),
        ("msTransition", "none"),
    ]);
    assert_eq!(
        styled(styles),
        r#"<div style="-webkit-transition:none;-moz-transition:none;-ms-transition:none"></div>"#
    );
}

#[test]
fn test_style_omitted_when_all_null() {
    let styles = Value::map([("backgroundColor", Value::Null), ("display", Value::Null)]);
    assert_eq!(styled(styles), "<div></div>");
}

#[test]
fn test_style_names_already_hyphenated() {
    let styles = Value::map([
        ("background-color", "Orange"),
        ("-webkit-transform", "translateX(0)"),
    ]);
    assert_eq!(
        styled(styles),
        r#"<div style="background-color:Orange;-webkit-transform:translateX(0)"></div>"#
    );
}

#[test]
fn test_style_custom_properties_and_units() {
    let styles = Value::map([("--foo", "red"), ("color", "var(--foo)")]);
    assert_eq!(styled(styles), r#"<div style="--foo:red;color:var(--foo)"></div>"#);

    let styles = Value::map([
        ("--foo", Value::from(5)),
        ("flex", Value::from(0)),
        ("opacity", Value::from(0.5)),
    ]);
    assert_eq!(styled(styles), r#"<div style="--foo:5;flex:0;opacity:0.5"></div>"#);
}

#[test]
fn test_style_invalid_values_pass_through() {
    let styles = Value::map([
        ("height", Value::from(f64::NAN)),
        ("fontSize", Value::from(f64::INFINITY)),
        ("backgroundImage", Value::from("url(foo;bar)")),
    ]);
    assert_eq!(
        styled(styles),
        r#"<div style="height:NaN;font-size:Infinity;background-image:url(foo;bar)"></div>"#
    );
}

#[test]
fn test_style_css_text_is_spliced() {
    let styles = Value::map([
        ("top", Value::from(0)),
        ("cssText", Value::from("color:blue;font-size:10px")),
        ("bottom", Value::from(0)),
    ]);
    assert_eq!(
        styled(styles),
        r#"<div style="top:0;color:blue;font-size:10px;bottom:0"></div>"#
    );
}

#[test]
fn test_style_string_is_kept() {
    assert_eq!(
        styled(Value::from("color:red;font-size:12px")),
        r#"<div style="color:red;font-size:12px"></div>"#
    );
}

#[test]
fn test_render_is_deterministic() {
    fn page() -> Element {
        let styles = Value::map([
            ("borderTopLeftRadius", Value::from("2px")),
            ("msGridRowAlign", Value::from("center")),
            ("WebkitLineClamp", Value::from(3)),
            ("cssText", Value::from("color:red")),
        ]);
        let class = Value::list([
            Value::from("card"),
            Value::map([("active", true), ("hidden", false)]),
        ]);
        el("section")
            .attr("class", class)
            .child(el("p").attr("style", styles).text("a < b"))
    }

    let first = render(page());

    let warm = Value::map([
        ("borderTopLeftRadius", Value::from("0")),
        ("msGridRowAlign", Value::from("start")),
        ("WebkitLineClamp", Value::from(1)),
    ]);
    std::thread::scope(|scope| {
        scope.spawn(|| hyperrender::stringify_styles(warm.as_map().expect("map")));
    });

    let second = render(page());
    assert_eq!(first, second);
    assert_eq!(
        first,
        concat!(
            r#"<section class="card active"><p style="border-top-left-radius:2px;"#,
            r#"-ms-grid-row-align:center;-webkit-line-clamp:3;color:red">a &lt; b</p></section>"#,
        )
    );
}

// =============================================================================
// Attributes
// =============================================================================

#[test]
fn test_attribute_scalars() {
    assert_eq!(render(el("div").attr("title", "foo")), r#"<div title="foo"></div>"#);
    assert_eq!(render(el("input").attr("checked", true)), "<input checked/>");
    assert_eq!(
        render(el("div").attr("data-attrName", "")),
        r#"<div data-attrName=""></div>"#
    );
    assert_eq!(render(el("div").attr("data-attr", 12)), r#"<div data-attr="12"></div>"#);
    assert_eq!(
        render(el("div").attr("data-attr", f64::NAN)),
        r#"<div data-attr="NaN"></div>"#
    );
    assert_eq!(
        render(el("div").attr("data-attr", f64::INFINITY)),
        r#"<div data-attr="Infinity"></div>"#
    );
}

#[test]
fn test_attribute_list_joins_with_commas() {
    let value = Value::list([Value::from(0), Value::from(1), Value::from("2")]);
    assert_eq!(
        render(el("div").attr("data-attr", value)),
        r#"<div data-attr="0,1,2"></div>"#
    );
}

#[test]
fn test_attribute_with_display_value() {
    struct Sample;
    impl std::fmt::Display for Sample {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("sample")
        }
    }
    assert_eq!(
        render(el("div").attr("data-attr", Value::from_display(Sample))),
        r#"<div data-attr="sample"></div>"#
    );
}

#[test]
fn test_attributes_that_are_not_rendered() {
    assert_eq!(render(el("div").attr("data-attr", false)), "<div></div>");
    assert_eq!(render(el("div").attr("data-attr", Value::Null)), "<div></div>");
    assert_eq!(render(el("div").attr("key", true)), "<div></div>");
    assert_eq!(render(el("div").attr("innerHTML", Value::Null)), "<div></div>");

    let source = Value::map([
        ("fileName", Value::from("this/file.js")),
        ("lineNumber", Value::from(10)),
    ]);
    assert_eq!(render(el("div").attr("__source", source)), "<div></div>");

    let button = el("button")
        .attr("type", "button")
        .attr("onclick", Value::handler(|| ()));
    assert_eq!(render(button), r#"<button type="button"></button>"#);
}

#[test]
fn test_empty_inner_html_renders_nothing_inside() {
    assert_eq!(render(el("div").attr("innerHTML", "")), "<div></div>");
}

#[test]
fn test_inner_html_takes_precedence_over_children() {
    let div = el("div").attr("innerHTML", "foo").text("bar");
    assert_eq!(render(div), "<div>foo</div>");
}

#[test]
fn test_web_component_attribute_case_is_kept() {
    let node = el("custom-element-name").attr("arabicForm", "foo");
    assert_eq!(
        render(node),
        r#"<custom-element-name arabicForm="foo"></custom-element-name>"#
    );
}

// =============================================================================
// Renderer
// =============================================================================

#[test]
fn test_renderer_zero_budget_is_empty() {
    let mut reader = Renderer::new(el("div"));
    assert_eq!(reader.pull(0).unwrap().as_deref(), Some(""));
}

#[test]
fn test_renderer_emits_whole_units() {
    let mut reader = Renderer::new(el("div").child(el("input")));
    assert_eq!(reader.pull(1).unwrap().as_deref(), Some("<div>"));
    assert_eq!(reader.pull(1).unwrap().as_deref(), Some("<input/>"));
    assert_eq!(reader.pull(1).unwrap().as_deref(), Some("</div>"));
    assert_eq!(reader.pull(1).unwrap(), None);
}

#[test]
fn test_renderer_returns_none_at_the_end() {
    let mut reader = Renderer::new(el("div"));
    assert_eq!(reader.pull(usize::MAX).unwrap().as_deref(), Some("<div></div>"));
    assert_eq!(reader.pull(usize::MAX).unwrap(), None);
    assert!(reader.is_ended());
}

#[test]
fn test_renderer_chunks_concatenate_to_full_output() {
    let list: Element = el("ul").children((0..50).map(|i| el("li").text(i)));
    let expected = render(list.clone());

    for budget in [1, 7, 64, 4096] {
        let mut reader = Renderer::new(list.clone());
        let mut html = String::new();
        while let Some(chunk) = reader.pull(budget).unwrap() {
            html.push_str(&chunk);
        }
        assert_eq!(html, expected, "budget {budget}");
    }
}

#[test]
fn test_renderer_budget_counts_bytes() {
    let mut reader = Renderer::new(el("p").text("ü").text("ü"));
    // "<p>" is 3 bytes, each "ü" is 2
    assert_eq!(reader.pull(4).unwrap().as_deref(), Some("<p>ü"));
    assert_eq!(reader.pull(2).unwrap().as_deref(), Some("ü"));
    assert_eq!(reader.pull(2).unwrap().as_deref(), Some("</p>"));
}

// =============================================================================
// Whole-tree rendering
// =============================================================================

#[test]
fn test_simple_markup() {
    assert_eq!(render(el("div").text("hello world")), "<div>hello world</div>");
    assert_eq!(render(el("div")), "<div></div>");
    assert_eq!(render(el("input")), "<input/>");
}

#[test]
fn test_void_elements_are_case_sensitive() {
    assert_eq!(render(el("br")), "<br/>");
    assert_eq!(render(el("BR")), "<BR></BR>");
    assert_eq!(render(el("Img").attr("alt", "x")), r#"<Img alt="x"></Img>"#);
}

#[test]
fn test_component_returning_null_renders_nothing() {
    let node: Node = Node::component(|_, _| Node::empty());
    assert_eq!(render(node), "");
}

#[test]
fn test_composite_components() {
    fn child(name: &'static str) -> Node {
        Node::component(move |_, _| Node::Element(el("h1").text("Hello ").text(name)))
    }
    let parent: Node = Node::component(|_, _| Node::Element(el("div").child(child("World"))));
    assert_eq!(render(parent), "<div><h1>Hello World</h1></div>");
}

#[test]
fn test_blank_children_render_nothing() {
    let div = el("div")
        .child(Node::empty())
        .child(Value::Null)
        .child(false)
        .child(true)
        .child(0);
    assert_eq!(render(div), "<div>0</div>");
}

#[test]
fn test_fragment_content() {
    let frag = Element::fragment().child(el("meta")).child(el("link"));
    assert_eq!(render(frag), "<meta/><link/>");

    let raw = Element::fragment().attr("innerHTML", "<sciprt>alert('hello world')</sciprt>");
    assert_eq!(render(raw), "<sciprt>alert('hello world')</sciprt>");

    let list: Node = vec![el("meta"), el("link")].into();
    assert_eq!(render(list), "<meta/><link/>");
}

#[test]
fn test_hyperscript_helper() {
    let node: Node = h("a", [("href", "/"), ("class", "nav")], ["home"]);
    assert_eq!(render(node), r#"<a href="/" class="nav">home</a>"#);
}

#[test]
fn test_lazy_nodes() {
    let node: Node = Node::lazy(Value::map([("name", "foo")]), |props| {
        Node::Element(el("div").child(props.get("name").cloned().unwrap_or_default()))
    });
    assert_eq!(render(node), "<div>foo</div>");
}

#[test]
fn test_nested_lazy_nodes() {
    let node: Node = Node::lazy(Value::Null, |_| {
        Node::lazy(Value::map([("name", "foo")]), |props| {
            Node::Element(el("div").child(props.get("name").cloned().unwrap_or_default()))
        })
    });
    assert_eq!(render(node), "<div>foo</div>");
}

struct Counter {
    count: i64,
}

struct CounterActions {
    up: Value,
}

#[test]
fn test_counter_with_state_and_actions() {
    let actions = CounterActions {
        up: Value::handler(|c: &Counter| Counter { count: c.count + 1 }),
    };
    let view = Node::<Counter, CounterActions>::component(|state, actions| {
        Node::Element(
            Element::new("button")
                .attr("type", "button")
                .attr("onclick", actions.up.clone())
                .text(state.count),
        )
    });
    let html = render_to_string_with_state(view, Counter { count: 100 }, actions).unwrap();
    assert_eq!(html, r#"<button type="button">100</button>"#);
}

#[test]
fn test_runaway_component_chain_is_an_error() {
    fn again(_: &(), _: &()) -> Node {
        Node::component(again)
    }
    let options = RenderOptions::new().max_resolve_depth(16);
    let err = render_to_string_with_options(el("div").child(Node::component(again)), &options)
        .unwrap_err();
    assert_eq!(err, RenderError::ResolveDepthExceeded { limit: 16 });
    assert_eq!(
        err.to_string(),
        "node resolution exceeded 16 nested components"
    );
}
