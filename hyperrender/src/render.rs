//! Incremental HTML serializer.
//!
//! [`Renderer`] walks a node tree depth-first with an explicit stack, so it
//! can stop after any emitted unit and pick up again later without
//! re-walking from the root. Each stack frame owns the remaining children of
//! an open element together with the closing tag to emit once they run out.
//!
//! Output follows the HTML serialization rules the view layer relies on:
//!
//! - Void elements self-close (`<br/>`) and never get children or end tags
//! - Text and attribute values escape `"`, `&`, `'`, `<` and `>`
//! - `innerHTML` is emitted raw and replaces the element's children
//! - `key`, `innerHTML`, `__source` and function-valued attributes are not
//!   rendered as attributes
//! - `class`/`className` values are flattened, object `style` values are
//!   stringified

use crate::class::concat_class_names;
use crate::error::{RenderError, Result};
use crate::escape::{push_escaped, push_escaped_value};
use crate::node::{Element, Node};
use crate::resolve::{Resolved, resolve};
use crate::style::stringify_styles;
use crate::tracing_macros::{debug, trace};
use crate::value::Value;
use compact_str::{CompactString, format_compact};
use smallvec::SmallVec;
use std::fmt::Write;

/// Options for rendering.
#[derive(Clone, Debug)]
pub struct RenderOptions {
    /// Longest chain of components/lazy nodes resolved for a single child
    /// before giving up (default: 1024).
    pub max_resolve_depth: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_resolve_depth: 1024,
        }
    }
}

impl RenderOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the component chain limit.
    pub fn max_resolve_depth(mut self, depth: usize) -> Self {
        self.max_resolve_depth = depth;
        self
    }
}

/// HTML5 void elements - these never have end tags.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr",
];

/// Attribute names that configure the node rather than the markup.
const RESERVED_ATTRIBUTES: &[&str] = &["key", "innerHTML", "__source"];

/// Check if a tag is a void element. The match is exact: `BR` is not `br`.
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

/// One open level of the walk.
struct Frame<S, A> {
    children: std::vec::IntoIter<Node<S, A>>,
    closing: CompactString,
}

impl<S, A> Frame<S, A> {
    fn new(children: Vec<Node<S, A>>, closing: CompactString) -> Self {
        Self {
            children: children.into_iter(),
            closing,
        }
    }
}

type Stack<S, A> = SmallVec<[Frame<S, A>; 16]>;

/// Drop `nodes` and everything below them without recursing.
///
/// The derived drop of a `Node` descends one native stack frame per tree
/// level; each element's children are moved onto a heap worklist instead.
fn dismantle<S, A>(nodes: impl IntoIterator<Item = Node<S, A>>) {
    let mut pending: Vec<Node<S, A>> = nodes.into_iter().collect();
    while let Some(node) = pending.pop() {
        match node {
            Node::Element(mut element) => pending.append(&mut element.children),
            Node::Fragment(mut children) => pending.append(&mut children),
            Node::Text(_) | Node::Component(_) | Node::Lazy(_) => {}
        }
    }
}

/// Drop every unwalked subtree left on `stack`.
fn dismantle_stack<S, A>(stack: &mut Stack<S, A>) {
    while let Some(frame) = stack.pop() {
        dismantle(frame.children);
    }
}

/// Pull-based renderer over one tree.
///
/// ```rust
/// use hyperrender::{Element, Renderer};
///
/// let tree: Element = Element::new("div").child(Element::new("input"));
/// let mut reader = Renderer::new(tree);
/// assert_eq!(reader.pull(1).unwrap().as_deref(), Some("<div>"));
/// assert_eq!(reader.pull(1).unwrap().as_deref(), Some("<input/>"));
/// assert_eq!(reader.pull(1).unwrap().as_deref(), Some("</div>"));
/// assert_eq!(reader.pull(1).unwrap(), None);
/// ```
pub struct Renderer<S = (), A = ()> {
    stack: Stack<S, A>,
    state: S,
    actions: A,
    options: RenderOptions,
    ended: bool,
}

impl Renderer {
    /// Create a renderer over a tree with no application state.
    pub fn new(root: impl Into<Node>) -> Self {
        Self::with_state(root, (), ())
    }
}

impl<S, A> Renderer<S, A> {
    /// Create a renderer whose components receive `state` and `actions`.
    pub fn with_state(root: impl Into<Node<S, A>>, state: S, actions: A) -> Self {
        let mut stack = Stack::new();
        stack.push(Frame::new(vec![root.into()], CompactString::default()));
        trace!("renderer created");
        Self {
            stack,
            state,
            actions,
            options: RenderOptions::default(),
            ended: false,
        }
    }

    /// Replace the render options.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// The state handed to components.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The actions handed to components.
    pub fn actions(&self) -> &A {
        &self.actions
    }

    /// Returns true once the whole tree has been emitted (or a pull failed).
    pub fn is_ended(&self) -> bool {
        self.ended
    }

    /// Emit at least `max_bytes` bytes of markup, or whatever is left.
    ///
    /// Output is produced in whole units (a tag, a text node, a closing
    /// tag), so a chunk may run past `max_bytes` but never splits one.
    /// Returns `Ok(None)` once the tree is exhausted; a call that finishes
    /// the tree without emitting anything returns `Ok(None)` directly.
    /// `pull(0)` on a live renderer returns an empty chunk.
    ///
    /// Errors end the renderer: later calls return `Ok(None)`.
    pub fn pull(&mut self, max_bytes: usize) -> Result<Option<String>> {
        if self.ended {
            return Ok(None);
        }

        let mut out = String::new();
        while out.len() < max_bytes {
            let next = match self.stack.last_mut() {
                Some(frame) => frame.children.next(),
                None => {
                    debug!("render finished");
                    self.ended = true;
                    break;
                }
            };

            let Some(child) = next else {
                if let Some(frame) = self.stack.pop() {
                    trace!(depth = self.stack.len(), closing = %frame.closing, "frame exhausted");
                    out.push_str(&frame.closing);
                }
                continue;
            };

            match resolve(
                child,
                &self.state,
                &self.actions,
                self.options.max_resolve_depth,
            ) {
                Ok(Resolved::Blank) => {}
                Ok(Resolved::Text(value)) => push_escaped_value(&mut out, &value),
                Ok(Resolved::Fragment(children)) => {
                    self.stack
                        .push(Frame::new(children, CompactString::default()));
                }
                Ok(Resolved::Element(element)) => {
                    serialize_fragment(element, &mut out, &mut self.stack);
                }
                Err(err) => return Err(self.fail(err)),
            }
        }

        if self.ended && out.is_empty() {
            return Ok(None);
        }
        Ok(Some(out))
    }

    fn fail(&mut self, err: RenderError) -> RenderError {
        debug!(%err, "render failed");
        self.ended = true;
        dismantle_stack(&mut self.stack);
        err
    }
}

impl<S, A> Drop for Renderer<S, A> {
    fn drop(&mut self) {
        if !self.stack.is_empty() {
            trace!(depth = self.stack.len(), "renderer dropped before the end");
        }
        dismantle_stack(&mut self.stack);
    }
}

/// Emit the opening part of `element` and either push its children onto
/// `stack` or close it right away.
fn serialize_fragment<S, A>(element: Element<S, A>, out: &mut String, stack: &mut Stack<S, A>) {
    let raw = element.inner_html().cloned();
    let Element {
        tag,
        attrs,
        children,
    } = element;

    let mut closing = CompactString::default();
    if !tag.is_empty() {
        out.push('<');
        out.push_str(&tag);
        for (name, value) in &attrs {
            write_attribute(out, name, value);
        }

        if is_void_element(&tag) {
            out.push_str("/>");
            dismantle(children);
            return;
        }
        out.push('>');
        closing = format_compact!("</{tag}>");
    }

    if let Some(html) = raw {
        let _ = write!(out, "{html}");
        out.push_str(&closing);
        dismantle(children);
        return;
    }

    if children.is_empty() {
        out.push_str(&closing);
    } else {
        trace!(%tag, children = children.len(), "frame pushed");
        stack.push(Frame::new(children, closing));
    }
}

fn write_attribute(out: &mut String, name: &str, value: &Value) {
    if value.is_null() || value.is_handler() || RESERVED_ATTRIBUTES.contains(&name) {
        return;
    }

    match name {
        "class" | "className" => {
            let classes = concat_class_names(value);
            if !classes.is_empty() {
                out.push_str(" class=\"");
                push_escaped(out, &classes);
                out.push('"');
            }
        }
        "style" => match value {
            Value::Map(styles) => {
                let css = stringify_styles(styles);
                if !css.is_empty() {
                    out.push_str(" style=\"");
                    push_escaped(out, &css);
                    out.push('"');
                }
            }
            other => write_plain_attribute(out, name, other),
        },
        _ => write_plain_attribute(out, name, value),
    }
}

fn write_plain_attribute(out: &mut String, name: &str, value: &Value) {
    match value {
        Value::Bool(false) => {}
        Value::Bool(true) => {
            out.push(' ');
            out.push_str(name);
        }
        _ => {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            push_escaped_value(out, value);
            out.push('"');
        }
    }
}

/// Render a whole tree to a string.
pub fn render_to_string(root: impl Into<Node>) -> Result<String> {
    render_to_string_with_options(root, &RenderOptions::default())
}

/// Render a whole tree to a string with custom options.
pub fn render_to_string_with_options(
    root: impl Into<Node>,
    options: &RenderOptions,
) -> Result<String> {
    drain(Renderer::new(root).with_options(options.clone()))
}

/// Render a view with application state to a string.
pub fn render_to_string_with_state<S, A>(
    root: impl Into<Node<S, A>>,
    state: S,
    actions: A,
) -> Result<String> {
    render_to_string_with_state_and_options(root, state, actions, &RenderOptions::default())
}

/// Render a view with application state and custom options to a string.
pub fn render_to_string_with_state_and_options<S, A>(
    root: impl Into<Node<S, A>>,
    state: S,
    actions: A,
    options: &RenderOptions,
) -> Result<String> {
    drain(Renderer::with_state(root, state, actions).with_options(options.clone()))
}

fn drain<S, A>(mut renderer: Renderer<S, A>) -> Result<String> {
    Ok(renderer.pull(usize::MAX)?.unwrap_or_default())
}

// =============================================================================
// Tests
// =============================================================================
