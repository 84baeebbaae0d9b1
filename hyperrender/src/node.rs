//! Virtual node model.
//!
//! Every node shape the view layer can hand us is decided once, when it is
//! built (or adapted, see [`crate::json`]), into one of the [`Node`]
//! variants. The walker never inspects fields to guess what it holds.
//!
//! `S` and `A` are the state and actions types threaded into components.
//! Plain trees with no application state use the `()` defaults.
//!
//! # Example
//!
//! ```rust
//! use hyperrender::{Element, Node, h, render_to_string};
//!
//! let list: Node = h("ul", [("class", "items")], ["one", "two"]);
//! assert_eq!(
//!     render_to_string(list).unwrap(),
//!     r#"<ul class="items">onetwo</ul>"#
//! );
//!
//! let input: Element = Element::new("input").attr("type", "checkbox").attr("checked", true);
//! assert_eq!(render_to_string(input).unwrap(), r#"<input type="checkbox" checked/>"#);
//! ```

use crate::value::{Map, Value};
use compact_str::CompactString;
use std::fmt;
use std::sync::Arc;

/// A component: produces a node from the current state and actions.
pub type ViewFn<S, A> = Arc<dyn Fn(&S, &A) -> Node<S, A> + Send + Sync>;

/// The view function of a [`Lazy`] node.
pub type LazyViewFn<S, A> = Arc<dyn Fn(&Value) -> Node<S, A> + Send + Sync>;

/// A deferred view: a payload plus the function that turns it into a node.
pub struct Lazy<S = (), A = ()> {
    /// Called with [`Lazy::props`] when the walker reaches this node.
    pub view: LazyViewFn<S, A>,
    /// Payload handed to the view.
    pub props: Value,
}

impl<S, A> Clone for Lazy<S, A> {
    fn clone(&self) -> Self {
        Self {
            view: Arc::clone(&self.view),
            props: self.props.clone(),
        }
    }
}

impl<S, A> fmt::Debug for Lazy<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Lazy").field("props", &self.props).finish()
    }
}

/// A virtual DOM node.
pub enum Node<S = (), A = ()> {
    /// A tagged element (or a tagless fragment when the tag is empty).
    Element(Element<S, A>),
    /// A scalar. Null and booleans render as nothing.
    Text(Value),
    /// A function of `(state, actions)` resolved during the walk.
    Component(ViewFn<S, A>),
    /// A deferred view with its own payload.
    Lazy(Lazy<S, A>),
    /// Sibling nodes without a wrapping tag.
    Fragment(Vec<Node<S, A>>),
}

impl<S, A> Node<S, A> {
    /// A node that renders as nothing.
    pub fn empty() -> Self {
        Node::Text(Value::Null)
    }

    /// A text node.
    pub fn text(value: impl Into<Value>) -> Self {
        Node::Text(value.into())
    }

    /// A component node.
    pub fn component<F>(view: F) -> Self
    where
        F: Fn(&S, &A) -> Node<S, A> + Send + Sync + 'static,
    {
        Node::Component(Arc::new(view))
    }

    /// A lazy node that calls `view(&props)` when reached.
    pub fn lazy<F>(props: impl Into<Value>, view: F) -> Self
    where
        F: Fn(&Value) -> Node<S, A> + Send + Sync + 'static,
    {
        Node::Lazy(Lazy {
            view: Arc::new(view),
            props: props.into(),
        })
    }

    /// A fragment of sibling nodes.
    pub fn fragment<N, I>(children: I) -> Self
    where
        N: Into<Node<S, A>>,
        I: IntoIterator<Item = N>,
    {
        Node::Fragment(children.into_iter().map(Into::into).collect())
    }

    /// Get as element reference.
    pub fn as_element(&self) -> Option<&Element<S, A>> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Get as mutable element reference.
    pub fn as_element_mut(&mut self) -> Option<&mut Element<S, A>> {
        match self {
            Node::Element(e) => Some(e),
            _ => None,
        }
    }

    /// Returns true if this node still needs resolving before it can be
    /// serialized.
    pub fn is_deferred(&self) -> bool {
        matches!(self, Node::Component(_) | Node::Lazy(_))
    }
}

impl<S, A> Clone for Node<S, A> {
    fn clone(&self) -> Self {
        match self {
            Node::Element(e) => Node::Element(e.clone()),
            Node::Text(v) => Node::Text(v.clone()),
            Node::Component(view) => Node::Component(Arc::clone(view)),
            Node::Lazy(lazy) => Node::Lazy(lazy.clone()),
            Node::Fragment(children) => Node::Fragment(children.clone()),
        }
    }
}

impl<S, A> fmt::Debug for Node<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Node::Element(e) => fmt::Debug::fmt(e, f),
            Node::Text(v) => f.debug_tuple("Text").field(v).finish(),
            Node::Component(_) => f.write_str("Component"),
            Node::Lazy(lazy) => fmt::Debug::fmt(lazy, f),
            Node::Fragment(children) => f.debug_tuple("Fragment").field(children).finish(),
        }
    }
}

impl<S, A> Default for Node<S, A> {
    fn default() -> Self {
        Node::empty()
    }
}

/// An element: tag, ordered attributes, ordered children.
pub struct Element<S = (), A = ()> {
    /// The tag name. Empty means "no wrapping tag".
    pub tag: CompactString,
    /// Attributes in declaration order, which is also output order.
    pub attrs: Map,
    /// Child nodes.
    pub children: Vec<Node<S, A>>,
}

impl<S, A> Element<S, A> {
    /// Create a new element with the given tag name.
    pub fn new(tag: impl Into<CompactString>) -> Self {
        Self {
            tag: tag.into(),
            attrs: Map::new(),
            children: Vec::new(),
        }
    }

    /// Create a tagless element whose children render as siblings.
    pub fn fragment() -> Self {
        Self::new("")
    }

    /// Builder: set an attribute.
    pub fn attr(mut self, name: impl Into<CompactString>, value: impl Into<Value>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Builder: append a child.
    pub fn child(mut self, child: impl Into<Node<S, A>>) -> Self {
        self.push_child(child);
        self
    }

    /// Builder: append several children.
    pub fn children<N, I>(mut self, children: I) -> Self
    where
        N: Into<Node<S, A>>,
        I: IntoIterator<Item = N>,
    {
        self.children.extend(children.into_iter().map(Into::into));
        self
    }

    /// Builder: append a text child.
    pub fn text(mut self, text: impl Into<Value>) -> Self {
        self.push_text(text);
        self
    }

    /// Get an attribute value.
    pub fn get_attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }

    /// Set an attribute value, keeping its original position if it existed.
    pub fn set_attr(&mut self, name: impl Into<CompactString>, value: impl Into<Value>) {
        self.attrs.insert(name.into(), value.into());
    }

    /// Remove an attribute.
    pub fn remove_attr(&mut self, name: &str) -> Option<Value> {
        self.attrs.shift_remove(name)
    }

    /// Add a child node.
    pub fn push_child(&mut self, child: impl Into<Node<S, A>>) {
        self.children.push(child.into());
    }

    /// Add a text child.
    pub fn push_text(&mut self, text: impl Into<Value>) {
        self.children.push(Node::Text(text.into()));
    }

    /// Add an element child.
    pub fn push_element(&mut self, element: Element<S, A>) {
        self.children.push(Node::Element(element));
    }

    /// Raw markup that replaces this element's children, if any.
    pub fn inner_html(&self) -> Option<&Value> {
        self.attrs
            .get("innerHTML")
            .filter(|v| !v.is_null() && !v.is_handler())
    }

    /// Returns true if this element has no wrapping tag.
    pub fn is_fragment(&self) -> bool {
        self.tag.is_empty()
    }
}

impl<S, A> Clone for Element<S, A> {
    fn clone(&self) -> Self {
        Self {
            tag: self.tag.clone(),
            attrs: self.attrs.clone(),
            children: self.children.clone(),
        }
    }
}

impl<S, A> fmt::Debug for Element<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("tag", &self.tag)
            .field("attrs", &self.attrs)
            .field("children", &self.children)
            .finish()
    }
}

impl<S, A> Default for Element<S, A> {
    fn default() -> Self {
        Self::fragment()
    }
}

/// Hyperscript-style constructor.
pub fn h<S, A, K, V, N>(
    tag: impl Into<CompactString>,
    attrs: impl IntoIterator<Item = (K, V)>,
    children: impl IntoIterator<Item = N>,
) -> Node<S, A>
where
    K: Into<CompactString>,
    V: Into<Value>,
    N: Into<Node<S, A>>,
{
    Node::Element(Element {
        tag: tag.into(),
        attrs: attrs
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect(),
        children: children.into_iter().map(Into::into).collect(),
    })
}

impl<S, A> From<Element<S, A>> for Node<S, A> {
    fn from(e: Element<S, A>) -> Self {
        Node::Element(e)
    }
}

impl<S, A> From<Lazy<S, A>> for Node<S, A> {
    fn from(lazy: Lazy<S, A>) -> Self {
        Node::Lazy(lazy)
    }
}

impl<S, A> From<Value> for Node<S, A> {
    fn from(v: Value) -> Self {
        Node::Text(v)
    }
}

impl<S, A> From<&str> for Node<S, A> {
    fn from(s: &str) -> Self {
        Node::Text(s.into())
    }
}

impl<S, A> From<String> for Node<S, A> {
    fn from(s: String) -> Self {
        Node::Text(s.into())
    }
}

impl<S, A> From<CompactString> for Node<S, A> {
    fn from(s: CompactString) -> Self {
        Node::Text(s.into())
    }
}

impl<S, A> From<bool> for Node<S, A> {
    fn from(b: bool) -> Self {
        Node::Text(b.into())
    }
}

impl<S, A, T: Into<Node<S, A>>> From<Option<T>> for Node<S, A> {
    fn from(v: Option<T>) -> Self {
        v.map_or_else(Node::empty, Into::into)
    }
}

impl<S, A, T: Into<Node<S, A>>> From<Vec<T>> for Node<S, A> {
    fn from(v: Vec<T>) -> Self {
        Node::fragment(v)
    }
}

macro_rules! number_node_from {
    ($($t:ty),*) => {
        $(
            impl<S, A> From<$t> for Node<S, A> {
                fn from(n: $t) -> Self {
                    Node::Text(n.into())
                }
            }
        )*
    };
}

number_node_from!(f64, f32, i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
