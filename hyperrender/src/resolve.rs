//! Unwrapping of components and lazy nodes.

use crate::error::{RenderError, Result};
use crate::node::{Element, Node};
use crate::tracing_macros::trace;
use crate::value::Value;

/// A node with every component and lazy wrapper peeled off.
#[derive(Debug)]
pub enum Resolved<S = (), A = ()> {
    /// Null or a boolean: renders as nothing.
    Blank,
    /// A scalar to escape and emit.
    Text(Value),
    /// An element (possibly tagless).
    Element(Element<S, A>),
    /// Siblings without a wrapping tag.
    Fragment(Vec<Node<S, A>>),
}

impl<S, A> From<Resolved<S, A>> for Node<S, A> {
    fn from(resolved: Resolved<S, A>) -> Self {
        match resolved {
            Resolved::Blank => Node::empty(),
            Resolved::Text(v) => Node::Text(v),
            Resolved::Element(e) => Node::Element(e),
            Resolved::Fragment(children) => Node::Fragment(children),
        }
    }
}

/// Resolve `node` into something the serializer can emit.
///
/// Components are called with `(state, actions)` and lazy nodes with their
/// payload, repeatedly, until a concrete node comes out. A chain of more
/// than `max_depth` such calls fails with
/// [`RenderError::ResolveDepthExceeded`] rather than looping forever.
pub fn resolve<S, A>(
    node: Node<S, A>,
    state: &S,
    actions: &A,
    max_depth: usize,
) -> Result<Resolved<S, A>> {
    let mut node = node;
    let mut depth = 0;
    loop {
        node = match node {
            Node::Component(view) => view(state, actions),
            Node::Lazy(lazy) => (lazy.view)(&lazy.props),
            Node::Text(v) if v.is_blank() => return Ok(Resolved::Blank),
            Node::Text(v) => return Ok(Resolved::Text(v)),
            Node::Element(e) => return Ok(Resolved::Element(e)),
            Node::Fragment(children) => return Ok(Resolved::Fragment(children)),
        };
        depth += 1;
        if depth > max_depth {
            trace!(depth, "component chain too deep");
            return Err(RenderError::ResolveDepthExceeded { limit: max_depth });
        }
    }
}
