//! Application binding: a view plus the state it is rendered against.

use crate::stream::RenderStream;
use hyperrender::{
    Node, RenderOptions, Renderer, ViewFn, render_to_string_with_state_and_options,
};
use std::fmt;
use std::sync::Arc;

/// An application's view, current state and actions.
///
/// Actions are applied with [`RenderApp::dispatch`]; every render reflects
/// the state as of the call.
///
/// ```rust
/// use hyperrender::{Element, Node};
/// use hyperrender_server::RenderApp;
///
/// #[derive(Clone)]
/// struct Counter {
///     count: i64,
/// }
///
/// let mut app = RenderApp::new(Counter { count: 0 }, (), |state: &Counter, _: &()| {
///     Node::Element(Element::new("h1").text(state.count))
/// });
/// app.dispatch(|s| Counter { count: s.count + 100 });
/// assert_eq!(app.to_html().unwrap(), "<h1>100</h1>");
/// ```
pub struct RenderApp<S, A = ()> {
    state: S,
    actions: A,
    view: ViewFn<S, A>,
    options: RenderOptions,
}

impl<S, A> RenderApp<S, A> {
    /// Bind `view` to an initial state and an actions value.
    pub fn new<F>(state: S, actions: A, view: F) -> Self
    where
        F: Fn(&S, &A) -> Node<S, A> + Send + Sync + 'static,
    {
        Self {
            state,
            actions,
            view: Arc::new(view),
            options: RenderOptions::default(),
        }
    }

    /// Replace the options every render of this app uses.
    pub fn with_options(mut self, options: RenderOptions) -> Self {
        self.options = options;
        self
    }

    /// The render options.
    pub fn options(&self) -> &RenderOptions {
        &self.options
    }

    /// The current state.
    pub fn state(&self) -> &S {
        &self.state
    }

    /// The actions value handed to the view.
    pub fn actions(&self) -> &A {
        &self.actions
    }

    /// Apply an action: `action` receives the current state and returns the
    /// next one.
    pub fn dispatch<F>(&mut self, action: F) -> &S
    where
        F: FnOnce(&S) -> S,
    {
        self.state = action(&self.state);
        &self.state
    }

    fn root(&self) -> Node<S, A> {
        Node::Component(Arc::clone(&self.view))
    }
}

impl<S: Clone, A: Clone> RenderApp<S, A> {
    /// Render the view against the current state.
    pub fn to_html(&self) -> hyperrender::Result<String> {
        render_to_string_with_state_and_options(
            self.root(),
            self.state.clone(),
            self.actions.clone(),
            &self.options,
        )
    }

    /// Stream the view against a snapshot of the current state.
    ///
    /// Later dispatches do not affect a stream that was already created.
    pub fn to_stream(&self) -> RenderStream<S, A> {
        let renderer = Renderer::with_state(self.root(), self.state.clone(), self.actions.clone())
            .with_options(self.options.clone());
        RenderStream::new(renderer)
    }
}

impl<S: fmt::Debug, A: fmt::Debug> fmt::Debug for RenderApp<S, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderApp")
            .field("state", &self.state)
            .field("actions", &self.actions)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}
