//! Host-side helpers for serving hyperrender output.
//!
//! The core [`hyperrender::Renderer`] hands out markup one pull at a time.
//! This crate connects that to the places servers actually put bytes:
//!
//! - [`RenderStream`] implements [`std::io::Read`], so a render can be
//!   handed to anything that consumes a reader (HTTP bodies, `io::copy`)
//! - [`Chunks`] iterates fixed-size chunks for frame-based transports
//! - [`render_to_writer`] drains a tree into any [`std::io::Write`]
//! - [`RenderApp`] keeps an application's state next to its view so the
//!   current page can be rendered again after every action
//!
//! # Example
//!
//! ```rust
//! use hyperrender::{Element, Node};
//! use hyperrender_server::RenderApp;
//!
//! let mut app = RenderApp::new(0u32, (), |count: &u32, _: &()| {
//!     Node::Element(Element::new("h1").text(*count))
//! });
//! assert_eq!(app.to_html().unwrap(), "<h1>0</h1>");
//!
//! app.dispatch(|count| count + 1);
//! assert_eq!(app.to_html().unwrap(), "<h1>1</h1>");
//! ```

mod app;
mod stream;

pub use app::RenderApp;
pub use stream::{
    Chunks, RenderStream, StreamOptions, render_to_stream, render_to_stream_with_state,
    render_to_writer,
};

use hyperrender::RenderError;

/// Failure while pumping rendered markup into a sink.
#[derive(Debug, thiserror::Error)]
pub enum StreamError {
    /// The tree could not be rendered.
    #[error(transparent)]
    Render(#[from] RenderError),

    /// The sink rejected a write.
    #[error("failed to write rendered markup: {0}")]
    Io(#[from] std::io::Error),
}
