//! Incremental HTML rendering for hyperscript-style virtual DOM trees.
//!
//! hyperrender provides:
//! - **Node model**: elements, text, fragments, components and lazy nodes
//! - **Pull rendering**: a [`Renderer`] that emits markup in bounded chunks
//! - **Attribute rules**: class flattening, style objects, boolean attributes
//! - **JSON adapter**: ingest serialized trees in several historical layouts
//!
//! # Example
//!
//! ```rust
//! use hyperrender::{Element, Node, Renderer, Value, render_to_string};
//!
//! let page: Element = Element::new("main")
//!     .attr("class", Value::list([Value::from("page"), Value::map([("dark", true)])]))
//!     .child(Element::new("h1").text("Hello & welcome"))
//!     .child(Element::new("br"));
//!
//! // Render in one go
//! assert_eq!(
//!     render_to_string(page.clone()).unwrap(),
//!     r#"<main class="page dark"><h1>Hello &amp; welcome</h1><br/></main>"#
//! );
//!
//! // Or pull it out a piece at a time
//! let mut renderer = Renderer::new(page);
//! let mut html = String::new();
//! while let Some(chunk) = renderer.pull(16).unwrap() {
//!     html.push_str(&chunk);
//! }
//! assert!(html.ends_with("</main>"));
//! ```

mod tracing_macros;

pub mod class;
mod error;
pub mod escape;
#[cfg(feature = "json")]
pub mod json;
pub mod node;
pub mod render;
pub mod resolve;
pub mod style;
pub mod value;

// Re-export the node model at crate root for convenience
pub use node::{Element, Lazy, LazyViewFn, Node, ViewFn, h};
pub use value::{Handler, Map, Value, format_number};

// Re-export rendering
pub use render::{
    RenderOptions, Renderer, VOID_ELEMENTS, is_void_element, render_to_string,
    render_to_string_with_options, render_to_string_with_state,
    render_to_string_with_state_and_options,
};
pub use resolve::{Resolved, resolve};

// Re-export attribute helpers
pub use class::concat_class_names;
pub use escape::{escape_html, escape_value};
pub use style::{StyleNameCache, hyphenate_style_name, stringify_styles};

pub use error::{RenderError, Result};
