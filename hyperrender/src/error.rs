//! Errors surfaced by the renderer.

use compact_str::CompactString;

/// Failure raised while walking or ingesting a virtual node tree.
///
/// Nothing in the walker catches these: they propagate to whoever called
/// [`Renderer::pull`](crate::Renderer::pull) or
/// [`render_to_string`](crate::render_to_string).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    /// A node claims to be an element but its shape cannot be walked,
    /// e.g. its `children` field is not a sequence.
    #[error("malformed node <{tag}>: {reason}")]
    MalformedNode {
        /// Tag name of the offending node (may be empty).
        tag: CompactString,
        /// What was wrong with it.
        reason: String,
    },

    /// A component or lazy chain kept producing more components.
    #[error("node resolution exceeded {limit} nested components")]
    ResolveDepthExceeded {
        /// The configured limit that was hit.
        limit: usize,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, RenderError>;
