//! Reader, iterator and writer adapters over [`Renderer`].

use crate::StreamError;
use hyperrender::{Node, RenderError, Renderer};
use std::io::{self, Read, Write};
use std::iter::FusedIterator;

#[cfg(feature = "tracing")]
use tracing::{debug, trace};

#[cfg(not(feature = "tracing"))]
macro_rules! trace {
    ($($tt:tt)*) => {};
}

#[cfg(not(feature = "tracing"))]
macro_rules! debug {
    ($($tt:tt)*) => {};
}

/// Options for streaming.
#[derive(Clone, Debug)]
pub struct StreamOptions {
    /// Byte budget for each pull when the sink does not ask for a size
    /// (default: 16384).
    pub chunk_size: usize,
}

impl Default for StreamOptions {
    fn default() -> Self {
        Self { chunk_size: 16384 }
    }
}

impl StreamOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the chunk size. Zero is treated as one.
    pub fn chunk_size(mut self, size: usize) -> Self {
        self.chunk_size = size;
        self
    }

    fn budget(&self) -> usize {
        self.chunk_size.max(1)
    }
}

/// A render exposed as [`io::Read`].
///
/// Each `read` pulls as many bytes as the caller's buffer holds. Markup is
/// produced in whole units, so anything that does not fit is kept and
/// handed out by the next `read`. A render failure surfaces as an
/// [`io::ErrorKind::InvalidData`] error wrapping the [`RenderError`], and
/// every later `read` fails the same way.
pub struct RenderStream<S = (), A = ()> {
    renderer: Renderer<S, A>,
    options: StreamOptions,
    pending: Vec<u8>,
    pos: usize,
    failed: Option<RenderError>,
}

impl<S, A> RenderStream<S, A> {
    /// Wrap a renderer.
    pub fn new(renderer: Renderer<S, A>) -> Self {
        Self {
            renderer,
            options: StreamOptions::default(),
            pending: Vec::new(),
            pos: 0,
            failed: None,
        }
    }

    /// Replace the stream options.
    pub fn with_options(mut self, options: StreamOptions) -> Self {
        self.options = options;
        self
    }

    /// The wrapped renderer.
    pub fn renderer(&self) -> &Renderer<S, A> {
        &self.renderer
    }

    /// Unread bytes from the last chunk pulled by `read`. May start in the
    /// middle of a UTF-8 sequence.
    fn buffered(&self) -> &[u8] {
        &self.pending[self.pos.min(self.pending.len())..]
    }

    /// Write the rest of the render into `writer`, returning the number of
    /// bytes written. Bytes already handed out by `read` are not repeated.
    pub fn pipe_to<W: Write>(self, writer: &mut W) -> Result<u64, StreamError> {
        if let Some(err) = self.failed {
            return Err(err.into());
        }

        let buffered = self.buffered();
        writer.write_all(buffered)?;
        let mut written = buffered.len() as u64;

        for chunk in Chunks::new(self.renderer, &self.options) {
            let chunk = chunk?;
            writer.write_all(chunk.as_bytes())?;
            written += chunk.len() as u64;
        }
        writer.flush()?;
        debug!(written, "render piped");
        Ok(written)
    }

    fn fill(&mut self, budget: usize) -> io::Result<bool> {
        if let Some(err) = &self.failed {
            return Err(io::Error::new(io::ErrorKind::InvalidData, err.clone()));
        }
        match self.renderer.pull(budget) {
            Ok(Some(chunk)) => {
                trace!(len = chunk.len(), "chunk buffered");
                self.pending = chunk.into_bytes();
                self.pos = 0;
                Ok(true)
            }
            Ok(None) => Ok(false),
            Err(err) => {
                debug!(%err, "render stream failed");
                self.failed = Some(err.clone());
                Err(io::Error::new(io::ErrorKind::InvalidData, err))
            }
        }
    }
}

impl<S, A> Read for RenderStream<S, A> {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }
        while self.pos >= self.pending.len() {
            if !self.fill(buf.len())? {
                return Ok(0);
            }
        }
        let available = &self.pending[self.pos..];
        let n = available.len().min(buf.len());
        buf[..n].copy_from_slice(&available[..n]);
        self.pos += n;
        Ok(n)
    }
}

/// Fixed-budget chunks of a render.
///
/// Yields `Ok(chunk)` until the tree is exhausted. After an error or the
/// end of the tree it only yields `None`.
pub struct Chunks<S = (), A = ()> {
    renderer: Renderer<S, A>,
    budget: usize,
    done: bool,
}

impl<S, A> Chunks<S, A> {
    /// Chunk `renderer`'s output using `options`.
    pub fn new(renderer: Renderer<S, A>, options: &StreamOptions) -> Self {
        Self {
            renderer,
            budget: options.budget(),
            done: false,
        }
    }
}

impl<S, A> Iterator for Chunks<S, A> {
    type Item = hyperrender::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.renderer.pull(self.budget) {
            Ok(Some(chunk)) => Some(Ok(chunk)),
            Ok(None) => {
                self.done = true;
                None
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}

impl<S, A> FusedIterator for Chunks<S, A> {}

/// Render `root` straight into `writer`, returning the number of bytes
/// written.
pub fn render_to_writer<W: Write>(
    root: impl Into<Node>,
    writer: &mut W,
    options: &StreamOptions,
) -> Result<u64, StreamError> {
    RenderStream::new(Renderer::new(root))
        .with_options(options.clone())
        .pipe_to(writer)
}

/// Render a tree as a readable stream.
pub fn render_to_stream(root: impl Into<Node>) -> RenderStream {
    RenderStream::new(Renderer::new(root))
}

/// Render a view with application state as a readable stream.
pub fn render_to_stream_with_state<S, A>(
    root: impl Into<Node<S, A>>,
    state: S,
    actions: A,
) -> RenderStream<S, A> {
    RenderStream::new(Renderer::with_state(root, state, actions))
}
