use thiserror::Error;

/// Errors surfaced to callers of the queue core.
///
/// Only construction can fail; `enqueue`/`poll` report their outcomes as
/// plain booleans/`Option`s (SPEC_FULL.md §7) rather than errors, since a
/// dropped-on-saturation event or an empty poll are expected, not
/// exceptional.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The requested pool is too small to hold even the permanent sentinel.
    #[error("buffer too small for a queue: need at least {minimum} entries, got {requested}")]
    InsufficientBuffer {
        /// The capacity the caller asked for.
        requested: usize,
        /// The minimum capacity a queue can be built with.
        minimum: usize,
    },
}
