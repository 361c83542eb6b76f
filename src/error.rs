//! Error types for the ringcache library.
//!
//! ## Key Components
//!
//! - [`EmptyListError`]: Returned by end accessors and pop operations on an
//!   empty [`RecencyRing`](crate::ds::RecencyRing).
//! - [`InvalidHandleError`]: Returned when a handle-taking ring operation is
//!   given a [`SlotId`](crate::ds::SlotId) that is stale (its slot was freed
//!   and possibly reused) or belongs to a different ring.
//! - [`InvariantError`]: Returned when internal data-structure invariants are
//!   violated (debug-only `check_invariants` methods).
//!
//! ## Example Usage
//!
//! ```
//! use ringcache::ds::RecencyRing;
//!
//! let mut ring: RecencyRing<u32> = RecencyRing::new();
//! assert!(ring.pop_front().is_err());
//!
//! let id = ring.push_front(1);
//! ring.pop_front().unwrap();
//!
//! // The handle went stale when its node was popped.
//! assert!(ring.move_to_front(id).is_err());
//! ```

use std::fmt;

use crate::ds::SlotId;

// ---------------------------------------------------------------------------
// EmptyListError
// ---------------------------------------------------------------------------

/// Error returned by end accessors and pop operations on an empty ring.
///
/// Produced by [`RecencyRing::front`](crate::ds::RecencyRing::front),
/// [`back`](crate::ds::RecencyRing::back),
/// [`pop_front`](crate::ds::RecencyRing::pop_front) and
/// [`pop_back`](crate::ds::RecencyRing::pop_back). Callers that check
/// [`is_empty`](crate::ds::RecencyRing::is_empty) first never see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EmptyListError;

impl fmt::Display for EmptyListError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("operation on empty recency ring")
    }
}

impl std::error::Error for EmptyListError {}

// ---------------------------------------------------------------------------
// InvalidHandleError
// ---------------------------------------------------------------------------

/// Error returned for a stale or foreign node handle.
///
/// Handles are validated against a per-slot generation counter, so a handle
/// whose node was removed stays invalid even after the slot is reused for a
/// new node. Carries the offending handle for diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InvalidHandleError(SlotId);

impl InvalidHandleError {
    /// Creates a new `InvalidHandleError` for the given handle.
    #[inline]
    pub fn new(handle: SlotId) -> Self {
        Self(handle)
    }

    /// Returns the handle that failed validation.
    #[inline]
    pub fn handle(&self) -> SlotId {
        self.0
    }
}

impl fmt::Display for InvalidHandleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "stale or foreign node handle (slot {}, generation {})",
            self.0.index(),
            self.0.generation()
        )
    }
}

impl std::error::Error for InvalidHandleError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// Error returned when internal invariants are violated.
///
/// Produced by debug-only `check_invariants` methods on
/// [`RecencyRing`](crate::ds::RecencyRing) and
/// [`LruCache`](crate::policy::lru::LruCache). Carries a human-readable
/// description of which invariant failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    /// Creates a new `InvariantError` with the given description.
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    /// Returns the error description.
    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
