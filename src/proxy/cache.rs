//! News response cache
//!
//! The headline feed is shared by every visitor, so the gateway keeps exactly
//! one cached snapshot and refreshes it at most roughly once per TTL window.
//! The slot is deliberately not keyed by query parameters: a caller asking for
//! different parameters within the window receives the snapshot that is
//! already there. That keeps the call volume toward the provider bounded no
//! matter how many parameter combinations the frontend tries.
//!
//! # Architecture
//!
//! ```text
//! /api/news request arrives
//!     ↓
//! fresh() → Some? Return cached payload, no upstream call
//!     ↓
//! Forward to provider → write() the parsed response
//! ```
//!
//! The mutex is only held for synchronous read/write sections, never across
//! an await point. Two requests racing through a stale window can both reach
//! the provider; the second write wins. That costs one extra upstream call,
//! never correctness of the served data.

use std::sync::Mutex;
use std::time::{Duration, Instant};

use serde_json::Value;

/// A cached provider response plus the instant it was captured
#[derive(Debug, Clone)]
pub struct Snapshot {
    /// Complete response body as returned by the provider
    pub payload: Value,
    /// When this snapshot was written
    pub captured_at: Instant,
}

/// Single-slot TTL cache for the news endpoint
pub struct NewsCache {
    /// How long a snapshot stays fresh
    ttl: Duration,
    /// The one snapshot shared by all requests
    slot: Mutex<Option<Snapshot>>,
}

impl NewsCache {
    /// Create an empty cache with the given TTL
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            slot: Mutex::new(None),
        }
    }

    /// Current snapshot regardless of age
    pub fn read(&self) -> Option<Snapshot> {
        match self.slot.lock() {
            Ok(guard) => guard.clone(),
            Err(_) => None, // Poisoned mutex - treat as empty
        }
    }

    /// Whether a snapshot is still fresh at the given instant
    pub fn is_fresh_at(&self, snapshot: &Snapshot, now: Instant) -> bool {
        now.duration_since(snapshot.captured_at) < self.ttl
    }

    /// Whether a snapshot is still fresh right now
    pub fn is_fresh(&self, snapshot: &Snapshot) -> bool {
        self.is_fresh_at(snapshot, Instant::now())
    }

    /// Cached payload if present and fresh - the handler's fast path
    pub fn fresh(&self) -> Option<Value> {
        let snapshot = self.read()?;
        if self.is_fresh(&snapshot) {
            tracing::debug!(
                age_ms = snapshot.captured_at.elapsed().as_millis(),
                "news cache hit"
            );
            Some(snapshot.payload)
        } else {
            None
        }
    }

    /// Replace the slot with a freshly fetched payload
    ///
    /// Wholesale replacement: the payload must be a complete, parsed provider
    /// response. Failures are never written, so the slot holds either nothing
    /// or a response that was good when captured.
    pub fn write(&self, payload: Value) {
        let mut guard = match self.slot.lock() {
            Ok(guard) => guard,
            Err(_) => return, // Poisoned mutex - skip caching
        };
        *guard = Some(Snapshot {
            payload,
            captured_at: Instant::now(),
        });
    }
}
