// Round-robin key rotation across a fixed pool of API credentials.
//
// Each Gemini key has its own quota, so spreading checks across N keys
// multiplies the usable request rate. The pool is owned by the checker and
// shared across request tasks through Arc; the cursor is a single atomic
// so concurrent requests always get distinct consecutive slots.

use std::fmt;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::Result;

/// One credential handed out by the pool, with its 0-based position.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Slot<'a> {
    pub index: usize,
    pub credential: &'a str,
}

impl fmt::Debug for Slot<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Slot")
            .field("index", &self.index)
            .field("credential", &"<redacted>")
            .finish()
    }
}

/// Immutable credential pool with a shared rotation cursor.
pub struct KeyPool {
    keys: Vec<String>,
    /// Index of the most recently issued slot. Starts at `len - 1` so the
    /// first call lands on slot 0 (the "-1" starting position, modulo N).
    cursor: AtomicUsize,
}

impl KeyPool {
    /// Build a pool from the configured credentials.
    ///
    /// An empty pool is a configuration error and is rejected here rather
    /// than at the first request.
    pub fn new(keys: Vec<String>) -> Result<Self> {
        if keys.is_empty() {
            anyhow::bail!("Key pool is empty. Configure at least one API key slot.");
        }
        let last = keys.len() - 1;
        Ok(Self {
            keys,
            cursor: AtomicUsize::new(last),
        })
    }

    /// Number of slots in the pool.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false: construction rejects empty pools.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Advance the cursor by one and return the slot it now points at.
    pub fn next_slot(&self) -> Slot<'_> {
        let n = self.keys.len();
        let previous = self
            .cursor
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |c| Some((c + 1) % n))
            .unwrap_or_else(|current| current);
        let index = (previous + 1) % n;
        Slot {
            index,
            credential: &self.keys[index],
        }
    }
}

impl fmt::Debug for KeyPool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPool")
            .field("slots", &self.keys.len())
            .finish_non_exhaustive()
    }
}
