//! Exact-match memoization of search results
//!
//! Keys carry the full search window, so an entry is only reused when the
//! same position is searched again with the same depth, bounds, side to move
//! and symbols. This is not a transposition table: no score is ever reused
//! under a different alpha/beta window.

use lru::LruCache;
use parking_lot::Mutex;

use std::num::NonZeroUsize;
use std::sync::Arc;

use crate::board::{Board, Symbol, CELLS};
use crate::search::{Depth, Score};

#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
pub struct MemoKey {
    board: [u8; CELLS],
    depth: Depth,
    alpha: Score,
    beta: Score,
    maximizing: bool,
    bot: Symbol,
    opponent: Symbol,
}

impl MemoKey {
    pub fn new(
        board: &Board,
        depth: Depth,
        alpha: Score,
        beta: Score,
        maximizing: bool,
        bot: Symbol,
    ) -> Self {
        Self {
            board: board.encode(),
            depth,
            alpha,
            beta,
            maximizing,
            bot,
            opponent: bot.other(),
        }
    }
}

/// Hit/miss counters and fill level of a cache
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub len: usize,
    pub capacity: usize,
}

/// Bounded memo table evicting the least recently used entry when full
pub struct MemoCache {
    entries: LruCache<MemoKey, Score>,
    hits: u64,
    misses: u64,
}

impl MemoCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            entries: LruCache::new(capacity),
            hits: 0,
            misses: 0,
        }
    }

    /// Looks up a score, marking the entry as most recently used
    pub fn get(&mut self, key: &MemoKey) -> Option<Score> {
        match self.entries.get(key) {
            Some(&score) => {
                self.hits += 1;
                Some(score)
            }
            None => {
                self.misses += 1;
                None
            }
        }
    }

    pub fn set(&mut self, key: MemoKey, score: Score) {
        self.entries.put(key, score);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
        self.hits = 0;
        self.misses = 0;
    }

    pub fn stats(&self) -> CacheStats {
        CacheStats {
            hits: self.hits,
            misses: self.misses,
            len: self.entries.len(),
            capacity: self.entries.cap().get(),
        }
    }
}

/// A [`MemoCache`] behind a lock, cheap to clone and share between engines
/// and threads
#[derive(Clone)]
pub struct SharedMemoCache {
    inner: Arc<Mutex<MemoCache>>,
}

impl SharedMemoCache {
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            inner: Arc::new(Mutex::new(MemoCache::new(capacity))),
        }
    }

    pub fn get(&self, key: &MemoKey) -> Option<Score> {
        self.inner.lock().get(key)
    }

    pub fn set(&self, key: MemoKey, score: Score) {
        self.inner.lock().set(key, score);
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn clear(&self) {
        self.inner.lock().clear();
    }

    pub fn stats(&self) -> CacheStats {
        self.inner.lock().stats()
    }
}
