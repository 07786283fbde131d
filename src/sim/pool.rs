//! Per-type object pool
//!
//! Each registered key owns a bounded idle queue that is pre-filled at
//! construction. `get` hands out an idle item or allocates a new one; `put`
//! resets the item and queues it again, or destroys it when the queue is
//! already full.

use std::collections::{BTreeMap, VecDeque};

/// Something the pool can recycle
pub trait Poolable {
    type Key: Ord + Copy;

    /// Queue this item belongs to
    fn pool_key(&self) -> Self::Key;

    /// Clear per-use state before the item goes back on the idle queue
    fn reset(&mut self);
}

/// Bounded per-key pool
pub struct Pool<T: Poolable> {
    idle: BTreeMap<T::Key, VecDeque<T>>,
    capacity: usize,
    factory: Box<dyn FnMut(T::Key) -> T>,
    created: usize,
    destroyed: usize,
}

impl<T: Poolable> Pool<T> {
    /// Register `keys`, pre-filling each queue with `capacity` items from `factory`
    pub fn new(
        keys: impl IntoIterator<Item = T::Key>,
        capacity: usize,
        factory: impl FnMut(T::Key) -> T + 'static,
    ) -> Self {
        let mut pool = Self {
            idle: BTreeMap::new(),
            capacity,
            factory: Box::new(factory),
            created: 0,
            destroyed: 0,
        };

        for key in keys {
            let mut queue = VecDeque::with_capacity(capacity);
            for _ in 0..capacity {
                queue.push_back(pool.allocate(key));
            }
            pool.idle.insert(key, queue);
        }

        pool
    }

    fn allocate(&mut self, key: T::Key) -> T {
        self.created += 1;
        (self.factory)(key)
    }

    /// Take an item for `key`. Returns `None` if the key was never registered.
    pub fn get(&mut self, key: T::Key) -> Option<T> {
        let recycled = self.idle.get_mut(&key)?.pop_front();
        match recycled {
            Some(item) => Some(item),
            None => Some(self.allocate(key)),
        }
    }

    /// Give an item back. Returns `false` if it was dropped instead of
    /// queued (full queue or unknown key).
    ///
    /// Items are expected to come from `get`. Foreign items with a registered
    /// key are accepted but skew `outstanding`, which then saturates at zero.
    pub fn put(&mut self, mut item: T) -> bool {
        let Some(queue) = self.idle.get_mut(&item.pool_key()) else {
            // Never came from this pool, so it does not count as destroyed
            return false;
        };
        if queue.len() >= self.capacity {
            self.destroyed += 1;
            return false;
        }
        item.reset();
        queue.push_back(item);
        true
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn contains_key(&self, key: T::Key) -> bool {
        self.idle.contains_key(&key)
    }

    /// Idle items waiting for `key`
    pub fn idle_count(&self, key: T::Key) -> usize {
        self.idle.get(&key).map(VecDeque::len).unwrap_or(0)
    }

    /// Idle items across all keys
    pub fn total_idle(&self) -> usize {
        self.idle.values().map(VecDeque::len).sum()
    }

    /// Items ever allocated by the factory
    pub fn created(&self) -> usize {
        self.created
    }

    /// Items dropped on return because their queue was full
    pub fn destroyed(&self) -> usize {
        self.destroyed
    }

    /// Items handed out and not yet returned
    pub fn outstanding(&self) -> usize {
        self.created
            .saturating_sub(self.destroyed)
            .saturating_sub(self.total_idle())
    }
}

impl<T: Poolable> std::fmt::Debug for Pool<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pool")
            .field("keys", &self.idle.len())
            .field("capacity", &self.capacity)
            .field("idle", &self.total_idle())
            .field("created", &self.created)
            .field("destroyed", &self.destroyed)
            .finish()
    }
}
