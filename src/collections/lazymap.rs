//! Reader/writer-locked map with an atomic compute-if-absent operation.
//!
//! [`LazyMap`] wraps a [`HashMap`] in a [`parking_lot::RwLock`] and routes every access
//! through one of the lock's three modes:
//!
//! - **shared** for lookups, counts and snapshots, so readers never block each other,
//! - **exclusive** for inserts, removals, merges and [`LazyMap::clear`],
//! - **upgradeable** for the slow path of [`LazyMap::get_or_add`].
//!
//! # Compute-if-absent
//!
//! [`LazyMap::get_or_add`] first tries a plain shared read. On a miss it takes the
//! upgradeable lock, which admits concurrent plain readers but only a single upgradeable
//! holder. It re-checks the key, runs the factory while still readable by others, and only
//! then upgrades to exclusive for the insert. Two racing callers therefore never both
//! commit a value for the same key, and no reader can observe a half-inserted entry.
//!
//! # Snapshots
//!
//! The backing map never escapes the lock. [`LazyMap::keys`], [`LazyMap::values`] and
//! [`LazyMap::snapshot`] copy the requested data under a single shared lock and hand out
//! owned collections, which stay valid no matter what other threads do afterwards.
//!
//! # Examples
//!
//! ```rust
//! use dotsupport::collections::LazyMap;
//! use std::sync::Arc;
//! use std::thread;
//!
//! let map = Arc::new(LazyMap::new());
//!
//! let handles: Vec<_> = (0..4)
//!     .map(|_| {
//!         let map = Arc::clone(&map);
//!         thread::spawn(move || map.get_or_add("config", || String::from("loaded")))
//!     })
//!     .collect();
//!
//! for handle in handles {
//!     assert_eq!(handle.join().unwrap(), "loaded");
//! }
//! assert_eq!(map.len(), 1);
//! ```

use std::{
    borrow::Borrow,
    collections::{HashMap, HashSet},
    fmt,
    hash::Hash,
    time::{Duration, Instant},
};

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::trace;

use crate::{Error, Result};

/// How [`LazyMap::merge`] and [`LazyMap::merged`] treat keys that are already present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Incoming values replace existing ones.
    #[default]
    Overwrite,

    /// Any key collision aborts the merge with [`Error::DuplicateKey`].
    ///
    /// Collisions are detected before anything is written, so a failed merge leaves the
    /// target untouched.
    Strict,
}

/// A thread-safe map that supports concurrent readers, exclusive writers and an atomic
/// get-or-compute primitive.
///
/// Values are returned by clone, since references into the map cannot outlive the lock
/// guard. Store `Arc<T>` for values that are expensive to clone.
///
/// # Re-entrancy
///
/// The lock is not re-entrant. A factory passed to [`LazyMap::get_or_add`] must not call
/// back into the same map, or it may deadlock against a queued writer.
pub struct LazyMap<K, V> {
    inner: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for LazyMap<K, V> {
    fn default() -> Self {
        Self {
            inner: RwLock::new(HashMap::new()),
        }
    }
}

impl<K, V> LazyMap<K, V> {
    /// Creates a new, empty map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new, empty map with room for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            inner: RwLock::new(HashMap::with_capacity(capacity)),
        }
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.inner.read().len()
    }

    /// Returns `true` if the map holds no entries.
    pub fn is_empty(&self) -> bool {
        self.inner.read().is_empty()
    }

    /// Removes all entries.
    pub fn clear(&self) {
        self.inner.write().clear();
    }
}

impl<K, V> LazyMap<K, V>
where
    K: Eq + Hash,
{
    /// Returns `true` if `key` is present.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().contains_key(key)
    }

    /// Returns `true` if `key` is present and mapped to a value equal to `value`.
    pub fn contains<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        self.inner.read().get(key).is_some_and(|stored| stored == value)
    }

    /// Inserts or overwrites the value for `key`.
    ///
    /// Returns the previous value, if there was one.
    pub fn set(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    /// Inserts `value` only if `key` is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateKey`] if `key` is already present. The map is not modified.
    pub fn try_insert(&self, key: K, value: V) -> Result<()> {
        let mut map = self.inner.write();
        if map.contains_key(&key) {
            return Err(Error::DuplicateKey);
        }

        map.insert(key, value);
        Ok(())
    }

    /// Removes `key`, reporting whether an entry was removed.
    pub fn remove<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.write().remove(key).is_some()
    }

    /// Removes `key` only if it is mapped to a value equal to `value`.
    pub fn remove_entry<Q>(&self, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
        V: PartialEq,
    {
        let mut map = self.inner.write();
        if map.get(key).is_some_and(|stored| stored == value) {
            map.remove(key);
            return true;
        }

        false
    }

    /// Merges `entries` into this map under a single exclusive lock.
    ///
    /// # Arguments
    ///
    /// * `entries` - The key/value pairs to merge in
    /// * `policy` - What to do with keys that already exist
    ///
    /// # Errors
    ///
    /// With [`MergePolicy::Strict`], returns [`Error::DuplicateKey`] if any incoming key is
    /// already present or appears twice in `entries`. Nothing is written in that case.
    pub fn merge<I>(&self, entries: I, policy: MergePolicy) -> Result<()>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        let mut map = self.inner.write();
        merge_into(&mut map, entries, policy)
    }
}

impl<K, V> LazyMap<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Returns a clone of the value for `key`, or `None` if absent.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.read().get(key).cloned()
    }

    /// Returns the value for `key`, computing and inserting it with `factory` if absent.
    ///
    /// The fast path is a shared read. On a miss, the upgradeable lock is taken and the key
    /// re-checked; `factory` runs under the upgradeable lock, so plain readers proceed while
    /// it computes, but no other caller can start its own insert. The result is committed
    /// after upgrading to the exclusive lock.
    ///
    /// If `factory` panics, the lock is released and the map is left unchanged.
    pub fn get_or_add<F>(&self, key: K, factory: F) -> V
    where
        F: FnOnce() -> V,
    {
        if let Some(value) = self.get(&key) {
            return value;
        }

        let guard = self.inner.upgradable_read();
        if let Some(value) = guard.get(&key) {
            trace!("get_or_add: value committed by a concurrent caller");
            return value.clone();
        }

        let value = factory();

        let mut map = RwLockUpgradableReadGuard::upgrade(guard);
        map.insert(key, value.clone());
        trace!(len = map.len(), "get_or_add: committed computed value");
        value
    }

    /// Returns the value for `key`, inserting `value` if absent.
    pub fn get_or_insert(&self, key: K, value: V) -> V {
        self.get_or_add(key, || value)
    }

    /// Like [`LazyMap::get`], but gives up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the shared lock was not acquired in time.
    pub fn try_get_for<Q>(&self, key: &Q, timeout: Duration) -> Result<Option<V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        let map = self
            .inner
            .try_read_for(timeout)
            .ok_or(Error::LockTimeout(timeout))?;

        Ok(map.get(key).cloned())
    }

    /// Like [`LazyMap::set`], but gives up after `timeout`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if the exclusive lock was not acquired in time. The map
    /// is not modified.
    pub fn try_set_for(&self, key: K, value: V, timeout: Duration) -> Result<Option<V>> {
        let mut map = self
            .inner
            .try_write_for(timeout)
            .ok_or(Error::LockTimeout(timeout))?;

        Ok(map.insert(key, value))
    }

    /// Like [`LazyMap::get_or_add`], but every lock acquisition shares one deadline,
    /// `timeout` from now.
    ///
    /// The factory only runs once the upgradeable lock is held. If the final upgrade misses
    /// the deadline, the computed value is dropped and nothing is committed. A timeout too
    /// large to form a deadline waits without limit, like [`LazyMap::get_or_add`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::LockTimeout`] if any lock acquisition missed the deadline.
    pub fn try_get_or_add_for<F>(&self, key: K, timeout: Duration, factory: F) -> Result<V>
    where
        F: FnOnce() -> V,
    {
        let Some(deadline) = Instant::now().checked_add(timeout) else {
            return Ok(self.get_or_add(key, factory));
        };

        {
            let map = self
                .inner
                .try_read_until(deadline)
                .ok_or(Error::LockTimeout(timeout))?;
            if let Some(value) = map.get(&key) {
                return Ok(value.clone());
            }
        }

        let guard = self
            .inner
            .try_upgradable_read_until(deadline)
            .ok_or(Error::LockTimeout(timeout))?;
        if let Some(value) = guard.get(&key) {
            return Ok(value.clone());
        }

        let value = factory();

        let mut map = RwLockUpgradableReadGuard::try_upgrade_until(guard, deadline)
            .map_err(|_| Error::LockTimeout(timeout))?;
        map.insert(key, value.clone());
        Ok(value)
    }
}

impl<K, V> LazyMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    /// Returns a snapshot of all keys, in unspecified order.
    pub fn keys(&self) -> Vec<K> {
        self.inner.read().keys().cloned().collect()
    }

    /// Returns a snapshot of all values, in unspecified order.
    pub fn values(&self) -> Vec<V> {
        self.inner.read().values().cloned().collect()
    }

    /// Returns a snapshot of all entries, in unspecified order.
    ///
    /// The snapshot is taken under a single shared lock, so it reflects one consistent
    /// state of the map.
    pub fn snapshot(&self) -> Vec<(K, V)> {
        self.inner
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Returns a copy of the backing map.
    pub fn to_hash_map(&self) -> HashMap<K, V> {
        self.inner.read().clone()
    }

    /// Returns a new map holding this map's entries merged with `entries`.
    ///
    /// This map is not modified, whatever the outcome.
    ///
    /// # Errors
    ///
    /// With [`MergePolicy::Strict`], returns [`Error::DuplicateKey`] on any key collision.
    pub fn merged<I>(&self, entries: I, policy: MergePolicy) -> Result<LazyMap<K, V>>
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let mut map = self.to_hash_map();
        merge_into(&mut map, entries.into_iter().collect(), policy)?;
        Ok(LazyMap::from(map))
    }
}

fn merge_into<K, V>(
    map: &mut HashMap<K, V>,
    entries: Vec<(K, V)>,
    policy: MergePolicy,
) -> Result<()>
where
    K: Eq + Hash,
{
    if policy == MergePolicy::Strict {
        let mut incoming = HashSet::with_capacity(entries.len());
        for (key, _) in &entries {
            if map.contains_key(key) || !incoming.insert(key) {
                return Err(Error::DuplicateKey);
            }
        }
    }

    map.extend(entries);
    Ok(())
}

impl<K, V> From<HashMap<K, V>> for LazyMap<K, V> {
    fn from(map: HashMap<K, V>) -> Self {
        Self {
            inner: RwLock::new(map),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for LazyMap<K, V>
where
    K: Eq + Hash,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from(iter.into_iter().collect::<HashMap<K, V>>())
    }
}

impl<K, V> Extend<(K, V)> for LazyMap<K, V>
where
    K: Eq + Hash,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        self.inner.get_mut().extend(iter);
    }
}

impl<K, V> Clone for LazyMap<K, V>
where
    K: Clone,
    V: Clone,
{
    fn clone(&self) -> Self {
        Self::from(self.inner.read().clone())
    }
}

impl<'a, K, V> IntoIterator for &'a LazyMap<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshot().into_iter()
    }
}

impl<K, V> fmt::Debug for LazyMap<K, V>
where
    K: fmt::Debug,
    V: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.inner.read().iter()).finish()
    }
}
