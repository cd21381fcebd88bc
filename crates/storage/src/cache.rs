use crate::{KvStore, Result, WriteBatch};
use parking_lot::RwLock;
use std::collections::BTreeMap;

/// Write buffer over a parent store.
///
/// Reads fall through to the parent unless the key was written on this
/// branch. Nothing reaches the parent until [`CacheStore::commit`], which
/// hands every pending write to the parent as a single batch.
pub struct CacheStore<S> {
    parent: S,
    pending: RwLock<BTreeMap<Vec<u8>, Vec<u8>>>,
}

impl<S: KvStore> CacheStore<S> {
    pub fn new(parent: S) -> Self {
        Self {
            parent,
            pending: RwLock::new(BTreeMap::new()),
        }
    }

    pub fn pending_len(&self) -> usize {
        self.pending.read().len()
    }

    /// Flush pending writes to the parent atomically. If the parent rejects
    /// the batch, every write stays pending and the commit can be retried.
    pub fn commit(&self) -> Result<()> {
        let mut pending = self.pending.write();
        let mut batch = WriteBatch::new();
        for (key, value) in pending.iter() {
            batch.put(key.clone(), value.clone());
        }
        if batch.is_empty() {
            return Ok(());
        }

        let entries = batch.len();
        self.parent.write_batch(batch)?;
        pending.clear();
        tracing::debug!(entries, "committed cached writes");
        Ok(())
    }

    /// Drop pending writes without touching the parent.
    pub fn discard(&self) {
        let dropped = std::mem::take(&mut *self.pending.write());
        if !dropped.is_empty() {
            tracing::debug!(entries = dropped.len(), "discarded cached writes");
        }
    }
}

impl<S: KvStore> KvStore for CacheStore<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        if let Some(value) = self.pending.read().get(key) {
            return Ok(Some(value.clone()));
        }
        self.parent.get(key)
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.pending.write().insert(key.to_vec(), value.to_vec());
        Ok(())
    }

    fn write_batch(&self, batch: WriteBatch) -> Result<()> {
        let mut pending = self.pending.write();
        for (key, value) in batch.into_entries() {
            pending.insert(key, value);
        }
        Ok(())
    }
}
