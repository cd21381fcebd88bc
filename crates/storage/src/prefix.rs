use crate::{KvStore, Result, WriteBatch};

/// Scopes every key of an inner store under a fixed namespace prefix.
pub struct PrefixStore<S> {
    inner: S,
    prefix: Vec<u8>,
}

impl<S: KvStore> PrefixStore<S> {
    pub fn new(inner: S, prefix: impl Into<Vec<u8>>) -> Self {
        Self {
            inner,
            prefix: prefix.into(),
        }
    }

    fn full_key(&self, key: &[u8]) -> Vec<u8> {
        let mut full = Vec::with_capacity(self.prefix.len() + key.len());
        full.extend_from_slice(&self.prefix);
        full.extend_from_slice(key);
        full
    }
}

impl<S: KvStore> KvStore for PrefixStore<S> {
    fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>> {
        self.inner.get(&self.full_key(key))
    }

    fn set(&self, key: &[u8], value: &[u8]) -> Result<()> {
        self.inner.set(&self.full_key(key), value)
    }

    fn write_batch(&self, batch: WriteBatch) -> Result<()> {
        let mut prefixed = WriteBatch::new();
        for (key, value) in batch.into_entries() {
            prefixed.put(self.full_key(&key), value);
        }
        self.inner.write_batch(prefixed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemoryStore;
    use std::sync::Arc;

    #[test]
    fn test_keys_are_namespaced() {
        let backing = Arc::new(MemoryStore::new());
        let market = PrefixStore::new(backing.clone(), b"market/".to_vec());
        let oracle = PrefixStore::new(backing.clone(), b"oracle/".to_vec());

        market.set(b"tobintax", b"a").unwrap();
        oracle.set(b"tobintax", b"b").unwrap();

        assert_eq!(market.get(b"tobintax").unwrap(), Some(b"a".to_vec()));
        assert_eq!(oracle.get(b"tobintax").unwrap(), Some(b"b".to_vec()));
        assert_eq!(
            backing.get(b"market/tobintax").unwrap(),
            Some(b"a".to_vec())
        );
    }

    #[test]
    fn test_batch_is_prefixed() {
        let backing = Arc::new(MemoryStore::new());
        let store = PrefixStore::new(backing.clone(), b"m/".to_vec());
        let mut batch = WriteBatch::new();
        batch.put(b"k1".to_vec(), b"v1".to_vec());
        store.write_batch(batch).unwrap();

        assert_eq!(backing.get(b"m/k1").unwrap(), Some(b"v1".to_vec()));
        assert!(backing.get(b"k1").unwrap().is_none());
    }
}
