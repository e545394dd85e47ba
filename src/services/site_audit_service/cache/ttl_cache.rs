use serde::Serialize;
use std::collections::HashMap;
use std::marker::PhantomData;
use std::sync::Mutex;
use std::time::{Duration, Instant};

pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

struct Entry<V> {
    value: V,
    expires_at: Instant,
}

/// Time-bounded memo keyed by the JSON form of a composite key.
///
/// Expired entries are only removed when the same key is looked up again; there is no
/// background sweep and no size bound.
pub struct TtlCache<K, V> {
    ttl: Duration,
    store: Mutex<HashMap<String, Entry<V>>>,
    _key: PhantomData<fn(&K)>,
}

impl<K: Serialize, V: Clone> TtlCache<K, V> {
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            store: Mutex::new(HashMap::new()),
            _key: PhantomData,
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.get_at(key, Instant::now())
    }

    pub fn set(&self, key: &K, value: V) {
        self.set_at(key, value, Instant::now())
    }

    pub fn len(&self) -> usize {
        self.store.lock().map(|s| s.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn get_at(&self, key: &K, now: Instant) -> Option<V> {
        let k = canonical_key(key)?;
        let mut store = self.store.lock().ok()?;

        let expired = match store.get(&k) {
            None => return None,
            Some(entry) => now > entry.expires_at,
        };

        if expired {
            store.remove(&k);
            return None;
        }
        store.get(&k).map(|entry| entry.value.clone())
    }

    fn set_at(&self, key: &K, value: V, now: Instant) {
        let Some(k) = canonical_key(key) else {
            return;
        };
        if let Ok(mut store) = self.store.lock() {
            store.insert(
                k,
                Entry {
                    value,
                    expires_at: now + self.ttl,
                },
            );
        }
    }
}

impl<K: Serialize, V: Clone> Default for TtlCache<K, V> {
    fn default() -> Self {
        Self::new(DEFAULT_TTL)
    }
}

fn canonical_key<K: Serialize>(key: &K) -> Option<String> {
    match serde_json::to_string(key) {
        Ok(k) => Some(k),
        Err(e) => {
            log::warn!("Unable to derive cache key: {}", e);
            None
        }
    }
}
