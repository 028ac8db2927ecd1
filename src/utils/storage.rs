//! JSON values in `localStorage`, behind a small key/value seam so the
//! theme and other controllers can be exercised without a browser.

use log::error;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::{Error, Result};

pub trait KeyValueStore {
    fn get_item(&self, key: &str) -> Result<Option<String>>;
    fn set_item(&self, key: &str, value: &str) -> Result<()>;
    fn remove_item(&self, key: &str) -> Result<()>;
    fn clear(&self) -> Result<()>;
}

impl KeyValueStore for web_sys::Storage {
    fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(web_sys::Storage::get_item(self, key)?)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<()> {
        Ok(web_sys::Storage::set_item(self, key, value)?)
    }

    fn remove_item(&self, key: &str) -> Result<()> {
        Ok(web_sys::Storage::remove_item(self, key)?)
    }

    fn clear(&self) -> Result<()> {
        Ok(web_sys::Storage::clear(self)?)
    }
}

pub fn local_storage() -> Result<web_sys::Storage> {
    web_sys::window()
        .ok_or(Error::NoWindow)?
        .local_storage()?
        .ok_or(Error::StorageUnavailable)
}

pub struct JsonStorage<K> {
    store: K,
}

impl JsonStorage<web_sys::Storage> {
    pub fn local() -> Result<Self> {
        Ok(Self::new(local_storage()?))
    }
}

impl<K: KeyValueStore> JsonStorage<K> {
    pub fn new(store: K) -> Self {
        Self { store }
    }

    pub fn set<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<()> {
        let raw = serde_json::to_string(value)?;
        self.store.set_item(key, &raw)
    }

    pub fn get<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        match self.store.get_item(key)? {
            Some(raw) if !raw.is_empty() => Ok(Some(serde_json::from_str(&raw)?)),
            _ => Ok(None),
        }
    }

    /// Like `get`, but any failure is logged and replaced by `default`.
    pub fn get_or<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.get(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(e) => {
                error!("Failed to read {} from storage: {}", key, e);
                default
            }
        }
    }

    pub fn remove(&self, key: &str) -> Result<()> {
        self.store.remove_item(key)
    }

    pub fn clear(&self) -> Result<()> {
        self.store.clear()
    }

    pub fn exists(&self, key: &str) -> bool {
        matches!(self.store.get_item(key), Ok(Some(_)))
    }

    pub fn raw(&self) -> &K {
        &self.store
    }
}


#[cfg(test)]
mod tests {
    use super::memory::MemoryStore;
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, PartialEq, Serialize, Deserialize)]
    struct Progress {
        course: String,
        lessons: u32,
    }

    #[test]
    fn values_round_trip_as_json() {
        let storage = JsonStorage::new(MemoryStore::default());
        let progress = Progress { course: "rust-101".into(), lessons: 4 };
        storage.set("progress", &progress).unwrap();

        assert_eq!(storage.raw().get_item("progress").unwrap().unwrap(), r#"{"course":"rust-101","lessons":4}"#);
        assert_eq!(storage.get::<Progress>("progress").unwrap(), Some(progress));
    }

    #[test]
    fn booleans_are_stored_bare() {
        let storage = JsonStorage::new(MemoryStore::default());
        storage.set("darkMode", &true).unwrap();
        assert_eq!(storage.raw().get_item("darkMode").unwrap().as_deref(), Some("true"));
    }

    #[test]
    fn malformed_values_fall_back() {
        let store = MemoryStore::default();
        store.set_item("count", "{not json").unwrap();
        let storage = JsonStorage::new(store);

        assert!(storage.get::<u32>("count").is_err());
        assert_eq!(storage.get_or("count", 7u32), 7);
        assert_eq!(storage.get_or("missing", 3u32), 3);
    }

    #[test]
    fn exists_remove_and_clear() {
        let storage = JsonStorage::new(MemoryStore::default());
        storage.set("a", &1).unwrap();
        storage.set("b", &2).unwrap();
        assert!(storage.exists("a"));

        storage.remove("a").unwrap();
        assert!(!storage.exists("a"));
        storage.clear().unwrap();
        assert!(!storage.exists("b"));
    }
}
