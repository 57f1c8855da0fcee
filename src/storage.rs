//! RocksDB storage layer

use crate::config::StorageConfig;
use crate::errors::StorageError;
use rocksdb::{Direction, IteratorMode, Options, WriteBatch, DB};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Clone)]
pub struct OptimizedStorage {
    db: Arc<DB>,
}

impl OptimizedStorage {
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.set_compression_type(rocksdb::DBCompressionType::Lz4);

        let db = DB::open(&opts, path.as_ref()).map_err(|e| {
            StorageError::DatabaseOpenFailed(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Ok(Self { db: Arc::new(db) })
    }

    /// Open the configured data directory, wiping it first in testing mode
    pub fn new_with_config(config: &StorageConfig) -> Result<Self, StorageError> {
        if config.clear_on_start {
            warn!(path = %config.data_directory, "Testing mode: clearing database");
            let _ = fs::remove_dir_all(&config.data_directory);
        } else {
            info!(path = %config.data_directory, "Opening database");
        }
        Self::new(&config.data_directory)
    }

    /// Read-only handle, usable while the bot holds the database open
    pub fn open_read_only<P: AsRef<Path>>(path: P) -> Result<Self, StorageError> {
        let db = DB::open_for_read_only(&Options::default(), path.as_ref(), false).map_err(|e| {
            StorageError::DatabaseOpenFailed(format!("{}: {}", path.as_ref().display(), e))
        })?;
        Ok(Self { db: Arc::new(db) })
    }

    pub fn get(&self, key: &[u8]) -> Result<Option<Vec<u8>>, StorageError> {
        self.db
            .get(key)
            .map_err(|e| StorageError::ReadFailed(e.to_string()))
    }

    pub fn put(&self, key: &[u8], value: &[u8]) -> Result<(), StorageError> {
        self.db
            .put(key, value)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    pub fn delete(&self, key: &[u8]) -> Result<(), StorageError> {
        self.db
            .delete(key)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    /// Write all items atomically
    pub fn batch_write<K, V>(&self, items: &[(K, V)]) -> Result<(), StorageError>
    where
        K: AsRef<[u8]>,
        V: AsRef<[u8]>,
    {
        let mut batch = WriteBatch::default();
        for (key, value) in items {
            batch.put(key, value);
        }
        self.db
            .write(batch)
            .map_err(|e| StorageError::WriteFailed(e.to_string()))
    }

    /// Up to `limit` entries whose key starts with `prefix`, in key order
    pub fn scan_prefix(&self, prefix: &[u8], limit: usize) -> Result<Vec<(Vec<u8>, Vec<u8>)>, StorageError> {
        let mut rows = Vec::new();
        for item in self.db.iterator(IteratorMode::From(prefix, Direction::Forward)) {
            let (key, value) = item.map_err(|e| StorageError::ReadFailed(e.to_string()))?;
            if !key.starts_with(prefix) || rows.len() >= limit {
                break;
            }
            rows.push((key.to_vec(), value.to_vec()));
        }
        Ok(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_prefix_scan_stops_at_prefix_end() {
        let dir = TempDir::new().unwrap();
        let storage = OptimizedStorage::new(dir.path()).unwrap();

        storage
            .batch_write(&[
                (b"a:1".to_vec(), b"x".to_vec()),
                (b"b:1".to_vec(), b"one".to_vec()),
                (b"b:2".to_vec(), b"two".to_vec()),
                (b"c:1".to_vec(), b"y".to_vec()),
            ])
            .unwrap();

        let rows = storage.scan_prefix(b"b:", 10).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].1, b"one".to_vec());
        assert_eq!(storage.scan_prefix(b"b:", 1).unwrap().len(), 1);
        assert!(storage.scan_prefix(b"z:", 10).unwrap().is_empty());
    }

    #[test]
    fn test_put_get_delete() {
        let dir = TempDir::new().unwrap();
        let storage = OptimizedStorage::new(dir.path()).unwrap();

        assert_eq!(storage.get(b"k").unwrap(), None);
        storage.put(b"k", b"v").unwrap();
        assert_eq!(storage.get(b"k").unwrap(), Some(b"v".to_vec()));
        storage.delete(b"k").unwrap();
        assert_eq!(storage.get(b"k").unwrap(), None);
    }

    #[test]
    fn test_clear_on_start_wipes_data() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("db");
        let config = StorageConfig {
            data_directory: path.to_string_lossy().to_string(),
            clear_on_start: false,
            ..Default::default()
        };

        {
            let storage = OptimizedStorage::new_with_config(&config).unwrap();
            storage.put(b"k", b"v").unwrap();
        }
        {
            let storage = OptimizedStorage::new_with_config(&config).unwrap();
            assert!(storage.get(b"k").unwrap().is_some());
        }

        let wiping = StorageConfig {
            clear_on_start: true,
            ..config
        };
        let storage = OptimizedStorage::new_with_config(&wiping).unwrap();
        assert!(storage.get(b"k").unwrap().is_none());
    }
}
