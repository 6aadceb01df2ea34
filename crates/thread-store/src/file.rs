//! Whole-document JSON file with serialized read-modify-write.

use crate::error::StoreError;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::io::ErrorKind;
use std::path::PathBuf;
use tokio::fs;
use tokio::sync::Mutex;
use tracing::debug;

/// A JSON document stored in a single file.
///
/// Every update holds the file's lock across read, modify and write, so
/// writers within the process never interleave. Construct one instance per
/// path and share it.
pub struct JsonFile<T> {
    path: PathBuf,
    lock: Mutex<()>,
    _doc: std::marker::PhantomData<fn() -> T>,
}

impl<T> JsonFile<T>
where
    T: Serialize + DeserializeOwned + Default,
{
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
            _doc: std::marker::PhantomData,
        }
    }

    /// Read the document. A missing file is an empty document.
    pub async fn read(&self) -> Result<T, StoreError> {
        let _guard = self.lock.lock().await;
        self.read_unlocked().await
    }

    /// Apply `f` to the document and write it back.
    pub async fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R, StoreError> {
        let _guard = self.lock.lock().await;
        let mut doc = self.read_unlocked().await?;
        let result = f(&mut doc);
        self.write_unlocked(&doc).await?;
        Ok(result)
    }

    async fn read_unlocked(&self) -> Result<T, StoreError> {
        match fs::read(&self.path).await {
            Ok(bytes) => Ok(serde_json::from_slice(&bytes)?),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("{:?} not found, starting empty", self.path);
                Ok(T::default())
            }
            Err(e) => Err(e.into()),
        }
    }

    async fn write_unlocked(&self, doc: &T) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(doc)?;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent).await?;
            }
        }

        // Atomic write
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, &json).await?;
        fs::rename(&temp_path, &self.path).await?;

        debug!("Wrote {} bytes to {:?}", json.len(), self.path);
        Ok(())
    }
}
