use std::path::{Path, PathBuf};

use intervu_domain::{Error, Result};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;
use tracing::warn;

fn storage_error(path: &Path, error: impl std::fmt::Display) -> Error {
    Error::Storage(format!("{}: {error}", path.display()))
}

/// A JSON document on disk with an in-memory copy.
///
/// A missing or unreadable file reads as `T::default()`. Writes replace the
/// file through a temporary sibling and are readable by the owner only.
pub(crate) struct JsonFile<T> {
    path: PathBuf,
    cache: Mutex<Option<T>>,
}

impl<T: Serialize + DeserializeOwned + Default + Clone> JsonFile<T> {
    pub fn new(path: PathBuf) -> Self {
        Self { path, cache: Mutex::new(None) }
    }

    pub async fn read(&self) -> Result<T> {
        let mut cache = self.cache.lock().await;
        if let Some(value) = cache.as_ref() {
            return Ok(value.clone());
        }
        let value = self.read_file().await?;
        *cache = Some(value.clone());
        Ok(value)
    }

    /// Applies `f` to the current document and persists the result
    pub async fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> Result<R> {
        let mut cache = self.cache.lock().await;
        let mut value = match cache.take() {
            Some(value) => value,
            None => self.read_file().await?,
        };
        let result = f(&mut value);
        self.write_file(&value).await?;
        *cache = Some(value);
        Ok(result)
    }

    async fn read_file(&self) -> Result<T> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(T::default()),
            Err(e) => return Err(storage_error(&self.path, e)),
        };
        match serde_json::from_str(&content) {
            Ok(value) => Ok(value),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring unreadable store");
                Ok(T::default())
            }
        }
    }

    async fn write_file(&self, value: &T) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| storage_error(parent, e))?;
        }

        let temp_path = self.path.with_extension("json.tmp");
        let content =
            serde_json::to_string_pretty(value).map_err(|e| storage_error(&self.path, e))?;
        tokio::fs::write(&temp_path, content)
            .await
            .map_err(|e| storage_error(&temp_path, e))?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let permissions = std::fs::Permissions::from_mode(0o600);
            tokio::fs::set_permissions(&temp_path, permissions)
                .await
                .map_err(|e| storage_error(&temp_path, e))?;
        }

        tokio::fs::rename(&temp_path, &self.path)
            .await
            .map_err(|e| storage_error(&self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use pretty_assertions::assert_eq;

    use super::*;

    type Fixture = JsonFile<HashMap<String, String>>;

    #[tokio::test]
    async fn test_missing_file_reads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let fixture = Fixture::new(dir.path().join("absent.json"));

        let actual = fixture.read().await.unwrap();

        assert!(actual.is_empty());
    }

    #[tokio::test]
    async fn test_update_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("store.json");

        Fixture::new(path.clone())
            .update(|map| map.insert("k".to_string(), "v".to_string()))
            .await
            .unwrap();
        let actual = Fixture::new(path).read().await.unwrap();

        assert_eq!(actual.get("k"), Some(&"v".to_string()));
    }

    #[tokio::test]
    async fn test_corrupt_file_reads_as_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("store.json");
        std::fs::write(&path, "{not json").unwrap();

        let actual = Fixture::new(path).read().await.unwrap();

        assert!(actual.is_empty());
    }
}
