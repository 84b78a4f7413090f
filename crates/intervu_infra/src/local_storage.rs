use std::collections::BTreeMap;
use std::path::Path;

use intervu_domain::Result;
use intervu_services::KeyValueStore;

use crate::json_file::JsonFile;

pub const LOCAL_STORAGE_FILE: &str = "local_storage.json";

/// String map kept in `local_storage.json` under the storage directory
pub struct FileKeyValueStore {
    file: JsonFile<BTreeMap<String, String>>,
}

impl FileKeyValueStore {
    pub fn new(dir: &Path) -> Self {
        Self { file: JsonFile::new(dir.join(LOCAL_STORAGE_FILE)) }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for FileKeyValueStore {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.file.read().await?.get(key).cloned())
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.file
            .update(|items| {
                items.insert(key.to_string(), value.to_string());
            })
            .await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.file
            .update(|items| {
                items.remove(key);
            })
            .await
    }
}
