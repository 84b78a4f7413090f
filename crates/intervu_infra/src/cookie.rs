use std::collections::BTreeMap;
use std::path::Path;

use intervu_domain::{CookieOptions, Result};
use intervu_services::CookieStore;
use serde::{Deserialize, Serialize};

use crate::json_file::JsonFile;

pub const COOKIE_FILE: &str = "cookies.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct StoredCookie {
    value: String,
    #[serde(flatten)]
    options: CookieOptions,
}

/// Cookie jar kept in `cookies.json` under the storage directory. Attributes
/// are stored alongside the value so they survive a restart.
pub struct FileCookieStore {
    file: JsonFile<BTreeMap<String, StoredCookie>>,
}

impl FileCookieStore {
    pub fn new(dir: &Path) -> Self {
        Self { file: JsonFile::new(dir.join(COOKIE_FILE)) }
    }
}

#[async_trait::async_trait]
impl CookieStore for FileCookieStore {
    async fn get_cookie(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .file
            .read()
            .await?
            .get(name)
            .map(|cookie| cookie.value.clone()))
    }

    async fn set_cookie(&self, name: &str, value: &str, options: &CookieOptions) -> Result<()> {
        let cookie = StoredCookie { value: value.to_string(), options: options.clone() };
        self.file
            .update(|cookies| {
                cookies.insert(name.to_string(), cookie);
            })
            .await
    }

    async fn remove_cookie(&self, name: &str) -> Result<()> {
        self.file
            .update(|cookies| {
                cookies.remove(name);
            })
            .await
    }
}
