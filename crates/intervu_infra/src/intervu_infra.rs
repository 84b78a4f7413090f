use std::sync::Arc;

use anyhow::Context;
use intervu_config::IntervuConfig;
use intervu_domain::{ApiRequest, CookieOptions, HttpResponse, Navigation, Result};
use intervu_services::{CookieStore, HttpInfra, KeyValueStore, NavigationInfra};

use crate::{FileCookieStore, FileKeyValueStore, IntervuHttpService, RouteNavigator};

/// Production infrastructure: reqwest transport, file-backed storage and an
/// in-process navigator
#[derive(Clone)]
pub struct IntervuInfra {
    http_service: Arc<IntervuHttpService>,
    local_storage: Arc<FileKeyValueStore>,
    cookie_store: Arc<FileCookieStore>,
    navigator: Arc<RouteNavigator>,
}

impl IntervuInfra {
    pub fn new(config: &IntervuConfig) -> anyhow::Result<Self> {
        let storage_dir = config
            .storage
            .resolve_dir()
            .context("Failed to resolve the storage directory")?;
        let http_service =
            IntervuHttpService::new(&config.api).context("Failed to create the HTTP client")?;

        Ok(Self {
            http_service: Arc::new(http_service),
            local_storage: Arc::new(FileKeyValueStore::new(&storage_dir)),
            cookie_store: Arc::new(FileCookieStore::new(&storage_dir)),
            navigator: Arc::new(RouteNavigator::new()),
        })
    }

    pub fn navigator(&self) -> &RouteNavigator {
        &self.navigator
    }
}

#[async_trait::async_trait]
impl HttpInfra for IntervuInfra {
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse> {
        self.http_service.execute(request).await
    }
}

#[async_trait::async_trait]
impl KeyValueStore for IntervuInfra {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        self.local_storage.get_item(key).await
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.local_storage.set_item(key, value).await
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.local_storage.remove_item(key).await
    }
}

#[async_trait::async_trait]
impl CookieStore for IntervuInfra {
    async fn get_cookie(&self, name: &str) -> Result<Option<String>> {
        self.cookie_store.get_cookie(name).await
    }

    async fn set_cookie(&self, name: &str, value: &str, options: &CookieOptions) -> Result<()> {
        self.cookie_store.set_cookie(name, value, options).await
    }

    async fn remove_cookie(&self, name: &str) -> Result<()> {
        self.cookie_store.remove_cookie(name).await
    }
}

impl NavigationInfra for IntervuInfra {
    fn navigate(&self, navigation: Navigation) {
        self.navigator.navigate(navigation)
    }
}
