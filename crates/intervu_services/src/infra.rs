use intervu_domain::{ApiRequest, CookieOptions, HttpResponse, Navigation, Result};

/// Transport for API calls. Implementations resolve `request.path` against
/// the configured base URL and attach `request.authorization` as a bearer
/// header when present.
///
/// Any status code is a successful call at this level; only transport
/// failures are errors.
#[async_trait::async_trait]
pub trait HttpInfra: Send + Sync + 'static {
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse>;
}

/// Persistent string storage, the counterpart of browser local storage
#[async_trait::async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    async fn get_item(&self, key: &str) -> Result<Option<String>>;
    async fn set_item(&self, key: &str, value: &str) -> Result<()>;
    async fn remove_item(&self, key: &str) -> Result<()>;
}

#[async_trait::async_trait]
pub trait CookieStore: Send + Sync + 'static {
    async fn get_cookie(&self, name: &str) -> Result<Option<String>>;
    async fn set_cookie(&self, name: &str, value: &str, options: &CookieOptions) -> Result<()>;
    async fn remove_cookie(&self, name: &str) -> Result<()>;
}

/// Receives screen transitions requested by the services
pub trait NavigationInfra: Send + Sync + 'static {
    fn navigate(&self, navigation: Navigation);
}

/// Everything the services need from the outside world
pub trait Infrastructure: HttpInfra + KeyValueStore + CookieStore + NavigationInfra {}

impl<T> Infrastructure for T where T: HttpInfra + KeyValueStore + CookieStore + NavigationInfra {}
