use std::collections::{HashMap, VecDeque};
use std::sync::Mutex;

use http::StatusCode;
use intervu_domain::{
    ACCESS_TOKEN_KEY, ApiRequest, CookieOptions, Error, HttpResponse, Navigation,
    REFRESH_TOKEN_COOKIE, Result,
};

use crate::{CookieStore, HttpInfra, KeyValueStore, NavigationInfra};

#[derive(Debug, Clone)]
pub enum Reply {
    Status(u16, String),
    NetworkDown,
}

impl Reply {
    pub fn ok(body: serde_json::Value) -> Self {
        Reply::Status(200, body.to_string())
    }
}

/// Scripted in-memory infrastructure. Replies are queued per path and
/// consumed in order; an unscripted path answers 404. Every request yields
/// once first so joined requests interleave.
#[derive(Default)]
pub struct MockInfra {
    replies: Mutex<HashMap<String, VecDeque<Reply>>>,
    requests: Mutex<Vec<ApiRequest>>,
    items: Mutex<HashMap<String, String>>,
    cookies: Mutex<HashMap<String, (String, CookieOptions)>>,
    navigations: Mutex<Vec<Navigation>>,
}

impl MockInfra {
    pub fn with_tokens(self, access: &str, refresh: &str) -> Self {
        self.items
            .lock()
            .unwrap()
            .insert(ACCESS_TOKEN_KEY.to_string(), access.to_string());
        self.cookies.lock().unwrap().insert(
            REFRESH_TOKEN_COOKIE.to_string(),
            (refresh.to_string(), CookieOptions::refresh_token()),
        );
        self
    }

    pub fn reply(self, path: &str, reply: Reply) -> Self {
        self.replies
            .lock()
            .unwrap()
            .entry(path.to_string())
            .or_default()
            .push_back(reply);
        self
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn requests_to(&self, path: &str) -> Vec<ApiRequest> {
        self.requests()
            .into_iter()
            .filter(|request| request.path == path)
            .collect()
    }

    pub fn item(&self, key: &str) -> Option<String> {
        self.items.lock().unwrap().get(key).cloned()
    }

    pub fn cookie(&self, name: &str) -> Option<(String, CookieOptions)> {
        self.cookies.lock().unwrap().get(name).cloned()
    }

    pub fn navigations(&self) -> Vec<Navigation> {
        self.navigations.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl HttpInfra for MockInfra {
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse> {
        tokio::task::yield_now().await;
        self.requests.lock().unwrap().push(request.clone());
        let reply = self
            .replies
            .lock()
            .unwrap()
            .get_mut(&request.path)
            .and_then(VecDeque::pop_front)
            .unwrap_or(Reply::Status(404, String::new()));
        match reply {
            Reply::Status(status, body) => Ok(HttpResponse::new(
                StatusCode::from_u16(status).unwrap(),
                body,
            )),
            Reply::NetworkDown => Err(Error::Network("connection refused".to_string())),
        }
    }
}

#[async_trait::async_trait]
impl KeyValueStore for MockInfra {
    async fn get_item(&self, key: &str) -> Result<Option<String>> {
        Ok(self.item(key))
    }

    async fn set_item(&self, key: &str, value: &str) -> Result<()> {
        self.items
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove_item(&self, key: &str) -> Result<()> {
        self.items.lock().unwrap().remove(key);
        Ok(())
    }
}

#[async_trait::async_trait]
impl CookieStore for MockInfra {
    async fn get_cookie(&self, name: &str) -> Result<Option<String>> {
        Ok(self.cookie(name).map(|(value, _)| value))
    }

    async fn set_cookie(&self, name: &str, value: &str, options: &CookieOptions) -> Result<()> {
        self.cookies
            .lock()
            .unwrap()
            .insert(name.to_string(), (value.to_string(), options.clone()));
        Ok(())
    }

    async fn remove_cookie(&self, name: &str) -> Result<()> {
        self.cookies.lock().unwrap().remove(name);
        Ok(())
    }
}

impl NavigationInfra for MockInfra {
    fn navigate(&self, navigation: Navigation) {
        self.navigations.lock().unwrap().push(navigation);
    }
}
