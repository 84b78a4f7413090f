use intervu_config::ApiConfig;
use intervu_domain::{ApiRequest, Error, HttpResponse, Result};
use intervu_services::HttpInfra;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use reqwest::{Client, Url};
use tracing::debug;

const VERSION: &str = match option_env!("APP_VERSION") {
    None => env!("CARGO_PKG_VERSION"),
    Some(v) => v,
};

/// reqwest-backed transport for the interview API
pub struct IntervuHttpService {
    client: Client,
    base_url: Url,
}

impl IntervuHttpService {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout())
            .timeout(config.read_timeout())
            .build()
            .map_err(|e| Error::Network(format!("HTTP client could not be built: {e}")))?;

        // `Url::join` drops the last segment of a base without a trailing slash
        let mut base_url = config.base_url.clone();
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }

        Ok(Self { client, base_url })
    }

    fn resolve(&self, path: &str) -> Result<Url> {
        if path.contains("://") || path.contains("..") {
            return Err(Error::Validation(format!("Refusing to request path {path}")));
        }
        self.base_url
            .join(path.trim_start_matches('/'))
            .map_err(|e| Error::Validation(format!("Invalid request path {path}: {e}")))
    }

    fn headers(&self, request: &ApiRequest) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&format!("intervu/{VERSION}"))
                .unwrap_or(HeaderValue::from_static("intervu")),
        );
        headers.insert(
            "x-app-version",
            HeaderValue::from_str(format!("v{VERSION}").as_str())
                .unwrap_or(HeaderValue::from_static("v0.1.0-dev")),
        );
        if request.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        if let Some(token) = &request.authorization
            && let Ok(value) = HeaderValue::from_str(&token.bearer())
        {
            headers.insert(AUTHORIZATION, value);
        }
        debug!(headers = ?Self::sanitize_headers(&headers), "Request Headers");
        headers
    }

    fn sanitize_headers(headers: &HeaderMap) -> HeaderMap {
        let sensitive_headers = [AUTHORIZATION.as_str()];
        headers
            .iter()
            .map(|(name, value)| {
                let name_str = name.as_str().to_lowercase();
                let value_str = if sensitive_headers.contains(&name_str.as_str()) {
                    HeaderValue::from_static("[REDACTED]")
                } else {
                    value.clone()
                };
                (name.clone(), value_str)
            })
            .collect()
    }
}

#[async_trait::async_trait]
impl HttpInfra for IntervuHttpService {
    async fn execute(&self, request: &ApiRequest) -> Result<HttpResponse> {
        let url = self.resolve(&request.path)?;
        debug!(method = %request.method, url = %url, "HTTP request");

        let mut builder = self
            .client
            .request(request.method.clone(), url)
            .headers(self.headers(request));
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;
        let status = response.status();
        let body = response
            .bytes()
            .await
            .map_err(|e| Error::Network(e.to_string()))?;

        debug!(status = %status, bytes = body.len(), "HTTP response");
        Ok(HttpResponse::new(status, body))
    }
}
