//! HTTP transport: the seam between the view models and the admin REST API.
//!
//! Every method takes an API path (e.g. `/api/admin/parti/7`) and returns
//! `AppError::Http` for any non-2xx response, carrying the response text or
//! the status reason phrase.

use crate::config::ConsoleSettings;
use crate::error::AppError;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde_json::Value;

#[async_trait]
pub trait Transport: Send + Sync {
    /// GET with query parameters. Pairs with an empty value are not sent.
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, AppError>;

    /// POST a JSON body. `None` when the server answered without content.
    async fn post(&self, path: &str, body: &Value) -> Result<Option<Value>, AppError>;

    /// PATCH a JSON body. `Value::Null` when the server answered without content.
    async fn patch(&self, path: &str, body: &Value) -> Result<Value, AppError>;

    async fn delete(&self, path: &str) -> Result<(), AppError>;
}

#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn from_settings(settings: &ConsoleSettings) -> Result<Self, AppError> {
        let client = Client::builder().timeout(settings.request_timeout).build()?;
        Ok(Self::new(settings.api_base_url.clone(), client))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(method = %method, path = %path, "request");
        self.client.request(method, self.url(path))
    }

    async fn send(&self, req: RequestBuilder) -> Result<Response, AppError> {
        let res = req.send().await?;
        let status = res.status();
        if status.is_success() {
            return Ok(res);
        }
        let body = res.text().await.ok();
        tracing::debug!(status = %status, "request failed");
        Err(AppError::from_status(status, body))
    }

    async fn json_body(res: Response) -> Result<Option<Value>, AppError> {
        if res.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }
        let bytes = res.bytes().await?;
        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Ok(None);
        }
        Ok(Some(serde_json::from_slice(&bytes)?))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn get(&self, path: &str, query: &[(String, String)]) -> Result<Value, AppError> {
        let params: Vec<&(String, String)> = query.iter().filter(|(_, v)| !v.is_empty()).collect();
        let res = self.send(self.request(Method::GET, path).query(&params)).await?;
        Ok(Self::json_body(res).await?.unwrap_or(Value::Null))
    }

    async fn post(&self, path: &str, body: &Value) -> Result<Option<Value>, AppError> {
        let res = self.send(self.request(Method::POST, path).json(body)).await?;
        Self::json_body(res).await
    }

    async fn patch(&self, path: &str, body: &Value) -> Result<Value, AppError> {
        let res = self.send(self.request(Method::PATCH, path).json(body)).await?;
        Ok(Self::json_body(res).await?.unwrap_or(Value::Null))
    }

    async fn delete(&self, path: &str) -> Result<(), AppError> {
        self.send(self.request(Method::DELETE, path)).await?;
        Ok(())
    }
}
