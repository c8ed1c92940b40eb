use std::sync::Arc;
use std::time::Duration;

use reqwest::{header::AUTHORIZATION, Method, RequestBuilder};
use serde::{de::DeserializeOwned, Serialize};

use super::FetchError;
use crate::models::user::{AuthResponse, Credentials};

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: Arc<str>,
}

impl ApiClient {
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, FetchError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder.build().map_err(FetchError::Network)?;

        Ok(Self {
            http,
            base_url: Arc::from(base_url.trim_end_matches('/')),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, token: Option<&str>, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let req = self.http.request(method, url);
        match token {
            Some(token) => req.header(AUTHORIZATION, format!("Bearer {token}")),
            None => req,
        }
    }

    /// Send a request and return the raw body of a 2xx response.
    async fn execute(&self, req: RequestBuilder) -> Result<Vec<u8>, FetchError> {
        let response = req.send().await.map_err(FetchError::Network)?;
        let status = response.status();
        let body = response.bytes().await.map_err(FetchError::Network)?;

        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                body: String::from_utf8_lossy(&body).into_owned(),
            });
        }
        Ok(body.to_vec())
    }

    pub(super) async fn get_json<T: DeserializeOwned>(
        &self,
        token: &str,
        path: &str,
    ) -> Result<T, FetchError> {
        let body = self.execute(self.request(Method::GET, Some(token), path)).await?;
        serde_json::from_slice(&body).map_err(FetchError::Decode)
    }

    /// Fire a write request. The response body is not needed: dashboards
    /// re-fetch after every successful write.
    pub(super) async fn send<B: Serialize + ?Sized>(
        &self,
        method: Method,
        token: &str,
        path: &str,
        body: Option<&B>,
    ) -> Result<(), FetchError> {
        let mut req = self.request(method.clone(), Some(token), path);
        if let Some(body) = body {
            req = req.json(body);
        }
        self.execute(req).await?;
        tracing::debug!(method = %method, path = %path, "Health API write accepted");
        Ok(())
    }

    /// POST /auth/token
    pub async fn login(&self, username: &str, password: &str) -> Result<AuthResponse, FetchError> {
        let req = self
            .request(Method::POST, None, "/auth/token")
            .json(&Credentials { username, password });
        let body = self.execute(req).await?;
        serde_json::from_slice(&body).map_err(FetchError::Decode)
    }
}
