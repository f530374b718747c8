// src/utils/http.rs

//! HTTP client utilities.
//!
//! Every vendor call goes through [`Transport`], so the fetch layer can be
//! driven by an in-memory fake in tests.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::{self, HeaderMap, HeaderValue};
use serde_json::Value;
use url::Url;

use crate::error::{AppError, Result};
use crate::models::ApiConfig;

const WIDGET_ORIGIN: &str = "http://smart-catalog.profitbase.ru";
const WIDGET_REFERER: &str = "http://smart-catalog.profitbase.ru/";

/// Single-call JSON request/response seam.
pub trait Transport {
    /// GET `url` with query pairs; non-2xx is an error.
    fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value>;

    /// POST a JSON body to `url`; non-2xx is an error.
    fn post_json(&self, url: &str, body: &Value) -> Result<Value>;
}

/// Blocking reqwest transport.
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    pub fn new(config: &ApiConfig) -> Result<Self> {
        Ok(Self {
            client: create_client(config)?,
        })
    }

    fn send(request: RequestBuilder, url: &str) -> Result<Value> {
        let response = request.send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Status {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }
        Ok(response.json()?)
    }
}

impl Transport for HttpClient {
    fn get_json(&self, url: &str, query: &[(String, String)]) -> Result<Value> {
        log::debug!("GET {url}");
        Self::send(self.client.get(url).query(query), url)
    }

    fn post_json(&self, url: &str, body: &Value) -> Result<Value> {
        log::debug!("POST {url}");
        Self::send(self.client.post(url).json(body), url)
    }
}

/// Create a configured blocking HTTP client with the widget headers.
pub fn create_client(config: &ApiConfig) -> Result<Client> {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCEPT,
        HeaderValue::from_static("application/json, text/plain, */*"),
    );
    headers.insert(header::ORIGIN, HeaderValue::from_static(WIDGET_ORIGIN));
    headers.insert(header::REFERER, HeaderValue::from_static(WIDGET_REFERER));
    headers.insert(
        header::ACCEPT_LANGUAGE,
        HeaderValue::from_static("ru-RU,ru;q=0.9,en-US;q=0.8,en;q=0.7"),
    );

    Ok(Client::builder()
        .user_agent(&config.user_agent)
        .default_headers(headers)
        .timeout(Duration::from_secs(config.timeout_secs))
        .build()?)
}

/// Vendor endpoint URLs for one account.
#[derive(Debug, Clone)]
pub struct ApiEndpoints {
    root: Url,
}

impl ApiEndpoints {
    pub fn from_config(config: &ApiConfig) -> Result<Self> {
        let raw = match &config.base_url {
            Some(base) => base.clone(),
            None => format!(
                "https://{}.profitbase.ru/api/v{}/json/",
                config.account, config.api_version
            ),
        };
        // A root without a trailing slash would lose its last segment on join.
        let raw = if raw.ends_with('/') { raw } else { format!("{raw}/") };
        Ok(Self {
            root: Url::parse(&raw)?,
        })
    }

    pub fn authentication(&self) -> Result<String> {
        self.join("authentication")
    }

    pub fn property(&self) -> Result<String> {
        self.join("property")
    }

    pub fn house(&self) -> Result<String> {
        self.join("house")
    }

    fn join(&self, path: &str) -> Result<String> {
        Ok(self.root.join(path)?.to_string())
    }
}
