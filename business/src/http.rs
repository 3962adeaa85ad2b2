//! Send-safe HTTP client used by commands.
//!
//! `reqwest::Response` is not `Send` on wasm32 (it wraps JS promises), while
//! commands must return `Send` futures. On native the request runs on reqwest
//! directly; on wasm32 it is spawned on the JS thread with `spawn_local` and
//! the finished [`Response`] comes back through a `flume` channel.

use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
        }
    }
}

/// A fully buffered response holding only owned data.
#[derive(Debug, Clone)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Body as text, replacing invalid UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: serde::de::DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// The request never produced a response.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{method} {url} failed: {message}")]
pub struct HttpError {
    pub method: &'static str,
    pub url: String,
    pub message: String,
}

pub type HttpResult<T> = Result<T, HttpError>;

#[derive(Debug, Clone)]
pub struct RequestBuilder {
    method: Method,
    url: String,
    headers: HashMap<String, String>,
    body: Option<Vec<u8>>,
}

impl RequestBuilder {
    fn new(method: Method, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: HashMap::new(),
            body: None,
        }
    }

    pub fn method(&self) -> Method {
        self.method
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Serialize `value` as the body and set `content-type: application/json`.
    pub fn json<T: serde::Serialize>(mut self, value: &T) -> Result<Self, serde_json::Error> {
        self.body = Some(serde_json::to_vec(value)?);
        self.headers
            .insert("content-type".to_owned(), "application/json".to_owned());
        Ok(self)
    }

    pub async fn send(self) -> HttpResult<Response> {
        #[cfg(not(target_arch = "wasm32"))]
        {
            execute(self).await
        }

        #[cfg(target_arch = "wasm32")]
        {
            self.send_wasm().await
        }
    }

    #[cfg(target_arch = "wasm32")]
    async fn send_wasm(self) -> HttpResult<Response> {
        let (tx, rx) = flume::bounded::<HttpResult<Response>>(1);
        let method = self.method.as_str();
        let url = self.url.clone();

        wasm_bindgen_futures::spawn_local(async move {
            let result = execute(self).await;
            // Receiver is gone when the command was dropped.
            let _ = tx.send_async(result).await;
        });

        rx.recv_async().await.map_err(|_| HttpError {
            method,
            url,
            message: "request dropped before completion".to_owned(),
        })?
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn client() -> reqwest::Client {
    static CLIENT: std::sync::OnceLock<reqwest::Client> = std::sync::OnceLock::new();
    CLIENT.get_or_init(reqwest::Client::new).clone()
}

#[cfg(target_arch = "wasm32")]
fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn execute(request: RequestBuilder) -> HttpResult<Response> {
    let RequestBuilder {
        method,
        url,
        headers,
        body,
    } = request;
    let fail = |err: reqwest::Error| HttpError {
        method: method.as_str(),
        url: url.clone(),
        message: err.to_string(),
    };

    let client = client();
    let mut builder = match method {
        Method::Get => client.get(&url),
        Method::Post => client.post(&url),
        Method::Patch => client.patch(&url),
        Method::Delete => client.delete(&url),
    };
    for (name, value) in &headers {
        builder = builder.header(name, value);
    }
    if let Some(body) = body {
        builder = builder.body(body);
    }

    let response = builder.send().await.map_err(fail)?;
    let status = response.status().as_u16();
    let body = response.bytes().await.map_err(fail)?.to_vec();

    Ok(Response { status, body })
}

/// Entry point for building requests.
pub struct Client;

impl Client {
    pub fn get(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Get, url)
    }

    pub fn post(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Post, url)
    }

    pub fn patch(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Patch, url)
    }

    pub fn delete(url: impl Into<String>) -> RequestBuilder {
        RequestBuilder::new(Method::Delete, url)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response(status: u16, body: &[u8]) -> Response {
        Response {
            status,
            body: body.to_vec(),
        }
    }

    #[test]
    fn success_is_any_2xx() {
        assert!(response(200, b"").is_success());
        assert!(response(201, b"").is_success());
        assert!(response(204, b"").is_success());
        assert!(!response(304, b"").is_success());
        assert!(!response(500, b"").is_success());
    }

    #[test]
    fn text_replaces_invalid_utf8() {
        assert_eq!(response(200, b"ok").text(), "ok");
        assert_eq!(response(200, &[b'o', 0xFF]).text(), "o\u{FFFD}");
    }

    #[test]
    fn json_body_sets_content_type() {
        let builder = Client::patch("http://localhost/employees/3")
            .json(&serde_json::json!({ "name": "Ada" }))
            .unwrap();

        assert_eq!(builder.method(), Method::Patch);
        assert_eq!(builder.url(), "http://localhost/employees/3");
        assert_eq!(
            builder.headers.get("content-type").map(String::as_str),
            Some("application/json")
        );
        assert_eq!(builder.body.as_deref(), Some(br#"{"name":"Ada"}"#.as_slice()));
    }
}
