use crate::SolidAccessError;
use async_trait::async_trait;
use solid_access_common::ConditionalSync;
use solid_access_graph::Iri;

/// The HTTP methods this crate issues
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Method {
    /// Retrieve a resource
    Get,
    /// Retrieve a resource's headers only
    Head,
    /// Replace a resource
    Put,
}

impl Method {
    /// The method as it appears on the wire
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Head => "HEAD",
            Method::Put => "PUT",
        }
    }
}

/// A single outgoing request
#[derive(Clone, Debug)]
pub struct FetchRequest {
    /// The HTTP method
    pub method: Method,
    /// The absolute URL to request
    pub url: Iri,
    /// Request headers, in order
    pub headers: Vec<(String, String)>,
    /// An optional request body
    pub body: Option<String>,
}

impl FetchRequest {
    /// A GET request for the given URL
    pub fn get(url: &Iri) -> Self {
        FetchRequest {
            method: Method::Get,
            url: url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A HEAD request for the given URL
    pub fn head(url: &Iri) -> Self {
        FetchRequest {
            method: Method::Head,
            url: url.clone(),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A PUT request that replaces the given URL with `body`
    pub fn put(url: &Iri, content_type: &str, body: String) -> Self {
        FetchRequest {
            method: Method::Put,
            url: url.clone(),
            headers: vec![("Content-Type".to_owned(), content_type.to_owned())],
            body: Some(body),
        }
    }
}

/// A received response
#[derive(Clone, Debug)]
pub struct FetchResponse {
    /// The HTTP status code
    pub status: u16,
    /// The status text accompanying the code
    pub status_text: String,
    /// Response headers, in order
    pub headers: Vec<(String, String)>,
    /// The response body, when one was transferred
    pub body: String,
}

impl FetchResponse {
    /// Whether the status code signals success
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The first header with the given name, compared case-insensitively
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Every header with the given name, compared case-insensitively
    pub fn headers_named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a str> {
        self.headers
            .iter()
            .filter(move |(header, _)| header.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// The transport seam of this crate.
///
/// Every network access — authorization discovery, ACL and ACR retrieval,
/// and saving updated authorization graphs — goes through an implementation
/// of this trait supplied by the caller. Implementations must not retry or
/// cache: the engines above rely on seeing each failure exactly once.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Fetch: ConditionalSync {
    /// Issue a single request and await its response. A response with a
    /// non-success status is returned as `Ok`; only transport failures
    /// (connection refused, aborted, and the like) are errors.
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, SolidAccessError>;
}

/// The batteries-included [`Fetch`] implementation, backed by a
/// [`reqwest::Client`]
#[derive(Clone, Debug, Default)]
pub struct ReqwestFetch {
    client: reqwest::Client,
}

impl ReqwestFetch {
    /// Wrap an existing [`reqwest::Client`], preserving whatever middleware
    /// or authentication it carries
    pub fn new(client: reqwest::Client) -> Self {
        ReqwestFetch { client }
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Fetch for ReqwestFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, SolidAccessError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Head => reqwest::Method::HEAD,
            Method::Put => reqwest::Method::PUT,
        };

        let mut builder = self.client.request(method, request.url.as_str());
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|error| SolidAccessError::Fetch(error.to_string()))?;

        let status = response.status().as_u16();
        let status_text = response
            .status()
            .canonical_reason()
            .unwrap_or("")
            .to_owned();
        let headers = response
            .headers()
            .iter()
            .map(|(name, value)| {
                (
                    name.as_str().to_owned(),
                    String::from_utf8_lossy(value.as_bytes()).into_owned(),
                )
            })
            .collect();
        let body = response
            .text()
            .await
            .map_err(|error| SolidAccessError::Fetch(error.to_string()))?;

        Ok(FetchResponse {
            status,
            status_text,
            headers,
            body,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn response_with_headers(headers: Vec<(String, String)>) -> FetchResponse {
        FetchResponse {
            status: 200,
            status_text: "OK".into(),
            headers,
            body: String::new(),
        }
    }

    #[test]
    fn header_lookup_is_case_insensitive_and_returns_the_first_match() {
        let response = response_with_headers(vec![
            ("Content-Type".into(), "text/turtle".into()),
            ("Link".into(), "<a>; rel=\"acl\"".into()),
            ("link".into(), "<b>; rel=\"type\"".into()),
        ]);

        assert_eq!(response.header("content-type"), Some("text/turtle"));
        assert_eq!(response.header("LINK"), Some("<a>; rel=\"acl\""));
        assert_eq!(response.header("wac-allow"), None);
        assert_eq!(
            response.headers_named("link").collect::<Vec<_>>(),
            vec!["<a>; rel=\"acl\"", "<b>; rel=\"type\""]
        );
    }
}
