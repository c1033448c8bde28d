//! Test utilities for exercising the access engines without a live server

use crate::{Fetch, FetchRequest, FetchResponse, Method, SolidAccessError};
use async_trait::async_trait;
use solid_access_graph::Iri;
use std::collections::HashMap;
use std::sync::Mutex;

impl FetchResponse {
    /// A successful Turtle response carrying the given Link headers
    pub fn turtle(body: impl Into<String>, links: &[&str]) -> Self {
        let mut headers = vec![("Content-Type".to_owned(), "text/turtle".to_owned())];
        for link in links {
            headers.push(("Link".to_owned(), (*link).to_owned()));
        }
        FetchResponse {
            status: 200,
            status_text: "OK".to_owned(),
            headers,
            body: body.into(),
        }
    }

    /// An empty response with the given status
    pub fn status(status: u16) -> Self {
        FetchResponse {
            status,
            status_text: String::new(),
            headers: Vec::new(),
            body: String::new(),
        }
    }

    /// Attach a header to this response
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }
}

/// A [`Fetch`] that serves canned responses from memory and records every
/// request it receives.
///
/// Responses are registered per URL, optionally narrowed to a single
/// method; anything unregistered is answered with 404.
#[derive(Debug, Default)]
pub struct StaticFetch {
    responses: HashMap<(Option<Method>, String), FetchResponse>,
    requests: Mutex<Vec<FetchRequest>>,
}

impl StaticFetch {
    /// Serve `response` for any method on `url`
    pub fn respond(mut self, url: &str, response: FetchResponse) -> Self {
        self.responses.insert((None, url.to_owned()), response);
        self
    }

    /// Serve `response` only for `method` on `url`
    pub fn respond_to(mut self, method: Method, url: &str, response: FetchResponse) -> Self {
        self.responses.insert((Some(method), url.to_owned()), response);
        self
    }

    /// Serve a Turtle document with Link headers for any method on `url`
    pub fn turtle(self, url: &str, links: &[&str], body: &str) -> Self {
        self.respond(url, FetchResponse::turtle(body, links))
    }

    /// Answer `url` with 404
    pub fn not_found(self, url: &str) -> Self {
        self.respond(url, FetchResponse::status(404))
    }

    /// Every request received so far, in order
    pub fn requests(&self) -> Vec<FetchRequest> {
        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .clone()
    }

    /// The bodies of every PUT received so far, in order
    pub fn saved_bodies(&self) -> Vec<(Iri, String)> {
        self.requests()
            .into_iter()
            .filter(|request| request.method == Method::Put)
            .map(|request| (request.url, request.body.unwrap_or_default()))
            .collect()
    }
}

#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
impl Fetch for StaticFetch {
    async fn fetch(&self, request: FetchRequest) -> Result<FetchResponse, SolidAccessError> {
        let response = self
            .responses
            .get(&(Some(request.method), request.url.as_str().to_owned()))
            .or_else(|| {
                self.responses
                    .get(&(None, request.url.as_str().to_owned()))
            })
            .cloned()
            .unwrap_or_else(|| FetchResponse::status(404));

        self.requests
            .lock()
            .expect("request log should not be poisoned")
            .push(request);

        Ok(response)
    }
}
