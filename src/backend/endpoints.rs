//! URL construction and outgoing request building.
//!
//! [`Endpoints`] knows where the identity and link services live; [`ApiClient`]
//! turns an [`ApiRequest`] into an [`OutgoingRequest`] tagged with a fresh request
//! id and the issuing session epoch. Neither performs I/O.

use super::context::{RequestContext, RequestId, RequestKind};
use super::pending::PendingRequest;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use std::collections::BTreeMap;

/// Characters `encodeURIComponent` leaves untouched, removed from the encode set.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Percent-encodes a query string component.
///
/// # Examples
///
/// ```
/// use knowledgelink::backend::encode_query_component;
///
/// assert_eq!(encode_query_component("rust ownership"), "rust%20ownership");
/// assert_eq!(encode_query_component("a&b=c?"), "a%26b%3Dc%3F");
/// ```
#[must_use]
pub fn encode_query_component(value: &str) -> String {
    utf8_percent_encode(value, QUERY_COMPONENT).to_string()
}

/// HTTP method of an outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Collaborator operations the controllers can ask for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiRequest {
    /// Identity service: current session status.
    Session,
    /// Identity service: end the session.
    SignOut,
    /// Backend: full saved-links collection.
    ListLinks,
    /// Backend: store and summarize a URL.
    CreateLink { url: String },
    /// Backend: ranked natural-language search.
    SearchLinks { query: String },
}

impl ApiRequest {
    #[must_use]
    pub const fn kind(&self) -> RequestKind {
        match self {
            Self::Session => RequestKind::Session,
            Self::SignOut => RequestKind::SignOut,
            Self::ListLinks => RequestKind::ListLinks,
            Self::CreateLink { .. } => RequestKind::CreateLink,
            Self::SearchLinks { .. } => RequestKind::SearchLinks,
        }
    }
}

/// A fully-built request for the plugin shim to hand to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub context: RequestContext,
}

/// Service locations.
///
/// `server_url` is the origin of the identity service. `api_base` is the path prefix
/// of the link service on that same origin; empty means the origin root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    server_url: String,
    api_base: String,
    session_cookie: Option<String>,
}

impl Endpoints {
    #[must_use]
    pub fn new(server_url: &str, api_base: &str, session_cookie: Option<String>) -> Self {
        let api_base = api_base.trim().trim_end_matches('/');
        let api_base = if api_base.is_empty() || api_base.starts_with('/') {
            api_base.to_string()
        } else {
            format!("/{api_base}")
        };

        Self {
            server_url: server_url.trim().trim_end_matches('/').to_string(),
            api_base,
            session_cookie,
        }
    }

    fn api(&self, path: &str) -> String {
        format!("{}{}{path}", self.server_url, self.api_base)
    }

    fn auth(&self, path: &str) -> String {
        format!("{}/api/auth{path}", self.server_url)
    }

    /// Page that starts interactive sign-in with the given provider.
    #[must_use]
    pub fn sign_in_page(&self, provider: &str) -> String {
        self.auth(&format!("/signin/{}", encode_query_component(provider)))
    }

    /// Resolves method, URL and body for a request.
    #[must_use]
    pub fn resolve(&self, request: &ApiRequest) -> (HttpMethod, String, Vec<u8>) {
        match request {
            ApiRequest::Session => (HttpMethod::Get, self.auth("/session"), Vec::new()),
            ApiRequest::SignOut => (HttpMethod::Post, self.auth("/signout"), Vec::new()),
            ApiRequest::ListLinks => (HttpMethod::Get, self.api("/api/links"), Vec::new()),
            ApiRequest::CreateLink { url } => (
                HttpMethod::Post,
                self.api("/api/links"),
                serde_json::json!({ "url": url }).to_string().into_bytes(),
            ),
            ApiRequest::SearchLinks { query } => (
                HttpMethod::Get,
                self.api(&format!("/api/search?q={}", encode_query_component(query))),
                Vec::new(),
            ),
        }
    }

    fn headers(&self, has_body: bool) -> BTreeMap<String, String> {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if has_body {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(cookie) = &self.session_cookie {
            headers.insert("Cookie".to_string(), cookie.clone());
        }
        headers
    }
}

/// Issues request ids and builds tagged requests.
#[derive(Debug, Clone)]
pub struct ApiClient {
    endpoints: Endpoints,
    next_id: u64,
    timeout_ticks: u32,
}

impl ApiClient {
    /// Creates a client. `timeout_ticks` bounds every request, one tick per second.
    #[must_use]
    pub const fn new(endpoints: Endpoints, timeout_ticks: u32) -> Self {
        Self {
            endpoints,
            next_id: 1,
            timeout_ticks,
        }
    }

    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Builds a request under the given session epoch.
    ///
    /// Returns the bookkeeping entry the issuing controller keeps while the
    /// request is in flight, and the request for the shim to send.
    pub fn issue(&mut self, request: &ApiRequest, epoch: u64) -> (PendingRequest, OutgoingRequest) {
        let id = RequestId(self.next_id);
        self.next_id += 1;

        let (method, url, body) = self.endpoints.resolve(request);
        let context = RequestContext::new(id, request.kind(), epoch);

        tracing::debug!(request_id = %id, kind = request.kind().as_str(), url = %url, epoch, "issuing request");

        let outgoing = OutgoingRequest {
            method,
            url,
            headers: self.endpoints.headers(!body.is_empty()),
            body,
            context,
        };

        (PendingRequest::new(id, self.timeout_ticks), outgoing)
    }
}
