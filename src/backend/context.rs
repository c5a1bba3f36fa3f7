//! Request context carried through host web requests.
//!
//! Zellij hands the context map of a `web_request` back unchanged with its result.
//! The plugin uses it to route the reply to the controller that issued the request,
//! to recognize stale or cancelled replies, and to continue the originating trace.

use std::collections::BTreeMap;
use std::fmt;

/// Marker value identifying replies to requests issued by this plugin.
pub const CONTEXT_MARKER: &str = "knowledgelink";

const KEY_PLUGIN: &str = "plugin";
const KEY_ID: &str = "id";
const KEY_KIND: &str = "kind";
const KEY_EPOCH: &str = "epoch";
const KEY_TRACE_ID: &str = "trace_id";
const KEY_PARENT_SPAN_ID: &str = "parent_span_id";

/// Identifier of one outgoing request. Acts as its cancellation token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(pub u64);

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Which collaborator operation a request performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Session,
    SignOut,
    ListLinks,
    CreateLink,
    SearchLinks,
}

impl RequestKind {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Session => "session",
            Self::SignOut => "sign_out",
            Self::ListLinks => "list_links",
            Self::CreateLink => "create_link",
            Self::SearchLinks => "search_links",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "session" => Self::Session,
            "sign_out" => Self::SignOut,
            "list_links" => Self::ListLinks,
            "create_link" => Self::CreateLink,
            "search_links" => Self::SearchLinks,
            _ => return None,
        })
    }
}

/// Distributed tracing context for continuing a trace when the reply arrives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span that issued the request.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Captures the OpenTelemetry context of the current tracing span.
    ///
    /// Returns `None` when no valid span context is active (for example when
    /// tracing is not initialized).
    #[must_use]
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let otel_context = tracing::Span::current().context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if !span_context.is_valid() {
            return None;
        }

        Some(Self {
            trace_id: format!("{:032x}", span_context.trace_id()),
            parent_span_id: format!("{:016x}", span_context.span_id()),
        })
    }

    /// Makes this context the remote parent of spans created while the guard lives.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());

        Some(
            opentelemetry::Context::current()
                .with_remote_span_context(span_context)
                .attach(),
        )
    }
}

/// Everything needed to route and validate a reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    pub id: RequestId,
    pub kind: RequestKind,
    /// Session epoch the request was issued under.
    pub epoch: u64,
    pub trace: Option<TraceContext>,
}

impl RequestContext {
    /// Creates a context for a new request, capturing the current trace.
    #[must_use]
    pub fn new(id: RequestId, kind: RequestKind, epoch: u64) -> Self {
        Self {
            id,
            kind,
            epoch,
            trace: TraceContext::from_current(),
        }
    }

    /// Encodes the context as the string map Zellij carries with the request.
    #[must_use]
    pub fn to_map(&self) -> BTreeMap<String, String> {
        let mut map = BTreeMap::new();
        map.insert(KEY_PLUGIN.to_string(), CONTEXT_MARKER.to_string());
        map.insert(KEY_ID.to_string(), self.id.0.to_string());
        map.insert(KEY_KIND.to_string(), self.kind.as_str().to_string());
        map.insert(KEY_EPOCH.to_string(), self.epoch.to_string());
        if let Some(trace) = &self.trace {
            map.insert(KEY_TRACE_ID.to_string(), trace.trace_id.clone());
            map.insert(KEY_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }
        map
    }

    /// Decodes a context map handed back by the host.
    ///
    /// Returns `None` for maps that were not produced by [`Self::to_map`], such as
    /// replies to requests issued by other plugins or malformed entries.
    #[must_use]
    pub fn from_map(map: &BTreeMap<String, String>) -> Option<Self> {
        if map.get(KEY_PLUGIN).map(String::as_str) != Some(CONTEXT_MARKER) {
            return None;
        }

        let id = map.get(KEY_ID)?.parse().ok().map(RequestId)?;
        let kind = RequestKind::parse(map.get(KEY_KIND)?)?;
        let epoch = map.get(KEY_EPOCH)?.parse().ok()?;
        let trace = match (map.get(KEY_TRACE_ID), map.get(KEY_PARENT_SPAN_ID)) {
            (Some(trace_id), Some(parent_span_id)) => Some(TraceContext {
                trace_id: trace_id.clone(),
                parent_span_id: parent_span_id.clone(),
            }),
            _ => None,
        };

        Some(Self { id, kind, epoch, trace })
    }
}
