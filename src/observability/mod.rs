//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing spans → tracing-opentelemetry → OpenTelemetry SDK → OtlpFileExporter → JSON lines
//! ```
//!
//! Traces land in `~/.local/share/zellij/knowledgelink/knowledgelink-otlp.json`,
//! rotated at 10MB with three numbered backups. Request spans carry their trace
//! context through the host, so a reply's handling joins the trace of the event
//! that issued the request.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `exporter`: OTLP JSON span exporter and tracer provider
//! - `rotating`: Size-rotated line writer

mod exporter;
mod init;
mod rotating;

pub use init::init_tracing;
