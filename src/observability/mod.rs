//! OpenTelemetry-based observability with file-based trace export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK tracer → OtlpFileExporter → JSON lines
//! ```
//!
//! Traces go to `~/.local/share/zellij/zapprove/zapprove-otlp.json`, rotated
//! at 10 MiB with three backups. The filter comes from the `trace_level`
//! plugin option and defaults to `info`.
//!
//! # Modules
//!
//! - `init`: Subscriber setup
//! - `exporter`: `SpanExporter` implementation and tracer provider
//! - `otlp`: OTLP JSON encoding
//! - `rotating`: Size-rotated file writer

mod exporter;
mod init;
mod otlp;
mod rotating;

pub use init::{init_tracing, TRACE_FILE_NAME};
