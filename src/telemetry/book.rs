//! Span and metric helpers for catalog operations.

use std::time::Instant;

use opentelemetry::KeyValue;
use tracing::Span;

use super::metrics;
use crate::error::Result;

/// Start a span for one catalog operation.
///
/// `book.outcome` is filled in by [`record_outcome`].
pub fn start_book_span(operation: &'static str, title: Option<&str>) -> Span {
    tracing::info_span!(
        "book.operation",
        "book.operation" = operation,
        "book.title" = title,
        "book.outcome" = tracing::field::Empty,
    )
}

/// Record the outcome of an operation on its span and in metrics.
pub fn record_outcome<T>(
    span: &Span,
    operation: &'static str,
    started: Instant,
    result: &Result<T>,
) {
    let outcome = match result {
        Ok(_) => "ok",
        Err(e) => e.kind(),
    };
    span.record("book.outcome", outcome);

    metrics::book_operations().add(
        1,
        &[
            KeyValue::new("operation", operation),
            KeyValue::new("result", outcome),
        ],
    );
    metrics::operation_duration_ms().record(
        started.elapsed().as_secs_f64() * 1000.0,
        &[KeyValue::new("operation", operation)],
    );
}
